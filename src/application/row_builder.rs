// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::ItemRecord;
use chrono::{Local, TimeZone};

const BYTE_UNITS: [&str; 9] = ["Bytes", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Human-readable size with base 1024 and at most two decimals, trailing
/// zeros dropped: `1536` → `"1.5 KB"`.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut threshold: u128 = 1024;
    while unit < BYTE_UNITS.len() - 1 && u128::from(bytes) >= threshold {
        unit += 1;
        threshold *= 1024;
    }

    let value = bytes as f64 / 1024f64.powi(unit as i32);
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, BYTE_UNITS[unit])
}

/// Local calendar date of an epoch-seconds timestamp, `M/D/YYYY`.
pub fn format_date(epoch_secs: i64) -> String {
    match Local.timestamp_opt(epoch_secs, 0).single() {
        Some(time) => time.format("%-m/%-d/%Y").to_string(),
        None => String::new(),
    }
}

/// One catalog row, column order: id, title, views, subscriptions,
/// lifetime subscriptions, favorites, lifetime favorites, votes up, votes
/// down, size, updates, comments, created, contributors.
pub fn build_row(record: &ItemRecord) -> Vec<String> {
    vec![
        record.publishedfileid.clone(),
        record.title.clone(),
        record.views.to_string(),
        record.subscriptions.to_string(),
        record.lifetime_subscriptions.to_string(),
        record.favorited.to_string(),
        record.lifetime_favorited.to_string(),
        record.vote_data.votes_up.to_string(),
        record.vote_data.votes_down.to_string(),
        format_bytes(record.file_size),
        record.update_count.to_string(),
        record.comment_count.to_string(),
        format_date(record.time_created),
        record
            .contributors
            .iter()
            .map(|c| c.personaname.as_str())
            .collect::<Vec<_>>()
            .join(";"),
    ]
}
