// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::account::AccountSummary;
use super::lenient::{string_from_any, u64_from_any};
use serde::{Deserialize, Serialize};

/// Up/down vote counts for one item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoteTally {
    #[serde(default, deserialize_with = "u64_from_any")]
    pub votes_up: u64,
    #[serde(default, deserialize_with = "u64_from_any")]
    pub votes_down: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// One item as listed among an account's own published files.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogEntry {
    #[serde(deserialize_with = "string_from_any")]
    pub publishedfileid: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub vote_data: VoteTally,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tag {
    pub tag: String,
}

/// Bulk-detail record for one item.
///
/// `description`, `short_description` and `tags` only live here; they are
/// dropped when the detail is folded into an [`ItemRecord`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemDetail {
    #[serde(deserialize_with = "string_from_any")]
    pub publishedfileid: String,
    /// 1 means the remote service found the item.
    #[serde(default)]
    pub result: i32,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "string_from_any")]
    pub creator: String,
    #[serde(default)]
    pub consumer_app_id: u64,
    #[serde(default, deserialize_with = "u64_from_any")]
    pub file_size: u64,
    #[serde(default)]
    pub time_created: i64,
    #[serde(default)]
    pub time_updated: i64,
    #[serde(default, deserialize_with = "u64_from_any")]
    pub views: u64,
    #[serde(default, deserialize_with = "u64_from_any")]
    pub subscriptions: u64,
    #[serde(default, deserialize_with = "u64_from_any")]
    pub lifetime_subscriptions: u64,
    #[serde(default, deserialize_with = "u64_from_any")]
    pub favorited: u64,
    #[serde(default, deserialize_with = "u64_from_any")]
    pub lifetime_favorited: u64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl ItemDetail {
    pub fn found(&self) -> bool {
        self.result == 1
    }
}

/// Facts read off one rendered item page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageFacts {
    pub comment_count: i64,
    pub update_count: i64,
    /// Resolved contributors; index 0 is treated as the owner.
    pub contributors: Vec<AccountSummary>,
}

impl PageFacts {
    pub fn primary_contributor(&self) -> Option<&AccountSummary> {
        self.contributors.first()
    }
}

/// The canonical aggregated record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemRecord {
    pub publishedfileid: String,
    pub title: String,
    pub creator: String,
    pub consumer_app_id: u64,
    pub views: u64,
    pub subscriptions: u64,
    pub lifetime_subscriptions: u64,
    pub favorited: u64,
    pub lifetime_favorited: u64,
    pub vote_data: VoteTally,
    pub file_size: u64,
    pub update_count: i64,
    pub comment_count: i64,
    pub time_created: i64,
    pub time_updated: i64,
    pub contributors: Vec<AccountSummary>,
}

impl ItemRecord {
    /// Folds a detail record and page facts into the canonical shape. The
    /// detail's raw text fields are discarded here.
    pub fn assemble(detail: ItemDetail, facts: PageFacts, vote_data: VoteTally) -> Self {
        let ItemDetail {
            publishedfileid,
            title,
            creator,
            consumer_app_id,
            file_size,
            time_created,
            time_updated,
            views,
            subscriptions,
            lifetime_subscriptions,
            favorited,
            lifetime_favorited,
            ..
        } = detail;

        Self {
            publishedfileid,
            title,
            creator,
            consumer_app_id,
            views,
            subscriptions,
            lifetime_subscriptions,
            favorited,
            lifetime_favorited,
            vote_data,
            file_size,
            update_count: facts.update_count,
            comment_count: facts.comment_count,
            time_created,
            time_updated,
            contributors: facts.contributors,
        }
    }
}
