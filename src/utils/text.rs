// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// Parses the leading integer of `text` the way a lenient DOM reader does:
/// leading whitespace and one optional sign are skipped, then the longest
/// run of ASCII digits is read. Anything after the digits is ignored.
///
/// Returns `None` when no digit follows the optional sign.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let value: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// First token of `text` split on a single space, as the change-notes
/// counter is rendered ("12 Change Notes").
pub fn first_space_token(text: &str) -> &str {
    text.split(' ').next().unwrap_or_default()
}
