// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A reference to an account as a human supplies it.
///
/// Either the canonical numeric id or a profile URL that still has to be
/// resolved (`.../profiles/<id>/...` or `.../id/<vanity>/...`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountRef {
    /// 规范的数字账户 ID
    Id(String),
    /// 尚未解析的个人资料 URL
    Url(String),
}

impl AccountRef {
    /// Classifies raw user input. A non-empty all-digit string is taken as a
    /// canonical id; everything else is treated as a URL to resolve.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit()) {
            AccountRef::Id(input.to_string())
        } else {
            AccountRef::Url(input.to_string())
        }
    }
}

impl From<&str> for AccountRef {
    fn from(value: &str) -> Self {
        AccountRef::parse(value)
    }
}

impl fmt::Display for AccountRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountRef::Id(id) => write!(f, "{}", id),
            AccountRef::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Public profile attributes of one account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    /// 规范账户 ID
    pub steamid: String,
    /// 显示名称
    pub personaname: String,
    /// 个人资料页地址
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profileurl: Option<String>,
    /// 头像地址
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatarfull: Option<String>,
}
