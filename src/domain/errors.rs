// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::RenderError;
use thiserror::Error;

/// 聚合流程错误类型
///
/// 所有错误都会中止当前条目的聚合并直接返回给调用方，不做重试。
#[derive(Error, Debug)]
pub enum WorkshopError {
    /// 账户引用不符合任何已知的 URL 形式
    #[error("Unrecognized account reference: {0}")]
    UnrecognizedReference(String),

    /// 自定义 URL 名称未能解析为账户 ID
    #[error("Vanity name could not be resolved: {0}")]
    VanityUnresolved(String),

    /// 玩家资料接口未返回任何账户
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// 主要贡献者的发布列表中没有该条目
    #[error("Item {item_id} is not listed in the catalog of account {account_id}")]
    CatalogLookupMiss { item_id: String, account_id: String },

    /// 批量详情响应中缺少请求的条目
    #[error("No detail returned for item {0}")]
    DetailMissing(String),

    /// 页面缺少预期的元素
    #[error("Element '{selector}' missing on page of item {item_id}")]
    ScrapeElementMissing {
        item_id: String,
        selector: &'static str,
    },

    /// 页面元素的文本无法解析为整数
    #[error("Element '{selector}' has no leading integer: {value:?}")]
    UnparsableValue {
        selector: &'static str,
        value: String,
    },

    /// 页面上没有任何贡献者链接
    #[error("Item {0} has no contributors")]
    NoContributors(String),

    /// 底层网络请求失败
    #[error("Request failed: {0}")]
    TransientNetworkFailure(#[from] reqwest::Error),

    /// 渲染会话失败
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}
