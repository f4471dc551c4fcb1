// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// - 账户（account）：账户引用与公开资料
/// - 条目（item）：列表条目、详情、页面事实以及规范记录
/// - 数值（lenient）：兼容字符串与数字两种 JSON 表示的反序列化
pub mod account;
pub mod item;
mod lenient;

pub use account::{AccountRef, AccountSummary};
pub use item::{CatalogEntry, ItemDetail, ItemRecord, PageFacts, Tag, VoteTally};
