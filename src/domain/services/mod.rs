// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// - 身份解析（identity_resolver）：账户引用 → 规范 ID
/// - 页面抓取（page_scraper）：从渲染后的条目页面读取评论数、更新数和贡献者
/// - 聚合（aggregator）：组合 REST 数据与页面数据，生成规范记录
pub mod aggregator;
pub mod identity_resolver;
pub mod page_scraper;
