// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心逻辑，包括：
/// - 领域模型（models）：账户、条目及其合并后的规范记录
/// - 错误（errors）：聚合流程中所有可能的失败
/// - 接口（api）：远程 REST API 的抽象
/// - 服务（services）：身份解析、页面抓取与聚合
///
/// 领域层不依赖任何具体的 HTTP 客户端或浏览器实现。
pub mod api;
pub mod errors;
pub mod models;
pub mod services;
