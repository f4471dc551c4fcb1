// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 目录文件的读写、行构建以及命令行用例
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含核心实体、聚合服务和远程 API 接口
pub mod domain;

/// 引擎模块
///
/// 页面渲染会话的实现（无头浏览器与静态 HTML）
pub mod engines;

/// 基础设施模块
///
/// 远程 REST API 的客户端实现
pub mod infrastructure;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;
