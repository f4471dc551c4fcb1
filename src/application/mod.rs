// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 将聚合结果写入用户维护的 CSV 目录文件
/// - catalog_file：目录文件的读取与重写
/// - row_builder：规范记录 → 表格行
/// - use_cases：add / addall / remove / list 用例
pub mod catalog_file;
pub mod row_builder;
pub mod use_cases;
