// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 用例模块
///
/// 目录文件上的 add / addall / remove / list 操作
pub mod catalog_use_case;
