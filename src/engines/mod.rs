// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod chromium_engine;
pub mod static_engine;
pub mod traits;

use crate::config::settings::{BrowserSettings, RenderEngineKind};
use std::sync::Arc;
use traits::{RenderError, Renderer};

/// Builds the renderer selected by `browser.engine`.
pub fn build_renderer(settings: &BrowserSettings) -> Result<Arc<dyn Renderer>, RenderError> {
    Ok(match settings.engine {
        RenderEngineKind::Chromium => {
            Arc::new(chromium_engine::ChromiumRenderer::new(settings.clone()))
        }
        RenderEngineKind::Static => Arc::new(static_engine::StaticRenderer::new(
            settings.navigation_timeout(),
        )?),
    })
}
