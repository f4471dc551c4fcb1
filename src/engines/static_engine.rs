// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::{RenderError, RenderSession, Renderer};
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::time::Duration;

/// 静态渲染器
///
/// 通过 reqwest 获取页面原始 HTML，并用 scraper 计算选择器。不执行脚本，
/// 适用于服务端渲染的页面。
pub struct StaticRenderer {
    client: reqwest::Client,
}

impl StaticRenderer {
    pub fn new(timeout: Option<Duration>) -> Result<Self, RenderError> {
        let mut builder = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (compatible; workshop-ledger/0.1)");
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Renderer for StaticRenderer {
    async fn open_session(&self) -> Result<Box<dyn RenderSession>, RenderError> {
        Ok(Box::new(StaticSession {
            client: self.client.clone(),
            document: None,
        }))
    }
}

/// Holds the last fetched document as text; it is parsed per query so that
/// no `Html` value lives across an await point.
pub struct StaticSession {
    client: reqwest::Client,
    document: Option<String>,
}

impl StaticSession {
    fn select<T>(
        &self,
        selector: &str,
        pick: impl FnMut(scraper::ElementRef<'_>) -> Option<T>,
    ) -> Result<Vec<T>, RenderError> {
        let html = self
            .document
            .as_deref()
            .ok_or_else(|| RenderError::Other("no page loaded".to_string()))?;
        let selector = Selector::parse(selector)
            .map_err(|e| RenderError::Other(format!("invalid selector '{}': {}", selector, e)))?;
        let document = Html::parse_document(html);
        Ok(document.select(&selector).filter_map(pick).collect())
    }
}

/// Approximates `innerText`: runs of whitespace collapse to one space and
/// the ends are trimmed.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[async_trait]
impl RenderSession for StaticSession {
    async fn navigate(&mut self, url: &str) -> Result<(), RenderError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| RenderError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        self.document = Some(response.text().await?);
        Ok(())
    }

    async fn inner_html_all(&mut self, selector: &str) -> Result<Vec<String>, RenderError> {
        self.select(selector, |element| Some(element.inner_html()))
    }

    async fn inner_text(&mut self, selector: &str) -> Result<Option<String>, RenderError> {
        let mut texts = self.select(selector, |element| {
            Some(collapse_whitespace(&element.text().collect::<String>()))
        })?;
        Ok(if texts.is_empty() {
            None
        } else {
            Some(texts.swap_remove(0))
        })
    }

    async fn attribute_all(
        &mut self,
        selector: &str,
        attribute: &str,
    ) -> Result<Vec<String>, RenderError> {
        self.select(selector, |element| {
            element.value().attr(attribute).map(str::to_string)
        })
    }

    async fn close(self: Box<Self>) -> Result<(), RenderError> {
        Ok(())
    }

    fn abort(self: Box<Self>) {}

    fn name(&self) -> &'static str {
        "static"
    }
}
