// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::BrowserSettings;
use crate::engines::traits::{RenderError, RenderSession, Renderer};
use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::cdp::browser_protocol::page::EventLifecycleEvent;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Lifecycle event fired once the page has had at most two open network
/// connections for 500ms.
const NETWORK_IDLE_EVENT: &str = "networkAlmostIdle";

/// Lifecycle event that starts a new document.
const DOCUMENT_INIT_EVENT: &str = "init";

/// Chromium渲染器
///
/// 基于chromiumoxide实现的无头浏览器渲染器，每个会话对应一个浏览器和一个页面
pub struct ChromiumRenderer {
    settings: BrowserSettings,
}

impl ChromiumRenderer {
    pub fn new(settings: BrowserSettings) -> Self {
        Self { settings }
    }

    async fn start_browser(&self) -> Result<(Browser, JoinHandle<()>, bool), RenderError> {
        let (browser, mut handler, launched) =
            if let Some(ref url) = self.settings.remote_debugging_url {
                tracing::info!("Connecting to remote Chrome instance at: {}", url);
                let (browser, handler) = Browser::connect(url).await.map_err(|e| {
                    RenderError::Launch(format!("Failed to connect to remote Chrome: {}", e))
                })?;
                (browser, handler, false)
            } else {
                let mut builder = BrowserConfig::builder()
                    .no_sandbox()
                    .window_size(self.settings.window_width, self.settings.window_height)
                    .arg("--disable-gpu")
                    .arg("--disable-dev-shm-usage");

                if let Some(timeout) = self.settings.navigation_timeout() {
                    builder = builder.request_timeout(timeout);
                }

                let config = builder.build().map_err(RenderError::Launch)?;
                let (browser, handler) = Browser::launch(config)
                    .await
                    .map_err(|e| RenderError::Launch(e.to_string()))?;
                (browser, handler, true)
            };

        // Spawn a handler to process browser events
        let handler_task = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        Ok((browser, handler_task, launched))
    }

    /// Opens a blank page with the configured viewport. A remote browser
    /// keeps its own window size, so the viewport is set on the page.
    async fn new_page(&self, browser: &Browser) -> Result<Page, RenderError> {
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| RenderError::Launch(e.to_string()))?;
        if let Err(e) = page.execute(viewport(&self.settings)).await {
            let _ = page.close().await;
            return Err(RenderError::Launch(format!("Failed to set viewport: {}", e)));
        }
        Ok(page)
    }
}

/// Desktop viewport of `browser.window_width` x `browser.window_height`.
fn viewport(settings: &BrowserSettings) -> SetDeviceMetricsOverrideParams {
    SetDeviceMetricsOverrideParams::new(
        settings.window_width,
        settings.window_height,
        1.0,
        false,
    )
}

/// 跟踪一次导航的生命周期事件
///
/// Only events after the new document's `init` count, so an idle signal left
/// over from the previous page is ignored.
#[derive(Debug, Default)]
struct IdleWatch {
    started: bool,
}

impl IdleWatch {
    /// Feeds one main-frame lifecycle event; true once the new document has
    /// gone network-idle.
    fn observe(&mut self, name: &str) -> bool {
        match name {
            DOCUMENT_INIT_EVENT => {
                self.started = true;
                false
            }
            NETWORK_IDLE_EVENT => self.started,
            _ => false,
        }
    }
}

#[async_trait]
impl Renderer for ChromiumRenderer {
    async fn open_session(&self) -> Result<Box<dyn RenderSession>, RenderError> {
        let (mut browser, handler, launched) = self.start_browser().await?;

        let page = match self.new_page(&browser).await {
            Ok(page) => page,
            Err(e) => {
                if launched {
                    let _ = browser.close().await;
                }
                handler.abort();
                return Err(e);
            }
        };

        tracing::debug!(launched, "Opened chromium rendering session");
        Ok(Box::new(ChromiumSession {
            browser,
            page,
            handler,
            launched,
            navigation_timeout: self.settings.navigation_timeout(),
        }))
    }
}

/// 单个浏览器页面上的渲染会话
pub struct ChromiumSession {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    launched: bool,
    navigation_timeout: Option<Duration>,
}

impl ChromiumSession {
    async fn bounded<T>(
        &self,
        fut: impl Future<Output = Result<T, RenderError>>,
    ) -> Result<T, RenderError> {
        match self.navigation_timeout {
            Some(limit) => tokio::time::timeout(limit, fut)
                .await
                .map_err(|_| RenderError::Timeout)?,
            None => fut.await,
        }
    }
}

fn other(e: impl std::fmt::Display) -> RenderError {
    RenderError::Other(e.to_string())
}

fn navigation_error(url: &str, reason: impl std::fmt::Display) -> RenderError {
    RenderError::Navigation {
        url: url.to_string(),
        reason: reason.to_string(),
    }
}

#[async_trait]
impl RenderSession for ChromiumSession {
    async fn navigate(&mut self, url: &str) -> Result<(), RenderError> {
        let page = &self.page;
        let navigation = async move {
            // Subscribe first so that no event of this navigation is missed.
            let mut events = page
                .event_listener::<EventLifecycleEvent>()
                .await
                .map_err(|e| navigation_error(url, e))?;
            page.goto(url).await.map_err(|e| navigation_error(url, e))?;
            let main_frame = page.mainframe().await.map_err(|e| navigation_error(url, e))?;

            let mut watch = IdleWatch::default();
            while let Some(event) = events.next().await {
                let on_main_frame = main_frame.as_ref().map_or(true, |f| *f == event.frame_id);
                if on_main_frame && watch.observe(&event.name) {
                    return Ok(());
                }
            }
            Err(navigation_error(url, "lifecycle events ended before network idle"))
        };
        self.bounded(navigation).await
    }

    async fn inner_html_all(&mut self, selector: &str) -> Result<Vec<String>, RenderError> {
        let elements = self.page.find_elements(selector).await.map_err(other)?;
        let mut values = Vec::with_capacity(elements.len());
        for element in elements {
            values.push(element.inner_html().await.map_err(other)?.unwrap_or_default());
        }
        Ok(values)
    }

    async fn inner_text(&mut self, selector: &str) -> Result<Option<String>, RenderError> {
        let elements = self.page.find_elements(selector).await.map_err(other)?;
        match elements.first() {
            Some(element) => element.inner_text().await.map_err(other),
            None => Ok(None),
        }
    }

    async fn attribute_all(
        &mut self,
        selector: &str,
        attribute: &str,
    ) -> Result<Vec<String>, RenderError> {
        let elements = self.page.find_elements(selector).await.map_err(other)?;
        let mut values = Vec::with_capacity(elements.len());
        for element in elements {
            if let Some(value) = element.attribute(attribute).await.map_err(other)? {
                values.push(value);
            }
        }
        Ok(values)
    }

    async fn close(self: Box<Self>) -> Result<(), RenderError> {
        let ChromiumSession {
            mut browser,
            page,
            handler,
            launched,
            ..
        } = *self;

        let page_result = page.close().await.map_err(other);
        // A connected browser belongs to someone else; only our page goes.
        let browser_result = if launched {
            match browser.close().await {
                Ok(_) => browser.wait().await.map(|_| ()).map_err(other),
                Err(e) => Err(other(e)),
            }
        } else {
            Ok(())
        };
        handler.abort();

        page_result.and(browser_result)
    }

    fn abort(self: Box<Self>) {
        let ChromiumSession {
            browser,
            page,
            handler,
            ..
        } = *self;
        handler.abort();
        drop(page);
        // A launched browser process is killed when dropped; a connected
        // one only loses this connection.
        drop(browser);
    }

    fn name(&self) -> &'static str {
        "chromium"
    }
}
