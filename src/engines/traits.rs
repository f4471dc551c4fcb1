// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use async_trait::async_trait;
use thiserror::Error;

/// 渲染错误类型
#[derive(Error, Debug)]
pub enum RenderError {
    /// 浏览器启动或连接失败
    #[error("Failed to start rendering session: {0}")]
    Launch(String),
    /// 页面导航失败
    #[error("Navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },
    /// 超时
    #[error("Timeout")]
    Timeout,
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 其他错误
    #[error("Other error: {0}")]
    Other(String),
}

/// 渲染会话
///
/// One page in one rendering context. Every method takes `&mut self`, so a
/// session can never serve two navigations at once.
#[async_trait]
pub trait RenderSession: Send {
    /// 导航到指定 URL 并等待页面加载完成
    async fn navigate(&mut self, url: &str) -> Result<(), RenderError>;

    /// `innerHTML` of every element matching `selector`, in document order.
    async fn inner_html_all(&mut self, selector: &str) -> Result<Vec<String>, RenderError>;

    /// Rendered text of the first element matching `selector`.
    async fn inner_text(&mut self, selector: &str) -> Result<Option<String>, RenderError>;

    /// Value of `attribute` on every matching element that carries it.
    async fn attribute_all(
        &mut self,
        selector: &str,
        attribute: &str,
    ) -> Result<Vec<String>, RenderError>;

    /// 关闭会话并释放底层资源
    async fn close(self: Box<Self>) -> Result<(), RenderError>;

    /// Releases the session without awaiting anything. Used when no
    /// runtime is left to drive [`close`](Self::close).
    fn abort(self: Box<Self>);

    /// 会话名称
    fn name(&self) -> &'static str;
}

/// 渲染器：创建渲染会话
#[async_trait]
pub trait Renderer: Send + Sync {
    async fn open_session(&self) -> Result<Box<dyn RenderSession>, RenderError>;
}

/// Owns an open session and guarantees it is closed exactly once.
///
/// Paths that can await call [`SessionGuard::close`]. If the guard is
/// dropped while still holding the session, the close is spawned onto the
/// current tokio runtime; should that task never run, or should there be no
/// runtime at all, the session is aborted synchronously.
pub struct SessionGuard {
    session: Option<Box<dyn RenderSession>>,
}

impl SessionGuard {
    pub fn new(session: Box<dyn RenderSession>) -> Self {
        Self {
            session: Some(session),
        }
    }

    /// Borrow of the open session. The session is only taken by `close`
    /// and `drop`, both of which consume the guard.
    pub fn session(&mut self) -> &mut dyn RenderSession {
        match self.session.as_deref_mut() {
            Some(session) => session,
            None => unreachable!("session taken before guard was consumed"),
        }
    }

    /// Closes the session. Close failures are logged, not returned: the
    /// caller's own outcome takes precedence.
    pub async fn close(mut self) {
        if let Some(session) = self.session.take() {
            let name = session.name();
            match session.close().await {
                Ok(()) => tracing::debug!("Closed {} rendering session", name),
                Err(e) => tracing::warn!("Failed to close {} rendering session: {}", name, e),
            }
        }
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        if let Some(session) = self.session.take() {
            let pending = PendingClose(Some(session));
            match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    tracing::debug!("Rendering session abandoned, closing in background");
                    handle.spawn(pending.close());
                }
                // Dropping `pending` aborts the session.
                Err(_) => drop(pending),
            }
        }
    }
}

/// A close handed to the runtime. If the task is dropped before it runs,
/// e.g. because the runtime shuts down, the session is aborted instead.
struct PendingClose(Option<Box<dyn RenderSession>>);

impl PendingClose {
    async fn close(mut self) {
        if let Some(session) = self.0.take() {
            if let Err(e) = session.close().await {
                tracing::warn!("Failed to close abandoned rendering session: {}", e);
            }
        }
    }
}

impl Drop for PendingClose {
    fn drop(&mut self) {
        if let Some(session) = self.0.take() {
            tracing::debug!("Aborting {} rendering session", session.name());
            session.abort();
        }
    }
}
