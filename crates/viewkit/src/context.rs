//! Request-scoped logging context for [`render`](crate::TemplateRegistry::render).
//!
//! Rendering does not depend on the request in any functional way; the context
//! only decides which `tracing` span the render diagnostics are recorded in, so
//! log lines carry the request id of the call that produced them.
//!
//! Three implementations ship with the crate:
//!
//! | Context | Span |
//! |---------|------|
//! | `()` | None (diagnostics go to the current span) |
//! | [`tracing::Span`] | That span, e.g. one opened by HTTP middleware |
//! | [`RequestContext`] | A `request` span built from id, method and path |

use tracing::Span;

/// Supplies the span a render call records its diagnostics in.
pub trait RenderContext {
    fn span(&self) -> Span;
}

impl RenderContext for () {
    fn span(&self) -> Span {
        Span::none()
    }
}

impl RenderContext for Span {
    fn span(&self) -> Span {
        self.clone()
    }
}

impl<T: RenderContext + ?Sized> RenderContext for &T {
    fn span(&self) -> Span {
        (**self).span()
    }
}

/// Minimal description of the request being served.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub request_id: String,
    pub method: String,
    pub path: String,
}

impl RequestContext {
    pub fn new(
        request_id: impl Into<String>,
        method: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            method: method.into(),
            path: path.into(),
        }
    }
}

impl RenderContext for RequestContext {
    fn span(&self) -> Span {
        tracing::debug_span!(
            "request",
            request_id = %self.request_id,
            method = %self.method,
            path = %self.path,
        )
    }
}
