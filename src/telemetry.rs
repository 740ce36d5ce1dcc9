//! Observability port and log subscriber setup.
//!
//! Handlers, services and the repository record one span per call through a
//! [`Tracer`] passed in at construction. [`TracingTracer`] forwards spans to the
//! `tracing` crate; [`NoopTracer`] discards them. Callers instrument the
//! downstream future with [`Span::context`] so nested calls open child spans.

use crate::config::{LogConfig, LogFormat};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// A named span that accepts key/value fields until dropped.
pub trait Span: Send {
    fn record(&mut self, key: &'static str, value: &str);

    /// `tracing` span that work done on behalf of this span should run in.
    fn context(&self) -> tracing::Span {
        tracing::Span::none()
    }
}

pub trait Tracer: Send + Sync {
    fn start_span(&self, name: &'static str) -> Box<dyn Span>;
}

/// Record `value` serialized as JSON; serialization failures are recorded as the error text.
pub fn record_json<T: Serialize + ?Sized>(span: &mut dyn Span, key: &'static str, value: &T) {
    match serde_json::to_string(value) {
        Ok(s) => span.record(key, &s),
        Err(e) => span.record(key, &e.to_string()),
    }
}

#[derive(Debug, Clone, Default)]
pub struct TracingTracer;

struct TracingSpan {
    span: tracing::Span,
}

impl Span for TracingSpan {
    fn record(&mut self, key: &'static str, value: &str) {
        tracing::info!(parent: &self.span, field = key, value = %value, "span field");
    }

    fn context(&self) -> tracing::Span {
        self.span.clone()
    }
}

impl Tracer for TracingTracer {
    /// The new span's parent is the current span, if any.
    fn start_span(&self, name: &'static str) -> Box<dyn Span> {
        Box::new(TracingSpan {
            span: tracing::info_span!("span", operation = name),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct NoopTracer;

struct NoopSpan;

impl Span for NoopSpan {
    fn record(&mut self, _key: &'static str, _value: &str) {}
}

impl Tracer for NoopTracer {
    fn start_span(&self, _name: &'static str) -> Box<dyn Span> {
        Box::new(NoopSpan)
    }
}

/// Install the global log subscriber. `RUST_LOG` overrides the default filter.
pub fn init_logging(cfg: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("car_service=info,tower_http=info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match cfg.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}
