//! Envelopes for searches crossing the asynchronous boundary.
//!
//! A [`SearchRequest`] is what the controller decides to send; a
//! [`SearchCompletion`] is what comes back. Both carry the [`QueryToken`] the
//! request was issued under, which is how stale completions are recognised.
//! Requests also capture the current OpenTelemetry span so the span that
//! applies the completion can be linked to the keystroke that caused it.

use crate::app::QueryToken;
use crate::gateway::SearchOutcome;
use serde::{Deserialize, Serialize};

/// Distributed tracing context captured when a search is issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Span ID of the span that issued the search.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace context of the current `tracing` span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the span is
    /// not sampled.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Makes this context the parent of spans created while the returned guard
    /// is alive.
    #[must_use]
    pub fn attach(&self) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;
        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }
}

/// A search the controller wants issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Token the search is issued under.
    pub token: QueryToken,

    /// Free-text query, exactly as typed.
    pub query: String,

    /// Trace context of the span that issued the search.
    pub trace_context: Option<TraceContext>,
}

impl SearchRequest {
    /// Creates a request, capturing the current trace context.
    #[must_use]
    pub fn new(token: QueryToken, query: impl Into<String>) -> Self {
        Self {
            token,
            query: query.into(),
            trace_context: TraceContext::from_current(),
        }
    }
}

/// A finished search, tagged with the token it was issued under.
#[derive(Debug, Clone)]
pub struct SearchCompletion {
    /// Token of the request this completion answers.
    pub token: QueryToken,

    /// Results or the provider error.
    pub outcome: SearchOutcome,

    /// Trace context carried over from the request.
    pub trace_context: Option<TraceContext>,
}

impl SearchCompletion {
    /// Builds the completion for `request`.
    #[must_use]
    pub fn for_request(request: &SearchRequest, outcome: SearchOutcome) -> Self {
        Self {
            token: request.token,
            outcome,
            trace_context: request.trace_context.clone(),
        }
    }

    /// Builds a completion without trace context.
    #[must_use]
    pub const fn new(token: QueryToken, outcome: SearchOutcome) -> Self {
        Self {
            token,
            outcome,
            trace_context: None,
        }
    }
}
