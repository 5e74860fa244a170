//! Internal (bug) errors and the failure context they capture.
//!
//! Internal errors are usually detected while handling some lower-level
//! failure: a parse error, a broken assumption about already-validated data.
//! [`InternalError::caused_by`] snapshots that failure at construction time
//! (its concrete type, its rendered cause chain and a backtrace) and appends
//! the rendering to the message, so the original diagnosis survives any
//! amount of re-wrapping further up.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::sync::Arc;

pub const DEFAULT_MESSAGE: &str = "Internal error";

pub const DATA_SCHEMA_CORRUPT_MESSAGE: &str = "Integrity error in data processed by data validator. \
     This mean an error in data validation scheme or in parsing code.";

const ORIGINAL_HEADING: &str = "Original exception";

type SharedSource = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// Point-in-time snapshot of the failure an internal error was raised from.
#[derive(Debug, Clone)]
pub struct CapturedContext {
    source_type: &'static str,
    chain: Vec<String>,
    backtrace: Arc<Backtrace>,
    rendered: String,
}

impl CapturedContext {
    fn capture<E>(source: &E) -> Self
    where
        E: std::error::Error + 'static,
    {
        let source_type = std::any::type_name::<E>();
        let mut chain = vec![source.to_string()];
        let mut next = source.source();
        while let Some(cause) = next {
            chain.push(cause.to_string());
            next = cause.source();
        }
        let backtrace = Backtrace::capture();
        let rendered = render(source_type, &chain, &backtrace);

        Self {
            source_type,
            chain,
            backtrace: Arc::new(backtrace),
            rendered,
        }
    }

    /// Fully qualified Rust type name of the originating error.
    pub fn source_type(&self) -> &'static str {
        self.source_type
    }

    /// The originating error's message followed by each of its causes.
    pub fn chain(&self) -> &[String] {
        &self.chain
    }

    /// Empty unless backtraces were enabled (`RUST_BACKTRACE`/`RUST_LIB_BACKTRACE`).
    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    pub fn rendered(&self) -> &str {
        &self.rendered
    }
}

fn render(source_type: &str, chain: &[String], backtrace: &Backtrace) -> String {
    let mut out = String::new();
    if let Some((head, causes)) = chain.split_first() {
        out.push_str(&format!("{source_type}: {head}"));
        if !causes.is_empty() {
            out.push_str("\nCaused by:");
            for (idx, cause) in causes.iter().enumerate() {
                out.push_str(&format!("\n{idx:>5}: {cause}"));
            }
        }
    }
    if backtrace.status() == BacktraceStatus::Captured {
        out.push_str(&format!("\nStack backtrace:\n{backtrace}"));
    }
    out
}

/// A bug or broken invariant in provisioning code.
///
/// Also backs [`crate::Error::DataSchemaCorrupt`]. Errors built through the
/// `data_schema_corrupt*` constructors remember that, so converting them into
/// [`crate::Error`] keeps the kind.
#[derive(thiserror::Error, Debug, Clone)]
#[error("{message}")]
pub struct InternalError {
    message: String,
    #[source]
    source: Option<SharedSource>,
    context: Option<CapturedContext>,
    schema_corrupt: bool,
}

impl InternalError {
    /// Internal error with no originating failure to capture.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
            context: None,
            schema_corrupt: false,
        }
    }

    /// Internal error raised while handling `source`.
    ///
    /// The source is snapshotted before this returns and stays reachable
    /// through [`std::error::Error::source`].
    pub fn caused_by<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let context = CapturedContext::capture(&source);
        tracing::debug!(
            source_type = context.source_type(),
            "captured original failure for internal error"
        );

        let mut message = message.into();
        message.push_str(&format!("\n{ORIGINAL_HEADING} {}", context.rendered()));

        Self {
            message,
            source: Some(Arc::new(source)),
            context: Some(context),
            schema_corrupt: false,
        }
    }

    pub fn from_source<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::caused_by(DEFAULT_MESSAGE, source)
    }

    pub fn data_schema_corrupt() -> Self {
        Self {
            schema_corrupt: true,
            ..Self::new(DATA_SCHEMA_CORRUPT_MESSAGE)
        }
    }

    pub fn data_schema_corrupt_caused_by<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            schema_corrupt: true,
            ..Self::caused_by(DATA_SCHEMA_CORRUPT_MESSAGE, source)
        }
    }

    /// Whether this was raised as a data-schema integrity failure.
    pub fn is_data_schema_corrupt(&self) -> bool {
        self.schema_corrupt
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn context(&self) -> Option<&CapturedContext> {
        self.context.as_ref()
    }
}

impl Default for InternalError {
    fn default() -> Self {
        Self::new(DEFAULT_MESSAGE)
    }
}
