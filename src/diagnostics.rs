//! # Overview
//!
//! This module defines the unified, `miette`-based diagnostic type for `gentest`. Every
//! failure produced while collecting files, scanning sources or writing the harness is a
//! [`GenError`]. Construction goes through the `err_msg!` and `err_ctx!` macros.
//!
//! # Error Construction Macros
//!
//! - **Use `err_msg!` for message-only errors.**
//!   - `err_msg!(Usage, "No directories supplied")`
//!   - `err_msg!(Io, "Failed to read '{}'", path.display())`
//!
//! - **Use `err_ctx!` for errors pointing into a source file.**
//!   - `err_ctx!(Grammar, "Malformed test header", src, span, help)`
//!
//! Attach an underlying cause with [`GenError::caused_by`].

use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode, SourceSpan};
use thiserror::Error;

pub type SourceArc = Arc<NamedSource<String>>;

type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Type-safe classification of a [`GenError`], handy for matching in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    /// Missing or invalid command-line arguments
    Usage,
    /// Unreadable directories or files
    Io,
    /// Test headers that fail the line grammar (strict mode)
    Grammar,
    /// Failures while serializing or writing results
    Output,
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::Usage => "Usage",
            ErrorType::Io => "Io",
            ErrorType::Grammar => "Grammar",
            ErrorType::Output => "Output",
        }
    }
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Minimal error context for diagnostics.
#[derive(Debug, Default)]
pub struct ErrorContext {
    /// The source the error points into (if any).
    pub source: Option<SourceArc>,
    /// The primary span within `source` (if any).
    pub span: Option<SourceSpan>,
    /// An optional help message.
    pub help: Option<String>,
}

impl ErrorContext {
    pub fn none() -> Self {
        Self::default()
    }
}

/// Unified error type for every `gentest` failure mode.
#[derive(Debug, Error)]
pub enum GenError {
    #[error("Usage error: {message}")]
    Usage {
        message: String,
        ctx: ErrorContext,
        #[source]
        source: Option<BoxedCause>,
    },
    #[error("I/O error: {message}")]
    Io {
        message: String,
        ctx: ErrorContext,
        #[source]
        source: Option<BoxedCause>,
    },
    #[error("Grammar error: {message}")]
    Grammar {
        message: String,
        ctx: ErrorContext,
        #[source]
        source: Option<BoxedCause>,
    },
    #[error("Output error: {message}")]
    Output {
        message: String,
        ctx: ErrorContext,
        #[source]
        source: Option<BoxedCause>,
    },
}

impl GenError {
    fn parts(&self) -> (&String, &ErrorContext) {
        match self {
            GenError::Usage { message, ctx, .. }
            | GenError::Io { message, ctx, .. }
            | GenError::Grammar { message, ctx, .. }
            | GenError::Output { message, ctx, .. } => (message, ctx),
        }
    }

    /// Returns the classification of this error.
    pub fn error_type(&self) -> ErrorType {
        match self {
            GenError::Usage { .. } => ErrorType::Usage,
            GenError::Io { .. } => ErrorType::Io,
            GenError::Grammar { .. } => ErrorType::Grammar,
            GenError::Output { .. } => ErrorType::Output,
        }
    }

    /// Attaches the underlying error that caused this one.
    pub fn caused_by<E>(mut self, cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let slot = match &mut self {
            GenError::Usage { source, .. }
            | GenError::Io { source, .. }
            | GenError::Grammar { source, .. }
            | GenError::Output { source, .. } => source,
        };
        *slot = Some(Box::new(cause));
        self
    }
}

impl Diagnostic for GenError {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        let code = match self.error_type() {
            ErrorType::Usage => "gentest::usage",
            ErrorType::Io => "gentest::io",
            ErrorType::Grammar => "gentest::grammar",
            ErrorType::Output => "gentest::output",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        self.parts()
            .1
            .help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn std::fmt::Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.parts()
            .1
            .source
            .as_ref()
            .map(|s| s.as_ref() as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let (message, ctx) = self.parts();
        let span = ctx.span?;
        let label = LabeledSpan::new_with_span(Some(message.clone()), span);
        Some(Box::new(std::iter::once(label)))
    }
}

/// Wraps file contents into a named source for labelled diagnostics.
pub fn to_error_source<N: AsRef<str>, S: AsRef<str>>(name: N, source: S) -> SourceArc {
    Arc::new(NamedSource::new(
        name.as_ref().to_string(),
        source.as_ref().to_string(),
    ))
}

/// Constructs a GenError variant with a formatted message and no context.
#[macro_export]
macro_rules! err_msg {
    ($variant:ident, $msg:expr, $($arg:expr),+ $(,)?) => {
        $crate::GenError::$variant {
            message: format!($msg, $($arg),+),
            ctx: $crate::ErrorContext::none(),
            source: None,
        }
    };
    ($variant:ident, $msg:expr) => {
        $crate::GenError::$variant {
            message: format!("{}", $msg),
            ctx: $crate::ErrorContext::none(),
            source: None,
        }
    };
}

/// Constructs a GenError variant that labels a span inside a named source.
#[macro_export]
macro_rules! err_ctx {
    ($variant:ident, $msg:expr, $src:expr, $span:expr, $help:expr) => {
        $crate::GenError::$variant {
            message: $msg.to_string(),
            ctx: $crate::ErrorContext {
                source: Some($crate::diagnostics::SourceArc::clone($src)),
                span: Some($span),
                help: Some(format!("{}", $help)),
            },
            source: None,
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn err_msg_formats_arguments() {
        let err = err_msg!(Io, "Failed to read '{}': {}", "a.c", "denied");
        assert_eq!(err.to_string(), "I/O error: Failed to read 'a.c': denied");
        assert_eq!(err.error_type(), ErrorType::Io);
    }

    #[test]
    fn caused_by_exposes_source() {
        let cause = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = err_msg!(Io, "Failed to list 'tests'").caused_by(cause);
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("gone"));
    }

    #[test]
    fn err_ctx_labels_span() {
        let src = to_error_source("t.c", "int test_x() /* */\n");
        let err = err_ctx!(Grammar, "bad header", &src, SourceSpan::from((0, 18)), "add a second annotation");
        assert_eq!(err.error_type(), ErrorType::Grammar);
        assert_eq!(err.help().map(|h| h.to_string()).as_deref(), Some("add a second annotation"));
        let labels: Vec<_> = err.labels().into_iter().flatten().collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].offset(), 0);
        assert_eq!(labels[0].len(), 18);
        assert!(err.source_code().is_some());
    }
}
