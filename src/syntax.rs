//! Recognition of annotated test-function headers.
//!
//! A test header is a single physical line of C source:
//!
//! ```text
//! int test_add(int a, int b) /* 2, 3 */ /* 5 */
//! ```
//!
//! The first annotation holds the call arguments, the second the expected value. The
//! [`grammar`] module decides what a line is; the [`scanner`] module walks whole
//! sources and collects the results into a [`ScanReport`].

use std::path::{Path, PathBuf};

use miette::SourceSpan;
use serde::Serialize;

use crate::diagnostics::to_error_source;
use crate::{err_ctx, GenError};

pub mod grammar;
pub mod scanner;

pub use grammar::{Grammar, GrammarConfig, LineMatch, Signature};
pub use scanner::SignatureParser;

/// Where a record was found. Lines are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    pub file: PathBuf,
    pub line: usize,
}

impl SourceLocation {
    pub fn new<P: AsRef<Path>>(file: P, line: usize) -> Self {
        Self {
            file: file.as_ref().to_path_buf(),
            line,
        }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.file.display(), self.line)
    }
}

/// One discovered test function.
///
/// Every text field is copied verbatim (trimmed) from the header line. Nothing here is
/// validated as C.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestCase {
    pub name: String,
    pub return_type: String,
    pub parameters: String,
    pub call_arguments: String,
    pub expected: String,
    pub location: SourceLocation,
}

impl TestCase {
    pub fn from_signature(signature: Signature, location: SourceLocation) -> Self {
        let Signature {
            return_type,
            name,
            parameters,
            call_arguments,
            expected,
        } = signature;
        Self {
            name,
            return_type,
            parameters,
            call_arguments,
            expected,
            location,
        }
    }
}

/// Why a line that looks like a test header was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MismatchReason {
    UnsupportedReturnType(String),
    AnnotationCount(usize),
    Malformed,
}

impl MismatchReason {
    pub fn help(&self) -> &'static str {
        match self {
            MismatchReason::UnsupportedReturnType(_) => {
                "only the configured return types (see --return-type) are recognized"
            }
            MismatchReason::AnnotationCount(_) => {
                "append `/* <arguments> */ /* <expected> */` to the header line"
            }
            MismatchReason::Malformed => {
                "nothing may follow the second annotation, and annotations may not nest"
            }
        }
    }
}

impl std::fmt::Display for MismatchReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MismatchReason::UnsupportedReturnType(token) => {
                write!(f, "unsupported return type `{}`", token)
            }
            MismatchReason::AnnotationCount(n) => {
                write!(f, "expected 2 trailing annotations, found {}", n)
            }
            MismatchReason::Malformed => write!(
                f,
                "header does not match `<type> <name>(<parameters>) /* <arguments> */ /* <expected> */`"
            ),
        }
    }
}

/// A line that starts like a test header but fails the full grammar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NearMiss {
    pub location: SourceLocation,
    pub text: String,
    pub reason: MismatchReason,
}

impl NearMiss {
    /// Builds the diagnostic reported when near misses are fatal.
    pub fn to_error(&self) -> GenError {
        // Blank lines keep the offending text on its real line number.
        let padding = "\n".repeat(self.location.line.saturating_sub(1));
        let src = to_error_source(
            self.location.file.display().to_string(),
            format!("{}{}", padding, self.text),
        );
        let span = SourceSpan::from((padding.len(), self.text.len()));
        err_ctx!(
            Grammar,
            format!("{}: {}", self.location, self.reason),
            &src,
            span,
            self.reason.help()
        )
    }
}

/// Everything found while scanning, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub cases: Vec<TestCase>,
    pub near_misses: Vec<NearMiss>,
}

impl ScanReport {
    pub fn extend(&mut self, other: ScanReport) {
        self.cases.extend(other.cases);
        self.near_misses.extend(other.near_misses);
    }

    pub fn is_clean(&self) -> bool {
        self.near_misses.is_empty()
    }
}
