//! gentest: builds a self-contained C test harness from annotated test headers.
//!
//! A header such as `int test_add(int a, int b) /* 2, 3 */ /* 5 */` becomes a forward
//! declaration plus a call `test_add(2, 3) == 5` inside the generated `main`, whose exit
//! status is the number of failing cases.
//!
//! The pipeline is [`discovery`] (candidate files) → [`syntax`] (header recognition) →
//! [`emit`] (harness text), wired together by [`engine::HarnessPipeline`] and driven
//! from the command line by [`cli`].

pub use crate::diagnostics::{ErrorContext, ErrorType, GenError};

pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod discovery;
pub mod emit;
pub mod engine;
pub mod syntax;

pub use crate::config::{GenConfig, NearMissPolicy};
pub use crate::engine::HarnessPipeline;
pub use crate::syntax::{ScanReport, TestCase};
