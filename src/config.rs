//! Run configuration for the generator.
//!
//! The defaults reproduce the classic behavior: `int test_*` headers in `.c` files, a
//! colored harness, sorted files within each directory, near misses reported as warnings.

use crate::discovery::FileOrder;
use crate::emit::EmitOptions;
use crate::syntax::GrammarConfig;

/// What to do with lines that look like test headers but fail the grammar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NearMissPolicy {
    /// Log a warning and keep going.
    #[default]
    Warn,
    /// Abort the run with a diagnostic.
    Deny,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenConfig {
    pub grammar: GrammarConfig,
    /// Candidate file extension, without the dot.
    pub extension: String,
    pub order: FileOrder,
    pub emit: EmitOptions,
    pub near_misses: NearMissPolicy,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            grammar: GrammarConfig::default(),
            extension: "c".to_string(),
            order: FileOrder::default(),
            emit: EmitOptions::default(),
            near_misses: NearMissPolicy::default(),
        }
    }
}
