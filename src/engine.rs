use std::path::Path;

use tracing::{debug, warn};

use crate::{
    config::{GenConfig, NearMissPolicy},
    discovery::FileCollector,
    emit::HarnessEmitter,
    syntax::{Grammar, ScanReport, SignatureParser, TestCase},
    GenError,
};

// ============================================================================
// GENERATION PIPELINE - Collect → Scan → Render
// ============================================================================

/// The whole generator: collects files, scans them for test headers and renders
/// the harness. Each stage hands an owned result to the next.
#[derive(Debug, Clone)]
pub struct HarnessPipeline {
    config: GenConfig,
    grammar: Grammar,
}

impl HarnessPipeline {
    pub fn new(config: GenConfig) -> Result<Self, GenError> {
        let grammar = Grammar::for_config(&config.grammar)?;
        Ok(Self { config, grammar })
    }

    /// Collects and scans every candidate file, applying the near-miss policy.
    pub fn discover<P: AsRef<Path>>(&self, dirs: &[P]) -> Result<ScanReport, GenError> {
        let collector = FileCollector::new(self.config.extension.as_str(), self.config.order);
        let files = collector.collect(dirs)?;
        debug!(files = files.len(), "collected candidate files");

        let report = SignatureParser::new(&self.grammar).scan_files(&files)?;
        self.apply_near_miss_policy(&report)?;

        debug!(
            cases = report.cases.len(),
            near_misses = report.near_misses.len(),
            "scan finished"
        );
        Ok(report)
    }

    /// Renders a harness for already discovered cases.
    pub fn render(&self, cases: &[TestCase]) -> String {
        HarnessEmitter::new(self.config.emit).render(cases)
    }

    /// Discovers cases under `dirs` and renders the harness.
    pub fn generate<P: AsRef<Path>>(&self, dirs: &[P]) -> Result<String, GenError> {
        let report = self.discover(dirs)?;
        Ok(self.render(&report.cases))
    }

    fn apply_near_miss_policy(&self, report: &ScanReport) -> Result<(), GenError> {
        match self.config.near_misses {
            NearMissPolicy::Deny => match report.near_misses.first() {
                Some(miss) => Err(miss.to_error()),
                None => Ok(()),
            },
            NearMissPolicy::Warn => {
                for miss in &report.near_misses {
                    warn!(
                        location = %miss.location,
                        reason = %miss.reason,
                        "ignoring malformed test header"
                    );
                }
                Ok(())
            }
        }
    }
}
