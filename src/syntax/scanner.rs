use std::path::{Path, PathBuf};

use tracing::debug;

use crate::syntax::{Grammar, LineMatch, NearMiss, ScanReport, SourceLocation, TestCase};
use crate::{err_msg, GenError};

/// Walks sources line by line and collects test cases and near misses.
#[derive(Debug, Clone, Copy)]
pub struct SignatureParser<'g> {
    grammar: &'g Grammar,
}

impl Default for SignatureParser<'static> {
    fn default() -> Self {
        Self::new(Grammar::standard())
    }
}

impl<'g> SignatureParser<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Self { grammar }
    }

    /// Scans in-memory text. `origin` is only used to label locations.
    pub fn scan_source<P: AsRef<Path>>(&self, text: &str, origin: P) -> ScanReport {
        let origin = origin.as_ref();
        let mut report = ScanReport::default();

        for (index, line) in text.lines().enumerate() {
            let location = || SourceLocation::new(origin, index + 1);
            match self.grammar.match_line(line) {
                LineMatch::Case(signature) => {
                    debug!(location = %location(), name = %signature.name, "found test case");
                    report
                        .cases
                        .push(TestCase::from_signature(signature, location()));
                }
                LineMatch::NearMiss(reason) => report.near_misses.push(NearMiss {
                    location: location(),
                    text: line.to_string(),
                    reason,
                }),
                LineMatch::Skip => {}
            }
        }

        report
    }

    /// Reads and scans one file.
    pub fn scan_file<P: AsRef<Path>>(&self, path: P) -> Result<ScanReport, GenError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            err_msg!(Io, "Failed to read file '{}': {}", path.display(), e).caused_by(e)
        })?;
        Ok(self.scan_source(&text, path))
    }

    /// Scans files in the given order, concatenating their reports.
    pub fn scan_files(&self, paths: &[PathBuf]) -> Result<ScanReport, GenError> {
        let mut report = ScanReport::default();
        for path in paths {
            report.extend(self.scan_file(path)?);
        }
        Ok(report)
    }
}
