//! The single-line test-header grammar.
//!
//! ```text
//! <returnType> <prefix><word>(<parameters>) /* <arguments> */ /* <expected> */
//! ```
//!
//! The whole line must match (surrounding whitespace aside). Lines that start like a
//! header and carry an annotation opener, but fail the full match, are reported as
//! near misses so that typos do not silently drop tests.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::syntax::MismatchReason;
use crate::{err_msg, GenError};

const ANNOTATION_OPEN: &str = "/*";
const ANNOTATION_CLOSE: &str = "*/";

/// C keywords that start statements or expressions, never a declaration.
const STATEMENT_KEYWORDS: &[&str] = &[
    "return", "if", "else", "while", "for", "do", "switch", "case", "default", "goto",
    "break", "continue", "sizeof",
];

/// The knobs of the header grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarConfig {
    /// Required prefix of every test-function name.
    pub prefix: String,
    /// Accepted return-type tokens, matched exactly.
    pub return_types: Vec<String>,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            prefix: "test_".to_string(),
            return_types: vec!["int".to_string()],
        }
    }
}

/// The pieces of a matched header, trimmed but otherwise verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub return_type: String,
    pub name: String,
    pub parameters: String,
    pub call_arguments: String,
    pub expected: String,
}

/// What a single line turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineMatch {
    Case(Signature),
    NearMiss(MismatchReason),
    Skip,
}

static STANDARD: Lazy<Grammar> = Lazy::new(|| {
    Grammar::new(&GrammarConfig::default()).expect("default header grammar must compile")
});

/// Compiled header grammar.
#[derive(Debug, Clone)]
pub struct Grammar {
    config: GrammarConfig,
    header: Regex,
    candidate: Regex,
}

impl Grammar {
    pub fn new(config: &GrammarConfig) -> Result<Self, GenError> {
        if config.prefix.is_empty() {
            return Err(err_msg!(Usage, "The test-name prefix must not be empty"));
        }
        if config.return_types.iter().all(|t| t.trim().is_empty()) {
            return Err(err_msg!(Usage, "At least one return type must be accepted"));
        }

        let prefix = regex::escape(&config.prefix);
        let return_types = config
            .return_types
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("|");

        let header = format!(
            r"^\s*(?P<return_type>{return_types})\s+(?P<name>{prefix}[A-Za-z0-9_]+)\s*\((?P<parameters>.*?)\)\s*/\*(?P<args>.*?)\*/\s*/\*(?P<expected>.*?)\*/\s*$"
        );
        let candidate = format!(
            r"^\s*(?P<leading>[A-Za-z_][A-Za-z0-9_\s*]*?[\s*])(?P<name>{prefix}[A-Za-z0-9_]*)\s*\("
        );

        Ok(Self {
            config: config.clone(),
            header: compile(&header)?,
            candidate: compile(&candidate)?,
        })
    }

    /// The grammar for `int test_*` headers, compiled once.
    pub fn standard() -> &'static Grammar {
        &STANDARD
    }

    /// Returns the standard grammar when `config` is the default one.
    pub fn for_config(config: &GrammarConfig) -> Result<Self, GenError> {
        if *config == GrammarConfig::default() {
            return Ok(STANDARD.clone());
        }
        Self::new(config)
    }

    /// Classifies one physical line (without its line terminator).
    pub fn match_line(&self, line: &str) -> LineMatch {
        if let Some(signature) = self.match_header(line) {
            return LineMatch::Case(signature);
        }
        match self.diagnose(line) {
            Some(reason) => LineMatch::NearMiss(reason),
            None => LineMatch::Skip,
        }
    }

    fn match_header(&self, line: &str) -> Option<Signature> {
        let caps = self.header.captures(line)?;
        let field = |name: &str| caps.name(name).map_or("", |m| m.as_str()).trim();

        let parameters = field("parameters");
        let call_arguments = field("args");
        let expected = field("expected");

        // A lazy capture can swallow a delimiter when a line carries extra annotations.
        if [parameters, call_arguments, expected]
            .iter()
            .any(|text| has_delimiter(text))
        {
            return None;
        }

        Some(Signature {
            return_type: field("return_type").to_string(),
            name: field("name").to_string(),
            parameters: parameters.to_string(),
            call_arguments: call_arguments.to_string(),
            expected: expected.to_string(),
        })
    }

    fn diagnose(&self, line: &str) -> Option<MismatchReason> {
        if !line.contains(ANNOTATION_OPEN) {
            return None;
        }
        let caps = self.candidate.captures(line)?;
        let return_type = caps.name("leading").map_or("", |m| m.as_str()).trim();
        if !is_declaration_prefix(return_type) {
            return None;
        }
        if !self.config.return_types.iter().any(|t| t.trim() == return_type) {
            return Some(MismatchReason::UnsupportedReturnType(return_type.to_string()));
        }

        let rest = caps.name("name").map_or(line, |m| &line[m.end()..]);
        let annotations = rest.matches(ANNOTATION_OPEN).count();
        if annotations != 2 {
            return Some(MismatchReason::AnnotationCount(annotations));
        }
        Some(MismatchReason::Malformed)
    }
}

fn compile(pattern: &str) -> Result<Regex, GenError> {
    Regex::new(pattern)
        .map_err(|e| err_msg!(Usage, "Invalid header grammar: {}", e).caused_by(e))
}

/// True when `leading` reads like declaration specifiers rather than a statement.
fn is_declaration_prefix(leading: &str) -> bool {
    leading
        .split(|c: char| c.is_whitespace() || c == '*')
        .filter(|word| !word.is_empty())
        .all(|word| !STATEMENT_KEYWORDS.contains(&word))
}

fn has_delimiter(text: &str) -> bool {
    text.contains(ANNOTATION_OPEN) || text.contains(ANNOTATION_CLOSE)
}
