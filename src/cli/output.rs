//! Handles all user-facing output for the CLI.
//!
//! The harness itself is plain text; the `--list` view is colorized with `termcolor`
//! when standard output is a terminal, or serialized with `serde_json`.

use std::io::Write;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::syntax::TestCase;
use crate::{err_msg, GenError};

/// Writes the rendered harness to standard output.
pub fn write_stdout(text: &str) -> Result<(), GenError> {
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    lock.write_all(text.as_bytes())
        .and_then(|()| lock.flush())
        .map_err(|e| err_msg!(Output, "Failed to write to stdout: {}", e).caused_by(e))
}

/// Writes the rendered harness to a file.
pub fn write_file(path: &std::path::Path, text: &str) -> Result<(), GenError> {
    std::fs::write(path, text).map_err(|e| {
        err_msg!(Io, "Failed to write '{}': {}", path.display(), e).caused_by(e)
    })
}

/// Serializes the discovered cases as a pretty JSON array.
pub fn cases_to_json(cases: &[TestCase]) -> Result<String, GenError> {
    serde_json::to_string_pretty(cases)
        .map_err(|e| err_msg!(Output, "Failed to serialize test cases: {}", e).caused_by(e))
}

/// One listing line: `file:line name(arguments) == expected`.
pub fn format_case(case: &TestCase) -> String {
    format!(
        "{} {}({}) == {}",
        case.location, case.name, case.call_arguments, case.expected
    )
}

/// Prints the discovered cases, colored when stdout is a terminal.
pub fn print_cases(cases: &[TestCase], choice: ColorChoice) -> Result<(), GenError> {
    let mut stdout = StandardStream::stdout(choice);
    write_cases(&mut stdout, cases)
        .map_err(|e| err_msg!(Output, "Failed to write listing: {}", e).caused_by(e))
}

fn write_cases<W: WriteColor>(out: &mut W, cases: &[TestCase]) -> std::io::Result<()> {
    for case in cases {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
        write!(out, "{}", case.location)?;
        out.reset()?;
        write!(out, " ")?;
        out.set_color(ColorSpec::new().set_bold(true))?;
        write!(out, "{}", case.name)?;
        out.reset()?;
        writeln!(out, "({}) == {}", case.call_arguments, case.expected)?;
    }
    out.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
    writeln!(out, "{} test case(s)", cases.len())?;
    out.reset()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::SourceLocation;
    use termcolor::NoColor;

    fn case() -> TestCase {
        TestCase {
            name: "test_add".to_string(),
            return_type: "int".to_string(),
            parameters: "int a, int b".to_string(),
            call_arguments: "2, 3".to_string(),
            expected: "5".to_string(),
            location: SourceLocation::new("tests/add.c", 3),
        }
    }

    #[test]
    fn format_case_shows_location_and_call() {
        assert_eq!(format_case(&case()), "tests/add.c:3 test_add(2, 3) == 5");
    }

    #[test]
    fn plain_listing_matches_format_case() {
        let mut out = NoColor::new(Vec::new());
        write_cases(&mut out, &[case()]).unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();
        assert_eq!(text, format!("{}\n1 test case(s)\n", format_case(&case())));
    }

    #[test]
    fn json_listing_carries_every_field() {
        let json = cases_to_json(&[case()]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let first = &value[0];
        assert_eq!(first["name"], "test_add");
        assert_eq!(first["return_type"], "int");
        assert_eq!(first["parameters"], "int a, int b");
        assert_eq!(first["call_arguments"], "2, 3");
        assert_eq!(first["expected"], "5");
        assert_eq!(first["location"]["line"], 3);
    }
}
