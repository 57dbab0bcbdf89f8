//! Renders discovered test cases into a self-contained C harness.
//!
//! The harness has three parts: a fixed preamble defining the `assert` helper, one
//! forward declaration per case, and a `main` that calls every case and returns the
//! number of failures. Argument and expected-value text is pasted in verbatim.

use crate::syntax::TestCase;

const INCLUDES: &str = "#include <stdio.h>\n#include <stdbool.h>\n";

const PASS_COLORED: &str = r"\033[1;32mPASS\033[m";
const FAIL_COLORED: &str = r"\033[1;31mFAIL\033[m";
const PASS_PLAIN: &str = "PASS";
const FAIL_PLAIN: &str = "FAIL";

/// Presentation options for the generated program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmitOptions {
    /// Wrap the PASS/FAIL markers in ANSI color escapes.
    pub color: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self { color: true }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HarnessEmitter {
    options: EmitOptions,
}

impl HarnessEmitter {
    pub fn new(options: EmitOptions) -> Self {
        Self { options }
    }

    /// Renders the full harness. Output depends only on `cases` and the options.
    pub fn render(&self, cases: &[TestCase]) -> String {
        let mut out = self.preamble();
        out.push('\n');

        for case in cases {
            out.push_str(&declaration(case));
        }
        if !cases.is_empty() {
            out.push('\n');
        }

        out.push_str("int main(void)\n{\n\tint ret = 0;\n\n");
        for case in cases {
            out.push_str(&invocation(case));
        }
        if !cases.is_empty() {
            out.push('\n');
        }
        out.push_str("\treturn ret;\n}\n");
        out
    }

    /// The includes and the `assert` helper.
    pub fn preamble(&self) -> String {
        let (pass, fail) = if self.options.color {
            (PASS_COLORED, FAIL_COLORED)
        } else {
            (PASS_PLAIN, FAIL_PLAIN)
        };

        let mut out = String::from(INCLUDES);
        out.push('\n');
        out.push_str("static inline int assert(bool exp, char *func_name)\n{\n");
        out.push_str("\tprintf(\"%s => \", func_name);\n");
        out.push_str("\tif (exp) {\n");
        out.push_str(&format!("\t\tprintf(\"{}\\n\");\n", pass));
        out.push_str("\t} else {\n");
        out.push_str(&format!("\t\tprintf(\"{}\\n\");\n", fail));
        out.push_str("\t}\n\n");
        out.push_str("\treturn (!exp) ? 1 : 0;\n}\n");
        out
    }
}

/// `<return_type> <name>(<parameters>);`
pub fn declaration(case: &TestCase) -> String {
    format!("{} {}({});\n", case.return_type, case.name, case.parameters)
}

/// `ret += assert(<name>(<arguments>) == <expected>, "<name>");`
pub fn invocation(case: &TestCase) -> String {
    format!(
        "\tret += assert({}({}) == {}, \"{}\");\n",
        case.name, case.call_arguments, case.expected, case.name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::SourceLocation;

    fn case(name: &str, parameters: &str, args: &str, expected: &str) -> TestCase {
        TestCase {
            name: name.to_string(),
            return_type: "int".to_string(),
            parameters: parameters.to_string(),
            call_arguments: args.to_string(),
            expected: expected.to_string(),
            location: SourceLocation::new("t.c", 1),
        }
    }

    #[test]
    fn renders_declaration_and_invocation_verbatim() {
        let cases = [case("test_add", "int a, int b", "2, 3", "5")];
        let out = HarnessEmitter::default().render(&cases);
        assert!(out.contains("\nint test_add(int a, int b);\n"));
        assert!(out.contains("\tret += assert(test_add(2, 3) == 5, \"test_add\");\n"));
    }

    #[test]
    fn renders_empty_harness() {
        let out = HarnessEmitter::new(EmitOptions { color: false }).render(&[]);
        let expected = "\
#include <stdio.h>
#include <stdbool.h>

static inline int assert(bool exp, char *func_name)
{
\tprintf(\"%s => \", func_name);
\tif (exp) {
\t\tprintf(\"PASS\\n\");
\t} else {
\t\tprintf(\"FAIL\\n\");
\t}

\treturn (!exp) ? 1 : 0;
}

int main(void)
{
\tint ret = 0;

\treturn ret;
}
";
        assert_eq!(out, expected);
    }

    #[test]
    fn renders_full_harness_in_list_order() {
        let cases = [
            case("test_mul_assign", "", "", "10"),
            case("test_return_arg", "int a", "7", "7"),
        ];
        let out = HarnessEmitter::new(EmitOptions { color: false }).render(&cases);
        let start = out.find("int test_mul_assign();").unwrap();
        let tail = &out[start..];
        let expected = "\
int test_mul_assign();
int test_return_arg(int a);

int main(void)
{
\tint ret = 0;

\tret += assert(test_mul_assign() == 10, \"test_mul_assign\");
\tret += assert(test_return_arg(7) == 7, \"test_return_arg\");

\treturn ret;
}
";
        assert_eq!(tail, expected);
    }

    #[test]
    fn colored_preamble_uses_ansi_escapes() {
        let preamble = HarnessEmitter::default().preamble();
        assert!(preamble.contains(r#"printf("\033[1;32mPASS\033[m\n");"#));
        assert!(preamble.contains(r#"printf("\033[1;31mFAIL\033[m\n");"#));
    }

    #[test]
    fn rendering_is_idempotent() {
        let cases = [case("test_x", "", "", "1"), case("test_y", "", "", "2")];
        let emitter = HarnessEmitter::default();
        assert_eq!(emitter.render(&cases), emitter.render(&cases));
    }
}
