//! Banner printed by the query tool before the listing starts
//!
//! The tool prints a version notice, confirms the login, then prints a help
//! hint framed by blank lines. Anything else means we are not talking to the
//! tool we expect, so a mismatch is fatal.

use std::sync::LazyLock;

use regex::Regex;

struct ExpectedLine {
    description: &'static str,
    pattern: &'static str,
}

const EXPECTED: [ExpectedLine; 5] = [
    ExpectedLine {
        description: "query tool version notice",
        pattern: r"^(?:NOTICE:\s+)?Box Backup Query Tool\b",
    },
    ExpectedLine {
        description: "login confirmation",
        pattern: r"^Login complete\.?$",
    },
    ExpectedLine {
        description: "blank line",
        pattern: r"^\s*$",
    },
    ExpectedLine {
        description: "help hint",
        pattern: r#"^Type "help" for a list of commands\.?$"#,
    },
    ExpectedLine {
        description: "blank line",
        pattern: r"^\s*$",
    },
];

/// Number of banner lines preceding the first entry.
pub const PREAMBLE_LINES: usize = EXPECTED.len();

static PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    EXPECTED
        .iter()
        .map(|e| Regex::new(e.pattern).expect("preamble pattern is invalid"))
        .collect()
});

/// What the banner line at `index` (0-based) should be.
pub fn description(index: usize) -> &'static str {
    EXPECTED[index].description
}

/// Check the banner line at `index` (0-based).
///
/// On mismatch returns a description of what was expected there.
pub fn check_line(index: usize, line: &str) -> Result<(), &'static str> {
    if PATTERNS[index].is_match(line) {
        Ok(())
    } else {
        Err(description(index))
    }
}

/// The banner as the query tool prints it. Used by fixtures.
pub fn sample() -> &'static str {
    "NOTICE:  Box Backup Query Tool v0.11, (c) Ben Summers and contributors 2003-2011\n\
     Login complete.\n\
     \n\
     Type \"help\" for a list of commands.\n\
     \n"
}
