// Copyright (c) 2025 pgprint Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Indentation of multi-line blocks

/// One level of nesting
pub const DEFAULT_INDENT_UNIT: &str = "\t";

/// Prefix every line of `text` with `level` tabs
pub fn indent(text: &str, level: usize) -> String {
    indent_with(text, level, DEFAULT_INDENT_UNIT)
}

/// Prefix every line of `text` with `level` copies of `unit`.
///
/// Lines are split on `\n` only, so an empty line still gets the prefix and
/// `indent_with(indent_with(s, a, u), b, u) == indent_with(s, a + b, u)`.
pub fn indent_with(text: &str, level: usize, unit: &str) -> String {
    if level == 0 {
        return text.to_string();
    }

    let prefix = unit.repeat(level);
    text.split('\n')
        .map(|line| format!("{}{}", prefix, line))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_every_line() {
        assert_eq!(indent("a\nb", 1), "\ta\n\tb");
        assert_eq!(indent("\nx\n", 1), "\t\n\tx\n\t");
        assert_eq!(indent("", 2), "\t\t");
    }

    #[test]
    fn test_zero_is_identity() {
        assert_eq!(indent("a\n b", 0), "a\n b");
    }

    #[test]
    fn test_composition() {
        let samples = ["", "one", "one\ntwo", "\n\n", "a\n\tb\nc\n"];
        for s in samples {
            assert_eq!(indent(&indent(s, 1), 1), indent(s, 2));
            assert_eq!(indent(&indent(s, 2), 3), indent(s, 5));
            assert_eq!(
                indent_with(&indent_with(s, 1, "  "), 2, "  "),
                indent_with(s, 3, "  ")
            );
        }
    }
}
