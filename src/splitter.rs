//! The whitespace-aware splitter: splits a value on a delimiter while
//! treating quoted strings and balanced parenthesised groups as opaque.
//!
//! Structured like the host toolkit's byte-cursor readers (a linear scan
//! that tracks just enough state to know whether the current character is
//! "inside" something), except here the state is a small set of flags
//! rather than a length-prefixed record to consume.

/// Split `s` on top-level occurrences of `sep`.
///
/// *Top-level* means outside any double-quoted string, single-quoted
/// string, or balanced `(...)` group. A `sep` preceded by an odd number of
/// backslashes is escaped and kept literal, like any other boundary
/// character. Parenthesis nesting uses a real depth counter, so
/// `calc((a + b) * c)` balances correctly; quote state is a flat in/out
/// flag per quote kind (quotes do not nest in CSS).
///
/// Returns an empty list when `s` is empty or equals a single `sep`
/// character, matching the reference behaviour.
pub fn split(sep: char, s: &str) -> Vec<String> {
    if s.is_empty() || s.chars().eq(std::iter::once(sep)) {
        return Vec::new();
    }

    let mut out = Vec::new();
    let mut current = String::new();
    let mut paren_depth: u32 = 0;
    let mut in_dquote = false;
    let mut in_squote = false;
    let mut backslashes = 0u32;

    for c in s.chars() {
        if c == '\\' {
            backslashes += 1;
            current.push(c);
            continue;
        }
        let escaped = backslashes % 2 == 1;
        backslashes = 0;

        if !escaped {
            if in_dquote {
                if c == '"' {
                    in_dquote = false;
                }
            } else if in_squote {
                if c == '\'' {
                    in_squote = false;
                }
            } else if paren_depth > 0 {
                match c {
                    '(' => paren_depth += 1,
                    ')' => paren_depth -= 1,
                    _ => {}
                }
            } else {
                match c {
                    '"' => in_dquote = true,
                    '\'' => in_squote = true,
                    '(' => paren_depth += 1,
                    _ if c == sep => {
                        out.push(std::mem::take(&mut current));
                        continue;
                    }
                    _ => {}
                }
            }
        }
        current.push(c);
    }
    out.push(current);
    out
}

/// Left inverse of [`split`]: rejoins segments with `sep`. Only a true
/// inverse when none of the original top-level `sep` occurrences were
/// inside a quote or paren group (invariant 5 in the design doc).
pub fn join(sep: char, parts: &[String]) -> String {
    parts.join(&sep.to_string())
}

/// Like [`split`], but splits on *runs* of top-level whitespace rather than
/// a single exact character, and drops empty leading/trailing segments.
/// Dissolve and merge both reason about "space-separated sub-values" where
/// the number of spaces between tokens is not itself meaningful.
pub fn split_ws(s: &str) -> Vec<String> {
    split(' ', &normalize_ws_runs(s))
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect()
}

/// Collapse runs of top-level whitespace to a single space, leaving
/// whitespace inside quotes/parens untouched.
fn normalize_ws_runs(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut paren_depth: u32 = 0;
    let mut in_dquote = false;
    let mut in_squote = false;
    let mut backslashes = 0u32;
    let mut prev_was_top_level_ws = false;

    for c in s.chars() {
        if c == '\\' {
            backslashes += 1;
            out.push(c);
            prev_was_top_level_ws = false;
            continue;
        }
        let escaped = backslashes % 2 == 1;
        backslashes = 0;
        let top_level = !escaped && !in_dquote && !in_squote && paren_depth == 0;

        if !escaped {
            match c {
                '"' if !in_squote && paren_depth == 0 => in_dquote = !in_dquote,
                '\'' if !in_dquote && paren_depth == 0 => in_squote = !in_squote,
                '(' if !in_dquote && !in_squote => paren_depth += 1,
                ')' if !in_dquote && !in_squote && paren_depth > 0 => paren_depth -= 1,
                _ => {}
            }
        }

        if top_level && c.is_whitespace() {
            if !prev_was_top_level_ws {
                out.push(' ');
            }
            prev_was_top_level_ws = true;
        } else {
            out.push(c);
            prev_was_top_level_ws = false;
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_on_top_level_commas() {
        assert_eq!(split(',', "a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn keeps_commas_inside_quotes_literal() {
        assert_eq!(
            split(',', "\"Helvetica, Neue\",Arial"),
            vec!["\"Helvetica, Neue\"", "Arial"]
        );
    }

    #[test]
    fn keeps_commas_inside_parens_literal() {
        assert_eq!(
            split(',', "rgb(1,2,3),red"),
            vec!["rgb(1,2,3)", "red"]
        );
    }

    #[test]
    fn balances_nested_parens() {
        assert_eq!(split(',', "calc((a+b)*c),2px"), vec!["calc((a+b)*c)", "2px"]);
    }

    #[test]
    fn empty_and_single_sep_return_empty_list() {
        assert!(split(',', "").is_empty());
        assert!(split(',', ",").is_empty());
    }

    #[test]
    fn escaped_separator_is_literal() {
        assert_eq!(split(',', r"a\,b,c"), vec![r"a\,b", "c"]);
    }

    #[test]
    fn join_is_left_inverse_when_no_top_level_sep_is_hidden() {
        let original = "a,b,c";
        let parts = split(',', original);
        assert_eq!(join(',', &parts), original);
    }

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(split(' ', "1px 2px 3px"), vec!["1px", "2px", "3px"]);
    }

    #[test]
    fn split_ws_collapses_runs_and_trims() {
        assert_eq!(split_ws("  1px   2px  3px "), vec!["1px", "2px", "3px"]);
    }

    #[test]
    fn split_ws_respects_quotes_and_parens() {
        assert_eq!(
            split_ws("url(a b c) \"x y\" bold"),
            vec!["url(a b c)", "\"x y\"", "bold"]
        );
    }
}
