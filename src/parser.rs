//! A hand-written, single-pass scanner over CSS source text, producing the
//! `Block` tree the optimiser consumes.
//!
//! Structured the same way the host toolkit's binary-format readers are: a
//! cursor over the input with `peek`/`advance` primitives, falling back to a
//! `Result` only at the handful of points that can genuinely fail (an
//! unterminated string or comment, a block whose closing `}` never arrives).
//! Everything else -- a malformed declaration, an unrecognised top-level
//! fragment -- is skipped with a `debug` log rather than aborting the parse,
//! mirroring the optimiser core's own total posture.

use log::debug;

use crate::block::{AtBlock, AtBody, Block, Declaration, PropertyMap, Stylesheet};
use crate::error::{Error, Result};
use crate::splitter;
use crate::value;

struct Cursor {
    chars: Vec<char>,
    pos: usize,
}

impl Cursor {
    fn new(s: &str) -> Self {
        Cursor {
            chars: s.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }
}

/// Parse a CSS source document into a [`Stylesheet`].
pub fn parse(source: &str) -> Result<Stylesheet> {
    let (cleaned, leading_trivia) = strip_comments(source)?;
    let mut cur = Cursor::new(&cleaned);
    let blocks = parse_blocks(&mut cur)?;
    Ok(Stylesheet { blocks, leading_trivia })
}

/// Strip `/* ... */` comments outside of string literals, replacing each
/// with a single space so adjoining tokens never get glued together.
/// Also captures the text of every comment seen before the first
/// non-whitespace character of the cleaned output, in source order, since
/// that's the only comment trivia the printer is allowed to reproduce.
fn strip_comments(source: &str) -> Result<(String, Vec<String>)> {
    let chars: Vec<char> = source.chars().collect();
    let mut out = String::with_capacity(source.len());
    let mut leading = Vec::new();
    let mut seen_content = false;
    let mut i = 0usize;
    let mut in_dquote = false;
    let mut in_squote = false;
    let mut quote_start = 0usize;
    let mut backslashes = 0u32;

    while i < chars.len() {
        let c = chars[i];
        if c == '\\' {
            backslashes += 1;
            out.push(c);
            seen_content = true;
            i += 1;
            continue;
        }
        let escaped = backslashes % 2 == 1;
        backslashes = 0;

        if !escaped && !in_dquote && !in_squote && c == '/' && chars.get(i + 1) == Some(&'*') {
            let body_start = i + 2;
            i = body_start;
            let mut closed = false;
            while i + 1 < chars.len() {
                if chars[i] == '*' && chars[i + 1] == '/' {
                    if !seen_content {
                        leading.push(chars[body_start..i].iter().collect::<String>().trim().to_string());
                    }
                    i += 2;
                    closed = true;
                    break;
                }
                i += 1;
            }
            if !closed {
                return Err(Error::UnterminatedComment);
            }
            out.push(' ');
            continue;
        }

        if !escaped {
            match c {
                '"' if !in_squote => {
                    if !in_dquote {
                        quote_start = i;
                    }
                    in_dquote = !in_dquote;
                }
                '\'' if !in_dquote => {
                    if !in_squote {
                        quote_start = i;
                    }
                    in_squote = !in_squote;
                }
                _ => {}
            }
        }
        out.push(c);
        if !c.is_whitespace() {
            seen_content = true;
        }
        i += 1;
    }

    if in_dquote || in_squote {
        return Err(Error::UnterminatedString { at: quote_start });
    }
    Ok((out, leading))
}

/// Scan forward, tracking quotes and balanced `(...)`, until one of `stops`
/// is hit at the top level; returns the text read (excluding the stop) and
/// the stop character, consuming it. Returns `None` at end of input with no
/// stop found (a trailing malformed fragment).
fn read_head(cur: &mut Cursor, stops: &[char]) -> Option<(String, char)> {
    let mut buf = String::new();
    let mut paren_depth = 0u32;
    let mut in_dquote = false;
    let mut in_squote = false;
    let mut backslashes = 0u32;

    while let Some(c) = cur.peek() {
        if c == '\\' {
            backslashes += 1;
            buf.push(c);
            cur.advance();
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
                    _ if stops.contains(&c) => {
                        cur.advance();
                        return Some((buf, c));
                    }
                    _ => {}
                }
            }
        }
        buf.push(c);
        cur.advance();
    }
    None
}

/// Consume a `{ ... }` group (the opening brace must be the current
/// character) and return its inner text, honouring nested braces and quotes.
fn read_balanced_braces(cur: &mut Cursor) -> Result<String> {
    cur.advance(); // the opening '{'
    let mut buf = String::new();
    let mut depth = 1u32;
    let mut in_dquote = false;
    let mut in_squote = false;
    let mut backslashes = 0u32;

    while let Some(c) = cur.peek() {
        if c == '\\' {
            backslashes += 1;
            buf.push(c);
            cur.advance();
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
            } else {
                match c {
                    '"' => in_dquote = true,
                    '\'' => in_squote = true,
                    '{' => depth += 1,
                    '}' => {
                        depth -= 1;
                        if depth == 0 {
                            cur.advance();
                            return Ok(buf);
                        }
                    }
                    _ => {}
                }
            }
        }
        buf.push(c);
        cur.advance();
    }
    Err(Error::UnterminatedBlock)
}

/// Does `s` contain a `{` outside any quoted string? Used to tell an
/// at-rule's nested-rule body (`@media ... { a { ... } }`) apart from a flat
/// declaration body (`@font-face { ... }`).
fn contains_top_level_brace(s: &str) -> bool {
    let mut in_dquote = false;
    let mut in_squote = false;
    let mut backslashes = 0u32;
    for c in s.chars() {
        if c == '\\' {
            backslashes += 1;
            continue;
        }
        let escaped = backslashes % 2 == 1;
        backslashes = 0;
        if escaped {
            continue;
        }
        if in_dquote {
            if c == '"' {
                in_dquote = false;
            }
            continue;
        }
        if in_squote {
            if c == '\'' {
                in_squote = false;
            }
            continue;
        }
        match c {
            '"' => in_dquote = true,
            '\'' => in_squote = true,
            '{' => return true,
            _ => {}
        }
    }
    false
}

fn parse_declarations(body: &str) -> PropertyMap {
    let mut props = PropertyMap::new();
    for segment in splitter::split(';', body) {
        let trimmed = segment.trim();
        if trimmed.is_empty() {
            continue;
        }
        let parts = splitter::split(':', trimmed);
        if parts.len() < 2 {
            debug!("skipping malformed declaration (no top-level ':'): {}", trimmed);
            continue;
        }
        let name = parts[0].trim().to_ascii_lowercase();
        if name.is_empty() {
            continue;
        }
        let raw_value = parts[1..].join(":");
        let (v, important) = value::strip_importance(raw_value.trim());
        props.insert(name, Declaration::new(v, important));
    }
    props
}

fn parse_blocks(cur: &mut Cursor) -> Result<Vec<Block>> {
    let mut blocks = Vec::new();
    loop {
        cur.skip_ws();
        if cur.at_end() || cur.peek() == Some('}') {
            return Ok(blocks);
        }

        let (head, term) = match read_head(cur, &['{', ';', '}']) {
            Some(pair) => pair,
            None => return Ok(blocks),
        };
        let head = head.trim();
        if head.is_empty() {
            continue;
        }
        if term == '}' {
            debug!("skipping malformed fragment before an unexpected '}}': {}", head);
            continue;
        }

        if let Some(rest) = head.strip_prefix('@') {
            let mut split_at = rest.len();
            for (i, c) in rest.char_indices() {
                if c.is_whitespace() {
                    split_at = i;
                    break;
                }
            }
            let name = rest[..split_at].to_string();
            let prelude = rest[split_at..].trim().to_string();

            if term == ';' {
                blocks.push(Block::At(AtBlock {
                    name,
                    prelude,
                    body: AtBody::None,
                }));
            } else {
                let body = read_balanced_braces(cur)?;
                if contains_top_level_brace(&body) {
                    let mut inner = Cursor::new(&body);
                    let children = parse_blocks(&mut inner)?;
                    blocks.push(Block::At(AtBlock {
                        name,
                        prelude,
                        body: AtBody::Blocks(children),
                    }));
                } else {
                    let props = parse_declarations(&body);
                    blocks.push(Block::At(AtBlock {
                        name,
                        prelude,
                        body: AtBody::Declarations(props),
                    }));
                }
            }
        } else {
            if term != '{' {
                debug!("skipping malformed top-level statement: {}", head);
                continue;
            }
            let body = read_balanced_braces(cur)?;
            let props = parse_declarations(&body);
            blocks.push(Block::Style(crate::block::StyleBlock {
                selector: head.to_string(),
                properties: props,
            }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_a_simple_rule() {
        let sheet = parse("a { color: red; margin: 1px; }").unwrap();
        assert_eq!(sheet.blocks.len(), 1);
        match &sheet.blocks[0] {
            Block::Style(s) => {
                assert_eq!(s.selector, "a");
                assert_eq!(s.properties.get("color").unwrap().value, "red");
                assert_eq!(s.properties.get("margin").unwrap().value, "1px");
            }
            _ => panic!("expected a style block"),
        }
    }

    #[test]
    fn strips_comments_outside_strings() {
        let sheet = parse("a { /* note */ color: red; }").unwrap();
        match &sheet.blocks[0] {
            Block::Style(s) => assert_eq!(s.properties.get("color").unwrap().value, "red"),
            _ => panic!("expected a style block"),
        }
    }

    #[test]
    fn keeps_comment_like_text_inside_strings() {
        let sheet = parse("a { content: \"/* not a comment */\"; }").unwrap();
        match &sheet.blocks[0] {
            Block::Style(s) => {
                assert_eq!(s.properties.get("content").unwrap().value, "\"/* not a comment */\"");
            }
            _ => panic!("expected a style block"),
        }
    }

    #[test]
    fn parses_statement_form_at_rule() {
        let sheet = parse("@import url(foo.css);").unwrap();
        match &sheet.blocks[0] {
            Block::At(a) => {
                assert_eq!(a.name, "import");
                assert_eq!(a.prelude, "url(foo.css)");
                assert!(matches!(a.body, AtBody::None));
            }
            _ => panic!("expected an at-rule"),
        }
    }

    #[test]
    fn parses_nested_at_rule_blocks() {
        let sheet = parse("@media screen { a { color: red; } }").unwrap();
        match &sheet.blocks[0] {
            Block::At(a) => {
                assert_eq!(a.name, "media");
                assert_eq!(a.prelude, "screen");
                match &a.body {
                    AtBody::Blocks(children) => {
                        assert_eq!(children.len(), 1);
                    }
                    _ => panic!("expected nested blocks"),
                }
            }
            _ => panic!("expected an at-rule"),
        }
    }

    #[test]
    fn parses_flat_declaration_at_rule() {
        let sheet = parse("@font-face { font-family: Arial; src: url(a.woff); }").unwrap();
        match &sheet.blocks[0] {
            Block::At(a) => {
                assert_eq!(a.name, "font-face");
                match &a.body {
                    AtBody::Declarations(props) => {
                        assert_eq!(props.get("font-family").unwrap().value, "Arial");
                    }
                    _ => panic!("expected a flat declaration body"),
                }
            }
            _ => panic!("expected an at-rule"),
        }
    }

    #[test]
    fn skips_malformed_declaration_without_colon() {
        let sheet = parse("a { color red; margin: 1px; }").unwrap();
        match &sheet.blocks[0] {
            Block::Style(s) => {
                assert!(!s.properties.contains("color"));
                assert_eq!(s.properties.get("margin").unwrap().value, "1px");
            }
            _ => panic!("expected a style block"),
        }
    }

    #[test]
    fn unterminated_string_is_an_error() {
        assert!(parse("a { content: \"never closed; }").is_err());
    }

    #[test]
    fn unterminated_block_is_an_error() {
        assert!(parse("a { color: red;").is_err());
    }

    #[test]
    fn captures_leading_comment_as_trivia() {
        let sheet = parse("/* licence */\na { color: red; }").unwrap();
        assert_eq!(sheet.leading_trivia, vec!["licence".to_string()]);
    }

    #[test]
    fn comment_after_content_is_not_leading_trivia() {
        let sheet = parse("a { /* note */ color: red; }").unwrap();
        assert!(sheet.leading_trivia.is_empty());
    }
}
