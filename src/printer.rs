//! Lowers a [`Stylesheet`] to a flat token stream and formats that stream
//! back into CSS source text. Splitting the two steps keeps the formatting
//! rules (indentation, blank lines) in one place, independent of how the
//! tree happens to be shaped.

use log::info;

use crate::block::{AtBody, Block, Stylesheet};
use crate::config::Config;

enum Token {
    Comment(String),
    SelStart(String),
    SelEnd,
    AtStart { name: String, prelude: String, has_body: bool },
    AtEnd,
    Property(String),
    Value(String),
}

/// Render `sheet` to CSS source text.
pub fn print(sheet: &Stylesheet, config: &Config) -> String {
    let mut tokens = Vec::new();
    if config.preserve_comments {
        for comment in &sheet.leading_trivia {
            tokens.push(Token::Comment(comment.clone()));
        }
    }
    for block in &sheet.blocks {
        lower_block(block, &mut tokens);
    }
    format_tokens(&tokens)
}

fn lower_block(block: &Block, tokens: &mut Vec<Token>) {
    match block {
        Block::Style(style) => {
            tokens.push(Token::SelStart(style.selector.clone()));
            for (name, decl) in style.properties.iter() {
                tokens.push(Token::Property(name.to_string()));
                tokens.push(Token::Value(decl.to_css()));
            }
            tokens.push(Token::SelEnd);
        }
        Block::At(at) => match &at.body {
            AtBody::None => {
                let prelude = unwrap_url_prelude(&at.name, &at.prelude);
                if prelude != at.prelude {
                    info!("@{}: unwrapped url() prelude `{}` -> `{}`", at.name, at.prelude, prelude);
                }
                tokens.push(Token::AtStart {
                    name: at.name.clone(),
                    prelude,
                    has_body: false,
                });
            }
            AtBody::Declarations(props) => {
                tokens.push(Token::AtStart {
                    name: at.name.clone(),
                    prelude: at.prelude.clone(),
                    has_body: true,
                });
                for (name, decl) in props.iter() {
                    tokens.push(Token::Property(name.to_string()));
                    tokens.push(Token::Value(decl.to_css()));
                }
                tokens.push(Token::AtEnd);
            }
            AtBody::Blocks(children) => {
                tokens.push(Token::AtStart {
                    name: at.name.clone(),
                    prelude: at.prelude.clone(),
                    has_body: true,
                });
                for child in children {
                    lower_block(child, tokens);
                }
                tokens.push(Token::AtEnd);
            }
        },
    }
}

/// `@import`/`@namespace` preludes are commonly written as `url("x.css")`;
/// the bare string form is equivalent and shorter.
fn unwrap_url_prelude(name: &str, prelude: &str) -> String {
    let lname = name.to_ascii_lowercase();
    if lname != "import" && lname != "namespace" {
        return prelude.to_string();
    }
    let trimmed = prelude.trim_start();
    if let Some(rest) = trimmed.strip_prefix("url(").or_else(|| trimmed.strip_prefix("URL(")) {
        if let Some(close) = rest.find(')') {
            let inner = rest[..close].trim();
            let tail = &rest[close + 1..];
            return format!("{}{}", inner, tail);
        }
    }
    prelude.to_string()
}

fn format_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut depth = 0usize;
    let mut pending_property: Option<String> = None;

    let indent = |depth: usize| "    ".repeat(depth);

    for token in tokens {
        match token {
            Token::Comment(text) => {
                out.push_str(&indent(depth));
                out.push_str("/* ");
                out.push_str(text);
                out.push_str(" */\n");
            }
            Token::SelStart(sel) => {
                out.push_str(&indent(depth));
                out.push_str(sel);
                out.push_str(" {\n");
                depth += 1;
            }
            Token::SelEnd => {
                depth = depth.saturating_sub(1);
                out.push_str(&indent(depth));
                out.push_str("}\n\n");
            }
            Token::AtStart { name, prelude, has_body } => {
                out.push_str(&indent(depth));
                out.push('@');
                out.push_str(name);
                if !prelude.is_empty() {
                    out.push(' ');
                    out.push_str(prelude);
                }
                if *has_body {
                    out.push_str(" {\n");
                    depth += 1;
                } else {
                    out.push_str(";\n\n");
                }
            }
            Token::AtEnd => {
                depth = depth.saturating_sub(1);
                out.push_str(&indent(depth));
                out.push_str("}\n\n");
            }
            Token::Property(name) => {
                pending_property = Some(name.clone());
            }
            Token::Value(value) => {
                let name = pending_property.take().unwrap_or_default();
                out.push_str(&indent(depth));
                out.push_str(&name);
                out.push_str(": ");
                out.push_str(value);
                out.push_str(";\n");
            }
        }
    }

    while out.ends_with('\n') {
        out.pop();
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use crate::parser::parse;

    #[test]
    fn prints_a_simple_rule() {
        let sheet = parse("a{color:red;margin:1px}").unwrap();
        let text = print(&sheet, &Config::default());
        assert_eq!(text, "a {\n    color: red;\n    margin: 1px;\n}\n");
    }

    #[test]
    fn prints_nested_at_rule_with_indentation() {
        let sheet = parse("@media screen{a{color:red}}").unwrap();
        let text = print(&sheet, &Config::default());
        assert!(text.contains("@media screen {\n    a {\n        color: red;\n"));
    }

    #[test]
    fn unwraps_url_prelude_on_import() {
        let sheet = parse("@import url(foo.css);").unwrap();
        let text = print(&sheet, &Config::default());
        assert!(text.starts_with("@import foo.css;"));
    }

    #[test]
    fn drops_leading_comment_by_default() {
        let sheet = parse("/* licence */\na{color:red}").unwrap();
        let text = print(&sheet, &Config::default());
        assert_eq!(text, "a {\n    color: red;\n}\n");
    }

    #[test]
    fn keeps_leading_comment_when_preserve_comments_is_set() {
        let sheet = parse("/* licence */\na{color:red}").unwrap();
        let config = Config { preserve_comments: true, ..Config::default() };
        let text = print(&sheet, &config);
        assert!(text.starts_with("/* licence */\n"));
        assert!(text.contains("a {\n    color: red;\n}\n"));
    }
}
