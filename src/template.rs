//! # Placeholder Templates
//!
//! Paths and file bodies in a manifest are small templates: text
//! interleaved with `{{ ... }}` actions, where an action is one of
//!
//! - `{{.name}}`: the value of the variable `name`
//! - `{{"text"}}`: a quoted string literal, the way to emit a literal `{{`
//! - `{{/* comment */}}`: nothing
//!
//! An action opened with `{{- ` trims whitespace (spaces, tabs, newlines)
//! immediately before it; one closed with ` -}}` trims whitespace
//! immediately after it.
//!
//! ```
//! use std::collections::HashMap;
//! use blop::template::Template;
//!
//! let tmpl = Template::parse("hello {{ .name }}").unwrap();
//! let mut vars = HashMap::new();
//! vars.insert("name".to_string(), "bob".to_string());
//! assert_eq!(tmpl.render(&vars).unwrap(), "hello bob");
//! ```
//!
//! Referencing a variable that is not in the context is an error rather
//! than an empty substitution.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

const LEFT_DELIM: &str = "{{";

static FIELD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\.([A-Za-z_][A-Za-z0-9_]*)$").expect("field pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Text(String),
    Field { name: String, offset: usize },
}

/// A parsed template, ready to be rendered against any number of contexts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    nodes: Vec<Node>,
}

impl Template {
    /// Parses template source.
    pub fn parse(src: &str) -> Result<Self> {
        let mut nodes = Vec::new();
        let mut pos = 0;
        let mut trim_next = false;

        while let Some(rel) = src[pos..].find(LEFT_DELIM) {
            let open = pos + rel;
            let mut body_start = open + LEFT_DELIM.len();

            let mut text = &src[pos..open];
            if trim_next {
                text = trim_leading_space(text);
            }
            if has_left_trim(&src[body_start..]) {
                text = trim_trailing_space(text);
                body_start += 1;
            }
            push_text(&mut nodes, text);

            let close = find_close(src, body_start, open)?;
            let mut inner = &src[body_start..close];
            trim_next = has_right_trim(inner);
            if trim_next {
                inner = &inner[..inner.len() - 1];
            }

            if let Some(node) = parse_action(inner, open)? {
                nodes.push(node);
            }
            pos = close + 2;
        }

        let mut text = &src[pos..];
        if trim_next {
            text = trim_leading_space(text);
        }
        push_text(&mut nodes, text);

        Ok(Self { nodes })
    }

    /// Renders the template, substituting every field from `vars`.
    pub fn render(&self, vars: &HashMap<String, String>) -> Result<String> {
        let mut out = String::new();
        for node in &self.nodes {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Field { name, offset } => match vars.get(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        return Err(Error::Template {
                            message: format!(
                                "undefined variable '.{}' at offset {}",
                                name, offset
                            ),
                            variable: Some(name.clone()),
                        })
                    }
                },
            }
        }
        Ok(out)
    }

    /// Names of the variables the template references, in order of first use.
    pub fn variables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for node in &self.nodes {
            if let Node::Field { name, .. } = node {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }
}

/// Parses and renders `src` in one step.
pub fn render_str(src: &str, vars: &HashMap<String, String>) -> Result<String> {
    Template::parse(src)?.render(vars)
}

fn syntax_error(message: String) -> Error {
    Error::Template {
        message,
        variable: None,
    }
}

fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

fn trim_leading_space(text: &str) -> &str {
    text.trim_start_matches(is_space)
}

fn trim_trailing_space(text: &str) -> &str {
    text.trim_end_matches(is_space)
}

fn has_left_trim(rest: &str) -> bool {
    let mut chars = rest.chars();
    chars.next() == Some('-') && chars.next().is_some_and(is_space)
}

fn has_right_trim(inner: &str) -> bool {
    inner
        .strip_suffix('-')
        .is_some_and(|before| before.ends_with(is_space))
}

fn push_text(nodes: &mut Vec<Node>, text: &str) {
    if !text.is_empty() {
        nodes.push(Node::Text(text.to_string()));
    }
}

/// Finds the `}}` closing the action opened at `open`, skipping over
/// string literals and comments.
fn find_close(src: &str, from: usize, open: usize) -> Result<usize> {
    let bytes = src.as_bytes();
    let mut i = from;

    while i < bytes.len() {
        match bytes[i] {
            b'"' => {
                i += 1;
                loop {
                    match bytes.get(i) {
                        None | Some(b'\n') => {
                            return Err(syntax_error(format!(
                                "unterminated string literal in action at offset {}",
                                open
                            )))
                        }
                        Some(b'\\') => i += 2,
                        Some(b'"') => {
                            i += 1;
                            break;
                        }
                        Some(_) => i += 1,
                    }
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => match src[i + 2..].find("*/") {
                Some(end) => i += 2 + end + 2,
                None => {
                    return Err(syntax_error(format!(
                        "unclosed comment in action at offset {}",
                        open
                    )))
                }
            },
            b'}' if bytes.get(i + 1) == Some(&b'}') => return Ok(i),
            _ => i += 1,
        }
    }

    Err(syntax_error(format!("unclosed action at offset {}", open)))
}

fn parse_action(inner: &str, offset: usize) -> Result<Option<Node>> {
    let body = inner.trim_matches(is_space);

    if body.is_empty() {
        return Err(syntax_error(format!("empty action at offset {}", offset)));
    }

    if body.starts_with("/*") {
        if body.ends_with("*/") && body.len() >= 4 {
            return Ok(None);
        }
        return Err(syntax_error(format!(
            "unexpected text after comment at offset {}",
            offset
        )));
    }

    if body.starts_with('"') {
        let text = parse_string_literal(body, offset)?;
        return Ok(Some(Node::Text(text)));
    }

    if let Some(caps) = FIELD_PATTERN.captures(body) {
        return Ok(Some(Node::Field {
            name: caps[1].to_string(),
            offset,
        }));
    }

    Err(syntax_error(format!(
        "unsupported action '{}' at offset {}",
        body, offset
    )))
}

fn parse_string_literal(body: &str, offset: usize) -> Result<String> {
    let mut out = String::new();
    let mut chars = body[1..].char_indices();

    while let Some((idx, c)) = chars.next() {
        match c {
            '"' => {
                if idx + 2 != body.len() {
                    return Err(syntax_error(format!(
                        "unexpected text after string literal at offset {}",
                        offset
                    )));
                }
                return Ok(out);
            }
            '\\' => match chars.next().map(|(_, c)| c) {
                Some('"') => out.push('"'),
                Some('\\') => out.push('\\'),
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(other) => {
                    return Err(syntax_error(format!(
                        "unknown escape '\\{}' at offset {}",
                        other, offset
                    )))
                }
                None => break,
            },
            c => out.push(c),
        }
    }

    Err(syntax_error(format!(
        "unterminated string literal at offset {}",
        offset
    )))
}
