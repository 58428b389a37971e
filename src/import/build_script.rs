//! Import portfolio data from a legacy JavaScript build script
//!
//! Older dashboards kept their data as a `const DATA = { ... };` object
//! literal. This module finds that literal and converts it to JSON: bare keys
//! are quoted, single-quoted strings become double-quoted, comments and
//! trailing commas are dropped. Anything that is not plain data (function
//! calls, variables, template strings) is rejected.

use crate::error::{WheelboardError, WheelboardResult};
use crate::vault::PlaintextPayload;

/// Name of the object literal holding the data
pub const DATA_BINDING: &str = "DATA";

/// Extract and parse the `DATA` object from build script source
pub fn extract_data(source: &str) -> WheelboardResult<PlaintextPayload> {
    let literal = find_literal(source, DATA_BINDING)?;
    let json = object_literal_to_json(literal)?;
    serde_json::from_str(&json)
        .map_err(|e| WheelboardError::Validation(format!("DATA is not plain data: {}", e)))
}

/// Locate the `{ ... }` text bound to `name`
///
/// Only an exact `const|let|var NAME = {` declaration counts; longer names
/// sharing the prefix are skipped.
fn find_literal<'a>(source: &'a str, name: &str) -> WheelboardResult<&'a str> {
    let mut missing_object = false;

    let start = ["const", "let", "var"]
        .iter()
        .flat_map(|kw| {
            let pattern = format!("{} {}", kw, name);
            source
                .match_indices(pattern.as_str())
                .map(|(at, _)| at + pattern.len())
                .collect::<Vec<_>>()
        })
        .filter(|&end| {
            !source[end..]
                .chars()
                .next()
                .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$')
        })
        .filter_map(|end| {
            let after_eq = source[end..]
                .trim_start()
                .strip_prefix('=')
                .map(str::trim_start)?;
            if after_eq.starts_with('{') {
                Some(source.len() - after_eq.len())
            } else {
                missing_object = true;
                None
            }
        })
        .min();

    let Some(start) = start else {
        return Err(WheelboardError::Validation(if missing_object {
            format!("{} is not assigned an object literal", name)
        } else {
            format!("Cannot find `const {} = {{` in script", name)
        }));
    };

    let end = matching_brace(&source[start..])?;
    Ok(&source[start..start + end])
}

/// Byte length of the balanced `{ ... }` at the start of `text`
fn matching_brace(text: &str) -> WheelboardResult<usize> {
    let mut scanner = Scanner::new(text);
    let mut depth = 0usize;

    while let Some(c) = scanner.peek() {
        match c {
            '"' | '\'' | '`' => {
                scanner.skip_string(c)?;
                continue;
            }
            '/' if scanner.skip_comment() => continue,
            '{' | '[' => depth += 1,
            '}' | ']' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Ok(scanner.pos + 1);
                }
            }
            _ => {}
        }
        scanner.bump();
    }

    Err(WheelboardError::Validation(
        "unterminated object literal".to_string(),
    ))
}

/// Rewrite a JavaScript object literal as JSON text
fn object_literal_to_json(literal: &str) -> WheelboardResult<String> {
    let mut scanner = Scanner::new(literal);
    let mut out = String::with_capacity(literal.len() + literal.len() / 4);

    while let Some(c) = scanner.peek() {
        match c {
            '"' => {
                let start = scanner.pos;
                scanner.skip_string('"')?;
                out.push_str(&literal[start..scanner.pos]);
            }
            '\'' => {
                let body = scanner.read_single_quoted()?;
                out.push('"');
                out.push_str(&body);
                out.push('"');
            }
            '`' => {
                return Err(WheelboardError::Validation(
                    "template strings are not supported in DATA".to_string(),
                ))
            }
            '/' if scanner.skip_comment() => {}
            ',' => {
                scanner.bump();
                if !matches!(scanner.peek_significant(), Some('}') | Some(']')) {
                    out.push(',');
                }
            }
            c if c.is_ascii_digit() || c == '.' => out.push_str(scanner.read_number()),
            c if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
                let word = scanner.read_identifier();
                if scanner.peek_significant() == Some(':') {
                    out.push('"');
                    out.push_str(word);
                    out.push('"');
                } else if matches!(word, "true" | "false" | "null") {
                    out.push_str(word);
                } else {
                    return Err(WheelboardError::Validation(format!(
                        "unsupported expression `{}` in DATA",
                        word
                    )));
                }
            }
            c => {
                out.push(c);
                scanner.bump();
            }
        }
    }

    Ok(out)
}

struct Scanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Skip a `//` or `/* */` comment at the cursor
    fn skip_comment(&mut self) -> bool {
        let rest = &self.text[self.pos..];
        if rest.starts_with("//") {
            self.pos += rest.find('\n').unwrap_or(rest.len());
            true
        } else if rest.starts_with("/*") {
            self.pos += rest.find("*/").map(|i| i + 2).unwrap_or(rest.len());
            true
        } else {
            false
        }
    }

    /// Next character that is not whitespace or inside a comment
    fn peek_significant(&mut self) -> Option<char> {
        let saved = self.pos;
        let found = loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('/') if self.skip_comment() => {}
                other => break other,
            }
        };
        self.pos = saved;
        found
    }

    fn skip_string(&mut self, quote: char) -> WheelboardResult<()> {
        self.bump();
        while let Some(c) = self.bump() {
            if c == '\\' {
                self.bump();
            } else if c == quote {
                return Ok(());
            }
        }
        Err(WheelboardError::Validation(
            "unterminated string literal".to_string(),
        ))
    }

    /// Read a `'...'` string and return its body escaped for a JSON string
    fn read_single_quoted(&mut self) -> WheelboardResult<String> {
        self.bump();
        let mut body = String::new();
        while let Some(c) = self.bump() {
            match c {
                '\\' => match self.bump() {
                    Some('\'') => body.push('\''),
                    Some(escaped) => {
                        body.push('\\');
                        body.push(escaped);
                    }
                    None => break,
                },
                '"' => body.push_str("\\\""),
                '\'' => return Ok(body),
                c => body.push(c),
            }
        }
        Err(WheelboardError::Validation(
            "unterminated string literal".to_string(),
        ))
    }

    /// Read a numeric literal, exponent sign included
    fn read_number(&mut self) -> &'a str {
        let start = self.pos;
        let mut prev = '\0';
        while let Some(c) = self.peek() {
            let sign_in_exponent = (c == '+' || c == '-') && matches!(prev, 'e' | 'E');
            if c.is_ascii_alphanumeric() || c == '.' || sign_in_exponent {
                prev = c;
                self.bump();
            } else {
                break;
            }
        }
        &self.text[start..self.pos]
    }

    fn read_identifier(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
                self.bump();
            } else {
                break;
            }
        }
        &self.text[start..self.pos]
    }
}
