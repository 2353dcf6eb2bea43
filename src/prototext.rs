// SPDX-License-Identifier: Apache-2.0
//! Extractor for the protocol-buffer text netlist format.
//!
//! The source dataset ships a `netlist.pb.txt` of repeated `node { ... }`
//! messages. We run a small tokenizer and recursive-descent parser over the
//! full message tree instead of pattern-matching fragments, so nested
//! `attr { value { ... } }` messages cannot be mis-paired. Each `node`
//! carrying a `name` plus `width`/`height` attributes becomes one block;
//! nodes without both dimensions (ports, grouping nodes) are skipped.
//!
//! The format carries no power and no net information, so the connections
//! section of the output is always empty.

use compact_str::CompactString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::schema::{Block, Netlist};
use crate::{Error, Result};

pub const INPUT_FILE_NAME: &str = "netlist.pb.txt";
pub const OUTPUT_FILE_NAME: &str = "DeepMind_floorplan.txt";

/// Parse `<input_dir>/netlist.pb.txt` and write the normalized netlist to
/// `<output_dir>/DeepMind_floorplan.txt`. Returns the output path.
pub fn extract(input_dir: &Path, output_dir: &Path) -> Result<PathBuf> {
    let input_file = input_dir.join(INPUT_FILE_NAME);
    if !input_file.is_file() {
        return Err(Error::MissingInput(input_file));
    }
    let content = fs::read_to_string(&input_file)
        .map_err(|e| Error::io(&input_file, e))?;

    let netlist = parse_netlist(&content, &input_file)?;
    clilog::info!("parsed {} blocks from {}", netlist.blocks.len(),
                  input_file.display());

    fs::create_dir_all(output_dir).map_err(|e| Error::io(output_dir, e))?;
    let output_file = output_dir.join(OUTPUT_FILE_NAME);
    netlist.write_to(&output_file)?;
    Ok(output_file)
}

/// Parse protocol text into a normalized netlist.
pub fn parse_netlist(content: &str, origin: &Path) -> Result<Netlist> {
    let fields = Parser::new(content, origin).parse_document()?;
    let mut blocks = Vec::new();
    for (key, value) in &fields {
        if key != "node" {
            continue;
        }
        let Value::Message(node) = value else { continue };
        if let Some(block) = block_from_node(node) {
            blocks.push(block);
        }
    }
    Ok(Netlist { blocks, connections: vec![] })
}

fn block_from_node(node: &[(String, Value)]) -> Option<Block> {
    let name = node.iter().find_map(|(k, v)| match (k.as_str(), v) {
        ("name", Value::Str(s)) => Some(s.as_str()),
        _ => None,
    })?;
    let width = node_attr_f(node, "width")?;
    let height = node_attr_f(node, "height")?;
    Some(Block {
        name: CompactString::from(name),
        width,
        height,
        power: None,
    })
}

/// Look up an `attr { key: "..." value { f: ... } }` float on a node.
fn node_attr_f(node: &[(String, Value)], attr_key: &str) -> Option<f64> {
    for (k, v) in node {
        let Value::Message(attr) = v else { continue };
        if k != "attr" {
            continue;
        }
        let matches_key = attr.iter().any(|(k, v)| {
            matches!((k.as_str(), v), ("key", Value::Str(s)) if s == attr_key)
        });
        if !matches_key {
            continue;
        }
        for (k, v) in attr {
            let Value::Message(value_msg) = v else { continue };
            if k != "value" {
                continue;
            }
            for (k, v) in value_msg {
                if let ("f", Value::Scalar(s)) = (k.as_str(), v) {
                    return s.parse::<f64>().ok();
                }
            }
        }
    }
    None
}

/// One field value in the message tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Unquoted scalar (number, bool, enum name), kept as source text.
    Scalar(String),
    /// Quoted string with escapes resolved.
    Str(String),
    Message(Vec<(String, Value)>),
}

#[derive(Debug, PartialEq)]
enum Token {
    Ident(String),
    Str(String),
    Scalar(String),
    Colon,
    LBrace,
    RBrace,
}

struct Parser<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    origin: &'a Path,
    line: usize,
    peeked: Option<Token>,
}

impl<'a> Parser<'a> {
    fn new(content: &'a str, origin: &'a Path) -> Self {
        Parser {
            chars: content.chars().peekable(),
            origin,
            line: 1,
            peeked: None,
        }
    }

    fn err(&self, msg: impl Into<String>) -> Error {
        Error::parse(self.origin, self.line, msg)
    }

    /// Parse the whole document as a top-level field list.
    fn parse_document(mut self) -> Result<Vec<(String, Value)>> {
        let fields = self.parse_fields()?;
        if self.next_token()?.is_some() {
            return Err(self.err("unexpected '}' at top level"));
        }
        Ok(fields)
    }

    /// field := ident ':'? ( '{' fields '}' | scalar | string )
    ///
    /// Stops before a closing brace or at end of input.
    fn parse_fields(&mut self) -> Result<Vec<(String, Value)>> {
        let mut fields = Vec::new();
        loop {
            match self.peek_token()? {
                None | Some(Token::RBrace) => return Ok(fields),
                _ => {}
            }
            let name = match self.next_token()? {
                Some(Token::Ident(name)) => name,
                other => return Err(self.err(format!(
                    "expected field name, got {:?}", other))),
            };
            // the colon is mandatory for scalar fields and optional
            // before a nested message
            let had_colon = matches!(self.peek_token()?, Some(Token::Colon));
            if had_colon {
                self.next_token()?;
            }
            let value = match self.next_token()? {
                Some(Token::LBrace) => {
                    let inner = self.parse_fields()?;
                    match self.next_token()? {
                        Some(Token::RBrace) => {}
                        _ => return Err(self.err("unclosed message, expected '}'")),
                    }
                    Value::Message(inner)
                }
                Some(Token::Str(s)) if had_colon => Value::Str(s),
                Some(Token::Scalar(s)) if had_colon => Value::Scalar(s),
                Some(Token::Ident(s)) if had_colon => Value::Scalar(s),
                other => return Err(self.err(format!(
                    "expected value for field {:?}, got {:?}", name, other))),
            };
            fields.push((name, value));
        }
    }

    fn peek_token(&mut self) -> Result<Option<&Token>> {
        if self.peeked.is_none() {
            self.peeked = self.lex_token()?;
        }
        Ok(self.peeked.as_ref())
    }

    fn next_token(&mut self) -> Result<Option<Token>> {
        if let Some(t) = self.peeked.take() {
            return Ok(Some(t));
        }
        self.lex_token()
    }

    fn lex_token(&mut self) -> Result<Option<Token>> {
        loop {
            match self.chars.peek() {
                None => return Ok(None),
                Some('\n') => {
                    self.line += 1;
                    self.chars.next();
                }
                Some(c) if c.is_whitespace() => {
                    self.chars.next();
                }
                Some('#') => {
                    // comment to end of line
                    while let Some(&c) = self.chars.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.chars.next();
                    }
                }
                Some(':') => {
                    self.chars.next();
                    return Ok(Some(Token::Colon));
                }
                Some('{') => {
                    self.chars.next();
                    return Ok(Some(Token::LBrace));
                }
                Some('}') => {
                    self.chars.next();
                    return Ok(Some(Token::RBrace));
                }
                Some('"') => {
                    self.chars.next();
                    return Ok(Some(Token::Str(self.lex_string()?)));
                }
                Some(&c) if c.is_ascii_alphabetic() || c == '_' => {
                    let mut ident = String::new();
                    while let Some(&c) = self.chars.peek() {
                        if c.is_ascii_alphanumeric() || c == '_' {
                            ident.push(c);
                            self.chars.next();
                        } else {
                            break;
                        }
                    }
                    return Ok(Some(Token::Ident(ident)));
                }
                Some(&c) if c.is_ascii_digit() || c == '-' || c == '+' || c == '.' => {
                    let mut scalar = String::new();
                    while let Some(&c) = self.chars.peek() {
                        if c.is_ascii_alphanumeric()
                            || matches!(c, '.' | '-' | '+' | 'e' | 'E')
                        {
                            scalar.push(c);
                            self.chars.next();
                        } else {
                            break;
                        }
                    }
                    return Ok(Some(Token::Scalar(scalar)));
                }
                Some(&c) => {
                    return Err(self.err(format!("unexpected character {:?}", c)));
                }
            }
        }
    }

    fn lex_string(&mut self) -> Result<String> {
        let mut s = String::new();
        loop {
            match self.chars.next() {
                None => return Err(self.err("unterminated string literal")),
                Some('"') => return Ok(s),
                Some('\\') => match self.chars.next() {
                    Some('n') => s.push('\n'),
                    Some('t') => s.push('\t'),
                    Some(c) => s.push(c),
                    None => return Err(self.err("unterminated escape")),
                },
                Some('\n') => return Err(self.err("newline inside string literal")),
                Some(c) => s.push(c),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const SAMPLE: &str = r#"
node {
  name: "Grp_1/Pinput"
  attr {
    key: "height"
    value {
      f: 1.672
    }
  }
  attr {
    key: "type"
    value {
      placeholder: "macro"
    }
  }
  attr {
    key: "width"
    value {
      f: 4.4
    }
  }
}
node {
  name: "clk_port"
  attr {
    key: "type"
    value {
      placeholder: "port"
    }
  }
}
"#;

    #[test]
    fn extracts_named_dimensioned_nodes() {
        let netlist = parse_netlist(SAMPLE, &PathBuf::from("<mem>")).unwrap();
        assert_eq!(netlist.blocks.len(), 1);
        let b = &netlist.blocks[0];
        assert_eq!(b.name, "Grp_1/Pinput");
        assert_eq!(b.width, 4.4);
        assert_eq!(b.height, 1.672);
        assert_eq!(b.power, None);
        assert!(netlist.connections.is_empty());
    }

    #[test]
    fn connections_section_stays_empty_in_output() {
        let netlist = parse_netlist(SAMPLE, &PathBuf::from("<mem>")).unwrap();
        let text = netlist.to_string();
        let after = text.split("Connections:").nth(1).unwrap();
        assert!(after.trim().is_empty());
    }

    #[test]
    fn nested_braces_do_not_leak_across_nodes() {
        // a greedy multi-line match would pair n1's name with n2's width
        let tricky = r#"
node { name: "n1" attr { key: "misc" value { s: "x" } } }
node { name: "n2"
  attr { key: "width" value { f: 2 } }
  attr { key: "height" value { f: 3 } } }
"#;
        let netlist = parse_netlist(tricky, &PathBuf::from("<mem>")).unwrap();
        assert_eq!(netlist.blocks.len(), 1);
        assert_eq!(netlist.blocks[0].name, "n2");
    }

    #[test]
    fn unbalanced_brace_is_an_error() {
        let err = parse_netlist("node { name: \"x\"", &PathBuf::from("bad")).unwrap_err();
        assert!(err.to_string().contains("expected '}'"));
    }
}
