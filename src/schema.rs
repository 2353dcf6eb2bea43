// SPDX-License-Identifier: Apache-2.0
//! The normalized "Blocks:/Connections:" flat-text schema.
//!
//! This is the single interchange format between the extraction stage and
//! everything downstream. A document is two labeled sections: `Blocks:`
//! followed by `name, width, height, power` lines (power is the literal
//! token `None` when absent), a blank separator, then `Connections:`
//! followed by one line per connection.
//!
//! There is no schema version tag and no escaping: block and net names are
//! assumed to never contain commas or whitespace. This assumption is
//! inherited from every vendor format we consume and is not enforced here.

use compact_str::CompactString;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::{Error, Result};

/// A rectangular circuit module.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub name: CompactString,
    pub width: f64,
    pub height: f64,
    /// Power dissipation; `None` when the source format provides none.
    pub power: Option<f64>,
}

/// One line of the connections section.
///
/// Extractors that synthesize nets use [`Connection::Net`]; extractors that
/// preserve vendor syntax verbatim use [`Connection::Raw`].
#[derive(Debug, Clone, PartialEq)]
pub enum Connection {
    Net {
        name: CompactString,
        members: Vec<CompactString>,
    },
    Raw(String),
}

impl Connection {
    /// Number of whitespace-separated tokens on the rendered line.
    ///
    /// The statistics stage uses this as the "connection size" of a line,
    /// counting the net name itself as one token.
    pub fn arity(&self) -> usize {
        match self {
            Connection::Net { members, .. } => 1 + members.len(),
            Connection::Raw(line) => line.split_whitespace().count(),
        }
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Connection::Net { name, members } => {
                write!(f, "{}", name)?;
                for m in members {
                    write!(f, " {}", m)?;
                }
                Ok(())
            }
            Connection::Raw(line) => write!(f, "{}", line),
        }
    }
}

/// The in-memory form of one normalized document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Netlist {
    pub blocks: Vec<Block>,
    pub connections: Vec<Connection>,
}

impl fmt::Display for Netlist {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Blocks:")?;
        for b in &self.blocks {
            match b.power {
                Some(p) => writeln!(f, "{}, {}, {}, {}", b.name, b.width, b.height, p)?,
                None => writeln!(f, "{}, {}, {}, None", b.name, b.width, b.height)?,
            }
        }
        writeln!(f)?;
        writeln!(f, "Connections:")?;
        for c in &self.connections {
            writeln!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl Netlist {
    /// Serialize to `path` in the normalized schema.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_string()).map_err(|e| Error::io(path, e))
    }

    /// Read and parse a normalized file.
    pub fn read_from(path: &Path) -> Result<Netlist> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Netlist::parse_str(&content, path)
    }

    /// Parse normalized text. `origin` is only used for error context.
    ///
    /// The scan is deliberately simple: trimmed lines, blank lines skipped,
    /// section switches on the `Blocks:` / `Connections:` labels, and any
    /// block line that does not split into exactly four comma-separated
    /// fields with numeric width/height is a hard error.
    pub fn parse_str(content: &str, origin: &Path) -> Result<Netlist> {
        let mut netlist = Netlist::default();
        let mut in_blocks = true;
        for (lineno, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            if line.contains("Blocks:") {
                in_blocks = true;
                continue;
            }
            if line.contains("Connections:") {
                in_blocks = false;
                continue;
            }
            if in_blocks {
                netlist.blocks.push(parse_block_line(line, origin, lineno + 1)?);
            } else {
                let mut tokens = line.split_whitespace().map(CompactString::from);
                let name = match tokens.next() {
                    Some(t) => t,
                    None => continue,
                };
                netlist.connections.push(Connection::Net {
                    name,
                    members: tokens.collect(),
                });
            }
        }
        Ok(netlist)
    }
}

fn parse_block_line(line: &str, origin: &Path, lineno: usize) -> Result<Block> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != 4 {
        return Err(Error::parse(
            origin, lineno,
            format!("expected 4 comma-separated block fields, got {}", fields.len()),
        ));
    }
    let num = |s: &str, what: &str| -> Result<f64> {
        s.parse::<f64>().map_err(|_| {
            Error::parse(origin, lineno, format!("invalid {} value {:?}", what, s))
        })
    };
    let power = match fields[3] {
        "None" => None,
        p => Some(num(p, "power")?),
    };
    Ok(Block {
        name: CompactString::from(fields[0]),
        width: num(fields[1], "width")?,
        height: num(fields[2], "height")?,
        power,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn block(name: &str, w: f64, h: f64, p: Option<f64>) -> Block {
        Block { name: name.into(), width: w, height: h, power: p }
    }

    #[test]
    fn writer_reader_round_trip() {
        let netlist = Netlist {
            blocks: vec![
                block("cpu0", 23.0, 41.5, Some(0.07)),
                block("cache", 12.0, 12.0, None),
            ],
            connections: vec![
                Connection::Net {
                    name: "c_0".into(),
                    members: vec!["cpu0".into(), "cache".into()],
                },
            ],
        };
        let text = netlist.to_string();
        let reparsed = Netlist::parse_str(&text, &PathBuf::from("<mem>")).unwrap();
        assert_eq!(reparsed, netlist);
    }

    #[test]
    fn raw_connection_reparses_as_token_list() {
        let netlist = Netlist {
            blocks: vec![],
            connections: vec![Connection::Raw("N1 bk3 bk7".to_string())],
        };
        let reparsed = Netlist::parse_str(&netlist.to_string(), &PathBuf::from("<mem>")).unwrap();
        assert_eq!(reparsed.connections, vec![Connection::Net {
            name: "N1".into(),
            members: vec!["bk3".into(), "bk7".into()],
        }]);
        assert_eq!(reparsed.connections[0].arity(), 3);
    }

    #[test]
    fn none_power_token() {
        let text = "Blocks:\nblk, 10, 20, None\n\nConnections:\n";
        let netlist = Netlist::parse_str(text, &PathBuf::from("<mem>")).unwrap();
        assert_eq!(netlist.blocks, vec![block("blk", 10.0, 20.0, None)]);
        assert!(netlist.to_string().contains("blk, 10, 20, None"));
    }

    #[test]
    fn malformed_block_line_reports_location() {
        let text = "Blocks:\nblk, ten, 20, None\n";
        let err = Netlist::parse_str(text, &PathBuf::from("bad.txt")).unwrap_err();
        assert_eq!(err.to_string(), "bad.txt:2: invalid width value \"ten\"");
    }
}
