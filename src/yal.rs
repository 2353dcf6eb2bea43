// SPDX-License-Identifier: Apache-2.0
//! Extractor for the module-description (YAL) benchmark format.
//!
//! Files are sequences of `MODULE <name>; ... ENDMODULE;` sections. A
//! line-oriented state machine walks each section:
//!
//! - the `DIMENSIONS` directive lists three 2D points; width and height are
//!   the absolute differences between the first and third point,
//! - `P_<n> PWR ... CURRENT <i> VOLTAGE <v>` entries contribute `i * v`
//!   to the module power sum (a zero sum renders as `None`),
//! - everything between `NETWORK;` and `ENDNETWORK;` is carried into the
//!   connections section verbatim, preserving the vendor net syntax.
//!
//! Modules without resolvable dimensions (the floorplan bound blocks) are
//! dropped from the blocks output.

use compact_str::CompactString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::schema::{Block, Connection, Netlist};
use crate::{Error, Result};

/// Process every extensionless file in `input_dir`, writing one
/// `Corblivar_<name>_parsed.txt` per input into `output_dir`.
/// Returns the output paths.
pub fn extract(input_dir: &Path, output_dir: &Path) -> Result<Vec<PathBuf>> {
    if !input_dir.is_dir() {
        return Err(Error::MissingInput(input_dir.to_path_buf()));
    }
    fs::create_dir_all(output_dir).map_err(|e| Error::io(output_dir, e))?;

    let mut outputs = Vec::new();
    for entry in fs::read_dir(input_dir).map_err(|e| Error::io(input_dir, e))? {
        let entry = entry.map_err(|e| Error::io(input_dir, e))?;
        let file_name = entry.file_name().to_string_lossy().into_owned();
        // the benchmark suite ships its netlists without an extension
        if !entry.path().is_file() || file_name.contains('.') {
            clilog::debug!("skipping {}", entry.path().display());
            continue;
        }
        let input_path = entry.path();
        let content = fs::read_to_string(&input_path)
            .map_err(|e| Error::io(&input_path, e))?;
        let netlist = parse_modules(&content, &input_path)?;

        let output_path = output_dir.join(format!("Corblivar_{}_parsed.txt", file_name));
        netlist.write_to(&output_path)?;
        clilog::info!("{} -> {} ({} blocks)", input_path.display(),
                      output_path.display(), netlist.blocks.len());
        outputs.push(output_path);
    }
    Ok(outputs)
}

#[derive(Default)]
struct ModuleState {
    name: CompactString,
    dims: Option<(f64, f64)>,
    power_sum: f64,
    network: Vec<String>,
}

/// Parse one module-description document into a normalized netlist.
pub fn parse_modules(content: &str, origin: &Path) -> Result<Netlist> {
    let mut netlist = Netlist::default();
    let mut module: Option<ModuleState> = None;
    let mut in_network = false;

    for (lineno, raw) in content.lines().enumerate() {
        let line = raw.trim();
        let mut tokens = line.split_whitespace();
        let keyword = tokens.next().unwrap_or("");

        if in_network {
            if line.starts_with("ENDNETWORK") {
                in_network = false;
            } else if let Some(m) = module.as_mut() {
                if !line.is_empty() {
                    m.network.push(line.to_string());
                }
            }
            continue;
        }

        match keyword {
            "MODULE" => {
                let name = line["MODULE".len()..].trim().trim_end_matches(';');
                if name.is_empty() {
                    return Err(Error::parse(origin, lineno + 1,
                                            "MODULE directive without a name"));
                }
                module = Some(ModuleState {
                    name: CompactString::from(name),
                    ..Default::default()
                });
            }
            "ENDMODULE;" => {
                if let Some(m) = module.take() {
                    finish_module(m, &mut netlist);
                }
            }
            "DIMENSIONS" => {
                if let Some(m) = module.as_mut() {
                    m.dims = parse_dimensions(line);
                }
            }
            "NETWORK;" => in_network = true,
            kw if is_power_entry(kw, line) => {
                if let Some(m) = module.as_mut() {
                    let current = keyed_value(line, "CURRENT").ok_or_else(|| {
                        Error::parse(origin, lineno + 1, "PWR entry without CURRENT")
                    })?;
                    let voltage = keyed_value(line, "VOLTAGE").ok_or_else(|| {
                        Error::parse(origin, lineno + 1, "PWR entry without VOLTAGE")
                    })?;
                    m.power_sum += current * voltage;
                }
            }
            _ => {}
        }
    }
    Ok(netlist)
}

fn finish_module(m: ModuleState, netlist: &mut Netlist) {
    // bound blocks carry no DIMENSIONS and are dropped from the output
    if let Some((width, height)) = m.dims {
        netlist.blocks.push(Block {
            name: m.name,
            width,
            height,
            // a zero sum is indistinguishable from "no power data"
            power: (m.power_sum != 0.0)
                .then(|| (m.power_sum * 100.0).round() / 100.0),
        });
    }
    netlist.connections.extend(m.network.into_iter().map(Connection::Raw));
}

/// `DIMENSIONS x1 y1 x2 y2 x3 y3;` — three corner points of the outline.
/// Anything that does not yield six integers leaves the module unsized.
fn parse_dimensions(line: &str) -> Option<(f64, f64)> {
    let nums: Vec<i64> = line.trim_end_matches(';')
        .split_whitespace()
        .skip(1)
        .map(|t| t.parse::<i64>())
        .collect::<std::result::Result<_, _>>()
        .ok()?;
    if nums.len() < 6 {
        return None;
    }
    let (x1, y1, x3, y3) = (nums[0], nums[1], nums[4], nums[5]);
    Some(((x3 - x1).abs() as f64, (y3 - y1).abs() as f64))
}

/// Power pins are named `P_<digits>` with signal class `PWR`.
fn is_power_entry(keyword: &str, line: &str) -> bool {
    keyword.strip_prefix("P_")
        .map_or(false, |rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
        && line.split_whitespace().nth(1) == Some("PWR")
}

/// Value following a keyword token, e.g. `CURRENT 1.5`.
fn keyed_value(line: &str, key: &str) -> Option<f64> {
    let mut tokens = line.trim_end_matches(';').split_whitespace();
    while let Some(t) = tokens.next() {
        if t == key {
            return tokens.next()?.parse::<f64>().ok();
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const SAMPLE: &str = "\
MODULE cpu;
TYPE GENERAL;
DIMENSIONS 0 0 40 0 40 30;
IOLIST;
P_1 PWR B 0 10 CURRENT 2.0 VOLTAGE 1.5;
P_2 PWR B 0 20 CURRENT 1.0 VOLTAGE 0.5;
ENDIOLIST;
NETWORK;
N1 cpu cache;
N2 cpu io;
ENDNETWORK;
ENDMODULE;
MODULE bound;
TYPE PARENT;
NETWORK;
N3 bound cpu;
ENDNETWORK;
ENDMODULE;
";

    #[test]
    fn dimensions_from_first_and_third_point() {
        let netlist = parse_modules(SAMPLE, &PathBuf::from("<mem>")).unwrap();
        assert_eq!(netlist.blocks.len(), 1);
        let b = &netlist.blocks[0];
        assert_eq!(b.name, "cpu");
        assert_eq!((b.width, b.height), (40.0, 30.0));
    }

    #[test]
    fn power_is_summed_current_times_voltage() {
        let netlist = parse_modules(SAMPLE, &PathBuf::from("<mem>")).unwrap();
        // 2.0 * 1.5 + 1.0 * 0.5
        assert_eq!(netlist.blocks[0].power, Some(3.5));
    }

    #[test]
    fn network_text_survives_verbatim_across_modules() {
        let netlist = parse_modules(SAMPLE, &PathBuf::from("<mem>")).unwrap();
        let lines: Vec<String> = netlist.connections.iter()
            .map(|c| c.to_string()).collect();
        assert_eq!(lines, ["N1 cpu cache;", "N2 cpu io;", "N3 bound cpu;"]);
    }

    #[test]
    fn undimensioned_module_is_dropped_from_blocks() {
        let netlist = parse_modules(SAMPLE, &PathBuf::from("<mem>")).unwrap();
        assert!(netlist.blocks.iter().all(|b| b.name != "bound"));
    }

    #[test]
    fn zero_power_sum_renders_as_none() {
        let src = "\
MODULE m;
DIMENSIONS 0 0 10 0 10 10;
ENDMODULE;
";
        let netlist = parse_modules(src, &PathBuf::from("<mem>")).unwrap();
        assert_eq!(netlist.blocks[0].power, None);
        assert!(netlist.to_string().contains("m, 10, 10, None"));
    }
}
