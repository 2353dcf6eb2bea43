// SPDX-License-Identifier: Apache-2.0
//! Extractor for the thermal simulator description/power file pair.
//!
//! The description file is whitespace-delimited: 5-field lines declare a
//! functional unit as `(name, area_m2, min_aspect, max_aspect, rotatable)`,
//! 3-field lines declare a pairwise link `(unit1, unit2, type)`. Areas are
//! given in square meters and converted to square micrometers; width and
//! height are derived from the area and the minimum aspect ratio, rounded
//! to the nearest integer. Pairwise links become synthesized nets named
//! `c_0, c_1, ...` in file encounter order.
//!
//! A companion power file maps unit names to average dissipation; units
//! absent from it get power 0.

use compact_str::CompactString;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::schema::{Block, Connection, Netlist};
use crate::{Error, Result};

pub const DESC_FILE_NAME: &str = "ev6.desc";
pub const POWER_FILE_NAME: &str = "avg.p";
pub const OUTPUT_FILE_NAME: &str = "HotSpot_floorplan.txt";

/// Run the extraction over `<input_dir>/ev6.desc` + `<input_dir>/avg.p`,
/// writing `<output_dir>/HotSpot_floorplan.txt`. Returns the output path.
pub fn extract(input_dir: &Path, output_dir: &Path) -> Result<PathBuf> {
    let desc_file = input_dir.join(DESC_FILE_NAME);
    let power_file = input_dir.join(POWER_FILE_NAME);
    for f in [&desc_file, &power_file] {
        if !f.is_file() {
            return Err(Error::MissingInput(f.clone()));
        }
    }

    let netlist = parse_pair(&desc_file, &power_file)?;
    clilog::info!("parsed {} blocks, {} connections from {}",
                  netlist.blocks.len(), netlist.connections.len(),
                  desc_file.display());

    fs::create_dir_all(output_dir).map_err(|e| Error::io(output_dir, e))?;
    let output_file = output_dir.join(OUTPUT_FILE_NAME);
    netlist.write_to(&output_file)?;
    Ok(output_file)
}

/// Parse a description/power file pair into a normalized netlist.
pub fn parse_pair(desc_file: &Path, power_file: &Path) -> Result<Netlist> {
    let desc = fs::read_to_string(desc_file).map_err(|e| Error::io(desc_file, e))?;
    let power = fs::read_to_string(power_file).map_err(|e| Error::io(power_file, e))?;
    let power_map = parse_power(&power, power_file)?;
    parse_desc(&desc, desc_file, &power_map)
}

fn parse_desc(
    content: &str,
    origin: &Path,
    power_map: &HashMap<CompactString, f64>,
) -> Result<Netlist> {
    let mut netlist = Netlist::default();
    let mut net_count = 0usize;
    for (lineno, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.len() {
            5 => {
                let num = |s: &str, what: &str| -> Result<f64> {
                    s.parse::<f64>().map_err(|_| Error::parse(
                        origin, lineno + 1,
                        format!("invalid {} value {:?}", what, s)))
                };
                let name = CompactString::from(parts[0]);
                // m^2 -> um^2
                let area = num(parts[1], "area")? * 1e12;
                let min_aspect = num(parts[2], "min aspect")?;
                let _max_aspect = num(parts[3], "max aspect")?;
                let width = (area / min_aspect).sqrt().round();
                let height = (area / width).round();
                let power = Some(power_map.get(&name).copied().unwrap_or(0.0));
                netlist.blocks.push(Block { name, width, height, power });
            }
            3 => {
                netlist.connections.push(Connection::Net {
                    name: CompactString::from(format!("c_{}", net_count)),
                    members: vec![
                        CompactString::from(parts[0]),
                        CompactString::from(parts[1]),
                    ],
                });
                net_count += 1;
            }
            // other arities carry no block or link information
            _ => {}
        }
    }
    Ok(netlist)
}

fn parse_power(content: &str, origin: &Path) -> Result<HashMap<CompactString, f64>> {
    let mut map = HashMap::new();
    for (lineno, raw) in content.lines().enumerate() {
        let parts: Vec<&str> = raw.trim().split_whitespace().collect();
        if parts.len() != 2 {
            continue;
        }
        let value = parts[1].parse::<f64>().map_err(|_| Error::parse(
            origin, lineno + 1,
            format!("invalid power value {:?}", parts[1])))?;
        map.insert(CompactString::from(parts[0]), value);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn parse(desc: &str, power: &str) -> Netlist {
        let power_map = parse_power(power, &PathBuf::from("<p>")).unwrap();
        parse_desc(desc, &PathBuf::from("<d>"), &power_map).unwrap()
    }

    #[test]
    fn width_height_from_area_and_aspect() {
        // area 2e-12 m^2 = 2 um^2; width = sqrt(2 / 0.5) = 2, height = 1
        let netlist = parse("L2\t2e-12\t0.5\t2.0\t1\n", "");
        let b = &netlist.blocks[0];
        assert_eq!((b.width, b.height), (2.0, 1.0));
        assert!((b.width * b.height - 2.0).abs() <= 1.0); // within rounding
    }

    #[test]
    fn links_are_numbered_in_encounter_order() {
        let desc = "\
u0 1e-12 1.0 1.0 1
u1 1e-12 1.0 1.0 1
u0 u1 200
u1 u0 150
";
        let netlist = parse(desc, "");
        let names: Vec<String> = netlist.connections.iter().map(|c| match c {
            Connection::Net { name, .. } => name.to_string(),
            _ => unreachable!(),
        }).collect();
        assert_eq!(names, ["c_0", "c_1"]);
    }

    #[test]
    fn power_defaults_to_zero_when_unmapped() {
        let netlist = parse(
            "u0 1e-12 1.0 1.0 1\nu1 1e-12 1.0 1.0 1\n",
            "u0 9.9324\n",
        );
        assert_eq!(netlist.blocks[0].power, Some(9.9324));
        assert_eq!(netlist.blocks[1].power, Some(0.0));
    }

    #[test]
    fn comments_and_blanks_skipped() {
        let netlist = parse("# header\n\nu0 1e-12 1.0 1.0 1\n", "");
        assert_eq!(netlist.blocks.len(), 1);
    }

    #[test]
    fn extract_writes_one_output_file() {
        use tempdir::TempDir;
        let input = TempDir::new("thermal_in").unwrap();
        let output = TempDir::new("thermal_out").unwrap();
        std::fs::write(input.path().join(DESC_FILE_NAME),
                       "u0 2e-12 0.5 2.0 1\nu0 u0 10\n").unwrap();
        std::fs::write(input.path().join(POWER_FILE_NAME), "u0 1.5\n").unwrap();

        let out = extract(input.path(), output.path()).unwrap();
        assert_eq!(out.file_name().unwrap(), OUTPUT_FILE_NAME);
        let text = std::fs::read_to_string(out).unwrap();
        let block_lines = text.split("Connections:").next().unwrap()
            .lines().skip(1).filter(|l| !l.trim().is_empty()).count();
        let conn_lines = text.split("Connections:").nth(1).unwrap()
            .lines().filter(|l| !l.trim().is_empty()).count();
        assert_eq!((block_lines, conn_lines), (1, 1));
    }

    #[test]
    fn one_block_one_link_end_to_end() {
        let netlist = parse(
            "u0 2e-12 0.5 2.0 1\nu0 u0 10\n",
            "u0 1.5\n",
        );
        let text = netlist.to_string();
        let blocks: Vec<&str> = text
            .split("Connections:").next().unwrap()
            .lines().skip(1).filter(|l| !l.trim().is_empty()).collect();
        let conns: Vec<&str> = text
            .split("Connections:").nth(1).unwrap()
            .lines().filter(|l| !l.trim().is_empty()).collect();
        assert_eq!(blocks, ["u0, 2, 1, 1.5"]);
        assert_eq!(conns, ["c_0 u0 u0"]);
    }
}
