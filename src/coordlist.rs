// SPDX-License-Identifier: Apache-2.0
//! Extractor for the plain coordinate-list format.
//!
//! Each qualifying file is a leading block-count line (read and discarded,
//! never validated against the actual content) followed by two-number lines.
//! Line `i` (1-based, counted over every line after the first) becomes a
//! block named `block<i>` with the two numbers as width and height. The
//! format carries no power and no connectivity.

use compact_str::CompactString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::schema::{Block, Netlist};
use crate::{Error, Result};

/// True for files this extractor consumes: `.txt`, but not the `.bbb.txt`
/// backup flavor shipped alongside them.
pub fn qualifies(file_name: &str) -> bool {
    file_name.ends_with(".txt") && !file_name.ends_with(".bbb.txt")
}

/// Process every qualifying file in `input_dir`, writing one
/// `<stem>_processed.txt` per input into `output_dir`.
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
        if !entry.path().is_file() || !qualifies(&file_name) {
            clilog::debug!("skipping {}", entry.path().display());
            continue;
        }
        let input_path = entry.path();
        let content = fs::read_to_string(&input_path)
            .map_err(|e| Error::io(&input_path, e))?;
        let netlist = parse_coordinates(&content, &input_path)?;

        let stem = file_name.strip_suffix(".txt").unwrap_or(&file_name);
        let output_path = output_dir.join(format!("{}_processed.txt", stem));
        netlist.write_to(&output_path)?;
        clilog::info!("{} -> {} ({} blocks)", input_path.display(),
                      output_path.display(), netlist.blocks.len());
        outputs.push(output_path);
    }
    Ok(outputs)
}

/// Parse one coordinate-list document.
pub fn parse_coordinates(content: &str, origin: &Path) -> Result<Netlist> {
    let mut lines = content.lines();
    // leading count line, discarded
    let _declared_count = lines.next();

    let mut netlist = Netlist::default();
    for (i, raw) in lines.enumerate() {
        let parts: Vec<&str> = raw.trim().split_whitespace().collect();
        if parts.len() != 2 {
            continue;
        }
        let num = |s: &str| -> Result<f64> {
            s.parse::<f64>().map_err(|_| Error::parse(
                origin, i + 2, format!("invalid dimension value {:?}", s)))
        };
        netlist.blocks.push(Block {
            name: CompactString::from(format!("block{}", i + 1)),
            width: num(parts[0])?,
            height: num(parts[1])?,
            power: None,
        });
    }
    Ok(netlist)
}
