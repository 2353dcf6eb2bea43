// SPDX-License-Identifier: Apache-2.0
//! Synthetic netlist generation for dataset augmentation.
//!
//! Samples block dimensions, power and connectivity uniformly within the
//! interquartile ranges observed on the extracted corpus, and writes files
//! directly in the normalized schema. Names are randomly indexed and may
//! collide; connections may reference blocks that were never emitted. Both
//! are properties of the real corpus that downstream consumers already
//! tolerate, so they are deliberately not de-duplicated here.

use rand::prelude::*;
use rand_chacha::ChaCha20Rng;
use std::fs;
use std::path::{Path, PathBuf};

use crate::schema::{Block, Connection, Netlist};
use crate::{Error, Result};

/// Sampling bounds, injected so the generator can be re-targeted at a
/// different empirical corpus without touching code.
///
/// The defaults are the quartiles measured on the extracted datasets.
#[derive(Debug, Clone)]
pub struct QuantileConfig {
    pub width_q1: f64,
    pub width_q3: f64,
    pub power_q1: f64,
    pub power_q3: f64,
    pub aspect_ratio_q1: f64,
    pub aspect_ratio_q3: f64,
}

impl Default for QuantileConfig {
    fn default() -> Self {
        QuantileConfig {
            width_q1: 23.00,
            width_q3: 44.00,
            power_q1: 0.01,
            power_q3: 0.07,
            aspect_ratio_q1: 0.68,
            aspect_ratio_q3: 1.54,
        }
    }
}

pub const NUM_FILES: usize = 50;
const BLOCKS_PER_FILE: std::ops::RangeInclusive<usize> = 30..=300;
const CONNECTIONS_PER_FILE: std::ops::RangeInclusive<usize> = 10..=50;
const MEMBERS_PER_CONNECTION: std::ops::RangeInclusive<usize> = 2..=10;

/// Generate [`NUM_FILES`] synthetic netlists into `output_dir`, named
/// `generated_netlist_<k>.txt`. A fixed `seed` makes the run reproducible.
/// Returns the output paths.
pub fn generate_files(
    config: &QuantileConfig,
    output_dir: &Path,
    seed: Option<u64>,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir).map_err(|e| Error::io(output_dir, e))?;
    let mut rng = match seed {
        Some(s) => ChaCha20Rng::seed_from_u64(s),
        None => ChaCha20Rng::from_entropy(),
    };

    let mut outputs = Vec::new();
    for i in 0..NUM_FILES {
        let path = output_dir.join(format!("generated_netlist_{}.txt", i + 1));
        let num_blocks = rng.gen_range(BLOCKS_PER_FILE);
        generate_netlist(config, num_blocks, &mut rng).write_to(&path)?;
        outputs.push(path);
    }
    clilog::info!("generated {} files in {}", NUM_FILES, output_dir.display());
    Ok(outputs)
}

/// Generate one synthetic netlist with `num_blocks` blocks.
pub fn generate_netlist(
    config: &QuantileConfig,
    num_blocks: usize,
    rng: &mut impl Rng,
) -> Netlist {
    let mut netlist = Netlist::default();
    for _ in 0..num_blocks {
        netlist.blocks.push(generate_block(config, rng));
    }
    let num_connections = rng.gen_range(CONNECTIONS_PER_FILE);
    for _ in 0..num_connections {
        netlist.connections.push(generate_connection(num_blocks, rng));
    }
    netlist
}

fn block_name(index: usize) -> String {
    format!("bk{}", index)
}

fn generate_block(config: &QuantileConfig, rng: &mut impl Rng) -> Block {
    let width = rng.gen_range(config.width_q1..config.width_q3);
    let height = width * rng.gen_range(config.aspect_ratio_q1..config.aspect_ratio_q3);
    let power = rng.gen_range(config.power_q1..config.power_q3);
    Block {
        // indices are sampled, not sequential; collisions are possible
        name: block_name(rng.gen_range(1..=999)).into(),
        width: width.trunc(),
        height: height.trunc(),
        power: Some((power * 100.0).round() / 100.0),
    }
}

fn generate_connection(num_blocks: usize, rng: &mut impl Rng) -> Connection {
    let members: Vec<String> = (0..rng.gen_range(MEMBERS_PER_CONNECTION))
        .map(|_| block_name(rng.gen_range(1..=num_blocks)))
        .collect();
    // keep the historical output shape: net name, members, trailing ';'
    Connection::Raw(format!(
        "C_{} {};",
        rng.gen_range(0..=num_blocks),
        members.join(" "),
    ))
}
