// SPDX-License-Identifier: Apache-2.0
use std::path::PathBuf;
use fpkit::augment::{self, QuantileConfig};

/// Generate synthetic netlists in the normalized schema, sampled within
/// the interquartile ranges of the extracted corpus.
#[derive(clap::Parser, Debug)]
struct AugmentArgs {
    /// Output directory for the generated files.
    output_dir: PathBuf,
    /// RNG seed for a reproducible dataset.
    #[clap(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    clilog::init_stderr_color_debug();
    let args = <AugmentArgs as clap::Parser>::parse();

    let outputs = augment::generate_files(
        &QuantileConfig::default(),
        &args.output_dir,
        args.seed,
    )?;
    clilog::info!("generated {} files in {}", outputs.len(),
                  args.output_dir.display());
    Ok(())
}
