// SPDX-License-Identifier: Apache-2.0
use std::path::PathBuf;
use fpkit::thermal;

/// Extract the thermal simulator description/power pair into the
/// normalized schema.
#[derive(clap::Parser, Debug)]
struct ExtractArgs {
    /// Directory containing ev6.desc and avg.p.
    input_dir: PathBuf,
    /// Directory to write HotSpot_floorplan.txt into.
    output_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    clilog::init_stderr_color_debug();
    let args = <ExtractArgs as clap::Parser>::parse();

    let output = thermal::extract(&args.input_dir, &args.output_dir)?;
    clilog::info!("output written to {}", output.display());
    Ok(())
}
