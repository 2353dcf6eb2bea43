// SPDX-License-Identifier: Apache-2.0
use std::path::PathBuf;
use fpkit::stats::{self, Aggregate};

/// Aggregate normalized netlist files and write histogram tables and
/// summary statistics.
#[derive(clap::Parser, Debug)]
struct StatsArgs {
    /// Directory of normalized netlist files.
    input_dir: PathBuf,
    /// Directory to write the reports into.
    output_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    clilog::init_stderr_color_debug();
    let args = <StatsArgs as clap::Parser>::parse();

    let agg = Aggregate::from_dir(&args.input_dir)?;
    let written = stats::write_reports(&agg, &args.output_dir)?;
    for path in &written {
        clilog::info!("wrote {}", path.display());
    }
    Ok(())
}
