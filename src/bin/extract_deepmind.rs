// SPDX-License-Identifier: Apache-2.0
use std::path::PathBuf;
use fpkit::prototext;

/// Extract the protocol-text netlist dataset into the normalized schema.
#[derive(clap::Parser, Debug)]
struct ExtractArgs {
    /// Directory containing netlist.pb.txt.
    input_dir: PathBuf,
    /// Directory to write DeepMind_floorplan.txt into.
    output_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    clilog::init_stderr_color_debug();
    let args = <ExtractArgs as clap::Parser>::parse();

    let output = prototext::extract(&args.input_dir, &args.output_dir)?;
    clilog::info!("output written to {}", output.display());
    Ok(())
}
