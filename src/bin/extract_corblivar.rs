// SPDX-License-Identifier: Apache-2.0
use std::path::PathBuf;
use fpkit::yal;

/// Extract module-description benchmark files into the normalized schema.
#[derive(clap::Parser, Debug)]
struct ExtractArgs {
    /// Directory of extensionless module-description files.
    input_dir: PathBuf,
    /// Directory to write the Corblivar_<name>_parsed.txt files into.
    output_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    clilog::init_stderr_color_debug();
    let args = <ExtractArgs as clap::Parser>::parse();

    let outputs = yal::extract(&args.input_dir, &args.output_dir)?;
    clilog::info!("processed {} files", outputs.len());
    Ok(())
}
