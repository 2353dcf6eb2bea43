// SPDX-License-Identifier: Apache-2.0
use std::path::PathBuf;
use fpkit::download;

/// Download the protocol-text netlist test design.
#[derive(clap::Parser, Debug)]
struct DownloadArgs {
    /// Target directory to save the file.
    output_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    clilog::init_stderr_color_debug();
    let args = <DownloadArgs as clap::Parser>::parse();

    let client = download::client()?;
    let path = download::fetch_file(
        &client, download::DEEPMIND_NETLIST_URL, &args.output_dir)?;
    clilog::info!("saved {}", path.display());
    Ok(())
}
