// SPDX-License-Identifier: Apache-2.0
use std::path::PathBuf;
use fpkit::download;

/// Download the thermal simulator example floorplan files.
#[derive(clap::Parser, Debug)]
struct DownloadArgs {
    /// Target directory to save the files.
    output_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    clilog::init_stderr_color_debug();
    let args = <DownloadArgs as clap::Parser>::parse();

    let client = download::client()?;
    let saved = download::fetch_github_dir(
        &client, download::HOTSPOT_LISTING_URL, &args.output_dir)?;
    clilog::info!("downloaded {} files", saved.len());
    Ok(())
}
