// SPDX-License-Identifier: Apache-2.0
use std::path::PathBuf;
use fpkit::dedup::{self, KeyStyle};

/// Remove duplicate files by filename heuristic, keeping one file per
/// derived base name and flat-copying the keepers.
#[derive(clap::Parser, Debug)]
struct DedupArgs {
    /// Directory tree to scan for files.
    source_dir: PathBuf,
    /// Directory to copy the unique files into.
    target_dir: PathBuf,
    /// Key every name on its leading segment, ignoring vendor prefixes
    /// (the older heuristic; buckets differently from the default).
    #[clap(long)]
    simple_keys: bool,
}

fn main() -> anyhow::Result<()> {
    clilog::init_stderr_color_debug();
    let args = <DedupArgs as clap::Parser>::parse();

    let style = if args.simple_keys { KeyStyle::Simple } else { KeyStyle::VendorAware };
    let retained = dedup::remove_duplicates(&args.source_dir, &args.target_dir, style)?;
    clilog::info!("retained {} files", retained.len());
    Ok(())
}
