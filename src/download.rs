// SPDX-License-Identifier: Apache-2.0
//! Plain HTTP download of the public benchmark datasets.
//!
//! Two access patterns: a single raw file at a fixed URL, and a GitHub
//! contents-API directory listing whose file entries are fetched one by
//! one. Bytes are written to the target directory unchanged. There is
//! deliberately no retry, backoff or authentication; a failed file in a
//! listing is logged and skipped, matching the historical collection runs.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Raw protocol-text netlist of the reinforcement-learning floorplanning
/// test design.
pub const DEEPMIND_NETLIST_URL: &str =
    "https://raw.githubusercontent.com/google-research/circuit_training/main/\
     circuit_training/environment/test_data/simple_with_coords/netlist.pb.txt";

/// Contents-API listing of the thermal simulator example floorplan.
pub const HOTSPOT_LISTING_URL: &str =
    "https://api.github.com/repos/uvahotspot/HotSpot/contents/examples/example6";

/// Contents-API listing of the module-description benchmark suite.
pub const CORBLIVAR_LISTING_URL: &str =
    "https://api.github.com/repos/DfX-NYUAD/Corblivar/contents/exp/benches";

/// Build the shared blocking client.
///
/// The GitHub API rejects requests without a User-Agent, so one is pinned
/// here for all downloads.
pub fn client() -> Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .user_agent(concat!("fpkit/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| Error::Http { url: String::new(), source: e })
}

/// One entry of a GitHub contents-API listing.
#[derive(Debug, Deserialize)]
pub struct ListingEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub download_url: Option<String>,
}

/// GET one URL and write the body to `<target_dir>/<basename(url)>`.
/// Returns the written path.
pub fn fetch_file(
    client: &reqwest::blocking::Client,
    url: &str,
    target_dir: &Path,
) -> Result<PathBuf> {
    fs::create_dir_all(target_dir).map_err(|e| Error::io(target_dir, e))?;
    let file_name = url.rsplit('/').next().unwrap_or("download");
    clilog::info!("downloading {} from {}", file_name, url);

    let response = client.get(url).send()
        .map_err(|e| Error::Http { url: url.to_string(), source: e })?;
    if !response.status().is_success() {
        return Err(Error::HttpStatus {
            url: url.to_string(),
            status: response.status(),
        });
    }
    let bytes = response.bytes()
        .map_err(|e| Error::Http { url: url.to_string(), source: e })?;

    let target_path = target_dir.join(file_name);
    fs::write(&target_path, &bytes).map_err(|e| Error::io(&target_path, e))?;
    clilog::info!("saved {} ({} bytes)", target_path.display(), bytes.len());
    Ok(target_path)
}

/// Fetch a GitHub contents-API listing and download every file entry into
/// `target_dir`. Individual file failures are logged and skipped;
/// directories in the listing are skipped. Returns the written paths.
pub fn fetch_github_dir(
    client: &reqwest::blocking::Client,
    api_url: &str,
    target_dir: &Path,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(target_dir).map_err(|e| Error::io(target_dir, e))?;

    let response = client.get(api_url).send()
        .map_err(|e| Error::Http { url: api_url.to_string(), source: e })?;
    if !response.status().is_success() {
        return Err(Error::HttpStatus {
            url: api_url.to_string(),
            status: response.status(),
        });
    }
    let entries: Vec<ListingEntry> = response.json()
        .map_err(|e| Error::Http { url: api_url.to_string(), source: e })?;
    if entries.is_empty() {
        clilog::warn!("no files found at {}", api_url);
        return Ok(vec![]);
    }

    let mut saved = Vec::new();
    for entry in entries {
        if entry.kind != "file" {
            clilog::info!("skipping directory: {}", entry.name);
            continue;
        }
        let Some(url) = entry.download_url else {
            clilog::warn!("entry {} has no download URL, skipping", entry.name);
            continue;
        };
        match fetch_file(client, &url, target_dir) {
            Ok(path) => saved.push(path),
            Err(e) => clilog::error!("failed to download {}: {}", entry.name, e),
        }
    }
    Ok(saved)
}
