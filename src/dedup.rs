// SPDX-License-Identifier: Apache-2.0
//! Filename-heuristic deduplication of extracted netlist files.
//!
//! Several extraction runs emit the same benchmark under different file
//! names. Deduplication buckets files by a base name derived from the file
//! name alone (not content), keeps the first file encountered per bucket,
//! and flat-copies the keepers into the target directory.
//!
//! Two key styles exist historically and produce different bucketings; see
//! [`KeyStyle`]. The walk order of the underlying directory traversal
//! decides ties, so which duplicate survives is platform-dependent. Only
//! the bucket set itself is stable.

use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Extraction runs prefix their outputs with the dataset name; keys for
/// these files are computed on the remainder after the prefix.
pub const VENDOR_PREFIXES: [&str; 3] = ["Corblivar_", "SMU_", "UM_"];

/// Which filename heuristic derives the bucket key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStyle {
    /// Everything before the first `.`, then before the first `_`.
    Simple,
    /// Like [`KeyStyle::Simple`], except names carrying a known vendor
    /// prefix drop the prefix first and key on the segment between the
    /// first `_` and the next `_` or `.`.
    VendorAware,
}

/// Compute the bucket key for one file name.
pub fn bucket_key(file_name: &str, style: KeyStyle) -> &str {
    if style == KeyStyle::VendorAware {
        if VENDOR_PREFIXES.iter().any(|p| file_name.starts_with(p)) {
            let rest = file_name.splitn(2, '_').nth(1).unwrap_or(file_name);
            let rest = rest.split('_').next().unwrap_or(rest);
            return rest.split('.').next().unwrap_or(rest);
        }
    }
    let base = file_name.split('.').next().unwrap_or(file_name);
    base.split('_').next().unwrap_or(base)
}

/// Walk `source_dir` recursively, keep one file per bucket, and copy the
/// keepers into `target_dir`. Returns the retained paths in bucket
/// encounter order.
pub fn remove_duplicates(
    source_dir: &Path,
    target_dir: &Path,
    style: KeyStyle,
) -> Result<Vec<PathBuf>> {
    if !source_dir.is_dir() {
        return Err(Error::MissingInput(source_dir.to_path_buf()));
    }
    fs::create_dir_all(target_dir).map_err(|e| Error::io(target_dir, e))?;

    let mut unique: IndexMap<String, PathBuf> = IndexMap::new();
    walk(source_dir, &mut |path| {
        let file_name = path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let key = bucket_key(&file_name, style).to_string();
        // first visit wins
        unique.entry(key).or_insert(path);
    })?;

    let mut retained = Vec::new();
    for (key, path) in &unique {
        let file_name = path.file_name().unwrap_or_default();
        let dest = target_dir.join(file_name);
        fs::copy(path, &dest).map_err(|e| Error::io(&dest, e))?;
        clilog::debug!("bucket {:?}: kept {}", key, path.display());
        retained.push(dest);
    }
    clilog::info!("{} unique files copied to {}", retained.len(),
                  target_dir.display());
    Ok(retained)
}

fn walk(dir: &Path, visit: &mut impl FnMut(PathBuf)) -> Result<()> {
    for entry in fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let path = entry.path();
        if path.is_dir() {
            walk(&path, visit)?;
        } else {
            visit(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn vendor_prefixed_names_key_on_middle_segment() {
        assert_eq!(bucket_key("SMU_ami33_1.txt", KeyStyle::VendorAware), "ami33");
        assert_eq!(bucket_key("Corblivar_n10_parsed.txt", KeyStyle::VendorAware), "n10");
        assert_eq!(bucket_key("UM_n10.txt", KeyStyle::VendorAware), "n10");
    }

    #[test]
    fn unprefixed_names_key_on_leading_segment() {
        assert_eq!(bucket_key("n10_processed.txt", KeyStyle::VendorAware), "n10");
        assert_eq!(bucket_key("HotSpot_floorplan.txt", KeyStyle::VendorAware), "HotSpot");
        assert_eq!(bucket_key("plain.txt", KeyStyle::VendorAware), "plain");
    }

    #[test]
    fn simple_style_ignores_vendor_prefixes() {
        assert_eq!(bucket_key("SMU_ami33_1.txt", KeyStyle::Simple), "SMU");
        assert_eq!(bucket_key("n10_processed.txt", KeyStyle::Simple), "n10");
    }

    #[test]
    fn one_file_survives_per_bucket() {
        let src = TempDir::new("dedup_src").unwrap();
        let dst = TempDir::new("dedup_dst").unwrap();
        for name in ["SMU_a_1.txt", "SMU_a_2.txt", "Corblivar_b_1.txt"] {
            std::fs::write(src.path().join(name), "x").unwrap();
        }
        let kept = remove_duplicates(src.path(), dst.path(),
                                     KeyStyle::VendorAware).unwrap();
        // distinct keys: "a" and "b"
        assert_eq!(kept.len(), 2);
        let count = std::fs::read_dir(dst.path()).unwrap().count();
        assert_eq!(count, 2);
    }

    #[test]
    fn walk_descends_into_subdirectories() {
        let src = TempDir::new("dedup_src").unwrap();
        let dst = TempDir::new("dedup_dst").unwrap();
        let sub = src.path().join("nested");
        std::fs::create_dir(&sub).unwrap();
        std::fs::write(src.path().join("x_1.txt"), "x").unwrap();
        std::fs::write(sub.join("y_1.txt"), "y").unwrap();
        let kept = remove_duplicates(src.path(), dst.path(),
                                     KeyStyle::VendorAware).unwrap();
        assert_eq!(kept.len(), 2);
    }
}
