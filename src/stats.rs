// SPDX-License-Identifier: Apache-2.0
//! Descriptive statistics over a directory of normalized netlist files.
//!
//! Every regular file in the input directory is parsed with the schema
//! reader (a malformed file aborts the whole run). Block dimensions, derived
//! aspect ratios, power values and connection sizes are pooled across all
//! files, then written out as 20-bin histogram tables, a five-number summary
//! of the connection-size distribution, and a mean/quartile summary per
//! numeric field. Rendering of actual plot images is out of scope; the text
//! tables carry the same information.

use itertools::{Itertools, MinMaxResult};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::schema::Netlist;
use crate::{Error, Result};

pub const HISTOGRAM_BINS: usize = 20;

/// Pooled samples from one or more normalized files.
#[derive(Debug, Default, Clone)]
pub struct Aggregate {
    pub widths: Vec<f64>,
    pub heights: Vec<f64>,
    pub aspect_ratios: Vec<f64>,
    /// Only blocks that carry a power value contribute here.
    pub powers: Vec<f64>,
    /// Whitespace-token count of each connection line.
    pub connection_sizes: Vec<usize>,
}

impl Aggregate {
    pub fn add_netlist(&mut self, netlist: &Netlist) {
        for b in &netlist.blocks {
            self.widths.push(b.width);
            self.heights.push(b.height);
            self.aspect_ratios.push(b.width / b.height);
            if let Some(p) = b.power {
                self.powers.push(p);
            }
        }
        for c in &netlist.connections {
            self.connection_sizes.push(c.arity());
        }
    }

    /// Parse and pool every regular file in `input_dir`.
    pub fn from_dir(input_dir: &Path) -> Result<Aggregate> {
        if !input_dir.is_dir() {
            return Err(Error::MissingInput(input_dir.to_path_buf()));
        }
        let mut agg = Aggregate::default();
        let mut num_files = 0usize;
        for entry in fs::read_dir(input_dir).map_err(|e| Error::io(input_dir, e))? {
            let entry = entry.map_err(|e| Error::io(input_dir, e))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            agg.add_netlist(&Netlist::read_from(&path)?);
            num_files += 1;
        }
        clilog::info!("aggregated {} blocks / {} connections from {} files",
                      agg.widths.len(), agg.connection_sizes.len(), num_files);
        Ok(agg)
    }
}

/// Mean and quartiles of one pooled field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSummary {
    pub mean: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
}

/// Summarize a sample. Returns `None` on an empty sample.
pub fn summarize(values: &[f64]) -> Option<FieldSummary> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("NaN in sample"));
    Some(FieldSummary {
        mean: sorted.iter().sum::<f64>() / sorted.len() as f64,
        q1: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q3: quantile(&sorted, 0.75),
    })
}

/// Linearly interpolated quantile over an already sorted sample.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

/// One histogram bin: `[lo, hi)` (last bin closed) and its count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub lo: f64,
    pub hi: f64,
    pub count: usize,
}

/// Equal-width histogram over `[min, max]` of the sample.
pub fn histogram(values: &[f64], num_bins: usize) -> Vec<Bin> {
    let (min, max) = match values.iter().minmax_by(|a, b| a.partial_cmp(b).unwrap()) {
        MinMaxResult::NoElements => return vec![],
        MinMaxResult::OneElement(&v) => (v, v),
        MinMaxResult::MinMax(&min, &max) => (min, max),
    };
    let width = (max - min) / num_bins as f64;
    let mut bins: Vec<Bin> = (0..num_bins).map(|i| Bin {
        lo: min + width * i as f64,
        hi: min + width * (i + 1) as f64,
        count: 0,
    }).collect();
    for &v in values {
        let idx = if width == 0.0 {
            0
        } else {
            (((v - min) / width) as usize).min(num_bins - 1)
        };
        bins[idx].count += 1;
    }
    bins
}

/// Write histograms, the connection-size summary and the per-field summary
/// statistics into `output_dir`. Returns the paths written.
pub fn write_reports(agg: &Aggregate, output_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir).map_err(|e| Error::io(output_dir, e))?;
    let mut written = Vec::new();

    let fields: [(&str, &str, &[f64]); 4] = [
        ("Width", "width_histogram.txt", &agg.widths),
        ("Height", "height_histogram.txt", &agg.heights),
        ("Aspect Ratio", "aspect_ratio_histogram.txt", &agg.aspect_ratios),
        ("Power", "power_histogram.txt", &agg.powers),
    ];

    for (label, file, values) in fields {
        let mut text = format!("Histogram of {} ({} samples)\n", label, values.len());
        for bin in histogram(values, HISTOGRAM_BINS) {
            writeln!(text, "{:12.4} .. {:12.4}: {}", bin.lo, bin.hi, bin.count)
                .expect("string write");
        }
        let path = output_dir.join(file);
        fs::write(&path, text).map_err(|e| Error::io(&path, e))?;
        written.push(path);
    }

    if !agg.connection_sizes.is_empty() {
        let sizes: Vec<f64> = agg.connection_sizes.iter().map(|&s| s as f64).collect();
        let summary = summarize(&sizes).expect("nonempty");
        let (min, max) = sizes.iter().copied()
            .minmax_by(|a, b| a.partial_cmp(b).unwrap())
            .into_option().expect("nonempty");
        let path = output_dir.join("connection_sizes.txt");
        let text = format!(
            "Connection size distribution ({} connections)\n\
             Min: {}\n1st Quartile: {:.2}\nMedian: {:.2}\n3rd Quartile: {:.2}\nMax: {}\n",
            sizes.len(), min, summary.q1, summary.median, summary.q3, max,
        );
        fs::write(&path, text).map_err(|e| Error::io(&path, e))?;
        written.push(path);
    }

    let mut text = String::new();
    for (label, values) in [
        ("Width", &agg.widths),
        ("Height", &agg.heights),
        ("Aspect Ratio", &agg.aspect_ratios),
        ("Power", &agg.powers),
    ] {
        if let Some(s) = summarize(values) {
            writeln!(text, "{}:", label).expect("string write");
            writeln!(text, "  Average: {:.2}", s.mean).expect("string write");
            writeln!(text, "  1st Quartile: {:.2}", s.q1).expect("string write");
            writeln!(text, "  3rd Quartile: {:.2}", s.q3).expect("string write");
            writeln!(text, "  Median: {:.2}", s.median).expect("string write");
            writeln!(text).expect("string write");
        }
    }
    let path = output_dir.join("summary_statistics.txt");
    fs::write(&path, text).map_err(|e| Error::io(&path, e))?;
    written.push(path);

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Block, Connection};
    use std::path::PathBuf;
    use tempdir::TempDir;

    #[test]
    fn quartiles_interpolate_linearly() {
        let s = summarize(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(s.mean, 2.5);
        assert_eq!(s.q1, 1.75);
        assert_eq!(s.median, 2.5);
        assert_eq!(s.q3, 3.25);
    }

    #[test]
    fn empty_sample_has_no_summary() {
        assert_eq!(summarize(&[]), None);
    }

    #[test]
    fn histogram_covers_the_full_range() {
        let values: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let bins = histogram(&values, 20);
        assert_eq!(bins.len(), 20);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 100);
        assert_eq!(bins[0].lo, 0.0);
        assert_eq!(bins[19].hi, 99.0);
        // the maximum lands in the last bin, not one past it
        assert_eq!(bins[19].count, 5);
    }

    #[test]
    fn aggregate_pools_blocks_and_connection_sizes() {
        let netlist = Netlist {
            blocks: vec![
                Block { name: "a".into(), width: 10.0, height: 5.0, power: Some(1.0) },
                Block { name: "b".into(), width: 6.0, height: 6.0, power: None },
            ],
            connections: vec![
                Connection::Net { name: "c_0".into(),
                                  members: vec!["a".into(), "b".into()] },
                Connection::Raw("N1 a b c;".to_string()),
            ],
        };
        let mut agg = Aggregate::default();
        agg.add_netlist(&netlist);
        assert_eq!(agg.widths, [10.0, 6.0]);
        assert_eq!(agg.aspect_ratios, [2.0, 1.0]);
        assert_eq!(agg.powers, [1.0]);
        assert_eq!(agg.connection_sizes, [3, 4]);
    }

    #[test]
    fn malformed_file_aborts_the_run() {
        let dir = TempDir::new("stats_in").unwrap();
        std::fs::write(dir.path().join("ok.txt"),
                       "Blocks:\na, 1, 2, None\n\nConnections:\n").unwrap();
        std::fs::write(dir.path().join("bad.txt"),
                       "Blocks:\nnot a block line\n").unwrap();
        assert!(Aggregate::from_dir(dir.path()).is_err());
    }

    #[test]
    fn reports_are_written() {
        let input = TempDir::new("stats_in").unwrap();
        let output = TempDir::new("stats_out").unwrap();
        std::fs::write(input.path().join("n.txt"),
            "Blocks:\na, 10, 5, 0.5\nb, 20, 10, None\n\nConnections:\nc_0 a b\n")
            .unwrap();
        let agg = Aggregate::from_dir(input.path()).unwrap();
        let written = write_reports(&agg, output.path()).unwrap();
        let names: Vec<PathBuf> = written.iter()
            .map(|p| PathBuf::from(p.file_name().unwrap())).collect();
        assert!(names.contains(&PathBuf::from("width_histogram.txt")));
        assert!(names.contains(&PathBuf::from("connection_sizes.txt")));
        assert!(names.contains(&PathBuf::from("summary_statistics.txt")));
        let summary = std::fs::read_to_string(
            output.path().join("summary_statistics.txt")).unwrap();
        assert!(summary.contains("Width:"));
        assert!(summary.contains("Average: 15.00"));
    }
}
