// SPDX-License-Identifier: Apache-2.0
//! Batch tools for collecting, normalizing and analyzing floorplan
//! netlist datasets.
//!
//! Everything funnels through one interchange format, the normalized
//! "Blocks:/Connections:" text schema in [`schema`]. The extractor modules
//! each turn one vendor format into that schema; [`augment`] generates
//! synthetic data directly in it; [`dedup`] and [`stats`] consume it.

pub mod error;

pub mod schema;

pub mod prototext;

pub mod thermal;

pub mod coordlist;

pub mod yal;

pub mod augment;

pub mod dedup;

pub mod stats;

pub mod download;

pub use error::{Error, Result};
