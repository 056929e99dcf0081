//! Glue between the CLI and the library crates.
//!
//! Ticker list assembly and the extract run: snapshots in, enriched and
//! formatted table out.

pub(crate) mod codes;
pub(crate) mod extraction;
