//! Packetary benchmarking suite
//!
//! Benchmarks for version parsing and comparison, range intersection and
//! mirror configuration parsing.

pub mod common;

pub use common::*;
