//! # Sitekit Archive Utilities (`common::archive`)
//!
//! File: cli/src/common/archive/mod.rs
//!
//! ## Overview
//!
//! Creation of gzipped tar archives, used by `sitekit backup`.
//!
pub mod tar;
