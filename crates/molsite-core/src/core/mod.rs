//! # Core Module
//!
//! The building blocks of the library: physical units, the site models that use them,
//! and the document format topologies are exchanged in.
//!
//! ## Architecture
//!
//! - **Units** ([`units`]) - Runtime dimensions, unit symbols and unit-tagged quantities
//! - **Molecular Representation** ([`models`]) - Atoms, atom types, elements, bonds and topologies
//! - **Serialization** ([`io`]) - TOML documents and per-record conversion with schema checks

pub mod io;
pub mod models;
pub mod units;
