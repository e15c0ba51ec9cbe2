//! Provides the serialized form of topologies and their atoms.
//!
//! Documents are TOML text. The record types here mirror the public fields of the
//! models and are converted through the same validating constructors, so a document
//! can never produce an atom that could not have been built directly. Reading and
//! writing files is left to the caller.

pub mod document;
pub mod error;
pub mod records;
