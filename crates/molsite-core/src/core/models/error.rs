use super::ids::AtomId;
use crate::core::units::Dimension;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AtomError {
    #[error("Unknown atom field '{field}'; expected one of charge, mass, element, atom_type")]
    SchemaViolation { field: String },

    #[error(
        "Invalid {field}: unit '{unit}' has dimension {found}, expected {expected}"
    )]
    DimensionMismatch {
        field: &'static str,
        unit: &'static str,
        expected: Dimension,
        found: Dimension,
    },

    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TopologyError {
    #[error("Atom not found in topology: {0:?}")]
    AtomNotFound(AtomId),

    #[error("Atom type '{0}' is already registered")]
    DuplicateAtomType(String),

    #[error("An atom cannot be bonded to itself: {0:?}")]
    SelfBond(AtomId),

    #[error("Bond between {0:?} and {1:?} already exists")]
    DuplicateBond(AtomId, AtomId),
}
