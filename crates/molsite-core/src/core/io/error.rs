use crate::core::models::error::{AtomError, TopologyError};
use crate::core::units::UnitError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Invalid atom '{name}': {source}")]
    Atom { name: String, source: AtomError },

    #[error("Invalid atom type '{name}': {source}")]
    AtomType { name: String, source: AtomError },

    #[error("Field '{field}' of atom '{atom}' is given more than once")]
    DuplicateField { atom: String, field: &'static str },

    #[error("Unknown field '{field}' in {section}")]
    UnknownField { section: &'static str, field: String },

    #[error("Invalid unit in [units]: {0}")]
    Unit(#[from] UnitError),

    #[error("Invalid [units] entry for {field}: {source}")]
    UnitsConfig { field: &'static str, source: AtomError },

    #[error("Unknown element symbol '{0}'")]
    UnknownElement(String),

    #[error("Element '{0}' is not in the periodic table and cannot be written by symbol")]
    UnlistedElement(String),

    #[error("Two different atom types named '{0}' are attached to atoms")]
    ConflictingAtomType(String),

    #[error("Atom '{atom}' refers to unknown atom type '{atom_type}'")]
    UnknownAtomType { atom: String, atom_type: String },

    #[error("Bond refers to atom index {index}, but only {count} atoms are defined")]
    BondIndex { index: usize, count: usize },

    #[error(transparent)]
    Topology(#[from] TopologyError),
}
