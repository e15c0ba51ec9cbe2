//! # Core Models Module
//!
//! Data structures for atom sites and the records they refer to.
//!
//! ## Overview
//!
//! The central type is [`atom::Atom`], a site whose charge and mass are resolved
//! through a two-level hierarchy: a value set on the atom itself wins over the value
//! of its shared [`atom_type::AtomType`]. Every charge or mass written to an atom is
//! validated against the physical dimension of the attribute.
//!
//! ## Key Components
//!
//! - [`atom`] - The atom site, its builder, precedence rules and identity ordering
//! - [`atom_type`] - Reusable default properties shared between atoms
//! - [`element`] - Periodic-table records and lookups
//! - [`schema`] - The closed set of atom field names for dynamic assignment
//! - [`validation`] - Unit rules applied to every charge and mass
//! - [`topology`] - Container of atoms, atom types and bonds
//! - [`bond`] - Order-independent two-atom connections
//! - [`ids`] - Identifier types
//! - [`error`] - Error types of this module
//!
//! ## Usage
//!
//! ```
//! use molsite::core::models::{atom::Atom, atom_type::AtomType};
//! use molsite::core::units::{GRAM_PER_MOLE, Quantity};
//!
//! let carbon = AtomType::new("CT")
//!     .with_mass(Quantity::new(12.011, &GRAM_PER_MOLE))?
//!     .into_shared();
//!
//! let mut atom = Atom::builder("C1").atom_type(carbon).build()?;
//! assert_eq!(atom.mass().unwrap().value(), 12.011);
//!
//! atom.set_mass(Quantity::new(13.003, &GRAM_PER_MOLE))?;
//! assert_eq!(atom.mass().unwrap().value(), 13.003);
//! # Ok::<(), molsite::core::models::error::AtomError>(())
//! ```

pub mod atom;
pub mod atom_type;
pub mod bond;
pub mod element;
pub mod error;
pub mod ids;
pub mod schema;
pub mod topology;
pub mod validation;
