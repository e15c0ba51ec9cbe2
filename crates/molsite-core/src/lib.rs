//! # molsite
//!
//! Atom sites for molecular topologies, with charge and mass that are checked against
//! their physical dimension on every write.
//!
//! An [`Atom`](core::models::atom::Atom) may carry its own charge and mass or inherit
//! them from a shared [`AtomType`](core::models::atom_type::AtomType); a value set on
//! the atom always takes precedence. Values keep the unit they were given in. Bare
//! numbers are accepted in the canonical units (elementary charge and g/mol) with a
//! logged warning.
//!
//! ```
//! use molsite::core::io::document::parse_topology;
//!
//! let topology = parse_topology(
//!     r#"
//!     name = "sodium"
//!
//!     [[atoms]]
//!     name = "Na"
//!     charge = { value = 1.0, unit = "e" }
//!     element = "Na"
//!     "#,
//! )?;
//! assert_eq!(topology.atom_count(), 1);
//! # Ok::<(), molsite::core::io::error::DocumentError>(())
//! ```

#[macro_use]
extern crate uom;

pub mod core;
