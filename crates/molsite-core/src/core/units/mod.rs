//! # Units Module
//!
//! Runtime physical units for the attributes of topology sites.
//!
//! Charges and masses arrive from callers in arbitrary (but compatible) units and
//! are stored exactly as given, so the unit of a value has to be known at runtime.
//! Each runtime [`Unit`] maps onto a `uom` unit, and all conversions and dimension
//! checks are carried out on the corresponding `uom` quantities:
//!
//! - [`Dimension`] - the physical dimension a unit measures
//! - [`Unit`] - a named unit tag resolving to a `uom` unit
//! - [`Measure`] - a value held as a `uom` quantity
//! - [`Quantity`] - a value tagged with the unit it was written in
//! - [`lookup`] - resolution of unit symbols and aliases
//!
//! Amount of substance is treated as a plain count (one mole is Avogadro's number
//! of items), which makes `g/mol` a unit of mass numerically equal to one dalton.
//!
//! ```
//! use molsite::core::units::{self, Dimension};
//!
//! let charge = 1.0 * &units::ELEMENTARY_CHARGE;
//! assert_eq!(charge.dimension(), Dimension::Charge);
//!
//! let coulomb = units::lookup("C").unwrap();
//! assert!(charge.to(coulomb).is_ok());
//! ```

mod dimension;
mod measure;
mod quantity;
mod registry;

pub use dimension::Dimension;
pub use measure::Measure;
pub use quantity::Quantity;
pub use registry::*;
