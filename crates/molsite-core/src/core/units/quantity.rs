use super::dimension::Dimension;
use super::measure::Measure;
use super::registry::{Unit, UnitError, lookup};
use approx::relative_eq;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Mul;

/// A scalar value tagged with the unit it is expressed in.
///
/// The value is kept in the unit it was created with; conversion only happens when
/// explicitly requested through [`Quantity::to`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "QuantityRepr", into = "QuantityRepr")]
pub struct Quantity {
    value: f64,
    unit: &'static Unit,
}

impl Quantity {
    pub const fn new(value: f64, unit: &'static Unit) -> Self {
        Self { value, unit }
    }

    /// Builds a quantity from a value and a unit symbol, e.g. `(1.0, "C")`.
    pub fn from_symbol(value: f64, symbol: &str) -> Result<Self, UnitError> {
        Ok(Self::new(value, lookup(symbol)?))
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> &'static Unit {
        self.unit
    }

    pub fn dimension(&self) -> Dimension {
        self.unit.dimension()
    }

    /// The value as a `uom` quantity.
    pub fn measure(&self) -> Measure {
        self.unit.measure(self.value)
    }

    /// Converts the quantity into `unit`.
    ///
    /// # Errors
    ///
    /// Returns [`UnitError::IncompatibleDimensions`] if `unit` measures a different dimension.
    pub fn to(&self, unit: &'static Unit) -> Result<Quantity, UnitError> {
        unit.read(&self.measure())
            .map(|value| Quantity::new(value, unit))
            .ok_or_else(|| UnitError::incompatible(self.unit, unit))
    }

    pub fn value_in(&self, unit: &'static Unit) -> Result<f64, UnitError> {
        self.to(unit).map(|q| q.value)
    }

    /// Tests physical equivalence irrespective of the units used.
    ///
    /// Quantities of different dimension are never equivalent. Otherwise `other` is
    /// read in the unit of `self` and compared with relative tolerance `max_relative`.
    pub fn approx_eq(&self, other: &Quantity, max_relative: f64) -> bool {
        match self.unit.read(&other.measure()) {
            Some(b) => relative_eq!(self.value, b, max_relative = max_relative),
            None => false,
        }
    }
}

impl Mul<&'static Unit> for f64 {
    type Output = Quantity;

    fn mul(self, unit: &'static Unit) -> Quantity {
        Quantity::new(self, unit)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.symbol().is_empty() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, self.unit.symbol())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct QuantityRepr {
    value: f64,
    unit: String,
}

impl TryFrom<QuantityRepr> for Quantity {
    type Error = UnitError;

    fn try_from(repr: QuantityRepr) -> Result<Self, Self::Error> {
        Quantity::from_symbol(repr.value, &repr.unit)
    }
}

impl From<Quantity> for QuantityRepr {
    fn from(quantity: Quantity) -> Self {
        Self {
            value: quantity.value,
            unit: quantity.unit.symbol().to_string(),
        }
    }
}
