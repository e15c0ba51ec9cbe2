use super::atom_type::SharedAtomType;
use super::element::Element;
use super::error::AtomError;
use super::validation::Magnitude;
use crate::core::units::Quantity;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// The closed set of assignable atom attributes.
///
/// Each field is reachable under its public name (`charge`) and its storage name
/// (`charge_`); both refer to the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Charge,
    Mass,
    Element,
    AtomType,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Charge, Field::Mass, Field::Element, Field::AtomType];

    pub fn name(&self) -> &'static str {
        match self {
            Field::Charge => "charge",
            Field::Mass => "mass",
            Field::Element => "element",
            Field::AtomType => "atom_type",
        }
    }

    pub fn storage_name(&self) -> &'static str {
        match self {
            Field::Charge => "charge_",
            Field::Mass => "mass_",
            Field::Element => "element_",
            Field::AtomType => "atom_type_",
        }
    }

    /// Resolves a public or storage field name.
    ///
    /// # Errors
    ///
    /// Returns [`AtomError::SchemaViolation`] for any name outside the schema.
    pub fn from_name(name: &str) -> Result<Self, AtomError> {
        if let Some(field) = Field::ALL.iter().find(|f| f.name() == name) {
            return Ok(*field);
        }
        if let Some(field) = Field::ALL.iter().find(|f| f.storage_name() == name) {
            warn!(
                "Use of internal field '{}' is discouraged; use '{}' instead",
                name,
                field.name()
            );
            return Ok(*field);
        }
        Err(AtomError::SchemaViolation {
            field: name.to_string(),
        })
    }
}

impl FromStr for Field {
    type Err = AtomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::from_name(s)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A dynamically typed value for assignment through a field name.
#[derive(Debug, Clone)]
pub enum FieldValue {
    Null,
    Number(f64),
    Quantity(Quantity),
    Element(Element),
    AtomType(SharedAtomType),
}

impl FieldValue {
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Number(_) => "number",
            FieldValue::Quantity(_) => "quantity",
            FieldValue::Element(_) => "element",
            FieldValue::AtomType(_) => "atom type",
        }
    }

    /// Interprets the value as an optional charge or mass.
    pub(crate) fn into_magnitude(self) -> Result<Option<Magnitude>, AtomError> {
        match self {
            FieldValue::Null => Ok(None),
            FieldValue::Number(v) => Ok(Some(Magnitude::Bare(v))),
            FieldValue::Quantity(q) => Ok(Some(Magnitude::Quantity(q))),
            other => Err(AtomError::TypeMismatch {
                expected: "number or quantity",
                found: other.kind().to_string(),
            }),
        }
    }

    pub(crate) fn into_element(self) -> Result<Option<Element>, AtomError> {
        match self {
            FieldValue::Null => Ok(None),
            FieldValue::Element(e) => Ok(Some(e)),
            other => Err(AtomError::TypeMismatch {
                expected: "element",
                found: other.kind().to_string(),
            }),
        }
    }

    pub(crate) fn into_atom_type(self) -> Result<Option<SharedAtomType>, AtomError> {
        match self {
            FieldValue::Null => Ok(None),
            FieldValue::AtomType(t) => Ok(Some(t)),
            other => Err(AtomError::TypeMismatch {
                expected: "atom type",
                found: other.kind().to_string(),
            }),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<Quantity> for FieldValue {
    fn from(value: Quantity) -> Self {
        FieldValue::Quantity(value)
    }
}

impl From<Element> for FieldValue {
    fn from(value: Element) -> Self {
        FieldValue::Element(value)
    }
}

impl From<SharedAtomType> for FieldValue {
    fn from(value: SharedAtomType) -> Self {
        FieldValue::AtomType(value)
    }
}
