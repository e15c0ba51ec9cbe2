use super::error::DocumentError;
use crate::core::models::atom::Atom;
use crate::core::models::atom_type::{AtomType, SharedAtomType};
use crate::core::models::element::element_by_symbol;
use crate::core::models::schema::Field;
use crate::core::models::validation::Magnitude;
use crate::core::units::{Quantity, Unit};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Units applied to bare numbers of a document.
///
/// When a unit is unset, bare numbers fall through to the canonical unit of the
/// attribute and a warning is logged on assignment.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UnitDefaults {
    pub charge: Option<&'static Unit>,
    pub mass: Option<&'static Unit>,
}

/// A charge or mass as written in a document: either `1.5` or `{ value = 1.5, unit = "e" }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MagnitudeRecord {
    Bare(f64),
    Quantity(Quantity),
}

impl MagnitudeRecord {
    pub fn into_magnitude(self, default_unit: Option<&'static Unit>) -> Magnitude {
        match (self, default_unit) {
            (MagnitudeRecord::Bare(v), Some(unit)) => Magnitude::Quantity(Quantity::new(v, unit)),
            (MagnitudeRecord::Bare(v), None) => Magnitude::Bare(v),
            (MagnitudeRecord::Quantity(q), _) => Magnitude::Quantity(q),
        }
    }
}

impl From<Quantity> for MagnitudeRecord {
    fn from(quantity: Quantity) -> Self {
        MagnitudeRecord::Quantity(quantity)
    }
}

/// Serialized form of an [`Atom`].
///
/// Keys outside the atom schema are collected in `unknown` and rejected when the
/// record is turned into an atom. Storage names such as `charge_` are accepted there
/// with a warning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AtomRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<[f64; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charge: Option<MagnitudeRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass: Option<MagnitudeRecord>,
    /// Element symbol, e.g. `"O"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
    /// Name of a registered atom type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atom_type: Option<String>,
    #[serde(flatten)]
    pub unknown: BTreeMap<String, toml::Value>,
}

impl AtomRecord {
    /// Builds the atom described by this record.
    ///
    /// `resolve_type` maps atom type names to registered handles. Validation happens in
    /// one step, so a failing record never yields a partially initialised atom.
    ///
    /// # Errors
    ///
    /// Unknown keys are reported as [`AtomError::SchemaViolation`], wrong units as
    /// [`AtomError::DimensionMismatch`], both wrapped in [`DocumentError::Atom`].
    ///
    /// [`AtomError::SchemaViolation`]: crate::core::models::error::AtomError::SchemaViolation
    /// [`AtomError::DimensionMismatch`]: crate::core::models::error::AtomError::DimensionMismatch
    pub fn into_atom<F>(mut self, units: UnitDefaults, resolve_type: F) -> Result<Atom, DocumentError>
    where
        F: Fn(&str) -> Option<SharedAtomType>,
    {
        self.merge_storage_names()?;

        let name = self.name;
        let wrap = |source| DocumentError::Atom {
            name: name.clone(),
            source,
        };

        let mut builder = Atom::builder(&name);
        if let Some([x, y, z]) = self.position {
            builder = builder.position(Point3::new(x, y, z));
        }
        if let Some(charge) = self.charge {
            builder = builder.charge(charge.into_magnitude(units.charge));
        }
        if let Some(mass) = self.mass {
            builder = builder.mass(mass.into_magnitude(units.mass));
        }
        if let Some(symbol) = &self.element {
            let element = element_by_symbol(symbol)
                .ok_or_else(|| DocumentError::UnknownElement(symbol.clone()))?;
            builder = builder.element(*element);
        }
        if let Some(type_name) = &self.atom_type {
            let atom_type = resolve_type(type_name).ok_or_else(|| DocumentError::UnknownAtomType {
                atom: name.clone(),
                atom_type: type_name.clone(),
            })?;
            builder = builder.atom_type(atom_type);
        }
        builder.build().map_err(wrap)
    }

    /// Moves values given under storage names into their public slots.
    fn merge_storage_names(&mut self) -> Result<(), DocumentError> {
        let unknown = std::mem::take(&mut self.unknown);
        for (key, value) in unknown {
            let field = Field::from_name(&key).map_err(|source| DocumentError::Atom {
                name: self.name.clone(),
                source,
            })?;
            let duplicate = match field {
                Field::Charge => self.charge.replace(toml::Value::try_into(value)?).is_some(),
                Field::Mass => self.mass.replace(toml::Value::try_into(value)?).is_some(),
                Field::Element => self.element.replace(toml::Value::try_into(value)?).is_some(),
                Field::AtomType => self.atom_type.replace(toml::Value::try_into(value)?).is_some(),
            };
            if duplicate {
                return Err(DocumentError::DuplicateField {
                    atom: self.name.clone(),
                    field: field.name(),
                });
            }
        }
        Ok(())
    }
}

impl Atom {
    /// Exports this atom as a record.
    ///
    /// Only instance-level charge and mass are written; values inherited from the atom
    /// type are carried by the type's own record.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::UnlistedElement`] if the atom carries an element that
    /// [`element_by_symbol`] would not resolve back to the same element.
    pub fn to_record(&self) -> Result<AtomRecord, DocumentError> {
        let element = match self.element() {
            Some(e) if element_by_symbol(e.symbol()) == Some(e) => Some(e.symbol().to_string()),
            Some(e) => return Err(DocumentError::UnlistedElement(e.symbol().to_string())),
            None => None,
        };
        let p = self.position();
        Ok(AtomRecord {
            name: self.name().to_string(),
            position: Some([p.x, p.y, p.z]),
            charge: self.local_charge().map(MagnitudeRecord::from),
            mass: self.local_mass().map(MagnitudeRecord::from),
            element,
            atom_type: self.atom_type().map(|t| t.borrow().name().to_string()),
            unknown: BTreeMap::new(),
        })
    }
}

/// Serialized form of an [`AtomType`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AtomTypeRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charge: Option<MagnitudeRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass: Option<MagnitudeRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub unknown: BTreeMap<String, toml::Value>,
}

impl AtomTypeRecord {
    pub fn into_atom_type(self, units: UnitDefaults) -> Result<AtomType, DocumentError> {
        if let Some(field) = self.unknown.keys().next() {
            return Err(DocumentError::UnknownField {
                section: "atom type",
                field: field.clone(),
            });
        }
        let wrap = |source| DocumentError::AtomType {
            name: self.name.clone(),
            source,
        };

        let mut atom_type = AtomType::new(&self.name);
        if let Some(charge) = self.charge {
            atom_type.set_charge(charge.into_magnitude(units.charge)).map_err(wrap)?;
        }
        if let Some(mass) = self.mass {
            atom_type.set_mass(mass.into_magnitude(units.mass)).map_err(wrap)?;
        }
        if let Some(definition) = &self.definition {
            atom_type = atom_type.with_definition(definition);
        }
        if let Some(description) = &self.description {
            atom_type = atom_type.with_description(description);
        }
        Ok(atom_type)
    }
}

impl From<&AtomType> for AtomTypeRecord {
    fn from(atom_type: &AtomType) -> Self {
        Self {
            name: atom_type.name().to_string(),
            charge: atom_type.charge().map(MagnitudeRecord::from),
            mass: atom_type.mass().map(MagnitudeRecord::from),
            definition: atom_type.definition().map(str::to_string),
            description: atom_type.description().map(str::to_string),
            unknown: BTreeMap::new(),
        }
    }
}
