use super::error::DocumentError;
use super::records::{AtomRecord, AtomTypeRecord, UnitDefaults};
use crate::core::models::atom_type::SharedAtomType;
use crate::core::models::ids::AtomId;
use crate::core::models::topology::Topology;
use crate::core::models::validation::{CHARGE_RULE, MASS_RULE, UnitRule};
use crate::core::units::{Quantity, Unit, lookup};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use tracing::{debug, info, instrument};

/// The `[units]` table of a document: unit symbols applied to bare numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitsSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass: Option<String>,
}

impl UnitsSection {
    /// Looks up the configured symbols and checks them against the attribute dimensions.
    pub fn resolve(&self) -> Result<UnitDefaults, DocumentError> {
        Ok(UnitDefaults {
            charge: resolve_unit(self.charge.as_deref(), &CHARGE_RULE)?,
            mass: resolve_unit(self.mass.as_deref(), &MASS_RULE)?,
        })
    }
}

fn resolve_unit(symbol: Option<&str>, rule: &UnitRule) -> Result<Option<&'static Unit>, DocumentError> {
    let Some(symbol) = symbol else {
        return Ok(None);
    };
    let unit = lookup(symbol)?;
    rule.coerce(Quantity::new(1.0, unit).into())
        .map_err(|source| DocumentError::UnitsConfig {
            field: rule.field,
            source,
        })?;
    Ok(Some(unit))
}

/// A topology in its TOML form.
///
/// ```toml
/// name = "water"
///
/// [units]
/// mass = "amu"
///
/// [[atom_types]]
/// name = "OW"
/// charge = { value = -0.834, unit = "e" }
/// mass = 15.999
///
/// [[atoms]]
/// name = "O"
/// position = [0.0, 0.0, 0.0]
/// element = "O"
/// atom_type = "OW"
///
/// [[atoms]]
/// name = "H1"
/// position = [0.9572, 0.0, 0.0]
/// charge = 0.417
/// mass = 1.008
///
/// [[bonds]]
/// atoms = [0, 1]
/// ```
///
/// Bonds refer to atoms by their index in `atoms`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TopologyDocument {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<UnitsSection>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub atom_types: Vec<AtomTypeRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub atoms: Vec<AtomRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bonds: Vec<BondRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BondRecord {
    pub atoms: [usize; 2],
}

impl TopologyDocument {
    pub fn from_toml_str(text: &str) -> Result<Self, DocumentError> {
        Ok(toml::from_str(text)?)
    }

    pub fn to_toml_string(&self) -> Result<String, DocumentError> {
        Ok(toml::to_string(self)?)
    }

    /// Builds the topology described by this document.
    ///
    /// Atom types are registered first so atoms can refer to them by name. Any invalid
    /// record aborts the whole conversion.
    #[instrument(skip_all, name = "document_into_topology", fields(name = %self.name))]
    pub fn into_topology(self) -> Result<Topology, DocumentError> {
        let units = self.units.as_ref().map(UnitsSection::resolve).transpose()?.unwrap_or_default();
        let mut topology = Topology::new(&self.name);

        for record in self.atom_types {
            let atom_type = record.into_atom_type(units)?;
            topology.add_atom_type(atom_type)?;
        }

        let mut ids: Vec<AtomId> = Vec::with_capacity(self.atoms.len());
        for record in self.atoms {
            let atom = record.into_atom(units, |name| topology.atom_type(name).map(Rc::clone))?;
            ids.push(topology.add_atom(atom));
        }

        for bond in &self.bonds {
            let [a, b] = bond.atoms;
            let id = |index: usize| {
                ids.get(index).copied().ok_or(DocumentError::BondIndex {
                    index,
                    count: ids.len(),
                })
            };
            topology.add_bond(id(a)?, id(b)?)?;
        }

        info!(
            "Loaded topology '{}' with {} atoms, {} atom types and {} bonds",
            topology.name(),
            topology.atom_count(),
            topology.atom_types_iter().count(),
            topology.bonds().len()
        );
        Ok(topology)
    }

    /// Captures a topology as a document.
    ///
    /// Atoms are written in their total order, and all quantities carry explicit units
    /// so no `[units]` table is emitted. Atom types attached to atoms are written even
    /// when the topology's registry does not list them.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::ConflictingAtomType`] if two different atom types with
    /// the same name are reachable, and [`DocumentError::UnlistedElement`] if an atom
    /// carries an element the periodic table does not know by its symbol.
    pub fn from_topology(topology: &Topology) -> Result<Self, DocumentError> {
        let atom_ids = topology.sorted_atom_ids();
        let index_of: HashMap<AtomId, usize> =
            atom_ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();

        let mut types: BTreeMap<String, SharedAtomType> = topology
            .atom_types_iter()
            .map(|(name, t)| (name.to_string(), Rc::clone(t)))
            .collect();
        let mut atoms = Vec::with_capacity(atom_ids.len());
        for atom in atom_ids.iter().filter_map(|id| topology.atom(*id)) {
            if let Some(attached) = atom.atom_type() {
                let name = attached.borrow().name().to_string();
                match types.get(&name) {
                    Some(known) if Rc::ptr_eq(known, attached) => {}
                    Some(known) if *known.borrow() == *attached.borrow() => {}
                    Some(_) => return Err(DocumentError::ConflictingAtomType(name)),
                    None => {
                        debug!("Exporting unregistered atom type '{}'", name);
                        types.insert(name, Rc::clone(attached));
                    }
                }
            }
            atoms.push(atom.to_record()?);
        }
        let atom_types = types
            .values()
            .map(|t| AtomTypeRecord::from(&*t.borrow()))
            .collect();
        let bonds = topology
            .bonds()
            .iter()
            .filter_map(|bond| {
                let [a, b] = bond.members();
                Some(BondRecord {
                    atoms: [*index_of.get(&a)?, *index_of.get(&b)?],
                })
            })
            .collect();

        debug!("Captured topology '{}' as a document", topology.name());
        Ok(Self {
            name: topology.name().to_string(),
            units: None,
            atom_types,
            atoms,
            bonds,
        })
    }
}

/// Parses a TOML document straight into a [`Topology`].
pub fn parse_topology(text: &str) -> Result<Topology, DocumentError> {
    TopologyDocument::from_toml_str(text)?.into_topology()
}
