use super::atom::Atom;
use super::atom_type::{AtomType, SharedAtomType};
use super::bond::Bond;
use super::error::TopologyError;
use super::ids::AtomId;
use slotmap::SlotMap;
use std::collections::BTreeMap;
use std::rc::Rc;
use tracing::{debug, trace};

/// A container of atoms, the atom types they share, and the bonds between them.
///
/// Atom types are registered once by name and handed out as shared handles, so every
/// atom referring to a type observes later edits to it.
#[derive(Debug, Default)]
pub struct Topology {
    /// Name of the topology, e.g. the molecule or system it describes.
    name: String,
    /// Primary storage for atoms using a slot map for stable IDs.
    atoms: SlotMap<AtomId, Atom>,
    /// Registered atom types, keyed by type name.
    atom_types: BTreeMap<String, SharedAtomType>,
    /// All bonds in the topology; never contains two equivalent bonds.
    bonds: Vec<Bond>,
}

impl Topology {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_atom(&mut self, atom: Atom) -> AtomId {
        let name = atom.name().to_string();
        let id = self.atoms.insert(atom);
        trace!("Added atom '{}' as {:?} to topology '{}'", name, id, self.name);
        id
    }

    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    pub fn atom_mut(&mut self, id: AtomId) -> Option<&mut Atom> {
        self.atoms.get_mut(id)
    }

    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atoms.iter()
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Registers an atom type and returns the shared handle atoms should hold.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::DuplicateAtomType`] if a type with the same name exists.
    pub fn add_atom_type(&mut self, atom_type: AtomType) -> Result<SharedAtomType, TopologyError> {
        if self.atom_types.contains_key(atom_type.name()) {
            return Err(TopologyError::DuplicateAtomType(atom_type.name().to_string()));
        }
        let name = atom_type.name().to_string();
        let shared = atom_type.into_shared();
        self.atom_types.insert(name.clone(), Rc::clone(&shared));
        debug!("Registered atom type '{}' in topology '{}'", name, self.name);
        Ok(shared)
    }

    pub fn atom_type(&self, name: &str) -> Option<&SharedAtomType> {
        self.atom_types.get(name)
    }

    /// Registered atom types in name order.
    pub fn atom_types_iter(&self) -> impl Iterator<Item = (&str, &SharedAtomType)> {
        self.atom_types.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Connects two atoms of this topology.
    ///
    /// # Errors
    ///
    /// Fails if either atom is not in the topology, if both IDs are the same atom, or
    /// if an equivalent bond (in either member order) already exists.
    pub fn add_bond(&mut self, atom1_id: AtomId, atom2_id: AtomId) -> Result<(), TopologyError> {
        for id in [atom1_id, atom2_id] {
            if !self.atoms.contains_key(id) {
                return Err(TopologyError::AtomNotFound(id));
            }
        }
        if atom1_id == atom2_id {
            return Err(TopologyError::SelfBond(atom1_id));
        }
        let bond = Bond::new(atom1_id, atom2_id);
        if self.bonds.contains(&bond) {
            return Err(TopologyError::DuplicateBond(atom1_id, atom2_id));
        }
        self.bonds.push(bond);
        Ok(())
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Atom IDs sorted by the total order of their atoms.
    ///
    /// The result depends only on the atoms' identities, not on insertion order or on
    /// their charges, masses or types.
    pub fn sorted_atom_ids(&self) -> Vec<AtomId> {
        let mut entries: Vec<(AtomId, &Atom)> = self.atoms.iter().collect();
        entries.sort_by(|(_, a), (_, b)| a.cmp(b));
        entries.into_iter().map(|(id, _)| id).collect()
    }
}
