use super::ids::AtomId;
use std::hash::{Hash, Hasher};

/// A two-member connection between atoms.
///
/// Member order carries no meaning: the bond `(i, j)` is the same bond as `(j, i)`.
#[derive(Debug, Clone, Copy)]
pub struct Bond {
    members: [AtomId; 2],
}

impl Bond {
    pub fn new(atom1_id: AtomId, atom2_id: AtomId) -> Self {
        Self {
            members: [atom1_id, atom2_id],
        }
    }

    pub fn members(&self) -> [AtomId; 2] {
        self.members
    }

    pub fn contains(&self, atom_id: AtomId) -> bool {
        self.members.contains(&atom_id)
    }

    /// The member on the other side of `atom_id`, if `atom_id` is part of the bond.
    pub fn partner(&self, atom_id: AtomId) -> Option<AtomId> {
        match self.members {
            [a, b] if a == atom_id => Some(b),
            [a, b] if b == atom_id => Some(a),
            _ => None,
        }
    }

    fn sorted_members(&self) -> [AtomId; 2] {
        let [a, b] = self.members;
        if a <= b { [a, b] } else { [b, a] }
    }
}

impl PartialEq for Bond {
    fn eq(&self, other: &Self) -> bool {
        self.sorted_members() == other.sorted_members()
    }
}

impl Eq for Bond {}

impl Hash for Bond {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sorted_members().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;
    use std::collections::HashSet;

    fn dummy_atom_id(n: u64) -> AtomId {
        AtomId::from(KeyData::from_ffi(n))
    }

    #[test]
    fn bond_new_keeps_member_order() {
        let a1 = dummy_atom_id(1);
        let a2 = dummy_atom_id(2);
        assert_eq!(Bond::new(a1, a2).members(), [a1, a2]);
    }

    #[test]
    fn bond_contains_returns_true_for_both_atoms() {
        let a1 = dummy_atom_id(10);
        let a2 = dummy_atom_id(20);
        let bond = Bond::new(a1, a2);
        assert!(bond.contains(a1));
        assert!(bond.contains(a2));
        assert!(!bond.contains(dummy_atom_id(30)));
    }

    #[test]
    fn partner_returns_the_other_member() {
        let a1 = dummy_atom_id(1);
        let a2 = dummy_atom_id(2);
        let bond = Bond::new(a1, a2);
        assert_eq!(bond.partner(a1), Some(a2));
        assert_eq!(bond.partner(a2), Some(a1));
        assert_eq!(bond.partner(dummy_atom_id(3)), None);
    }

    #[test]
    fn reversed_members_are_the_same_bond() {
        let a1 = dummy_atom_id(100);
        let a2 = dummy_atom_id(200);
        assert_eq!(Bond::new(a1, a2), Bond::new(a2, a1));

        let set: HashSet<Bond> = [Bond::new(a1, a2), Bond::new(a2, a1)].into_iter().collect();
        assert_eq!(set.len(), 1);
    }
}
