use super::error::AtomError;
use super::validation::{CHARGE_RULE, MASS_RULE, Magnitude};
use crate::core::units::Quantity;
use std::cell::RefCell;
use std::rc::Rc;

/// Handle through which many atoms share one atom type.
///
/// Changes made through any handle are seen by every atom holding it.
pub type SharedAtomType = Rc<RefCell<AtomType>>;

/// A reusable set of default properties for atoms, typically one entry of a forcefield.
///
/// Charge and mass obey the same unit rules as the instance-level values of an
/// [`Atom`](super::atom::Atom).
#[derive(Debug, Clone, PartialEq)]
pub struct AtomType {
    name: String,
    charge: Option<Quantity>,
    mass: Option<Quantity>,
    definition: Option<String>,
    description: Option<String>,
}

impl AtomType {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            charge: None,
            mass: None,
            definition: None,
            description: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn charge(&self) -> Option<Quantity> {
        self.charge
    }

    pub fn mass(&self) -> Option<Quantity> {
        self.mass
    }

    /// SMARTS-like pattern describing the chemical context of this type.
    pub fn definition(&self) -> Option<&str> {
        self.definition.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn with_charge(mut self, charge: impl Into<Magnitude>) -> Result<Self, AtomError> {
        self.set_charge(charge)?;
        Ok(self)
    }

    pub fn with_mass(mut self, mass: impl Into<Magnitude>) -> Result<Self, AtomError> {
        self.set_mass(mass)?;
        Ok(self)
    }

    pub fn with_definition(mut self, definition: &str) -> Self {
        self.definition = Some(definition.to_string());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn set_charge(&mut self, charge: impl Into<Magnitude>) -> Result<(), AtomError> {
        self.charge = Some(CHARGE_RULE.coerce(charge.into())?);
        Ok(())
    }

    pub fn set_mass(&mut self, mass: impl Into<Magnitude>) -> Result<(), AtomError> {
        self.mass = Some(MASS_RULE.coerce(mass.into())?);
        Ok(())
    }

    pub fn clear_charge(&mut self) {
        self.charge = None;
    }

    pub fn clear_mass(&mut self) {
        self.mass = None;
    }

    pub fn into_shared(self) -> SharedAtomType {
        Rc::new(RefCell::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::units::{ELEMENTARY_CHARGE, GRAM_PER_MOLE, KILOGRAM, NANOMETER};

    #[test]
    fn new_atom_type_has_no_properties() {
        let t = AtomType::new("opls_135");
        assert_eq!(t.name(), "opls_135");
        assert!(t.charge().is_none());
        assert!(t.mass().is_none());
        assert!(t.definition().is_none());
        assert!(t.description().is_none());
    }

    #[test]
    fn builder_methods_set_validated_properties() {
        let t = AtomType::new("CT")
            .with_charge(-0.18)
            .unwrap()
            .with_mass(Quantity::new(12.011, &GRAM_PER_MOLE))
            .unwrap()
            .with_definition("[C;X4]")
            .with_description("alkane carbon");

        assert_eq!(t.charge(), Some(Quantity::new(-0.18, &ELEMENTARY_CHARGE)));
        assert_eq!(t.mass(), Some(Quantity::new(12.011, &GRAM_PER_MOLE)));
        assert_eq!(t.definition(), Some("[C;X4]"));
        assert_eq!(t.description(), Some("alkane carbon"));
    }

    #[test]
    fn invalid_dimensions_are_rejected_and_previous_value_kept() {
        let mut t = AtomType::new("HC").with_mass(1.008).unwrap();
        assert!(t.set_mass(Quantity::new(1.0, &NANOMETER)).is_err());
        assert_eq!(t.mass(), Some(Quantity::new(1.008, &GRAM_PER_MOLE)));

        t.set_mass(Quantity::new(1.0, &KILOGRAM)).unwrap();
        assert_eq!(t.mass().unwrap().unit(), &KILOGRAM);

        t.clear_mass();
        assert!(t.mass().is_none());
    }

    #[test]
    fn shared_handles_observe_mutation() {
        let shared = AtomType::new("OW").with_charge(-0.834).unwrap().into_shared();
        let other = Rc::clone(&shared);
        shared.borrow_mut().set_charge(-0.8476).unwrap();
        assert_eq!(other.borrow().charge().unwrap().value(), -0.8476);
    }
}
