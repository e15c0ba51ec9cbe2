use super::atom_type::SharedAtomType;
use super::element::Element;
use super::error::AtomError;
use super::schema::{Field, FieldValue};
use super::validation::{CHARGE_RULE, MASS_RULE, Magnitude};
use crate::core::units::Quantity;
use nalgebra::Point3;
use std::any::{Any, type_name};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// An atom site in a molecular topology.
///
/// Besides its identity (name and position), an atom holds optional instance-level
/// charge and mass, an optional [`Element`] and an optional shared atom type. Charge
/// and mass are resolved on every read:
///
/// 1. the instance-level value, if set;
/// 2. otherwise the value of the attached atom type, if any;
/// 3. otherwise `None`.
///
/// Every write of charge or mass is checked against the physical dimension of the
/// attribute before it is stored, so an atom never holds a value of the wrong
/// dimension.
///
/// Atoms are totally ordered by a hash of their identity (name and position) taken
/// at construction. Charge, mass, element and atom type do not take part in
/// comparisons, equality or hashing.
#[derive(Debug, Clone)]
pub struct Atom {
    name: String,
    position: Point3<f64>,
    charge: Option<Quantity>,
    mass: Option<Quantity>,
    element: Option<Element>,
    atom_type: Option<SharedAtomType>,
    identity: u64,
}

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a over the name bytes, a `0xff` terminator and the little-endian bit patterns
/// of the coordinates. The result is fixed for a given name and position.
fn identity_hash(name: &str, position: &Point3<f64>) -> u64 {
    name.bytes()
        .chain(std::iter::once(0xff))
        .chain(position.iter().flat_map(|c| c.to_bits().to_le_bytes()))
        .fold(FNV_OFFSET_BASIS, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
        })
}

impl Atom {
    /// Creates an atom with no charge, mass, element or atom type.
    pub fn new(name: &str, position: Point3<f64>) -> Self {
        Self {
            name: name.to_string(),
            position,
            charge: None,
            mass: None,
            element: None,
            atom_type: None,
            identity: identity_hash(name, &position),
        }
    }

    pub fn builder(name: &str) -> AtomBuilder {
        AtomBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> &Point3<f64> {
        &self.position
    }

    /// The resolved charge: instance value first, then the atom type's charge.
    ///
    /// # Panics
    ///
    /// Panics if the attached atom type is mutably borrowed elsewhere at the time of
    /// the call.
    pub fn charge(&self) -> Option<Quantity> {
        match (self.charge, &self.atom_type) {
            (Some(charge), _) => Some(charge),
            (None, Some(atom_type)) => atom_type.borrow().charge(),
            (None, None) => None,
        }
    }

    /// The resolved mass: instance value first, then the atom type's mass.
    ///
    /// # Panics
    ///
    /// Panics if the attached atom type is mutably borrowed elsewhere at the time of
    /// the call.
    pub fn mass(&self) -> Option<Quantity> {
        match (self.mass, &self.atom_type) {
            (Some(mass), _) => Some(mass),
            (None, Some(atom_type)) => atom_type.borrow().mass(),
            (None, None) => None,
        }
    }

    /// The instance-level charge, ignoring the atom type.
    pub fn local_charge(&self) -> Option<Quantity> {
        self.charge
    }

    /// The instance-level mass, ignoring the atom type.
    pub fn local_mass(&self) -> Option<Quantity> {
        self.mass
    }

    pub fn element(&self) -> Option<&Element> {
        self.element.as_ref()
    }

    pub fn atom_type(&self) -> Option<&SharedAtomType> {
        self.atom_type.as_ref()
    }

    /// Sets the instance-level charge.
    ///
    /// A bare number is taken to be in elementary charges (a warning is logged). A
    /// quantity must have the dimension of electric charge and is stored as given.
    ///
    /// # Errors
    ///
    /// Returns [`AtomError::DimensionMismatch`] for a quantity of another dimension; the
    /// previous charge is kept in that case.
    pub fn set_charge(&mut self, charge: impl Into<Magnitude>) -> Result<(), AtomError> {
        self.charge = Some(CHARGE_RULE.coerce(charge.into())?);
        Ok(())
    }

    /// Sets the instance-level mass.
    ///
    /// A bare number is taken to be in g/mol (a warning is logged). A quantity must
    /// have the dimension of mass and is stored as given.
    ///
    /// # Errors
    ///
    /// Returns [`AtomError::DimensionMismatch`] for a quantity of another dimension; the
    /// previous mass is kept in that case.
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

    pub fn set_element(&mut self, element: Option<Element>) {
        self.element = element;
    }

    pub fn set_atom_type(&mut self, atom_type: Option<SharedAtomType>) {
        self.atom_type = atom_type;
    }

    /// Assigns a field by its public or storage name.
    ///
    /// [`FieldValue::Null`] clears the field.
    ///
    /// # Errors
    ///
    /// - [`AtomError::SchemaViolation`] if `name` is not an atom field.
    /// - [`AtomError::TypeMismatch`] if the value kind does not fit the field.
    /// - [`AtomError::DimensionMismatch`] if a charge or mass has the wrong dimension.
    ///
    /// The atom is left unchanged on error.
    pub fn set_field(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<(), AtomError> {
        let value = value.into();
        match Field::from_name(name)? {
            Field::Charge => self.charge = CHARGE_RULE.coerce_optional(value.into_magnitude()?)?,
            Field::Mass => self.mass = MASS_RULE.coerce_optional(value.into_magnitude()?)?,
            Field::Element => self.element = value.into_element()?,
            Field::AtomType => self.atom_type = value.into_atom_type()?,
        }
        Ok(())
    }

    /// The hash of the atom's identity that defines its ordering.
    pub fn identity_hash(&self) -> u64 {
        self.identity
    }

    /// Compares with an arbitrary value, failing unless it is an [`Atom`].
    pub fn try_cmp<T: Any>(&self, other: &T) -> Result<Ordering, AtomError> {
        match (other as &dyn Any).downcast_ref::<Atom>() {
            Some(atom) => Ok(self.cmp(atom)),
            None => Err(AtomError::TypeMismatch {
                expected: "Atom",
                found: type_name::<T>().to_string(),
            }),
        }
    }

    pub fn try_lt<T: Any>(&self, other: &T) -> Result<bool, AtomError> {
        self.try_cmp(other).map(Ordering::is_lt)
    }

    pub fn try_le<T: Any>(&self, other: &T) -> Result<bool, AtomError> {
        self.try_cmp(other).map(Ordering::is_le)
    }
}

impl PartialEq for Atom {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
    }
}

impl Eq for Atom {}

impl Hash for Atom {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.identity);
    }
}

impl PartialOrd for Atom {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Atom {
    fn cmp(&self, other: &Self) -> Ordering {
        self.identity.cmp(&other.identity)
    }
}

/// Step-by-step construction of an [`Atom`].
///
/// Nothing is validated until [`AtomBuilder::build`], which either returns a fully
/// validated atom or an error and no atom.
#[derive(Debug, Clone, Default)]
pub struct AtomBuilder {
    name: String,
    position: Option<Point3<f64>>,
    charge: Option<Magnitude>,
    mass: Option<Magnitude>,
    element: Option<Element>,
    atom_type: Option<SharedAtomType>,
}

impl AtomBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn position(mut self, position: Point3<f64>) -> Self {
        self.position = Some(position);
        self
    }
    pub fn charge(mut self, charge: impl Into<Magnitude>) -> Self {
        self.charge = Some(charge.into());
        self
    }
    pub fn mass(mut self, mass: impl Into<Magnitude>) -> Self {
        self.mass = Some(mass.into());
        self
    }
    pub fn element(mut self, element: Element) -> Self {
        self.element = Some(element);
        self
    }
    pub fn atom_type(mut self, atom_type: SharedAtomType) -> Self {
        self.atom_type = Some(atom_type);
        self
    }

    /// Sets a field by name, as used at dynamic boundaries such as deserialization.
    ///
    /// # Errors
    ///
    /// [`AtomError::SchemaViolation`] for unknown names and [`AtomError::TypeMismatch`]
    /// for values of the wrong kind. Units are only checked by [`AtomBuilder::build`].
    pub fn field(mut self, name: &str, value: impl Into<FieldValue>) -> Result<Self, AtomError> {
        let value = value.into();
        match Field::from_name(name)? {
            Field::Charge => self.charge = value.into_magnitude()?,
            Field::Mass => self.mass = value.into_magnitude()?,
            Field::Element => self.element = value.into_element()?,
            Field::AtomType => self.atom_type = value.into_atom_type()?,
        }
        Ok(self)
    }

    pub fn build(self) -> Result<Atom, AtomError> {
        let charge = CHARGE_RULE.coerce_optional(self.charge)?;
        let mass = MASS_RULE.coerce_optional(self.mass)?;

        let mut atom = Atom::new(&self.name, self.position.unwrap_or_else(Point3::origin));
        atom.charge = charge;
        atom.mass = mass;
        atom.element = self.element;
        atom.atom_type = self.atom_type;
        Ok(atom)
    }
}
