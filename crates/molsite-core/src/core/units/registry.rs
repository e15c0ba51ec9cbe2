use super::dimension::Dimension;
use super::measure::Measure;
use phf::{Map, phf_map};
use std::fmt;
use thiserror::Error;
use uom::si::f64::{
    ElectricCharge, Length, Mass, MolarEnergy, Ratio, ThermodynamicTemperature, Time,
};
use uom::si::{
    electric_charge, length, mass, molar_energy, ratio, thermodynamic_temperature, time,
};
use kcal::kilocalorie_per_mole;

mod kcal {
    unit! {
        system: uom::si;
        quantity: uom::si::molar_energy;

        @kilocalorie_per_mole: 4.184E3; "kcal/mol", "kilocalorie per mole", "kilocalories per mole";
    }
}

/// The `uom` unit a [`Unit`] stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Scale {
    Ratio,
    ElementaryCharge,
    Coulomb,
    Dalton,
    Gram,
    Kilogram,
    Angstrom,
    Nanometer,
    Meter,
    Femtosecond,
    Picosecond,
    Second,
    Kelvin,
    KilojoulePerMole,
    KilocaloriePerMole,
}

/// A named physical unit.
///
/// A unit is a tag that remembers how a value was written. Conversion and dimension
/// checks go through the `uom` quantity the unit maps to (see [`Unit::measure`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Unit {
    symbol: &'static str,
    name: &'static str,
    scale: Scale,
}

impl Unit {
    const fn new(symbol: &'static str, name: &'static str, scale: Scale) -> Self {
        Self {
            symbol,
            name,
            scale,
        }
    }

    pub fn symbol(&self) -> &'static str {
        self.symbol
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn dimension(&self) -> Dimension {
        self.measure(1.0).dimension()
    }

    pub fn is_compatible_with(&self, other: &Unit) -> bool {
        self.dimension() == other.dimension()
    }

    /// The `uom` quantity of `value` expressed in this unit.
    pub fn measure(&self, value: f64) -> Measure {
        match self.scale {
            Scale::Ratio => Measure::Ratio(Ratio::new::<ratio::ratio>(value)),
            Scale::ElementaryCharge => Measure::Charge(ElectricCharge::new::<
                electric_charge::elementary_charge,
            >(value)),
            Scale::Coulomb => {
                Measure::Charge(ElectricCharge::new::<electric_charge::coulomb>(value))
            }
            Scale::Dalton => Measure::Mass(Mass::new::<mass::dalton>(value)),
            Scale::Gram => Measure::Mass(Mass::new::<mass::gram>(value)),
            Scale::Kilogram => Measure::Mass(Mass::new::<mass::kilogram>(value)),
            Scale::Angstrom => Measure::Length(Length::new::<length::angstrom>(value)),
            Scale::Nanometer => Measure::Length(Length::new::<length::nanometer>(value)),
            Scale::Meter => Measure::Length(Length::new::<length::meter>(value)),
            Scale::Femtosecond => Measure::Time(Time::new::<time::femtosecond>(value)),
            Scale::Picosecond => Measure::Time(Time::new::<time::picosecond>(value)),
            Scale::Second => Measure::Time(Time::new::<time::second>(value)),
            Scale::Kelvin => Measure::Temperature(ThermodynamicTemperature::new::<
                thermodynamic_temperature::kelvin,
            >(value)),
            Scale::KilojoulePerMole => Measure::MolarEnergy(MolarEnergy::new::<
                molar_energy::kilojoule_per_mole,
            >(value)),
            Scale::KilocaloriePerMole => {
                Measure::MolarEnergy(MolarEnergy::new::<kilocalorie_per_mole>(value))
            }
        }
    }

    /// Reads `measure` in this unit, or `None` if it has another dimension.
    pub fn read(&self, measure: &Measure) -> Option<f64> {
        let value = match (self.scale, measure) {
            (Scale::Ratio, Measure::Ratio(q)) => q.get::<ratio::ratio>(),
            (Scale::ElementaryCharge, Measure::Charge(q)) => {
                q.get::<electric_charge::elementary_charge>()
            }
            (Scale::Coulomb, Measure::Charge(q)) => q.get::<electric_charge::coulomb>(),
            (Scale::Dalton, Measure::Mass(q)) => q.get::<mass::dalton>(),
            (Scale::Gram, Measure::Mass(q)) => q.get::<mass::gram>(),
            (Scale::Kilogram, Measure::Mass(q)) => q.get::<mass::kilogram>(),
            (Scale::Angstrom, Measure::Length(q)) => q.get::<length::angstrom>(),
            (Scale::Nanometer, Measure::Length(q)) => q.get::<length::nanometer>(),
            (Scale::Meter, Measure::Length(q)) => q.get::<length::meter>(),
            (Scale::Femtosecond, Measure::Time(q)) => q.get::<time::femtosecond>(),
            (Scale::Picosecond, Measure::Time(q)) => q.get::<time::picosecond>(),
            (Scale::Second, Measure::Time(q)) => q.get::<time::second>(),
            (Scale::Kelvin, Measure::Temperature(q)) => {
                q.get::<thermodynamic_temperature::kelvin>()
            }
            (Scale::KilojoulePerMole, Measure::MolarEnergy(q)) => {
                q.get::<molar_energy::kilojoule_per_mole>()
            }
            (Scale::KilocaloriePerMole, Measure::MolarEnergy(q)) => {
                q.get::<kilocalorie_per_mole>()
            }
            _ => return None,
        };
        Some(value)
    }

    /// Returns the factor that converts a value in `self` into a value in `target`.
    ///
    /// # Errors
    ///
    /// Returns [`UnitError::IncompatibleDimensions`] if the two units measure different
    /// physical dimensions.
    pub fn conversion_factor(&self, target: &Unit) -> Result<f64, UnitError> {
        target
            .read(&self.measure(1.0))
            .ok_or_else(|| UnitError::incompatible(self, target))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum UnitError {
    #[error("Unknown unit symbol: '{0}'")]
    UnknownUnit(String),

    #[error("Cannot convert '{from}' {from_dimension} to '{to}' {to_dimension}")]
    IncompatibleDimensions {
        from: &'static str,
        from_dimension: Dimension,
        to: &'static str,
        to_dimension: Dimension,
    },
}

impl UnitError {
    pub(crate) fn incompatible(from: &Unit, to: &Unit) -> Self {
        UnitError::IncompatibleDimensions {
            from: from.symbol,
            from_dimension: from.dimension(),
            to: to.symbol,
            to_dimension: to.dimension(),
        }
    }
}

pub static DIMENSIONLESS: Unit = Unit::new("", "dimensionless", Scale::Ratio);

pub static ELEMENTARY_CHARGE: Unit =
    Unit::new("e", "elementary charge", Scale::ElementaryCharge);
pub static COULOMB: Unit = Unit::new("C", "coulomb", Scale::Coulomb);

/// Grams per mole, read as the mass of one particle; numerically one dalton.
pub static GRAM_PER_MOLE: Unit = Unit::new("g/mol", "gram per mole", Scale::Dalton);
pub static DALTON: Unit = Unit::new("amu", "atomic mass unit", Scale::Dalton);
pub static GRAM: Unit = Unit::new("g", "gram", Scale::Gram);
pub static KILOGRAM: Unit = Unit::new("kg", "kilogram", Scale::Kilogram);

pub static ANGSTROM: Unit = Unit::new("Å", "angstrom", Scale::Angstrom);
pub static NANOMETER: Unit = Unit::new("nm", "nanometer", Scale::Nanometer);
pub static METER: Unit = Unit::new("m", "meter", Scale::Meter);

pub static FEMTOSECOND: Unit = Unit::new("fs", "femtosecond", Scale::Femtosecond);
pub static PICOSECOND: Unit = Unit::new("ps", "picosecond", Scale::Picosecond);
pub static SECOND: Unit = Unit::new("s", "second", Scale::Second);

pub static KELVIN: Unit = Unit::new("K", "kelvin", Scale::Kelvin);

pub static KILOJOULE_PER_MOLE: Unit =
    Unit::new("kJ/mol", "kilojoule per mole", Scale::KilojoulePerMole);
pub static KILOCALORIE_PER_MOLE: Unit =
    Unit::new("kcal/mol", "kilocalorie per mole", Scale::KilocaloriePerMole);

static UNITS_BY_SYMBOL: Map<&'static str, &'static Unit> = phf_map! {
    "" => &DIMENSIONLESS,
    "dimensionless" => &DIMENSIONLESS,
    "e" => &ELEMENTARY_CHARGE,
    "elementary_charge" => &ELEMENTARY_CHARGE,
    "C" => &COULOMB,
    "coulomb" => &COULOMB,
    "g/mol" => &GRAM_PER_MOLE,
    "amu" => &DALTON,
    "Da" => &DALTON,
    "dalton" => &DALTON,
    "g" => &GRAM,
    "kg" => &KILOGRAM,
    "Å" => &ANGSTROM,
    "angstrom" => &ANGSTROM,
    "nm" => &NANOMETER,
    "m" => &METER,
    "fs" => &FEMTOSECOND,
    "ps" => &PICOSECOND,
    "s" => &SECOND,
    "K" => &KELVIN,
    "kJ/mol" => &KILOJOULE_PER_MOLE,
    "kcal/mol" => &KILOCALORIE_PER_MOLE,
};

/// Resolves a unit by its symbol or one of its aliases.
///
/// Surrounding whitespace is ignored; symbols are otherwise case-sensitive (`"C"` is
/// the coulomb, `"c"` is unknown).
pub fn lookup(symbol: &str) -> Result<&'static Unit, UnitError> {
    UNITS_BY_SYMBOL
        .get(symbol.trim())
        .copied()
        .ok_or_else(|| UnitError::UnknownUnit(symbol.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn lookup_resolves_symbols_and_aliases() {
        assert_eq!(lookup("e").unwrap(), &ELEMENTARY_CHARGE);
        assert_eq!(lookup("elementary_charge").unwrap(), &ELEMENTARY_CHARGE);
        assert_eq!(lookup("Da").unwrap(), &DALTON);
        assert_eq!(lookup(" g/mol ").unwrap(), &GRAM_PER_MOLE);
        assert_eq!(lookup("angstrom").unwrap(), &ANGSTROM);
    }

    #[test]
    fn lookup_rejects_unknown_and_wrong_case_symbols() {
        assert_eq!(
            lookup("furlong"),
            Err(UnitError::UnknownUnit("furlong".to_string()))
        );
        assert!(lookup("c").is_err());
    }

    #[test]
    fn every_registered_unit_reads_back_its_own_measure() {
        for unit in UNITS_BY_SYMBOL.values() {
            assert_relative_eq!(
                unit.read(&unit.measure(2.5)).unwrap(),
                2.5,
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn gram_per_mole_is_one_dalton() {
        let factor = GRAM_PER_MOLE.conversion_factor(&DALTON).unwrap();
        assert_relative_eq!(factor, 1.0);
        match DALTON.measure(1.0) {
            Measure::Mass(m) => {
                assert_relative_eq!(m.get::<mass::kilogram>(), 1.660_539e-27, max_relative = 1e-6)
            }
            other => panic!("unexpected measure: {other:?}"),
        }
    }

    #[test]
    fn conversion_factor_between_charge_units() {
        let factor = ELEMENTARY_CHARGE.conversion_factor(&COULOMB).unwrap();
        assert_relative_eq!(factor, 1.602_176_634e-19, max_relative = 1e-9);
    }

    #[test]
    fn conversion_factor_fails_across_dimensions() {
        let err = COULOMB.conversion_factor(&NANOMETER).unwrap_err();
        assert_eq!(
            err,
            UnitError::IncompatibleDimensions {
                from: "C",
                from_dimension: Dimension::Charge,
                to: "nm",
                to_dimension: Dimension::Length,
            }
        );
    }

    #[test]
    fn dimension_comes_from_the_measure() {
        assert_eq!(ELEMENTARY_CHARGE.dimension(), Dimension::Charge);
        assert_eq!(GRAM_PER_MOLE.dimension(), Dimension::Mass);
        assert_eq!(DIMENSIONLESS.dimension(), Dimension::Dimensionless);
        assert!(GRAM.is_compatible_with(&KILOGRAM));
        assert!(!GRAM.is_compatible_with(&COULOMB));
    }

    #[test]
    fn molar_energy_units_share_a_dimension() {
        assert!(KILOJOULE_PER_MOLE.is_compatible_with(&KILOCALORIE_PER_MOLE));
        let factor = KILOCALORIE_PER_MOLE
            .conversion_factor(&KILOJOULE_PER_MOLE)
            .unwrap();
        assert_relative_eq!(factor, 4.184, max_relative = 1e-12);
    }
}
