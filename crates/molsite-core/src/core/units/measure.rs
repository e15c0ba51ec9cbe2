use super::dimension::Dimension;
use uom::si::f64::{
    ElectricCharge, Length, Mass, MolarEnergy, Ratio, ThermodynamicTemperature, Time,
};

/// A physical value held as a `uom` quantity, independent of any display unit.
///
/// This is the form in which values of different units are compared and converted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measure {
    Ratio(Ratio),
    Charge(ElectricCharge),
    Mass(Mass),
    Length(Length),
    Time(Time),
    Temperature(ThermodynamicTemperature),
    MolarEnergy(MolarEnergy),
}

impl Measure {
    pub fn dimension(&self) -> Dimension {
        match self {
            Measure::Ratio(_) => Dimension::Dimensionless,
            Measure::Charge(_) => Dimension::Charge,
            Measure::Mass(_) => Dimension::Mass,
            Measure::Length(_) => Dimension::Length,
            Measure::Time(_) => Dimension::Time,
            Measure::Temperature(_) => Dimension::Temperature,
            Measure::MolarEnergy(_) => Dimension::MolarEnergy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uom::si::{electric_charge::coulomb, mass::dalton};

    #[test]
    fn dimension_follows_the_quantity_kind() {
        assert_eq!(
            Measure::Charge(ElectricCharge::new::<coulomb>(1.0)).dimension(),
            Dimension::Charge
        );
        assert_eq!(
            Measure::Mass(Mass::new::<dalton>(1.0)).dimension(),
            Dimension::Mass
        );
    }
}
