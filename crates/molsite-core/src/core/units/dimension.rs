use std::fmt;

/// The physical dimension a unit measures.
///
/// Two units can be converted into one another if and only if they measure the same
/// dimension. Amount of substance counts as a plain number, so `g/mol` measures
/// [`Dimension::Mass`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Dimensionless,
    Charge,
    Mass,
    Length,
    Time,
    Temperature,
    MolarEnergy,
}

impl Dimension {
    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Dimensionless => "dimensionless",
            Dimension::Charge => "electric charge",
            Dimension::Mass => "mass",
            Dimension::Length => "length",
            Dimension::Time => "time",
            Dimension::Temperature => "temperature",
            Dimension::MolarEnergy => "molar energy",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charge_and_mass_are_distinct() {
        assert_ne!(Dimension::Charge, Dimension::Mass);
        assert_ne!(Dimension::Charge, Dimension::Length);
    }

    #[test]
    fn display_names_the_dimension() {
        assert_eq!(Dimension::Mass.to_string(), "(mass)");
        assert_eq!(Dimension::Charge.to_string(), "(electric charge)");
        assert_eq!(Dimension::Dimensionless.to_string(), "(dimensionless)");
    }
}
