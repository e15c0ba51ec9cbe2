use super::error::AtomError;
use crate::core::units::{Dimension, ELEMENTARY_CHARGE, GRAM_PER_MOLE, Quantity, Unit};
use tracing::warn;

/// Unit assumed for charges supplied as bare numbers.
pub static CANONICAL_CHARGE_UNIT: &Unit = &ELEMENTARY_CHARGE;
/// Unit assumed for masses supplied as bare numbers.
pub static CANONICAL_MASS_UNIT: &Unit = &GRAM_PER_MOLE;

/// A charge or mass as handed in by a caller, with or without an explicit unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Magnitude {
    /// A plain number; interpreted in the canonical unit of the attribute.
    Bare(f64),
    /// A value carrying an explicit unit.
    Quantity(Quantity),
}

impl From<f64> for Magnitude {
    fn from(value: f64) -> Self {
        Magnitude::Bare(value)
    }
}

impl From<Quantity> for Magnitude {
    fn from(quantity: Quantity) -> Self {
        Magnitude::Quantity(quantity)
    }
}

/// Describes the physical constraints on a unit-bearing attribute.
#[derive(Debug, Clone, Copy)]
pub struct UnitRule {
    pub field: &'static str,
    pub dimension: Dimension,
    pub canonical_unit: &'static Unit,
}

pub static CHARGE_RULE: UnitRule = UnitRule {
    field: "charge",
    dimension: Dimension::Charge,
    canonical_unit: CANONICAL_CHARGE_UNIT,
};

pub static MASS_RULE: UnitRule = UnitRule {
    field: "mass",
    dimension: Dimension::Mass,
    canonical_unit: CANONICAL_MASS_UNIT,
};

impl UnitRule {
    /// Validates `value` against this rule.
    ///
    /// Bare numbers are tagged with the canonical unit and a warning is logged. Values
    /// with an explicit unit are accepted unchanged when the dimension matches; they are
    /// never converted to the canonical unit.
    ///
    /// # Errors
    ///
    /// Returns [`AtomError::DimensionMismatch`] if the explicit unit has the wrong dimension.
    pub fn coerce(&self, value: Magnitude) -> Result<Quantity, AtomError> {
        match value {
            Magnitude::Bare(v) => {
                warn!(
                    "Value {} for {} was provided without units; assuming {} ({})",
                    v,
                    self.field,
                    self.canonical_unit.name(),
                    self.canonical_unit.symbol()
                );
                Ok(Quantity::new(v, self.canonical_unit))
            }
            Magnitude::Quantity(q) if q.dimension() == self.dimension => Ok(q),
            Magnitude::Quantity(q) => Err(AtomError::DimensionMismatch {
                field: self.field,
                unit: q.unit().symbol(),
                expected: self.dimension,
                found: q.dimension(),
            }),
        }
    }

    /// Like [`UnitRule::coerce`], but `None` is accepted and clears the value.
    pub fn coerce_optional(&self, value: Option<Magnitude>) -> Result<Option<Quantity>, AtomError> {
        value.map(|v| self.coerce(v)).transpose()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    /// Collects everything written by a `fmt` subscriber into a shared buffer.
    #[derive(Clone, Default)]
    pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        pub fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    /// Runs `f` with a thread-local subscriber and returns its result and the log output.
    pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();
        let result = tracing::subscriber::with_default(subscriber, f);
        (result, logs.contents())
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::capture_logs;
    use super::*;
    use crate::core::units::{COULOMB, DALTON, NANOMETER};

    #[test]
    fn bare_charge_is_tagged_with_elementary_charge_and_warns() {
        let (result, logs) = capture_logs(|| CHARGE_RULE.coerce(Magnitude::Bare(1.0)));
        assert_eq!(result.unwrap(), Quantity::new(1.0, &ELEMENTARY_CHARGE));
        assert!(logs.contains("WARN"));
        assert!(logs.contains("without units"));
        assert!(logs.contains("elementary charge"));
    }

    #[test]
    fn bare_mass_is_tagged_with_gram_per_mole() {
        let (result, logs) = capture_logs(|| MASS_RULE.coerce(12.0.into()));
        assert_eq!(result.unwrap(), Quantity::new(12.0, &GRAM_PER_MOLE));
        assert!(logs.contains("g/mol"));
    }

    #[test]
    fn compatible_units_are_kept_unconverted_without_warning() {
        let (result, logs) =
            capture_logs(|| CHARGE_RULE.coerce(Quantity::new(2.0, &COULOMB).into()));
        let q = result.unwrap();
        assert_eq!(q.value(), 2.0);
        assert_eq!(q.unit(), &COULOMB);
        assert!(!logs.contains("without units"));

        let mass = MASS_RULE.coerce(Quantity::new(1.008, &DALTON).into()).unwrap();
        assert_eq!(mass.unit(), &DALTON);
    }

    #[test]
    fn incompatible_units_are_rejected() {
        let err = CHARGE_RULE
            .coerce(Quantity::new(1.0, &NANOMETER).into())
            .unwrap_err();
        assert_eq!(
            err,
            AtomError::DimensionMismatch {
                field: "charge",
                unit: "nm",
                expected: Dimension::Charge,
                found: Dimension::Length,
            }
        );
        assert!(
            MASS_RULE
                .coerce(Quantity::new(1.0, &COULOMB).into())
                .is_err()
        );
    }

    #[test]
    fn rules_tag_bare_numbers_with_the_canonical_units() {
        assert_eq!(CHARGE_RULE.canonical_unit, CANONICAL_CHARGE_UNIT);
        assert_eq!(MASS_RULE.canonical_unit, CANONICAL_MASS_UNIT);
        let mass = MASS_RULE.coerce(Magnitude::Bare(4.0)).unwrap();
        assert_eq!(mass.unit(), CANONICAL_MASS_UNIT);
    }

    #[test]
    fn none_clears_without_validation() {
        assert_eq!(CHARGE_RULE.coerce_optional(None), Ok(None));
        assert!(MASS_RULE.coerce_optional(Some(1.0.into())).unwrap().is_some());
    }
}
