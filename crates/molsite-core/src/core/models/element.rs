use super::atom_type::AtomType;
use crate::core::units::{DALTON, Dimension, Quantity};
use phf::{Map, phf_map};
use std::fmt;
use std::hash::{Hash, Hasher};
use tracing::debug;

/// An immutable periodic-table record.
///
/// Elements are plain values: two records are equal when name, symbol, atomic number
/// and mass all agree. The built-in table covers hydrogen through oganesson and is
/// reached through the `element_by_*` lookups.
#[derive(Debug, Clone, Copy)]
pub struct Element {
    name: &'static str,
    symbol: &'static str,
    atomic_number: u8,
    mass: Quantity,
}

impl Element {
    pub const fn new(
        name: &'static str,
        symbol: &'static str,
        atomic_number: u8,
        mass: Quantity,
    ) -> Self {
        Self {
            name,
            symbol,
            atomic_number,
            mass,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn symbol(&self) -> &'static str {
        self.symbol
    }

    pub fn atomic_number(&self) -> u8 {
        self.atomic_number
    }

    pub fn mass(&self) -> Quantity {
        self.mass
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.symbol == other.symbol
            && self.atomic_number == other.atomic_number
            && self.mass.value().to_bits() == other.mass.value().to_bits()
            && self.mass.unit() == other.mass.unit()
    }
}

impl Eq for Element {}

impl Hash for Element {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.symbol.hash(state);
        self.atomic_number.hash(state);
        self.mass.value().to_bits().hash(state);
        self.mass.unit().hash(state);
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mass = self.mass.to(&DALTON).unwrap_or(self.mass);
        write!(
            f,
            "<Element: {}, symbol: {}, atomic number: {}, mass: {}>",
            self.name, self.symbol, self.atomic_number, mass
        )
    }
}

static PERIODIC_TABLE: [Element; 118] = [
    Element::new("hydrogen", "H", 1, Quantity::new(1.008, &DALTON)),
    Element::new("helium", "He", 2, Quantity::new(4.0026, &DALTON)),
    Element::new("lithium", "Li", 3, Quantity::new(6.94, &DALTON)),
    Element::new("beryllium", "Be", 4, Quantity::new(9.0122, &DALTON)),
    Element::new("boron", "B", 5, Quantity::new(10.81, &DALTON)),
    Element::new("carbon", "C", 6, Quantity::new(12.011, &DALTON)),
    Element::new("nitrogen", "N", 7, Quantity::new(14.007, &DALTON)),
    Element::new("oxygen", "O", 8, Quantity::new(15.999, &DALTON)),
    Element::new("fluorine", "F", 9, Quantity::new(18.998, &DALTON)),
    Element::new("neon", "Ne", 10, Quantity::new(20.180, &DALTON)),
    Element::new("sodium", "Na", 11, Quantity::new(22.990, &DALTON)),
    Element::new("magnesium", "Mg", 12, Quantity::new(24.305, &DALTON)),
    Element::new("aluminum", "Al", 13, Quantity::new(26.982, &DALTON)),
    Element::new("silicon", "Si", 14, Quantity::new(28.085, &DALTON)),
    Element::new("phosphorus", "P", 15, Quantity::new(30.974, &DALTON)),
    Element::new("sulfur", "S", 16, Quantity::new(32.06, &DALTON)),
    Element::new("chlorine", "Cl", 17, Quantity::new(35.45, &DALTON)),
    Element::new("argon", "Ar", 18, Quantity::new(39.948, &DALTON)),
    Element::new("potassium", "K", 19, Quantity::new(39.098, &DALTON)),
    Element::new("calcium", "Ca", 20, Quantity::new(40.078, &DALTON)),
    Element::new("scandium", "Sc", 21, Quantity::new(44.956, &DALTON)),
    Element::new("titanium", "Ti", 22, Quantity::new(47.867, &DALTON)),
    Element::new("vanadium", "V", 23, Quantity::new(50.942, &DALTON)),
    Element::new("chromium", "Cr", 24, Quantity::new(51.996, &DALTON)),
    Element::new("manganese", "Mn", 25, Quantity::new(54.938, &DALTON)),
    Element::new("iron", "Fe", 26, Quantity::new(55.845, &DALTON)),
    Element::new("cobalt", "Co", 27, Quantity::new(58.933, &DALTON)),
    Element::new("nickel", "Ni", 28, Quantity::new(58.693, &DALTON)),
    Element::new("copper", "Cu", 29, Quantity::new(63.546, &DALTON)),
    Element::new("zinc", "Zn", 30, Quantity::new(65.38, &DALTON)),
    Element::new("gallium", "Ga", 31, Quantity::new(69.723, &DALTON)),
    Element::new("germanium", "Ge", 32, Quantity::new(72.630, &DALTON)),
    Element::new("arsenic", "As", 33, Quantity::new(74.922, &DALTON)),
    Element::new("selenium", "Se", 34, Quantity::new(78.971, &DALTON)),
    Element::new("bromine", "Br", 35, Quantity::new(79.904, &DALTON)),
    Element::new("krypton", "Kr", 36, Quantity::new(83.798, &DALTON)),
    Element::new("rubidium", "Rb", 37, Quantity::new(85.468, &DALTON)),
    Element::new("strontium", "Sr", 38, Quantity::new(87.62, &DALTON)),
    Element::new("yttrium", "Y", 39, Quantity::new(88.906, &DALTON)),
    Element::new("zirconium", "Zr", 40, Quantity::new(91.224, &DALTON)),
    Element::new("niobium", "Nb", 41, Quantity::new(92.906, &DALTON)),
    Element::new("molybdenum", "Mo", 42, Quantity::new(95.95, &DALTON)),
    Element::new("technetium", "Tc", 43, Quantity::new(98.0, &DALTON)),
    Element::new("ruthenium", "Ru", 44, Quantity::new(101.07, &DALTON)),
    Element::new("rhodium", "Rh", 45, Quantity::new(102.91, &DALTON)),
    Element::new("palladium", "Pd", 46, Quantity::new(106.42, &DALTON)),
    Element::new("silver", "Ag", 47, Quantity::new(107.87, &DALTON)),
    Element::new("cadmium", "Cd", 48, Quantity::new(112.41, &DALTON)),
    Element::new("indium", "In", 49, Quantity::new(114.82, &DALTON)),
    Element::new("tin", "Sn", 50, Quantity::new(118.71, &DALTON)),
    Element::new("antimony", "Sb", 51, Quantity::new(121.76, &DALTON)),
    Element::new("tellurium", "Te", 52, Quantity::new(127.60, &DALTON)),
    Element::new("iodine", "I", 53, Quantity::new(126.90, &DALTON)),
    Element::new("xenon", "Xe", 54, Quantity::new(131.29, &DALTON)),
    Element::new("cesium", "Cs", 55, Quantity::new(132.91, &DALTON)),
    Element::new("barium", "Ba", 56, Quantity::new(137.33, &DALTON)),
    Element::new("lanthanum", "La", 57, Quantity::new(138.91, &DALTON)),
    Element::new("cerium", "Ce", 58, Quantity::new(140.12, &DALTON)),
    Element::new("praseodymium", "Pr", 59, Quantity::new(140.91, &DALTON)),
    Element::new("neodymium", "Nd", 60, Quantity::new(144.24, &DALTON)),
    Element::new("promethium", "Pm", 61, Quantity::new(145.0, &DALTON)),
    Element::new("samarium", "Sm", 62, Quantity::new(150.36, &DALTON)),
    Element::new("europium", "Eu", 63, Quantity::new(151.96, &DALTON)),
    Element::new("gadolinium", "Gd", 64, Quantity::new(157.25, &DALTON)),
    Element::new("terbium", "Tb", 65, Quantity::new(158.93, &DALTON)),
    Element::new("dysprosium", "Dy", 66, Quantity::new(162.50, &DALTON)),
    Element::new("holmium", "Ho", 67, Quantity::new(164.93, &DALTON)),
    Element::new("erbium", "Er", 68, Quantity::new(167.26, &DALTON)),
    Element::new("thulium", "Tm", 69, Quantity::new(168.93, &DALTON)),
    Element::new("ytterbium", "Yb", 70, Quantity::new(173.05, &DALTON)),
    Element::new("lutetium", "Lu", 71, Quantity::new(174.97, &DALTON)),
    Element::new("hafnium", "Hf", 72, Quantity::new(178.49, &DALTON)),
    Element::new("tantalum", "Ta", 73, Quantity::new(180.95, &DALTON)),
    Element::new("tungsten", "W", 74, Quantity::new(183.84, &DALTON)),
    Element::new("rhenium", "Re", 75, Quantity::new(186.21, &DALTON)),
    Element::new("osmium", "Os", 76, Quantity::new(190.23, &DALTON)),
    Element::new("iridium", "Ir", 77, Quantity::new(192.22, &DALTON)),
    Element::new("platinum", "Pt", 78, Quantity::new(195.08, &DALTON)),
    Element::new("gold", "Au", 79, Quantity::new(196.97, &DALTON)),
    Element::new("mercury", "Hg", 80, Quantity::new(200.59, &DALTON)),
    Element::new("thallium", "Tl", 81, Quantity::new(204.38, &DALTON)),
    Element::new("lead", "Pb", 82, Quantity::new(207.2, &DALTON)),
    Element::new("bismuth", "Bi", 83, Quantity::new(208.98, &DALTON)),
    Element::new("polonium", "Po", 84, Quantity::new(209.0, &DALTON)),
    Element::new("astatine", "At", 85, Quantity::new(210.0, &DALTON)),
    Element::new("radon", "Rn", 86, Quantity::new(222.0, &DALTON)),
    Element::new("francium", "Fr", 87, Quantity::new(223.0, &DALTON)),
    Element::new("radium", "Ra", 88, Quantity::new(226.0, &DALTON)),
    Element::new("actinium", "Ac", 89, Quantity::new(227.0, &DALTON)),
    Element::new("thorium", "Th", 90, Quantity::new(232.04, &DALTON)),
    Element::new("protactinium", "Pa", 91, Quantity::new(231.04, &DALTON)),
    Element::new("uranium", "U", 92, Quantity::new(238.03, &DALTON)),
    Element::new("neptunium", "Np", 93, Quantity::new(237.0, &DALTON)),
    Element::new("plutonium", "Pu", 94, Quantity::new(244.0, &DALTON)),
    Element::new("americium", "Am", 95, Quantity::new(243.0, &DALTON)),
    Element::new("curium", "Cm", 96, Quantity::new(247.0, &DALTON)),
    Element::new("berkelium", "Bk", 97, Quantity::new(247.0, &DALTON)),
    Element::new("californium", "Cf", 98, Quantity::new(251.0, &DALTON)),
    Element::new("einsteinium", "Es", 99, Quantity::new(252.0, &DALTON)),
    Element::new("fermium", "Fm", 100, Quantity::new(257.0, &DALTON)),
    Element::new("mendelevium", "Md", 101, Quantity::new(258.0, &DALTON)),
    Element::new("nobelium", "No", 102, Quantity::new(259.0, &DALTON)),
    Element::new("lawrencium", "Lr", 103, Quantity::new(266.0, &DALTON)),
    Element::new("rutherfordium", "Rf", 104, Quantity::new(267.0, &DALTON)),
    Element::new("dubnium", "Db", 105, Quantity::new(268.0, &DALTON)),
    Element::new("seaborgium", "Sg", 106, Quantity::new(269.0, &DALTON)),
    Element::new("bohrium", "Bh", 107, Quantity::new(270.0, &DALTON)),
    Element::new("hassium", "Hs", 108, Quantity::new(277.0, &DALTON)),
    Element::new("meitnerium", "Mt", 109, Quantity::new(278.0, &DALTON)),
    Element::new("darmstadtium", "Ds", 110, Quantity::new(281.0, &DALTON)),
    Element::new("roentgenium", "Rg", 111, Quantity::new(282.0, &DALTON)),
    Element::new("copernicium", "Cn", 112, Quantity::new(285.0, &DALTON)),
    Element::new("nihonium", "Nh", 113, Quantity::new(286.0, &DALTON)),
    Element::new("flerovium", "Fl", 114, Quantity::new(289.0, &DALTON)),
    Element::new("moscovium", "Mc", 115, Quantity::new(290.0, &DALTON)),
    Element::new("livermorium", "Lv", 116, Quantity::new(293.0, &DALTON)),
    Element::new("tennessine", "Ts", 117, Quantity::new(294.0, &DALTON)),
    Element::new("oganesson", "Og", 118, Quantity::new(294.0, &DALTON)),
];

static ATOMIC_NUMBERS_BY_SYMBOL: Map<&'static str, u8> = phf_map! {
    "H" => 1, "He" => 2, "Li" => 3, "Be" => 4, "B" => 5, "C" => 6, "N" => 7, "O" => 8,
    "F" => 9, "Ne" => 10, "Na" => 11, "Mg" => 12, "Al" => 13, "Si" => 14, "P" => 15,
    "S" => 16, "Cl" => 17, "Ar" => 18, "K" => 19, "Ca" => 20, "Sc" => 21, "Ti" => 22,
    "V" => 23, "Cr" => 24, "Mn" => 25, "Fe" => 26, "Co" => 27, "Ni" => 28, "Cu" => 29,
    "Zn" => 30, "Ga" => 31, "Ge" => 32, "As" => 33, "Se" => 34, "Br" => 35, "Kr" => 36,
    "Rb" => 37, "Sr" => 38, "Y" => 39, "Zr" => 40, "Nb" => 41, "Mo" => 42, "Tc" => 43,
    "Ru" => 44, "Rh" => 45, "Pd" => 46, "Ag" => 47, "Cd" => 48, "In" => 49, "Sn" => 50,
    "Sb" => 51, "Te" => 52, "I" => 53, "Xe" => 54, "Cs" => 55, "Ba" => 56, "La" => 57,
    "Ce" => 58, "Pr" => 59, "Nd" => 60, "Pm" => 61, "Sm" => 62, "Eu" => 63, "Gd" => 64,
    "Tb" => 65, "Dy" => 66, "Ho" => 67, "Er" => 68, "Tm" => 69, "Yb" => 70, "Lu" => 71,
    "Hf" => 72, "Ta" => 73, "W" => 74, "Re" => 75, "Os" => 76, "Ir" => 77, "Pt" => 78,
    "Au" => 79, "Hg" => 80, "Tl" => 81, "Pb" => 82, "Bi" => 83, "Po" => 84, "At" => 85,
    "Rn" => 86, "Fr" => 87, "Ra" => 88, "Ac" => 89, "Th" => 90, "Pa" => 91, "U" => 92,
    "Np" => 93, "Pu" => 94, "Am" => 95, "Cm" => 96, "Bk" => 97, "Cf" => 98, "Es" => 99,
    "Fm" => 100, "Md" => 101, "No" => 102, "Lr" => 103, "Rf" => 104, "Db" => 105,
    "Sg" => 106, "Bh" => 107, "Hs" => 108, "Mt" => 109, "Ds" => 110, "Rg" => 111,
    "Cn" => 112, "Nh" => 113, "Fl" => 114, "Mc" => 115, "Lv" => 116, "Ts" => 117,
    "Og" => 118,
};

fn strip_decorations(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_ascii_digit() && *c != ' ' && *c != '-')
        .collect()
}

fn mass_key(mass_in_dalton: f64) -> i64 {
    (mass_in_dalton * 10.0).round() as i64
}

/// Looks up an element by its chemical symbol.
///
/// Digits, spaces and hyphens are removed and the case normalized before the lookup,
/// so `"c1"` and `" CL-"` resolve to carbon and chlorine.
pub fn element_by_symbol(symbol: &str) -> Option<&'static Element> {
    let stripped = strip_decorations(symbol);
    let mut chars = stripped.chars();
    let normalized: String = match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => return None,
    };
    if normalized != symbol {
        debug!("Element symbol '{}' normalized to '{}'", symbol, normalized);
    }
    ATOMIC_NUMBERS_BY_SYMBOL
        .get(normalized.as_str())
        .and_then(|z| element_by_atomic_number(*z))
}

/// Looks up an element by its English name, ignoring case, digits, spaces and hyphens.
pub fn element_by_name(name: &str) -> Option<&'static Element> {
    let normalized = strip_decorations(name).to_lowercase();
    if normalized != name {
        debug!("Element name '{}' normalized to '{}'", name, normalized);
    }
    PERIODIC_TABLE.iter().find(|e| e.name == normalized)
}

pub fn element_by_atomic_number(atomic_number: u8) -> Option<&'static Element> {
    PERIODIC_TABLE
        .get(usize::from(atomic_number).checked_sub(1)?)
        .filter(|e| e.atomic_number == atomic_number)
}

/// Looks up an element by its mass.
///
/// With `exact`, the mass must match a table entry to the first decimal place (in
/// daltons). Otherwise the element with the closest mass is returned. Quantities that
/// are not masses never match.
pub fn element_by_mass(mass: Quantity, exact: bool) -> Option<&'static Element> {
    if mass.dimension() != Dimension::Mass {
        return None;
    }
    let target = mass.value_in(&DALTON).ok()?;
    let table_mass = |e: &Element| e.mass.value_in(&DALTON).unwrap_or(f64::NAN);

    if exact {
        let key = mass_key(target);
        PERIODIC_TABLE.iter().find(|&e| mass_key(table_mass(e)) == key)
    } else {
        let closest = PERIODIC_TABLE.iter().min_by(|a, b| {
            (table_mass(*a) - target)
                .abs()
                .total_cmp(&(table_mass(*b) - target).abs())
        })?;
        debug!(
            "Closest element to mass {:.1} amu is {}",
            target, closest.symbol
        );
        Some(closest)
    }
}

/// Infers the element of an atom type from its mass, falling back to its name as a symbol.
pub fn element_by_atom_type(atom_type: &AtomType) -> Option<&'static Element> {
    atom_type
        .mass()
        .and_then(|mass| element_by_mass(mass, false))
        .or_else(|| element_by_symbol(atom_type.name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::units::{COULOMB, GRAM_PER_MOLE, KILOGRAM};
    use std::collections::HashSet;

    #[test]
    fn table_is_indexed_by_atomic_number() {
        for (i, element) in PERIODIC_TABLE.iter().enumerate() {
            assert_eq!(usize::from(element.atomic_number()), i + 1);
            assert_eq!(
                ATOMIC_NUMBERS_BY_SYMBOL.get(element.symbol()),
                Some(&element.atomic_number())
            );
        }
    }

    #[test]
    fn element_by_symbol_normalizes_input() {
        assert_eq!(element_by_symbol("C").unwrap().name(), "carbon");
        assert_eq!(element_by_symbol("c1").unwrap().name(), "carbon");
        assert_eq!(element_by_symbol(" CL-").unwrap().name(), "chlorine");
        assert!(element_by_symbol("Xx").is_none());
        assert!(element_by_symbol("12").is_none());
    }

    #[test]
    fn element_by_name_is_case_insensitive() {
        assert_eq!(element_by_name("Oxygen").unwrap().symbol(), "O");
        assert_eq!(element_by_name("sodium 1").unwrap().symbol(), "Na");
        assert!(element_by_name("unobtainium").is_none());
    }

    #[test]
    fn element_by_atomic_number_covers_table_bounds() {
        assert_eq!(element_by_atomic_number(1).unwrap().symbol(), "H");
        assert_eq!(element_by_atomic_number(54).unwrap().symbol(), "Xe");
        assert_eq!(element_by_atomic_number(79).unwrap().symbol(), "Au");
        assert_eq!(element_by_atomic_number(118).unwrap().symbol(), "Og");
        assert!(element_by_atomic_number(0).is_none());
        assert!(element_by_atomic_number(119).is_none());
    }

    #[test]
    fn heavy_elements_resolve_by_symbol_and_name() {
        assert_eq!(element_by_symbol("Pt").unwrap().atomic_number(), 78);
        assert_eq!(element_by_symbol("pb").unwrap().name(), "lead");
        assert_eq!(element_by_symbol("Cs").unwrap().atomic_number(), 55);
        assert_eq!(element_by_name("gadolinium").unwrap().symbol(), "Gd");
        assert_eq!(element_by_mass(196.97 * &GRAM_PER_MOLE, true).unwrap().symbol(), "Au");
    }

    #[test]
    fn element_by_mass_exact_matches_first_decimal() {
        let carbon = element_by_mass(12.0 * &GRAM_PER_MOLE, true).unwrap();
        assert_eq!(carbon.symbol(), "C");
        assert!(element_by_mass(12.3 * &GRAM_PER_MOLE, true).is_none());
    }

    #[test]
    fn element_by_mass_closest_always_finds_a_match() {
        let nearest = element_by_mass(12.3 * &GRAM_PER_MOLE, false).unwrap();
        assert_eq!(nearest.symbol(), "C");

        let iron = element_by_mass(Quantity::new(55.845e-3 / 6.022_140_76e23, &KILOGRAM), false);
        assert_eq!(iron.unwrap().symbol(), "Fe");
    }

    #[test]
    fn element_by_mass_ignores_non_mass_quantities() {
        assert!(element_by_mass(Quantity::new(12.0, &COULOMB), false).is_none());
    }

    #[test]
    fn element_by_atom_type_prefers_mass_over_name() {
        let by_mass = AtomType::new("opls_135").with_mass(12.011 * &GRAM_PER_MOLE).unwrap();
        assert_eq!(element_by_atom_type(&by_mass).unwrap().symbol(), "C");

        let by_name = AtomType::new("N");
        assert_eq!(element_by_atom_type(&by_name).unwrap().symbol(), "N");

        assert!(element_by_atom_type(&AtomType::new("CT")).is_none());
    }

    #[test]
    fn elements_compare_and_hash_by_value() {
        let carbon = *element_by_symbol("C").unwrap();
        let copy = Element::new("carbon", "C", 6, Quantity::new(12.011, &DALTON));
        assert_eq!(carbon, copy);

        let heavy = Element::new("carbon", "C", 6, Quantity::new(13.003, &DALTON));
        assert_ne!(carbon, heavy);

        let set: HashSet<Element> = [carbon, copy, heavy].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn display_shows_mass_in_dalton() {
        let oxygen = element_by_symbol("O").unwrap();
        assert_eq!(
            oxygen.to_string(),
            "<Element: oxygen, symbol: O, atomic number: 8, mass: 15.999 amu>"
        );
    }
}
