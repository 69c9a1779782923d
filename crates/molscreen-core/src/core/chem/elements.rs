use phf::{Map, phf_map};

#[derive(Debug, PartialEq)]
pub struct Element {
    pub symbol: &'static str,
    pub atomic_number: u8,
    /// Standard atomic weight in g/mol.
    pub average_mass: f64,
    /// Mass of the most abundant isotope in Da.
    pub monoisotopic_mass: f64,
    pub outer_shell_electrons: u8,
    /// Allowed valences used to infer implicit hydrogens, smallest first.
    /// Empty for elements that never receive implicit hydrogens.
    pub default_valences: &'static [u8],
}

impl Element {
    #[inline]
    pub fn is_hydrogen(&self) -> bool {
        self.atomic_number == 1
    }

    #[inline]
    pub fn is_carbon(&self) -> bool {
        self.atomic_number == 6
    }

    /// Mass of the `mass_number` isotope. Isotopes missing from the table
    /// fall back to the mass number itself.
    pub fn isotope_mass(&self, mass_number: u16) -> f64 {
        let key = u32::from(self.atomic_number) * 1000 + u32::from(mass_number);
        ISOTOPE_MASSES
            .get(&key)
            .copied()
            .unwrap_or_else(|| f64::from(mass_number))
    }
}

pub static HYDROGEN: Element = Element {
    symbol: "H",
    atomic_number: 1,
    average_mass: 1.008,
    monoisotopic_mass: 1.00782503223,
    outer_shell_electrons: 1,
    default_valences: &[1],
};

static ELEMENTS: Map<&'static str, Element> = phf_map! {
    "H" => Element { symbol: "H", atomic_number: 1, average_mass: 1.008, monoisotopic_mass: 1.00782503223, outer_shell_electrons: 1, default_valences: &[1] },
    "Li" => Element { symbol: "Li", atomic_number: 3, average_mass: 6.94, monoisotopic_mass: 7.0160034366, outer_shell_electrons: 1, default_valences: &[] },
    "B" => Element { symbol: "B", atomic_number: 5, average_mass: 10.812, monoisotopic_mass: 11.00930536, outer_shell_electrons: 3, default_valences: &[3] },
    "C" => Element { symbol: "C", atomic_number: 6, average_mass: 12.011, monoisotopic_mass: 12.0, outer_shell_electrons: 4, default_valences: &[4] },
    "N" => Element { symbol: "N", atomic_number: 7, average_mass: 14.007, monoisotopic_mass: 14.00307400443, outer_shell_electrons: 5, default_valences: &[3, 5] },
    "O" => Element { symbol: "O", atomic_number: 8, average_mass: 15.999, monoisotopic_mass: 15.99491461957, outer_shell_electrons: 6, default_valences: &[2] },
    "F" => Element { symbol: "F", atomic_number: 9, average_mass: 18.998, monoisotopic_mass: 18.99840316273, outer_shell_electrons: 7, default_valences: &[1] },
    "Na" => Element { symbol: "Na", atomic_number: 11, average_mass: 22.99, monoisotopic_mass: 22.989769282, outer_shell_electrons: 1, default_valences: &[] },
    "Mg" => Element { symbol: "Mg", atomic_number: 12, average_mass: 24.305, monoisotopic_mass: 23.985041697, outer_shell_electrons: 2, default_valences: &[] },
    "Al" => Element { symbol: "Al", atomic_number: 13, average_mass: 26.982, monoisotopic_mass: 26.98153853, outer_shell_electrons: 3, default_valences: &[] },
    "Si" => Element { symbol: "Si", atomic_number: 14, average_mass: 28.086, monoisotopic_mass: 27.97692653465, outer_shell_electrons: 4, default_valences: &[4] },
    "P" => Element { symbol: "P", atomic_number: 15, average_mass: 30.974, monoisotopic_mass: 30.97376199842, outer_shell_electrons: 5, default_valences: &[3, 5] },
    "S" => Element { symbol: "S", atomic_number: 16, average_mass: 32.067, monoisotopic_mass: 31.9720711744, outer_shell_electrons: 6, default_valences: &[2, 4, 6] },
    "Cl" => Element { symbol: "Cl", atomic_number: 17, average_mass: 35.453, monoisotopic_mass: 34.968852682, outer_shell_electrons: 7, default_valences: &[1] },
    "K" => Element { symbol: "K", atomic_number: 19, average_mass: 39.098, monoisotopic_mass: 38.9637064864, outer_shell_electrons: 1, default_valences: &[] },
    "Ca" => Element { symbol: "Ca", atomic_number: 20, average_mass: 40.078, monoisotopic_mass: 39.962590863, outer_shell_electrons: 2, default_valences: &[] },
    "Fe" => Element { symbol: "Fe", atomic_number: 26, average_mass: 55.845, monoisotopic_mass: 55.93493633, outer_shell_electrons: 8, default_valences: &[] },
    "Cu" => Element { symbol: "Cu", atomic_number: 29, average_mass: 63.546, monoisotopic_mass: 62.92959772, outer_shell_electrons: 11, default_valences: &[] },
    "Zn" => Element { symbol: "Zn", atomic_number: 30, average_mass: 65.39, monoisotopic_mass: 63.92914201, outer_shell_electrons: 2, default_valences: &[] },
    "As" => Element { symbol: "As", atomic_number: 33, average_mass: 74.922, monoisotopic_mass: 74.92159457, outer_shell_electrons: 5, default_valences: &[3, 5] },
    "Se" => Element { symbol: "Se", atomic_number: 34, average_mass: 78.971, monoisotopic_mass: 79.9165218, outer_shell_electrons: 6, default_valences: &[2, 4, 6] },
    "Br" => Element { symbol: "Br", atomic_number: 35, average_mass: 79.904, monoisotopic_mass: 78.9183376, outer_shell_electrons: 7, default_valences: &[1] },
    "Sn" => Element { symbol: "Sn", atomic_number: 50, average_mass: 118.71, monoisotopic_mass: 119.90220163, outer_shell_electrons: 4, default_valences: &[] },
    "I" => Element { symbol: "I", atomic_number: 53, average_mass: 126.904, monoisotopic_mass: 126.9044719, outer_shell_electrons: 7, default_valences: &[1] },
};

/// Isotope masses in Da, keyed by `atomic_number * 1000 + mass_number`.
static ISOTOPE_MASSES: Map<u32, f64> = phf_map! {
    1001u32 => 1.00782503223,
    1002u32 => 2.01410177812,
    1003u32 => 3.0160492779,
    5010u32 => 10.01293695,
    5011u32 => 11.00930536,
    6011u32 => 11.0114336,
    6012u32 => 12.0,
    6013u32 => 13.00335483507,
    6014u32 => 14.0032419884,
    7014u32 => 14.00307400443,
    7015u32 => 15.00010889888,
    8016u32 => 15.99491461957,
    8017u32 => 16.9991317565,
    8018u32 => 17.99915961286,
    9018u32 => 18.0009373,
    9019u32 => 18.99840316273,
    15031u32 => 30.97376199842,
    15032u32 => 31.9739076643,
    16032u32 => 31.9720711744,
    16034u32 => 33.967867004,
    16035u32 => 34.96903231,
    17035u32 => 34.968852682,
    17037u32 => 36.965902602,
    35079u32 => 78.9183376,
    35081u32 => 80.9162897,
    53123u32 => 122.905589,
    53125u32 => 124.9046294,
    53127u32 => 126.9044719,
    53131u32 => 130.9061263,
};

pub fn lookup(symbol: &str) -> Option<&'static Element> {
    ELEMENTS.get(symbol)
}
