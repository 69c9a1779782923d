use super::elements::Element;
use super::smiles::{self, ParseError};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BondOrder {
    Single,
    Double,
    Triple,
    Aromatic,
}

impl BondOrder {
    /// Contribution to the explicit valence of each endpoint. Aromatic bonds
    /// count as single here; the extra pi electron is accounted per atom.
    #[inline]
    pub fn valence_contribution(self) -> u8 {
        match self {
            BondOrder::Single | BondOrder::Aromatic => 1,
            BondOrder::Double => 2,
            BondOrder::Triple => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub element: &'static Element,
    pub aromatic: bool,
    pub charge: i8,
    pub isotope: Option<u16>,
    /// Hydrogens written inside brackets (`[NH2]`) or inferred from default valences.
    pub hydrogens: u8,
    pub radical_electrons: u8,
    pub bracket: bool,
}

impl Atom {
    /// Isotope mass for labelled atoms, otherwise the standard atomic weight.
    pub fn average_mass(&self) -> f64 {
        match self.isotope {
            Some(mass_number) => self.element.isotope_mass(mass_number),
            None => self.element.average_mass,
        }
    }

    /// Isotope mass for labelled atoms, otherwise the most abundant isotope.
    pub fn exact_mass(&self) -> f64 {
        match self.isotope {
            Some(mass_number) => self.element.isotope_mass(mass_number),
            None => self.element.monoisotopic_mass,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bond {
    pub begin: usize,
    pub end: usize,
    pub order: BondOrder,
}

impl Bond {
    #[inline]
    pub fn other(&self, atom: usize) -> usize {
        if self.begin == atom { self.end } else { self.begin }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Molecule {
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    adjacency: Vec<Vec<usize>>,
}

impl Molecule {
    pub fn from_smiles(smiles: &str) -> Result<Self, ParseError> {
        smiles::parse(smiles)
    }

    pub(crate) fn from_parts(atoms: Vec<Atom>, bonds: Vec<Bond>) -> Self {
        let mut adjacency = vec![Vec::new(); atoms.len()];
        for (index, bond) in bonds.iter().enumerate() {
            adjacency[bond.begin].push(index);
            adjacency[bond.end].push(index);
        }
        Self {
            atoms,
            bonds,
            adjacency,
        }
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn bonds_of(&self, atom: usize) -> impl Iterator<Item = &Bond> + '_ {
        self.adjacency[atom].iter().map(|&b| &self.bonds[b])
    }

    pub fn neighbors(&self, atom: usize) -> impl Iterator<Item = usize> + '_ {
        self.bonds_of(atom).map(move |bond| bond.other(atom))
    }

    /// Number of non-hydrogen neighbours, ignoring implicit hydrogens.
    pub fn heavy_degree(&self, atom: usize) -> usize {
        self.neighbors(atom)
            .filter(|&n| !self.atoms[n].element.is_hydrogen())
            .count()
    }

    /// Hydrogens attached to `atom`, including explicit `[H]` neighbours.
    pub fn total_hydrogens(&self, atom: usize) -> u32 {
        let explicit = self
            .neighbors(atom)
            .filter(|&n| self.atoms[n].element.is_hydrogen())
            .count() as u32;
        u32::from(self.atoms[atom].hydrogens) + explicit
    }

    pub fn connected_components(&self) -> usize {
        let mut seen = vec![false; self.atoms.len()];
        let mut components = 0;
        for start in 0..self.atoms.len() {
            if seen[start] {
                continue;
            }
            components += 1;
            seen[start] = true;
            let mut queue = VecDeque::from([start]);
            while let Some(current) = queue.pop_front() {
                for next in self.neighbors(current) {
                    if !seen[next] {
                        seen[next] = true;
                        queue.push_back(next);
                    }
                }
            }
        }
        components
    }

    /// A bond lies in a ring iff its endpoints stay connected without it.
    pub fn is_ring_bond(&self, bond_index: usize) -> bool {
        let bond = self.bonds[bond_index];
        let mut seen = vec![false; self.atoms.len()];
        seen[bond.begin] = true;
        let mut queue = VecDeque::from([bond.begin]);
        while let Some(current) = queue.pop_front() {
            for &b in &self.adjacency[current] {
                if b == bond_index {
                    continue;
                }
                let next = self.bonds[b].other(current);
                if next == bond.end {
                    return true;
                }
                if !seen[next] {
                    seen[next] = true;
                    queue.push_back(next);
                }
            }
        }
        false
    }
}
