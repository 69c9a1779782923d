//! Descriptors derived from atom composition alone.

use crate::core::chem::Molecule;
use crate::core::chem::elements::HYDROGEN;

fn hydrogen_count(mol: &Molecule) -> u32 {
    mol.atoms().iter().map(|a| u32::from(a.hydrogens)).sum()
}

pub fn mol_wt(mol: &Molecule) -> f64 {
    let heavy: f64 = mol.atoms().iter().map(|a| a.average_mass()).sum();
    heavy + f64::from(hydrogen_count(mol)) * HYDROGEN.average_mass
}

/// Average molecular weight with every hydrogen ignored.
pub fn heavy_atom_mol_wt(mol: &Molecule) -> f64 {
    mol.atoms()
        .iter()
        .filter(|a| !a.element.is_hydrogen())
        .map(|a| a.average_mass())
        .sum()
}

pub fn exact_mol_wt(mol: &Molecule) -> f64 {
    let heavy: f64 = mol.atoms().iter().map(|a| a.exact_mass()).sum();
    heavy + f64::from(hydrogen_count(mol)) * HYDROGEN.monoisotopic_mass
}

pub fn num_valence_electrons(mol: &Molecule) -> f64 {
    let total: i64 = mol
        .atoms()
        .iter()
        .map(|a| {
            i64::from(a.element.outer_shell_electrons) + i64::from(a.hydrogens)
                - i64::from(a.charge)
        })
        .sum();
    total as f64
}

pub fn num_radical_electrons(mol: &Molecule) -> f64 {
    mol.atoms()
        .iter()
        .map(|a| f64::from(a.radical_electrons))
        .sum()
}

pub fn heavy_atom_count(mol: &Molecule) -> f64 {
    mol.atoms()
        .iter()
        .filter(|a| !a.element.is_hydrogen())
        .count() as f64
}

/// Hydrogens bonded to nitrogen or oxygen (Lipinski donors).
pub fn nhoh_count(mol: &Molecule) -> f64 {
    (0..mol.atom_count())
        .filter(|&i| matches!(mol.atoms()[i].element.atomic_number, 7 | 8))
        .map(|i| mol.total_hydrogens(i))
        .sum::<u32>() as f64
}

/// Nitrogen and oxygen atoms (Lipinski acceptors).
pub fn no_count(mol: &Molecule) -> f64 {
    mol.atoms()
        .iter()
        .filter(|a| matches!(a.element.atomic_number, 7 | 8))
        .count() as f64
}

pub fn num_heteroatoms(mol: &Molecule) -> f64 {
    mol.atoms()
        .iter()
        .filter(|a| !a.element.is_carbon() && !a.element.is_hydrogen())
        .count() as f64
}
