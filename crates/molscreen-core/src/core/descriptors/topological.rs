//! Descriptors derived from the bond graph.

use crate::core::chem::{BondOrder, Molecule};

/// Cyclomatic number of the molecular graph, which equals the size of the
/// smallest set of smallest rings.
pub fn ring_count(mol: &Molecule) -> f64 {
    let edges = mol.bonds().len() as i64;
    let vertices = mol.atom_count() as i64;
    let components = mol.connected_components() as i64;
    (edges - vertices + components).max(0) as f64
}

pub fn fraction_csp3(mol: &Molecule) -> f64 {
    let carbons: Vec<usize> = (0..mol.atom_count())
        .filter(|&i| mol.atoms()[i].element.is_carbon())
        .collect();
    if carbons.is_empty() {
        return 0.0;
    }
    let sp3 = carbons
        .iter()
        .filter(|&&i| {
            !mol.atoms()[i].aromatic && mol.bonds_of(i).all(|b| b.order == BondOrder::Single)
        })
        .count();
    sp3 as f64 / carbons.len() as f64
}

/// Single, acyclic bonds between two non-terminal heavy atoms, excluding
/// bonds next to a triple bond and secondary/primary amide C-N bonds.
pub fn num_rotatable_bonds(mol: &Molecule) -> f64 {
    let has_triple = |atom: usize| mol.bonds_of(atom).any(|b| b.order == BondOrder::Triple);
    let is_carbonyl_carbon = |atom: usize| {
        mol.atoms()[atom].element.is_carbon()
            && mol.bonds_of(atom).any(|b| {
                b.order == BondOrder::Double && mol.atoms()[b.other(atom)].element.atomic_number == 8
            })
    };
    let is_amide = |a: usize, b: usize| {
        let n_h = |n: usize| {
            mol.atoms()[n].element.atomic_number == 7 && mol.total_hydrogens(n) > 0
        };
        (n_h(a) && is_carbonyl_carbon(b)) || (n_h(b) && is_carbonyl_carbon(a))
    };

    let count = mol
        .bonds()
        .iter()
        .enumerate()
        .filter(|(_, bond)| matches!(bond.order, BondOrder::Single | BondOrder::Aromatic))
        .filter(|(index, _)| !mol.is_ring_bond(*index))
        .filter(|(_, bond)| {
            let (a, b) = (bond.begin, bond.end);
            [a, b].iter().all(|&atom| {
                !mol.atoms()[atom].element.is_hydrogen()
                    && mol.heavy_degree(atom) > 1
                    && !has_triple(atom)
            }) && !is_amide(a, b)
        })
        .count();
    count as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mol(smiles: &str) -> Molecule {
        Molecule::from_smiles(smiles).unwrap()
    }

    #[test]
    fn ring_count_matches_cyclomatic_number() {
        assert_eq!(ring_count(&mol("CCO")), 0.0);
        assert_eq!(ring_count(&mol("c1ccccc1")), 1.0);
        assert_eq!(ring_count(&mol("c1ccc2ccccc2c1")), 2.0);
        assert_eq!(ring_count(&mol("C1CC1.C1CC1")), 2.0);
    }

    #[test]
    fn fraction_csp3_ignores_aromatic_and_unsaturated_carbons() {
        assert_eq!(fraction_csp3(&mol("CCO")), 1.0);
        assert_eq!(fraction_csp3(&mol("CC(=O)O")), 0.5);
        assert!((fraction_csp3(&mol("Cc1ccccc1")) - 1.0 / 7.0).abs() < 1e-12);
        assert_eq!(fraction_csp3(&mol("O")), 0.0);
    }

    #[test]
    fn rotatable_bonds_skip_terminal_ring_and_amide_bonds() {
        assert_eq!(num_rotatable_bonds(&mol("CCCC")), 1.0);
        assert_eq!(num_rotatable_bonds(&mol("CCc1ccccc1")), 1.0);
        assert_eq!(num_rotatable_bonds(&mol("c1ccccc1c1ccccc1")), 1.0);
        assert_eq!(num_rotatable_bonds(&mol("CNC(C)=O")), 0.0);
        assert_eq!(num_rotatable_bonds(&mol("CCC#CC")), 0.0);
        assert_eq!(num_rotatable_bonds(&mol("C1CCCCC1")), 0.0);
    }
}
