use super::elements::{self, Element};
use super::molecule::{Atom, Bond, BondOrder, Molecule};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ParseError {
    #[error("SMILES string is empty")]
    Empty,

    #[error("Unexpected character '{character}' at position {position}")]
    UnexpectedCharacter { character: char, position: usize },

    #[error("Unknown element '{symbol}' at position {position}")]
    UnknownElement { symbol: String, position: usize },

    #[error("Unbalanced parenthesis at position {position}")]
    UnbalancedBranch { position: usize },

    #[error("Ring closure {label} opened at position {position} is never closed")]
    UnclosedRing { label: u16, position: usize },

    #[error("Ring closure {label} at position {position} bonds an atom to itself")]
    SelfLoop { label: u16, position: usize },

    #[error("Bond at position {position} is not followed by an atom")]
    DanglingBond { position: usize },

    #[error("Bracket atom starting at position {position} is not terminated")]
    UnterminatedBracket { position: usize },

    #[error("Explicit valence {valence} of atom #{index} ({symbol}) exceeds the allowed maximum {max}")]
    Valence {
        index: usize,
        symbol: &'static str,
        valence: u32,
        max: u32,
    },

    #[error("Ring closure {label} at position {position} duplicates an existing bond")]
    DuplicateBond { label: u16, position: usize },
}

const CHIRAL_CLASSES: [&[u8]; 5] = [b"TH", b"AL", b"SP", b"TB", b"OH"];

#[derive(Debug, Clone, Copy)]
struct RingOpening {
    atom: usize,
    order: Option<BondOrder>,
    position: usize,
}

pub(crate) fn parse(input: &str) -> Result<Molecule, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }
    Parser::new(trimmed).run()
}

struct Parser<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    prev: Option<usize>,
    branches: Vec<(usize, usize)>,
    pending: Option<(BondOrder, usize)>,
    rings: HashMap<u16, RingOpening>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            atoms: Vec::new(),
            bonds: Vec::new(),
            prev: None,
            branches: Vec::new(),
            pending: None,
            rings: HashMap::new(),
        }
    }

    fn run(mut self) -> Result<Molecule, ParseError> {
        while let Some(c) = self.peek() {
            match c {
                b'(' => {
                    let Some(prev) = self.prev else {
                        return Err(self.unexpected());
                    };
                    self.reject_pending()?;
                    self.branches.push((prev, self.pos));
                    self.pos += 1;
                }
                b')' => {
                    self.reject_pending()?;
                    let Some((open, _)) = self.branches.pop() else {
                        return Err(ParseError::UnbalancedBranch { position: self.pos });
                    };
                    self.prev = Some(open);
                    self.pos += 1;
                }
                b'-' | b'=' | b'#' | b':' | b'/' | b'\\' => {
                    if self.pending.is_some() {
                        return Err(self.unexpected());
                    }
                    let order = match c {
                        b'=' => BondOrder::Double,
                        b'#' => BondOrder::Triple,
                        b':' => BondOrder::Aromatic,
                        _ => BondOrder::Single,
                    };
                    self.pending = Some((order, self.pos));
                    self.pos += 1;
                }
                b'.' => {
                    self.reject_pending()?;
                    self.prev = None;
                    self.pos += 1;
                }
                b'0'..=b'9' | b'%' => self.ring_closure()?,
                b'[' => {
                    let atom = self.bracket_atom()?;
                    self.add_atom(atom)?;
                }
                _ => {
                    let atom = self.organic_atom()?;
                    self.add_atom(atom)?;
                }
            }
        }

        self.reject_pending()?;
        if let Some(&(_, position)) = self.branches.last() {
            return Err(ParseError::UnbalancedBranch { position });
        }
        if let Some((&label, opening)) = self.rings.iter().min_by_key(|(_, o)| o.position) {
            return Err(ParseError::UnclosedRing {
                label,
                position: opening.position,
            });
        }

        assign_hydrogens(&mut self.atoms, &self.bonds)?;
        Ok(Molecule::from_parts(self.atoms, self.bonds))
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn unexpected(&self) -> ParseError {
        ParseError::UnexpectedCharacter {
            character: self.input[self.pos..].chars().next().unwrap_or('\0'),
            position: self.pos,
        }
    }

    fn reject_pending(&self) -> Result<(), ParseError> {
        match self.pending {
            Some((_, position)) => Err(ParseError::DanglingBond { position }),
            None => Ok(()),
        }
    }

    fn default_order(&self, a: usize, b: usize) -> BondOrder {
        if self.atoms[a].aromatic && self.atoms[b].aromatic {
            BondOrder::Aromatic
        } else {
            BondOrder::Single
        }
    }

    fn add_atom(&mut self, atom: Atom) -> Result<(), ParseError> {
        let index = self.atoms.len();
        self.atoms.push(atom);
        match self.prev {
            Some(prev) => {
                let order = match self.pending.take() {
                    Some((order, _)) => order,
                    None => self.default_order(prev, index),
                };
                self.bonds.push(Bond {
                    begin: prev,
                    end: index,
                    order,
                });
            }
            None => self.reject_pending()?,
        }
        self.prev = Some(index);
        Ok(())
    }

    fn bonded(&self, a: usize, b: usize) -> bool {
        self.bonds
            .iter()
            .any(|bond| (bond.begin == a && bond.end == b) || (bond.begin == b && bond.end == a))
    }

    fn read_number(&mut self) -> Option<u32> {
        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        if start == self.pos {
            return None;
        }
        self.input[start..self.pos].parse().ok()
    }

    fn ring_closure(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        let Some(atom) = self.prev else {
            return Err(self.unexpected());
        };
        let label = if self.bytes[start] == b'%' {
            let digits = self.bytes.get(start + 1..start + 3);
            match digits {
                Some(d) if d.iter().all(u8::is_ascii_digit) => {
                    self.pos += 3;
                    u16::from(d[0] - b'0') * 10 + u16::from(d[1] - b'0')
                }
                _ => return Err(self.unexpected()),
            }
        } else {
            self.pos += 1;
            u16::from(self.bytes[start] - b'0')
        };

        let pending = self.pending.take().map(|(order, _)| order);
        match self.rings.remove(&label) {
            Some(opening) => {
                if opening.atom == atom {
                    return Err(ParseError::SelfLoop {
                        label,
                        position: start,
                    });
                }
                if self.bonded(opening.atom, atom) {
                    return Err(ParseError::DuplicateBond {
                        label,
                        position: start,
                    });
                }
                let order = pending
                    .or(opening.order)
                    .unwrap_or_else(|| self.default_order(opening.atom, atom));
                self.bonds.push(Bond {
                    begin: opening.atom,
                    end: atom,
                    order,
                });
            }
            None => {
                self.rings.insert(
                    label,
                    RingOpening {
                        atom,
                        order: pending,
                        position: start,
                    },
                );
            }
        }
        Ok(())
    }

    fn organic_atom(&mut self) -> Result<Atom, ParseError> {
        let rest = &self.input[self.pos..];
        let (symbol, aromatic, width) = if rest.starts_with("Cl") {
            ("Cl", false, 2)
        } else if rest.starts_with("Br") {
            ("Br", false, 2)
        } else {
            match self.bytes[self.pos] {
                b'B' => ("B", false, 1),
                b'C' => ("C", false, 1),
                b'N' => ("N", false, 1),
                b'O' => ("O", false, 1),
                b'P' => ("P", false, 1),
                b'S' => ("S", false, 1),
                b'F' => ("F", false, 1),
                b'I' => ("I", false, 1),
                b'b' => ("B", true, 1),
                b'c' => ("C", true, 1),
                b'n' => ("N", true, 1),
                b'o' => ("O", true, 1),
                b'p' => ("P", true, 1),
                b's' => ("S", true, 1),
                c if c.is_ascii_alphabetic() || c == b'*' => {
                    return Err(ParseError::UnknownElement {
                        symbol: (c as char).to_string(),
                        position: self.pos,
                    });
                }
                _ => return Err(self.unexpected()),
            }
        };
        let element = self.element(symbol)?;
        self.pos += width;
        Ok(Atom {
            element,
            aromatic,
            charge: 0,
            isotope: None,
            hydrogens: 0,
            radical_electrons: 0,
            bracket: false,
        })
    }

    fn element(&self, symbol: &str) -> Result<&'static Element, ParseError> {
        elements::lookup(symbol).ok_or_else(|| ParseError::UnknownElement {
            symbol: symbol.to_string(),
            position: self.pos,
        })
    }

    fn bracket_atom(&mut self) -> Result<Atom, ParseError> {
        let start = self.pos;
        self.pos += 1;

        let isotope = match self.read_number() {
            Some(n) => Some(u16::try_from(n).map_err(|_| self.unexpected())?),
            None => None,
        };

        let (element, aromatic) = self.bracket_symbol(start)?;

        if self.peek() == Some(b'@') {
            while self.peek() == Some(b'@') {
                self.pos += 1;
            }
            let rest = &self.bytes[self.pos..];
            if let Some(class) = CHIRAL_CLASSES.iter().find(|c| rest.starts_with(c)) {
                self.pos += class.len();
                self.read_number();
            }
        }

        let mut hydrogens = 0u8;
        if self.peek() == Some(b'H') {
            self.pos += 1;
            hydrogens = match self.read_number() {
                Some(n) => u8::try_from(n).map_err(|_| self.unexpected())?,
                None => 1,
            };
        }

        let mut charge = 0i8;
        if let Some(sign @ (b'+' | b'-')) = self.peek() {
            self.pos += 1;
            let magnitude = match self.read_number() {
                Some(n) => n,
                None => {
                    let mut count = 1;
                    while self.peek() == Some(sign) {
                        count += 1;
                        self.pos += 1;
                    }
                    count
                }
            };
            let magnitude = i8::try_from(magnitude).map_err(|_| self.unexpected())?;
            charge = if sign == b'+' { magnitude } else { -magnitude };
        }

        if self.peek() == Some(b':') {
            self.pos += 1;
            if self.read_number().is_none() {
                return Err(self.unexpected());
            }
        }

        match self.peek() {
            Some(b']') => self.pos += 1,
            Some(_) => return Err(self.unexpected()),
            None => return Err(ParseError::UnterminatedBracket { position: start }),
        }

        Ok(Atom {
            element,
            aromatic,
            charge,
            isotope,
            hydrogens,
            radical_electrons: 0,
            bracket: true,
        })
    }

    fn bracket_symbol(&mut self, start: usize) -> Result<(&'static Element, bool), ParseError> {
        let rest = &self.input[self.pos..];
        for (written, symbol) in [("se", "Se"), ("as", "As")] {
            if rest.starts_with(written) {
                let element = self.element(symbol)?;
                self.pos += 2;
                return Ok((element, true));
            }
        }

        let Some(first) = self.peek() else {
            return Err(ParseError::UnterminatedBracket { position: start });
        };
        match first {
            b'b' | b'c' | b'n' | b'o' | b'p' | b's' => {
                let upper = first.to_ascii_uppercase() as char;
                let element = self.element(upper.encode_utf8(&mut [0; 4]))?;
                self.pos += 1;
                Ok((element, true))
            }
            b'A'..=b'Z' => {
                // Inside brackets a lowercase letter can only continue the symbol.
                let width = match self.bytes.get(self.pos + 1) {
                    Some(c) if c.is_ascii_lowercase() => 2,
                    _ => 1,
                };
                let element = self.element(&rest[..width])?;
                self.pos += width;
                Ok((element, false))
            }
            _ => Err(self.unexpected()),
        }
    }
}

/// Elements that gain one valence unit from an aromatic system (pi-bond
/// contributors); heteroatoms like `o` and `s` donate a lone pair instead.
fn aromatic_bonus(atom: &Atom) -> u32 {
    if atom.aromatic && matches!(atom.element.atomic_number, 5 | 6 | 7 | 15) {
        1
    } else {
        0
    }
}

/// Valence ceiling after shifting by formal charge, following isoelectronic
/// neighbours: group 13 gains with negative charge, groups 15-17 gain with
/// positive charge, everything else loses one unit per charge.
fn charge_adjusted(valence: u8, element: &Element, charge: i8) -> u32 {
    let valence = i16::from(valence);
    let charge = i16::from(charge);
    let adjusted = match element.outer_shell_electrons {
        3 => valence - charge,
        5..=7 => valence + charge,
        _ => valence - charge.abs(),
    };
    adjusted.max(0) as u32
}

fn assign_hydrogens(atoms: &mut [Atom], bonds: &[Bond]) -> Result<(), ParseError> {
    let mut bond_valence = vec![0u32; atoms.len()];
    for bond in bonds {
        let contribution = u32::from(bond.order.valence_contribution());
        bond_valence[bond.begin] = bond_valence[bond.begin].saturating_add(contribution);
        bond_valence[bond.end] = bond_valence[bond.end].saturating_add(contribution);
    }

    for (index, atom) in atoms.iter_mut().enumerate() {
        let valences = atom.element.default_valences;
        let used = bond_valence[index]
            .saturating_add(u32::from(atom.hydrogens))
            .saturating_add(aromatic_bonus(atom));

        if let Some(&largest) = valences.last() {
            let max = charge_adjusted(largest, atom.element, atom.charge);
            if used > max {
                return Err(ParseError::Valence {
                    index,
                    symbol: atom.element.symbol,
                    valence: used,
                    max,
                });
            }
        }

        if !atom.bracket {
            let target = valences
                .iter()
                .map(|&v| u32::from(v))
                .find(|&v| v >= used)
                .unwrap_or(used);
            atom.hydrogens = (target - used) as u8;
        } else if !atom.aromatic {
            if let Some(&nominal) = valences.first() {
                let target = charge_adjusted(nominal, atom.element, atom.charge);
                atom.radical_electrons = target.saturating_sub(used) as u8;
            }
        }
    }
    Ok(())
}
