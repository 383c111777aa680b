//! 2D layout and MDL MOL (V2000) blocks
//!
//! The local engine has no coordinate generator beyond placing each
//! fragment's atoms on a circle; that is enough for a terminal sketch. MOL
//! blocks produced by the backend are read back into the same
//! [`Depiction`] so both engines draw identically.

use std::f64::consts::PI;
use std::fmt::Write;

use super::molecule::{Bond, BondOrder, Molecule};
use crate::error::RenderError;

/// Bond length used by the layout, in MOL units
const BOND_LENGTH: f64 = 1.5;

/// An atom with 2D coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedAtom {
    pub symbol: String,
    pub x: f64,
    pub y: f64,
}

/// Atoms with coordinates plus the bonds between them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Depiction {
    pub atoms: Vec<PlacedAtom>,
    pub bonds: Vec<Bond>,
}

impl Depiction {
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// `(min_x, min_y, max_x, max_y)`, or `None` when there are no atoms
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let first = self.atoms.first()?;
        Some(self.atoms.iter().fold(
            (first.x, first.y, first.x, first.y),
            |(x0, y0, x1, y1), a| (x0.min(a.x), y0.min(a.y), x1.max(a.x), y1.max(a.y)),
        ))
    }
}

/// Connected fragments as lists of atom indices, in first-atom order
fn fragments(molecule: &Molecule) -> Vec<Vec<usize>> {
    let n = molecule.atoms.len();
    let mut adjacency = vec![Vec::new(); n];
    for bond in &molecule.bonds {
        adjacency[bond.from].push(bond.to);
        adjacency[bond.to].push(bond.from);
    }

    let mut seen = vec![false; n];
    let mut result = Vec::new();
    for start in 0..n {
        if seen[start] {
            continue;
        }
        seen[start] = true;
        let mut fragment = vec![start];
        let mut cursor = 0;
        while cursor < fragment.len() {
            let atom = fragment[cursor];
            cursor += 1;
            for &next in &adjacency[atom] {
                if !seen[next] {
                    seen[next] = true;
                    fragment.push(next);
                }
            }
        }
        fragment.sort_unstable();
        result.push(fragment);
    }
    result
}

/// Place every fragment's atoms on a circle, fragments left to right
pub fn layout(molecule: &Molecule) -> Depiction {
    let mut atoms: Vec<PlacedAtom> = molecule
        .atoms
        .iter()
        .map(|atom| PlacedAtom {
            symbol: atom.symbol.clone(),
            x: 0.0,
            y: 0.0,
        })
        .collect();

    let mut offset = 0.0;
    for fragment in fragments(molecule) {
        let n = fragment.len();
        if n == 1 {
            atoms[fragment[0]].x = offset;
            offset += 2.0 * BOND_LENGTH;
            continue;
        }
        // Chord between neighbours on the circle equals the bond length
        let radius = BOND_LENGTH / (2.0 * (PI / n as f64).sin());
        let cx = offset + radius;
        for (slot, &atom) in fragment.iter().enumerate() {
            let angle = PI - 2.0 * PI * slot as f64 / n as f64;
            atoms[atom].x = cx + radius * angle.cos();
            atoms[atom].y = radius * angle.sin();
        }
        offset += 2.0 * radius + 2.0 * BOND_LENGTH;
    }

    Depiction {
        atoms,
        bonds: molecule.bonds.clone(),
    }
}

/// Write a V2000 MOL block for `molecule` at the coordinates of `depiction`
pub fn write_molfile(molecule: &Molecule, depiction: &Depiction) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str("  curator           2D\n");
    out.push('\n');
    let _ = writeln!(
        out,
        "{:>3}{:>3}  0  0  0  0  0  0  0  0999 V2000",
        molecule.atoms.len(),
        molecule.bonds.len()
    );
    for (atom, placed) in molecule.atoms.iter().zip(&depiction.atoms) {
        let _ = writeln!(
            out,
            "{:>10.4}{:>10.4}{:>10.4} {:<3} 0  0  0  0  0  0  0  0  0  0  0  0",
            placed.x, placed.y, 0.0, atom.symbol
        );
    }
    for bond in &molecule.bonds {
        let _ = writeln!(
            out,
            "{:>3}{:>3}{:>3}  0",
            bond.from + 1,
            bond.to + 1,
            bond.order.mdl_code()
        );
    }

    let charged: Vec<(usize, i8)> = molecule
        .atoms
        .iter()
        .enumerate()
        .filter(|(_, a)| a.charge != 0)
        .map(|(i, a)| (i + 1, a.charge))
        .collect();
    // Property lines hold at most eight entries each
    for chunk in charged.chunks(8) {
        let _ = write!(out, "M  CHG{:>3}", chunk.len());
        for (atom, charge) in chunk {
            let _ = write!(out, " {:>3} {:>3}", atom, charge);
        }
        out.push('\n');
    }
    let isotopes: Vec<(usize, u16)> = molecule
        .atoms
        .iter()
        .enumerate()
        .filter_map(|(i, a)| a.isotope.map(|iso| (i + 1, iso)))
        .collect();
    for chunk in isotopes.chunks(8) {
        let _ = write!(out, "M  ISO{:>3}", chunk.len());
        for (atom, mass) in chunk {
            let _ = write!(out, " {:>3} {:>3}", atom, mass);
        }
        out.push('\n');
    }
    out.push_str("M  END\n");
    out
}

/// Fixed-width column, trimmed
fn column(line: &str, start: usize, end: usize) -> Option<&str> {
    let end = end.min(line.len());
    line.get(start..end).map(str::trim).filter(|s| !s.is_empty())
}

fn malformed(line: usize, message: &str) -> RenderError {
    RenderError::Engine(format!("malformed MOL block at line {}: {}", line + 1, message))
}

/// Read the atom coordinates and bonds of a V2000 MOL block
pub fn read_molfile(block: &str) -> Result<Depiction, RenderError> {
    let lines: Vec<&str> = block.lines().collect();
    let counts = lines
        .get(3)
        .ok_or_else(|| malformed(lines.len(), "missing counts line"))?;
    if counts.contains("V3000") {
        return Err(RenderError::Unsupported("V3000 MOL block".to_string()));
    }
    let atom_count: usize = column(counts, 0, 3)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| malformed(3, "bad atom count"))?;
    let bond_count: usize = column(counts, 3, 6)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| malformed(3, "bad bond count"))?;

    let mut atoms = Vec::with_capacity(atom_count);
    for n in 0..atom_count {
        let index = 4 + n;
        let line = lines
            .get(index)
            .ok_or_else(|| malformed(index, "missing atom line"))?;
        let x = column(line, 0, 10).and_then(|s| s.parse::<f64>().ok());
        let y = column(line, 10, 20).and_then(|s| s.parse::<f64>().ok());
        let symbol = column(line, 31, 34);
        match (x, y, symbol) {
            (Some(x), Some(y), Some(symbol)) => atoms.push(PlacedAtom {
                symbol: symbol.to_string(),
                x,
                y,
            }),
            _ => return Err(malformed(index, "bad atom line")),
        }
    }

    let mut bonds = Vec::with_capacity(bond_count);
    for n in 0..bond_count {
        let index = 4 + atom_count + n;
        let line = lines
            .get(index)
            .ok_or_else(|| malformed(index, "missing bond line"))?;
        let from = column(line, 0, 3).and_then(|s| s.parse::<usize>().ok());
        let to = column(line, 3, 6).and_then(|s| s.parse::<usize>().ok());
        let order = column(line, 6, 9)
            .and_then(|s| s.parse::<u8>().ok())
            .and_then(BondOrder::from_mdl_code);
        match (from, to, order) {
            (Some(from), Some(to), Some(order))
                if (1..=atom_count).contains(&from) && (1..=atom_count).contains(&to) =>
            {
                bonds.push(Bond {
                    from: from - 1,
                    to: to - 1,
                    order,
                })
            }
            _ => return Err(malformed(index, "bad bond line")),
        }
    }

    Ok(Depiction { atoms, bonds })
}
