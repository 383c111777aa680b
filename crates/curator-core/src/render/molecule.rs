//! Molecular graph, hydrogen assignment and formula derivation

use std::collections::BTreeMap;
use std::fmt::Write;

/// Element symbols, by atomic number - 1
const ELEMENTS: [&str; 118] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S", "Cl",
    "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As",
    "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In",
    "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb",
    "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl",
    "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk",
    "Cf", "Es", "Fm", "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", "Rg", "Cn", "Nh",
    "Fl", "Mc", "Lv", "Ts", "Og",
];

/// Whether `symbol` names an element
pub fn is_element(symbol: &str) -> bool {
    ELEMENTS.contains(&symbol)
}

/// Symbol used for wildcard atoms
pub const WILDCARD: &str = "*";

/// Normal valences of the organic subset, lowest first
fn default_valences(symbol: &str) -> &'static [u32] {
    match symbol {
        "B" => &[3],
        "C" => &[4],
        "N" => &[3, 5],
        "O" => &[2],
        "P" => &[3, 5],
        "S" => &[2, 4, 6],
        "F" | "Cl" | "Br" | "I" => &[1],
        _ => &[],
    }
}

/// An atom in the graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
    pub symbol: String,
    pub aromatic: bool,
    /// Written in brackets: hydrogens are explicit, never implied
    pub bracket: bool,
    pub isotope: Option<u16>,
    pub charge: i8,
    /// Hydrogens written in a bracket atom
    pub explicit_h: u8,
    /// Hydrogens implied by valence for organic-subset atoms
    pub implicit_h: u8,
}

impl Atom {
    pub fn organic(symbol: &str, aromatic: bool) -> Self {
        Self {
            symbol: symbol.to_string(),
            aromatic,
            bracket: false,
            isotope: None,
            charge: 0,
            explicit_h: 0,
            implicit_h: 0,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        self.symbol == WILDCARD
    }

    pub fn hydrogens(&self) -> u32 {
        u32::from(self.explicit_h) + u32::from(self.implicit_h)
    }
}

/// Bond multiplicity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BondOrder {
    Single,
    Double,
    Triple,
    Quadruple,
    Aromatic,
}

impl BondOrder {
    /// Contribution to the valence sum; aromatic bonds count as single and
    /// the aromatic atom gets one extra unit instead
    fn valence(self) -> u32 {
        match self {
            BondOrder::Single | BondOrder::Aromatic => 1,
            BondOrder::Double => 2,
            BondOrder::Triple => 3,
            BondOrder::Quadruple => 4,
        }
    }

    /// MDL bond type code
    pub fn mdl_code(self) -> u8 {
        match self {
            BondOrder::Single => 1,
            BondOrder::Double => 2,
            BondOrder::Triple => 3,
            BondOrder::Aromatic => 4,
            // V2000 has no quadruple type; "any" is the closest
            BondOrder::Quadruple => 8,
        }
    }

    pub fn from_mdl_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(BondOrder::Single),
            2 => Some(BondOrder::Double),
            3 => Some(BondOrder::Triple),
            4 => Some(BondOrder::Aromatic),
            8 => Some(BondOrder::Quadruple),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bond {
    pub from: usize,
    pub to: usize,
    pub order: BondOrder,
}

/// A molecular graph
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Molecule {
    pub atoms: Vec<Atom>,
    pub bonds: Vec<Bond>,
}

impl Molecule {
    pub fn add_atom(&mut self, atom: Atom) -> usize {
        self.atoms.push(atom);
        self.atoms.len() - 1
    }

    pub fn add_bond(&mut self, from: usize, to: usize, order: BondOrder) {
        self.bonds.push(Bond { from, to, order });
    }

    pub fn has_bond(&self, a: usize, b: usize) -> bool {
        self.bonds
            .iter()
            .any(|bond| (bond.from == a && bond.to == b) || (bond.from == b && bond.to == a))
    }

    fn bonds_of(&self, index: usize) -> impl Iterator<Item = &Bond> {
        self.bonds
            .iter()
            .filter(move |b| b.from == index || b.to == index)
    }

    /// Fill `implicit_h` for organic-subset atoms from their default valences
    pub fn assign_implicit_hydrogens(&mut self) {
        for i in 0..self.atoms.len() {
            let atom = &self.atoms[i];
            if atom.bracket || atom.is_wildcard() {
                continue;
            }
            let mut used: u32 = self.bonds_of(i).map(|b| b.order.valence()).sum();
            // Aromatic O and S donate a lone pair, not a pi bond
            if atom.aromatic && !matches!(atom.symbol.as_str(), "O" | "S") {
                used += 1;
            }
            let implicit = default_valences(&atom.symbol)
                .iter()
                .find(|&&v| v >= used)
                .map(|&v| v - used)
                .unwrap_or(0);
            self.atoms[i].implicit_h = implicit as u8;
        }
    }

    /// Molecular formula in Hill order: C, then H, then the rest
    /// alphabetically; without carbon everything is alphabetical.
    /// Wildcard atoms are not counted.
    pub fn formula(&self) -> String {
        let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
        for atom in &self.atoms {
            if atom.is_wildcard() {
                continue;
            }
            *counts.entry(atom.symbol.as_str()).or_default() += 1;
            let h = atom.hydrogens();
            if h > 0 {
                *counts.entry("H").or_default() += h;
            }
        }

        let mut formula = String::new();
        let mut push = |symbol: &str, count: u32| {
            formula.push_str(symbol);
            if count > 1 {
                let _ = write!(formula, "{}", count);
            }
        };

        if let Some(c) = counts.remove("C") {
            push("C", c);
            if let Some(h) = counts.remove("H") {
                push("H", h);
            }
        }
        for (symbol, count) in counts {
            push(symbol, count);
        }
        formula
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_table() {
        assert!(is_element("C"));
        assert!(is_element("Cl"));
        assert!(is_element("Og"));
        assert!(!is_element("Xx"));
        assert_eq!(ELEMENTS[5], "C");
    }

    #[test]
    fn test_methane_hydrogens() {
        let mut mol = Molecule::default();
        mol.add_atom(Atom::organic("C", false));
        mol.assign_implicit_hydrogens();
        assert_eq!(mol.formula(), "CH4");
    }

    #[test]
    fn test_hill_order_without_carbon() {
        let mut mol = Molecule::default();
        let o = mol.add_atom(Atom::organic("O", false));
        let s = mol.add_atom(Atom::organic("S", false));
        mol.add_bond(o, s, BondOrder::Double);
        mol.assign_implicit_hydrogens();
        // S takes its lowest valence that fits: 2
        assert_eq!(mol.formula(), "OS");
    }

    #[test]
    fn test_bracket_atoms_keep_explicit_hydrogens() {
        let mut mol = Molecule::default();
        let mut n = Atom::organic("N", false);
        n.bracket = true;
        n.explicit_h = 4;
        n.charge = 1;
        mol.add_atom(n);
        mol.assign_implicit_hydrogens();
        assert_eq!(mol.formula(), "H4N");
    }
}
