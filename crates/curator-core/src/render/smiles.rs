//! SMILES parser using nom
//!
//! Grammar (OpenSMILES subset):
//! ```text
//! smiles   := chain ('.' chain)*
//! chain    := atom (bond? (atom | ring) | branch)*
//! branch   := '(' bond? chain ')'
//! atom     := organic | bracket
//! organic  := 'B' | 'C' | 'N' | 'O' | 'P' | 'S' | 'F' | 'Cl' | 'Br' | 'I' | '*'
//!           | 'b' | 'c' | 'n' | 'o' | 'p' | 's'
//! bracket  := '[' isotope? symbol chiral? hcount? charge? class? ']'
//! bond     := '-' | '=' | '#' | '$' | ':' | '/' | '\'
//! ring     := digit | '%' digit digit
//! ```
//!
//! Tokens are read with nom; the graph is assembled by a small stack machine
//! that tracks the previous atom, open branches and open ring closures.

use std::collections::HashMap;

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while_m_n},
    character::complete::{char, digit1, one_of, satisfy},
    combinator::{map, map_res, opt, recognize, verify},
    multi::many1,
    sequence::{delimited, pair, preceded, tuple},
    IResult,
};

use super::molecule::{is_element, Atom, BondOrder, Molecule, WILDCARD};
use crate::error::RenderError;

/// Bond symbols as written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BondSymbol {
    Single,
    Double,
    Triple,
    Quadruple,
    Aromatic,
    /// `/` or `\`: single bond with stereo direction
    Directional,
}

impl BondSymbol {
    fn order(self) -> BondOrder {
        match self {
            BondSymbol::Single | BondSymbol::Directional => BondOrder::Single,
            BondSymbol::Double => BondOrder::Double,
            BondSymbol::Triple => BondOrder::Triple,
            BondSymbol::Quadruple => BondOrder::Quadruple,
            BondSymbol::Aromatic => BondOrder::Aromatic,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Atom(Atom),
    Bond(BondSymbol),
    Ring(u8),
    Open,
    Close,
    Dot,
}

/// Parse a SMILES string into a molecular graph with implicit hydrogens
/// assigned.
pub fn parse_smiles(input: &str) -> Result<Molecule, RenderError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(RenderError::EmptyNotation);
    }
    let tokens = tokenize(input)?;
    let mut molecule = build(tokens, input.len())?;
    molecule.assign_implicit_hydrogens();
    Ok(molecule)
}

fn parse_error(position: usize, message: impl Into<String>) -> RenderError {
    RenderError::Parse {
        position,
        message: message.into(),
    }
}

fn tokenize(input: &str) -> Result<Vec<(usize, Token)>, RenderError> {
    let mut tokens = Vec::new();
    let mut rest = input;
    while !rest.is_empty() {
        let position = input.len() - rest.len();
        match token(rest) {
            Ok((remaining, tok)) => {
                tokens.push((position, tok));
                rest = remaining;
            }
            Err(_) => {
                let found = rest.chars().next().unwrap_or(' ');
                return Err(parse_error(position, format!("unexpected '{}'", found)));
            }
        }
    }
    Ok(tokens)
}

/// Parse a single token
fn token(input: &str) -> IResult<&str, Token> {
    alt((
        map(bracket_atom, Token::Atom),
        map(organic_atom, Token::Atom),
        map(bond_symbol, Token::Bond),
        map(ring_number, Token::Ring),
        map(char('('), |_| Token::Open),
        map(char(')'), |_| Token::Close),
        map(char('.'), |_| Token::Dot),
    ))(input)
}

/// Parse an organic-subset atom
fn organic_atom(input: &str) -> IResult<&str, Atom> {
    alt((
        // Two-letter halogens before their one-letter prefixes
        map(alt((tag("Cl"), tag("Br"))), |s: &str| Atom::organic(s, false)),
        map(one_of("BCNOPSFI*"), |c: char| {
            Atom::organic(&c.to_string(), false)
        }),
        map(one_of("bcnops"), |c: char| {
            Atom::organic(&c.to_ascii_uppercase().to_string(), true)
        }),
    ))(input)
}

/// Parse a bracket atom
fn bracket_atom(input: &str) -> IResult<&str, Atom> {
    let (input, (isotope, (symbol, aromatic), _chiral, hcount, charge, _class)) = delimited(
        char('['),
        tuple((
            opt(map_res(digit1, str::parse::<u16>)),
            bracket_symbol,
            opt(chirality),
            opt(hydrogen_count),
            opt(charge),
            opt(preceded(char(':'), digit1)),
        )),
        char(']'),
    )(input)?;

    Ok((
        input,
        Atom {
            symbol,
            aromatic,
            bracket: true,
            isotope,
            charge: charge.unwrap_or(0),
            explicit_h: hcount.unwrap_or(0),
            implicit_h: 0,
        },
    ))
}

/// Element symbol inside brackets, with aromatic forms
fn bracket_symbol(input: &str) -> IResult<&str, (String, bool)> {
    alt((
        map(alt((tag("se"), tag("as"))), |s: &str| {
            (capitalize(s), true)
        }),
        map(one_of("bcnops"), |c: char| {
            (c.to_ascii_uppercase().to_string(), true)
        }),
        map(
            verify(
                recognize(pair(
                    satisfy(|c| c.is_ascii_uppercase()),
                    satisfy(|c| c.is_ascii_lowercase()),
                )),
                |s: &str| is_element(s),
            ),
            |s: &str| (s.to_string(), false),
        ),
        map(
            verify(recognize(satisfy(|c| c.is_ascii_uppercase())), |s: &str| {
                is_element(s)
            }),
            |s: &str| (s.to_string(), false),
        ),
        map(tag(WILDCARD), |s: &str| (s.to_string(), false)),
    ))(input)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// `@`, `@@`, or an extended class such as `@TH1`
fn chirality(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        char('@'),
        opt(alt((
            tag("@"),
            recognize(pair(
                alt((tag("TH"), tag("AL"), tag("SP"), tag("TB"), tag("OH"))),
                digit1,
            )),
        ))),
    ))(input)
}

/// `H` or `H<digit>`
fn hydrogen_count(input: &str) -> IResult<&str, u8> {
    map(
        preceded(char('H'), opt(satisfy(|c| c.is_ascii_digit()))),
        |digit| digit.and_then(|d| d.to_digit(10)).map_or(1, |d| d as u8),
    )(input)
}

/// Largest formal charge magnitude a bracket atom may carry
const MAX_CHARGE: i8 = 15;

fn bounded_charge(sign: char, magnitude: usize) -> Result<i8, &'static str> {
    let n = i8::try_from(magnitude)
        .ok()
        .filter(|n| *n <= MAX_CHARGE)
        .ok_or("charge out of range")?;
    Ok(if sign == '-' { -n } else { n })
}

/// `+`, `-`, `+2`, `--`, ...
fn charge(input: &str) -> IResult<&str, i8> {
    alt((
        map_res(pair(one_of("+-"), digit1), |(sign, digits): (char, &str)| {
            let magnitude = digits.parse::<usize>().map_err(|_| "charge out of range")?;
            bounded_charge(sign, magnitude)
        }),
        map_res(many1(char('+')), |signs: Vec<char>| bounded_charge('+', signs.len())),
        map_res(many1(char('-')), |signs: Vec<char>| bounded_charge('-', signs.len())),
    ))(input)
}

fn bond_symbol(input: &str) -> IResult<&str, BondSymbol> {
    map(one_of("-=#$:/\\"), |c| match c {
        '=' => BondSymbol::Double,
        '#' => BondSymbol::Triple,
        '$' => BondSymbol::Quadruple,
        ':' => BondSymbol::Aromatic,
        '/' | '\\' => BondSymbol::Directional,
        _ => BondSymbol::Single,
    })(input)
}

/// Ring closure number: one digit, or `%` and two digits
fn ring_number(input: &str) -> IResult<&str, u8> {
    alt((
        map(satisfy(|c| c.is_ascii_digit()), |c| c as u8 - b'0'),
        map_res(
            preceded(char('%'), take_while_m_n(2, 2, |c: char| c.is_ascii_digit())),
            str::parse::<u8>,
        ),
    ))(input)
}

struct OpenRing {
    atom: usize,
    bond: Option<BondSymbol>,
    position: usize,
}

/// Assemble the graph from tokens
fn build(tokens: Vec<(usize, Token)>, end: usize) -> Result<Molecule, RenderError> {
    let mut molecule = Molecule::default();
    let mut prev: Option<usize> = None;
    let mut pending: Option<(usize, BondSymbol)> = None;
    let mut branches: Vec<(usize, usize)> = Vec::new();
    let mut rings: HashMap<u8, OpenRing> = HashMap::new();

    for (position, token) in tokens {
        match token {
            Token::Atom(atom) => {
                let aromatic = atom.aromatic;
                let index = molecule.add_atom(atom);
                match (prev, pending.take()) {
                    (Some(p), bond) => {
                        let order = bond.map(|(_, b)| b.order()).unwrap_or_else(|| {
                            implied_order(molecule.atoms[p].aromatic, aromatic)
                        });
                        molecule.add_bond(p, index, order);
                    }
                    (None, Some((at, _))) => {
                        return Err(parse_error(at, "bond without a preceding atom"));
                    }
                    (None, None) => {}
                }
                prev = Some(index);
            }
            Token::Bond(symbol) => {
                if prev.is_none() {
                    return Err(parse_error(position, "bond without a preceding atom"));
                }
                if pending.is_some() {
                    return Err(parse_error(position, "two consecutive bonds"));
                }
                pending = Some((position, symbol));
            }
            Token::Ring(number) => {
                let Some(atom) = prev else {
                    return Err(parse_error(position, "ring closure without an atom"));
                };
                let bond = pending.take().map(|(_, b)| b);
                match rings.remove(&number) {
                    Some(open) => {
                        if open.atom == atom || molecule.has_bond(open.atom, atom) {
                            return Err(parse_error(position, "ring closure duplicates a bond"));
                        }
                        let symbol = match (open.bond, bond) {
                            (Some(a), Some(b)) if a.order() != b.order() => {
                                return Err(parse_error(
                                    position,
                                    format!("ring {} has conflicting bond orders", number),
                                ));
                            }
                            (a, b) => a.or(b),
                        };
                        let order = symbol.map(BondSymbol::order).unwrap_or_else(|| {
                            implied_order(
                                molecule.atoms[open.atom].aromatic,
                                molecule.atoms[atom].aromatic,
                            )
                        });
                        molecule.add_bond(open.atom, atom, order);
                    }
                    None => {
                        rings.insert(
                            number,
                            OpenRing {
                                atom,
                                bond,
                                position,
                            },
                        );
                    }
                }
            }
            Token::Open => {
                let Some(atom) = prev else {
                    return Err(parse_error(position, "branch without a preceding atom"));
                };
                if let Some((at, _)) = pending {
                    return Err(parse_error(at, "bond before a branch"));
                }
                branches.push((atom, position));
            }
            Token::Close => {
                let Some((atom, _)) = branches.pop() else {
                    return Err(parse_error(position, "unmatched ')'"));
                };
                if let Some((at, _)) = pending {
                    return Err(parse_error(at, "dangling bond"));
                }
                if prev == Some(atom) {
                    return Err(parse_error(position, "empty branch"));
                }
                prev = Some(atom);
            }
            Token::Dot => {
                if prev.is_none() {
                    return Err(parse_error(position, "empty fragment"));
                }
                if let Some((at, _)) = pending {
                    return Err(parse_error(at, "dangling bond"));
                }
                prev = None;
            }
        }
    }

    if let Some((at, _)) = pending {
        return Err(parse_error(at, "dangling bond"));
    }
    if let Some(&(_, at)) = branches.last() {
        return Err(parse_error(at, "unclosed branch"));
    }
    if let Some((number, open)) = rings.iter().min_by_key(|(_, open)| open.position) {
        return Err(parse_error(
            open.position,
            format!("ring {} is never closed", number),
        ));
    }
    if molecule.atoms.is_empty() {
        return Err(parse_error(end, "no atoms"));
    }
    Ok(molecule)
}

/// Bond order when no symbol is written
fn implied_order(a_aromatic: bool, b_aromatic: bool) -> BondOrder {
    if a_aromatic && b_aromatic {
        BondOrder::Aromatic
    } else {
        BondOrder::Single
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formula(smiles: &str) -> String {
        parse_smiles(smiles).unwrap().formula()
    }

    #[test]
    fn test_kekule_benzene() {
        let mol = parse_smiles("C1=CC=CC=C1").unwrap();
        assert_eq!(mol.atoms.len(), 6);
        assert_eq!(mol.bonds.len(), 6);
        assert_eq!(mol.formula(), "C6H6");
    }

    #[test]
    fn test_aromatic_benzene() {
        assert_eq!(formula("c1ccccc1"), "C6H6");
    }

    #[test]
    fn test_common_molecules() {
        assert_eq!(formula("CCO"), "C2H6O");
        assert_eq!(formula("CC(=O)O"), "C2H4O2");
        assert_eq!(formula("c1ccncc1"), "C5H5N");
        assert_eq!(formula("c1ccsc1"), "C4H4S");
        assert_eq!(formula("c1cc[nH]c1"), "C4H5N");
        assert_eq!(formula("ClC(Cl)Cl"), "CHCl3");
        assert_eq!(formula("C#N"), "CHN");
        // caffeine
        assert_eq!(formula("CN1C=NC2=C1C(=O)N(C(=O)N2C)C"), "C8H10N4O2");
        // naphthalene, fused aromatic junctions carry no hydrogen
        assert_eq!(formula("c1ccc2ccccc2c1"), "C10H8");
    }

    #[test]
    fn test_bracket_atoms() {
        assert_eq!(formula("[NH4+]"), "H4N");
        assert_eq!(formula("[Na+].[Cl-]"), "ClNa");
        assert_eq!(formula("[13CH4]"), "CH4");
        assert_eq!(formula("C[C@@H](N)C(=O)O"), "C3H7NO2");
        let mol = parse_smiles("[O-2]").unwrap();
        assert_eq!(mol.atoms[0].charge, -2);
        let mol = parse_smiles("[Fe++]").unwrap();
        assert_eq!(mol.atoms[0].charge, 2);
    }

    #[test]
    fn test_charge_limits() {
        let mol = parse_smiles("[C-15]").unwrap();
        assert_eq!(mol.atoms[0].charge, -15);
        let mol = parse_smiles(&format!("[C{}]", "+".repeat(15))).unwrap();
        assert_eq!(mol.atoms[0].charge, 15);

        for input in [
            format!("[C{}]", "-".repeat(128)),
            format!("[C{}]", "+".repeat(200)),
            format!("[C{}]", "-".repeat(16)),
            "[C+16]".to_string(),
            "[C-128]".to_string(),
            "[C+99999999999999999999]".to_string(),
        ] {
            assert!(
                matches!(parse_smiles(&input), Err(RenderError::Parse { .. })),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_percent_ring_closure() {
        assert_eq!(formula("C%10CCCCC%10"), "C6H12");
    }

    #[test]
    fn test_directional_bonds() {
        assert_eq!(formula("F/C=C/F"), "C2H2F2");
    }

    #[test]
    fn test_malformed_inputs() {
        assert!(matches!(parse_smiles("("), Err(RenderError::Parse { .. })));
        assert!(matches!(parse_smiles("C("), Err(RenderError::Parse { .. })));
        assert!(matches!(parse_smiles("C)"), Err(RenderError::Parse { .. })));
        assert!(matches!(parse_smiles("C()C"), Err(RenderError::Parse { .. })));
        assert!(matches!(parse_smiles("C1CC"), Err(RenderError::Parse { .. })));
        assert!(matches!(parse_smiles("C=="), Err(RenderError::Parse { .. })));
        assert!(matches!(parse_smiles("C="), Err(RenderError::Parse { .. })));
        assert!(matches!(parse_smiles("[Xx]"), Err(RenderError::Parse { .. })));
        assert!(matches!(parse_smiles("Q"), Err(RenderError::Parse { .. })));
        assert!(matches!(parse_smiles(".C"), Err(RenderError::Parse { .. })));
        assert!(matches!(parse_smiles("C11"), Err(RenderError::Parse { .. })));
    }

    #[test]
    fn test_error_position() {
        match parse_smiles("CCQ") {
            Err(RenderError::Parse { position, .. }) => assert_eq!(position, 2),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_smiles("   "), Err(RenderError::EmptyNotation));
    }
}
