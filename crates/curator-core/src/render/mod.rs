//! Structure rendering
//!
//! Notation strings are parsed by a native SMILES reader into a molecular
//! graph, which yields the molecular formula and a 2D depiction. The
//! [`RenderPipeline`] owns one slot per record and decides when an engine
//! needs to run at all.

pub mod engine;
pub mod molecule;
pub mod molfile;
pub mod pipeline;
pub mod smiles;

pub use engine::{Drawing, LocalEngine, RemoteEngine, StructureEngine};
pub use molfile::{Depiction, PlacedAtom};
pub use pipeline::{RenderPipeline, RenderRequest, RenderSlot, RenderTicket, BLANK_FORMULA};
pub use smiles::parse_smiles;
