//! Structure-drawing engines

use std::sync::Arc;

use async_trait::async_trait;
use curator_domain::StructureRequest;

use super::molfile::{layout, read_molfile, write_molfile, Depiction};
use super::smiles::parse_smiles;
use crate::backend::Backend;
use crate::error::RenderError;

/// A successfully drawn structure
#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    /// Hill-order molecular formula
    pub formula: String,
    pub depiction: Depiction,
    /// The structure as a V2000 MOL block
    pub molblock: String,
}

/// Converts a non-empty, trimmed notation string into a drawing
#[async_trait]
pub trait StructureEngine: Send + Sync {
    async fn draw(&self, notation: &str) -> Result<Drawing, RenderError>;
}

/// Parses and lays out structures in-process
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalEngine;

impl LocalEngine {
    pub fn draw_now(&self, notation: &str) -> Result<Drawing, RenderError> {
        let molecule = parse_smiles(notation)?;
        let depiction = layout(&molecule);
        let molblock = write_molfile(&molecule, &depiction);
        Ok(Drawing {
            formula: molecule.formula(),
            depiction,
            molblock,
        })
    }
}

#[async_trait]
impl StructureEngine for LocalEngine {
    async fn draw(&self, notation: &str) -> Result<Drawing, RenderError> {
        self.draw_now(notation)
    }
}

/// Asks the backend's structure endpoint for the MOL block.
///
/// The notation is still parsed locally first: malformed input never costs a
/// round trip, and the formula comes from the local graph.
pub struct RemoteEngine {
    backend: Arc<dyn Backend>,
}

impl RemoteEngine {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl StructureEngine for RemoteEngine {
    async fn draw(&self, notation: &str) -> Result<Drawing, RenderError> {
        let molecule = parse_smiles(notation)?;
        let response = self
            .backend
            .render_structure(StructureRequest {
                smiles: notation.to_string(),
            })
            .await
            .map_err(|e| RenderError::Engine(e.to_string()))?;

        let molblock = response
            .rendered()
            .ok_or_else(|| RenderError::Engine("server could not process the structure".to_string()))?;
        let depiction = read_molfile(&molblock)?;

        Ok(Drawing {
            formula: molecule.formula(),
            depiction,
            molblock,
        })
    }
}
