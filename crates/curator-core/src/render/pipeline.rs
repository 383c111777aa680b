//! Per-record rendering slots
//!
//! Slots are keyed by [`RecordKey`], never by position, so a result that
//! arrives after its record was removed or renumbered cannot land on another
//! record. Each dispatched render carries a generation number; only the most
//! recent request for a slot may write to it.

use std::collections::HashMap;

use super::engine::{Drawing, StructureEngine};
use crate::error::RenderError;
use crate::store::RecordKey;

/// Placeholder formula text of an empty slot
pub const BLANK_FORMULA: &str = " ";

/// One render to run against an engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTicket {
    pub key: RecordKey,
    pub generation: u64,
    /// Trimmed notation, captured when the render was requested
    pub notation: String,
}

impl RenderTicket {
    pub async fn run(&self, engine: &dyn StructureEngine) -> Result<Drawing, RenderError> {
        engine.draw(&self.notation).await
    }
}

/// What a render request turned into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderRequest {
    /// Same text as the last successful or the pending render
    Skipped,
    /// Empty notation: surface cleared without calling an engine
    Cleared,
    /// Run this ticket and hand the result to [`RenderPipeline::complete`]
    Dispatch(RenderTicket),
}

/// Rendering state of one record
#[derive(Debug, Clone)]
pub struct RenderSlot {
    /// Last successful drawing; kept when a later render fails
    pub drawing: Option<Drawing>,
    pub formula: String,
    /// Inline error from the most recent failed render
    pub error: Option<RenderError>,
    last_rendered: Option<String>,
    pending: Option<(u64, String)>,
}

impl Default for RenderSlot {
    fn default() -> Self {
        Self {
            drawing: None,
            formula: BLANK_FORMULA.to_string(),
            error: None,
            last_rendered: None,
            pending: None,
        }
    }
}

impl RenderSlot {
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Notation of the drawing currently on the surface
    pub fn rendered_notation(&self) -> Option<&str> {
        self.last_rendered.as_deref()
    }
}

/// All rendering slots of a page
#[derive(Debug, Default)]
pub struct RenderPipeline {
    slots: HashMap<RecordKey, RenderSlot>,
    next_generation: u64,
}

impl RenderPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self, key: RecordKey) -> Option<&RenderSlot> {
        self.slots.get(&key)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Drop the slots of removed records; their in-flight results are discarded
    pub fn forget(&mut self, keys: &[RecordKey]) {
        for key in keys {
            self.slots.remove(key);
        }
    }

    /// Ask for `notation` to be rendered into the slot of `key`
    pub fn request(&mut self, key: RecordKey, notation: &str) -> RenderRequest {
        let notation = notation.trim();
        let slot = self.slots.entry(key).or_default();

        if notation.is_empty() {
            if slot.last_rendered.as_deref() == Some("") && slot.pending.is_none() {
                return RenderRequest::Skipped;
            }
            slot.drawing = None;
            slot.formula = BLANK_FORMULA.to_string();
            slot.error = None;
            slot.pending = None;
            slot.last_rendered = Some(String::new());
            tracing::debug!(%key, "render slot cleared");
            return RenderRequest::Cleared;
        }

        if slot.last_rendered.as_deref() == Some(notation) && slot.pending.is_none() {
            // Back to the text of the current drawing: a later failure no longer applies
            if slot.error.take().is_some() {
                tracing::debug!(%key, "render error cleared, text matches drawing");
            }
            return RenderRequest::Skipped;
        }
        if let Some((_, pending)) = &slot.pending {
            if pending == notation {
                return RenderRequest::Skipped;
            }
        }

        self.next_generation += 1;
        let generation = self.next_generation;
        slot.pending = Some((generation, notation.to_string()));
        tracing::debug!(%key, generation, notation, "render dispatched");
        RenderRequest::Dispatch(RenderTicket {
            key,
            generation,
            notation: notation.to_string(),
        })
    }

    /// Apply a finished render. Returns whether the result was applied;
    /// results for removed records or superseded requests are dropped.
    pub fn complete(&mut self, ticket: &RenderTicket, result: Result<Drawing, RenderError>) -> bool {
        let Some(slot) = self.slots.get_mut(&ticket.key) else {
            tracing::debug!(key = %ticket.key, "render result for removed record discarded");
            return false;
        };
        match &slot.pending {
            Some((generation, _)) if *generation == ticket.generation => {}
            _ => {
                tracing::debug!(key = %ticket.key, generation = ticket.generation, "stale render result discarded");
                return false;
            }
        }
        slot.pending = None;

        match result {
            Ok(drawing) => {
                tracing::debug!(key = %ticket.key, formula = %drawing.formula, "render succeeded");
                slot.formula = drawing.formula.clone();
                slot.drawing = Some(drawing);
                slot.error = None;
                slot.last_rendered = Some(ticket.notation.clone());
            }
            Err(error) => {
                tracing::warn!(key = %ticket.key, %error, "render failed");
                slot.error = Some(error);
            }
        }
        true
    }
}
