//! Record collection store
//!
//! Owns the ordered compound records of the current article together with
//! the selection state. Records are addressed by position (`0..len`), which
//! stays contiguous after every removal. Each record also carries a
//! [`RecordKey`] that never changes and is never reused, so state derived
//! per record (rendered structures, committed labels) can survive
//! renumbering without being attached to the wrong record.
//!
//! All mutations are synchronous and are driven by discrete user events.

mod selection;

pub use selection::SelectionState;

use std::collections::BTreeSet;
use std::fmt;

use curator_domain::{CompoundEdit, CompoundRecord};

use crate::error::StoreError;

/// Stable identity of a record within one page session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordKey(u64);

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct Entry {
    key: RecordKey,
    record: CompoundRecord,
}

/// Keys of the records a removal took out, in their original order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    pub keys: Vec<RecordKey>,
    pub records: Vec<CompoundRecord>,
}

/// The ordered compound collection plus selection
#[derive(Debug, Clone)]
pub struct RecordStore {
    entries: Vec<Entry>,
    selection: SelectionState,
    next_key: u64,
}

impl RecordStore {
    /// Hydrate from the page's records.
    ///
    /// An empty list is padded with one blank record: the collection is never
    /// empty.
    pub fn new(records: Vec<CompoundRecord>) -> Self {
        let mut store = Self {
            entries: Vec::with_capacity(records.len().max(1)),
            selection: SelectionState::default(),
            next_key: 0,
        };
        for record in records {
            store.push(record);
        }
        if store.entries.is_empty() {
            store.push(CompoundRecord::default());
        }
        store
    }

    /// Append a record and return its key
    pub fn push(&mut self, record: CompoundRecord) -> RecordKey {
        let key = RecordKey(self.next_key);
        self.next_key += 1;
        self.entries.push(Entry { key, record });
        key
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false once constructed; present for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CompoundRecord> {
        self.entries.get(index).map(|e| &e.record)
    }

    pub fn key(&self, index: usize) -> Option<RecordKey> {
        self.entries.get(index).map(|e| e.key)
    }

    pub fn index_of(&self, key: RecordKey) -> Option<usize> {
        self.entries.iter().position(|e| e.key == key)
    }

    /// Records in order
    pub fn records(&self) -> impl Iterator<Item = &CompoundRecord> {
        self.entries.iter().map(|e| &e.record)
    }

    /// `(index, key, record)` triples in order
    pub fn iter(&self) -> impl Iterator<Item = (usize, RecordKey, &CompoundRecord)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| (i, e.key, &e.record))
    }

    /// Owned copy of every record, in order
    pub fn snapshot(&self) -> Vec<CompoundRecord> {
        self.records().cloned().collect()
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn active(&self) -> usize {
        self.selection.active()
    }

    pub fn active_record(&self) -> &CompoundRecord {
        // `active` is kept in range by every mutation
        &self.entries[self.selection.active()].record
    }

    /// Show `index` in Single mode. Out-of-range indices are ignored.
    ///
    /// Returns whether the index was applied.
    pub fn set_active(&mut self, index: usize) -> bool {
        if index >= self.entries.len() {
            tracing::debug!(index, len = self.entries.len(), "set_active out of range, ignored");
            return false;
        }
        self.selection = SelectionState::single(index);
        tracing::debug!(index, "active record changed");
        true
    }

    /// Flip the checkbox of `index`. Out-of-range indices are ignored.
    ///
    /// Returns whether the index was applied.
    pub fn toggle_select(&mut self, index: usize) -> bool {
        if index >= self.entries.len() {
            tracing::debug!(index, len = self.entries.len(), "toggle_select out of range, ignored");
            return false;
        }
        let was_multi = self.selection.is_multi();
        self.selection = self.selection.toggled(index);
        if was_multi != self.selection.is_multi() {
            tracing::debug!(multi = self.selection.is_multi(), "selection mode changed");
        }
        true
    }

    /// Indices an action applies to: the checked set in Multi mode, otherwise
    /// the active record
    pub fn targets(&self) -> Vec<usize> {
        match self.selection.checked() {
            Some(checked) => checked.iter().copied().collect(),
            None => vec![self.selection.active()],
        }
    }

    /// Apply a form edit to one record
    pub fn edit(&mut self, index: usize, edit: CompoundEdit) -> Result<(), StoreError> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfRange { index, len })?;
        entry.record.apply(edit);
        Ok(())
    }

    /// Write one source organism into every record. Blank values are ignored.
    ///
    /// Returns whether anything was written.
    pub fn replace_source_organism(&mut self, value: &str) -> bool {
        if value.trim().is_empty() {
            return false;
        }
        for entry in &mut self.entries {
            entry.record.source_organism = value.to_string();
        }
        tracing::info!(count = self.entries.len(), "replaced source organism on all records");
        true
    }

    /// Remove every record at `indices` in one step.
    ///
    /// Survivors keep their order and are renumbered contiguously; selection
    /// follows [`SelectionState::after_removal`]. Fails without changing
    /// anything if an index is out of range or if nothing would remain.
    pub fn remove(&mut self, indices: &[usize]) -> Result<Removal, StoreError> {
        let len = self.entries.len();
        let removed: BTreeSet<usize> = indices.iter().copied().collect();

        if let Some(&index) = removed.iter().find(|&&i| i >= len) {
            return Err(StoreError::IndexOutOfRange { index, len });
        }
        if removed.len() >= len {
            tracing::warn!(len, "refusing to remove every record");
            return Err(StoreError::MinimumOneRecord);
        }
        if removed.is_empty() {
            return Ok(Removal {
                keys: Vec::new(),
                records: Vec::new(),
            });
        }

        let mut keys = Vec::with_capacity(removed.len());
        let mut records = Vec::with_capacity(removed.len());
        let mut kept = Vec::with_capacity(len - removed.len());
        for (i, entry) in std::mem::take(&mut self.entries).into_iter().enumerate() {
            if removed.contains(&i) {
                keys.push(entry.key);
                records.push(entry.record);
            } else {
                kept.push(entry);
            }
        }
        self.entries = kept;
        self.selection = self.selection.after_removal(&removed);

        tracing::info!(
            removed = removed.len(),
            remaining = self.entries.len(),
            active = self.selection.active(),
            "records removed"
        );
        Ok(Removal { keys, records })
    }
}
