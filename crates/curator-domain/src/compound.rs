//! Compound record domain model

use serde::{Deserialize, Serialize};

/// One chemical entity reported by an article.
///
/// `id` is the backend's row id and is `None` until the record has been saved.
/// `external_id` is the stable identifier assigned once the compound is known
/// to the reference database; records that carry one are "known" server-side.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    /// SMILES notation string
    #[serde(default, rename = "smiles")]
    pub notation: String,
    #[serde(default)]
    pub source_organism: String,
    #[serde(default, rename = "curated_compound")]
    pub curated: bool,
    #[serde(default, rename = "npaid")]
    pub external_id: Option<i64>,
}

/// A single edit applied to a compound's form fields
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompoundEdit {
    Name(String),
    Notation(String),
    SourceOrganism(String),
    Curated(bool),
}

impl CompoundRecord {
    /// Create an unsaved record
    pub fn new(name: impl Into<String>, notation: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            notation: notation.into(),
            ..Default::default()
        }
    }

    /// Builder-style setter for the backend row id
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Builder-style setter for the external stable id
    pub fn with_external_id(mut self, external_id: i64) -> Self {
        self.external_id = Some(external_id);
        self
    }

    /// Builder-style setter for the source organism
    pub fn with_source_organism(mut self, organism: impl Into<String>) -> Self {
        self.source_organism = organism.into();
        self
    }

    /// Whether the reference database already knows this compound
    pub fn is_persisted(&self) -> bool {
        self.external_id.is_some()
    }

    pub fn apply(&mut self, edit: CompoundEdit) {
        match edit {
            CompoundEdit::Name(v) => self.name = v,
            CompoundEdit::Notation(v) => self.notation = v,
            CompoundEdit::SourceOrganism(v) => self.source_organism = v,
            CompoundEdit::Curated(v) => self.curated = v,
        }
    }

    /// The wire form sent with add/delete requests
    pub fn to_payload(&self) -> CompoundPayload {
        CompoundPayload {
            id: self.id,
            name: self.name.clone(),
            smiles: self.notation.clone(),
            source_organism: self.source_organism.clone(),
            curated_compound: self.curated,
        }
    }
}

/// Serialized compound fields posted to the backend
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundPayload {
    pub id: Option<i64>,
    pub name: String,
    pub smiles: String,
    pub source_organism: String,
    pub curated_compound: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_omits_external_id() {
        let record = CompoundRecord::new("Benzene", "c1ccccc1")
            .with_id(7)
            .with_external_id(1234);
        let json = serde_json::to_value(record.to_payload()).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["smiles"], "c1ccccc1");
        assert!(json.get("npaid").is_none());
    }

    #[test]
    fn test_hydrate_from_page_json() {
        let record: CompoundRecord = serde_json::from_str(
            r#"{"id": null, "name": "", "smiles": "CCO", "source_organism": "Streptomyces",
                "curated_compound": true, "npaid": 99}"#,
        )
        .unwrap();
        assert!(record.id.is_none());
        assert!(record.curated);
        assert!(record.is_persisted());
    }
}
