//! Domain types for the compound curator
//!
//! This crate provides the data shared by the editor core and its front ends:
//! - Article: bibliographic metadata for the page being curated
//! - CompoundRecord: one chemical entity attached to the article
//! - Payloads: request/response shapes exchanged with the curation backend
//! - Identifiers: DOI and PubMed helpers
//! - Validation: field checks mirroring the backend's article form

pub mod article;
pub mod compound;
pub mod identifiers;
pub mod payload;
pub mod validation;

pub use article::*;
pub use compound::*;
pub use identifiers::*;
pub use payload::*;
pub use validation::*;
