//! Curator Core - editor state machine for compound curation
//!
//! This crate provides everything behind the compound editor except drawing
//! pixels:
//!
//! - **Store**: ordered compound records with stable keys and Single/Multi selection
//! - **View**: one projection of the store onto detail panel, tab strip and dropdown menu
//! - **Render**: native SMILES parsing, molecular formula, 2D depiction, per-record render slots
//! - **Coordinator**: add/delete/navigate requests and interpretation of their responses
//! - **Backend**: the server protocol as a trait, with a reqwest implementation
//! - **Session**: composes the above for one page; events in, effects out
//! - **Dispatch**: runs render and backend effects as tokio tasks
//! - **Config**: backend endpoints, render policy and view settings
//!
//! # Flow
//!
//! ```text
//! key/mouse ─► EditorEvent ─► EditorSession ─► Effect ─► Dispatcher ─► Completion
//!                                  ▲                                       │
//!                                  └───────────────────────────────────────┘
//! ```
//!
//! A success response carrying a location ends the session: the front end
//! loads the new page and hydrates a fresh [`EditorSession`].

pub mod backend;
pub mod config;
pub mod coordinator;
pub mod dispatch;
pub mod error;
pub mod notice;
pub mod render;
pub mod session;
pub mod store;
pub mod view;

pub use backend::{Backend, Direction, HttpBackend};
pub use config::{
    BackendConfig, CuratorConfig, EndpointConfig, EngineKind, RenderConfig, RenderPolicy,
    ViewConfig,
};
pub use coordinator::{Action, DeletePlan, Mutation, MutationCoordinator, Outcome};
pub use dispatch::Dispatcher;
pub use error::{ConfigError, CuratorError, RenderError, Result, StoreError, TransportError};
pub use notice::Notice;
pub use render::{
    Depiction, Drawing, LocalEngine, RemoteEngine, RenderPipeline, RenderRequest, RenderSlot,
    RenderTicket, StructureEngine,
};
pub use session::{Completion, EditorEvent, EditorSession, Effect};
pub use store::{RecordKey, RecordStore, Removal, SelectionState};
pub use view::{Menu, MenuEntry, PanelRow, Tab, TabStatus, ViewModel, ViewSynchronizer};
