//! Editor session
//!
//! Composes the store, view synchronizer, render pipeline and coordinator
//! for one page. Front ends feed it [`EditorEvent`]s and [`Completion`]s
//! and carry out the [`Effect`]s it returns; the session itself never
//! blocks or performs I/O. Every handler completes its state change before
//! returning, so the views are always derived from a settled store.

use curator_domain::{Article, ArticleEdit, CompoundEdit, CompoundRecord, DeleteRequest, LocationResponse, PageState};

use crate::backend::Direction;
use crate::config::{CuratorConfig, RenderPolicy};
use crate::coordinator::{Action, DeletePlan, Mutation, MutationCoordinator, Outcome};
use crate::error::{RenderError, StoreError, TransportError};
use crate::notice::Notice;
use crate::render::{Drawing, RenderPipeline, RenderRequest, RenderTicket};
use crate::store::RecordStore;
use crate::view::{ViewModel, ViewSynchronizer};

/// A user interaction
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// Show a record (tab click or menu pick)
    Select(usize),
    /// Flip a record's checkbox
    ToggleCheck(usize),
    /// Name field of the active record changed
    EditName(String),
    /// Name field lost focus
    CommitName,
    /// Notation field of the active record changed
    EditNotation(String),
    /// Notation field lost focus
    CommitNotation,
    EditSourceOrganism(String),
    SetCurated(bool),
    EditArticle(ArticleEdit),
    /// Write one source organism into every record
    ReplaceSourceOrganism(String),
    /// Drop the targeted records from the page without contacting the backend
    RemoveTargets,
    AddCompound,
    Delete,
    /// Answer to a pending delete confirmation
    ConfirmDelete(bool),
    Navigate(Direction),
}

/// Result of asynchronous work started by an [`Effect`]
#[derive(Debug, Clone)]
pub enum Completion {
    Rendered {
        ticket: RenderTicket,
        result: Result<Drawing, RenderError>,
    },
    Mutated {
        action: Action,
        result: Result<LocationResponse, TransportError>,
    },
}

/// Work for the front end
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Run a render and report back with [`Completion::Rendered`]
    Render(RenderTicket),
    /// Send a request and report back with [`Completion::Mutated`]
    Dispatch(Mutation),
    /// Ask the curator to confirm deleting `count` records
    Confirm { count: usize },
    Notify(Notice),
    /// Leave this page for the one at the location
    Navigate(String),
}

/// One page of the editor
#[derive(Debug)]
pub struct EditorSession {
    article: Article,
    store: RecordStore,
    view: ViewSynchronizer,
    pipeline: RenderPipeline,
    coordinator: MutationCoordinator,
    policy: RenderPolicy,
    pending_delete: Option<DeleteRequest>,
}

impl EditorSession {
    /// Hydrate from a page's initial state. The returned effects render
    /// every record.
    pub fn hydrate(page: PageState, config: &CuratorConfig) -> (Self, Vec<Effect>) {
        let mut store = RecordStore::new(page.compounds);
        if let Some(index) = page.session_compound {
            if !store.set_active(index) {
                tracing::debug!(index, "session compound out of range, showing first");
            }
        }

        let mut view = ViewSynchronizer::new(config.view.clone());
        view.hydrate(&store);

        let mut session = Self {
            article: page.article,
            store,
            view,
            pipeline: RenderPipeline::new(),
            coordinator: MutationCoordinator::new(page.path),
            policy: config.render.policy,
            pending_delete: None,
        };

        let requests: Vec<_> = session
            .store
            .iter()
            .map(|(_, key, record)| (key, record.notation.clone()))
            .collect();
        let effects = requests
            .into_iter()
            .filter_map(|(key, notation)| session.render_effect(key, &notation))
            .collect();

        tracing::info!(
            path = session.coordinator.path(),
            count = session.store.len(),
            active = session.store.active(),
            "page hydrated"
        );
        (session, effects)
    }

    pub fn article(&self) -> &Article {
        &self.article
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn pipeline(&self) -> &RenderPipeline {
        &self.pipeline
    }

    pub fn path(&self) -> &str {
        self.coordinator.path()
    }

    pub fn awaiting_confirmation(&self) -> bool {
        self.pending_delete.is_some()
    }

    /// Derive the panel, tabs and menu
    pub fn view(&self) -> ViewModel {
        self.view.project(&self.store, &self.pipeline, &self.article)
    }

    fn render_effect(&mut self, key: crate::store::RecordKey, notation: &str) -> Option<Effect> {
        match self.pipeline.request(key, notation) {
            RenderRequest::Dispatch(ticket) => Some(Effect::Render(ticket)),
            RenderRequest::Cleared | RenderRequest::Skipped => None,
        }
    }

    fn render_active(&mut self) -> Vec<Effect> {
        let index = self.store.active();
        let (Some(key), Some(record)) = (self.store.key(index), self.store.get(index)) else {
            return Vec::new();
        };
        let notation = record.notation.clone();
        self.render_effect(key, &notation).into_iter().collect()
    }

    fn edit_active(&mut self, edit: CompoundEdit) {
        let index = self.store.active();
        if let Err(error) = self.store.edit(index, edit) {
            tracing::warn!(%error, "edit of active record failed");
        }
    }

    /// Apply a user interaction
    pub fn handle(&mut self, event: EditorEvent) -> Vec<Effect> {
        match event {
            EditorEvent::Select(index) => {
                if index >= self.store.len() {
                    return Vec::new();
                }
                self.view.on_select(&self.store, index);
                self.store.set_active(index);
                Vec::new()
            }
            EditorEvent::ToggleCheck(index) => {
                self.store.toggle_select(index);
                Vec::new()
            }
            EditorEvent::EditName(name) => {
                self.edit_active(CompoundEdit::Name(name));
                Vec::new()
            }
            EditorEvent::CommitName => {
                let index = self.store.active();
                if let (Some(key), Some(record)) = (self.store.key(index), self.store.get(index)) {
                    let name = record.name.clone();
                    self.view.commit_label(key, &name);
                }
                Vec::new()
            }
            EditorEvent::EditNotation(notation) => {
                self.edit_active(CompoundEdit::Notation(notation));
                match self.policy {
                    RenderPolicy::OnKeystroke => self.render_active(),
                    RenderPolicy::OnBlur => Vec::new(),
                }
            }
            EditorEvent::CommitNotation => self.render_active(),
            EditorEvent::EditSourceOrganism(value) => {
                self.edit_active(CompoundEdit::SourceOrganism(value));
                Vec::new()
            }
            EditorEvent::SetCurated(curated) => {
                self.edit_active(CompoundEdit::Curated(curated));
                Vec::new()
            }
            EditorEvent::EditArticle(edit) => {
                self.article.apply(edit);
                Vec::new()
            }
            EditorEvent::ReplaceSourceOrganism(value) => {
                if self.store.replace_source_organism(&value) {
                    Vec::new()
                } else {
                    vec![Effect::Notify(Notice::EmptySourceOrganism)]
                }
            }
            EditorEvent::RemoveTargets => self.remove_targets(),
            EditorEvent::AddCompound => {
                vec![Effect::Dispatch(
                    self.coordinator.add_request(&self.article, &self.store),
                )]
            }
            EditorEvent::Delete => match self.coordinator.plan_delete(&self.article, &self.store) {
                Ok(DeletePlan::Immediate(request)) => vec![Effect::Dispatch(Mutation::Delete(request))],
                Ok(DeletePlan::Confirm(request)) => {
                    let count = request.ids.len();
                    self.pending_delete = Some(request);
                    vec![Effect::Confirm { count }]
                }
                Err(_) => vec![Effect::Notify(Notice::LastRecord)],
            },
            EditorEvent::ConfirmDelete(confirmed) => match self.pending_delete.take() {
                Some(request) if confirmed => vec![Effect::Dispatch(Mutation::Delete(request))],
                Some(_) => {
                    tracing::debug!("delete cancelled");
                    Vec::new()
                }
                None => Vec::new(),
            },
            EditorEvent::Navigate(direction) => {
                vec![Effect::Dispatch(self.coordinator.navigate_request(direction))]
            }
        }
    }

    fn remove_targets(&mut self) -> Vec<Effect> {
        let targets = self.store.targets();
        match self.store.remove(&targets) {
            Ok(removal) => {
                self.pipeline.forget(&removal.keys);
                self.view.forget(&removal.keys);
                self.view.scroll_to(&self.store, self.store.active());
                Vec::new()
            }
            Err(StoreError::MinimumOneRecord) => vec![Effect::Notify(Notice::LastRecord)],
            Err(error) => {
                tracing::warn!(%error, "remove failed");
                Vec::new()
            }
        }
    }

    /// Apply the result of a render or a backend request
    pub fn complete(&mut self, completion: Completion) -> Vec<Effect> {
        match completion {
            Completion::Rendered { ticket, result } => {
                self.pipeline.complete(&ticket, result);
                Vec::new()
            }
            Completion::Mutated { action, result } => {
                match MutationCoordinator::resolve(action, result) {
                    Outcome::Navigate(location) => vec![Effect::Navigate(location)],
                    Outcome::Notify(notice) => vec![Effect::Notify(notice)],
                }
            }
        }
    }

    pub fn tab_viewport(&self) -> u16 {
        self.view.viewport()
    }

    /// Width, in columns, the tab strip is drawn at
    pub fn set_tab_viewport(&mut self, width: u16) {
        self.view.set_viewport(&self.store, width);
    }

    /// Append a blank record locally and show it
    pub fn push_blank(&mut self) -> usize {
        let key = self.store.push(CompoundRecord::default());
        self.view.commit_label(key, "");
        let index = self.store.len() - 1;
        self.view.on_select(&self.store, index);
        self.store.set_active(index);
        self.pipeline.request(key, "");
        index
    }
}
