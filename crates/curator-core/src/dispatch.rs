//! Runs render and backend effects on the tokio runtime
//!
//! Each effect becomes its own task; results come back as [`Completion`]s
//! on a channel in whatever order they finish. Nothing is cancelled: a
//! completion whose receiver is gone (the page was replaced) is dropped.

use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::backend::Backend;
use crate::config::{CuratorConfig, EngineKind};
use crate::coordinator::Mutation;
use crate::render::{LocalEngine, RemoteEngine, RenderTicket, StructureEngine};
use crate::session::{Completion, Effect};

/// Spawns render and backend work
#[derive(Clone)]
pub struct Dispatcher {
    backend: Arc<dyn Backend>,
    engine: Arc<dyn StructureEngine>,
    tx: UnboundedSender<Completion>,
}

impl Dispatcher {
    pub fn new(
        backend: Arc<dyn Backend>,
        engine: Arc<dyn StructureEngine>,
    ) -> (Self, UnboundedReceiver<Completion>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                backend,
                engine,
                tx,
            },
            rx,
        )
    }

    /// Pick the engine the configuration names
    pub fn from_config(
        backend: Arc<dyn Backend>,
        config: &CuratorConfig,
    ) -> (Self, UnboundedReceiver<Completion>) {
        let engine: Arc<dyn StructureEngine> = match config.render.engine {
            EngineKind::Local => Arc::new(LocalEngine),
            EngineKind::Remote => Arc::new(RemoteEngine::new(backend.clone())),
        };
        Self::new(backend, engine)
    }

    pub fn backend(&self) -> &Arc<dyn Backend> {
        &self.backend
    }

    pub fn render(&self, ticket: RenderTicket) -> JoinHandle<()> {
        let engine = self.engine.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = ticket.run(engine.as_ref()).await;
            let _ = tx.send(Completion::Rendered { ticket, result });
        })
    }

    pub fn mutate(&self, mutation: Mutation) -> JoinHandle<()> {
        let backend = self.backend.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let action = mutation.action();
            let result = mutation.send(backend.as_ref()).await;
            let _ = tx.send(Completion::Mutated { action, result });
        })
    }

    /// Start the asynchronous effects and hand back the ones the front end
    /// must handle itself (notices, confirmations, navigation)
    pub fn run(&self, effects: Vec<Effect>) -> Vec<Effect> {
        let mut rest = Vec::new();
        for effect in effects {
            match effect {
                Effect::Render(ticket) => {
                    self.render(ticket);
                }
                Effect::Dispatch(mutation) => {
                    self.mutate(mutation);
                }
                other => rest.push(other),
            }
        }
        rest
    }
}
