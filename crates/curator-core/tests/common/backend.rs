//! Recording mock backend

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use curator_core::{Backend, Direction, TransportError};
use curator_domain::{
    DeleteRequest, LocationResponse, MutationRequest, NavigateRequest, PageState,
    StructureRequest, StructureResponse,
};
use tokio::sync::Semaphore;

/// A request the mock received
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Navigate(Direction, NavigateRequest),
    Add(MutationRequest),
    Delete(DeleteRequest),
    Render(StructureRequest),
    LoadPage(String),
}

/// Backend that records every call and answers from canned responses
pub struct MockBackend {
    calls: Mutex<Vec<Call>>,
    location: Mutex<Option<String>>,
    molblock: Mutex<Option<String>>,
    pages: Mutex<Vec<(String, PageState)>>,
    unreachable: AtomicBool,
    /// When set, every call waits for a permit before answering
    gate: Option<Arc<Semaphore>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            location: Mutex::new(None),
            molblock: Mutex::new(None),
            pages: Mutex::new(Vec::new()),
            unreachable: AtomicBool::new(false),
            gate: None,
        }
    }

    /// Mock whose responses are held until permits are added to the gate
    pub fn gated() -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        let mut backend = Self::new();
        backend.gate = Some(gate.clone());
        (backend, gate)
    }

    pub fn respond_with_location(&self, location: &str) {
        *self.location.lock().unwrap() = Some(location.to_string());
    }

    pub fn respond_with_molblock(&self, molblock: &str) {
        *self.molblock.lock().unwrap() = Some(molblock.to_string());
    }

    pub fn serve_page(&self, location: &str, page: PageState) {
        self.pages.lock().unwrap().push((location.to_string(), page));
    }

    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    async fn answer(&self, call: Call) -> Result<(), TransportError> {
        self.calls.lock().unwrap().push(call);
        if let Some(gate) = &self.gate {
            gate.acquire()
                .await
                .map_err(|_| TransportError::Timeout)?
                .forget();
        }
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(TransportError::RequestFailed {
                message: "connection refused".to_string(),
            });
        }
        Ok(())
    }

    fn location_response(&self) -> LocationResponse {
        LocationResponse {
            url: self.location.lock().unwrap().clone(),
        }
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn navigate(
        &self,
        direction: Direction,
        request: NavigateRequest,
    ) -> Result<LocationResponse, TransportError> {
        self.answer(Call::Navigate(direction, request)).await?;
        Ok(self.location_response())
    }

    async fn add_compound(
        &self,
        request: MutationRequest,
    ) -> Result<LocationResponse, TransportError> {
        self.answer(Call::Add(request)).await?;
        Ok(self.location_response())
    }

    async fn delete_compounds(
        &self,
        request: DeleteRequest,
    ) -> Result<LocationResponse, TransportError> {
        self.answer(Call::Delete(request)).await?;
        Ok(self.location_response())
    }

    async fn render_structure(
        &self,
        request: StructureRequest,
    ) -> Result<StructureResponse, TransportError> {
        self.answer(Call::Render(request)).await?;
        let molblock = self.molblock.lock().unwrap().clone();
        Ok(StructureResponse {
            success: i32::from(molblock.is_some()),
            molblock,
        })
    }

    async fn load_page(&self, location: &str) -> Result<PageState, TransportError> {
        self.answer(Call::LoadPage(location.to_string())).await?;
        self.pages
            .lock()
            .unwrap()
            .iter()
            .find(|(served, _)| served == location)
            .map(|(_, page)| page.clone())
            .ok_or(TransportError::Status { status: 404 })
    }
}
