use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{
    gemini::ImageGenerator,
    models::GeneratedImage,
    ui::{
        state::{AppState, SubmitOutcome, Ticket},
        view::{self, Page},
    },
};

/// Owns the single UI state and drives the generator.
///
/// The state lock is never held across an await; at most one request is
/// in flight because `submit` refuses to start another while generating.
pub struct UiController {
    state: Mutex<AppState>,
    generator: Arc<dyn ImageGenerator>,
}

impl UiController {
    pub fn new(generator: Arc<dyn ImageGenerator>) -> Self {
        Self {
            state: Mutex::new(AppState::new()),
            generator,
        }
    }

    fn lock(&self) -> MutexGuard<'_, AppState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> AppState {
        self.lock().clone()
    }

    pub fn page(&self) -> Page {
        view::render(&self.lock())
    }

    pub fn current_image(&self) -> Option<GeneratedImage> {
        self.lock().image().cloned()
    }

    pub fn edit_prompt(&self, text: impl Into<String>) {
        self.lock().edit_prompt(text);
    }

    /// Applies the submit transition without sending anything.
    pub fn submit(&self) -> SubmitOutcome {
        let outcome = self.lock().submit();
        log_outcome(&outcome);
        outcome
    }

    /// Sets the prompt and submits under one lock. Nothing changes while a
    /// request is in flight.
    pub fn submit_prompt(&self, text: impl Into<String>) -> SubmitOutcome {
        let outcome = self.lock().submit_prompt(text);
        log_outcome(&outcome);
        outcome
    }

    /// Sends the ticket's prompt and stores whatever comes back.
    pub async fn run(&self, ticket: Ticket) {
        let outcome = self.generator.generate_image(&ticket.prompt).await;
        match &outcome {
            Ok(_) => log::info!("Generation finished [req:{}]", ticket.request_id),
            Err(e) => log::error!("Generation failed [req:{}]: {}", ticket.request_id, e),
        }
        self.lock().complete(outcome);
    }

    pub async fn submit_and_wait(&self) -> SubmitOutcome {
        let outcome = self.submit();
        if let SubmitOutcome::Started(ticket) = &outcome {
            self.run(ticket.clone()).await;
        }
        outcome
    }

    /// Like [`submit_and_wait`](Self::submit_and_wait) but runs the request on
    /// a tokio task and returns as soon as the state has changed.
    pub fn spawn_submit(self: &Arc<Self>) -> SubmitOutcome {
        let outcome = self.submit();
        self.spawn_started(&outcome);
        outcome
    }

    /// [`submit_prompt`](Self::submit_prompt) with the request on a tokio task.
    pub fn spawn_submit_prompt(self: &Arc<Self>, text: impl Into<String>) -> SubmitOutcome {
        let outcome = self.submit_prompt(text);
        self.spawn_started(&outcome);
        outcome
    }

    fn spawn_started(self: &Arc<Self>, outcome: &SubmitOutcome) {
        if let SubmitOutcome::Started(ticket) = outcome {
            let controller = Arc::clone(self);
            let ticket = ticket.clone();
            tokio::spawn(async move { controller.run(ticket).await });
        }
    }
}

fn log_outcome(outcome: &SubmitOutcome) {
    match outcome {
        SubmitOutcome::Started(ticket) => {
            log::info!("Generation started [req:{}]", ticket.request_id)
        }
        SubmitOutcome::Rejected(message) => log::debug!("Submit rejected: {}", message),
        SubmitOutcome::Ignored => log::debug!("Submit ignored, a request is in flight"),
    }
}
