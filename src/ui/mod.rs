pub mod controller;
pub mod state;
pub mod view;

pub use controller::UiController;
pub use state::{
    AppState, GenerationResult, RequestState, StateSnapshot, SubmitOutcome, Ticket,
    EMPTY_PROMPT_MESSAGE, UNKNOWN_ERROR_MESSAGE,
};
pub use view::{render, Page, Panel};
