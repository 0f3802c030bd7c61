// src/lib.rs

pub mod config;
pub mod constants;
pub mod controller;
pub mod errors;
pub mod input;
pub mod logging;
pub mod message;
pub mod message_view;
pub mod responder;
pub mod transcript;
pub mod ui;

pub use controller::{SubmissionController, Trigger};
pub use errors::{RulebotError, RulebotResult};
pub use message::{Message, Sender};
pub use responder::select_response;
