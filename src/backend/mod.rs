//! Access to the email assistant backend over HTTP

pub mod actor;
pub mod client;
pub mod error;
pub mod types;

pub use actor::{BackendCommand, BackendEvent, BackendHandle, spawn_backend_actor};
pub use client::BackendClient;
pub use types::{ActionKind, ActionTicket, Email, EmailId};
