//! Session state and background work orchestration.
//!
//! The session owns the input text and its derived state, debounces search,
//! and runs imports and exports off the control task under a shared busy
//! flag.

pub mod busy;
pub mod command;
pub mod debounce;
pub mod event;
pub mod tokenization;

pub use busy::{BusyFlag, BusyGuard};
pub use command::Command;
pub use debounce::Debouncer;
pub use event::{EventOutcome, Notification, NotificationLevel};
pub use tokenization::{SessionBuilder, SessionState, TokenizationSession};
