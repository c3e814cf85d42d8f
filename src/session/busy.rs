//! The session-level busy flag shared by import and export.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::error::{Operation, Result, TokenlensError};

const FREE: u8 = 0;
const IMPORT: u8 = 1;
const EXPORT: u8 = 2;

fn encode(operation: Operation) -> u8 {
    match operation {
        Operation::Import => IMPORT,
        Operation::Export => EXPORT,
    }
}

fn decode(state: u8) -> Option<Operation> {
    match state {
        IMPORT => Some(Operation::Import),
        EXPORT => Some(Operation::Export),
        _ => None,
    }
}

/// At most one import or export may hold the flag at a time.
///
/// Acquisition never waits: a second request fails immediately with
/// [`TokenlensError::Busy`].
#[derive(Debug, Clone, Default)]
pub struct BusyFlag {
    state: Arc<AtomicU8>,
}

impl BusyFlag {
    /// Create a free flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the flag for `operation`, or report what currently holds it.
    pub fn try_acquire(&self, operation: Operation) -> Result<BusyGuard> {
        match self.state.compare_exchange(
            FREE,
            encode(operation),
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) => Ok(BusyGuard {
                state: Arc::clone(&self.state),
                operation,
            }),
            Err(current) => Err(TokenlensError::busy(
                operation,
                decode(current).unwrap_or(operation),
            )),
        }
    }

    /// The operation holding the flag, if any.
    pub fn current(&self) -> Option<Operation> {
        decode(self.state.load(Ordering::Acquire))
    }

    /// Whether any operation holds the flag.
    pub fn is_busy(&self) -> bool {
        self.current().is_some()
    }
}

/// Holds the busy flag until dropped.
///
/// The guard travels with the background work and its completion event, so
/// the flag is released on success, failure, and panic alike.
#[derive(Debug)]
pub struct BusyGuard {
    state: Arc<AtomicU8>,
    operation: Operation,
}

impl BusyGuard {
    /// The operation this guard was acquired for.
    pub fn operation(&self) -> Operation {
        self.operation
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.state.store(FREE, Ordering::Release);
    }
}
