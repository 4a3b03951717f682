//! Global Scoring Session Manager
//!
//! This module provides a thread-safe global holder for the match being
//! scored. The JSON API layer goes through these accessors; library users
//! embedding [`ScoringEngine`] directly never need to.

use once_cell::sync::Lazy;
use std::sync::{Arc, RwLock};

use crate::engine::ScoringEngine;
use crate::error::{Result, ScoringError};

/// Global scoring session singleton
pub static SESSION_STATE: Lazy<Arc<RwLock<SessionState>>> =
    Lazy::new(|| Arc::new(RwLock::new(SessionState::default())));

/// Runtime session state
///
/// Holds the engine for the match in progress, if any. Empty until a match
/// is started and after a reset.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub engine: Option<ScoringEngine>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_match(&self) -> bool {
        self.engine.is_some()
    }

    /// The active engine, or an error when no match has been started.
    pub fn engine(&self) -> Result<&ScoringEngine> {
        self.engine
            .as_ref()
            .ok_or_else(|| ScoringError::InvalidInput("no match in progress".to_string()))
    }

    pub fn engine_mut(&mut self) -> Result<&mut ScoringEngine> {
        self.engine
            .as_mut()
            .ok_or_else(|| ScoringError::InvalidInput("no match in progress".to_string()))
    }
}

// ========================
// Global State Access Functions
// ========================

/// Get a read lock on the global session state
pub fn get_state() -> std::sync::RwLockReadGuard<'static, SessionState> {
    SESSION_STATE.read().expect("SESSION_STATE lock poisoned")
}

/// Get a write lock on the global session state
pub fn get_state_mut() -> std::sync::RwLockWriteGuard<'static, SessionState> {
    SESSION_STATE.write().expect("SESSION_STATE lock poisoned")
}

/// Reset the global state, discarding any match in progress
pub fn reset_state() {
    *SESSION_STATE.write().expect("SESSION_STATE lock poisoned") = SessionState::new();
}

/// Replace the entire global state
pub fn set_state(new_state: SessionState) {
    *SESSION_STATE.write().expect("SESSION_STATE lock poisoned") = new_state;
}
