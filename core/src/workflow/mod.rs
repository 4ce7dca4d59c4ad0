// src/workflow/mod.rs

//! A small step-workflow engine for multi-step business processes.
//!
//! A [`Workflow`] is an ordered list of named steps. Each step may carry an
//! `optional` flag and a skip predicate over the shared context, and up to
//! one handler per phase (`before`, `on`, `after`). Handlers are async,
//! operate on a [`SharedCtx`], signal [`StepControl::Continue`] or
//! [`StepControl::Halt`], and may fail with the workflow's error type.
//!
//! Execution walks the steps in order: a `Halt` ends the run gracefully
//! ([`RunOutcome::Halted`]), a handler error aborts it, and a required step
//! without any handler is a configuration error. Handlers that want
//! "log and continue" semantics catch their own failures and return
//! `Continue`; the engine itself never swallows an error.

mod context;
mod engine;

pub use context::SharedCtx;
pub use engine::{RunOutcome, SkipFn, StepControl, Workflow};

use thiserror::Error;

/// Configuration failure raised by the engine itself (as opposed to an error
/// returned by a step handler).
#[derive(Debug, Error)]
pub enum WorkflowError {
  #[error("no handler registered for required step `{step}`")]
  MissingHandler { step: String },
}
