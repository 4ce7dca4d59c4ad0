// src/workflow/engine.rs

use crate::workflow::context::SharedCtx;
use crate::workflow::WorkflowError;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{event, span, Instrument, Level};

/// Signal from a handler: keep going, or end the run gracefully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepControl {
  Continue,
  /// Stop immediately; remaining handlers and steps do not run.
  Halt,
}

/// Outcome of a full workflow run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
  /// Every non-skipped step ran to completion.
  Completed,
  /// A handler returned [`StepControl::Halt`].
  Halted,
}

/// Predicate over the shared context; `true` skips the step.
pub type SkipFn<C> = Arc<dyn Fn(SharedCtx<C>) -> bool + Send + Sync + 'static>;

type StepFuture<E> = Pin<Box<dyn Future<Output = Result<StepControl, E>> + Send>>;
type StepHandler<C, E> = Box<dyn Fn(SharedCtx<C>) -> StepFuture<E> + Send + Sync>;

struct StepDef<C: Send + Sync + 'static> {
  name: String,
  optional: bool,
  skip_if: Option<SkipFn<C>>,
}

/// An ordered, named-step workflow over a shared context `C`, whose handlers
/// fail with `E`. `E` must absorb the engine's own configuration errors.
pub struct Workflow<C, E>
where
  C: Send + Sync + 'static,
  E: std::error::Error + From<WorkflowError> + Send + Sync + 'static,
{
  steps: Vec<StepDef<C>>,
  before: HashMap<String, StepHandler<C, E>>,
  on: HashMap<String, StepHandler<C, E>>,
  after: HashMap<String, StepHandler<C, E>>,
}

impl<C, E> Workflow<C, E>
where
  C: Send + Sync + 'static,
  E: std::error::Error + From<WorkflowError> + Send + Sync + 'static,
{
  /// Creates a workflow from `(name, optional, skip_if)` step definitions.
  pub fn new(step_defs: Vec<(&str, bool, Option<SkipFn<C>>)>) -> Self {
    let steps = step_defs
      .into_iter()
      .map(|(name, optional, skip_if)| StepDef {
        name: name.to_string(),
        optional,
        skip_if,
      })
      .collect();
    Self {
      steps,
      before: HashMap::new(),
      on: HashMap::new(),
      after: HashMap::new(),
    }
  }

  /// Panics if `step_name` was not declared. Registration against an unknown
  /// step is a programming error (typo), not a runtime condition.
  fn ensure_step_exists(&self, step_name: &str) {
    assert!(
      self.steps.iter().any(|s| s.name == step_name),
      "workflow setup error: step `{step_name}` not declared"
    );
  }

  fn box_handler<F, Fut>(handler_fn: F) -> StepHandler<C, E>
  where
    F: Fn(SharedCtx<C>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<StepControl, E>> + Send + 'static,
  {
    Box::new(move |ctx| Box::pin(handler_fn(ctx)))
  }

  /// Registers the `before` handler for a step, replacing any previous one.
  pub fn before_step<F, Fut>(&mut self, step_name: &str, handler_fn: F)
  where
    F: Fn(SharedCtx<C>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<StepControl, E>> + Send + 'static,
  {
    self.ensure_step_exists(step_name);
    self.before.insert(step_name.to_string(), Self::box_handler(handler_fn));
  }

  /// Registers the main handler for a step, replacing any previous one.
  pub fn on_step<F, Fut>(&mut self, step_name: &str, handler_fn: F)
  where
    F: Fn(SharedCtx<C>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<StepControl, E>> + Send + 'static,
  {
    self.ensure_step_exists(step_name);
    self.on.insert(step_name.to_string(), Self::box_handler(handler_fn));
  }

  /// Registers the `after` handler for a step, replacing any previous one.
  pub fn after_step<F, Fut>(&mut self, step_name: &str, handler_fn: F)
  where
    F: Fn(SharedCtx<C>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<StepControl, E>> + Send + 'static,
  {
    self.ensure_step_exists(step_name);
    self.after.insert(step_name.to_string(), Self::box_handler(handler_fn));
  }

  /// Executes the workflow against `ctx`.
  ///
  /// Handler errors abort the run and are returned as-is. A required step
  /// with no handler in any phase yields [`WorkflowError::MissingHandler`],
  /// converted into `E`.
  pub async fn run(&self, ctx: SharedCtx<C>) -> Result<RunOutcome, E> {
    let run_span = span!(
      Level::DEBUG,
      "workflow_run",
      context_type = %std::any::type_name::<C>(),
      num_steps = self.steps.len(),
    );
    async {
      event!(Level::DEBUG, "workflow execution starting");

      for (step_idx, step) in self.steps.iter().enumerate() {
        let name = step.name.as_str();
        let step_span = span!(
          Level::DEBUG,
          "workflow_step",
          step_name = name,
          step_index = step_idx,
          optional = step.optional
        );

        if let Some(skip_fn) = &step.skip_if {
          if skip_fn(ctx.clone()) {
            event!(Level::INFO, step_name = name, "step skipped by skip condition");
            continue;
          }
        }

        let phases = [
          self.before.get(name),
          self.on.get(name),
          self.after.get(name),
        ];
        if phases.iter().all(|h| h.is_none()) {
          if step.optional {
            event!(Level::DEBUG, step_name = name, "optional step has no handlers, skipping");
            continue;
          }
          event!(Level::ERROR, step_name = name, "required step has no handlers");
          return Err(E::from(WorkflowError::MissingHandler {
            step: step.name.clone(),
          }));
        }

        for handler in phases.into_iter().flatten() {
          match handler(ctx.clone()).instrument(step_span.clone()).await {
            Ok(StepControl::Continue) => {}
            Ok(StepControl::Halt) => {
              event!(Level::INFO, step_name = name, "workflow halted by handler");
              return Ok(RunOutcome::Halted);
            }
            Err(e) => {
              event!(Level::ERROR, step_name = name, error = %e, "step handler failed");
              return Err(e);
            }
          }
        }
      }

      event!(Level::DEBUG, "workflow execution completed");
      Ok(RunOutcome::Completed)
    }
    .instrument(run_span)
    .await
  }
}
