// tests/workflow_tests.rs
mod common;

use common::setup_tracing;
use serial_test::serial;
use std::sync::Arc;
use techport_core::workflow::{RunOutcome, SharedCtx, StepControl, Workflow, WorkflowError};

#[derive(Clone, Debug, Default)]
struct TestCtx {
  steps_executed: Vec<String>,
  counter: i32,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
enum TestError {
  #[error("engine error: {0}")]
  Engine(String),

  #[error("handler failed: {0}")]
  Handler(String),
}

impl From<WorkflowError> for TestError {
  fn from(e: WorkflowError) -> Self {
    TestError::Engine(e.to_string())
  }
}

type TestFut = std::pin::Pin<Box<dyn std::future::Future<Output = Result<StepControl, TestError>> + Send>>;

fn recording_handler(label: &'static str) -> impl Fn(SharedCtx<TestCtx>) -> TestFut + Send + Sync + 'static {
  move |ctx: SharedCtx<TestCtx>| -> TestFut {
    Box::pin(async move {
      {
        let mut guard = ctx.write();
        guard.steps_executed.push(label.to_string());
        guard.counter += 1;
      }
      Ok(StepControl::Continue)
    })
  }
}

#[tokio::test]
#[serial]
async fn runs_steps_in_declared_order() {
  setup_tracing();
  let mut wf = Workflow::<TestCtx, TestError>::new(vec![
    ("first", false, None),
    ("second", false, None),
    ("third", false, None),
  ]);
  wf.on_step("first", recording_handler("first"));
  wf.on_step("second", recording_handler("second"));
  wf.on_step("third", recording_handler("third"));

  let ctx = SharedCtx::new(TestCtx::default());
  let outcome = wf.run(ctx.clone()).await;

  assert_eq!(outcome.unwrap(), RunOutcome::Completed);
  let guard = ctx.read();
  assert_eq!(guard.steps_executed, vec!["first", "second", "third"]);
  assert_eq!(guard.counter, 3);
}

#[tokio::test]
#[serial]
async fn halt_stops_remaining_steps() {
  setup_tracing();
  let mut wf = Workflow::<TestCtx, TestError>::new(vec![
    ("a", false, None),
    ("halts", false, None),
    ("never", false, None),
  ]);
  wf.on_step("a", recording_handler("a"));
  wf.on_step("halts", |ctx: SharedCtx<TestCtx>| async move {
    ctx.write().steps_executed.push("halts".to_string());
    Ok::<_, TestError>(StepControl::Halt)
  });
  wf.on_step("never", recording_handler("never"));

  let ctx = SharedCtx::new(TestCtx::default());
  let outcome = wf.run(ctx.clone()).await;

  assert_eq!(outcome.unwrap(), RunOutcome::Halted);
  assert_eq!(ctx.read().steps_executed, vec!["a", "halts"]);
}

#[tokio::test]
#[serial]
async fn handler_error_aborts_the_run() {
  setup_tracing();
  let mut wf = Workflow::<TestCtx, TestError>::new(vec![
    ("good", false, None),
    ("bad", false, None),
    ("unreached", false, None),
  ]);
  wf.on_step("good", recording_handler("good"));
  wf.on_step("bad", |_ctx: SharedCtx<TestCtx>| async move {
    Err::<StepControl, _>(TestError::Handler("boom".to_string()))
  });
  wf.on_step("unreached", recording_handler("unreached"));

  let ctx = SharedCtx::new(TestCtx::default());
  let outcome = wf.run(ctx.clone()).await;

  assert_eq!(outcome.unwrap_err(), TestError::Handler("boom".to_string()));
  assert_eq!(ctx.read().steps_executed, vec!["good"]);
}

#[tokio::test]
#[serial]
async fn skip_condition_bypasses_a_step() {
  setup_tracing();
  let mut wf = Workflow::<TestCtx, TestError>::new(vec![
    ("first", false, None),
    (
      "skipped",
      false,
      Some(Arc::new(|ctx: SharedCtx<TestCtx>| ctx.read().counter > 0)),
    ),
    ("last", false, None),
  ]);
  wf.on_step("first", recording_handler("first"));
  wf.on_step("skipped", recording_handler("skipped"));
  wf.on_step("last", recording_handler("last"));

  let ctx = SharedCtx::new(TestCtx::default());
  let outcome = wf.run(ctx.clone()).await;

  assert_eq!(outcome.unwrap(), RunOutcome::Completed);
  assert_eq!(ctx.read().steps_executed, vec!["first", "last"]);
}

#[tokio::test]
#[serial]
async fn required_step_without_handler_is_an_error() {
  setup_tracing();
  let mut wf = Workflow::<TestCtx, TestError>::new(vec![("present", false, None), ("missing", false, None)]);
  wf.on_step("present", recording_handler("present"));

  let ctx = SharedCtx::new(TestCtx::default());
  let outcome = wf.run(ctx).await;

  match outcome {
    Err(TestError::Engine(msg)) => assert!(msg.contains("missing"), "unexpected message: {msg}"),
    other => panic!("expected engine error, got {other:?}"),
  }
}

#[tokio::test]
#[serial]
async fn optional_step_without_handler_is_skipped() {
  setup_tracing();
  let mut wf = Workflow::<TestCtx, TestError>::new(vec![("present", false, None), ("optional_gap", true, None)]);
  wf.on_step("present", recording_handler("present"));

  let ctx = SharedCtx::new(TestCtx::default());
  let outcome = wf.run(ctx.clone()).await;

  assert_eq!(outcome.unwrap(), RunOutcome::Completed);
  assert_eq!(ctx.read().steps_executed, vec!["present"]);
}

#[tokio::test]
#[serial]
async fn before_on_after_run_in_phase_order() {
  setup_tracing();
  let mut wf = Workflow::<TestCtx, TestError>::new(vec![("step", false, None)]);
  wf.before_step("step", recording_handler("before"));
  wf.on_step("step", recording_handler("on"));
  wf.after_step("step", recording_handler("after"));

  let ctx = SharedCtx::new(TestCtx::default());
  let outcome = wf.run(ctx.clone()).await;

  assert_eq!(outcome.unwrap(), RunOutcome::Completed);
  assert_eq!(ctx.read().steps_executed, vec!["before", "on", "after"]);
}

#[test]
#[should_panic(expected = "workflow setup error")]
fn registering_against_unknown_step_panics() {
  let mut wf = Workflow::<TestCtx, TestError>::new(vec![("known", false, None)]);
  wf.on_step("unknown", recording_handler("unknown"));
}
