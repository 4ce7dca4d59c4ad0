// src/workflow/context.rs

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// Shared, lockable context handed to every step handler of a workflow run.
///
/// The lock is `parking_lot::RwLock`; its guards are blocking and MUST NOT
/// be held across an `.await` point. Handlers take a guard, copy or mutate
/// what they need, and drop it before awaiting anything.
#[derive(Debug)]
pub struct SharedCtx<T: Send + Sync + 'static>(Arc<RwLock<T>>);

impl<T: Send + Sync + 'static> SharedCtx<T> {
  pub fn new(data: T) -> Self {
    SharedCtx(Arc::new(RwLock::new(data)))
  }

  /// Acquires a read guard. Drop it before any `.await`.
  pub fn read(&self) -> RwLockReadGuard<'_, T> {
    self.0.read()
  }

  /// Acquires a write guard. Drop it before any `.await`.
  pub fn write(&self) -> RwLockWriteGuard<'_, T> {
    self.0.write()
  }

  /// Consumes this handle and returns the inner data, provided no other
  /// handle is alive. Used after a run to take the context back out.
  pub fn into_inner(self) -> Option<T> {
    Arc::try_unwrap(self.0).ok().map(RwLock::into_inner)
  }
}

impl<T: Send + Sync + 'static> Clone for SharedCtx<T> {
  fn clone(&self) -> Self {
    SharedCtx(Arc::clone(&self.0))
  }
}

impl<T: Send + Sync + 'static + Default> Default for SharedCtx<T> {
  fn default() -> Self {
    Self::new(T::default())
  }
}
