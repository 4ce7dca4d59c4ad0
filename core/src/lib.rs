// src/lib.rs

//! TechPort core: the storefront lifecycle from browsing to repair tracking.
//!
//! This crate owns the business logic of the shop:
//!  - The catalog of products and its query surface.
//!  - The session-scoped cart aggregate.
//!  - The multi-step checkout workflow (purchase records, stock adjustment,
//!    analytics, cart clearing).
//!  - The purchase-history join against catalog and repair records.
//!  - The repair-case lifecycle (Pending / InProgress / Completed / Cancelled).
//!
//! Persistence and telemetry are collaborators behind traits; the bundled
//! in-memory store backs both the server and the test suites. Nothing in
//! here retries, rolls back, or detects write conflicts: remote failures are
//! typed results the caller must branch on, and concurrent writers are
//! last-write-wins.

pub mod catalog;
pub mod checkout;
pub mod error;
pub mod history;
pub mod model;
pub mod repairs;
pub mod store;
pub mod telemetry;
pub mod workflow;

// --- Re-exports for the Public API ---

pub use crate::error::{CoreError, CoreResult};

pub use crate::model::cart::{Cart, CartLine};
pub use crate::model::product::{NewProduct, Product, CATEGORIES};
pub use crate::model::purchase::{NewPurchase, Purchase, PurchaseView};
pub use crate::model::repair::{NewRepairCase, RepairCase, RepairStage, RepairStatus};
pub use crate::model::user::Shopper;

pub use crate::store::memory::MemoryStore;
pub use crate::store::{ProductStore, PurchaseStore, RepairStore, StoreError};

pub use crate::catalog::{Catalog, RECOMMENDED_LIMIT};
pub use crate::checkout::{Checkout, CheckoutCtx, CheckoutOutcome};
pub use crate::history::History;
pub use crate::repairs::RepairDesk;

pub use crate::telemetry::{Analytics, CrashReporter};

pub use crate::workflow::{RunOutcome, SharedCtx, StepControl, Workflow, WorkflowError};
