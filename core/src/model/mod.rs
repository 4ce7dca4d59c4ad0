// src/model/mod.rs

//! Data structures for the storefront lifecycle.

pub mod cart;
pub mod product;
pub mod purchase;
pub mod repair;
pub mod user;

pub use cart::{Cart, CartLine};
pub use product::{NewProduct, Product, CATEGORIES};
pub use purchase::{NewPurchase, Purchase, PurchaseView};
pub use repair::{NewRepairCase, RepairCase, RepairStage, RepairStatus};
pub use user::Shopper;
