//! # sakan-shared
//!
//! Domain models and helpers shared by every Sakan crate: the persisted
//! entity structs, status enums, id generation, and referral codes.

pub mod constants;
pub mod ids;
pub mod models;
pub mod referral;

pub use models::*;
