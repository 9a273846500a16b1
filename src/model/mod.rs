//! Core state and data model
//!
//! Services and data holders with no rendering concerns.

pub mod action;
pub mod category;
pub mod history;
pub mod option_store;
pub mod subscription;
