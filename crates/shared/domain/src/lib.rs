//! # Domain Models
//!
//! Pure domain types with minimal dependencies (`serde`, plus `utoipa` schemas behind the
//! `server` feature). Keep it lean: no I/O, networking, or heavy logic, just data and simple
//! helpers.

pub mod config;
pub mod constants;
pub mod registry;
pub mod submission;
