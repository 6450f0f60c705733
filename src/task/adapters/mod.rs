//! Adapter implementations for task tracking ports.
//!
//! - [`memory`]: mutex-guarded in-process store
//! - [`postgres`]: Diesel-backed `PostgreSQL` store
//! - [`http`]: axum routes exposing the task service over JSON

pub mod http;
pub mod memory;
pub mod postgres;
