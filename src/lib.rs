//! Taskhub: task tracking API with pluggable storage.
//!
//! Clients create, read, update and delete task records over HTTP using
//! JSON. Storage is selected at startup between an in-memory store and a
//! `PostgreSQL` table; both sit behind the same repository contract.
//!
//! # Architecture
//!
//! Taskhub follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, HTTP)
//!
//! # Modules
//!
//! - [`task`]: Task domain, repository contract, adapters and service
//! - [`server`]: Configuration, logging and the HTTP server lifecycle

pub mod server;
pub mod task;
