//! The `taskbounty` library crate.
//!
//! A small task-marketplace backend: users register and log in, post tasks
//! with a payout, claim and complete tasks posted by others, and get the
//! payout credited to their wallet on completion. The crate contains the
//! domain models, the credential store, the repositories encoding the task
//! lifecycle guards as conditional queries, the services orchestrating them,
//! and the HTTP routes. The binary (`main.rs`) wires everything together.

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod repo;
pub mod routes;
pub mod services;
