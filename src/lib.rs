//! squadboard: in-memory task/board state core.
//!
//! The authoritative task collection lives in [`repo::TaskRepository`];
//! board definitions and the current selection live in
//! [`registry::BoardRegistry`]; [`views`] derives kanban, calendar, and
//! list projections as pure functions; [`metrics`] computes read-time
//! aggregates. Persistence and toasts are opt-in seams in [`store`].

pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod registry;
pub mod repo;
pub mod store;
pub mod subscriptions;
pub mod types;
pub mod views;
