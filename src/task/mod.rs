//! Task management for taskboard.
//!
//! A task is the single resource the service manages: a title, an optional
//! description, a `pending`/`done` status and a creation timestamp. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//! - Sample data loading in [`seed`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod seed;
pub mod services;

#[cfg(test)]
mod tests;
