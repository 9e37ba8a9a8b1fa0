//! Rule impact simulator: an educational mock-up that projects the effect of
//! toggling a fixed set of credit scoring rules on the acceptance and refusal
//! rates. There is no real model behind it; the projection is a clamped
//! linear sum of per-rule impact weights.
//!
//! The core (catalog, session, projection, display model) is UI-agnostic; the
//! CLI and HTTP surfaces in this crate only render what the core computes.

pub mod catalog;
pub mod config;
pub mod display;
pub mod output;
pub mod projection;
pub mod server;
pub mod session;
