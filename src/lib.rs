//! Switch Off AI status service.
//!
//! A small HTTP service that reports its lifecycle status and exposes a
//! simulated "switch off" action guarded by a confirmation token:
//!
//! ```text
//! GET  /              greeting
//! GET  /status        status, timestamp, health label, version, service id
//! POST /api/shutdown  {"confirmation": "CONFIRM", "emergency"?, "reason"?}
//! ```
//!
//! The switch only flips an in-memory status. Once the service is off it
//! stays off until the process restarts.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`service`]: Lifecycle state, health labels and request types
//! - [`api`]: HTTP routes and handlers
//! - [`metrics`]: Prometheus counters and latency histograms
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod service;
pub mod utils;

pub use config::Config;
pub use error::{AppError, Result};
