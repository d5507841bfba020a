//! HTTP surface of the notekeep service
//!
//! Registration and login are public; every `/notes` route passes the
//! identity middleware first, and note access is scoped to the caller.

pub mod config;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
