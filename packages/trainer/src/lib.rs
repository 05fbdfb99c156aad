//! # woordjes-trainer
//!
//! Terminal front end for `woordjes-algo`: practice sessions on stdin/stdout,
//! a JSON session history, forecasts and dashboard statistics.

pub mod config;
pub mod logging;
pub mod report;
pub mod session;
pub mod store;
pub mod words;
