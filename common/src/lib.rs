//! Common utilities and abstractions for the veneer project.
//!
//! This crate provides the shared error taxonomy and the configuration
//! records used to declare wrapper types.

pub mod config;
pub mod error;

pub use config::ProxyConfig;
pub use error::{CommonError, Diagnose, ErrorCategory, ErrorSeverity, Result};
