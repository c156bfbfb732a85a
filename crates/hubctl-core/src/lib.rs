//! # hubctl-core
//!
//! Core types, traits, configuration, and error handling for hubctl.

pub mod config;
pub mod error;
pub mod message;
pub mod traits;
