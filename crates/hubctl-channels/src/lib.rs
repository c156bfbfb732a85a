//! # hubctl-channels
//!
//! Messaging transports for hubctl.

pub mod telegram;
