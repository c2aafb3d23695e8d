//! HTTP route handlers

pub mod attempts;
pub mod practice;
pub mod progress;
pub mod topics;
