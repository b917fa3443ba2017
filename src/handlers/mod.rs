//! HTTP handlers

pub mod health;
pub mod analyze;
pub mod feedback;
