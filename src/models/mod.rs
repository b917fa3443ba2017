//! Request/response models

pub mod analyze;
pub mod feedback;

pub use analyze::*;
pub use feedback::*;
