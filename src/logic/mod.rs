//! Detection logic: fusion core, classifier seam, audit logs

pub mod audit;
pub mod classifier;
pub mod fusion;
