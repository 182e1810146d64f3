//! Shared types for the price-fairness service.

pub mod config;
pub mod error;
pub mod types;

pub use error::Error;
pub use types::{
    AccessKind, AccessResult, ClassificationResult, FairRange, FullReport, Label, Multipliers,
    Region, Scale,
};
