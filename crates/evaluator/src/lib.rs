//! Price-fairness evaluation: classification arithmetic, baseline medians,
//! region resolution, the cached regional index adjustment, and full-report
//! assembly.

pub mod baseline;
pub mod cache;
pub mod classify;
pub mod multiplier;
pub mod region;
pub mod report;

pub use cache::{IndexCache, IndexEntry};
pub use classify::classify;
pub use multiplier::regional_multipliers;
pub use region::region_for_postal;
