//! Regional cost multipliers from CPI ratios.

use bls_client::{series, BlsClient};
use common::Multipliers;
use tracing::debug;

use crate::cache::IndexCache;
use crate::region::region_for_postal;

/// Compute cost multipliers for a postal code.
///
/// National and regional CPI are fetched concurrently through the cache.
/// If either is unavailable the multipliers degrade to neutral (1.0) with a
/// note rather than failing the request. The "state" multiplier reuses the
/// regional ratio — there is no state-level CPI series, and the report's
/// provenance note labels the figure an approximation.
pub async fn regional_multipliers(
    cache: &IndexCache,
    client: &BlsClient,
    postal: &str,
) -> Multipliers {
    let region = region_for_postal(postal);
    let regional_id = series::for_region(region);

    let (national, regional) = tokio::join!(
        cache.get_latest(client, series::NATIONAL),
        cache.get_latest(client, regional_id),
    );

    match (national, regional) {
        (Some(nat), Some(reg)) if nat > 0.0 => {
            let ratio = reg / nat;
            debug!(
                "{} CPI ratio {:.4} ({:.1} / {:.1})",
                region.name(),
                ratio,
                reg,
                nat
            );
            Multipliers {
                local: ratio,
                state: ratio,
                national: 1.0,
                note: None,
            }
        }
        _ => Multipliers::neutral(format!(
            "Regional index unavailable for {}; no adjustment applied",
            region.name()
        )),
    }
}
