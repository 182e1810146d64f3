//! BLS public time-series API client.
//!
//! Fetches the most recent observation of a CPI series from `api.bls.gov`.
//! The request asks for the last two years of data but only the newest
//! point is used.

use chrono::{Datelike, Utc};
use common::Error;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// CPI series identifiers used for regional adjustment. Five series total;
/// the cache key space never grows beyond these.
pub mod series {
    use common::Region;

    /// CPI-U, U.S. city average, all items.
    pub const NATIONAL: &str = "CUUR0000SA0";
    /// CPI-U, Northeast region, all items.
    pub const NORTHEAST: &str = "CUUR0100SA0";
    /// CPI-U, Midwest region, all items.
    pub const MIDWEST: &str = "CUUR0200SA0";
    /// CPI-U, South region, all items.
    pub const SOUTH: &str = "CUUR0300SA0";
    /// CPI-U, West region, all items.
    pub const WEST: &str = "CUUR0400SA0";

    /// Map a region to its CPI series. `National` maps to the reference
    /// series, so its ratio against national is 1.0 by construction.
    pub fn for_region(region: Region) -> &'static str {
        match region {
            Region::Northeast => NORTHEAST,
            Region::Midwest => MIDWEST,
            Region::South => SOUTH,
            Region::West => WEST,
            Region::National => NATIONAL,
        }
    }
}

/// Years of history requested per call; only the newest point is read.
const LOOKBACK_YEARS: i32 = 2;

/// Async client for the BLS public data API.
#[derive(Debug, Clone)]
pub struct BlsClient {
    client: reqwest::Client,
    base_url: String,
    registration_key: Option<String>,
}

// ── BLS wire types ────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct SeriesRequest<'a> {
    seriesid: Vec<&'a str>,
    startyear: String,
    endyear: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    registrationkey: Option<&'a str>,
}

/// Response from POST /publicAPI/v2/timeseries/data/.
#[derive(Debug, Deserialize)]
pub struct SeriesResponse {
    #[serde(default)]
    pub status: String,
    #[serde(rename = "Results", default)]
    pub results: Option<SeriesResults>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SeriesResults {
    #[serde(default)]
    pub series: Vec<Series>,
}

#[derive(Debug, Deserialize)]
pub struct Series {
    #[serde(rename = "seriesID", default)]
    pub series_id: String,
    /// Observations, newest first.
    #[serde(default)]
    pub data: Vec<DataPoint>,
}

/// A single observation. BLS returns `value` as a string.
#[derive(Debug, Deserialize)]
pub struct DataPoint {
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub period: String,
    #[serde(rename = "periodName", default)]
    pub period_name: String,
    #[serde(default)]
    pub value: String,
}

// ── Implementation ────────────────────────────────────────────────────

impl BlsClient {
    pub fn new(registration_key: Option<String>) -> Self {
        Self::with_base_url("https://api.bls.gov", registration_key)
    }

    /// Create a client against a non-default base URL (tests).
    pub fn with_base_url(base_url: impl Into<String>, registration_key: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(4)
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("failed to build BLS HTTP client");

        Self {
            client,
            base_url: base_url.into(),
            registration_key,
        }
    }

    /// Fetch the most recent value of a series.
    ///
    /// Returns `Ok(None)` when the API responds but carries no usable data
    /// point. Transport, status, and decode failures are errors; the cache
    /// layer downgrades them to "unavailable".
    pub async fn latest_value(&self, series_id: &str) -> Result<Option<f64>, Error> {
        let url = format!("{}/publicAPI/v2/timeseries/data/", self.base_url);
        let end_year = Utc::now().year();

        let body = SeriesRequest {
            seriesid: vec![series_id],
            startyear: (end_year - LOOKBACK_YEARS).to_string(),
            endyear: end_year.to_string(),
            registrationkey: self.registration_key.as_deref(),
        };

        debug!("Fetching BLS series {}", series_id);

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Bls(format!("HTTP error for {}: {}", series_id, e)))?;

        let status = resp.status().as_u16();
        if status != 200 {
            let text = resp.text().await.unwrap_or_default();
            return Err(Error::Bls(format!(
                "BLS returned {} for {}: {}",
                status,
                series_id,
                &text[..text.len().min(500)]
            )));
        }

        let parsed: SeriesResponse = resp
            .json()
            .await
            .map_err(|e| Error::Bls(format!("JSON parse error for {}: {}", series_id, e)))?;

        if parsed.status != "REQUEST_SUCCEEDED" {
            debug!("BLS request status {} for {}", parsed.status, series_id);
        }

        let value = parsed
            .results
            .unwrap_or_default()
            .series
            .into_iter()
            .next()
            .and_then(|s| s.data.into_iter().next())
            .and_then(|point| point.value.parse::<f64>().ok());

        debug!("Latest {} = {:?}", series_id, value);
        Ok(value)
    }
}
