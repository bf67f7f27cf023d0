use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;

use crate::model::PlaceQuery;

/// Raw, pre-normalization reading from the upstream provider. Optional
/// fields are filled in by the resolver from derived estimates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Observation {
    pub resolved_name: Option<String>,
    pub temp_c: f64,
    pub condition_token: String,
    pub humidity: i64,
    pub wind_kph: f64,
    pub wind_degree: Option<i64>,
    pub gust_kph: Option<f64>,
    pub pressure_mb: f64,
    pub vis_km: f64,
    pub dewpoint_c: Option<f64>,
    pub sunrise_epoch: Option<i64>,
    pub sunset_epoch: Option<i64>,
    pub utc_offset_seconds: Option<i64>,
}

/// Retrieval failure taxonomy. All variants are terminal for a single
/// resolution attempt; the resolver converts them to the fallback snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("provider returned status {status}: {body}")]
    Status { status: reqwest::StatusCode, body: String },
    #[error("malformed provider body: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Seam between the resolver and the upstream provider. Exactly one
/// outbound request per call, no retries.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn current(&self, query: &PlaceQuery) -> Result<Observation, SourceError>;
}

pub const DEFAULT_BASE_URL: &str = "http://api.weatherapi.com/v1";

/// HTTP implementation against a WeatherAPI-shaped `current.json` endpoint.
#[derive(Debug, Clone)]
pub struct HttpSource {
    api_key: String,
    base_url: String,
    http: Client,
}

impl HttpSource {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self { api_key, base_url, http: Client::new() }
    }
}

#[async_trait]
impl WeatherSource for HttpSource {
    async fn current(&self, query: &PlaceQuery) -> Result<Observation, SourceError> {
        let url = format!("{}/current.json", self.base_url);
        let q = query.as_query_param();

        let res = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("q", q.as_str())])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(SourceError::Status { status, body: truncate_body(&body) });
        }

        let parsed: WireResponse = serde_json::from_str(&body)?;

        Ok(Observation {
            resolved_name: parsed.location.as_ref().map(|l| l.name.clone()),
            temp_c: parsed.current.temp_c,
            condition_token: parsed.current.condition.text,
            humidity: parsed.current.humidity,
            wind_kph: parsed.current.wind_kph,
            wind_degree: parsed.current.wind_degree,
            gust_kph: parsed.current.gust_kph,
            pressure_mb: parsed.current.pressure_mb,
            vis_km: parsed.current.vis_km,
            dewpoint_c: parsed.current.dewpoint_c,
            sunrise_epoch: parsed.astro.as_ref().and_then(|a| a.sunrise_epoch),
            sunset_epoch: parsed.astro.as_ref().and_then(|a| a.sunset_epoch),
            utc_offset_seconds: parsed.location.as_ref().and_then(|l| l.utc_offset_seconds),
        })
    }
}

#[derive(Debug, Deserialize)]
struct WireLocation {
    name: String,
    utc_offset_seconds: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct WireCondition {
    text: String,
}

#[derive(Debug, Deserialize)]
struct WireCurrent {
    temp_c: f64,
    condition: WireCondition,
    humidity: i64,
    wind_kph: f64,
    wind_degree: Option<i64>,
    gust_kph: Option<f64>,
    pressure_mb: f64,
    vis_km: f64,
    dewpoint_c: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WireAstro {
    sunrise_epoch: Option<i64>,
    sunset_epoch: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    location: Option<WireLocation>,
    current: WireCurrent,
    astro: Option<WireAstro>,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
