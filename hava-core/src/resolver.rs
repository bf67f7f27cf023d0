use chrono::{DateTime, FixedOffset, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::model::{Condition, PlaceQuery, WeatherSnapshot};
use crate::source::{Observation, WeatherSource};

/// Constants used to estimate fields the provider omits. Kept configurable
/// rather than replaced with better formulas; the crude offsets are product
/// behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DerivedDefaults {
    /// Gust estimate when absent: sustained speed plus this offset (km/h).
    pub gust_offset_kph: f64,
    /// Dew point estimate when absent: `temp - (100 - humidity) / divisor`.
    pub dew_point_divisor: f64,
    /// UTC offset applied to sunrise/sunset epochs when the provider gives
    /// none. Defaults to Tehran, +03:30.
    pub utc_offset_seconds: i32,
}

impl Default for DerivedDefaults {
    fn default() -> Self {
        Self {
            gust_offset_kph: 5.0,
            dew_point_divisor: 5.0,
            utc_offset_seconds: 3 * 3600 + 1800,
        }
    }
}

// Fallback snapshot constants. A failed lookup renders exactly like a calm
// spring day; only the diagnostic log tells them apart.
const FALLBACK_TEMP_C: f64 = 20.0;
const FALLBACK_CONDITION: Condition = Condition::Clear;
const FALLBACK_HUMIDITY_PCT: u8 = 50;
const FALLBACK_WIND_KPH: f64 = 10.0;
const FALLBACK_WIND_DEG: u16 = 0;
const FALLBACK_PRESSURE_HPA: f64 = 1015.0;
const FALLBACK_VISIBILITY_KM: f64 = 10.0;
const FALLBACK_SUNRISE: (u32, u32) = (6, 24);
const FALLBACK_SUNSET: (u32, u32) = (17, 45);

/// Turns a place query into a display-ready [`WeatherSnapshot`].
///
/// One outbound request per resolution, no retries, no shared state between
/// resolutions. Never fails visibly: any transport, status, or parse failure
/// is logged and replaced by the fallback snapshot labeled with the
/// originally requested place.
#[derive(Debug, Clone)]
pub struct SnapshotResolver<S> {
    source: S,
    defaults: DerivedDefaults,
}

impl<S: WeatherSource> SnapshotResolver<S> {
    pub fn new(source: S) -> Self {
        Self::with_defaults(source, DerivedDefaults::default())
    }

    pub fn with_defaults(source: S, defaults: DerivedDefaults) -> Self {
        Self { source, defaults }
    }

    /// Resolve a snapshot for `query`. Callers only ever branch on
    /// "loading" vs. "have a snapshot"; success vs. failure is absorbed here.
    pub async fn resolve(&self, query: &PlaceQuery) -> WeatherSnapshot {
        match self.source.current(query).await {
            Ok(observation) => self.normalize(query, observation),
            Err(err) => {
                tracing::warn!(place = %query.label(), error = %err, "falling back to default snapshot");
                self.fallback_snapshot(query.label())
            }
        }
    }

    fn normalize(&self, query: &PlaceQuery, obs: Observation) -> WeatherSnapshot {
        let place = obs.resolved_name.clone().unwrap_or_else(|| query.label());

        let humidity_pct = obs.humidity.clamp(0, 100) as u8;
        let wind_speed_kph = obs.wind_kph.max(0.0);
        let wind_direction_deg = obs
            .wind_degree
            .map(|deg| deg.rem_euclid(360) as u16)
            .unwrap_or(0);

        let (condition, condition_text) = match Condition::from_token(&obs.condition_token) {
            Some(cond) => (cond, cond.localized().to_string()),
            // Outside the fixed vocabulary: keep the provider's own text.
            None if !obs.condition_token.trim().is_empty() => {
                (FALLBACK_CONDITION, obs.condition_token.trim().to_string())
            }
            None => (FALLBACK_CONDITION, FALLBACK_CONDITION.localized().to_string()),
        };

        let wind_gust_kph = obs
            .gust_kph
            .map(|g| g.max(0.0))
            .unwrap_or(wind_speed_kph + self.defaults.gust_offset_kph);

        let dew_point_c = obs.dewpoint_c.unwrap_or_else(|| {
            obs.temp_c - (100.0 - f64::from(humidity_pct)) / self.defaults.dew_point_divisor
        });

        let offset = obs
            .utc_offset_seconds
            .and_then(|s| i32::try_from(s).ok())
            .unwrap_or(self.defaults.utc_offset_seconds);

        let sunrise_local = obs
            .sunrise_epoch
            .and_then(|ts| epoch_to_local_time(ts, offset))
            .unwrap_or_else(fallback_sunrise);
        let sunset_local = obs
            .sunset_epoch
            .and_then(|ts| epoch_to_local_time(ts, offset))
            .unwrap_or_else(fallback_sunset);

        WeatherSnapshot {
            place,
            temperature_c: obs.temp_c,
            condition,
            condition_text,
            humidity_pct,
            wind_speed_kph,
            wind_direction_deg,
            wind_gust_kph,
            pressure_hpa: obs.pressure_mb,
            visibility_km: obs.vis_km.max(0.0),
            dew_point_c,
            sunrise_local,
            sunset_local,
        }
    }

    /// The deterministic snapshot substituted on any retrieval failure.
    pub fn fallback_snapshot(&self, place: String) -> WeatherSnapshot {
        WeatherSnapshot {
            place,
            temperature_c: FALLBACK_TEMP_C,
            condition: FALLBACK_CONDITION,
            condition_text: FALLBACK_CONDITION.localized().to_string(),
            humidity_pct: FALLBACK_HUMIDITY_PCT,
            wind_speed_kph: FALLBACK_WIND_KPH,
            wind_direction_deg: FALLBACK_WIND_DEG,
            wind_gust_kph: FALLBACK_WIND_KPH + self.defaults.gust_offset_kph,
            pressure_hpa: FALLBACK_PRESSURE_HPA,
            visibility_km: FALLBACK_VISIBILITY_KM,
            dew_point_c: FALLBACK_TEMP_C
                - (100.0 - f64::from(FALLBACK_HUMIDITY_PCT)) / self.defaults.dew_point_divisor,
            sunrise_local: fallback_sunrise(),
            sunset_local: fallback_sunset(),
        }
    }
}

fn epoch_to_local_time(epoch: i64, offset_seconds: i32) -> Option<NaiveTime> {
    let utc = DateTime::from_timestamp(epoch, 0)?;
    let offset = FixedOffset::east_opt(offset_seconds)?;
    Some(utc.with_timezone(&offset).time())
}

fn fallback_sunrise() -> NaiveTime {
    NaiveTime::from_hms_opt(FALLBACK_SUNRISE.0, FALLBACK_SUNRISE.1, 0)
        .unwrap_or(NaiveTime::MIN)
}

fn fallback_sunset() -> NaiveTime {
    NaiveTime::from_hms_opt(FALLBACK_SUNSET.0, FALLBACK_SUNSET.1, 0)
        .unwrap_or(NaiveTime::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceError;
    use async_trait::async_trait;
    use std::time::Duration;

    /// Test source: canned observation or failure per place name, with an
    /// optional artificial delay to exercise interleaving.
    #[derive(Debug)]
    struct ScriptedSource {
        entries: Vec<(String, Observation, Duration)>,
    }

    #[async_trait]
    impl WeatherSource for ScriptedSource {
        async fn current(&self, query: &PlaceQuery) -> Result<Observation, SourceError> {
            let name = query.label();
            for (place, obs, delay) in &self.entries {
                if *place == name {
                    tokio::time::sleep(*delay).await;
                    return Ok(obs.clone());
                }
            }
            Err(SourceError::Status {
                status: reqwest::StatusCode::BAD_REQUEST,
                body: "no such place".to_string(),
            })
        }
    }

    fn tehran_observation() -> Observation {
        Observation {
            resolved_name: Some("Tehran".to_string()),
            temp_c: 18.0,
            condition_token: "Clear".to_string(),
            humidity: 40,
            wind_kph: 10.0,
            wind_degree: Some(45),
            pressure_mb: 1015.0,
            vis_km: 10.0,
            ..Observation::default()
        }
    }

    #[tokio::test]
    async fn well_formed_response_maps_fields() {
        let source = ScriptedSource {
            entries: vec![("Tehran".to_string(), tehran_observation(), Duration::ZERO)],
        };
        let resolver = SnapshotResolver::new(source);

        let snap = resolver.resolve(&PlaceQuery::Name("Tehran".into())).await;

        assert_eq!(snap.place, "Tehran");
        assert_eq!(snap.temperature_c, 18.0);
        assert_eq!(snap.condition, Condition::Clear);
        assert_eq!(snap.condition_text, "آفتابی");
        assert_eq!(snap.humidity_pct, 40);
        assert_eq!(snap.wind_speed_kph, 10.0);
        assert_eq!(snap.wind_direction_deg, 45);
        assert_eq!(snap.pressure_hpa, 1015.0);
        assert_eq!(snap.visibility_km, 10.0);
        // derived estimates for omitted fields
        assert_eq!(snap.wind_gust_kph, 15.0);
        assert_eq!(snap.dew_point_c, 18.0 - 60.0 / 5.0);
        assert_eq!(snap.sunrise_local, NaiveTime::from_hms_opt(6, 24, 0).unwrap());
    }

    #[tokio::test]
    async fn failure_yields_fallback_with_requested_place() {
        let source = ScriptedSource { entries: vec![] };
        let resolver = SnapshotResolver::new(source);

        let snap = resolver.resolve(&PlaceQuery::Name("Unknown City".into())).await;

        assert_eq!(snap, resolver.fallback_snapshot("Unknown City".to_string()));
        assert_eq!(snap.place, "Unknown City");
        assert_eq!(snap.temperature_c, 20.0);
        assert_eq!(snap.condition, Condition::Clear);
        assert_eq!(snap.humidity_pct, 50);
    }

    #[tokio::test]
    async fn out_of_range_fields_are_normalized() {
        let mut obs = tehran_observation();
        obs.humidity = 140;
        obs.wind_kph = -3.0;
        obs.wind_degree = Some(725);
        obs.vis_km = -1.0;

        let source = ScriptedSource {
            entries: vec![("Tehran".to_string(), obs, Duration::ZERO)],
        };
        let resolver = SnapshotResolver::new(source);
        let snap = resolver.resolve(&PlaceQuery::Name("Tehran".into())).await;

        assert_eq!(snap.humidity_pct, 100);
        assert_eq!(snap.wind_speed_kph, 0.0);
        assert_eq!(snap.wind_direction_deg, 5);
        assert_eq!(snap.visibility_km, 0.0);
    }

    #[tokio::test]
    async fn unknown_condition_token_passes_text_through() {
        let mut obs = tehran_observation();
        obs.condition_token = "Patchy light drizzle".to_string();

        let source = ScriptedSource {
            entries: vec![("Tehran".to_string(), obs, Duration::ZERO)],
        };
        let resolver = SnapshotResolver::new(source);
        let snap = resolver.resolve(&PlaceQuery::Name("Tehran".into())).await;

        assert_eq!(snap.condition, Condition::Clear);
        assert_eq!(snap.condition_text, "Patchy light drizzle");
    }

    #[tokio::test]
    async fn sun_epochs_convert_with_provider_offset() {
        let mut obs = tehran_observation();
        // 2024-03-20 02:54 UTC; +03:30 local = 06:24
        obs.sunrise_epoch = Some(1_710_903_240);
        obs.sunset_epoch = Some(1_710_944_100); // 14:15 UTC -> 17:45 local
        obs.utc_offset_seconds = Some(12_600);

        let source = ScriptedSource {
            entries: vec![("Tehran".to_string(), obs, Duration::ZERO)],
        };
        let resolver = SnapshotResolver::new(source);
        let snap = resolver.resolve(&PlaceQuery::Name("Tehran".into())).await;

        assert_eq!(snap.sunrise_local, NaiveTime::from_hms_opt(6, 24, 0).unwrap());
        assert_eq!(snap.sunset_local, NaiveTime::from_hms_opt(17, 45, 0).unwrap());
    }

    #[tokio::test]
    async fn concurrent_resolutions_stay_independent() {
        let mut mashhad = tehran_observation();
        mashhad.resolved_name = Some("Mashhad".to_string());
        mashhad.temp_c = 12.0;

        // Tehran completes last; each caller must still get its own place.
        let source = ScriptedSource {
            entries: vec![
                ("Tehran".to_string(), tehran_observation(), Duration::from_millis(80)),
                ("Mashhad".to_string(), mashhad, Duration::from_millis(5)),
            ],
        };
        let resolver = SnapshotResolver::new(source);

        let tehran_query = PlaceQuery::Name("Tehran".into());
        let mashhad_query = PlaceQuery::Name("Mashhad".into());
        let (a, b) = tokio::join!(
            resolver.resolve(&tehran_query),
            resolver.resolve(&mashhad_query),
        );

        assert_eq!(a.place, "Tehran");
        assert_eq!(a.temperature_c, 18.0);
        assert_eq!(b.place, "Mashhad");
        assert_eq!(b.temperature_c, 12.0);
    }
}
