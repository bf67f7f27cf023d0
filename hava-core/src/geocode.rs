//! Reverse geocoding for the map picker: coordinates to a Persian place name.
//! Uses Nominatim (OpenStreetMap), no API key required.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/reverse";
const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = "hava/0.1.0";

/// Label used when a manually picked point cannot be named.
pub const PICKED_PLACE_LABEL: &str = "موقعیت انتخابی";

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    address: Option<NominatimAddress>,
}

#[derive(Debug, Deserialize, Default)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    state: Option<String>,
}

/// Reverse geocode coordinates to a Persian place name. Returns `None` on
/// any failure; callers fall back to [`PICKED_PLACE_LABEL`].
pub async fn reverse_geocode(latitude: f64, longitude: f64) -> Option<String> {
    let client = match Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("failed to build geocoding client: {e}");
            return None;
        }
    };

    let url = format!(
        "{NOMINATIM_URL}?format=json&lat={latitude}&lon={longitude}&accept-language=fa"
    );

    let response = match client.get(&url).send().await {
        Ok(r) => r,
        Err(e) => {
            tracing::debug!("reverse geocode request failed: {e}");
            return None;
        }
    };

    if !response.status().is_success() {
        tracing::debug!("reverse geocode returned status {}", response.status());
        return None;
    }

    let body: NominatimResponse = match response.json().await {
        Ok(b) => b,
        Err(e) => {
            tracing::debug!("reverse geocode parse error: {e}");
            return None;
        }
    };

    pick_name(body.address?)
}

/// Prefer city > town > village > state for the display name.
fn pick_name(addr: NominatimAddress) -> Option<String> {
    addr.city.or(addr.town).or(addr.village).or(addr.state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_city_over_state() {
        let addr = NominatimAddress {
            city: Some("تهران".to_string()),
            state: Some("استان تهران".to_string()),
            ..NominatimAddress::default()
        };
        assert_eq!(pick_name(addr).as_deref(), Some("تهران"));
    }

    #[test]
    fn falls_through_to_village_then_state() {
        let addr = NominatimAddress {
            village: Some("ابیانه".to_string()),
            state: Some("استان اصفهان".to_string()),
            ..NominatimAddress::default()
        };
        assert_eq!(pick_name(addr).as_deref(), Some("ابیانه"));

        let addr = NominatimAddress {
            state: Some("استان فارس".to_string()),
            ..NominatimAddress::default()
        };
        assert_eq!(pick_name(addr).as_deref(), Some("استان فارس"));
    }

    #[test]
    fn empty_address_yields_none() {
        assert_eq!(pick_name(NominatimAddress::default()), None);
    }
}
