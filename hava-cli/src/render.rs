//! Panel renderers: pure formatting over a resolved [`WeatherSnapshot`].
//! Each panel mirrors one page of the dashboard.

use chrono::NaiveTime;
use hava_core::model::{
    humidity_level, pressure_effect, pressure_level, visibility_level, WeatherSnapshot,
};
use hava_core::projection::IRAN_BOUNDS;
use hava_core::Place;

fn fmt_time(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

fn fmt_duration(d: chrono::Duration) -> String {
    format!("{} ساعت و {} دقیقه", d.num_hours(), d.num_minutes() % 60)
}

/// Main dashboard panel: temperature, condition, and the metric grid.
pub fn dashboard(snap: &WeatherSnapshot) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", snap.place));
    out.push_str(&format!("{}°  {}\n\n", snap.temperature_c.round(), snap.condition_text));
    out.push_str(&format!("رطوبت      %{}\n", snap.humidity_pct));
    out.push_str(&format!("سرعت باد   {} km/h\n", snap.wind_speed_kph));
    out.push_str(&format!("فشار هوا   {} hPa\n", snap.pressure_hpa));
    out.push_str(&format!("دید        {} km\n", snap.visibility_km));
    out
}

pub fn humidity_panel(snap: &WeatherSnapshot) -> String {
    let mut out = String::new();
    out.push_str(&format!("رطوبت فعلی   %{}\n", snap.humidity_pct));
    out.push_str(&format!("وضعیت        {}\n", humidity_level(snap.humidity_pct)));
    out.push_str(&format!("نقطه شبنم    {:.0}°\n", snap.dew_point_c));
    out
}

pub fn wind_panel(snap: &WeatherSnapshot) -> String {
    let beaufort = snap.beaufort();
    let mut out = String::new();
    out.push_str(&format!("سرعت باد     {} km/h\n", snap.wind_speed_kph));
    out.push_str(&format!(
        "جهت باد      {} ({}°)\n",
        snap.wind_compass().localized(),
        snap.wind_direction_deg
    ));
    out.push_str(&format!("تندباد       {} km/h\n", snap.wind_gust_kph.round()));
    out.push_str(&format!("مقیاس بوفورت {} — {}\n", beaufort.scale, beaufort.label));
    out
}

pub fn pressure_panel(snap: &WeatherSnapshot) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} hPa\n", snap.pressure_hpa));
    out.push_str(&format!("فشار اتمسفر  {}\n", pressure_level(snap.pressure_hpa)));
    out.push_str("روند فشار    پایدار\n");
    out.push_str(&format!("{}\n", pressure_effect(snap.pressure_hpa)));
    out
}

pub fn visibility_panel(snap: &WeatherSnapshot) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} کیلومتر\n", snap.visibility_km));
    out.push_str(&format!("میزان دید    {}\n", visibility_level(snap.visibility_km)));
    out
}

pub fn sun_panel(snap: &WeatherSnapshot) -> String {
    let (gm_start, gm_end) = snap.golden_hour_morning();
    let (ge_start, ge_end) = snap.golden_hour_evening();

    let mut out = String::new();
    out.push_str(&format!("طلوع         {}\n", fmt_time(snap.sunrise_local)));
    out.push_str(&format!("غروب         {}\n", fmt_time(snap.sunset_local)));
    out.push_str(&format!("مدت روشنایی  {}\n", fmt_duration(snap.day_length())));
    out.push_str(&format!("اوج خورشید   {}\n", fmt_time(snap.solar_noon())));
    out.push_str(&format!(
        "ساعت طلایی صبح  {} - {}\n",
        fmt_time(gm_start),
        fmt_time(gm_end)
    ));
    out.push_str(&format!(
        "ساعت طلایی عصر  {} - {}\n",
        fmt_time(ge_start),
        fmt_time(ge_end)
    ));
    out
}

/// Saved-cities panel: one row per city with its resolved temperature.
pub fn cities_panel(rows: &[(Place, f64)]) -> String {
    let mut out = String::new();
    for (city, temp) in rows {
        out.push_str(&format!("{}  {}°\n", city.name, temp.round()));
    }
    out
}

const MAP_WIDTH: usize = 58;
const MAP_HEIGHT: usize = 18;

/// Character-grid rendering of the city map. Each catalog city is marked
/// with a digit; the legend below maps digits to names.
pub fn city_map(cities: &[Place]) -> String {
    let mut grid = vec![vec!['·'; MAP_WIDTH]; MAP_HEIGHT];

    let mut legend = String::new();
    for (i, city) in cities.iter().enumerate().take(10) {
        let (x, y) = IRAN_BOUNDS.to_xy(
            city.latitude,
            city.longitude,
            (MAP_WIDTH - 1) as f64,
            (MAP_HEIGHT - 1) as f64,
        );
        let (col, row) = (x.round() as usize, y.round() as usize);
        if row < MAP_HEIGHT && col < MAP_WIDTH {
            grid[row][col] = char::from_digit(i as u32, 10).unwrap_or('*');
        }
        legend.push_str(&format!("{i}: {}\n", city.name));
    }

    let mut out = String::new();
    for row in grid {
        out.extend(row);
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&legend);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use hava_core::{Condition, map_cities};

    fn sample_snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            place: "تهران".to_string(),
            temperature_c: 18.0,
            condition: Condition::Clear,
            condition_text: "آفتابی".to_string(),
            humidity_pct: 40,
            wind_speed_kph: 10.0,
            wind_direction_deg: 45,
            wind_gust_kph: 15.0,
            pressure_hpa: 1015.0,
            visibility_km: 10.0,
            dew_point_c: 6.0,
            sunrise_local: NaiveTime::from_hms_opt(6, 24, 0).unwrap(),
            sunset_local: NaiveTime::from_hms_opt(17, 45, 0).unwrap(),
        }
    }

    #[test]
    fn dashboard_shows_all_metrics() {
        let out = dashboard(&sample_snapshot());
        assert!(out.contains("تهران"));
        assert!(out.contains("18°"));
        assert!(out.contains("آفتابی"));
        assert!(out.contains("%40"));
        assert!(out.contains("1015 hPa"));
        assert!(out.contains("10 km"));
    }

    #[test]
    fn wind_panel_shows_compass_and_beaufort() {
        let out = wind_panel(&sample_snapshot());
        assert!(out.contains("شمال شرقی"));
        assert!(out.contains("(45°)"));
        assert!(out.contains("15 km/h"));
        assert!(out.contains("نسیم ملایم"));
    }

    #[test]
    fn sun_panel_derives_day_length_and_noon() {
        let out = sun_panel(&sample_snapshot());
        assert!(out.contains("06:24"));
        assert!(out.contains("17:45"));
        assert!(out.contains("11 ساعت و 21 دقیقه"));
        assert!(out.contains("12:04"));
        assert!(out.contains("16:45 - 17:45"));
    }

    #[test]
    fn pressure_panel_effect_sentence_tracks_band() {
        let mut snap = sample_snapshot();
        snap.pressure_hpa = 990.0;
        assert!(pressure_panel(&snap).contains("ناپایداری"));
        snap.pressure_hpa = 1025.0;
        assert!(pressure_panel(&snap).contains("پایدار"));
    }

    #[test]
    fn city_map_places_all_catalog_cities() {
        let out = city_map(&map_cities());
        for digit in '0'..='9' {
            assert!(out.contains(digit), "digit {digit} missing from map");
        }
        assert!(out.contains("0: تهران"));
        assert!(out.contains("9: ارومیه"));
    }
}
