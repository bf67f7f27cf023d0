use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// A named location with geographic coordinates. Identity is by `name`
/// for display purposes; names are not globally unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Place {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self { name: name.into(), latitude, longitude }
    }
}

/// What a resolution is keyed on: a free-text name the upstream provider
/// accepts, or a raw coordinate pair.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaceQuery {
    Name(String),
    Coords { latitude: f64, longitude: f64 },
}

impl PlaceQuery {
    /// Label used for the snapshot when the provider does not hand back
    /// a resolved location name.
    pub fn label(&self) -> String {
        match self {
            PlaceQuery::Name(name) => name.clone(),
            PlaceQuery::Coords { latitude, longitude } => {
                format!("{latitude:.4},{longitude:.4}")
            }
        }
    }

    /// Value of the `q` query parameter sent upstream.
    pub fn as_query_param(&self) -> String {
        match self {
            PlaceQuery::Name(name) => name.clone(),
            PlaceQuery::Coords { latitude, longitude } => {
                format!("{latitude},{longitude}")
            }
        }
    }
}

impl From<&Place> for PlaceQuery {
    fn from(place: &Place) -> Self {
        PlaceQuery::Name(place.name.clone())
    }
}

/// Internal weather condition vocabulary, decoupled from the provider's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Thunderstorm,
    Snow,
    Mist,
    Smoke,
    Haze,
    Dust,
    Fog,
    Sand,
    Ash,
    Squall,
    Tornado,
}

impl Condition {
    pub const fn all() -> &'static [Condition] {
        use Condition::*;
        &[
            Clear, Clouds, Rain, Drizzle, Thunderstorm, Snow, Mist, Smoke, Haze, Dust,
            Fog, Sand, Ash, Squall, Tornado,
        ]
    }

    /// Map a provider condition token to the internal vocabulary.
    /// Unrecognized tokens yield `None`; callers keep the raw text for display.
    pub fn from_token(token: &str) -> Option<Condition> {
        let cond = match token.trim() {
            "Clear" | "Sunny" => Condition::Clear,
            "Clouds" | "Cloudy" | "Partly cloudy" | "Overcast" => Condition::Clouds,
            "Rain" => Condition::Rain,
            "Drizzle" => Condition::Drizzle,
            "Thunderstorm" => Condition::Thunderstorm,
            "Snow" => Condition::Snow,
            "Mist" => Condition::Mist,
            "Smoke" => Condition::Smoke,
            "Haze" => Condition::Haze,
            "Dust" => Condition::Dust,
            "Fog" => Condition::Fog,
            "Sand" => Condition::Sand,
            "Ash" => Condition::Ash,
            "Squall" => Condition::Squall,
            "Tornado" => Condition::Tornado,
            _ => return None,
        };
        Some(cond)
    }

    /// Persian display name for the condition.
    pub fn localized(&self) -> &'static str {
        match self {
            Condition::Clear => "آفتابی",
            Condition::Clouds => "ابری",
            Condition::Rain => "بارانی",
            Condition::Drizzle => "نم نم باران",
            Condition::Thunderstorm => "رعد و برق",
            Condition::Snow => "برفی",
            Condition::Mist => "مه آلود",
            Condition::Smoke => "دود",
            Condition::Haze => "مه",
            Condition::Dust => "گرد و خاک",
            Condition::Fog => "مه غلیظ",
            Condition::Sand => "ماسه",
            Condition::Ash => "خاکستر",
            Condition::Squall => "طوفان",
            Condition::Tornado => "گردباد",
        }
    }
}

/// Eight-point compass rose with Persian names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompassPoint {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl CompassPoint {
    pub fn localized(&self) -> &'static str {
        match self {
            CompassPoint::North => "شمال",
            CompassPoint::NorthEast => "شمال شرقی",
            CompassPoint::East => "شرق",
            CompassPoint::SouthEast => "جنوب شرقی",
            CompassPoint::South => "جنوب",
            CompassPoint::SouthWest => "جنوب غربی",
            CompassPoint::West => "غرب",
            CompassPoint::NorthWest => "شمال غربی",
        }
    }
}

/// Nearest of the 8 compass points: divide by 45, round, wrap modulo 8.
pub fn compass_point(degree: u16) -> CompassPoint {
    const POINTS: [CompassPoint; 8] = [
        CompassPoint::North,
        CompassPoint::NorthEast,
        CompassPoint::East,
        CompassPoint::SouthEast,
        CompassPoint::South,
        CompassPoint::SouthWest,
        CompassPoint::West,
        CompassPoint::NorthWest,
    ];
    let index = ((f64::from(degree) / 45.0).round() as usize) % 8;
    POINTS[index]
}

/// Beaufort band for a sustained wind speed in km/h.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeaufortBand {
    pub scale: u8,
    pub label: &'static str,
}

impl BeaufortBand {
    pub fn for_speed_kph(speed: f64) -> Self {
        let (scale, label) = if speed < 1.0 {
            (0, "آرام")
        } else if speed < 6.0 {
            (1, "نسیم آرام")
        } else if speed < 12.0 {
            (2, "نسیم ملایم")
        } else if speed < 20.0 {
            (3, "نسیم متوسط")
        } else if speed < 29.0 {
            (4, "نسیم نسبتا قوی")
        } else if speed < 39.0 {
            (5, "نسیم قوی")
        } else {
            (6, "باد شدید")
        };
        Self { scale, label }
    }
}

/// Humidity comfort band, Persian label.
pub fn humidity_level(pct: u8) -> &'static str {
    if pct < 30 {
        "خشک"
    } else if pct < 60 {
        "مطلوب"
    } else if pct < 80 {
        "مرطوب"
    } else {
        "بسیار مرطوب"
    }
}

/// Atmospheric pressure band, Persian label.
pub fn pressure_level(hpa: f64) -> &'static str {
    if hpa < 1000.0 {
        "کم"
    } else if hpa < 1020.0 {
        "عادی"
    } else {
        "زیاد"
    }
}

/// One-sentence weather outlook implied by the pressure band.
pub fn pressure_effect(hpa: f64) -> &'static str {
    if hpa > 1020.0 {
        "فشار بالا معمولاً نشانه هوای آفتابی و پایدار است."
    } else if hpa >= 1000.0 {
        "فشار عادی، شرایط هوا پایدار است."
    } else {
        "فشار پایین ممکن است نشانه بارش و ناپایداری هوا باشد."
    }
}

/// Visibility band, Persian label.
pub fn visibility_level(km: f64) -> &'static str {
    if km < 1.0 {
        "بسیار ضعیف"
    } else if km < 4.0 {
        "ضعیف"
    } else if km < 10.0 {
        "متوسط"
    } else {
        "عالی"
    }
}

/// A fully populated, display-ready weather record for one place at one
/// point in time. Every field carries a value; failed lookups are filled
/// from defaults before a snapshot is ever handed out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub place: String,
    pub temperature_c: f64,
    pub condition: Condition,
    /// Localized condition text, or the provider's raw description when
    /// the token is outside the fixed vocabulary.
    pub condition_text: String,
    pub humidity_pct: u8,
    pub wind_speed_kph: f64,
    pub wind_direction_deg: u16,
    pub wind_gust_kph: f64,
    pub pressure_hpa: f64,
    pub visibility_km: f64,
    pub dew_point_c: f64,
    pub sunrise_local: NaiveTime,
    pub sunset_local: NaiveTime,
}

impl WeatherSnapshot {
    pub fn wind_compass(&self) -> CompassPoint {
        compass_point(self.wind_direction_deg)
    }

    pub fn beaufort(&self) -> BeaufortBand {
        BeaufortBand::for_speed_kph(self.wind_speed_kph)
    }

    /// Daylight duration between sunrise and sunset.
    pub fn day_length(&self) -> chrono::Duration {
        self.sunset_local - self.sunrise_local
    }

    /// Midpoint of the daylight span.
    pub fn solar_noon(&self) -> NaiveTime {
        self.sunrise_local + self.day_length() / 2
    }

    /// Morning golden hour: the first hour after sunrise.
    pub fn golden_hour_morning(&self) -> (NaiveTime, NaiveTime) {
        (self.sunrise_local, self.sunrise_local + chrono::Duration::hours(1))
    }

    /// Evening golden hour: the last hour before sunset.
    pub fn golden_hour_evening(&self) -> (NaiveTime, NaiveTime) {
        (self.sunset_local - chrono::Duration::hours(1), self.sunset_local)
    }
}
