use clap::{Parser, Subcommand};
use futures::future::join_all;

use hava_core::geocode::{PICKED_PLACE_LABEL, reverse_geocode};
use hava_core::{Config, HttpSource, PlaceQuery, SnapshotResolver, map_cities, saved_cities};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "hava", version, about = "Persian weather dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Current conditions for a place.
    Show {
        /// City name or free-text location query.
        #[arg(default_value = "Tehran")]
        place: String,
    },

    /// Humidity panel: level band and dew point.
    Humidity {
        #[arg(default_value = "Tehran")]
        place: String,
    },

    /// Wind panel: speed, compass direction, gust, Beaufort band.
    Wind {
        #[arg(default_value = "Tehran")]
        place: String,
    },

    /// Pressure panel: level band and outlook.
    Pressure {
        #[arg(default_value = "Tehran")]
        place: String,
    },

    /// Visibility panel.
    Visibility {
        #[arg(default_value = "Tehran")]
        place: String,
    },

    /// Sunrise/sunset panel: day length, solar noon, golden hours.
    Sun {
        #[arg(default_value = "Tehran")]
        place: String,
    },

    /// Saved cities with their current temperatures.
    Cities,

    /// City map; with coordinates, name the point and show its conditions.
    Map {
        #[arg(long, requires = "lon")]
        lat: Option<f64>,
        #[arg(long, requires = "lat")]
        lon: Option<f64>,
    },

    /// Store the weather provider API key.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Show { place } => {
                let snap = resolver(&config)?.resolve(&PlaceQuery::Name(place)).await;
                print!("{}", render::dashboard(&snap));
            }
            Command::Humidity { place } => {
                let snap = resolver(&config)?.resolve(&PlaceQuery::Name(place)).await;
                print!("{}", render::humidity_panel(&snap));
            }
            Command::Wind { place } => {
                let snap = resolver(&config)?.resolve(&PlaceQuery::Name(place)).await;
                print!("{}", render::wind_panel(&snap));
            }
            Command::Pressure { place } => {
                let snap = resolver(&config)?.resolve(&PlaceQuery::Name(place)).await;
                print!("{}", render::pressure_panel(&snap));
            }
            Command::Visibility { place } => {
                let snap = resolver(&config)?.resolve(&PlaceQuery::Name(place)).await;
                print!("{}", render::visibility_panel(&snap));
            }
            Command::Sun { place } => {
                let snap = resolver(&config)?.resolve(&PlaceQuery::Name(place)).await;
                print!("{}", render::sun_panel(&snap));
            }
            Command::Cities => {
                let resolver = resolver(&config)?;
                let cities = saved_cities();

                // Independent concurrent resolutions; completion order is
                // irrelevant because each row is paired with its own future.
                let snaps = join_all(cities.iter().map(|city| {
                    let resolver = &resolver;
                    let query = PlaceQuery::Coords {
                        latitude: city.latitude,
                        longitude: city.longitude,
                    };
                    async move { resolver.resolve(&query).await }
                }))
                .await;

                let rows: Vec<_> = cities
                    .into_iter()
                    .zip(snaps)
                    .map(|(city, snap)| (city, snap.temperature_c))
                    .collect();

                print!("{}", render::cities_panel(&rows));
            }
            Command::Map { lat: Some(lat), lon: Some(lon) } => {
                let name = reverse_geocode(lat, lon)
                    .await
                    .unwrap_or_else(|| PICKED_PLACE_LABEL.to_string());
                println!("{name}\n");

                let query = PlaceQuery::Coords { latitude: lat, longitude: lon };
                let mut snap = resolver(&config)?.resolve(&query).await;
                snap.place = name;
                print!("{}", render::dashboard(&snap));
            }
            Command::Map { .. } => {
                print!("{}", render::city_map(&map_cities()));
            }
            Command::Configure => {
                let api_key = inquire::Text::new("Provider API key:").prompt()?;

                let mut config = config;
                config.api_key = Some(api_key.trim().to_string());
                config.save()?;

                println!("Saved to {}", Config::config_file_path()?.display());
            }
        }

        Ok(())
    }
}

fn resolver(config: &Config) -> anyhow::Result<SnapshotResolver<HttpSource>> {
    let api_key = config.require_api_key()?.to_string();
    let source = HttpSource::with_base_url(api_key, config.base_url().to_string());
    Ok(SnapshotResolver::with_defaults(source, config.derived_defaults()))
}
