//! Static place catalog driving the map picker and the saved-cities panel.

use crate::model::Place;

/// The cities selectable on the map.
pub fn map_cities() -> Vec<Place> {
    vec![
        Place::new("تهران", 35.6892, 51.389),
        Place::new("مشهد", 36.297, 59.6067),
        Place::new("اصفهان", 32.6546, 51.668),
        Place::new("شیراز", 29.5918, 52.5836),
        Place::new("تبریز", 38.08, 46.2919),
        Place::new("کرج", 35.8327, 50.9916),
        Place::new("قم", 34.6416, 50.8746),
        Place::new("اهواز", 31.3183, 48.6706),
        Place::new("کرمانشاه", 34.3142, 47.0656),
        Place::new("ارومیه", 37.5527, 45.0761),
    ]
}

/// The default saved-cities list shown by the cities panel.
pub fn saved_cities() -> Vec<Place> {
    vec![
        Place::new("تهران", 35.6892, 51.389),
        Place::new("مشهد", 36.2605, 59.6168),
        Place::new("اصفهان", 32.6546, 51.668),
        Place::new("شیراز", 29.5918, 52.5836),
        Place::new("تبریز", 38.0962, 46.2738),
        Place::new("کرج", 35.8327, 50.9916),
    ]
}

/// Look a map city up by its display name.
pub fn find_city(name: &str) -> Option<Place> {
    map_cities().into_iter().find(|p| p.name == name)
}
