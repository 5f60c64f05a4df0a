/*
Planet presets: gravity scalar and background style per planet.
*/

use macroquad::color::Color;
use serde::{Deserialize, Serialize};

/// Vertical gradient painted behind the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Background {
    pub top: Color,
    pub bottom: Color,
    /// Colour for HUD text so it stays readable on this background
    pub text: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
// Unknown ids in a config file fall back to the default instead of failing the load
#[serde(rename_all = "lowercase", from = "String")]
pub enum Planet {
    #[default]
    Earth,
    Moon,
    Jupiter,
}

impl From<String> for Planet {
    fn from(id: String) -> Self {
        Self::from_id(&id)
    }
}

impl Planet {
    /// Selector order
    pub const ALL: [Planet; 3] = [Planet::Earth, Planet::Moon, Planet::Jupiter];

    pub fn id(&self) -> &'static str {
        match self {
            Planet::Earth => "earth",
            Planet::Moon => "moon",
            Planet::Jupiter => "jupiter",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Planet::Earth => "Earth",
            Planet::Moon => "Moon",
            Planet::Jupiter => "Jupiter",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "earth" => Some(Planet::Earth),
            "moon" => Some(Planet::Moon),
            "jupiter" => Some(Planet::Jupiter),
            _ => None,
        }
    }

    /// Lossy lookup: anything unrecognised is Earth.
    pub fn from_id(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }

    /// Gravity relative to Earth.
    pub fn gravity_scalar(&self) -> f32 {
        match self {
            Planet::Earth => 1.0,
            Planet::Moon => 0.165,
            Planet::Jupiter => 2.528,
        }
    }

    /// World gravity along +y (screen down) in pixels/s².
    pub fn gravity(&self, px_per_unit: f32) -> f32 {
        self.gravity_scalar() * px_per_unit
    }

    pub fn background(&self) -> Background {
        match self {
            Planet::Earth => Background {
                top: Color::new(0.53, 0.81, 0.98, 1.0),
                bottom: Color::new(0.88, 0.96, 1.0, 1.0),
                text: Color::new(0.1, 0.15, 0.25, 1.0),
            },
            Planet::Moon => Background {
                top: Color::new(0.02, 0.02, 0.06, 1.0),
                bottom: Color::new(0.25, 0.25, 0.3, 1.0),
                text: Color::new(0.9, 0.9, 0.95, 1.0),
            },
            Planet::Jupiter => Background {
                top: Color::new(0.55, 0.33, 0.18, 1.0),
                bottom: Color::new(0.93, 0.75, 0.53, 1.0),
                text: Color::new(0.2, 0.1, 0.05, 1.0),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gravity_scalars() {
        assert_eq!(Planet::Earth.gravity_scalar(), 1.0);
        assert_eq!(Planet::Moon.gravity_scalar(), 0.165);
        assert_eq!(Planet::Jupiter.gravity_scalar(), 2.528);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Planet::parse("MOON"), Some(Planet::Moon));
        assert_eq!(Planet::parse(" Jupiter "), Some(Planet::Jupiter));
        assert_eq!(Planet::parse("mars"), None);
    }

    #[test]
    fn test_unknown_id_falls_back_to_earth() {
        assert_eq!(Planet::from_id("pluto"), Planet::Earth);
        assert_eq!(Planet::from_id(""), Planet::Earth);
    }

    #[test]
    fn test_backgrounds_are_distinct() {
        let [a, b, c] = Planet::ALL.map(|p| p.background());
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn test_ids_round_trip() {
        for planet in Planet::ALL {
            assert_eq!(Planet::from_id(planet.id()), planet);
        }
    }

    #[test]
    fn test_deserialize_unknown_is_earth() {
        let planet: Planet = serde_json::from_str("\"pluto\"").unwrap();
        assert_eq!(planet, Planet::Earth);
        let planet: Planet = serde_json::from_str("\"Jupiter\"").unwrap();
        assert_eq!(planet, Planet::Jupiter);
        assert_eq!(serde_json::to_string(&Planet::Moon).unwrap(), "\"moon\"");
    }
}
