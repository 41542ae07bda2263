//! Default venue: the NTUST campus used by COSCUP 2025.

use crate::types::*;

fn s(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn walks(edges: &[(&str, &str, u16)]) -> Vec<WalkEdge> {
    edges
        .iter()
        .map(|(from, to, minutes)| WalkEdge { from: from.to_string(), to: to.to_string(), minutes: *minutes })
        .collect()
}

/// Default venue configuration.
pub fn default_venue_config() -> VenueConfig {
    VenueConfig {
        buildings: vec![
            Building {
                code: "AU".into(),
                name: "Audio-Visual Hall".into(),
                rooms: s(&["AU", "AU101"]),
                patterns: vec![],
                internal_walk_minutes: 1,
            },
            Building {
                code: "RB".into(),
                name: "Research Building".into(),
                rooms: s(&["RB-101", "RB-102", "RB-105"]),
                patterns: vec![],
                internal_walk_minutes: 1,
            },
            Building {
                code: "TR".into(),
                name: "TR Building".into(),
                rooms: vec![],
                patterns: s(&["^TR"]),
                internal_walk_minutes: 2,
            },
        ],
        walks: walks(&[
            ("AU", "RB", 2),
            ("AU", "TR", 4),
            ("RB", "AU", 2),
            ("RB", "TR", 3),
            ("TR", "AU", 4),
            ("TR", "RB", 3),
        ]),
        unknown_walk_minutes: 5,
        unknown_name: "Unknown".into(),
        map_url: Some("https://coscup.org/2025/venue/".into()),
        navigation_tips: s(&[
            "Use building codes (AU, RB, TR) to identify locations",
            "Check room numbers: the first digits indicate the floor",
            "Follow the directional signs throughout campus",
            "Ask volunteers wearing COSCUP shirts for assistance",
        ]),
    }
}

impl VenueConfig {
    pub fn from_json(content: &str) -> agenda_core::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

impl Default for VenueConfig {
    fn default() -> Self {
        default_venue_config()
    }
}

/// The default config instance.
pub static DEFAULT_VENUE: std::sync::LazyLock<VenueConfig> = std::sync::LazyLock::new(default_venue_config);
