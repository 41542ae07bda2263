//! Room → building classification and the walk table.

use agenda_core::{AgendaError, Result};
use regex::Regex;
use std::collections::HashMap;

use crate::types::{BuildingInfo, RouteInfo, RouteKind, VenueConfig, VenueMap};

struct BuildingRule {
    code: String,
    name: String,
    rooms: Vec<String>,
    patterns: Vec<Regex>,
    internal_walk_minutes: u16,
}

impl BuildingRule {
    fn matches(&self, room: &str) -> bool {
        self.rooms.iter().any(|r| r == room) || self.patterns.iter().any(|p| p.is_match(room))
    }
}

/// Table-driven walking estimates between rooms.
///
/// All figures are rough, conservative guesses. Crowded corridors during
/// breaks, elevator queues and accessibility needs are not modelled, so the
/// real walk can take longer. What the router guarantees is consistency:
/// the same pair of rooms always yields the same answer.
pub struct VenueRouter {
    rules: Vec<BuildingRule>,
    walks: HashMap<(String, String), u16>,
    unknown_walk_minutes: u16,
    unknown_name: String,
    map_url: Option<String>,
    navigation_tips: Vec<String>,
}

impl VenueRouter {
    pub fn new(config: VenueConfig) -> Result<Self> {
        let mut rules = Vec::with_capacity(config.buildings.len());
        for b in config.buildings {
            if b.code.is_empty() {
                return Err(AgendaError::Config("building code must not be empty".into()));
            }
            let patterns = b
                .patterns
                .iter()
                .map(|p| {
                    Regex::new(p).map_err(|e| AgendaError::Config(format!("building {}: bad room pattern {p:?}: {e}", b.code)))
                })
                .collect::<Result<Vec<_>>>()?;
            rules.push(BuildingRule {
                code: b.code,
                name: b.name,
                rooms: b.rooms,
                patterns,
                internal_walk_minutes: b.internal_walk_minutes,
            });
        }
        let walks = config.walks.into_iter().map(|w| ((w.from, w.to), w.minutes)).collect();
        tracing::debug!(buildings = rules.len(), "venue router ready");
        Ok(Self {
            rules,
            walks,
            unknown_walk_minutes: config.unknown_walk_minutes,
            unknown_name: config.unknown_name,
            map_url: config.map_url,
            navigation_tips: config.navigation_tips,
        })
    }

    fn rule_for(&self, room: &str) -> Option<&BuildingRule> {
        self.rules.iter().find(|r| r.matches(room))
    }

    /// Building code of `room`, first matching rule wins.
    pub fn building_of(&self, room: &str) -> Option<&str> {
        self.rule_for(room).map(|r| r.code.as_str())
    }

    pub fn building_name(&self, room: &str) -> &str {
        self.rule_for(room).map(|r| r.name.as_str()).unwrap_or(&self.unknown_name)
    }

    /// Buildings in configuration order.
    pub fn buildings(&self) -> Vec<BuildingInfo> {
        self.rules.iter().map(|r| BuildingInfo { code: r.code.clone(), name: r.name.clone() }).collect()
    }

    pub fn venue_map(&self) -> VenueMap {
        VenueMap {
            map_url: self.map_url.clone(),
            buildings: self.buildings(),
            navigation_tips: self.navigation_tips.clone(),
        }
    }

    /// Minutes to walk from `from` to `to`.
    pub fn walking_minutes(&self, from: &str, to: &str) -> u16 {
        if from == to {
            return 0;
        }
        match (self.rule_for(from), self.rule_for(to)) {
            (Some(a), Some(b)) if a.code == b.code => a.internal_walk_minutes,
            (Some(a), Some(b)) => self
                .walks
                .get(&(a.code.clone(), b.code.clone()))
                .copied()
                .unwrap_or(self.unknown_walk_minutes),
            _ => self.unknown_walk_minutes,
        }
    }

    /// Route into `to`, optionally coming from `from`.
    pub fn route(&self, from: Option<&str>, to: &str) -> RouteInfo {
        let from = from.filter(|f| !f.is_empty());
        let Some(from) = from else {
            return RouteInfo {
                from_room: None,
                to_room: to.to_string(),
                walking_minutes: 0,
                description: format!("Head to {} ({})", to, self.building_name(to)),
                kind: RouteKind::Arrival,
            };
        };
        if from == to {
            return RouteInfo {
                from_room: Some(from.to_string()),
                to_room: to.to_string(),
                walking_minutes: 0,
                description: format!("Same location: {}", to),
                kind: RouteKind::SameRoom,
            };
        }
        let same_building = matches!(
            (self.building_of(from), self.building_of(to)),
            (Some(a), Some(b)) if a == b
        );
        let (kind, description) = if same_building {
            (RouteKind::SameBuilding, format!("Within {}: {} → {}", self.building_name(from), from, to))
        } else {
            (
                RouteKind::CrossBuilding,
                format!("{} {} → {} {}", self.building_name(from), from, self.building_name(to), to),
            )
        };
        RouteInfo {
            from_room: Some(from.to_string()),
            to_room: to.to_string(),
            walking_minutes: self.walking_minutes(from, to),
            description,
            kind,
        }
    }
}
