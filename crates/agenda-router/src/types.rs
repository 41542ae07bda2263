use serde::{Deserialize, Serialize};

/// How two consecutive locations relate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteKind {
    /// No previous location; just head to the room.
    Arrival,
    SameRoom,
    SameBuilding,
    CrossBuilding,
}

/// Derived walking hint between two rooms. Never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteInfo {
    pub from_room: Option<String>,
    pub to_room: String,
    pub walking_minutes: u16,
    pub description: String,
    pub kind: RouteKind,
}

impl RouteInfo {
    pub fn requires_walking(&self) -> bool {
        self.walking_minutes > 0
    }
}

/// A venue building and the rooms that belong to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Building {
    pub code: String,
    pub name: String,
    /// Exact room labels.
    #[serde(default)]
    pub rooms: Vec<String>,
    /// Regular expressions matched against the room label.
    #[serde(default)]
    pub patterns: Vec<String>,
    /// Walk between two different rooms of this building.
    pub internal_walk_minutes: u16,
}

/// One directed entry of the building-to-building walk table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkEdge {
    pub from: String,
    pub to: String,
    pub minutes: u16,
}

/// Full venue description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueConfig {
    pub buildings: Vec<Building>,
    pub walks: Vec<WalkEdge>,
    /// Used whenever either side is unknown or the pair is not listed.
    pub unknown_walk_minutes: u16,
    pub unknown_name: String,
    /// Official venue map page.
    #[serde(default)]
    pub map_url: Option<String>,
    #[serde(default)]
    pub navigation_tips: Vec<String>,
}

/// Code and display name of one building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingInfo {
    pub code: String,
    pub name: String,
}

/// What a visitor needs to find their way around.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueMap {
    pub map_url: Option<String>,
    pub buildings: Vec<BuildingInfo>,
    pub navigation_tips: Vec<String>,
}
