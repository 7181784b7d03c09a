use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A point in a game world, used for arena spawn locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaLocation {
    pub world: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default)]
    pub yaw: f32,
    #[serde(default)]
    pub pitch: f32,
}

impl ArenaLocation {
    pub fn new(world: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self {
            world: world.into(),
            x,
            y,
            z,
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

/// A battle arena that guild challenges are fought in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Arena {
    pub id: Uuid,
    pub name: String,
    /// Spawn point for the challenging guild.
    #[serde(default)]
    pub challenger: Option<ArenaLocation>,
    /// Spawn point for the defending guild.
    #[serde(default)]
    pub defender: Option<ArenaLocation>,
    #[serde(default)]
    pub in_use: bool,
}

impl Arena {
    /// Create an arena with a fresh id and no spawn points.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    pub fn with_id(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            challenger: None,
            defender: None,
            in_use: false,
        }
    }

    /// An arena can host a challenge once both spawn points are set.
    pub fn is_ready(&self) -> bool {
        self.challenger.is_some() && self.defender.is_some()
    }

    /// Ready and not currently hosting a challenge.
    pub fn is_available(&self) -> bool {
        self.is_ready() && !self.in_use
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_arena() -> Arena {
        let mut arena = Arena::new("Colosseum");
        arena.challenger = Some(ArenaLocation::new("world", 10.5, 64.0, -3.0));
        arena.defender = Some(ArenaLocation::new("world", -10.5, 64.0, 3.0));
        arena
    }

    #[test]
    fn test_new_arena_is_not_ready() {
        let arena = Arena::new("Pit");
        assert!(!arena.is_ready());
        assert!(!arena.is_available());
        assert!(!arena.in_use);
    }

    #[test]
    fn test_availability_tracks_in_use() {
        let mut arena = ready_arena();
        assert!(arena.is_available());
        arena.in_use = true;
        assert!(arena.is_ready());
        assert!(!arena.is_available());
    }

    #[test]
    fn test_json_uses_camel_case_fields() {
        let mut arena = ready_arena();
        arena.in_use = true;
        let json = serde_json::to_value(&arena).unwrap();
        assert_eq!(json["inUse"], true);
        assert_eq!(json["name"], "Colosseum");
        assert_eq!(json["challenger"]["world"], "world");
    }

    #[test]
    fn test_json_roundtrip() {
        let arena = ready_arena();
        let json = serde_json::to_string(&arena).unwrap();
        let back: Arena = serde_json::from_str(&json).unwrap();
        assert_eq!(back, arena);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let id = Uuid::new_v4();
        let json = format!(r#"{{"id":"{id}","name":"Bare"}}"#);
        let arena: Arena = serde_json::from_str(&json).unwrap();
        assert_eq!(arena, Arena::with_id(id, "Bare"));
    }
}
