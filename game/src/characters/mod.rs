//====================================================================

use serde::{Deserialize, Serialize};

pub use effects::{StatusEffect, StatusEffects};

pub mod effects;

//====================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Water,
    Wind,
    Gold,
    Silver,
    #[serde(other)]
    Unknown,
}

//====================================================================

/// Static template data for a fighter, as the backend describes it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub element: Element,
    pub level: u32,
    pub health: i32,
    pub speed: i32,
    pub damage: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ability_power: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub armor: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magic_resist: Option<i32>,
}

/// A character's mutable state inside one battle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleCharacter {
    pub character: Character,
    pub current_health: i32,
    pub is_alive: bool,
    #[serde(default)]
    pub status_effects: StatusEffects,
}

impl BattleCharacter {
    #[inline]
    pub fn name(&self) -> &str {
        &self.character.name
    }
}

//====================================================================
