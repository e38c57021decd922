//====================================================================

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

//====================================================================

/// Wire shape of a single effect: `{"duration": 2, "value": 10}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawStatusEffect {
    #[serde(default)]
    pub duration: i32,
    #[serde(default)]
    pub value: serde_json::Value,
}

/// Status effect currently applied to a battle character. Effects the
/// client has no dedicated variant for are kept as [`StatusEffect::Other`].
#[derive(Clone, Debug, PartialEq)]
pub enum StatusEffect {
    Burn {
        duration: i32,
        damage: i32,
    },
    Stun {
        duration: i32,
    },
    Other {
        name: String,
        duration: i32,
        value: serde_json::Value,
    },
}

impl StatusEffect {
    pub const BURN: &'static str = "burn";
    pub const STUN: &'static str = "stun";

    pub fn name(&self) -> &str {
        match self {
            StatusEffect::Burn { .. } => Self::BURN,
            StatusEffect::Stun { .. } => Self::STUN,
            StatusEffect::Other { name, .. } => name,
        }
    }

    /// Remaining turns.
    pub fn duration(&self) -> i32 {
        match self {
            StatusEffect::Burn { duration, .. }
            | StatusEffect::Stun { duration }
            | StatusEffect::Other { duration, .. } => *duration,
        }
    }

    fn from_raw(name: String, raw: RawStatusEffect) -> Self {
        let burn_damage = raw.value.as_i64().and_then(|damage| i32::try_from(damage).ok());

        match (name.as_str(), burn_damage) {
            (Self::BURN, Some(damage)) => StatusEffect::Burn {
                duration: raw.duration,
                damage,
            },
            (Self::STUN, _) => StatusEffect::Stun {
                duration: raw.duration,
            },
            _ => StatusEffect::Other {
                name,
                duration: raw.duration,
                value: raw.value,
            },
        }
    }

    fn into_raw(self) -> (String, RawStatusEffect) {
        match self {
            StatusEffect::Burn { duration, damage } => (
                Self::BURN.to_string(),
                RawStatusEffect {
                    duration,
                    value: damage.into(),
                },
            ),
            StatusEffect::Stun { duration } => (
                Self::STUN.to_string(),
                RawStatusEffect {
                    duration,
                    value: serde_json::Value::Null,
                },
            ),
            StatusEffect::Other {
                name,
                duration,
                value,
            } => (name, RawStatusEffect { duration, value }),
        }
    }
}

//====================================================================

/// All effects on one character, ordered by name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, RawStatusEffect>",
    into = "BTreeMap<String, RawStatusEffect>"
)]
pub struct StatusEffects(Vec<StatusEffect>);

impl StatusEffects {
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&StatusEffect> {
        self.0.iter().find(|effect| effect.name() == name)
    }
}

impl From<BTreeMap<String, RawStatusEffect>> for StatusEffects {
    fn from(value: BTreeMap<String, RawStatusEffect>) -> Self {
        Self(
            value
                .into_iter()
                .map(|(name, raw)| StatusEffect::from_raw(name, raw))
                .collect(),
        )
    }
}

impl From<StatusEffects> for BTreeMap<String, RawStatusEffect> {
    fn from(value: StatusEffects) -> Self {
        value.0.into_iter().map(StatusEffect::into_raw).collect()
    }
}

impl FromIterator<StatusEffect> for StatusEffects {
    fn from_iter<T: IntoIterator<Item = StatusEffect>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

//====================================================================


//====================================================================
