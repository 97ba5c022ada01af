//! Records returned by the hero-roster backend (`/heroes`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{opt_string_map, opt_string_or_number, string_or_number, CharacterSummary};
use crate::assets::resolve_image_url;

/// One hero from the roster backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterCharacter {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real_name: Option<String>,
    /// Relative to the asset origin or absolute.
    #[serde(rename = "imageUrl", alias = "image_url")]
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub difficulty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lore: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transformations: Option<Vec<Transformation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub costumes: Option<Vec<Costume>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abilities: Option<Vec<Ability>>,
}

/// Alternate form of a hero (e.g. Bruce Banner / Hero Hulk / Monster Hulk).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transformation {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub health: Option<String>,
    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub movement_speed: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Costume {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// BLUE, PURPLE, ORANGE, RED or GOLD; see [`crate::palette::quality_color`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appearance: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Ultimate, Weapon, Special or Passive; see [`crate::palette::ability_type_color`].
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, alias = "isCollab")]
    pub is_collab: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "opt_string_map",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_fields: Option<BTreeMap<String, String>>,
    /// Refers to a [`Transformation::id`] of the same hero.
    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub transformation_id: Option<String>,
}

/// Abilities sharing one `transformation_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbilityGroup<'a> {
    pub transformation_id: Option<&'a str>,
    /// `None` when ungrouped or when the id matches no transformation.
    pub transformation: Option<&'a Transformation>,
    pub abilities: Vec<&'a Ability>,
}

impl RosterCharacter {
    /// Numeric difficulty, if the backend sent one.
    pub fn difficulty_level(&self) -> Option<u8> {
        self.difficulty.as_deref()?.trim().parse().ok()
    }

    pub fn transformation(&self, id: &str) -> Option<&Transformation> {
        self.transformations.as_deref()?.iter().find(|t| t.id == id)
    }

    /// Named abilities grouped by form, in first-appearance order.
    ///
    /// An orphaned `transformation_id` still gets its own group, just without
    /// a resolved transformation.
    pub fn ability_groups(&self) -> Vec<AbilityGroup<'_>> {
        let mut groups: Vec<AbilityGroup<'_>> = Vec::new();
        let named = self
            .abilities
            .iter()
            .flatten()
            .filter(|ability| ability.name.is_some());

        for ability in named {
            let key = ability.transformation_id.as_deref();
            match groups.iter_mut().find(|g| g.transformation_id == key) {
                Some(group) => group.abilities.push(ability),
                None => groups.push(AbilityGroup {
                    transformation_id: key,
                    transformation: key.and_then(|id| self.transformation(id)),
                    abilities: vec![ability],
                }),
            }
        }
        groups
    }
}

impl CharacterSummary for RosterCharacter {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn image_url(&self) -> String {
        resolve_image_url(&self.image_url)
    }
}
