//! Built-in demo characters served when a live fetch fails.

use crate::types::{ComicCharacter, RosterCharacter, Thumbnail};

fn comic(id: i64, name: &str, description: &str, path: &str) -> ComicCharacter {
    ComicCharacter {
        id,
        name: name.to_string(),
        description: description.to_string(),
        thumbnail: Thumbnail::new(path, "jpg"),
        comics: None,
        series: None,
        stories: None,
        events: None,
        modified: None,
    }
}

/// Demo list for the comics backend, ordered by name like the live API.
pub fn comics_demo_characters() -> Vec<ComicCharacter> {
    vec![
        comic(
            1009220,
            "Captain America",
            "Recipient of the Super-Soldier serum...",
            "https://i.annihil.us/u/prod/marvel/i/mg/3/50/537ba56d31087",
        ),
        comic(
            1009368,
            "Iron Man",
            "Wounded, captured and forced to build a weapon...",
            "https://i.annihil.us/u/prod/marvel/i/mg/9/c0/527bb7b37ff55",
        ),
        comic(
            1009664,
            "Thor",
            "As the Norse God of thunder and lightning...",
            "https://i.annihil.us/u/prod/marvel/i/mg/d/d0/5269657a74350",
        ),
    ]
}

/// Demo list for the roster backend.
pub fn roster_demo_characters() -> Vec<RosterCharacter> {
    vec![RosterCharacter {
        id: "1011".to_string(),
        name: "Hulk".to_string(),
        real_name: Some("Bruce Banner".to_string()),
        image_url: "/rivals/heroes/card/hulk.png".to_string(),
        role: Some("Vanguard".to_string()),
        attack_type: Some("Melee Heroes".to_string()),
        team: Some(vec!["Avengers".to_string()]),
        difficulty: Some("4".to_string()),
        bio: Some(HULK_BIO.to_string()),
        lore: Some(HULK_LORE.to_string()),
        transformations: None,
        costumes: None,
        abilities: None,
    }]
}

const HULK_BIO: &str = "Brilliant scientist Dr. Bruce Banner has finally found a way to coexist \
    with his monstrous alter ego, the Hulk. By accumulating gamma energy over transformations, he \
    can become a wise and strong Hero Hulk or a fierce and destructive Monster Hulk \u{2013} a true \
    force of fury on the battlefield!";

const HULK_LORE: &str = "Caught in the detonation of a powerful weapon of his own invention, \
    Dr. Bruce Banner absorbed gamma radiation that transforms him into a massive green monster \
    whenever his emotions rage out of control. As Banner, he's still a genius. But as the Hulk, \
    he's the strongest one there is!\nBanner developed a special Gamma Belt to control his \
    transformations and temper the Hulk's fury. But when the Timestream Entanglement transformed \
    Los Diablos Missile Base into a demonic battleground, he realized that the best way to fight \
    monsters was to let out the one within.";
