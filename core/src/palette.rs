//! ARGB color lookups for costume quality tiers and ability types.

/// Costume quality tier color; unknown or missing tiers are neutral gray.
pub fn quality_color(quality: Option<&str>) -> u32 {
    match quality {
        Some("BLUE") => 0xFF3D85C6,
        Some("PURPLE") => 0xFF8A2BE2,
        Some("ORANGE") => 0xFFFF6600,
        Some("RED") => 0xFFCC0000,
        Some("GOLD") => 0xFFFFD700,
        _ => 0xFF888888,
    }
}

/// Ability type color; unknown or missing types are the default blue.
pub fn ability_type_color(kind: Option<&str>) -> u32 {
    match kind {
        Some("Ultimate") => 0xFFFF5722,
        Some("Weapon") => 0xFF673AB7,
        Some("Special") => 0xFF03A9F4,
        Some("Passive") => 0xFF4CAF50,
        _ => 0xFF2196F3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_quality_tiers() {
        assert_eq!(quality_color(Some("BLUE")), 0xFF3D85C6);
        assert_eq!(quality_color(Some("PURPLE")), 0xFF8A2BE2);
        assert_eq!(quality_color(Some("ORANGE")), 0xFFFF6600);
        assert_eq!(quality_color(Some("RED")), 0xFFCC0000);
        assert_eq!(quality_color(Some("GOLD")), 0xFFFFD700);
    }

    #[test]
    fn unknown_quality_is_gray() {
        assert_eq!(quality_color(Some("unknown")), 0xFF888888);
        assert_eq!(quality_color(Some("")), 0xFF888888);
        assert_eq!(quality_color(Some("gold")), 0xFF888888);
        assert_eq!(quality_color(None), 0xFF888888);
    }

    #[test]
    fn known_ability_types() {
        assert_eq!(ability_type_color(Some("Ultimate")), 0xFFFF5722);
        assert_eq!(ability_type_color(Some("Weapon")), 0xFF673AB7);
        assert_eq!(ability_type_color(Some("Special")), 0xFF03A9F4);
        assert_eq!(ability_type_color(Some("Passive")), 0xFF4CAF50);
    }

    #[test]
    fn unknown_ability_type_is_default_blue() {
        assert_eq!(ability_type_color(None), 0xFF2196F3);
        assert_eq!(ability_type_color(Some("Normal Attack")), 0xFF2196F3);
    }
}
