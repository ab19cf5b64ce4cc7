//! Attributes, aptitudes, and their growth curves.
//!
//! Every character has the same ten attributes. An attribute's `value` is
//! what the current life has built up; its `aptitude` is the permanent
//! growth multiplier that only rises at reincarnation.
//!
//! # Growth curves
//!
//! Raw gains are scaled by [`aptitude_multiplier`], which is linear up to
//! 10, then halves its slope up to 100, then tenths it up to 1000, and
//! grows logarithmically past that. [`attribute_starting_value`] gives the
//! head start a new life gets from its aptitude, flattening the same way
//! past 1000.

use serde::{Deserialize, Serialize};

/// The closed set of attributes a character can train.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttributeType {
    Strength,
    Toughness,
    Speed,
    Intelligence,
    Charisma,
    Spirituality,
    MetalLore,
    PlantLore,
    AnimalLore,
    Alchemy,
}

impl AttributeType {
    /// All attributes in display order.
    pub const ALL: [AttributeType; 10] = [
        AttributeType::Strength,
        AttributeType::Toughness,
        AttributeType::Speed,
        AttributeType::Intelligence,
        AttributeType::Charisma,
        AttributeType::Spirituality,
        AttributeType::MetalLore,
        AttributeType::PlantLore,
        AttributeType::AnimalLore,
        AttributeType::Alchemy,
    ];

    /// The camelCase key used in save files.
    pub fn key(self) -> &'static str {
        match self {
            AttributeType::Strength => "strength",
            AttributeType::Toughness => "toughness",
            AttributeType::Speed => "speed",
            AttributeType::Intelligence => "intelligence",
            AttributeType::Charisma => "charisma",
            AttributeType::Spirituality => "spirituality",
            AttributeType::MetalLore => "metalLore",
            AttributeType::PlantLore => "plantLore",
            AttributeType::AnimalLore => "animalLore",
            AttributeType::Alchemy => "alchemy",
        }
    }
}

/// A single attribute's state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub description: String,
    /// Current magnitude. Unbounded in both directions.
    pub value: f64,
    /// Permanent growth multiplier, never decreases.
    pub aptitude: f64,
    /// Opaque icon reference for the presentation layer.
    pub icon: String,
}

impl Attribute {
    fn new(description: &str, value: f64, icon: &str) -> Self {
        Self {
            description: description.to_string(),
            value,
            aptitude: 1.0,
            icon: icon.to_string(),
        }
    }
}

/// The full attribute block of a character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attributes {
    pub strength: Attribute,
    pub toughness: Attribute,
    pub speed: Attribute,
    pub intelligence: Attribute,
    pub charisma: Attribute,
    pub spirituality: Attribute,
    pub metal_lore: Attribute,
    pub plant_lore: Attribute,
    pub animal_lore: Attribute,
    pub alchemy: Attribute,
}

impl Attributes {
    pub fn get(&self, attr: AttributeType) -> &Attribute {
        match attr {
            AttributeType::Strength => &self.strength,
            AttributeType::Toughness => &self.toughness,
            AttributeType::Speed => &self.speed,
            AttributeType::Intelligence => &self.intelligence,
            AttributeType::Charisma => &self.charisma,
            AttributeType::Spirituality => &self.spirituality,
            AttributeType::MetalLore => &self.metal_lore,
            AttributeType::PlantLore => &self.plant_lore,
            AttributeType::AnimalLore => &self.animal_lore,
            AttributeType::Alchemy => &self.alchemy,
        }
    }

    pub fn get_mut(&mut self, attr: AttributeType) -> &mut Attribute {
        match attr {
            AttributeType::Strength => &mut self.strength,
            AttributeType::Toughness => &mut self.toughness,
            AttributeType::Speed => &mut self.speed,
            AttributeType::Intelligence => &mut self.intelligence,
            AttributeType::Charisma => &mut self.charisma,
            AttributeType::Spirituality => &mut self.spirituality,
            AttributeType::MetalLore => &mut self.metal_lore,
            AttributeType::PlantLore => &mut self.plant_lore,
            AttributeType::AnimalLore => &mut self.animal_lore,
            AttributeType::Alchemy => &mut self.alchemy,
        }
    }

    /// Sum of every attribute's aptitude.
    pub fn total_aptitude(&self) -> f64 {
        AttributeType::ALL
            .iter()
            .map(|&attr| self.get(attr).aptitude)
            .sum()
    }
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            strength: Attribute::new(
                "An immortal must have raw physical power.",
                1.0,
                "fitness_center",
            ),
            toughness: Attribute::new(
                "An immortal must develop resilience to endure hardship.",
                1.0,
                "castle",
            ),
            speed: Attribute::new(
                "An immortal must be quick of foot and hand.",
                1.0,
                "directions_run",
            ),
            intelligence: Attribute::new(
                "An immortal must understand the workings of the universe.",
                1.0,
                "local_library",
            ),
            charisma: Attribute::new(
                "An immortal must influence the hearts and minds of others.",
                1.0,
                "forum",
            ),
            spirituality: Attribute::new(
                "An immortal must find deep connections to the divine.",
                0.0,
                "auto_awesome",
            ),
            metal_lore: Attribute::new(
                "Understanding metals and how to forge and use them.",
                0.0,
                "hardware",
            ),
            plant_lore: Attribute::new(
                "Understanding plants and how to grow and care for them.",
                0.0,
                "forest",
            ),
            animal_lore: Attribute::new(
                "Understanding animals and monsters and how to deal with them.",
                0.0,
                "pets",
            ),
            alchemy: Attribute::new(
                "Understanding potions and pills and how to make and use them.",
                0.0,
                "emoji_food_beverage",
            ),
        }
    }
}

/// Effective gain per raw point of training for a given aptitude.
///
/// * aptitude < 10: aptitude
/// * aptitude < 100: 10 + (aptitude − 10) / 2
/// * aptitude < 1000: 100 + (aptitude − 100) / 10
/// * otherwise: 1000 + log2(aptitude − 999)
pub fn aptitude_multiplier(aptitude: f64) -> f64 {
    if aptitude < 10.0 {
        aptitude
    } else if aptitude < 100.0 {
        10.0 + (aptitude - 10.0) / 2.0
    } else if aptitude < 1000.0 {
        100.0 + (aptitude - 100.0) / 10.0
    } else {
        1000.0 + (aptitude - 999.0).log2()
    }
}

/// Value an attribute starts a new life at, given its aptitude.
pub fn attribute_starting_value(aptitude: f64) -> f64 {
    if aptitude < 1000.0 {
        aptitude
    } else {
        1000.0 + (aptitude - 999.0).log2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-6;

    #[test]
    fn multiplier_tiers() {
        assert!((aptitude_multiplier(1.0) - 1.0).abs() < TOL);
        assert!((aptitude_multiplier(9.0) - 9.0).abs() < TOL);
        assert!((aptitude_multiplier(50.0) - 30.0).abs() < TOL);
        assert!((aptitude_multiplier(500.0) - 140.0).abs() < TOL);
        assert!((aptitude_multiplier(1000.0) - 1000.0).abs() < TOL);
        assert!((aptitude_multiplier(1001.0) - 1001.0).abs() < TOL);
        assert!((aptitude_multiplier(1255.0) - 1008.0).abs() < TOL);
    }

    #[test]
    fn multiplier_continuous_at_10() {
        let eps = 1e-9;
        assert!((aptitude_multiplier(10.0 - eps) - aptitude_multiplier(10.0)).abs() < 1e-6);
    }

    #[test]
    fn multiplier_steps_up_at_100_and_1000() {
        // The upper tiers start above where the tier below them ends.
        let below_100 = aptitude_multiplier(100.0 - 1e-9);
        assert!((below_100 - 55.0).abs() < 1e-6);
        assert!((aptitude_multiplier(100.0) - 100.0).abs() < TOL);

        let below_1000 = aptitude_multiplier(1000.0 - 1e-9);
        assert!((below_1000 - 190.0).abs() < 1e-6);
        assert!((aptitude_multiplier(1000.0) - 1000.0).abs() < TOL);
    }

    #[test]
    fn multiplier_is_monotonic() {
        let mut last = aptitude_multiplier(0.0);
        let mut a = 0.0;
        while a < 5000.0 {
            a += 0.5;
            let m = aptitude_multiplier(a);
            assert!(m >= last, "multiplier dropped at aptitude {}", a);
            last = m;
        }
    }

    #[test]
    fn starting_value_tiers() {
        assert!((attribute_starting_value(2.01) - 2.01).abs() < TOL);
        assert!((attribute_starting_value(999.0) - 999.0).abs() < TOL);
        assert!((attribute_starting_value(1000.0) - 1000.0).abs() < TOL);
        assert!((attribute_starting_value(1063.0) - 1006.0).abs() < TOL);
    }

    #[test]
    fn default_block_values() {
        let attrs = Attributes::default();
        assert!((attrs.strength.value - 1.0).abs() < TOL);
        assert!(attrs.spirituality.value.abs() < TOL);
        assert!(attrs.alchemy.value.abs() < TOL);
        for attr in AttributeType::ALL {
            assert!((attrs.get(attr).aptitude - 1.0).abs() < TOL);
        }
        assert!((attrs.total_aptitude() - 10.0).abs() < TOL);
    }

    #[test]
    fn get_mut_targets_named_field() {
        let mut attrs = Attributes::default();
        attrs.get_mut(AttributeType::PlantLore).value = 42.0;
        assert!((attrs.plant_lore.value - 42.0).abs() < TOL);
        assert!(attrs.metal_lore.value.abs() < TOL);
    }

    #[test]
    fn keys_match_serialized_names() {
        for attr in AttributeType::ALL {
            let json = serde_json::to_string(&attr).unwrap();
            assert_eq!(json, format!("\"{}\"", attr.key()));
        }
    }
}
