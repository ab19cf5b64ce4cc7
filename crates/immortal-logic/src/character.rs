//! The `Character` aggregate and the reincarnation cycle.
//!
//! A character is built once per save with fixed starting values, mutated
//! during play through [`Character::increase_attribute`] and direct status
//! edits, and rebuilt in place by [`Character::reincarnate`] when a life
//! ends. `lifespan` is derived and only changes when
//! [`Character::recalculate_lifespan`] runs.
//!
//! # Snapshots
//!
//! [`CharacterProperties`] is the save-game shape. It carries every mutable
//! field except the derived `lifespan` and the `dead` flag.

use serde::{Deserialize, Serialize};

use crate::attributes::{aptitude_multiplier, attribute_starting_value, AttributeType, Attributes};
use crate::constants::{
    APTITUDE_GAIN_DIVISOR, INITIAL_AGE, INITIAL_BASE_LIFESPAN, INITIAL_MONEY,
    REINCARNATION_LIFESPAN_BONUS, STAT_LIFESPAN_FACTOR,
};
use crate::equipment::EquipmentSlots;
use crate::status::CharacterStatus;

/// Persisted state of a character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterProperties {
    pub attributes: Attributes,
    pub money: f64,
    pub equipment: EquipmentSlots,
    /// Age in days. Older saves may omit it.
    #[serde(default)]
    pub age: Option<u32>,
    pub status: CharacterStatus,
    pub base_lifespan: f64,
    pub food_lifespan: f64,
    pub stat_lifespan: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    /// Set by the session when health runs out or lifespan is reached.
    pub dead: bool,
    pub attributes: Attributes,
    pub status: CharacterStatus,
    pub money: f64,
    /// Age in days.
    pub age: u32,
    pub base_lifespan: f64,
    /// Bonus days earned by eating well.
    pub food_lifespan: f64,
    /// Bonus days derived from aptitudes at the last reincarnation.
    pub stat_lifespan: f64,
    /// Derived maximum age in days.
    pub lifespan: f64,
    pub equipment: EquipmentSlots,
}

impl Character {
    pub fn new() -> Self {
        let mut character = Self {
            dead: false,
            attributes: Attributes::default(),
            status: CharacterStatus::default(),
            money: INITIAL_MONEY,
            age: INITIAL_AGE,
            base_lifespan: INITIAL_BASE_LIFESPAN,
            food_lifespan: 0.0,
            stat_lifespan: 0.0,
            lifespan: 0.0,
            equipment: EquipmentSlots::default(),
        };
        character.recalculate_lifespan();
        character
    }

    /// Add `amount` raw training to an attribute, scaled by its aptitude.
    ///
    /// Negative amounts decay the attribute by the same scale.
    pub fn increase_attribute(&mut self, attribute: AttributeType, amount: f64) {
        let attr = self.attributes.get_mut(attribute);
        attr.value += amount * aptitude_multiplier(attr.aptitude);
    }

    /// Clamp health, stamina and nourishment to their ceilings.
    pub fn check_overage(&mut self) {
        self.status.check_overage();
    }

    pub fn recalculate_lifespan(&mut self) {
        self.lifespan = self.base_lifespan
            + self.food_lifespan
            + self.stat_lifespan
            + self.attributes.spirituality.value;
    }

    pub fn total_aptitude(&self) -> f64 {
        self.attributes.total_aptitude()
    }

    pub fn is_past_lifespan(&self) -> bool {
        f64::from(self.age) >= self.lifespan
    }

    /// End this life and start the next one.
    ///
    /// Attributes developed this life turn a hundredth of their value into
    /// aptitude and restart at the value that aptitude grants. Attributes at
    /// zero keep their aptitude and stay at zero. Money, age, food lifespan
    /// and equipment reset; base lifespan gains a day and stat lifespan is
    /// recomputed from the new aptitudes.
    pub fn reincarnate(&mut self) {
        self.status.reset_for_new_life();

        for attr in AttributeType::ALL {
            let attribute = self.attributes.get_mut(attr);
            if attribute.value > 0.0 {
                attribute.aptitude += attribute.value / APTITUDE_GAIN_DIVISOR;
                attribute.value = attribute_starting_value(attribute.aptitude);
            }
        }
        let total_aptitude = self.total_aptitude();

        self.money = 0.0;
        self.age = INITIAL_AGE;
        self.base_lifespan += REINCARNATION_LIFESPAN_BONUS;
        self.stat_lifespan =
            STAT_LIFESPAN_FACTOR * (total_aptitude / AttributeType::ALL.len() as f64);
        self.food_lifespan = 0.0;
        self.recalculate_lifespan();
        self.equipment.clear();
    }

    /// Export the persisted fields.
    pub fn properties(&self) -> CharacterProperties {
        CharacterProperties {
            attributes: self.attributes.clone(),
            money: self.money,
            equipment: self.equipment.clone(),
            age: Some(self.age),
            status: self.status.clone(),
            base_lifespan: self.base_lifespan,
            food_lifespan: self.food_lifespan,
            stat_lifespan: self.stat_lifespan,
        }
    }

    /// Load persisted fields and recompute `lifespan`.
    ///
    /// A missing or zero age falls back to the starting age.
    pub fn set_properties(&mut self, properties: CharacterProperties) {
        self.attributes = properties.attributes;
        self.money = properties.money;
        self.equipment = properties.equipment;
        self.age = match properties.age {
            Some(age) if age > 0 => age,
            _ => INITIAL_AGE,
        };
        self.status = properties.status;
        self.base_lifespan = properties.base_lifespan;
        self.food_lifespan = properties.food_lifespan;
        self.stat_lifespan = properties.stat_lifespan;
        self.recalculate_lifespan();
    }
}

impl Default for Character {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::{Equipment, EquipmentPosition};

    const TOL: f64 = 1e-9;

    #[test]
    fn fresh_lifespan_is_computed() {
        let c = Character::new();
        assert!((c.lifespan - INITIAL_BASE_LIFESPAN).abs() < TOL);
        assert!(!c.dead);
        assert_eq!(c.money, 300.0);
    }

    #[test]
    fn increase_scales_by_aptitude() {
        let mut c = Character::new();
        c.attributes.speed.aptitude = 50.0;
        c.increase_attribute(AttributeType::Speed, 2.0);
        // 1 + 2 * 30
        assert!((c.attributes.speed.value - 61.0).abs() < TOL);
    }

    #[test]
    fn increase_by_zero_is_noop() {
        for aptitude in [0.5, 1.0, 10.0, 99.0, 500.0, 2000.0] {
            let mut c = Character::new();
            c.attributes.strength.aptitude = aptitude;
            c.increase_attribute(AttributeType::Strength, 0.0);
            assert_eq!(c.attributes.strength.value, 1.0);
        }
    }

    #[test]
    fn negative_amount_decays() {
        let mut c = Character::new();
        c.attributes.charisma.aptitude = 4.0;
        c.increase_attribute(AttributeType::Charisma, -1.0);
        assert!((c.attributes.charisma.value - (-3.0)).abs() < TOL);
    }

    #[test]
    fn lifespan_includes_spirituality() {
        let mut c = Character::new();
        c.base_lifespan = 100.0;
        c.food_lifespan = 20.5;
        c.stat_lifespan = 3.25;
        c.attributes.spirituality.value = 7.0;
        c.recalculate_lifespan();
        assert_eq!(c.lifespan, 100.0 + 20.5 + 3.25 + 7.0);
    }

    #[test]
    fn lifespan_not_kept_in_sync_implicitly() {
        let mut c = Character::new();
        let before = c.lifespan;
        c.food_lifespan += 50.0;
        assert_eq!(c.lifespan, before);
        c.recalculate_lifespan();
        assert_eq!(c.lifespan, before + 50.0);
    }

    #[test]
    fn reincarnate_scenario() {
        let mut c = Character::new();
        c.increase_attribute(AttributeType::Strength, 100.0);
        assert!((c.attributes.strength.value - 101.0).abs() < TOL);

        c.status.health.max = 180.0;
        c.status.health.value = 12.0;
        c.status.mana.max = 30.0;
        c.money = 999.0;
        c.age = 9000;
        c.food_lifespan = 40.0;
        c.equipment.set(
            EquipmentPosition::Head,
            Some(Equipment {
                id: "hat".into(),
                name: "straw hat".into(),
                description: String::new(),
                value: 1.0,
                slot: EquipmentPosition::Head,
            }),
        );

        c.reincarnate();

        assert!((c.attributes.strength.aptitude - 2.01).abs() < TOL);
        assert!((c.attributes.strength.value - 2.01).abs() < TOL);
        assert_eq!((c.status.health.value, c.status.health.max), (100.0, 100.0));
        assert_eq!((c.status.stamina.value, c.status.stamina.max), (100.0, 100.0));
        assert_eq!((c.status.mana.value, c.status.mana.max), (0.0, 0.0));
        assert_eq!(
            (c.status.nourishment.value, c.status.nourishment.max),
            (7.0, 14.0)
        );
        assert_eq!(c.money, 0.0);
        assert_eq!(c.age, 6570);
        assert_eq!(c.food_lifespan, 0.0);
        assert!(c.equipment.is_empty());
    }

    #[test]
    fn reincarnate_leaves_zero_attributes() {
        let mut c = Character::new();
        c.attributes.alchemy.aptitude = 3.0;
        c.reincarnate();
        assert_eq!(c.attributes.alchemy.aptitude, 3.0);
        assert_eq!(c.attributes.alchemy.value, 0.0);
    }

    #[test]
    fn reincarnate_negative_value_keeps_aptitude() {
        let mut c = Character::new();
        c.attributes.speed.value = -5.0;
        c.reincarnate();
        assert_eq!(c.attributes.speed.aptitude, 1.0);
        assert_eq!(c.attributes.speed.value, -5.0);
    }

    #[test]
    fn reincarnate_high_aptitude_uses_log_start() {
        let mut c = Character::new();
        c.attributes.intelligence.aptitude = 1000.0;
        c.attributes.intelligence.value = 6300.0;
        c.reincarnate();
        // 1000 + 63 = 1063 -> 1000 + log2(64)
        assert!((c.attributes.intelligence.aptitude - 1063.0).abs() < TOL);
        assert!((c.attributes.intelligence.value - 1006.0).abs() < TOL);
    }

    #[test]
    fn stat_lifespan_replaced_not_accumulated() {
        let mut c = Character::new();
        c.stat_lifespan = 500.0;
        c.reincarnate();
        // Five attributes at value 1 gain 0.01 each.
        let expected = 0.8 * ((10.0 + 0.05) / 10.0);
        assert!((c.stat_lifespan - expected).abs() < TOL);

        let base = c.base_lifespan;
        c.reincarnate();
        assert_eq!(c.base_lifespan, base + 1.0);
    }

    #[test]
    fn reincarnate_lifespan_consistent() {
        let mut c = Character::new();
        c.attributes.spirituality.value = 250.0;
        c.reincarnate();
        let expected = c.base_lifespan
            + c.food_lifespan
            + c.stat_lifespan
            + c.attributes.spirituality.value;
        assert_eq!(c.lifespan, expected);
        assert!((c.base_lifespan - (INITIAL_BASE_LIFESPAN + 1.0)).abs() < TOL);
        assert!((c.attributes.spirituality.value - 3.5).abs() < TOL);
    }

    #[test]
    fn aptitude_never_decreases() {
        let mut c = Character::new();
        c.attributes.toughness.value = 12.0;
        c.attributes.plant_lore.value = 0.0;
        c.attributes.animal_lore.value = -40.0;
        let before: Vec<f64> = AttributeType::ALL
            .iter()
            .map(|&a| c.attributes.get(a).aptitude)
            .collect();
        let values: Vec<f64> = AttributeType::ALL
            .iter()
            .map(|&a| c.attributes.get(a).value)
            .collect();
        c.reincarnate();
        for (i, attr) in AttributeType::ALL.iter().enumerate() {
            let after = c.attributes.get(*attr).aptitude;
            assert!(after >= before[i]);
            assert_eq!(after == before[i], values[i] <= 0.0, "{:?}", attr);
        }
    }

    #[test]
    fn properties_round_trip() {
        let mut c = Character::new();
        c.increase_attribute(AttributeType::MetalLore, 3.5);
        c.status.stamina.value = 42.0;
        c.money = 17.0;
        c.age = 7000;
        c.food_lifespan = 12.0;
        c.stat_lifespan = 0.8;
        c.recalculate_lifespan();
        let lifespan = c.lifespan;

        let mut loaded = Character::new();
        loaded.set_properties(c.properties());
        assert_eq!(loaded, c);
        assert_eq!(loaded.lifespan, lifespan);
    }

    #[test]
    fn missing_age_defaults() {
        let mut props = Character::new().properties();
        props.age = None;
        let mut c = Character::new();
        c.age = 9999;
        c.set_properties(props.clone());
        assert_eq!(c.age, 18 * 365);

        props.age = Some(0);
        c.age = 9999;
        c.set_properties(props);
        assert_eq!(c.age, 18 * 365);
    }

    #[test]
    fn set_properties_recomputes_lifespan() {
        let mut props = Character::new().properties();
        props.base_lifespan = 1000.0;
        props.food_lifespan = 10.0;
        props.stat_lifespan = 2.0;
        props.attributes.spirituality.value = 5.0;
        let mut c = Character::new();
        c.set_properties(props);
        assert_eq!(c.lifespan, 1017.0);
    }

    #[test]
    fn snapshot_json_shape() {
        let json = serde_json::to_value(Character::new().properties()).unwrap();
        for key in [
            "attributes",
            "money",
            "equipment",
            "age",
            "status",
            "baseLifespan",
            "foodLifespan",
            "statLifespan",
        ] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
        assert!(json.get("lifespan").is_none());
        assert!(json["attributes"].get("metalLore").is_some());
        assert!(json["equipment"]["leftHand"].is_null());
    }

    #[test]
    fn snapshot_without_age_parses() {
        let mut json = serde_json::to_value(Character::new().properties()).unwrap();
        json.as_object_mut().unwrap().remove("age");
        let props: CharacterProperties = serde_json::from_value(json).unwrap();
        assert_eq!(props.age, None);
    }
}
