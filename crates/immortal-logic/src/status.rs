//! Capped status resources: health, stamina, mana and nourishment.
//!
//! Mutations never clamp on their own. Callers that may push a pool past
//! its ceiling batch their changes and then call
//! [`CharacterStatus::check_overage`] once.

use serde::{Deserialize, Serialize};

use crate::constants::status_defaults;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusType {
    Health,
    Stamina,
    Mana,
    Nourishment,
}

impl StatusType {
    pub const ALL: [StatusType; 4] = [
        StatusType::Health,
        StatusType::Stamina,
        StatusType::Mana,
        StatusType::Nourishment,
    ];
}

/// A replenishable pool with a ceiling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResource {
    pub description: String,
    pub value: f64,
    pub max: f64,
}

impl StatusResource {
    fn new(description: &str, value: f64, max: f64) -> Self {
        Self {
            description: description.to_string(),
            value,
            max,
        }
    }

    /// Set both current value and ceiling.
    pub fn reset(&mut self, value: f64, max: f64) {
        self.value = value;
        self.max = max;
    }

    /// Pull `value` down to `max` if it is above it.
    fn clamp_to_max(&mut self) {
        if self.value > self.max {
            self.value = self.max;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterStatus {
    pub health: StatusResource,
    pub stamina: StatusResource,
    pub mana: StatusResource,
    pub nourishment: StatusResource,
}

impl CharacterStatus {
    pub fn get(&self, status: StatusType) -> &StatusResource {
        match status {
            StatusType::Health => &self.health,
            StatusType::Stamina => &self.stamina,
            StatusType::Mana => &self.mana,
            StatusType::Nourishment => &self.nourishment,
        }
    }

    pub fn get_mut(&mut self, status: StatusType) -> &mut StatusResource {
        match status {
            StatusType::Health => &mut self.health,
            StatusType::Stamina => &mut self.stamina,
            StatusType::Mana => &mut self.mana,
            StatusType::Nourishment => &mut self.nourishment,
        }
    }

    /// Clamp health, stamina and nourishment to their ceilings.
    ///
    /// Mana is left alone.
    pub fn check_overage(&mut self) {
        self.health.clamp_to_max();
        self.stamina.clamp_to_max();
        self.nourishment.clamp_to_max();
    }

    /// Restore every pool to its start-of-life value and ceiling.
    pub fn reset_for_new_life(&mut self) {
        self.health
            .reset(status_defaults::HEALTH, status_defaults::HEALTH_MAX);
        self.stamina
            .reset(status_defaults::STAMINA, status_defaults::STAMINA_MAX);
        self.nourishment.reset(
            status_defaults::NOURISHMENT,
            status_defaults::NOURISHMENT_MAX,
        );
        self.mana
            .reset(status_defaults::MANA, status_defaults::MANA_MAX);
    }
}

impl Default for CharacterStatus {
    fn default() -> Self {
        Self {
            health: StatusResource::new(
                "Physical well-being. Take too much damage and you will die.",
                status_defaults::HEALTH,
                status_defaults::HEALTH_MAX,
            ),
            stamina: StatusResource::new(
                "Physical energy to accomplish tasks. Most activities use stamina, and if you let yourself run down you could get sick and have to stay in bed for a few days.",
                status_defaults::STAMINA,
                status_defaults::STAMINA_MAX,
            ),
            mana: StatusResource::new(
                "Magical energy required for mysterious spiritual activities.",
                status_defaults::MANA,
                status_defaults::MANA_MAX,
            ),
            nourishment: StatusResource::new(
                "Eating is essential to life. You will automatically eat whatever food you have available when you are hungry. If you run out of food you will automatically spend your money on a bowl of rice each day.",
                status_defaults::NOURISHMENT,
                status_defaults::NOURISHMENT_MAX,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = CharacterStatus::default();
        assert_eq!((s.health.value, s.health.max), (100.0, 100.0));
        assert_eq!((s.stamina.value, s.stamina.max), (100.0, 100.0));
        assert_eq!((s.mana.value, s.mana.max), (0.0, 0.0));
        assert_eq!((s.nourishment.value, s.nourishment.max), (7.0, 14.0));
    }

    #[test]
    fn overage_clamps_three_pools() {
        let mut s = CharacterStatus::default();
        s.health.value = 150.0;
        s.stamina.value = 101.0;
        s.nourishment.value = 20.0;
        s.check_overage();
        assert_eq!(s.health.value, 100.0);
        assert_eq!(s.stamina.value, 100.0);
        assert_eq!(s.nourishment.value, 14.0);
    }

    #[test]
    fn overage_leaves_mana_alone() {
        let mut s = CharacterStatus::default();
        s.mana.value = 5.0;
        s.mana.max = 2.0;
        s.check_overage();
        assert_eq!(s.mana.value, 5.0);
        assert_eq!(s.mana.max, 2.0);
    }

    #[test]
    fn overage_does_not_raise_low_values() {
        let mut s = CharacterStatus::default();
        s.health.value = -3.0;
        s.stamina.value = 40.0;
        s.check_overage();
        assert_eq!(s.health.value, -3.0);
        assert_eq!(s.stamina.value, 40.0);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut s = CharacterStatus::default();
        s.health.max = 250.0;
        s.mana.value = 9.0;
        s.mana.max = 9.0;
        s.nourishment.value = 1.0;
        s.reset_for_new_life();
        assert_eq!(s, CharacterStatus::default());
    }

    #[test]
    fn get_mut_by_type() {
        let mut s = CharacterStatus::default();
        s.get_mut(StatusType::Stamina).value -= 30.0;
        assert_eq!(s.get(StatusType::Stamina).value, 70.0);
    }
}
