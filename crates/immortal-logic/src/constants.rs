//! Fixed starting values for a new life. All durations are in days.

/// Days in a game year.
pub const DAYS_PER_YEAR: u32 = 365;

/// Age every life starts at (18 years).
pub const INITIAL_AGE: u32 = 18 * DAYS_PER_YEAR;

/// Base lifespan of the very first life (30 years).
pub const INITIAL_BASE_LIFESPAN: f64 = 30.0 * DAYS_PER_YEAR as f64;

/// Money a brand new character is handed. Reincarnation resets to zero.
pub const INITIAL_MONEY: f64 = 300.0;

/// Flat lifespan bonus granted by every reincarnation.
pub const REINCARNATION_LIFESPAN_BONUS: f64 = 1.0;

/// Fraction of the average aptitude converted into stat lifespan.
pub const STAT_LIFESPAN_FACTOR: f64 = 0.8;

/// Fraction of last life's attribute value converted into aptitude.
pub const APTITUDE_GAIN_DIVISOR: f64 = 100.0;

pub mod status_defaults {
    pub const HEALTH: f64 = 100.0;
    pub const HEALTH_MAX: f64 = 100.0;
    pub const STAMINA: f64 = 100.0;
    pub const STAMINA_MAX: f64 = 100.0;
    pub const MANA: f64 = 0.0;
    pub const MANA_MAX: f64 = 0.0;
    pub const NOURISHMENT: f64 = 7.0;
    pub const NOURISHMENT_MAX: f64 = 14.0;
}
