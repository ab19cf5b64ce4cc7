//! Immortal Headless Simulation Harness
//!
//! Plays whole lives in-process and validates progression math, content
//! wiring and save files. No UI, no disk writes.
//!
//! Usage:
//!   cargo run -p immortal-simtest
//!   cargo run -p immortal-simtest -- --verbose
//!   cargo run -p immortal-simtest -- --config session.json

use immortal_core::catalog::{Catalog, ItemType};
use immortal_core::config::SessionConfig;
use immortal_core::effects::EffectRegistry;
use immortal_core::session::{DeathCause, GameSession, SessionError};
use immortal_core::world::{Unlock, World};
use immortal_logic::attributes::{aptitude_multiplier, attribute_starting_value, AttributeType};
use immortal_logic::character::Character;
use immortal_logic::constants::INITIAL_AGE;
use tracing_subscriber::EnvFilter;

const MAX_DAYS_PER_LIFE: u32 = 50_000;
const LIVES: u32 = 5;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "--verbose");
    let config_path = args
        .iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1));

    // Session log lines reach stderr through the subscriber's `log` bridge
    if verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let config = match config_path {
        Some(path) => match SessionConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        },
        None => SessionConfig {
            seed: Some(42),
            ..Default::default()
        },
    };

    println!("=== Immortal Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Aptitude and training math
    results.extend(validate_progression_math(verbose));

    // 2. Reincarnation carry-over
    results.extend(validate_reincarnation(verbose));

    // 3. Catalog and effect wiring
    results.extend(validate_content(verbose));

    // 4. Whole lives through a session
    results.extend(validate_session_lives(&config, verbose));

    // 5. Save files
    results.extend(validate_persistence(&config, verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ── 1. Progression Math ─────────────────────────────────────────────────

fn validate_progression_math(verbose: bool) -> Vec<TestResult> {
    println!("--- Progression Math ---");
    let mut results = Vec::new();

    // Tier samples
    let samples = [(1.0, 1.0), (10.0, 10.0), (100.0, 100.0), (1000.0, 1000.0)];
    for (aptitude, expected) in samples {
        let got = aptitude_multiplier(aptitude);
        results.push(TestResult {
            name: format!("multiplier_at_{}", aptitude),
            passed: approx(got, expected),
            detail: format!("aptitude {} → multiplier {:.3}", aptitude, got),
        });
    }

    // Monotonic over a wide sweep
    let mut previous = 0.0;
    let mut drops = Vec::new();
    let mut aptitude = 0.5;
    while aptitude < 5000.0 {
        let m = aptitude_multiplier(aptitude);
        if m < previous {
            drops.push(aptitude);
        }
        previous = m;
        aptitude += 0.5;
    }
    results.push(TestResult {
        name: "multiplier_monotonic".into(),
        passed: drops.is_empty(),
        detail: if drops.is_empty() {
            "never decreases between 0.5 and 5000".into()
        } else {
            format!("decreases at {:?}", drops)
        },
    });

    // Starting value follows aptitude, then flattens to the log tier
    let bad_start: Vec<f64> = (1..200)
        .map(|a| a as f64 * 7.5)
        .filter(|&a| {
            let start = attribute_starting_value(a);
            start > a || start < 1.0 || (a < 1000.0 && !approx(start, a))
        })
        .collect();
    results.push(TestResult {
        name: "starting_value_tracks_aptitude".into(),
        passed: bad_start.is_empty(),
        detail: format!("{} aptitudes start at an unexpected value", bad_start.len()),
    });

    // Training scales with aptitude
    let mut c = Character::new();
    c.increase_attribute(AttributeType::Strength, 100.0);
    c.increase_attribute(AttributeType::Strength, 0.0);
    results.push(TestResult {
        name: "train_strength_100".into(),
        passed: approx(c.attributes.strength.value, 101.0),
        detail: format!("strength {:.2}", c.attributes.strength.value),
    });

    if verbose {
        for a in [2.0, 11.0, 55.0, 150.0, 2000.0] {
            println!(
                "    aptitude {:>7.1}: multiplier {:>9.3}, starts at {:>8.3}",
                a,
                aptitude_multiplier(a),
                attribute_starting_value(a)
            );
        }
    }

    results
}

// ── 2. Reincarnation ────────────────────────────────────────────────────

fn validate_reincarnation(verbose: bool) -> Vec<TestResult> {
    println!("--- Reincarnation ---");
    let mut results = Vec::new();

    let mut c = Character::new();
    let mut base = c.base_lifespan;
    let mut aptitudes: Vec<f64> = AttributeType::ALL
        .iter()
        .map(|&a| c.attributes.get(a).aptitude)
        .collect();
    let mut shrank = Vec::new();
    let mut bad_base = 0;

    for life in 1..=LIVES {
        for attr in AttributeType::ALL {
            c.increase_attribute(attr, 25.0);
        }
        c.money += 1000.0;
        c.age += 3000;
        c.reincarnate();

        for (i, attr) in AttributeType::ALL.iter().enumerate() {
            let now = c.attributes.get(*attr).aptitude;
            if now <= aptitudes[i] {
                shrank.push(format!("life {} {}", life, attr.key()));
            }
            aptitudes[i] = now;
        }
        if !approx(c.base_lifespan, base + 1.0) {
            bad_base += 1;
        }
        base = c.base_lifespan;

        if verbose {
            println!(
                "    life {}: total aptitude {:.2}, lifespan {:.1} years",
                life,
                c.total_aptitude(),
                c.lifespan / 365.0
            );
        }
    }

    results.push(TestResult {
        name: "reincarnation_aptitude_grows".into(),
        passed: shrank.is_empty(),
        detail: if shrank.is_empty() {
            format!("every aptitude grew over {} lives", LIVES)
        } else {
            shrank.join(", ")
        },
    });
    results.push(TestResult {
        name: "reincarnation_base_lifespan".into(),
        passed: bad_base == 0,
        detail: format!("base lifespan {:.0} after {} lives", base, LIVES),
    });
    results.push(TestResult {
        name: "reincarnation_resets_life".into(),
        passed: c.money == 0.0 && c.age == INITIAL_AGE && c.food_lifespan == 0.0,
        detail: format!("money {}, age {}", c.money, c.age),
    });

    let expected = c.base_lifespan + c.food_lifespan + c.stat_lifespan
        + c.attributes.spirituality.value;
    results.push(TestResult {
        name: "reincarnation_lifespan_consistent".into(),
        passed: approx(c.lifespan, expected),
        detail: format!("lifespan {:.3} vs parts {:.3}", c.lifespan, expected),
    });

    results
}

// ── 3. Content ──────────────────────────────────────────────────────────

fn validate_content(_verbose: bool) -> Vec<TestResult> {
    println!("--- Catalog & Effects ---");
    let mut results = Vec::new();
    let catalog = Catalog::standard();
    let registry = EffectRegistry::standard();

    let missing: Vec<&str> = catalog
        .items()
        .filter_map(|item| item.effect)
        .chain(catalog.furniture().map(|f| f.effect))
        .filter(|effect| !registry.contains(effect))
        .collect();
    results.push(TestResult {
        name: "content_effects_registered".into(),
        passed: missing.is_empty(),
        detail: if missing.is_empty() {
            format!("{} handlers cover the catalog", registry.len())
        } else {
            format!("unregistered: {:?}", missing)
        },
    });

    let food_without_effect = catalog
        .items()
        .filter(|i| i.item_type == ItemType::Food && (i.effect.is_none() || !i.use_consumes))
        .count();
    results.push(TestResult {
        name: "content_food_is_edible".into(),
        passed: food_without_effect == 0,
        detail: format!("{} food items cannot be eaten", food_without_effect),
    });

    let world = World::new(1);
    let manuals: Vec<_> = catalog
        .items()
        .filter(|i| i.item_type == ItemType::Manual)
        .collect();
    let unowned = manuals
        .iter()
        .filter_map(|m| registry.get(m.effect?))
        .filter(|h| h.is_owned(&world) == Some(false))
        .count();
    results.push(TestResult {
        name: "content_manuals_track_ownership".into(),
        passed: unowned == manuals.len() && manuals.len() == Unlock::ALL.len(),
        detail: format!("{} of {} manuals report ownership", unowned, manuals.len()),
    });

    results.push(TestResult {
        name: "content_has_rice".into(),
        passed: catalog.item_by_id("rice").is_some(),
        detail: "rice is bought when hungry".into(),
    });

    results
}

// ── 4. Session Lives ────────────────────────────────────────────────────

fn validate_session_lives(config: &SessionConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Session Lives ---");
    let mut results = Vec::new();
    let mut session = GameSession::new(config.clone());

    let mut deaths = Vec::new();
    let mut errors = Vec::new();
    for life in 0..LIVES {
        let furniture = ["anvil", "chefKitchen", "heatedBed"];
        for id in furniture {
            if let Err(e) = session.install_furniture(id) {
                errors.push(e.to_string());
            }
        }

        let mut cause = None;
        for _ in 0..MAX_DAYS_PER_LIFE {
            match session.pass_day() {
                Ok(report) if report.death.is_some() => {
                    cause = report.death;
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    errors.push(e.to_string());
                    break;
                }
            }
        }
        if verbose {
            println!(
                "    life {}: died on day {} at age {:.1} ({:?})",
                life,
                session.world().day,
                session.character().age as f64 / 365.0,
                cause
            );
        }
        deaths.push(cause);
        session.reincarnate();
    }

    results.push(TestResult {
        name: "session_no_errors".into(),
        passed: errors.is_empty(),
        detail: if errors.is_empty() {
            "no session errors".into()
        } else {
            errors.join("; ")
        },
    });
    results.push(TestResult {
        name: "session_every_life_ends".into(),
        passed: deaths.iter().all(Option::is_some),
        detail: format!("causes {:?}", deaths),
    });
    let natural = deaths
        .iter()
        .all(|d| matches!(d, Some(DeathCause::Starvation | DeathCause::OldAge)));
    results.push(TestResult {
        name: "session_deaths_natural".into(),
        passed: natural,
        detail: "nothing but hunger or age ends a life".into(),
    });
    results.push(TestResult {
        name: "session_lives_counted".into(),
        passed: session.world().lives == LIVES,
        detail: format!("{} lives recorded", session.world().lives),
    });
    let trained = session.character().attributes.metal_lore.aptitude;
    results.push(TestResult {
        name: "session_furniture_trains".into(),
        passed: trained > 1.0,
        detail: format!("metal lore aptitude {:.2}", trained),
    });

    results
}

// ── 5. Persistence ──────────────────────────────────────────────────────

fn validate_persistence(config: &SessionConfig, _verbose: bool) -> Vec<TestResult> {
    println!("--- Save Files ---");
    let mut results = Vec::new();

    let mut session = GameSession::new(config.clone());
    if let Err(e) = prepare_save(&mut session) {
        results.push(TestResult {
            name: "persist_setup".into(),
            passed: false,
            detail: e.to_string(),
        });
        return results;
    }
    let day_errors: Vec<String> = (0..40)
        .filter_map(|_| session.pass_day().err())
        .map(|e| e.to_string())
        .collect();
    results.push(TestResult {
        name: "persist_setup_days".into(),
        passed: day_errors.is_empty(),
        detail: if day_errors.is_empty() {
            "40 days passed before saving".into()
        } else {
            day_errors.join("; ")
        },
    });

    let mut json = Vec::new();
    let json_ok = session.save_json(&mut json).is_ok();
    let mut from_json = GameSession::new(config.clone());
    let json_loaded = json_ok && from_json.load_json(&json[..]).is_ok();
    results.push(TestResult {
        name: "persist_json_roundtrip".into(),
        passed: json_loaded && from_json.save_data() == session.save_data(),
        detail: format!("{} bytes", json.len()),
    });

    let mut binary = Vec::new();
    let binary_ok = session.save_binary(&mut binary).is_ok();
    let mut from_binary = GameSession::new(config.clone());
    let binary_loaded = binary_ok && from_binary.load_binary(&binary[..]).is_ok();
    results.push(TestResult {
        name: "persist_binary_roundtrip".into(),
        passed: binary_loaded && from_binary.save_data() == session.save_data(),
        detail: format!("{} bytes", binary.len()),
    });

    results.push(TestResult {
        name: "persist_unlocks_survive".into(),
        passed: from_json.world().unlocks.has(Unlock::AutoUse),
        detail: "autoUse unlocked after load".into(),
    });

    let mut legacy: serde_json::Value = match serde_json::from_slice(&json) {
        Ok(v) => v,
        Err(e) => {
            results.push(TestResult {
                name: "persist_legacy_age".into(),
                passed: false,
                detail: e.to_string(),
            });
            return results;
        }
    };
    if let Some(character) = legacy
        .get_mut("character")
        .and_then(serde_json::Value::as_object_mut)
    {
        character.remove("age");
    }
    let mut from_legacy = GameSession::new(config.clone());
    let legacy_loaded = from_legacy.load_json(legacy.to_string().as_bytes()).is_ok();
    results.push(TestResult {
        name: "persist_legacy_age".into(),
        passed: legacy_loaded && from_legacy.character().age == INITIAL_AGE,
        detail: format!("age {} after loading a save without one", from_legacy.character().age),
    });

    results
}

fn prepare_save(session: &mut GameSession) -> Result<(), SessionError> {
    session.acquire_item("autoUseManual", 1)?;
    session.use_item("autoUseManual")?;
    session.acquire_item("peach", 2)
}
