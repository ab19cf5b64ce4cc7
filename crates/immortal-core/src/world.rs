//! State outside the character that effects may touch: permanent
//! automation unlocks and the player-facing event log.

use std::collections::{BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

/// Automation features unlocked by reading manuals. Never reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Unlock {
    AutoReplant,
    AutoRestart,
    AutoSell,
    AutoUse,
    AutoBuyLand,
    AutoBuyHome,
    AutoBuyFurniture,
    AutoField,
}

impl Unlock {
    pub const ALL: [Unlock; 8] = [
        Unlock::AutoReplant,
        Unlock::AutoRestart,
        Unlock::AutoSell,
        Unlock::AutoUse,
        Unlock::AutoBuyLand,
        Unlock::AutoBuyHome,
        Unlock::AutoBuyFurniture,
        Unlock::AutoField,
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unlocks {
    unlocked: BTreeSet<Unlock>,
}

impl Unlocks {
    /// Returns true if the unlock was new.
    pub fn grant(&mut self, unlock: Unlock) -> bool {
        self.unlocked.insert(unlock)
    }

    pub fn has(&self, unlock: Unlock) -> bool {
        self.unlocked.contains(&unlock)
    }

    pub fn iter(&self) -> impl Iterator<Item = Unlock> + '_ {
        self.unlocked.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.unlocked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.unlocked.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogKind {
    Standard,
    Injury,
    Important,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub day: u32,
    pub kind: LogKind,
    pub text: String,
}

/// Bounded message log shown to the player, oldest dropped first.
///
/// Every entry is also forwarded to the `log` facade.
#[derive(Debug, Clone)]
pub struct LogBook {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl LogBook {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(1024)),
            capacity: capacity.max(1),
        }
    }

    pub fn add(&mut self, day: u32, kind: LogKind, text: impl Into<String>) {
        let text = text.into();
        match kind {
            LogKind::Injury => log::warn!("day {}: {}", day, text),
            LogKind::Standard | LogKind::Important => log::info!("day {}: {}", day, text),
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry { day, kind, text });
    }

    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything besides the character that handlers get access to.
#[derive(Debug, Clone)]
pub struct World {
    /// Days elapsed since the save was created.
    pub day: u32,
    /// Completed reincarnations.
    pub lives: u32,
    pub unlocks: Unlocks,
    pub log: LogBook,
}

impl World {
    pub fn new(log_capacity: usize) -> Self {
        Self {
            day: 0,
            lives: 0,
            unlocks: Unlocks::default(),
            log: LogBook::new(log_capacity),
        }
    }

    /// Add a log entry stamped with the current day.
    pub fn record(&mut self, kind: LogKind, text: impl Into<String>) {
        self.log.add(self.day, kind, text);
    }
}
