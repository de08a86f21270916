use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::models::AlertKey;

/// Remembers when each alert identity last fired so repeated zone entries
/// stay quiet for the cooldown window. Time comes in from the caller, which
/// keeps the registry deterministic under test.
#[derive(Debug, Default)]
pub struct CooldownRegistry {
    last_fired: HashMap<AlertKey, Instant>,
}

impl CooldownRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_suppressed(&self, key: &AlertKey, cooldown: Duration, now: Instant) -> bool {
        self.last_fired
            .get(key)
            .is_some_and(|&fired| now.duration_since(fired) < cooldown)
    }

    pub fn mark_fired(&mut self, key: AlertKey, now: Instant) {
        self.last_fired.insert(key, now);
    }

    /// Drop entries old enough that they can never suppress again.
    pub fn prune(&mut self, cooldown: Duration, now: Instant) {
        self.last_fired
            .retain(|_, &mut fired| now.duration_since(fired) < cooldown);
    }
}
