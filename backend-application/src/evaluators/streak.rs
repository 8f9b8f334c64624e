use std::collections::HashMap;
use std::sync::Mutex;

use tracing::debug;

/// Per-user count of consecutive qualifying events.
///
/// Entries live for the whole process unless [`StreakCounter::forget`] drops
/// them; a reset removes the entry rather than storing zero.
#[derive(Debug)]
pub struct StreakCounter {
    label: &'static str,
    target: u32,
    counts: Mutex<HashMap<String, u32>>,
}

impl StreakCounter {
    pub fn new(label: &'static str, target: u32) -> Self {
        Self {
            label,
            target: target.max(1),
            counts: Mutex::new(HashMap::new()),
        }
    }

    /// Counts one qualifying event. Returns `true` when this event completes
    /// the streak, in which case the user's count starts over at zero.
    pub fn advance(&self, user_id: &str) -> bool {
        let mut counts = self.counts.lock().unwrap_or_else(|e| e.into_inner());
        let count = counts.entry(user_id.to_string()).or_insert(0);
        *count += 1;
        debug!("{} streak for {} at {}/{}", self.label, user_id, count, self.target);
        if *count >= self.target {
            counts.remove(user_id);
            return true;
        }
        false
    }

    pub fn reset(&self, user_id: &str) {
        let mut counts = self.counts.lock().unwrap_or_else(|e| e.into_inner());
        if counts.remove(user_id).is_some() {
            debug!("{} streak reset for {}", self.label, user_id);
        }
    }

    pub fn forget(&self, user_id: &str) {
        self.counts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(user_id);
    }

    pub fn current(&self, user_id: &str) -> u32 {
        self.counts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(user_id)
            .copied()
            .unwrap_or(0)
    }

    pub fn tracked_users(&self) -> usize {
        self.counts.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_completes_at_target_and_starts_over() {
        let streak = StreakCounter::new("test", 3);
        assert!(!streak.advance("u1"));
        assert!(!streak.advance("u1"));
        assert!(streak.advance("u1"));
        assert_eq!(streak.current("u1"), 0);
        assert!(!streak.advance("u1"));
        assert_eq!(streak.current("u1"), 1);
    }

    #[test]
    fn users_are_counted_independently() {
        let streak = StreakCounter::new("test", 2);
        assert!(!streak.advance("u1"));
        assert!(!streak.advance("u2"));
        streak.reset("u2");
        assert_eq!(streak.current("u1"), 1);
        assert_eq!(streak.current("u2"), 0);
        assert_eq!(streak.tracked_users(), 1);
    }
}
