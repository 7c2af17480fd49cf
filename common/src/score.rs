use serde::{Deserialize, Serialize};

/// Current round score plus the best score seen since the process started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTracker {
    current: u32,
    best: u32,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn begin_round(&mut self) {
        self.current = 0;
    }

    pub fn award(&mut self, points: u32) -> u32 {
        self.current = self.current.saturating_add(points);
        self.current
    }

    /// Folds the finished round into the best score. Returns true on a new best.
    pub fn finish_round(&mut self) -> bool {
        if self.current > self.best {
            self.best = self.current;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_only_moves_up() {
        let mut scores = ScoreTracker::new();
        scores.begin_round();
        scores.award(10);
        scores.award(10);
        assert!(scores.finish_round());
        assert_eq!(scores.best(), 20);

        scores.begin_round();
        assert_eq!(scores.current(), 0);
        scores.award(10);
        assert!(!scores.finish_round());
        assert_eq!(scores.best(), 20);
    }

    #[test]
    fn best_is_untouched_until_the_round_finishes() {
        let mut scores = ScoreTracker::new();
        scores.begin_round();
        scores.award(30);
        assert_eq!(scores.best(), 0);
    }
}
