//! HP-fraction phase schedules for multi-phase opponents.
//!
//! A schedule lists thresholds as fractions of maximum health. The phase
//! index is `1 + (number of thresholds at or above the current fraction)`,
//! so an opponent starts in phase 1 and can only move up.

use serde::{Deserialize, Serialize};

use super::moves::OpponentMove;
use crate::status::StatusDuration;

/// One thing that happens when an opponent enters a phase.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseAction {
    /// Replace the active move set.
    SwapMoveSet(Vec<OpponentMove>),
    ResetCooldowns,
    ClearHistory,
    ApplySelfStatus {
        key: String,
        amount: i32,
        duration: StatusDuration,
    },
    GainGuard(i32),
}

/// Actions run on entering `phase`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaseTransition {
    pub phase: u32,
    pub actions: Vec<PhaseAction>,
}

/// Ordered thresholds plus the transitions they unlock.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseSchedule {
    pub thresholds: Vec<f64>,
    #[serde(default)]
    pub transitions: Vec<PhaseTransition>,
}

impl PhaseSchedule {
    #[must_use]
    pub fn new(thresholds: Vec<f64>) -> Self {
        Self {
            thresholds,
            transitions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_transition(mut self, phase: u32, actions: Vec<PhaseAction>) -> Self {
        self.transitions.push(PhaseTransition { phase, actions });
        self
    }

    /// Phase index for an HP fraction in `[0, 1]`.
    #[must_use]
    pub fn phase_at(&self, hp_fraction: f64) -> u32 {
        let crossed = self.thresholds.iter().filter(|&&t| t >= hp_fraction).count();
        1 + crossed as u32
    }

    /// Actions configured for entering `phase`.
    #[must_use]
    pub fn actions_for(&self, phase: u32) -> &[PhaseAction] {
        self.transitions
            .iter()
            .find(|t| t.phase == phase)
            .map_or(&[], |t| t.actions.as_slice())
    }
}

/// Highest phase an opponent has reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseTracker {
    current: u32,
}

impl Default for PhaseTracker {
    fn default() -> Self {
        Self { current: 1 }
    }
}

impl PhaseTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current(&self) -> u32 {
        self.current
    }

    /// Re-evaluate after HP loss.
    ///
    /// Returns the new phase only when it is higher than any phase reached
    /// so far. Phases skipped by a single large hit are not reported.
    pub fn check(&mut self, schedule: &PhaseSchedule, hp_fraction: f64) -> Option<u32> {
        let phase = schedule.phase_at(hp_fraction);
        if phase > self.current {
            self.current = phase;
            Some(phase)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_index() {
        let schedule = PhaseSchedule::new(vec![0.66, 0.33]);
        assert_eq!(schedule.phase_at(1.0), 1);
        assert_eq!(schedule.phase_at(0.66), 2);
        assert_eq!(schedule.phase_at(0.5), 2);
        assert_eq!(schedule.phase_at(0.2), 3);
        assert_eq!(schedule.phase_at(0.0), 3);
    }

    #[test]
    fn test_single_threshold_fires_once() {
        let schedule = PhaseSchedule::new(vec![0.5]);
        let mut tracker = PhaseTracker::new();

        assert_eq!(tracker.check(&schedule, 0.6), None);
        assert_eq!(tracker.check(&schedule, 0.1), Some(2));
        assert_eq!(tracker.check(&schedule, 0.05), None);
        assert_eq!(tracker.current(), 2);
    }

    #[test]
    fn test_large_hit_reports_highest_phase_only() {
        let schedule = PhaseSchedule::new(vec![0.75, 0.5, 0.25]);
        let mut tracker = PhaseTracker::new();

        assert_eq!(tracker.check(&schedule, 0.1), Some(4));
        assert_eq!(tracker.check(&schedule, 0.4), None);
    }

    #[test]
    fn test_actions_lookup() {
        let schedule = PhaseSchedule::new(vec![0.5])
            .with_transition(2, vec![PhaseAction::ResetCooldowns, PhaseAction::GainGuard(5)]);

        assert_eq!(schedule.actions_for(2).len(), 2);
        assert!(schedule.actions_for(3).is_empty());
    }
}
