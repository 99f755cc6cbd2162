// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Coupled-Network Cascade Simulation Suite ("Overload") - Conservation Audit

use serde::{Deserialize, Serialize};

/// Relative tolerance for a single redistribution pass.
const TOLERANCE: f64 = 1e-9;

// ---------------------------------------------------------------------------
// Free function
// ---------------------------------------------------------------------------

/// Absolute conservation error of one redistribution pass.
///
/// In an exact pass the load taken from failed nodes equals the total share
/// handed to survivors:
///   lost_load = share * surviving_count
///
/// Returns the absolute difference. Values near zero indicate the
/// redistribution accounting is sound.
pub fn pass_error(lost_load: f64, share: f64, surviving_count: usize) -> f64 {
    (lost_load - share * surviving_count as f64).abs()
}

// ---------------------------------------------------------------------------
// Audit result
// ---------------------------------------------------------------------------

/// Outcome of a single pass check.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct PassCheck {
    /// Whether the pass balanced within tolerance.
    pub balanced: bool,
    /// Absolute error for this pass.
    pub error: f64,
}

// ---------------------------------------------------------------------------
// Conservation audit
// ---------------------------------------------------------------------------

/// Accumulates per-pass conservation errors over the lifetime of one
/// network state. A violation here is an internal invariant breach, never
/// a simulation outcome.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ConservationAudit {
    /// Running total of absolute errors from passes that violated tolerance.
    pub cumulative_error: f64,
    /// Total passes checked.
    pub passes: u64,
    /// Passes that violated tolerance.
    pub violations: u32,
}

impl ConservationAudit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check one redistribution pass. Tolerance is relative to the load
    /// moved, floored at 1.0 so near-zero passes are not over-penalized.
    pub fn verify_pass(&mut self, lost_load: f64, share: f64, surviving_count: usize) -> PassCheck {
        let error = pass_error(lost_load, share, surviving_count);
        let balanced = error <= TOLERANCE * lost_load.abs().max(1.0);

        self.passes += 1;
        if !balanced {
            self.cumulative_error += error;
            self.violations += 1;
        }

        PassCheck { balanced, error }
    }

    /// Returns `true` if no pass has ever violated tolerance.
    pub fn is_balanced(&self) -> bool {
        self.violations == 0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_error_exact() {
        let err = pass_error(12.0, 4.0, 3);
        assert!(err < f64::EPSILON, "expected zero error for a balanced pass");
    }

    #[test]
    fn test_pass_error_leakage() {
        let err = pass_error(12.0, 4.0, 2);
        assert!((err - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_balanced_pass_accumulates_nothing() {
        let mut audit = ConservationAudit::new();
        let check = audit.verify_pass(12.0, 4.0, 3);
        assert!(check.balanced);
        assert!(audit.is_balanced());
        assert_eq!(audit.passes, 1);
        assert!(audit.cumulative_error.abs() < f64::EPSILON);
    }

    #[test]
    fn test_violation_is_recorded() {
        let mut audit = ConservationAudit::new();
        let check = audit.verify_pass(12.0, 4.0, 2);
        assert!(!check.balanced);
        assert!(!audit.is_balanced());
        assert_eq!(audit.violations, 1);
        assert!((audit.cumulative_error - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rounding_noise_tolerated() {
        let mut audit = ConservationAudit::new();
        // A share computed as lost / n reconstructs lost only up to f64
        // rounding; that noise must not count as a violation.
        let lost = 1.0e6 + 0.123456789;
        let share = lost / 7.0;
        let check = audit.verify_pass(lost, share, 7);
        assert!(check.balanced, "rounding noise flagged: {}", check.error);
    }
}
