// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Coupled-Network Cascade Simulation Suite ("Overload") - Cascade Coupler
//
// Alternates redistribution between two interdependent networks. A node
// index that fails in one network forces the same index to fail in the
// partner, so a cascade ping-pongs until a fixed point or total collapse.

use crate::network::NetworkState;
use crate::types::TrialOutcome;

/// Drives two [`NetworkState`]s of equal size through alternating coupling
/// rounds. Owns both networks and the in-flight failed-index list passed
/// between them.
#[derive(Debug)]
pub struct CascadeCoupler {
    a: NetworkState,
    b: NetworkState,
}

impl CascadeCoupler {
    /// # Panics
    /// If the two networks differ in node count; interdependency coupling
    /// is index-to-index.
    pub fn new(a: NetworkState, b: NetworkState) -> Self {
        assert_eq!(a.num_nodes(), b.num_nodes());
        Self { a, b }
    }

    pub fn network_a(&self) -> &NetworkState {
        &self.a
    }

    pub fn network_b(&self) -> &NetworkState {
        &self.b
    }

    /// Protocol step one: network A absorbs the externally injected failure
    /// set. Returns A's newly-failed nodes, which seed the first round.
    pub fn inject(&mut self, initial_failures: &[usize]) -> Vec<usize> {
        self.a.apply_failures(initial_failures)
    }

    /// One full coupling round: B absorbs the in-flight failure set, then A
    /// absorbs whatever B newly failed. Returns A's newly-failed set, which
    /// is the next round's input. An empty result with unchanged survivor
    /// counts means the coupled system is at a fixed point.
    pub fn step_round(&mut self, failed: &[usize]) -> Vec<usize> {
        let from_b = self.b.apply_failures(failed);
        self.a.apply_failures(&from_b)
    }

    /// Run the coupled cascade to termination.
    ///
    /// Network A absorbs the externally injected `initial_failures` first
    /// (its own redistribution may extend the set); thereafter rounds are a
    /// strict B-then-A alternation. Terminates when a full round leaves
    /// both survivor counts unchanged, or when either network fully
    /// collapses — in which case both fractions are reported as zero,
    /// matching the reference behavior.
    ///
    /// `rounds` counts full B/A rounds. An empty injection (`p = 0`) still
    /// takes one round to observe the fixed point, so it reports
    /// `rounds = 1`.
    pub fn run(&mut self, initial_failures: &[usize]) -> TrialOutcome {
        let n = self.a.num_nodes();
        // The survivor set shrinks every non-terminal round in at least one
        // network, so 2N rounds is unreachable without a broken invariant.
        let max_rounds = 2 * n as u32 + 1;

        let mut in_flight = self.inject(initial_failures);
        let mut prev = (self.a.surviving_count(), self.b.surviving_count());
        let mut rounds = 0u32;

        loop {
            in_flight = self.step_round(&in_flight);
            rounds += 1;

            let now = (self.a.surviving_count(), self.b.surviving_count());
            log::debug!("round {}: surviving A={} B={}", rounds, now.0, now.1);

            if now.0 == 0 || now.1 == 0 {
                return TrialOutcome {
                    rounds,
                    surviving_fraction_a: 0.0,
                    surviving_fraction_b: 0.0,
                };
            }
            if now == prev {
                break;
            }
            prev = now;

            if rounds >= max_rounds {
                log::error!("no fixed point within {} rounds; aborting", max_rounds);
                break;
            }
        }

        // At a fixed point no new failures were produced in the last round.
        debug_assert!(in_flight.is_empty());

        TrialOutcome {
            rounds,
            surviving_fraction_a: self.a.surviving_fraction(),
            surviving_fraction_b: self.b.surviving_fraction(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn robust(n: usize) -> NetworkState {
        NetworkState::from_parts(vec![1.0; n], vec![10.0; n])
    }

    #[test]
    fn test_empty_injection_reports_one_round() {
        let mut coupler = CascadeCoupler::new(robust(4), robust(4));
        let outcome = coupler.run(&[]);
        assert_eq!(outcome.rounds, 1);
        assert_eq!(outcome.surviving_fraction_a, 1.0);
        assert_eq!(outcome.surviving_fraction_b, 1.0);
    }

    #[test]
    fn test_failure_propagates_to_partner_index() {
        // A's redistribution newly fails node 1; B must lose node 1 too
        // even though B itself never overloads.
        let a = NetworkState::from_parts(vec![5.0, 4.0, 1.0], vec![5.5, 4.5, 20.0]);
        let b = robust(3);
        let mut coupler = CascadeCoupler::new(a, b);
        let outcome = coupler.run(&[0]);

        assert_eq!(coupler.network_a().surviving_count(), 1);
        assert_eq!(coupler.network_b().surviving_count(), 2);
        assert!(!coupler.network_b().is_active(1));
        assert_eq!(outcome.rounds, 2);
        assert!((outcome.surviving_fraction_a - 1.0 / 3.0).abs() < 1e-12);
        assert!((outcome.surviving_fraction_b - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_collapse_of_one_reports_both_zero() {
        // A collapses entirely on the first injection; B would survive on
        // its own but the outcome reports total collapse for both.
        let a = NetworkState::from_parts(vec![1.0, 1.0], vec![1.05, 1.05]);
        let b = robust(2);
        let mut coupler = CascadeCoupler::new(a, b);
        let outcome = coupler.run(&[0]);

        assert_eq!(outcome.surviving_fraction_a, 0.0);
        assert_eq!(outcome.surviving_fraction_b, 0.0);
    }

    #[test]
    fn test_survivors_never_increase_round_over_round() {
        let a = NetworkState::from_parts(
            vec![2.0, 2.0, 2.0, 2.0],
            vec![2.5, 2.9, 3.3, 9.0],
        );
        let b = NetworkState::from_parts(
            vec![2.0, 2.0, 2.0, 2.0],
            vec![4.2, 4.2, 4.2, 4.2],
        );
        let mut coupler = CascadeCoupler::new(a, b);

        let mut in_flight = coupler.inject(&[0, 1]);
        let mut prev = (
            coupler.network_a().surviving_count(),
            coupler.network_b().surviving_count(),
        );
        for _ in 0..10 {
            in_flight = coupler.step_round(&in_flight);
            let now = (
                coupler.network_a().surviving_count(),
                coupler.network_b().surviving_count(),
            );
            assert!(now.0 <= prev.0 && now.1 <= prev.1);
            if now == prev {
                break;
            }
            prev = now;
        }
    }

    #[test]
    fn test_fixed_point_is_closed() {
        let a = NetworkState::from_parts(vec![5.0, 4.0, 1.0], vec![5.5, 4.5, 20.0]);
        let b = robust(3);
        let mut coupler = CascadeCoupler::new(a, b);
        let outcome = coupler.run(&[0]);
        assert!(outcome.surviving_fraction_a > 0.0);

        // One more round on the terminal state produces nothing new.
        let extra = coupler.step_round(&[]);
        assert!(extra.is_empty());
    }

    #[test]
    #[should_panic]
    fn test_mismatched_sizes_rejected() {
        CascadeCoupler::new(robust(3), robust(4));
    }
}
