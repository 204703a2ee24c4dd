//! Wall-clock time to round resolution.
//!
//! The timeline is split into fixed anchors (`anchor_ms`, 10 minutes by
//! default). Each anchor starts a fresh round exactly on its boundary with id
//! `anchor_index * rounds_per_anchor`, and rounds follow back to back. When
//! the next round would not fit before the following anchor, the current
//! round is the anchor's last and its Crashed phase stretches to the
//! boundary.
//!
//! Resolution therefore only needs `now`: no counters, no accumulated state.
//! A client that slept through any number of rounds resolves the correct
//! round on its next call.
//!
//! Clients agree only as far as their wall clocks agree. Skewed clocks yield
//! internally consistent but mutually shifted timelines.

use ascent_types::crash::{GameConfig, Multiplier, Phase, Resolution};

use crate::{curve::FlightCurve, generator::CrashPointGenerator};

/// Pure resolver from time to the current round.
#[derive(Clone, Copy, Debug)]
pub struct TimelineOracle {
    config: GameConfig,
    generator: CrashPointGenerator,
    curve: FlightCurve,
}

impl TimelineOracle {
    pub fn new(config: GameConfig) -> Self {
        Self {
            generator: CrashPointGenerator::new(&config),
            curve: FlightCurve::new(&config),
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn generator(&self) -> &CrashPointGenerator {
        &self.generator
    }

    pub fn curve(&self) -> &FlightCurve {
        &self.curve
    }

    /// First round id of the anchor containing `now_ms`.
    pub fn base_round_id(&self, now_ms: u64) -> u64 {
        (now_ms / self.config.anchor_ms).saturating_mul(self.config.rounds_per_anchor())
    }

    /// Crash point and flight duration of `round_id`.
    fn round_parts(&self, round_id: u64) -> (Multiplier, u64) {
        let crash_point = self.generator.crash_point(round_id);
        (crash_point, self.curve.flight_duration_ms(crash_point))
    }

    /// Round that is current at `now_ms` (milliseconds since the UNIX epoch).
    pub fn resolve(&self, now_ms: u64) -> Resolution {
        let betting = self.config.betting_duration_ms;
        let settle = self.config.settle_duration_ms;

        let anchor_start = now_ms - now_ms % self.config.anchor_ms;
        let anchor_end = anchor_start.saturating_add(self.config.anchor_ms);

        let mut round_id = self.base_round_id(now_ms);
        let mut started_at_ms = anchor_start;
        let (mut crash_point, mut flight) = self.round_parts(round_id);
        loop {
            let body = betting + flight;
            let natural_end = started_at_ms + body + settle;
            let (next_crash_point, next_flight) = self.round_parts(round_id.saturating_add(1));
            let next_length = betting + next_flight + settle;

            // The anchor's last round absorbs whatever time is left before the boundary
            let last = natural_end.saturating_add(next_length) > anchor_end;
            let ends_at_ms = if last { anchor_end } else { natural_end };
            if last || now_ms < ends_at_ms {
                let elapsed_ms = now_ms - started_at_ms;
                let phase = if elapsed_ms < betting {
                    Phase::Betting
                } else if elapsed_ms < body {
                    Phase::Flying
                } else {
                    Phase::Crashed
                };
                return Resolution {
                    round_id,
                    phase,
                    elapsed_ms,
                    crash_point,
                    started_at_ms,
                    betting_duration_ms: betting,
                    flight_duration_ms: flight,
                    settle_duration_ms: ends_at_ms - started_at_ms - body,
                };
            }

            started_at_ms = ends_at_ms;
            round_id += 1;
            crash_point = next_crash_point;
            flight = next_flight;
        }
    }

    /// Round immediately before `resolution`, if time extends that far back.
    pub fn previous(&self, resolution: &Resolution) -> Option<Resolution> {
        resolution
            .started_at_ms
            .checked_sub(1)
            .map(|before| self.resolve(before))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Arbitrary wall-clock instant (2024-01-01T00:00:00Z).
    const EPOCH_2024_MS: u64 = 1_704_067_200_000;

    fn oracle() -> TimelineOracle {
        TimelineOracle::new(GameConfig::default())
    }

    fn length_of(oracle: &TimelineOracle, round_id: u64) -> u64 {
        let config = oracle.config();
        let crash = oracle.generator().crash_point(round_id);
        config.betting_duration_ms
            + oracle.curve().flight_duration_ms(crash)
            + config.settle_duration_ms
    }

    #[test]
    fn test_resolve_is_pure() {
        let oracle = oracle();
        for offset in [0, 1, 4_999, 5_000, 123_456, 599_999] {
            let now = EPOCH_2024_MS + offset;
            assert_eq!(oracle.resolve(now), oracle.resolve(now));
        }
    }

    #[test]
    fn test_resolution_contains_now() {
        let oracle = oracle();
        for offset in (0..1_200_000).step_by(997) {
            let now = EPOCH_2024_MS + offset;
            let resolution = oracle.resolve(now);
            assert!(resolution.started_at_ms <= now);
            assert!(now < resolution.ends_at_ms());
            assert_eq!(resolution.elapsed_ms, now - resolution.started_at_ms);
        }
    }

    #[test]
    fn test_anchor_starts_fresh_round() {
        let oracle = oracle();
        let anchor = oracle.config().anchor_ms;
        let start = EPOCH_2024_MS - EPOCH_2024_MS % anchor + anchor;
        let resolution = oracle.resolve(start);
        assert_eq!(resolution.started_at_ms, start);
        assert_eq!(resolution.elapsed_ms, 0);
        assert_eq!(resolution.phase, Phase::Betting);
        assert_eq!(resolution.round_id, oracle.base_round_id(start));

        // The round before the boundary ends exactly on it
        let last = oracle.resolve(start - 1);
        assert_eq!(last.ends_at_ms(), start);
        assert!(last.settle_duration_ms >= oracle.config().settle_duration_ms);
        assert!(last.round_id < resolution.round_id);
        assert_eq!(oracle.previous(&resolution), Some(last));
    }

    #[test]
    fn test_no_drift_on_skip() {
        let oracle = oracle();
        let anchor = oracle.config().anchor_ms;
        let now = EPOCH_2024_MS - EPOCH_2024_MS % anchor + 1_000;
        let first = oracle.resolve(now);

        for k in 1..=6u64 {
            let skipped: u64 = (0..k).map(|i| length_of(&oracle, first.round_id + i)).sum();
            let later = oracle.resolve(now + skipped);
            assert_eq!(later.round_id, first.round_id + k);
            assert_eq!(later.elapsed_ms, first.elapsed_ms);
            assert_eq!(later.phase, Phase::Betting);
        }
    }

    #[test]
    fn test_phases_advance_in_order() {
        let oracle = oracle();
        let anchor = oracle.config().anchor_ms;
        let start = EPOCH_2024_MS - EPOCH_2024_MS % anchor;

        let mut last = oracle.resolve(start);
        for now in (start..start + 2 * anchor).step_by(50) {
            let current = oracle.resolve(now);
            if current.round_id == last.round_id {
                assert!(current.phase as u8 >= last.phase as u8);
            } else {
                assert!(current.round_id > last.round_id);
                assert_eq!(current.started_at_ms, last.ends_at_ms());
                assert_eq!(current.phase, Phase::Betting);
            }
            last = current;
        }
    }

    #[test]
    fn test_flight_matches_crash_point() {
        let oracle = oracle();
        for offset in (0..600_000).step_by(7_919) {
            let resolution = oracle.resolve(EPOCH_2024_MS + offset);
            assert_eq!(
                resolution.flight_duration_ms,
                oracle.curve().flight_duration_ms(resolution.crash_point)
            );
            assert_eq!(
                resolution.crash_point,
                oracle.generator().crash_point(resolution.round_id)
            );
        }
    }

    #[test]
    fn test_round_ids_unique_across_anchors() {
        let oracle = oracle();
        let anchor = oracle.config().anchor_ms;
        let start = EPOCH_2024_MS - EPOCH_2024_MS % anchor;
        let last_of_first = oracle.resolve(start + anchor - 1);
        let first_of_second = oracle.resolve(start + anchor);
        assert!(last_of_first.round_id < first_of_second.round_id);
        assert!(last_of_first.round_id < oracle.base_round_id(start + anchor));
    }

    #[test]
    fn test_previous_at_epoch() {
        let oracle = oracle();
        let first = oracle.resolve(0);
        assert_eq!(first.round_id, 0);
        assert_eq!(oracle.previous(&first), None);
    }
}
