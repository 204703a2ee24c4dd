use ascent_types::crash::{GameConfig, Multiplier};

/// Exponential multiplier curve.
///
/// `multiplier(t) = exp(k * t)`, with `k` chosen so the curve reaches the
/// configured cap after exactly `max_flight_duration_ms`.
#[derive(Clone, Copy, Debug)]
pub struct FlightCurve {
    growth_rate: f64,
    max_flight_duration_ms: u64,
}

impl FlightCurve {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            growth_rate: config.growth_rate(),
            max_flight_duration_ms: config.max_flight_duration_ms,
        }
    }

    /// Raw curve value after `elapsed_ms` of flight.
    pub fn multiplier(&self, elapsed_ms: u64) -> f64 {
        (self.growth_rate * elapsed_ms as f64 / 1_000.0).exp()
    }

    /// Flight time for a round crashing at `crash`.
    ///
    /// Rounded up to the next millisecond so the curve has reached the crash
    /// point by the time the round ends.
    pub fn flight_duration_ms(&self, crash: Multiplier) -> u64 {
        let seconds = crash.as_f64().ln() / self.growth_rate;
        let ms = (seconds * 1_000.0).ceil();
        if !ms.is_finite() || ms <= 0.0 {
            return 0;
        }
        (ms as u64).min(self.max_flight_duration_ms)
    }

    /// Multiplier shown to players: truncated to hundredths and never above
    /// the crash point.
    pub fn displayed(&self, elapsed_ms: u64, crash: Multiplier) -> Multiplier {
        Multiplier::from_f64_floor(self.multiplier(elapsed_ms))
            .map_or(crash, |m| m.min(crash))
            .max(Multiplier::ONE)
    }
}
