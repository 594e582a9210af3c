/// Fixed-step animation clock driving the sphere ring
///
/// The host feeds elapsed wall time; the clock advances in whole ticks so
/// the phase only changes at tick boundaries.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationClock {
    tick: Duration,
    revolution: Duration,
    elapsed: Duration,
    pending: Duration,
}

impl AnimationClock {
    pub fn new(tick: Duration, revolution: Duration) -> Self {
        Self {
            tick,
            revolution,
            elapsed: Duration::ZERO,
            pending: Duration::ZERO,
        }
    }

    /// Add wall time and return the number of ticks that elapsed
    ///
    /// The count saturates at `u32::MAX`; elapsed time saturates at
    /// `Duration::MAX`.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        let tick = self.tick.as_nanos();
        if tick == 0 {
            return 0;
        }
        let pending = self.pending.as_nanos() + dt.as_nanos();
        let ticks = pending / tick;
        self.pending = nanos_to_duration(pending % tick);
        self.elapsed = self.elapsed.saturating_add(nanos_to_duration(ticks * tick));
        u32::try_from(ticks).unwrap_or(u32::MAX)
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Rotation of the sphere ring in degrees, `[0, 360)`
    pub fn phase_degrees(&self) -> f32 {
        if self.revolution.is_zero() {
            return 0.0;
        }
        let turns = self.elapsed.as_secs_f64() / self.revolution.as_secs_f64();
        (turns.fract() * 360.0) as f32
    }
}

fn nanos_to_duration(nanos: u128) -> Duration {
    const NANOS_PER_SEC: u128 = 1_000_000_000;
    match u64::try_from(nanos / NANOS_PER_SEC) {
        Ok(secs) => Duration::new(secs, (nanos % NANOS_PER_SEC) as u32),
        Err(_) => Duration::MAX,
    }
}

#[cfg(test)]
#[path = "animation_tests.rs"]
mod tests;
