//! Wall-clock to fixed-step conversion
//!
//! Hosts feed frame timestamps in; the clock hands back how many `SIM_DT`
//! ticks to run. Long frames are clamped and leftover backlog beyond
//! `MAX_SUBSTEPS` is discarded, so a stalled tab resumes instead of
//! fast-forwarding.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameClock {
    last: Option<f64>,
    accumulator: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous frame, clamped to `[0, MAX_FRAME_DT]`.
    /// The first frame reports one tick's worth.
    pub fn frame_delta(&mut self, now: f64) -> f64 {
        let dt = match self.last {
            Some(last) if now.is_finite() => (now - last).clamp(0.0, MAX_FRAME_DT),
            Some(_) => 0.0,
            None => SIM_DT,
        };
        if now.is_finite() {
            self.last = Some(now);
        }
        dt
    }

    /// Number of fixed ticks due at `now` (seconds)
    pub fn substeps(&mut self, now: f64) -> u32 {
        self.accumulator += self.frame_delta(now);

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        if steps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            log::debug!("dropping {:.3}s of simulation backlog", self.accumulator);
            self.accumulator = 0.0;
        }
        steps
    }

    /// Forget the previous timestamp (after a pause or tab switch)
    pub fn reset(&mut self) {
        self.last = None;
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_runs_one_tick() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.substeps(100.0), 1);
    }

    #[test]
    fn test_steady_frames_accumulate() {
        let mut clock = FrameClock::new();
        clock.substeps(0.0);
        let total: u32 = (1..=60).map(|i| clock.substeps(i as f64 / 30.0)).sum();
        // Two seconds of 30 fps frames
        assert!((119..=120).contains(&total), "ran {total} ticks");
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut clock = FrameClock::new();
        clock.frame_delta(0.0);
        assert_eq!(clock.frame_delta(5.0), MAX_FRAME_DT);
        assert_eq!(clock.frame_delta(4.0), 0.0);
    }

    #[test]
    fn test_substeps_capped() {
        let mut clock = FrameClock::new();
        clock.substeps(0.0);
        assert_eq!(clock.substeps(0.11), 6);
        clock.accumulator = 1.0;
        assert_eq!(clock.substeps(0.12), MAX_SUBSTEPS);
        assert_eq!(clock.accumulator, 0.0);
    }

    #[test]
    fn test_non_finite_timestamp_ignored() {
        let mut clock = FrameClock::new();
        clock.frame_delta(1.0);
        assert_eq!(clock.frame_delta(f64::NAN), 0.0);
        assert!((clock.frame_delta(1.05) - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_reset_restarts_timeline() {
        let mut clock = FrameClock::new();
        clock.substeps(0.0);
        clock.substeps(0.05);
        clock.reset();
        assert_eq!(clock, FrameClock::default());
        assert_eq!(clock.substeps(500.0), 1);
    }
}
