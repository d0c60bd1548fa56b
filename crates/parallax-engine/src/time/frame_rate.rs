use super::FrameTime;

/// Averages frame durations over a reporting window.
#[derive(Debug, Clone)]
pub struct FrameRate {
    window: f64,
    window_start: f64,
    frames: u32,
    busy: f64,
}

/// One finished reporting window.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameRateReport {
    pub fps: f64,
    /// Mean clamped `dt` in milliseconds.
    pub mean_dt_ms: f64,
}

impl FrameRate {
    /// `window` is in seconds and must be positive.
    pub fn new(window: f64) -> Self {
        debug_assert!(window > 0.0);
        Self { window, window_start: 0.0, frames: 0, busy: 0.0 }
    }

    /// Accumulates one frame. Returns a report once `window` seconds have
    /// elapsed since the last one.
    pub fn record(&mut self, time: FrameTime) -> Option<FrameRateReport> {
        self.frames += 1;
        self.busy += f64::from(time.dt);

        let span = time.elapsed - self.window_start;
        if span < self.window {
            return None;
        }

        let frames = f64::from(self.frames);
        let report = FrameRateReport {
            fps: frames / span,
            mean_dt_ms: self.busy / frames * 1000.0,
        };

        self.window_start = time.elapsed;
        self.frames = 0;
        self.busy = 0.0;
        Some(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(elapsed: f64, dt: f32, frame_index: u64) -> FrameTime {
        FrameTime { dt, elapsed, frame_index }
    }

    #[test]
    fn reports_once_per_window() {
        let mut rate = FrameRate::new(1.0);

        for i in 1..40u64 {
            assert_eq!(rate.record(at(i as f64 * 0.025, 0.025, i)), None);
        }
        let report = rate.record(at(1.0, 0.025, 40)).unwrap();

        assert!((report.fps - 40.0).abs() < 1e-9);
        assert!((report.mean_dt_ms - 25.0).abs() < 1e-3);
    }

    #[test]
    fn window_restarts_after_report() {
        let mut rate = FrameRate::new(0.5);

        assert!(rate.record(at(0.6, 0.25, 0)).is_some());
        assert_eq!(rate.record(at(0.9, 0.25, 1)), None);

        let report = rate.record(at(1.1, 0.2, 2)).unwrap();
        assert!((report.fps - 2.0 / 0.5).abs() < 1e-9);
    }
}
