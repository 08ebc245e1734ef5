use std::time::Duration;

/// Running frame counter and accumulated render time.
///
/// Owned by whoever drives the render loop and fed with the duration each
/// frame reports.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    frames: u64,
    total: Duration,
}

impl FrameStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, frame_time: Duration) {
        self.frames += 1;
        self.total += frame_time;
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[inline]
    pub fn total_time(&self) -> Duration {
        self.total
    }

    /// Average frames per second, `None` until some time has been recorded.
    pub fn fps(&self) -> Option<f64> {
        let secs = self.total.as_secs_f64();
        (secs > 0.0).then(|| self.frames as f64 / secs)
    }

    pub fn title(&self, base: &str) -> String {
        match self.fps() {
            Some(fps) => format!("{base}: {fps:.2} FPS"),
            None => base.to_owned(),
        }
    }
}
