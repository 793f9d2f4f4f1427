// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Frame-rate telemetry
//!
//! The emitter feeds every active `update` into a [`FrameRateMonitor`]. The
//! monitor is informational only; nothing in the simulation reads it.

/// Length of the averaging window in seconds
pub const FPS_WINDOW_SECONDS: f64 = 2.0;

/// Averages frames per second over a rolling window
#[derive(Debug, Clone, Default)]
pub struct FrameRateMonitor {
    frames: u64,
    elapsed: f64,
    fps: Option<f64>,
}

impl FrameRateMonitor {
    /// Create a monitor with an empty window
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one frame that took `delta` seconds
    ///
    /// Once more than [`FPS_WINDOW_SECONDS`] have accumulated, publishes the
    /// average rounded to two decimals and starts a new window.
    pub fn record(&mut self, delta: f64) {
        self.frames += 1;
        self.elapsed += delta;

        if self.elapsed > FPS_WINDOW_SECONDS {
            let fps = (self.frames as f64 / self.elapsed * 100.0).round() / 100.0;
            log::debug!("{} fps over {} frames", fps, self.frames);
            self.fps = Some(fps);
            self.frames = 0;
            self.elapsed = 0.0;
        }
    }

    /// Most recently published frame rate, if a window has completed
    pub fn fps(&self) -> Option<f64> {
        self.fps
    }

    /// Frames recorded in the current window
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Discard the current window and the published value
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_fps_before_window_completes() {
        let mut monitor = FrameRateMonitor::new();
        for _ in 0..60 {
            monitor.record(1.0 / 60.0);
        }
        assert_eq!(monitor.fps(), None);
        assert_eq!(monitor.frames(), 60);
    }

    #[test]
    fn test_fps_published_after_window() {
        let mut monitor = FrameRateMonitor::new();
        for _ in 0..9 {
            monitor.record(0.25);
        }

        // 9 frames over 2.25 seconds
        assert_eq!(monitor.fps(), Some(4.0));
        assert_eq!(monitor.frames(), 0);
    }

    #[test]
    fn test_fps_is_rounded() {
        let mut monitor = FrameRateMonitor::new();
        for _ in 0..7 {
            monitor.record(0.3);
        }
        // 7 / 2.1 = 3.333...
        assert_eq!(monitor.fps(), Some(3.33));
    }

    #[test]
    fn test_clear() {
        let mut monitor = FrameRateMonitor::new();
        monitor.record(3.0);
        assert!(monitor.fps().is_some());

        monitor.clear();
        assert_eq!(monitor.fps(), None);
        assert_eq!(monitor.frames(), 0);
    }
}
