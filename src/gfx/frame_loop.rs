use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Stopped,
    Running,
}

/// Per-frame scheduler state.
///
/// The windowing event loop asks [`FrameLoop::is_running`] before requesting
/// another redraw, so [`FrameLoop::stop`] takes effect on the very next frame.
#[derive(Debug)]
pub struct FrameLoop {
    state: LoopState,
    frame: u64,
    last_frame: Option<Instant>,
    delta: Duration,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            state: LoopState::Stopped,
            frame: 0,
            last_frame: None,
            delta: Duration::ZERO,
        }
    }

    pub fn start(&mut self) {
        if self.state == LoopState::Running {
            return;
        }
        self.state = LoopState::Running;
        self.last_frame = None;
    }

    pub fn stop(&mut self) {
        self.state = LoopState::Stopped;
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Frames begun since creation
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Duration of the most recent frame
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Begins a frame. Returns the time since the previous frame, or `None`
    /// while stopped.
    pub fn begin_frame(&mut self) -> Option<Duration> {
        if self.state == LoopState::Stopped {
            return None;
        }
        let now = Instant::now();
        let delta = self
            .last_frame
            .map_or(Duration::ZERO, |last| now.duration_since(last));
        self.last_frame = Some(now);
        self.delta = delta;
        self.frame += 1;
        Some(delta)
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_loop_begins_no_frames() {
        let mut frames = FrameLoop::new();
        assert_eq!(frames.begin_frame(), None);

        frames.start();
        assert_eq!(frames.begin_frame(), Some(Duration::ZERO));
        assert!(frames.begin_frame().is_some());
        assert_eq!(frames.frame_count(), 2);

        frames.stop();
        assert_eq!(frames.begin_frame(), None);
        assert_eq!(frames.frame_count(), 2);
    }
}
