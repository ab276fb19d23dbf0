//! Display refresh scheduling.

use std::time::{Duration, Instant};

/// Handle for one requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(pub u64);

/// Source of display refresh callbacks.
pub trait FrameScheduler {
    /// Ask for one callback on the next refresh.
    fn request_frame(&mut self) -> FrameId;

    /// Withdraw a request. Unknown or already delivered ids are ignored.
    fn cancel_frame(&mut self, id: FrameId);
}

/// Fixed-rate frame scheduler driven by the host's event loop.
///
/// A request becomes due one frame interval after the previous frame was
/// taken, so a busy loop never runs more than `fps` frames per second.
#[derive(Debug)]
pub struct FrameClock {
    interval: Duration,
    next_id: u64,
    pending: Option<(FrameId, Instant)>,
    last_frame: Option<Instant>,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        Self {
            interval: Duration::from_secs(1) / fps.max(1),
            next_id: 0,
            pending: None,
            last_frame: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether a frame request is waiting.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left until the pending frame is due, `None` if nothing is pending.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending
            .map(|(_, due)| due.saturating_duration_since(now))
    }

    /// Take the pending frame if it is due at `now`.
    pub fn take_due(&mut self, now: Instant) -> Option<FrameId> {
        match self.pending {
            Some((id, due)) if due <= now => {
                self.pending = None;
                self.last_frame = Some(now);
                Some(id)
            }
            _ => None,
        }
    }

    fn request_at(&mut self, now: Instant) -> FrameId {
        let id = FrameId(self.next_id);
        self.next_id += 1;
        let due = self.last_frame.map_or(now, |last| last + self.interval);
        self.pending = Some((id, due));
        id
    }
}

impl FrameScheduler for FrameClock {
    fn request_frame(&mut self) -> FrameId {
        self.request_at(Instant::now())
    }

    fn cancel_frame(&mut self, id: FrameId) {
        if self.pending.is_some_and(|(pending, _)| pending == id) {
            self.pending = None;
        }
    }
}
