//! Lifecycle of the starfield: mount, run loop, input, teardown.

use std::time::Duration;

use rand::Rng;
use stardust_core::{Point, Theme, Viewport};

use crate::clock::{FrameId, FrameScheduler};
use crate::state::{Effects, StarfieldState};
use crate::surface::Surface;

/// Host signals the animator subscribes to while running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listener {
    PointerMove,
    Resize,
}

/// Drives a [`StarfieldState`] onto a [`Surface`] once per display refresh.
///
/// The host owns the event loop: it forwards pointer and resize events and
/// delivers the frames it was asked for through [`Animator::on_frame`].
#[derive(Debug)]
pub struct Animator<S, R> {
    /// Drawing surface, `None` when none could be acquired.
    surface: Option<S>,
    state: StarfieldState,
    /// Theme read at the start of every frame.
    theme: Theme,
    effects: Effects,
    rng: R,
    listeners: Vec<Listener>,
    /// The one frame request the animator will honor.
    pending: Option<FrameId>,
}

impl<S: Surface, R: Rng> Animator<S, R> {
    /// Mount the animator on a surface sized to `viewport`.
    ///
    /// Without a surface the animator stays inert: it never schedules,
    /// listens, or draws.
    pub fn mount(
        surface: Option<S>,
        viewport: Viewport,
        theme: Theme,
        effects: Effects,
        mut rng: R,
    ) -> Self {
        let (surface, state) = match surface {
            Some(mut surface) => {
                surface.resize(viewport);
                let state = StarfieldState::new(viewport, &mut rng);
                tracing::debug!(
                    width = viewport.width,
                    height = viewport.height,
                    stars = state.stars().len(),
                    "starfield mounted"
                );
                (Some(surface), state)
            }
            None => {
                tracing::debug!("no drawing surface, starfield disabled");
                (None, StarfieldState::new(Viewport::default(), &mut rng))
            }
        };

        Self {
            surface,
            state,
            theme,
            effects,
            rng,
            listeners: Vec::new(),
            pending: None,
        }
    }

    /// Attach listeners and request the first frame.
    ///
    /// Returns `false` for an inert animator. Starting a running animator
    /// changes nothing.
    pub fn start<F: FrameScheduler>(&mut self, scheduler: &mut F) -> bool {
        if self.surface.is_none() {
            return false;
        }
        if self.pending.is_none() {
            self.listeners = vec![Listener::PointerMove, Listener::Resize];
            self.pending = Some(scheduler.request_frame());
        }
        true
    }

    /// Detach every listener and cancel the pending frame.
    pub fn stop<F: FrameScheduler>(&mut self, scheduler: &mut F) {
        if let Some(id) = self.pending.take() {
            scheduler.cancel_frame(id);
        }
        if !self.listeners.is_empty() {
            tracing::debug!("starfield stopped");
        }
        self.listeners.clear();
    }

    /// Run one tick for a delivered frame and request the next one.
    ///
    /// Frames that are not the pending request (cancelled, superseded, or
    /// delivered after [`Animator::stop`]) are ignored and return `false`.
    pub fn on_frame<F: FrameScheduler>(
        &mut self,
        id: FrameId,
        elapsed: Duration,
        scheduler: &mut F,
    ) -> bool {
        if self.pending != Some(id) {
            return false;
        }
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };

        let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
        self.state
            .render(surface, self.theme, elapsed_ms, self.effects, &mut self.rng);

        self.pending = Some(scheduler.request_frame());
        true
    }

    /// Forward a pointer position in surface pixels.
    pub fn handle_pointer_move(&mut self, position: Point) -> bool {
        if !self.listens_to(Listener::PointerMove) {
            return false;
        }
        self.state.set_pointer_position(position);
        true
    }

    /// Forward a viewport resize: the surface and the star set are rebuilt.
    pub fn handle_resize(&mut self, viewport: Viewport) -> bool {
        if !self.listens_to(Listener::Resize) {
            return false;
        }
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        surface.resize(viewport);
        self.state.resize(viewport, &mut self.rng);
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            stars = self.state.stars().len(),
            "starfield resized"
        );
        true
    }

    /// Change the theme. Takes effect on the next frame.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_inert(&self) -> bool {
        self.surface.is_none()
    }

    /// Whether a frame request is outstanding.
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn listens_to(&self, listener: Listener) -> bool {
        self.listeners.contains(&listener)
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn state(&self) -> &StarfieldState {
        &self.state
    }
}
