//! Step transitions
//!
//! A [`TransitionRunner`] wraps a batch of form mutations so the renderer
//! can animate between the old and new step. Runners never change what a
//! mutation does: it runs exactly once, synchronously, before `run` returns.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Wraps a state mutation for cosmetic effect
pub trait TransitionRunner {
    fn run<'a>(&self, mutation: Box<dyn FnOnce() + 'a>);
}

/// Applies mutations directly with no visual effect
#[derive(Debug, Default, Clone, Copy)]
pub struct ImmediateTransition;

impl TransitionRunner for ImmediateTransition {
    fn run<'a>(&self, mutation: Box<dyn FnOnce() + 'a>) {
        mutation();
    }
}

/// Applies mutations and starts a fade on the shared clock
#[derive(Debug, Clone)]
pub struct AnimatedTransition {
    clock: TransitionClock,
}

impl AnimatedTransition {
    pub fn new(clock: TransitionClock) -> Self {
        Self { clock }
    }
}

impl TransitionRunner for AnimatedTransition {
    fn run<'a>(&self, mutation: Box<dyn FnOnce() + 'a>) {
        mutation();
        self.clock.start(Instant::now());
    }
}

/// Start time of the most recent animated transition, shared with the renderer
#[derive(Debug, Clone, Default)]
pub struct TransitionClock {
    started: Rc<Cell<Option<Instant>>>,
}

impl TransitionClock {
    /// Duration of the fade-in
    pub const DURATION: Duration = Duration::from_millis(250);

    pub fn start(&self, at: Instant) {
        self.started.set(Some(at));
    }

    /// Eased progress in `0.0..=1.0`, or `None` when no transition is running
    pub fn progress(&self, now: Instant) -> Option<f32> {
        let started = self.started.get()?;
        let elapsed = now.saturating_duration_since(started);
        if elapsed >= Self::DURATION {
            self.started.set(None);
            return None;
        }
        let linear = elapsed.as_secs_f32() / Self::DURATION.as_secs_f32();
        Some(simple_easing::cubic_out(linear))
    }

    pub fn is_running(&self, now: Instant) -> bool {
        self.progress(now).is_some()
    }
}

/// Pick the runner once at startup. Animation needs both the user setting
/// and a terminal that can render colour.
pub fn select_runner(
    enabled: bool,
    term: Option<&str>,
    clock: &TransitionClock,
) -> Box<dyn TransitionRunner> {
    let capable = !matches!(term, None | Some("dumb"));
    if enabled && capable {
        tracing::debug!("Using animated step transitions");
        Box::new(AnimatedTransition::new(clock.clone()))
    } else {
        tracing::debug!("Using immediate step transitions");
        Box::new(ImmediateTransition)
    }
}
