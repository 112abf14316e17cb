//! Playback engine and session task.
//!
//! A session reveals its lines one at a time on a jittered schedule, advances
//! progress in lockstep, settles, drains, and completes exactly once. The
//! returned `PlaybackHandle` cancels it; dropping the handle cancels too, so a
//! torn-down host never leaks pending timers.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::ambient::AmbientEffect;
use crate::error::PlaybackError;
use crate::gate::Gate;
use crate::line::DisplayLine;
use crate::schedule;
use crate::state::PlaybackState;
use crate::timing::PlaybackTiming;

type TickFn = Box<dyn FnMut(&[DisplayLine], f64) + Send>;
type CompleteFn = Box<dyn FnOnce() + Send>;
type FadeFn = Arc<dyn Fn() + Send + Sync>;

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Completed,
    Cancelled,
}

#[derive(Debug, Default)]
struct SessionShared {
    token: CancellationToken,
    gate: Gate,
    finished: AtomicBool,
}

impl SessionShared {
    fn is_live(&self) -> bool {
        !self.finished.load(Ordering::SeqCst) && !self.gate.is_closed()
    }
}

/// Starts playback sessions.
///
/// Collaborators are injected with the `with_*` builders. An engine runs at
/// most one session at a time.
pub struct PlaybackEngine {
    timing: PlaybackTiming,
    seed: Option<u64>,
    ambient: Option<Arc<dyn AmbientEffect>>,
    fade: Option<FadeFn>,
    active: Option<Arc<SessionShared>>,
    started: u64,
}

impl PlaybackEngine {
    pub fn new(timing: PlaybackTiming) -> Self {
        Self {
            timing,
            seed: None,
            ambient: None,
            fade: None,
            active: None,
            started: 0,
        }
    }

    /// Seeds the schedule RNG. Session `n` (0-based) uses `seed + n`.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_ambient(mut self, effect: impl AmbientEffect + 'static) -> Self {
        self.ambient = Some(Arc::new(effect));
        self
    }

    /// Hook called once when a session enters `Draining`.
    #[must_use]
    pub fn with_fade(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.fade = Some(Arc::new(hook));
        self
    }

    pub fn timing(&self) -> &PlaybackTiming {
        &self.timing
    }

    /// Whether a session started by this engine can still call back.
    pub fn is_active(&self) -> bool {
        self.active.as_ref().is_some_and(|shared| shared.is_live())
    }

    /// Starts a session over `lines`.
    ///
    /// `on_tick` receives the revealed prefix and the current progress;
    /// `on_complete` runs exactly once unless the session is cancelled first.
    ///
    /// # Errors
    /// Returns `AlreadyActive` while a previous session is live,
    /// `InvalidTiming` for unusable timing, and `NoRuntime` outside tokio.
    pub fn start<T, C>(
        &mut self,
        lines: impl Into<Arc<[DisplayLine]>>,
        on_tick: T,
        on_complete: C,
    ) -> Result<PlaybackHandle, PlaybackError>
    where
        T: FnMut(&[DisplayLine], f64) + Send + 'static,
        C: FnOnce() + Send + 'static,
    {
        if self.is_active() {
            return Err(PlaybackError::AlreadyActive);
        }
        self.timing.validate()?;
        let Ok(runtime) = Handle::try_current() else {
            return Err(PlaybackError::NoRuntime);
        };

        let id = self.started;
        self.started += 1;
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(id)),
            None => StdRng::from_os_rng(),
        };

        let shared = Arc::new(SessionShared::default());
        let session = Session {
            id,
            lines: lines.into(),
            timing: self.timing.clone(),
            rng,
            shared: Arc::clone(&shared),
            ambient: self.ambient.clone(),
            fade: self.fade.clone(),
            on_tick: Box::new(on_tick),
            on_complete: Box::new(on_complete),
        };

        info!(session = id, lines = session.lines.len(), "playback started");
        let join = runtime.spawn(session.run());
        self.active = Some(Arc::clone(&shared));

        Ok(PlaybackHandle {
            id,
            shared,
            join: Some(join),
        })
    }
}

/// Cancellation handle for one session.
///
/// Dropping it cancels the session.
#[derive(Debug)]
pub struct PlaybackHandle {
    id: u64,
    shared: Arc<SessionShared>,
    join: Option<JoinHandle<SessionOutcome>>,
}

impl PlaybackHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Halts the session. After this returns no callback will start, and a
    /// callback running on another thread (`on_complete` included) has
    /// returned.
    ///
    /// Does not mark a completed session as cancelled.
    pub fn cancel(&self) {
        if !self.shared.gate.is_closed() {
            self.shared.token.cancel();
            debug!(session = self.id, "playback cancel requested");
        }
        self.shared.gate.close();
    }

    pub fn is_cancelled(&self) -> bool {
        self.shared.token.is_cancelled()
    }

    /// Whether the session task has exited (and released its timers).
    pub fn is_finished(&self) -> bool {
        self.shared.finished.load(Ordering::SeqCst)
    }

    /// Waits for the session task to exit.
    pub async fn wait(mut self) -> SessionOutcome {
        let Some(join) = self.join.take() else {
            return SessionOutcome::Cancelled;
        };
        match join.await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(session = self.id, error = %err, "playback task failed");
                SessionOutcome::Cancelled
            }
        }
    }
}

impl Drop for PlaybackHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

struct Session {
    id: u64,
    lines: Arc<[DisplayLine]>,
    timing: PlaybackTiming,
    rng: StdRng,
    shared: Arc<SessionShared>,
    ambient: Option<Arc<dyn AmbientEffect>>,
    fade: Option<FadeFn>,
    on_tick: TickFn,
    on_complete: CompleteFn,
}

impl Session {
    async fn run(self) -> SessionOutcome {
        let id = self.id;
        let shared = Arc::clone(&self.shared);
        let outcome = self.play().await;
        shared.finished.store(true, Ordering::SeqCst);
        match outcome {
            SessionOutcome::Completed => info!(session = id, "playback completed"),
            SessionOutcome::Cancelled => info!(session = id, "playback cancelled"),
        }
        outcome
    }

    async fn play(self) -> SessionOutcome {
        let Session {
            id,
            lines,
            timing,
            mut rng,
            shared,
            ambient,
            fade,
            mut on_tick,
            on_complete,
        } = self;
        let token = &shared.token;
        let gate = &shared.gate;
        let mut state = PlaybackState::new(lines.len(), timing.progress_ceiling);

        while !state.all_revealed() {
            let delay = schedule::next_delay(&mut rng, timing.reveal_delay);
            if !sleep_or_cancel(token, delay).await {
                return SessionOutcome::Cancelled;
            }

            let step = schedule::next_progress_increment(&mut rng, timing.progress_step);
            state.reveal(step);
            let revealed = &lines[..state.revealed_count()];
            let progress = state.progress();
            debug!(session = id, revealed = revealed.len(), progress, "reveal tick");
            if !gate.dispatch(|| on_tick(revealed, progress)) {
                return SessionOutcome::Cancelled;
            }

            if schedule::roll_ambient(&mut rng, timing.ambient_probability)
                && let Some(effect) = &ambient
                && !gate.dispatch(|| effect.trigger())
            {
                return SessionOutcome::Cancelled;
            }
        }

        state.settle();
        let progress = state.progress();
        if !gate.dispatch(|| on_tick(&lines[..], progress)) {
            return SessionOutcome::Cancelled;
        }

        if !sleep_or_cancel(token, timing.trailing_delay).await {
            return SessionOutcome::Cancelled;
        }

        state.begin_drain();
        debug!(session = id, "draining");
        if let Some(fade) = &fade
            && !gate.dispatch(|| fade())
        {
            return SessionOutcome::Cancelled;
        }

        if !sleep_or_cancel(token, timing.drain_delay).await {
            return SessionOutcome::Cancelled;
        }

        if state.complete() && gate.dispatch_final(on_complete) {
            SessionOutcome::Completed
        } else {
            SessionOutcome::Cancelled
        }
    }
}

/// Sleeps for `delay`. Returns false if the token fired first.
async fn sleep_or_cancel(token: &CancellationToken, delay: Duration) -> bool {
    tokio::select! {
        biased;
        () = token.cancelled() => false,
        () = tokio::time::sleep(delay) => !token.is_cancelled(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::line::Category;

    fn fast_timing() -> PlaybackTiming {
        PlaybackTiming {
            reveal_delay: crate::timing::DelayRange::from_millis(1, 2),
            trailing_delay: Duration::from_millis(5),
            drain_delay: Duration::from_millis(5),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_second_start_rejected_while_active() {
        tokio::time::pause();
        let mut engine = PlaybackEngine::new(fast_timing()).with_seed(1);
        let lines = vec![DisplayLine::new("boot ok", Category::Ok)];

        let first = engine.start(lines.clone(), |_, _| {}, || {}).unwrap();
        assert!(engine.is_active());
        let second = engine.start(lines.clone(), |_, _| {}, || {});
        assert_eq!(second.unwrap_err(), PlaybackError::AlreadyActive);

        first.cancel();
        assert!(!engine.is_active());
        let third = engine.start(lines, |_, _| {}, || {}).unwrap();
        assert_eq!(third.wait().await, SessionOutcome::Completed);
    }

    #[test]
    fn test_start_outside_runtime_fails() {
        let mut engine = PlaybackEngine::new(PlaybackTiming::default());
        let err = engine.start(Vec::new(), |_, _| {}, || {}).unwrap_err();
        assert_eq!(err, PlaybackError::NoRuntime);
    }

    #[tokio::test]
    async fn test_invalid_timing_rejected() {
        let timing = PlaybackTiming {
            ambient_probability: -0.5,
            ..Default::default()
        };
        let mut engine = PlaybackEngine::new(timing);
        let err = engine.start(Vec::new(), |_, _| {}, || {}).unwrap_err();
        assert!(matches!(err, PlaybackError::InvalidTiming(_)));
    }

    #[tokio::test]
    async fn test_cancel_after_completion_is_noop() {
        tokio::time::pause();
        let mut engine = PlaybackEngine::new(fast_timing()).with_seed(9);
        let completions = Arc::new(Mutex::new(0));
        let seen = Arc::clone(&completions);
        let handle = engine
            .start(
                vec![DisplayLine::plain("net up")],
                |_, _| {},
                move || *seen.lock().unwrap() += 1,
            )
            .unwrap();

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(handle.is_finished());
        handle.cancel();
        assert!(!handle.is_cancelled());
        assert_eq!(*completions.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_fade_runs_once_before_completion() {
        tokio::time::pause();
        let order = Arc::new(Mutex::new(Vec::new()));
        let fade_log = Arc::clone(&order);
        let done_log = Arc::clone(&order);
        let mut engine = PlaybackEngine::new(fast_timing())
            .with_seed(3)
            .with_fade(move || fade_log.lock().unwrap().push("fade"));

        let handle = engine
            .start(
                vec![DisplayLine::plain("a"), DisplayLine::plain("b")],
                |_, _| {},
                move || done_log.lock().unwrap().push("complete"),
            )
            .unwrap();

        assert_eq!(handle.wait().await, SessionOutcome::Completed);
        assert_eq!(*order.lock().unwrap(), vec!["fade", "complete"]);
    }
}
