//! Background liveness monitoring of the Hand2Note process.
//!
//! A [`LivenessMonitor`] owns one dedicated thread that polls a
//! [`LivenessProbe`] at a configurable interval and fires `on_started` /
//! `on_closed` exactly once per transition of the observed state. Handlers
//! run on the monitor thread.
//!
//! The observed state is also published through a `tokio::sync::watch`
//! channel, so async code can await transitions instead of registering
//! handlers.
//!
//! ```no_run
//! use std::time::Duration;
//! use hand2note::{Hand2Note, LivenessMonitor};
//!
//! # fn main() -> hand2note::Result<()> {
//! let client = Hand2Note::load()?;
//! let monitor = LivenessMonitor::builder()
//!     .poll_interval(Duration::from_millis(300))
//!     .on_started(|| println!("Hand2Note started"))
//!     .on_closed(|| println!("Hand2Note closed"))
//!     .spawn(client)?;
//! // ...
//! drop(monitor); // stops polling, no handler fires afterwards
//! # Ok(())
//! # }
//! ```

mod tracker;

pub use tracker::{LivenessTracker, Transition};

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use futures::{Stream, StreamExt};
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, error, info, trace, warn};

use crate::{ApiError, LivenessProbe, Result};

/// Poll interval used when none is configured.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(300);

/// Smallest accepted poll interval; shorter values are clamped up.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

type Handler = Box<dyn Fn() + Send + 'static>;

fn clamp_millis(interval: Duration) -> u64 {
    u64::try_from(interval.max(MIN_POLL_INTERVAL).as_millis()).unwrap_or(u64::MAX)
}

/// State shared between the monitor handle and its thread.
struct Shared {
    poll_interval_ms: AtomicU64,
    stopped: Mutex<bool>,
    wake: Condvar,
}

impl Shared {
    fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.load(Ordering::Relaxed))
    }

    fn is_stopped(&self) -> bool {
        *self.stopped.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn stop(&self) {
        *self.stopped.lock().unwrap_or_else(PoisonError::into_inner) = true;
        self.wake.notify_all();
    }

    /// Sleep for one poll interval. Returns `false` once a stop was requested.
    fn wait_next_poll(&self) -> bool {
        let interval = self.poll_interval();
        let guard = self.stopped.lock().unwrap_or_else(PoisonError::into_inner);
        let (guard, _) = self
            .wake
            .wait_timeout_while(guard, interval, |stopped| !*stopped)
            .unwrap_or_else(PoisonError::into_inner);
        !*guard
    }
}

/// Builder for [`LivenessMonitor`].
pub struct LivenessMonitorBuilder {
    poll_interval: Duration,
    fire_initial_start: bool,
    on_started: Option<Handler>,
    on_closed: Option<Handler>,
}

impl Default for LivenessMonitorBuilder {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            fire_initial_start: true,
            on_started: None,
            on_closed: None,
        }
    }
}

impl std::fmt::Debug for LivenessMonitorBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LivenessMonitorBuilder")
            .field("poll_interval", &self.poll_interval)
            .field("fire_initial_start", &self.fire_initial_start)
            .field("on_started", &self.on_started.is_some())
            .field("on_closed", &self.on_closed.is_some())
            .finish()
    }
}

impl LivenessMonitorBuilder {
    /// Delay between two polls. Values below [`MIN_POLL_INTERVAL`] are clamped.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Whether `on_started` fires when the tracker is already running at
    /// startup. When `false`, the running state is recorded silently and
    /// the next stop still fires `on_closed`.
    pub fn fire_initial_start(mut self, fire: bool) -> Self {
        self.fire_initial_start = fire;
        self
    }

    pub fn on_started(mut self, handler: impl Fn() + Send + 'static) -> Self {
        self.on_started = Some(Box::new(handler));
        self
    }

    pub fn on_closed(mut self, handler: impl Fn() + Send + 'static) -> Self {
        self.on_closed = Some(Box::new(handler));
        self
    }

    /// Start polling `probe` on a dedicated thread.
    pub fn spawn(self, probe: impl LivenessProbe) -> Result<LivenessMonitor> {
        let shared = Arc::new(Shared {
            poll_interval_ms: AtomicU64::new(clamp_millis(self.poll_interval)),
            stopped: Mutex::new(false),
            wake: Condvar::new(),
        });
        let (state_tx, state_rx) = watch::channel(None);

        let worker = Worker {
            shared: Arc::clone(&shared),
            probe: Box::new(probe),
            tracker: LivenessTracker::new(self.fire_initial_start),
            on_started: self.on_started,
            on_closed: self.on_closed,
            state_tx,
        };

        let thread = thread::Builder::new()
            .name("h2n-liveness".into())
            .spawn(move || worker.run())
            .map_err(|source| ApiError::Spawn { source })?;

        debug!(
            poll_interval_ms = shared.poll_interval_ms.load(Ordering::Relaxed),
            fire_initial_start = self.fire_initial_start,
            "Liveness monitor spawned"
        );

        Ok(LivenessMonitor {
            shared,
            state: state_rx,
            fire_initial_start: self.fire_initial_start,
            thread: Some(thread),
        })
    }
}

/// Handle to a running liveness monitor.
///
/// Dropping the handle stops the monitor: the sleeping thread is woken
/// immediately and joined, and no handler fires once the drop has begun.
pub struct LivenessMonitor {
    shared: Arc<Shared>,
    state: watch::Receiver<Option<bool>>,
    fire_initial_start: bool,
    thread: Option<JoinHandle<()>>,
}

impl LivenessMonitor {
    pub fn builder() -> LivenessMonitorBuilder {
        LivenessMonitorBuilder::default()
    }

    /// Monitor `probe` with default settings and no handlers.
    pub fn new(probe: impl LivenessProbe) -> Result<Self> {
        Self::builder().spawn(probe)
    }

    pub fn poll_interval(&self) -> Duration {
        self.shared.poll_interval()
    }

    /// Change the poll interval. Takes effect from the next poll cycle.
    pub fn set_poll_interval(&self, interval: Duration) {
        let millis = clamp_millis(interval);
        self.shared.poll_interval_ms.store(millis, Ordering::Relaxed);
        debug!(poll_interval_ms = millis, "Liveness poll interval changed");
    }

    pub fn fire_initial_start(&self) -> bool {
        self.fire_initial_start
    }

    /// Last observed state, `None` until a poll succeeded.
    pub fn is_running(&self) -> Option<bool> {
        *self.state.borrow()
    }

    /// Raw watch receiver over the observed state.
    pub fn subscribe(&self) -> watch::Receiver<Option<bool>> {
        self.state.clone()
    }

    /// Stream of observed states.
    ///
    /// Yields the current state first (once known), then every change.
    pub fn liveness_updates(&self) -> impl Stream<Item = bool> + 'static {
        WatchStream::new(self.state.clone()).filter_map(|state| async move { state })
    }

    /// Wait until the observed state equals `running`.
    ///
    /// Resolves immediately when it already does.
    pub async fn wait_for(&self, running: bool, timeout: Duration) -> Result<()> {
        let mut state = self.state.clone();
        match tokio::time::timeout(timeout, state.wait_for(|s| *s == Some(running))).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(_)) => Err(ApiError::probe_failed("liveness monitor thread exited")),
            Err(_) => Err(ApiError::Timeout { duration: timeout }),
        }
    }
}

impl std::fmt::Debug for LivenessMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LivenessMonitor")
            .field("poll_interval", &self.poll_interval())
            .field("fire_initial_start", &self.fire_initial_start)
            .field("is_running", &self.is_running())
            .finish()
    }
}

impl Drop for LivenessMonitor {
    fn drop(&mut self) {
        self.shared.stop();
        let Some(thread) = self.thread.take() else {
            return;
        };
        // Dropped from inside a handler: the thread exits on its own after
        // the handler returns.
        if thread.thread().id() == thread::current().id() {
            debug!("Liveness monitor dropped from its own thread");
            return;
        }
        if thread.join().is_err() {
            error!("Liveness monitor thread panicked");
        }
        debug!("Liveness monitor stopped");
    }
}

struct Worker {
    shared: Arc<Shared>,
    probe: Box<dyn LivenessProbe>,
    tracker: LivenessTracker,
    on_started: Option<Handler>,
    on_closed: Option<Handler>,
    state_tx: watch::Sender<Option<bool>>,
}

impl Worker {
    fn run(mut self) {
        info!("Liveness monitor started");

        loop {
            match self.poll() {
                Ok(running) => self.apply(running),
                Err(e) => warn!(
                    error = %e,
                    state = ?self.tracker.state(),
                    "Liveness probe failed, keeping previous state"
                ),
            }
            if !self.shared.wait_next_poll() {
                break;
            }
        }

        info!("Liveness monitor exiting");
    }

    fn poll(&self) -> Result<bool> {
        match panic::catch_unwind(AssertUnwindSafe(|| self.probe.probe())) {
            Ok(result) => result,
            Err(_) => Err(ApiError::probe_failed("probe panicked")),
        }
    }

    fn apply(&mut self, running: bool) {
        trace!(running, "Liveness poll");
        if let Some(transition) = self.tracker.observe(running) {
            if self.shared.is_stopped() {
                return;
            }
            info!(?transition, "Hand2Note liveness changed");
            self.fire(transition);
        }
        self.state_tx.send_if_modified(|state| {
            let changed = *state != Some(running);
            *state = Some(running);
            changed
        });
    }

    fn fire(&self, transition: Transition) {
        let handler = match transition {
            Transition::Started => &self.on_started,
            Transition::Closed => &self.on_closed,
        };
        let Some(handler) = handler else {
            return;
        };
        if panic::catch_unwind(AssertUnwindSafe(|| handler())).is_err() {
            error!(?transition, "Liveness handler panicked");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ScriptedProbe, SwitchProbe, TransitionLog, wait_until};
    use std::sync::atomic::{AtomicBool, AtomicUsize};
    use std::time::Instant;

    const FAST: Duration = Duration::from_millis(5);
    const PATIENCE: Duration = Duration::from_secs(5);

    fn logged(log: &TransitionLog, fire_initial_start: bool) -> LivenessMonitorBuilder {
        let started = log.clone();
        let closed = log.clone();
        LivenessMonitor::builder()
            .poll_interval(FAST)
            .fire_initial_start(fire_initial_start)
            .on_started(move || started.push(Transition::Started))
            .on_closed(move || closed.push(Transition::Closed))
    }

    #[test]
    fn already_running_fires_one_start() {
        let log = TransitionLog::default();
        let probe = SwitchProbe::new(true);
        let _monitor = logged(&log, true).spawn(probe.clone()).unwrap();

        assert!(wait_until(PATIENCE, || log.len() == 1));
        wait_until(PATIENCE, || probe.polls() >= 10);
        assert_eq!(log.snapshot(), vec![Transition::Started]);
    }

    #[test]
    fn one_start_and_one_close_per_run() {
        let log = TransitionLog::default();
        let probe = ScriptedProbe::new([Ok(false), Ok(false), Ok(true), Ok(true), Ok(false)]);
        let _monitor = logged(&log, true).spawn(probe.clone()).unwrap();

        assert!(wait_until(PATIENCE, || probe.polls() >= 10));
        assert_eq!(log.snapshot(), vec![Transition::Started, Transition::Closed]);
    }

    #[test]
    fn probe_errors_keep_the_previous_state() {
        let log = TransitionLog::default();
        let probe = ScriptedProbe::new([
            Ok(true),
            Err(ApiError::probe_failed("busy")),
            Ok(true),
            Err(ApiError::probe_failed("busy")),
            Ok(false),
        ]);
        let _monitor = logged(&log, true).spawn(probe.clone()).unwrap();

        assert!(wait_until(PATIENCE, || probe.polls() >= 10));
        assert_eq!(log.snapshot(), vec![Transition::Started, Transition::Closed]);
    }

    #[test]
    fn failed_first_poll_leaves_the_state_unknown() {
        let log = TransitionLog::default();
        let probe = ScriptedProbe::new([Err(ApiError::probe_failed("glitch")), Ok(true)]);
        let monitor = logged(&log, false).spawn(probe.clone()).unwrap();

        assert!(wait_until(PATIENCE, || probe.polls() >= 10));
        assert!(log.is_empty());
        assert_eq!(monitor.is_running(), Some(true));
    }

    #[test]
    fn failed_first_poll_defers_the_initial_start() {
        let log = TransitionLog::default();
        let probe = ScriptedProbe::new([Err(ApiError::probe_failed("loading")), Ok(true)]);
        let monitor = logged(&log, true).spawn(probe).unwrap();

        assert!(wait_until(PATIENCE, || log.len() == 1));
        assert_eq!(log.snapshot(), vec![Transition::Started]);
        assert_eq!(monitor.is_running(), Some(true));
    }

    #[test]
    fn only_failed_polls_publish_nothing() {
        let polls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&polls);
        let monitor = LivenessMonitor::builder()
            .poll_interval(FAST)
            .spawn(move || -> Result<bool> {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(ApiError::probe_failed("library not loaded"))
            })
            .unwrap();

        assert!(wait_until(PATIENCE, || polls.load(Ordering::SeqCst) >= 10));
        assert_eq!(monitor.is_running(), None);
        assert_eq!(*monitor.subscribe().borrow(), None);
    }

    #[test]
    fn silent_initial_start_still_reports_close() {
        let log = TransitionLog::default();
        let probe = SwitchProbe::new(true);
        let monitor = logged(&log, false).spawn(probe.clone()).unwrap();

        assert!(wait_until(PATIENCE, || monitor.is_running() == Some(true)));
        assert!(log.is_empty());

        probe.set(false);
        assert!(wait_until(PATIENCE, || log.len() == 1));
        assert_eq!(log.snapshot(), vec![Transition::Closed]);

        probe.set(true);
        assert!(wait_until(PATIENCE, || log.len() == 2));
        assert_eq!(log.snapshot(), vec![Transition::Closed, Transition::Started]);
    }

    #[test]
    fn drop_interrupts_a_long_sleep() {
        let probe = SwitchProbe::new(false);
        let monitor = LivenessMonitor::builder()
            .poll_interval(Duration::from_secs(10))
            .spawn(probe.clone())
            .unwrap();
        assert!(wait_until(PATIENCE, || probe.polls() >= 1));

        let started = Instant::now();
        drop(monitor);
        assert!(started.elapsed() < Duration::from_secs(2));
        assert_eq!(probe.polls(), 1);
    }

    #[test]
    fn no_handler_fires_after_drop() {
        let fired = Arc::new(AtomicUsize::new(0));
        let probe = SwitchProbe::alternating();
        let (on_start, on_close) = (Arc::clone(&fired), Arc::clone(&fired));
        let monitor = LivenessMonitor::builder()
            .poll_interval(MIN_POLL_INTERVAL)
            .on_started(move || {
                on_start.fetch_add(1, Ordering::SeqCst);
            })
            .on_closed(move || {
                on_close.fetch_add(1, Ordering::SeqCst);
            })
            .spawn(probe)
            .unwrap();

        assert!(wait_until(PATIENCE, || fired.load(Ordering::SeqCst) >= 4));
        drop(monitor);
        let after_drop = fired.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(50));
        assert_eq!(fired.load(Ordering::SeqCst), after_drop);
    }

    #[test]
    fn interval_changes_apply_while_running() {
        let log = TransitionLog::default();
        let probe = SwitchProbe::new(false);
        let monitor = logged(&log, true).spawn(probe.clone()).unwrap();
        assert_eq!(monitor.poll_interval(), FAST);

        monitor.set_poll_interval(Duration::from_millis(20));
        assert_eq!(monitor.poll_interval(), Duration::from_millis(20));

        probe.set(true);
        assert!(wait_until(PATIENCE, || log.len() == 1));
        assert_eq!(log.snapshot(), vec![Transition::Started]);
    }

    #[test]
    fn shorter_interval_applies_from_the_next_cycle() {
        const OLD: Duration = Duration::from_millis(300);
        const NEW: Duration = Duration::from_millis(10);
        const SLACK: Duration = Duration::from_millis(200);

        let polled_at = Arc::new(Mutex::new(Vec::<Instant>::new()));
        let started_at = Arc::new(Mutex::new(None::<Instant>));
        let running = Arc::new(AtomicBool::new(false));
        let (stamps, flag, on_start) =
            (Arc::clone(&polled_at), Arc::clone(&running), Arc::clone(&started_at));

        let monitor = LivenessMonitor::builder()
            .poll_interval(OLD)
            .on_started(move || *on_start.lock().unwrap() = Some(Instant::now()))
            .spawn(move || -> Result<bool> {
                stamps.lock().unwrap().push(Instant::now());
                Ok(flag.load(Ordering::SeqCst))
            })
            .unwrap();
        assert!(wait_until(PATIENCE, || polled_at.lock().unwrap().len() == 1));

        monitor.set_poll_interval(NEW);
        let flipped = Instant::now();
        running.store(true, Ordering::SeqCst);

        assert!(wait_until(PATIENCE, || started_at.lock().unwrap().is_some()));
        assert!(wait_until(PATIENCE, || polled_at.lock().unwrap().len() >= 8));
        drop(monitor);

        let stamps = polled_at.lock().unwrap().clone();
        // The wait in progress keeps the old length.
        assert!(stamps[1] - stamps[0] >= OLD.mul_f32(0.9));
        for pair in stamps[1..].windows(2) {
            assert!(pair[1] - pair[0] < OLD / 2);
        }

        let detected = started_at.lock().unwrap().unwrap();
        assert!(detected - flipped <= OLD + NEW + SLACK);
    }

    #[test]
    fn tiny_intervals_are_clamped() {
        let monitor = LivenessMonitor::builder()
            .poll_interval(Duration::ZERO)
            .spawn(SwitchProbe::new(false))
            .unwrap();
        assert_eq!(monitor.poll_interval(), MIN_POLL_INTERVAL);

        monitor.set_poll_interval(Duration::from_micros(300));
        assert_eq!(monitor.poll_interval(), MIN_POLL_INTERVAL);
    }

    #[test]
    fn panicking_handler_does_not_stop_monitoring() {
        let log = TransitionLog::default();
        let closed = log.clone();
        let probe = SwitchProbe::new(true);
        let _monitor = LivenessMonitor::builder()
            .poll_interval(FAST)
            .on_started(|| panic!("handler bug"))
            .on_closed(move || closed.push(Transition::Closed))
            .spawn(probe.clone())
            .unwrap();

        assert!(wait_until(PATIENCE, || probe.polls() >= 2));
        probe.set(false);
        assert!(wait_until(PATIENCE, || log.len() == 1));
    }

    #[test]
    fn panicking_probe_is_a_failed_poll() {
        let log = TransitionLog::default();
        let polls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&polls);
        let probe = move || -> Result<bool> {
            match counter.fetch_add(1, Ordering::SeqCst) {
                0 => Ok(true),
                1 => panic!("probe bug"),
                _ => Ok(true),
            }
        };
        let _monitor = logged(&log, true).spawn(probe).unwrap();

        assert!(wait_until(PATIENCE, || polls.load(Ordering::SeqCst) >= 5));
        assert_eq!(log.snapshot(), vec![Transition::Started]);
    }

    #[tokio::test]
    async fn wait_for_observes_transitions() {
        let probe = SwitchProbe::new(false);
        let monitor = LivenessMonitor::builder().poll_interval(FAST).spawn(probe.clone()).unwrap();

        monitor.wait_for(false, PATIENCE).await.unwrap();
        probe.set(true);
        monitor.wait_for(true, PATIENCE).await.unwrap();
        assert_eq!(monitor.is_running(), Some(true));
    }

    #[tokio::test]
    async fn wait_for_times_out() {
        let monitor =
            LivenessMonitor::builder().poll_interval(FAST).spawn(SwitchProbe::new(false)).unwrap();

        let result = monitor.wait_for(true, Duration::from_millis(50)).await;
        assert!(matches!(result, Err(ApiError::Timeout { .. })));
    }

    #[tokio::test]
    async fn updates_stream_yields_each_change() {
        let probe = SwitchProbe::new(true);
        let monitor = LivenessMonitor::builder().poll_interval(FAST).spawn(probe.clone()).unwrap();
        let mut updates = Box::pin(monitor.liveness_updates());

        let first = tokio::time::timeout(PATIENCE, updates.next()).await.unwrap();
        assert_eq!(first, Some(true));

        probe.set(false);
        let second = tokio::time::timeout(PATIENCE, updates.next()).await.unwrap();
        assert_eq!(second, Some(false));
    }
}
