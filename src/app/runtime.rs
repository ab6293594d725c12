//! Async runtime driving the home screen.
//!
//! The runtime owns [`AppState`] and both renderers and is the only writer
//! to either. Collaborator calls and timers run in spawned tokio tasks which
//! report back as [`Event`]s over an unbounded channel; the runtime feeds
//! those events through [`handle_event`] one at a time.
//!
//! ```text
//! UI / tasks ──Event──▶ channel ──▶ handle_event ──▶ render + Actions
//!      ▲                                                  │
//!      └──────────────── spawned tasks ◀─────────────────┘
//! ```
//!
//! Every spawned task races a [`CancellationToken`]. Collaborator calls use
//! the cycle token, which is replaced on refresh and teardown; timers use the
//! timer token, replaced on teardown.

use super::{handle_event, Action, AppState, Event};
use crate::location::LocationProvider;
use crate::places::PlacesSearch;
use crate::render::{HomeViewModel, ListRenderer, MapRenderer};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Upper bound on a single location fix request.
pub const FIX_TIMEOUT: Duration = Duration::from_secs(15);

/// Event loop for one home screen.
pub struct Runtime<M, L> {
    state: AppState,
    location: Arc<dyn LocationProvider>,
    places: Arc<dyn PlacesSearch>,
    map: M,
    list: L,
    events_tx: mpsc::UnboundedSender<Event>,
    events_rx: mpsc::UnboundedReceiver<Event>,
    cycle: CancellationToken,
    timers: CancellationToken,
    fix_timeout: Duration,
}

impl<M: MapRenderer, L: ListRenderer> Runtime<M, L> {
    pub fn new(
        state: AppState,
        location: Arc<dyn LocationProvider>,
        places: Arc<dyn PlacesSearch>,
        map: M,
        list: L,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            state,
            location,
            places,
            map,
            list,
            events_tx,
            events_rx,
            cycle: CancellationToken::new(),
            timers: CancellationToken::new(),
            fix_timeout: FIX_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_fix_timeout(mut self, timeout: Duration) -> Self {
        self.fix_timeout = timeout;
        self
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub const fn map(&self) -> &M {
        &self.map
    }

    #[must_use]
    pub const fn list(&self) -> &L {
        &self.list
    }

    #[must_use]
    pub fn viewmodel(&self) -> HomeViewModel {
        self.state.compute_viewmodel()
    }

    /// Handle for injecting UI events from outside the loop.
    #[must_use]
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.events_tx.clone()
    }

    /// Handles one event synchronously. Returns whether it caused a render.
    ///
    /// Renderers are refreshed before actions run so a scroll always targets
    /// the list as it now stands.
    pub fn dispatch(&mut self, event: Event) -> bool {
        let (render, actions) = handle_event(&mut self.state, &event);
        if render {
            self.render();
        }
        for action in actions {
            self.execute(action);
        }
        render
    }

    /// Waits for the next queued event and dispatches it.
    pub async fn step(&mut self) -> bool {
        match self.events_rx.recv().await {
            Some(event) => self.dispatch(event),
            None => false,
        }
    }

    /// Dispatches events until `done` holds for the state.
    pub async fn run_until<F>(&mut self, mut done: F)
    where
        F: FnMut(&AppState) -> bool,
    {
        while !done(&self.state) {
            self.step().await;
        }
    }

    /// Runs until `shutdown` is cancelled, then tears the screen down.
    pub async fn run(&mut self, shutdown: CancellationToken) {
        loop {
            tokio::select! {
                () = shutdown.cancelled() => break,
                Some(event) = self.events_rx.recv() => {
                    self.dispatch(event);
                }
            }
        }
        self.dispatch(Event::Teardown);
    }

    fn render(&mut self) {
        let view = self.state.compute_viewmodel();
        tracing::trace!(status = ?view.status, markers = view.map.markers.len(), "render");
        self.map.update(&view.map);
        self.list.update(&view.list);
    }

    fn execute(&mut self, action: Action) {
        tracing::debug!(action = ?action, "executing action");

        match action {
            Action::RedirectToSignIn => {
                tracing::info!("sign-in required before discovery");
            }
            Action::RequestPermission { generation } => {
                let location = Arc::clone(&self.location);
                self.spawn_cycle_task(async move {
                    let status = location.request_permission().await;
                    Event::PermissionResolved { generation, status }
                });
            }
            Action::RequestFix { generation } => {
                let location = Arc::clone(&self.location);
                let limit = self.fix_timeout;
                self.spawn_cycle_task(async move {
                    let result = match tokio::time::timeout(limit, location.current_position()).await {
                        Ok(Ok(fix)) => Ok(fix),
                        Ok(Err(e)) => Err(e.to_string()),
                        Err(_) => Err(format!("timed out after {}s", limit.as_secs_f32())),
                    };
                    Event::FixResolved { generation, result }
                });
            }
            Action::SearchNearby { generation, at } => {
                let places = Arc::clone(&self.places);
                self.spawn_cycle_task(async move {
                    let result = places.search_nearby(at).await.map_err(|e| e.to_string());
                    Event::SearchResolved { generation, result }
                });
            }
            Action::CancelPending => {
                self.cycle.cancel();
                self.cycle = CancellationToken::new();
            }
            Action::CancelTimers => {
                self.timers.cancel();
                self.timers = CancellationToken::new();
            }
            Action::AnimateCamera { region, duration } => {
                self.map.animate_to_region(region, duration);
            }
            Action::ScheduleCallout { id, after } => {
                self.spawn_timer(after, Event::CalloutDue { id });
            }
            Action::ShowCallout { id } => {
                self.map.show_callout(&id);
            }
            Action::ScrollToIndex {
                index,
                view_position,
                attempt,
            } => {
                if let Err(e) = self.list.scroll_to_index(index, view_position) {
                    let _ = self.events_tx.send(Event::ScrollFailed {
                        index,
                        attempt,
                        reason: e.to_string(),
                    });
                }
            }
            Action::ScheduleScrollRetry {
                index,
                after,
                attempt,
            } => {
                self.spawn_timer(after, Event::ScrollRetryDue { index, attempt });
            }
        }
    }

    fn spawn_cycle_task<F>(&self, work: F)
    where
        F: Future<Output = Event> + Send + 'static,
    {
        let token = self.cycle.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            tokio::select! {
                () = token.cancelled() => {
                    tracing::debug!("collaborator call cancelled");
                }
                event = work => {
                    let _ = tx.send(event);
                }
            }
        });
    }

    fn spawn_timer(&self, after: Duration, event: Event) {
        let token = self.timers.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            tokio::select! {
                () = token.cancelled() => {}
                () = tokio::time::sleep(after) => {
                    let _ = tx.send(event);
                }
            }
        });
    }
}

impl<M, L> Drop for Runtime<M, L> {
    fn drop(&mut self) {
        self.cycle.cancel();
        self.timers.cancel();
    }
}
