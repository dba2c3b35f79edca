// src/services/playback_controller.rs
//
// Owns the one active play session and everything scoped to it.
//
// - Session start acquires a `SessionResources` bundle (surface lease,
//   event subscriptions, in-flight progress writes); teardown releases it
//   as a unit before anything of the next session is acquired
// - Surface callbacks never touch the controller. They forward a tagged
//   input into the controller's inbox; inputs tagged with a session that is
//   no longer active are dropped
// - All state changes happen on whoever drives the controller: `run`, or a
//   test calling `pump`/`poll_timers` directly

use std::sync::Arc;

use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};
use tokio::task::{AbortHandle, JoinSet};
use tokio::time::{sleep_until, timeout, Instant};

use crate::config::PlayerConfig;
use crate::domain::{
    resume_target, FocusContext, PlaySession, PlaybackState, SessionHandle, SessionId, SessionSeed,
    ShortcutAction, SubtitleTrack,
};
use crate::error::{PlayerError, PlayerResult, SessionResolutionError};
use crate::events::{MediaEvent, Subscription, SurfaceEvent};
use crate::integrations::{HostWindow, MediaSurface, PlaybackBackend};

use super::fullscreen_coordinator::FullscreenCoordinator;
use super::media_controller::{MediaElementController, SurfaceLease};
use super::overlay_controller::OverlayVisibilityController;
use super::playback_info_loader::PlaybackInfoLoader;
use super::progress_reporter::{persist_best_effort, ProgressReporter};
use super::shortcut_dispatcher::ShortcutDispatcher;
use super::track_selector::TrackSelector;
use super::view_state::{PlayerSnapshot, SessionSnapshot, TrackView, ViewState};

/// Input queued for the controller by callbacks and background tasks.
#[derive(Debug)]
pub enum ControllerInput {
    /// A surface event observed while `session` was active
    Media { session: SessionId, event: SurfaceEvent },
    /// The display entered or left fullscreen
    Display { active: bool },
    /// A spawned resolution finished
    Resolved {
        ticket: u64,
        handle: SessionHandle,
        result: Result<SessionSeed, SessionResolutionError>,
    },
}

/// Transport-bar and menu actions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum TransportAction {
    Play,
    Pause,
    TogglePlay,
    Seek(f64),
    SeekRelative(f64),
    SetVolume(f64),
    SetMuted(bool),
    ToggleMute,
    ToggleFullscreen,
    EnterFullscreen,
    ExitFullscreen,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointerInput {
    Moved { x: f64, y: f64 },
    /// Pointer entered the control overlay
    OverlayEntered,
    OverlayLeft,
}

type Reply<T> = oneshot::Sender<PlayerResult<T>>;

/// Requests accepted by [`PlaybackController::run`].
#[derive(Debug)]
pub enum ControllerCommand {
    Load {
        handle: SessionHandle,
        reply: Reply<SessionSnapshot>,
    },
    Leave {
        reply: oneshot::Sender<()>,
    },
    CloseRequested {
        reply: oneshot::Sender<()>,
    },
    Transport {
        action: TransportAction,
        reply: Reply<()>,
    },
    SelectTrack {
        locator: String,
        reply: Reply<bool>,
    },
    Key {
        key: String,
        reply: Reply<Option<ShortcutAction>>,
    },
    Pointer(PointerInput),
    Focus(FocusContext),
    Snapshot {
        reply: oneshot::Sender<PlayerSnapshot>,
    },
}

/// Everything a session holds on to. Released as one unit.
struct SessionResources {
    subscriptions: Vec<Subscription>,
    persist_tasks: JoinSet<()>,
    surface: SurfaceLease,
}

impl SessionResources {
    /// Unsubscribes, cancels in-flight writes, then gives the surface back.
    fn release(self) {
        let SessionResources {
            subscriptions,
            mut persist_tasks,
            surface,
        } = self;
        for subscription in subscriptions {
            subscription.unsubscribe();
        }
        persist_tasks.abort_all();
        drop(surface);
    }
}

struct ActiveSession {
    session: PlaySession,
    tracks: TrackSelector,
    progress: ProgressReporter,
    overlay: OverlayVisibilityController,
    resources: SessionResources,
}

struct PendingLoad {
    ticket: u64,
    handle: SessionHandle,
    task: AbortHandle,
    reply: Reply<SessionSnapshot>,
}

pub struct PlaybackController {
    config: PlayerConfig,
    loader: PlaybackInfoLoader,
    backend: Arc<dyn PlaybackBackend>,
    media: MediaElementController,
    fullscreen: FullscreenCoordinator,
    shortcuts: ShortcutDispatcher,
    view: ViewState,
    active: Option<ActiveSession>,
    load_ticket: u64,
    pending_load: Option<PendingLoad>,
    inbox_tx: mpsc::UnboundedSender<ControllerInput>,
    inbox_rx: mpsc::UnboundedReceiver<ControllerInput>,
    _display_subscription: Subscription,
}

impl PlaybackController {
    pub fn new(
        config: PlayerConfig,
        backend: Arc<dyn PlaybackBackend>,
        surface: Arc<dyn MediaSurface>,
        host: Arc<dyn HostWindow>,
    ) -> Self {
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        // Fullscreen belongs to the view, not to an episode, so this one
        // outlives every session.
        let display_subscription = {
            let tx = inbox_tx.clone();
            surface.subscribe(Box::new(move |event: &SurfaceEvent| {
                if let SurfaceEvent::FullscreenChange { active } = event {
                    let _ = tx.send(ControllerInput::Display { active: *active });
                }
            }))
        };

        Self {
            loader: PlaybackInfoLoader::new(Arc::clone(&backend)),
            backend,
            media: MediaElementController::new(Arc::clone(&surface)),
            fullscreen: FullscreenCoordinator::new(surface, host),
            shortcuts: ShortcutDispatcher::new(config.seek_step_secs),
            config,
            view: ViewState::Idle,
            active: None,
            load_ticket: 0,
            pending_load: None,
            inbox_tx,
            inbox_rx,
            _display_subscription: display_subscription,
        }
    }

    // ========================================================================
    // SESSION LIFECYCLE
    // ========================================================================

    /// Tears down the current session, resolves `handle` and starts playing
    /// it.
    pub async fn load(&mut self, handle: SessionHandle) -> PlayerResult<SessionSnapshot> {
        let ticket = self.begin_load(&handle).await;
        let result = self.loader.load(&handle).await;
        self.finish_load(ticket, handle, result)
    }

    /// The playback view was navigated away from.
    pub async fn leave(&mut self) {
        self.teardown().await;
        if self.fullscreen.force_windowed() {
            debug!("Left fullscreen on leaving the playback view");
        }
        self.view = ViewState::Idle;
    }

    /// The host window wants to close. Pauses and flushes the final
    /// position; the window may close once this returns.
    pub async fn close_requested(&mut self) {
        if self.active.is_some() {
            if let Err(e) = self.media.pause() {
                warn!("Failed to pause before close: {}", e);
            }
        }
        self.teardown().await;
        self.view = ViewState::Idle;
    }

    async fn begin_load(&mut self, handle: &SessionHandle) -> u64 {
        self.teardown().await;
        self.load_ticket += 1;
        self.view = ViewState::Loading;
        info!("Loading play session {}", handle);
        self.load_ticket
    }

    fn start_load(&mut self, ticket: u64, handle: SessionHandle, reply: Reply<SessionSnapshot>) {
        let loader = self.loader.clone();
        let tx = self.inbox_tx.clone();
        let task_handle = handle.clone();
        let task = tokio::spawn(async move {
            let result = loader.load(&task_handle).await;
            let _ = tx.send(ControllerInput::Resolved {
                ticket,
                handle: task_handle,
                result,
            });
        });
        self.pending_load = Some(PendingLoad {
            ticket,
            handle,
            task: task.abort_handle(),
            reply,
        });
    }

    fn finish_load(
        &mut self,
        ticket: u64,
        handle: SessionHandle,
        result: Result<SessionSeed, SessionResolutionError>,
    ) -> PlayerResult<SessionSnapshot> {
        if ticket != self.load_ticket {
            debug!("Discarding superseded resolution of {}", handle);
            return Err(PlayerError::LoadSuperseded(handle.to_string()));
        }
        match result {
            Ok(seed) => self.activate(handle, seed),
            Err(e) => {
                self.view = ViewState::Failed(e.clone());
                Err(e.into())
            }
        }
    }

    fn complete_pending_load(
        &mut self,
        ticket: u64,
        handle: SessionHandle,
        result: Result<SessionSeed, SessionResolutionError>,
    ) {
        match self.pending_load.take() {
            Some(pending) if pending.ticket == ticket => {
                let outcome = self.finish_load(ticket, handle, result);
                let _ = pending.reply.send(outcome);
            }
            other => {
                self.pending_load = other;
                debug!("Discarding stale resolution of {}", handle);
            }
        }
    }

    fn cancel_pending_load(&mut self) {
        if let Some(pending) = self.pending_load.take() {
            pending.task.abort();
            debug!("Load of {} superseded", pending.handle);
            let _ = pending
                .reply
                .send(Err(PlayerError::LoadSuperseded(pending.handle.to_string())));
        }
    }

    fn activate(&mut self, handle: SessionHandle, seed: SessionSeed) -> PlayerResult<SessionSnapshot> {
        let session = PlaySession::new(handle, seed);
        let session_id = session.id;

        let subscription = {
            let tx = self.inbox_tx.clone();
            self.media.surface().subscribe(Box::new(move |event: &SurfaceEvent| {
                if matches!(event, SurfaceEvent::FullscreenChange { .. }) {
                    return;
                }
                let _ = tx.send(ControllerInput::Media {
                    session: session_id,
                    event: event.clone(),
                });
            }))
        };

        let lease = match self.media.attach(&session.seed.video_source) {
            Ok(lease) => lease,
            Err(e) => {
                error!("Failed to attach {}: {}", session.seed.video_source, e);
                self.view = ViewState::Idle;
                return Err(e);
            }
        };

        let tracks = TrackSelector::new(session.seed.subtitle_tracks.clone());
        if let Err(e) = self
            .media
            .surface()
            .set_subtitle_track(tracks.selected().map(SubtitleTrack::locator))
        {
            warn!("Failed to apply initial subtitle track: {}", e);
        }

        let mut overlay = OverlayVisibilityController::new(&self.config);
        if self.fullscreen.is_fullscreen() {
            overlay.fullscreen_changed(true, Instant::now());
        }
        let progress = ProgressReporter::new(session.seed.episode_id, self.config.progress_throttle());

        info!(
            "Session {} started: {} ({})",
            session_id,
            session.seed.display_title(),
            session.seed.video_source
        );
        self.active = Some(ActiveSession {
            session,
            tracks,
            progress,
            overlay,
            resources: SessionResources {
                subscriptions: vec![subscription],
                persist_tasks: JoinSet::new(),
                surface: lease,
            },
        });
        self.view = ViewState::Ready;
        self.session_snapshot().ok_or(PlayerError::NoActiveSession)
    }

    /// Releases the active session: final flush computed, resources
    /// released, then the flush awaited (bounded by the configured timeout).
    async fn teardown(&mut self) {
        self.cancel_pending_load();
        // Apply whatever the surface reported before the final position is read.
        self.pump();

        let Some(mut active) = self.active.take() else {
            return;
        };
        let session_id = active.session.id;
        // Until the resume seek runs, the recorded position is the last known one.
        let position = if active.session.resume_pending {
            active.session.seed.resume_position_secs
        } else {
            self.media.current_position()
        };
        let final_write = active.progress.final_flush(position, Instant::now());
        active.resources.release();

        if let Some(write) = final_write {
            let backend = Arc::clone(&self.backend);
            let flush = persist_best_effort(backend, write);
            if timeout(self.config.final_persist_timeout(), flush).await.is_err() {
                warn!(
                    "Final progress write for episode {} timed out",
                    write.episode_id
                );
            }
        }
        info!("Session {} released", session_id);
    }

    // ========================================================================
    // TRANSPORT
    // ========================================================================

    pub fn play(&mut self) -> PlayerResult<()> {
        self.require_session()?;
        self.media.play()
    }

    pub fn pause(&mut self) -> PlayerResult<()> {
        self.require_session()?;
        self.media.pause()
    }

    /// Plays when paused, ended or errored; pauses otherwise.
    pub fn toggle_play(&mut self) -> PlayerResult<()> {
        self.require_session()?;
        self.media.toggle_play()
    }

    pub fn seek(&mut self, position: f64) -> PlayerResult<f64> {
        self.require_session()?;
        self.media.seek(position)
    }

    pub fn seek_relative(&mut self, delta: f64) -> PlayerResult<f64> {
        self.require_session()?;
        self.media.seek_relative(delta)
    }

    pub fn set_volume(&mut self, volume: f64) -> PlayerResult<()> {
        self.media.set_volume(volume)
    }

    pub fn set_muted(&mut self, muted: bool) -> PlayerResult<()> {
        self.media.set_muted(muted)
    }

    pub fn toggle_mute(&mut self) -> PlayerResult<()> {
        self.media.toggle_mute()
    }

    pub fn toggle_fullscreen(&mut self) -> PlayerResult<()> {
        self.require_session()?;
        self.fullscreen.toggle()
    }

    pub fn enter_fullscreen(&mut self) -> PlayerResult<()> {
        self.require_session()?;
        self.fullscreen.enter()
    }

    pub fn exit_fullscreen(&mut self) -> PlayerResult<()> {
        self.fullscreen.exit()
    }

    pub fn transport(&mut self, action: TransportAction) -> PlayerResult<()> {
        match action {
            TransportAction::Play => self.play(),
            TransportAction::Pause => self.pause(),
            TransportAction::TogglePlay => self.toggle_play(),
            TransportAction::Seek(position) => self.seek(position).map(|_| ()),
            TransportAction::SeekRelative(delta) => self.seek_relative(delta).map(|_| ()),
            TransportAction::SetVolume(volume) => self.set_volume(volume),
            TransportAction::SetMuted(muted) => self.set_muted(muted),
            TransportAction::ToggleMute => self.toggle_mute(),
            TransportAction::ToggleFullscreen => self.toggle_fullscreen(),
            TransportAction::EnterFullscreen => self.enter_fullscreen(),
            TransportAction::ExitFullscreen => self.exit_fullscreen(),
        }
    }

    /// Switches subtitles. Returns whether the selection changed.
    pub fn select_track(&mut self, locator: &str) -> PlayerResult<bool> {
        let active = self.active.as_mut().ok_or(PlayerError::NoActiveSession)?;
        let changed = active.tracks.select(locator)?;
        if changed {
            self.media.surface().set_subtitle_track(Some(locator))?;
        }
        Ok(changed)
    }

    // ========================================================================
    // POINTER AND KEYBOARD
    // ========================================================================

    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        if let Some(active) = self.active.as_mut() {
            active.overlay.pointer_moved(x, y, Instant::now());
        }
    }

    pub fn overlay_pointer_entered(&mut self) {
        if let Some(active) = self.active.as_mut() {
            active.overlay.pointer_entered(Instant::now());
        }
    }

    pub fn overlay_pointer_left(&mut self) {
        if let Some(active) = self.active.as_mut() {
            active.overlay.pointer_left(Instant::now());
        }
    }

    pub fn pointer(&mut self, input: PointerInput) {
        match input {
            PointerInput::Moved { x, y } => self.pointer_moved(x, y),
            PointerInput::OverlayEntered => self.overlay_pointer_entered(),
            PointerInput::OverlayLeft => self.overlay_pointer_left(),
        }
    }

    pub fn set_focus(&mut self, focus: FocusContext) {
        self.shortcuts.set_focus(focus);
    }

    /// Handles a key press. Returns the action taken, if the key was bound
    /// and shortcuts are live.
    pub fn key_pressed(&mut self, key: &str) -> PlayerResult<Option<ShortcutAction>> {
        let Some(action) = self.shortcuts.dispatch(key, self.active.is_some()) else {
            return Ok(None);
        };
        match action {
            ShortcutAction::TogglePlay => self.toggle_play()?,
            ShortcutAction::ToggleFullscreen => self.toggle_fullscreen()?,
            ShortcutAction::SeekRelative(delta) => {
                self.seek_relative(delta)?;
            }
        }
        Ok(Some(action))
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    pub fn active_session_id(&self) -> Option<SessionId> {
        self.active.as_ref().map(|a| a.session.id)
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            view: self.view.clone(),
            fullscreen: self.fullscreen.state(),
            volume: self.media.volume(),
            muted: self.media.is_muted(),
            effectively_muted: self.media.is_effectively_muted(),
            session: self.session_snapshot(),
        }
    }

    fn session_snapshot(&self) -> Option<SessionSnapshot> {
        let active = self.active.as_ref()?;
        let seed = &active.session.seed;
        Some(SessionSnapshot {
            session_id: active.session.id,
            handle: active.session.handle.clone(),
            episode_id: seed.episode_id,
            title: seed.display_title(),
            video_source: seed.video_source.clone(),
            tracks: active.tracks.list().iter().map(TrackView::from).collect(),
            selected_track: active.tracks.selected().map(|t| t.locator().to_string()),
            position_secs: self.media.current_position(),
            duration_secs: self.media.current_duration(),
            playback_state: active.session.playback_state,
            last_error: active.session.last_error.clone(),
            overlay: active.overlay.state(),
            controls_visible: active.overlay.controls_visible(),
            last_persisted_position: active.progress.last_persisted_position(),
            last_persisted_at: active.progress.last_persisted_at(),
        })
    }

    /// Subscribes to the normalized media stream.
    pub fn subscribe_media<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&MediaEvent) + Send + Sync + 'static,
    {
        self.media.subscribe(handler)
    }

    // ========================================================================
    // DRIVING
    // ========================================================================

    /// Handles every queued input. Returns how many were handled.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(input) = self.inbox_rx.try_recv() {
            self.handle_input(input);
            handled += 1;
        }
        handled
    }

    /// Fires due timers. Returns true when something changed.
    pub fn poll_timers(&mut self) -> bool {
        match self.active.as_mut() {
            Some(active) => active.overlay.poll(Instant::now()),
            None => false,
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.active.as_ref().and_then(|a| a.overlay.next_deadline())
    }

    /// Runs the controller until every command sender is dropped, then
    /// releases the last session.
    pub async fn run(mut self, mut commands: mpsc::Receiver<ControllerCommand>) {
        info!("Playback controller running");
        loop {
            let deadline = self.next_deadline();
            let next = tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => Next::Command(command),
                    None => break,
                },
                Some(input) = self.inbox_rx.recv() => Next::Input(input),
                _ = wait_until(deadline) => Next::Timer,
            };
            match next {
                Next::Command(command) => self.handle_command(command).await,
                Next::Input(input) => self.handle_input(input),
                Next::Timer => {
                    self.poll_timers();
                }
            }
        }
        self.teardown().await;
        info!("Playback controller stopped");
    }

    async fn handle_command(&mut self, command: ControllerCommand) {
        match command {
            ControllerCommand::Load { handle, reply } => {
                let ticket = self.begin_load(&handle).await;
                self.start_load(ticket, handle, reply);
            }
            ControllerCommand::Leave { reply } => {
                self.leave().await;
                let _ = reply.send(());
            }
            ControllerCommand::CloseRequested { reply } => {
                self.close_requested().await;
                let _ = reply.send(());
            }
            ControllerCommand::Transport { action, reply } => {
                let _ = reply.send(self.transport(action));
            }
            ControllerCommand::SelectTrack { locator, reply } => {
                let _ = reply.send(self.select_track(&locator));
            }
            ControllerCommand::Key { key, reply } => {
                let _ = reply.send(self.key_pressed(&key));
            }
            ControllerCommand::Pointer(input) => self.pointer(input),
            ControllerCommand::Focus(focus) => self.set_focus(focus),
            ControllerCommand::Snapshot { reply } => {
                let _ = reply.send(self.snapshot());
            }
        }
    }

    fn handle_input(&mut self, input: ControllerInput) {
        match input {
            ControllerInput::Media { session, event } => self.handle_media(session, event),
            ControllerInput::Display { active } => self.handle_display(active),
            ControllerInput::Resolved {
                ticket,
                handle,
                result,
            } => self.complete_pending_load(ticket, handle, result),
        }
    }

    fn handle_display(&mut self, active: bool) {
        if let Some(state) = self.fullscreen.on_display_change(active) {
            if let Some(session) = self.active.as_mut() {
                session
                    .overlay
                    .fullscreen_changed(state.is_fullscreen(), Instant::now());
            }
        }
    }

    fn handle_media(&mut self, session_id: SessionId, raw: SurfaceEvent) {
        let Some(active) = self.active.as_mut() else {
            debug!("Dropping {:?} from session {}: no active session", raw, session_id);
            return;
        };
        if active.session.id != session_id {
            debug!("Dropping {:?} from stale session {}", raw, session_id);
            return;
        }
        let Some(event) = self.media.ingest(&raw) else {
            return;
        };

        let session = &mut active.session;
        match event {
            MediaEvent::Playing => {
                session.playback_state = PlaybackState::Playing;
                session.last_error = None;
            }
            MediaEvent::Paused => {
                if session.playback_state != PlaybackState::Error {
                    session.playback_state = PlaybackState::Paused;
                }
            }
            MediaEvent::Ended => session.playback_state = PlaybackState::Ended,
            MediaEvent::TimeUpdate(position) => {
                if session.resume_pending {
                    debug!(
                        "Session {}: not persisting {}s before the resume seek",
                        session.id, position
                    );
                    return;
                }
                let position = self.media.current_position();
                if let Some(write) = active.progress.on_time_update(position, Instant::now()) {
                    let tasks = &mut active.resources.persist_tasks;
                    while tasks.try_join_next().is_some() {}
                    let backend = Arc::clone(&self.backend);
                    tasks.spawn(async move {
                        persist_best_effort(backend, write).await;
                    });
                }
            }
            MediaEvent::DurationKnown(_) => {}
            MediaEvent::CanPlay => {
                if session.playback_state == PlaybackState::Loading {
                    session.playback_state = PlaybackState::Paused;
                }
                if session.resume_pending {
                    session.resume_pending = false;
                    let target = resume_target(
                        session.seed.resume_position_secs,
                        self.config.resume_rewind_secs,
                    );
                    debug!("Resuming session {} at {}s", session.id, target);
                    if let Err(e) = self.media.seek(target) {
                        warn!("Resume seek failed: {}", e);
                    }
                    if self.config.autoplay {
                        if let Err(e) = self.media.play() {
                            warn!("Autoplay failed: {}", e);
                        }
                    }
                }
            }
            MediaEvent::Error(message) => {
                let err = PlayerError::MediaDecode(message);
                warn!("Session {}: {}", session.id, err);
                session.playback_state = PlaybackState::Error;
                session.last_error = Some(err.to_string());
            }
        }
    }

    fn require_session(&self) -> PlayerResult<()> {
        if self.active.is_none() {
            return Err(PlayerError::NoActiveSession);
        }
        Ok(())
    }
}

enum Next {
    Command(ControllerCommand),
    Input(ControllerInput),
    Timer,
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// Cloneable front door to a controller running on its own task.
#[derive(Clone)]
pub struct ControllerHandle {
    commands: mpsc::Sender<ControllerCommand>,
}

impl ControllerHandle {
    /// Creates a handle and the receiver to pass to [`PlaybackController::run`].
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<ControllerCommand>) {
        let (commands, rx) = mpsc::channel(capacity);
        (Self { commands }, rx)
    }

    async fn send(&self, command: ControllerCommand) -> PlayerResult<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| PlayerError::ControllerStopped)
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> ControllerCommand,
    ) -> PlayerResult<T> {
        let (tx, rx) = oneshot::channel();
        self.send(make(tx)).await?;
        rx.await.map_err(|_| PlayerError::ControllerStopped)
    }

    pub async fn load(&self, handle: SessionHandle) -> PlayerResult<SessionSnapshot> {
        self.request(|reply| ControllerCommand::Load { handle, reply })
            .await?
    }

    pub async fn leave(&self) -> PlayerResult<()> {
        self.request(|reply| ControllerCommand::Leave { reply }).await
    }

    pub async fn close_requested(&self) -> PlayerResult<()> {
        self.request(|reply| ControllerCommand::CloseRequested { reply })
            .await
    }

    pub async fn transport(&self, action: TransportAction) -> PlayerResult<()> {
        self.request(|reply| ControllerCommand::Transport { action, reply })
            .await?
    }

    pub async fn select_track(&self, locator: impl Into<String>) -> PlayerResult<bool> {
        let locator = locator.into();
        self.request(|reply| ControllerCommand::SelectTrack { locator, reply })
            .await?
    }

    pub async fn key_pressed(&self, key: impl Into<String>) -> PlayerResult<Option<ShortcutAction>> {
        let key = key.into();
        self.request(|reply| ControllerCommand::Key { key, reply })
            .await?
    }

    pub async fn pointer(&self, input: PointerInput) -> PlayerResult<()> {
        self.send(ControllerCommand::Pointer(input)).await
    }

    pub async fn set_focus(&self, focus: FocusContext) -> PlayerResult<()> {
        self.send(ControllerCommand::Focus(focus)).await
    }

    pub async fn snapshot(&self) -> PlayerResult<PlayerSnapshot> {
        self.request(|reply| ControllerCommand::Snapshot { reply })
            .await
    }
}
