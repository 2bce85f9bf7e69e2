//! Player core - playback orchestration
//!
//! Owns the queue, transport state, policies and volume, and is the only
//! component that talks to the playback device. UI code calls the operations
//! here and learns about changes through subscribed listeners (or by
//! draining pending events).
//!
//! Everything runs on one logical thread: each operation and each device
//! event is handled to completion before the next one. The only deferred
//! result is `play()`, which is applied optimistically and reconciled when
//! the device settles it.

use crate::{
    device::{DeviceEvent, PlayStart, PlaybackDevice},
    error::{DeviceError, PlaybackError, Result},
    events::{ListenerId, Listeners, PlaybackEvent},
    queue::Queue,
    types::{LoadId, PlayTicket, PlaybackConfig, PlayerSnapshot, RepeatMode, TransportState},
    volume::Volume,
};
use harmonic_core::Track;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::VecDeque;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Pending events kept for polling consumers; oldest are dropped past this
const MAX_PENDING_EVENTS: usize = 256;

/// Central playback state machine
///
/// Holds:
/// - Current track and transport state (stopped/playing/paused)
/// - Queue with cursor
/// - Repeat mode and shuffle flag
/// - Volume and mute
/// - The playback device, exclusively
#[derive(Debug)]
pub struct PlayerCore<D: PlaybackDevice> {
    device: D,

    // State
    state: TransportState,
    current_track: Option<Track>,
    current_load: Option<LoadId>,
    load_counter: u64,
    position: Duration,
    duration: Option<Duration>,

    // Queue
    queue: Queue,

    // Settings
    volume: Volume,
    repeat: RepeatMode,
    shuffle: bool,
    restart_threshold: Duration,
    sync_cursor_on_direct_play: bool,
    rng: StdRng,

    // Latest play() still waiting for the device to settle it
    pending_play: Option<PlayTicket>,
    attempt_counter: u64,

    // UI synchronization
    listeners: Listeners,
    pending_events: VecDeque<PlaybackEvent>,
}

impl<D: PlaybackDevice> PlayerCore<D> {
    /// Create a player over `device`
    ///
    /// Out-of-range config values are clamped; use
    /// [`PlaybackConfig::validate`] first to reject them instead.
    pub fn new(device: D, config: PlaybackConfig) -> Self {
        let mut volume = Volume::new(config.volume);
        if config.muted {
            volume.mute();
        }

        let rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut core = Self {
            device,
            state: TransportState::Stopped,
            current_track: None,
            current_load: None,
            load_counter: 0,
            position: Duration::ZERO,
            duration: None,
            queue: Queue::new(),
            volume,
            repeat: config.repeat,
            shuffle: config.shuffle,
            restart_threshold: config.previous_restart_threshold(),
            sync_cursor_on_direct_play: config.sync_cursor_on_direct_play,
            rng,
            pending_play: None,
            attempt_counter: 0,
            listeners: Listeners::default(),
            pending_events: VecDeque::new(),
        };

        core.device.set_volume(core.volume.output());
        core
    }

    /// Create a player with default configuration
    pub fn with_defaults(device: D) -> Self {
        Self::new(device, PlaybackConfig::default())
    }

    // ===== Playback Control =====

    /// Play `track`, optionally within a new queue
    ///
    /// With `Some(queue)` the queue is replaced wholesale and the cursor
    /// points at `track`'s first occurrence, or 0 if it is not in there.
    /// With `None` the queue is kept; the cursor follows `track` only when it
    /// is already queued and cursor sync is enabled.
    ///
    /// Always reloads, so playing the current track restarts it.
    pub fn play_track(&mut self, track: Track, queue: Option<Vec<Track>>) {
        if let Some(tracks) = queue {
            let start = tracks.iter().position(|t| t.id == track.id).unwrap_or(0);
            self.queue.replace(tracks, start);
            self.emit_queue_changed();
        } else if self.sync_cursor_on_direct_play {
            if let Some(index) = self.queue.position_of(&track.id) {
                if self.queue.current_index() != Some(index) {
                    self.queue.set_current(index);
                    self.emit_queue_changed();
                }
            }
        }

        self.start_track(track);
    }

    /// Flip between playing and paused
    ///
    /// No-op without a current track. From `Stopped` (last track ran out)
    /// the current track restarts from the beginning.
    pub fn toggle_play_pause(&mut self) {
        if self.current_track.is_none() {
            return;
        }

        if self.state == TransportState::Playing {
            self.pause();
        } else {
            self.resume();
        }
    }

    /// Pause playback
    pub fn pause(&mut self) {
        if self.state == TransportState::Playing {
            self.device.pause();
            // A late settlement must not override the user's pause
            self.pending_play = None;
            self.set_state(TransportState::Paused);
        }
    }

    /// Resume playback of the current track
    pub fn resume(&mut self) {
        if self.current_track.is_none() {
            return;
        }

        match self.state {
            TransportState::Playing => {}
            TransportState::Paused => self.start_playback(),
            TransportState::Stopped => {
                self.seek_internal(Duration::ZERO);
                self.start_playback();
            }
        }
    }

    /// Stop playback
    ///
    /// Stops output and clears the current track (but not the queue)
    pub fn stop(&mut self) {
        if self.current_track.is_some() {
            self.device.pause();
        }

        self.current_track = None;
        self.current_load = None;
        self.pending_play = None;
        self.position = Duration::ZERO;
        self.duration = None;
        self.state = TransportState::Stopped;
        self.emit(PlaybackEvent::StateChanged {
            state: TransportState::Stopped,
        });
    }

    /// Skip to next track
    ///
    /// Sequential order wraps from the last entry to the first; with shuffle
    /// on, the target is a uniform draw over the whole queue. No-op on an
    /// empty queue.
    pub fn play_next(&mut self) {
        let target = if self.shuffle {
            self.queue.random_index(&mut self.rng)
        } else {
            self.queue.next_index()
        };

        if let Some(index) = target {
            self.play_queue_index(index);
        }
    }

    /// Go to previous track
    ///
    /// Past the restart threshold (3 s by default) this restarts the current
    /// track instead. Otherwise moves the cursor back, wrapping to the last
    /// entry. No-op on an empty queue.
    pub fn play_previous(&mut self) {
        if self.queue.is_empty() {
            return;
        }

        if self.position > self.restart_threshold {
            debug!("Previous past {:?}: restarting current track", self.restart_threshold);
            self.seek_internal(Duration::ZERO);
            return;
        }

        if let Some(index) = self.queue.previous_index() {
            self.play_queue_index(index);
        }
    }

    /// Play the queue entry at `index`
    pub fn skip_to(&mut self, index: usize) -> Result<()> {
        if self.queue.is_empty() {
            return Err(PlaybackError::QueueEmpty);
        }
        if index >= self.queue.len() {
            return Err(PlaybackError::IndexOutOfBounds {
                index,
                len: self.queue.len(),
            });
        }

        self.play_queue_index(index);
        Ok(())
    }

    // ===== Seek =====

    /// Seek within the current track
    ///
    /// Positions past the end are left for the device to clamp. No-op
    /// without a current track.
    pub fn seek(&mut self, position: Duration) {
        if self.current_track.is_none() {
            return;
        }
        self.seek_internal(position);
    }

    // ===== Volume =====

    /// Set volume (0.0-1.0, clamped)
    ///
    /// While muted the level is stored and the device stays silent.
    pub fn set_volume(&mut self, level: f32) {
        self.volume.set_level(level);
        if !self.volume.is_muted() {
            self.device.set_volume(self.volume.output());
        }
        self.emit_volume_changed();
    }

    /// Toggle mute without touching the stored level
    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.device.set_volume(self.volume.output());
        self.emit_volume_changed();
    }

    // ===== Policies =====

    /// Cycle repeat `Off -> All -> One -> Off`
    pub fn toggle_repeat(&mut self) {
        self.set_repeat(self.repeat.cycle());
    }

    pub fn set_repeat(&mut self, mode: RepeatMode) {
        self.repeat = mode;
        self.emit(PlaybackEvent::RepeatChanged { mode });
    }

    /// Flip shuffle; the queue order is left as is
    pub fn toggle_shuffle(&mut self) {
        self.set_shuffle(!self.shuffle);
    }

    pub fn set_shuffle(&mut self, enabled: bool) {
        self.shuffle = enabled;
        self.emit(PlaybackEvent::ShuffleChanged { enabled });
    }

    // ===== Queue Management =====

    /// Append a track; cursor and transport are untouched
    pub fn enqueue(&mut self, track: Track) {
        self.queue.push(track);
        self.emit_queue_changed();
    }

    /// Clear the queue; the current track keeps playing
    pub fn clear_queue(&mut self) {
        self.queue.clear();
        self.emit_queue_changed();
    }

    // ===== Device Events =====

    /// Apply an event reported by the device
    ///
    /// Events tagged with anything but the current load are stale (the track
    /// was replaced since) and are dropped.
    pub fn handle_device_event(&mut self, event: DeviceEvent) {
        if Some(event.load()) != self.current_load {
            trace!("Dropping stale device event for {}: {:?}", event.load(), event);
            return;
        }

        match event {
            DeviceEvent::TimeUpdate { position, .. } => {
                self.position = position;
                self.emit_position_changed();
            }
            DeviceEvent::LoadedMetadata { duration, .. } => {
                self.duration = Some(duration);
                self.emit(PlaybackEvent::DurationChanged {
                    duration_ms: duration.as_millis() as u64,
                });
            }
            DeviceEvent::Ended { .. } => self.handle_track_ended(),
            DeviceEvent::PlaySettled { ticket, outcome } => {
                if self.pending_play != Some(ticket) {
                    trace!("Dropping superseded play settlement {:?}", ticket);
                    return;
                }
                self.pending_play = None;

                match outcome {
                    Ok(()) => debug!("Playback confirmed for {}", ticket.load),
                    Err(err) => self.reject_playback(err),
                }
            }
        }
    }

    /// End-of-track transition
    ///
    /// | repeat | condition          | action                       |
    /// |--------|--------------------|------------------------------|
    /// | One    | always             | restart current track        |
    /// | All    | queue non-empty    | next (wraps)                 |
    /// | Off    | cursor before last | next                         |
    /// | Off    | cursor on last     | stop, position held at end   |
    ///
    /// Unlike a manual `play_next`, repeat `Off` never wraps here.
    fn handle_track_ended(&mut self) {
        if let Some(track) = &self.current_track {
            let track_id = track.id.to_string();
            self.emit(PlaybackEvent::TrackFinished { track_id });
        }

        match self.repeat {
            RepeatMode::One => {
                self.seek_internal(Duration::ZERO);
                self.start_playback();
            }
            RepeatMode::All if !self.queue.is_empty() => self.play_next(),
            RepeatMode::Off if !self.queue.is_empty() && !self.queue.is_at_end() => {
                self.play_next();
            }
            RepeatMode::All | RepeatMode::Off => self.stop_at_end(),
        }
    }

    // ===== State =====

    pub fn get_state(&self) -> TransportState {
        self.state
    }

    pub fn get_current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    pub fn get_position(&self) -> Duration {
        self.position
    }

    /// Authoritative duration, `None` until the device reports it
    pub fn get_duration(&self) -> Option<Duration> {
        self.duration
    }

    pub fn get_volume(&self) -> f32 {
        self.volume.level()
    }

    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    /// Level currently sent to the device
    pub fn output_volume(&self) -> f32 {
        self.volume.output()
    }

    pub fn get_repeat(&self) -> RepeatMode {
        self.repeat
    }

    pub fn get_shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn get_queue(&self) -> &[Track] {
        self.queue.tracks()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.queue.current_index()
    }

    /// Load tag of the current track, for composition roots forwarding events
    pub fn current_load(&self) -> Option<LoadId> {
        self.current_load
    }

    /// Everything the UI displays, in one value
    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            current_track: self.current_track.clone(),
            state: self.state,
            position: self.position,
            duration: self.duration,
            volume: self.volume.level(),
            muted: self.volume.is_muted(),
            repeat: self.repeat,
            shuffle: self.shuffle,
            queue_len: self.queue.len(),
            current_index: self.queue.current_index(),
        }
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    /// Mutable device access for the composition root
    ///
    /// Driving transport through this bypasses the player; use it for
    /// device-side plumbing (polling, clock ticks) only.
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    // ===== Events =====

    /// Register a listener for every subsequent event
    ///
    /// Listeners run synchronously inside the operation that emitted the
    /// event, so they cannot call back into the player.
    pub fn subscribe(&mut self, listener: impl FnMut(&PlaybackEvent) + 'static) -> ListenerId {
        self.listeners.add(Box::new(listener))
    }

    /// Remove a listener; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Drain all pending events
    ///
    /// Polling alternative to `subscribe`. Only the most recent events are
    /// retained between drains.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        self.pending_events.drain(..).collect()
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internals =====

    fn play_queue_index(&mut self, index: usize) {
        let Some(track) = self.queue.get(index).cloned() else {
            return;
        };

        self.queue.set_current(index);
        self.emit_queue_changed();
        self.start_track(track);
    }

    /// Load `track` under a fresh tag and start it
    fn start_track(&mut self, track: Track) {
        self.load_counter += 1;
        let load = LoadId(self.load_counter);

        let previous_track_id = self.current_track.as_ref().map(|t| t.id.to_string());
        let track_id = track.id.to_string();

        debug!("Loading {} ({}) as {}", track.id, track.audio_locator, load);

        self.current_load = Some(load);
        self.pending_play = None;
        self.position = Duration::ZERO;
        self.duration = None;
        self.device.load(load, &track.audio_locator);
        self.current_track = Some(track);

        self.emit(PlaybackEvent::TrackChanged {
            track_id,
            previous_track_id,
        });
        self.emit_position_changed();

        self.start_playback();
    }

    /// Ask the device to play; transport goes to `Playing` optimistically
    fn start_playback(&mut self) {
        let Some(load) = self.current_load else {
            return;
        };

        self.attempt_counter += 1;
        let ticket = PlayTicket {
            load,
            attempt: self.attempt_counter,
        };

        self.set_state(TransportState::Playing);

        match self.device.play(ticket) {
            PlayStart::Started => self.pending_play = None,
            PlayStart::Pending => self.pending_play = Some(ticket),
            PlayStart::Rejected(err) => {
                self.pending_play = None;
                self.reject_playback(err);
            }
        }
    }

    /// Revert the optimistic `Playing` and tell listeners why
    fn reject_playback(&mut self, err: DeviceError) {
        let track_id = self.current_track.as_ref().map(|t| t.id.to_string());
        warn!("Playback failed for {:?}: {}", track_id, err);

        if self.state == TransportState::Playing {
            self.set_state(TransportState::Paused);
        }

        self.emit(PlaybackEvent::PlaybackFailed {
            track_id,
            message: err.to_string(),
        });
    }

    fn stop_at_end(&mut self) {
        if let Some(end) = self.duration.or_else(|| self.device.duration()) {
            self.position = end;
        }
        self.pending_play = None;
        self.set_state(TransportState::Stopped);
        self.emit_position_changed();
    }

    fn seek_internal(&mut self, position: Duration) {
        self.position = position;
        self.device.seek(position);
        self.emit_position_changed();
    }

    fn set_state(&mut self, state: TransportState) {
        if self.state != state {
            debug!("Transport {:?} -> {:?}", self.state, state);
            self.state = state;
            self.emit(PlaybackEvent::StateChanged { state });
        }
    }

    fn emit(&mut self, event: PlaybackEvent) {
        self.listeners.notify(&event);

        if self.pending_events.len() >= MAX_PENDING_EVENTS {
            self.pending_events.pop_front();
        }
        self.pending_events.push_back(event);
    }

    fn emit_queue_changed(&mut self) {
        self.emit(PlaybackEvent::QueueChanged {
            length: self.queue.len(),
            current_index: self.queue.current_index(),
        });
    }

    fn emit_volume_changed(&mut self) {
        self.emit(PlaybackEvent::VolumeChanged {
            volume: self.volume.level(),
            muted: self.volume.is_muted(),
            output: self.volume.output(),
        });
    }

    fn emit_position_changed(&mut self) {
        self.emit(PlaybackEvent::PositionChanged {
            position_ms: self.position.as_millis() as u64,
            duration_ms: self.duration.map_or(0, |d| d.as_millis() as u64),
        });
    }
}
