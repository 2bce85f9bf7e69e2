//! Interactive session: catalog + player + simulated device
//!
//! Owns the composition: commands go to the player, the simulated device's
//! events are pumped back into the player, and player events reach the
//! terminal through a subscribed listener.

use crate::commands::{Command, HELP};
use crate::device::SimulatedDevice;
use crate::error::{CliError, Result};
use harmonic_core::{Catalog, HarmonicError, PageRequest, Track, TrackFilter, TrackId};
use harmonic_playback::{
    DeviceError, PlaybackConfig, PlaybackEvent, PlayerCore, RepeatMode, TransportState,
};
use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, info};

/// Whether the read loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session<C: Catalog> {
    catalog: C,
    player: PlayerCore<SimulatedDevice>,
    listing: Vec<Track>,
    clock_step: Duration,
    event_log: Rc<RefCell<Vec<PlaybackEvent>>>,
}

impl<C: Catalog> Session<C> {
    /// Build a session; every catalog song's duration is registered with the
    /// device so metadata matches the catalog
    pub fn new(
        catalog: C,
        playback: PlaybackConfig,
        clock_step: Duration,
        fallback_duration: Duration,
    ) -> Result<Self> {
        if clock_step.is_zero() {
            return Err(CliError::Config("clock step must be greater than zero".to_string()));
        }

        let mut device = SimulatedDevice::new(fallback_duration);
        let everything = TrackFilter {
            include_hidden: true,
            ..TrackFilter::default()
        };
        for track in all_tracks(&catalog, &everything)? {
            if let Some(duration) = track.duration_hint {
                device.register_duration(track.audio_locator, duration);
            }
        }
        let listing = all_tracks(&catalog, &TrackFilter::default())?;

        let mut player = PlayerCore::new(device, playback);
        let event_log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&event_log);
        player.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        info!("Session ready with {} tracks", listing.len());

        Ok(Self {
            catalog,
            player,
            listing,
            clock_step,
            event_log,
        })
    }

    pub fn player(&self) -> &PlayerCore<SimulatedDevice> {
        &self.player
    }

    /// Current play context for `play <id>`
    pub fn listing(&self) -> &[Track] {
        &self.listing
    }

    /// Run one command, writing its output and any resulting events
    pub fn execute(&mut self, command: Command, out: &mut impl Write) -> Result<Flow> {
        debug!("Executing {:?}", command);

        match command {
            Command::List(search) => {
                let filter = TrackFilter {
                    search,
                    ..TrackFilter::default()
                };
                self.listing = all_tracks(&self.catalog, &filter)?;
                for (index, track) in self.listing.iter().enumerate() {
                    writeln!(out, "{:>3}. {}", index + 1, describe_track(track))?;
                }
                writeln!(out, "{} track(s)", self.listing.len())?;
            }
            Command::Play(id) => {
                let track = self.find_track(&id)?;
                self.player.play_track(track, Some(self.listing.clone()));
            }
            Command::Playlist(id) => {
                let tracks = self.catalog.playlist_tracks(&id)?;
                match tracks.first().cloned() {
                    Some(first) => self.player.play_track(first, Some(tracks)),
                    None => writeln!(out, "Playlist {} has no playable tracks", id)?,
                }
            }
            Command::Direct(id) => {
                let track = self.find_track(&id)?;
                self.player.play_track(track, None);
            }
            Command::Enqueue(id) => {
                let track = self.find_track(&id)?;
                self.player.enqueue(track);
            }
            Command::Skip(index) => self.player.skip_to(index)?,
            Command::Toggle => self.player.toggle_play_pause(),
            Command::Next => self.player.play_next(),
            Command::Prev => self.player.play_previous(),
            Command::Seek(position) => self.player.seek(position),
            Command::Volume(level) => self.player.set_volume(level),
            Command::Mute => self.player.toggle_mute(),
            Command::Repeat => self.player.toggle_repeat(),
            Command::Shuffle => self.player.toggle_shuffle(),
            Command::Tick(elapsed) => self.tick(elapsed),
            Command::Fail => {
                self.player
                    .device_mut()
                    .fail_next_play(DeviceError::AutoplayBlocked);
                writeln!(out, "Next play attempt will be rejected")?;
            }
            Command::Status => writeln!(out, "{}", self.status_line())?,
            Command::Queue => {
                let current = self.player.current_index();
                for (index, track) in self.player.get_queue().iter().enumerate() {
                    let marker = if Some(index) == current { ">" } else { " " };
                    writeln!(out, "{} {:>3}. {}", marker, index, describe_track(track))?;
                }
                if self.player.queue_len() == 0 {
                    writeln!(out, "Queue is empty")?;
                }
            }
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }

        self.pump_device();
        self.flush_events(out)?;
        Ok(Flow::Continue)
    }

    /// Advance the simulated clock in `clock_step` increments
    ///
    /// Device events are applied after every step, so a track ending
    /// mid-tick hands the rest of the time to whatever plays next. Stops
    /// early once nothing is playing.
    pub fn tick(&mut self, elapsed: Duration) {
        let mut remaining = elapsed;
        while !remaining.is_zero() && self.player.device().is_playing() {
            let step = remaining.min(self.clock_step);
            self.player.device_mut().advance(step);
            self.pump_device();
            remaining -= step;
        }
    }

    /// Feed queued device events to the player until none are left
    fn pump_device(&mut self) {
        loop {
            let events = self.player.device_mut().take_events();
            if events.is_empty() {
                break;
            }
            for event in events {
                self.player.handle_device_event(event);
            }
        }
    }

    fn flush_events(&mut self, out: &mut impl Write) -> Result<()> {
        let events: Vec<_> = self.event_log.borrow_mut().drain(..).collect();
        // The polling buffer duplicates what the listener saw
        self.player.drain_events();

        for event in &events {
            if let Some(line) = describe_event(event) {
                writeln!(out, "{}", line)?;
            }
        }
        Ok(())
    }

    fn find_track(&self, id: &TrackId) -> Result<Track> {
        match self.catalog.get_track_by_id(id)? {
            Some(song) => Ok(Track::from(song)),
            None => Err(HarmonicError::TrackNotFound(id.clone()).into()),
        }
    }

    pub fn status_line(&self) -> String {
        let snapshot = self.player.snapshot();

        let state = match snapshot.state {
            TransportState::Playing => "playing",
            TransportState::Paused => "paused",
            TransportState::Stopped => "stopped",
        };
        let track = snapshot
            .current_track
            .as_ref()
            .map_or_else(|| "-".to_string(), describe_track);
        let duration = snapshot
            .duration
            .map_or_else(|| "--".to_string(), |d| format!("{:.1}s", d.as_secs_f64()));
        let repeat = match snapshot.repeat {
            RepeatMode::Off => "off",
            RepeatMode::All => "all",
            RepeatMode::One => "one",
        };
        let cursor = snapshot
            .current_index
            .map_or_else(|| "-".to_string(), |i| i.to_string());

        format!(
            "{} | {} | {:.1}s / {} | volume {:.2}{} | repeat {} | shuffle {} | queue {}/{}",
            state,
            track,
            snapshot.position.as_secs_f64(),
            duration,
            snapshot.volume,
            if snapshot.muted { " (muted)" } else { "" },
            repeat,
            if snapshot.shuffle { "on" } else { "off" },
            cursor,
            snapshot.queue_len,
        )
    }
}

/// Read commands from `input` until `quit` or end of input
///
/// Bad commands are reported and the loop carries on.
pub fn run<C: Catalog>(
    session: &mut Session<C>,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let outcome = line
            .parse::<Command>()
            .and_then(|command| session.execute(command, out));

        match outcome {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(CliError::Io(e)) => return Err(CliError::Io(e)),
            Err(e) => writeln!(out, "error: {}", e)?,
        }
    }

    Ok(())
}

/// Every song matching `filter`, across all pages
fn all_tracks(catalog: &impl Catalog, filter: &TrackFilter) -> Result<Vec<Track>> {
    let mut tracks = Vec::new();
    let mut request = PageRequest::new(1, filter.max_limit());
    loop {
        let page = catalog.list_tracks(filter, request)?;
        tracks.extend(page.items.iter().map(Track::from));
        if request.page >= page.total_pages {
            break;
        }
        request.page += 1;
    }

    Ok(tracks)
}

fn describe_track(track: &Track) -> String {
    format!("[{}] {} - {}", track.id, track.title, track.artist)
}

fn describe_event(event: &PlaybackEvent) -> Option<String> {
    let line = match event {
        PlaybackEvent::StateChanged { state } => format!("* state: {:?}", state).to_lowercase(),
        PlaybackEvent::TrackChanged {
            track_id,
            previous_track_id,
        } => match previous_track_id {
            Some(previous) => format!("* now playing {} (was {})", track_id, previous),
            None => format!("* now playing {}", track_id),
        },
        PlaybackEvent::DurationChanged { duration_ms } => {
            format!("* duration {:.1}s", *duration_ms as f64 / 1000.0)
        }
        PlaybackEvent::VolumeChanged { volume, muted, .. } => {
            format!("* volume {:.2}{}", volume, if *muted { " (muted)" } else { "" })
        }
        PlaybackEvent::QueueChanged {
            length,
            current_index,
        } => match current_index {
            Some(index) => format!("* queue {} track(s), at {}", length, index),
            None => format!("* queue {} track(s)", length),
        },
        PlaybackEvent::RepeatChanged { mode } => format!("* repeat {:?}", mode).to_lowercase(),
        PlaybackEvent::ShuffleChanged { enabled } => {
            format!("* shuffle {}", if *enabled { "on" } else { "off" })
        }
        PlaybackEvent::TrackFinished { track_id } => format!("* finished {}", track_id),
        PlaybackEvent::PlaybackFailed { track_id, message } => format!(
            "! playback failed for {}: {}",
            track_id.as_deref().unwrap_or("-"),
            message
        ),
        // Too chatty for a terminal; `status` shows the position
        PlaybackEvent::PositionChanged { .. } => return None,
    };

    Some(line)
}
