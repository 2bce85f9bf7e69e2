//! Line commands understood by the interactive session

use crate::error::{CliError, Result};
use harmonic_core::{PlaylistId, TrackId};
use std::str::FromStr;
use std::time::Duration;

pub const HELP: &str = "\
Commands:
  list [search]     list songs (optionally filtered), becomes the play context
  play <id>         play a song with the current listing as queue
  playlist <id>     play a playlist from its first track
  direct <id>       play a song without touching the queue
  enqueue <id>      append a song to the queue
  skip <index>      play the queue entry at index
  toggle            play/pause
  next | prev       move through the queue
  seek <secs>       jump within the current track
  volume <0..1>     set volume
  mute              toggle mute
  repeat            cycle repeat off -> all -> one
  shuffle           toggle shuffle
  tick <secs>       advance the simulated clock
  fail              make the next play attempt fail
  status            show player state
  queue             show the queue
  help              show this help
  quit              exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    List(Option<String>),
    Play(TrackId),
    Playlist(PlaylistId),
    Direct(TrackId),
    Enqueue(TrackId),
    Skip(usize),
    Toggle,
    Next,
    Prev,
    Seek(Duration),
    Volume(f32),
    Mute,
    Repeat,
    Shuffle,
    Tick(Duration),
    Fail,
    Status,
    Queue,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = CliError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "list" | "ls" => Command::List((!rest.is_empty()).then(|| rest.to_string())),
            "play" => Command::Play(TrackId::new(required(rest, "play")?)),
            "playlist" => Command::Playlist(PlaylistId::new(required(rest, "playlist")?)),
            "direct" => Command::Direct(TrackId::new(required(rest, "direct")?)),
            "enqueue" | "add" => Command::Enqueue(TrackId::new(required(rest, "enqueue")?)),
            "skip" => {
                let index = required(rest, "skip")?;
                let index = index.parse().map_err(|_| {
                    CliError::invalid_argument("skip", format!("not an index: {}", index))
                })?;
                Command::Skip(index)
            }
            "toggle" | "p" => Command::Toggle,
            "next" | "n" => Command::Next,
            "prev" | "previous" => Command::Prev,
            "seek" => Command::Seek(seconds(rest, "seek")?),
            "volume" | "vol" => {
                let level = required(rest, "volume")?;
                let level: f32 = level.parse().map_err(|_| {
                    CliError::invalid_argument("volume", format!("not a number: {}", level))
                })?;
                if !level.is_finite() {
                    return Err(CliError::invalid_argument("volume", "must be finite"));
                }
                Command::Volume(level)
            }
            "mute" => Command::Mute,
            "repeat" => Command::Repeat,
            "shuffle" => Command::Shuffle,
            "tick" => Command::Tick(seconds(rest, "tick")?),
            "fail" => Command::Fail,
            "status" | "st" => Command::Status,
            "queue" | "q" => Command::Queue,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err(CliError::UnknownCommand(word.to_string())),
        };

        Ok(command)
    }
}

fn required<'a>(rest: &'a str, command: &'static str) -> Result<&'a str> {
    if rest.is_empty() {
        Err(CliError::invalid_argument(command, "missing argument"))
    } else {
        Ok(rest)
    }
}

fn seconds(rest: &str, command: &'static str) -> Result<Duration> {
    let raw = required(rest, command)?;
    let secs: f64 = raw
        .parse()
        .map_err(|_| CliError::invalid_argument(command, format!("not a number: {}", raw)))?;

    if !secs.is_finite() || secs < 0.0 {
        return Err(CliError::invalid_argument(
            command,
            "must be a non-negative number of seconds",
        ));
    }

    Duration::try_from_secs_f64(secs)
        .map_err(|_| CliError::invalid_argument(command, "out of range"))
}
