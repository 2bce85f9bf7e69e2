//! Harmonic Archive terminal player
//!
//! Composition root for the playback core: loads a catalog export, builds a
//! `PlayerCore` over a simulated device and drives it from line commands.

pub mod commands;
pub mod config;
pub mod device;
pub mod error;
pub mod session;

pub use commands::Command;
pub use config::CliConfig;
pub use device::SimulatedDevice;
pub use error::{CliError, Result};
pub use session::{run, Flow, Session};

use harmonic_core::MemoryCatalog;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Load a catalog export from disk
pub fn load_catalog(path: &Path) -> Result<MemoryCatalog> {
    let file = File::open(path)?;
    Ok(MemoryCatalog::from_json_reader(BufReader::new(file))?)
}
