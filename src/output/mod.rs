pub mod config;
pub mod presenter;
pub mod types;

pub use presenter::Emitter;

use anyhow::Result;

use config::OutputConfig;
use types::Envelope;

pub fn emit(env: &Envelope) -> Result<()> {
    Emitter::from_config(OutputConfig::current()).emit(env).map_err(anyhow::Error::from)
}
