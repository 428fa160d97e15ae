use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong outside the instruction stream. Executing
/// instructions never fails; see `interpreter` for how odd states are handled.
#[derive(Debug, Error)]
pub enum Chip8Error {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("couldn't read {}: {source}", path.display())]
    Rom { path: PathBuf, source: io::Error },

    #[error("program is {len} bytes but only {max} bytes fit above 0x200")]
    ProgramTooLarge { len: usize, max: usize },

    #[error("sound device failed: {0}")]
    Sound(String),
}

pub type Result<T> = std::result::Result<T, Chip8Error>;
