//! Run-time settings, taken from the command line:
//!
//! ```text
//! chip8 <rom> [--cycles N] [--fps N] [--seed N] [--mute]
//! ```
use clap::Parser;
use std::path::PathBuf;

/// roughly 600 instructions a second at the default frame rate
pub const DEFAULT_CYCLES_PER_FRAME: u32 = 10;

/// timers count down at 60Hz, so frames happen at 60Hz
pub const DEFAULT_FRAME_RATE: u32 = 60;

#[derive(Parser, Clone, Debug, PartialEq, Eq)]
#[command(name = "chip8", about = "Run a CHIP-8 program in the terminal")]
pub struct Config {
    /// program image to load at 0x200
    #[arg(value_name = "ROM")]
    pub rom_path: PathBuf,

    /// instructions executed between timer ticks
    #[arg(
        long = "cycles",
        value_name = "N",
        default_value_t = DEFAULT_CYCLES_PER_FRAME,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub cycles_per_frame: u32,

    /// timer ticks (and redraw opportunities) per second
    #[arg(
        long = "fps",
        value_name = "N",
        default_value_t = DEFAULT_FRAME_RATE,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub frame_rate: u32,

    /// fixes the sequence of random numbers
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// no sound
    #[arg(long)]
    pub mute: bool,
}

impl Config {
    /// defaults for everything but the ROM
    pub fn new(rom_path: impl Into<PathBuf>) -> Self {
        Config {
            rom_path: rom_path.into(),
            cycles_per_frame: DEFAULT_CYCLES_PER_FRAME,
            frame_rate: DEFAULT_FRAME_RATE,
            seed: None,
            mute: false,
        }
    }
}
