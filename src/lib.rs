//!
//! ## Design
//!
//! * the interpreter owns all machine state and knows nothing about time;
//!   it is advanced one instruction at a time with `step()` and one 60Hz
//!   tick at a time with `tick_timers()`
//! * display, input and sound sit behind traits so alternatives can be
//!   plugged in; starting with TUI in-console
//! * the host loop runs a fixed number of instructions per frame, then
//!   sleeps to the next frame; so not quite authentic
//!
//! Model
//!
//! Host
//!  |-- display, input, sound, config
//!  |-- interpreter
//!  |    |-- memory (font, program)
//!  |    `-- instruction set
//!  `-- main loop
//!       |-- keys = input.poll()
//!       |-- cycles_per_frame times: interpreter.step()
//!       |-- interpreter.tick_timers() -> start/stop sound
//!       |-- if redraw pending: display.draw(); clear redraw
//!       `-- sleep until next frame
pub mod config;
pub mod display;
pub mod error;
pub mod host;
pub mod input;
pub mod instruction;
pub mod interpreter;
pub mod memory;
pub mod sound;

pub use error::{Chip8Error, Result};
