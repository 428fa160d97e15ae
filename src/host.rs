//! # host
//!
//! Drives the interpreter against real (or dummy) devices. Once a frame:
//!
//!  1. poll input; stop if the user asked to quit
//!  2. copy key state into the interpreter
//!  3. run `cycles_per_frame` instructions
//!  4. tick the timers, starting or stopping the tone as needed
//!  5. render the display if it changed
//!  6. sleep until the next frame is due
//!
//! CHIP-8 instructions run as fast as possible then we sleep, so timing is
//! right per frame but not per instruction.
use crate::config::Config;
use crate::display::Display;
use crate::error::Result;
use crate::input::{Input, KeyPoll};
use crate::interpreter::Chip8Interpreter;
use crate::sound::Sound;
use std::time::{Duration, Instant};

pub struct Host<'a> {
    interpreter: Chip8Interpreter,
    display: &'a mut dyn Display,
    input: &'a mut dyn Input,
    sound: &'a mut dyn Sound,
    cycles_per_frame: u32,
    frame_period: Duration,
    beeping: bool,
}

impl<'a> Host<'a> {
    pub fn new(
        interpreter: Chip8Interpreter,
        display: &'a mut dyn Display,
        input: &'a mut dyn Input,
        sound: &'a mut dyn Sound,
        config: &Config,
    ) -> Self {
        Host {
            interpreter,
            display,
            input,
            sound,
            cycles_per_frame: config.cycles_per_frame,
            frame_period: Duration::from_secs(1) / config.frame_rate.max(1),
            beeping: false,
        }
    }

    /// run one frame. returns false once input asks to quit
    pub fn frame(&mut self) -> Result<bool> {
        match self.input.poll()? {
            KeyPoll::Quit => return Ok(false),
            KeyPoll::Keys(keys) => self.interpreter.set_keys(keys),
        }

        for _ in 0..self.cycles_per_frame {
            self.interpreter.step();
        }

        let tone_ended = self.interpreter.tick_timers();
        if self.interpreter.tone_active() {
            if !self.beeping {
                self.sound.beep()?;
                self.beeping = true;
            }
        } else if self.beeping {
            if !tone_ended {
                log::debug!("tone cut short by the program");
            }
            self.sound.stop()?;
            self.beeping = false;
        }

        if self.interpreter.redraw_pending() {
            self.display.draw(self.interpreter.display())?;
            self.interpreter.clear_redraw();
        }
        Ok(true)
    }

    /// main loop, paced to the frame rate. runs until input asks to quit or
    /// `max_frames` have gone by; returns how many frames ran
    pub fn run(&mut self, max_frames: Option<u64>) -> Result<u64> {
        let mut frames = 0;
        let mut next_frame = Instant::now();
        while max_frames.map_or(true, |max| frames < max) {
            if !self.frame()? {
                break;
            }
            frames += 1;

            next_frame += self.frame_period;
            let now = Instant::now();
            if next_frame > now {
                spin_sleep::sleep(next_frame - now);
            } else {
                // fell behind; don't try to catch up
                log::debug!("frame {} overran by {:?}", frames, now - next_frame);
                next_frame = now;
            }
        }
        if self.beeping {
            self.sound.stop()?;
            self.beeping = false;
        }
        log::debug!("stopped after {} frames", frames);
        Ok(frames)
    }

    pub fn interpreter(&self) -> &Chip8Interpreter {
        &self.interpreter
    }
}
