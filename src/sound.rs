use crate::error::{Chip8Error, Result};
use beep::beep;

/// reacts to the interpreter's tone signal
pub trait Sound {
    /// start the tone; called while the sound timer is running
    fn beep(&mut self) -> Result<()>;
    /// stop the tone; called on the sound timer's last tick
    fn stop(&mut self) -> Result<()>;
}

const SIMPLEBEEP_PITCH: u16 = 2093; // C

/// square wave through the PC speaker
pub struct SimpleBeep {
    is_beeping: bool,
}

impl Drop for SimpleBeep {
    fn drop(&mut self) {
        if self.is_beeping {
            if let Err(e) = beep(0) {
                log::warn!("couldn't silence speaker: {}", e);
            }
        }
    }
}

impl SimpleBeep {
    pub fn new() -> Self {
        SimpleBeep { is_beeping: false }
    }
}

impl Default for SimpleBeep {
    fn default() -> Self {
        Self::new()
    }
}

impl Sound for SimpleBeep {
    fn beep(&mut self) -> Result<()> {
        beep(SIMPLEBEEP_PITCH).map_err(|e| Chip8Error::Sound(e.to_string()))?;
        self.is_beeping = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        beep(0).map_err(|e| Chip8Error::Sound(e.to_string()))?;
        self.is_beeping = false;
        Ok(())
    }
}

/// no sound at all; counts what it was asked to do, for testing
#[derive(Default)]
pub struct Mute {
    pub beeps: usize,
    pub stops: usize,
}

impl Mute {
    pub fn new() -> Self {
        Mute::default()
    }
}

impl Sound for Mute {
    fn beep(&mut self) -> Result<()> {
        self.beeps += 1;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.stops += 1;
        Ok(())
    }
}
