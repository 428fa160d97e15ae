use crate::interpreter::KEY_COUNT;
use crossterm::event::{poll, read, Event, KeyCode, KeyModifiers};
use crossterm::terminal;
use std::collections::HashMap;
use std::io;
use std::time::Duration;

/// map of keyboard characters to the COSMAC hex keypad, using the left-hand
/// side of a qwerty keyboard:
///
/// ```text
///   1 2 3 4      1 2 3 C
///   q w e r  =>  4 5 6 D
///   a s d f      7 8 9 E
///   z x c v      A 0 B F
/// ```
const CHIP8_CONVENTIONAL_KEYMAP: [(char, u8); 16] = [
    ('x', 0x00),
    ('1', 0x01),
    ('2', 0x02),
    ('3', 0x03),
    ('q', 0x04),
    ('w', 0x05),
    ('e', 0x06),
    ('a', 0x07),
    ('s', 0x08),
    ('d', 0x09),
    ('z', 0x0a),
    ('c', 0x0b),
    ('4', 0x0c),
    ('r', 0x0d),
    ('f', 0x0e),
    ('v', 0x0f),
];

/// terminals only tell us about presses, so a key stays down for this many
/// polls after it was last seen. long enough to bridge key-repeat gaps
const KEY_HOLD_POLLS: u8 = 8;

/// what the host should do after polling input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyPoll {
    /// current state of every hex key
    Keys([bool; KEY_COUNT]),
    /// the user wants out
    Quit,
}

/// reads keypresses
pub trait Input {
    /// called once per frame by the host
    fn poll(&mut self) -> Result<KeyPoll, io::Error>;
}

/// Input from the terminal, using Crossterm in raw mode
pub struct StdinInput {
    held: [u8; KEY_COUNT],
    keymap: HashMap<char, u8>,
}

impl StdinInput {
    pub fn new() -> Result<Self, io::Error> {
        terminal::enable_raw_mode()?;
        Ok(StdinInput {
            held: [0; KEY_COUNT],
            keymap: HashMap::from(CHIP8_CONVENTIONAL_KEYMAP),
        })
    }

    /// drain pending terminal events; true if quit was asked for
    fn read_events(&mut self) -> Result<bool, io::Error> {
        while poll(Duration::from_millis(0))? {
            match read()? {
                Event::Key(evt) => match evt.code {
                    KeyCode::Esc => return Ok(true),
                    KeyCode::Char('c') if evt.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(true)
                    }
                    KeyCode::Char(key) => match self.keymap.get(&key.to_ascii_lowercase()) {
                        Some(mapped_key) => self.held[*mapped_key as usize] = KEY_HOLD_POLLS,
                        None => log::warn!("can't map {:?} to a COSMAC key", key),
                    },
                    other => log::debug!("ignoring key {:?}", other),
                },
                other => log::trace!("ignoring event {:?}", other),
            }
        }
        Ok(false)
    }
}

impl Drop for StdinInput {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            log::warn!("couldn't leave raw mode: {}", e);
        }
    }
}

impl Input for StdinInput {
    fn poll(&mut self) -> Result<KeyPoll, io::Error> {
        for h in self.held.iter_mut() {
            *h = h.saturating_sub(1);
        }
        if self.read_events()? {
            return Ok(KeyPoll::Quit);
        }
        let mut keys = [false; KEY_COUNT];
        for (key, h) in keys.iter_mut().zip(self.held.iter()) {
            *key = *h > 0;
        }
        Ok(KeyPoll::Keys(keys))
    }
}

/// dummy Input implementation for testing: plays back one key state per
/// poll, then asks to quit
pub struct DummyInput {
    script: std::vec::IntoIter<[bool; KEY_COUNT]>,
}

impl DummyInput {
    pub fn new(script: Vec<[bool; KEY_COUNT]>) -> Self {
        DummyInput {
            script: script.into_iter(),
        }
    }

    /// no keys down for `frames` polls
    pub fn idle(frames: usize) -> Self {
        Self::new(vec![[false; KEY_COUNT]; frames])
    }
}

impl Input for DummyInput {
    fn poll(&mut self) -> Result<KeyPoll, io::Error> {
        Ok(match self.script.next() {
            Some(keys) => KeyPoll::Keys(keys),
            None => KeyPoll::Quit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keymap_covers_every_key() {
        let mut seen = [false; KEY_COUNT];
        for (_, key) in CHIP8_CONVENTIONAL_KEYMAP {
            seen[key as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_dummy_plays_script_then_quits() -> Result<(), io::Error> {
        let mut down = [false; KEY_COUNT];
        down[0xa] = true;
        let mut input = DummyInput::new(vec![down, [false; KEY_COUNT]]);
        assert_eq!(input.poll()?, KeyPoll::Keys(down));
        assert_eq!(input.poll()?, KeyPoll::Keys([false; KEY_COUNT]));
        assert_eq!(input.poll()?, KeyPoll::Quit);
        assert_eq!(input.poll()?, KeyPoll::Quit);
        Ok(())
    }

    #[test]
    fn test_dummy_idle() -> Result<(), io::Error> {
        let mut input = DummyInput::idle(1);
        assert_eq!(input.poll()?, KeyPoll::Keys([false; KEY_COUNT]));
        assert_eq!(input.poll()?, KeyPoll::Quit);
        Ok(())
    }
}
