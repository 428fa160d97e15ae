//! # interpreter
//!
//! Machine state as seen by a CHIP-8 program:
//!  * 4K of memory, font at 0x050, program from 0x200
//!  * V0-VF, 16 8-bit registers. VF doubles as carry/borrow/collision output
//!  * I, the 16-bit index register (kept to 12 bits here)
//!  * PC, starting at 0x200
//!  * a call stack of return addresses, outside of memory
//!  * delay and sound timers, counted down by the host at 60Hz
//!  * a 64x32 one-bit display, one byte (0 or 1) per pixel, row-major
//!  * 16 hex keys, written by the host
//!
//! Nothing in here knows about wall-clock time. The host decides how many
//! times to call `step` between calls to `tick_timers`.
//!
//! Conditions a real program shouldn't hit are handled without failing:
//!  * RET with an empty call stack does nothing
//!  * key numbers above 0xF use their low nibble
//!  * I wraps at 0xFFF, as does every memory access made through it
use crate::error::Result;
use crate::instruction::Instruction;
use crate::memory::{
    Chip8MemoryMap, MemoryMap, CHIP8_ADDR_MASK, CHIP8_FONT_ADDR, CHIP8_FONT_GLYPH_BYTES,
    CHIP8_PROGRAM_ADDR,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io;

pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;
pub const DISPLAY_PIXELS: usize = SCREEN_WIDTH * SCREEN_HEIGHT;
pub const KEY_COUNT: usize = 16;
pub const REGISTER_COUNT: usize = 16;

/// flag register
const VF: usize = 0xf;

pub struct Chip8Interpreter {
    memory: Chip8MemoryMap,
    registers: [u8; REGISTER_COUNT],
    index: u16,
    program_counter: u16,
    call_stack: Vec<u16>,
    delay_timer: u8,
    sound_timer: u8,
    display: [u8; DISPLAY_PIXELS],
    redraw_pending: bool,
    keys: [bool; KEY_COUNT],
    rng: StdRng,
}

impl Chip8Interpreter {
    /// fresh machine with the font loaded and PC at 0x200
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// as `new`, but with a repeatable random number sequence
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Chip8Interpreter {
            memory: Chip8MemoryMap::new(),
            registers: [0; REGISTER_COUNT],
            index: 0,
            program_counter: CHIP8_PROGRAM_ADDR,
            call_stack: Vec::new(),
            delay_timer: 0,
            sound_timer: 0,
            display: [0; DISPLAY_PIXELS],
            redraw_pending: false,
            keys: [false; KEY_COUNT],
            rng,
        }
    }

    /// copy a program image in at 0x200, truncated to fit
    pub fn load_bytes(&mut self, image: &[u8]) -> usize {
        self.memory.load_bytes(image)
    }

    /// load a chip8 program, rejecting anything too big for memory
    pub fn load_program(&mut self, reader: &mut impl io::Read) -> Result<usize> {
        self.memory.load_program(reader)
    }

    /// fetch, decode and execute one instruction. returns what was executed
    pub fn step(&mut self) -> Instruction {
        let word = self.memory.read_word(self.program_counter);
        let instruction = Instruction::decode(word);
        log::trace!("{:#05x}: {:04x} {}", self.program_counter, word, instruction);
        self.program_counter = self.program_counter.wrapping_add(2) & CHIP8_ADDR_MASK;
        self.execute(instruction);
        instruction
    }

    fn execute(&mut self, instruction: Instruction) {
        match instruction {
            Instruction::ClearScreen => {
                self.display = [0; DISPLAY_PIXELS];
                self.redraw_pending = true;
            }
            Instruction::Return => match self.call_stack.pop() {
                Some(addr) => self.program_counter = addr,
                None => log::warn!(
                    "return with empty call stack at {:#05x}, ignored",
                    self.program_counter.wrapping_sub(2) & CHIP8_ADDR_MASK
                ),
            },
            Instruction::Jump(addr) => self.program_counter = addr,
            Instruction::Call(addr) => {
                self.call_stack.push(self.program_counter);
                self.program_counter = addr;
            }
            Instruction::SkipIfEqualImmediate(x, kk) => self.skip_if(self.registers[x] == kk),
            Instruction::SkipIfNotEqualImmediate(x, kk) => self.skip_if(self.registers[x] != kk),
            Instruction::SkipIfEqual(x, y) => {
                self.skip_if(self.registers[x] == self.registers[y])
            }
            Instruction::LoadImmediate(x, kk) => self.registers[x] = kk,
            Instruction::AddImmediate(x, kk) => {
                self.registers[x] = self.registers[x].wrapping_add(kk)
            }
            Instruction::Assign(x, y) => self.registers[x] = self.registers[y],
            Instruction::Or(x, y) => self.registers[x] |= self.registers[y],
            Instruction::And(x, y) => self.registers[x] &= self.registers[y],
            Instruction::Xor(x, y) => self.registers[x] ^= self.registers[y],
            Instruction::Add(x, y) => {
                let (sum, carry) = self.registers[x].overflowing_add(self.registers[y]);
                self.registers[VF] = carry as u8;
                self.registers[x] = sum;
            }
            // NB. these write VF first, then take their operands from the
            // registers, so VF as an operand sees the new flag
            Instruction::Sub(x, y) => {
                self.registers[VF] = (self.registers[x] > self.registers[y]) as u8;
                self.registers[x] = self.registers[x].wrapping_sub(self.registers[y]);
            }
            Instruction::ShiftRight(x) => {
                self.registers[VF] = self.registers[x] & 0x01;
                self.registers[x] >>= 1;
            }
            Instruction::SubReversed(x, y) => {
                self.registers[VF] = (self.registers[y] > self.registers[x]) as u8;
                self.registers[x] = self.registers[y].wrapping_sub(self.registers[x]);
            }
            Instruction::ShiftLeft(x) => {
                self.registers[VF] = (self.registers[x] & 0x80) >> 7;
                self.registers[x] <<= 1;
            }
            Instruction::SkipIfNotEqual(x, y) => {
                self.skip_if(self.registers[x] != self.registers[y])
            }
            Instruction::SetIndex(addr) => self.index = addr,
            Instruction::JumpWithOffset(addr) => {
                self.program_counter =
                    addr.wrapping_add(self.registers[0] as u16) & CHIP8_ADDR_MASK
            }
            Instruction::RandomAnd(x, kk) => self.registers[x] = self.rng.gen::<u8>() & kk,
            Instruction::Draw(x, y, n) => self.draw_sprite(x, y, n),
            Instruction::SkipIfKeyDown(x) => self.skip_if(self.keys[self.key_in(x)]),
            Instruction::SkipIfKeyUp(x) => self.skip_if(!self.keys[self.key_in(x)]),
            Instruction::GetDelayTimer(x) => self.registers[x] = self.delay_timer,
            Instruction::WaitForKey(x) => {
                // highest pressed key wins
                match self.keys.iter().rposition(|down| *down) {
                    Some(key) => self.registers[x] = key as u8,
                    None => {
                        self.program_counter =
                            self.program_counter.wrapping_sub(2) & CHIP8_ADDR_MASK
                    }
                }
            }
            Instruction::SetDelayTimer(x) => self.delay_timer = self.registers[x],
            Instruction::SetSoundTimer(x) => self.sound_timer = self.registers[x],
            Instruction::AddToIndex(x) => {
                self.index = self.index.wrapping_add(self.registers[x] as u16) & CHIP8_ADDR_MASK
            }
            Instruction::IndexToGlyph(x) => {
                // NB. not masked; values above 0xF point past the font
                let digit = self.registers[x] as u16;
                self.index = CHIP8_FONT_ADDR + digit * CHIP8_FONT_GLYPH_BYTES;
            }
            Instruction::StoreBcd(x) => {
                let value = self.registers[x];
                self.memory
                    .write(&[value / 100, (value / 10) % 10, value % 10], self.index);
            }
            Instruction::StoreRegisters(x) => {
                self.memory.write(&self.registers[..=x], self.index);
            }
            Instruction::LoadRegisters(x) => {
                for i in 0..=x {
                    self.registers[i] = self.memory.read_byte(self.index.wrapping_add(i as u16));
                }
            }
            Instruction::Unknown(word) => log::trace!("ignoring unknown instruction {:04x}", word),
        }
    }

    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.program_counter = self.program_counter.wrapping_add(2) & CHIP8_ADDR_MASK;
        }
    }

    fn key_in(&self, x: usize) -> usize {
        (self.registers[x] & 0x0f) as usize
    }

    /// XOR an 8-pixel wide, n-row sprite from I onto the display at (Vx, Vy).
    /// the origin wraps round the screen; the sprite itself is clipped at the
    /// right and bottom edges. VF is set if any lit pixel gets turned off.
    fn draw_sprite(&mut self, x: usize, y: usize, n: u8) {
        let origin_x = self.registers[x] as usize % SCREEN_WIDTH;
        let origin_y = self.registers[y] as usize % SCREEN_HEIGHT;
        self.registers[VF] = 0;
        for row in 0..n as usize {
            let sprite_byte = self.memory.read_byte(self.index.wrapping_add(row as u16));
            let py = origin_y + row;
            for col in 0..8 {
                let px = origin_x + col;
                if sprite_byte & (0x80 >> col) == 0 || px >= SCREEN_WIDTH || py >= SCREEN_HEIGHT {
                    continue;
                }
                let pixel = &mut self.display[py * SCREEN_WIDTH + px];
                if *pixel == 1 {
                    self.registers[VF] = 1;
                }
                *pixel ^= 1;
            }
        }
        self.redraw_pending = true;
    }

    /// count both timers down once. returns true if this was the last tick
    /// of the sound timer, i.e. a tone should stop now
    pub fn tick_timers(&mut self) -> bool {
        if self.delay_timer > 0 {
            self.delay_timer -= 1;
        }
        let mut tone_ended = false;
        if self.sound_timer > 0 {
            if self.sound_timer == 1 {
                tone_ended = true;
            }
            self.sound_timer -= 1;
        }
        tone_ended
    }

    /// a tone should be sounding whilst the sound timer is non-zero
    pub fn tone_active(&self) -> bool {
        self.sound_timer > 0
    }

    pub fn set_key(&mut self, key: usize, down: bool) {
        self.keys[key & 0x0f] = down;
    }

    pub fn set_keys(&mut self, keys: [bool; KEY_COUNT]) {
        self.keys = keys;
    }

    /// one byte per pixel, 0 or 1, row-major
    pub fn display(&self) -> &[u8] {
        &self.display
    }

    pub fn redraw_pending(&self) -> bool {
        self.redraw_pending
    }

    /// called once the display has been rendered
    pub fn clear_redraw(&mut self) {
        self.redraw_pending = false;
    }

    pub fn registers(&self) -> &[u8; REGISTER_COUNT] {
        &self.registers
    }

    pub fn index(&self) -> u16 {
        self.index
    }

    pub fn program_counter(&self) -> u16 {
        self.program_counter
    }

    pub fn call_stack(&self) -> &[u16] {
        &self.call_stack
    }

    pub fn delay_timer(&self) -> u8 {
        self.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.sound_timer
    }

    pub fn memory(&self) -> &Chip8MemoryMap {
        &self.memory
    }
}

impl Default for Chip8Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
