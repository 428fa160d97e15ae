//! # instruction set
//!
//! Each instruction is a big-endian 16-bit word. The fields are:
//!
//! ```text
//!   F     X     Y     N
//!  op | x reg | y reg | nibble
//!        |------- nnn -------|   12-bit address
//!              |---- kk -----|   8-bit immediate
//! ```
//!
//! Decoding is one match over the four nibbles; families 0, 8, E and F are
//! told apart by their low byte or low nibble.
use std::fmt;

/// the decoded fields of a single instruction word
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fields {
    pub op: u8,
    pub x: usize,
    pub y: usize,
    pub n: u8,
    pub kk: u8,
    pub nnn: u16,
}

impl From<u16> for Fields {
    fn from(word: u16) -> Self {
        Fields {
            op: ((word & 0xf000) >> 12) as u8,
            x: ((word & 0x0f00) >> 8) as usize,
            y: ((word & 0x00f0) >> 4) as usize,
            n: (word & 0x000f) as u8,
            kk: (word & 0x00ff) as u8,
            nnn: word & 0x0fff,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    ClearScreen,
    /// 00EE
    Return,
    /// 1nnn
    Jump(u16),
    /// 2nnn
    Call(u16),
    /// 3xkk
    SkipIfEqualImmediate(usize, u8),
    /// 4xkk
    SkipIfNotEqualImmediate(usize, u8),
    /// 5xy0
    SkipIfEqual(usize, usize),
    /// 6xkk
    LoadImmediate(usize, u8),
    /// 7xkk
    AddImmediate(usize, u8),
    /// 8xy0
    Assign(usize, usize),
    /// 8xy1
    Or(usize, usize),
    /// 8xy2
    And(usize, usize),
    /// 8xy3
    Xor(usize, usize),
    /// 8xy4
    Add(usize, usize),
    /// 8xy5
    Sub(usize, usize),
    /// 8xy6
    ShiftRight(usize),
    /// 8xy7
    SubReversed(usize, usize),
    /// 8xyE
    ShiftLeft(usize),
    /// 9xy0
    SkipIfNotEqual(usize, usize),
    /// Annn
    SetIndex(u16),
    /// Bnnn
    JumpWithOffset(u16),
    /// Cxkk
    RandomAnd(usize, u8),
    /// Dxyn
    Draw(usize, usize, u8),
    /// Ex9E
    SkipIfKeyDown(usize),
    /// ExA1
    SkipIfKeyUp(usize),
    /// Fx07
    GetDelayTimer(usize),
    /// Fx0A
    WaitForKey(usize),
    /// Fx15
    SetDelayTimer(usize),
    /// Fx18
    SetSoundTimer(usize),
    /// Fx1E
    AddToIndex(usize),
    /// Fx29
    IndexToGlyph(usize),
    /// Fx33
    StoreBcd(usize),
    /// Fx55
    StoreRegisters(usize),
    /// Fx65
    LoadRegisters(usize),
    /// anything else; executes as a no-op
    Unknown(u16),
}

impl Instruction {
    pub fn decode(word: u16) -> Self {
        let Fields {
            op,
            x,
            y,
            n,
            kk,
            nnn,
        } = Fields::from(word);

        match (op, kk, n) {
            (0x0, 0xe0, _) if x == 0 => Instruction::ClearScreen,
            (0x0, 0xee, _) if x == 0 => Instruction::Return,
            (0x1, _, _) => Instruction::Jump(nnn),
            (0x2, _, _) => Instruction::Call(nnn),
            (0x3, _, _) => Instruction::SkipIfEqualImmediate(x, kk),
            (0x4, _, _) => Instruction::SkipIfNotEqualImmediate(x, kk),
            // NB. the low nibble of 5xy_ and 9xy_ is not checked
            (0x5, _, _) => Instruction::SkipIfEqual(x, y),
            (0x6, _, _) => Instruction::LoadImmediate(x, kk),
            (0x7, _, _) => Instruction::AddImmediate(x, kk),
            (0x8, _, 0x0) => Instruction::Assign(x, y),
            (0x8, _, 0x1) => Instruction::Or(x, y),
            (0x8, _, 0x2) => Instruction::And(x, y),
            (0x8, _, 0x3) => Instruction::Xor(x, y),
            (0x8, _, 0x4) => Instruction::Add(x, y),
            (0x8, _, 0x5) => Instruction::Sub(x, y),
            (0x8, _, 0x6) => Instruction::ShiftRight(x),
            (0x8, _, 0x7) => Instruction::SubReversed(x, y),
            (0x8, _, 0xe) => Instruction::ShiftLeft(x),
            (0x9, _, _) => Instruction::SkipIfNotEqual(x, y),
            (0xa, _, _) => Instruction::SetIndex(nnn),
            (0xb, _, _) => Instruction::JumpWithOffset(nnn),
            (0xc, _, _) => Instruction::RandomAnd(x, kk),
            (0xd, _, _) => Instruction::Draw(x, y, n),
            (0xe, 0x9e, _) => Instruction::SkipIfKeyDown(x),
            (0xe, 0xa1, _) => Instruction::SkipIfKeyUp(x),
            (0xf, 0x07, _) => Instruction::GetDelayTimer(x),
            (0xf, 0x0a, _) => Instruction::WaitForKey(x),
            (0xf, 0x15, _) => Instruction::SetDelayTimer(x),
            (0xf, 0x18, _) => Instruction::SetSoundTimer(x),
            (0xf, 0x1e, _) => Instruction::AddToIndex(x),
            (0xf, 0x29, _) => Instruction::IndexToGlyph(x),
            (0xf, 0x33, _) => Instruction::StoreBcd(x),
            (0xf, 0x55, _) => Instruction::StoreRegisters(x),
            (0xf, 0x65, _) => Instruction::LoadRegisters(x),
            _ => Instruction::Unknown(word),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Instruction::ClearScreen => write!(f, "CLS"),
            Instruction::Return => write!(f, "RET"),
            Instruction::Jump(a) => write!(f, "JP {:#05x}", a),
            Instruction::Call(a) => write!(f, "CALL {:#05x}", a),
            Instruction::SkipIfEqualImmediate(x, kk) => write!(f, "SE V{:X}, {:#04x}", x, kk),
            Instruction::SkipIfNotEqualImmediate(x, kk) => write!(f, "SNE V{:X}, {:#04x}", x, kk),
            Instruction::SkipIfEqual(x, y) => write!(f, "SE V{:X}, V{:X}", x, y),
            Instruction::LoadImmediate(x, kk) => write!(f, "LD V{:X}, {:#04x}", x, kk),
            Instruction::AddImmediate(x, kk) => write!(f, "ADD V{:X}, {:#04x}", x, kk),
            Instruction::Assign(x, y) => write!(f, "LD V{:X}, V{:X}", x, y),
            Instruction::Or(x, y) => write!(f, "OR V{:X}, V{:X}", x, y),
            Instruction::And(x, y) => write!(f, "AND V{:X}, V{:X}", x, y),
            Instruction::Xor(x, y) => write!(f, "XOR V{:X}, V{:X}", x, y),
            Instruction::Add(x, y) => write!(f, "ADD V{:X}, V{:X}", x, y),
            Instruction::Sub(x, y) => write!(f, "SUB V{:X}, V{:X}", x, y),
            Instruction::ShiftRight(x) => write!(f, "SHR V{:X}", x),
            Instruction::SubReversed(x, y) => write!(f, "SUBN V{:X}, V{:X}", x, y),
            Instruction::ShiftLeft(x) => write!(f, "SHL V{:X}", x),
            Instruction::SkipIfNotEqual(x, y) => write!(f, "SNE V{:X}, V{:X}", x, y),
            Instruction::SetIndex(a) => write!(f, "LD I, {:#05x}", a),
            Instruction::JumpWithOffset(a) => write!(f, "JP V0, {:#05x}", a),
            Instruction::RandomAnd(x, kk) => write!(f, "RND V{:X}, {:#04x}", x, kk),
            Instruction::Draw(x, y, n) => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            Instruction::SkipIfKeyDown(x) => write!(f, "SKP V{:X}", x),
            Instruction::SkipIfKeyUp(x) => write!(f, "SKNP V{:X}", x),
            Instruction::GetDelayTimer(x) => write!(f, "LD V{:X}, DT", x),
            Instruction::WaitForKey(x) => write!(f, "LD V{:X}, K", x),
            Instruction::SetDelayTimer(x) => write!(f, "LD DT, V{:X}", x),
            Instruction::SetSoundTimer(x) => write!(f, "LD ST, V{:X}", x),
            Instruction::AddToIndex(x) => write!(f, "ADD I, V{:X}", x),
            Instruction::IndexToGlyph(x) => write!(f, "LD F, V{:X}", x),
            Instruction::StoreBcd(x) => write!(f, "LD B, V{:X}", x),
            Instruction::StoreRegisters(x) => write!(f, "LD [I], V{:X}", x),
            Instruction::LoadRegisters(x) => write!(f, "LD V{:X}, [I]", x),
            Instruction::Unknown(word) => write!(f, "DW {:#06x}", word),
        }
    }
}
