pub mod app;
pub mod config;
pub mod emulator;
pub mod error;
pub mod exec;
pub mod loader;
pub mod machine;
pub mod opcode;

pub use app::{AppConfig, EmulatorApp};
pub use config::Chip8Config;
pub use emulator::{Emulator, RunState};
pub use error::{Error, Result};
pub use machine::Machine;
pub use opcode::Opcode;

/// Logical screen width in pixels.
pub const SCREEN_WIDTH: usize = 64;
/// Logical screen height in pixels.
pub const SCREEN_HEIGHT: usize = 32;
/// Default integer scaling factor for frontends.
pub const SCREEN_SCALE: u32 = 20;

pub const RAM_SIZE: usize = 4096;
pub const NUM_REGS: usize = 16;
pub const NUM_KEYS: usize = 16;
/// Maximum subroutine nesting depth.
pub const STACK_SIZE: usize = 12;

/// Programs are loaded here; everything below is reserved for the interpreter.
pub const START_ADDRESS: u16 = 0x200;
/// Largest ROM that fits between `START_ADDRESS` and the end of memory.
pub const MAX_ROM_SIZE: usize = RAM_SIZE - START_ADDRESS as usize;

/// Where the hex digit sprites live.
pub const FONT_BASE: u16 = 0x000;
/// Bytes per hex digit sprite.
pub const FONT_GLYPH_SIZE: usize = 5;
pub const FONTSET_SIZE: usize = 80;

pub const FONTSET: [u8; FONTSET_SIZE] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
