use std::{error, fmt, io};

pub type Result<T> = std::result::Result<T, Error>;

/// Everything the interpreter can report.
///
/// Load errors are returned to the caller. Runtime, decode and input faults
/// never abort the machine: the offending instruction is clamped or skipped
/// and the fault is queued for the host (see `Emulator::take_faults`).
#[derive(Debug)]
pub enum Error {
    // Load
    RomTooLarge { size: usize, max: usize },
    RomUnreadable { path: String, source: io::Error },

    // Runtime, `pc` is the address of the faulting instruction
    StackOverflow { pc: u16 },
    StackUnderflow { pc: u16 },
    MemoryOutOfBounds { pc: u16, addr: usize, len: usize },

    // Decode
    UnknownOpcode { pc: u16, opcode: u16 },

    // Input
    InvalidKey(usize),
}

impl Error {
    /// Whether this error prevents the machine from starting at all.
    pub fn is_load_error(&self) -> bool {
        matches!(self, Error::RomTooLarge { .. } | Error::RomUnreadable { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::RomTooLarge { size, max } => {
                write!(f, "ROM is too big: {} bytes (max {} bytes)", size, max)
            }
            Error::RomUnreadable { path, source } => {
                write!(f, "Could not read ROM '{}': {}", path, source)
            }
            Error::StackOverflow { pc } => write!(f, "Stack overflow at {:#05x}", pc),
            Error::StackUnderflow { pc } => write!(f, "Stack underflow at {:#05x}", pc),
            Error::MemoryOutOfBounds { pc, addr, len } => write!(
                f,
                "Memory access out of bounds at {:#05x}: {} bytes from {:#x}",
                pc, len, addr
            ),
            Error::UnknownOpcode { pc, opcode } => {
                write!(f, "Unknown opcode {:04X} at {:#05x}", opcode, pc)
            }
            Error::InvalidKey(idx) => write!(f, "Invalid key index: {}", idx),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::RomUnreadable { source, .. } => Some(source),
            _ => None,
        }
    }
}
