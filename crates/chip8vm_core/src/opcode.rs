/// A decoded CHIP-8 instruction.
///
/// `x`/`y` are register indices, `nn` an 8-bit immediate, `n` a 4-bit
/// immediate and `addr` a 12-bit address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Opcode {
    /// 00E0
    Cls,
    /// 00EE
    Ret,
    /// 1NNN
    Jp { addr: u16 },
    /// 2NNN
    Call { addr: u16 },
    /// 3XNN
    SeByte { x: usize, nn: u8 },
    /// 4XNN
    SneByte { x: usize, nn: u8 },
    /// 5XY0
    SeReg { x: usize, y: usize },
    /// 6XNN
    LdByte { x: usize, nn: u8 },
    /// 7XNN
    AddByte { x: usize, nn: u8 },
    /// 8XY0
    LdReg { x: usize, y: usize },
    /// 8XY1
    Or { x: usize, y: usize },
    /// 8XY2
    And { x: usize, y: usize },
    /// 8XY3
    Xor { x: usize, y: usize },
    /// 8XY4
    AddReg { x: usize, y: usize },
    /// 8XY5
    Sub { x: usize, y: usize },
    /// 8XY6
    Shr { x: usize },
    /// 8XY7
    Subn { x: usize, y: usize },
    /// 8XYE
    Shl { x: usize },
    /// 9XY0
    SneReg { x: usize, y: usize },
    /// ANNN
    LdI { addr: u16 },
    /// BNNN
    JpV0 { addr: u16 },
    /// CXNN
    Rnd { x: usize, nn: u8 },
    /// DXYN
    Drw { x: usize, y: usize, n: u8 },
    /// EX9E
    Skp { x: usize },
    /// EXA1
    Sknp { x: usize },
    /// FX07
    LdRegDt { x: usize },
    /// FX0A
    LdKey { x: usize },
    /// FX15
    LdDtReg { x: usize },
    /// FX18
    LdSt { x: usize },
    /// FX1E
    AddI { x: usize },
    /// FX29
    LdF { x: usize },
    /// FX33
    LdB { x: usize },
    /// FX55
    StoreRegs { x: usize },
    /// FX65
    LoadRegs { x: usize },
    /// Any word with no mapping, including `0NNN` machine-code calls.
    Unknown(u16),
}

impl Opcode {
    /// Decode a big-endian instruction word. Never fails; unmapped words
    /// come back as `Opcode::Unknown`.
    pub fn decode(op: u16) -> Opcode {
        let digit1 = (op & 0xF000) >> 12;
        let digit2 = (op & 0x0F00) >> 8;
        let digit3 = (op & 0x00F0) >> 4;
        let digit4 = op & 0x000F;

        let x = digit2 as usize;
        let y = digit3 as usize;
        let n = digit4 as u8;
        let nn = (op & 0x00FF) as u8;
        let addr = op & 0x0FFF;

        match (digit1, digit2, digit3, digit4) {
            (0x0, 0x0, 0xE, 0x0) => Opcode::Cls,
            (0x0, 0x0, 0xE, 0xE) => Opcode::Ret,
            (0x1, _, _, _) => Opcode::Jp { addr },
            (0x2, _, _, _) => Opcode::Call { addr },
            (0x3, _, _, _) => Opcode::SeByte { x, nn },
            (0x4, _, _, _) => Opcode::SneByte { x, nn },
            (0x5, _, _, 0x0) => Opcode::SeReg { x, y },
            (0x6, _, _, _) => Opcode::LdByte { x, nn },
            (0x7, _, _, _) => Opcode::AddByte { x, nn },
            (0x8, _, _, 0x0) => Opcode::LdReg { x, y },
            (0x8, _, _, 0x1) => Opcode::Or { x, y },
            (0x8, _, _, 0x2) => Opcode::And { x, y },
            (0x8, _, _, 0x3) => Opcode::Xor { x, y },
            (0x8, _, _, 0x4) => Opcode::AddReg { x, y },
            (0x8, _, _, 0x5) => Opcode::Sub { x, y },
            (0x8, _, _, 0x6) => Opcode::Shr { x },
            (0x8, _, _, 0x7) => Opcode::Subn { x, y },
            (0x8, _, _, 0xE) => Opcode::Shl { x },
            (0x9, _, _, 0x0) => Opcode::SneReg { x, y },
            (0xA, _, _, _) => Opcode::LdI { addr },
            (0xB, _, _, _) => Opcode::JpV0 { addr },
            (0xC, _, _, _) => Opcode::Rnd { x, nn },
            (0xD, _, _, _) => Opcode::Drw { x, y, n },
            (0xE, _, 0x9, 0xE) => Opcode::Skp { x },
            (0xE, _, 0xA, 0x1) => Opcode::Sknp { x },
            (0xF, _, 0x0, 0x7) => Opcode::LdRegDt { x },
            (0xF, _, 0x0, 0xA) => Opcode::LdKey { x },
            (0xF, _, 0x1, 0x5) => Opcode::LdDtReg { x },
            (0xF, _, 0x1, 0x8) => Opcode::LdSt { x },
            (0xF, _, 0x1, 0xE) => Opcode::AddI { x },
            (0xF, _, 0x2, 0x9) => Opcode::LdF { x },
            (0xF, _, 0x3, 0x3) => Opcode::LdB { x },
            (0xF, _, 0x5, 0x5) => Opcode::StoreRegs { x },
            (0xF, _, 0x6, 0x5) => Opcode::LoadRegs { x },
            (_, _, _, _) => Opcode::Unknown(op),
        }
    }
}
