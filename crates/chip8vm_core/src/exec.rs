use rand::Rng;

use crate::error::{Error, Result};
use crate::machine::{clamp_range, Machine};
use crate::opcode::Opcode;
use crate::{FONT_BASE, FONT_GLYPH_SIZE, SCREEN_HEIGHT, SCREEN_WIDTH};

/// How the program counter moves after an instruction.
///
/// By the time an instruction executes the PC already points past it, so
/// `Next` leaves it alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Next,
    /// Skip the following instruction.
    Skip,
    Jump(u16),
    /// FX0A is parked until a key goes down.
    Wait,
}

fn skip_if(cond: bool) -> Flow {
    if cond {
        Flow::Skip
    } else {
        Flow::Next
    }
}

/// Apply one decoded instruction to `m`.
///
/// `pc` is the address the instruction was fetched from, used for fault
/// reports. An `Err` is a recoverable fault: whatever part of the operation
/// was in bounds has been applied and the caller advances as for `Next`.
pub fn execute<R: Rng>(m: &mut Machine, op: Opcode, pc: u16, rng: &mut R) -> Result<Flow> {
    let flow = match op {
        // 00E0 - CLS
        Opcode::Cls => {
            m.clear_screen();
            Flow::Next
        }
        // 00EE - RET
        Opcode::Ret => match m.pop() {
            Some(ret) => Flow::Jump(ret),
            None => return Err(Error::StackUnderflow { pc }),
        },
        // 1NNN - JP addr
        Opcode::Jp { addr } => Flow::Jump(addr),
        // 2NNN - CALL addr, the return address is the already advanced PC
        Opcode::Call { addr } => {
            if !m.push(m.pc) {
                return Err(Error::StackOverflow { pc });
            }
            Flow::Jump(addr)
        }
        // 3XNN / 4XNN
        Opcode::SeByte { x, nn } => skip_if(m.v_reg[x] == nn),
        Opcode::SneByte { x, nn } => skip_if(m.v_reg[x] != nn),
        // 5XY0 / 9XY0
        Opcode::SeReg { x, y } => skip_if(m.v_reg[x] == m.v_reg[y]),
        Opcode::SneReg { x, y } => skip_if(m.v_reg[x] != m.v_reg[y]),
        // 6XNN - LD Vx, NN
        Opcode::LdByte { x, nn } => {
            m.v_reg[x] = nn;
            Flow::Next
        }
        // 7XNN - ADD Vx, NN, no carry flag
        Opcode::AddByte { x, nn } => {
            m.v_reg[x] = m.v_reg[x].wrapping_add(nn);
            Flow::Next
        }
        Opcode::LdReg { .. }
        | Opcode::Or { .. }
        | Opcode::And { .. }
        | Opcode::Xor { .. }
        | Opcode::AddReg { .. }
        | Opcode::Sub { .. }
        | Opcode::Shr { .. }
        | Opcode::Subn { .. }
        | Opcode::Shl { .. } => {
            alu(m, op);
            Flow::Next
        }
        // ANNN - LD I, addr
        Opcode::LdI { addr } => {
            m.i_reg = addr;
            Flow::Next
        }
        // BNNN - JP V0, addr
        Opcode::JpV0 { addr } => Flow::Jump(addr + m.v_reg[0] as u16),
        // CXNN - RND Vx, NN
        Opcode::Rnd { x, nn } => {
            m.v_reg[x] = rng.gen::<u8>() & nn;
            Flow::Next
        }
        // DXYN - DRW Vx, Vy, N
        Opcode::Drw { x, y, n } => {
            draw(m, x, y, n, pc)?;
            Flow::Next
        }
        // EX9E / EXA1
        Opcode::Skp { x } => skip_if(m.is_key_pressed(m.v_reg[x] as usize)),
        Opcode::Sknp { x } => skip_if(!m.is_key_pressed(m.v_reg[x] as usize)),
        // FX07 - LD Vx, DT
        Opcode::LdRegDt { x } => {
            m.v_reg[x] = m.delay_timer;
            Flow::Next
        }
        // FX0A - LD Vx, K
        Opcode::LdKey { x } => match m.first_pressed_key() {
            Some(key) => {
                m.v_reg[x] = key;
                Flow::Next
            }
            None => {
                m.wait_key = Some(x as u8);
                Flow::Wait
            }
        },
        // FX15 - LD DT, Vx
        Opcode::LdDtReg { x } => {
            m.delay_timer = m.v_reg[x];
            Flow::Next
        }
        // FX18 - LD ST, Vx
        Opcode::LdSt { x } => {
            m.sound_timer = m.v_reg[x];
            Flow::Next
        }
        // FX1E - ADD I, Vx
        Opcode::AddI { x } => {
            m.i_reg = m.i_reg.wrapping_add(m.v_reg[x] as u16);
            Flow::Next
        }
        // FX29 - LD F, Vx
        Opcode::LdF { x } => {
            let digit = (m.v_reg[x] & 0x0F) as u16;
            m.i_reg = FONT_BASE + digit * FONT_GLYPH_SIZE as u16;
            Flow::Next
        }
        // FX33 - LD B, Vx
        Opcode::LdB { x } => {
            let val = m.v_reg[x];
            let digits = [val / 100, (val / 10) % 10, val % 10];
            let addr = m.i_reg as usize;
            let range = clamp_range(addr, digits.len());
            let written = range.len();
            m.ram[range].copy_from_slice(&digits[..written]);
            if written < digits.len() {
                return Err(Error::MemoryOutOfBounds { pc, addr, len: digits.len() });
            }
            Flow::Next
        }
        // FX55 - LD [I], Vx
        Opcode::StoreRegs { x } => {
            let addr = m.i_reg as usize;
            let range = clamp_range(addr, x + 1);
            let count = range.len();
            m.ram[range].copy_from_slice(&m.v_reg[..count]);
            if count < x + 1 {
                return Err(Error::MemoryOutOfBounds { pc, addr, len: x + 1 });
            }
            Flow::Next
        }
        // FX65 - LD Vx, [I]
        Opcode::LoadRegs { x } => {
            let addr = m.i_reg as usize;
            let range = clamp_range(addr, x + 1);
            let count = range.len();
            m.v_reg[..count].copy_from_slice(&m.ram[range]);
            if count < x + 1 {
                return Err(Error::MemoryOutOfBounds { pc, addr, len: x + 1 });
            }
            Flow::Next
        }
        Opcode::Unknown(opcode) => return Err(Error::UnknownOpcode { pc, opcode }),
    };
    Ok(flow)
}

/// 8XYN register-register operations. VF is written after VX, so when X is F
/// the flag wins.
fn alu(m: &mut Machine, op: Opcode) {
    let v = &mut m.v_reg;
    match op {
        // 8XY0 - LD Vx, Vy
        Opcode::LdReg { x, y } => v[x] = v[y],
        // 8XY1 - OR Vx, Vy
        Opcode::Or { x, y } => v[x] |= v[y],
        // 8XY2 - AND Vx, Vy
        Opcode::And { x, y } => v[x] &= v[y],
        // 8XY3 - XOR Vx, Vy
        Opcode::Xor { x, y } => v[x] ^= v[y],
        // 8XY4 - ADD Vx, Vy, VF = carry
        Opcode::AddReg { x, y } => {
            let (val, carry) = v[x].overflowing_add(v[y]);
            v[x] = val;
            v[0xF] = carry as u8;
        }
        // 8XY5 - SUB Vx, Vy, VF = !borrow
        Opcode::Sub { x, y } => {
            let (val, borrow) = v[x].overflowing_sub(v[y]);
            v[x] = val;
            v[0xF] = !borrow as u8;
        }
        // 8XY6 - SHR Vx, VF = lsb
        Opcode::Shr { x } => {
            let lsb = v[x] & 0x1;
            v[x] >>= 1;
            v[0xF] = lsb;
        }
        // 8XY7 - SUBN Vx, Vy, VF = !borrow
        Opcode::Subn { x, y } => {
            let (val, borrow) = v[y].overflowing_sub(v[x]);
            v[x] = val;
            v[0xF] = !borrow as u8;
        }
        // 8XYE - SHL Vx, VF = msb
        Opcode::Shl { x } => {
            let msb = (v[x] & 0x80) >> 7;
            v[x] <<= 1;
            v[0xF] = msb;
        }
        _ => unreachable!("not an ALU opcode: {:?}", op),
    }
}

/// XOR an 8xN sprite from memory[I] onto the screen.
///
/// The start position wraps, the sprite itself is clipped at the right and
/// bottom edges. Rows that would be read past the end of memory are dropped.
fn draw(m: &mut Machine, x: usize, y: usize, height: u8, pc: u16) -> Result<()> {
    let x_coord = m.v_reg[x] as usize % SCREEN_WIDTH;
    let y_coord = m.v_reg[y] as usize % SCREEN_HEIGHT;
    let addr = m.i_reg as usize;
    let range = clamp_range(addr, height as usize);
    let rows = range.len();

    let mut collision = false;
    for (row, &pixels) in m.ram[range].iter().enumerate() {
        let py = y_coord + row;
        if py >= SCREEN_HEIGHT {
            break;
        }
        for col in 0..8 {
            let px = x_coord + col;
            if px >= SCREEN_WIDTH {
                break;
            }
            if (pixels >> (7 - col)) & 0x1 == 0 {
                continue;
            }
            let screen_pixel = &mut m.screen[px + py * SCREEN_WIDTH];
            collision |= *screen_pixel;
            *screen_pixel = !*screen_pixel;
        }
    }
    m.v_reg[0xF] = collision as u8;

    if rows < height as usize {
        return Err(Error::MemoryOutOfBounds { pc, addr, len: height as usize });
    }
    Ok(())
}
