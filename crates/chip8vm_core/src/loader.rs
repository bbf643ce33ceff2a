use crate::error::{Error, Result};
use crate::machine::Machine;
use crate::{FONTSET, FONTSET_SIZE, FONT_BASE, MAX_ROM_SIZE, START_ADDRESS};

/// Copy the hex digit sprites into the reserved area.
pub fn load_font(machine: &mut Machine) {
    let base = FONT_BASE as usize;
    machine.ram[base..base + FONTSET_SIZE].copy_from_slice(&FONTSET);
}

/// Copy `rom` to the program area and point the PC at it.
///
/// The size is checked before anything is written, so a rejected ROM leaves
/// `machine` untouched.
pub fn load_rom(machine: &mut Machine, rom: &[u8]) -> Result<()> {
    if rom.len() > MAX_ROM_SIZE {
        return Err(Error::RomTooLarge {
            size: rom.len(),
            max: MAX_ROM_SIZE,
        });
    }
    let start = START_ADDRESS as usize;
    let end = start + rom.len();
    machine.ram[start..end].copy_from_slice(rom);
    machine.pc = START_ADDRESS;
    Ok(())
}
