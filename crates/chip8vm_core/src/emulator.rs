use std::collections::VecDeque;
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Chip8Config;
use crate::error::{Error, Result};
use crate::exec::{self, Flow};
use crate::machine::Machine;
use crate::opcode::Opcode;
use crate::{loader, NUM_KEYS, RAM_SIZE, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Faults kept for the host before the oldest are dropped. Every fault is
/// logged when raised regardless.
const MAX_PENDING_FAULTS: usize = 1024;

const ADDR_MASK: u16 = 0x0FFF;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
    /// Terminal.
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StepStatus {
    Executed,
    /// Parked on FX0A with no key down.
    WaitingForKey,
}

/// The interpreter: machine state plus the 60Hz tick driver.
pub struct Emulator {
    machine: Machine,
    state: RunState,
    config: Chip8Config,
    rng: StdRng,
    faults: VecDeque<Error>,
    rom: Option<Vec<u8>>,
    rom_name: Option<String>,
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new(Chip8Config::default())
    }
}

impl Emulator {
    /// A powered-on machine with the font loaded and nothing to run yet.
    /// It stays paused until a ROM is loaded.
    pub fn new(config: Chip8Config) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut machine = Machine::default();
        loader::load_font(&mut machine);
        Self {
            machine,
            state: RunState::Paused,
            config,
            rng,
            faults: VecDeque::new(),
            rom: None,
            rom_name: None,
        }
    }

    /// Power-on the machine with `rom` loaded at the program start.
    ///
    /// On failure the current machine is kept as it was.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<()> {
        let mut machine = Machine::default();
        loader::load_font(&mut machine);
        if let Err(err) = loader::load_rom(&mut machine, rom) {
            log::error!("{}", err);
            return Err(err);
        }
        self.machine = machine;
        self.rom = Some(rom.to_vec());
        self.rom_name = None;
        if self.state != RunState::Quit {
            self.state = RunState::Running;
        }
        log::info!("Loaded {} byte ROM", rom.len());
        Ok(())
    }

    /// Read a ROM from disk and load it.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let rom = std::fs::read(path).map_err(|source| {
            let err = Error::RomUnreadable {
                path: path.display().to_string(),
                source,
            };
            log::error!("{}", err);
            err
        })?;
        self.load_rom(&rom)?;
        self.rom_name = path.file_name().map(|name| name.to_string_lossy().into_owned());
        Ok(())
    }

    /// Back to power-on state, reloading the last ROM if there was one.
    pub fn reset(&mut self) {
        self.machine = Machine::default();
        loader::load_font(&mut self.machine);
        if let Some(rom) = &self.rom {
            // Already validated when it was first loaded.
            if loader::load_rom(&mut self.machine, rom).is_ok() && self.state != RunState::Quit {
                self.state = RunState::Running;
            }
        }
        self.faults.clear();
    }

    /// One video frame: a batch of instructions, then one timer decrement.
    /// Does nothing unless running.
    pub fn tick(&mut self) {
        if self.state != RunState::Running {
            return;
        }
        for _ in 0..self.config.cycles_per_frame {
            if self.step() == StepStatus::WaitingForKey {
                break;
            }
        }
        self.tick_timers();
    }

    pub fn tick_timers(&mut self) {
        self.machine.tick_timers();
    }

    /// Run a single instruction cycle, regardless of the run state.
    /// Hosts drive the machine through `tick`, which honors pause and quit.
    pub(crate) fn step(&mut self) -> StepStatus {
        if let Some(x) = self.machine.wait_key {
            return match self.machine.first_pressed_key() {
                Some(key) => {
                    self.machine.v_reg[x as usize] = key;
                    self.machine.wait_key = None;
                    StepStatus::Executed
                }
                None => StepStatus::WaitingForKey,
            };
        }

        let pc = self.machine.pc;
        let Some(word) = self.fetch_opcode(pc) else {
            self.report(Error::MemoryOutOfBounds {
                pc,
                addr: pc as usize,
                len: 2,
            });
            self.machine.pc = pc.wrapping_add(2) & ADDR_MASK;
            return StepStatus::Executed;
        };
        self.machine.pc = pc.wrapping_add(2) & ADDR_MASK;

        let op = Opcode::decode(word);
        log::trace!("{:#05x}: {:04X} {:?}", pc, word, op);

        match exec::execute(&mut self.machine, op, pc, &mut self.rng) {
            Ok(Flow::Next) => {}
            Ok(Flow::Skip) => self.machine.pc = self.machine.pc.wrapping_add(2) & ADDR_MASK,
            Ok(Flow::Jump(addr)) => self.machine.pc = addr & ADDR_MASK,
            Ok(Flow::Wait) => return StepStatus::WaitingForKey,
            Err(err) => self.report(err),
        }
        StepStatus::Executed
    }

    fn fetch_opcode(&self, pc: u16) -> Option<u16> {
        let pc = pc as usize;
        if pc + 1 >= RAM_SIZE {
            return None;
        }
        Some(u16::from_be_bytes([self.machine.ram[pc], self.machine.ram[pc + 1]]))
    }

    fn report(&mut self, err: Error) {
        log::warn!("{}", err);
        if self.faults.len() == MAX_PENDING_FAULTS {
            self.faults.pop_front();
        }
        self.faults.push_back(err);
    }

    /// Drain the faults raised since the last call.
    pub fn take_faults(&mut self) -> Vec<Error> {
        self.faults.drain(..).collect()
    }

    pub fn pause(&mut self) {
        if self.state == RunState::Running {
            self.state = RunState::Paused;
            log::info!("==== PAUSED ====");
        }
    }

    pub fn resume(&mut self) {
        if self.state == RunState::Paused {
            self.state = RunState::Running;
            log::info!("==== RUNNING ====");
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.state {
            RunState::Running => self.pause(),
            RunState::Paused => self.resume(),
            RunState::Quit => {}
        }
    }

    pub fn quit(&mut self) {
        self.state = RunState::Quit;
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Latch a keypad state. Takes effect at the next instruction that
    /// reads the keypad.
    pub fn set_key(&mut self, idx: usize, pressed: bool) {
        if idx >= NUM_KEYS {
            self.report(Error::InvalidKey(idx));
            return;
        }
        self.machine.keys[idx] = pressed;
    }

    pub fn get_display(&self) -> &[bool; SCREEN_WIDTH * SCREEN_HEIGHT] {
        self.machine.display()
    }

    /// Whether the audio side should be sounding a tone.
    pub fn wants_beep(&self) -> bool {
        self.machine.sound_timer > 0
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    pub fn rom_name(&self) -> Option<&str> {
        self.rom_name.as_deref()
    }

    #[cfg(test)]
    pub(crate) fn machine_mut(&mut self) -> &mut Machine {
        &mut self.machine
    }
}
