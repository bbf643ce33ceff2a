use std::ops::Range;

use crate::{NUM_KEYS, NUM_REGS, RAM_SIZE, SCREEN_HEIGHT, SCREEN_WIDTH, STACK_SIZE, START_ADDRESS};

/// Owned CHIP-8 machine state.
///
/// Mutated only by the loader, the executor and the tick driver. The keypad
/// is the one field an outside actor writes, and only between ticks.
#[derive(Clone, PartialEq, Eq)]
pub struct Machine {
    /// program counter
    pub(crate) pc: u16,
    pub(crate) ram: [u8; RAM_SIZE],
    /// display, row-major, origin top-left
    pub(crate) screen: [bool; SCREEN_WIDTH * SCREEN_HEIGHT],
    /// V registers, VF doubles as the flag output
    pub(crate) v_reg: [u8; NUM_REGS],
    /// I register
    pub(crate) i_reg: u16,
    pub(crate) stack_pointer: usize,
    pub(crate) stack: [u16; STACK_SIZE],
    pub(crate) keys: [bool; NUM_KEYS],
    pub(crate) delay_timer: u8,
    pub(crate) sound_timer: u8,
    /// Register a pending FX0A will store the key into.
    pub(crate) wait_key: Option<u8>,
}

impl Default for Machine {
    fn default() -> Self {
        Self {
            pc: START_ADDRESS,
            ram: [0; RAM_SIZE],
            screen: [false; SCREEN_WIDTH * SCREEN_HEIGHT],
            v_reg: [0; NUM_REGS],
            i_reg: 0,
            stack_pointer: 0,
            stack: [0; STACK_SIZE],
            keys: [false; NUM_KEYS],
            delay_timer: 0,
            sound_timer: 0,
            wait_key: None,
        }
    }
}

impl Machine {
    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn v(&self, idx: usize) -> u8 {
        self.v_reg[idx]
    }

    pub fn registers(&self) -> &[u8; NUM_REGS] {
        &self.v_reg
    }

    pub fn i(&self) -> u16 {
        self.i_reg
    }

    pub fn delay_timer(&self) -> u8 {
        self.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.sound_timer
    }

    pub fn stack_depth(&self) -> usize {
        self.stack_pointer
    }

    pub fn memory(&self) -> &[u8; RAM_SIZE] {
        &self.ram
    }

    pub fn display(&self) -> &[bool; SCREEN_WIDTH * SCREEN_HEIGHT] {
        &self.screen
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.screen[x + y * SCREEN_WIDTH]
    }

    pub fn is_key_pressed(&self, key: usize) -> bool {
        self.keys[key & 0xF]
    }

    pub fn is_waiting_for_key(&self) -> bool {
        self.wait_key.is_some()
    }

    /// Lowest-numbered key currently held down.
    pub fn first_pressed_key(&self) -> Option<u8> {
        self.keys.iter().position(|&k| k).map(|k| k as u8)
    }

    /// Push a return address. Returns `false` when the stack is full.
    pub(crate) fn push(&mut self, val: u16) -> bool {
        if self.stack_pointer >= STACK_SIZE {
            return false;
        }
        self.stack[self.stack_pointer] = val;
        self.stack_pointer += 1;
        true
    }

    pub(crate) fn pop(&mut self) -> Option<u16> {
        if self.stack_pointer == 0 {
            return None;
        }
        self.stack_pointer -= 1;
        Some(self.stack[self.stack_pointer])
    }

    pub(crate) fn tick_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }

    pub(crate) fn clear_screen(&mut self) {
        self.screen = [false; SCREEN_WIDTH * SCREEN_HEIGHT];
    }
}

/// Part of `[addr, addr + len)` that lies inside memory.
///
/// The returned range is shorter than `len` when the access runs past the end.
pub(crate) fn clamp_range(addr: usize, len: usize) -> Range<usize> {
    let start = addr.min(RAM_SIZE);
    let end = addr.saturating_add(len).min(RAM_SIZE);
    start..end
}
