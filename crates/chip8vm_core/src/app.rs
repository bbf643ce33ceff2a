use chip8vm_common::app::App;
use chip8vm_common::color::Color;
use chip8vm_common::key::Key;
use typed_builder::TypedBuilder;

use crate::emulator::{Emulator, RunState};
use crate::{SCREEN_HEIGHT, SCREEN_SCALE, SCREEN_WIDTH};

/// Rendering side configuration. None of this is interpreter state.
#[derive(Clone, Debug, TypedBuilder)]
pub struct AppConfig {
    #[builder(default = Color::WHITE)]
    pub foreground: Color,
    #[builder(default = Color::from_rgba_u32(0xFFFF00FF))]
    pub background: Color,
    #[builder(default = SCREEN_SCALE)]
    pub scale: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Frontend-facing wrapper around the interpreter.
///
/// Maps logical keys onto the hex keypad, handles pause and quit, and
/// renders the framebuffer once per frame.
#[derive(Default)]
pub struct EmulatorApp {
    should_exit: bool,
    beeping: bool,
    fault_count: usize,
    config: AppConfig,
    pub emulator: Emulator,
}

impl EmulatorApp {
    pub fn new(emulator: Emulator, config: AppConfig) -> Self {
        Self {
            should_exit: false,
            beeping: false,
            fault_count: 0,
            config,
            emulator,
        }
    }

    /// Faults the interpreter raised so far. Each one was logged when raised.
    pub fn fault_count(&self) -> usize {
        self.fault_count
    }

    /// Whether a tone should currently be playing.
    pub fn is_beeping(&self) -> bool {
        self.beeping
    }

    fn update_tone(&mut self) {
        let wants_beep = self.emulator.wants_beep();
        if wants_beep != self.beeping {
            log::debug!("Tone {}", if wants_beep { "on" } else { "off" });
            self.beeping = wants_beep;
        }
    }

    fn render(&self, screen_state: &mut [u8]) {
        let display = self.emulator.get_display();
        for (pixel, rgb) in display.iter().zip(screen_state.chunks_exact_mut(3)) {
            let color = if *pixel {
                self.config.foreground
            } else {
                self.config.background
            };
            color.write_rgb24(rgb);
        }
    }
}

/// COSMAC VIP keypad on the left of a QWERTY keyboard:
///
/// ```text
/// 1 2 3 4      1 2 3 C
/// Q W E R  ->  4 5 6 D
/// A S D F      7 8 9 E
/// Z X C V      A 0 B F
/// ```
fn key2btn(key: Key) -> Option<usize> {
    match key {
        Key::Num1 => Some(0x1),
        Key::Num2 => Some(0x2),
        Key::Num3 => Some(0x3),
        Key::Num4 => Some(0xC),
        Key::Q => Some(0x4),
        Key::W => Some(0x5),
        Key::E => Some(0x6),
        Key::R => Some(0xD),
        Key::A => Some(0x7),
        Key::S => Some(0x8),
        Key::D => Some(0x9),
        Key::F => Some(0xE),
        Key::Z => Some(0xA),
        Key::X => Some(0x0),
        Key::C => Some(0xB),
        Key::V => Some(0xF),
        _ => None,
    }
}

impl App for EmulatorApp {
    fn init(&mut self) {
        log::info!("Chip8 init");
    }

    fn update(&mut self, screen_state: &mut [u8]) {
        self.emulator.tick();
        self.fault_count += self.emulator.take_faults().len();
        self.update_tone();
        self.render(screen_state);
    }

    fn handle_key_event(&mut self, key: Key, is_down: bool) {
        match key {
            Key::Escape if is_down => {
                self.emulator.quit();
                self.should_exit = true;
            }
            Key::Space if is_down => self.emulator.toggle_pause(),
            _ => {
                if let Some(btn) = key2btn(key) {
                    self.emulator.set_key(btn, is_down);
                }
            }
        }
    }

    fn should_exit(&self) -> bool {
        self.should_exit || self.emulator.state() == RunState::Quit
    }

    fn exit(&mut self) {
        if self.fault_count > 0 {
            log::warn!("{} faults raised during the session", self.fault_count);
        }
        log::info!("Chip8 exit");
    }

    fn width(&self) -> u32 {
        SCREEN_WIDTH as u32
    }

    fn height(&self) -> u32 {
        SCREEN_HEIGHT as u32
    }

    fn scale(&self) -> u32 {
        self.config.scale
    }

    fn title(&self) -> String {
        match self.emulator.rom_name() {
            Some(name) => format!("CHIP-8 - {}", name),
            None => "CHIP-8".to_string(),
        }
    }
}
