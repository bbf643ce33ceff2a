use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chip8vm_common::app::App;
use chip8vm_core::{Chip8Config, Emulator, EmulatorApp};
use typed_builder::TypedBuilder;

pub const FRAME_RATE_HZ: u32 = 60;
pub const DEFAULT_FRAMES: u64 = 600;

#[derive(TypedBuilder)]
pub struct HeadlessInitInfo {
    pub width: u32,
    pub height: u32,
    pub scale: u32,
    pub title: String,
    #[builder(default = DEFAULT_FRAMES)]
    pub frames: u64,
    /// Sleep between frames to hold the frame rate.
    #[builder(default = true)]
    pub pace: bool,
    /// Write the last frame here as a binary PPM.
    #[builder(default)]
    pub dump_path: Option<PathBuf>,
}

/// Drives an `App` frame by frame without a window.
pub struct HeadlessContext;

impl HeadlessContext {
    /// Returns the number of frames that ran.
    pub fn run(init_info: HeadlessInitInfo, mut app: impl App) -> Result<u64> {
        let HeadlessInitInfo {
            width,
            height,
            scale,
            title,
            frames,
            pace,
            dump_path,
        } = init_info;
        let frame_time = Duration::from_secs(1) / FRAME_RATE_HZ;
        let mut screen_state = vec![0u8; (width * 3 * height) as usize];

        log::info!("Running '{}' for up to {} frames", title, frames);
        app.init();
        let mut ran = 0;
        while ran < frames {
            if app.should_exit() {
                break;
            }
            let started = Instant::now();
            app.update(&mut screen_state);
            ran += 1;
            if pace {
                if let Some(rest) = frame_time.checked_sub(started.elapsed()) {
                    std::thread::sleep(rest);
                }
            }
        }
        app.exit();

        if let Some(path) = dump_path {
            write_ppm(&path, &screen_state, width, height, scale)
                .with_context(|| format!("Failed to write frame to '{}'", path.display()))?;
            log::info!("Wrote last frame to '{}'", path.display());
        }
        Ok(ran)
    }
}

/// Encode an RGB24 buffer as a binary PPM, each pixel blown up to a
/// `scale` x `scale` block.
pub fn encode_ppm(rgb: &[u8], width: u32, height: u32, scale: u32) -> Vec<u8> {
    let scale = scale.max(1) as usize;
    let (width, height) = (width as usize, height as usize);
    let mut out = format!("P6\n{} {}\n255\n", width * scale, height * scale).into_bytes();
    for row in rgb.chunks_exact(width * 3).take(height) {
        let mut line = Vec::with_capacity(row.len() * scale);
        for pixel in row.chunks_exact(3) {
            for _ in 0..scale {
                line.extend_from_slice(pixel);
            }
        }
        for _ in 0..scale {
            out.extend_from_slice(&line);
        }
    }
    out
}

fn write_ppm(path: &Path, rgb: &[u8], width: u32, height: u32, scale: u32) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&encode_ppm(rgb, width, height, scale))?;
    writer.flush()?;
    Ok(())
}

pub fn run_chip8(rom_path: &Path, frames: u64, dump_path: Option<PathBuf>) -> Result<()> {
    let mut emulator = Emulator::new(Chip8Config::default());
    emulator
        .load_file(rom_path)
        .with_context(|| format!("Failed to load ROM '{}'", rom_path.display()))?;

    let app = EmulatorApp::new(emulator, Default::default());
    let init_info = HeadlessInitInfo::builder()
        .width(app.width())
        .height(app.height())
        .scale(app.scale())
        .title(app.title())
        .frames(frames)
        .dump_path(dump_path)
        .build();
    let ran = HeadlessContext::run(init_info, app)?;
    log::info!("Ran {} frames", ran);
    Ok(())
}
