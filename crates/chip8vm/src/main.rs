use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chip8vm::DEFAULT_FRAMES;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(rom_path) = args.next() else {
        bail!(
            "No ROM path provided.\n\
             Usage: chip8vm <rom> [frames] [dump.ppm]"
        );
    };
    let frames = match args.next() {
        Some(frames) => frames
            .parse()
            .with_context(|| format!("Invalid frame count '{}'", frames))?,
        None => DEFAULT_FRAMES,
    };
    let dump_path = args.next().map(PathBuf::from);

    log::info!("Playing ROM path: '{}'", rom_path);
    chip8vm::run_chip8(&PathBuf::from(rom_path), frames, dump_path)
}
