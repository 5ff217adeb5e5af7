use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use typed_builder::TypedBuilder;

use pocketcore_gb::machine::{DOTS_PER_FRAME, DOTS_PER_MCYCLE};
use pocketcore_gb::{GameBoy, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Gray level for each shade index, lightest first.
const PGM_PALETTE: [u8; 4] = [0xFF, 0xAA, 0x55, 0x00];

#[derive(TypedBuilder, Debug, Clone)]
pub struct RunConfig {
    pub rom_path: PathBuf,
    #[builder(default = 60)]
    pub frames: u32,
    /// Write one diagnostic line per executed instruction here.
    #[builder(default)]
    pub trace_path: Option<PathBuf>,
    /// Write the last frame here as a binary PGM image.
    #[builder(default)]
    pub dump_path: Option<PathBuf>,
}

/// Load the cartridge, run the requested number of frames and report.
///
/// Serial output is printed even when emulation stops on an error, since
/// test ROMs often report their failure over serial right before that.
pub fn run(config: RunConfig) -> Result<()> {
    let mut gb = GameBoy::new();
    let header = gb
        .load_rom_file(&config.rom_path)
        .with_context(|| format!("failed to load '{}'", config.rom_path.display()))?;
    println!(
        "Loaded '{}' ({}, {} KiB ROM, {} KiB RAM)",
        header.title,
        header.cartridge_type.name(),
        header.rom_size / 1024,
        header.ram_size / 1024
    );

    let outcome = match &config.trace_path {
        Some(path) => run_traced(&mut gb, config.frames, path),
        None => run_frames(&mut gb, config.frames),
    };

    let serial = gb.serial_output();
    if !serial.is_empty() {
        println!("Serial output:\n{}", String::from_utf8_lossy(serial));
    }
    outcome?;

    if let Some(path) = &config.dump_path {
        write_pgm(path, gb.frame_buffer())
            .with_context(|| format!("failed to write '{}'", path.display()))?;
        println!("Wrote {}x{} PGM to '{}'", SCREEN_WIDTH, SCREEN_HEIGHT, path.display());
    }

    println!("Ran {} frames", gb.frame_count());
    Ok(())
}

fn run_frames(gb: &mut GameBoy, frames: u32) -> Result<()> {
    for frame in 0..frames {
        gb.run_frame()
            .with_context(|| format!("emulation stopped during frame {frame}"))?;
    }
    Ok(())
}

/// Same pacing as [`GameBoy::run_frame`], one trace line per step.
fn run_traced(gb: &mut GameBoy, frames: u32, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create '{}'", path.display()))?;
    let mut out = BufWriter::new(file);

    for frame in 0..frames {
        let start = gb.frame_count();
        let mut dots = 0;
        while gb.frame_count() == start && dots < DOTS_PER_FRAME {
            writeln!(out, "{}", gb.trace_line())?;
            let cycles = gb
                .step()
                .with_context(|| format!("emulation stopped during frame {frame}"))?;
            dots += cycles * DOTS_PER_MCYCLE;
        }
    }
    out.flush()?;
    log::info!("trace written to '{}'", path.display());
    Ok(())
}

/// Binary PGM (P5), one gray byte per pixel.
fn write_pgm(path: &Path, frame: &[u8]) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write!(out, "P5\n{SCREEN_WIDTH} {SCREEN_HEIGHT}\n255\n")?;
    let pixels: Vec<u8> = frame.iter().map(|&shade| PGM_PALETTE[(shade & 0x03) as usize]).collect();
    out.write_all(&pixels)?;
    out.flush()?;
    Ok(())
}
