use std::path::PathBuf;

use pocketcore::RunConfig;

const USAGE: &str = "Usage: pocketcore <rom> [frames] [--trace <file>] [--dump <file>]";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let rom_path = args.next().map(PathBuf::from).unwrap_or_else(|| {
        eprintln!("{USAGE}");
        std::process::exit(2);
    });

    let mut frames = None;
    let mut trace_path = None;
    let mut dump_path = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--trace" => trace_path = args.next().map(PathBuf::from),
            "--dump" => dump_path = args.next().map(PathBuf::from),
            other => match other.parse::<u32>() {
                Ok(n) if frames.is_none() => frames = Some(n),
                _ => {
                    eprintln!("Unexpected argument '{other}'.\n{USAGE}");
                    std::process::exit(2);
                }
            },
        }
    }

    log::info!("Running ROM '{}'", rom_path.display());
    let config = RunConfig::builder()
        .rom_path(rom_path)
        .frames(frames.unwrap_or(60))
        .trace_path(trace_path)
        .dump_path(dump_path)
        .build();
    pocketcore::run(config)
}
