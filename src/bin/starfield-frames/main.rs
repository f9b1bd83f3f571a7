// starfield-frames - Render the starfield offline to PNG frames
//
// Drives the same render loop as the browser, with an in-memory surface
// and a host that hands out frames on demand.
//
// Usage: cargo run --bin starfield-frames -- <out-dir> [--width N] [--height N]
//        [--frames N] [--stars N] [--step F] [--seed N]

mod host;

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use starfield_engine::raster::Raster;
use starfield_engine::{Animator, Config, StarfieldError};

use host::OfflineHost;

struct Args {
    out: PathBuf,
    width: u32,
    height: u32,
    frames: u32,
    cfg: Config,
}

fn parse_args(args: &[String]) -> Option<Args> {
    let out = PathBuf::from(args.get(1)?);
    let mut parsed = Args {
        out,
        width: 640,
        height: 360,
        frames: 60,
        cfg: Config::default(),
    };

    let mut i = 2;
    while i < args.len() {
        let val = args.get(i + 1);
        match args[i].as_str() {
            "--width" => parsed.width = val?.parse().ok()?,
            "--height" => parsed.height = val?.parse().ok()?,
            "--frames" => parsed.frames = val?.parse().ok()?,
            "--stars" => parsed.cfg.stars = val?.parse().ok()?,
            "--step" => parsed.cfg.depth_step = val?.parse().ok()?,
            "--seed" => parsed.cfg.seed = val?.parse().ok()?,
            _ => return None,
        }
        i += 2;
    }

    Some(parsed)
}

fn run(args: Args) -> Result<(), StarfieldError> {
    let mut host = OfflineHost::new(args.width, args.height);
    let mut anim = Animator::new(Raster::new(args.width, args.height), args.cfg)?;

    anim.start(&mut host)?;
    for n in 0..args.frames {
        host.fire()?;
        anim.frame(&mut host)?;
        let path = frame_path(&args.out, n);
        anim.surface().save_png(&path)?;
    }
    anim.stop(&mut host);

    Ok(())
}

fn frame_path(dir: &Path, n: u32) -> PathBuf {
    dir.join(format!("frame_{:04}.png", n))
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let Some(parsed) = parse_args(&args) else {
        eprintln!(
            "Usage: {} <out-dir> [--width N] [--height N] [--frames N] [--stars N] [--step F] [--seed N]",
            args.first().map_or("starfield-frames", String::as_str)
        );
        process::exit(1);
    };

    if let Err(e) = fs::create_dir_all(&parsed.out) {
        eprintln!("Cannot create {}: {}", parsed.out.display(), e);
        process::exit(1);
    }

    println!(
        "Rendering {} frames ({}x{}, {} stars) to {}...",
        parsed.frames,
        parsed.width,
        parsed.height,
        parsed.cfg.stars,
        parsed.out.display()
    );

    if let Err(e) = run(parsed) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    println!("Done!");
}
