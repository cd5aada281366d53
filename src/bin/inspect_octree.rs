//! Baked octree inspection utility
//!
//! Loads an octree file and prints a summary of its shape.
//!
//! Usage:
//!     inspect_octree [OPTIONS] <FILE>
//!
//! Options:
//!     --json          Print statistics as JSON
//!     --dump          Print the full per-node text dump instead
//!     -h, --help      Show this help message

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use octbake::core::logging;
use octbake::format;
use octbake::octree::OctreeStats;

fn print_help() {
    eprintln!("inspect_octree - Baked octree inspection utility");
    eprintln!();
    eprintln!("Usage: inspect_octree [OPTIONS] <FILE>");
    eprintln!();
    eprintln!("Options:");
    eprintln!("    --json          Print statistics as JSON");
    eprintln!("    --dump          Print the full per-node text dump instead");
    eprintln!("    -h, --help      Show this help message");
    eprintln!();
    eprintln!("Example:");
    eprintln!("    inspect_octree data/scenes/level1Octree.txt");
    eprintln!("    inspect_octree --json data/scenes/level1Octree.txt");
}

#[derive(Debug)]
struct Args {
    file: PathBuf,
    json: bool,
    dump: bool,
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = env::args().skip(1).collect();

    if args.is_empty() {
        return Err("Missing octree file".to_string());
    }

    let mut json = false;
    let mut dump = false;
    let mut file: Option<PathBuf> = None;

    for arg in &args {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "--json" => json = true,
            "--dump" => dump = true,
            other if other.starts_with('-') => {
                return Err(format!("Unknown option: {}", other));
            }
            path => {
                if file.is_some() {
                    return Err("Multiple files specified".to_string());
                }
                file = Some(PathBuf::from(path));
            }
        }
    }

    if json && dump {
        return Err("--json and --dump are mutually exclusive".to_string());
    }

    let file = file.ok_or("Missing octree file")?;
    Ok(Args { file, json, dump })
}

fn run(args: &Args) -> octbake::core::types::Result<()> {
    let start = Instant::now();
    let tree = format::load_octree(&args.file)?;
    log::debug!("Loaded in {:.2}ms", start.elapsed().as_secs_f64() * 1000.0);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.dump {
        format::write_text_dump(&tree, &mut out)?;
    } else {
        let stats = OctreeStats::collect(&tree);
        if args.json {
            writeln!(out, "{}", stats.to_json()?)?;
        } else {
            writeln!(out, "{}", args.file.display())?;
            writeln!(out, "{}", stats)?;
            writeln!(out, "Encoded size:       {} bytes", format::encoded_len(&tree))?;
        }
    }

    out.flush()?;
    Ok(())
}

fn main() {
    logging::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_help();
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
