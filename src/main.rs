use fieldreport::{ReportEngine, ReportError, ReportSnapshot};
use std::env;
use std::fs;

/// A simple CLI that renders a service report from a JSON snapshot.
fn main() -> Result<(), ReportError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 || args.len() > 4 {
        eprintln!("Renders a field analysis / service report PDF from a JSON snapshot.");
        eprintln!();
        eprintln!(
            "Usage: {} <path/to/snapshot.json> <output-dir> [logo-dir]",
            args.first().map(String::as_str).unwrap_or("fieldreport")
        );
        std::process::exit(1);
    }

    let snapshot_path = &args[1];
    let output_dir = &args[2];

    log::info!("Loading snapshot from {}", snapshot_path);
    let json = fs::read_to_string(snapshot_path)?;
    let snapshot = ReportSnapshot::from_json(&json)?;

    let mut builder = ReportEngine::builder();
    if let Some(logo_dir) = args.get(3) {
        builder = builder.with_logo_dir(logo_dir);
    }
    let engine = builder.build();

    let path = engine.save_to_file(&snapshot, output_dir)?;
    println!("Successfully generated {}", path.display());
    Ok(())
}
