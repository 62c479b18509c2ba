use anyhow::Result;
use buildplan::io::write_model;
use buildplan::{BuildConfig, BuildOrchestrator, MemoryHost, OpeningType, RoofType};
use std::env;
use std::path::Path;

fn main() -> Result<()> {
    let mut host = MemoryHost::new()
        .with_level("Level 1", 0.0)
        .with_level("Level 2", 3.0)
        .with_opening_type(OpeningType::door("M_Single-Flush", "0915 x 2032mm", 0.915))
        .with_opening_type(OpeningType::window(
            "M_Window-Casement-Double",
            "1050 x 1350mm",
            1.05,
        ))
        .with_roof_type(RoofType::new("Basic Roof", "Cold Roof - Concrete", 0.2));

    let report = BuildOrchestrator::new(BuildConfig::new()).run(&mut host)?;
    println!("Built {report}");

    for opening in &host.snapshot().openings {
        println!("  {:?} at {:.2}", opening.kind, opening.location);
    }

    // Write the committed model next to the binary (or to the given path).
    let out = env::args().nth(1).unwrap_or_else(|| "house.json".to_string());
    write_model(Path::new(&out), host.snapshot())?;
    println!("Model written to {out}");
    Ok(())
}
