//! Model snapshot I/O.
//!
//! Snapshots are stored as JSON. The format preserves UIDs, so references
//! between walls, openings, roofs and parameters stay intact across a
//! write/read cycle.

use crate::host::memory::ModelSnapshot;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Writes a model snapshot to a JSON file.
///
/// # Arguments
/// * `path` - Path to the output file
/// * `model` - The snapshot to serialize
///
/// # Example
/// ```no_run
/// use buildplan::MemoryHost;
/// use buildplan::io::write_model;
/// use std::path::Path;
///
/// let host = MemoryHost::new().with_level("Level 1", 0.0);
/// write_model(Path::new("model.json"), host.snapshot()).unwrap();
/// ```
pub fn write_model(path: &Path, model: &ModelSnapshot) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, model)
        .with_context(|| format!("Failed to serialize model to: {}", path.display()))?;

    Ok(())
}

/// Reads a model snapshot from a JSON file.
///
/// # Example
/// ```no_run
/// use buildplan::io::read_model;
/// use std::path::Path;
///
/// let model = read_model(Path::new("model.json")).unwrap();
/// println!("{} walls", model.walls.len());
/// ```
pub fn read_model(path: &Path) -> Result<ModelSnapshot> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;
    let reader = BufReader::new(file);

    let model: ModelSnapshot = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to deserialize model from: {}", path.display()))?;

    Ok(model)
}

/// Serializes a model snapshot to a JSON string.
pub fn to_model_string(model: &ModelSnapshot) -> Result<String> {
    serde_json::to_string_pretty(model).context("Failed to serialize model to string")
}

/// Deserializes a model snapshot from a JSON string.
pub fn from_model_string(json: &str) -> Result<ModelSnapshot> {
    serde_json::from_str(json).context("Failed to deserialize model from string")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{BuildConfig, BuildOrchestrator};
    use crate::host::memory::MemoryHost;
    use crate::model::{OpeningType, RoofType};
    use tempfile::tempdir;

    fn built_house() -> MemoryHost {
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
        BuildOrchestrator::new(BuildConfig::new())
            .run(&mut host)
            .unwrap();
        host
    }

    #[test]
    fn test_write_and_read_model() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("house.json");

        let host = built_house();
        write_model(&path, host.snapshot())?;
        let loaded = read_model(&path)?;

        assert_eq!(&loaded, host.snapshot());
        Ok(())
    }

    #[test]
    fn test_model_string_roundtrip() -> Result<()> {
        let host = built_house();
        let json = to_model_string(host.snapshot())?;
        assert!(json.contains("\"walls\":"));

        let loaded = from_model_string(&json)?;
        assert_eq!(loaded.walls.len(), 4);
        assert_eq!(loaded.openings.len(), 4);
        Ok(())
    }

    #[test]
    fn test_read_nonexistent_file() {
        let result = read_model(Path::new("/nonexistent/path/model.json"));
        assert!(result.is_err());
    }
}
