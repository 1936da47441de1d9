//! `[miller]` config table and command-line overrides.
//!
//! Every key is optional on both layers; flags win over the file. The file is
//! only read when the flags leave a required key open, and a key still
//! missing after the merge is a `MissingParameter` error.

use anyhow::{Context, Result};
use miller::{MillerError, MillerResult, ShapeParams};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Default config path.
pub const DEFAULT_CONFIG: &str = "input.toml";

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    miller: MillerTable,
}

/// Partially specified shape parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct MillerTable {
    #[serde(rename = "A")]
    pub aspect_ratio: Option<f64>,
    pub kappa: Option<f64>,
    pub delta: Option<f64>,
    #[serde(rename = "R0")]
    pub major_radius: Option<f64>,
}

/// Which keys a command needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Need {
    /// All four keys.
    Shape,
    /// A, kappa and R0; delta is supplied by the sweep.
    SweepBase,
}

impl MillerTable {
    /// `self` with unset keys filled from `fallback`.
    pub fn or(self, fallback: MillerTable) -> MillerTable {
        MillerTable {
            aspect_ratio: self.aspect_ratio.or(fallback.aspect_ratio),
            kappa: self.kappa.or(fallback.kappa),
            delta: self.delta.or(fallback.delta),
            major_radius: self.major_radius.or(fallback.major_radius),
        }
    }

    fn covers(&self, need: Need) -> bool {
        self.aspect_ratio.is_some()
            && self.kappa.is_some()
            && self.major_radius.is_some()
            && (need == Need::SweepBase || self.delta.is_some())
    }

    /// Build validated shape parameters; for `SweepBase` delta defaults to 0.
    pub fn resolve(&self, need: Need) -> MillerResult<ShapeParams> {
        let aspect_ratio = self
            .aspect_ratio
            .ok_or(MillerError::MissingParameter("A"))?;
        let kappa = self.kappa.ok_or(MillerError::MissingParameter("kappa"))?;
        let major_radius = self
            .major_radius
            .ok_or(MillerError::MissingParameter("R0"))?;
        let delta = match need {
            Need::Shape => self.delta.ok_or(MillerError::MissingParameter("delta"))?,
            Need::SweepBase => self.delta.unwrap_or(0.0),
        };
        let shape = ShapeParams::new(aspect_ratio, kappa, delta, major_radius);
        shape.validate()?;
        Ok(shape)
    }
}

/// Parse the `[miller]` table out of a TOML document.
pub fn parse(text: &str) -> Result<MillerTable, toml::de::Error> {
    toml::from_str::<ConfigFile>(text).map(|doc| doc.miller)
}

/// Read and parse a config file; errors name the path.
pub fn load(path: &Path) -> Result<MillerTable> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    parse(&text).with_context(|| format!("parsing config {}", path.display()))
}

/// Merge flags over the config file and resolve what `need` asks for.
pub fn resolve_shape(path: &Path, flags: MillerTable, need: Need) -> Result<ShapeParams> {
    let merged = if flags.covers(need) {
        tracing::debug!(config = %path.display(), "all parameters given on the command line");
        flags
    } else {
        flags.or(load(path)?)
    };
    merged
        .resolve(need)
        .with_context(|| format!("resolving shape parameters (config {})", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const SAMPLE: &str = r#"
[miller]
A = 2.2
kappa = 1.5
delta = 0.3
R0 = 3
"#;

    #[test]
    fn parses_table_and_integer_floats() {
        let t = parse(SAMPLE).unwrap();
        assert_eq!(t.aspect_ratio, Some(2.2));
        assert_eq!(t.kappa, Some(1.5));
        assert_eq!(t.delta, Some(0.3));
        assert_eq!(t.major_radius, Some(3.0));
    }

    #[test]
    fn flags_override_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("input.toml");
        fs::write(&path, SAMPLE).unwrap();
        let flags = MillerTable {
            delta: Some(-0.5),
            ..MillerTable::default()
        };
        let shape = resolve_shape(&path, flags, Need::Shape).unwrap();
        assert_eq!(shape, ShapeParams::new(2.2, 1.5, -0.5, 3.0));
    }

    #[test]
    fn missing_key_reports_name() {
        let table = parse("[miller]\nA = 2.2\nR0 = 2.5\ndelta = 0.1\n").unwrap();
        let err = table.resolve(Need::Shape).unwrap_err();
        assert_eq!(err, MillerError::MissingParameter("kappa"));
    }

    #[test]
    fn sweep_base_does_not_need_delta() {
        let table = parse("[miller]\nA = 2.2\nkappa = 1.5\nR0 = 2.5\n").unwrap();
        let base = table.resolve(Need::SweepBase).unwrap();
        assert_eq!(base.triangularity, 0.0);
        assert!(table.resolve(Need::Shape).is_err());
    }

    #[test]
    fn missing_file_error_names_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let err = resolve_shape(&path, MillerTable::default(), Need::Shape).unwrap_err();
        assert!(format!("{err:#}").contains("nope.toml"));
    }

    #[test]
    fn complete_flags_skip_file() {
        let flags = MillerTable {
            aspect_ratio: Some(2.2),
            kappa: Some(1.5),
            delta: Some(0.3),
            major_radius: Some(2.5),
        };
        let shape = resolve_shape(Path::new("/definitely/not/here.toml"), flags, Need::Shape).unwrap();
        assert_eq!(shape, ShapeParams::new(2.2, 1.5, 0.3, 2.5));
    }

    #[test]
    fn out_of_domain_config_rejected() {
        let table = parse("[miller]\nA = 2.2\nkappa = 1.5\ndelta = 1.5\nR0 = 2.5\n").unwrap();
        let err = table.resolve(Need::Shape).unwrap_err();
        assert!(err.is_domain());
    }

    #[test]
    fn malformed_file_error_names_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[miller\nA = ").unwrap();
        let err = load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("bad.toml"));
    }
}
