use std::fs;
use std::path::{Path, PathBuf};

use error_stack::{Report, ResultExt};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SummaryError};
use crate::points_csv::CoordColumns;

pub const DEFAULT_TOLERANCE_METERS: f64 = 10.0;

/// Settings for a summarization run. Every field is optional in the JSON
/// file; absent ones take the values from `Default`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Maximum perpendicular deviation, in the units of the coordinates.
    pub tolerance_meters: f64,
    /// Delimited file holding the path, one point per row.
    pub utm_csv: PathBuf,
    pub x_column: String,
    pub y_column: String,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        let columns = CoordColumns::default();
        SummaryConfig {
            tolerance_meters: DEFAULT_TOLERANCE_METERS,
            utm_csv: PathBuf::from("utm.csv"),
            x_column: columns.x,
            y_column: columns.y,
        }
    }
}

impl SummaryConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: SummaryConfig = serde_json::from_str(s)
            .change_context(SummaryError::Config)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .change_context(SummaryError::Io)
            .attach_printable_lazy(|| format!("could not read {}", path.display()))?;
        Self::from_json_str(&contents)
            .attach_printable_lazy(|| format!("in {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if !self.tolerance_meters.is_finite() || self.tolerance_meters < 0.0 {
            return Err(Report::new(SummaryError::InvalidInput)
                .attach_printable(format!("tolerance_meters must be finite and >= 0, got {}",
                    self.tolerance_meters)));
        }
        Ok(())
    }

    pub fn columns(&self) -> CoordColumns {
        CoordColumns {
            x: self.x_column.clone(),
            y: self.y_column.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config = SummaryConfig::from_json_str(r#"{"tolerance_meters": 2.5}"#).unwrap();
        assert_eq!(config.tolerance_meters, 2.5);
        assert_eq!(config.utm_csv, PathBuf::from("utm.csv"));
        assert_eq!(config.columns(), CoordColumns::default());
    }

    #[test]
    fn test_negative_tolerance_rejected() {
        let err = SummaryConfig::from_json_str(r#"{"tolerance_meters": -1.0}"#).unwrap_err();
        assert_eq!(*err.current_context(), SummaryError::InvalidInput);
    }

    #[test]
    fn test_bad_json() {
        let err = SummaryConfig::from_json_str("{tolerance_meters: }").unwrap_err();
        assert_eq!(*err.current_context(), SummaryError::Config);
    }

    #[test]
    fn test_from_json_file() {
        let config = SummaryConfig::from_json_file("tests/fixtures/summary_config.json").unwrap();
        assert_eq!(config.tolerance_meters, 5.0);
        assert_eq!(config.utm_csv, PathBuf::from("tests/fixtures/utm_path.csv"));
        assert_eq!(config.x_column, "Easting");
    }
}
