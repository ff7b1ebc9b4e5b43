use log::info;

use crate::config::SummaryConfig;
use crate::douglas_peucker::{summarize_par, summarize_with};
use crate::error::Result;
use crate::geometry::Point;
use crate::points_csv::read_points;
use crate::progress::LogProgress;

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRun {
    pub n_before: usize,
    pub summary: Vec<Point>,
}

impl SummaryRun {
    pub fn report(&self) -> String {
        format!("Amount of points before summarizing is {}, Amount of points after summarizing is {}",
            self.n_before, self.summary.len())
    }
}

/// Reads the path named by `config` and summarizes it.
pub fn summarize_file(config: &SummaryConfig, parallel: bool) -> Result<SummaryRun> {
    config.validate()?;

    let points = read_points(&config.utm_csv, &config.columns())?;
    let summary = if parallel {
        summarize_par(&points, config.tolerance_meters)?
    } else {
        summarize_with(&points, config.tolerance_meters, &mut LogProgress)?
    };

    info!("summarized {} points to {} at tolerance {}",
        points.len(), summary.len(), config.tolerance_meters);

    Ok(SummaryRun { n_before: points.len(), summary })
}
