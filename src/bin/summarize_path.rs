extern crate clap;

use std::path::PathBuf;

use clap::Parser;
use error_stack::ResultExt;
use rayon::ThreadPoolBuilder;

use path_summary::config::SummaryConfig;
use path_summary::error::{Result, SummaryError};
use path_summary::output::{write_summary_csv, write_summary_geojson};
use path_summary::run::summarize_file;

#[derive(Parser)]
#[clap(version, about = "Summarize a UTM path with the Ramer-Douglas-Peucker algorithm")]
struct Opts {
    /// CSV file with the path (overrides `utm_csv` from the config)
    path_csv: Option<PathBuf>,

    /// JSON configuration file
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Maximum deviation in meters (overrides `tolerance_meters`)
    #[clap(short, long)]
    tolerance: Option<f64>,

    /// Column holding the x coordinate
    #[clap(long)]
    x_column: Option<String>,

    /// Column holding the y coordinate
    #[clap(long)]
    y_column: Option<String>,

    /// Number of CPU threads
    #[clap(short, long, default_value = "4")]
    ncpu: usize,

    /// Split the recursion across threads
    #[clap(short, long, default_value = "false")]
    parallel: bool,

    /// Write the summary as CSV
    #[clap(long)]
    out_csv: Option<PathBuf>,

    /// Write the summary as a GeoJSON LineString
    #[clap(long)]
    out_geojson: Option<PathBuf>,

    /// CRS name recorded in the GeoJSON output, e.g. urn:ogc:def:crs:EPSG::32611
    #[clap(long)]
    crs: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opts: Opts = Opts::parse();

    ThreadPoolBuilder::new()
        .num_threads(opts.ncpu)
        .build_global()
        .change_context(SummaryError::Config)?;

    let mut config = match &opts.config {
        Some(path) => SummaryConfig::from_json_file(path)?,
        None => SummaryConfig::default(),
    };
    if let Some(path) = opts.path_csv { config.utm_csv = path; }
    if let Some(tolerance) = opts.tolerance { config.tolerance_meters = tolerance; }
    if let Some(x) = opts.x_column { config.x_column = x; }
    if let Some(y) = opts.y_column { config.y_column = y; }

    let run = summarize_file(&config, opts.parallel)?;
    println!("{}", run.report());

    if let Some(path) = &opts.out_csv {
        write_summary_csv(path, &run.summary)?;
    }
    if let Some(path) = &opts.out_geojson {
        write_summary_geojson(path, &run.summary, opts.crs.as_deref())?;
    }

    Ok(())
}
