//! Startup configuration from the command line and environment.

use std::path::PathBuf;

use clap::Parser;

use crate::data::model::SiteSelection;

pub const DEFAULT_DATA_FILE: &str = "spacex_launch_dash.csv";
pub const DATA_ENV: &str = "LAUNCH_DASH_DATA";
pub const WINDOW_ENV: &str = "LAUNCH_DASH_WINDOW";
pub const SITE_ENV: &str = "LAUNCH_DASH_SITE";

/// Dashboard configuration. Flags win over the environment, which wins over defaults.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "launch-dash")]
#[command(about = "Launch records dashboard: success rates by site and payload")]
pub struct DashConfig {
    /// Launch table to load at startup (.csv, .json or .parquet)
    #[arg(env = DATA_ENV, default_value = DEFAULT_DATA_FILE)]
    pub data_path: PathBuf,

    /// Initial window size in logical pixels, as WIDTHxHEIGHT
    #[arg(long = "window", env = WINDOW_ENV, default_value = "1200x800", value_parser = parse_window_size)]
    pub window_size: [f32; 2],

    /// Site selected when the dashboard opens (ALL or a launch site name)
    #[arg(long = "site", env = SITE_ENV, default_value = "ALL", value_parser = parse_site)]
    pub initial_site: SiteSelection,
}

fn parse_window_size(s: &str) -> Result<[f32; 2], String> {
    let malformed = || format!("expected WIDTHxHEIGHT with positive sizes, got '{s}'");
    let (w, h) = s
        .split_once(|c: char| c.eq_ignore_ascii_case(&'x'))
        .ok_or_else(malformed)?;
    let w: f32 = w.trim().parse().map_err(|_| malformed())?;
    let h: f32 = h.trim().parse().map_err(|_| malformed())?;
    if w > 0.0 && h > 0.0 {
        Ok([w, h])
    } else {
        Err(malformed())
    }
}

fn parse_site(s: &str) -> Result<SiteSelection, String> {
    match s.trim() {
        "" => Err("site must not be empty".to_string()),
        site => Ok(SiteSelection::from_value(site)),
    }
}
