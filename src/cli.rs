//! Defines command-line interface options using `clap` for the npzvis application.

use clap::Parser;
use npz_vis::{AxisSelector, PlotKind};
use std::path::PathBuf;

/// A CLI tool for inspecting NumPy .npz archives
#[derive(Parser, Debug)]
#[command(
    version,
    name = "npzvis",
    about = "Inspect, plot, page through and export the arrays of an .npz file"
)]
pub struct Args {
    /// Path to the .npz archive
    #[arg(short, long, required_unless_present = "create_demo")]
    pub file: Option<PathBuf>,

    /// List the arrays in the archive with their shapes and types
    #[arg(long)]
    pub list: bool,

    /// Array to describe, plot, page or export
    #[arg(short, long)]
    pub array: Option<String>,

    /// Plan a plot of the selected array: histogram, line, heatmap or scatter
    #[arg(long, value_parser = parse_plot_arg)]
    pub plot: Option<PlotKind>,

    /// Scatter x axis: a column index, or index / value / flattened
    #[arg(short = 'x', long, value_parser = parse_axis_arg)]
    pub x_axis: Option<AxisSelector>,

    /// Scatter y axis: a column index, or index / value / flattened
    #[arg(short = 'y', long, value_parser = parse_axis_arg)]
    pub y_axis: Option<AxisSelector>,

    /// Show one 50-row table page; out-of-range numbers are clamped
    #[arg(long, allow_negative_numbers = true)]
    pub page: Option<i64>,

    /// Export the full selected array to this CSV file
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Print descriptions, axis advice and table pages as JSON
    #[arg(long)]
    pub json: bool,

    /// Write a synthetic demo archive to this path
    #[arg(long)]
    pub create_demo: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Number of threads to use for statistics. Defaults to number of CPU cores.
    #[arg(short = 't', long)]
    pub threads: Option<usize>,
}

fn parse_plot_arg(s: &str) -> Result<PlotKind, String> {
    s.parse()
}

fn parse_axis_arg(s: &str) -> Result<AxisSelector, String> {
    if s.trim().is_empty() {
        return Err("Axis selector cannot be empty".to_string());
    }
    Ok(AxisSelector::parse(s))
}
