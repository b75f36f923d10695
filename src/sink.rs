//! Rendering sinks
//!
//! A sink draws a [`RenderPlan`] however it likes and owns its own refresh
//! cycle. The crate ships [`TextSink`], which writes a terminal summary of the
//! payload; graphical front ends implement [`RenderSink`] themselves.

use crate::errors::Result;
use crate::render::{RenderPayload, RenderPlan};
use crate::statistics::histogram;
use std::io::Write;

/// Width of the longest histogram bar in characters
const BAR_WIDTH: usize = 40;
/// Histogram bins are merged into this many text rows
const TEXT_BINS: usize = 20;
/// Leading values printed for series and points
const HEAD: usize = 5;

/// Capability that can draw a render plan
pub trait RenderSink {
    /// Draw `plan`, replacing whatever was drawn before
    ///
    /// # Errors
    ///
    /// Returns an error when the sink's output cannot be written.
    fn draw(&mut self, plan: &RenderPlan) -> Result<()>;
}

/// Writes a plain-text summary of each plan to `W`
#[derive(Debug)]
pub struct TextSink<W: Write> {
    out: W,
}

impl<W: Write> TextSink<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn head(values: &[f64]) -> String {
    let shown: Vec<String> = values.iter().take(HEAD).map(ToString::to_string).collect();
    if values.len() > HEAD {
        format!("[{}, ...]", shown.join(", "))
    } else {
        format!("[{}]", shown.join(", "))
    }
}

impl<W: Write> RenderSink for TextSink<W> {
    fn draw(&mut self, plan: &RenderPlan) -> Result<()> {
        let out = &mut self.out;
        writeln!(out, "{}", plan.title)?;
        writeln!(out, "{}", "=".repeat(plan.title.chars().count()))?;
        if let Some(note) = &plan.note {
            writeln!(out, "Note: {note}")?;
        }

        match &plan.payload {
            RenderPayload::Histogram { values, bins } => {
                let hist = histogram(values, *bins);
                writeln!(out, "{} values in {} bins", values.len(), bins)?;
                let group = bins.div_ceil(TEXT_BINS).max(1);
                let merged: Vec<(f64, usize)> = hist
                    .counts
                    .chunks(group)
                    .enumerate()
                    .map(|(i, chunk)| (hist.edges[i * group], chunk.iter().sum()))
                    .collect();
                let peak = merged.iter().map(|&(_, c)| c).max().unwrap_or(0).max(1);
                for (edge, count) in merged {
                    let bar = "#".repeat(count * BAR_WIDTH / peak);
                    writeln!(out, "{edge:>12.4} | {bar} {count}")?;
                }
            }
            RenderPayload::Series { values, label } => {
                let label = label.as_deref().unwrap_or("series");
                writeln!(out, "{label}: {} points {}", values.len(), head(values))?;
            }
            RenderPayload::MultiSeries(series) => {
                for s in series {
                    writeln!(out, "{}: {} points {}", s.label, s.values.len(), head(&s.values))?;
                }
            }
            RenderPayload::Image { matrix, colorbar } => {
                let (rows, cols) = matrix.dim();
                writeln!(
                    out,
                    "image {rows} x {cols}{}",
                    if *colorbar { " with colorbar" } else { "" }
                )?;
            }
            RenderPayload::Points {
                xs,
                ys,
                x_label,
                y_label,
            } => {
                writeln!(out, "{} points", xs.len())?;
                writeln!(out, "x ({}): {}", x_label.as_deref().unwrap_or("x"), head(xs))?;
                writeln!(out, "y ({}): {}", y_label.as_deref().unwrap_or("y"), head(ys))?;
            }
            RenderPayload::Diagnostic(message) => {
                writeln!(out, "{message}")?;
            }
        }

        if plan.sampled {
            writeln!(out, "(payload is a sample of the full array)")?;
        }
        out.flush()?;
        Ok(())
    }
}
