//! Plot payload planning
//!
//! [`plan`] turns an array, a plot kind and the two scatter selectors into a
//! bounded [`RenderPayload`] plus a title. Oversized inputs are sampled or
//! downsampled so that no payload exceeds its cap:
//!
//! | kind      | cap                                   |
//! |-----------|---------------------------------------|
//! | histogram | 1,000,000 values (random, no repeats) |
//! | heatmap   | 1000 × 1000 cells                     |
//! | scatter   | 10,000 points (random, no repeats)    |
//!
//! Planning never fails. An out-of-range or non-numeric column selector falls
//! back to a flattened scatter with a [`RenderNote`], and any other failure is
//! turned into a [`RenderPayload::Diagnostic`] carrying the error text.

use crate::archive::{format_shape, Layout, NamedArray};
use crate::dimensions::AxisSelector;
use crate::errors::{NpzVisError, Result};
use crate::sampling::{evenly_spaced, sample_indices, square_side};
use ndarray::{Array2, Axis, Ix2};
use rand::Rng;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

pub const HISTOGRAM_BINS: usize = 100;
pub const HISTOGRAM_SAMPLE_CAP: usize = 1_000_000;
pub const HEATMAP_MAX_SIDE: usize = 1000;
pub const HEATMAP_ELEMENT_CAP: usize = 1_000_000;
pub const SCATTER_SAMPLE_CAP: usize = 10_000;
/// Matrices whose smaller side is at most this draw one line per row/column
pub const LINE_MAX_SERIES: usize = 10;

/// Supported plot kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotKind {
    #[default]
    Histogram,
    Line,
    Heatmap,
    Scatter,
}

impl PlotKind {
    pub const ALL: [Self; 4] = [Self::Histogram, Self::Line, Self::Heatmap, Self::Scatter];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Histogram => "histogram",
            Self::Line => "line",
            Self::Heatmap => "heatmap",
            Self::Scatter => "scatter",
        }
    }

    /// Title stem used after the array name
    const fn title(self) -> &'static str {
        match self {
            Self::Histogram => "Histogram",
            Self::Line => "Line Plot",
            Self::Heatmap => "Heatmap",
            Self::Scatter => "Scatter Plot",
        }
    }
}

impl fmt::Display for PlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlotKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!("Invalid plot type '{s}': expected histogram, line, heatmap or scatter")
            })
    }
}

/// One labeled line of a multi-series plot
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledSeries {
    pub label: String,
    pub values: Vec<f64>,
}

/// What the rendering sink is asked to draw
#[derive(Debug, Clone, PartialEq)]
pub enum RenderPayload {
    /// Values to bin into `bins` equal-width bins
    Histogram { values: Vec<f64>, bins: usize },
    Series {
        values: Vec<f64>,
        label: Option<String>,
    },
    MultiSeries(Vec<LabeledSeries>),
    /// Scalar field drawn as an image
    Image { matrix: Array2<f64>, colorbar: bool },
    Points {
        xs: Vec<f64>,
        ys: Vec<f64>,
        x_label: Option<String>,
        y_label: Option<String>,
    },
    /// Error text drawn in place of a plot
    Diagnostic(String),
}

impl RenderPayload {
    /// Number of data values the payload carries (points count once)
    #[must_use]
    pub fn element_count(&self) -> usize {
        match self {
            Self::Histogram { values, .. } | Self::Series { values, .. } => values.len(),
            Self::MultiSeries(series) => series.iter().map(|s| s.values.len()).sum(),
            Self::Image { matrix, .. } => matrix.len(),
            Self::Points { xs, .. } => xs.len(),
            Self::Diagnostic(_) => 0,
        }
    }

    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Histogram { .. } => "histogram",
            Self::Series { .. } => "series",
            Self::MultiSeries(_) => "multi-series",
            Self::Image { .. } => "image",
            Self::Points { .. } => "points",
            Self::Diagnostic(_) => "diagnostic",
        }
    }
}

/// A payload with its title and how it was reduced
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPlan {
    pub title: String,
    pub payload: RenderPayload,
    /// Set when the payload holds a subset of the array
    pub sampled: bool,
    /// Diagnostic explaining a fallback, if one happened
    pub note: Option<String>,
}

/// Why a requested view was replaced by its fallback
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RenderNote {
    pub message: String,
}

/// Plans a render with the thread-local generator
#[must_use]
pub fn plan(
    array: &NamedArray,
    kind: PlotKind,
    x: &AxisSelector,
    y: &AxisSelector,
) -> RenderPlan {
    plan_with_rng(array, kind, x, y, &mut rand::thread_rng())
}

/// Plans a render drawing samples from `rng`
pub fn plan_with_rng<R: Rng + ?Sized>(
    array: &NamedArray,
    kind: PlotKind,
    x: &AxisSelector,
    y: &AxisSelector,
    rng: &mut R,
) -> RenderPlan {
    let planned = match kind {
        PlotKind::Histogram => Ok(histogram(array, rng)),
        PlotKind::Line => line(array),
        PlotKind::Heatmap => heatmap(array),
        PlotKind::Scatter => scatter(array, x, y, rng),
    };

    planned.unwrap_or_else(|e| {
        warn!(array = array.name(), %kind, error = %e, "render failed");
        RenderPlan {
            title: format!("{} {}", array.name(), kind.title()),
            payload: RenderPayload::Diagnostic(format!("Error plotting: {e}")),
            sampled: false,
            note: None,
        }
    })
}

fn titled(array: &NamedArray, kind: PlotKind, suffix: Option<&str>) -> String {
    match suffix {
        Some(suffix) => format!("{} {} ({suffix})", array.name(), kind.title()),
        None => format!("{} {}", array.name(), kind.title()),
    }
}

fn histogram<R: Rng + ?Sized>(array: &NamedArray, rng: &mut R) -> RenderPlan {
    let flat = array.data().flat_values();
    let sampled = flat.len() > HISTOGRAM_SAMPLE_CAP;
    let values = if sampled {
        debug!(len = flat.len(), "sampling histogram input");
        sample_indices(rng, flat.len(), HISTOGRAM_SAMPLE_CAP)
            .into_iter()
            .map(|i| flat[i])
            .collect()
    } else {
        flat.into_owned()
    };

    RenderPlan {
        title: titled(array, PlotKind::Histogram, sampled.then_some("Sampled")),
        payload: RenderPayload::Histogram {
            values,
            bins: HISTOGRAM_BINS,
        },
        sampled,
        note: None,
    }
}

fn line(array: &NamedArray) -> Result<RenderPlan> {
    let (payload, suffix) = match array.layout() {
        Layout::Vector { .. } => (
            RenderPayload::Series {
                values: array.data().flat_values().into_owned(),
                label: None,
            },
            None,
        ),
        Layout::Matrix { rows, cols } if rows.min(cols) <= LINE_MAX_SERIES => {
            let values = array.data().values();
            let matrix = values.view().into_dimensionality::<Ix2>()?;
            // iterate along whichever side is shorter; ties go to rows
            let (axis, count, name) = if rows <= cols {
                (Axis(0), rows, "Row")
            } else {
                (Axis(1), cols, "Column")
            };
            let series = (0..count.min(LINE_MAX_SERIES))
                .map(|i| LabeledSeries {
                    label: format!("{name} {i}"),
                    values: matrix.index_axis(axis, i).to_vec(),
                })
                .collect();
            (RenderPayload::MultiSeries(series), None)
        }
        Layout::Matrix { .. } | Layout::Flattened { .. } => (
            RenderPayload::Series {
                values: array.data().flat_values().into_owned(),
                label: None,
            },
            Some("Flattened"),
        ),
    };

    Ok(RenderPlan {
        title: titled(array, PlotKind::Line, suffix),
        payload,
        sampled: false,
        note: None,
    })
}

fn heatmap(array: &NamedArray) -> Result<RenderPlan> {
    let (matrix, colorbar, sampled, suffix) = match array.layout() {
        Layout::Vector { len } => {
            let flat = array.data().flat_values();
            let sampled = len > HEATMAP_ELEMENT_CAP;
            let column: Vec<f64> = if sampled {
                evenly_spaced(len, HEATMAP_ELEMENT_CAP)
                    .into_iter()
                    .map(|i| flat[i])
                    .collect()
            } else {
                flat.into_owned()
            };
            let rows = column.len();
            let matrix = Array2::from_shape_vec((rows, 1), column)?;
            (matrix, false, sampled, sampled.then_some("Sampled"))
        }
        Layout::Matrix { rows, cols } => {
            let values = array.data().values();
            let view = values.view().into_dimensionality::<Ix2>()?;
            if rows > HEATMAP_MAX_SIDE || cols > HEATMAP_MAX_SIDE {
                let row_indices = evenly_spaced(rows, HEATMAP_MAX_SIDE);
                let col_indices = evenly_spaced(cols, HEATMAP_MAX_SIDE);
                debug!(rows, cols, "downsampling heatmap");
                let matrix = view
                    .select(Axis(0), &row_indices)
                    .select(Axis(1), &col_indices);
                (matrix, true, true, Some("Sampled"))
            } else {
                (view.to_owned(), true, false, None)
            }
        }
        Layout::Flattened { len } => {
            let flat = array.data().flat_values();
            let kept = len.min(HEATMAP_ELEMENT_CAP);
            let side = square_side(kept);
            let matrix = Array2::from_shape_vec((side, side), flat[..side * side].to_vec())?;
            (matrix, true, len > HEATMAP_ELEMENT_CAP, Some("Reshaped"))
        }
    };

    if matrix.is_empty() {
        return Err(NpzVisError::Render(format!(
            "cannot draw an empty heatmap (shape {})",
            format_shape(array.shape())
        )));
    }

    Ok(RenderPlan {
        title: titled(array, PlotKind::Heatmap, suffix),
        payload: RenderPayload::Image { matrix, colorbar },
        sampled,
        note: None,
    })
}

/// Resolves both selectors to in-range columns of a `cols`-wide matrix
fn matrix_columns(
    x: &AxisSelector,
    y: &AxisSelector,
    shape: &[usize],
    cols: usize,
) -> std::result::Result<(usize, usize), RenderNote> {
    match (x.column(), y.column()) {
        (Some(xc), Some(yc)) if xc < cols && yc < cols => Ok((xc, yc)),
        (Some(xc), Some(yc)) => Err(RenderNote {
            message: format!(
                "Invalid indices: x={xc}, y={yc} for shape {}",
                format_shape(shape)
            ),
        }),
        _ => Err(RenderNote {
            message: format!("Column selectors must be integers, got x='{x}', y='{y}'"),
        }),
    }
}

#[allow(clippy::cast_precision_loss)]
fn position(i: usize) -> f64 {
    i as f64
}

/// `(sequence position, value)` over the flattening, sampled above the cap
fn flattened_points<R: Rng + ?Sized>(array: &NamedArray, rng: &mut R) -> (RenderPayload, bool) {
    let flat = array.data().flat_values();
    let sampled = flat.len() > SCATTER_SAMPLE_CAP;
    let ys: Vec<f64> = if sampled {
        sample_indices(rng, flat.len(), SCATTER_SAMPLE_CAP)
            .into_iter()
            .map(|i| flat[i])
            .collect()
    } else {
        flat.into_owned()
    };
    let xs = (0..ys.len()).map(position).collect();

    (
        RenderPayload::Points {
            xs,
            ys,
            x_label: None,
            y_label: None,
        },
        sampled,
    )
}

fn scatter<R: Rng + ?Sized>(
    array: &NamedArray,
    x: &AxisSelector,
    y: &AxisSelector,
    rng: &mut R,
) -> Result<RenderPlan> {
    match array.layout() {
        Layout::Vector { len } => {
            let flat = array.data().flat_values();
            let sampled = len > SCATTER_SAMPLE_CAP;
            let indices: Vec<usize> = if sampled {
                sample_indices(rng, len, SCATTER_SAMPLE_CAP)
            } else {
                (0..len).collect()
            };
            let positions: Vec<f64> = indices.iter().map(|&i| position(i)).collect();
            let values: Vec<f64> = indices.iter().map(|&i| flat[i]).collect();
            let (xs, ys) = match (x, y) {
                (AxisSelector::Value, AxisSelector::Index) => (values, positions),
                _ => (positions, values),
            };

            Ok(RenderPlan {
                title: titled(array, PlotKind::Scatter, sampled.then_some("Sampled")),
                payload: RenderPayload::Points {
                    xs,
                    ys,
                    x_label: None,
                    y_label: None,
                },
                sampled,
                note: None,
            })
        }
        Layout::Matrix { rows, cols } => match matrix_columns(x, y, array.shape(), cols) {
            Ok((xc, yc)) => {
                let values = array.data().values();
                let matrix = values.view().into_dimensionality::<Ix2>()?;
                let sampled = rows > SCATTER_SAMPLE_CAP;
                let row_indices: Vec<usize> = if sampled {
                    sample_indices(rng, rows, SCATTER_SAMPLE_CAP)
                } else {
                    (0..rows).collect()
                };
                let xs = row_indices.iter().map(|&r| matrix[[r, xc]]).collect();
                let ys = row_indices.iter().map(|&r| matrix[[r, yc]]).collect();
                let detail = if sampled {
                    format!("Dim {xc} vs {yc}, Sampled")
                } else {
                    format!("Dim {xc} vs {yc}")
                };

                Ok(RenderPlan {
                    title: format!("{} Scatter ({detail})", array.name()),
                    payload: RenderPayload::Points {
                        xs,
                        ys,
                        x_label: Some(format!("Dimension {xc}")),
                        y_label: Some(format!("Dimension {yc}")),
                    },
                    sampled,
                    note: None,
                })
            }
            Err(note) => {
                warn!(array = array.name(), %note, "falling back to flattened scatter");
                let (payload, sampled) = flattened_points(array, rng);
                Ok(RenderPlan {
                    title: titled(
                        array,
                        PlotKind::Scatter,
                        Some(if sampled {
                            "Flattened, Sampled"
                        } else {
                            "Flattened"
                        }),
                    ),
                    payload,
                    sampled,
                    note: Some(note.message),
                })
            }
        },
        Layout::Flattened { .. } => {
            let (payload, sampled) = flattened_points(array, rng);
            Ok(RenderPlan {
                title: titled(
                    array,
                    PlotKind::Scatter,
                    Some(if sampled { "Sampled" } else { "Flattened" }),
                ),
                payload,
                sampled,
                note: None,
            })
        }
    }
}
