//! npz_vis: inspection, plot planning, paging and export for `.npz` archives
//!
//! A Rust library for looking at the named arrays inside a NumPy `.npz` file.
//! Given any one array, of any rank and size, it produces the info-panel
//! summary, a bounded payload for each plot kind, stable 50-row table pages and
//! a complete CSV export, all consistent with one another.
//!
//! ## Key Features
//!
//! - **Archive loading**: every `.npy` member in file order, integer / float / bool dtypes
//! - **Statistics**: min, max, mean and standard deviation with parallel scans
//! - **Plot planning**: histogram, line, heatmap and scatter payloads with hard size caps
//! - **Paged tables**: clamped 50-row pages, 20 visible matrix columns
//! - **CSV export**: the full array, every column
//!
//! ## Module Organization
//!
//! - [`archive`]: archive loading and the array model
//! - [`metadata`]: array description and preview
//! - [`dimensions`]: scatter axis advice
//! - [`render`]: plot payload planning
//! - [`sink`]: rendering sinks
//! - [`table`]: paged tabular view
//! - [`export`]: CSV export
//! - [`session`]: explicit viewer state tying the above together
//! - [`statistics`]: summary statistics and histogram counting
//! - [`parallel`]: parallel processing configuration
//! - [`errors`]: centralized error handling
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use npz_vis::prelude::*;
//!
//! let mut session = Session::new();
//! session.open("data.npz").unwrap();
//! session.select("temperature").unwrap();
//!
//! println!("{}", session.describe().unwrap());
//!
//! let plan = session.plan_render(PlotKind::Heatmap, None, None).unwrap();
//! TextSink::new(std::io::stdout()).draw(&plan).unwrap();
//!
//! let page = session.page(3).unwrap();
//! println!("{page}");
//!
//! session.export("temperature.csv").unwrap();
//! ```

pub mod archive;
pub mod demo;
pub mod dimensions;
pub mod errors;
pub mod export;
pub mod metadata;
pub mod parallel;
pub mod render;
pub mod sampling;
pub mod session;
pub mod sink;
pub mod statistics;
pub mod table;

pub use archive::{format_shape, write_npz, Archive, ArrayData, ElementKind, Layout, NamedArray};
pub use dimensions::{advise, AxisSelector, DimensionAdvice};
pub use errors::{NpzVisError, Result};
pub use export::{export_csv, write_csv};
pub use metadata::{describe, ArrayDescription, Preview};
pub use render::{plan, plan_with_rng, PlotKind, RenderNote, RenderPayload, RenderPlan};
pub use session::Session;
pub use table::{TablePage, TablePager, TableRow};

// High-level convenience API
pub mod prelude {
    //! Commonly used imports for convenience
    pub use crate::archive::{Archive, ArrayData, NamedArray};
    pub use crate::dimensions::AxisSelector;
    pub use crate::errors::{NpzVisError, Result};
    pub use crate::parallel::ParallelConfig;
    pub use crate::render::{PlotKind, RenderPayload, RenderPlan};
    pub use crate::session::Session;
    pub use crate::sink::{RenderSink, TextSink};
}
