//! Explicit viewer state
//!
//! A [`Session`] holds what the shell would otherwise keep as globals: the
//! loaded archive, the selected array, the plot kind, the scatter selectors and
//! the table page. Every component call reads the session instead of ambient
//! state. View failures (plot, page, export) never touch the archive or the
//! selection, and a failed load keeps the previous archive.

use crate::archive::{Archive, NamedArray};
use crate::dimensions::{advise, AxisSelector, DimensionAdvice};
use crate::errors::{NpzVisError, Result};
use crate::export::export_csv;
use crate::metadata::{describe, ArrayDescription};
use crate::render::{plan, PlotKind, RenderPlan};
use crate::table::{TablePage, TablePager};
use std::path::Path;
use tracing::debug;

/// Open table-view state for the selected array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TableState {
    page: usize,
    total_pages: usize,
}

/// Viewer state for one archive at a time
#[derive(Debug, Clone)]
pub struct Session {
    archive: Option<Archive>,
    selected: Option<String>,
    plot_kind: PlotKind,
    x_axis: AxisSelector,
    y_axis: AxisSelector,
    table: Option<TableState>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            archive: None,
            selected: None,
            plot_kind: PlotKind::Histogram,
            x_axis: AxisSelector::Column(0),
            y_axis: AxisSelector::Column(1),
            table: None,
        }
    }

    /// Loads an archive from disk, replacing the current one only on success
    ///
    /// # Errors
    ///
    /// Returns [`NpzVisError::Load`]; the previous archive and selection are kept.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<&Archive> {
        let archive = Archive::open(path)?;
        Ok(self.replace_archive(archive))
    }

    /// Installs an already decoded archive, dropping all view state
    pub fn replace_archive(&mut self, archive: Archive) -> &Archive {
        self.selected = None;
        self.table = None;
        self.archive.insert(archive)
    }

    #[must_use]
    pub const fn archive(&self) -> Option<&Archive> {
        self.archive.as_ref()
    }

    /// Array names in file order; empty when nothing is loaded
    #[must_use]
    pub fn list_names(&self) -> Vec<&str> {
        self.archive
            .as_ref()
            .map(|a| a.names().collect())
            .unwrap_or_default()
    }

    /// Makes `name` the active array
    ///
    /// # Errors
    ///
    /// Returns [`NpzVisError::NoArchive`] or [`NpzVisError::ArrayNotFound`]; the
    /// previous selection is kept.
    pub fn select(&mut self, name: &str) -> Result<&NamedArray> {
        let archive = self.archive.as_ref().ok_or(NpzVisError::NoArchive)?;
        let array = archive.get(name)?;
        self.selected = Some(name.to_string());
        self.table = None;
        if self.plot_kind == PlotKind::Scatter {
            let advice = advise(array);
            self.x_axis = advice.default_x;
            self.y_axis = advice.default_y;
        }
        debug!(array = name, "selected array");
        Ok(array)
    }

    /// The active array
    ///
    /// # Errors
    ///
    /// Returns [`NpzVisError::NoArchive`] or [`NpzVisError::NoSelection`].
    pub fn current(&self) -> Result<&NamedArray> {
        let archive = self.archive.as_ref().ok_or(NpzVisError::NoArchive)?;
        let name = self.selected.as_deref().ok_or(NpzVisError::NoSelection)?;
        archive.get(name)
    }

    /// Info-panel description of the active array
    ///
    /// # Errors
    ///
    /// Fails only when no array is selected.
    pub fn describe(&self) -> Result<ArrayDescription> {
        self.current().map(describe)
    }

    /// Scatter axis options for the active array
    ///
    /// # Errors
    ///
    /// Fails only when no array is selected.
    pub fn advise_dimensions(&self) -> Result<DimensionAdvice> {
        self.current().map(advise)
    }

    #[must_use]
    pub const fn plot_kind(&self) -> PlotKind {
        self.plot_kind
    }

    #[must_use]
    pub fn axes(&self) -> (&AxisSelector, &AxisSelector) {
        (&self.x_axis, &self.y_axis)
    }

    /// Switches plot kind; switching to scatter re-derives the selectors
    pub fn set_plot_kind(&mut self, kind: PlotKind) {
        if kind == PlotKind::Scatter && self.plot_kind != PlotKind::Scatter {
            if let Ok(advice) = self.advise_dimensions() {
                self.x_axis = advice.default_x;
                self.y_axis = advice.default_y;
            }
        }
        self.plot_kind = kind;
    }

    /// Sets the scatter selectors as typed by the user
    pub fn set_axes(&mut self, x: AxisSelector, y: AxisSelector) {
        self.x_axis = x;
        self.y_axis = y;
    }

    /// Plans a plot of the active array
    ///
    /// `x`/`y` override the stored selectors when given. Rendering problems come
    /// back inside the plan; only a missing selection is an error.
    ///
    /// # Errors
    ///
    /// Returns [`NpzVisError::NoArchive`] or [`NpzVisError::NoSelection`].
    pub fn plan_render(
        &mut self,
        kind: PlotKind,
        x: Option<AxisSelector>,
        y: Option<AxisSelector>,
    ) -> Result<RenderPlan> {
        self.current()?;
        self.set_plot_kind(kind);
        if let Some(x) = x {
            self.x_axis = x;
        }
        if let Some(y) = y {
            self.y_axis = y;
        }
        let array = self.current()?;
        Ok(plan(array, kind, &self.x_axis, &self.y_axis))
    }

    /// Opens (or reopens) the table view at page 1
    ///
    /// # Errors
    ///
    /// Fails only when no array is selected.
    pub fn open_table(&mut self) -> Result<TablePage> {
        let pager = TablePager::new(self.current()?);
        let state = TableState {
            page: 1,
            total_pages: pager.total_pages(),
        };
        let page = pager.page(1);
        self.table = Some(state);
        Ok(page)
    }

    /// Shows page `number` (clamped), opening the table first if needed
    ///
    /// # Errors
    ///
    /// Fails only when no array is selected.
    pub fn page(&mut self, number: i64) -> Result<TablePage> {
        let pager = self.pager()?;
        let page = pager.page(number);
        self.table = Some(TableState {
            page: page.page_number,
            total_pages: page.total_pages,
        });
        Ok(page)
    }

    /// Moves one page back or forward; stays put at either end
    ///
    /// # Errors
    ///
    /// Fails only when no array is selected.
    pub fn change_page(&mut self, delta: i64) -> Result<TablePage> {
        let current = self.current_page().unwrap_or(1);
        let target = self.pager()?.step(current, delta);
        self.page(i64::try_from(target).unwrap_or(1))
    }

    /// Pager bound to the stored page count, or a fresh one before the table opens
    fn pager(&self) -> Result<TablePager<'_>> {
        let array = self.current()?;
        Ok(match self.table {
            Some(state) => TablePager::resume(array, state.total_pages),
            None => TablePager::new(array),
        })
    }

    /// Page shown by the open table view
    #[must_use]
    pub fn current_page(&self) -> Option<usize> {
        self.table.map(|t| t.page)
    }

    /// Page count of the open table view
    #[must_use]
    pub fn total_pages(&self) -> Option<usize> {
        self.table.map(|t| t.total_pages)
    }

    /// Writes the full active array to a CSV file
    ///
    /// # Errors
    ///
    /// Returns [`NpzVisError::Export`] on I/O failure; session state is unaffected.
    pub fn export(&self, path: impl AsRef<Path>) -> Result<usize> {
        export_csv(self.current()?, path)
    }
}
