//! Grid layout engine: proportional rows and columns resolved into rectangles.
//!
//! Layouts are validated once at construction. Resolving positions is a pure
//! function of the layout and the viewport; there is no tree traversal, just a
//! flat `Vec<Placement>`.

use super::geometry::{GridPosition, Padding, Proportion, DENOMINATOR};
use super::rect::Rect;
use crate::error::ConfigError;

/// Identifier of a widget owned by a page.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct WidgetId(pub usize);

impl WidgetId {
    /// Create a new widget ID.
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    /// Index into the owning page's widget list.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One slot of the grid: position, padding and an optional widget.
///
/// A cell without a widget is a spacer.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct GridCell {
    /// Slot in the row × column matrix.
    pub position: GridPosition,
    /// Inset applied inside the slot.
    pub padding: Padding,
    /// Widget drawn in this slot.
    pub widget: Option<WidgetId>,
}

impl GridCell {
    /// Create a populated cell.
    pub const fn new(position: GridPosition, padding: Padding, widget: WidgetId) -> Self {
        Self {
            position,
            padding,
            widget: Some(widget),
        }
    }

    /// Create a spacer cell.
    pub const fn spacer(position: GridPosition) -> Self {
        Self {
            position,
            padding: Padding::ZERO,
            widget: None,
        }
    }
}

/// A resolved cell: which widget goes where.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Placement {
    /// Index of the cell in its layout's cell list.
    pub cell: usize,
    /// Widget occupying the cell.
    pub widget: WidgetId,
    /// Absolute rectangle after padding.
    pub rect: Rect,
}

/// Absolute track edges for one axis.
///
/// Tracks are normalized by their own sum, so a list totalling less (or more)
/// than [`DENOMINATOR`](crate::layout::DENOMINATOR) still spans `extent`.
///
/// Returns `tracks.len() + 1` edges. The first is exactly `origin` and the
/// last exactly `origin + extent`, whatever rounding the scaling does in
/// between.
pub fn track_edges(tracks: &[Proportion], origin: f64, extent: f64) -> Vec<f64> {
    let total: u64 = tracks.iter().map(|t| u64::from(t.numerator())).sum();
    let mut edges = Vec::with_capacity(tracks.len() + 1);
    edges.push(origin);

    let mut prefix = 0u64;
    for track in tracks {
        prefix += u64::from(track.numerator());
        #[allow(clippy::cast_precision_loss)]
        let edge = if total == 0 {
            origin
        } else {
            origin + extent * prefix as f64 / total as f64
        };
        edges.push(edge);
    }

    if total > 0 {
        if let Some(last) = edges.last_mut() {
            *last = origin + extent;
        }
    }
    edges
}

/// Resolve every populated cell to an absolute rectangle.
///
/// Fails with [`ConfigError::GridMismatch`] before computing anything when the
/// cell list does not cover the `rows × columns` matrix.
pub fn compute_positions(
    rows: &[Proportion],
    columns: &[Proportion],
    cells: &[GridCell],
    viewport: Rect,
) -> Result<Vec<Placement>, ConfigError> {
    check_dimensions(rows, columns, cells)?;
    Ok(resolve(rows, columns, cells, viewport))
}

fn check_dimensions(
    rows: &[Proportion],
    columns: &[Proportion],
    cells: &[GridCell],
) -> Result<(), ConfigError> {
    if rows.len() * columns.len() != cells.len() {
        return Err(ConfigError::GridMismatch {
            rows: rows.len(),
            columns: columns.len(),
            cells: cells.len(),
        });
    }
    for cell in cells {
        let GridPosition { row, column } = cell.position;
        if row >= rows.len() || column >= columns.len() {
            return Err(ConfigError::CellOutOfBounds {
                row,
                column,
                rows: rows.len(),
                columns: columns.len(),
            });
        }
    }
    Ok(())
}

fn resolve(
    rows: &[Proportion],
    columns: &[Proportion],
    cells: &[GridCell],
    viewport: Rect,
) -> Vec<Placement> {
    let row_edges = track_edges(rows, viewport.y, viewport.height);
    let col_edges = track_edges(columns, viewport.x, viewport.width);

    cells
        .iter()
        .enumerate()
        .filter_map(|(index, cell)| {
            let widget = cell.widget?;
            let GridPosition { row, column } = cell.position;
            let pad = cell.padding;

            let x = col_edges[column] + pad.left * viewport.width;
            let y = row_edges[row] + pad.top * viewport.height;
            let width = col_edges[column + 1] - x - pad.right * viewport.width;
            let height = row_edges[row + 1] - y - pad.bottom * viewport.height;

            Some(Placement {
                cell: index,
                widget,
                rect: Rect::new(x, y, width, height),
            })
        })
        .collect()
}

/// A validated grid: row sizes, column sizes and a full matrix of cells.
#[derive(Clone, Debug, PartialEq)]
pub struct GridLayout {
    rows: Vec<Proportion>,
    columns: Vec<Proportion>,
    cells: Vec<GridCell>,
}

impl GridLayout {
    /// Create a layout from a complete cell matrix.
    ///
    /// Every slot must appear exactly once.
    pub fn new(
        rows: Vec<Proportion>,
        columns: Vec<Proportion>,
        cells: Vec<GridCell>,
    ) -> Result<Self, ConfigError> {
        check_dimensions(&rows, &columns, &cells)?;

        let mut seen = vec![false; cells.len()];
        for cell in &cells {
            let GridPosition { row, column } = cell.position;
            let slot = row * columns.len() + column;
            if std::mem::replace(&mut seen[slot], true) {
                return Err(ConfigError::DuplicateCell { row, column });
            }
        }

        warn_on_partial_tiling("rows", &rows);
        warn_on_partial_tiling("columns", &columns);

        Ok(Self {
            rows,
            columns,
            cells,
        })
    }

    /// Start building a layout whose unfilled slots become spacers.
    pub fn builder(rows: Vec<Proportion>, columns: Vec<Proportion>) -> GridLayoutBuilder {
        GridLayoutBuilder {
            rows,
            columns,
            cells: Vec::new(),
        }
    }

    /// Row sizes, top to bottom.
    pub fn rows(&self) -> &[Proportion] {
        &self.rows
    }

    /// Column sizes, left to right.
    pub fn columns(&self) -> &[Proportion] {
        &self.columns
    }

    /// All cells, including spacers.
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    /// Widgets referenced by this layout, in cell order.
    pub fn widgets(&self) -> impl Iterator<Item = WidgetId> + '_ {
        self.cells.iter().filter_map(|c| c.widget)
    }

    /// Resolve every populated cell against a viewport.
    pub fn positions(&self, viewport: Rect) -> Vec<Placement> {
        resolve(&self.rows, &self.columns, &self.cells, viewport)
    }
}

fn warn_on_partial_tiling(axis: &str, tracks: &[Proportion]) {
    let total: u64 = tracks.iter().map(|t| u64::from(t.numerator())).sum();
    // Even thirds author as 333 × 3, so only flag totals well away from the denominator.
    if total.abs_diff(u64::from(DENOMINATOR)) > tracks.len() as u64 {
        tracing::warn!(axis, total, "track sizes do not sum to {DENOMINATOR}; scaling to fit");
    }
}

/// Builder for [`GridLayout`] that fills unlisted slots with spacers.
#[derive(Debug)]
pub struct GridLayoutBuilder {
    rows: Vec<Proportion>,
    columns: Vec<Proportion>,
    cells: Vec<GridCell>,
}

impl GridLayoutBuilder {
    /// Place a widget in a slot.
    #[must_use]
    pub fn place(mut self, position: GridPosition, padding: Padding, widget: WidgetId) -> Self {
        self.cells.push(GridCell::new(position, padding, widget));
        self
    }

    /// Add an explicit cell (populated or spacer).
    #[must_use]
    pub fn cell(mut self, cell: GridCell) -> Self {
        self.cells.push(cell);
        self
    }

    /// Validate placements and fill the remaining slots with spacers.
    pub fn build(self) -> Result<GridLayout, ConfigError> {
        let (rows, columns) = (self.rows.len(), self.columns.len());
        let mut matrix: Vec<Option<GridCell>> = vec![None; rows * columns];

        for cell in self.cells {
            let GridPosition { row, column } = cell.position;
            if row >= rows || column >= columns {
                return Err(ConfigError::CellOutOfBounds {
                    row,
                    column,
                    rows,
                    columns,
                });
            }
            let slot = &mut matrix[row * columns + column];
            if slot.is_some() {
                return Err(ConfigError::DuplicateCell { row, column });
            }
            *slot = Some(cell);
        }

        let cells = matrix
            .into_iter()
            .enumerate()
            .map(|(i, slot)| {
                slot.unwrap_or_else(|| GridCell::spacer(GridPosition::new(i / columns, i % columns)))
            })
            .collect();

        GridLayout::new(self.rows, self.columns, cells)
    }
}
