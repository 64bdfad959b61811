//! Error types.
//!
//! Only malformed configuration is fatal. Editing past either end of a text
//! field or clicking outside every widget are ordinary outcomes and never
//! surface as errors.

use thiserror::Error;

/// A layout, page or engine declaration that cannot be used.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The cell list does not cover the row × column matrix.
    #[error("layout has {rows} rows × {columns} columns but {cells} cells")]
    GridMismatch {
        /// Number of row definitions.
        rows: usize,
        /// Number of column definitions.
        columns: usize,
        /// Number of cells supplied.
        cells: usize,
    },

    /// A cell addresses a slot outside the grid.
    #[error("cell ({row}, {column}) lies outside a {rows}×{columns} grid")]
    CellOutOfBounds {
        /// Row of the offending cell.
        row: usize,
        /// Column of the offending cell.
        column: usize,
        /// Number of rows in the layout.
        rows: usize,
        /// Number of columns in the layout.
        columns: usize,
    },

    /// Two cells claim the same slot.
    #[error("more than one cell at ({row}, {column})")]
    DuplicateCell {
        /// Row of the repeated slot.
        row: usize,
        /// Column of the repeated slot.
        column: usize,
    },

    /// A cell references a widget the page does not own.
    #[error("page `{page}` has no widget `{widget}`")]
    UnknownWidget {
        /// Page being built.
        page: String,
        /// Widget reference that failed to resolve.
        widget: String,
    },

    /// Two widgets on one page share an id.
    #[error("page `{page}` declares widget `{widget}` twice")]
    DuplicateWidget {
        /// Page being built.
        page: String,
        /// Repeated widget id.
        widget: String,
    },

    /// Breakpoints and layout variants are not parallel lists.
    #[error("page `{page}` has {breakpoints} breakpoints for {layouts} layouts")]
    BreakpointCount {
        /// Page being built.
        page: String,
        /// Number of breakpoints.
        breakpoints: usize,
        /// Number of layout variants.
        layouts: usize,
    },

    /// Breakpoints are not in ascending order.
    #[error("page `{page}` breakpoints are not ascending")]
    UnsortedBreakpoints {
        /// Page being built.
        page: String,
    },

    /// A page was declared without any layout variant.
    #[error("page `{page}` has no layouts")]
    NoLayouts {
        /// Page being built.
        page: String,
    },

    /// The engine was given no pages.
    #[error("at least one page is required")]
    NoPages,

    /// Two pages share a name.
    #[error("duplicate page `{0}`")]
    DuplicatePage(String),

    /// A page name that no page carries.
    #[error("unknown page `{0}`")]
    UnknownPage(String),
}

/// Failure to load a declaration file.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for the declaration schema.
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// The file parsed but describes an invalid layout.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_mismatch_message() {
        let err = ConfigError::GridMismatch {
            rows: 2,
            columns: 3,
            cells: 5,
        };
        assert_eq!(err.to_string(), "layout has 2 rows × 3 columns but 5 cells");
    }

    #[test]
    fn test_load_error_wraps_config() {
        let err = LoadError::from(ConfigError::NoPages);
        assert!(matches!(err, LoadError::Config(ConfigError::NoPages)));
    }
}
