//! Declaration files: pages, widgets and layouts described in TOML.
//!
//! ```toml
//! [runtime]
//! blink_interval_ms = 500
//!
//! [[pages]]
//! name = "main"
//! breakpoints = [0, 600]
//!
//! [[pages.widgets]]
//! id = "name"
//! kind = "text_field"
//!
//! [[pages.widgets]]
//! id = "next"
//! kind = "button"
//! text = "Next"
//! action = { show_page = "second" }
//!
//! [[pages.layouts]]
//! rows = [500, 500]
//! columns = [1000]
//!
//! [[pages.layouts.cells]]
//! row = 0
//! column = 0
//! padding = [100, 25, 25, 100]
//! widget = "name"
//! ```
//!
//! Sizes and paddings are thousandths. Slots without a cell entry are
//! spacers. Padding is listed as `[top, left, right, bottom]`.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::actor::RuntimeConfig;
use crate::engine::Engine;
use crate::error::{ConfigError, LoadError};
use crate::layout::{GridCell, GridLayout, GridPosition, Padding, Proportion, WidgetId};
use crate::page::Page;
use crate::widget::{Action, Button, CheckBox, Label, TextField, Widget};

/// A whole declaration file.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Terminal host settings.
    #[serde(default)]
    pub runtime: RuntimeSection,

    /// Pages in declaration order; the first one is shown at startup.
    #[serde(default)]
    pub pages: Vec<PageDecl>,
}

/// The `[runtime]` section.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeSection {
    /// Frame rate cap.
    pub target_fps: u32,
    /// Half period of the text cursor blink.
    pub blink_interval_ms: u64,
    /// How long the input thread waits per poll.
    pub input_poll_ms: u64,
    /// Capture mouse clicks.
    pub enable_mouse: bool,
    /// Draw on the alternate screen.
    pub alternate_screen: bool,
}

impl Default for RuntimeSection {
    fn default() -> Self {
        Self {
            target_fps: 60,
            blink_interval_ms: 500,
            input_poll_ms: 10,
            enable_mouse: true,
            alternate_screen: true,
        }
    }
}

impl From<&RuntimeSection> for RuntimeConfig {
    fn from(section: &RuntimeSection) -> Self {
        Self {
            target_fps: section.target_fps.max(1),
            blink_interval: Duration::from_millis(section.blink_interval_ms),
            input_poll_timeout: Duration::from_millis(section.input_poll_ms),
            enable_mouse: section.enable_mouse,
            alternate_screen: section.alternate_screen,
        }
    }
}

/// One `[[pages]]` entry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PageDecl {
    /// Unique page name, the target of `show_page` actions.
    pub name: String,
    /// Width thresholds, one per layout.
    #[serde(default)]
    pub breakpoints: Vec<u32>,
    /// Widgets owned by the page.
    #[serde(default)]
    pub widgets: Vec<WidgetDecl>,
    /// Layout variants.
    #[serde(default)]
    pub layouts: Vec<LayoutDecl>,
}

/// Kind of widget declared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    /// [`CheckBox`]
    #[serde(rename = "checkbox")]
    CheckBox,
    /// [`TextField`]
    TextField,
    /// [`Button`]
    Button,
    /// [`Label`]
    Label,
}

/// What a button does when clicked.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionDecl {
    /// Switch to the named page.
    ShowPage(String),
    /// Stop the application.
    Quit,
    /// Report a tag to the application.
    Emit(String),
}

impl From<ActionDecl> for Action {
    fn from(decl: ActionDecl) -> Self {
        match decl {
            ActionDecl::ShowPage(page) => Self::ShowPage(page),
            ActionDecl::Quit => Self::Quit,
            ActionDecl::Emit(tag) => Self::Emit(tag),
        }
    }
}

/// One `[[pages.widgets]]` entry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WidgetDecl {
    /// Name cells refer to the widget by.
    pub id: String,
    /// Widget kind.
    pub kind: WidgetKind,
    /// Label, button caption or initial field content.
    #[serde(default)]
    pub text: String,
    /// Initial check box state.
    #[serde(default)]
    pub checked: bool,
    /// Button action.
    #[serde(default)]
    pub action: Option<ActionDecl>,
}

impl WidgetDecl {
    fn instantiate(&self) -> Box<dyn Widget> {
        match self.kind {
            WidgetKind::CheckBox => Box::new(CheckBox::new(self.checked)),
            WidgetKind::TextField => Box::new(TextField::new(self.text.as_str())),
            WidgetKind::Label => Box::new(Label::new(self.text.as_str())),
            WidgetKind::Button => match &self.action {
                Some(action) => Box::new(Button::new(self.text.as_str(), action.clone().into())),
                None => Box::new(Button::inert(self.text.as_str())),
            },
        }
    }
}

/// One `[[pages.layouts]]` entry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LayoutDecl {
    /// Row heights in thousandths.
    pub rows: Vec<Proportion>,
    /// Column widths in thousandths.
    pub columns: Vec<Proportion>,
    /// Populated (or explicitly empty) slots.
    #[serde(default)]
    pub cells: Vec<CellDecl>,
}

/// One `[[pages.layouts.cells]]` entry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CellDecl {
    /// Zero-based row.
    pub row: usize,
    /// Zero-based column.
    pub column: usize,
    /// `[top, left, right, bottom]` in thousandths.
    #[serde(default)]
    pub padding: [u32; 4],
    /// Widget id; absent for a spacer.
    #[serde(default)]
    pub widget: Option<String>,
}

impl AppConfig {
    /// Parse a declaration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Parse`] for malformed TOML.
    pub fn from_toml_str(source: &str) -> Result<Self, LoadError> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a declaration file.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] if the file cannot be read and
    /// [`LoadError::Parse`] if it is not a valid declaration.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), pages = config.pages.len(), "loaded declaration");
        Ok(config)
    }

    /// Terminal host settings.
    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig::from(&self.runtime)
    }

    /// Build every declared page.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found: a widget id used twice or
    /// not declared, a `show_page` target that names no page, or an invalid
    /// layout.
    pub fn build_pages(&self) -> Result<Vec<Page>, ConfigError> {
        for target in self.page_targets() {
            if !self.pages.iter().any(|p| p.name == target) {
                return Err(ConfigError::UnknownPage(target.to_owned()));
            }
        }
        self.pages.iter().map(PageDecl::build).collect()
    }

    /// Build an engine over every declared page.
    ///
    /// # Errors
    ///
    /// Everything [`AppConfig::build_pages`] and [`Engine::new`] reject.
    pub fn build_engine(&self) -> Result<Engine, ConfigError> {
        Engine::new(self.build_pages()?)
    }

    fn page_targets(&self) -> impl Iterator<Item = &str> {
        self.pages
            .iter()
            .flat_map(|p| &p.widgets)
            .filter_map(|w| match &w.action {
                Some(ActionDecl::ShowPage(target)) => Some(target.as_str()),
                _ => None,
            })
    }
}

impl PageDecl {
    fn build(&self) -> Result<Page, ConfigError> {
        let mut builder = Page::builder(self.name.as_str());
        let mut ids: HashMap<&str, WidgetId> = HashMap::new();

        for decl in &self.widgets {
            let id = builder.add_boxed(decl.instantiate());
            if ids.insert(decl.id.as_str(), id).is_some() {
                return Err(ConfigError::DuplicateWidget {
                    page: self.name.clone(),
                    widget: decl.id.clone(),
                });
            }
        }

        for layout in &self.layouts {
            builder.variant(self.build_layout(layout, &ids)?);
        }
        builder.breakpoints(self.breakpoints.clone());
        builder.build()
    }

    fn build_layout(
        &self,
        layout: &LayoutDecl,
        ids: &HashMap<&str, WidgetId>,
    ) -> Result<GridLayout, ConfigError> {
        let mut grid = GridLayout::builder(layout.rows.clone(), layout.columns.clone());
        for cell in &layout.cells {
            let position = GridPosition::new(cell.row, cell.column);
            let padding = Padding::from_thousandths(cell.padding);
            grid = grid.cell(match &cell.widget {
                Some(name) => {
                    let id = ids.get(name.as_str()).copied().ok_or_else(|| {
                        ConfigError::UnknownWidget {
                            page: self.name.clone(),
                            widget: name.clone(),
                        }
                    })?;
                    GridCell::new(position, padding, id)
                }
                None => GridCell::spacer(position),
            });
        }
        grid.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Rect;
    use crate::surface::RecordingSurface;
    use std::io::Write;

    const TWO_PAGES: &str = r#"
[runtime]
blink_interval_ms = 250
enable_mouse = false

[[pages]]
name = "form"
breakpoints = [0, 600]

[[pages.widgets]]
id = "agree"
kind = "checkbox"
checked = true

[[pages.widgets]]
id = "next"
kind = "button"
text = "Next"
action = { show_page = "done" }

[[pages.layouts]]
rows = [333, 333, 333]
columns = [333, 333, 333]

[[pages.layouts.cells]]
row = 1
column = 1
widget = "agree"

[[pages.layouts.cells]]
row = 2
column = 1
widget = "next"

[[pages.layouts]]
rows = [500, 500]
columns = [500, 500]

[[pages.layouts.cells]]
row = 0
column = 0
padding = [100, 100, 100, 100]
widget = "agree"

[[pages.layouts.cells]]
row = 1
column = 1
widget = "next"

[[pages]]
name = "done"

[[pages.widgets]]
id = "bye"
kind = "button"
text = "Quit"
action = "quit"

[[pages.layouts]]
rows = [1000]
columns = [1000]

[[pages.layouts.cells]]
row = 0
column = 0
widget = "bye"
"#;

    #[test]
    fn test_parse_and_build() {
        let config = AppConfig::from_toml_str(TWO_PAGES).unwrap();
        assert_eq!(config.pages.len(), 2);
        assert_eq!(config.pages[0].widgets[1].action, Some(ActionDecl::ShowPage("done".into())));
        assert_eq!(config.pages[1].widgets[0].action, Some(ActionDecl::Quit));

        let runtime = config.runtime_config();
        assert_eq!(runtime.blink_interval, Duration::from_millis(250));
        assert!(!runtime.enable_mouse);
        assert_eq!(runtime.target_fps, 60);

        let pages = config.build_pages().unwrap();
        assert_eq!(pages[0].variants().len(), 2);
        assert_eq!(pages[0].variants()[0].cells().len(), 9);
        assert_eq!(pages[0].breakpoints().thresholds(), &[0, 600]);
    }

    #[test]
    fn test_padding_order_from_file() {
        let config = AppConfig::from_toml_str(TWO_PAGES).unwrap();
        let mut pages = config.build_pages().unwrap();
        pages[0].relayout(Rect::from_size(1000.0, 500.0));

        let rect = pages[0].rect_of(WidgetId::new(0)).unwrap();
        assert!((rect.x - 100.0).abs() < 1e-9);
        assert!((rect.y - 50.0).abs() < 1e-9);
        assert!((rect.width - 300.0).abs() < 1e-9);
        assert!((rect.height - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_engine_navigates_declared_pages() {
        let config = AppConfig::from_toml_str(TWO_PAGES).unwrap();
        let mut engine = config.build_engine().unwrap();
        let mut surface = RecordingSurface::default();

        engine.init(&mut surface, 1000.0, 500.0);
        engine.click(&mut surface, 750.0, 375.0);
        assert_eq!(engine.active_page().name(), "done");
        engine.click(&mut surface, 10.0, 10.0);
        assert!(!engine.is_running());
    }

    #[test]
    fn test_unknown_widget_reference() {
        let source = r#"
[[pages]]
name = "p"

[[pages.layouts]]
rows = [1000]
columns = [1000]

[[pages.layouts.cells]]
row = 0
column = 0
widget = "ghost"
"#;
        let err = AppConfig::from_toml_str(source).unwrap().build_pages().unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownWidget {
                page: "p".into(),
                widget: "ghost".into()
            }
        );
    }

    #[test]
    fn test_unknown_page_target() {
        let source = TWO_PAGES.replace(r#"show_page = "done""#, r#"show_page = "nowhere""#);
        let err = AppConfig::from_toml_str(&source).unwrap().build_pages().unwrap_err();
        assert_eq!(err, ConfigError::UnknownPage("nowhere".into()));
    }

    #[test]
    fn test_duplicate_widget_id() {
        let source = TWO_PAGES.replace(r#"id = "next""#, r#"id = "agree""#);
        let err = AppConfig::from_toml_str(&source).unwrap().build_pages().unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateWidget { .. }));
    }

    #[test]
    fn test_cell_out_of_bounds() {
        let source = r#"
[[pages]]
name = "p"

[[pages.layouts]]
rows = [500, 500]
columns = [1000]

[[pages.layouts.cells]]
row = 2
column = 0
"#;
        let err = AppConfig::from_toml_str(source).unwrap().build_pages().unwrap_err();
        assert!(matches!(err, ConfigError::CellOutOfBounds { row: 2, .. }));
    }

    #[test]
    fn test_unknown_kind_is_parse_error() {
        let source = r#"
[[pages]]
name = "p"

[[pages.widgets]]
id = "x"
kind = "slider"
"#;
        assert!(matches!(AppConfig::from_toml_str(source), Err(LoadError::Parse(_))));
    }

    #[test]
    fn test_gallery_declaration_builds() {
        let config = AppConfig::from_toml_str(include_str!("../demos/gallery.toml")).unwrap();
        let engine = config.build_engine().unwrap();
        assert_eq!(engine.pages().len(), 2);
        assert_eq!(engine.active_page().name(), "form");
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TWO_PAGES.as_bytes()).unwrap();

        let config = AppConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.pages[1].name, "done");

        let missing = file.path().with_extension("missing");
        assert!(matches!(AppConfig::load_from_path(missing), Err(LoadError::Io(_))));
    }
}
