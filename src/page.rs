//! Page: a container that owns widgets and the layouts that place them.
//!
//! A page holds one or more layout variants and picks one by viewport width
//! using its breakpoints. Widgets live in an arena owned by the page and are
//! referenced from layout cells by [`WidgetId`], so a widget keeps its state
//! when a resize switches to another variant.
//!
//! Placements are recomputed on every [`Page::resize`]. Dispatch walks the
//! flat placement list, handing each widget its current rectangle.

use crate::error::ConfigError;
use crate::layout::{Breakpoints, GridLayout, Placement, Point, Rect, WidgetId};
use crate::surface::{Frame, Surface};
use crate::widget::{Action, KeyPress, Widget};

/// A named container of widgets laid out on a responsive grid.
pub struct Page {
    name: String,
    widgets: Vec<Box<dyn Widget>>,
    variants: Vec<GridLayout>,
    breakpoints: Breakpoints,
    current: usize,
    viewport: Rect,
    placements: Vec<Placement>,
}

impl Page {
    /// Start building a page.
    pub fn builder(name: impl Into<String>) -> PageBuilder {
        PageBuilder {
            name: name.into(),
            widgets: Vec::new(),
            variants: Vec::new(),
            breakpoints: Vec::new(),
        }
    }

    /// The page name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Index of the layout variant in effect.
    pub const fn current_variant(&self) -> usize {
        self.current
    }

    /// All layout variants.
    pub fn variants(&self) -> &[GridLayout] {
        &self.variants
    }

    /// The breakpoints choosing between variants.
    pub const fn breakpoints(&self) -> &Breakpoints {
        &self.breakpoints
    }

    /// The rectangle the page was last laid out in.
    pub const fn viewport(&self) -> Rect {
        self.viewport
    }

    /// The last computed placements.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Look up a widget.
    pub fn widget(&self, id: WidgetId) -> Option<&dyn Widget> {
        self.widgets.get(id.index()).map(AsRef::as_ref)
    }

    /// Current rectangle of a widget, if it is placed.
    pub fn rect_of(&self, id: WidgetId) -> Option<Rect> {
        self.placements.iter().find(|p| p.widget == id).map(|p| p.rect)
    }

    /// The layout variant that applies at `width`.
    pub fn select_layout(&self, width: f64) -> &GridLayout {
        &self.variants[self.variant_for(width)]
    }

    fn variant_for(&self, width: f64) -> usize {
        // Extra thresholds beyond the variant count are rejected at build time.
        self.breakpoints.select(width).min(self.variants.len() - 1)
    }

    /// Recompute placements for `viewport` without drawing.
    ///
    /// Returns `true` when the layout variant changed.
    pub fn relayout(&mut self, viewport: Rect) -> bool {
        let selected = self.variant_for(viewport.width);
        let changed = selected != self.current;
        if changed {
            tracing::debug!(
                page = %self.name,
                from = self.current,
                to = selected,
                width = viewport.width,
                "layout variant changed"
            );
            self.current = selected;
        }
        self.viewport = viewport;
        self.placements = self.variants[selected].positions(viewport);
        changed
    }

    /// Lay the page out in `viewport` and redraw it.
    pub fn resize(&mut self, frame: &mut Frame<'_>, viewport: Rect) {
        let previous = self.viewport;
        if self.relayout(viewport) {
            frame.clear_rect(previous);
        }
        self.render_all(frame);
    }

    /// Clear the page area and draw every placed widget.
    pub fn render_all(&self, frame: &mut Frame<'_>) {
        frame.clear_rect(self.viewport);
        for placement in &self.placements {
            if let Some(widget) = self.widgets.get(placement.widget.index()) {
                widget.render(frame, placement.rect);
            }
        }
    }

    /// Erase the page area and every placed widget.
    pub fn clear_all(&self, frame: &mut Frame<'_>) {
        frame.clear_rect(self.viewport);
        for placement in &self.placements {
            if let Some(widget) = self.widgets.get(placement.widget.index()) {
                widget.clear(frame, placement.rect);
            }
        }
    }

    /// Forward a click to every placed widget, then redraw.
    ///
    /// Returns the actions the widgets requested.
    pub fn dispatch_click(&mut self, frame: &mut Frame<'_>, point: Point) -> Vec<Action> {
        let mut actions = Vec::new();
        self.forward_click(point, &mut actions);
        self.render_all(frame);
        actions
    }

    /// Forward a key press to every placed widget, then redraw.
    pub fn dispatch_key(&mut self, frame: &mut Frame<'_>, key: KeyPress) {
        self.forward_key(key, frame.metrics());
        self.render_all(frame);
    }

    fn forward_click(&mut self, point: Point, actions: &mut Vec<Action>) {
        tracing::trace!(page = %self.name, x = point.x, y = point.y, "click");
        for placement in &self.placements {
            if let Some(widget) = self.widgets.get_mut(placement.widget.index()) {
                widget.handle_click(placement.rect, point, actions);
            }
        }
    }

    fn forward_key(&mut self, key: KeyPress, metrics: &dyn Surface) {
        tracing::trace!(page = %self.name, ?key, "key press");
        for placement in &self.placements {
            if let Some(widget) = self.widgets.get_mut(placement.widget.index()) {
                widget.handle_key_press(placement.rect, key, metrics);
            }
        }
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("name", &self.name)
            .field("widgets", &self.widgets.len())
            .field("variants", &self.variants.len())
            .field("current", &self.current)
            .field("viewport", &self.viewport)
            .finish()
    }
}

/// A page nested inside another page's cell lays itself out against the
/// rectangle it is handed.
impl Widget for Page {
    fn render(&self, frame: &mut Frame<'_>, rect: Rect) {
        frame.clear_rect(rect);
        for placement in self.select_layout(rect.width).positions(rect) {
            if let Some(widget) = self.widgets.get(placement.widget.index()) {
                widget.render(frame, placement.rect);
            }
        }
    }

    fn handle_click(&mut self, rect: Rect, point: Point, actions: &mut Vec<Action>) {
        if rect != self.viewport {
            self.relayout(rect);
        }
        self.forward_click(point, actions);
    }

    fn handle_key_press(&mut self, rect: Rect, key: KeyPress, metrics: &dyn Surface) {
        if rect != self.viewport {
            self.relayout(rect);
        }
        self.forward_key(key, metrics);
    }

    fn accepts_input(&self) -> bool {
        self.widgets.iter().any(|w| w.accepts_input())
    }
}

/// Builder for [`Page`].
pub struct PageBuilder {
    name: String,
    widgets: Vec<Box<dyn Widget>>,
    variants: Vec<GridLayout>,
    breakpoints: Vec<u32>,
}

impl PageBuilder {
    /// Hand a widget to the page, returning the id cells refer to it by.
    pub fn add_widget(&mut self, widget: impl Widget + 'static) -> WidgetId {
        self.add_boxed(Box::new(widget))
    }

    /// Hand an already boxed widget to the page.
    pub fn add_boxed(&mut self, widget: Box<dyn Widget>) -> WidgetId {
        let id = WidgetId::new(self.widgets.len());
        self.widgets.push(widget);
        id
    }

    /// Add a layout variant. Variants are matched to breakpoints in order.
    pub fn variant(&mut self, layout: GridLayout) -> &mut Self {
        self.variants.push(layout);
        self
    }

    /// Set the breakpoint thresholds.
    pub fn breakpoints(&mut self, thresholds: Vec<u32>) -> &mut Self {
        self.breakpoints = thresholds;
        self
    }

    /// Validate and build the page.
    pub fn build(self) -> Result<Page, ConfigError> {
        let Self {
            name,
            widgets,
            variants,
            breakpoints,
        } = self;

        if variants.is_empty() {
            return Err(ConfigError::NoLayouts { page: name });
        }
        if !breakpoints.is_empty() && breakpoints.len() != variants.len() {
            return Err(ConfigError::BreakpointCount {
                page: name,
                breakpoints: breakpoints.len(),
                layouts: variants.len(),
            });
        }
        let Some(breakpoints) = Breakpoints::new(breakpoints) else {
            return Err(ConfigError::UnsortedBreakpoints { page: name });
        };
        if let Some(missing) = variants
            .iter()
            .flat_map(GridLayout::widgets)
            .find(|id| id.index() >= widgets.len())
        {
            return Err(ConfigError::UnknownWidget {
                page: name,
                widget: format!("#{}", missing.0),
            });
        }

        Ok(Page {
            name,
            widgets,
            variants,
            breakpoints,
            current: 0,
            viewport: Rect::ZERO,
            placements: Vec::new(),
        })
    }
}
