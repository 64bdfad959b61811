//! Widgets: the interactive controls placed into grid cells.
//!
//! Every widget implements [`Widget`]. Widgets own their content state and
//! receive their rectangle from the layout on every call.

mod button;
mod checkbox;
mod label;
mod text_field;
mod traits;

pub use button::Button;
pub use checkbox::CheckBox;
pub use label::Label;
pub use text_field::{TextField, TextFieldConfig};
pub use traits::{Action, KeyPress, Widget};
