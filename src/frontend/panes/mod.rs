//! Individual pane implementations.
//!
//! The canvas pane lives in `crate::canvas::editor`; this module holds
//! the surrounding utility panes.

pub mod palette;
pub mod settings;

pub use palette::PalettePaneState;
pub use settings::SettingsPaneState;
