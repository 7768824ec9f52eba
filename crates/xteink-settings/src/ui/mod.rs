//! Minimal UI framework for the Xteink X4 settings screen.
//! E-ink optimized: high contrast, no animations, type-safe.

pub mod activity;
pub mod components;
pub mod theme;

pub use activity::{ActivityResult, OnComplete, SubScreen, SubScreenFactory};
pub use components::{ButtonHints, Header, ListRow, SettingsList, TabBar, TabInfo};
pub use theme::{Theme, ThemeMetrics, UiTheme};
