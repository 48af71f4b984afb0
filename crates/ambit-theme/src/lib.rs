//! # Theme store
//!
//! Shares the active palette, and the operation that switches it, with every
//! consumer inside a theme provider.
//!
//! ```rust
//! use ambit_theme::*;
//!
//! let theme = theme_provider(ThemeConfig::default()).unwrap();
//! theme.run(|| {
//!     let t = use_theme().unwrap();
//!     assert_eq!(t.current().unwrap().name, "light");
//!     assert_eq!(t.button_label().unwrap(), "Switch to Dark Mode");
//!     t.toggle_theme().unwrap();
//!     assert!(std::ptr::eq(theme_or_default(), &DARK));
//! });
//!
//! // No provider: strict lookups fail, the lenient one falls back to light.
//! assert!(use_theme().is_err());
//! assert!(std::ptr::eq(theme_or_default(), &LIGHT));
//! ```
//!
//! `toggle_theme` walks the `PaletteSet` cyclically, so adding a third
//! palette needs no change to the toggle.

pub mod error;
pub mod palette;
pub mod store;

pub use error::ThemeError;
pub use palette::{DARK, LIGHT, Palette, PaletteSet};
pub use store::{
    Theme, ThemeConfig, ThemeScope, ThemeState, theme_or_default, theme_provider, use_theme,
};
