use ambit_core::ScopeError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeError {
    #[error(transparent)]
    Scope(#[from] ScopeError),

    #[error("no palette named {0:?}")]
    UnknownPalette(String),

    #[error("a theme needs at least one palette")]
    EmptyPaletteSet,
}
