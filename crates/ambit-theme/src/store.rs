use std::rc::Rc;

use ambit_core::{Dispose, ScopeHandle, StoreHandle, create_scope, try_use_scope, use_scope};

use crate::error::ThemeError;
use crate::palette::{LIGHT, Palette, PaletteSet};

/// Which palette is active. Copied and replaced whole on every change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemeState {
    index: usize,
    palette: &'static Palette,
}

impl ThemeState {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn palette(&self) -> &'static Palette {
        self.palette
    }
}

#[derive(Clone, Debug)]
pub struct ThemeConfig {
    pub palettes: PaletteSet,
    /// Name of the palette active when the provider is created.
    pub initial: &'static str,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            palettes: PaletteSet::default(),
            initial: LIGHT.name,
        }
    }
}

pub struct Theme {
    store: StoreHandle<ThemeState>,
    palettes: PaletteSet,
}

pub type ThemeScope = ScopeHandle<ThemeState, Theme>;

pub fn theme_provider(config: ThemeConfig) -> Result<ThemeScope, ThemeError> {
    let ThemeConfig { palettes, initial } = config;
    let index = palettes
        .index_of(initial)
        .ok_or_else(|| ThemeError::UnknownPalette(initial.to_string()))?;
    let palette = palettes.get(index).unwrap_or(palettes.first());
    let state = ThemeState { index, palette };
    Ok(create_scope(state, move |store| Theme { store, palettes }))
}

/// The enclosing theme, or `NotInScope` outside a theme provider.
pub fn use_theme() -> Result<Rc<Theme>, ThemeError> {
    Ok(use_scope::<ThemeState, Theme>()?.ops)
}

/// Active palette of the enclosing theme, or the light palette when there is
/// no provider.
pub fn theme_or_default() -> &'static Palette {
    try_use_scope::<ThemeState, Theme>()
        .and_then(|p| p.store.state().ok())
        .map(|s| s.palette())
        .unwrap_or(&LIGHT)
}

impl Theme {
    pub fn palettes(&self) -> &PaletteSet {
        &self.palettes
    }

    pub fn state(&self) -> Result<ThemeState, ThemeError> {
        Ok(*self.store.state()?)
    }

    pub fn current(&self) -> Result<&'static Palette, ThemeError> {
        Ok(self.state()?.palette)
    }

    /// Moves to the next palette in the set, wrapping around.
    pub fn toggle_theme(&self) -> Result<&'static Palette, ThemeError> {
        let current = self.state()?;
        self.activate(self.palettes.next_after(current.index))
    }

    pub fn set_theme(&self, name: &str) -> Result<&'static Palette, ThemeError> {
        let index = self.palettes.index_of(name).ok_or_else(|| {
            log::warn!("set_theme: unknown palette {name:?}");
            ThemeError::UnknownPalette(name.to_string())
        })?;
        self.activate(index)
    }

    /// Label for the toggle button: names the palette a toggle would switch to.
    pub fn button_label(&self) -> Result<String, ThemeError> {
        let current = self.state()?;
        let next = self.palette_at(self.palettes.next_after(current.index));
        Ok(format!("Switch to {} Mode", next.title()))
    }

    pub fn observe(&self, f: impl Fn(&Rc<ThemeState>) + 'static) -> Result<Dispose, ThemeError> {
        Ok(self.store.observe(f)?)
    }

    fn palette_at(&self, index: usize) -> &'static Palette {
        self.palettes.get(index).unwrap_or(self.palettes.first())
    }

    fn activate(&self, index: usize) -> Result<&'static Palette, ThemeError> {
        let palette = self.palette_at(index);
        self.store.set_state(ThemeState { index, palette })?;
        log::debug!("theme switched to {}", palette.name);
        Ok(palette)
    }
}
