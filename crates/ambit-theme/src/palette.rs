use ambit_core::Color;

use crate::error::ThemeError;

/// Immutable set of colours. Themes swap between `'static` palettes by
/// reference; a palette is never edited in place.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Palette {
    pub name: &'static str,
    pub foreground: Color,
    pub background: Color,
    pub button_background: Color,
    pub button_text: Color,
    pub border: Color,
}

pub static LIGHT: Palette = Palette {
    name: "light",
    foreground: Color::rgb(0x00, 0x00, 0x00),
    background: Color::rgb(0xee, 0xee, 0xee),
    button_background: Color::rgb(0xff, 0xff, 0xff),
    button_text: Color::rgb(0x00, 0x00, 0x00),
    border: Color::rgb(0xcc, 0xcc, 0xcc),
};

pub static DARK: Palette = Palette {
    name: "dark",
    foreground: Color::rgb(0xff, 0xff, 0xff),
    background: Color::rgb(0x22, 0x22, 0x22),
    button_background: Color::rgb(0x33, 0x33, 0x33),
    button_text: Color::rgb(0xff, 0xff, 0xff),
    border: Color::rgb(0x44, 0x44, 0x44),
};

impl Palette {
    /// Display form of the name: "dark" -> "Dark".
    pub fn title(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// Ordered, non-empty list of palettes. Toggling walks it cyclically.
#[derive(Clone, Debug)]
pub struct PaletteSet(Vec<&'static Palette>);

impl PaletteSet {
    pub fn new(palettes: Vec<&'static Palette>) -> Result<Self, ThemeError> {
        if palettes.is_empty() {
            return Err(ThemeError::EmptyPaletteSet);
        }
        Ok(Self(palettes))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'static Palette> {
        self.0.get(index).copied()
    }

    pub fn first(&self) -> &'static Palette {
        self.0[0]
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|p| p.name == name)
    }

    pub fn next_after(&self, index: usize) -> usize {
        (index + 1) % self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static Palette> + '_ {
        self.0.iter().copied()
    }
}

impl Default for PaletteSet {
    fn default() -> Self {
        Self(vec![&LIGHT, &DARK])
    }
}
