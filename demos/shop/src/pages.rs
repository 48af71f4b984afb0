#![allow(non_snake_case)]
//! Headless components. Each one reaches the store it needs through a
//! `use_*` lookup and returns the text it would render.

use ambit_cart::{CartError, Product, use_cart, use_cart_notifications, use_cart_state};
use ambit_theme::{ThemeError, theme_or_default, use_theme};

pub fn ThemeButton() -> Result<String, ThemeError> {
    let theme = use_theme()?;
    Ok(format!("[ {} ]", theme.button_label()?))
}

pub fn ThemeWindow() -> Result<String, ThemeError> {
    let palette = use_theme()?.current()?;
    Ok(format!(
        "window: {} theme (fg {} on bg {}, border {})",
        palette.name, palette.foreground, palette.background, palette.border
    ))
}

/// Works with or without a provider: falls back to the light palette.
pub fn ThemedButton() -> String {
    let palette = theme_or_default();
    format!(
        "<button bg={} fg={}>I am styled by {} theme!</button>",
        palette.button_background, palette.button_text, palette.name
    )
}

pub fn CartHeader() -> Result<String, CartError> {
    let state = use_cart_state()?;
    Ok(format!("cart: {} item(s), {}", state.item_count, state.total))
}

pub fn ProductCard(product: &Product) -> Result<String, CartError> {
    let cart = use_cart()?;
    let line = match cart.item(product.id)? {
        Some(item) => format!("in cart ({})", item.quantity),
        None => "[ Add to Cart ]".to_string(),
    };
    Ok(format!(
        "{:<9} {:>8}  {:<24} {}",
        product.name,
        product.price.to_string(),
        product.description,
        line
    ))
}

pub fn CartSummary() -> Result<String, CartError> {
    let state = use_cart_state()?;
    if state.items.is_empty() {
        return Ok("Your cart is empty".to_string());
    }
    let mut out = format!("Your Cart ({} items)\n", state.item_count);
    for item in &state.items {
        out.push_str(&format!(
            "  {} x{} = {}\n",
            item.product.name,
            item.quantity,
            item.line_total()?
        ));
    }
    out.push_str(&format!("  Total: {}", state.total));
    Ok(out)
}

pub fn Notifications() -> Result<Vec<String>, CartError> {
    let notes = use_cart_notifications()?;
    Ok(notes
        .notifications
        .iter()
        .map(|n| format!("({}) {}", n.id, n.message))
        .collect())
}

/// Discount codes accepted by the summary panel.
pub fn discount_for_code(code: &str) -> Option<f64> {
    match code {
        "SAVE10" => Some(10.0),
        _ => None,
    }
}
