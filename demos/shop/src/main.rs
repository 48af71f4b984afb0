use ambit_cart::{
    CartConfig, ProductId, cart_provider, use_cart, use_cart_actions, use_cart_notifications,
};
use ambit_core::{Duration, Timers};
use ambit_theme::{ThemeConfig, theme_provider, use_theme};
use anyhow::Context;

mod catalog;
mod pages;

use pages::*;

fn cart_config() -> anyhow::Result<CartConfig> {
    let mut config = CartConfig::default();
    if let Ok(ms) = std::env::var("SHOP_NOTIFY_MS") {
        let ms: u64 = ms.parse().context("SHOP_NOTIFY_MS must be milliseconds")?;
        config.notification_ttl = Duration::from_millis(ms);
    }
    Ok(config)
}

fn theme_page(with_provider: bool) -> anyhow::Result<()> {
    println!("== theme switcher (provider {}) ==", if with_provider { "ON" } else { "OFF" });

    if !with_provider {
        // The strict components fail loudly; the lenient one falls back.
        if let Err(e) = ThemeWindow() {
            println!("ThemeWindow: {e}");
        }
        println!("{}", ThemedButton());
        return Ok(());
    }

    let theme = theme_provider(ThemeConfig::default())?;
    theme.run(|| -> anyhow::Result<()> {
        let _rerender = use_theme()?.observe(|s| {
            log::info!("theme consumers re-render with {}", s.palette().name);
        })?;

        println!("{}", ThemeWindow()?);
        println!("{}", ThemeButton()?);
        println!("{}", ThemedButton());

        // click
        use_theme()?.toggle_theme()?;
        println!("{}", ThemeWindow()?);
        println!("{}", ThemeButton()?);
        println!("{}", ThemedButton());
        Ok(())
    })?;
    theme.destroy();
    Ok(())
}

fn cart_page(timers: &Timers, config: CartConfig) -> anyhow::Result<()> {
    println!("== shopping cart ==");
    let products = catalog::sample_products()?;
    let cart = cart_provider(timers, config);

    cart.run(|| -> anyhow::Result<()> {
        let _badge = use_cart()?.observe(|_| match CartHeader() {
            Ok(header) => log::info!("{header}"),
            Err(e) => log::error!("header failed: {e}"),
        })?;

        for product in &products {
            println!("{}", ProductCard(product)?);
        }

        let actions = use_cart_actions()?;
        actions.add_to_cart(&products[0])?;
        actions.add_to_cart(&products[0])?;
        actions.add_to_cart(&products[1])?;
        actions.update_quantity(ProductId(2), 3)?;
        println!("{}", CartHeader()?);
        println!("{}", CartSummary()?);

        for code in ["FREE", "SAVE10"] {
            match discount_for_code(code) {
                Some(pct) => println!("{code}: new total {}", use_cart()?.apply_discount(pct)?),
                None => println!("{code}: invalid discount code"),
            }
        }

        actions.update_quantity(ProductId(2), 0)?;
        println!("{}", CartSummary()?);

        for line in Notifications()? {
            println!("  {line}");
        }

        // dismiss the oldest by hand; the rest expire on their own
        let notes = use_cart_notifications()?;
        if let Some(first) = notes.notifications.first() {
            notes.dismiss(first.id)?;
        }
        Ok(())
    })?;

    // Host loop: consumers only see the cart from inside its provider, so
    // due timers fire there too.
    while let Some(deadline) = timers.next_deadline() {
        std::thread::sleep(deadline.saturating_duration_since(timers.now()));
        let remaining = cart.run(|| {
            let fired = timers.run_due();
            log::debug!("{fired} notification(s) expired");
            Notifications()
        })?;
        println!("notifications left: {}", remaining.len());
    }

    cart.destroy();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    theme_page(true)?;
    theme_page(false)?;

    let timers = Timers::new();
    cart_page(&timers, cart_config()?)?;
    Ok(())
}
