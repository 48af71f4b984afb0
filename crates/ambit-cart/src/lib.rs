//! # Cart store
//!
//! A shopping cart shared with every consumer nested inside its provider.
//!
//! ```rust
//! use ambit_cart::*;
//! use ambit_core::Timers;
//!
//! let timers = Timers::new();
//! let cart = cart_provider(&timers, CartConfig::default());
//! let laptop = Product::new(1, "Laptop", Money::from_cents(99999));
//!
//! cart.run(|| -> Result<(), CartError> {
//!     let cart = use_cart()?;
//!     cart.add_to_cart(&laptop)?;
//!     cart.add_to_cart(&laptop)?;
//!     assert_eq!(cart.item_count()?, 2);
//!     assert_eq!(cart.total()?.to_string(), "$1999.98");
//!     Ok(())
//! })
//! .unwrap();
//!
//! assert!(use_cart().is_err());
//! ```
//!
//! Adding, removing, clearing and discounting each post a notification that
//! removes itself after `CartConfig::notification_ttl` (3 s by default) when
//! the host drives `Timers::run_due`. Dismissing one cancels its timer.
//!
//! Input policy: products with an empty name or a negative price, discounts
//! outside `0..=100` percent and quantities beyond `u32` are rejected with a
//! `CartError` and change nothing.

pub mod error;
pub mod money;
pub mod notification;
pub mod product;
pub mod selectors;
pub mod store;

pub use error::CartError;
pub use money::Money;
pub use notification::{Notification, NotificationId};
pub use product::{LineItem, Product, ProductId};
pub use selectors::{
    CartActions, CartNotifications, CartSnapshot, use_cart_actions, use_cart_notifications,
    use_cart_state,
};
pub use store::{
    Cart, CartConfig, CartScope, CartState, DEFAULT_NOTIFICATION_TTL, cart_provider, use_cart,
};
