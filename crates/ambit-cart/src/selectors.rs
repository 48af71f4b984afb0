//! Narrow views over the enclosing cart, for consumers that only need part
//! of it. Each one fails with `NotInScope` outside a cart provider, exactly
//! like `use_cart`.

use std::rc::Rc;

use crate::error::CartError;
use crate::money::Money;
use crate::notification::{Notification, NotificationId};
use crate::product::{LineItem, Product, ProductId};
use crate::store::{Cart, CartState, use_cart};

/// Just the mutating operations.
#[derive(Clone)]
pub struct CartActions {
    cart: Rc<Cart>,
}

impl CartActions {
    pub fn add_to_cart(&self, product: &Product) -> Result<(), CartError> {
        self.cart.add_to_cart(product)
    }

    pub fn remove_from_cart(&self, id: ProductId) -> Result<(), CartError> {
        self.cart.remove_from_cart(id)
    }

    pub fn update_quantity(&self, id: ProductId, quantity: i64) -> Result<(), CartError> {
        self.cart.update_quantity(id, quantity)
    }

    pub fn clear_cart(&self) -> Result<(), CartError> {
        self.cart.clear_cart()
    }
}

/// Items with their derived totals, taken at the moment of the call.
#[derive(Clone, Debug, PartialEq)]
pub struct CartSnapshot {
    pub items: Vec<LineItem>,
    pub total: Money,
    pub item_count: u32,
}

impl TryFrom<&CartState> for CartSnapshot {
    type Error = CartError;

    fn try_from(state: &CartState) -> Result<Self, Self::Error> {
        Ok(Self {
            items: state.items().to_vec(),
            total: state.total()?,
            item_count: state.item_count()?,
        })
    }
}

/// Pending notifications and the means to dismiss them.
pub struct CartNotifications {
    pub notifications: Vec<Notification>,
    cart: Rc<Cart>,
}

impl CartNotifications {
    pub fn dismiss(&self, id: NotificationId) -> Result<bool, CartError> {
        self.cart.dismiss_notification(id)
    }
}

pub fn use_cart_actions() -> Result<CartActions, CartError> {
    Ok(CartActions { cart: use_cart()? })
}

pub fn use_cart_state() -> Result<CartSnapshot, CartError> {
    let state = use_cart()?.state()?;
    CartSnapshot::try_from(&*state)
}

pub fn use_cart_notifications() -> Result<CartNotifications, CartError> {
    let cart = use_cart()?;
    Ok(CartNotifications {
        notifications: cart.notifications()?,
        cart,
    })
}
