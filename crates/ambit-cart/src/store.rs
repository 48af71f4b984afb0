use std::cell::Cell;
use std::rc::Rc;

use ambit_core::{
    Dispose, Duration, ScopeError, ScopeHandle, StoreHandle, Timers, create_scope, use_scope,
};

use crate::error::CartError;
use crate::money::Money;
use crate::notification::{Notification, NotificationId};
use crate::product::{LineItem, Product, ProductId};

pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_millis(3000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CartConfig {
    /// How long a notification stays up unless dismissed.
    pub notification_ttl: Duration,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            notification_ttl: DEFAULT_NOTIFICATION_TTL,
        }
    }
}

/// Line items (unique by product id, in insertion order) plus pending
/// notifications. Every read below is recomputed from the items on each call.
#[derive(Clone, Debug, Default)]
pub struct CartState {
    items: Vec<LineItem>,
    notifications: Vec<Notification>,
}

impl CartState {
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn item(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn is_in_cart(&self, id: ProductId) -> bool {
        self.item(id).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `Overflow` if the sum no longer fits in `i64` cents.
    pub fn total(&self) -> Result<Money, CartError> {
        self.items.iter().try_fold(Money::ZERO, |acc, item| {
            acc.checked_add(item.line_total()?).ok_or(CartError::Overflow)
        })
    }

    pub fn item_count(&self) -> Result<u32, CartError> {
        self.items
            .iter()
            .try_fold(0u32, |acc, item| acc.checked_add(item.quantity))
            .ok_or(CartError::Overflow)
    }

    fn with_added(&self, product: &Product) -> Self {
        let mut items = self.items.clone();
        match items.iter_mut().find(|item| item.id() == product.id) {
            Some(item) => item.quantity = item.quantity.saturating_add(1),
            None => items.push(LineItem {
                product: product.clone(),
                quantity: 1,
            }),
        }
        Self {
            items,
            notifications: self.notifications.clone(),
        }
    }

    fn without_item(&self, id: ProductId) -> Self {
        Self {
            items: self.items.iter().filter(|item| item.id() != id).cloned().collect(),
            notifications: self.notifications.clone(),
        }
    }

    fn with_quantity(&self, id: ProductId, quantity: u32) -> Option<Self> {
        let current = self.item(id)?;
        if current.quantity == quantity {
            return None;
        }
        let items = self
            .items
            .iter()
            .map(|item| {
                if item.id() == id {
                    LineItem {
                        product: item.product.clone(),
                        quantity,
                    }
                } else {
                    item.clone()
                }
            })
            .collect();
        Some(Self {
            items,
            notifications: self.notifications.clone(),
        })
    }

    fn cleared(&self) -> Self {
        Self {
            items: Vec::new(),
            notifications: self.notifications.clone(),
        }
    }

    fn with_notification(mut self, notification: Notification) -> Self {
        self.notifications.push(notification);
        self
    }

    fn without_notification(&self, id: NotificationId) -> Option<Self> {
        if !self.notifications.iter().any(|n| n.id == id) {
            return None;
        }
        Some(Self {
            items: self.items.clone(),
            notifications: self
                .notifications
                .iter()
                .filter(|n| n.id != id)
                .cloned()
                .collect(),
        })
    }
}

/// Cart operations, bound to one store instance.
pub struct Cart {
    store: StoreHandle<CartState>,
    timers: Timers,
    config: CartConfig,
    next_notification: Cell<u64>,
}

pub type CartScope = ScopeHandle<CartState, Cart>;

/// Creates the cart provider. Run consumers inside `CartScope::run`;
/// `CartScope::destroy` cancels every pending notification expiry.
pub fn cart_provider(timers: &Timers, config: CartConfig) -> CartScope {
    let timers = timers.clone();
    create_scope(CartState::default(), move |store| Cart {
        store,
        timers,
        config,
        next_notification: Cell::new(1),
    })
}

/// The enclosing cart, or `NotInScope` outside a cart provider.
pub fn use_cart() -> Result<Rc<Cart>, CartError> {
    Ok(use_scope::<CartState, Cart>()?.ops)
}

impl Cart {
    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    pub fn state(&self) -> Result<Rc<CartState>, CartError> {
        Ok(self.store.state()?)
    }

    pub fn items(&self) -> Result<Vec<LineItem>, CartError> {
        Ok(self.state()?.items().to_vec())
    }

    pub fn item(&self, id: ProductId) -> Result<Option<LineItem>, CartError> {
        Ok(self.state()?.item(id).cloned())
    }

    pub fn add_to_cart(&self, product: &Product) -> Result<(), CartError> {
        if let Err(e) = product.validate() {
            log::warn!("add_to_cart rejected: {e}");
            return Err(e);
        }
        self.commit(format!("Added {} to cart", product.name), |s| {
            s.with_added(product)
        })?;
        Ok(())
    }

    pub fn remove_from_cart(&self, id: ProductId) -> Result<(), CartError> {
        self.commit("Item removed from cart".to_string(), |s| s.without_item(id))?;
        Ok(())
    }

    /// Sets the quantity of an item already in the cart. Zero or less removes it.
    pub fn update_quantity(&self, id: ProductId, quantity: i64) -> Result<(), CartError> {
        if quantity <= 0 {
            return self.remove_from_cart(id);
        }
        let quantity = u32::try_from(quantity).map_err(|_| {
            log::warn!("update_quantity rejected: {quantity} for item {id}");
            CartError::InvalidQuantity(quantity)
        })?;
        self.store.try_replace_with(|s| s.with_quantity(id, quantity))?;
        Ok(())
    }

    pub fn clear_cart(&self) -> Result<(), CartError> {
        self.commit("Cart cleared".to_string(), CartState::cleared)?;
        Ok(())
    }

    pub fn total(&self) -> Result<Money, CartError> {
        self.state()?.total().inspect_err(|_| log::warn!("cart total overflowed"))
    }

    pub fn item_count(&self) -> Result<u32, CartError> {
        self.state()?
            .item_count()
            .inspect_err(|_| log::warn!("cart item count overflowed"))
    }

    pub fn is_in_cart(&self, id: ProductId) -> Result<bool, CartError> {
        Ok(self.state()?.is_in_cart(id))
    }

    /// Returns the discounted total without touching the cart; the caller
    /// decides what to do with it.
    pub fn apply_discount(&self, percent: f64) -> Result<Money, CartError> {
        if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
            log::warn!("apply_discount rejected: {percent}%");
            return Err(CartError::InvalidDiscount(percent));
        }
        let total = self.total()?;
        let discounted = total.apply_percentage_discount(percent);
        let saved = total - discounted;
        self.commit(format!("Discount applied! Saved {saved}"), CartState::clone)?;
        Ok(discounted)
    }

    pub fn notifications(&self) -> Result<Vec<Notification>, CartError> {
        Ok(self.state()?.notifications().to_vec())
    }

    /// Removes the notification now and cancels its pending expiry.
    /// Returns `false` if it was already gone.
    pub fn dismiss_notification(&self, id: NotificationId) -> Result<bool, CartError> {
        let state = self.state()?;
        let Some(notification) = state.notifications().iter().find(|n| n.id == id) else {
            return Ok(false);
        };
        self.timers.cancel(notification.expiry);
        Ok(self.store.try_replace_with(|s| s.without_notification(id))?)
    }

    /// Attaches a consumer that runs after every change.
    pub fn observe(&self, f: impl Fn(&Rc<CartState>) + 'static) -> Result<Dispose, CartError> {
        Ok(self.store.observe(f)?)
    }

    /// Applies `change` and posts `message` as one state replacement, so
    /// consumers never see the change without its notification.
    fn commit(
        &self,
        message: String,
        change: impl FnOnce(&CartState) -> CartState,
    ) -> Result<NotificationId, ScopeError> {
        let scope = self.store.scope()?;
        let id = NotificationId(self.next_notification.get());
        self.next_notification.set(id.0 + 1);

        let expiry = {
            let store = self.store.clone();
            self.timers
                .schedule_in(&scope, self.config.notification_ttl, move || {
                    match store.try_replace_with(|s| s.without_notification(id)) {
                        Ok(true) => log::debug!("notification {id} expired"),
                        Ok(false) => {}
                        Err(_) => log::trace!("notification {id} expired after its cart"),
                    }
                })
        };

        log::debug!("notification {id}: {message}");
        let notification = Notification {
            id,
            message,
            created_at: self.timers.now(),
            expiry,
        };
        if let Err(e) = self
            .store
            .replace_with(|s| change(s).with_notification(notification))
        {
            self.timers.cancel(expiry);
            return Err(e);
        }
        Ok(id)
    }
}
