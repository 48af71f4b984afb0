use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CartError;
use crate::money::Money;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Catalog entry. The catalog itself belongs to whoever builds the page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(rename = "price_cents")]
    pub price: Money,
    #[serde(default)]
    pub description: String,
}

impl Product {
    pub fn new(id: u32, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: ProductId(id),
            name: name.into(),
            price,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub(crate) fn validate(&self) -> Result<(), CartError> {
        if self.name.trim().is_empty() {
            return Err(CartError::InvalidProduct {
                id: self.id,
                reason: "name is empty",
            });
        }
        if self.price.is_negative() {
            return Err(CartError::InvalidProduct {
                id: self.id,
                reason: "price is negative",
            });
        }
        Ok(())
    }
}

/// A product in the cart. `quantity` is never zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineItem {
    pub product: Product,
    pub quantity: u32,
}

impl LineItem {
    pub fn id(&self) -> ProductId {
        self.product.id
    }

    pub fn line_total(&self) -> Result<Money, CartError> {
        self.product
            .price
            .checked_multiply_quantity(self.quantity)
            .ok_or(CartError::Overflow)
    }
}
