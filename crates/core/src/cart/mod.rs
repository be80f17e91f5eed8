//! Checkout cart validation.
//!
//! A cart is a transient value object assembled per checkout request. It is
//! validated up front so the withdrawal transaction only ever sees a
//! well-formed set of line items.

use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

/// Cart validation failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// Checkout submitted with no line items.
    #[error("cart is empty")]
    Empty,
    /// A line item requested a zero or negative quantity.
    #[error("invalid quantity {quantity} for product {product_id}")]
    NonPositiveQuantity { product_id: Uuid, quantity: i64 },
    /// The same product appeared in more than one line item.
    #[error("product {0} appears more than once")]
    DuplicateProduct(Uuid),
}

/// One line item in a checkout request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CartItem {
    /// Product to withdraw.
    pub product_id: Uuid,
    /// Units to withdraw, must be positive.
    pub quantity: i64,
}

/// A validated set of checkout line items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutCart {
    items: Vec<CartItem>,
}

impl CheckoutCart {
    /// Validates raw line items into a cart.
    ///
    /// Rejects empty carts, non-positive quantities, and repeated products;
    /// line-item order is preserved.
    pub fn new(items: Vec<CartItem>) -> Result<Self, CartError> {
        if items.is_empty() {
            return Err(CartError::Empty);
        }

        let mut seen = Vec::with_capacity(items.len());
        for item in &items {
            if item.quantity <= 0 {
                return Err(CartError::NonPositiveQuantity {
                    product_id: item.product_id,
                    quantity: item.quantity,
                });
            }
            if seen.contains(&item.product_id) {
                return Err(CartError::DuplicateProduct(item.product_id));
            }
            seen.push(item.product_id);
        }

        Ok(Self { items })
    }

    /// Validated line items, in submission order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Total units across all line items.
    #[must_use]
    pub fn total_units(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product_id: Uuid, quantity: i64) -> CartItem {
        CartItem {
            product_id,
            quantity,
        }
    }

    #[test]
    fn test_valid_cart() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let cart = CheckoutCart::new(vec![item(a, 2), item(b, 5)]).unwrap();
        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.total_units(), 7);
        // Order preserved.
        assert_eq!(cart.items()[0].product_id, a);
    }

    #[test]
    fn test_empty_cart_rejected() {
        assert_eq!(CheckoutCart::new(vec![]), Err(CartError::Empty));
    }

    #[test]
    fn test_non_positive_quantity_rejected() {
        let p = Uuid::new_v4();
        assert_eq!(
            CheckoutCart::new(vec![item(p, 0)]),
            Err(CartError::NonPositiveQuantity {
                product_id: p,
                quantity: 0
            })
        );
        assert!(matches!(
            CheckoutCart::new(vec![item(p, -4)]),
            Err(CartError::NonPositiveQuantity { quantity: -4, .. })
        ));
    }

    #[test]
    fn test_duplicate_product_rejected() {
        let p = Uuid::new_v4();
        let q = Uuid::new_v4();
        assert_eq!(
            CheckoutCart::new(vec![item(p, 1), item(q, 2), item(p, 3)]),
            Err(CartError::DuplicateProduct(p))
        );
    }
}
