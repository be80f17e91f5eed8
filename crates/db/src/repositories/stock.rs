//! Stock repository: expiry-ledger writes.
//!
//! Every mutation here appends exactly one movement event inside the same
//! transaction, keeping the ledger and the movement log consistent.

use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    ModelTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use thiserror::Error;
use uuid::Uuid;

use stockfarm_core::cart::CheckoutCart;
use stockfarm_core::movement::MovementEvent;
use stockfarm_core::stock::{ExpiryLot, StockError, StockService, WithdrawalPlan};

use super::movement::append_event;
use crate::entities::{products, stock_lots};

/// Stock write failures.
#[derive(Debug, Error)]
pub enum StockWriteError {
    /// Underlying database failure.
    #[error(transparent)]
    Db(#[from] DbErr),

    /// Domain rule violation (insufficient stock, bad quantity) for a
    /// specific product.
    #[error("product {product_id}: {source}")]
    Stock {
        product_id: Uuid,
        #[source]
        source: StockError,
    },

    /// Lot missing or owned by another pharmacy's product.
    #[error("lot {0} not found")]
    LotNotFound(Uuid),
}

/// Stock repository for ledger mutations, always pharmacy-scoped.
#[derive(Debug, Clone)]
pub struct StockRepository {
    db: DatabaseConnection,
}

impl StockRepository {
    /// Creates a new stock repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// All lots of a product in FEFO order (soonest expiration first, lot id
    /// breaking ties).
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn lots_for_product(
        &self,
        product_id: Uuid,
    ) -> Result<Vec<stock_lots::Model>, DbErr> {
        stock_lots::Entity::find()
            .filter(stock_lots::Column::ProductId.eq(product_id))
            .order_by_asc(stock_lots::Column::ExpirationDate)
            .order_by_asc(stock_lots::Column::Id)
            .all(&self.db)
            .await
    }

    /// Receives a new lot. Same-expiration additions are never merged: each
    /// receipt is a distinct lot.
    ///
    /// # Errors
    ///
    /// Rejects non-positive quantities; otherwise fails only on database
    /// errors.
    pub async fn add_lot(
        &self,
        pharmacy_id: Uuid,
        product_id: Uuid,
        expiration_date: NaiveDate,
        quantity: i64,
    ) -> Result<stock_lots::Model, StockWriteError> {
        if quantity <= 0 {
            return Err(StockWriteError::Stock {
                product_id,
                source: StockError::NonPositiveQuantity(quantity),
            });
        }

        let txn = self.db.begin().await?;

        let lot = stock_lots::ActiveModel {
            id: Set(Uuid::now_v7()),
            product_id: Set(product_id),
            expiration_date: Set(expiration_date),
            quantity_remaining: Set(quantity),
            created_at: Set(chrono::Utc::now().into()),
        };
        let lot = lot.insert(&txn).await?;

        append_event(
            &txn,
            pharmacy_id,
            &MovementEvent::added(product_id, quantity, chrono::Utc::now()),
        )
        .await?;

        txn.commit().await?;

        Ok(lot)
    }

    /// Overrides a lot's remaining quantity and, when given, its expiration
    /// date (correcting a mis-entered date re-sorts the lot in FEFO order).
    /// Writes one `edited` movement event carrying the signed quantity delta;
    /// a pure date correction writes nothing. Editing the quantity to zero
    /// deletes the lot and returns `None`.
    ///
    /// # Errors
    ///
    /// Rejects negative quantities and unknown lots.
    pub async fn edit_lot(
        &self,
        pharmacy_id: Uuid,
        lot_id: Uuid,
        new_quantity: i64,
        new_expiration_date: Option<NaiveDate>,
    ) -> Result<Option<stock_lots::Model>, StockWriteError> {
        let txn = self.db.begin().await?;

        let lot = stock_lots::Entity::find_by_id(lot_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(StockWriteError::LotNotFound(lot_id))?;

        // Tenant check: the lot's product must belong to this pharmacy.
        products::Entity::find_by_id(lot.product_id)
            .filter(products::Column::PharmacyId.eq(pharmacy_id))
            .one(&txn)
            .await?
            .ok_or(StockWriteError::LotNotFound(lot_id))?;

        if new_quantity < 0 {
            return Err(StockWriteError::Stock {
                product_id: lot.product_id,
                source: StockError::NonPositiveQuantity(new_quantity),
            });
        }

        let delta = new_quantity - lot.quantity_remaining;
        let product_id = lot.product_id;

        let updated = if new_quantity == 0 {
            lot.delete(&txn).await?;
            None
        } else {
            let mut lot: stock_lots::ActiveModel = lot.into();
            lot.quantity_remaining = Set(new_quantity);
            if let Some(date) = new_expiration_date {
                lot.expiration_date = Set(date);
            }
            Some(lot.update(&txn).await?)
        };

        if delta != 0 {
            append_event(
                &txn,
                pharmacy_id,
                &MovementEvent::edited(product_id, delta, chrono::Utc::now()),
            )
            .await?;
        }

        txn.commit().await?;

        Ok(updated)
    }

    /// Finalizes a checkout: one transaction covering every cart item. Any
    /// shortfall aborts the whole sale.
    ///
    /// # Errors
    ///
    /// Returns the first failing product's shortfall; the transaction rolls
    /// back and no lot is touched.
    pub async fn checkout(
        &self,
        pharmacy_id: Uuid,
        cart: &CheckoutCart,
    ) -> Result<Vec<WithdrawalPlan>, StockWriteError> {
        let txn = self.db.begin().await?;

        let mut plans = Vec::with_capacity(cart.items().len());
        for item in cart.items() {
            let plan =
                Self::withdraw_in_txn(&txn, pharmacy_id, item.product_id, item.quantity).await?;
            plans.push(plan);
        }

        txn.commit().await?;

        Ok(plans)
    }

    /// Locks the product's lots, plans FEFO consumption against the locked
    /// snapshot, and applies the plan. Depleted lots are deleted.
    async fn withdraw_in_txn(
        txn: &DatabaseTransaction,
        pharmacy_id: Uuid,
        product_id: Uuid,
        quantity: i64,
    ) -> Result<WithdrawalPlan, StockWriteError> {
        let lots = stock_lots::Entity::find()
            .filter(stock_lots::Column::ProductId.eq(product_id))
            .order_by_asc(stock_lots::Column::ExpirationDate)
            .order_by_asc(stock_lots::Column::Id)
            .lock_exclusive()
            .all(txn)
            .await?;

        let snapshot: Vec<ExpiryLot> = lots.iter().map(stock_lots::Model::to_expiry_lot).collect();

        let plan = StockService::plan_withdrawal(&snapshot, quantity)
            .map_err(|source| StockWriteError::Stock { product_id, source })?;

        for draw in &plan.draws {
            if draw.remaining_after == 0 {
                stock_lots::Entity::delete_by_id(draw.lot_id).exec(txn).await?;
            } else {
                let mut lot: stock_lots::ActiveModel = lots
                    .iter()
                    .find(|l| l.id == draw.lot_id)
                    .cloned()
                    .ok_or(StockWriteError::LotNotFound(draw.lot_id))?
                    .into();
                lot.quantity_remaining = Set(draw.remaining_after);
                lot.update(txn).await?;
            }
        }

        append_event(
            txn,
            pharmacy_id,
            &MovementEvent::removed(product_id, quantity, chrono::Utc::now()),
        )
        .await?;

        Ok(plan)
    }
}
