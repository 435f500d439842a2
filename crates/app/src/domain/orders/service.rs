//! Orders service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        accounts::records::{SellerUuid, UserUuid},
        notifications::{
            NotificationsService, data::NewNotification, notify_best_effort,
            records::NotificationKind,
        },
        orders::{
            errors::OrdersServiceError,
            records::{OrderSummary, PaymentRecord, PaymentStatus, PaymentUuid},
            repository::PgOrdersRepository,
        },
    },
};

pub struct PgOrdersService {
    db: Db,
    orders: PgOrdersRepository,
    notifications: Arc<dyn NotificationsService>,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, notifications: Arc<dyn NotificationsService>) -> Self {
        Self {
            db,
            orders: PgOrdersRepository::new(),
            notifications,
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    #[tracing::instrument(
        name = "orders.service.order_history",
        skip(self),
        fields(user_uuid = %user),
        err
    )]
    async fn order_history(&self, user: UserUuid) -> Result<Vec<OrderSummary>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let orders = self.orders.order_history(&mut tx, user).await?;

        let mut history = Vec::with_capacity(orders.len());

        for (order, payment) in orders {
            let lines = self.orders.list_order_lines(&mut tx, order.uuid).await?;

            history.push(OrderSummary {
                order,
                lines,
                payment,
            });
        }

        tx.commit().await?;

        Ok(history)
    }

    #[tracing::instrument(
        name = "orders.service.update_payment_status",
        skip(self),
        fields(seller_uuid = %seller, payment_uuid = %payment, status = %status),
        err
    )]
    async fn update_payment_status(
        &self,
        seller: SellerUuid,
        payment: PaymentUuid,
        status: PaymentStatus,
    ) -> Result<PaymentRecord, OrdersServiceError> {
        if !status.is_seller_settable() {
            return Err(OrdersServiceError::InvalidStatus(status));
        }

        let mut tx = self.db.begin_transaction().await?;

        let locked = self
            .orders
            .get_payment_for_seller_update(&mut tx, seller, payment)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        let current = locked.payment.status;

        if !current.is_open() {
            return Err(OrdersServiceError::InvalidTransition {
                from: current,
                to: status,
            });
        }

        let updated = self
            .orders
            .update_payment_status(&mut tx, payment, status)
            .await?;

        tx.commit().await?;

        info!(order_uuid = %updated.order_uuid, from = %current, to = %status, "updated payment status");

        notify_best_effort(
            self.notifications.as_ref(),
            NewNotification::new(
                locked.buyer_uuid,
                NotificationKind::Order,
                "Payment status updated",
                format!(
                    "Payment for order {} is now {status}.",
                    updated.order_uuid
                ),
            ),
        )
        .await;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// The user's orders, newest first, with their lines and payment.
    async fn order_history(&self, user: UserUuid) -> Result<Vec<OrderSummary>, OrdersServiceError>;

    /// Move a payment to `paid`, `failed` or `cancelled` on behalf of a seller whose
    /// product is in the order.
    async fn update_payment_status(
        &self,
        seller: SellerUuid,
        payment: PaymentUuid,
        status: PaymentStatus,
    ) -> Result<PaymentRecord, OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::orders::records::PaymentMethod,
        test::{TestContext, helpers},
    };

    use super::*;

    #[tokio::test]
    async fn order_history_is_newest_first_with_lines_and_payment() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::seed_user(&ctx, "Budi").await;
        let seller = helpers::seed_seller(&ctx, "Toko Maju").await;
        let product = helpers::seed_product(&ctx, seller.uuid, "Kopi", 45_000, 10).await;

        let first = helpers::purchase(&ctx, user, product, 1).await?;
        let second = helpers::purchase(&ctx, user, product, 2).await?;

        let history = ctx.orders.order_history(user).await?;

        let uuids: Vec<_> = history.iter().map(|s| s.order.uuid).collect();

        assert_eq!(uuids, vec![second.order.uuid, first.order.uuid]);

        let latest = history.first().ok_or("history should not be empty")?;

        assert_eq!(latest.lines.len(), 1);
        assert_eq!(latest.lines.first().map(|l| l.quantity), Some(2));
        assert_eq!(
            latest.payment.as_ref().map(|p| (p.method, p.status)),
            Some((PaymentMethod::BankTransfer, PaymentStatus::Success))
        );

        Ok(())
    }

    #[tokio::test]
    async fn order_history_excludes_other_users() -> TestResult {
        let ctx = TestContext::new().await;
        let buyer = helpers::seed_user(&ctx, "Budi").await;
        let other = helpers::seed_user(&ctx, "Sari").await;
        let seller = helpers::seed_seller(&ctx, "Toko Maju").await;
        let product = helpers::seed_product(&ctx, seller.uuid, "Kopi", 45_000, 10).await;

        helpers::purchase(&ctx, buyer, product, 1).await?;

        assert!(ctx.orders.order_history(other).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn seller_can_mark_payment_failed_and_buyer_is_notified() -> TestResult {
        let ctx = TestContext::new().await;
        let buyer = helpers::seed_user(&ctx, "Budi").await;
        let seller = helpers::seed_seller(&ctx, "Toko Maju").await;
        let product = helpers::seed_product(&ctx, seller.uuid, "Kopi", 45_000, 10).await;
        let receipt = helpers::purchase(&ctx, buyer, product, 1).await?;

        let before = ctx.notifications.list_for_user(buyer, false).await?.len();

        let updated = ctx
            .orders
            .update_payment_status(seller.uuid, receipt.payment.uuid, PaymentStatus::Failed)
            .await?;

        assert_eq!(updated.status, PaymentStatus::Failed);
        assert!(updated.updated_at >= receipt.payment.updated_at);

        let after = ctx.notifications.list_for_user(buyer, false).await?;

        assert_eq!(after.len(), before + 1);
        assert_eq!(
            after.first().map(|n| n.title.as_str()),
            Some("Payment status updated")
        );

        Ok(())
    }

    #[tokio::test]
    async fn unrelated_seller_cannot_update_payment() -> TestResult {
        let ctx = TestContext::new().await;
        let buyer = helpers::seed_user(&ctx, "Budi").await;
        let seller = helpers::seed_seller(&ctx, "Toko Maju").await;
        let stranger = helpers::seed_seller(&ctx, "Toko Jaya").await;
        let product = helpers::seed_product(&ctx, seller.uuid, "Kopi", 45_000, 10).await;
        let receipt = helpers::purchase(&ctx, buyer, product, 1).await?;

        let result = ctx
            .orders
            .update_payment_status(stranger.uuid, receipt.payment.uuid, PaymentStatus::Paid)
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn payment_cannot_be_set_back_to_pending() -> TestResult {
        let ctx = TestContext::new().await;
        let buyer = helpers::seed_user(&ctx, "Budi").await;
        let seller = helpers::seed_seller(&ctx, "Toko Maju").await;
        let product = helpers::seed_product(&ctx, seller.uuid, "Kopi", 45_000, 10).await;
        let receipt = helpers::purchase(&ctx, buyer, product, 1).await?;

        let result = ctx
            .orders
            .update_payment_status(seller.uuid, receipt.payment.uuid, PaymentStatus::Pending)
            .await;

        assert!(
            matches!(
                result,
                Err(OrdersServiceError::InvalidStatus(PaymentStatus::Pending))
            ),
            "expected InvalidStatus, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn settled_payment_cannot_change_again() -> TestResult {
        let ctx = TestContext::new().await;
        let buyer = helpers::seed_user(&ctx, "Budi").await;
        let seller = helpers::seed_seller(&ctx, "Toko Maju").await;
        let product = helpers::seed_product(&ctx, seller.uuid, "Kopi", 45_000, 10).await;
        let receipt = helpers::purchase(&ctx, buyer, product, 1).await?;

        ctx.orders
            .update_payment_status(seller.uuid, receipt.payment.uuid, PaymentStatus::Cancelled)
            .await?;

        let result = ctx
            .orders
            .update_payment_status(seller.uuid, receipt.payment.uuid, PaymentStatus::Paid)
            .await;

        assert!(
            matches!(
                result,
                Err(OrdersServiceError::InvalidTransition {
                    from: PaymentStatus::Cancelled,
                    to: PaymentStatus::Paid,
                })
            ),
            "expected InvalidTransition, got {result:?}"
        );

        Ok(())
    }
}
