//! Checkout service.

use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::{
        accounts::records::{SellerUuid, UserUuid},
        carts::records::CartItemUuid,
        catalog::{
            records::{DiscountUuid, ProductUuid},
            repositories::{PgDiscountsRepository, PgProductsRepository},
        },
        checkout::{
            data::CheckoutLine,
            errors::CheckoutServiceError,
            pricing::{PricedLine, order_totals, price_line},
            records::OrderReceipt,
            repository::PgCheckoutRepository,
        },
        notifications::{
            NotificationsService, data::NewNotification, notify_best_effort,
            records::NotificationKind,
        },
        orders::{
            data::{NewOrder, NewOrderLine},
            records::{PaymentMethod, PaymentStatus},
            repository::PgOrdersRepository,
        },
    },
};

pub struct PgCheckoutService {
    db: Db,
    checkout: PgCheckoutRepository,
    products: PgProductsRepository,
    discounts: PgDiscountsRepository,
    orders: PgOrdersRepository,
    notifications: Arc<dyn NotificationsService>,
}

impl PgCheckoutService {
    #[must_use]
    pub fn new(db: Db, notifications: Arc<dyn NotificationsService>) -> Self {
        Self {
            db,
            checkout: PgCheckoutRepository::new(),
            products: PgProductsRepository::new(),
            discounts: PgDiscountsRepository::new(),
            orders: PgOrdersRepository::new(),
            notifications,
        }
    }

    /// Price, persist and pay for `lines`, decrement stock and clear the cart rows they
    /// came from. Nothing is written unless every step succeeds.
    async fn place_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        lines: &[CheckoutLine],
        method: PaymentMethod,
    ) -> Result<OrderReceipt, CheckoutServiceError> {
        if let Some(short) = lines.iter().find(|line| line.quantity > line.stock) {
            return Err(CheckoutServiceError::InsufficientStock {
                product: short.product_uuid,
            });
        }

        let now = Timestamp::now();

        let mut priced: Vec<PricedLine> = Vec::with_capacity(lines.len());
        let mut promo_uuids: Vec<DiscountUuid> = Vec::new();

        for line in lines {
            let discount = self
                .discounts
                .active_discount(tx, line.product_uuid, now)
                .await?;

            priced.push(price_line(
                line.unit_price,
                line.quantity,
                discount.as_ref().map(|d| d.percentage),
            )?);

            if let Some(discount) = discount
                && !promo_uuids.contains(&discount.uuid)
            {
                promo_uuids.push(discount.uuid);
            }
        }

        let totals = order_totals(&priced)?;

        let order = self
            .orders
            .create_order(
                tx,
                &NewOrder {
                    user_uuid: user,
                    subtotal: totals.subtotal,
                    discount_total: totals.discount_total,
                    total_price: totals.total_price,
                    promo_uuids,
                },
            )
            .await?;

        Span::current().record("order_uuid", tracing::field::display(order.uuid));

        let mut order_lines = Vec::with_capacity(lines.len());

        for line in lines {
            order_lines.push(
                self.orders
                    .create_order_line(
                        tx,
                        order.uuid,
                        &NewOrderLine {
                            product_uuid: line.product_uuid,
                            quantity: line.quantity,
                            unit_price: line.unit_price,
                        },
                    )
                    .await?,
            );
        }

        let payment = self
            .orders
            .create_payment(tx, order.uuid, method, PaymentStatus::Success)
            .await?;

        // Stock read above may be stale; the decrement re-checks it under the row lock.
        // Product rows are locked in uuid order so overlapping checkouts cannot deadlock.
        let mut by_product: Vec<&CheckoutLine> = lines.iter().collect();
        by_product.sort_by_key(|line| line.product_uuid);

        for line in by_product {
            let decremented = self
                .products
                .decrement_stock(tx, line.product_uuid, line.quantity)
                .await?;

            if !decremented {
                return Err(CheckoutServiceError::InsufficientStock {
                    product: line.product_uuid,
                });
            }
        }

        let cart_items: Vec<CartItemUuid> =
            lines.iter().filter_map(|line| line.cart_item_uuid).collect();

        if !cart_items.is_empty() {
            let deleted = self
                .checkout
                .delete_cart_items(tx, user, &cart_items)
                .await?;

            if usize::try_from(deleted).ok() != Some(cart_items.len()) {
                return Err(CheckoutServiceError::CartChanged);
            }
        }

        Ok(OrderReceipt {
            order,
            lines: order_lines,
            payment,
        })
    }

    /// One notification per involved seller, then one confirmation to the buyer.
    async fn send_order_notifications(&self, lines: &[CheckoutLine], receipt: &OrderReceipt) {
        let mut by_seller: BTreeMap<SellerUuid, (UserUuid, Vec<&CheckoutLine>)> = BTreeMap::new();

        for line in lines {
            by_seller
                .entry(line.seller_uuid)
                .or_insert_with(|| (line.seller_user_uuid, Vec::new()))
                .1
                .push(line);
        }

        for (seller_user, seller_lines) in by_seller.into_values() {
            let items = seller_lines
                .iter()
                .map(|line| format!("{} x{}", line.product_name, line.quantity))
                .collect::<Vec<_>>()
                .join(", ");

            notify_best_effort(
                self.notifications.as_ref(),
                NewNotification::new(
                    seller_user,
                    NotificationKind::Order,
                    "New order",
                    format!("Order {} includes: {items}.", receipt.order.uuid),
                ),
            )
            .await;
        }

        notify_best_effort(
            self.notifications.as_ref(),
            NewNotification::new(
                receipt.order.user_uuid,
                NotificationKind::Order,
                "Order confirmed",
                format!(
                    "Order {} for {} has been placed and paid by {}.",
                    receipt.order.uuid, receipt.order.total_price, receipt.payment.method
                ),
            ),
        )
        .await;
    }
}

#[async_trait]
impl CheckoutService for PgCheckoutService {
    #[tracing::instrument(
        name = "checkout.service.checkout",
        skip(self),
        fields(
            user_uuid = %user,
            payment_method = %method,
            order_uuid = tracing::field::Empty,
            line_count = tracing::field::Empty
        ),
        err
    )]
    async fn checkout(
        &self,
        user: UserUuid,
        method: PaymentMethod,
    ) -> Result<OrderReceipt, CheckoutServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let lines = self.checkout.lock_cart_lines(&mut tx, user).await?;

        if lines.is_empty() {
            return Err(CheckoutServiceError::EmptyCart);
        }

        Span::current().record("line_count", lines.len());

        let receipt = self.place_order(&mut tx, user, &lines, method).await?;

        tx.commit().await?;

        info!(
            order_uuid = %receipt.order.uuid,
            total_price = receipt.order.total_price,
            "placed order from cart"
        );

        self.send_order_notifications(&lines, &receipt).await;

        Ok(receipt)
    }

    #[tracing::instrument(
        name = "checkout.service.buy_now",
        skip(self),
        fields(
            user_uuid = %user,
            product_uuid = %product,
            payment_method = %method,
            order_uuid = tracing::field::Empty
        ),
        err
    )]
    async fn buy_now(
        &self,
        user: UserUuid,
        product: ProductUuid,
        quantity: u32,
        method: PaymentMethod,
    ) -> Result<OrderReceipt, CheckoutServiceError> {
        if quantity == 0 {
            return Err(CheckoutServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin_transaction().await?;

        let line = self
            .checkout
            .get_direct_line(&mut tx, product, quantity)
            .await?
            .ok_or(CheckoutServiceError::ProductNotFound)?;

        let lines = [line];

        let receipt = self.place_order(&mut tx, user, &lines, method).await?;

        tx.commit().await?;

        info!(
            order_uuid = %receipt.order.uuid,
            total_price = receipt.order.total_price,
            "placed direct order"
        );

        self.send_order_notifications(&lines, &receipt).await;

        Ok(receipt)
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Turn the user's whole cart into a paid order.
    async fn checkout(
        &self,
        user: UserUuid,
        method: PaymentMethod,
    ) -> Result<OrderReceipt, CheckoutServiceError>;

    /// Purchase a single product directly, leaving the cart untouched.
    async fn buy_now(
        &self,
        user: UserUuid,
        product: ProductUuid,
        quantity: u32,
        method: PaymentMethod,
    ) -> Result<OrderReceipt, CheckoutServiceError>;
}
