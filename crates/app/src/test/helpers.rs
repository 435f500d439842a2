//! Test Helpers

use rust_decimal::Decimal;
use sqlx::{query, query_scalar};

use crate::{
    domain::{
        accounts::records::{SellerUuid, UserUuid},
        carts::{CartsService, CartsServiceError, data::NewCartItem, records::CartItemRecord},
        catalog::records::{CategoryUuid, DiscountUuid, ProductUuid},
        checkout::{CheckoutService, CheckoutServiceError, records::OrderReceipt},
        orders::records::PaymentMethod,
    },
    test::TestContext,
};

/// A storefront together with the account that owns it.
#[derive(Debug, Clone)]
pub(crate) struct SeededSeller {
    pub uuid: SellerUuid,
    pub user_uuid: UserUuid,
}

pub(crate) async fn seed_user(ctx: &TestContext, name: &str) -> UserUuid {
    let uuid = UserUuid::new();

    query("INSERT INTO users (uuid, name, email) VALUES ($1, $2, $3)")
        .bind(uuid.into_uuid())
        .bind(name)
        .bind(format!("{}@example.test", uuid.into_uuid().simple()))
        .execute(ctx.db.pool())
        .await
        .expect("Failed to seed user");

    uuid
}

pub(crate) async fn seed_seller(ctx: &TestContext, store_name: &str) -> SeededSeller {
    let user_uuid = seed_user(ctx, &format!("{store_name} Owner")).await;
    let uuid = SellerUuid::new();

    query("INSERT INTO sellers (uuid, user_uuid, store_name) VALUES ($1, $2, $3)")
        .bind(uuid.into_uuid())
        .bind(user_uuid.into_uuid())
        .bind(store_name)
        .execute(ctx.db.pool())
        .await
        .expect("Failed to seed seller");

    SeededSeller { uuid, user_uuid }
}

/// Seed a product in a category of its own.
pub(crate) async fn seed_product(
    ctx: &TestContext,
    seller: SellerUuid,
    name: &str,
    price: u64,
    stock: u32,
) -> ProductUuid {
    let category = CategoryUuid::new();

    query("INSERT INTO categories (uuid, name) VALUES ($1, $2)")
        .bind(category.into_uuid())
        .bind(format!("Category {category}"))
        .execute(ctx.db.pool())
        .await
        .expect("Failed to seed category");

    let uuid = ProductUuid::new();

    query(
        "INSERT INTO products (uuid, name, price, stock, category_uuid, seller_uuid) \
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(uuid.into_uuid())
    .bind(name)
    .bind(i64::try_from(price).expect("price fits in BIGINT"))
    .bind(i32::try_from(stock).expect("stock fits in INTEGER"))
    .bind(category.into_uuid())
    .bind(seller.into_uuid())
    .execute(ctx.db.pool())
    .await
    .expect("Failed to seed product");

    uuid
}

/// Seed a discount active from `starts_in_days` to `ends_in_days` relative to now.
pub(crate) async fn seed_discount(
    ctx: &TestContext,
    product: ProductUuid,
    percentage: Decimal,
    starts_in_days: i32,
    ends_in_days: i32,
) -> DiscountUuid {
    let uuid = DiscountUuid::new();

    query(
        "INSERT INTO discounts (uuid, product_uuid, percentage, starts_at, ends_at) \
         VALUES ($1, $2, $3, now() + make_interval(days => $4), now() + make_interval(days => $5))",
    )
    .bind(uuid.into_uuid())
    .bind(product.into_uuid())
    .bind(percentage)
    .bind(starts_in_days)
    .bind(ends_in_days)
    .execute(ctx.db.pool())
    .await
    .expect("Failed to seed discount");

    uuid
}

pub(crate) async fn product_stock(ctx: &TestContext, product: ProductUuid) -> u32 {
    let stock: i32 = query_scalar("SELECT stock FROM products WHERE uuid = $1")
        .bind(product.into_uuid())
        .fetch_one(ctx.db.pool())
        .await
        .expect("Failed to read product stock");

    u32::try_from(stock).expect("stock is never negative")
}

/// Change stock behind the services' back, as a concurrent buyer would.
pub(crate) async fn set_stock(ctx: &TestContext, product: ProductUuid, stock: u32) {
    query("UPDATE products SET stock = $2 WHERE uuid = $1")
        .bind(product.into_uuid())
        .bind(i32::try_from(stock).expect("stock fits in INTEGER"))
        .execute(ctx.db.pool())
        .await
        .expect("Failed to set product stock");
}

pub(crate) async fn count_rows(ctx: &TestContext, table: &'static str) -> i64 {
    query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(ctx.db.pool())
        .await
        .expect("Failed to count rows")
}

pub(crate) async fn add_to_cart(
    ctx: &TestContext,
    user: UserUuid,
    product: ProductUuid,
    quantity: u32,
) -> Result<CartItemRecord, CartsServiceError> {
    ctx.carts
        .add_item(
            user,
            NewCartItem {
                product_uuid: product,
                quantity,
            },
        )
        .await
}

/// Buy a product directly by bank transfer, leaving a successful payment.
pub(crate) async fn purchase(
    ctx: &TestContext,
    user: UserUuid,
    product: ProductUuid,
    quantity: u32,
) -> Result<OrderReceipt, CheckoutServiceError> {
    ctx.checkout
        .buy_now(user, product, quantity, PaymentMethod::BankTransfer)
        .await
}
