//! Catalog Repositories

mod discounts;
mod products;

pub(crate) use discounts::PgDiscountsRepository;
pub(crate) use products::PgProductsRepository;
