//! Bazaar Domain Concerns

pub mod accounts;
pub mod carts;
pub mod catalog;
pub mod checkout;
pub mod notifications;
pub mod orders;
pub mod ratings;
pub mod reviews;
pub mod wishlist;
