//! Accounts

pub mod records;
pub(crate) mod repository;
