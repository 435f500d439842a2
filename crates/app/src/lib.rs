//! Marketplace checkout, review and notification services.

pub mod config;
pub mod context;
pub mod database;
pub mod documents;
pub mod domain;
pub mod observability;

#[cfg(test)]
mod test;

pub mod uuids;
