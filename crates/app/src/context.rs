//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    config::AppConfig,
    database::{self, Db},
    documents::DocumentStore,
    domain::{
        carts::{CartsService, PgCartsService},
        catalog::{CatalogService, PgCatalogService},
        checkout::{CheckoutService, PgCheckoutService},
        notifications::{MongoNotificationsService, NotificationsService},
        orders::{OrdersService, PgOrdersService},
        ratings::{MongoRatingsService, RatingsService},
        reviews::{MongoReviewsService, ReviewsService},
        wishlist::{PgWishlistService, WishlistService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to connect to document store")]
    DocumentStore(#[source] mongodb::error::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub catalog: Arc<dyn CatalogService>,
    pub carts: Arc<dyn CartsService>,
    pub checkout: Arc<dyn CheckoutService>,
    pub orders: Arc<dyn OrdersService>,
    pub reviews: Arc<dyn ReviewsService>,
    pub ratings: Arc<dyn RatingsService>,
    pub notifications: Arc<dyn NotificationsService>,
    pub wishlist: Arc<dyn WishlistService>,
}

impl AppContext {
    /// Connect both stores and build every service.
    ///
    /// # Errors
    ///
    /// Returns an error when either store cannot be reached or the document indexes
    /// cannot be created.
    pub async fn connect(config: &AppConfig) -> Result<Self, AppInitError> {
        let pool = database::connect(&config.database.database_url)
            .await
            .map_err(AppInitError::Database)?;

        let documents = DocumentStore::connect(
            &config.documents.mongodb_url,
            &config.documents.mongodb_database,
        )
        .await
        .map_err(AppInitError::DocumentStore)?;

        documents
            .ensure_indexes()
            .await
            .map_err(AppInitError::DocumentStore)?;

        Ok(Self::new(Db::new(pool), &documents))
    }

    #[must_use]
    pub fn new(db: Db, documents: &DocumentStore) -> Self {
        let notifications: Arc<dyn NotificationsService> =
            Arc::new(MongoNotificationsService::new(documents));

        Self {
            catalog: Arc::new(PgCatalogService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone())),
            wishlist: Arc::new(PgWishlistService::new(db.clone())),
            checkout: Arc::new(PgCheckoutService::new(db.clone(), notifications.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone(), notifications.clone())),
            reviews: Arc::new(MongoReviewsService::new(
                db,
                documents,
                notifications.clone(),
            )),
            ratings: Arc::new(MongoRatingsService::new(documents)),
            notifications,
        }
    }
}
