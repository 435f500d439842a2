use bazaar_app::{
    config::AppConfig, context::AppContext, domain::ratings::records::RatingSummary, observability,
};
use clap::{Parser, Subcommand};

mod cart;
mod catalog;
mod checkout;
mod db;
mod notifications;
mod orders;
mod reviews;
mod wishlist;

#[derive(Debug, Parser)]
#[command(name = "bazaar", about = "Bazaar marketplace CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Catalog(catalog::CatalogCommand),
    Cart(cart::CartCommand),
    Wishlist(wishlist::WishlistCommand),
    Checkout(checkout::CheckoutArgs),
    Buy(checkout::BuyArgs),
    Orders(orders::OrdersCommand),
    Reviews(reviews::ReviewsCommand),
    Notifications(notifications::NotificationsCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        observability::init(&self.config.logging)
            .map_err(|error| format!("failed to initialise logging: {error}"))?;

        match self.command {
            Commands::Db(command) => db::run(&self.config, command).await,
            command => {
                let ctx = AppContext::connect(&self.config)
                    .await
                    .map_err(|error| format!("{error}: {}", source_message(&error)))?;

                run_with_context(&ctx, command).await
            }
        }
    }
}

async fn run_with_context(ctx: &AppContext, command: Commands) -> Result<(), String> {
    match command {
        Commands::Db(_) => {
            Err("db commands do not run against the application context".to_string())
        }
        Commands::Catalog(command) => catalog::run(ctx, command).await,
        Commands::Cart(command) => cart::run(ctx, command).await,
        Commands::Wishlist(command) => wishlist::run(ctx, command).await,
        Commands::Checkout(args) => checkout::run_checkout(ctx, args).await,
        Commands::Buy(args) => checkout::run_buy(ctx, args).await,
        Commands::Orders(command) => orders::run(ctx, command).await,
        Commands::Reviews(command) => reviews::run(ctx, command).await,
        Commands::Notifications(command) => notifications::run(ctx, command).await,
    }
}

fn source_message(error: &dyn std::error::Error) -> String {
    error
        .source()
        .map_or_else(String::new, ToString::to_string)
}

/// Rating as shown next to a product, e.g. `4.5 (2 reviews)`.
fn format_rating(summary: &RatingSummary) -> String {
    format!("{:.1} ({} reviews)", summary.average, summary.count)
}
