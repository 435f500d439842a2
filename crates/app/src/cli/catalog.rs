use bazaar_app::{
    context::AppContext,
    domain::{
        accounts::records::SellerUuid,
        catalog::records::{ProductListing, ProductUuid},
    },
};
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub(crate) struct CatalogCommand {
    #[command(subcommand)]
    command: CatalogSubcommand,
}

#[derive(Debug, Subcommand)]
enum CatalogSubcommand {
    /// List products with their rating, newest first
    List(ListProductsArgs),
    /// Show one product with its rating
    Show(ShowProductArgs),
}

#[derive(Debug, Args)]
struct ListProductsArgs {
    /// Only list products sold by this seller
    #[arg(long)]
    seller: Option<SellerUuid>,
}

#[derive(Debug, Args)]
struct ShowProductArgs {
    /// Product UUID
    #[arg(long)]
    product: ProductUuid,
}

pub(crate) async fn run(ctx: &AppContext, command: CatalogCommand) -> Result<(), String> {
    match command.command {
        CatalogSubcommand::List(args) => list(ctx, args).await,
        CatalogSubcommand::Show(args) => show(ctx, args).await,
    }
}

async fn list(ctx: &AppContext, args: ListProductsArgs) -> Result<(), String> {
    let listings = match args.seller {
        Some(seller) => ctx.catalog.list_seller_products(seller).await,
        None => ctx.catalog.list_products().await,
    }
    .map_err(|error| format!("failed to list products: {error}"))?;

    if listings.is_empty() {
        println!("no products found");
        return Ok(());
    }

    for listing in &listings {
        let rating = ctx
            .ratings
            .average_rating(listing.product.uuid)
            .await
            .map_err(|error| format!("failed to load rating: {error}"))?;

        print_listing(listing);
        println!("rating: {}", super::format_rating(&rating));
        println!();
    }

    Ok(())
}

async fn show(ctx: &AppContext, args: ShowProductArgs) -> Result<(), String> {
    let listing = ctx
        .catalog
        .get_product(args.product)
        .await
        .map_err(|error| format!("failed to load product: {error}"))?;

    let rating = ctx
        .ratings
        .average_rating(args.product)
        .await
        .map_err(|error| format!("failed to load rating: {error}"))?;

    print_listing(&listing);
    println!("description: {}", listing.product.description);
    println!("rating: {}", super::format_rating(&rating));

    Ok(())
}

fn print_listing(listing: &ProductListing) {
    println!("product_uuid: {}", listing.product.uuid);
    println!("name: {}", listing.product.name);
    println!("price: {}", listing.product.price);
    println!("stock: {}", listing.product.stock);
    println!("category: {}", listing.category_name);
    println!("store: {}", listing.store_name);
    println!("posted_at: {}", listing.product.posted_at);
}
