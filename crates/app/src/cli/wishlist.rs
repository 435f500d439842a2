use bazaar_app::{
    context::AppContext,
    domain::{
        accounts::records::UserUuid, catalog::records::ProductUuid,
        wishlist::records::WishlistItemUuid,
    },
};
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub(crate) struct WishlistCommand {
    /// Wishlist owner
    #[arg(long, global = true)]
    user: Option<UserUuid>,

    #[command(subcommand)]
    command: WishlistSubcommand,
}

#[derive(Debug, Subcommand)]
enum WishlistSubcommand {
    /// Save a product to the wishlist
    Add(AddArgs),
    /// List saved products with their rating, newest first
    List,
    /// Remove a wishlist item
    Remove(RemoveArgs),
}

#[derive(Debug, Args)]
struct AddArgs {
    #[arg(long)]
    product: ProductUuid,
}

#[derive(Debug, Args)]
struct RemoveArgs {
    #[arg(long)]
    item: WishlistItemUuid,
}

pub(crate) async fn run(ctx: &AppContext, command: WishlistCommand) -> Result<(), String> {
    let user = command
        .user
        .ok_or_else(|| "--user is required".to_string())?;

    match command.command {
        WishlistSubcommand::Add(args) => {
            let item = ctx
                .wishlist
                .add_item(user, args.product)
                .await
                .map_err(|error| format!("failed to add to wishlist: {error}"))?;

            println!("wishlist_item_uuid: {}", item.uuid);
            println!("product_uuid: {}", item.product_uuid);
        }
        WishlistSubcommand::List => {
            let entries = ctx
                .wishlist
                .list_items(user)
                .await
                .map_err(|error| format!("failed to list wishlist: {error}"))?;

            if entries.is_empty() {
                println!("wishlist is empty");
                return Ok(());
            }

            for entry in entries {
                let rating = ctx
                    .ratings
                    .average_rating(entry.item.product_uuid)
                    .await
                    .map_err(|error| format!("failed to load rating: {error}"))?;

                println!("wishlist_item_uuid: {}", entry.item.uuid);
                println!("product: {} ({})", entry.listing.product.name, entry.item.product_uuid);
                println!("category: {}", entry.listing.category_name);
                println!("store: {}", entry.listing.store_name);
                println!("price: {}", entry.listing.product.price);
                println!("stock: {}", entry.listing.product.stock);
                println!("rating: {}", super::format_rating(&rating));
                println!();
            }
        }
        WishlistSubcommand::Remove(args) => {
            ctx.wishlist
                .remove_item(user, args.item)
                .await
                .map_err(|error| format!("failed to remove wishlist item: {error}"))?;

            println!("removed: {}", args.item);
        }
    }

    Ok(())
}
