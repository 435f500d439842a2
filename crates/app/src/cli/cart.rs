use bazaar_app::{
    context::AppContext,
    domain::{
        accounts::records::UserUuid,
        carts::{data::NewCartItem, records::CartItemUuid},
        catalog::records::ProductUuid,
    },
};
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    /// Cart owner
    #[arg(long, global = true)]
    user: Option<UserUuid>,

    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Add a product, or increase its quantity when already in the cart
    Add(AddItemArgs),
    /// List cart lines with subtotals
    List,
    /// Replace the quantity of a cart line
    Set(SetQuantityArgs),
    /// Remove a cart line
    Remove(RemoveItemArgs),
}

#[derive(Debug, Args)]
struct AddItemArgs {
    #[arg(long)]
    product: ProductUuid,

    #[arg(long, default_value_t = 1)]
    quantity: u32,
}

#[derive(Debug, Args)]
struct SetQuantityArgs {
    #[arg(long)]
    item: CartItemUuid,

    #[arg(long)]
    quantity: u32,
}

#[derive(Debug, Args)]
struct RemoveItemArgs {
    #[arg(long)]
    item: CartItemUuid,
}

pub(crate) async fn run(ctx: &AppContext, command: CartCommand) -> Result<(), String> {
    let user = command
        .user
        .ok_or_else(|| "--user is required".to_string())?;

    match command.command {
        CartSubcommand::Add(args) => {
            let item = ctx
                .carts
                .add_item(
                    user,
                    NewCartItem {
                        product_uuid: args.product,
                        quantity: args.quantity,
                    },
                )
                .await
                .map_err(|error| format!("failed to add item: {error}"))?;

            println!("cart_item_uuid: {}", item.uuid);
            println!("quantity: {}", item.quantity);
        }
        CartSubcommand::List => {
            let lines = ctx
                .carts
                .list_items(user)
                .await
                .map_err(|error| format!("failed to list cart: {error}"))?;

            if lines.is_empty() {
                println!("cart is empty");
                return Ok(());
            }

            let mut total = 0_u64;

            for line in &lines {
                println!("cart_item_uuid: {}", line.item.uuid);
                println!("product: {} ({})", line.product_name, line.item.product_uuid);
                println!("quantity: {}", line.item.quantity);
                println!("unit_price: {}", line.unit_price);
                println!("subtotal: {}", line.subtotal);
                println!();

                total = total.saturating_add(line.subtotal);
            }

            println!("total: {total}");
        }
        CartSubcommand::Set(args) => {
            let item = ctx
                .carts
                .change_quantity(user, args.item, args.quantity)
                .await
                .map_err(|error| format!("failed to update quantity: {error}"))?;

            println!("cart_item_uuid: {}", item.uuid);
            println!("quantity: {}", item.quantity);
        }
        CartSubcommand::Remove(args) => {
            ctx.carts
                .remove_item(user, args.item)
                .await
                .map_err(|error| format!("failed to remove item: {error}"))?;

            println!("removed: {}", args.item);
        }
    }

    Ok(())
}
