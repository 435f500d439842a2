use bazaar_app::{
    context::AppContext,
    domain::{
        accounts::records::{SellerUuid, UserUuid},
        orders::records::{PaymentStatus, PaymentUuid},
    },
};
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub(crate) struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    /// Show a buyer's orders, newest first
    History(HistoryArgs),
    /// Settle or cancel a payment for an order containing the seller's products
    SetStatus(SetStatusArgs),
}

#[derive(Debug, Args)]
struct HistoryArgs {
    #[arg(long)]
    user: UserUuid,
}

#[derive(Debug, Args)]
struct SetStatusArgs {
    #[arg(long)]
    seller: SellerUuid,

    #[arg(long)]
    payment: PaymentUuid,

    /// New status (paid, failed, cancelled)
    #[arg(long)]
    status: PaymentStatus,
}

pub(crate) async fn run(ctx: &AppContext, command: OrdersCommand) -> Result<(), String> {
    match command.command {
        OrdersSubcommand::History(args) => history(ctx, args).await,
        OrdersSubcommand::SetStatus(args) => set_status(ctx, args).await,
    }
}

async fn history(ctx: &AppContext, args: HistoryArgs) -> Result<(), String> {
    let orders = ctx
        .orders
        .order_history(args.user)
        .await
        .map_err(|error| format!("failed to load order history: {error}"))?;

    if orders.is_empty() {
        println!("no orders found for user {}", args.user);
        return Ok(());
    }

    for summary in orders {
        println!("order_uuid: {}", summary.order.uuid);
        println!("created_at: {}", summary.order.created_at);
        println!("total_price: {}", summary.order.total_price);
        println!(
            "payment: {}",
            summary.payment.map_or_else(
                || "none".to_string(),
                |payment| format!("{} via {} ({})", payment.status, payment.method, payment.uuid)
            )
        );

        for line in summary.lines {
            println!(
                "  line: {} x{} @ {}",
                line.product_uuid, line.quantity, line.unit_price
            );
        }

        println!();
    }

    Ok(())
}

async fn set_status(ctx: &AppContext, args: SetStatusArgs) -> Result<(), String> {
    let payment = ctx
        .orders
        .update_payment_status(args.seller, args.payment, args.status)
        .await
        .map_err(|error| format!("failed to update payment: {error}"))?;

    println!("payment_uuid: {}", payment.uuid);
    println!("order_uuid: {}", payment.order_uuid);
    println!("status: {}", payment.status);
    println!("updated_at: {}", payment.updated_at);

    Ok(())
}
