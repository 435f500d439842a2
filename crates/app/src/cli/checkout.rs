use bazaar_app::{
    context::AppContext,
    domain::{
        accounts::records::UserUuid, catalog::records::ProductUuid,
        checkout::records::OrderReceipt, orders::records::PaymentMethod,
    },
};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// Buyer
    #[arg(long)]
    user: UserUuid,

    /// Payment method (bank_transfer, e_wallet, cash_on_delivery)
    #[arg(long)]
    method: PaymentMethod,
}

#[derive(Debug, Args)]
pub(crate) struct BuyArgs {
    /// Buyer
    #[arg(long)]
    user: UserUuid,

    #[arg(long)]
    product: ProductUuid,

    #[arg(long, default_value_t = 1)]
    quantity: u32,

    /// Payment method (bank_transfer, e_wallet, cash_on_delivery)
    #[arg(long)]
    method: PaymentMethod,
}

pub(crate) async fn run_checkout(ctx: &AppContext, args: CheckoutArgs) -> Result<(), String> {
    let receipt = ctx
        .checkout
        .checkout(args.user, args.method)
        .await
        .map_err(|error| format!("checkout failed: {error}"))?;

    print_receipt(&receipt);

    Ok(())
}

pub(crate) async fn run_buy(ctx: &AppContext, args: BuyArgs) -> Result<(), String> {
    let receipt = ctx
        .checkout
        .buy_now(args.user, args.product, args.quantity, args.method)
        .await
        .map_err(|error| format!("purchase failed: {error}"))?;

    print_receipt(&receipt);

    Ok(())
}

fn print_receipt(receipt: &OrderReceipt) {
    println!("order_uuid: {}", receipt.order.uuid);
    println!("subtotal: {}", receipt.order.subtotal);
    println!("discount_total: {}", receipt.order.discount_total);
    println!("total_price: {}", receipt.order.total_price);
    println!("lines: {}", receipt.lines.len());
    println!("payment_uuid: {}", receipt.payment.uuid);
    println!("payment_method: {}", receipt.payment.method);
    println!("payment_status: {}", receipt.payment.status);
}
