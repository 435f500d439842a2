use bazaar_app::{
    context::AppContext,
    domain::{
        accounts::records::{SellerUuid, UserUuid},
        catalog::records::ProductUuid,
        reviews::{
            data::{NewReview, ReviewUpdate},
            records::{ReviewRecord, ReviewUuid},
        },
    },
};
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub(crate) struct ReviewsCommand {
    #[command(subcommand)]
    command: ReviewsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ReviewsSubcommand {
    /// Review a purchased product
    Add(AddReviewArgs),
    /// Change the rating and comment of your review
    Edit(EditReviewArgs),
    /// Delete your review
    Delete(DeleteReviewArgs),
    /// Reply to a review of one of your products
    Reply(ReplyArgs),
    /// List reviews written by a user
    Mine(UserArgs),
    /// List reviews of a product
    Product(ProductArgs),
    /// List reviews of a seller's products that still await a reply
    Candidates(SellerArgs),
}

#[derive(Debug, Args)]
struct AddReviewArgs {
    #[arg(long)]
    user: UserUuid,

    #[arg(long)]
    product: ProductUuid,

    /// Rating from 1 to 5
    #[arg(long)]
    rating: u8,

    #[arg(long, default_value = "")]
    comment: String,
}

#[derive(Debug, Args)]
struct EditReviewArgs {
    #[arg(long)]
    user: UserUuid,

    #[arg(long)]
    review: ReviewUuid,

    /// Rating from 1 to 5
    #[arg(long)]
    rating: u8,

    #[arg(long, default_value = "")]
    comment: String,
}

#[derive(Debug, Args)]
struct DeleteReviewArgs {
    #[arg(long)]
    user: UserUuid,

    #[arg(long)]
    review: ReviewUuid,
}

#[derive(Debug, Args)]
struct ReplyArgs {
    #[arg(long)]
    seller: SellerUuid,

    #[arg(long)]
    review: ReviewUuid,

    #[arg(long)]
    comment: String,
}

#[derive(Debug, Args)]
struct UserArgs {
    #[arg(long)]
    user: UserUuid,
}

#[derive(Debug, Args)]
struct ProductArgs {
    #[arg(long)]
    product: ProductUuid,
}

#[derive(Debug, Args)]
struct SellerArgs {
    #[arg(long)]
    seller: SellerUuid,
}

pub(crate) async fn run(ctx: &AppContext, command: ReviewsCommand) -> Result<(), String> {
    match command.command {
        ReviewsSubcommand::Add(args) => {
            let review = ctx
                .reviews
                .add_review(
                    args.user,
                    NewReview {
                        product_uuid: args.product,
                        rating: args.rating,
                        comment: args.comment,
                    },
                )
                .await
                .map_err(|error| format!("failed to add review: {error}"))?;

            print_review(&review);
        }
        ReviewsSubcommand::Edit(args) => {
            let review = ctx
                .reviews
                .edit_review(
                    args.user,
                    args.review,
                    ReviewUpdate {
                        rating: args.rating,
                        comment: args.comment,
                    },
                )
                .await
                .map_err(|error| format!("failed to edit review: {error}"))?;

            print_review(&review);
        }
        ReviewsSubcommand::Delete(args) => {
            ctx.reviews
                .delete_review(args.user, args.review)
                .await
                .map_err(|error| format!("failed to delete review: {error}"))?;

            println!("deleted: {}", args.review);
        }
        ReviewsSubcommand::Reply(args) => {
            let review = ctx
                .reviews
                .reply_to_review(args.seller, args.review, args.comment)
                .await
                .map_err(|error| format!("failed to reply: {error}"))?;

            print_review(&review);
        }
        ReviewsSubcommand::Mine(args) => {
            let reviews = ctx
                .reviews
                .reviews_for_user(args.user)
                .await
                .map_err(|error| format!("failed to list reviews: {error}"))?;

            print_reviews(&reviews);
        }
        ReviewsSubcommand::Product(args) => {
            let reviews = ctx
                .reviews
                .reviews_for_product(args.product)
                .await
                .map_err(|error| format!("failed to list reviews: {error}"))?;

            print_reviews(&reviews);
        }
        ReviewsSubcommand::Candidates(args) => {
            let reviews = ctx
                .reviews
                .reply_candidates(args.seller)
                .await
                .map_err(|error| format!("failed to list reviews: {error}"))?;

            print_reviews(&reviews);
        }
    }

    Ok(())
}

fn print_reviews(reviews: &[ReviewRecord]) {
    if reviews.is_empty() {
        println!("no reviews found");
        return;
    }

    for review in reviews {
        print_review(review);
        println!();
    }
}

fn print_review(review: &ReviewRecord) {
    println!("review_uuid: {}", review.uuid);
    println!("product: {} ({})", review.product_name, review.product_uuid);
    println!("author: {}", review.user_name);
    println!("rating: {}", review.rating);
    println!("comment: {}", review.comment);
    println!("created_at: {}", review.created_at);
    println!(
        "updated_at: {}",
        review
            .updated_at
            .map_or_else(|| "never".to_string(), |value| value.to_string())
    );

    for reply in &review.replies {
        println!("  reply from {}: {}", reply.author_name, reply.comment);
    }
}
