use phoneflip_core::models::{average_rating, NewReview, Review, UserProfile};
use serde::Serialize;

use crate::cli::ReviewCommands;
use crate::commands::common::{finish, format_review_lines, print_json, print_lines, CliContext};
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct SellerReviews<'a> {
    profile: &'a UserProfile,
    reviews: &'a [Review],
}

pub async fn run_reviews(command: ReviewCommands, context: &CliContext) -> Result<(), CliError> {
    let mut app = context.open().await?;
    match command {
        ReviewCommands::List { user_id, json } => {
            let user_id = user_id.trim();
            let profile = app.user_profile(user_id).await;
            let succeeded = profile.is_some() && app.load_reviews(user_id).await;
            finish(&mut app, succeeded)?;
            let Some(profile) = profile else {
                return Ok(());
            };

            let reviews = app.state().stores.reviews.for_user(user_id);
            if json {
                return print_json(&SellerReviews {
                    profile: &profile,
                    reviews,
                });
            }

            let name = profile
                .shop_name
                .as_deref()
                .filter(|shop| !shop.trim().is_empty())
                .unwrap_or(&profile.name);
            let verified = if profile.is_verified { " (verified)" } else { "" };
            println!("{name}{verified} - {}", profile.city);
            match average_rating(reviews) {
                Some(average) => println!("Rating {average:.1} from {} reviews", reviews.len()),
                None => println!("Rating {:.1}", profile.rating),
            }
            print_lines(&format_review_lines(reviews), "No reviews yet.");
            Ok(())
        }
        ReviewCommands::Add {
            user_id,
            listing,
            rating,
            comment,
        } => {
            let review = NewReview {
                reviewed_user_id: user_id.trim().to_string(),
                listing_id: listing.trim().to_string(),
                rating,
                comment,
            };
            let succeeded = app.submit_review(review).await;
            finish(&mut app, succeeded)
        }
    }
}
