use pretty_assertions::assert_eq;

use super::*;
use crate::auth::{AuthPhase, MemoryTokenStore};
use crate::filters::{FilterSnapshot, SortBy};
use crate::models::{Condition, MessageType, ProfileUpdate, SavedSearch};
use crate::testing::{listings, Call, MockApi, VALID_PASSWORD, VALID_TOKEN};
use crate::toast::ToastKind;

type TestMarketplace = Marketplace<MockApi, MemoryTokenStore>;

fn marketplace() -> TestMarketplace {
    Marketplace::new(
        MockApi::new(),
        MemoryTokenStore::default(),
        &ClientConfig::default(),
    )
}

async fn signed_in() -> TestMarketplace {
    let mut app = marketplace();
    assert!(
        app.login(LoginRequest::email("ayesha@example.com", VALID_PASSWORD))
            .await
    );
    app.api().reset_calls();
    app.take_toasts();
    app
}

fn last_toast(app: &TestMarketplace) -> (ToastKind, String) {
    let toast = app.state().toasts.latest().expect("a toast");
    (toast.kind, toast.message.clone())
}

fn register_form() -> RegisterForm {
    RegisterForm {
        name: "Ayesha Khan".to_string(),
        email: "ayesha@example.com".to_string(),
        phone: "+92-300-1234567".to_string(),
        city: "Karachi".to_string(),
        password: "secret".to_string(),
        confirm_password: "secret".to_string(),
        ..RegisterForm::default()
    }
}

#[tokio::test(flavor = "current_thread")]
async fn login_stores_token_sets_user_and_goes_home() {
    let mut app = marketplace();
    app.navigate(View::Login);

    let ok = app
        .login(LoginRequest::email("ayesha@example.com", VALID_PASSWORD))
        .await;

    assert!(ok);
    assert_eq!(app.state().session.phase(), AuthPhase::Authenticated);
    assert_eq!(app.state().session.bearer(), Some(VALID_TOKEN));
    assert_eq!(
        app.state().session.user().map(|user| user.name.as_str()),
        Some("Ayesha")
    );
    assert_eq!(app.state().view, View::Home);
    assert_eq!(
        app.token_store().load_token().unwrap().map(|t| t.as_str().to_string()),
        Some(VALID_TOKEN.to_string())
    );
    assert!(app
        .state()
        .toasts
        .iter()
        .any(|toast| toast.kind == ToastKind::Success));
    assert!(!app.state().loading);
}

#[tokio::test(flavor = "current_thread")]
async fn login_failure_shows_server_detail_and_stays_put() {
    let mut app = marketplace();
    app.navigate(View::Login);

    let ok = app
        .login(LoginRequest::email("ayesha@example.com", "wrong"))
        .await;

    assert!(!ok);
    assert_eq!(
        last_toast(&app),
        (ToastKind::Error, "Incorrect email or password".to_string())
    );
    assert_eq!(app.state().view, View::Login);
    assert_eq!(app.state().session.bearer(), None);
    assert_eq!(app.state().session.phase(), AuthPhase::Anonymous);
    assert_eq!(app.token_store().load_token().unwrap(), None);
}

#[tokio::test(flavor = "current_thread")]
async fn login_with_blank_password_sends_nothing() {
    let mut app = marketplace();
    assert!(!app.login(LoginRequest::email("ayesha@example.com", " ")).await);
    assert_eq!(app.api().call_count(), 0);
    assert_eq!(
        last_toast(&app),
        (ToastKind::Error, "Password is required".to_string())
    );
}

#[tokio::test(flavor = "current_thread")]
async fn register_rejects_mismatched_passwords_locally() {
    let mut app = marketplace();
    let mut form = register_form();
    form.confirm_password = "different".to_string();

    assert!(!app.register(form).await);
    assert_eq!(app.api().call_count(), 0);
    assert_eq!(
        last_toast(&app),
        (ToastKind::Error, "Passwords do not match".to_string())
    );
}

#[tokio::test(flavor = "current_thread")]
async fn register_signs_in_and_opens_profile() {
    let mut app = marketplace();
    assert!(app.register(register_form()).await);
    assert_eq!(app.state().view, View::Profile);
    assert!(app.state().session.is_authenticated());
    assert_eq!(app.api().calls()[0], Call::Register);
}

#[tokio::test(flavor = "current_thread")]
async fn register_failure_surfaces_detail() {
    let mut app = marketplace();
    let mut form = register_form();
    form.email = "taken@example.com".to_string();
    assert!(!app.register(form).await);
    assert_eq!(
        last_toast(&app),
        (ToastKind::Error, "Email already registered".to_string())
    );
    assert!(!app.state().session.is_authenticated());
}

#[tokio::test(flavor = "current_thread")]
async fn logout_clears_session_and_user_caches() {
    let mut app = signed_in().await;
    app.toggle_favorite("l1").await;
    app.load_analytics().await;
    app.navigate(View::Favorites);
    assert!(!app.state().stores.favorites.items().is_empty());

    app.logout();

    assert!(!app.state().session.is_authenticated());
    assert!(app.state().stores.favorites.items().is_empty());
    assert!(app.state().stores.analytics.is_none());
    assert_eq!(app.state().view, View::Home);
    assert_eq!(app.token_store().load_token().unwrap(), None);
    assert_eq!(
        last_toast(&app),
        (ToastKind::Info, "Logged out successfully".to_string())
    );
}

#[tokio::test(flavor = "current_thread")]
async fn restore_session_accepts_valid_token() {
    let token = AccessToken::new(VALID_TOKEN).unwrap();
    let mut app = Marketplace::new(
        MockApi::new(),
        MemoryTokenStore::with_token(token),
        &ClientConfig::default(),
    );

    assert!(app.restore_session().await);
    assert!(app.state().session.is_authenticated());
    assert_eq!(app.api().calls()[0], Call::CurrentUser);
}

#[tokio::test(flavor = "current_thread")]
async fn restore_session_clears_rejected_token() {
    let token = AccessToken::new("expired-token").unwrap();
    let mut app = Marketplace::new(
        MockApi::new(),
        MemoryTokenStore::with_token(token),
        &ClientConfig::default(),
    );

    assert!(!app.restore_session().await);
    assert_eq!(app.state().session.phase(), AuthPhase::Anonymous);
    assert_eq!(app.token_store().load_token().unwrap(), None);
}

#[tokio::test(flavor = "current_thread")]
async fn restore_session_without_token_makes_no_calls() {
    let mut app = marketplace();
    assert!(!app.restore_session().await);
    assert_eq!(app.api().call_count(), 0);
}

#[tokio::test(flavor = "current_thread")]
async fn bootstrap_loads_reference_data_and_seeds_catalog() {
    let mut app = marketplace();
    app.bootstrap().await;

    let reference = &app.state().reference;
    assert_eq!(reference.cities, vec!["Karachi", "Lahore"]);
    assert_eq!(reference.models_for("samsung"), ["Galaxy S24".to_string()]);
    let brands: Vec<&str> = reference.brands.iter().map(|(brand, _)| brand).collect();
    assert_eq!(brands, vec!["Samsung", "Apple"]);
    assert_eq!(
        app.state().suggestions.catalog(),
        ["Galaxy S24", "iPhone 15 Pro", "iPhone 15"].map(String::from)
    );
    assert!(app.state().toasts.is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn bootstrap_degrades_when_reference_data_fails() {
    let mut app = marketplace();
    app.api().fail_reference.set(true);

    app.bootstrap().await;

    assert!(app.state().reference.is_empty());
    assert!(!app.state().suggestions.catalog().is_empty());
    assert_eq!(
        last_toast(&app),
        (ToastKind::Error, "Failed to load reference data".to_string())
    );
}

#[tokio::test(flavor = "current_thread")]
async fn search_switches_view_and_sends_query() {
    let mut app = marketplace();
    app.api().push_listings(listings(20, "old"));
    app.apply_filters().await;
    app.api().push_listings(listings(3, "s24"));

    assert!(app.search("Galaxy S24").await);

    assert_eq!(app.state().view, View::SearchResults);
    let query = app.api().listing_queries().pop().unwrap();
    assert_eq!(query.param("search").as_deref(), Some("Galaxy S24"));
    assert_eq!(query.page, 1);
    let ids: Vec<&str> = app
        .state()
        .listings
        .items()
        .iter()
        .map(|listing| listing.id.as_str())
        .collect();
    assert_eq!(ids, ["s24-0", "s24-1", "s24-2"]);
    assert_eq!(app.state().history.entries(), ["Galaxy S24".to_string()]);
}

#[tokio::test(flavor = "current_thread")]
async fn selecting_a_suggestion_searches_immediately() {
    let mut app = marketplace();
    let shown = app.on_search_input("iph");
    assert_eq!(shown.len(), 6);

    assert!(app.select_suggestion(&shown[1]).await);

    assert!(!app.state().suggestions.is_open());
    assert_eq!(app.state().view, View::SearchResults);
    let query = app.api().listing_queries().pop().unwrap();
    assert_eq!(query.search.as_deref(), Some("iPhone 15 Pro"));
}

#[tokio::test(flavor = "current_thread")]
async fn filter_change_resets_page_and_replaces_results() {
    let mut app = marketplace();
    app.api().push_listings(listings(20, "p1"));
    app.apply_filters().await;
    app.api().push_listings(listings(20, "p2"));
    assert!(app.load_more().await);
    assert_eq!(app.state().listings.page(), 2);
    assert_eq!(app.state().listings.items().len(), 40);

    app.api().push_listings(listings(4, "karachi"));
    assert!(
        app.update_filter(FilterUpdate::City(Some("Karachi".to_string())))
            .await
    );

    let query = app.api().listing_queries().pop().unwrap();
    assert_eq!(query.page, 1);
    assert_eq!(query.city.as_deref(), Some("Karachi"));
    assert_eq!(app.state().listings.page(), 1);
    assert_eq!(app.state().listings.items().len(), 4);
    assert!(!app.state().listings.has_more());
}

#[tokio::test(flavor = "current_thread")]
async fn unchanged_filter_does_not_refetch() {
    let mut app = marketplace();
    assert!(!app.update_filter(FilterUpdate::SortBy(SortBy::Recent)).await);
    assert_eq!(app.api().call_count(), 0);
}

#[tokio::test(flavor = "current_thread")]
async fn load_more_appends_and_stops_after_short_page() {
    let mut app = marketplace();
    app.api().push_listings(listings(20, "p1"));
    app.apply_filters().await;
    app.api().push_listings(listings(7, "p2"));

    assert!(app.load_more().await);
    assert_eq!(app.state().listings.items().len(), 27);
    assert_eq!(app.api().listing_queries()[1].page, 2);

    app.api().reset_calls();
    assert!(!app.load_more().await);
    assert_eq!(app.api().call_count(), 0);
}

#[tokio::test(flavor = "current_thread")]
async fn listing_failure_clears_buffer_and_toasts() {
    let mut app = marketplace();
    app.api().push_listings(listings(20, "p1"));
    app.apply_filters().await;
    app.api().push_listings_error(500, "Database unavailable");

    assert!(!app.load_more().await);

    assert!(app.state().listings.items().is_empty());
    assert!(!app.state().listings.has_more());
    assert!(!app.state().listings.is_loading());
    assert!(!app.state().loading);
    assert_eq!(
        last_toast(&app),
        (ToastKind::Error, "Database unavailable".to_string())
    );
}

#[tokio::test(flavor = "current_thread")]
async fn favorite_toggle_is_idempotent_over_two_round_trips() {
    let mut app = signed_in().await;
    let before = app.state().stores.favorites.contains("l1");

    assert_eq!(app.toggle_favorite("l1").await, Some(true));
    assert!(app.state().stores.favorites.contains("l1"));
    assert_eq!(
        last_toast(&app),
        (ToastKind::Success, "Added to favorites".to_string())
    );

    assert_eq!(app.toggle_favorite("l1").await, Some(false));
    assert_eq!(app.state().stores.favorites.contains("l1"), before);
    assert_eq!(
        last_toast(&app),
        (ToastKind::Info, "Removed from favorites".to_string())
    );
    assert!(app.api().server_favorite_ids().is_empty());
    assert_eq!(
        app.api().calls(),
        vec![
            Call::AddFavorite("l1".to_string()),
            Call::Favorites,
            Call::RemoveFavorite("l1".to_string()),
            Call::Favorites,
        ]
    );
}

#[tokio::test(flavor = "current_thread")]
async fn anonymous_favorite_message_and_review_make_no_calls() {
    let mut app = marketplace();

    assert_eq!(app.toggle_favorite("l1").await, None);
    assert_eq!(
        last_toast(&app),
        (ToastKind::Error, "Please login to add favorites".to_string())
    );

    assert!(!app.send_message(NewMessage::text("seller-1", "l1", "Hi")).await);
    assert_eq!(
        last_toast(&app),
        (ToastKind::Error, "Please login to send messages".to_string())
    );

    let review = NewReview {
        reviewed_user_id: "seller-1".to_string(),
        listing_id: "l1".to_string(),
        rating: 5,
        comment: "Great".to_string(),
    };
    assert!(!app.submit_review(review).await);
    assert_eq!(
        last_toast(&app),
        (ToastKind::Error, "Please login to leave a review".to_string())
    );

    assert_eq!(app.api().call_count(), 0);
    assert_eq!(app.state().toasts.len(), 3);
}

#[tokio::test(flavor = "current_thread")]
async fn private_views_redirect_anonymous_users_to_login() {
    let mut app = marketplace();
    assert!(!app.navigate(View::Favorites));
    assert_eq!(app.state().view, View::Login);
    assert_eq!(
        last_toast(&app),
        (ToastKind::Error, "Please login to view favorites".to_string())
    );

    assert!(app.navigate(View::ListingDetail("l1".to_string())));
    assert_eq!(app.state().view, View::ListingDetail("l1".to_string()));
}

#[tokio::test(flavor = "current_thread")]
async fn sending_refreshes_open_conversation_and_list() {
    let mut app = signed_in().await;
    assert!(app.open_conversation("c1").await);
    assert_eq!(app.state().view, View::Conversation("c1".to_string()));
    let order: Vec<&str> = app
        .state()
        .stores
        .conversations
        .messages()
        .iter()
        .map(|message| message.id.as_str())
        .collect();
    assert_eq!(order, ["m1", "m2"]);
    app.api().reset_calls();

    let message = NewMessage::text("seller-1", "l1", "Is it still available?");
    assert!(app.send_message(message.clone()).await);

    assert_eq!(
        app.api().calls(),
        vec![
            Call::SendMessage(message),
            Call::ConversationMessages("c1".to_string()),
            Call::Conversations,
        ]
    );
    assert_eq!(app.state().stores.conversations.conversations().len(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn offer_without_positive_amount_is_rejected_locally() {
    let mut app = signed_in().await;
    let offer = NewMessage::offer("seller-1", "l1", "Would you take this?", 0);
    assert_eq!(offer.message_type, MessageType::Offer);

    assert!(!app.send_message(offer).await);
    assert_eq!(app.api().call_count(), 0);
    assert_eq!(
        last_toast(&app),
        (
            ToastKind::Error,
            "Offer amount must be greater than zero".to_string()
        )
    );
}

#[tokio::test(flavor = "current_thread")]
async fn failed_send_keeps_conversation_untouched() {
    let mut app = signed_in().await;
    app.api().fail_send.set(true);
    assert!(!app.send_message(NewMessage::text("ghost", "l1", "Hi")).await);
    assert_eq!(
        app.api().calls(),
        vec![Call::SendMessage(NewMessage::text("ghost", "l1", "Hi"))]
    );
    assert_eq!(
        last_toast(&app),
        (ToastKind::Error, "Receiver not found".to_string())
    );
}

#[tokio::test(flavor = "current_thread")]
async fn saved_search_round_trip_merges_snapshot_and_reloads() {
    let mut app = signed_in().await;
    app.update_filter(FilterUpdate::Brand(Some("Apple".to_string())))
        .await;
    app.update_filter(FilterUpdate::Condition(Some(Condition::LikeNew)))
        .await;

    assert!(app.save_search("Clean iPhones").await);
    let saved = app.state().stores.saved_searches.items().to_vec();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].search_query.brand.as_deref(), Some("Apple"));

    app.update_filter(FilterUpdate::Clear).await;
    app.api().reset_calls();
    app.api().push_listings(listings(2, "apple"));

    assert!(app.apply_saved_search(&saved[0].id).await);

    assert_eq!(app.state().view, View::SearchResults);
    assert_eq!(app.state().filters.brand.as_deref(), Some("Apple"));
    assert_eq!(app.state().filters.condition, Some(Condition::LikeNew));
    let query = app.api().listing_queries().pop().unwrap();
    assert_eq!(query.page, 1);
    assert_eq!(query.condition.as_deref(), Some("Like New"));
    assert_eq!(app.state().listings.items().len(), 2);
}

#[tokio::test(flavor = "current_thread")]
async fn applying_saved_search_keeps_fields_it_does_not_carry() {
    let mut app = signed_in().await;
    app.api().seed_saved_search(SavedSearch {
        id: "s9".to_string(),
        user_id: "u1".to_string(),
        name: "Under 100k".to_string(),
        search_query: FilterSnapshot {
            max_price: Some(100_000),
            ..FilterSnapshot::default()
        },
        is_active: true,
        created_at: None,
    });
    app.load_saved_searches().await;
    app.update_filter(FilterUpdate::City(Some("Lahore".to_string())))
        .await;

    assert!(app.apply_saved_search("s9").await);
    assert_eq!(app.state().filters.city.as_deref(), Some("Lahore"));
    assert_eq!(app.state().filters.max_price, Some(100_000));
}

#[tokio::test(flavor = "current_thread")]
async fn blank_saved_search_name_is_rejected() {
    let mut app = signed_in().await;
    assert!(!app.save_search("   ").await);
    assert_eq!(app.api().call_count(), 0);
}

#[tokio::test(flavor = "current_thread")]
async fn review_rating_is_checked_before_sending() {
    let mut app = signed_in().await;
    let mut review = NewReview {
        reviewed_user_id: "seller-1".to_string(),
        listing_id: "l1".to_string(),
        rating: 6,
        comment: "Fast delivery".to_string(),
    };
    assert!(!app.submit_review(review.clone()).await);
    assert_eq!(app.api().call_count(), 0);

    review.rating = 4;
    assert!(app.submit_review(review).await);
    let stored = app.state().stores.reviews.for_user("seller-1");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].rating, 4);
}

#[tokio::test(flavor = "current_thread")]
async fn reviews_and_profiles_load_without_login() {
    let mut app = marketplace();
    assert!(app.load_reviews("seller-1").await);
    assert!(app.state().stores.reviews.for_user("seller-1").is_empty());

    let profile = app.user_profile("seller-1").await.unwrap();
    assert_eq!(profile.name, "Mobile Hub");
    assert!(app.user_profile("missing").await.is_none());
    assert_eq!(
        last_toast(&app),
        (ToastKind::Error, "User not found".to_string())
    );
}

#[tokio::test(flavor = "current_thread")]
async fn analytics_are_cached_after_load() {
    let mut app = signed_in().await;
    assert!(app.load_analytics().await);
    let analytics = app.state().stores.analytics.as_ref().unwrap();
    assert_eq!(analytics.total_listings, 3);
    assert_eq!(app.api().calls(), vec![Call::Analytics]);
}

#[tokio::test(flavor = "current_thread")]
async fn set_filters_replaces_criteria_without_fetching() {
    let mut app = marketplace();
    let filters = Filters {
        brand: Some("Xiaomi".to_string()),
        max_price: Some(60_000),
        sort_by: SortBy::PriceLow,
        ..Filters::default()
    };
    assert!(app.set_filters(filters.clone()));
    assert!(!app.set_filters(filters));
    assert_eq!(app.api().call_count(), 0);

    assert!(app.apply_filters().await);
    let query = app.api().listing_queries().pop().unwrap();
    assert_eq!(query.param("sort_by").as_deref(), Some("price_low"));
    assert_eq!(query.param("max_price").as_deref(), Some("60000"));
}

#[tokio::test(flavor = "current_thread")]
async fn set_filters_drops_loaded_pages_until_reapplied() {
    let mut app = marketplace();
    app.api().push_listings(listings(20, "apple"));
    assert!(app.apply_filters().await);
    assert!(app.state().listings.can_load_more());

    assert!(app.set_filters(Filters {
        brand: Some("Samsung".to_string()),
        ..Filters::default()
    }));
    assert!(app.state().listings.items().is_empty());
    assert!(!app.state().listings.can_load_more());

    app.api().reset_calls();
    assert!(!app.load_more().await);
    assert_eq!(app.api().call_count(), 0);

    app.api().push_listings(listings(3, "samsung"));
    assert!(app.apply_filters().await);
    let query = app.api().listing_queries().pop().unwrap();
    assert_eq!(query.page, 1);
    assert_eq!(query.param("brand").as_deref(), Some("Samsung"));
    assert_eq!(app.state().listings.items().len(), 3);
}

#[tokio::test(flavor = "current_thread")]
async fn unchanged_set_filters_keeps_pagination() {
    let mut app = marketplace();
    app.api().push_listings(listings(20, "p1"));
    app.apply_filters().await;

    assert!(!app.set_filters(Filters::default()));
    assert_eq!(app.state().listings.items().len(), 20);
    assert!(app.state().listings.can_load_more());
}

#[tokio::test(flavor = "current_thread")]
async fn update_profile_puts_changes_and_reloads_user() {
    let mut app = signed_in().await;
    let update = ProfileUpdate {
        name: Some(" Ayesha Khan ".to_string()),
        city: Some("Lahore".to_string()),
        ..ProfileUpdate::default()
    };

    assert!(app.update_profile(update).await);

    assert_eq!(
        app.api().calls(),
        vec![
            Call::UpdateProfile(ProfileUpdate {
                name: Some("Ayesha Khan".to_string()),
                city: Some("Lahore".to_string()),
                ..ProfileUpdate::default()
            }),
            Call::CurrentUser,
        ]
    );
    let user = app.state().session.user().unwrap();
    assert_eq!(user.name, "Ayesha Khan");
    assert_eq!(user.city.as_deref(), Some("Lahore"));
    assert_eq!(
        last_toast(&app),
        (ToastKind::Success, "Profile updated successfully!".to_string())
    );
    assert!(!app.state().loading);
}

#[tokio::test(flavor = "current_thread")]
async fn update_profile_requires_login() {
    let mut app = marketplace();
    let update = ProfileUpdate {
        name: Some("Someone".to_string()),
        ..ProfileUpdate::default()
    };

    assert!(!app.update_profile(update).await);
    assert_eq!(app.api().call_count(), 0);
    assert_eq!(
        last_toast(&app),
        (
            ToastKind::Error,
            "Please login to update your profile".to_string()
        )
    );
}

#[tokio::test(flavor = "current_thread")]
async fn blank_profile_update_is_not_sent() {
    let mut app = signed_in().await;
    let update = ProfileUpdate {
        city: Some("  ".to_string()),
        ..ProfileUpdate::default()
    };

    assert!(!app.update_profile(update).await);
    assert_eq!(app.api().call_count(), 0);
    assert_eq!(last_toast(&app).0, ToastKind::Error);
}
