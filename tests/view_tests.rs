use game_catalog_search::catalog::{decode_games, CatalogApi, FetchError};
use game_catalog_search::model::reference::ReferenceOption;
use game_catalog_search::view::{
    render, render_card, FilteredCatalogView, RatingControl, ViewState, EMPTY_MESSAGE,
    ERROR_MESSAGE, LOADING_MESSAGE, PLACEHOLDER_COVER,
};

fn load_sample_games() -> Vec<game_catalog_search::model::game::GameSummary> {
    let json = std::fs::read_to_string("tests/sample_games.json")
        .expect("failed to read sample_games.json");
    decode_games(&json).expect("decode_games failed")
}

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .try_init();
}

#[test]
fn platform_select_appends_options_after_placeholder() {
    // Arrange
    let mut view = FilteredCatalogView::new();

    // Act
    view.append_platform_options(vec![ReferenceOption { id: 1, name: "PC".to_string() }]);
    let html = view.render_platform_select();

    // Assert: the default placeholder is still first, the fetched option
    // appended after it
    let placeholder_at = html.find("All Platforms").expect("placeholder missing");
    let option_at = html.find("<option value=\"1\">PC</option>").expect("option missing");
    assert!(placeholder_at < option_at, "html was: {}", html);
    assert_eq!(html.matches("<option value=\"1\">").count(), 1, "html was: {}", html);
}

#[test]
fn unpopulated_select_keeps_only_the_placeholder() {
    let view = FilteredCatalogView::new();
    let html = view.render_genre_select();
    assert_eq!(html.matches("<option").count(), 1, "html was: {}", html);
    assert!(html.contains("All Genres"), "html was: {}", html);
}

#[test]
fn submission_enters_loading_and_clears_prior_content() {
    // Arrange: a populated view
    let mut view = FilteredCatalogView::new();
    let token = view.begin_submit();
    view.apply_games_result(token, Ok(load_sample_games()));
    assert!(view.render_results().contains("Hollow Depths"));

    // Act: a new submission
    view.begin_submit();

    // Assert: prior cards are gone, only the loading indicator remains
    let html = view.render_results();
    assert_eq!(view.state(), &ViewState::Loading);
    assert!(html.contains(LOADING_MESSAGE), "html was: {}", html);
    assert!(!html.contains("game-card"), "html was: {}", html);
}

#[test]
fn empty_response_renders_empty_message_and_no_cards() {
    // Arrange
    let mut view = FilteredCatalogView::new();
    let token = view.begin_submit();

    // Act
    view.apply_games_result(token, Ok(Vec::new()));

    // Assert
    assert_eq!(view.state(), &ViewState::Empty);
    let html = view.render_results();
    assert!(html.contains(EMPTY_MESSAGE), "html was: {}", html);
    assert!(!html.contains("game-card"), "html was: {}", html);
}

#[test]
fn populated_response_renders_cards_in_response_order() {
    // Arrange
    let mut view = FilteredCatalogView::new();
    let token = view.begin_submit();

    // Act
    view.apply_games_result(token, Ok(load_sample_games()));

    // Assert: both cards present, in the order the server returned them
    let html = view.render_results();
    let first = html.find("Hollow Depths").expect("first game missing");
    let second = html.find("Midnight Drifter").expect("second game missing");
    assert!(first < second, "html was: {}", html);
    assert_eq!(html.matches("game-card").count(), 2, "html was: {}", html);
}

#[test]
fn fetch_failure_renders_fixed_error_message_only() {
    // Arrange
    let mut view = FilteredCatalogView::new();
    let token = view.begin_submit();

    // Act: the raw cause must never leak into the rendered output
    view.apply_games_result(token, Err(FetchError::Server(503)));

    // Assert
    assert_eq!(view.state(), &ViewState::Error);
    let html = view.render_results();
    assert!(html.contains(ERROR_MESSAGE), "html was: {}", html);
    assert!(!html.contains("503"), "html was: {}", html);
    assert!(!html.contains("game-card"), "html was: {}", html);
}

#[test]
fn stale_response_is_discarded_and_latest_wins() {
    // Arrange: two overlapping submissions
    let mut view = FilteredCatalogView::new();
    let first = view.begin_submit();
    let second = view.begin_submit();

    // Act: the first (stale) response resolves after the second was issued
    view.apply_games_result(first, Ok(load_sample_games()));
    assert_eq!(view.state(), &ViewState::Loading, "stale response must not render");

    view.apply_games_result(second, Ok(Vec::new()));

    // Assert: only the latest submission's result is applied
    assert_eq!(view.state(), &ViewState::Empty);
}

#[test]
fn card_falls_back_to_placeholder_cover_and_not_available_ratings() {
    // Arrange: the sparse sample game (no cover, no ratings, no count)
    let games = load_sample_games();
    let sparse = &games[1];

    // Act
    let html = render_card(sparse);

    // Assert
    assert!(html.contains(&format!("src=\"{}\"", PLACEHOLDER_COVER)), "html was: {}", html);
    assert!(html.contains("Critic rating: Not available (0 reviews)"), "html was: {}", html);
    assert!(html.contains("Community rating: Not available"), "html was: {}", html);
    assert!(html.contains("href=\"/games/4501\""), "html was: {}", html);
}

#[test]
fn card_formats_ratings_to_one_decimal_place() {
    let games = load_sample_games();
    let html = render_card(&games[0]);
    assert!(html.contains("Critic rating: 87.5 (12 reviews)"), "html was: {}", html);
    assert!(html.contains("Community rating: 90.5"), "html was: {}", html);
    assert!(html.contains("Adventure, Role-playing (RPG)"), "html was: {}", html);
    assert!(html.contains("PC (Microsoft Windows), Nintendo Switch"), "html was: {}", html);
}

#[test]
fn idle_state_renders_nothing() {
    assert_eq!(render(&ViewState::Idle), "");
}

#[test]
fn rating_control_mirrors_every_input() {
    let mut control = RatingControl::default();
    control.on_input(3);
    assert_eq!(control.display(), "3");
    control.on_input(9);
    assert_eq!(control.value(), 9);
    assert_eq!(control.display(), "9");
}

#[tokio::test]
async fn submit_against_unreachable_server_enters_error_state() {
    init_logging();

    // Arrange: nothing listens on the discard port
    let api = CatalogApi::new("http://127.0.0.1:9");
    let mut view = FilteredCatalogView::new();
    view.select_platform(Some(6));

    // Act
    view.submit(&api).await;

    // Assert
    assert_eq!(view.state(), &ViewState::Error);
    assert!(view.render_results().contains(ERROR_MESSAGE));
}

#[tokio::test]
async fn initialize_against_unreachable_server_leaves_controls_unpopulated() {
    init_logging();

    // Arrange
    let api = CatalogApi::new("http://127.0.0.1:9");
    let mut view = FilteredCatalogView::new();

    // Act: both loads fail independently and silently
    view.initialize(&api).await;

    // Assert: controls keep only their placeholders, view is still usable
    assert_eq!(view.render_platform_select().matches("<option").count(), 1);
    assert_eq!(view.render_genre_select().matches("<option").count(), 1);
    assert_eq!(view.state(), &ViewState::Idle);
}
