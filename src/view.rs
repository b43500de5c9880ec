use tracing::{debug, error, instrument, warn};

use crate::catalog::{CatalogApi, FetchError};
use crate::model::filter::Filter;
use crate::model::game::GameSummary;
use crate::model::reference::ReferenceOption;

/// Fallback cover shown when a game has no cover URL.
pub const PLACEHOLDER_COVER: &str = "/static/images/cover_placeholder.png";
/// Label for an absent critic or community rating.
pub const NOT_AVAILABLE: &str = "Not available";
/// Fixed message for the Loading state.
pub const LOADING_MESSAGE: &str = "Loading games...";
/// Fixed message for the Empty state.
pub const EMPTY_MESSAGE: &str = "No games found.";
/// Fixed message for the Error state. The underlying cause is logged, never
/// shown to the user.
pub const ERROR_MESSAGE: &str = "Something went wrong while fetching games. Please try again later.";

/// State of the results region. Re-entrant: any submission returns to
/// `Loading`, which immediately replaces whatever was rendered before.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Idle,
    Loading,
    Populated(Vec<GameSummary>),
    Empty,
    Error,
}

/// The filtered-catalog view: owns the filter controls' options, the current
/// selection, and the results region's state.
///
/// Each submission is stamped with a monotonically increasing token; a
/// response whose token is no longer the latest issued is discarded, so an
/// earlier request that resolves late can never overwrite a newer one.
#[derive(Debug)]
pub struct FilteredCatalogView {
    platform_options: Vec<ReferenceOption>,
    genre_options: Vec<ReferenceOption>,
    selected_platform: Option<i64>,
    selected_genre: Option<i64>,
    latest_token: u64,
    state: ViewState,
}

impl Default for FilteredCatalogView {
    fn default() -> Self {
        Self::new()
    }
}

impl FilteredCatalogView {
    pub fn new() -> Self {
        FilteredCatalogView {
            platform_options: Vec::new(),
            genre_options: Vec::new(),
            selected_platform: None,
            selected_genre: None,
            latest_token: 0,
            state: ViewState::Idle,
        }
    }

    /// Load both reference lists concurrently. The two requests are
    /// independent: if one fails its control simply stays unpopulated, and
    /// the other still loads. Failures are logged, never surfaced.
    #[instrument(level = "info", skip(self, api))]
    pub async fn initialize(&mut self, api: &CatalogApi) {
        let platform_api = api.clone();
        let genre_api = api.clone();
        // ureq is blocking, so each fetch runs on the blocking pool. The API
        // client is cloned because the spawned task needs 'static owned data.
        let platforms = tokio::task::spawn_blocking(move || platform_api.fetch_platforms());
        let genres = tokio::task::spawn_blocking(move || genre_api.fetch_genres());

        match platforms.await {
            Ok(Ok(options)) => self.append_platform_options(options),
            Ok(Err(e)) => warn!(error = %e, "Platform list failed to load; control left unpopulated"),
            Err(e) => warn!(error = %e, "Platform fetch task failed to join"),
        }
        match genres.await {
            Ok(Ok(options)) => self.append_genre_options(options),
            Ok(Err(e)) => warn!(error = %e, "Genre list failed to load; control left unpopulated"),
            Err(e) => warn!(error = %e, "Genre fetch task failed to join"),
        }
    }

    /// Handle a filter-form submission end to end: enter Loading, fetch the
    /// matching games, and apply the result unless a newer submission has
    /// been issued in the meantime.
    #[instrument(level = "info", skip(self, api))]
    pub async fn submit(&mut self, api: &CatalogApi) {
        let token = self.begin_submit();
        let filter = self.filter();
        let api = api.clone();
        let result = match tokio::task::spawn_blocking(move || api.fetch_games(&filter)).await {
            Ok(result) => result,
            Err(e) => Err(FetchError::Network(format!("fetch task failed to join: {}", e))),
        };
        self.apply_games_result(token, result);
    }

    /// Start a new submission: bump the token and clear the results region
    /// down to the loading indicator. Any still-outstanding fetch is now
    /// stale and will be discarded on arrival.
    pub fn begin_submit(&mut self) -> u64 {
        self.latest_token += 1;
        self.state = ViewState::Loading;
        self.latest_token
    }

    /// Apply a games response for the submission stamped with `token`.
    /// Stale responses (token older than the latest issued) are dropped.
    pub fn apply_games_result(&mut self, token: u64, result: Result<Vec<GameSummary>, FetchError>) {
        if token != self.latest_token {
            debug!(token, latest = self.latest_token, "Discarding stale games response");
            return;
        }
        self.state = match result {
            Ok(games) if games.is_empty() => ViewState::Empty,
            Ok(games) => ViewState::Populated(games),
            Err(e) => {
                error!(error = %e, "Games fetch failed");
                ViewState::Error
            }
        };
    }

    /// Append fetched platform options after the default placeholder,
    /// preserving response order.
    pub fn append_platform_options(&mut self, options: Vec<ReferenceOption>) {
        self.platform_options.extend(options);
    }

    /// Append fetched genre options after the default placeholder,
    /// preserving response order.
    pub fn append_genre_options(&mut self, options: Vec<ReferenceOption>) {
        self.genre_options.extend(options);
    }

    pub fn select_platform(&mut self, id: Option<i64>) {
        self.selected_platform = id;
    }

    pub fn select_genre(&mut self, id: Option<i64>) {
        self.selected_genre = id;
    }

    /// Snapshot of the current control selection, taken at submit time.
    pub fn filter(&self) -> Filter {
        Filter { platform_id: self.selected_platform, genre_id: self.selected_genre }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Render the platform select control.
    pub fn render_platform_select(&self) -> String {
        render_select("platform", "All Platforms", &self.platform_options)
    }

    /// Render the genre select control.
    pub fn render_genre_select(&self) -> String {
        render_select("genre", "All Genres", &self.genre_options)
    }

    /// Render the results region for the current state.
    pub fn render_results(&self) -> String {
        render(self.state())
    }
}

/// Mirrors a numeric range control's value into an adjacent text display on
/// every input event. Pure and synchronous; no network interaction.
#[derive(Debug, Default)]
pub struct RatingControl {
    value: i64,
    display: String,
}

impl RatingControl {
    pub fn on_input(&mut self, value: i64) {
        self.value = value;
        self.display = value.to_string();
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn display(&self) -> &str {
        &self.display
    }
}

/// Render a select control: the default placeholder option first, then one
/// option per fetched entry in response order.
fn render_select(id: &str, placeholder: &str, options: &[ReferenceOption]) -> String {
    let mut html = format!(
        "<select id=\"{id}\" name=\"{id}\">\n  <option value=\"\">{placeholder}</option>\n",
        id = id,
        placeholder = placeholder,
    );
    for option in options {
        html.push_str(&format!(
            "  <option value=\"{}\">{}</option>\n",
            option.id, option.name
        ));
    }
    html.push_str("</select>");
    html
}

/// Pure render of the results region. The view owns the whole region: each
/// call produces the full replacement markup for the current state.
pub fn render(state: &ViewState) -> String {
    match state {
        ViewState::Idle => String::new(),
        ViewState::Loading => format!("<p class=\"loading\">{}</p>", LOADING_MESSAGE),
        ViewState::Empty => format!("<p class=\"empty\">{}</p>", EMPTY_MESSAGE),
        ViewState::Error => format!("<p class=\"error\">{}</p>", ERROR_MESSAGE),
        ViewState::Populated(games) => {
            let mut html = String::from("<div class=\"game-list\">\n");
            for game in games {
                html.push_str(&render_card(game));
            }
            html.push_str("</div>");
            html
        }
    }
}

/// Render one game card: cover (placeholder fallback), name linked to the
/// detail view, comma-joined genres and platforms, critic rating to one
/// decimal with review count, community rating, and the summary when present.
pub fn render_card(game: &GameSummary) -> String {
    let cover = game.cover_url.as_deref().unwrap_or(PLACEHOLDER_COVER);
    let detail = game.detail_path();
    let critic = match game.aggregated_rating {
        Some(rating) => format!("{:.1}", rating),
        None => NOT_AVAILABLE.to_string(),
    };
    let community = match game.rating {
        Some(rating) => format!("{:.1}", rating),
        None => NOT_AVAILABLE.to_string(),
    };
    let summary_line = match game.summary.as_deref() {
        Some(summary) => format!("  <p class=\"summary\">{}</p>\n", summary),
        None => String::new(),
    };

    format!(
        "<div class=\"game-card\">\n  <a href=\"{detail}\"><img src=\"{cover}\" alt=\"{name} cover\"></a>\n  <h3><a href=\"{detail}\">{name}</a></h3>\n  <p class=\"genres\">{genres}</p>\n  <p class=\"platforms\">{platforms}</p>\n  <p class=\"critic-rating\">Critic rating: {critic} ({count} reviews)</p>\n  <p class=\"community-rating\">Community rating: {community}</p>\n{summary_line}</div>\n",
        detail = detail,
        cover = cover,
        name = game.name,
        genres = game.genres.join(", "),
        platforms = game.platforms.join(", "),
        critic = critic,
        count = game.aggregated_rating_count,
        community = community,
        summary_line = summary_line,
    )
}
