use serde::{Deserialize, Serialize};

/// Denormalized record describing one game for card rendering. Constructed
/// fresh from each games response and discarded on the next query; no
/// identity persists across requests.
///
/// Field names match the wire format of the games endpoint (the server's
/// IGDB passthrough): `aggregated_rating` is the critic rating, `rating` the
/// community rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub platforms: Vec<String>,
    #[serde(default)]
    pub aggregated_rating: Option<f64>,
    #[serde(default)]
    pub aggregated_rating_count: i64,
    #[serde(default)]
    pub rating: Option<f64>,
}

impl GameSummary {
    /// Path of the per-game detail view this card links to.
    pub fn detail_path(&self) -> String {
        format!("/games/{}", self.id)
    }
}
