/// The user's current platform/genre selection used to scope a games query.
/// Both fields are independently optional; an absent selection contributes no
/// query parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Filter {
    pub platform_id: Option<i64>,
    pub genre_id: Option<i64>,
}

impl Filter {
    /// Build the query string for the games endpoint: a `platform` parameter
    /// iff a platform is selected, a `genre` parameter iff a genre is
    /// selected, joined with `&`. `platform` always precedes `genre`.
    /// Returns an empty string when nothing is selected.
    pub fn to_query_string(&self) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(2);
        if let Some(id) = self.platform_id {
            parts.push(format!("platform={}", id));
        }
        if let Some(id) = self.genre_id {
            parts.push(format!("genre={}", id));
        }
        parts.join("&")
    }
}
