//! Action vocabulary. Both tables are open: unknown action types pass
//! through untouched and have no conflict.

pub const FAVORITE: &str = "favorite";
pub const UNFAVORITE: &str = "unfavorite";
pub const BOOKMARK: &str = "bookmark";
pub const MORE_LIKE_THIS: &str = "more_like_this";
pub const LESS_LIKE_THIS: &str = "less_like_this";

/// Maps client surface forms (Elk UI naming) onto the stored action name.
pub fn normalize_action(action_type: &str) -> &str {
    match action_type {
        "favourited" | "favourite" => FAVORITE,
        "unfavourite" => UNFAVORITE,
        "bookmarked" => BOOKMARK,
        other => other,
    }
}

/// The action that cannot coexist with `action_type` on the same
/// (user, post). Symmetric.
pub fn conflicting_action(action_type: &str) -> Option<&'static str> {
    match action_type {
        MORE_LIKE_THIS => Some(LESS_LIKE_THIS),
        LESS_LIKE_THIS => Some(MORE_LIKE_THIS),
        _ => None,
    }
}
