use crate::timeline::CollectionKind;

/// Key under which the people collection is stored.
pub const PEOPLE_KEY: &str = "timeline_people";

/// Key under which the events collection is stored.
pub const EVENTS_KEY: &str = "timeline_events";

/// Key under which the last successful sync time is stored.
pub const LAST_SYNC_KEY: &str = "timeline_last_sync";

/// Returns the cache key for a collection.
pub fn collection_key(kind: CollectionKind) -> &'static str {
    match kind {
        CollectionKind::People => PEOPLE_KEY,
        CollectionKind::Events => EVENTS_KEY,
    }
}

/// Every key the timeline writes.
pub fn all_keys() -> [&'static str; 3] {
    [PEOPLE_KEY, EVENTS_KEY, LAST_SYNC_KEY]
}
