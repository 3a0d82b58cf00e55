//! Shared application state: one record store per collection.

use std::sync::Arc;

use lifelines_core::gateway::fields_of;
use lifelines_core::timeline::{demo_events, demo_people, CollectionKind};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::storage::Sheet;

#[derive(Clone)]
pub struct AppState {
    pub people: Arc<RwLock<Sheet>>,
    pub events: Arc<RwLock<Sheet>>,
}

impl AppState {
    /// Empty people and events stores.
    pub fn new() -> Self {
        Self {
            people: Arc::new(RwLock::new(Sheet::people())),
            events: Arc::new(RwLock::new(Sheet::events())),
        }
    }

    /// Stores seeded with the bundled demo dataset.
    pub fn with_demo_data() -> Self {
        let mut people = Sheet::people();
        let mut events = Sheet::events();
        seed(&mut people, &demo_people());
        seed(&mut events, &demo_events());

        tracing::info!(
            people = people.len(),
            events = events.len(),
            "seeded record stores with demo data"
        );

        Self {
            people: Arc::new(RwLock::new(people)),
            events: Arc::new(RwLock::new(events)),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        if config.seed_demo {
            Self::with_demo_data()
        } else {
            Self::new()
        }
    }

    /// The store holding the given collection.
    pub fn sheet(&self, kind: CollectionKind) -> &Arc<RwLock<Sheet>> {
        match kind {
            CollectionKind::People => &self.people,
            CollectionKind::Events => &self.events,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

fn seed<T: Serialize>(sheet: &mut Sheet, records: &[T]) {
    for record in records {
        match fields_of(record) {
            Ok(fields) => {
                sheet.insert(&fields);
            }
            Err(e) => tracing::warn!(error = %e, "skipping demo record"),
        }
    }
}
