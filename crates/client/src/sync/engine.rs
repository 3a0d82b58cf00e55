//! Offline-first sync engine.
//!
//! Owns the in-memory collections and the sync status. Startup seeds from
//! the local cache, a full sync replaces both collections with the remote
//! snapshot, and adds are applied locally before the gateway confirms them.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use lifelines_core::cache::CacheStore;
use lifelines_core::gateway::{Gateway, GatewayRequest, Snapshot};
use lifelines_core::sync::{
    fetch_failure_status, temporary_id, visible_status, write_failure_message, SyncOutcome,
    SyncStatus, DEFAULT_STATUS_WINDOW,
};
use lifelines_core::timeline::{
    demo_events, demo_people, Event, NewEvent, NewPerson, Person, TimelineRecord,
};
use serde::Serialize;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::store::LocalCache;

/// Mutable engine state. Only touched under the state mutex.
#[derive(Debug)]
struct State {
    people: Vec<Person>,
    events: Vec<Event>,
    status: SyncStatus,
    status_changed_at: Instant,
    error: Option<String>,
}

impl State {
    fn set_status(&mut self, status: SyncStatus, error: Option<String>) {
        self.status = status;
        self.status_changed_at = Instant::now();
        self.error = error;
    }
}

/// Selects the in-memory collection a record type lives in.
trait Stored: TimelineRecord {
    fn collection(state: &State) -> &Vec<Self>;
    fn collection_mut(state: &mut State) -> &mut Vec<Self>;
}

impl Stored for Person {
    fn collection(state: &State) -> &Vec<Self> {
        &state.people
    }

    fn collection_mut(state: &mut State) -> &mut Vec<Self> {
        &mut state.people
    }
}

impl Stored for Event {
    fn collection(state: &State) -> &Vec<Self> {
        &state.events
    }

    fn collection_mut(state: &mut State) -> &mut Vec<Self> {
        &mut state.events
    }
}

struct Inner {
    gateway: Arc<dyn Gateway>,
    cache: LocalCache,
    state: Mutex<State>,
    syncing: AtomicBool,
    started: AtomicBool,
}

/// Clears the in-flight flag when a full sync ends, even if it panicked.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Result of an optimistic add.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome<R> {
    /// The record as appended locally, carrying its temporary identifier.
    pub record: R,
    /// Failure message when the gateway did not accept the write.
    pub error: Option<String>,
}

impl<R> WriteOutcome<R> {
    pub fn is_confirmed(&self) -> bool {
        self.error.is_none()
    }
}

/// Point-in-time view of the engine for status reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub people: usize,
    pub events: usize,
    pub last_sync: Option<DateTime<Utc>>,
    pub status: SyncStatus,
    pub error: Option<String>,
}

/// Handle to the sync engine. Clones share the same state.
#[derive(Clone)]
pub struct SyncEngine {
    inner: Arc<Inner>,
    status_window: Duration,
}

impl SyncEngine {
    /// Creates an engine seeded from the local cache.
    ///
    /// A collection the cache has never stored is seeded from the demo
    /// dataset. A stored empty collection stays empty.
    pub fn new(gateway: Arc<dyn Gateway>, store: Arc<dyn CacheStore>) -> Self {
        let cache = LocalCache::new(store);
        let people = cache.load_collection::<Person>().unwrap_or_else(|| {
            tracing::debug!("no cached people, seeding demo data");
            demo_people()
        });
        let events = cache.load_collection::<Event>().unwrap_or_else(|| {
            tracing::debug!("no cached events, seeding demo data");
            demo_events()
        });

        let state = State {
            people,
            events,
            status: SyncStatus::Idle,
            status_changed_at: Instant::now(),
            error: None,
        };

        Self {
            inner: Arc::new(Inner {
                gateway,
                cache,
                state: Mutex::new(state),
                syncing: AtomicBool::new(false),
                started: AtomicBool::new(false),
            }),
            status_window: DEFAULT_STATUS_WINDOW,
        }
    }

    /// Sets how long `success` and `error` stay visible.
    pub fn with_status_window(mut self, window: Duration) -> Self {
        self.status_window = window;
        self
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Triggers the startup sync in the background.
    ///
    /// Only the first call spawns a sync; later calls return `None`.
    pub fn start(&self) -> Option<JoinHandle<SyncOutcome>> {
        if self.inner.started.swap(true, Ordering::AcqRel) {
            return None;
        }
        let engine = self.clone();
        Some(tokio::spawn(async move { engine.sync().await }))
    }

    /// Runs a full sync.
    ///
    /// A request made while another full sync is in flight is dropped and
    /// reported as [`SyncOutcome::AlreadyRunning`].
    pub async fn sync(&self) -> SyncOutcome {
        if self.inner.syncing.swap(true, Ordering::AcqRel) {
            tracing::debug!("full sync already in flight");
            return SyncOutcome::AlreadyRunning;
        }
        let _in_flight = InFlight(&self.inner.syncing);

        self.lock().set_status(SyncStatus::Syncing, None);
        tracing::info!("sync started");

        match self.inner.gateway.fetch_all().await {
            Ok(snapshot) => self.apply_snapshot(snapshot),
            Err(e) => {
                let has_cached_people = self
                    .inner
                    .cache
                    .load_collection::<Person>()
                    .is_some_and(|people| !people.is_empty());
                let (status, error) = fetch_failure_status(has_cached_people);
                tracing::warn!(error = %e, offline = has_cached_people, "sync failed");
                self.lock().set_status(status, error);

                let reason = e.to_string();
                if has_cached_people {
                    SyncOutcome::Offline { reason }
                } else {
                    SyncOutcome::Failed { reason }
                }
            }
        }
    }

    fn apply_snapshot(&self, snapshot: Snapshot) -> SyncOutcome {
        let Snapshot { people, events } = snapshot;
        let outcome = SyncOutcome::Synced {
            people: people.len(),
            events: events.len(),
        };

        {
            let mut state = self.lock();
            state.people = people;
            state.events = events;
            self.inner.cache.save_collection(&state.people);
            self.inner.cache.save_collection(&state.events);
            self.inner.cache.save_last_sync(Utc::now());
            state.set_status(SyncStatus::Success, None);
        }

        tracing::info!(%outcome, "sync finished");
        outcome
    }

    /// Adds a person optimistically.
    pub async fn add_person(&self, draft: NewPerson) -> WriteOutcome<Person> {
        self.add(draft).await
    }

    /// Adds an event optimistically.
    pub async fn add_event(&self, draft: NewEvent) -> WriteOutcome<Event> {
        self.add(draft).await
    }

    /// Appends a record under a temporary identifier, persists the
    /// collection, then sends the draft to the gateway.
    ///
    /// A rejected write is not rolled back; the record stays until the next
    /// full sync replaces the collection.
    async fn add<R: Stored>(&self, draft: R::Draft) -> WriteOutcome<R> {
        let request = GatewayRequest::add::<R>(&draft);

        let record = {
            let mut state = self.lock();
            let id = temporary_id(&mut rand::rng(), |candidate| {
                R::collection(&state).iter().any(|r| r.id() == candidate)
            });
            let record = R::from_draft(id, draft);
            let collection = R::collection_mut(&mut state);
            collection.push(record.clone());
            self.inner.cache.save_collection(collection);
            state.set_status(SyncStatus::Syncing, None);
            record
        };
        tracing::debug!(kind = %R::KIND, id = record.id(), "record added locally");

        let result = match request {
            Ok(request) => self.inner.gateway.add_record(request).await.map(|_| ()),
            Err(e) => Err(e),
        };

        let error = match result {
            Ok(()) => {
                tracing::info!(kind = %R::KIND, id = record.id(), "write confirmed");
                self.lock().set_status(SyncStatus::Success, None);
                None
            }
            Err(e) => {
                let message = write_failure_message(R::KIND, &e);
                tracing::warn!(kind = %R::KIND, id = record.id(), error = %e, "write failed");
                self.lock()
                    .set_status(SyncStatus::Error, Some(message.clone()));
                Some(message)
            }
        };

        WriteOutcome { record, error }
    }

    /// Current people, in stored order.
    pub fn people(&self) -> Vec<Person> {
        self.lock().people.clone()
    }

    /// Current events, in stored order.
    pub fn events(&self) -> Vec<Event> {
        self.lock().events.clone()
    }

    /// The status as currently visible. Terminal states read as `idle` once
    /// the display window has elapsed.
    pub fn status(&self) -> SyncStatus {
        let state = self.lock();
        visible_status(
            state.status,
            state.status_changed_at.elapsed(),
            self.status_window,
        )
    }

    /// Message of the last failure, cleared when the next sync starts.
    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    pub fn last_sync(&self) -> Option<DateTime<Utc>> {
        self.inner.cache.load_last_sync()
    }

    pub fn report(&self) -> StatusReport {
        let (people, events) = {
            let state = self.lock();
            (state.people.len(), state.events.len())
        };
        StatusReport {
            people,
            events,
            last_sync: self.last_sync(),
            status: self.status(),
            error: self.error(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use lifelines_core::cache::{EVENTS_KEY, LAST_SYNC_KEY, PEOPLE_KEY};
    use lifelines_core::gateway::{Action, GatewayError};
    use lifelines_core::sync::is_temporary_id;
    use lifelines_core::timeline::Category;

    use super::*;
    use crate::store::MemoryStore;
    use crate::sync::testing::MockGateway;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn remote_snapshot() -> Snapshot {
        Snapshot::new(
            vec![Person::new("101", "Remote Ada", date(1990, 1, 1), "bg-blue-100")],
            vec![Event::new(
                "201",
                "101",
                "Born",
                Category::Alive,
                date(1990, 1, 1),
            )],
        )
    }

    fn engine(gateway: &Arc<MockGateway>, store: &MemoryStore) -> SyncEngine {
        SyncEngine::new(gateway.clone(), Arc::new(store.clone()))
    }

    fn new_person() -> NewPerson {
        NewPerson::new("Grace", date(1985, 12, 9), "bg-pink-100")
    }

    #[tokio::test]
    async fn test_seeds_demo_data_when_cache_absent() {
        let gateway = Arc::new(MockGateway::new());
        let store = MemoryStore::new();

        let engine = engine(&gateway, &store);

        assert_eq!(engine.people(), demo_people());
        assert_eq!(engine.events(), demo_events());
        assert_eq!(engine.status(), SyncStatus::Idle);
        assert_eq!(gateway.fetch_calls(), 0);
    }

    #[tokio::test]
    async fn test_cached_empty_collection_is_not_reseeded() {
        let store = MemoryStore::new();
        store.set(PEOPLE_KEY, b"[]").unwrap();

        let engine = engine(&Arc::new(MockGateway::new()), &store);

        assert!(engine.people().is_empty());
        assert_eq!(engine.events(), demo_events());
    }

    #[tokio::test]
    async fn test_sync_replaces_and_persists_both_collections() {
        let gateway = Arc::new(MockGateway::new().with_snapshot(remote_snapshot()));
        let store = MemoryStore::new();
        let engine = engine(&gateway, &store);

        let outcome = engine.sync().await;

        assert_eq!(
            outcome,
            SyncOutcome::Synced {
                people: 1,
                events: 1
            }
        );
        assert_eq!(engine.people(), remote_snapshot().people);
        assert_eq!(engine.events(), remote_snapshot().events);
        assert_eq!(engine.status(), SyncStatus::Success);
        assert!(engine.last_sync().is_some());

        let reloaded = SyncEngine::new(gateway.clone(), Arc::new(store.clone()));
        assert_eq!(reloaded.people(), remote_snapshot().people);
        assert_eq!(reloaded.events(), remote_snapshot().events);
    }

    #[tokio::test]
    async fn test_repeated_sync_leaves_identical_cache() {
        let gateway = Arc::new(MockGateway::new().with_snapshot(remote_snapshot()));
        let store = MemoryStore::new();
        let engine = engine(&gateway, &store);

        engine.sync().await;
        let people = store.get(PEOPLE_KEY).unwrap();
        let events = store.get(EVENTS_KEY).unwrap();
        engine.sync().await;

        assert_eq!(store.get(PEOPLE_KEY).unwrap(), people);
        assert_eq!(store.get(EVENTS_KEY).unwrap(), events);
        assert_eq!(gateway.fetch_calls(), 2);
    }

    #[tokio::test]
    async fn test_fetch_failure_with_cached_people_stays_idle() {
        let gateway = Arc::new(
            MockGateway::new().with_fetch_error(GatewayError::Transport("refused".into())),
        );
        let store = MemoryStore::new();
        let cached = vec![Person::new("7", "Cached", date(1970, 5, 5), "bg-red-100")];
        LocalCache::new(Arc::new(store.clone())).save_collection(&cached);
        let engine = engine(&gateway, &store);

        let outcome = engine.sync().await;

        assert!(matches!(outcome, SyncOutcome::Offline { .. }));
        assert_eq!(engine.status(), SyncStatus::Idle);
        assert_eq!(engine.error(), None);
        assert_eq!(engine.people(), cached);
        assert_eq!(store.get(LAST_SYNC_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_fetch_failure_without_cache_reports_error() {
        let gateway = Arc::new(
            MockGateway::new().with_fetch_error(GatewayError::Transport("refused".into())),
        );
        let store = MemoryStore::new();
        let engine = engine(&gateway, &store);

        let outcome = engine.sync().await;

        assert_eq!(
            outcome,
            SyncOutcome::Failed {
                reason: "Transport error: refused".to_string()
            }
        );
        assert_eq!(engine.status(), SyncStatus::Error);
        assert_eq!(
            engine.error().as_deref(),
            Some("Could not connect to remote store")
        );
        assert_eq!(engine.people(), demo_people());
    }

    #[tokio::test]
    async fn test_start_runs_once() {
        let gateway = Arc::new(MockGateway::new().with_snapshot(remote_snapshot()));
        let engine = engine(&gateway, &MemoryStore::new());

        let handle = engine.start().expect("first start spawns a sync");
        assert!(engine.start().is_none());
        assert!(engine.clone().start().is_none());

        assert!(handle.await.unwrap().is_synced());
        assert_eq!(gateway.fetch_calls(), 1);
    }

    #[tokio::test]
    async fn test_overlapping_sync_is_dropped() {
        let gateway = Arc::new(
            MockGateway::new()
                .with_snapshot(remote_snapshot())
                .gated(),
        );
        let engine = engine(&gateway, &MemoryStore::new());

        let first = tokio::spawn({
            let engine = engine.clone();
            async move { engine.sync().await }
        });
        gateway.entered().await;

        assert_eq!(engine.status(), SyncStatus::Syncing);
        assert_eq!(engine.sync().await, SyncOutcome::AlreadyRunning);

        gateway.release();
        assert!(first.await.unwrap().is_synced());
        assert_eq!(gateway.fetch_calls(), 1);

        assert!(engine.sync().await.is_synced());
    }

    #[tokio::test]
    async fn test_add_is_visible_before_gateway_answers() {
        let gateway = Arc::new(MockGateway::new().gated());
        let store = MemoryStore::new();
        let engine = engine(&gateway, &store);
        let before = engine.people().len();

        let pending = tokio::spawn({
            let engine = engine.clone();
            async move { engine.add_person(new_person()).await }
        });
        gateway.entered().await;

        let people = engine.people();
        assert_eq!(people.len(), before + 1);
        let added = people.last().unwrap();
        assert!(is_temporary_id(&added.id));
        assert_eq!(added.name, "Grace");
        assert_eq!(engine.status(), SyncStatus::Syncing);

        let cached = LocalCache::new(Arc::new(store.clone()))
            .load_collection::<Person>()
            .unwrap();
        assert_eq!(cached.len(), before + 1);

        gateway.release();
        let outcome = pending.await.unwrap();
        assert!(outcome.is_confirmed());
        assert_eq!(engine.status(), SyncStatus::Success);
    }

    #[tokio::test]
    async fn test_add_sends_draft_without_temporary_id() {
        let gateway = Arc::new(MockGateway::new());
        let engine = engine(&gateway, &MemoryStore::new());

        let draft = NewEvent::new("1", "Moved", Category::Home, date(2020, 3, 1));
        let outcome = engine.add_event(draft).await;

        let requests = gateway.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].action, Action::AddEvent);
        assert!(!requests[0].payload.contains_key("id"));
        assert_eq!(engine.events().last(), Some(&outcome.record));
    }

    #[tokio::test]
    async fn test_rejected_add_keeps_record() {
        let gateway =
            Arc::new(MockGateway::new().with_write_error(GatewayError::Rejected(String::new())));
        let engine = engine(&gateway, &MemoryStore::new());

        let outcome = engine.add_person(new_person()).await;

        assert_eq!(outcome.error.as_deref(), Some("Failed to save person"));
        assert_eq!(engine.status(), SyncStatus::Error);
        assert_eq!(engine.error().as_deref(), Some("Failed to save person"));
        assert!(engine.people().contains(&outcome.record));
    }

    #[tokio::test]
    async fn test_rejected_add_uses_server_message() {
        let gateway = Arc::new(
            MockGateway::new().with_write_error(GatewayError::Rejected("Sheet is locked".into())),
        );
        let engine = engine(&gateway, &MemoryStore::new());

        let outcome = engine.add_event(NewEvent::new(
            "1",
            "Job",
            Category::Work,
            date(2001, 1, 1),
        ))
        .await;

        assert_eq!(outcome.error.as_deref(), Some("Sheet is locked"));
    }

    #[tokio::test]
    async fn test_temporary_ids_are_replaced_by_next_sync() {
        let gateway = Arc::new(MockGateway::new().with_snapshot(remote_snapshot()));
        let engine = engine(&gateway, &MemoryStore::new());

        engine.add_person(new_person()).await;
        assert!(engine.people().iter().any(|p| is_temporary_id(&p.id)));

        engine.sync().await;

        assert!(!engine.people().iter().any(|p| is_temporary_id(&p.id)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_terminal_status_fades_after_window() {
        let gateway = Arc::new(MockGateway::new().with_snapshot(remote_snapshot()));
        let engine = engine(&gateway, &MemoryStore::new());

        engine.sync().await;
        assert_eq!(engine.status(), SyncStatus::Success);

        tokio::time::advance(Duration::from_millis(2999)).await;
        assert_eq!(engine.status(), SyncStatus::Success);

        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(engine.status(), SyncStatus::Idle);
        assert_eq!(engine.people(), remote_snapshot().people);
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_window_is_configurable() {
        let gateway =
            Arc::new(MockGateway::new().with_write_error(GatewayError::Rejected(String::new())));
        let engine = engine(&gateway, &MemoryStore::new())
            .with_status_window(Duration::from_millis(500));

        engine.add_person(new_person()).await;
        assert_eq!(engine.status(), SyncStatus::Error);

        tokio::time::advance(Duration::from_millis(500)).await;
        assert_eq!(engine.status(), SyncStatus::Idle);
        assert_eq!(engine.error().as_deref(), Some("Failed to save person"));
    }

    #[tokio::test]
    async fn test_report() {
        let gateway = Arc::new(MockGateway::new().with_snapshot(remote_snapshot()));
        let engine = engine(&gateway, &MemoryStore::new());
        assert_eq!(engine.report().last_sync, None);

        engine.sync().await;
        let report = engine.report();

        assert_eq!(report.people, 1);
        assert_eq!(report.events, 1);
        assert_eq!(report.status, SyncStatus::Success);
        assert!(report.last_sync.is_some());
    }
}
