//! Collection controller
//!
//! Owns the authoritative in-memory book snapshot and every piece of derived
//! state the host UI renders: the filtered subset, summary statistics, the
//! create/edit form state machine, and dismissible notifications. The
//! controller is the single writer of the snapshot; views receive read-only
//! projections.
//!
//! Persistence is delegated to a [`BookStore`]. After every successful
//! create or update the controller re-fetches the full list rather than
//! merging locally, so derived state always reflects the store.

use crate::error::{CatalogError, Result};
use crate::filter::FilterCriteria;
use crate::form::{BookDraft, FormMode, FormState};
use crate::models::{Book, BookId, Genre, ReadingStatus};
use crate::store::{BookStore, SortSpec};
use core_runtime::events::{CatalogEvent, CoreEvent, EventBus, EventSeverity, NotificationEvent};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Whether the snapshot has been fetched yet.
///
/// Hosts render a loading placeholder while `Loading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
}

/// Summary counts over the unfiltered snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectionStats {
    /// Total number of books
    pub total: usize,
    /// Books with status selesai
    pub selesai: usize,
    /// Books with status sedang dibaca
    pub sedang_dibaca: usize,
}

/// A dismissible message for the host UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub severity: EventSeverity,
    pub message: String,
}

/// Top-level controller for the collection page.
pub struct CollectionController {
    store: Arc<dyn BookStore>,
    events: EventBus,
    books: Vec<Book>,
    criteria: FilterCriteria,
    load_state: LoadState,
    form: FormState,
    submit_in_flight: Arc<AtomicBool>,
    notifications: Vec<Notification>,
    next_notification_id: u64,
}

impl CollectionController {
    /// Create a controller that has not fetched anything yet.
    ///
    /// Call [`refresh`](Self::refresh) to load the initial snapshot.
    pub fn new(store: Arc<dyn BookStore>, events: EventBus) -> Self {
        Self {
            store,
            events,
            books: Vec::new(),
            criteria: FilterCriteria::empty(),
            load_state: LoadState::Loading,
            form: FormState::Closed,
            submit_in_flight: Arc::new(AtomicBool::new(false)),
            notifications: Vec::new(),
            next_notification_id: 0,
        }
    }

    // ------------------------------------------------------------------
    // Snapshot lifecycle
    // ------------------------------------------------------------------

    /// Fetch the full list, most-recently-updated first, and replace the
    /// snapshot.
    ///
    /// On failure the previous snapshot is kept and a notification is
    /// posted; the error is also returned so hosts can react directly.
    #[instrument(skip(self))]
    pub async fn refresh(&mut self) -> Result<()> {
        self.load_state = LoadState::Loading;
        self.events
            .emit(CoreEvent::Catalog(CatalogEvent::RefreshStarted))
            .ok();

        match self.store.list(SortSpec::recently_updated()).await {
            Ok(books) => {
                info!(book_count = books.len(), "Collection refreshed");
                self.books = books;
                self.load_state = LoadState::Ready;
                self.events
                    .emit(CoreEvent::Catalog(CatalogEvent::RefreshCompleted {
                        book_count: self.books.len(),
                    }))
                    .ok();
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Collection refresh failed");
                self.load_state = LoadState::Ready;
                self.events
                    .emit(CoreEvent::Catalog(CatalogEvent::RefreshFailed {
                        message: err.to_string(),
                    }))
                    .ok();
                self.notify(EventSeverity::Error, err.to_string());
                Err(err.into())
            }
        }
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    /// The full, unfiltered snapshot in store order.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Every book satisfying all active criteria.
    pub fn filtered_books(&self) -> Vec<&Book> {
        self.books
            .iter()
            .filter(|b| self.criteria.matches(b))
            .collect()
    }

    /// Summary counts over the unfiltered snapshot.
    pub fn stats(&self) -> CollectionStats {
        CollectionStats {
            total: self.books.len(),
            selesai: self
                .books
                .iter()
                .filter(|b| b.reading_status == ReadingStatus::Selesai)
                .count(),
            sedang_dibaca: self
                .books
                .iter()
                .filter(|b| b.reading_status == ReadingStatus::SedangDibaca)
                .count(),
        }
    }

    // ------------------------------------------------------------------
    // Filter criteria
    // ------------------------------------------------------------------

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.criteria.set_search(search);
    }

    pub fn toggle_genre(&mut self, genre: Genre) {
        self.criteria.toggle_genre(genre);
    }

    pub fn set_status_filter(&mut self, status: Option<ReadingStatus>) {
        self.criteria.set_status(status);
    }

    pub fn clear_filters(&mut self) {
        self.criteria.clear();
    }

    // ------------------------------------------------------------------
    // Form state machine
    // ------------------------------------------------------------------

    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Open the form in create mode with default field values.
    pub fn open_create(&mut self) {
        debug!("Opening entry form in create mode");
        self.form = FormState::Open {
            mode: FormMode::Create,
            draft: BookDraft::default(),
        };
    }

    /// Open the form pre-populated from the book with the given id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` when the id is not in the snapshot.
    pub fn open_edit(&mut self, id: &BookId) -> Result<()> {
        let Some(book) = self.books.iter().find(|b| &b.id == id) else {
            let err = CatalogError::NotFound {
                id: id.to_string(),
            };
            self.notify(EventSeverity::Error, err.to_string());
            return Err(err);
        };

        debug!(book_id = %id, "Opening entry form in edit mode");
        self.form = FormState::Open {
            mode: FormMode::Edit(id.clone()),
            draft: BookDraft::from_book(book),
        };
        Ok(())
    }

    /// Discard in-progress edits without persisting.
    ///
    /// Ignored while a submission is in flight; the submit resolution
    /// decides whether the form closes.
    pub fn cancel_form(&mut self) {
        if self.submit_in_flight.load(Ordering::SeqCst) {
            warn!("Ignoring cancel while a submission is in flight");
            return;
        }
        self.form = FormState::Closed;
    }

    /// Mutable access to the open draft, `None` when the form is closed.
    pub fn draft_mut(&mut self) -> Option<&mut BookDraft> {
        match &mut self.form {
            FormState::Open { draft, .. } => Some(draft),
            FormState::Closed => None,
        }
    }

    /// Whether a submission is currently outstanding.
    ///
    /// Hosts should disable the submit control while this is true.
    pub fn is_busy(&self) -> bool {
        self.submit_in_flight.load(Ordering::SeqCst)
    }

    /// Normalize the draft and persist it, then close the form and refresh.
    ///
    /// Exactly one submission may be outstanding; a second call while one is
    /// in flight returns `CatalogError::Busy` without touching the store.
    /// On any failure the form stays open with the draft intact and a
    /// notification is posted.
    #[instrument(skip(self))]
    pub async fn submit(&mut self) -> Result<()> {
        if self.submit_in_flight.load(Ordering::SeqCst) {
            warn!("Rejecting submit while another is in flight");
            return Err(CatalogError::Busy);
        }

        let (mode, draft) = match &self.form {
            FormState::Open { mode, draft } => (mode.clone(), draft.clone()),
            FormState::Closed => return Err(CatalogError::FormClosed),
        };

        let fields = match draft.normalize() {
            Ok(fields) => fields,
            Err(err) => {
                self.events
                    .emit(CoreEvent::Catalog(CatalogEvent::SubmitFailed {
                        message: err.to_string(),
                    }))
                    .ok();
                self.notify(EventSeverity::Warning, err.to_string());
                return Err(err);
            }
        };

        let guard = InFlightGuard::hold(&self.submit_in_flight);
        let result = match &mode {
            FormMode::Create => self.store.create(&fields).await,
            FormMode::Edit(id) => self.store.update(id, &fields).await,
        };
        drop(guard);

        match result {
            Ok(book) => {
                let event = match mode {
                    FormMode::Create => CatalogEvent::BookCreated {
                        book_id: book.id.to_string(),
                    },
                    FormMode::Edit(_) => CatalogEvent::BookUpdated {
                        book_id: book.id.to_string(),
                    },
                };
                info!(book_id = %book.id, "Book persisted");
                self.events.emit(CoreEvent::Catalog(event)).ok();
                self.form = FormState::Closed;

                // The store owns ordering and timestamps, so re-fetch instead
                // of merging locally. A refresh failure here already posts
                // its own notification.
                if let Err(err) = self.refresh().await {
                    warn!(error = %err, "Refresh after submit failed");
                }
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Submit failed");
                self.events
                    .emit(CoreEvent::Catalog(CatalogEvent::SubmitFailed {
                        message: err.to_string(),
                    }))
                    .ok();
                self.notify(EventSeverity::Error, err.to_string());
                Err(err.into())
            }
        }
    }

    // ------------------------------------------------------------------
    // Notifications
    // ------------------------------------------------------------------

    /// Notifications awaiting dismissal, oldest first.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Dismiss a notification by id. Returns false when the id is unknown.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.notifications.len();
        self.notifications.retain(|n| n.id != id);
        let removed = self.notifications.len() < before;
        if removed {
            self.events
                .emit(CoreEvent::Notification(NotificationEvent::Dismissed {
                    notification_id: id,
                }))
                .ok();
        }
        removed
    }

    fn notify(&mut self, severity: EventSeverity, message: String) {
        let id = self.next_notification_id;
        self.next_notification_id += 1;

        self.events
            .emit(CoreEvent::Notification(NotificationEvent::Posted {
                notification_id: id,
                severity,
                message: message.clone(),
            }))
            .ok();
        self.notifications.push(Notification {
            id,
            severity,
            message,
        });
    }
}

/// Marks a submission as outstanding for its own lifetime.
///
/// The flag is cleared on drop, so every exit from the store call releases
/// it, including a submit future dropped mid-await.
struct InFlightGuard {
    flag: Arc<AtomicBool>,
}

impl InFlightGuard {
    fn hold(flag: &Arc<AtomicBool>) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self {
            flag: Arc::clone(flag),
        }
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookFields;
    use crate::store::{self, StoreError};
    use async_trait::async_trait;
    use mockall::mock;
    use mockall::predicate::*;

    mock! {
        pub Store {}

        #[async_trait]
        impl BookStore for Store {
            async fn list(&self, sort: SortSpec) -> store::Result<Vec<Book>>;
            async fn create(&self, fields: &BookFields) -> store::Result<Book>;
            async fn update(&self, id: &BookId, fields: &BookFields) -> store::Result<Book>;
        }
    }

    fn book(id: &str, title: &str, author: &str, genre: Genre, status: ReadingStatus) -> Book {
        Book {
            id: BookId::from(id),
            title: title.to_string(),
            author: author.to_string(),
            genre,
            publication_year: None,
            description: None,
            reading_status: status,
            rating: None,
            pages: None,
            isbn: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    fn sample_list() -> Vec<Book> {
        vec![
            book(
                "b-1",
                "Laskar Pelangi",
                "Andrea Hirata",
                Genre::Fiksi,
                ReadingStatus::Selesai,
            ),
            book(
                "b-2",
                "Clean Code",
                "Robert Martin",
                Genre::Teknologi,
                ReadingStatus::SedangDibaca,
            ),
        ]
    }

    fn controller_with(store: MockStore) -> CollectionController {
        CollectionController::new(Arc::new(store), EventBus::new(16))
    }

    #[tokio::test]
    async fn test_refresh_replaces_snapshot() {
        let mut store = MockStore::new();
        store
            .expect_list()
            .times(1)
            .returning(|_| Ok(sample_list()));

        let mut controller = controller_with(store);
        assert!(controller.is_loading());

        controller.refresh().await.unwrap();

        assert!(!controller.is_loading());
        assert_eq!(controller.books().len(), 2);
        assert_eq!(
            controller.stats(),
            CollectionStats {
                total: 2,
                selesai: 1,
                sedang_dibaca: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_snapshot_and_notifies() {
        let mut store = MockStore::new();
        let mut seq = mockall::Sequence::new();
        store
            .expect_list()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(sample_list()));
        store
            .expect_list()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(StoreError::Unavailable("connection refused".to_string())));

        let mut controller = controller_with(store);
        controller.refresh().await.unwrap();
        assert_eq!(controller.books().len(), 2);

        let result = controller.refresh().await;
        assert!(result.is_err());
        // Previous snapshot survives the failed fetch
        assert_eq!(controller.books().len(), 2);
        assert!(!controller.is_loading());

        let notifications = controller.notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].severity, EventSeverity::Error);
    }

    #[tokio::test]
    async fn test_filtered_books_is_subset() {
        let mut store = MockStore::new();
        store.expect_list().returning(|_| Ok(sample_list()));

        let mut controller = controller_with(store);
        controller.refresh().await.unwrap();

        controller.set_search("andrea");
        let hits = controller.filtered_books();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Laskar Pelangi");

        controller.clear_filters();
        assert_eq!(controller.filtered_books().len(), controller.books().len());
    }

    #[tokio::test]
    async fn test_status_filter_through_controller() {
        let mut store = MockStore::new();
        store.expect_list().returning(|_| Ok(sample_list()));

        let mut controller = controller_with(store);
        controller.refresh().await.unwrap();

        controller.set_status_filter(Some(ReadingStatus::SedangDibaca));
        let hits = controller.filtered_books();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Clean Code");
    }

    #[tokio::test]
    async fn test_open_edit_unknown_id() {
        let mut store = MockStore::new();
        store.expect_list().returning(|_| Ok(sample_list()));

        let mut controller = controller_with(store);
        controller.refresh().await.unwrap();

        let result = controller.open_edit(&BookId::from("missing"));
        assert!(matches!(result, Err(CatalogError::NotFound { .. })));
        assert!(!controller.form().is_open());
        assert_eq!(controller.notifications().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_create_closes_form_and_refetches() {
        let mut store = MockStore::new();
        let mut seq = mockall::Sequence::new();
        store
            .expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|fields| fields.title == "Bumi Manusia" && fields.pages == Some(535))
            .returning(|fields| {
                let mut created = book(
                    "b-3",
                    &fields.title,
                    &fields.author,
                    fields.genre,
                    fields.reading_status,
                );
                created.pages = fields.pages;
                Ok(created)
            });
        store
            .expect_list()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                let mut books = sample_list();
                books.push(book(
                    "b-3",
                    "Bumi Manusia",
                    "Pramoedya Ananta Toer",
                    Genre::Fiksi,
                    ReadingStatus::BelumDibaca,
                ));
                Ok(books)
            });

        let mut controller = controller_with(store);
        controller.open_create();

        let draft = controller.draft_mut().unwrap();
        draft.title = "Bumi Manusia".to_string();
        draft.author = "Pramoedya Ananta Toer".to_string();
        draft.pages = "535".to_string();

        controller.submit().await.unwrap();

        assert!(!controller.form().is_open());
        assert!(!controller.is_busy());
        assert_eq!(controller.books().len(), 3);
    }

    #[tokio::test]
    async fn test_submit_update_uses_edit_target() {
        let mut store = MockStore::new();
        let mut seq = mockall::Sequence::new();
        store
            .expect_list()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(sample_list()));
        store
            .expect_update()
            .times(1)
            .in_sequence(&mut seq)
            .with(eq(BookId::from("b-2")), always())
            .returning(|id, fields| {
                let mut updated = book(
                    id.as_str(),
                    &fields.title,
                    &fields.author,
                    fields.genre,
                    fields.reading_status,
                );
                updated.rating = fields.rating;
                Ok(updated)
            });
        store
            .expect_list()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(sample_list()));

        let mut controller = controller_with(store);
        controller.refresh().await.unwrap();

        controller.open_edit(&BookId::from("b-2")).unwrap();
        let draft = controller.draft_mut().unwrap();
        assert_eq!(draft.title, "Clean Code");
        draft.reading_status = ReadingStatus::Selesai;
        draft.rating = "5".to_string();

        controller.submit().await.unwrap();
        assert!(!controller.form().is_open());
    }

    #[tokio::test]
    async fn test_submit_validation_failure_keeps_form_open() {
        let store = MockStore::new(); // no store calls expected

        let mut controller = controller_with(store);
        controller.open_create();
        // title and author left empty

        let result = controller.submit().await;
        assert!(matches!(result, Err(CatalogError::Validation { .. })));
        assert!(controller.form().is_open());
        assert_eq!(controller.notifications().len(), 1);
        assert_eq!(
            controller.notifications()[0].severity,
            EventSeverity::Warning
        );
    }

    #[tokio::test]
    async fn test_submit_store_failure_keeps_form_open() {
        let mut store = MockStore::new();
        store
            .expect_create()
            .times(1)
            .returning(|_| Err(StoreError::Unavailable("boom".to_string())));

        let mut controller = controller_with(store);
        controller.open_create();
        let draft = controller.draft_mut().unwrap();
        draft.title = "Bumi Manusia".to_string();
        draft.author = "Pramoedya Ananta Toer".to_string();

        let result = controller.submit().await;
        assert!(matches!(result, Err(CatalogError::Store(_))));
        assert!(controller.form().is_open());
        assert!(!controller.is_busy());
        assert_eq!(controller.notifications().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_rejected_while_busy() {
        let store = MockStore::new();

        let mut controller = controller_with(store);
        controller.open_create();
        controller.submit_in_flight.store(true, Ordering::SeqCst);

        let result = controller.submit().await;
        assert!(matches!(result, Err(CatalogError::Busy)));
    }

    #[tokio::test]
    async fn test_cancel_ignored_while_busy() {
        let store = MockStore::new();

        let mut controller = controller_with(store);
        controller.open_create();
        controller.submit_in_flight.store(true, Ordering::SeqCst);

        controller.cancel_form();
        assert!(controller.form().is_open());

        controller.submit_in_flight.store(false, Ordering::SeqCst);
        controller.cancel_form();
        assert!(!controller.form().is_open());
    }

    /// Store whose first create never resolves; later calls succeed.
    struct StalledStore {
        create_calls: std::sync::atomic::AtomicUsize,
    }

    impl StalledStore {
        fn new() -> Self {
            Self {
                create_calls: std::sync::atomic::AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl BookStore for StalledStore {
        async fn list(&self, _sort: SortSpec) -> store::Result<Vec<Book>> {
            Ok(sample_list())
        }

        async fn create(&self, fields: &BookFields) -> store::Result<Book> {
            if self.create_calls.fetch_add(1, Ordering::SeqCst) == 0 {
                std::future::pending::<()>().await;
            }
            Ok(book(
                "b-9",
                &fields.title,
                &fields.author,
                fields.genre,
                fields.reading_status,
            ))
        }

        async fn update(&self, id: &BookId, _fields: &BookFields) -> store::Result<Book> {
            Err(StoreError::NotFound {
                id: id.to_string(),
            })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_submit_releases_busy_guard() {
        let mut controller =
            CollectionController::new(Arc::new(StalledStore::new()), EventBus::new(16));

        controller.open_create();
        let draft = controller.draft_mut().unwrap();
        draft.title = "Bumi Manusia".to_string();
        draft.author = "Pramoedya Ananta Toer".to_string();

        // Host-side timeout drops the submit future mid-await
        let hung = tokio::time::timeout(
            std::time::Duration::from_millis(10),
            controller.submit(),
        )
        .await;
        assert!(hung.is_err());

        // The guard is released and the draft survives
        assert!(!controller.is_busy());
        assert!(controller.form().is_open());

        controller.submit().await.unwrap();
        assert!(!controller.form().is_open());
    }

    #[tokio::test]
    async fn test_submit_with_closed_form() {
        let store = MockStore::new();
        let mut controller = controller_with(store);

        let result = controller.submit().await;
        assert!(matches!(result, Err(CatalogError::FormClosed)));
    }

    #[tokio::test]
    async fn test_dismiss_notification() {
        let mut store = MockStore::new();
        store
            .expect_list()
            .returning(|_| Err(StoreError::Unavailable("down".to_string())));

        let mut controller = controller_with(store);
        controller.refresh().await.ok();

        let id = controller.notifications()[0].id;
        assert!(controller.dismiss(id));
        assert!(controller.notifications().is_empty());
        assert!(!controller.dismiss(id));
    }

    #[tokio::test]
    async fn test_stats_identity() {
        let mut store = MockStore::new();
        store.expect_list().returning(|_| Ok(sample_list()));

        let mut controller = controller_with(store);
        controller.refresh().await.unwrap();

        let stats = controller.stats();
        assert_eq!(stats.total, controller.books().len());
        assert!(stats.selesai + stats.sedang_dibaca <= stats.total);
    }

    #[tokio::test]
    async fn test_events_emitted_on_refresh() {
        let mut store = MockStore::new();
        store.expect_list().returning(|_| Ok(sample_list()));

        let events = EventBus::new(16);
        let mut rx = events.subscribe();
        let mut controller = CollectionController::new(Arc::new(store), events);

        controller.refresh().await.unwrap();

        assert_eq!(
            rx.recv().await.unwrap(),
            CoreEvent::Catalog(CatalogEvent::RefreshStarted)
        );
        assert_eq!(
            rx.recv().await.unwrap(),
            CoreEvent::Catalog(CatalogEvent::RefreshCompleted { book_count: 2 })
        );
    }
}
