//! End-to-end controller flow against an in-memory store.
//!
//! Exercises the full page lifecycle the host UI drives: initial load,
//! filtering, statistics, and the create/edit form round trip, with a
//! store that assigns ids and timestamps the way the remote one does.

use async_trait::async_trait;
use core_catalog::store::{self, SortDirection, SortKey};
use core_catalog::{
    Book, BookCard, BookFields, BookId, BookStore, CollectionController, CollectionStats,
    FormState, Genre, ReadingStatus, SortSpec, StoreError,
};
use core_runtime::events::EventBus;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

/// Store backed by a vector, with store-assigned ids and timestamps.
struct InMemoryBookStore {
    books: Mutex<Vec<Book>>,
    next_id: AtomicI64,
    clock: AtomicI64,
}

impl InMemoryBookStore {
    fn new() -> Self {
        Self {
            books: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            clock: AtomicI64::new(1_700_000_000),
        }
    }

    fn tick(&self) -> i64 {
        self.clock.fetch_add(60, Ordering::SeqCst)
    }

    async fn seed(&self, fields: BookFields) -> Book {
        self.create(&fields).await.expect("seed failed")
    }
}

#[async_trait]
impl BookStore for InMemoryBookStore {
    async fn list(&self, sort: SortSpec) -> store::Result<Vec<Book>> {
        let mut books = self.books.lock().unwrap().clone();
        match sort.key {
            SortKey::UpdatedDate => books.sort_by_key(|b| b.updated_at),
            SortKey::CreatedDate => books.sort_by_key(|b| b.created_at),
            SortKey::Title => books.sort_by(|a, b| a.title.cmp(&b.title)),
        }
        if sort.direction == SortDirection::Descending {
            books.reverse();
        }
        Ok(books)
    }

    async fn create(&self, fields: &BookFields) -> store::Result<Book> {
        let now = self.tick();
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let book = Book {
            id: BookId::new(format!("b-{}", id)),
            title: fields.title.clone(),
            author: fields.author.clone(),
            genre: fields.genre,
            publication_year: fields.publication_year,
            description: fields.description.clone(),
            reading_status: fields.reading_status,
            rating: fields.rating,
            pages: fields.pages,
            isbn: fields.isbn.clone(),
            created_at: now,
            updated_at: now,
        };
        self.books.lock().unwrap().push(book.clone());
        Ok(book)
    }

    async fn update(&self, id: &BookId, fields: &BookFields) -> store::Result<Book> {
        let mut books = self.books.lock().unwrap();
        let book = books
            .iter_mut()
            .find(|b| &b.id == id)
            .ok_or_else(|| StoreError::NotFound {
                id: id.to_string(),
            })?;

        book.title = fields.title.clone();
        book.author = fields.author.clone();
        book.genre = fields.genre;
        book.publication_year = fields.publication_year;
        book.description = fields.description.clone();
        book.reading_status = fields.reading_status;
        book.rating = fields.rating;
        book.pages = fields.pages;
        book.isbn = fields.isbn.clone();
        book.updated_at = self.clock.fetch_add(60, Ordering::SeqCst);
        Ok(book.clone())
    }
}

fn fields(
    title: &str,
    author: &str,
    genre: Genre,
    status: ReadingStatus,
) -> BookFields {
    BookFields {
        title: title.to_string(),
        author: author.to_string(),
        genre,
        publication_year: None,
        description: None,
        reading_status: status,
        rating: None,
        pages: None,
        isbn: None,
    }
}

async fn seeded_store() -> Arc<InMemoryBookStore> {
    let store = Arc::new(InMemoryBookStore::new());
    store
        .seed(fields(
            "Laskar Pelangi",
            "Andrea Hirata",
            Genre::Fiksi,
            ReadingStatus::Selesai,
        ))
        .await;
    store
        .seed(fields(
            "Clean Code",
            "Robert Martin",
            Genre::Teknologi,
            ReadingStatus::SedangDibaca,
        ))
        .await;
    store
}

#[tokio::test]
async fn initial_load_orders_by_recency() {
    let store = seeded_store().await;
    let mut controller = CollectionController::new(store, EventBus::default());

    controller.refresh().await.unwrap();

    let books = controller.books();
    assert_eq!(books.len(), 2);
    // Most recently updated first
    assert_eq!(books[0].title, "Clean Code");
    assert_eq!(books[1].title, "Laskar Pelangi");
}

#[tokio::test]
async fn filters_compose_conjunctively() {
    let store = seeded_store().await;
    let mut controller = CollectionController::new(store, EventBus::default());
    controller.refresh().await.unwrap();

    controller.set_search("andrea");
    let hits = controller.filtered_books();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Laskar Pelangi");

    controller.clear_filters();
    controller.toggle_genre(Genre::Teknologi);
    let hits = controller.filtered_books();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Clean Code");

    // Both books match "a" alone; adding the genre narrows to one
    controller.clear_filters();
    controller.set_search("a");
    assert_eq!(controller.filtered_books().len(), 2);
    controller.toggle_genre(Genre::Fiksi);
    let hits = controller.filtered_books();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Laskar Pelangi");

    controller.clear_filters();
    controller.set_status_filter(Some(ReadingStatus::SedangDibaca));
    let hits = controller.filtered_books();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Clean Code");
}

#[tokio::test]
async fn stats_reflect_unfiltered_snapshot() {
    let store = seeded_store().await;
    let mut controller = CollectionController::new(store, EventBus::default());
    controller.refresh().await.unwrap();

    controller.set_search("no such book");
    assert!(controller.filtered_books().is_empty());

    // Filters never change the summary counts
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
async fn create_round_trip() {
    let store = seeded_store().await;
    let mut controller = CollectionController::new(store, EventBus::default());
    controller.refresh().await.unwrap();

    controller.open_create();
    let draft = controller.draft_mut().unwrap();
    draft.title = "  Bumi Manusia  ".to_string();
    draft.author = "Pramoedya Ananta Toer".to_string();
    draft.genre = Genre::Sejarah;
    draft.publication_year = "1980".to_string();
    draft.pages = "535".to_string();
    draft.rating = "5".to_string();
    draft.reading_status = ReadingStatus::Selesai;

    controller.submit().await.unwrap();

    assert_eq!(*controller.form(), FormState::Closed);
    let books = controller.books();
    assert_eq!(books.len(), 3);

    // Fresh snapshot puts the new book first and carries normalized fields
    let newest = &books[0];
    assert_eq!(newest.title, "Bumi Manusia");
    assert_eq!(newest.publication_year, Some(1980));
    assert_eq!(newest.pages, Some(535));
    assert_eq!(newest.rating, Some(5));
    assert!(newest.created_at > 0);

    assert_eq!(controller.stats().selesai, 2);
}

#[tokio::test]
async fn edit_round_trip() {
    let store = seeded_store().await;
    let mut controller = CollectionController::new(store, EventBus::default());
    controller.refresh().await.unwrap();

    let id = controller
        .books()
        .iter()
        .find(|b| b.title == "Clean Code")
        .unwrap()
        .id
        .clone();

    controller.open_edit(&id).unwrap();
    let draft = controller.draft_mut().unwrap();
    assert_eq!(draft.author, "Robert Martin");
    draft.reading_status = ReadingStatus::Selesai;
    draft.rating = "4".to_string();

    controller.submit().await.unwrap();

    let book = controller
        .books()
        .iter()
        .find(|b| b.id == id)
        .unwrap();
    assert_eq!(book.reading_status, ReadingStatus::Selesai);
    assert_eq!(book.rating, Some(4));
    assert_eq!(controller.stats().sedang_dibaca, 0);
}

#[tokio::test]
async fn card_projection_from_snapshot() {
    let store = seeded_store().await;
    let mut controller = CollectionController::new(store, EventBus::default());
    controller.refresh().await.unwrap();

    let book = &controller.books()[1];
    let card = BookCard::from_book(book);

    assert_eq!(card.title, "Laskar Pelangi");
    assert_eq!(card.genre_label, Genre::Fiksi.label());
    assert_eq!(card.status_label, ReadingStatus::Selesai.label());
}
