//! Shared test harness for integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use library_mcp::application::service::BookStore;
use library_mcp::domain::model::book::Book;
use library_mcp::domain::model::catalog::Catalog;
use library_mcp::domain::repository::CatalogRepository;

// =============================================================================
// InMemoryRepo — テスト用リポジトリ
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum InMemoryError {
    #[error("in-memory store error: save rejected")]
    SaveRejected,
    #[error("in-memory store error: {0}")]
    Json(#[from] serde_json::Error),
}

/// ファイルI/O不要のインメモリリポジトリ。
/// 中身を共有するので、Storeに渡した後もテスト側から観測・操作できる。
#[derive(Clone, Default)]
pub struct InMemoryRepo {
    raw: Rc<RefCell<Option<String>>>,
    fail_saves: Rc<Cell<bool>>,
}

impl InMemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// 任意の文字列を永続化済みデータとして置く（破損データ用）。
    pub fn with_raw(raw: &str) -> Self {
        let repo = Self::new();
        *repo.raw.borrow_mut() = Some(raw.to_string());
        repo
    }

    pub fn with_catalog(catalog: &Catalog) -> Self {
        let repo = Self::new();
        repo.save(catalog).unwrap();
        repo
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }

    /// 永続化済みCatalog（未保存ならNone）
    pub fn persisted(&self) -> Option<Catalog> {
        self.raw
            .borrow()
            .as_deref()
            .map(|json| serde_json::from_str(json).unwrap())
    }
}

impl CatalogRepository for InMemoryRepo {
    type Error = InMemoryError;

    fn load(&self) -> Result<Option<Catalog>, Self::Error> {
        match self.raw.borrow().as_deref() {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn save(&self, catalog: &Catalog) -> Result<(), Self::Error> {
        if self.fail_saves.get() {
            return Err(InMemoryError::SaveRejected);
        }
        let json = serde_json::to_string(catalog)?;
        *self.raw.borrow_mut() = Some(json);
        Ok(())
    }
}

// =============================================================================
// Fixtures
// =============================================================================

/// 標準的なテスト用Catalog:
/// ```text
/// 1. Dune — Frank Herbert (1965, Science Fiction, read)
/// 2. Emma — Jane Austen (1815, Novel, unread)
/// 3. dune — Brian Herbert (2000, Science Fiction, unread)
/// 4. Persuasion — Jane Austen (1817, Novel, read)
/// 5. The Hobbit — J.R.R. Tolkien (1937, Fantasy, unread)
/// ```
pub fn standard_catalog() -> Catalog {
    Catalog::from(vec![
        Book::new("Dune", "Frank Herbert", 1965, "Science Fiction", true),
        Book::new("Emma", "Jane Austen", 1815, "Novel", false),
        Book::new("dune", "Brian Herbert", 2000, "Science Fiction", false),
        Book::new("Persuasion", "Jane Austen", 1817, "Novel", true),
        Book::new("The Hobbit", "J.R.R. Tolkien", 1937, "Fantasy", false),
    ])
}

/// standard_catalogを保存済みのInMemoryRepoでStoreを開く。
pub fn standard_store() -> (BookStore<InMemoryRepo>, InMemoryRepo) {
    let repo = InMemoryRepo::with_catalog(&standard_catalog());
    (BookStore::open(repo.clone()), repo)
}

pub fn titles(books: &[Book]) -> Vec<&str> {
    books.iter().map(|b| b.title()).collect()
}

// =============================================================================
// Assertion helpers
// =============================================================================

/// 結果がErrで、メッセージに指定文字列を含むことをassert。
pub fn assert_error_contains<T: std::fmt::Debug>(
    result: Result<T, impl std::fmt::Display>,
    expected: &str,
) {
    match result {
        Err(e) => {
            let msg = e.to_string();
            assert!(
                msg.contains(expected),
                "Expected error containing '{expected}', got: '{msg}'"
            );
        }
        Ok(v) => panic!("Expected error containing '{expected}', got Ok({v:?})"),
    }
}
