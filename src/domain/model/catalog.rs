use serde::{Deserialize, Serialize};

use super::book::Book;

/// 集計結果。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    pub total: usize,
    pub read: usize,
    /// read / total * 100（total = 0 なら 0.0）
    pub percentage_read: f64,
}

/// Catalog — 挿入順を保つBookの列。永続化形式はJSON配列そのもの。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// 末尾に追加する。重複チェックはしない。
    pub fn push(&mut self, book: Book) {
        self.books.push(book);
    }

    /// titleが一致（case-insensitive）する全レコードを除去し、除去数を返す。
    pub fn retain_not_titled(&mut self, title: &str) -> usize {
        let before = self.books.len();
        self.books.retain(|book| !book.has_title(title));
        before - self.books.len()
    }

    /// title/authorの部分一致検索（case-insensitive）。Catalog順で返す。
    pub fn search(&self, keyword: &str) -> Vec<&Book> {
        let needle = keyword.to_lowercase();
        self.books
            .iter()
            .filter(|book| book.mentions(&needle))
            .collect()
    }

    pub fn statistics(&self) -> Statistics {
        let total = self.books.len();
        let read = self.books.iter().filter(|book| book.is_read()).count();
        let percentage_read = if total == 0 {
            0.0
        } else {
            read as f64 / total as f64 * 100.0
        };
        Statistics {
            total,
            read,
            percentage_read,
        }
    }
}

impl From<Vec<Book>> for Catalog {
    fn from(books: Vec<Book>) -> Self {
        Self { books }
    }
}
