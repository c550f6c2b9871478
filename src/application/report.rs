//! Catalogのテキスト表示。MCPツールの応答本文に使う。

use crate::domain::model::book::Book;
use crate::domain::model::catalog::Statistics;

pub const EMPTY_LIBRARY: &str = "No books in the library.";
pub const NO_MATCHES: &str = "No matching books found.";

/// `**Title** by Author (Year) - Genre - Read|Unread`
pub fn render_book(book: &Book) -> String {
    format!(
        "**{}** by {} ({}) - {} - {}",
        book.title(),
        book.author(),
        book.year(),
        book.genre(),
        if book.is_read() { "Read" } else { "Unread" }
    )
}

/// 全件一覧。見出し + 番号付きリスト。
pub fn render_listing(books: &[Book]) -> String {
    if books.is_empty() {
        return EMPTY_LIBRARY.to_string();
    }
    format!(
        "# Library ({})\n\n{}",
        plural(books.len(), "book", "books"),
        numbered(books.iter())
    )
}

pub fn render_search(keyword: &str, results: &[&Book]) -> String {
    if results.is_empty() {
        return NO_MATCHES.to_string();
    }
    format!(
        "# Search: '{}' ({})\n\n{}",
        keyword,
        plural(results.len(), "match", "matches"),
        numbered(results.iter().copied())
    )
}

pub fn render_statistics(stats: &Statistics) -> String {
    format!(
        "Total Books: {}\nBooks Read: {}\nPercentage Read: {:.2}%",
        stats.total, stats.read, stats.percentage_read
    )
}

fn numbered<'a>(books: impl Iterator<Item = &'a Book>) -> String {
    books
        .enumerate()
        .map(|(i, book)| format!("{}. {}", i + 1, render_book(book)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}
