use serde::{Deserialize, Serialize};

/// 蔵書1冊分のレコード。titleが事実上のキー（一意性は保証しない）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    title: String,
    author: String,
    year: i32,
    genre: String,
    read_status: bool,
}

impl Book {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        genre: impl Into<String>,
        read_status: bool,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
            genre: genre.into(),
            read_status,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn is_read(&self) -> bool {
        self.read_status
    }

    /// titleの大文字小文字を無視した一致
    pub fn has_title(&self, title: &str) -> bool {
        self.title.to_lowercase() == title.to_lowercase()
    }

    /// title または author に keyword（小文字化済み）を含むか
    pub(crate) fn mentions(&self, lowered_keyword: &str) -> bool {
        self.title.to_lowercase().contains(lowered_keyword)
            || self.author.to_lowercase().contains(lowered_keyword)
    }
}
