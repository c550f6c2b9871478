use crate::domain::model::book::Book;
use crate::domain::model::catalog::{Catalog, Statistics};
use crate::domain::repository::CatalogRepository;

use super::error::AppError;

/// Catalogに対するユースケース。
/// 起動時に1回loadし、以降はメモリ上で mutate → persist する。
pub struct BookStore<R: CatalogRepository> {
    repo: R,
    catalog: Catalog,
}

impl<R: CatalogRepository> BookStore<R> {
    /// 永続化済みCatalogを読み込んでStoreを作る。
    pub fn open(repo: R) -> Self {
        let catalog = Self::load(&repo);
        Self { repo, catalog }
    }

    /// ファイルが無い・壊れている場合は空Catalogとして扱う（呼び出し側にエラーは返さない）。
    pub fn load(repo: &R) -> Catalog {
        match repo.load() {
            Ok(Some(catalog)) => {
                tracing::debug!(books = catalog.len(), "catalog loaded");
                catalog
            }
            Ok(None) => {
                tracing::debug!("no catalog persisted yet, starting empty");
                Catalog::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "catalog unreadable, starting empty");
                Catalog::new()
            }
        }
    }

    /// レコードを末尾に追加して永続化する。検証・重複チェックはしない。
    pub fn add(
        &mut self,
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        genre: impl Into<String>,
        read_status: bool,
    ) -> Result<(), AppError> {
        let mut next = self.catalog.clone();
        next.push(Book::new(title, author, year, genre, read_status));
        self.commit(next)
    }

    /// titleが一致（case-insensitive）する全レコードを削除する。
    /// 一致が無くても永続化する。戻り値は削除数。
    pub fn remove(&mut self, title: &str) -> Result<usize, AppError> {
        let mut next = self.catalog.clone();
        let removed = next.retain_not_titled(title);
        self.commit(next)?;
        Ok(removed)
    }

    pub fn search(&self, keyword: &str) -> Vec<&Book> {
        self.catalog.search(keyword)
    }

    pub fn statistics(&self) -> Statistics {
        self.catalog.statistics()
    }

    pub fn books(&self) -> &[Book] {
        self.catalog.books()
    }

    /// 現在のCatalog（永続化内容と同一）
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Catalog全体でファイルを上書きする。
    pub fn persist(&self) -> Result<(), AppError> {
        self.save(&self.catalog)
    }

    // --- private ---

    /// 保存に成功した場合のみメモリ上のCatalogを差し替える。
    fn commit(&mut self, next: Catalog) -> Result<(), AppError> {
        self.save(&next)?;
        self.catalog = next;
        Ok(())
    }

    fn save(&self, catalog: &Catalog) -> Result<(), AppError> {
        self.repo
            .save(catalog)
            .map_err(|e| AppError::Storage(Box::new(e)))?;
        tracing::info!(books = catalog.len(), "catalog saved");
        Ok(())
    }
}
