pub mod book;
pub mod catalog;
