//! Per-category vector collections backed by LanceDB.
//!
//! One table per [`placerec_core::types::Category`], each row holding one
//! (entity, keyword, vector) triple. [`PlaceVectorStore`] answers cosine
//! nearest-neighbor queries; [`KeywordIndexer`] populates the tables.

pub mod store;
pub mod writer;

pub use store::PlaceVectorStore;
pub use writer::{KeywordIndexer, KeywordRecord};
