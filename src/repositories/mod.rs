pub mod source_document_repository;
pub mod test_repository;
pub mod test_result_repository;

pub use source_document_repository::{MongoSourceDocumentRepository, SourceDocumentRepository};
pub use test_repository::{MongoTestRepository, TestRepository};
pub use test_result_repository::{MongoTestResultRepository, TestResultRepository};
