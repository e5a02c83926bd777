pub mod question;
pub mod source_document;
pub mod test_result;
pub use generated_test::Test;
pub use question::{Difficulty, Question};
pub use source_document::SourceDocument;
pub use test_result::{QuestionOutcome, TestResult};
