pub mod generation_provider;
pub mod prompt_builder;
pub mod response_parser;
pub mod scorer;
pub mod source_document_service;
pub mod test_generator;
pub mod test_service;
