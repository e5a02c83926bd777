pub mod handler;
pub mod helpers;
pub mod schema_impl;

pub use handler::{graphiql, graphql_handler};
pub use schema_impl::{create_schema, Schema};
