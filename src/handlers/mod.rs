pub mod document_handler;
pub mod health_handler;
pub mod result_handler;
pub mod test_handler;

use actix_web::web;
use actix_web_httpauth::middleware::HttpAuthentication;

use crate::{auth::bearer_validator, graphql};

pub use document_handler::{create_document, get_document, list_documents};
pub use health_handler::{health_check, health_check_live, health_check_ready};
pub use result_handler::{list_results, list_user_results, result_summary};
pub use test_handler::{generate_test, get_test, list_tests, submit_test};

/// Registers every route. Expects `web::Data` for `AppState`, `JwtService`
/// and the GraphQL `Schema` on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(health_check_live)
        .service(health_check_ready)
        .route("/graphiql", web::get().to(graphql::graphiql))
        .service(
            web::resource("/graphql")
                .wrap(HttpAuthentication::bearer(bearer_validator))
                .route(web::post().to(graphql::graphql_handler)),
        )
        .service(
            web::scope("/api")
                .wrap(HttpAuthentication::bearer(bearer_validator))
                .service(create_document)
                .service(list_documents)
                .service(get_document)
                .service(generate_test)
                .service(list_tests)
                .service(get_test)
                .service(submit_test)
                .service(result_summary)
                .service(list_results)
                .service(list_user_results),
        );
}
