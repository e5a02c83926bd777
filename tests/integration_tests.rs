mod common;

use std::sync::Arc;

use actix_web::{http::StatusCode, test, web, App};
use serde_json::{json, Value};

use common::{ScriptedGenerator, LETTERED_REPLY};
use forgeprep_server::{
    auth::UserRole, errors::AppError, graphql::create_schema, handlers,
    middleware::RequestIdMiddleware,
};

macro_rules! init_app {
    ($state:expr) => {{
        let state = $state;
        test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .app_data(web::Data::from(state.jwt_service.clone()))
                .app_data(web::Data::new(create_schema(state.clone())))
                .wrap(RequestIdMiddleware)
                .configure(handlers::configure),
        )
        .await
    }};
}

fn bearer(state: &forgeprep_server::app_state::AppState, user_id: &str, role: UserRole) -> String {
    let token = state
        .jwt_service
        .create_token(user_id, user_id, role)
        .expect("token should be created");
    format!("Bearer {}", token)
}

#[actix_web::test]
async fn test_lettered_generation_over_http() {
    let generator = Arc::new(ScriptedGenerator::new(vec![Ok(LETTERED_REPLY.to_string())]));
    let state = common::app_state(generator);
    let auth = bearer(&state, "student-1", UserRole::User);
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/documents")
        .insert_header(("Authorization", auth.clone()))
        .set_json(json!({ "filename": "biology.pdf", "extracted_text": "Cells and plants." }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert!(resp.headers().contains_key("x-request-id"));
    let document: Value = test::read_body_json(resp).await;

    let req = test::TestRequest::post()
        .uri("/api/tests/generate")
        .insert_header(("Authorization", auth.clone()))
        .set_json(json!({ "document_id": document["id"], "num_questions": 2 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let generated: Value = test::read_body_json(resp).await;

    assert_eq!(generated["questions"][0]["question"], "Which organelle produces ATP?");
    assert_eq!(generated["questions"][0]["answer"], "Mitochondria");
    assert_eq!(generated["questions"][1]["difficulty"], "medium");

    let req = test::TestRequest::get()
        .uri("/api/tests?limit=5")
        .insert_header(("Authorization", auth))
        .to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["total"], 1);
    assert_eq!(page["limit"], 5);
    assert_eq!(page["items"][0]["test_id"], generated["test_id"]);
}

#[actix_web::test]
async fn test_graphql_generate_and_submit() {
    let generator = Arc::new(ScriptedGenerator::new(vec![Ok(LETTERED_REPLY.to_string())]));
    let state = common::app_state(generator);
    let auth = bearer(&state, "student-1", UserRole::User);
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/graphql")
        .insert_header(("Authorization", auth.clone()))
        .set_json(json!({
            "query": "mutation { createDocument(input: { filename: \"b.pdf\", extractedText: \"Cells.\" }) { id hasText } }"
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["createDocument"]["hasText"], true);
    let document_id = body["data"]["createDocument"]["id"].clone();

    let req = test::TestRequest::post()
        .uri("/graphql")
        .insert_header(("Authorization", auth.clone()))
        .set_json(json!({
            "query": "mutation($id: String!) { generateTest(input: { documentId: $id, numQuestions: 2 }) { testId questions { answer } } }",
            "variables": { "id": document_id }
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let test_id = body["data"]["generateTest"]["testId"].clone();
    assert_eq!(body["data"]["generateTest"]["questions"][1]["answer"], "Carbon dioxide");

    let req = test::TestRequest::post()
        .uri("/graphql")
        .insert_header(("Authorization", auth))
        .set_json(json!({
            "query": "mutation($id: String!) { submitTest(input: { testId: $id, answers: [{ index: 0, answer: \"MITOCHONDRIA\" }, { index: -1, answer: \"x\" }] }) { score correct incorrect total } }",
            "variables": { "id": test_id }
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let result = &body["data"]["submitTest"];
    assert_eq!(result["correct"], 1);
    assert_eq!(result["incorrect"], 1);
    assert_eq!(result["score"], 50.0);
}

#[actix_web::test]
async fn test_provider_failure_maps_to_bad_gateway() {
    let generator = Arc::new(ScriptedGenerator::new(vec![Err(AppError::GenerationProvider(
        "upstream 500".to_string(),
    ))]));
    let state = common::app_state(generator);
    let auth = bearer(&state, "student-1", UserRole::User);
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/documents")
        .insert_header(("Authorization", auth.clone()))
        .set_json(json!({ "filename": "notes.pdf", "extracted_text": "Some text." }))
        .to_request();
    let document: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/tests/generate")
        .insert_header(("Authorization", auth))
        .set_json(json!({ "document_id": document["id"] }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "GENERATION_PROVIDER_ERROR");
}
