//! Tests for the backend API client against a mock HTTP server.
//!
//! The client is blocking, so the mock server runs on a background tokio
//! runtime owned by each test while requests are made from the test thread.

use academy_frontend::api::{ApiClient, ApiError};
use academy_frontend::models::{
    CreatePersonPayload, PostPayload, Role, UpdatePersonPayload,
};
use serde_json::json;
use tokio::runtime::Runtime;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// Field order matters: the server must shut down while its runtime is alive.
struct MockBackend {
    server: MockServer,
    runtime: Runtime,
}

impl MockBackend {
    fn start() -> Self {
        let runtime = Runtime::new().expect("tokio runtime");
        let server = runtime.block_on(MockServer::start());
        Self { server, runtime }
    }

    fn mount(&self, mock: Mock) {
        self.runtime.block_on(mock.mount(&self.server));
    }

    fn client(&self) -> ApiClient {
        ApiClient::new(self.server.uri()).expect("client for mock server")
    }
}

fn sample_person_json(id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "user_id": id + 100,
        "name": format!("Person {id}"),
        "email": format!("person{id}@mail.com"),
        "birth": "2000-01-02",
        "username": format!("person{id}"),
        "role": "ALUNO"
    })
}

#[test]
fn signin_returns_token_and_id() {
    let backend = MockBackend::start();
    backend.mount(
        Mock::given(method("POST"))
            .and(path("/user/signin"))
            .and(body_json(json!({"username": "ana", "password": "x"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"token": "t1", "id": 7})),
            ),
    );

    let response = backend.client().signin("ana", "x").expect("signin");
    assert_eq!(response.token, "t1");
    assert_eq!(response.id.as_deref(), Some("7"));
}

#[test]
fn signin_with_bad_credentials_surfaces_the_backend_message() {
    let backend = MockBackend::start();
    backend.mount(
        Mock::given(method("POST"))
            .and(path("/user/signin"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({"message": "Invalid credentials"})),
            ),
    );

    let err = backend.client().signin("ana", "wrong").unwrap_err();
    match err {
        ApiError::AuthFailed(message) => assert_eq!(message, "Invalid credentials"),
        other => panic!("expected AuthFailed, got: {other:?}"),
    }
}

#[test]
fn server_errors_without_a_message_get_a_generic_one() {
    let backend = MockBackend::start();
    backend.mount(
        Mock::given(method("POST"))
            .and(path("/user/signin"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom")),
    );

    let err = backend.client().signin("ana", "x").unwrap_err();
    match err {
        ApiError::Server { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("500"));
        }
        other => panic!("expected Server, got: {other:?}"),
    }
}

#[test]
fn list_posts_sends_the_bearer_token_and_accepts_a_raw_array() {
    let backend = MockBackend::start();
    backend.mount(
        Mock::given(method("GET"))
            .and(path("/posts"))
            .and(header("Authorization", "Bearer t1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "id": "p1",
                    "title": "Intro",
                    "content": "Welcome",
                    "subject": "math",
                    "createdat": "2024-01-01T10:00:00Z",
                    "updatedat": "2024-01-02T10:00:00Z",
                    "author_id": 7,
                    "author": "Ana"
                }
            ]))),
    );

    let posts = backend.client().list_posts("t1").expect("posts");
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "Intro");
    assert_eq!(posts[0].author.as_deref(), Some("Ana"));
}

#[test]
fn list_posts_accepts_the_wrapped_shape() {
    let backend = MockBackend::start();
    backend.mount(
        Mock::given(method("GET"))
            .and(path("/posts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "posts": [
                    {
                        "id": "p1",
                        "title": "Intro",
                        "content": "Welcome",
                        "subject": "math"
                    }
                ]
            }))),
    );

    let posts = backend.client().list_posts("t1").expect("posts");
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].updatedat, "");
}

#[test]
fn expired_token_maps_to_an_auth_error() {
    let backend = MockBackend::start();
    backend.mount(
        Mock::given(method("GET"))
            .and(path("/posts"))
            .respond_with(ResponseTemplate::new(401).set_body_string("")),
    );

    let err = backend.client().list_posts("stale").unwrap_err();
    assert!(err.is_auth_error());
}

#[test]
fn list_persons_is_paginated_and_reads_the_envelope() {
    let backend = MockBackend::start();
    backend.mount(
        Mock::given(method("GET"))
            .and(path("/person/role/ALUNO"))
            .and(query_param("page", "2"))
            .and(query_param("size", "10"))
            .and(header("Authorization", "Bearer t1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [sample_person_json(1), sample_person_json(2)],
                "last": false,
                "totalElements": 42
            }))),
    );

    let page = backend
        .client()
        .list_persons("t1", Role::Aluno, 2, 10)
        .expect("page");
    assert_eq!(page.items.len(), 2);
    assert!(!page.is_last);
    assert_eq!(page.items[0].user_id, 101);
}

#[test]
fn a_short_raw_array_counts_as_the_last_page() {
    let backend = MockBackend::start();
    backend.mount(
        Mock::given(method("GET"))
            .and(path("/person/role/PROFESSOR"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([sample_person_json(1)])),
            ),
    );

    let page = backend
        .client()
        .list_persons("t1", Role::Professor, 0, 10)
        .expect("page");
    assert_eq!(page.items.len(), 1);
    assert!(page.is_last);
}

#[test]
fn update_person_puts_to_the_user_id_without_a_password() {
    let backend = MockBackend::start();
    backend.mount(
        Mock::given(method("PUT"))
            .and(path("/user/101"))
            .and(header("Authorization", "Bearer t1"))
            .and(body_json(json!({
                "username": "ana",
                "role": "ALUNO",
                "name": "Ana",
                "birth": "2000-01-02",
                "email": "ana@mail.com"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({}))),
    );

    let payload = UpdatePersonPayload {
        username: "ana".into(),
        role: Role::Aluno,
        name: "Ana".into(),
        birth: "2000-01-02".into(),
        email: "ana@mail.com".into(),
    };
    backend
        .client()
        .update_person("t1", 101, &payload)
        .expect("update");
}

#[test]
fn create_person_posts_the_password_when_present() {
    let backend = MockBackend::start();
    backend.mount(
        Mock::given(method("POST"))
            .and(path("/user"))
            .and(body_json(json!({
                "name": "Ana",
                "email": "ana@mail.com",
                "birth": "2000-01-02",
                "username": "ana",
                "role": "PROFESSOR",
                "password": "secret"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({}))),
    );

    let payload = CreatePersonPayload {
        name: "Ana".into(),
        email: "ana@mail.com".into(),
        birth: "2000-01-02".into(),
        username: "ana".into(),
        role: Role::Professor,
        password: Some("secret".into()),
    };
    backend.client().register(&payload).expect("register");
}

#[test]
fn save_post_chooses_post_for_create_and_put_for_edit() {
    let backend = MockBackend::start();
    let payload = PostPayload {
        title: "Intro".into(),
        subject: "math".into(),
        content: "Welcome".into(),
        author_id: 7,
    };
    backend.mount(
        Mock::given(method("POST"))
            .and(path("/posts"))
            .and(body_json(json!({
                "title": "Intro",
                "subject": "math",
                "content": "Welcome",
                "author_id": 7
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({}))),
    );
    backend.mount(
        Mock::given(method("PUT"))
            .and(path("/posts/p1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({}))),
    );

    let client = backend.client();
    client.create_post("t1", &payload).expect("create");
    client.update_post("t1", "p1", &payload).expect("update");
}

#[test]
fn delete_endpoints_use_the_mutation_identifier() {
    let backend = MockBackend::start();
    backend.mount(
        Mock::given(method("DELETE"))
            .and(path("/user/101"))
            .and(header("Authorization", "Bearer t1"))
            .respond_with(ResponseTemplate::new(204)),
    );
    backend.mount(
        Mock::given(method("DELETE"))
            .and(path("/posts/p1"))
            .and(header("Authorization", "Bearer t1"))
            .respond_with(ResponseTemplate::new(204)),
    );

    let client = backend.client();
    client.delete_person("t1", 101).expect("delete person");
    client.delete_post("t1", "p1").expect("delete post");
}

#[test]
fn save_failures_surface_the_backend_message() {
    let backend = MockBackend::start();
    backend.mount(
        Mock::given(method("POST"))
            .and(path("/posts"))
            .respond_with(
                ResponseTemplate::new(422)
                    .set_body_json(json!({"message": "subject is required"})),
            ),
    );

    let payload = PostPayload {
        title: "Intro".into(),
        subject: "".into(),
        content: "Welcome".into(),
        author_id: 7,
    };
    let err = backend.client().create_post("t1", &payload).unwrap_err();
    match err {
        ApiError::Server { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "subject is required");
        }
        other => panic!("expected Server, got: {other:?}"),
    }
}

#[test]
fn an_unreachable_server_maps_to_a_connection_failure() {
    let backend = MockBackend::start();
    let dead_uri = backend.server.uri();
    drop(backend);

    let client = ApiClient::new(dead_uri).expect("client");
    let err = client.list_posts("t1").unwrap_err();
    match err {
        ApiError::Unreachable(_) => {}
        other => panic!("expected Unreachable, got: {other:?}"),
    }
}

#[test]
fn garbage_bodies_map_to_a_parse_error() {
    let backend = MockBackend::start();
    backend.mount(
        Mock::given(method("POST"))
            .and(path("/user/signin"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json")),
    );

    let err = backend.client().signin("ana", "x").unwrap_err();
    match err {
        ApiError::Parse(_) => {}
        other => panic!("expected Parse, got: {other:?}"),
    }
}
