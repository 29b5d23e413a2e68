use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USERS_PATH: &str = "/api/users";

fn fetcher_for(server: &MockServer) -> RecordFetcher {
    let config = FetcherConfig {
        base_url: Url::parse(&format!("{}{}", server.uri(), USERS_PATH)).unwrap(),
        timeout: Duration::from_millis(500),
        ..FetcherConfig::default()
    };
    RecordFetcher::new(&config).unwrap()
}

async fn serve(body: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(USERS_PATH))
        .respond_with(body)
        .mount(&server)
        .await;
    server
}

fn fallback_ids(records: &[Record]) -> Vec<u64> {
    records.iter().map(|r| r.id).collect()
}

#[test]
fn test_fallback_records() {
    let records = fallback_records();
    assert_eq!(fallback_ids(&records), vec![1, 2, 3]);
    assert_eq!(records[0].display_name(), "George Bluth");
    assert_eq!(records[1].email, "janet.weaver@reqres.in");
    assert_eq!(records[2].avatar, "https://reqres.in/img/faces/3-image.jpg");
}

#[test]
fn test_normalize_name() {
    assert_eq!(normalize_name("george"), "George");
    assert_eq!(normalize_name("BLUTH"), "Bluth");
    assert_eq!(normalize_name("mCdonald"), "Mcdonald");
    assert_eq!(normalize_name("émile"), "Émile");
    assert_eq!(normalize_name("x"), "X");
    assert_eq!(normalize_name(""), "");
}

#[test]
fn test_avatar_uri_allow_list() {
    let face = "https://reqres.in/img/faces/7-image.jpg";
    assert_eq!(avatar_uri(face), face);

    let placeholder = "https://via.placeholder.com/64";
    assert_eq!(avatar_uri(placeholder), placeholder);

    assert_eq!(avatar_uri(""), PLACEHOLDER_AVATAR);
    assert_eq!(avatar_uri("u"), PLACEHOLDER_AVATAR);
    assert_eq!(avatar_uri("http://reqres.in/img/faces/7-image.jpg"), PLACEHOLDER_AVATAR);
    assert_eq!(avatar_uri("https://reqres.in/api/users"), PLACEHOLDER_AVATAR);
    assert_eq!(avatar_uri("https://example.com/img/faces/1.jpg"), PLACEHOLDER_AVATAR);
}

#[test]
fn test_parse_page_keeps_order() {
    let body = json!({
        "page": 1,
        "per_page": 3,
        "total": 12,
        "total_pages": 4,
        "data": [
            {"id": 9, "email": "a@x.com", "first_name": "tobias", "last_name": "funke", "avatar": ""},
            {"id": 4, "email": "b@x.com", "first_name": "eve", "last_name": "holt", "avatar": ""}
        ]
    });

    let records = parse_page(&body.to_string()).unwrap();
    assert_eq!(fallback_ids(&records), vec![9, 4]);
    assert_eq!(records[0].display_name(), "Tobias Funke");
}

#[test]
fn test_parse_page_missing_names() {
    let body = json!({
        "data": [{"id": 5, "email": "c@x.com", "first_name": null, "avatar": "https://reqres.in/img/faces/5-image.jpg"}]
    });

    let records = parse_page(&body.to_string()).unwrap();
    assert_eq!(records[0].first_name, "");
    assert_eq!(records[0].last_name, "");
    assert_eq!(records[0].display_name(), "");
}

#[test]
fn test_parse_page_rejects_bad_shapes() {
    assert!(matches!(parse_page("not json"), Err(FetchError::Malformed(_))));
    assert!(matches!(parse_page("{}"), Err(FetchError::Malformed(_))));
    assert!(matches!(parse_page(r#"{"data": null}"#), Err(FetchError::Malformed(_))));
    assert!(matches!(parse_page(r#"{"data": {"id": 1}}"#), Err(FetchError::Malformed(_))));
    assert!(matches!(parse_page(r#"{"data": [{"email": "x"}]}"#), Err(FetchError::Malformed(_))));
    assert!(matches!(parse_page(r#"{"data": []}"#), Err(FetchError::Empty)));
}

#[test]
fn test_parse_page_rejects_duplicate_ids() {
    let body = json!({
        "data": [
            {"id": 1, "email": "a@x.com"},
            {"id": 1, "email": "b@x.com"}
        ]
    });

    assert!(matches!(parse_page(&body.to_string()), Err(FetchError::Malformed(_))));
}

#[tokio::test]
async fn test_fetch_normalizes_names() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(USERS_PATH))
        .and(query_param("per_page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": 7, "first_name": "george", "last_name": "BLUTH", "email": "g@x.com", "avatar": "u"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let records = fetcher_for(&server).fetch_records().await;

    assert_eq!(records, vec![Record {
        id: 7,
        email: "g@x.com".to_string(),
        first_name: "George".to_string(),
        last_name: "Bluth".to_string(),
        avatar: "u".to_string(),
    }]);
}

#[tokio::test]
async fn test_fetch_server_error_uses_fallback() {
    let server = serve(ResponseTemplate::new(500)).await;
    let records = fetcher_for(&server).fetch_records().await;
    assert_eq!(records, fallback_records());
}

#[tokio::test]
async fn test_fetch_empty_data_uses_fallback() {
    let server = serve(ResponseTemplate::new(200).set_body_json(json!({"data": []}))).await;
    let records = fetcher_for(&server).fetch_records().await;
    assert_eq!(records, fallback_records());
}

#[tokio::test]
async fn test_fetch_malformed_body_uses_fallback() {
    let server = serve(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>")).await;
    let records = fetcher_for(&server).fetch_records().await;
    assert_eq!(records, fallback_records());

    let server = serve(ResponseTemplate::new(200).set_body_json(json!({"data": "nope"}))).await;
    let records = fetcher_for(&server).fetch_records().await;
    assert_eq!(records, fallback_records());
}

#[tokio::test]
async fn test_fetch_timeout_uses_fallback() {
    let server = serve(
        ResponseTemplate::new(200)
            .set_body_json(json!({"data": [{"id": 7, "email": "g@x.com"}]}))
            .set_delay(Duration::from_secs(2)),
    )
    .await;

    let records = fetcher_for(&server).fetch_records().await;
    assert_eq!(records, fallback_records());
}

#[tokio::test]
async fn test_fetch_transport_failure_is_deterministic() {
    let config = FetcherConfig {
        base_url: Url::parse("http://127.0.0.1:1/api/users").unwrap(),
        timeout: Duration::from_millis(500),
        ..FetcherConfig::default()
    };
    let fetcher = RecordFetcher::new(&config).unwrap();

    let first = fetcher.fetch_records().await;
    let second = fetcher.fetch_records().await;

    assert_eq!(fallback_ids(&first), vec![1, 2, 3]);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_record_source_never_fails() {
    let server = serve(ResponseTemplate::new(503)).await;
    let fetcher = fetcher_for(&server);

    let loaded = fetcher.load().await;
    assert_eq!(loaded, Ok(fallback_records()));
}
