use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use furqan_core::{Corpus, SearchEngine, Verse, VerseKey};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn verse(chapter: u32, number: u32, english: &str) -> Verse {
    Verse {
        key: VerseKey::new(chapter, number).unwrap(),
        arabic: format!("arabic {chapter}:{number}"),
        english: english.to_string(),
        urdu: format!("urdu {chapter}:{number}"),
    }
}

fn test_app() -> Router {
    let corpus = Corpus::from_verses(vec![
        verse(1, 1, "In the name of Allah, the Entirely Merciful, the Especially Merciful"),
        verse(2, 255, "Allah - there is no deity except Him, the Ever-Living, the Sustainer of existence"),
        verse(24, 35, "Allah is the Light of the heavens and the earth"),
    ])
    .unwrap();
    let engine = Arc::new(SearchEngine::new(corpus));
    furqan_server::build_app(engine, "./build").unwrap()
}

async fn body_json(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn search_returns_ranked_results() {
    let req = Request::post("/api/search")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "query": "light of the heavens", "numResults": 2 }).to_string()))
        .unwrap();
    let resp = test_app().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let results = body_json(resp.into_body()).await;
    let arr = results.as_array().unwrap();
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["verse_key"], "24:35");
    assert!(arr[0]["eng_translation"].as_str().unwrap().contains("Light"));
    assert!(arr[0].get("arabic").is_some());
    assert!(arr[0].get("urdu_translation").is_some());
}

#[tokio::test]
async fn search_without_query_is_rejected() {
    let req = Request::post("/api/search")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "numResults": 2 }).to_string()))
        .unwrap();
    let resp = test_app().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = body_json(resp.into_body()).await;
    assert_eq!(body["error"], "No query provided");
}

#[tokio::test]
async fn search_with_negative_count_returns_nothing() {
    let req = Request::post("/api/search")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "query": "Allah", "numResults": -1 }).to_string()))
        .unwrap();
    let resp = test_app().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp.into_body()).await.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn verse_lookup_by_canonical_reference() {
    let req = Request::get("/api/verse/2:255").body(Body::empty()).unwrap();
    let resp = test_app().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp.into_body()).await;
    assert_eq!(body["verse_key"], "2:255");
    assert_eq!(body["arabic"], "arabic 2:255");
}

#[tokio::test]
async fn verse_lookup_tolerates_freeform_references() {
    let req = Request::get("/api/verse/Surah%202%20verse%20255")
        .body(Body::empty())
        .unwrap();
    let resp = test_app().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp.into_body()).await["verse_key"], "2:255");
}

#[tokio::test]
async fn unknown_verse_is_404() {
    let req = Request::get("/api/verse/99:99").body(Body::empty()).unwrap();
    let resp = test_app().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp.into_body()).await["error"], "Verse not found");
}

#[tokio::test]
async fn health_endpoint_responds() {
    let req = Request::get("/health").body(Body::empty()).unwrap();
    let resp = test_app().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
