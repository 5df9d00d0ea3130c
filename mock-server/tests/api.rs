use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with, Food, FoodInput, Store};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

fn seeded(names: &[&str]) -> Store {
    let mut store = Store::default();
    for name in names {
        store.insert(FoodInput {
            name: Some(name.to_string()),
            rating: Some("4".to_string()),
            open: Some(true),
            ..FoodInput::default()
        });
    }
    store
}

// --- list ---

#[tokio::test]
async fn list_foods_empty() {
    let resp = app().oneshot(empty_request("GET", "/Food")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let foods: Vec<Food> = body_json(resp).await;
    assert!(foods.is_empty());
}

#[tokio::test]
async fn list_foods_keeps_insertion_order() {
    let app = app_with(seeded(&["Soup", "Salad", "Stew"]));
    let resp = app.oneshot(empty_request("GET", "/Food")).await.unwrap();

    let foods: Vec<Food> = body_json(resp).await;
    let names: Vec<&str> = foods.iter().map(|food| food.name.as_str()).collect();
    assert_eq!(names, vec!["Soup", "Salad", "Stew"]);
}

// --- search ---

#[tokio::test]
async fn name_filter_is_case_insensitive_substring() {
    let app = app_with(seeded(&["Tomato Soup", "Green Salad", "Miso soup"]));
    let resp = app
        .oneshot(empty_request("GET", "/Food?name=SOUP"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let foods: Vec<Food> = body_json(resp).await;
    let names: Vec<&str> = foods.iter().map(|food| food.name.as_str()).collect();
    assert_eq!(names, vec!["Tomato Soup", "Miso soup"]);
}

#[tokio::test]
async fn name_filter_without_matches_is_empty() {
    let app = app_with(seeded(&["Soup"]));
    let resp = app
        .oneshot(empty_request("GET", "/Food?name=pizza"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let foods: Vec<Food> = body_json(resp).await;
    assert!(foods.is_empty());
}

// --- create ---

#[tokio::test]
async fn create_food_returns_201() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/Food",
            r#"{"name":"Pho","avatar":"a","rating":"4.5","open":true,"logo":"l","price":"11"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let food: Food = body_json(resp).await;
    assert_eq!(food.id, "1");
    assert_eq!(food.name, "Pho");
    assert_eq!(food.price.as_deref(), Some("11"));
    assert!(!food.created_at.is_empty());
}

#[tokio::test]
async fn create_food_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/Food", r#"{"open":"yes"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- get / update / delete ---

#[tokio::test]
async fn get_food_not_found() {
    let resp = app().oneshot(empty_request("GET", "/Food/42")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: String = body_json(resp).await;
    assert_eq!(body, "Not found");
}

#[tokio::test]
async fn update_food_not_found() {
    let resp = app()
        .oneshot(json_request("PUT", "/Food/42", r#"{"name":"Nope"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_food_not_found() {
    let resp = app()
        .oneshot(empty_request("DELETE", "/Food/42"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/Food",
            r#"{"name":"Ramen","avatar":"a","rating":"4","open":false,"logo":"l"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Food = body_json(resp).await;
    let id = created.id.clone();

    // update: only rating and open, the rest stays
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/Food/{id}"),
            r#"{"rating":"4.9","open":true}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Food = body_json(resp).await;
    assert_eq!(updated.name, "Ramen");
    assert_eq!(updated.rating, "4.9");
    assert!(updated.open);
    assert_eq!(updated.created_at, created.created_at);

    // get
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &format!("/Food/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Food = body_json(resp).await;
    assert_eq!(fetched, updated);

    // delete echoes the removed record
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/Food/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let removed: Food = body_json(resp).await;
    assert_eq!(removed.id, id);

    // delete again: 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/Food/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(!body_bytes(resp).await.is_empty());

    // list after delete: empty
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/Food"))
        .await
        .unwrap();
    let foods: Vec<Food> = body_json(resp).await;
    assert!(foods.is_empty());
}
