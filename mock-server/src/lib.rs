//! In-memory stand-in for the mockapi.io `Food` resource.
//!
//! Ids are sequential decimal strings, `createdAt` is stamped on create, and
//! `PUT` merges only the fields present in the body. Unknown ids answer 404
//! with the JSON string `"Not found"`, as the hosted service does.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub rating: String,
    pub open: bool,
    pub logo: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
}

/// Create and update body. Every field is optional, like the hosted API.
#[derive(Debug, Default, Deserialize)]
pub struct FoodInput {
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub rating: Option<String>,
    pub open: Option<bool>,
    pub logo: Option<String>,
    pub price: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FoodQuery {
    pub name: Option<String>,
}

#[derive(Debug, Default)]
pub struct Store {
    next_id: u64,
    foods: Vec<Food>,
}

impl Store {
    pub fn insert(&mut self, input: FoodInput) -> Food {
        self.next_id += 1;
        let food = Food {
            id: self.next_id.to_string(),
            name: input.name.unwrap_or_default(),
            avatar: input.avatar.unwrap_or_default(),
            rating: input.rating.unwrap_or_else(|| "0".to_string()),
            open: input.open.unwrap_or(false),
            logo: input.logo.unwrap_or_default(),
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            price: input.price,
        };
        self.foods.push(food.clone());
        food
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.foods.iter().position(|food| food.id == id)
    }
}

pub type Db = Arc<RwLock<Store>>;

type NotFound = (StatusCode, Json<&'static str>);

const NOT_FOUND: NotFound = (StatusCode::NOT_FOUND, Json("Not found"));

pub fn app() -> Router {
    app_with(Store::default())
}

/// Router over a pre-populated store.
pub fn app_with(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/Food", get(list_foods).post(create_food))
        .route("/Food/{id}", get(get_food).put(update_food).delete(delete_food))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_foods(State(db): State<Db>, Query(query): Query<FoodQuery>) -> Json<Vec<Food>> {
    let store = db.read().await;
    let needle = query.name.map(|name| name.to_lowercase());
    let foods = store
        .foods
        .iter()
        .filter(|food| match &needle {
            Some(needle) => food.name.to_lowercase().contains(needle.as_str()),
            None => true,
        })
        .cloned()
        .collect();
    Json(foods)
}

async fn create_food(State(db): State<Db>, Json(input): Json<FoodInput>) -> (StatusCode, Json<Food>) {
    let food = db.write().await.insert(input);
    debug!(id = %food.id, "food created");
    (StatusCode::CREATED, Json(food))
}

async fn get_food(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Food>, NotFound> {
    let store = db.read().await;
    let index = store.position(&id).ok_or(NOT_FOUND)?;
    Ok(Json(store.foods[index].clone()))
}

async fn update_food(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<FoodInput>,
) -> Result<Json<Food>, NotFound> {
    let mut store = db.write().await;
    let index = store.position(&id).ok_or(NOT_FOUND)?;
    let food = &mut store.foods[index];
    if let Some(name) = input.name {
        food.name = name;
    }
    if let Some(avatar) = input.avatar {
        food.avatar = avatar;
    }
    if let Some(rating) = input.rating {
        food.rating = rating;
    }
    if let Some(open) = input.open {
        food.open = open;
    }
    if let Some(logo) = input.logo {
        food.logo = logo;
    }
    if let Some(price) = input.price {
        food.price = Some(price);
    }
    debug!(id = %food.id, "food updated");
    Ok(Json(food.clone()))
}

async fn delete_food(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Food>, NotFound> {
    let mut store = db.write().await;
    let index = store.position(&id).ok_or(NOT_FOUND)?;
    let food = store.foods.remove(index);
    debug!(id = %food.id, "food deleted");
    Ok(Json(food))
}
