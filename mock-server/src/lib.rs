use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct City {
    pub id: i64,
    pub name: String,
}

/// Wrapper mirroring the generic result envelope the client deserializes.
#[derive(Clone, Debug, Serialize)]
pub struct ResultBean<T> {
    pub code: i32,
    pub data: T,
}

#[derive(Deserialize)]
pub struct ById {
    pub id: i64,
}

#[derive(Deserialize)]
pub struct ByName {
    pub name: String,
}

pub type Db = Arc<RwLock<HashMap<i64, City>>>;

fn seed() -> HashMap<i64, City> {
    [(1, "北京"), (2, "上海"), (3, "广州")]
        .into_iter()
        .map(|(id, name)| {
            (
                id,
                City {
                    id,
                    name: name.to_string(),
                },
            )
        })
        .collect()
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(seed()));
    Router::new()
        .route("/city/allCities", get(all_cities))
        .route("/city/getById", get(get_by_id))
        .route("/city/save", post(save_cities))
        .route("/city/saveCity", post(save_city))
        .route("/city/getCityByName", get(get_city_by_name))
        .route("/city/getCityRest/{id}", get(get_city_rest))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn all_cities(State(db): State<Db>) -> Json<Vec<City>> {
    let cities = db.read().await;
    let mut all: Vec<City> = cities.values().cloned().collect();
    all.sort_by_key(|c| c.id);
    Json(all)
}

async fn get_by_id(
    State(db): State<Db>,
    Query(query): Query<ById>,
) -> Result<Json<City>, StatusCode> {
    let cities = db.read().await;
    cities.get(&query.id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

/// Accepts a whole list as the request body and answers with the bare
/// literal `true`, the way the real endpoint does.
async fn save_cities(State(db): State<Db>, Json(input): Json<Vec<City>>) -> &'static str {
    let mut cities = db.write().await;
    for city in input {
        cities.insert(city.id, city);
    }
    "true"
}

async fn save_city(State(db): State<Db>, Json(city): Json<City>) -> &'static str {
    db.write().await.insert(city.id, city);
    "true"
}

async fn get_city_by_name(
    State(db): State<Db>,
    Query(query): Query<ByName>,
) -> Result<Json<ResultBean<City>>, StatusCode> {
    let cities = db.read().await;
    cities
        .values()
        .find(|c| c.name == query.name)
        .cloned()
        .map(|data| Json(ResultBean { code: 0, data }))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn get_city_rest(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<City>, StatusCode> {
    let cities = db.read().await;
    cities.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}
