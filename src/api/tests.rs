use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{DefaultBodyLimit, Json, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use reqwest::Client;
use serde_json::{json, Value};

use super::{router, AppState};
use crate::backend::Backend;

#[derive(Default)]
struct Store {
	plans: HashMap<(String, i64, i64), Value>,
	items: Vec<Value>,
	next_id: u32,
	copies: Vec<Value>,
	images: Vec<String>,
}

type Shared = Arc<Mutex<Store>>;

fn plan_key(owner: &Value, year: &Value, week: &Value) -> (String, i64, i64) {
	(
		owner.as_str().unwrap().to_owned(),
		year.as_i64().unwrap(),
		week.as_i64().unwrap(),
	)
}

fn query_key(q: &HashMap<String, String>) -> (String, i64, i64) {
	(
		q["ejerId"].clone(),
		q["aar"].parse().unwrap(),
		q["uge"].parse().unwrap(),
	)
}

fn recipes() -> Vec<Value> {
	vec![
		json!({
			"id": "rec1",
			"ejerId": "own1",
			"titel": "Boller i karry",
			"portioner": 4,
			"ingredienser": ["500 g hakket svinekød", "  ", " karry "],
			"fremgangsmaade": "Rør farsen.",
			"oprettetDato": "2024-01-02"
		}),
		json!({
			"id": "rec2",
			"ejerId": "own1",
			"titel": "",
			"portioner": 2,
			"ingredienser": [],
			"fremgangsmaade": "",
			"oprettetDato": "2024-01-03"
		}),
	]
}

async fn fake_owners() -> Json<Value> {
	Json(json!({ "data": [{ "id": "own1", "navn": "Anna" }, { "id": "own2", "navn": "Bo" }] }))
}

async fn fake_create_owner(Json(b): Json<Value>) -> Json<Value> {
	Json(json!({ "data": { "id": "own3", "navn": b["navn"] } }))
}

async fn fake_get_week(
	State(s): State<Shared>,
	Query(q): Query<HashMap<String, String>>,
) -> Json<Value> {
	let plan = s.lock().unwrap().plans.get(&query_key(&q)).cloned();
	Json(json!({ "data": plan }))
}

async fn fake_create_week(State(s): State<Shared>, Json(b): Json<Value>) -> Json<Value> {
	let mut s = s.lock().unwrap();
	s.next_id += 1;
	let id = format!("plan{}", s.next_id);

	s.plans.insert(
		plan_key(&b["ejerId"], &b["aar"], &b["uge"]),
		json!({ "id": id, "ejerId": b["ejerId"], "aar": b["aar"], "uge": b["uge"], "dage": {} }),
	);

	Json(json!({ "id": id }))
}

async fn fake_update_day(State(s): State<Shared>, Json(b): Json<Value>) -> StatusCode {
	let mut s = s.lock().unwrap();
	let field = b["feltNavn"].as_str().unwrap().to_lowercase();
	let plan = s.plans.values_mut().find(|p| p["id"] == b["id"]).unwrap();

	plan["dage"][field.as_str()] = json!({
		"ret": b["ret"],
		"opskriftId": b.get("opskriftId").cloned().unwrap_or(Value::Null),
	});

	StatusCode::OK
}

async fn fake_clear_day(State(s): State<Shared>, Json(b): Json<Value>) -> StatusCode {
	let mut s = s.lock().unwrap();
	let field = b["feltNavn"].as_str().unwrap().to_lowercase();
	let plan = s.plans.values_mut().find(|p| p["id"] == b["id"]).unwrap();

	plan["dage"][field.as_str()] = json!({ "ret": null, "opskriftId": null });

	StatusCode::OK
}

async fn fake_copy_week(State(s): State<Shared>, Json(b): Json<Value>) -> Json<Value> {
	let mut s = s.lock().unwrap();

	let from = plan_key(&b["ejerId"], &b["fraAar"], &b["fraUge"]);
	let to = plan_key(&b["ejerId"], &b["tilAar"], &b["tilUge"]);

	if let Some(source) = s.plans.get(&from).cloned() {
		s.plans.insert(
			to,
			json!({
				"id": "copied",
				"ejerId": b["ejerId"],
				"aar": b["tilAar"],
				"uge": b["tilUge"],
				"dage": source["dage"],
			}),
		);
	}

	s.copies.push(b);

	Json(json!({ "success": true }))
}

async fn fake_recipes() -> Json<Value> {
	Json(json!({ "data": recipes() }))
}

async fn fake_recipe(Query(q): Query<HashMap<String, String>>) -> Json<Value> {
	let recipe = recipes().into_iter().find(|r| r["id"] == q["id"].as_str());
	Json(json!({ "data": recipe }))
}

async fn fake_dishes() -> Json<Value> {
	Json(json!({ "data": ["Pasta carbonara", "Pizza", "PASTA pesto"] }))
}

async fn fake_list_items(
	State(s): State<Shared>,
	Query(q): Query<HashMap<String, String>>,
) -> Json<Value> {
	let key = query_key(&q);
	let items: Vec<Value> = s
		.lock()
		.unwrap()
		.items
		.iter()
		.filter(|i| plan_key(&i["ejerId"], &i["aar"], &i["uge"]) == key)
		.cloned()
		.collect();

	Json(json!({ "data": items }))
}

async fn fake_add_item(State(s): State<Shared>, Json(b): Json<Value>) -> Json<Value> {
	let mut s = s.lock().unwrap();
	s.next_id += 1;

	let item = json!({
		"id": format!("item{}", s.next_id),
		"ejerId": b["ejerId"],
		"aar": b["aar"],
		"uge": b["uge"],
		"navn": b["navn"],
		"kilde": "manuel",
		"afkrydset": false,
	});
	s.items.push(item.clone());

	Json(json!({ "data": item }))
}

// answers without the data envelope
async fn fake_update_item(State(s): State<Shared>, Json(b): Json<Value>) -> Json<Value> {
	let mut s = s.lock().unwrap();
	let item = s.items.iter_mut().find(|i| i["id"] == b["id"]).unwrap();
	item["afkrydset"] = b["afkrydset"].clone();

	Json(item.clone())
}

async fn fake_delete_item(State(s): State<Shared>, Json(b): Json<Value>) -> StatusCode {
	s.lock().unwrap().items.retain(|i| i["id"] != b["id"]);
	StatusCode::OK
}

async fn fake_import_url(Json(b): Json<Value>) -> Json<Value> {
	if b["url"].as_str().unwrap().contains("fail") {
		return Json(json!({ "success": false, "error": "Kunne ikke læse siden" }));
	}

	Json(json!({
		"success": true,
		"data": {
			"titel": "Importeret",
			"portioner": 2,
			"ingredienser": ["mel"],
			"fremgangsmaade": "Bag."
		}
	}))
}

async fn fake_import_image(State(s): State<Shared>, Json(b): Json<Value>) -> Json<Value> {
	s.lock()
		.unwrap()
		.images
		.push(b["imageBase64"].as_str().unwrap().to_owned());

	Json(json!({ "success": false }))
}

fn fake_backend(store: Shared) -> Router {
	Router::new()
		.route("/webhook/madplan/ejere", get(fake_owners))
		.route("/webhook/madplan/ejer/opret", post(fake_create_owner))
		.route("/webhook/madplan/uge", get(fake_get_week))
		.route("/webhook/madplan/uge/opret", post(fake_create_week))
		.route("/webhook/madplan/uge/kopier", post(fake_copy_week))
		.route("/webhook/madplan/dag/opdater", post(fake_update_day))
		.route("/webhook/madplan/dag/slet", post(fake_clear_day))
		.route("/webhook/madplan/opskrifter", get(fake_recipes))
		.route("/webhook/madplan/opskrift", get(fake_recipe))
		.route("/webhook/madplan/retter", get(fake_dishes))
		.route("/webhook/madplan/indkob", get(fake_list_items))
		.route("/webhook/madplan/indkob/tilfoej", post(fake_add_item))
		.route(
			"/webhook/madplan/indkob/opdater",
			axum::routing::put(fake_update_item),
		)
		.route(
			"/webhook/madplan/indkob/slet",
			axum::routing::delete(fake_delete_item),
		)
		.route("/webhook/madplan/opskrift/import-url", post(fake_import_url))
		.route(
			"/webhook/madplan/opskrift/import-billede",
			post(fake_import_image).layer(DefaultBodyLimit::max(64 * 1024 * 1024)),
		)
		.with_state(store)
}

async fn serve(app: Router) -> String {
	let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
	let addr = listener.local_addr().unwrap();

	tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

	format!("http://{addr}")
}

async fn setup_with_backend(backend_url: &str) -> String {
	let state = AppState {
		backend: Backend::with_client(Client::new(), backend_url),
		timezone: chrono_tz::Europe::Copenhagen,
	};

	serve(router(state)).await
}

async fn setup() -> (String, Shared) {
	let store = Shared::default();
	let fake = serve(fake_backend(store.clone())).await;

	(setup_with_backend(&format!("{fake}/webhook")).await, store)
}

async fn json_of(res: reqwest::Response) -> (StatusCode, Value) {
	let code = StatusCode::from_u16(res.status().as_u16()).unwrap();
	(code, res.json().await.unwrap())
}

#[tokio::test]
async fn week_navigation_endpoints() {
	let (app, _) = setup().await;
	let client = Client::new();

	let (code, body) = json_of(
		client
			.get(format!("{app}/week/navigate?year=2023&week=52&direction=next"))
			.send()
			.await
			.unwrap(),
	)
	.await;

	assert_eq!(code, StatusCode::OK);
	assert_eq!(body["msg"]["year"], 2024);
	assert_eq!(body["msg"]["week"], 1);
	assert_eq!(body["msg"]["range"], "1. jan - 7. jan");
	assert_eq!(body["msg"]["days"][0]["day"], "mandag");

	let (code, body) = json_of(
		client
			.get(format!("{app}/week?year=2024&week=2147483647"))
			.send()
			.await
			.unwrap(),
	)
	.await;

	assert_eq!(code, StatusCode::UNPROCESSABLE_ENTITY);
	assert_eq!(body["error"], "invalid week/year");

	let (code, body) = json_of(client.get(format!("{app}/week/current")).send().await.unwrap()).await;
	assert_eq!(code, StatusCode::OK);
	assert_eq!(body["msg"]["current"], true);
}

#[tokio::test]
async fn owners_select_requested_or_first() {
	let (app, _) = setup().await;
	let client = Client::new();

	let (_, body) = json_of(
		client
			.get(format!("{app}/owners?selected=own2"))
			.send()
			.await
			.unwrap(),
	)
	.await;
	assert_eq!(body["msg"]["selected"], "own2");
	assert_eq!(body["msg"]["owners"][1]["navn"], "Bo");

	let (code, body) = json_of(
		client
			.post(format!("{app}/owners"))
			.json(&json!({ "name": "  Carl " }))
			.send()
			.await
			.unwrap(),
	)
	.await;
	assert_eq!(code, StatusCode::CREATED);
	assert_eq!(body["msg"]["navn"], "Carl");

	let (code, _) = json_of(
		client
			.post(format!("{app}/owners"))
			.json(&json!({ "name": " " }))
			.send()
			.await
			.unwrap(),
	)
	.await;
	assert_eq!(code, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn unknown_week_gives_empty_plan() {
	let (app, _) = setup().await;

	let (code, body) = json_of(
		Client::new()
			.get(format!("{app}/plan?owner=own1&year=2021&week=0"))
			.send()
			.await
			.unwrap(),
	)
	.await;

	assert_eq!(code, StatusCode::OK);
	assert_eq!(body["msg"]["week"]["label"], "Uge 53, 2020");
	assert_eq!(body["msg"]["plan"]["aar"], 2020);
	assert_eq!(body["msg"]["plan"]["uge"], 53);
	assert_eq!(body["msg"]["plan"]["id"], Value::Null);
	assert_eq!(body["msg"]["plan"]["dage"]["mandag"]["ret"], Value::Null);
	assert_eq!(body["msg"]["recipes"].as_array().unwrap().len(), 2);
	assert_eq!(body["msg"]["previous_dishes"][1], "Pizza");
}

#[tokio::test]
async fn saving_days_creates_plan_once() {
	let (app, store) = setup().await;
	let client = Client::new();

	let (code, body) = json_of(
		client
			.put(format!("{app}/plan/day"))
			.json(&json!({
				"owner": "own1",
				"year": 2024,
				"week": 1,
				"day": "loerdag",
				"dish": "  Boller i karry ",
				"recipe_id": "rec1"
			}))
			.send()
			.await
			.unwrap(),
	)
	.await;

	assert_eq!(code, StatusCode::OK);
	assert_eq!(body["msg"]["id"], "plan1");
	assert_eq!(body["msg"]["dage"]["loerdag"]["ret"], "Boller i karry");
	assert_eq!(body["msg"]["dage"]["loerdag"]["opskriftId"], "rec1");

	let (_, body) = json_of(
		client
			.put(format!("{app}/plan/day"))
			.json(&json!({
				"owner": "own1",
				"year": 2024,
				"week": 1,
				"day": "mandag",
				"dish": "Pizza"
			}))
			.send()
			.await
			.unwrap(),
	)
	.await;

	assert_eq!(body["msg"]["id"], "plan1");
	assert_eq!(body["msg"]["dage"]["mandag"]["opskriftId"], Value::Null);
	assert_eq!(store.lock().unwrap().plans.len(), 1);

	let (_, body) = json_of(
		client
			.delete(format!("{app}/plan/day"))
			.json(&json!({ "owner": "own1", "year": 2024, "week": 1, "day": "loerdag" }))
			.send()
			.await
			.unwrap(),
	)
	.await;

	assert_eq!(body["msg"]["dage"]["loerdag"]["ret"], Value::Null);
	assert_eq!(body["msg"]["dage"]["mandag"]["ret"], "Pizza");
}

#[tokio::test]
async fn blank_dish_is_rejected() {
	let (app, store) = setup().await;

	let (code, body) = json_of(
		Client::new()
			.put(format!("{app}/plan/day"))
			.json(&json!({ "owner": "own1", "year": 2024, "week": 1, "day": "mandag", "dish": "  " }))
			.send()
			.await
			.unwrap(),
	)
	.await;

	assert_eq!(code, StatusCode::UNPROCESSABLE_ENTITY);
	assert_eq!(body["error"], "dish must not be empty");
	assert!(store.lock().unwrap().plans.is_empty());
}

#[tokio::test]
async fn copy_week_rolls_over_year() {
	let (app, store) = setup().await;
	let client = Client::new();

	client
		.put(format!("{app}/plan/day"))
		.json(&json!({ "owner": "own1", "year": 2020, "week": 53, "day": "fredag", "dish": "Tacos" }))
		.send()
		.await
		.unwrap();

	let (code, body) = json_of(
		client
			.post(format!("{app}/plan/copy"))
			.json(&json!({
				"owner": "own1",
				"from_year": 2020,
				"from_week": 53,
				"to_year": 2020,
				"to_week": 54
			}))
			.send()
			.await
			.unwrap(),
	)
	.await;

	assert_eq!(code, StatusCode::OK);
	assert_eq!(body["msg"]["aar"], 2021);
	assert_eq!(body["msg"]["uge"], 1);
	assert_eq!(body["msg"]["dage"]["fredag"]["ret"], "Tacos");

	let store = store.lock().unwrap();
	let copies = &store.copies;
	assert_eq!(copies.len(), 1);
	assert_eq!(copies[0]["tilAar"], 2021);
	assert_eq!(copies[0]["tilUge"], 1);
}

#[tokio::test]
async fn copy_onto_same_week_is_rejected() {
	let (app, store) = setup().await;

	let (code, body) = json_of(
		Client::new()
			.post(format!("{app}/plan/copy"))
			.json(&json!({
				"owner": "own1",
				"from_year": 2021,
				"from_week": 0,
				"to_year": 2020,
				"to_week": 53
			}))
			.send()
			.await
			.unwrap(),
	)
	.await;

	assert_eq!(code, StatusCode::UNPROCESSABLE_ENTITY);
	assert_eq!(body["error"], "cannot copy a week onto itself");
	assert!(store.lock().unwrap().copies.is_empty());
}

#[tokio::test]
async fn dish_suggestions() {
	let (app, _) = setup().await;

	let (_, body) = json_of(
		Client::new()
			.get(format!("{app}/plan/suggestions?owner=own1&input=pasta"))
			.send()
			.await
			.unwrap(),
	)
	.await;

	assert_eq!(body["msg"], json!(["Pasta carbonara", "PASTA pesto"]));
}

#[tokio::test]
async fn recipe_search_and_lookup() {
	let (app, _) = setup().await;
	let client = Client::new();

	let (_, body) = json_of(
		client
			.get(format!("{app}/recipes?owner=own1&search=KARRY"))
			.send()
			.await
			.unwrap(),
	)
	.await;
	assert_eq!(body["msg"].as_array().unwrap().len(), 1);
	assert_eq!(body["msg"][0]["id"], "rec1");

	let (code, body) = json_of(client.get(format!("{app}/recipes/nope")).send().await.unwrap()).await;
	assert_eq!(code, StatusCode::NOT_FOUND);
	assert_eq!(body["error"], "recipe not found");
}

#[tokio::test]
async fn shopping_list_flow() {
	let (app, _) = setup().await;
	let client = Client::new();

	let (code, body) = json_of(
		client
			.post(format!("{app}/shopping"))
			.json(&json!({ "owner": "own1", "year": 2024, "week": 1, "name": " mælk " }))
			.send()
			.await
			.unwrap(),
	)
	.await;
	assert_eq!(code, StatusCode::CREATED);
	assert_eq!(body["msg"]["navn"], "mælk");
	let milk = body["msg"]["id"].as_str().unwrap().to_owned();

	let (_, body) = json_of(
		client
			.post(format!("{app}/shopping/ingredients"))
			.json(&json!({ "owner": "own1", "year": 2024, "week": 1, "recipe_id": "rec1" }))
			.send()
			.await
			.unwrap(),
	)
	.await;
	assert_eq!(body["msg"], 2);

	let (code, body) = json_of(
		client
			.put(format!("{app}/shopping/{milk}"))
			.json(&json!({ "checked": true }))
			.send()
			.await
			.unwrap(),
	)
	.await;
	assert_eq!(code, StatusCode::OK);
	assert_eq!(body["msg"]["afkrydset"], true);

	let (_, body) = json_of(
		client
			.get(format!("{app}/shopping?owner=own1&year=2024&week=1"))
			.send()
			.await
			.unwrap(),
	)
	.await;
	assert_eq!(body["msg"]["checked"][0]["navn"], "mælk");
	assert_eq!(body["msg"]["unchecked"][0]["navn"], "500 g hakket svinekød");
	assert_eq!(body["msg"]["unchecked"][1]["navn"], "karry");

	client
		.delete(format!("{app}/shopping/{milk}"))
		.send()
		.await
		.unwrap();

	let (_, body) = json_of(
		client
			.get(format!("{app}/shopping?owner=own1&year=2024&week=1"))
			.send()
			.await
			.unwrap(),
	)
	.await;
	assert!(body["msg"]["checked"].as_array().unwrap().is_empty());

	let (code, _) = json_of(
		client
			.post(format!("{app}/shopping"))
			.json(&json!({ "owner": "own1", "year": 2024, "week": 1, "name": "" }))
			.send()
			.await
			.unwrap(),
	)
	.await;
	assert_eq!(code, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn recipe_import() {
	let (app, store) = setup().await;
	let client = Client::new();

	let (code, body) = json_of(
		client
			.post(format!("{app}/recipes/import/url"))
			.json(&json!({ "url": "https://example.com/opskrift" }))
			.send()
			.await
			.unwrap(),
	)
	.await;
	assert_eq!(code, StatusCode::OK);
	assert_eq!(body["msg"]["titel"], "Importeret");

	let (code, body) = json_of(
		client
			.post(format!("{app}/recipes/import/url"))
			.json(&json!({ "url": "https://example.com/fail" }))
			.send()
			.await
			.unwrap(),
	)
	.await;
	assert_eq!(code, StatusCode::UNPROCESSABLE_ENTITY);
	assert_eq!(body["error"], "Kunne ikke læse siden");

	let (code, body) = json_of(
		client
			.post(format!("{app}/recipes/import/url"))
			.json(&json!({ "url": "ftp://example.com" }))
			.send()
			.await
			.unwrap(),
	)
	.await;
	assert_eq!(code, StatusCode::UNPROCESSABLE_ENTITY);
	assert_eq!(body["error"], "invalid url");

	let (code, body) = json_of(
		client
			.post(format!("{app}/recipes/import/image"))
			.body(vec![0xffu8, 0xd8, 0xff])
			.send()
			.await
			.unwrap(),
	)
	.await;
	assert_eq!(code, StatusCode::UNPROCESSABLE_ENTITY);
	assert_eq!(body["error"], "Kunne ikke importere opskrift fra billede");
	assert_eq!(store.lock().unwrap().images, ["/9j/"]);
}

#[tokio::test]
async fn unreachable_backend() {
	let app = setup_with_backend("http://127.0.0.1:1/webhook").await;
	let client = Client::new();

	let (code, body) = json_of(client.get(format!("{app}/owners")).send().await.unwrap()).await;
	assert_eq!(code, StatusCode::BAD_GATEWAY);
	assert_eq!(body["error"], "backend error");

	let (code, body) = json_of(client.get(format!("{app}/health")).send().await.unwrap()).await;
	assert_eq!(code, StatusCode::SERVICE_UNAVAILABLE);
	assert_eq!(body["error"], "backend unavailable");
}

#[tokio::test]
async fn image_import_body_limits() {
	let (app, store) = setup().await;
	let client = Client::new();

	let (code, body) = json_of(
		client
			.post(format!("{app}/recipes/import/image"))
			.body(Vec::<u8>::new())
			.send()
			.await
			.unwrap(),
	)
	.await;
	assert_eq!(code, StatusCode::UNPROCESSABLE_ENTITY);
	assert_eq!(body["error"], "empty image");
	assert!(store.lock().unwrap().images.is_empty());

	// above axum's default 2 MB limit, below the image limit
	let (code, _) = json_of(
		client
			.post(format!("{app}/recipes/import/image"))
			.body(vec![0u8; 3 * 1024 * 1024])
			.send()
			.await
			.unwrap(),
	)
	.await;
	assert_eq!(code, StatusCode::UNPROCESSABLE_ENTITY);
	assert_eq!(store.lock().unwrap().images.len(), 1);

	let res = client
		.post(format!("{app}/recipes/import/image"))
		.body(vec![0u8; 17 * 1024 * 1024])
		.send()
		.await
		.unwrap();
	assert_eq!(res.status().as_u16(), StatusCode::PAYLOAD_TOO_LARGE.as_u16());
	assert_eq!(store.lock().unwrap().images.len(), 1);
}
