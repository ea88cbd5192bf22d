use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{get, web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use env_logger::Env;
use log::{info, LevelFilter};
use serde::Serialize;

use kana_shuffle_core::model::link::LinkParams;
use kana_shuffle_core::model::rows::RowGroup;
use kana_shuffle_core::{Generator, Grid, GridInput};

/// Command-line configuration of the server.
#[derive(Parser, Debug, Clone)]
#[command(name = "kana-shuffle-server")]
#[command(about = "Serve seeded kana grids over HTTP")]
struct ServerConfig {
	#[arg(long, help = "Address to bind", default_value_t = String::from("127.0.0.1"))]
	host: String,
	#[arg(long, help = "Port to bind", default_value_t = 5000)]
	port: u16,
	#[arg(long, help = "Page URL share links are built against", default_value_t = String::from("http://127.0.0.1:5000/"))]
	base_url: String,
	#[arg(long, help = "Verbose (debug) logging", default_value_t = false)]
	debug: bool,
}

/// Immutable state shared by every worker.
///
/// Grids are generated per request; nothing here changes after start-up.
struct SharedData {
	generator: Generator,
	base_url: String,
}

/// Body of `/v1/grid`: the grid plus its share link.
#[derive(Serialize)]
struct GridResponse {
	#[serde(flatten)]
	grid: Grid,
	link: String,
}

/// Parses query parameters into a grid input, or a 400 response.
fn read_input(query: &LinkParams) -> Result<GridInput, HttpResponse> {
	query
		.to_grid_input()
		.map_err(|e| HttpResponse::BadRequest().body(e.to_string()))
}

/// HTTP GET endpoint `/v1/grid`
///
/// Generates a grid from the link parameters (`type`, `seed`, `d`, `rows`, `r`).
/// A missing seed means the daily seed; `seed=random:N` draws a new one.
#[get("/v1/grid")]
async fn get_grid(data: web::Data<SharedData>, query: web::Query<LinkParams>) -> impl Responder {
	let input = match read_input(&query) {
		Ok(input) => input,
		Err(response) => return response,
	};

	match data.generator.generate(&input) {
		Ok(grid) => {
			let link = grid.link_params().share_url(&data.base_url);
			HttpResponse::Ok().json(GridResponse { grid, link })
		}
		Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

/// HTTP GET endpoint `/v1/pool`
///
/// Returns the pool a grid with these parameters would be drawn from.
#[get("/v1/pool")]
async fn get_pool(data: web::Data<SharedData>, query: web::Query<LinkParams>) -> impl Responder {
	match read_input(&query) {
		Ok(input) => HttpResponse::Ok().json(data.generator.pool(&input)),
		Err(response) => response,
	}
}

#[get("/v1/rows")]
async fn get_rows() -> impl Responder {
	let keys: Vec<&str> = RowGroup::ALL.iter().map(|group| group.key()).collect();
	HttpResponse::Ok().body(keys.join("\n"))
}

/// HTTP GET endpoint `/v1/link`
///
/// Returns the share URL for the parameters, with the seed resolved the
/// same way `/v1/grid` resolves it.
#[get("/v1/link")]
async fn get_link(data: web::Data<SharedData>, query: web::Query<LinkParams>) -> impl Responder {
	let input = match read_input(&query) {
		Ok(input) => input,
		Err(response) => return response,
	};
	let seed = data.generator.resolve_seed(&input);
	HttpResponse::Ok().body(LinkParams::from_input(&input, &seed).share_url(&data.base_url))
}

fn init_logging(debug: bool) {
	let default = if debug { "debug" } else { "info" };
	let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or(default));
	builder.format_timestamp(None);
	if debug {
		builder.filter_level(LevelFilter::Debug);
	}
	let _ = builder.try_init();
}

/// Main entry point for the server.
///
/// Parses the CLI configuration, sets up logging and starts an Actix-web
/// HTTP server. Workers share the generator read-only.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	let config = ServerConfig::parse();
	init_logging(config.debug);

	let shared_data = web::Data::new(SharedData {
		generator: Generator::new(),
		base_url: config.base_url.clone(),
	});

	info!("listening on {}:{} (share links against {})", config.host, config.port, config.base_url);

	HttpServer::new(move || {
		App::new()
			.wrap(Logger::default())
			.wrap(Cors::permissive())
			.app_data(shared_data.clone())
			.service(get_grid)
			.service(get_pool)
			.service(get_rows)
			.service(get_link)
	})
		.bind((config.host.as_str(), config.port))?
		.run()
		.await
}

#[cfg(test)]
mod tests {
	use super::*;
	use actix_web::http::StatusCode;
	use actix_web::test;
	use chrono::NaiveDate;
	use serde_json::Value;

	fn shared() -> web::Data<SharedData> {
		web::Data::new(SharedData {
			generator: Generator::with_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
			base_url: "https://kana.test/".to_owned(),
		})
	}

	macro_rules! app {
		() => {
			test::init_service(
				App::new()
					.app_data(shared())
					.service(get_grid)
					.service(get_pool)
					.service(get_rows)
					.service(get_link),
			)
			.await
		};
	}

	#[actix_web::test]
	async fn daily_grid() {
		let app = app!();
		let req = test::TestRequest::get().uri("/v1/grid").to_request();
		let body: Value = test::call_and_read_body_json(&app, req).await;
		assert_eq!(body["seed"], "day20240101");
		assert_eq!(body["cells"].as_array().map(Vec::len), Some(50));
		assert_eq!(body["indices"][0], 35);
		assert_eq!(body["cells"][0]["kana"], "や");
		assert_eq!(body["link"], "https://kana.test/?seed=day20240101");
	}

	#[actix_web::test]
	async fn same_query_same_grid() {
		let app = app!();
		let uri = "/v1/grid?type=katakana&seed=Night%20Owl&d=1&rows=s,h";
		let first: Value = test::call_and_read_body_json(&app, test::TestRequest::get().uri(uri).to_request()).await;
		let second: Value = test::call_and_read_body_json(&app, test::TestRequest::get().uri(uri).to_request()).await;
		assert_eq!(first, second);
		assert_eq!(first["seed"], "nightowl");
		assert_eq!(first["link"], "https://kana.test/?type=katakana&seed=nightowl&d=1&rows=s%2Ch");
	}

	#[actix_web::test]
	async fn bad_seed_grammar_is_rejected() {
		let app = app!();
		let req = test::TestRequest::get().uri("/v1/grid?seed=random:many").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
	}

	#[actix_web::test]
	async fn oversized_random_seed_is_rejected() {
		let app = app!();
		for uri in ["/v1/grid?seed=random:18446744073709551615", "/v1/grid?seed=random:2000000000", "/v1/link?seed=random:65"] {
			let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
			assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
		}

		let req = test::TestRequest::get().uri("/v1/grid?seed=random:64").to_request();
		let body: Value = test::call_and_read_body_json(&app, req).await;
		assert_eq!(body["seed"].as_str().map(str::len), Some(64));
	}

	#[actix_web::test]
	async fn daily_is_an_ordinary_seed() {
		let app = app!();
		let req = test::TestRequest::get().uri("/v1/grid?seed=daily").to_request();
		let body: Value = test::call_and_read_body_json(&app, req).await;
		assert_eq!(body["seed"], "daily");
		assert_eq!(body["link"], "https://kana.test/?seed=daily");
	}

	#[actix_web::test]
	async fn pool_reports_filtering() {
		let app = app!();
		let req = test::TestRequest::get().uri("/v1/pool?rows=vowels&d=1").to_request();
		let body: Value = test::call_and_read_body_json(&app, req).await;
		assert_eq!(body["filtered"], true);
		assert_eq!(body["entries"].as_array().map(Vec::len), Some(5));
	}

	#[actix_web::test]
	async fn rows_and_link() {
		let app = app!();
		let rows = test::call_and_read_body(&app, test::TestRequest::get().uri("/v1/rows").to_request()).await;
		assert_eq!(rows, "vowels\nk\ns\nt\nn\nh\nm\ny\nr\nw");

		let link = test::call_and_read_body(&app, test::TestRequest::get().uri("/v1/link?type=kanji&r=1").to_request()).await;
		assert_eq!(link, "https://kana.test/?seed=day20240101&r=1");
	}
}
