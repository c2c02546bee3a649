#![cfg(feature = "server")]

// std
use std::{env, fs, path::PathBuf, process};
// crates.io
use httpmock::prelude::*;
use serde_json::{Value, json};
// self
use whitelist_broker::{
	_preludet::*,
	server::{AdminCredentials, DEFAULT_FOLLOW_TARGET},
};

fn static_dir(label: &str) -> PathBuf {
	let dir = env::temp_dir().join(format!(
		"whitelist_broker_static_{label}_{}_{}",
		process::id(),
		OffsetDateTime::now_utc().unix_timestamp_nanos(),
	));

	fs::create_dir_all(&dir).expect("Failed to create static fixture directory.");
	fs::write(dir.join("index.html"), "<html>wizard</html>")
		.expect("Failed to write static fixture index.");

	dir
}

async fn post_json(base: &str, path: &str, body: Value) -> (u16, Value) {
	let response = test_reqwest_http_client()
		.post(format!("{base}{path}"))
		.header("content-type", "application/json")
		.body(body.to_string())
		.send()
		.await
		.expect("Route should respond.");
	let status = response.status().as_u16();
	let text = response.text().await.expect("Route body should be readable.");

	(status, serde_json::from_str(&text).expect("Route should answer with JSON."))
}

#[tokio::test]
async fn token_routes_relay_pairs_and_rejections() {
	let provider = MockServer::start_async().await;
	let app = spawn_test_server(
		test_app_state(&provider.base_url(), test_memory_store()),
		&static_dir("token_routes"),
	)
	.await;

	provider
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/request_token");
			then.status(200)
				.body("oauth_token=req&oauth_token_secret=req-secret&oauth_callback_confirmed=true");
		})
		.await;
	provider
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/access_token");
			then.status(401).body("Invalid request token.");
		})
		.await;

	let (status, body) = post_json(&app, "/api/request-token", json!({})).await;

	assert_eq!(status, 200);
	assert_eq!(
		body,
		json!({
			"oauth_token": "req",
			"oauth_token_secret": "req-secret",
			"oauth_callback_confirmed": "true",
		})
	);

	let (status, body) = post_json(
		&app,
		"/api/access-token",
		json!({ "oauthToken": "req", "oauthVerifier": "verifier" }),
	)
	.await;

	assert_eq!(status, 502);
	assert_eq!(body["status"], 401);
	assert_eq!(body["body"], "Invalid request token.");
}

#[tokio::test]
async fn account_routes_report_screen_name_and_follow_status() {
	let provider = MockServer::start_async().await;
	let app = spawn_test_server(
		test_app_state(&provider.base_url(), test_memory_store()),
		&static_dir("account_routes"),
	)
	.await;

	provider
		.mock_async(|when, then| {
			when.method(GET).path("/1.1/account/verify_credentials.json");
			then.status(200).body("{\"id\":42,\"screen_name\":\"alice\",\"name\":\"Alice\"}");
		})
		.await;
	provider
		.mock_async(|when, then| {
			when.method(GET).path("/1.1/friends/ids.json").query_param("screen_name", "alice");
			then.status(200)
				.body(format!("{{\"ids\":[{DEFAULT_FOLLOW_TARGET}],\"next_cursor\":0}}"));
		})
		.await;

	let pair = json!({ "access_token": "42-access", "access_token_secret": "access-secret" });
	let (status, body) = post_json(&app, "/api/verify-credentials", pair).await;

	assert_eq!(status, 200);
	assert_eq!(body, json!({ "screen_name": "alice", "success": true }));

	let (_, body) = post_json(
		&app,
		"/api/check-followers",
		json!({
			"screen_name": "alice",
			"access_token": "42-access",
			"access_token_secret": "access-secret",
		}),
	)
	.await;

	assert_eq!(body, json!({ "followed": true, "success": true }));

	let (_, body) = post_json(
		&app,
		"/api/check-followers",
		json!({
			"screen_name": "not valid",
			"access_token": "42-access",
			"access_token_secret": "access-secret",
		}),
	)
	.await;

	assert_eq!(body["followed"], false);
	assert_eq!(body["success"], false);
}

#[tokio::test]
async fn verify_credentials_route_reports_failures_in_body() {
	let provider = MockServer::start_async().await;
	let app = spawn_test_server(
		test_app_state(&provider.base_url(), test_memory_store()),
		&static_dir("verify_failure"),
	)
	.await;

	provider
		.mock_async(|when, then| {
			when.method(GET).path("/1.1/account/verify_credentials.json");
			then.status(401).body("{\"errors\":[]}");
		})
		.await;

	let (status, body) = post_json(
		&app,
		"/api/verify-credentials",
		json!({ "access_token": "bad", "access_token_secret": "bad" }),
	)
	.await;

	assert_eq!(status, 200);
	assert_eq!(body["screen_name"], "");
	assert_eq!(body["success"], false);
	assert!(body["error"].is_string());
}

#[tokio::test]
async fn whitelist_routes_save_then_find_case_insensitively() {
	let provider = MockServer::start_async().await;
	let store = test_memory_store();
	let app =
		spawn_test_server(test_app_state(&provider.base_url(), store.clone()), &static_dir("users"))
			.await;
	let (_, body) = post_json(&app, "/api/check-user", json!({ "address": "" })).await;

	assert_eq!(body, json!({ "exists": false, "error": "Empty address" }));

	let (_, body) = post_json(&app, "/api/check-user", json!({ "address": "0xAbC" })).await;

	assert_eq!(body, json!({ "exists": false }));

	let (status, body) = post_json(
		&app,
		"/api/save-user",
		json!({ "address": "0xAbC", "twitter_name": "alice" }),
	)
	.await;

	assert_eq!(status, 200);
	assert_eq!(body, json!({ "success": true }));

	let (_, body) = post_json(&app, "/api/check-user", json!({ "address": "0XABC" })).await;

	assert_eq!(body, json!({ "exists": true, "name": "alice" }));

	let (status, body) = post_json(
		&app,
		"/api/save-user",
		json!({ "address": "0xdef", "twitter_name": "a,b" }),
	)
	.await;

	assert_eq!(status, 400);
	assert_eq!(body["success"], false);
	assert_eq!(store.records().len(), 1);
}

#[tokio::test]
async fn users_export_requires_admin_credentials() {
	let provider = MockServer::start_async().await;
	let store = test_memory_store();
	let state = test_app_state(&provider.base_url(), store.clone())
		.with_admin(AdminCredentials::new("admin", "hunter2"));
	let app = spawn_test_server(state, &static_dir("export")).await;
	let client = test_reqwest_http_client();
	let export = |username: &'static str, password: &'static str| {
		client
			.post(format!("{app}/api/users"))
			.form(&[("username", username), ("password", password)])
			.send()
	};
	let denied = export("admin", "wrong").await.expect("Export route should respond.");

	assert!(
		denied
			.text()
			.await
			.expect("Body should be readable.")
			.contains("Invalid user name or password")
	);

	let empty = export("admin", "hunter2").await.expect("Export route should respond.");

	assert!(empty.text().await.expect("Body should be readable.").contains("No data"));

	let (status, _) = post_json(
		&app,
		"/api/save-user",
		json!({ "address": "0x01", "twitter_name": "alice" }),
	)
	.await;

	assert_eq!(status, 200);

	let csv = export("admin", "hunter2").await.expect("Export route should respond.");

	assert_eq!(
		csv.headers().get("content-type").and_then(|v| v.to_str().ok()),
		Some("text/csv; charset=utf-8")
	);
	assert_eq!(csv.text().await.expect("Body should be readable."), "0x01,alice\n");
}

#[tokio::test]
async fn unknown_paths_fall_back_to_front_end() {
	let provider = MockServer::start_async().await;
	let app = spawn_test_server(
		test_app_state(&provider.base_url(), test_memory_store()),
		&static_dir("fallback"),
	)
	.await;
	let client = test_reqwest_http_client();
	let page = client
		.get(format!("{app}/whitelist/step-2"))
		.send()
		.await
		.expect("Front-end route should respond.");

	assert_eq!(page.status().as_u16(), 200);
	assert_eq!(page.text().await.expect("Body should be readable."), "<html>wizard</html>");

	let missing = client
		.post(format!("{app}/api/unknown"))
		.send()
		.await
		.expect("Unknown API route should respond.");

	assert_eq!(missing.status().as_u16(), 404);
}
