//! Password-guarded CSV export of the whitelist (`POST /api/users`).

// crates.io
use axum::{
	Form,
	extract::State,
	http::header,
	response::{Html, IntoResponse, Response},
};
// self
use crate::{_prelude::*, auth::Secret, server::AppState};

/// Username + password accepted by the export form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminCredentials {
	/// Expected `username` form field.
	pub username: String,
	/// Expected `password` form field.
	pub password: Secret,
}
impl AdminCredentials {
	/// Creates credentials.
	pub fn new(username: impl Into<String>, password: impl Into<Secret>) -> Self {
		Self { username: username.into(), password: password.into() }
	}

	fn accepts(&self, login: &AdminLogin) -> bool {
		self.username == login.username && self.password.expose() == login.password.expose()
	}
}

/// Form submitted by the admin page.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AdminLogin {
	/// Submitted username.
	pub username: String,
	/// Submitted password.
	pub password: Secret,
}

/// Streams the whitelist as `users.csv`, or answers with an alert page.
pub async fn export_users(State(state): State<AppState>, Form(login): Form<AdminLogin>) -> Response {
	let authorized = state.admin.as_ref().is_some_and(|admin| admin.accepts(&login));

	if !authorized {
		tracing::warn!(username = %login.username, "rejected whitelist export");

		return alert_page("Invalid user name or password", "/users");
	}

	match state.store.export_csv().await {
		Ok(Some(csv)) => {
			tracing::info!(bytes = csv.len(), "exported whitelist");

			(
				[
					(header::CONTENT_TYPE, "text/csv; charset=utf-8"),
					(header::CONTENT_DISPOSITION, "attachment; filename=\"users.csv\""),
				],
				csv,
			)
				.into_response()
		},
		Ok(None) => alert_page("No data", "/"),
		Err(e) => {
			tracing::error!(error = %e, "whitelist export failed");

			alert_page("No data", "/")
		},
	}
}

fn alert_page(message: &str, redirect: &str) -> Response {
	Html(format!(
		"<script>alert({message:?}); window.location.href = {redirect:?}; </script>"
	))
	.into_response()
}
