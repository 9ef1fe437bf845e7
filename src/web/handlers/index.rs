//! Informational index page

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};

use crate::web::{AppState, responses::not_found};

/// `GET /`
///
/// Not part of the tuner protocol; answers 404 when disabled in config.
pub async fn index(State(state): State<AppState>) -> Response {
    if !state.index_page {
        return not_found().await.into_response();
    }

    let emulator = &state.emulator;
    let device = emulator.device_config();
    let base_url = escape_html(emulator.base_url());

    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>{name}</title></head>
<body>
<h1>{name}</h1>
<p>Network tuner {model} ({id}) serving {tuners} tuners.</p>
<ul>
<li>Base URL: <code>{base_url}</code></li>
<li>Source: <code>{source}</code></li>
<li>URL mode: <code>{mode}</code></li>
</ul>
<ul>
<li><a href="{base_url}/discover.json">discover.json</a></li>
<li><a href="{base_url}/lineup.json">lineup.json</a></li>
<li><a href="{base_url}/lineup_status.json">lineup_status.json</a></li>
</ul>
</body>
</html>
"#,
        name = escape_html(&device.friendly_name),
        model = escape_html(&device.model_number),
        id = escape_html(&device.device_id),
        tuners = device.tuner_count,
        base_url = base_url,
        source = escape_html(&emulator.source().describe()),
        mode = emulator.lineup_config().url_mode,
    ))
    .into_response()
}

/// Minimal escaping for the values interpolated above
///
/// Only device config fields, the resolved base URL and the source
/// description reach this page; no request data is rendered.
fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
