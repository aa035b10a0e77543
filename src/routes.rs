use askama::Template;
use axum::Json;
use serde_json::json;

#[derive(Template)]
#[template(path = "chat.html")]
pub struct ChatTemplate<'a> {
    title: &'a str,
}

pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
}

pub async fn home() -> ChatTemplate<'static> {
    ChatTemplate {
        title: "Archive Intellect",
    }
}
