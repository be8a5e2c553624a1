use axum::{
    extract::Path,
    http::header,
    response::{IntoResponse, Response},
};

use crate::error::{AppError, Result};

const HANGMAN_JS: &str = include_str!("../../static/js/hangman.js");
const HANGMAN_CSS: &str = include_str!("../../static/css/hangman.css");

/// GET /static/{kind}/{file}
pub async fn serve_static(Path((kind, file)): Path<(String, String)>) -> Result<Response> {
    let (content_type, body) = match (kind.as_str(), file.as_str()) {
        ("js", "hangman.js") => ("application/javascript", HANGMAN_JS),
        ("css", "hangman.css") => ("text/css", HANGMAN_CSS),
        _ => return Err(AppError::NotFound(format!("static/{}/{}", kind, file))),
    };

    Ok(([(header::CONTENT_TYPE, content_type)], body).into_response())
}
