use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    response::Html,
};

use super::render::render_page;
use super::state::AppState;
use crate::core::{FormInput, Outcome, SeriesQuery, SeriesSource};
use crate::utils::error::ErrorCategory;

/// 表單內容的大小上限，超過時改為在頁面上顯示錯誤
pub const MAX_FORM_BYTES: usize = 64 * 1024;

pub const BODY_TOO_LARGE_MESSAGE: &str = "Submitted form is too large (limit 64 KiB).";

/// GET /
pub async fn show_form(State(state): State<AppState>) -> Html<String> {
    let form = FormInput::with_defaults(&state.default_registration_key);
    Html(render_page(&form, &Outcome::AwaitingInput))
}

/// POST /，任何情況都回傳完整的 HTML 頁面
pub async fn submit_form(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Html<String> {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            tracing::warn!("❌ Could not read form body: {}", rejection.body_text());
            let outcome = Outcome::ValidationFailure(BODY_TOO_LARGE_MESSAGE.to_string());
            return Html(render_page(&FormInput::default(), &outcome));
        }
    };

    let form = FormInput::from_urlencoded(&body);
    let outcome = process_submission(state.source.as_ref(), &form).await;
    Html(render_page(&form, &outcome))
}

/// 驗證表單，通過後才呼叫資料來源
pub async fn process_submission(source: &dyn SeriesSource, form: &FormInput) -> Outcome {
    let query = match SeriesQuery::from_form(form) {
        Ok(query) => query,
        Err(e) => {
            tracing::info!("Rejected submission: {}", e);
            return Outcome::ValidationFailure(e.to_string());
        }
    };

    match source.fetch(&query).await {
        Ok(series) => Outcome::Success(series),
        Err(e) if e.category() == ErrorCategory::Validation => {
            Outcome::ValidationFailure(e.to_string())
        }
        Err(e) => {
            tracing::warn!(
                "❌ Fetch failed for {} series: {} (Category: {:?})",
                query.series_ids.len(),
                e,
                e.category()
            );
            Outcome::RemoteFailure(e.to_string())
        }
    }
}
