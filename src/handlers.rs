use crate::countdown::{countdown, format_clock_12_hour};
use crate::errors::AppError;
use crate::models::{DarkModeRequest, DarkModeResponse, Prayer, PrayerTimesResponse};
use crate::preferences::{DarkMode, DarkModePreference};
use crate::state::AppState;
use crate::ui::{render_index, PageModel};
use crate::view::ViewRouter;
use axum::{extract::State, http::Uri, response::Html, Json};
use std::collections::BTreeMap;

pub const BASE_PATH: &str = "/";

pub async fn index(State(state): State<AppState>, uri: Uri) -> Html<String> {
    let mut page = PageModel::new(uri);
    DarkMode::new(state.store.clone()).init(&mut page);

    let mut router = ViewRouter::new(page, BASE_PATH);
    router.setup_navigation();
    router.initialize_view();

    Html(render_index(router.surface()))
}

pub async fn get_prayer_times(State(state): State<AppState>) -> Json<PrayerTimesResponse> {
    let resolved = state.prayers.fetch_prayer_times().await;

    let display: BTreeMap<Prayer, String> = resolved
        .times
        .iter()
        .map(|(prayer, time)| (prayer, format_clock_12_hour(time)))
        .collect();

    Json(PrayerTimesResponse {
        countdown: countdown(&resolved.times),
        date: resolved.date,
        tier: resolved.tier,
        times: resolved.times,
        display,
    })
}

pub async fn get_dark_mode(State(state): State<AppState>) -> Json<DarkModeResponse> {
    let preference = DarkMode::new(state.store.clone()).load();
    Json(DarkModeResponse {
        enabled: preference.is_enabled(),
    })
}

pub async fn set_dark_mode(
    State(state): State<AppState>,
    Json(payload): Json<DarkModeRequest>,
) -> Result<Json<DarkModeResponse>, AppError> {
    let preference = DarkModePreference::from(payload.enabled);
    DarkMode::new(state.store.clone()).save(preference).await?;

    Ok(Json(DarkModeResponse {
        enabled: preference.is_enabled(),
    }))
}
