use contracts::domain::a001_tender_process::TenderId;
use contracts::domain::a002_project_schedule::{ScheduleItem, ScheduleResponse};
use gloo_net::http::Request;

use crate::shared::api_utils::{api_url, path_segment};

async fn fetch_schedule(path: &str, tender_id: &TenderId) -> Result<Vec<ScheduleItem>, String> {
    let url = api_url(&format!("{}/{}", path, path_segment(tender_id.value())));

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP error: {}", response.status()));
    }

    let data: ScheduleResponse = response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?;

    Ok(data.data)
}

/// График с разбивкой по неделям
pub async fn fetch_weekly_schedule(tender_id: &TenderId) -> Result<Vec<ScheduleItem>, String> {
    fetch_schedule("/api/schedule/get-weekly-schedule", tender_id).await
}

/// График с помесячными данными (`schedule_data`)
pub async fn fetch_daily_schedule(tender_id: &TenderId) -> Result<Vec<ScheduleItem>, String> {
    fetch_schedule("/api/schedule/get-daily-schedule", tender_id).await
}
