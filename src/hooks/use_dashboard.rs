use std::time::Duration;
use yew::prelude::*;

use crate::config::Config;
use crate::hooks::use_page::{PageHandle, use_page_state};
use crate::models::analytics::DashboardData;
use crate::services::api::ApiHandle;
use crate::services::pages::load_dashboard;

/// Dashboard data, reloaded every polling interval while mounted.
#[hook]
pub fn use_dashboard_page(api: ApiHandle) -> PageHandle<DashboardData> {
    let poll_interval = Config::ENABLE_AUTO_REFRESH
        .then(|| Duration::from_millis(Config::POLLING_INTERVAL_MS.into()));

    use_page_state(
        move || {
            let api = api.clone();
            async move { load_dashboard(&*api).await }
        },
        poll_interval,
    )
}
