use yew::prelude::*;

use crate::hooks::use_page::{PageHandle, use_page_state};
use crate::models::analytics::AnalyticsData;
use crate::services::api::ApiHandle;
use crate::services::pages::load_analytics;

/// Analytics data. Loaded once; refreshed only through the handle.
#[hook]
pub fn use_analytics_page(api: ApiHandle) -> PageHandle<AnalyticsData> {
    use_page_state(
        move || {
            let api = api.clone();
            async move { load_analytics(&*api).await }
        },
        None,
    )
}
