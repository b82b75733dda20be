use chrono::{DateTime, Local, TimeZone, Utc};
use futures::future::{join, try_join};

use crate::config::Config;
use crate::models::{
    analytics::{AnalyticsData, DashboardData},
    error::AppError,
};
use crate::services::api::{Days, FieldClient};
use crate::services::timer::Timer;
use crate::services::transport::Transport;

/// Dashboard page join: snapshot and history, both required.
pub async fn load_dashboard<T: Transport, Tm: Timer>(
    client: &FieldClient<T, Tm>,
) -> Result<DashboardData, AppError> {
    let days = Days::new(Config::HISTORICAL_DAYS_DEFAULT.into());
    let (snapshot, historical) =
        try_join(client.get_dashboard(), client.get_historical(Some(days))).await?;

    Ok(DashboardData {
        snapshot,
        historical,
    })
}

/// Analytics page join in the browser's time zone.
pub async fn load_analytics<T: Transport, Tm: Timer>(
    client: &FieldClient<T, Tm>,
) -> Result<AnalyticsData, AppError> {
    load_analytics_in(client, &Local).await
}

/// Analytics page join. History and recommendations are required; the
/// forecast is optional and becomes `None` on failure.
pub async fn load_analytics_in<T: Transport, Tm: Timer, Tz: TimeZone>(
    client: &FieldClient<T, Tm>,
    tz: &Tz,
) -> Result<AnalyticsData, AppError> {
    let days = Days::new(Config::HISTORICAL_DAYS_DEFAULT.into());
    let required = try_join(
        client.get_historical(Some(days)),
        client.get_recommendations(),
    );

    let (required, forecast) = join(required, client.get_weather_forecast()).await;
    let (historical, recommendations) = required?;

    Ok(AnalyticsData::new(
        historical,
        recommendations,
        forecast.ok(),
        tz,
    ))
}

/// Footer timestamp. Optional: a failure has already been reported by the
/// client and simply renders as unavailable.
pub async fn load_last_updated<T: Transport, Tm: Timer>(
    client: &FieldClient<T, Tm>,
) -> Option<DateTime<Utc>> {
    client
        .get_dashboard()
        .await
        .ok()
        .map(|snapshot| snapshot.last_updated)
}
