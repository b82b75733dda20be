use crate::models::analytics::AnalyticsSummary;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AnalyticsMetricsProps {
    pub summary: AnalyticsSummary,
}

/// Key metrics row at the top of the analytics page.
#[function_component(AnalyticsMetrics)]
pub fn analytics_metrics(props: &AnalyticsMetricsProps) -> Html {
    let summary = &props.summary;

    html! {
        <div class="summary-grid">
            <div class="summary-item">
                <h3>{"Avg Soil Moisture"}</h3>
                <p class="summary-value">{format!("{:.1}%", summary.avg_moisture)}</p>
            </div>
            <div class="summary-item">
                <h3>{"Avg Temperature"}</h3>
                <p class="summary-value">{format!("{:.1}°C", summary.avg_temperature)}</p>
            </div>
            <div class="summary-item">
                <h3>{"Data Points"}</h3>
                <p class="summary-value">{summary.data_points.to_string()}</p>
            </div>
            <div class="summary-item">
                <h3>{"AI Confidence"}</h3>
                <p class="summary-value">{format!("{}%", summary.confidence_percent)}</p>
            </div>
        </div>
    }
}
