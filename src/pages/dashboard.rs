use yew::prelude::*;

use crate::components::{Alerts, Chart, ChartSpec, FieldSummary, Recommendations, Status};
use crate::hooks::use_dashboard::use_dashboard_page;
use crate::services::api::ApiHandle;

#[derive(Properties, PartialEq)]
pub struct DashboardPageProps {
    pub api: ApiHandle,
}

#[function_component(DashboardPage)]
pub fn dashboard_page(props: &DashboardPageProps) -> Html {
    let page = use_dashboard_page(props.api.clone());

    html! {
        <>
            <section class="status-section">
                <Status status={page.state.status()} on_retry={page.refresh.clone()} />
            </section>

            if let Some(data) = page.state.data() {
                <section class="data-section">
                    <h2>{"Field Overview"}</h2>
                    <FieldSummary snapshot={data.snapshot.clone()} />
                </section>

                <section class="data-section">
                    <h2>{"AI Recommendations"}</h2>
                    <Recommendations recommendation={data.snapshot.recommendations.clone()} />
                    if data.snapshot.recommendations.has_alerts() {
                        <Alerts alerts={data.snapshot.recommendations.alerts.clone()} />
                    }
                </section>

                <section class="chart-section">
                    <Chart spec={ChartSpec::moisture_history(&data.historical.sensor_data)} />
                </section>

                <section class="chart-section">
                    <Chart spec={ChartSpec::yield_history(&data.historical.yield_history)} />
                </section>
            }
        </>
    }
}
