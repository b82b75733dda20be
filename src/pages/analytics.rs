use yew::prelude::*;

use crate::components::{Alerts, AnalyticsMetrics, Chart, ChartSpec, Status};
use crate::hooks::use_analytics::use_analytics_page;
use crate::services::api::ApiHandle;

#[derive(Properties, PartialEq)]
pub struct AnalyticsPageProps {
    pub api: ApiHandle,
}

#[function_component(AnalyticsPage)]
pub fn analytics_page(props: &AnalyticsPageProps) -> Html {
    let page = use_analytics_page(props.api.clone());

    let on_refresh = {
        let refresh = page.refresh.clone();
        Callback::from(move |_: MouseEvent| refresh.emit(()))
    };

    html! {
        <>
            <section class="status-section">
                <div class="section-header">
                    <h2>{"Field Analytics"}</h2>
                    <button
                        class="refresh-button"
                        onclick={on_refresh}
                        disabled={page.state.is_loading()}
                    >
                        {"Refresh"}
                    </button>
                </div>
                <Status status={page.state.status()} on_retry={page.refresh.clone()} />
            </section>

            if let Some(data) = page.state.data() {
                <section class="data-section">
                    <AnalyticsMetrics summary={data.summary()} />
                </section>

                <section class="chart-section">
                    <Chart spec={ChartSpec::moisture_temperature(data.trend_window())} />
                </section>

                <section class="chart-section">
                    <Chart spec={ChartSpec::nutrient_trends(data.trend_window())} />
                </section>

                <section class="chart-section">
                    if let Some(forecast) = &data.forecast {
                        <Chart spec={ChartSpec::forecast(forecast)} />
                    } else {
                        <div class="chart-container empty">
                            <p>{"Weather forecast unavailable"}</p>
                        </div>
                    }
                </section>

                <section class="data-section">
                    <h2>{"Active Alerts"}</h2>
                    <Alerts alerts={data.recommendations.alerts.clone()} />
                </section>
            }
        </>
    }
}
