use crate::models::field::{DashboardSnapshot, NutrientReading};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct FieldSummaryProps {
    pub snapshot: DashboardSnapshot,
}

/// Current readings as a grid of cards.
#[function_component(FieldSummary)]
pub fn field_summary(props: &FieldSummaryProps) -> Html {
    let snapshot = &props.snapshot;
    let weather = &snapshot.current_weather;
    let moisture_status = snapshot.moisture_status();

    html! {
        <div class="data-summary">
            <div class="summary-grid">
                <div class="summary-item">
                    <h3>{"Soil Moisture"}</h3>
                    <p class="summary-value">{format!("{:.1}%", snapshot.current_soil_moisture)}</p>
                    <p class={classes!("summary-note", moisture_status.css_class())}>
                        {moisture_status.label()}
                    </p>
                </div>
                <div class="summary-item">
                    <h3>{"Temperature"}</h3>
                    <p class="summary-value">{format!("{:.1}°C", weather.temperature)}</p>
                </div>
                <div class="summary-item">
                    <h3>{"Humidity"}</h3>
                    <p class="summary-value">{format!("{:.0}%", weather.humidity)}</p>
                </div>
                <div class="summary-item">
                    <h3>{"Rainfall"}</h3>
                    <p class="summary-value">{format!("{:.1} mm", weather.rainfall)}</p>
                </div>
                <div class="summary-item">
                    <h3>{"Yield Forecast"}</h3>
                    <p class="summary-value">{format!("{:.1} t/ha", snapshot.yield_forecast)}</p>
                </div>
            </div>
            <NutrientLevels readings={snapshot.current_nutrients.readings().to_vec()} />
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct NutrientLevelsProps {
    pub readings: Vec<NutrientReading>,
}

#[function_component(NutrientLevels)]
pub fn nutrient_levels(props: &NutrientLevelsProps) -> Html {
    html! {
        <div class="nutrient-levels">
            <h3>{"Soil Nutrients"}</h3>
            { for props.readings.iter().map(|reading| {
                let level = if reading.is_low() { "level-bad" } else { "level-good" };
                html! {
                    <div class="nutrient-row">
                        <span class="nutrient-label">{reading.nutrient.label()}</span>
                        <div class="nutrient-bar">
                            <div
                                class={classes!("nutrient-fill", level)}
                                style={format!("width: {:.0}%", reading.fill_percent())}
                            />
                        </div>
                        <span class="nutrient-value">{format!("{:.1} ppm", reading.value)}</span>
                    </div>
                }
            }) }
        </div>
    }
}
