use crate::models::field::Recommendation;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct RecommendationsProps {
    pub recommendation: Recommendation,
}

#[function_component(Recommendations)]
pub fn recommendations(props: &RecommendationsProps) -> Html {
    let rec = &props.recommendation;

    html! {
        <div class="recommendations">
            <div class="recommendation-card">
                <h3>{"Irrigation"}</h3>
                <p class={classes!("summary-value", rec.irrigation.css_class())}>
                    {rec.irrigation.label()}
                </p>
                <p class="summary-note">{rec.irrigation.advice()}</p>
            </div>
            <div class="recommendation-card">
                <h3>{"Fertilizer"}</h3>
                <p class={classes!("summary-value", rec.fertilizer.css_class())}>
                    {rec.fertilizer.label()}
                </p>
                <p class="summary-note">{rec.fertilizer.advice()}</p>
            </div>
            <div class="recommendation-card">
                <h3>{"Pest Risk"}</h3>
                <p class={classes!("summary-value", rec.pest_risk.css_class())}>
                    {rec.pest_risk.label()}
                </p>
                <p class="summary-note">{rec.pest_risk.advice()}</p>
            </div>
            <p class="confidence">
                {format!("AI confidence: {}%", rec.confidence_percent())}
            </p>
        </div>
    }
}
