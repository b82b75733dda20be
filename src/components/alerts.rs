use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AlertsProps {
    pub alerts: Vec<String>,
}

#[function_component(Alerts)]
pub fn alerts(props: &AlertsProps) -> Html {
    if props.alerts.is_empty() {
        return html! {
            <div class="alerts empty">
                <p>{"No active alerts"}</p>
            </div>
        };
    }

    html! {
        <ul class="alerts">
            { for props.alerts.iter().map(|alert| html! {
                <li class="alert-item">{"⚠️ "}{alert}</li>
            }) }
        </ul>
    }
}
