use crate::hooks::page_state::PageStatus;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatusProps {
    pub status: PageStatus,
    pub on_retry: Callback<()>,
}

#[function_component(Status)]
pub fn status(props: &StatusProps) -> Html {
    let retry = {
        let on_retry = props.on_retry.clone();
        Callback::from(move |_: MouseEvent| on_retry.emit(()))
    };

    match &props.status {
        PageStatus::Loading => html! {
            <div class="status loading">
                <div class="spinner"></div>
                <p>{"Loading field data..."}</p>
            </div>
        },
        PageStatus::Refreshing => html! {
            <div class="status refreshing">
                <div class="spinner small"></div>
                <p>{"Refreshing..."}</p>
            </div>
        },
        PageStatus::Ready => html! {},
        PageStatus::Failed(msg) => html! {
            <div class="status error">
                <p>{"❌ Error loading data: "}{msg}</p>
                <button class="retry-button" onclick={retry}>{"Retry"}</button>
            </div>
        },
        PageStatus::Stale(msg) => html! {
            <div class="status warning">
                <p>{"⚠️ Showing previous data. Refresh failed: "}{msg}</p>
                <button class="retry-button" onclick={retry}>{"Retry"}</button>
            </div>
        },
    }
}
