use chrono::Local;
use yew::prelude::*;

use field_dashboard::config::Config;
use field_dashboard::hooks::use_last_updated::use_last_updated;
use field_dashboard::pages::{AnalyticsPage, DashboardPage};
use field_dashboard::services::api::{ApiConfig, ApiHandle, FieldClient};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Dashboard,
    Analytics,
}

impl Page {
    const ALL: [Self; 2] = [Self::Dashboard, Self::Analytics];

    fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Analytics => "Analytics",
        }
    }
}

#[derive(Properties, PartialEq)]
struct AppProps {
    api: ApiHandle,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let page = use_state(|| Page::Dashboard);
    let last_updated = use_last_updated(props.api.clone());

    let nav = Page::ALL.iter().map(|&target| {
        let page = page.clone();
        let active = *page == target;
        let onclick = Callback::from(move |_: MouseEvent| page.set(target));
        html! {
            <button class={classes!("nav-tab", active.then_some("active"))} {onclick}>
                {target.label()}
            </button>
        }
    });

    let last_updated = last_updated.map_or_else(
        || "N/A".to_string(),
        |ts| ts.with_timezone(&Local).format("%b %-d, %Y %H:%M").to_string(),
    );

    html! {
        <div class="app-container">
            <header class="app-header">
                <h1>{"Smart Field Dashboard"}</h1>
                <nav class="app-nav">{ for nav }</nav>
            </header>

            <main class="app-main">
                {
                    match *page {
                        Page::Dashboard => html! { <DashboardPage api={props.api.clone()} /> },
                        Page::Analytics => html! { <AnalyticsPage api={props.api.clone()} /> },
                    }
                }
            </main>

            <footer class="app-footer">
                <p>{"Last updated: "}{last_updated}</p>
            </footer>

            <style>
                {include_str!("style.css")}
            </style>
        </div>
    }
}

fn main() {
    let hostname = web_sys::window().and_then(|window| window.location().hostname().ok());
    let config = ApiConfig::resolve(option_env!("FIELD_API_URL"), hostname.as_deref());

    if config.base_url().is_none() {
        gloo::console::warn!(&format!(
            "{} is not set; requests will fail until the dashboard is rebuilt with it.",
            Config::API_URL_ENV
        ));
    }

    match FieldClient::new(config) {
        Ok(client) => {
            let props = AppProps {
                api: ApiHandle::new(client),
            };
            yew::Renderer::<App>::with_props(props).render();
        }
        Err(e) => gloo::console::error!(&format!("Failed to start dashboard: {e}")),
    }
}
