use chrono::{DateTime, Utc};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiHandle;
use crate::services::pages::load_last_updated;

/// Snapshot timestamp for the footer; `None` until loaded or on failure.
#[hook]
pub fn use_last_updated(api: ApiHandle) -> Option<DateTime<Utc>> {
    let state = use_state(|| None);

    {
        let state = state.clone();
        use_effect_with(api, move |api| {
            let api = api.clone();
            let aborted = Rc::new(Cell::new(false));
            let aborted_check = aborted.clone();

            spawn_local(async move {
                let last_updated = load_last_updated(&*api).await;
                if !aborted_check.get() {
                    state.set(last_updated);
                }
            });

            move || aborted.set(true)
        });
    }

    *state
}
