use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::hooks::page_state::{FetchState, PageController, RefreshOutcome};
use crate::hooks::poller::{CancelToken, Poller};
use crate::models::error::AppError;
use crate::services::timer::BrowserTimer;

/// Handle returned by page hooks
#[derive(Clone, PartialEq)]
pub struct PageHandle<T> {
    pub state: FetchState<T>,
    pub refresh: Callback<()>,
}

/// Loads a page's data on mount and, with `poll_interval`, on a fixed period.
///
/// `load` is captured on first render. Refreshes that arrive while a join is
/// outstanding are dropped, and nothing is written back once the component
/// unmounts.
#[hook]
pub fn use_page_state<T, F, Fut>(load: F, poll_interval: Option<Duration>) -> PageHandle<T>
where
    T: 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<T, AppError>> + 'static,
{
    let state = use_state(FetchState::<T>::default);
    let unmounted = use_memo((), |_| CancelToken::default());

    let controller = {
        let setter = state.setter();
        let unmounted = Rc::clone(&unmounted);
        use_memo((), move |_| {
            PageController::new(move |next: &FetchState<T>| {
                if !unmounted.is_cancelled() {
                    setter.set(next.clone());
                }
            })
        })
    };
    let load = use_memo((), move |_| load);

    let refresh = {
        let controller = Rc::clone(&controller);
        let load = Rc::clone(&load);
        Callback::from(move |()| spawn_refresh(Rc::clone(&controller), Rc::clone(&load)))
    };

    {
        let controller = Rc::clone(&controller);
        let load = Rc::clone(&load);
        use_effect_with((), move |_| {
            spawn_refresh(Rc::clone(&controller), Rc::clone(&load));

            let poller = poll_interval.map(|interval| {
                Poller::spawn(BrowserTimer, interval, move || {
                    spawn_refresh(Rc::clone(&controller), Rc::clone(&load));
                })
            });

            move || {
                unmounted.cancel();
                drop(poller);
            }
        });
    }

    PageHandle {
        state: (*state).clone(),
        refresh,
    }
}

fn spawn_refresh<T, F, Fut>(controller: Rc<PageController<T>>, load: Rc<F>)
where
    T: 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<T, AppError>> + 'static,
{
    spawn_local(async move {
        if controller.refresh(|| load()).await == RefreshOutcome::Skipped {
            gloo::console::debug!("Refresh skipped: previous request still pending");
        }
    });
}
