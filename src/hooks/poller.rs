use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use wasm_bindgen_futures::spawn_local;

use crate::services::timer::Timer;

/// Shared abort flag checked by spawned tasks after every await.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Fixed-interval ticker. Dropping it stops the ticks.
///
/// Ticks are strictly periodic: the next sleep starts right after `tick`
/// returns, so a slow refresh spawned by `tick` never delays the schedule.
#[derive(Debug)]
pub struct Poller {
    token: CancelToken,
}

impl Poller {
    /// Builds the polling loop without starting it.
    pub fn task<Tm, F>(timer: Tm, interval: Duration, mut tick: F) -> (Self, impl Future<Output = ()>)
    where
        Tm: Timer + 'static,
        F: FnMut() + 'static,
    {
        let token = CancelToken::default();
        let aborted = token.clone();

        let task = async move {
            loop {
                timer.sleep(interval).await;
                if aborted.is_cancelled() {
                    break;
                }
                tick();
            }
        };

        (Self { token }, task)
    }

    /// Starts polling on the browser event loop.
    pub fn spawn<Tm, F>(timer: Tm, interval: Duration, tick: F) -> Self
    where
        Tm: Timer + 'static,
        F: FnMut() + 'static,
    {
        let (poller, task) = Self::task(timer, interval, tick);
        spawn_local(task);
        poller
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.cancel();
    }
}
