use gloo_timers::future::TimeoutFuture;
use std::future::Future;
use std::time::Duration;

/// Source of delays for request deadlines and polling.
pub trait Timer {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}

/// `setTimeout`-backed timer for the browser event loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrowserTimer;

impl Timer for BrowserTimer {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        TimeoutFuture::new(millis)
    }
}
