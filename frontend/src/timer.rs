use chopsticks_web::Pacer;
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use gloo::timers::future::TimeoutFuture;
use std::time::Duration;

// Dropping the future clears the browser timeout
pub struct GlooPacer;

impl Pacer for GlooPacer {
    fn pause(&self, delay: Duration) -> LocalBoxFuture<'static, ()> {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        TimeoutFuture::new(millis).boxed_local()
    }
}
