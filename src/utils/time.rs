use std::time::Duration;

/// Non-blocking sleep on whichever event loop is hosting us: the browser
/// task queue on wasm, tokio's timer on native builds.
pub async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::TimeoutFuture::new(duration.as_millis() as u32).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

pub fn today_utc() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}
