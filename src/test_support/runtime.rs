//! Host-side async test runtime. The crate's futures are `!Send` (they hold
//! `Rc` state), so tests run them on a current-thread runtime inside a
//! `LocalSet`.

use std::future::Future;

pub fn with_local_runtime_async<F, Fut>(test: F)
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = ()>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let local = tokio::task::LocalSet::new();
    local.block_on(&runtime, test());
}
