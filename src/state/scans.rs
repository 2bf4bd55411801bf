use std::rc::Rc;
use std::time::Duration;

use crate::api::{ApiClient, ApiError, Scan};
use crate::poll::{PollHandle, PollOutcome, ScanPoller, POLL_INTERVAL};
use crate::utils::{download, time};
use leptos::*;

/// Scan collection owned by the consuming view; updated only through the
/// deltas below.
#[derive(Debug, Clone, Default)]
pub struct ScansState {
    pub scans: Vec<Scan>,
    pub loading: bool,
}

pub fn use_scans() -> (ReadSignal<ScansState>, WriteSignal<ScansState>) {
    create_signal(ScansState::default())
}

pub async fn load_scans(
    api_client: &ApiClient,
    set_scans_state: WriteSignal<ScansState>,
    asset_id: Option<&str>,
) -> Result<(), ApiError> {
    set_scans_state.update(|state| state.loading = true);
    match api_client.scans(asset_id).await {
        Ok(scans) => {
            set_scans_state.update(|state| {
                state.scans = scans;
                state.loading = false;
            });
            Ok(())
        }
        Err(error) => {
            set_scans_state.update(|state| state.loading = false);
            Err(error)
        }
    }
}

/// Launches a scan and prepends the new job to the collection. Polling is
/// the caller's next move, via `watch_scan`.
pub async fn start_scan(
    api_client: &ApiClient,
    set_scans_state: WriteSignal<ScansState>,
    asset_id: &str,
) -> Result<Scan, ApiError> {
    let scan = api_client.start_scan(asset_id).await?;
    let started = scan.clone();
    set_scans_state.update(|state| state.scans.insert(0, started));
    Ok(scan)
}

/// Follows one scan to completion in the background. Each snapshot goes to
/// `on_update`; when the scan reaches a terminal status the collection is
/// reloaded exactly once (scoped by `refresh_scope`). The returned handle
/// cancels the watch.
pub fn watch_scan<F>(
    api_client: Rc<ApiClient>,
    set_scans_state: WriteSignal<ScansState>,
    scan_id: String,
    refresh_scope: Option<String>,
    on_update: F,
) -> PollHandle
where
    F: FnMut(Scan) + 'static,
{
    watch_scan_with_interval(
        api_client,
        set_scans_state,
        scan_id,
        refresh_scope,
        POLL_INTERVAL,
        on_update,
    )
}

pub fn watch_scan_with_interval<F>(
    api_client: Rc<ApiClient>,
    set_scans_state: WriteSignal<ScansState>,
    scan_id: String,
    refresh_scope: Option<String>,
    interval: Duration,
    on_update: F,
) -> PollHandle
where
    F: FnMut(Scan) + 'static,
{
    let poller = ScanPoller::with_interval(Rc::clone(&api_client), interval);
    let handle = poller.handle();
    spawn_local(async move {
        match poller.run(&scan_id, on_update).await {
            Ok(PollOutcome::Terminal(status)) => {
                log::info!("Scan {} finished as {:?}", scan_id, status);
                let _ = load_scans(&api_client, set_scans_state, refresh_scope.as_deref()).await;
            }
            Ok(PollOutcome::Cancelled) => {}
            Err(_) => {
                // Controller fault, already logged by the poller and
                // observable through the handle's state; the scan itself may
                // still be running server-side. No collection refresh.
            }
        }
    });
    handle
}

/// Fetches the server-rendered CSV and hands it to the browser under a
/// deterministic filename. `asset_label` names the file for scoped exports;
/// it falls back to the asset id.
pub async fn export_scans(
    api_client: &ApiClient,
    asset_id: Option<&str>,
    asset_label: Option<&str>,
) -> Result<String, ApiError> {
    let csv = api_client.export_scans(asset_id).await?;
    let filename = download::export_filename(asset_label.or(asset_id), time::today_utc());
    download::trigger_csv_download(&filename, &csv).map_err(ApiError::application)?;
    Ok(filename)
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::ScanStatus;
    use crate::poll::PollState;
    use crate::session::{MemoryStore, SessionManager};
    use crate::test_support::fixtures::scan_json;
    use crate::test_support::runtime::with_local_runtime_async;
    use httpmock::prelude::*;
    use std::cell::RefCell;

    fn hermetic_client(server: &MockServer) -> ApiClient {
        let session = SessionManager::with_store(Rc::new(MemoryStore::default()));
        ApiClient::new_with_session(server.base_url(), session)
    }

    #[test]
    fn start_scan_prepends_the_new_job() {
        with_local_runtime_async(|| async {
            let server = MockServer::start_async().await;
            server.mock(|when, then| {
                when.method(POST)
                    .path("/query")
                    .body_contains("mutation StartScan");
                then.status(200).json_body(serde_json::json!({
                    "data": { "startScan": scan_json("s2", "pending") }
                }));
            });

            let runtime = create_runtime();
            let (state, set_state) = create_signal(ScansState::default());
            set_state.update(|s| {
                s.scans = vec![serde_json::from_value(scan_json("s1", "completed")).unwrap()]
            });
            let api = hermetic_client(&server);

            let scan = start_scan(&api, set_state, "a1").await.unwrap();
            assert_eq!(scan.status, ScanStatus::Pending);

            let snapshot = state.get();
            assert_eq!(snapshot.scans.len(), 2);
            assert_eq!(snapshot.scans[0].id, "s2");
            runtime.dispose();
        });
    }

    #[test]
    fn watch_scan_refreshes_the_collection_once_on_terminal() {
        with_local_runtime_async(|| async {
            let server = MockServer::start_async().await;
            let scan_fetch = server.mock(|when, then| {
                when.method(POST).path("/query").body_contains("query Scan(");
                then.status(200).json_body(serde_json::json!({
                    "data": { "scan": scan_json("s1", "completed") }
                }));
            });
            let listing = server.mock(|when, then| {
                when.method(POST).path("/query").body_contains("query Scans(");
                then.status(200).json_body(serde_json::json!({
                    "data": { "scans": [scan_json("s1", "completed")] }
                }));
            });

            let runtime = create_runtime();
            let (state, set_state) = create_signal(ScansState::default());
            let api = Rc::new(hermetic_client(&server));
            let updates = Rc::new(RefCell::new(Vec::new()));

            let updates_for_watch = Rc::clone(&updates);
            let handle = watch_scan_with_interval(
                Rc::clone(&api),
                set_state,
                "s1".into(),
                None,
                Duration::from_millis(5),
                move |scan| updates_for_watch.borrow_mut().push(scan.status),
            );

            for _ in 0..100 {
                if handle.state() == PollState::Completed && !state.get().scans.is_empty() {
                    break;
                }
                tokio::time::sleep(Duration::from_millis(10)).await;
            }

            assert_eq!(handle.state(), PollState::Completed);
            assert_eq!(*updates.borrow(), vec![ScanStatus::Completed]);
            assert_eq!(scan_fetch.hits(), 1);
            assert_eq!(listing.hits(), 1);
            assert_eq!(state.get().scans.len(), 1);
            runtime.dispose();
        });
    }

    #[test]
    fn fetch_failure_faults_the_watch_without_refreshing() {
        with_local_runtime_async(|| async {
            let server = MockServer::start_async().await;
            server.mock(|when, then| {
                when.method(POST).path("/query").body_contains("query Scan(");
                then.status(200).json_body(serde_json::json!({
                    "data": null,
                    "errors": [{ "message": "scan lookup failed" }]
                }));
            });
            let listing = server.mock(|when, then| {
                when.method(POST).path("/query").body_contains("query Scans(");
                then.status(200)
                    .json_body(serde_json::json!({ "data": { "scans": [] } }));
            });

            let runtime = create_runtime();
            let (state, set_state) = create_signal(ScansState::default());
            let api = Rc::new(hermetic_client(&server));

            let handle = watch_scan_with_interval(
                Rc::clone(&api),
                set_state,
                "s1".into(),
                None,
                Duration::from_millis(5),
                |_| panic!("no snapshot expected before the fault"),
            );

            for _ in 0..100 {
                if handle.state() == PollState::Faulted {
                    break;
                }
                tokio::time::sleep(Duration::from_millis(10)).await;
            }

            assert_eq!(handle.state(), PollState::Faulted);
            assert_eq!(listing.hits(), 0);
            assert!(state.get().scans.is_empty());
            runtime.dispose();
        });
    }

    #[test]
    fn cancelled_watch_stops_quietly() {
        with_local_runtime_async(|| async {
            let server = MockServer::start_async().await;
            let scan_fetch = server.mock(|when, then| {
                when.method(POST).path("/query").body_contains("query Scan(");
                then.status(200).json_body(serde_json::json!({
                    "data": { "scan": scan_json("s1", "running") }
                }));
            });

            let runtime = create_runtime();
            let (state, set_state) = create_signal(ScansState::default());
            let api = Rc::new(hermetic_client(&server));

            let handle = watch_scan_with_interval(
                Rc::clone(&api),
                set_state,
                "s1".into(),
                None,
                Duration::from_millis(5),
                |_| {},
            );

            tokio::time::sleep(Duration::from_millis(30)).await;
            handle.cancel();
            let hits_at_cancel = scan_fetch.hits();
            assert_eq!(handle.state(), PollState::Cancelled);

            // No further fetches occur after cancellation settles.
            tokio::time::sleep(Duration::from_millis(50)).await;
            assert!(scan_fetch.hits() <= hits_at_cancel + 1);
            assert!(state.get().scans.is_empty());
            runtime.dispose();
        });
    }
}
