//! Shared fixtures for the test suites. JSON fixtures mirror the wire shapes
//! the server produces (camelCase keys, RFC 3339 timestamps).

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use serde_json::{json, Value};

use crate::api::{Scan, ScanResult, ScanStatus};

/// An unsigned JWT whose `exp` claim sits `delta_secs` away from now.
/// Signature verification is the server's job, so a junk signature is fine.
pub fn token_with_exp(delta_secs: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(
        json!({
            "sub": "u1",
            "exp": Utc::now().timestamp() + delta_secs,
        })
        .to_string(),
    );
    format!("{}.{}.sig", header, payload)
}

pub fn user_json(id: &str) -> Value {
    json!({
        "id": id,
        "email": format!("{}@example.com", id),
        "role": "user",
        "createdAt": "2026-01-10T09:00:00Z",
    })
}

pub fn asset_json(id: &str, name: &str, target: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "target": target,
        "assetType": "server",
        "createdAt": "2026-01-10T09:00:00Z",
        "lastScannedAt": null,
    })
}

pub fn scan_json(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "status": status,
        "startedAt": "2026-01-12T10:00:00Z",
        "completedAt": if status == "completed" || status == "failed" {
            json!("2026-01-12T10:00:42Z")
        } else {
            Value::Null
        },
        "errorMessage": if status == "failed" {
            json!("scan timed out")
        } else {
            Value::Null
        },
        "asset": { "id": "a1", "name": "web", "target": "example.com" },
        "results": if status == "completed" {
            json!([{
                "id": "r1",
                "port": 22,
                "protocol": "tcp",
                "state": "open",
                "service": "ssh",
            }])
        } else {
            json!([])
        },
    })
}

pub fn sample_scan(id: &str, status: ScanStatus) -> Scan {
    let terminal = status.is_terminal();
    Scan {
        id: id.to_string(),
        status,
        started_at: "2026-01-12T10:00:00Z".parse().unwrap(),
        completed_at: terminal.then(|| "2026-01-12T10:00:42Z".parse().unwrap()),
        error_message: (status == ScanStatus::Failed).then(|| "scan timed out".to_string()),
        asset: None,
        results: if status == ScanStatus::Completed {
            vec![ScanResult {
                id: "r1".to_string(),
                port: 22,
                protocol: "tcp".to_string(),
                state: crate::api::PortState::Open,
                service: Some("ssh".to_string()),
                version: None,
                banner: None,
            }]
        } else {
            Vec::new()
        },
    }
}
