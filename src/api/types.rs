use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterInput {
    pub email: String,
    pub password: String,
}

/// Result of `login` / `register`: the bearer token plus its subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthPayload {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum AssetType {
    Server,
    Workstation,
    NetworkDevice,
    IotDevice,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub target: String,
    pub asset_type: AssetType,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_scanned_at: Option<DateTime<Utc>>,
    /// Ordered scan history; the `assets` listing returns summaries without
    /// results, `asset(id)` returns them in full.
    #[serde(default)]
    pub scans: Vec<Scan>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssetInput {
    pub name: String,
    pub target: String,
    pub asset_type: AssetType,
}

/// Scan status. The only legal transitions move rightward:
/// pending -> running -> completed | failed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl ScanStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, ScanStatus::Completed | ScanStatus::Failed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scan {
    pub id: String,
    pub status: ScanStatus,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub error_message: Option<String>,
    /// Owning asset; nested scan summaries inside `Asset` omit it.
    #[serde(default)]
    pub asset: Option<AssetRef>,
    #[serde(default)]
    pub results: Vec<ScanResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRef {
    pub id: String,
    pub name: String,
    pub target: String,
    #[serde(default)]
    pub asset_type: Option<AssetType>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PortState {
    Open,
    Closed,
    Filtered,
    Unfiltered,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    pub id: String,
    pub port: u16,
    pub protocol: String,
    pub state: PortState,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub banner: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
}

/// Error array entry inside the GraphQL response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlErrorEntry {
    pub message: String,
    #[serde(default)]
    pub path: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// No response reached the client.
    NetworkFailure,
    /// The per-call deadline elapsed before a response arrived.
    RequestTimeout,
    /// The server rejected the credential (HTTP 401).
    Unauthenticated,
    /// Transport succeeded but the response carried domain-level errors.
    ApplicationError,
    /// Input failed local grammar checks; no request was sent.
    ValidationError,
    /// A poll fetch failed outside of a legitimate scan-failed outcome.
    ControllerFault,
}

/// Single normalized failure shape for everything past the call boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub error: String,
    pub code: ErrorCode,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.error
    }
}

impl ApiError {
    pub fn network(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: ErrorCode::NetworkFailure,
        }
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: ErrorCode::RequestTimeout,
        }
    }

    pub fn unauthenticated(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: ErrorCode::Unauthenticated,
        }
    }

    pub fn application(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: ErrorCode::ApplicationError,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: ErrorCode::ValidationError,
        }
    }

    pub fn controller_fault(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: ErrorCode::ControllerFault,
        }
    }
}
