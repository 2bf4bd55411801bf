use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use crate::utils::storage as storage_utils;

/// localStorage key the credential lives under. Only the session manager
/// reads or writes it.
pub const CREDENTIAL_STORAGE_KEY: &str = "auth_token";

/// Persistence seam for the one bearer credential. The browser store backs
/// it with localStorage; tests inject an in-memory store so they stay
/// hermetic.
pub trait CredentialStore {
    fn read(&self) -> Option<String>;
    fn write(&self, token: &str);
    fn clear(&self);
}

#[cfg(target_arch = "wasm32")]
pub struct BrowserStore;

#[cfg(target_arch = "wasm32")]
impl CredentialStore for BrowserStore {
    fn read(&self) -> Option<String> {
        let storage = storage_utils::local_storage().ok()?;
        storage.get_item(CREDENTIAL_STORAGE_KEY).ok().flatten()
    }

    fn write(&self, token: &str) {
        if let Ok(storage) = storage_utils::local_storage() {
            if storage.set_item(CREDENTIAL_STORAGE_KEY, token).is_err() {
                log::warn!("Failed to persist credential");
            }
        }
    }

    fn clear(&self) {
        if let Ok(storage) = storage_utils::local_storage() {
            let _ = storage.remove_item(CREDENTIAL_STORAGE_KEY);
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    token: RefCell<Option<String>>,
}

impl CredentialStore for MemoryStore {
    fn read(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn write(&self, token: &str) {
        *self.token.borrow_mut() = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.borrow_mut() = None;
    }
}

/// Sole owner of the current session credential. Validity is judged locally
/// from the token's embedded `exp` claim; no network I/O happens here.
#[derive(Clone)]
pub struct SessionManager {
    store: Rc<dyn CredentialStore>,
}

impl SessionManager {
    pub fn new() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            Self::with_store(Rc::new(BrowserStore))
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Self::with_store(Rc::new(MemoryStore::default()))
        }
    }

    pub fn with_store(store: Rc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Stores the credential verbatim; no eager validation.
    pub fn set_credential(&self, token: &str) {
        self.store.write(token);
    }

    pub fn credential(&self) -> Option<String> {
        self.store.read()
    }

    /// Idempotent.
    pub fn clear_credential(&self) {
        self.store.clear();
    }

    /// True only when a credential is stored, its payload decodes, and its
    /// expiry lies strictly in the future. Decode failures degrade to false.
    pub fn is_valid(&self) -> bool {
        let Some(token) = self.store.read() else {
            return false;
        };
        match decode_exp(&token) {
            Some(exp) => exp > now_secs(),
            None => false,
        }
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_exp(token: &str) -> Option<f64> {
    let mut parts = token.split('.');
    parts.next()?;
    let payload = parts.next()?;
    let decoded = URL_SAFE_NO_PAD.decode(payload).ok()?;
    let value: Value = serde_json::from_slice(&decoded).ok()?;
    value.get("exp").and_then(|v| v.as_f64())
}

fn now_secs() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}
