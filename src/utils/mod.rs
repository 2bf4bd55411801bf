pub mod download;
#[cfg(target_arch = "wasm32")]
pub mod storage;
pub mod time;
pub mod validate;
