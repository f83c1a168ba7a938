//! Backend construction from model identifiers

use tracing::{info, warn};

use super::extractive::EXTRACTIVE_NAME;
use super::orchestrator::BackendSlot;
use super::t5::{ModelFiles, T5Backend};
use super::ExtractiveBackend;

/// Identifier of the built-in rule-based backend
pub const EXTRACTIVE_MODEL_ID: &str = EXTRACTIVE_NAME;

/// Whether `model` names the built-in backend
pub fn is_builtin(model: &str) -> bool {
    model.eq_ignore_ascii_case(EXTRACTIVE_MODEL_ID)
}

/// Whether the backend for `model` can be loaded without downloading
pub fn is_installed(model: &str) -> bool {
    is_builtin(model) || ModelFiles::installed(model)
}

/// Initialize the backend for `model`
///
/// Never fails: a model that cannot be loaded becomes an unavailable slot
/// carrying the reason.
pub fn load_backend(model: &str) -> BackendSlot {
    if is_builtin(model) {
        return BackendSlot::ready(ExtractiveBackend::new());
    }

    match T5Backend::load(model) {
        Ok(backend) => {
            info!(model, "Backend ready");
            BackendSlot::ready(backend)
        }
        Err(e) => {
            warn!(model, error = %format!("{:#}", e), "Backend unavailable");
            BackendSlot::unavailable(model, format!("{:#}", e))
        }
    }
}
