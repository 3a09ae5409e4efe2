//! Turns a `(vin, api)` pair into the reply the mock should give.

use std::sync::Arc;

use vlog_mock_core::{Code, ConfigKey, Failure, Outcome};

use crate::registry::{OutcomeRegistry, KeyState};

/// Message reported when no outcome is configured for a key.
pub const CONFIGURATION_MISSING: &str = "Configuration missing";

/// Resolves calls against the shared [`OutcomeRegistry`].
///
/// Missing configuration, whether for the key or for the whole registry,
/// resolves to an `InvalidArgument` failure so the client knows to call
/// `SetMockConfig` first.
#[derive(Clone, Debug)]
pub struct OutcomeResolver {
    registry: Arc<OutcomeRegistry>,
}

impl OutcomeResolver {
    pub fn new(registry: Arc<OutcomeRegistry>) -> Self {
        Self { registry }
    }

    pub fn resolve(&self, vin: &str, api: &str) -> Result<(), Failure> {
        let key = ConfigKey::new(vin, api);

        match self.registry.key_state(&key) {
            KeyState::Empty => {
                tracing::debug!(%key, "no configuration registered");
                Err(Failure::invalid_argument(CONFIGURATION_MISSING))
            }
            KeyState::Missing => {
                tracing::debug!(%key, "no configuration for key");
                Err(Failure::invalid_argument(CONFIGURATION_MISSING))
            }
            KeyState::Found(Outcome::Success) => {
                tracing::debug!(%key, "configured success");
                Ok(())
            }
            KeyState::Found(Outcome::Failure(failure)) => {
                let code = failure.code();
                tracing::debug!(%key, code = %code, "configured failure");
                Err(Failure::new(
                    code,
                    configured_failure_message(&key, code, failure.message()),
                ))
            }
        }
    }
}

fn configured_failure_message(key: &ConfigKey, code: Code, extra: &str) -> String {
    let mut message = format!(
        "API: {}, VIN: {}, Error Code: {}",
        key.api(),
        key.vin(),
        code.as_i32()
    );
    if !extra.is_empty() {
        message.push_str(", Message: ");
        message.push_str(extra);
    }
    message
}
