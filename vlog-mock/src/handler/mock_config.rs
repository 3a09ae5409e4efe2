//! Validation of `SetMockConfig` batches.

use vlog_mock_core::{CodeSpec, ConfigKey, Failure, Outcome};

use crate::proto::MockConfig;

/// Message reported for an empty batch.
pub const CONFIGURATIONS_MISSING: &str = "Configurations missing";

/// Parse every entry of a batch into registry entries.
///
/// Nothing is written here: the caller commits the returned entries in one
/// go, so a batch with a bad entry leaves the registry untouched.
pub fn parse_batch(configs: Vec<MockConfig>) -> Result<Vec<(ConfigKey, Outcome)>, Failure> {
    if configs.is_empty() {
        return Err(Failure::invalid_argument(CONFIGURATIONS_MISSING));
    }
    configs.into_iter().map(parse_entry).collect()
}

fn parse_entry(config: MockConfig) -> Result<(ConfigKey, Outcome), Failure> {
    let spec = CodeSpec::from_fields(config.error_code_str, config.error_code);
    let code = spec.resolve().map_err(|err| {
        tracing::warn!(
            vin = %config.vin,
            api = %config.api,
            error = %err,
            "rejecting mock configuration batch"
        );
        Failure::invalid_argument(format!(
            "Invalid code provided. VIN: {}, API: {}",
            config.vin, config.api
        ))
    })?;

    Ok((
        ConfigKey::new(config.vin, config.api),
        Outcome::from_code(code, config.error_message),
    ))
}
