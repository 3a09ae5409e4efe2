//! The `LogService` call handlers.
//!
//! Each handler turns its request into a `(vin, api)` key and lets the
//! [`OutcomeResolver`] decide the reply, except `SetMockConfig`, which writes
//! into the registry instead of reading from it.

mod mock_config;
mod upload;

pub use mock_config::{CONFIGURATIONS_MISSING, parse_batch};
pub use upload::{UploadCompletion, drain};

use std::sync::Arc;

use futures::Stream;
use tonic::{Request, Response, Status, Streaming};
use vlog_mock_core::Failure;

use crate::proto::log_service_server::LogService;
use crate::proto::{
    GetAttachmentParametersRequest, GetAttachmentParametersResponse, GetLogSettingsRequest,
    GetLogSettingsResponse, MockConfig, SetMockConfigRequest, SetMockConfigResponse,
    UploadLogMessagesRequest, UploadLogMessagesResponse,
};
use crate::registry::OutcomeRegistry;
use crate::resolver::OutcomeResolver;

/// Operation names used as the `api` half of a configuration key.
pub mod api {
    pub const GET_LOG_SETTINGS: &str = "GetLogSettings";
    pub const GET_ATTACHMENT_PARAMETERS: &str = "GetAttachmentParameters";
    pub const UPLOAD_LOG_MESSAGES: &str = "UploadLogMessages";
}

/// Message reported when an upload stream fails mid-way.
pub const INVALID_REQUEST: &str = "Invalid request";

/// The mock `LogService` implementation.
#[derive(Clone, Debug)]
pub struct MockLogService {
    registry: Arc<OutcomeRegistry>,
    resolver: OutcomeResolver,
}

impl MockLogService {
    pub fn new(registry: Arc<OutcomeRegistry>) -> Self {
        let resolver = OutcomeResolver::new(Arc::clone(&registry));
        Self { registry, resolver }
    }

    pub fn registry(&self) -> &Arc<OutcomeRegistry> {
        &self.registry
    }

    /// Resolve a unary call. The key always uses the operation's own name;
    /// the request's `api` field is only logged when it disagrees.
    fn resolve_unary(&self, operation: &'static str, vin: &str, requested_api: &str) -> Result<(), Failure> {
        if !requested_api.is_empty() && requested_api != operation {
            tracing::debug!(
                vin,
                requested_api,
                operation,
                "ignoring request api, keying on operation name"
            );
        }
        self.resolver.resolve(vin, operation)
    }

    /// Drain an upload stream and resolve with the last message's key.
    pub async fn upload<S>(&self, stream: S) -> Result<UploadLogMessagesResponse, Failure>
    where
        S: Stream<Item = Result<UploadLogMessagesRequest, Status>> + Unpin,
    {
        match drain(stream).await {
            UploadCompletion::ReadFailed(status) => {
                tracing::warn!(error = %status, "upload stream read failed");
                Err(Failure::invalid_argument(INVALID_REQUEST))
            }
            UploadCompletion::EndOfStream { vin, api, received } => {
                tracing::debug!(%vin, %api, received, "upload stream complete");
                self.resolver.resolve(&vin, &api)?;
                Ok(UploadLogMessagesResponse { received })
            }
        }
    }

    /// Validate a batch and commit it to the registry in one step.
    pub fn apply_config(&self, configs: Vec<MockConfig>) -> Result<SetMockConfigResponse, Failure> {
        let entries = parse_batch(configs)?;
        let successes = entries.iter().filter(|(_, outcome)| outcome.is_success()).count();
        let applied = self.registry.set_batch(entries);
        tracing::info!(
            applied,
            failures = applied - successes,
            total = self.registry.len(),
            "mock configuration applied"
        );

        Ok(SetMockConfigResponse {
            applied: u32::try_from(applied).unwrap_or(u32::MAX),
        })
    }
}

#[tonic::async_trait]
impl LogService for MockLogService {
    async fn get_log_settings(
        &self,
        request: Request<GetLogSettingsRequest>,
    ) -> Result<Response<GetLogSettingsResponse>, Status> {
        let req = request.into_inner();
        self.resolve_unary(api::GET_LOG_SETTINGS, &req.vin, &req.api)?;
        Ok(Response::new(GetLogSettingsResponse::default()))
    }

    async fn get_attachment_parameters(
        &self,
        request: Request<GetAttachmentParametersRequest>,
    ) -> Result<Response<GetAttachmentParametersResponse>, Status> {
        let req = request.into_inner();
        self.resolve_unary(api::GET_ATTACHMENT_PARAMETERS, &req.vin, &req.api)?;
        Ok(Response::new(GetAttachmentParametersResponse::default()))
    }

    async fn upload_log_messages(
        &self,
        request: Request<Streaming<UploadLogMessagesRequest>>,
    ) -> Result<Response<UploadLogMessagesResponse>, Status> {
        let ack = self.upload(request.into_inner()).await?;
        Ok(Response::new(ack))
    }

    async fn set_mock_config(
        &self,
        request: Request<SetMockConfigRequest>,
    ) -> Result<Response<SetMockConfigResponse>, Status> {
        let ack = self.apply_config(request.into_inner().configs)?;
        Ok(Response::new(ack))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;
    use vlog_mock_core::{Code, ConfigKey, Outcome};

    fn service() -> MockLogService {
        MockLogService::new(Arc::new(OutcomeRegistry::new()))
    }

    fn config(vin: &str, api: &str, code_str: &str) -> MockConfig {
        MockConfig {
            vin: vin.to_string(),
            api: api.to_string(),
            error_code_str: code_str.to_string(),
            ..Default::default()
        }
    }

    fn upload_msg(vin: &str, api: &str) -> Result<UploadLogMessagesRequest, Status> {
        Ok(UploadLogMessagesRequest {
            vin: vin.to_string(),
            api: api.to_string(),
            payload: vec![0xde, 0xad],
        })
    }

    #[tokio::test]
    async fn test_get_log_settings_without_configuration() {
        let status = service()
            .get_log_settings(Request::new(GetLogSettingsRequest {
                vin: "VIN1".to_string(),
                api: api::GET_LOG_SETTINGS.to_string(),
            }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), tonic::Code::InvalidArgument);
        assert_eq!(status.message(), "Configuration missing");
    }

    #[tokio::test]
    async fn test_get_log_settings_configured_success() {
        let svc = service();
        svc.apply_config(vec![config("VIN1", api::GET_LOG_SETTINGS, "OK")])
            .unwrap();

        let reply = svc
            .get_log_settings(Request::new(GetLogSettingsRequest {
                vin: "VIN1".to_string(),
                api: String::new(),
            }))
            .await
            .unwrap();
        assert_eq!(reply.into_inner(), GetLogSettingsResponse::default());
    }

    #[tokio::test]
    async fn test_unary_keys_on_operation_name() {
        let svc = service();
        svc.apply_config(vec![config("VIN1", api::GET_ATTACHMENT_PARAMETERS, "UNAVAILABLE")])
            .unwrap();

        // The request claims a different api; the operation name decides.
        let status = svc
            .get_attachment_parameters(Request::new(GetAttachmentParametersRequest {
                vin: "VIN1".to_string(),
                api: api::GET_LOG_SETTINGS.to_string(),
            }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), tonic::Code::Unavailable);
        assert!(status.message().contains(api::GET_ATTACHMENT_PARAMETERS));
        assert!(status.message().contains("VIN1"));
        assert!(status.message().contains("14"));
    }

    #[tokio::test]
    async fn test_upload_resolves_last_message() {
        let svc = service();
        svc.apply_config(vec![
            config("VIN1", api::UPLOAD_LOG_MESSAGES, "INTERNAL"),
            config("VIN2", api::UPLOAD_LOG_MESSAGES, "OK"),
        ])
        .unwrap();

        let ack = svc
            .upload(stream::iter(vec![
                upload_msg("VIN1", api::UPLOAD_LOG_MESSAGES),
                upload_msg("VIN2", api::UPLOAD_LOG_MESSAGES),
            ]))
            .await
            .unwrap();
        assert_eq!(ack.received, 2);

        let failure = svc
            .upload(stream::iter(vec![
                upload_msg("VIN2", api::UPLOAD_LOG_MESSAGES),
                upload_msg("VIN1", api::UPLOAD_LOG_MESSAGES),
            ]))
            .await
            .unwrap_err();
        assert_eq!(failure.code(), Code::Internal);
    }

    #[tokio::test]
    async fn test_upload_read_error_is_invalid_request() {
        let svc = service();
        svc.apply_config(vec![config("VIN1", api::UPLOAD_LOG_MESSAGES, "OK")])
            .unwrap();

        let failure = svc
            .upload(stream::iter(vec![
                upload_msg("VIN1", api::UPLOAD_LOG_MESSAGES),
                Err(Status::unknown("broken pipe")),
            ]))
            .await
            .unwrap_err();

        assert_eq!(failure.code(), Code::InvalidArgument);
        assert_eq!(failure.message(), INVALID_REQUEST);
    }

    #[test]
    fn test_partial_batch_is_not_committed() {
        let svc = service();
        svc.apply_config(vec![config("VIN0", api::GET_LOG_SETTINGS, "OK")])
            .unwrap();

        let failure = svc
            .apply_config(vec![
                config("VIN1", api::GET_LOG_SETTINGS, "NOT_FOUND"),
                config("VIN2", api::GET_LOG_SETTINGS, "NOPE"),
            ])
            .unwrap_err();

        assert_eq!(failure.code(), Code::InvalidArgument);
        assert_eq!(svc.registry().len(), 1);
        assert_eq!(
            svc.registry().lookup(&ConfigKey::new("VIN1", api::GET_LOG_SETTINGS)),
            None
        );
    }

    #[test]
    fn test_empty_batch_leaves_registry_unchanged() {
        let svc = service();
        svc.apply_config(vec![config("VIN0", api::GET_LOG_SETTINGS, "OK")])
            .unwrap();

        let failure = svc.apply_config(vec![]).unwrap_err();
        assert_eq!(failure.message(), CONFIGURATIONS_MISSING);
        assert_eq!(svc.registry().len(), 1);
    }

    #[test]
    fn test_apply_config_reports_applied_count() {
        let svc = service();
        let ack = svc
            .apply_config(vec![
                config("VIN1", api::GET_LOG_SETTINGS, "OK"),
                config("VIN1", api::GET_ATTACHMENT_PARAMETERS, "ABORTED"),
            ])
            .unwrap();

        assert_eq!(ack.applied, 2);
        assert_eq!(
            svc.registry().lookup(&ConfigKey::new("VIN1", api::GET_ATTACHMENT_PARAMETERS)),
            Some(Outcome::from_code(Code::Aborted, ""))
        );
    }

    #[tokio::test]
    async fn test_set_mock_config_rpc_error_has_reason_detail() {
        use prost::Message;
        use vlog_mock_core::{ErrorInfo, RpcStatus};

        let status = service()
            .set_mock_config(Request::new(SetMockConfigRequest { configs: vec![] }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), tonic::Code::InvalidArgument);
        let details = RpcStatus::decode(status.details()).unwrap();
        let info = ErrorInfo::decode(details.details[0].value.as_slice()).unwrap();
        assert_eq!(info.reason, CONFIGURATIONS_MISSING);
    }
}
