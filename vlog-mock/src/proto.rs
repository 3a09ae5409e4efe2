//! Wire messages of the `vehicle_logs.LogService` gRPC service.
//!
//! The message types are written by hand with `prost` derives; the server and
//! client stubs ([`log_service_server`], [`log_service_client`]) are generated
//! by `build.rs`.

/// Request for `GetLogSettings`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetLogSettingsRequest {
    #[prost(string, tag = "1")]
    pub vin: String,
    #[prost(string, tag = "2")]
    pub api: String,
}

/// Log settings for a vehicle. The mock always answers with defaults.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetLogSettingsResponse {
    #[prost(bool, tag = "1")]
    pub upload_enabled: bool,
    #[prost(string, tag = "2")]
    pub log_level: String,
    #[prost(uint32, tag = "3")]
    pub upload_interval_seconds: u32,
}

/// Request for `GetAttachmentParameters`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetAttachmentParametersRequest {
    #[prost(string, tag = "1")]
    pub vin: String,
    #[prost(string, tag = "2")]
    pub api: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetAttachmentParametersResponse {
    #[prost(uint64, tag = "1")]
    pub max_attachment_bytes: u64,
    #[prost(string, repeated, tag = "2")]
    pub allowed_content_types: Vec<String>,
}

/// One message of the `UploadLogMessages` client stream.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UploadLogMessagesRequest {
    #[prost(string, tag = "1")]
    pub vin: String,
    #[prost(string, tag = "2")]
    pub api: String,
    /// Opaque log payload, never inspected.
    #[prost(bytes = "vec", tag = "3")]
    pub payload: Vec<u8>,
}

/// Final acknowledgment of an upload.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UploadLogMessagesResponse {
    /// Number of messages read before the stream ended.
    #[prost(uint32, tag = "1")]
    pub received: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SetMockConfigRequest {
    #[prost(message, repeated, tag = "1")]
    pub configs: Vec<MockConfig>,
}

/// Desired outcome for one `(vin, api)` pair.
///
/// `error_code_str` takes precedence when non-empty; otherwise `error_code`
/// is used. Code `0` (`OK`) configures success.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MockConfig {
    #[prost(string, tag = "1")]
    pub vin: String,
    #[prost(string, tag = "2")]
    pub api: String,
    #[prost(string, tag = "3")]
    pub error_code_str: String,
    #[prost(int64, tag = "4")]
    pub error_code: i64,
    /// Optional text appended to the failure message.
    #[prost(string, tag = "5")]
    pub error_message: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SetMockConfigResponse {
    /// Number of entries written by the batch.
    #[prost(uint32, tag = "1")]
    pub applied: u32,
}

include!(concat!(env!("OUT_DIR"), "/vehicle_logs.LogService.rs"));
