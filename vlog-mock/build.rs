use tonic_build::manual::{Builder, Method, Service};

const CODEC: &str = "tonic_prost::ProstCodec";

fn method(name: &str, route: &str, client_streaming: bool) -> Method {
    let builder = Method::builder()
        .name(name)
        .route_name(route)
        .input_type(format!("crate::proto::{route}Request"))
        .output_type(format!("crate::proto::{route}Response"))
        .codec_path(CODEC);

    if client_streaming {
        builder.client_streaming().build()
    } else {
        builder.build()
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=build.rs");

    // Messages are hand-written prost structs in src/proto.rs, so only the
    // service stubs are generated here and no protoc is needed.
    let log_service = Service::builder()
        .name("LogService")
        .package("vehicle_logs")
        .method(method("get_log_settings", "GetLogSettings", false))
        .method(method("get_attachment_parameters", "GetAttachmentParameters", false))
        .method(method("upload_log_messages", "UploadLogMessages", true))
        .method(method("set_mock_config", "SetMockConfig", false))
        .build();

    Builder::new().compile(&[log_service]);

    Ok(())
}
