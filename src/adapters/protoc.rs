use crate::domain::model::{FileUnit, InterfaceDescription, MethodUnit, OutputFile, ServiceUnit};
use crate::utils::error::{GenError, Result};
use prost::Message;
use prost_types::compiler::code_generator_response::{Feature, File};
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};
use prost_types::FileDescriptorProto;
use std::io::Read;

/// protoc 請求的大小上限（32 MiB）
pub const MAX_REQUEST_SIZE: u64 = 32 << 20;

/// Reads a whole request, failing once more than `limit` bytes arrive.
pub fn read_request(reader: impl Read, limit: u64) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.take(limit + 1).read_to_end(&mut buf)?;
    if buf.len() as u64 > limit {
        return Err(GenError::InputTooLargeError { limit });
    }
    Ok(buf)
}

pub fn decode_request(bytes: &[u8]) -> Result<CodeGeneratorRequest> {
    Ok(CodeGeneratorRequest::decode(bytes)?)
}

pub fn encode_response(response: &CodeGeneratorResponse) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(response.encoded_len());
    response.encode(&mut buf)?;
    Ok(buf)
}

/// 只取 `file_to_generate` 指定的檔案，依請求順序排列
pub fn interface_description(request: &CodeGeneratorRequest) -> InterfaceDescription {
    let files = request
        .file_to_generate
        .iter()
        .filter_map(|name| {
            let found = request.proto_file.iter().find(|fd| fd.name() == name.as_str());
            if found.is_none() {
                tracing::warn!("⚠️ {} listed in file_to_generate but not provided", name);
            }
            found
        })
        .map(file_unit)
        .collect();

    InterfaceDescription { files }
}

fn file_unit(fd: &FileDescriptorProto) -> FileUnit {
    FileUnit {
        name: fd.name().to_string(),
        package: fd.package().to_string(),
        go_package: fd
            .options
            .as_ref()
            .map(|options| options.go_package().to_string())
            .unwrap_or_default(),
        services: fd
            .service
            .iter()
            .map(|svc| ServiceUnit {
                name: svc.name().to_string(),
                methods: svc
                    .method
                    .iter()
                    .map(|method| MethodUnit {
                        name: method.name().to_string(),
                        input_type: method.input_type().to_string(),
                        output_type: method.output_type().to_string(),
                        client_streaming: method.client_streaming(),
                        server_streaming: method.server_streaming(),
                    })
                    .collect(),
            })
            .collect(),
    }
}

/// 成功時只帶檔案，失敗時只帶錯誤訊息，兩者不會同時出現
pub fn into_response(result: Result<Vec<OutputFile>>) -> CodeGeneratorResponse {
    match result {
        Ok(files) => success_response(files),
        Err(e) => error_response(&e),
    }
}

pub fn success_response(files: Vec<OutputFile>) -> CodeGeneratorResponse {
    CodeGeneratorResponse {
        file: files
            .into_iter()
            .map(|f| File {
                name: Some(f.path),
                content: Some(f.content),
                ..Default::default()
            })
            .collect(),
        supported_features: Some(Feature::Proto3Optional as u64),
        ..Default::default()
    }
}

pub fn error_response(error: &GenError) -> CodeGeneratorResponse {
    CodeGeneratorResponse {
        error: Some(error.to_string()),
        supported_features: Some(Feature::Proto3Optional as u64),
        ..Default::default()
    }
}
