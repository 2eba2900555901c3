use crate::config::GenerationMode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 一次呼叫收到的完整介面描述
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterfaceDescription {
    pub files: Vec<FileUnit>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileUnit {
    /// Source file name, e.g. `test/v1/test.proto`
    pub name: String,
    /// Dotted proto package, e.g. `test.v1`
    pub package: String,
    /// `go_package` option; empty when the file does not declare one
    pub go_package: String,
    pub services: Vec<ServiceUnit>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceUnit {
    pub name: String,
    pub methods: Vec<MethodUnit>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodUnit {
    pub name: String,
    /// Fully-qualified input message, e.g. `.test.v1.EchoRequest`
    pub input_type: String,
    pub output_type: String,
    pub client_streaming: bool,
    pub server_streaming: bool,
}

/// 回傳給 protoc 的單一檔案
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputFile {
    pub path: String,
    pub content: String,
}

impl OutputFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    /// Full per-method file: package clause, imports and one method
    MethodStub,
    /// Bare method fragment appended to an implementation file
    MethodOnly,
    /// Always-regenerated registration file
    ServiceManifest,
    /// Struct declaration with constructor, no methods
    StructStub,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 4] = [
        TemplateKind::MethodStub,
        TemplateKind::MethodOnly,
        TemplateKind::ServiceManifest,
        TemplateKind::StructStub,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TemplateKind::MethodStub => "method_stub",
            TemplateKind::MethodOnly => "method_only",
            TemplateKind::ServiceManifest => "service_manifest",
            TemplateKind::StructStub => "struct_stub",
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 模板渲染用的上下文；以 service 為單位建立，方法層級以複製後覆寫產生
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationContext {
    /// Proto file the service was declared in
    pub source_file: String,
    pub package_name: String,
    pub struct_name: String,
    pub receiver: String,
    pub service: ServiceContext,
    pub method: Option<MethodContext>,
    pub manifest_path: String,
    pub struct_path: String,
    pub method_path: Option<String>,
    pub dir: String,
    pub mode: GenerationMode,
    pub per_service: bool,
    /// Import path of the generated protobuf package
    pub proto_import: String,
    /// Package name the message types are referenced through
    pub proto_alias: String,
}

impl GenerationContext {
    pub fn for_method(&self, method: MethodContext, method_path: Option<String>) -> Self {
        Self {
            method: Some(method),
            method_path,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceContext {
    pub name: String,
    pub methods: Vec<MethodContext>,
}

/// 方法的樣板資料；四個串流旗標恰有一個為 true
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodContext {
    pub name: String,
    pub input: String,
    pub output: String,
    pub unary: bool,
    pub client_stream: bool,
    pub server_stream: bool,
    pub bidi_stream: bool,
}

impl MethodContext {
    pub fn new(
        name: impl Into<String>,
        input: impl Into<String>,
        output: impl Into<String>,
        client_streaming: bool,
        server_streaming: bool,
    ) -> Self {
        Self {
            name: name.into(),
            input: input.into(),
            output: output.into(),
            unary: !client_streaming && !server_streaming,
            client_stream: client_streaming && !server_streaming,
            server_stream: !client_streaming && server_streaming,
            bidi_stream: client_streaming && server_streaming,
        }
    }
}
