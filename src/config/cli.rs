use clap::Parser;
use std::path::PathBuf;

/// protoc 呼叫時不帶任何參數；以下旗標只用於手動除錯
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "protoc-gen-connect-go-handler")]
#[command(about = "protoc plugin that scaffolds Connect Go handlers without touching hand-written code")]
#[command(version)]
pub struct CliArgs {
    /// Read an encoded CodeGeneratorRequest from this file instead of stdin
    #[arg(long, value_name = "FILE")]
    pub request: Option<PathBuf>,

    /// Override the parameter string carried by the request
    #[arg(long, value_name = "STRING")]
    pub parameter: Option<String>,

    /// Print a JSON summary of the planned files instead of the encoded response
    #[arg(long)]
    pub plan: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit log lines as JSON
    #[arg(long)]
    pub json_logs: bool,
}
