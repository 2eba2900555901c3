use anyhow::Context;
use clap::Parser;
use connect_go_handler::adapters::protoc;
use connect_go_handler::utils::logger;
use connect_go_handler::CliArgs;
use std::io::Write;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // 初始化日誌（只寫 stderr）
    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_plugin_logger(args.verbose);
    }
    tracing::debug!("CLI args: {:?}", args);

    let bytes = match &args.request {
        Some(path) => std::fs::read(path)
            .with_context(|| format!("Failed to read request file {}", path.display()))?,
        None => protoc::read_request(std::io::stdin().lock(), protoc::MAX_REQUEST_SIZE)
            .context("Failed to read CodeGeneratorRequest from stdin")?,
    };

    // 無法解碼時沒有可以回覆的對象，直接以非零結束
    let request = protoc::decode_request(&bytes).context("Invalid CodeGeneratorRequest")?;

    let parameter = args
        .parameter
        .clone()
        .unwrap_or_else(|| request.parameter().to_string());
    let description = protoc::interface_description(&request);

    let result = connect_go_handler::generate(&description, &parameter);
    if let Err(e) = &result {
        tracing::error!("❌ {}", e);
    }

    let mut stdout = std::io::stdout().lock();
    if args.plan {
        let summary = match &result {
            Ok(files) => serde_json::json!({ "files": files }),
            Err(e) => serde_json::json!({ "error": e.to_string() }),
        };
        serde_json::to_writer_pretty(&mut stdout, &summary)?;
        writeln!(stdout)?;
    } else {
        let response = protoc::into_response(result);
        stdout
            .write_all(&protoc::encode_response(&response)?)
            .context("Failed to write CodeGeneratorResponse")?;
    }
    stdout.flush()?;

    Ok(())
}
