//! http-stream-cli: run the streaming HTTP request tool from a terminal
//!
//! Usage:
//!   http-stream-cli invoke --url <url> [--method <m>] [--body <json>] [--headers <json>]
//!   http-stream-cli describe
//!   http-stream-cli version

use anyhow::{bail, Context};
use futures::StreamExt;
use http_request_stream::request::{PARAM_BODY, PARAM_HEADERS, PARAM_METHOD, PARAM_URL};
use http_request_stream::tool::{HttpRequestStreamTool, Tool, ToolManifest, ToolParameters};
use serde_json::Value;
use std::io::Write;
use tracing_subscriber::EnvFilter;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    init_tracing();

    let outcome = match args[1].as_str() {
        "invoke" => cmd_invoke(&args[2..]),
        "describe" => cmd_describe(),
        "version" | "--version" | "-V" => {
            cmd_version();
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = outcome {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn print_usage() {
    println!(
        r#"http-stream-cli - streaming HTTP request tool

USAGE:
    http-stream-cli <COMMAND> [OPTIONS]

COMMANDS:
    invoke                      Send a request and print each message as a JSON line
        --url <url>             Target URL (http:// or https://)
        --method <method>       HTTP method (default GET)
        --body <json>           JSON request body
        --headers <json>        JSON object of headers merged over the defaults
    describe                    Print the tool manifest
    version                     Show version information
    help                        Show this help message

ENVIRONMENT:
    HTTP_STREAM_CONNECT_TIMEOUT_SECS   Connect timeout in seconds (default 5)
    HTTP_STREAM_PROXY_URL              Proxy for all requests
    RUST_LOG                           Log filter (default warn)"#
    );
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_version() {
    println!("http-stream-cli {}", env!("CARGO_PKG_VERSION"));
}

fn cmd_describe() -> anyhow::Result<()> {
    let manifest = ToolManifest::builtin()?;
    print!("{}", manifest.to_yaml()?);
    Ok(())
}

fn parse_invoke_args(args: &[String]) -> anyhow::Result<ToolParameters> {
    let mut params = ToolParameters::new();
    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        let name = match flag.as_str() {
            "--url" => PARAM_URL,
            "--method" => PARAM_METHOD,
            "--body" => PARAM_BODY,
            "--headers" => PARAM_HEADERS,
            other => bail!("unknown option: {other}"),
        };
        let value = iter
            .next()
            .with_context(|| format!("missing value for {flag}"))?;
        params.insert(name.to_string(), Value::String(value.clone()));
    }
    Ok(params)
}

fn cmd_invoke(args: &[String]) -> anyhow::Result<()> {
    let params = parse_invoke_args(args)?;

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime.block_on(async {
        let tool = HttpRequestStreamTool::from_env()?;
        let mut messages = tool.invoke(&params).await?;

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        while let Some(msg) = messages.next().await {
            let line = serde_json::to_string(&msg?)?;
            writeln!(out, "{line}")?;
            out.flush()?;
        }
        Ok::<(), anyhow::Error>(())
    })
}
