use std::collections::HashMap;
use std::env;
use std::error::Error;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use codedup::{analyze, CancelToken, CodedupConfig, DocumentMeta, Language};
use tracing::warn;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: codedup [config.yaml] <file>...";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .json()
        .init();

    match run(env::args().skip(1).collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("codedup: {err}");
            ExitCode::FAILURE
        }
    }
}

fn is_config_path(arg: &str) -> bool {
    matches!(
        Path::new(arg).extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

fn run(mut args: Vec<String>) -> Result<(), Box<dyn Error>> {
    let config = match args.first() {
        Some(first) if is_config_path(first) => {
            let path = args.remove(0);
            CodedupConfig::from_file(path)?
        }
        _ => CodedupConfig::default(),
    };
    if args.is_empty() {
        return Err(USAGE.into());
    }

    let mut metas = Vec::with_capacity(args.len());
    let mut texts = HashMap::new();
    for path in args {
        let name = Path::new(&path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&path)
            .to_string();
        match fs::read_to_string(&path) {
            Ok(text) => {
                texts.insert(path.clone(), text);
            }
            Err(err) => warn!(path = %path, error = %err, "file_unreadable"),
        }
        metas.push(DocumentMeta::new(path.clone(), name, Language::from_path(&path)));
    }

    let report = analyze(metas, &texts, &config, &CancelToken::new())?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
