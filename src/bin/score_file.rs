use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde_json::Value;
use veridity_lib::models::{AnalyzeRequest, Metadata};
use veridity_lib::services::{ContentInput, FraudDetector};

/// Score a paper offline. A JSON file shaped like an `/analyze` body is scored
/// from its `content` field; any other file is scored as raw text.
#[derive(Parser, Debug)]
#[command(name = "score_file")]
#[command(version)]
struct Args {
    /// Text or JSON file to score
    path: PathBuf,

    /// Print single-line JSON
    #[arg(long)]
    compact: bool,
}

fn load_input(raw: &str) -> (ContentInput, Metadata) {
    let request = serde_json::from_str::<Value>(raw)
        .ok()
        .and_then(AnalyzeRequest::from_body);
    match request {
        Some(request) => (ContentInput::from_json(&request.content), request.metadata),
        None => (ContentInput::from(raw), Metadata::new()),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let raw = std::fs::read_to_string(&args.path)
        .with_context(|| format!("read file failed: {}", args.path.display()))?;
    let (content, metadata) = load_input(&raw);

    let detector = FraudDetector::shared()?;
    let result = detector.analyze(&content, &metadata);

    let out = if args.compact {
        serde_json::to_string(&result)?
    } else {
        serde_json::to_string_pretty(&result)?
    };
    println!("{}", out);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_input_request_body() {
        let (content, metadata) =
            load_input(r#"{"content": {"a": null, "b": "text"}, "metadata": {"title": "T"}}"#);
        assert_eq!(content.to_text(), "None text");
        assert_eq!(metadata["title"], "T");
    }

    #[test]
    fn test_load_input_plain_text() {
        let (content, metadata) = load_input("r = 0.87 with {braces}");
        assert_eq!(content.to_text(), "r = 0.87 with {braces}");
        assert!(metadata.is_empty());

        let (content, _) = load_input(r#"{"title": "no content key"}"#);
        assert_eq!(content.to_text(), r#"{"title": "no content key"}"#);
    }
}
