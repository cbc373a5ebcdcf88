use anyhow::{bail, Context};
use genspec_analyzer::services::classifier_client::ClassifierClient;
use genspec_analyzer::services::detection::{render_report, run_analysis};
use genspec_analyzer::services::morphology::{CachedAnalyzer, HeuristicAnalyzer};

fn parse_arg_value(args: &[String], key: &str) -> Option<String> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn has_flag(args: &[String], key: &str) -> bool {
    args.iter().any(|a| a == key)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    genspec_analyzer::init_logging();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!(
            "Usage:\n  cargo run --bin analyze_docx -- <path.docx> [--classifier-url <url>] [--out <json_path>] [--quiet]\n\nNotes:\n  - The statistical classifier sidecar must be reachable (default http://127.0.0.1:8791).\n  - Morphology uses the built-in heuristic analyzer."
        );
        return Ok(());
    }

    let path = args[1].clone();
    let classifier_url = parse_arg_value(&args, "--classifier-url");
    let out_path = parse_arg_value(&args, "--out");
    let quiet = has_flag(&args, "--quiet");

    let bytes = std::fs::read(&path).with_context(|| format!("read file failed: {}", path))?;
    let file_name = std::path::Path::new(&path)
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "input.docx".to_string());

    let classifier = match classifier_url.as_deref() {
        Some(url) => ClassifierClient::new(url),
        None => ClassifierClient::default(),
    };
    if !classifier.is_available().await {
        bail!("classifier service is not reachable; start the sidecar or pass --classifier-url");
    }

    let analyzer = CachedAnalyzer::new(HeuristicAnalyzer);

    let report = run_analysis(&file_name, &bytes, &classifier, &analyzer)
        .await
        .with_context(|| format!("analysis of {} failed", file_name))?;

    if !quiet {
        println!("File: {}", path);
        println!("Sentences: {}", report.sentence_count);
        println!();
        println!("{}", render_report(&report));
    }

    if let Some(out_path) = out_path {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(&out_path, json)
            .with_context(|| format!("write out failed: {}", out_path))?;
        println!();
        println!("Wrote JSON: {}", out_path);
    }

    Ok(())
}
