//! One-shot analysis: read contract text, run the pipeline, print JSON.

use std::path::Path;

use anyhow::Context;
use clausewise_api::Analyzer;
use clausewise_core::{AnalysisRequest, AnalysisResult};
use tokio::io::AsyncReadExt;

/// Read contract text from `path`, or from stdin when `path` is `-`.
pub async fn read_contract(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("reading contract from stdin")?;
        return Ok(text);
    }
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading contract from {}", path.display()))
}

/// Analyse the contract at `path` and return the normalised result.
pub async fn run_analyze(analyzer: &Analyzer, path: &Path) -> anyhow::Result<AnalysisResult> {
    let contract_text = read_contract(path).await?;
    eprintln!(
        "  Analysing {} chars with {} ({})",
        contract_text.chars().count(),
        analyzer.config().provider,
        analyzer.config().model
    );
    let result = analyzer
        .analyze(&AnalysisRequest { contract_text })
        .await
        .context("analysing contract")?;
    Ok(result)
}
