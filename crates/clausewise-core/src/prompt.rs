//! Prompt templates sent to the completion backend.

use std::fmt::Write;
use std::sync::LazyLock;

use crate::rubric::RiskCategory;

// ── System prompt ──

const PROMPT_HEAD: &str = "\
You are an AI contract-risk evaluator. Your job is to analyze the agreement text and subtract points from a base score of 100 every time you detect a risk.

SCORING RULES:
Start with 100 points. Subtract points based on the risks you detect. The score must NEVER go below 0.

Use these deductions:
";

const PROMPT_TAIL: &str = "
RISK ZONES:
- 75-100 → \"Safe\"
- 50-74 → \"Mostly Safe\"
- 25-49 → \"Moderately Risky\"
- 0-24 → \"High Risk\"

OUTPUT FORMAT:
Return ONLY this JSON structure:
{
  \"score\": <number>,
  \"scoreLabel\": \"<label>\",
  \"summary\": \"<short summary>\",
  \"highlights\": [\"point1\", \"point2\"],
  \"issues\": [
    { \"id\": 1, \"title\": \"Issue\", \"description\": \"Details\" }
  ],
  \"clauses\": [
    { \"title\": \"Clause Name\", \"text\": \"Extracted text\" }
  ]
}
";

static SYSTEM_PROMPT: LazyLock<String> = LazyLock::new(|| {
    let mut prompt = String::from(PROMPT_HEAD);
    for risk in RiskCategory::ALL {
        // Writing to a String cannot fail.
        let _ = writeln!(prompt, "- {} → -{}", risk.prompt_text(), risk.deduction());
    }
    prompt.push_str(PROMPT_TAIL);
    prompt
});

/// System instruction with one deduction line per [`RiskCategory`].
pub fn system_prompt() -> &'static str {
    &SYSTEM_PROMPT
}

// ── User prompt ──

const USER_PREAMBLE: &str = "Analyze this contract and return ONLY JSON:\n\n";

/// Wrap the caller's contract text, unmodified, in the user message.
pub fn build_user_prompt(contract_text: &str) -> String {
    let mut prompt = String::with_capacity(USER_PREAMBLE.len() + contract_text.len());
    prompt.push_str(USER_PREAMBLE);
    prompt.push_str(contract_text);
    prompt
}
