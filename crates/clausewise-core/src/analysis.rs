//! Request and result types shared between the adapter, the CLI, and clients.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Inbound analysis request: `{ "contractText": "..." }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub contract_text: String,
}

impl AnalysisRequest {
    /// `true` when the contract text has something other than whitespace.
    pub fn is_valid(&self) -> bool {
        !self.contract_text.trim().is_empty()
    }
}

/// Risk band reported alongside the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreLabel {
    #[serde(rename = "Safe")]
    Safe,
    #[serde(rename = "Mostly Safe")]
    MostlySafe,
    #[serde(rename = "Moderately Risky")]
    ModeratelyRisky,
    #[serde(rename = "High Risk")]
    HighRisk,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl ScoreLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Safe => "Safe",
            Self::MostlySafe => "Mostly Safe",
            Self::ModeratelyRisky => "Moderately Risky",
            Self::HighRisk => "High Risk",
            Self::Unknown => "Unknown",
        }
    }

    /// Parse a label as written by the model.
    ///
    /// Matching ignores case and surrounding whitespace. Anything that is not
    /// one of the four band labels maps to [`ScoreLabel::Unknown`].
    pub fn parse_lenient(s: &str) -> Self {
        let s = s.trim();
        [Self::Safe, Self::MostlySafe, Self::ModeratelyRisky, Self::HighRisk]
            .into_iter()
            .find(|label| label.as_str().eq_ignore_ascii_case(s))
            .unwrap_or(Self::Unknown)
    }
}

impl fmt::Display for ScoreLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A risk the model flagged in the contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: u64,
    pub title: String,
    pub description: String,
}

/// A clause the model extracted verbatim from the contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    pub title: String,
    pub text: String,
}

/// Normalised analysis returned to the caller.
///
/// Every field is always present, whatever the model sent back. Built fresh
/// per request by [`crate::normalize_reply`] and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// 0–100 inclusive.
    pub score: u8,
    pub score_label: ScoreLabel,
    pub summary: String,
    pub highlights: Vec<String>,
    pub issues: Vec<Issue>,
    pub clauses: Vec<Clause>,
}

impl Default for AnalysisResult {
    fn default() -> Self {
        Self {
            score: 0,
            score_label: ScoreLabel::Unknown,
            summary: String::new(),
            highlights: Vec::new(),
            issues: Vec::new(),
            clauses: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_camel_case_field() {
        let req: AnalysisRequest =
            serde_json::from_str(r#"{"contractText":"The Supplier shall..."}"#).unwrap();
        assert_eq!(req.contract_text, "The Supplier shall...");
        assert!(req.is_valid());
    }

    #[test]
    fn whitespace_only_request_is_invalid() {
        let req = AnalysisRequest {
            contract_text: " \n\t ".into(),
        };
        assert!(!req.is_valid());
    }

    #[test]
    fn non_string_contract_text_does_not_deserialize() {
        assert!(serde_json::from_str::<AnalysisRequest>(r#"{"contractText":42}"#).is_err());
        assert!(serde_json::from_str::<AnalysisRequest>(r#"{"contractText":null}"#).is_err());
        assert!(serde_json::from_str::<AnalysisRequest>(r#"{}"#).is_err());
    }

    #[test]
    fn label_parsing_is_lenient() {
        assert_eq!(ScoreLabel::parse_lenient("Safe"), ScoreLabel::Safe);
        assert_eq!(ScoreLabel::parse_lenient(" mostly safe "), ScoreLabel::MostlySafe);
        assert_eq!(
            ScoreLabel::parse_lenient("MODERATELY RISKY"),
            ScoreLabel::ModeratelyRisky
        );
        assert_eq!(ScoreLabel::parse_lenient("High Risk"), ScoreLabel::HighRisk);
        assert_eq!(ScoreLabel::parse_lenient("Catastrophic"), ScoreLabel::Unknown);
        assert_eq!(ScoreLabel::parse_lenient(""), ScoreLabel::Unknown);
    }

    #[test]
    fn result_serializes_with_wire_names() {
        let result = AnalysisResult {
            score: 60,
            score_label: ScoreLabel::MostlySafe,
            summary: "Standard services agreement.".into(),
            highlights: vec!["Net 30 payment".into()],
            issues: vec![Issue {
                id: 1,
                title: "Missing liability cap".into(),
                description: "No limit on damages.".into(),
            }],
            clauses: vec![Clause {
                title: "Payment".into(),
                text: "Invoices are payable within 30 days.".into(),
            }],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["score"], 60);
        assert_eq!(json["scoreLabel"], "Mostly Safe");
        assert_eq!(json["issues"][0]["id"], 1);
        assert_eq!(json["clauses"][0]["title"], "Payment");
        assert!(json.get("score_label").is_none());
    }

    #[test]
    fn default_result_is_fully_populated() {
        let json = serde_json::to_value(AnalysisResult::default()).unwrap();
        assert_eq!(json["score"], 0);
        assert_eq!(json["scoreLabel"], "Unknown");
        assert_eq!(json["summary"], "");
        assert_eq!(json["highlights"], serde_json::json!([]));
        assert_eq!(json["issues"], serde_json::json!([]));
        assert_eq!(json["clauses"], serde_json::json!([]));
    }
}
