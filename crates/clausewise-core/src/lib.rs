pub mod analysis;
pub mod config;
pub mod normalize;
pub mod prompt;
pub mod rubric;

pub use analysis::{AnalysisRequest, AnalysisResult, Clause, Issue, ScoreLabel};
pub use config::{AnalyzerConfig, Provider, ScorePolicy};
pub use normalize::{NormalizeError, normalize_reply, parse_reply};
pub use rubric::{RiskCategory, label_for_score};
