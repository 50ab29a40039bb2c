//! Contract risk scoring rubric.
//!
//! The model is asked to start from 100 and subtract a fixed number of points
//! for every risk it detects. The table below mirrors the deduction lines of
//! the system prompt.
//!
//! # Bands
//!
//! - 75–100: Safe
//! - 50–74: Mostly Safe
//! - 25–49: Moderately Risky
//! - 0–24: High Risk

use crate::analysis::ScoreLabel;

pub const MAX_SCORE: u8 = 100;

/// Risk categories the model looks for, in prompt order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskCategory {
    LongPaymentCycle,
    TerminationInstability,
    IpAmbiguity,
    BroadIndemnity,
    MissingLiabilityCap,
    UnilateralChangeOfTerms,
    WeakConfidentiality,
    DisputeResolutionDisadvantage,
    UndefinedScopeOfWork,
    WeakForceMajeure,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 10] = [
        Self::LongPaymentCycle,
        Self::TerminationInstability,
        Self::IpAmbiguity,
        Self::BroadIndemnity,
        Self::MissingLiabilityCap,
        Self::UnilateralChangeOfTerms,
        Self::WeakConfidentiality,
        Self::DisputeResolutionDisadvantage,
        Self::UndefinedScopeOfWork,
        Self::WeakForceMajeure,
    ];

    /// Points subtracted from the base score when this risk is present.
    pub fn deduction(&self) -> u8 {
        match self {
            Self::LongPaymentCycle => 10,
            Self::TerminationInstability => 15,
            Self::IpAmbiguity => 20,
            Self::BroadIndemnity => 20,
            Self::MissingLiabilityCap => 15,
            Self::UnilateralChangeOfTerms => 15,
            Self::WeakConfidentiality => 10,
            Self::DisputeResolutionDisadvantage => 10,
            Self::UndefinedScopeOfWork => 10,
            Self::WeakForceMajeure => 5,
        }
    }

    /// Wording used for this category in the system prompt.
    pub fn prompt_text(&self) -> &'static str {
        match self {
            Self::LongPaymentCycle => "Unusually long payment cycle (90-120 days)",
            Self::TerminationInstability => "Termination instability",
            Self::IpAmbiguity => "IP ambiguity",
            Self::BroadIndemnity => "Broad indemnity",
            Self::MissingLiabilityCap => "Missing liability cap",
            Self::UnilateralChangeOfTerms => "Unilateral change-of-terms clause",
            Self::WeakConfidentiality => "Weak confidentiality clause",
            Self::DisputeResolutionDisadvantage => "Dispute resolution disadvantage",
            Self::UndefinedScopeOfWork => "Undefined scope of work",
            Self::WeakForceMajeure => "Weak or missing force majeure clause",
        }
    }
}

/// Map a 0–100 score onto its risk band.
pub fn label_for_score(score: u8) -> ScoreLabel {
    match score {
        75.. => ScoreLabel::Safe,
        50..=74 => ScoreLabel::MostlySafe,
        25..=49 => ScoreLabel::ModeratelyRisky,
        _ => ScoreLabel::HighRisk,
    }
}

/// Round and clamp an arbitrary number into 0–100.
///
/// Non-finite input clamps to 0.
pub fn clamp_score(raw: f64) -> u8 {
    if !raw.is_finite() {
        return 0;
    }
    raw.round().clamp(0.0, MAX_SCORE as f64) as u8
}
