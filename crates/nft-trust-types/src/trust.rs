//! The composed trust analysis result.

use crate::chain_info::L2BeatStage;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustLevel {
    Excellent,
    Good,
    Moderate,
    Poor,
    Critical,
}

impl TrustLevel {
    /// `>=9 excellent, >=7 good, >=5 moderate, >=3 poor, else critical`.
    pub fn from_score(score: u8) -> Self {
        match score {
            9..=10 => TrustLevel::Excellent,
            7..=8 => TrustLevel::Good,
            5..=6 => TrustLevel::Moderate,
            3..=4 => TrustLevel::Poor,
            _ => TrustLevel::Critical,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssumptionSeverity {
    Low,
    Medium,
    High,
    Critical,
}

/// A named, categorised, severity-tagged statement of the form "for this
/// NFT to remain correct, X must hold".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrustAssumption {
    pub category: String,
    pub description: String,
    pub severity: AssumptionSeverity,
    pub impact: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermanenceScore {
    pub overall_score: u8,
    pub metadata_score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_score: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_score: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_metadata_score: Option<u8>,
    pub chain_penalty: f64,
    pub is_fully_onchain: bool,
    pub weakest_component: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrustlessnessScore {
    pub overall_score: u8,
    pub access_control_score: u8,
    pub upgradeability_score: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainTrustScore {
    pub chain_id: u64,
    pub chain_name: String,
    pub is_testnet: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l2beat_stage: Option<L2BeatStage>,
    pub stage_score: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrustAnalysisResult {
    pub overall_score: u8,
    pub overall_level: TrustLevel,
    pub permanence: PermanenceScore,
    pub trustlessness: TrustlessnessScore,
    pub chain_trust: ChainTrustScore,
    pub trust_assumptions: Vec<TrustAssumption>,
    pub recommendations: Vec<String>,
    pub key_risks: Vec<String>,
    pub strengths: Vec<String>,
    pub weights: BTreeMap<String, f64>,
    /// RFC 3339 timestamp of when the analysis ran. Excluded from the
    /// determinism property (everything else must be byte-identical across
    /// runs given the same RPC transcript).
    pub timestamp: String,
}
