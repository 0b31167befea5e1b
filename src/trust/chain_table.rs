//! The chain-trust table: L2Beat rollup-stage classifications, loaded once
//! from an embedded JSON asset and keyed by stringified chain id.

use nft_trust_types::chain_info::{L2BeatStage, RollupStageInfo};
use std::collections::HashMap;

const ROLLUP_STAGES_JSON: &str = include_str!("../data/rollup_stages.json");

pub struct ChainTrustTable {
    stages: HashMap<u64, RollupStageInfo>,
}

impl Default for ChainTrustTable {
    fn default() -> Self {
        ChainTrustTable::from_embedded()
    }
}

impl ChainTrustTable {
    pub fn from_embedded() -> Self {
        let raw: HashMap<String, RollupStageInfo> =
            serde_json::from_str(ROLLUP_STAGES_JSON).unwrap_or_default();
        let stages = raw
            .into_iter()
            .filter_map(|(id, info)| id.parse::<u64>().ok().map(|id| (id, info)))
            .collect();
        ChainTrustTable { stages }
    }

    pub fn stage(&self, chain_id: u64) -> Option<L2BeatStage> {
        self.stages.get(&chain_id).and_then(|info| info.stage)
    }

    /// Ethereum mainnet is penalty-free; every other chain is penalized by
    /// its L2Beat stage, or the worst-case penalty when unclassified.
    pub fn chain_penalty(&self, chain_id: u64) -> f64 {
        if chain_id == 1 {
            return 0.0;
        }
        match self.stage(chain_id) {
            Some(L2BeatStage::Stage2) => 0.5,
            Some(L2BeatStage::Stage1) => 1.0,
            Some(L2BeatStage::Stage0) => 1.5,
            None => 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mainnet_has_no_penalty() {
        let table = ChainTrustTable::from_embedded();
        assert_eq!(table.chain_penalty(1), 0.0);
    }

    #[test]
    fn known_rollup_gets_its_stage_penalty() {
        let table = ChainTrustTable::from_embedded();
        assert_eq!(table.stage(42161), Some(L2BeatStage::Stage1));
        assert_eq!(table.chain_penalty(42161), 1.0);
    }

    #[test]
    fn unclassified_chain_gets_worst_case_penalty() {
        let table = ChainTrustTable::from_embedded();
        assert_eq!(table.chain_penalty(999_999), 2.0);
    }
}
