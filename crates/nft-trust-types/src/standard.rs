//! The NFT token standard a contract implements, as determined by the
//! interface detector.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NftStandard {
    Erc721,
    Erc1155,
    Unknown,
}
