//! C3: stateless on-chain detectors, each a function over `(rpc, contract)`
//! (and, where needed, a token id or the already-detected interface set).

pub mod access_control;
pub mod compliance;
pub mod interface;
pub mod proxy;
pub mod token_uri;
