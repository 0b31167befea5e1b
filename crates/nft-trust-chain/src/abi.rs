//! Minimal ABI bindings for every contract call the detectors issue.
//!
//! Each interface is declared with [`alloy_sol_types::sol!`] straight from
//! its public Solidity signature — no JSON ABI file is needed for
//! read-only `eth_call` decoding.

use alloy_sol_types::sol;

sol! {
    #[derive(Debug)]
    interface IErc165 {
        function supportsInterface(bytes4 interfaceId) external view returns (bool);
    }
}

sol! {
    #[derive(Debug)]
    interface IErc721 {
        function ownerOf(uint256 tokenId) external view returns (address);
        function tokenURI(uint256 tokenId) external view returns (string memory);
        function name() external view returns (string memory);
        function symbol() external view returns (string memory);
        function totalSupply() external view returns (uint256);
    }
}

sol! {
    #[derive(Debug)]
    interface IErc1155 {
        function uri(uint256 id) external view returns (string memory);
    }
}

sol! {
    #[derive(Debug)]
    interface IContractMetadata {
        function contractURI() external view returns (string memory);
    }
}

sol! {
    #[derive(Debug)]
    interface IErc2981 {
        function royaltyInfo(uint256 tokenId, uint256 salePrice)
            external
            view
            returns (address receiver, uint256 royaltyAmount);
    }
}

sol! {
    #[derive(Debug)]
    interface IErc4907 {
        function userOf(uint256 tokenId) external view returns (address);
        function userExpires(uint256 tokenId) external view returns (uint256);
    }
}

sol! {
    #[derive(Debug)]
    interface IOwnable {
        function owner() external view returns (address);
    }
}

sol! {
    #[derive(Debug)]
    interface IAccessControlEnumerable {
        function getRoleMember(bytes32 role, uint256 index) external view returns (address);
    }
}

sol! {
    #[derive(Debug)]
    interface ITimelockController {
        function getMinDelay() external view returns (uint256);
    }
}

sol! {
    #[derive(Debug)]
    interface IGnosisSafe {
        function getThreshold() external view returns (uint256);
    }
}

sol! {
    #[derive(Debug)]
    interface IDiamondLoupe {
        struct Facet {
            address facetAddress;
            bytes4[] functionSelectors;
        }
        function facets() external view returns (Facet[] memory);
        function facetAddresses() external view returns (address[] memory);
    }
}

sol! {
    #[derive(Debug)]
    interface IProxyFunctionSignatures {
        function implementation() external view returns (address);
        function admin() external view returns (address);
        function beacon() external view returns (address);
    }
}
