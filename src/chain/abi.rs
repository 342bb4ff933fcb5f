//! Contract interfaces used by balance queries and NFT transfers.

use alloy::primitives::Address;
use alloy::sol;

sol! {
    /// Subset of ERC-20 needed for balance reads.
    #[derive(Debug)]
    interface IERC20 {
        function balanceOf(address owner) external view returns (uint256 balance);
        function decimals() external view returns (uint8);
    }

    /// Subset of ERC-721 needed for transfers.
    #[derive(Debug)]
    interface IERC721 {
        function safeTransferFrom(address from, address to, uint256 tokenId) external;
    }
}

/// Fallback precision for tokens that don't answer `decimals()`.
pub const DEFAULT_DECIMALS: u8 = 18;

/// Check that a string is a well-formed 20-byte address.
///
/// Accepts the `0x` prefix or none. All-lowercase and all-uppercase hex is
/// accepted as-is; mixed case must carry a valid EIP-55 checksum.
pub fn is_address(candidate: &str) -> bool {
    let hex = candidate.strip_prefix("0x").unwrap_or(candidate);
    if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return false;
    }

    let has_lower = hex.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = hex.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper {
        return Address::parse_checksummed(format!("0x{}", hex), None).is_ok();
    }
    true
}

/// Parse an address after [`is_address`] validation.
pub fn parse_address(candidate: &str) -> Option<Address> {
    if !is_address(candidate) {
        return None;
    }
    candidate.parse::<Address>().ok()
}
