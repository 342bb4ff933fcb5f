//! Asset references.

use std::fmt;

/// Literal that selects the chain's native coin.
pub const NATIVE_TOKEN: &str = "native";

/// What a balance query is about.
///
/// Token addresses are kept as given; they are validated when queried so a
/// malformed one can degrade to a zero balance instead of failing early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetRef {
    Native,
    FungibleToken(String),
}

impl AssetRef {
    /// `"native"` in any case is the native coin; anything else is a token
    /// contract address.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case(NATIVE_TOKEN) {
            Self::Native
        } else {
            Self::FungibleToken(raw.to_string())
        }
    }

    /// Label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::FungibleToken(_) => "token",
        }
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => write!(f, "{}", NATIVE_TOKEN),
            Self::FungibleToken(address) => write!(f, "{}", address),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_is_case_insensitive() {
        assert_eq!(AssetRef::parse("native"), AssetRef::Native);
        assert_eq!(AssetRef::parse("NATIVE"), AssetRef::Native);
        assert_eq!(AssetRef::parse("  Native "), AssetRef::Native);
    }

    #[test]
    fn test_anything_else_is_a_token() {
        let asset = AssetRef::parse("0x833589fcd6edb6e08f4c7c32d4f71b54bda02913");
        assert_eq!(
            asset,
            AssetRef::FungibleToken("0x833589fcd6edb6e08f4c7c32d4f71b54bda02913".into())
        );
        assert_eq!(asset.kind(), "token");
        assert_eq!(AssetRef::parse("nativex").kind(), "token");
    }
}
