//! # Shared Utility Functions
//!
//! ## Address Formatting
//!
//! Functions for formatting wallet addresses for display:
//! - [`format_address`] - Format address with ellipsis (first N and last M characters)
//! - [`truncate_address`] - `format_address` with 4/4 defaults
//!
//! ## Wallet Linking
//!
//! - [`build_linking_message`] - Challenge text a wallet signs to prove ownership
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::format_address;
//!
//! let address = "8W6QginkhTTxoP2deQjq7rZ9YMwN5FH9JYuLfSKuJKAL";
//! let formatted = format_address(address, 4, 4);
//! assert_eq!(formatted, "8W6Q...JKAL");
//! ```

/// Domain shown to the user inside the signature request
pub const LINKING_DOMAIN: &str = "marketplace";

/// Format a wallet address by showing the first `prefix_len` and last `suffix_len` characters.
///
/// If the address is shorter than `prefix_len + suffix_len`, it is returned as-is.
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_address;
///
/// let addr = "8W6QginkhTTxoP2deQjq7rZ9YMwN5FH9JYuLfSKuJKAL";
/// assert_eq!(format_address(addr, 4, 4), "8W6Q...JKAL");
/// assert_eq!(format_address(addr, 6, 6), "8W6Qgi...uJKAL");
/// assert_eq!(format_address("short", 4, 4), "short");
/// ```
pub fn format_address(address: &str, prefix_len: usize, suffix_len: usize) -> String {
    let address_len = address.len();

    if address_len <= prefix_len + suffix_len
        || prefix_len >= address_len
        || suffix_len >= address_len
        || !address.is_ascii()
    {
        return address.to_string();
    }

    // ASCII checked above, byte slicing is char-aligned
    let prefix = &address[..prefix_len];
    let suffix = &address[address_len - suffix_len..];

    format!("{}...{}", prefix, suffix)
}

/// Format a wallet address with default 4-character prefix and suffix.
pub fn truncate_address(address: &str) -> String {
    format_address(address, 4, 4)
}

/// Build the challenge text a wallet signs to link `address` as the primary wallet.
///
/// The text depends only on `address`: repeated requests for the same wallet show the
/// user the same challenge, and the backend can rebuild it to verify the signature.
///
/// ```rust
/// use shared::utils::build_linking_message;
///
/// let a = build_linking_message("8W6QginkhTTxoP2deQjq7rZ9YMwN5FH9JYuLfSKuJKAL");
/// let b = build_linking_message("8W6QginkhTTxoP2deQjq7rZ9YMwN5FH9JYuLfSKuJKAL");
/// assert_eq!(a, b);
/// ```
pub fn build_linking_message(address: &str) -> String {
    format!(
        "Sign this message to link your wallet to your {} account.\n\n\
         Wallet: {}\n\
         Role: primary\n\n\
         This request will not trigger a blockchain transaction or cost any fees.",
        LINKING_DOMAIN, address
    )
}
