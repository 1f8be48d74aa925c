// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Recipient address grammar.

/// Human-readable prefix of every Shimmer address.
pub const ADDRESS_PREFIX: &str = "smr1";

/// Number of data characters following [`ADDRESS_PREFIX`].
pub const ADDRESS_DATA_LEN: usize = 59;

/// Bech32 data charset. Lowercase only.
pub const BECH32_CHARSET: &str = "qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// Returns `true` iff `candidate` is `smr1` followed by exactly 59 bech32
/// charset characters.
///
/// This is a shape check only; the checksum is left to the remote service.
pub fn is_valid_address(candidate: &str) -> bool {
    let Some(data) = candidate.strip_prefix(ADDRESS_PREFIX) else {
        return false;
    };

    // Byte length equals char count only for ASCII, and the charset is ASCII.
    data.len() == ADDRESS_DATA_LEN && data.bytes().all(|b| BECH32_CHARSET.as_bytes().contains(&b))
}
