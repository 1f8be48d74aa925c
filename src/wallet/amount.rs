// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Conversion between display amounts and integer micro-units.
//!
//! The remote service only ever exchanges integer micro-units
//! (1 SMR = 1,000,000 micros). Decimal strings exist only at the edge of the
//! client: what the user types and what the terminal shows.
//!
//! ## Rounding
//!
//! [`to_micros`] works on the decimal digits directly, never through a
//! float: the digits past the sixth fractional place are dropped and the
//! magnitude is rounded half away from zero on the first dropped digit.
//! `to_micros(&from_micros(m)) == m` holds for every `i64`.

/// Micro-units per display unit.
pub const MICROS_PER_UNIT: i64 = 1_000_000;

/// Fractional digits rendered by [`from_micros`].
pub const DISPLAY_DECIMALS: usize = 6;

/// Amount conversion error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("Invalid amount: {0:?} is not a finite number")]
    InvalidAmount(String),
}

/// Parse a decimal string into micro-units.
///
/// Accepts an optional sign, digits with an optional decimal point and an
/// optional `e`/`E` exponent (`"1.5"`, `".5"`, `"-2"`, `"1e-6"`). Leading and
/// trailing whitespace is ignored. Empty input, non-numeric text, `NaN`,
/// infinities and values outside the `i64` micro-unit range are rejected
/// with [`AmountError::InvalidAmount`].
pub fn to_micros(decimal: &str) -> Result<i64, AmountError> {
    let invalid = || AmountError::InvalidAmount(decimal.to_string());

    let text = decimal.trim();
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(at) => {
            let exponent: i64 = unsigned[at + 1..].parse().map_err(|_| invalid())?;
            (&unsigned[..at], exponent)
        }
        None => (unsigned, 0),
    };

    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let is_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if whole.len() + fraction.len() == 0 || !is_digits(whole) || !is_digits(fraction) {
        return Err(invalid());
    }

    let digits: Vec<u8> = whole
        .bytes()
        .chain(fraction.bytes())
        .map(|b| b - b'0')
        .skip_while(|&d| d == 0)
        .collect();
    if digits.is_empty() {
        return Ok(0);
    }

    // Decimal exponent of the last digit once scaled to micro-units.
    let shift = (DISPLAY_DECIMALS as i64 - fraction.len() as i64)
        .checked_add(exponent)
        .ok_or_else(invalid)?;

    let magnitude = if shift >= 0 {
        let scale = u32::try_from(shift)
            .ok()
            .and_then(|shift| 10u128.checked_pow(shift))
            .ok_or_else(invalid)?;
        accumulate(&digits)
            .and_then(|value| value.checked_mul(scale))
            .ok_or_else(invalid)?
    } else {
        let dropped = usize::try_from(shift.unsigned_abs()).unwrap_or(usize::MAX);
        if dropped > digits.len() {
            0
        } else {
            let (kept, rest) = digits.split_at(digits.len() - dropped);
            let round_up = rest.first().is_some_and(|&d| d >= 5);
            accumulate(kept)
                .and_then(|value| value.checked_add(u128::from(round_up)))
                .ok_or_else(invalid)?
        }
    };

    let limit = if negative {
        u128::from(i64::MIN.unsigned_abs())
    } else {
        i64::MAX as u128
    };
    if magnitude > limit {
        return Err(invalid());
    }

    let magnitude = magnitude as i128;
    // A negative value that rounds to zero comes back as plain 0.
    Ok((if negative { -magnitude } else { magnitude }) as i64)
}

fn accumulate(digits: &[u8]) -> Option<u128> {
    digits.iter().try_fold(0u128, |value, &digit| {
        value.checked_mul(10)?.checked_add(u128::from(digit))
    })
}

/// Render micro-units as a decimal string with exactly six fractional digits.
///
/// Integer arithmetic only, so every `i64` renders exactly.
pub fn from_micros(micros: i64) -> String {
    let sign = if micros < 0 { "-" } else { "" };
    let magnitude = micros.unsigned_abs();
    let per_unit = MICROS_PER_UNIT as u64;

    format!(
        "{sign}{}.{:0width$}",
        magnitude / per_unit,
        magnitude % per_unit,
        width = DISPLAY_DECIMALS
    )
}
