/* This file is part of Gegofi (https://gego.fi)
 *
 * Copyright (C) 2021-2026 Gegofi foundation
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use num_bigint::BigUint;

use crate::{Error, Result};

/// Decimal precision of protocol token amounts.
pub const BALANCE_BASE10_DECIMALS: usize = 18;

/// Decode a human-readable base10 amount string ("13.37") into its
/// fixed-point integer representation with the given decimal precision.
/// In strict mode, excess fractional digits are an error; otherwise they
/// are truncated.
pub fn decode_base10(amount: &str, decimal_places: usize, strict: bool) -> Result<BigUint> {
    let mut s: Vec<String> = amount.split('.').map(|x| x.to_string()).collect();

    match s.len() {
        1 => s.push(String::new()),
        2 => {}
        _ => return Err(Error::ParseFailed("Too many decimal points")),
    }

    if s[1].len() > decimal_places {
        if strict {
            return Err(Error::ParseFailed("Amount has too many decimals"))
        }
        s[1].truncate(decimal_places);
    }

    while s[1].len() < decimal_places {
        s[1].push('0');
    }

    let joined = s[0].clone() + &s[1];
    Ok(joined.parse::<BigUint>()?)
}

/// Encode a fixed-point integer amount into a human-readable base10
/// string, trimming trailing fractional zeroes.
pub fn encode_base10(amount: &BigUint, decimal_places: usize) -> String {
    let mut amount_str = amount.to_str_radix(10);

    while amount_str.len() <= decimal_places {
        amount_str.insert(0, '0');
    }

    amount_str.insert(amount_str.len() - decimal_places, '.');
    amount_str.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base10_decoding() {
        assert_eq!(decode_base10("1", 18, true).unwrap(), BigUint::from(10u64.pow(18)));
        assert_eq!(decode_base10("1.5", 18, true).unwrap(), BigUint::from(15u64 * 10u64.pow(17)));
        assert_eq!(decode_base10("0.000000000000000001", 18, true).unwrap(), BigUint::from(1u32));
        assert_eq!(decode_base10("11.55", 2, true).unwrap(), BigUint::from(1155u32));

        // Truncation vs strict
        assert_eq!(decode_base10("1.234", 2, false).unwrap(), BigUint::from(123u32));
        assert!(decode_base10("1.234", 2, true).is_err());

        assert!(decode_base10("1.2.3", 18, true).is_err());
        assert!(decode_base10("nan", 18, true).is_err());
    }

    #[test]
    fn base10_encoding() {
        assert_eq!(encode_base10(&BigUint::from(10u64.pow(18)), 18), "1");
        assert_eq!(encode_base10(&BigUint::from(15u64 * 10u64.pow(17)), 18), "1.5");
        assert_eq!(encode_base10(&BigUint::from(1u32), 18), "0.000000000000000001");
        assert_eq!(encode_base10(&BigUint::from(0u32), 18), "0");
        assert_eq!(encode_base10(&BigUint::from(1155u32), 2), "11.55");

        // Amounts above u64 range survive the round trip
        let large = decode_base10("123456789012345678901.5", 18, true).unwrap();
        assert_eq!(encode_base10(&large, 18), "123456789012345678901.5");
    }
}
