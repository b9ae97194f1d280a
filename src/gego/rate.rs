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

//! Piecewise-linear mining-efficiency schedule. The result is the
//! reward-weighting value in on-chain units (efficiency scaled by 100000)
//! and feeds financial reward computations, so the division is done in
//! decimal arithmetic, never in floats.
use rust_decimal::Decimal;

/// One linear segment of a schedule, keyed by grade:
/// `efficiency = (quality - offset) * multiplier / divisor + base`.
#[derive(Clone, Copy, Debug)]
struct RateSegment {
    grade: u32,
    offset: i64,
    multiplier: i64,
    divisor: i64,
    base: i64,
}

/// Schedule of the standard collection.
const STANDARD_SCHEDULE: [RateSegment; 6] = [
    RateSegment { grade: 1, offset: 0, multiplier: 10000, divisor: 5000, base: 110000 },
    RateSegment { grade: 2, offset: 5000, multiplier: 10000, divisor: 3000, base: 120000 },
    RateSegment { grade: 3, offset: 8000, multiplier: 10000, divisor: 1000, base: 130000 },
    RateSegment { grade: 4, offset: 9000, multiplier: 20000, divisor: 800, base: 140000 },
    RateSegment { grade: 5, offset: 9800, multiplier: 20000, divisor: 180, base: 160000 },
    RateSegment { grade: 6, offset: 9980, multiplier: 20000, divisor: 20, base: 180000 },
];

/// Schedule of the signature collection.
const SIGNATURE_SCHEDULE: [RateSegment; 5] = [
    RateSegment { grade: 1, offset: 0, multiplier: 40000, divisor: 5000, base: 200000 },
    RateSegment { grade: 2, offset: 5000, multiplier: 40000, divisor: 2000, base: 240000 },
    RateSegment { grade: 3, offset: 7000, multiplier: 40000, divisor: 1500, base: 280000 },
    RateSegment { grade: 4, offset: 8500, multiplier: 40000, divisor: 1000, base: 320000 },
    RateSegment { grade: 5, offset: 9500, multiplier: 40000, divisor: 500, base: 360000 },
];

/// Which schedule family an item's collection belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Family {
    Standard,
    Signature,
}

/// Rate an item's `(grade, quality)` on the given family's schedule.
/// A grade outside the table falls through to the last (highest) segment
/// rather than raising an error; that matches the on-chain tables, which
/// never validate the grade either.
pub fn fix_rate(family: Family, grade: u32, quality: u32) -> Decimal {
    let schedule: &[RateSegment] = match family {
        Family::Standard => &STANDARD_SCHEDULE,
        Family::Signature => &SIGNATURE_SCHEDULE,
    };

    let mut segment = &schedule[schedule.len() - 1];
    for candidate in schedule {
        if candidate.grade == grade {
            segment = candidate;
            break
        }
    }

    let spread = Decimal::from(quality as i64 - segment.offset);
    spread * Decimal::from(segment.multiplier) / Decimal::from(segment.divisor) +
        Decimal::from(segment.base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_boundaries_are_exact() {
        assert_eq!(fix_rate(Family::Standard, 1, 0), Decimal::from(110000));
        assert_eq!(fix_rate(Family::Standard, 1, 5000), Decimal::from(120000));
        assert_eq!(fix_rate(Family::Standard, 2, 5000), Decimal::from(120000));
        assert_eq!(fix_rate(Family::Standard, 3, 8000), Decimal::from(130000));
        assert_eq!(fix_rate(Family::Standard, 4, 9000), Decimal::from(140000));
        assert_eq!(fix_rate(Family::Standard, 5, 9800), Decimal::from(160000));
        assert_eq!(fix_rate(Family::Standard, 6, 9980), Decimal::from(180000));
        assert_eq!(fix_rate(Family::Standard, 6, 10000), Decimal::from(200000));
    }

    #[test]
    fn signature_boundaries_are_exact() {
        assert_eq!(fix_rate(Family::Signature, 1, 0), Decimal::from(200000));
        assert_eq!(fix_rate(Family::Signature, 2, 5000), Decimal::from(240000));
        assert_eq!(fix_rate(Family::Signature, 3, 7000), Decimal::from(280000));
        assert_eq!(fix_rate(Family::Signature, 4, 8500), Decimal::from(320000));
        assert_eq!(fix_rate(Family::Signature, 5, 9500), Decimal::from(360000));
        assert_eq!(fix_rate(Family::Signature, 5, 10000), Decimal::from(400000));
    }

    #[test]
    fn monotonic_within_each_grade_range() {
        let ranges: [(u32, u32, u32); 6] = [
            (1, 0, 5000),
            (2, 5000, 8000),
            (3, 8000, 9000),
            (4, 9000, 9800),
            (5, 9800, 9980),
            (6, 9980, 10000),
        ];

        for (grade, lo, hi) in ranges {
            let mut prev = fix_rate(Family::Standard, grade, lo);
            for quality in lo + 1..=hi {
                let cur = fix_rate(Family::Standard, grade, quality);
                assert!(cur >= prev, "grade {grade} not monotonic at quality {quality}");
                prev = cur;
            }
        }
    }

    #[test]
    fn fractional_steps_stay_decimal() {
        // (6000 - 5000) * 10000 / 3000 + 120000 = 123333.33...
        let rate = fix_rate(Family::Standard, 2, 6000);
        assert!(rate > Decimal::from(123333));
        assert!(rate < Decimal::from(123334));
    }

    #[test]
    fn out_of_range_grade_falls_through_to_highest_segment() {
        assert_eq!(fix_rate(Family::Standard, 7, 10000), fix_rate(Family::Standard, 6, 10000));
        assert_eq!(fix_rate(Family::Standard, 0, 10000), fix_rate(Family::Standard, 6, 10000));
        assert_eq!(fix_rate(Family::Signature, 9, 9600), fix_rate(Family::Signature, 5, 9600));
    }
}
