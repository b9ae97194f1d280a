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

//! Static grade tables for the two Gego collection families. For each
//! family the ordered configs partition `[0, 10000]` into contiguous
//! quality ranges `[quality_min, quality_max)`, ascending by level, with
//! the final entry closing at 10000 inclusive.

/// Discrete tier label derived from an item's quality percentile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Grade {
    Cleaner,
    Cashier,
    Trader,
    Manager,
    Director,
    Ceo,
}

impl Grade {
    pub fn title(self) -> &'static str {
        match self {
            Self::Cleaner => "Cleaner",
            Self::Cashier => "Cashier",
            Self::Trader => "Trader",
            Self::Manager => "Manager",
            Self::Director => "Director",
            Self::Ceo => "CEO",
        }
    }
}

/// One row of a collection's grade table.
#[derive(Clone, Copy, Debug)]
pub struct GradeConfig {
    pub grade: Grade,
    /// Numeric tier, 1-based, ascending with quality
    pub level: u32,
    /// Asset filename under the static grade-image directory convention,
    /// not validated at load
    pub image: &'static str,
    pub quality_min: u32,
    pub quality_max: u32,
}

/// Grade table of the standard collection (6 grades).
pub const STANDARD_GRADES: [GradeConfig; 6] = [
    GradeConfig { grade: Grade::Cleaner, level: 1, image: "gego-grade-1.png", quality_min: 0, quality_max: 5000 },
    GradeConfig { grade: Grade::Cashier, level: 2, image: "gego-grade-2.png", quality_min: 5000, quality_max: 8000 },
    GradeConfig { grade: Grade::Trader, level: 3, image: "gego-grade-3.png", quality_min: 8000, quality_max: 9000 },
    GradeConfig { grade: Grade::Manager, level: 4, image: "gego-grade-4.png", quality_min: 9000, quality_max: 9800 },
    GradeConfig { grade: Grade::Director, level: 5, image: "gego-grade-5.png", quality_min: 9800, quality_max: 9980 },
    GradeConfig { grade: Grade::Ceo, level: 6, image: "gego-grade-6.png", quality_min: 9980, quality_max: 10000 },
];

/// Grade table of the signature collection (5 grades).
pub const SIGNATURE_GRADES: [GradeConfig; 5] = [
    GradeConfig { grade: Grade::Cleaner, level: 1, image: "sig-grade-1.png", quality_min: 0, quality_max: 5000 },
    GradeConfig { grade: Grade::Cashier, level: 2, image: "sig-grade-2.png", quality_min: 5000, quality_max: 7000 },
    GradeConfig { grade: Grade::Trader, level: 3, image: "sig-grade-3.png", quality_min: 7000, quality_max: 8500 },
    GradeConfig { grade: Grade::Manager, level: 4, image: "sig-grade-4.png", quality_min: 8500, quality_max: 9500 },
    GradeConfig { grade: Grade::Director, level: 5, image: "sig-grade-5.png", quality_min: 9500, quality_max: 10000 },
];

/// Find the grade row a quality score falls into. Quality 10000 belongs
/// to the final row.
pub fn grade_for_quality(table: &'static [GradeConfig], quality: u32) -> &'static GradeConfig {
    for config in table {
        if quality < config.quality_max {
            return config
        }
    }

    &table[table.len() - 1]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_closed_partition(table: &'static [GradeConfig]) {
        let mut prev_max = 0;
        let mut prev_level = 0;
        for config in table {
            assert_eq!(config.quality_min, prev_max);
            assert!(config.quality_max > config.quality_min);
            assert!(config.level > prev_level);
            prev_max = config.quality_max;
            prev_level = config.level;
        }
        assert_eq!(prev_max, 10000);
    }

    #[test]
    fn tables_partition_the_quality_range() {
        assert_eq!(STANDARD_GRADES.len(), 6);
        assert_eq!(SIGNATURE_GRADES.len(), 5);
        assert_closed_partition(&STANDARD_GRADES);
        assert_closed_partition(&SIGNATURE_GRADES);
    }

    #[test]
    fn quality_lookup() {
        assert_eq!(grade_for_quality(&STANDARD_GRADES, 0).level, 1);
        assert_eq!(grade_for_quality(&STANDARD_GRADES, 4999).level, 1);
        assert_eq!(grade_for_quality(&STANDARD_GRADES, 5000).level, 2);
        assert_eq!(grade_for_quality(&STANDARD_GRADES, 9980).level, 6);
        assert_eq!(grade_for_quality(&STANDARD_GRADES, 10000).level, 6);

        assert_eq!(grade_for_quality(&SIGNATURE_GRADES, 9500).level, 5);
        assert_eq!(grade_for_quality(&SIGNATURE_GRADES, 10000).level, 5);
        assert_eq!(grade_for_quality(&SIGNATURE_GRADES, 10000).grade, Grade::Director);
    }
}
