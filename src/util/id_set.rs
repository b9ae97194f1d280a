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

use std::collections::HashSet;

/// An explicit set of item identifiers backing multi-select state.
#[derive(Clone, Debug, Default)]
pub struct IdSet(HashSet<String>);

impl IdSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the id was not yet selected.
    pub fn insert(&mut self, id: &str) -> bool {
        self.0.insert(id.to_string())
    }

    /// Returns true when the id was selected.
    pub fn remove(&mut self, id: &str) -> bool {
        self.0.remove(id)
    }

    /// Flip membership of an id. Returns the new membership state.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.0.remove(id) {
            return false
        }

        self.0.insert(id.to_string());
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_membership() {
        let mut set = IdSet::new();
        assert!(set.is_empty());

        assert!(set.toggle("42"));
        assert!(set.contains("42"));
        assert_eq!(set.len(), 1);

        assert!(!set.toggle("42"));
        assert!(!set.contains("42"));
        assert!(set.is_empty());

        assert!(set.insert("7"));
        assert!(!set.insert("7"));
        assert!(set.remove("7"));
        assert!(!set.remove("7"));
    }
}
