// PREVIS: Prefix Visibility and Prepend Analysis across BGP Route Collectors
// Copyright (C) 2024-2025 Roland Schmid <roschmi@ethz.ch> and Tibor Schneider <sctibor@ethz.ch>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//! Restricting an analysis to a subset of collectors.

use std::{collections::BTreeSet, convert::Infallible, str::FromStr};

use itertools::Itertools;

use crate::CollectorId;

/// Set of collector ids an analysis is restricted to.
///
/// The absence of a restriction is expressed as `Option::<CollectorFilter>::None`. A filter that
/// was given but holds no valid id matches no collector at all.
///
/// The text the filter was parsed from is kept, so that the same expression is sent to the
/// endpoint that fetches the routes. Two filters are equal if they hold the same ids.
#[derive(Clone, Debug, Default)]
pub struct CollectorFilter {
    ids: BTreeSet<CollectorId>,
    source: String,
}

impl PartialEq for CollectorFilter {
    fn eq(&self, other: &Self) -> bool {
        self.ids == other.ids
    }
}

impl Eq for CollectorFilter {}

impl CollectorFilter {
    /// Parse a comma-separated list of collector ids. Returns `None` if the input is empty,
    /// which means that no restriction applies. Tokens that are not ids are dropped.
    pub fn parse(s: &str) -> Option<Self> {
        if s.trim().is_empty() {
            return None;
        }
        Some(s.parse().unwrap_or_default())
    }

    /// Whether the collector passes the filter.
    pub fn matches(&self, id: CollectorId) -> bool {
        self.ids.contains(&id)
    }

    /// Collector ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = CollectorId> + '_ {
        self.ids.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The filter expression as it was given, including tokens that are not ids.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl FromStr for CollectorFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ids = s
            .split(',')
            .map(str::trim)
            .filter(|x| !x.is_empty())
            .filter_map(|x| match x.parse::<CollectorId>() {
                Ok(id) => Some(id),
                Err(e) => {
                    log::debug!("Ignoring collector filter token {x:?}: {e}");
                    None
                }
            })
            .collect();
        Ok(Self {
            ids,
            source: s.trim().to_string(),
        })
    }
}

impl FromIterator<CollectorId> for CollectorFilter {
    fn from_iter<T: IntoIterator<Item = CollectorId>>(iter: T) -> Self {
        let ids: BTreeSet<CollectorId> = iter.into_iter().collect();
        let source = ids.iter().join(",");
        Self { ids, source }
    }
}

impl std::fmt::Display for CollectorFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.ids.iter().join(","))
    }
}

/// Whether a collector passes an optional filter.
pub(crate) fn passes(filter: Option<&CollectorFilter>, id: CollectorId) -> bool {
    filter.map_or(true, |f| f.matches(id))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_absent() {
        assert_eq!(CollectorFilter::parse(""), None);
        assert_eq!(CollectorFilter::parse("  "), None);
        assert!(passes(None, 42));
    }

    #[test]
    fn parse_ids() {
        let filter = CollectorFilter::parse("3, 1,,12").unwrap();
        assert_eq!(filter.ids().collect::<Vec<_>>(), vec![1, 3, 12]);
        assert!(filter.matches(1));
        assert!(filter.matches(12));
        assert!(!filter.matches(2));
        assert_eq!(filter.to_string(), "1,3,12");
        assert_eq!(filter.as_str(), "3, 1,,12");
        assert_eq!(CollectorFilter::from_iter([3, 1]).as_str(), "1,3");
    }

    #[test]
    fn parse_ignores_garbage() {
        let filter = CollectorFilter::parse("1,rrc00,-4,2.5").unwrap();
        assert_eq!(filter, CollectorFilter::from_iter([1]));

        // a given filter without any valid id matches nothing
        let filter = CollectorFilter::parse("rrc00").unwrap();
        assert!(filter.is_empty());
        assert_eq!(filter.as_str(), "rrc00");
        assert!(!passes(Some(&filter), 0));
    }
}
