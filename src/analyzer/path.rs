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
//! Detection of prepends and AS path poisoning on a single route.
//!
//! An AS that appears more than once on a path has inserted itself multiple times (prepending),
//! usually to make the route less attractive. If the two occurrences are not adjacent, the ASes
//! between them are *poisoned*: they see their own AS on the path and drop the route, so the
//! advertisement does not propagate through them.

use serde::{Deserialize, Serialize};

use crate::Asn;

/// Prepends found on a single AS path.
///
/// All lists are in detection order, i.e., from the origin towards the collector.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathAnalysis {
    /// Every ASN that reappears closer to the collector than one of its occurrences.
    pub prepends: Vec<Asn>,
    /// The entries of `prepends` that equal the origin.
    pub origin_prepends: Vec<Asn>,
    /// The entries of `prepends` whose repeated occurrence is not adjacent.
    pub poison_prepends: Vec<Asn>,
    /// ASNs sandwiched between the two occurrences of a poisoning AS.
    pub poisoned_routes: Vec<Asn>,
}

impl PathAnalysis {
    /// Whether the origin prepended itself on this path.
    pub fn origin_prepended(&self) -> bool {
        !self.origin_prepends.is_empty()
    }

    /// Whether any AS poisoned this path.
    pub fn is_poisoned(&self) -> bool {
        !self.poison_prepends.is_empty()
    }
}

/// Analyze an AS path for prepends and poisoning.
///
/// The path is scanned from the origin towards the collector. For every position `i`, the
/// nearest position `j < i` carrying the same ASN is searched. If it exists, `path[i]` is a
/// prepend. If additionally `j < i - 1`, the ASNs strictly between `j` and `i` (positions
/// `j+1 ..= i-1`) are poisoned.
///
/// ```
/// # use previs::{analyzer::analyze, Asn};
/// let path = [100, 50, 77, 50].map(Asn);
/// let analysis = analyze(&path);
/// assert_eq!(analysis.prepends, vec![Asn(50)]);
/// assert_eq!(analysis.poisoned_routes, vec![Asn(77)]);
/// ```
pub fn analyze(path: &[Asn]) -> PathAnalysis {
    let mut result = PathAnalysis::default();
    let Some(origin) = path.last().copied() else {
        return result;
    };

    for i in (0..path.len()).rev() {
        let current = path[i];
        let Some(j) = path[..i].iter().rposition(|x| *x == current) else {
            continue;
        };

        result.prepends.push(current);
        if current == origin {
            result.origin_prepends.push(current);
        }
        if j + 1 < i {
            result.poison_prepends.push(current);
            result.poisoned_routes.extend_from_slice(&path[j + 1..i]);
        }
    }

    result
}

/// Categories a single hop of a path belongs to. A hop is tagged by its ASN, so every
/// occurrence of a prepending AS carries the tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HopTags {
    pub prepend: bool,
    pub origin_prepend: bool,
    pub poisoner: bool,
    pub poisoned: bool,
}

impl HopTags {
    /// Tag every hop of `path` given its analysis.
    pub fn for_path(path: &[Asn], analysis: &PathAnalysis) -> Vec<Self> {
        path.iter()
            .map(|asn| Self {
                prepend: analysis.prepends.contains(asn),
                origin_prepend: analysis.origin_prepends.contains(asn),
                poisoner: analysis.poison_prepends.contains(asn),
                poisoned: analysis.poisoned_routes.contains(asn),
            })
            .collect()
    }

    /// Whether the hop is plain, i.e., has no tag at all.
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn p(path: &[u32]) -> Vec<Asn> {
        path.iter().copied().map(Asn).collect()
    }

    #[test]
    fn empty_path() {
        assert_eq!(analyze(&[]), PathAnalysis::default());
    }

    #[test]
    fn no_repeats() {
        let a = analyze(&p(&[100, 200, 300]));
        assert_eq!(a, PathAnalysis::default());
        assert!(!a.origin_prepended());
        assert!(!a.is_poisoned());
    }

    #[test]
    fn adjacent_prepend() {
        let a = analyze(&p(&[300, 300, 200, 100]));
        assert_eq!(a.prepends, p(&[300]));
        assert!(a.origin_prepends.is_empty());
        assert!(a.poison_prepends.is_empty());
        assert!(a.poisoned_routes.is_empty());
    }

    #[test]
    fn origin_prepend() {
        let a = analyze(&p(&[100, 50, 50]));
        assert_eq!(a.prepends, p(&[50]));
        assert_eq!(a.origin_prepends, p(&[50]));
        assert!(a.poison_prepends.is_empty());
        assert!(a.poisoned_routes.is_empty());
        assert!(a.origin_prepended());
    }

    #[test]
    fn poisoning() {
        let a = analyze(&p(&[100, 50, 77, 50]));
        assert_eq!(a.prepends, p(&[50]));
        assert_eq!(a.origin_prepends, p(&[50]));
        assert_eq!(a.poison_prepends, p(&[50]));
        assert_eq!(a.poisoned_routes, p(&[77]));
        assert!(a.is_poisoned());
    }

    #[test]
    fn repeated_prepends_are_counted_once_per_hop() {
        // positions 5, 4 and 3 each find an adjacent predecessor
        let a = analyze(&p(&[10, 20, 30, 30, 30, 30]));
        assert_eq!(a.prepends, p(&[30, 30, 30]));
        assert_eq!(a.origin_prepends, p(&[30, 30, 30]));
        assert!(a.poison_prepends.is_empty());
    }

    #[test]
    fn nearest_predecessor_wins() {
        // 50 at index 4 matches index 2, not index 0
        let a = analyze(&p(&[50, 40, 50, 60, 50]));
        assert_eq!(a.prepends, p(&[50, 50]));
        assert_eq!(a.origin_prepends, p(&[50, 50]));
        assert_eq!(a.poison_prepends, p(&[50, 50]));
        assert_eq!(a.poisoned_routes, p(&[60, 40]));
    }

    #[test]
    fn poisoning_in_the_middle() {
        let a = analyze(&p(&[1, 2, 3, 4, 2, 5]));
        assert_eq!(a.prepends, p(&[2]));
        assert!(a.origin_prepends.is_empty());
        assert_eq!(a.poison_prepends, p(&[2]));
        assert_eq!(a.poisoned_routes, p(&[3, 4]));
    }

    #[test]
    fn interleaved_poisoning() {
        // scanning from the back: 8 (idx 4) matches idx 1, then 7 (idx 3) matches idx 0
        let a = analyze(&p(&[7, 8, 9, 7, 8]));
        assert_eq!(a.prepends, p(&[8, 7]));
        assert_eq!(a.origin_prepends, p(&[8]));
        assert_eq!(a.poison_prepends, p(&[8, 7]));
        assert_eq!(a.poisoned_routes, p(&[9, 7, 8, 9]));
    }

    #[test]
    fn hop_tags() {
        let path = p(&[100, 50, 77, 50]);
        let tags = HopTags::for_path(&path, &analyze(&path));
        assert_eq!(tags.len(), 4);
        assert!(tags[0].is_plain());
        assert_eq!(
            tags[1],
            HopTags {
                prepend: true,
                origin_prepend: true,
                poisoner: true,
                poisoned: false,
            }
        );
        assert_eq!(
            tags[2],
            HopTags {
                poisoned: true,
                ..Default::default()
            }
        );
        assert_eq!(tags[3], tags[1]);
    }
}
