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
//! Bucketing collectors by how they observe the queried resource.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::{
    records::{Collector, CollectorPoint},
    CollectorId,
};

use super::{filter::passes, AnnotatedRoute, CollectorFilter};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Deserialize,
    Serialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "camelCase")]
/// How a collector sees the resource.
pub enum Visibility {
    /// At least one route reaches the collector without the origin prepending itself.
    Visible,
    /// The collector only has routes on which the origin prepended itself.
    #[strum(serialize = "Visible with Prepend")]
    PrependedOnly,
    /// The collector has no route at all.
    #[strum(serialize = "Not Visible")]
    Invisible,
}

impl Visibility {
    /// Decide the visibility from the routes of a single collector. Stops at the first clean
    /// route.
    pub fn of<'a>(routes: impl IntoIterator<Item = &'a AnnotatedRoute>) -> Self {
        let mut result = Self::Invisible;
        for route in routes {
            if !route.analysis().origin_prepended() {
                return Self::Visible;
            }
            result = Self::PrependedOnly;
        }
        result
    }
}

/// Visibility of a single collector among the routes of all collectors.
pub fn visibility_of(id: CollectorId, routes: &[AnnotatedRoute]) -> Visibility {
    Visibility::of(routes.iter().filter(|r| r.route().collector == id))
}

/// Collectors partitioned into the three visibility buckets, each in input order.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub visible: Vec<CollectorPoint>,
    pub invisible: Vec<CollectorPoint>,
    pub prepended_only: Vec<CollectorPoint>,
}

impl ClassificationResult {
    /// The points of a single bucket.
    pub fn bucket(&self, visibility: Visibility) -> &[CollectorPoint] {
        match visibility {
            Visibility::Visible => &self.visible,
            Visibility::PrependedOnly => &self.prepended_only,
            Visibility::Invisible => &self.invisible,
        }
    }

    fn bucket_mut(&mut self, visibility: Visibility) -> &mut Vec<CollectorPoint> {
        match visibility {
            Visibility::Visible => &mut self.visible,
            Visibility::PrependedOnly => &mut self.prepended_only,
            Visibility::Invisible => &mut self.invisible,
        }
    }

    /// Bucket of a collector, if it was classified.
    pub fn visibility_of(&self, id: CollectorId) -> Option<Visibility> {
        Visibility::iter().find(|v| self.bucket(*v).iter().any(|p| p.id == id))
    }

    /// Total number of classified collectors.
    pub fn len(&self) -> usize {
        self.visible.len() + self.invisible.len() + self.prepended_only.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Classify every collector that passes the `filter` by the routes it observed.
pub fn classify(
    collectors: &[Collector],
    routes: &[AnnotatedRoute],
    filter: Option<&CollectorFilter>,
) -> ClassificationResult {
    let by_collector = routes
        .iter()
        .into_group_map_by(|route| route.route().collector);

    let mut result = ClassificationResult::default();
    for collector in collectors {
        if !passes(filter, collector.id) {
            log::trace!("Collector {} excluded by the filter", collector.id);
            continue;
        }
        let visibility =
            Visibility::of(by_collector.get(&collector.id).into_iter().flatten().copied());
        log::trace!("Collector {} ({}): {visibility}", collector.id, collector.name);
        result
            .bucket_mut(visibility)
            .push(CollectorPoint::from(collector));
    }
    result
}
