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
//! Describes the outcome of analysing one snapshot.

use std::io::Write;

use serde::Serialize;

use crate::{
    records::{Route, RouteRecord},
    Error,
};

use super::{analyze, ClassificationResult, HopTags, PathAnalysis, Visibility};

/// A route together with the prepends found on its path. The analysis is computed once on
/// construction and cannot be changed afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AnnotatedRoute {
    #[serde(flatten)]
    route: Route,
    #[serde(flatten)]
    analysis: PathAnalysis,
}

impl AnnotatedRoute {
    pub fn new(route: Route) -> Self {
        let analysis = analyze(&route.path);
        Self { route, analysis }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn analysis(&self) -> &PathAnalysis {
        &self.analysis
    }

    /// Tags of every hop on the path, in path order.
    pub fn hop_tags(&self) -> Vec<HopTags> {
        HopTags::for_path(&self.route.path, &self.analysis)
    }
}

impl From<Route> for AnnotatedRoute {
    fn from(route: Route) -> Self {
        Self::new(route)
    }
}

impl From<&AnnotatedRoute> for RouteRecord {
    fn from(r: &AnnotatedRoute) -> Self {
        Self {
            collector: r.route.collector,
            path: r.route.path.clone(),
            path_length: r.route.path.len(),
            community: r.route.community.clone(),
            origin_prepends: r.analysis.origin_prepends.len(),
            poisoned_routes: r.analysis.poisoned_routes.len(),
            total_prepends: r.analysis.prepends.len(),
        }
    }
}

/// Result of the analysis of one snapshot. Both the route table and the collector buckets are
/// derived from the same input.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Every input route, annotated, in input order.
    pub annotated_routes: Vec<AnnotatedRoute>,
    /// Collectors bucketed by visibility.
    pub classification: ClassificationResult,
}

impl AnalysisResult {
    /// Rows of the route table.
    pub fn records(&self) -> Vec<RouteRecord> {
        self.annotated_routes.iter().map(RouteRecord::from).collect()
    }

    /// Write the route table as `;`-separated CSV with a header row.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), Error> {
        let mut csv = csv::WriterBuilder::new()
            .has_headers(true)
            .delimiter(b';')
            .from_writer(writer);
        for record in self.records() {
            csv.serialize(record)?;
        }
        csv.flush()?;
        Ok(())
    }

    /// Number of collectors per bucket.
    pub fn summary(&self) -> SeriesSummary {
        self.classification.summary()
    }
}

impl std::fmt::Display for AnalysisResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let n_prepended = self
            .annotated_routes
            .iter()
            .filter(|r| r.analysis.origin_prepended())
            .count();
        let n_poisoned = self
            .annotated_routes
            .iter()
            .filter(|r| r.analysis.is_poisoned())
            .count();
        write!(
            f,
            "{} routes ({n_prepended} origin-prepended, {n_poisoned} poisoned), {}",
            self.annotated_routes.len(),
            self.summary(),
        )
    }
}

/// Number of collectors in each bucket, as shown in the legend of a map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesSummary {
    pub visible: usize,
    pub prepended_only: usize,
    pub invisible: usize,
}

impl SeriesSummary {
    pub fn get(&self, visibility: Visibility) -> usize {
        match visibility {
            Visibility::Visible => self.visible,
            Visibility::PrependedOnly => self.prepended_only,
            Visibility::Invisible => self.invisible,
        }
    }
}

impl ClassificationResult {
    pub fn summary(&self) -> SeriesSummary {
        SeriesSummary {
            visible: self.visible.len(),
            prepended_only: self.prepended_only.len(),
            invisible: self.invisible.len(),
        }
    }
}

impl std::fmt::Display for SeriesSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}) | {} ({}) | {} ({})",
            Visibility::Visible,
            self.visible,
            Visibility::PrependedOnly,
            self.prepended_only,
            Visibility::Invisible,
            self.invisible,
        )
    }
}
