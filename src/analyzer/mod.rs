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
//! Module that performs the visibility analysis of a single snapshot.
//!
//! The analysis is a pure function of its inputs: every call annotates all routes from scratch
//! and classifies the collectors from those annotations. Nothing is cached between calls, so
//! repeated or concurrent calls on the same snapshot yield identical results.

use crate::records::{Collector, Route};

pub mod classify;
pub mod filter;
pub mod path;
mod result;

pub use classify::{classify, visibility_of, ClassificationResult, Visibility};
pub use filter::CollectorFilter;
pub use path::{analyze, HopTags, PathAnalysis};
pub use result::*;

/// Annotate every route and classify the collectors.
///
/// The same `filter` restricts the classified collectors that restricted the query for the
/// routes. Routes of collectors outside the filter are still annotated and returned.
pub fn aggregate(
    routes: impl IntoIterator<Item = Route>,
    collectors: &[Collector],
    filter: Option<&CollectorFilter>,
) -> AnalysisResult {
    let annotated_routes: Vec<AnnotatedRoute> =
        routes.into_iter().map(AnnotatedRoute::new).collect();
    let classification = classify(collectors, &annotated_routes, filter);

    log::debug!(
        "Analyzed {} routes of {} collectors: {}",
        annotated_routes.len(),
        collectors.len(),
        classification.summary()
    );

    AnalysisResult {
        annotated_routes,
        classification,
    }
}
