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
//! Library for analysing the visibility of a prefix across BGP route collectors.
//!
//! Every route observed by a collector is annotated with the prepends found on its AS path
//! (see [`analyzer::path`]), and the collectors are then bucketed into visible, prepended-only
//! and invisible vantage points (see [`analyzer::classify()`]).

/// Selected bgpsim AS identifier for this crate
pub use bgpsim::types::AsId as Asn;

/// Identifier of a route collector (vantage point).
pub type CollectorId = u32;

pub mod analyzer;
pub mod error;
pub mod query;
pub mod records;
pub mod snapshot;
pub mod util;

pub use error::Error;

#[cfg(test)]
mod test;

pub mod prelude {
    pub use super::{
        analyzer::{
            aggregate, analyze, classify, AnalysisResult, AnnotatedRoute, ClassificationResult,
            CollectorFilter, PathAnalysis, Visibility,
        },
        query::ResourceQuery,
        records::{Collector, CollectorPoint, Location, Route},
        snapshot::Snapshot,
        Asn, CollectorId, Error,
    };
}
