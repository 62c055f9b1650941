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
//! Loading one snapshot of routes and collectors, as returned for a single query.
//!
//! Data from route collectors is frequently incomplete. Every route and collector is therefore
//! decoded on its own, and entries that cannot be decoded are skipped with a warning instead of
//! failing the whole snapshot.

use std::{fs, path::Path};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{
    analyzer::{aggregate, AnalysisResult, CollectorFilter},
    records::{Collector, Route},
    Error,
};

/// All routes and collectors of one query.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Snapshot {
    pub routes: Vec<Route>,
    pub collectors: Vec<Collector>,
}

impl Snapshot {
    pub fn new(routes: Vec<Route>, collectors: Vec<Collector>) -> Self {
        Self { routes, collectors }
    }

    /// Decode a snapshot from the JSON documents of the resource and the collector endpoint.
    ///
    /// The route document is either a list of routes or an object with a `routes` list. The
    /// collector document is a list of collectors.
    pub fn from_json(routes: &str, collectors: &str) -> Result<Self, Error> {
        let routes = match serde_json::from_str::<Value>(routes)? {
            Value::Array(routes) => routes,
            Value::Object(mut doc) => match doc.remove("routes") {
                Some(Value::Array(routes)) => routes,
                _ => return Err(Error::Document("expected a `routes` list")),
            },
            _ => return Err(Error::Document("expected a list of routes")),
        };
        let Value::Array(collectors) = serde_json::from_str::<Value>(collectors)? else {
            return Err(Error::Document("expected a list of collectors"));
        };

        Ok(Self {
            routes: decode_each(routes, "route"),
            collectors: decode_each(collectors, "collector"),
        })
    }

    /// Read and decode a snapshot from two JSON files.
    pub fn load(routes: impl AsRef<Path>, collectors: impl AsRef<Path>) -> Result<Self, Error> {
        let routes = routes.as_ref();
        log::info!("Loading: {routes:?}");
        let snapshot = Self::from_json(
            &fs::read_to_string(routes)?,
            &fs::read_to_string(collectors)?,
        )?;
        log::debug!(
            "Loaded {} routes and {} collectors",
            snapshot.routes.len(),
            snapshot.collectors.len()
        );
        Ok(snapshot)
    }

    /// Run the analysis on this snapshot.
    pub fn analyze(&self, filter: Option<&CollectorFilter>) -> AnalysisResult {
        aggregate(self.routes.iter().cloned(), &self.collectors, filter)
    }
}

fn decode_each<T: DeserializeOwned>(values: Vec<Value>, kind: &str) -> Vec<T> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| match serde_json::from_value(value) {
            Ok(x) => Some(x),
            Err(e) => {
                log::warn!("Skipping malformed {kind} at index {i}: {e}");
                None
            }
        })
        .collect()
}
