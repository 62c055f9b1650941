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
//! Module defining the data types observed from route collectors, and the record type used to
//! (de-)serialize annotated routes to CSV.
use serde::{de::IntoDeserializer, Deserialize, Deserializer, Serialize, Serializer};

use crate::{Asn, CollectorId};

/// A route for the queried resource as observed by a single collector.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Route {
    /// Collector that observed the route.
    pub collector: CollectorId,
    /// AS path, starting at the AS next to the collector. The last element is the origin.
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub path: Vec<Asn>,
    /// BGP communities attached to the route.
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub community: Vec<String>,
}

impl Route {
    pub fn new(collector: CollectorId, path: impl IntoIterator<Item = Asn>) -> Self {
        Self {
            collector,
            path: path.into_iter().collect(),
            community: Vec::new(),
        }
    }

    /// The AS that originated the advertisement, if the path is not empty.
    pub fn origin(&self) -> Option<Asn> {
        self.path.last().copied()
    }
}

/// Where a collector is located, both on earth and in the AS topology.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub geographical: String,
    pub topological: String,
    pub country_code: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Static reference data of a route collector.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Collector {
    pub id: CollectorId,
    pub name: String,
    pub location: Location,
}

/// Flattened collector used as a point on a map.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectorPoint {
    pub id: CollectorId,
    pub name: String,
    pub geographical: String,
    pub topological: String,
    pub country_code: String,
    pub lat: f64,
    pub lon: f64,
}

impl From<&Collector> for CollectorPoint {
    fn from(c: &Collector) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            geographical: c.location.geographical.clone(),
            topological: c.location.topological.clone(),
            country_code: c.location.country_code.clone(),
            lat: c.location.latitude,
            lon: c.location.longitude,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
/// One row of the route table: an annotated route reduced to what is shown per column.
pub struct RouteRecord {
    pub collector: CollectorId,
    #[serde(
        serialize_with = "serialize_asn_list",
        deserialize_with = "deserialize_asn_list"
    )]
    pub path: Vec<Asn>,
    pub path_length: usize,
    #[serde(serialize_with = "serialize_list", deserialize_with = "deserialize_list")]
    pub community: Vec<String>,
    pub origin_prepends: usize,
    pub poisoned_routes: usize,
    pub total_prepends: usize,
}

/// Treat an explicit `null` the same as an absent field.
fn deserialize_null_default<'de, D: Deserializer<'de>, T: Deserialize<'de> + Default>(
    deserializer: D,
) -> Result<T, D::Error> {
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn serialize_asn_list<S: Serializer>(list: &[Asn], serializer: S) -> Result<S::Ok, S::Error> {
    // `Asn` displays as `AS{x}`, but the table only holds the numbers
    let list_str = list
        .iter()
        .map(|x| x.0.to_string())
        .collect::<Vec<_>>()
        .join(",");

    serializer.serialize_str(&list_str)
}

fn serialize_list<S: Serializer, T: ToString>(
    list: &[T],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let list_str = list
        .iter()
        .map(|x| x.to_string())
        .collect::<Vec<_>>()
        .join(",");

    serializer.serialize_str(&list_str)
}

fn deserialize_asn_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Asn>, D::Error> {
    let buf = String::deserialize(deserializer)?;
    if buf.is_empty() {
        return Ok(Vec::new());
    }
    buf.split(',')
        .map(|x| {
            x.parse::<u32>()
                .map(Asn)
                .map_err(serde::de::Error::custom)
        })
        .collect()
}

fn deserialize_list<'de, D: Deserializer<'de>, T: Deserialize<'de>>(
    deserializer: D,
) -> Result<Vec<T>, D::Error> {
    let buf = String::deserialize(deserializer)?;
    if buf.is_empty() {
        return Ok(Vec::new());
    }
    buf.split(',')
        .map(|x| T::deserialize(x.into_deserializer()))
        .collect()
}
