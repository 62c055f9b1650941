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
//! The parameters of a resource lookup.
//!
//! A query is resolved by an external fetch layer into one snapshot of routes. Only the
//! collector filter is relevant to the analysis itself; the remaining fields are passed through.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use time::{format_description, OffsetDateTime};

use crate::{analyzer::CollectorFilter, Error};

/// Characters of the resource that cannot be put into a query string verbatim.
const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'=');

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceQuery {
    /// The queried resource (e.g., a prefix or an AS). Not interpreted.
    pub resource: String,
    /// Restrict the query to a set of collectors.
    pub collectors: Option<CollectorFilter>,
    /// Point in time to look at. `None` means now.
    pub timestamp: Option<OffsetDateTime>,
    /// Whether the query is re-issued periodically.
    pub live: bool,
}

impl ResourceQuery {
    pub fn new(resource: impl Into<String>) -> Result<Self, Error> {
        let resource = resource.into().trim().to_string();
        if resource.is_empty() {
            return Err(Error::EmptyResource);
        }
        Ok(Self {
            resource,
            collectors: None,
            timestamp: None,
            live: false,
        })
    }

    pub fn collectors(mut self, collectors: Option<CollectorFilter>) -> Self {
        self.collectors = collectors;
        self
    }

    pub fn timestamp(mut self, timestamp: Option<OffsetDateTime>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn live(mut self, live: bool) -> Self {
        self.live = live;
        self
    }

    /// Query string understood by the resource endpoint, e.g.,
    /// `resources=193.0.0.0/21&collectors=0,1&timestamp=1600000000000`.
    pub fn to_query_string(&self) -> String {
        let mut query = format!(
            "resources={}",
            utf8_percent_encode(&self.resource, QUERY_VALUE)
        );
        if let Some(collectors) = &self.collectors {
            // the raw expression, so the fetch is restricted exactly like the classification
            query.push_str(&format!(
                "&collectors={}",
                utf8_percent_encode(collectors.as_str(), QUERY_VALUE)
            ));
        }
        if let Some(ts) = self.timestamp {
            query.push_str(&format!("&timestamp={}", ts.unix_timestamp_nanos() / 1_000_000));
        }
        query
    }
}

impl std::fmt::Display for ResourceQuery {
    /// Short description of the query, used as the subtitle of a result.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = vec![format!("Resource: {}", self.resource)];
        if let Some(collectors) = &self.collectors {
            parts.push(format!("Collector: {}", collectors.as_str()));
        }
        if let Some(ts) = self.timestamp {
            let fmt = format_description::parse("[year]-[month]-[day] [hour]:[minute]")
                .map_err(|_| std::fmt::Error)?;
            parts.push(format!(
                "Timestamp: {}",
                ts.format(&fmt).map_err(|_| std::fmt::Error)?
            ));
        }
        write!(f, "{}", parts.join(" | "))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_resource() {
        assert!(matches!(ResourceQuery::new(""), Err(Error::EmptyResource)));
        assert!(matches!(ResourceQuery::new("  "), Err(Error::EmptyResource)));
    }

    #[test]
    fn subtitle() {
        let query = ResourceQuery::new("193.0.0.0/21").unwrap();
        assert_eq!(query.to_string(), "Resource: 193.0.0.0/21");

        let query = query
            .collectors(CollectorFilter::parse("1,3"))
            .timestamp(OffsetDateTime::from_unix_timestamp(1_600_000_000).ok());
        assert_eq!(
            query.to_string(),
            "Resource: 193.0.0.0/21 | Collector: 1,3 | Timestamp: 2020-09-13 12:26"
        );
    }

    #[test]
    fn query_string() {
        let query = ResourceQuery::new("193.0.0.0/21").unwrap().live(true);
        assert!(query.live);
        assert_eq!(query.to_query_string(), "resources=193.0.0.0/21");

        let query = query
            .collectors(CollectorFilter::parse("3,1"))
            .timestamp(OffsetDateTime::from_unix_timestamp(1_600_000_000).ok());
        assert_eq!(
            query.to_query_string(),
            "resources=193.0.0.0/21&collectors=3,1&timestamp=1600000000000"
        );

        let query = ResourceQuery::new("AS 3333&x").unwrap();
        assert_eq!(query.to_query_string(), "resources=AS%203333%26x");
    }

    #[test]
    fn filter_without_ids_is_passed_through() {
        let query = ResourceQuery::new("193.0.0.0/21")
            .unwrap()
            .collectors(CollectorFilter::parse("rrc00"));
        assert_eq!(
            query.to_query_string(),
            "resources=193.0.0.0/21&collectors=rrc00"
        );
        assert_eq!(
            query.to_string(),
            "Resource: 193.0.0.0/21 | Collector: rrc00"
        );
    }
}
