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
//! End-to-end tests of the analysis of whole snapshots.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use rayon::prelude::*;
use strum::IntoEnumIterator;

use crate::prelude::*;

fn collector(id: CollectorId) -> Collector {
    Collector {
        id,
        name: format!("rrc{id:02}"),
        location: Location {
            geographical: format!("City {id}"),
            topological: format!("IXP {id}"),
            country_code: "XX".to_string(),
            latitude: id as f64,
            longitude: -(id as f64),
        },
    }
}

fn route(collector: CollectorId, path: &[u32]) -> Route {
    Route::new(collector, path.iter().copied().map(Asn))
}

/// Ten collectors: 0-3 see clean routes, 4-6 only prepended ones, and 7-9 see nothing.
fn snapshot() -> Snapshot {
    let mut routes = Vec::new();
    for c in 0..4 {
        routes.push(route(c, &[3333, 1299, 64500]));
        routes.push(route(c, &[3333, 64500, 64500]));
    }
    for c in 4..7 {
        routes.push(route(c, &[174, 64500, 64500, 64500]));
        routes.push(route(c, &[174, 64500, 2914, 64500]));
    }
    Snapshot::new(routes, (0..10).map(collector).collect())
}

fn ids(points: &[CollectorPoint]) -> Vec<CollectorId> {
    points.iter().map(|p| p.id).collect()
}

#[test]
fn classification() {
    let result = snapshot().analyze(None);
    assert_eq!(result.annotated_routes.len(), 14);
    assert_eq!(ids(&result.classification.visible), vec![0, 1, 2, 3]);
    assert_eq!(ids(&result.classification.prepended_only), vec![4, 5, 6]);
    assert_eq!(ids(&result.classification.invisible), vec![7, 8, 9]);

    let poisoned = &result.annotated_routes[13];
    assert_eq!(poisoned.analysis().poison_prepends, vec![Asn(64500)]);
    assert_eq!(poisoned.analysis().poisoned_routes, vec![Asn(2914)]);
}

#[test]
fn filter_is_applied_to_collectors_only() {
    let s = snapshot();
    let filter = CollectorFilter::parse("0,4,7,foo").unwrap();
    let result = aggregate(s.routes.clone(), &s.collectors, Some(&filter));

    assert_eq!(result.annotated_routes.len(), s.routes.len());
    assert_eq!(ids(&result.classification.visible), vec![0]);
    assert_eq!(ids(&result.classification.prepended_only), vec![4]);
    assert_eq!(ids(&result.classification.invisible), vec![7]);
}

#[test]
fn idempotent() {
    let s = snapshot();
    let a = s.analyze(None);
    let b = s.analyze(None);
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn collector_order() {
    let s = snapshot();
    let expected = s.analyze(None);
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..20 {
        let mut collectors = s.collectors.clone();
        collectors.shuffle(&mut rng);
        let result = aggregate(s.routes.clone(), &collectors, None);

        for visibility in Visibility::iter() {
            // same members, in the order of the shuffled input
            let order: Vec<CollectorId> = collectors
                .iter()
                .map(|c| c.id)
                .filter(|id| expected.classification.visibility_of(*id) == Some(visibility))
                .collect();
            assert_eq!(ids(result.classification.bucket(visibility)), order);
        }
    }
}

#[test]
fn concurrent_calls() {
    let s = snapshot();
    let expected = s.analyze(None);
    let results: Vec<AnalysisResult> = (0..64).into_par_iter().map(|_| s.analyze(None)).collect();
    assert!(results.iter().all(|r| *r == expected));
}

#[test]
fn json_bundle() {
    let s = Snapshot::new(
        vec![route(1, &[100, 200]), route(2, &[100, 50, 50])],
        vec![collector(1), collector(2), collector(3)],
    );
    let json = serde_json::to_value(s.analyze(None)).unwrap();
    assert_eq!(json["annotatedRoutes"][1]["originPrepends"], serde_json::json!([50]));
    assert_eq!(json["classification"]["visible"][0]["id"], 1);
    assert_eq!(json["classification"]["prependedOnly"][0]["name"], "rrc02");
    assert_eq!(json["classification"]["invisible"][0]["countryCode"], "XX");
}
