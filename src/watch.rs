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
//! Live mode: analyze the same query periodically.
//!
//! The route and collector files are expected to be refreshed by an external fetcher. Each tick
//! reloads them and runs the analysis exactly once. Ticks never overlap, so a result is always
//! printed before the next snapshot is loaded.
use std::{path::PathBuf, time::Duration};

use clap::Parser;
use tokio::time::MissedTickBehavior;

use previs::{analyzer::CollectorFilter, query::ResourceQuery, snapshot::Snapshot, util};

mod output;
use output::OutputFormat;

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
struct Args {
    /// JSON list of all collectors.
    #[arg(short, long)]
    collectors: PathBuf,
    /// JSON route document, rewritten by the fetcher.
    #[arg(short, long)]
    routes: PathBuf,
    /// Comma-separated collector ids the routes are queried for.
    #[arg(long)]
    filter: Option<String>,
    /// Resource the routes are queried for.
    #[arg(long)]
    resource: Option<String>,
    /// Seconds between two analyses.
    #[arg(short, long, default_value_t = 60)]
    interval: u64,
    /// Stop after this many analyses.
    #[arg(long)]
    ticks: Option<usize>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
    format: OutputFormat,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    util::init_logging()?;
    let args = Args::parse();

    let filter = args.filter.as_deref().and_then(CollectorFilter::parse);
    let query = args
        .resource
        .as_deref()
        .map(|r| ResourceQuery::new(r).map(|q| q.collectors(filter.clone()).live(true)))
        .transpose()?;

    let mut interval = tokio::time::interval(Duration::from_secs(args.interval.max(1)));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut tick = 0;
    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                log::info!("Interrupted, stopping after {tick} analyses");
                break;
            }
        }
        tick += 1;
        log::info!("Tick {tick}");

        let routes = args.routes.clone();
        let collectors = args.collectors.clone();
        let tick_filter = filter.clone();
        let result = tokio::task::spawn_blocking(move || {
            Snapshot::load(routes, collectors).map(|s| s.analyze(tick_filter.as_ref()))
        })
        .await?;

        match result.and_then(|r| args.format.render(&r, query.as_ref())) {
            Ok(content) => println!("[{}] {content}", util::get_timestamp()),
            Err(e) => log::error!("Could not analyze the snapshot of tick {tick}: {e}"),
        }

        if args.ticks.is_some_and(|n| tick >= n) {
            break;
        }
    }

    Ok(())
}
