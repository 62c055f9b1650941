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
use std::{fs, path::PathBuf};

use clap::Parser;
use rayon::prelude::*;

use previs::{
    analyzer::CollectorFilter,
    query::ResourceQuery,
    snapshot::Snapshot,
    util::{self, PathBufExt},
    Error,
};

mod output;
use output::OutputFormat;

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
/// Classify route collectors by the visibility of a resource in one or more snapshots.
struct Args {
    /// JSON list of all collectors.
    #[arg(short, long)]
    collectors: PathBuf,
    /// JSON route documents. Every file is analyzed as an independent snapshot.
    #[arg(short, long, required = true, num_args = 1..)]
    routes: Vec<PathBuf>,
    /// Comma-separated collector ids the snapshots were queried for.
    #[arg(long)]
    filter: Option<String>,
    /// Resource the snapshots were queried for.
    #[arg(long)]
    resource: Option<String>,
    /// Point in time the snapshots were queried for, in milliseconds since the epoch.
    #[arg(long)]
    timestamp: Option<i64>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
    format: OutputFormat,
    /// Write one file per snapshot into this directory instead of printing to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    util::init_logging()?;
    let args = Args::parse();

    let filter = args.filter.as_deref().and_then(CollectorFilter::parse);
    let query = args
        .resource
        .as_deref()
        .map(|resource| {
            ResourceQuery::new(resource).map(|q| {
                q.collectors(filter.clone())
                    .timestamp(args.timestamp.and_then(util::timestamp_from_millis))
            })
        })
        .transpose()?;
    if let Some(query) = &query {
        log::info!("Query: {}", query.to_query_string());
    }

    let rendered = args
        .routes
        .par_iter()
        .map(|routes| -> Result<String, Error> {
            let snapshot = Snapshot::load(routes, &args.collectors)?;
            let result = snapshot.analyze(filter.as_ref());
            args.format.render(&result, query.as_ref())
        })
        .collect::<Result<Vec<_>, _>>()?;

    match &args.output {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let ts = util::get_timestamp();
            for (routes, content) in args.routes.iter().zip(rendered) {
                let stem = routes
                    .file_stem()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_else(|| "snapshot".to_string());
                let path = dir
                    .as_path()
                    .then(format!("{stem}_{ts}.{}", args.format.extension()));
                log::info!("Writing {path:?}");
                fs::write(path, content)?;
            }
        }
        None => {
            for content in rendered {
                println!("{content}");
            }
        }
    }

    Ok(())
}
