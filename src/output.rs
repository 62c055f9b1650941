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
//! Rendering of analysis results, shared by the binaries.

use clap::ValueEnum;

use previs::{analyzer::AnalysisResult, query::ResourceQuery, Error};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Annotated routes and collector buckets as a single JSON document.
    Json,
    /// The route table as `;`-separated CSV.
    Csv,
    /// One line with the number of routes and collectors per bucket.
    Summary,
}

impl OutputFormat {
    #[allow(dead_code)]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Summary => "txt",
        }
    }

    pub fn render(
        &self,
        result: &AnalysisResult,
        query: Option<&ResourceQuery>,
    ) -> Result<String, Error> {
        Ok(match self {
            Self::Json => serde_json::to_string_pretty(result)?,
            Self::Csv => {
                let mut buf = Vec::new();
                result.write_csv(&mut buf)?;
                String::from_utf8_lossy(&buf).into_owned()
            }
            Self::Summary => match query {
                Some(query) => format!("{query}: {result}"),
                None => result.to_string(),
            },
        })
    }
}
