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
//! Utility module collection of functions

use std::path::{Path, PathBuf};

use time::OffsetDateTime;

/// Configuration file for `log4rs`, looked up in the working directory.
pub const LOG_CONFIG: &str = "log4rs.yml";

/// Set up logging. Uses `log4rs.yml` if it exists, and `pretty_env_logger` (configured through
/// `RUST_LOG`) otherwise.
pub fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    if Path::new(LOG_CONFIG).exists() {
        log4rs::init_file(LOG_CONFIG, Default::default())?;
    } else {
        pretty_env_logger::try_init()?;
    }
    Ok(())
}

/// Produces a timestamp `String` of the current time in YYYY-MM-DD_HH-mm-SS format.
pub fn get_timestamp() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    format!(
        "{:04}-{:02}-{:02}_{:02}-{:02}-{:02}",
        now.year(),
        u8::from(now.month()),
        now.day(),
        now.hour(),
        now.minute(),
        now.second()
    )
}

/// Convert milliseconds since the unix epoch, as used by the resource endpoint.
pub fn timestamp_from_millis(ms: i64) -> Option<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp_nanos(ms as i128 * 1_000_000).ok()
}

pub trait PathBufExt: Sized {
    fn then(self, p: impl AsRef<Path>) -> PathBuf;
}

impl PathBufExt for PathBuf {
    fn then(mut self, p: impl AsRef<Path>) -> PathBuf {
        self.push(p);
        self
    }
}

impl PathBufExt for &Path {
    fn then(self, p: impl AsRef<Path>) -> PathBuf {
        let mut path = self.to_path_buf();
        path.push(p);
        path
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn millis() {
        let ts = timestamp_from_millis(1_600_000_000_123).unwrap();
        assert_eq!(ts.unix_timestamp(), 1_600_000_000);
        assert_eq!(ts.millisecond(), 123);
        assert!(timestamp_from_millis(i64::MAX).is_none());
    }

    #[test]
    fn timestamp_format() {
        let ts = get_timestamp();
        assert_eq!(ts.len(), "2024-01-01_00-00-00".len());
        assert_eq!(&ts[4..5], "-");
        assert_eq!(&ts[10..11], "_");
    }

    #[test]
    fn path_ext() {
        let p = Path::new("out").then("snapshot.json");
        assert_eq!(p, PathBuf::from("out/snapshot.json"));
    }
}
