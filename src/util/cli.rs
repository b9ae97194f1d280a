/* This file is part of Gegofi (https://gego.fi)
 *
 * Copyright (C) 2021-2026 Gegofi foundation
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use simplelog::{Config, ConfigBuilder, LevelFilter};

/// Map `-v` occurrences to a log level (-vv supported).
pub fn get_log_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Logger configuration for the given verbosity. Runtime internals are
/// filtered out unless tracing everything.
pub fn get_log_config(verbosity: u8) -> Config {
    match verbosity {
        0..=2 => ConfigBuilder::new()
            .add_filter_ignore_str("async_io")
            .add_filter_ignore_str("polling")
            .build(),
        _ => Config::default(),
    }
}
