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

use std::{
    env,
    path::{Path, PathBuf},
};

use crate::{Error, Result};

/// Returns the path to the user's home directory, from `$HOME`.
pub fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .and_then(|h| if h.is_empty() { None } else { Some(h) })
        .map(PathBuf::from)
}

/// Returns `$XDG_CONFIG_HOME`, `$HOME/.config`, or `None`.
pub fn config_dir() -> Option<PathBuf> {
    env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .filter(|p| p.is_absolute())
        .or_else(|| home_dir().map(|h| h.join(".config")))
}

/// Expand a leading tilde in a path against the home directory.
pub fn expand_path(path: &str) -> Result<PathBuf> {
    if !path.starts_with('~') {
        return Ok(PathBuf::from(path))
    }

    let Some(home) = home_dir() else {
        return Err(Error::ParseFailed("Could not find home directory"))
    };

    match path.strip_prefix("~/") {
        Some(remains) => Ok(home.join(remains)),
        None => Ok(home),
    }
}

/// Join a file with `config_dir()/gegofi`.
pub fn join_config_path(file: &Path) -> Result<PathBuf> {
    let mut path = PathBuf::new();

    if let Some(v) = config_dir() {
        path.push(v);
    }

    path.push("gegofi");
    path.push(file);

    Ok(path)
}

/// Resolve the configuration file path from an optional CLI argument,
/// falling back to the default name under the config directory.
pub fn get_config_path(arg: Option<String>, fallback: &str) -> Result<PathBuf> {
    match arg {
        Some(a) => expand_path(&a),
        None => join_config_path(&PathBuf::from(fallback)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_expansion() {
        let plain = expand_path("/tmp/gfi.toml").unwrap();
        assert_eq!(plain, PathBuf::from("/tmp/gfi.toml"));

        if let Some(home) = home_dir() {
            assert_eq!(expand_path("~/gfi.toml").unwrap(), home.join("gfi.toml"));
            assert_eq!(expand_path("~").unwrap(), home);
        }
    }
}
