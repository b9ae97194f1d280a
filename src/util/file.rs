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

use std::{fs, path::Path};

use crate::Result;

pub fn load_file(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

pub fn save_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents)?;
    Ok(())
}

/// Write the default configuration to the given path, unless a file is
/// already there.
pub fn spawn_config(path: &Path, contents: &str) -> Result<()> {
    if path.exists() {
        return Ok(())
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    save_file(path, contents)?;
    println!("Initialized configuration file: {}", path.display());

    Ok(())
}
