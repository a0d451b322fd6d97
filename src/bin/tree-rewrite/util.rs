// -*- coding: utf-8 -*-
// ------------------------------------------------------------------------------------------------
// Copyright © 2021, tree-sitter authors.
// Licensed under either of Apache License, Version 2.0, or MIT license, at your option.
// Please see the LICENSE-APACHE or LICENSE-MIT files in this distribution for license details.
// ------------------------------------------------------------------------------------------------

use std::io::Write as _;
use std::path::Path;

use anyhow::anyhow;
use anyhow::Context as _;
use anyhow::Result;
use regex::Regex;
use tempfile::NamedTempFile;

/// Splits an apply file into its pattern and replacement parts.  The two are separated by the
/// first line consisting of three or more dashes.
pub(crate) fn split_apply_file(path: &Path) -> Result<(String, String)> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Error reading apply file {}", path.display()))?;
    let separator = Regex::new(r"(?m)^---+\n")?;
    let found = separator
        .find(&data)
        .ok_or_else(|| anyhow!("no separator line in {}", path.display()))?;
    Ok((
        data[..found.start()].to_string(),
        data[found.end()..].to_string(),
    ))
}

/// Saves data to a file by writing a temporary file in the same directory and renaming it over
/// the original.  The temporary file is cleaned up on every failure path.
pub(crate) fn save_file(path: &Path, data: &str) -> Result<()> {
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Error creating temporary file for {}", path.display()))?;
    tmp.write_all(data.as_bytes())
        .with_context(|| format!("Error writing temporary file for {}", path.display()))?;
    tmp.persist(path)
        .with_context(|| format!("Error replacing {}", path.display()))?;
    Ok(())
}
