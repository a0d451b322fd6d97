// -*- coding: utf-8 -*-
// ------------------------------------------------------------------------------------------------
// Copyright © 2021, tree-sitter authors.
// Licensed under either of Apache License, Version 2.0, or MIT license, at your option.
// Please see the LICENSE-APACHE or LICENSE-MIT files in this distribution for license details.
// ------------------------------------------------------------------------------------------------

use std::io::Read;
use std::path::Path;

use anyhow::anyhow;
use anyhow::Context as _;
use anyhow::Result;
use clap::App;
use clap::Arg;
use tree_rewrite::parse;
use tree_rewrite::replace;

mod util;

use util::save_file;
use util::split_apply_file;

const BUILD_VERSION: &'static str = env!("CARGO_PKG_VERSION");

fn main() -> Result<()> {
    let matches = App::new("tree-rewrite")
        .version(BUILD_VERSION)
        .about("Replaces occurrences of an expression pattern in curly-brace source files")
        .arg(
            Arg::with_name("apply")
                .long("apply")
                .takes_value(true)
                .value_name("FILE")
                .help(
                    "Read the pattern and replacement from FILE instead of the command line. \
                     The pattern comes first, separated from the replacement by a line \
                     consisting of three or more dashes.",
                ),
        )
        .arg(
            Arg::with_name("edit")
                .long("edit")
                .help("Rewrite the input files in place instead of printing to stdout"),
        )
        .arg(
            Arg::with_name("args")
                .index(1)
                .multiple(true)
                .help("Pattern, replacement, and input files; with --apply, input files only"),
        )
        .get_matches();

    let mut args: Vec<String> = matches
        .values_of("args")
        .map(|values| values.map(String::from).collect())
        .unwrap_or_default();

    let (pattern_text, replacement_text) = match matches.value_of("apply") {
        Some(path) => split_apply_file(Path::new(path))?,
        None => {
            if args.len() < 2 {
                return Err(anyhow!(
                    "expected a pattern and a replacement argument (or --apply FILE)"
                ));
            }
            let replacement = args.remove(1);
            let pattern = args.remove(0);
            (pattern, replacement)
        }
    };

    let pattern = parse(&pattern_text);
    let replacement = parse(&replacement_text);
    let rewrite = |source: &str| -> Result<String> {
        let mut subject = parse(source);
        replace(&mut subject, &pattern, &replacement)?;
        Ok(subject.serialize())
    };

    if matches.is_present("edit") {
        if args.is_empty() {
            return Err(anyhow!("at least one file is required with --edit"));
        }
        for file in &args {
            let path = Path::new(file);
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("Error reading input file {}", path.display()))?;
            save_file(path, &rewrite(&source)?)?;
        }
        return Ok(());
    }

    if args.is_empty() {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("Error reading standard input")?;
        print!("{}", rewrite(&source)?);
        return Ok(());
    }

    for file in &args {
        let path = Path::new(file);
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Error reading input file {}", path.display()))?;
        print!("{}", rewrite(&source)?);
    }
    Ok(())
}
