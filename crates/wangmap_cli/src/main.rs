//! `wangmap-check`: load `.tsx` tilesets and validate their wang sets

use std::path::Path;

use clap::{arg, command, ArgAction};
use log::{error, info, warn, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use wangmap::{load_tileset, CornerResolver, WangSetType};

fn main() {
    let matches = command!()
        .arg(
            arg!(--loglevel <LEVEL>)
                .required(false)
                .default_value("info")
                .value_parser(["trace", "debug", "info", "warn", "error", "off"])
                .action(ArgAction::Set),
        )
        .arg(
            arg!(-q --quiet)
                .required(false)
                .action(ArgAction::SetTrue)
                .help("Disables output to the terminal"),
        )
        .arg(arg!(<FILE> ... "Tileset files to check"))
        .get_matches();

    let loglevel = match matches.get_one::<String>("loglevel").map(String::as_str) {
        Some("trace") => LevelFilter::Trace,
        Some("debug") => LevelFilter::Debug,
        Some("warn") => LevelFilter::Warn,
        Some("error") => LevelFilter::Error,
        Some("off") => LevelFilter::Off,
        _ => LevelFilter::Info,
    };
    let loglevel = if matches.get_flag("quiet") {
        LevelFilter::Off
    } else {
        loglevel
    };
    let _ = TermLogger::init(
        loglevel,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );

    let files: Vec<&String> = matches
        .get_many::<String>("FILE")
        .map(|values| values.collect())
        .unwrap_or_default();

    let mut failures = 0usize;
    for file in &files {
        if !check_file(Path::new(file)) {
            failures += 1;
        }
    }

    if failures > 0 {
        error!("{} of {} file(s) failed validation", failures, files.len());
        std::process::exit(1);
    }
}

/// Load one tileset and build a resolver for each of its corner sets
fn check_file(path: &Path) -> bool {
    let tileset = match load_tileset(path) {
        Ok(tileset) => tileset,
        Err(e) => {
            error!("{}: {}", path.display(), e);
            return false;
        }
    };

    if let Err(message) = tileset.validate() {
        error!("{}: {}", path.display(), message);
        return false;
    }

    info!(
        "{}: tileset '{}' with {} tiles",
        path.display(),
        tileset.name,
        tileset.tile_count()
    );

    let mut ok = true;
    for ws in &tileset.wang_sets {
        if ws.set_type != WangSetType::Corner {
            warn!(
                "  wang set '{}' has type '{}'; only corner sets are checked",
                ws.name,
                ws.set_type.name()
            );
            continue;
        }
        match CornerResolver::new(ws) {
            Ok(resolver) => info!(
                "  wang set '{}': {} colors, {} signatures",
                ws.name,
                ws.colors.len(),
                resolver.len()
            ),
            Err(e) => {
                error!("  wang set '{}': {}", ws.name, e);
                ok = false;
            }
        }
    }
    ok
}
