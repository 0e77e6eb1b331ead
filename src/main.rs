// vim: set ai et ts=4 sts=4 sw=4:
use std::fs;
use std::io;
use std::path::Path;
use std::process;
use clap::{App, Arg, ArgMatches};
use log::{info, warn, LevelFilter};
use yaml_rust::YamlLoader;

use picross::config::{ColorMode, Config};
use picross::error::Error;
use picross::puzzle::{Puzzle, SAMPLE_ROWS, SAMPLE_COLS};
use picross::row::IndexCache;
use picross::util::is_a_tty;

// the effective level is adjusted afterwards through log::set_max_level
fn setup_logging() -> Result<(), log::SetLoggerError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}][{}] {}", record.level(), record.target(), message))
        })
        .level(LevelFilter::Trace)
        .chain(io::stderr())
        .apply()
}

fn raise_level(base: LevelFilter, steps: u64) -> LevelFilter {
    let levels = [LevelFilter::Off, LevelFilter::Error, LevelFilter::Warn,
                  LevelFilter::Info, LevelFilter::Debug, LevelFilter::Trace];
    let current = levels.iter().position(|&l| l == base).unwrap_or(2);
    levels[std::cmp::min(current + steps as usize, levels.len() - 1)]
}

fn build_config(args: &ArgMatches) -> Result<Config, Error> {
    let mut config = match args.value_of("config") {
        Some(path) => Config::load(Path::new(path))?,
        None       => Config::default(),
    };
    if let Some(max) = args.value_of("max-size") {
        let max = max.parse::<usize>()
                     .map_err(|_| Error::Config(format!("--max-size: not a number: {:?}", max)))?;
        config.set_max_size(max)?;
    }
    if args.is_present("no-color") {
        config.color = ColorMode::Never;
    }
    Ok(config)
}

fn load_puzzles(args: &ArgMatches, config: &Config, cache: &mut IndexCache)
    -> Result<Vec<Puzzle>, Error>
{
    if args.is_present("sample") {
        return Ok(vec![Puzzle::from_hint_texts(cache, SAMPLE_ROWS, SAMPLE_COLS, config.max_size)?]);
    }
    if let (Some(rows), Some(cols)) = (args.value_of("rows"), args.value_of("cols")) {
        let rows_text = fs::read_to_string(rows)?;
        let cols_text = fs::read_to_string(cols)?;
        return Ok(vec![Puzzle::from_hint_texts(cache, &rows_text, &cols_text, config.max_size)?]);
    }
    let path = args.value_of("PUZZLE")
                   .ok_or_else(|| Error::InvalidInput("no puzzle given; use PUZZLE, --rows/--cols or --sample".to_string()))?;
    let docs = YamlLoader::load_from_str(&fs::read_to_string(path)?)?;
    if docs.is_empty() {
        return Err(Error::InvalidInput(format!("{} contains no puzzle", path)));
    }
    info!("loaded {} puzzle document(s) from {}", docs.len(), path);
    docs.iter()
        .map(|doc| Puzzle::from_yaml(cache, doc, config.max_size))
        .collect()
}

fn run(args: &ArgMatches, config: &Config) -> Result<(), Error> {
    let mut cache = IndexCache::new();
    let puzzles = load_puzzles(args, config, &mut cache)?;
    let emit_color = match config.color {
        ColorMode::Always => true,
        ColorMode::Never  => false,
        ColorMode::Auto   => is_a_tty(&io::stdout()),
    };

    for (i, mut puzzle) in puzzles.into_iter().enumerate() {
        let report = puzzle.solve().map_err(|e| {
            warn!("puzzle {} could not be solved: {}", i + 1, e);
            e
        })?;
        if args.is_present("plain") {
            print!("{}", puzzle.grid());
        } else {
            println!("{}", puzzle.render(config.subdivision, emit_color));
            println!("{:?} after {} passes, {} squares unknown",
                     report.outcome, report.passes, puzzle.grid().unknown_count());
        }
    }
    Ok(())
}

fn main() {
    let args = App::new("picross")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Solves square nonogram puzzles by line-by-line deduction")
        .arg(Arg::with_name("PUZZLE")
                 .help("YAML file with 'rows' and 'cols' hint lists (may hold several documents)")
                 .index(1))
        .arg(Arg::with_name("rows")
                 .long("rows")
                 .value_name("FILE")
                 .help("Row hints, one line per row")
                 .takes_value(true)
                 .requires("cols"))
        .arg(Arg::with_name("cols")
                 .long("cols")
                 .value_name("FILE")
                 .help("Column hints, one line per column")
                 .takes_value(true)
                 .requires("rows"))
        .arg(Arg::with_name("sample")
                 .long("sample")
                 .help("Solve the built-in 3x3 sample")
                 .conflicts_with_all(&["PUZZLE", "rows", "cols"]))
        .arg(Arg::with_name("config")
                 .long("config")
                 .value_name("FILE")
                 .help("YAML configuration file")
                 .takes_value(true))
        .arg(Arg::with_name("max-size")
                 .long("max-size")
                 .value_name("N")
                 .help("Largest accepted puzzle size")
                 .takes_value(true))
        .arg(Arg::with_name("plain")
                 .long("plain")
                 .help("Print only the grid: '#' filled, '.' empty, '?' unknown"))
        .arg(Arg::with_name("no-color")
                 .long("no-color")
                 .help("Disable colored output"))
        .arg(Arg::with_name("verbose")
                 .short("v")
                 .multiple(true)
                 .help("Increase log verbosity"))
        .get_matches();

    let verbosity = args.occurrences_of("verbose");
    if let Err(e) = setup_logging() {
        eprintln!("could not set up logging: {}", e);
    }
    log::set_max_level(raise_level(Config::default().log_level, verbosity));

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };
    log::set_max_level(raise_level(config.log_level, verbosity));

    if let Err(e) = run(&args, &config) {
        eprintln!("{}", e);
        process::exit(match e {
            Error::Conflict(_) => 2,
            _                  => 1,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_the_level() {
        assert_eq!(raise_level(LevelFilter::Warn, 0), LevelFilter::Warn);
        assert_eq!(raise_level(LevelFilter::Warn, 1), LevelFilter::Info);
        assert_eq!(raise_level(LevelFilter::Warn, 9), LevelFilter::Trace);
        assert_eq!(raise_level(LevelFilter::Off, 1), LevelFilter::Error);
    }
}
