pub mod error;
pub mod logging;
pub mod output;

use std::{
    fs,
    io::BufReader,
    path::{Path, PathBuf},
};

use clap::Parser as _;
use entity::Applier;
use parser::Parser;
use tracing::{debug, info, warn};

use crate::{error::Error, logging::LogFormat, output::Format};

pub type MyResult<T> = Result<T, Box<dyn std::error::Error>>;

pub const DEFAULT_ALIASES: &str = "aliases.def";

#[derive(clap::Parser, Debug)]
#[command(version = "0.1.0")]
#[command(about = "Entity Alias Substituter")]
#[command(
    long_about = "Entity Alias Substituter\n\nOutputs path-to-map.bsp.ent with the aliased entities replaced, to be merged back into the BSP."
)]
#[command(override_usage = "bspentityalias [aliases.def] path-to-map.bsp")]
pub struct AppConfig {
    /// [ALIASES] MAP; aliases default to aliases.def
    #[arg(value_name = "FILE", required = true, num_args = 1..=2)]
    files: Vec<PathBuf>,
    /// Output file, `-` for stdout [default: MAP.ent]
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = Format::Ent)]
    format: Format,
    /// Let an alias' `classname` replace the entity's classname
    #[arg(long)]
    rename_classname: bool,
    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,
    /// Errors only
    #[arg(short, long)]
    quiet: bool,
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,
}

impl AppConfig {
    /// Alias file as given (or the default) and the map path.
    pub fn files(&self) -> MyResult<(PathBuf, &Path)> {
        match self.files.as_slice() {
            [map] => Ok((PathBuf::from(DEFAULT_ALIASES), map.as_path())),
            [aliases, map] => Ok((aliases.clone(), map.as_path())),
            _ => Err("expected `[aliases.def] path-to-map.bsp`".into()),
        }
    }

    pub fn init_logging(&self) {
        logging::init(logging::level(self.verbose, self.quiet), self.log_format);
    }
}

pub fn get_config() -> MyResult<AppConfig> {
    let config = AppConfig::try_parse().map_err(|e| match e.kind() {
        clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => e.exit(),
        _ => e.to_string(),
    })?;

    let (_, map) = config.files()?;
    if !map.is_file() {
        return Err(Error::MapNotFound(map.to_path_buf()).into());
    }

    Ok(config)
}

/// Looks for the alias file relative to the current directory first, then
/// next to the map.
pub fn resolve_aliases(aliases: &Path, map: &Path) -> Result<PathBuf, Error> {
    if aliases.is_file() {
        return Ok(aliases.to_path_buf());
    }

    match map.parent().map(|dir| dir.join(aliases)) {
        Some(beside_map) if beside_map.is_file() => Ok(beside_map),
        _ => Err(Error::AliasesNotFound(
            aliases.to_path_buf(),
            map.to_path_buf(),
        )),
    }
}

pub fn run(config: AppConfig) -> MyResult<()> {
    let (aliases, map) = config.files()?;
    let aliases = resolve_aliases(&aliases, map)?;
    debug!(aliases = %aliases.display(), map = %map.display(), "resolved inputs");

    let table = {
        let file = fs::File::open(&aliases).map_err(Error::io(&aliases))?;
        Parser::new(aliases.display().to_string(), BufReader::new(file)).parse_aliases()?
    };
    if table.is_empty() {
        warn!("{} defines no aliases, entities are written unchanged", aliases.display());
    }
    info!("Loaded {} alias definitions.", table.len());

    let bytes = fs::read(map).map_err(Error::io(map))?;
    let mut entities = parser::parse_map(&map.display().to_string(), &bytes)?;
    debug!(entities = entities.len(), "read entity lump");

    let aliased = Applier::new()
        .rename_classname(config.rename_classname)
        .apply(&table, &mut entities);

    let destination = config
        .output
        .clone()
        .unwrap_or_else(|| output::default_path(map));
    info!(
        "done; aliased {} of {} entities, writing {}...",
        aliased,
        entities.len(),
        destination.display()
    );

    output::write(&destination, config.format, &entities)?;
    info!("finished");

    Ok(())
}
