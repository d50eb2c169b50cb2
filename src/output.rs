use std::{
    io::Write,
    path::{Path, PathBuf},
};

use entity::Entity;

use crate::{MyResult, error::Error};

/// Rendering of the rewritten entities.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    /// Entity lump text, ready to be merged back into the BSP
    #[default]
    Ent,
    /// JSON array of objects, keys in lump order
    Json,
}

/// `maps/e1m1.bsp` -> `maps/e1m1.bsp.ent`
pub fn default_path(map: &Path) -> PathBuf {
    let mut path = map.as_os_str().to_owned();
    path.push(".ent");
    PathBuf::from(path)
}

pub fn render(format: Format, entities: &[Entity]) -> MyResult<String> {
    match format {
        Format::Ent => Ok(entities.iter().map(Entity::format).collect()),
        Format::Json => Ok(format!("{}\n", serde_json::to_string_pretty(entities)?)),
    }
}

/// Writes to `destination`, or to stdout when it is `-`.
pub fn write(destination: &Path, format: Format, entities: &[Entity]) -> MyResult<()> {
    let rendered = render(format, entities)?;

    if destination == Path::new("-") {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(rendered.as_bytes())?;
        stdout.flush()?;
    } else {
        std::fs::write(destination, rendered).map_err(Error::io(destination))?;
    }

    Ok(())
}
