//! Mod folder export.
//!
//! Lays out `<Name>Pack/GameData/<Name>Pack/{Config,Textures,Cache}`, writes
//! the generated Kopernicus config and a README, and packs the selected
//! textures next to the config under standardised names. Non-DDS textures
//! are converted with `texconv` when it is on the `PATH`.

use crate::config::{PlanetConfig, TextureKind};
use crate::kopernicus::{mod_name, KopernicusConfig, TextureRefs};
use crate::orbit::OrbitState;
use chrono::Local;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

/// DirectXTex command line converter.
pub const TEXCONV: &str = "texconv";

pub type ExportResult<T> = Result<T, ExportError>;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("planet name is empty")]
    MissingPlanetName,

    #[error("failed to create {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ModFolder {
    pub root: PathBuf,
    pub config_dir: PathBuf,
    pub textures_dir: PathBuf,
    pub cache_dir: PathBuf,
    pub config_file: PathBuf,
    /// Textures that made it into the pack, by slot.
    pub textures: Vec<(TextureKind, PathBuf)>,
}

fn create_dir(path: PathBuf) -> ExportResult<PathBuf> {
    fs::create_dir_all(&path).map_err(|source| ExportError::CreateDir { path: path.clone(), source })?;
    Ok(path)
}

fn write_file(path: &Path, contents: &str) -> ExportResult<()> {
    fs::write(path, contents).map_err(|source| ExportError::Write { path: path.to_path_buf(), source })
}

fn is_dds(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("dds"))
}

/// Runs `converter -f DXT5 -y -o <dir> <input>`, which writes `<dir>/<stem>.dds`.
fn convert_to_dds(converter: &str, input: &Path, dir: &Path) -> io::Result<PathBuf> {
    let output = input.with_extension("dds");
    let status = Command::new(converter).args(["-f", "DXT5", "-y", "-o"]).arg(dir).arg(input).status()?;
    if status.success() && output.is_file() {
        Ok(output)
    } else {
        Err(io::Error::other(format!("{converter} exited with {status}")))
    }
}

/// Places `source` in `dir` as `<base>.dds`. DDS sources are copied as they
/// are; anything else is copied and then converted, and the copy itself is
/// kept when conversion is not possible.
pub fn pack_texture(converter: &str, source: &Path, dir: &Path, base: &str) -> io::Result<PathBuf> {
    if is_dds(source) {
        let dest = dir.join(format!("{base}.dds"));
        fs::copy(source, &dest)?;
        return Ok(dest);
    }
    let mut copy = dir.join(base);
    if let Some(ext) = source.extension() {
        copy.set_extension(ext);
    }
    fs::copy(source, &copy)?;
    match convert_to_dds(converter, &copy, dir) {
        Ok(dds) => {
            if let Err(err) = fs::remove_file(&copy) {
                log::debug!("leaving {}: {err}", copy.display());
            }
            Ok(dds)
        }
        Err(err) => {
            log::warn!("no DDS conversion for {}, packing it as is: {err}", copy.display());
            Ok(copy)
        }
    }
}

fn readme(planet: &PlanetConfig, state: &OrbitState) -> String {
    format!(
        "# {pack}\n\
         Created with Planet Forge ({hash}) on {date}\n\n\
         ## Installation\n\
         1. Copy the GameData folder to your Kerbal Space Program installation\n\
         2. Ensure Kopernicus is installed\n\n\
         ## Planet Details\n\
         - Name: {name}\n\
         - Parent Body: {parent}\n\
         - Radius: {radius} km\n\
         - Surface Gravity: {gravity}g\n",
        pack = mod_name(state.body_name()),
        hash = env!("GIT_HASH"),
        date = Local::now().format("%Y-%m-%d"),
        name = state.body_name(),
        parent = state.parent_body_name.trim(),
        radius = planet.radius_km,
        gravity = planet.gravity_g,
    )
}

/// Writes a complete mod pack for the planet under `root`.
pub fn export_mod(planet: &PlanetConfig, state: &OrbitState, root: &Path) -> ExportResult<ModFolder> {
    export_mod_with(TEXCONV, planet, state, root)
}

/// `export_mod` with an explicit texture converter program.
pub fn export_mod_with(converter: &str, planet: &PlanetConfig, state: &OrbitState, root: &Path) -> ExportResult<ModFolder> {
    let name = state.body_name();
    if name.is_empty() {
        return Err(ExportError::MissingPlanetName);
    }
    let pack = mod_name(name);
    let pack_root = create_dir(root.join(&pack))?;
    let game_data = pack_root.join("GameData").join(&pack);
    let config_dir = create_dir(game_data.join("Config"))?;
    let textures_dir = create_dir(game_data.join("Textures"))?;
    let cache_dir = create_dir(game_data.join("Cache"))?;

    let mut refs = TextureRefs::from_sources(&planet.textures);
    let mut textures = Vec::new();
    for kind in TextureKind::ALL {
        let Some(source) = planet.textures.get(kind) else {
            continue;
        };
        let base = format!("{name}_{}", kind.suffix());
        match pack_texture(converter, source, &textures_dir, &base) {
            Ok(dest) => {
                if let Some(file_name) = dest.file_name() {
                    refs.set(kind, file_name.to_string_lossy().into_owned());
                }
                textures.push((kind, dest));
            }
            Err(err) => log::warn!("skipping {} {}: {err}", kind.label(), source.display()),
        }
    }

    let config = KopernicusConfig { planet, state, textures: refs };
    let config_file = config_dir.join(format!("{name}.cfg"));
    write_file(&config_file, &config.to_string())?;
    write_file(&pack_root.join("README.md"), &readme(planet, state))?;
    log::info!("exported {pack} to {}", pack_root.display());

    Ok(ModFolder { root: pack_root, config_dir, textures_dir, cache_dir, config_file, textures })
}
