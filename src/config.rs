//! Configuration types for the editor and the planet being designed.
//!
//! Defines EditorConfig (interaction tolerances and animation tuning) and
//! PlanetConfig (the non-orbital planet properties fed to the config
//! generator), plus time-warp levels, biomes and texture slots.

use eframe::egui;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct EditorConfig {
    pub handle_radius_px: f64,
    pub path_band: (f64, f64),
    pub easing_ratio: f64,
    pub tick_interval: Duration,
    pub axis_tolerance: f64,
    pub eccentricity_tolerance: f64,
    pub inclination_tolerance_deg: f64,
    /// The orbit's major axis spans `min(width, height) / fill_factor` pixels.
    pub fill_factor: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            handle_radius_px: 10.0,
            path_band: (0.8, 0.95),
            easing_ratio: 0.2,
            tick_interval: Duration::from_millis(16),
            axis_tolerance: 0.01,
            eccentricity_tolerance: 0.001,
            inclination_tolerance_deg: 0.01,
            fill_factor: 2.2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeWarpLevel {
    pub altitude_m: u32,
    pub multiplier: u32,
}

#[derive(Clone, Debug)]
pub struct Biome {
    pub name: String,
    pub color: egui::Color32,
}

#[derive(Clone, Debug)]
pub struct AtmosphereConfig {
    pub enabled: bool,
    pub height_m: u32,
    pub temperature_c: i32,
    pub static_pressure_kpa: f64,
    pub ambient_color: egui::Color32,
    pub light_color: egui::Color32,
    pub pressure_curve: String,
    pub temperature_curve: String,
}

impl Default for AtmosphereConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            height_m: 0,
            temperature_c: 0,
            static_pressure_kpa: 101.325,
            ambient_color: egui::Color32::BLACK,
            light_color: egui::Color32::BLACK,
            pressure_curve: String::new(),
            temperature_curve: String::new(),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TextureKind {
    Color,
    Height,
    Normal,
}

impl TextureKind {
    pub const ALL: [TextureKind; 3] = [TextureKind::Color, TextureKind::Height, TextureKind::Normal];

    pub fn label(&self) -> &'static str {
        match self {
            TextureKind::Color => "Color Map",
            TextureKind::Height => "Height Map",
            TextureKind::Normal => "Normal Map",
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            TextureKind::Color => "colormap",
            TextureKind::Height => "heightmap",
            TextureKind::Normal => "normalmap",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct TextureSet {
    pub color_map: Option<PathBuf>,
    pub height_map: Option<PathBuf>,
    pub normal_map: Option<PathBuf>,
}

impl TextureSet {
    pub fn get(&self, kind: TextureKind) -> Option<&PathBuf> {
        match kind {
            TextureKind::Color => self.color_map.as_ref(),
            TextureKind::Height => self.height_map.as_ref(),
            TextureKind::Normal => self.normal_map.as_ref(),
        }
    }

    pub fn slot_mut(&mut self, kind: TextureKind) -> &mut Option<PathBuf> {
        match kind {
            TextureKind::Color => &mut self.color_map,
            TextureKind::Height => &mut self.height_map,
            TextureKind::Normal => &mut self.normal_map,
        }
    }

    /// File stem used inside the generated config, e.g. `Kerbin_color`.
    pub fn stem(&self, kind: TextureKind) -> String {
        self.get(kind)
            .and_then(|p| p.file_stem())
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

#[derive(Clone, Debug)]
pub struct PlanetConfig {
    pub radius_km: u32,
    pub gravity_g: f64,
    pub time_warp_levels: Vec<TimeWarpLevel>,
    pub rescale_enabled: bool,
    pub rescale_factor: f64,
    pub atmosphere: AtmosphereConfig,
    pub biomes: Vec<Biome>,
    pub textures: TextureSet,
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            radius_km: 1,
            gravity_g: 0.0,
            time_warp_levels: Vec::new(),
            rescale_enabled: false,
            rescale_factor: 1.0,
            atmosphere: AtmosphereConfig::default(),
            biomes: Vec::new(),
            textures: TextureSet::default(),
        }
    }
}

impl PlanetConfig {
    /// Inserts a level keeping the list ordered by altitude.
    pub fn add_time_warp_level(&mut self, level: TimeWarpLevel) {
        let idx = self.time_warp_levels.partition_point(|l| l.altitude_m <= level.altitude_m);
        self.time_warp_levels.insert(idx, level);
    }

    pub fn add_biome(&mut self) {
        self.biomes.push(Biome {
            name: format!("Biome {}", self.biomes.len() + 1),
            color: egui::Color32::BLACK,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_warp_levels_stay_sorted() {
        let mut planet = PlanetConfig::default();
        for (altitude_m, multiplier) in [(5000, 10), (100, 5), (2500, 50), (100, 2)] {
            planet.add_time_warp_level(TimeWarpLevel { altitude_m, multiplier });
        }
        let altitudes: Vec<u32> = planet.time_warp_levels.iter().map(|l| l.altitude_m).collect();
        assert_eq!(altitudes, vec![100, 100, 2500, 5000]);
        assert_eq!(planet.time_warp_levels[1].multiplier, 2);
    }

    #[test]
    fn texture_stem_ignores_directory_and_extension() {
        let mut textures = TextureSet::default();
        textures.color_map = Some(PathBuf::from("/tmp/maps/kerbin_color.png"));
        assert_eq!(textures.stem(TextureKind::Color), "kerbin_color");
        assert_eq!(textures.stem(TextureKind::Height), "");
    }
}
