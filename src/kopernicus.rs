//! Kopernicus body patch generation.
//!
//! Reads the planet properties and the committed orbit and emits the
//! `@Kopernicus` config text that the mod export writes to disk.

use crate::config::{PlanetConfig, TextureKind, TextureSet};
use crate::orbit::OrbitState;
use eframe::egui::Color32;
use std::fmt;

pub fn mod_name(planet_name: &str) -> String {
    format!("{planet_name}Pack")
}

/// Direction of the pan offset in degrees, used for both the ascending node
/// and the argument of periapsis.
pub fn offset_angle_deg(state: &OrbitState) -> f64 {
    state.center_offset.y.atan2(state.center_offset.x).to_degrees()
}

/// Texture file names the config points at, one per slot.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureRefs {
    color: String,
    height: String,
    normal: String,
}

impl TextureRefs {
    /// `<stem>.dds` for each source path, the names a converted pack holds.
    pub fn from_sources(textures: &TextureSet) -> Self {
        let dds = |kind| format!("{}.dds", textures.stem(kind));
        Self {
            color: dds(TextureKind::Color),
            height: dds(TextureKind::Height),
            normal: dds(TextureKind::Normal),
        }
    }

    pub fn get(&self, kind: TextureKind) -> &str {
        match kind {
            TextureKind::Color => &self.color,
            TextureKind::Height => &self.height,
            TextureKind::Normal => &self.normal,
        }
    }

    pub fn set(&mut self, kind: TextureKind, file_name: String) {
        match kind {
            TextureKind::Color => self.color = file_name,
            TextureKind::Height => self.height = file_name,
            TextureKind::Normal => self.normal = file_name,
        }
    }
}

struct UnitRgb(Color32);

impl fmt::Display for UnitRgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.0;
        write!(f, "{:.6},{:.6},{:.6}", c.r() as f64 / 255.0, c.g() as f64 / 255.0, c.b() as f64 / 255.0)
    }
}

struct HexRgb(Color32);

impl fmt::Display for HexRgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0.r(), self.0.g(), self.0.b())
    }
}

fn indent_block(f: &mut fmt::Formatter<'_>, text: &str, depth: usize) -> fmt::Result {
    let pad = "    ".repeat(depth);
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        writeln!(f, "{pad}{line}")?;
    }
    Ok(())
}

/// A complete `@Kopernicus` body patch, rendered through `Display`.
pub struct KopernicusConfig<'a> {
    pub planet: &'a PlanetConfig,
    pub state: &'a OrbitState,
    pub textures: TextureRefs,
}

impl KopernicusConfig<'_> {
    fn properties(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let planet = self.planet;
        let warp = planet
            .time_warp_levels
            .iter()
            .map(|l| l.altitude_m.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(f, "        Properties\n        {{")?;
        writeln!(f, "            radius = {}", planet.radius_km as u64 * 1000)?;
        writeln!(f, "            geeASL = {}", planet.gravity_g)?;
        writeln!(f, "            timewarpAltitudeLimits = {warp}")?;
        writeln!(f, "        }}")
    }

    fn orbit(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state;
        let angle = offset_angle_deg(state);
        writeln!(f, "        Orbit\n        {{")?;
        writeln!(f, "            referenceBody = {}", state.parent_body_name.trim())?;
        writeln!(f, "            semiMajorAxis = {}", state.semi_major_axis() * 1000.0)?;
        writeln!(f, "            eccentricity = {}", state.eccentricity())?;
        writeln!(f, "            inclination = {}", state.inclination_deg().rem_euclid(360.0))?;
        writeln!(f, "            longitudeOfAscendingNode = {angle}")?;
        writeln!(f, "            argumentOfPeriapsis = {angle}")?;
        writeln!(f, "        }}")
    }

    fn atmosphere(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let atmo = &self.planet.atmosphere;
        writeln!(f, "        Atmosphere\n        {{")?;
        if !atmo.enabled {
            writeln!(f, "            enabled = false")?;
            return writeln!(f, "        }}");
        }
        writeln!(f, "            enabled = true\n            oxygen = false")?;
        writeln!(f, "            maxAltitude = {}", atmo.height_m)?;
        writeln!(f, "            staticPressureASL = {}", atmo.static_pressure_kpa)?;
        writeln!(f, "            temperatureSeaLevel = {}", atmo.temperature_c)?;
        writeln!(f, "            ambientColor = {},1", UnitRgb(atmo.ambient_color))?;
        writeln!(f, "            lightColor = {},0.2", UnitRgb(atmo.light_color))?;
        writeln!(f, "            pressureCurve\n            {{")?;
        indent_block(f, &atmo.pressure_curve, 4)?;
        writeln!(f, "            }}\n            temperatureCurve\n            {{")?;
        indent_block(f, &atmo.temperature_curve, 4)?;
        writeln!(f, "            }}\n        }}")
    }

    fn biomes(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "        Biomes\n        {{")?;
        for biome in &self.planet.biomes {
            writeln!(f, "            Biome\n            {{")?;
            writeln!(f, "                name = {}", biome.name)?;
            writeln!(f, "                value = 1.0")?;
            writeln!(f, "                color = {}", HexRgb(biome.color))?;
            writeln!(f, "            }}")?;
        }
        writeln!(f, "        }}")
    }

    fn surface(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let color = self.textures.get(TextureKind::Color);
        let height = self.textures.get(TextureKind::Height);
        let normal = self.textures.get(TextureKind::Normal);
        writeln!(f, "        ScaledVersion\n        {{\n            type = Atmospheric")?;
        writeln!(f, "            fadeStart = 50000\n            fadeEnd = 60000")?;
        writeln!(f, "            Material\n            {{")?;
        writeln!(f, "                texture = {color}")?;
        writeln!(f, "                normals = {normal}")?;
        writeln!(f, "            }}\n        }}")?;
        writeln!(f, "        PQS\n        {{\n            Mods\n            {{")?;
        writeln!(f, "                VertexHeightMap\n                {{")?;
        writeln!(f, "                    map = {height}")?;
        writeln!(f, "                    offset = 0\n                    deformity = 6500")?;
        writeln!(f, "                    scaleDeformityByRadius = false\n                    order = 20")?;
        writeln!(f, "                    enabled = true\n                }}")?;
        writeln!(f, "                VertexColorMap\n                {{")?;
        writeln!(f, "                    map = {color}")?;
        writeln!(f, "                    order = 21\n                    enabled = true\n                }}")?;
        writeln!(f, "            }}\n        }}")
    }

    fn rescale(&self, f: &mut fmt::Formatter<'_>, name: &str, pack: &str) -> fmt::Result {
        let factor = self.planet.rescale_factor;
        writeln!(f, "\n@Kopernicus:AFTER[{pack}]\n{{")?;
        writeln!(f, "    @Body[{name}]")?;
        writeln!(f, "    {{\n        @Properties\n        {{")?;
        writeln!(f, "            @radius *= {factor}")?;
        writeln!(f, "        }}\n        @Orbit\n        {{")?;
        writeln!(f, "            @semiMajorAxis *= {factor}")?;
        writeln!(f, "        }}\n    }}\n}}")
    }
}

impl fmt::Display for KopernicusConfig<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.state.body_name();
        let pack = mod_name(name);
        writeln!(f, "@Kopernicus:FOR[{pack}]\n{{\n    Body\n    {{")?;
        writeln!(f, "        name = {name}")?;
        writeln!(f, "        cacheFile = {pack}/Cache/{name}.bin")?;
        writeln!(f, "        Template\n        {{\n            name = Laythe\n        }}")?;
        self.properties(f)?;
        self.orbit(f)?;
        self.atmosphere(f)?;
        self.biomes(f)?;
        self.surface(f)?;
        writeln!(f, "    }}\n}}")?;
        if self.planet.rescale_enabled {
            self.rescale(f, name, &pack)?;
        }
        Ok(())
    }
}

/// Config text referencing each texture as `<stem>.dds`.
pub fn generate_config(planet: &PlanetConfig, state: &OrbitState) -> String {
    KopernicusConfig { planet, state, textures: TextureRefs::from_sources(&planet.textures) }.to_string()
}
