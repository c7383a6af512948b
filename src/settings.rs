//! Side-panel form for the planet properties and the numeric orbit fields.

use crate::config::{TextureKind, TimeWarpLevel};
use crate::form::HostForm;
use crate::preview::TexturePreviews;
use eframe::egui;
use std::path::PathBuf;

/// Scratch values typed into the panel before they are committed.
pub(crate) struct PanelInputs {
    pub warp_altitude_m: u32,
    pub warp_multiplier: u32,
    pub previews: TexturePreviews,
}

impl Default for PanelInputs {
    fn default() -> Self {
        Self { warp_altitude_m: 0, warp_multiplier: 1, previews: TexturePreviews::default() }
    }
}

impl HostForm {
    pub(crate) fn show_settings(&mut self, ui: &mut egui::Ui, inputs: &mut PanelInputs, fill_factor: f64) {
        egui::CollapsingHeader::new("Basic Properties").default_open(true).show(ui, |ui| {
            self.show_basic(ui);
        });
        egui::CollapsingHeader::new("Time Warp").show(ui, |ui| {
            self.show_time_warp(ui, inputs);
        });
        egui::CollapsingHeader::new("Atmosphere").show(ui, |ui| {
            self.show_atmosphere(ui);
        });
        egui::CollapsingHeader::new("Orbit").default_open(true).show(ui, |ui| {
            self.show_orbit(ui, fill_factor);
        });
        egui::CollapsingHeader::new("Biomes").show(ui, |ui| {
            self.show_biomes(ui);
        });
        egui::CollapsingHeader::new("Textures").show(ui, |ui| {
            self.show_textures(ui, inputs);
        });
    }

    fn show_basic(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("basic_grid").num_columns(2).show(ui, |ui| {
            ui.label("Name:");
            if ui.text_edit_singleline(&mut self.fields.planet_name).changed() {
                self.apply_fields();
            }
            ui.end_row();

            let p = &mut self.planet;
            ui.label("Radius:");
            ui.add(egui::DragValue::new(&mut p.radius_km).range(1..=u32::MAX).speed(1.0).suffix(" km"));
            ui.end_row();

            ui.label("Gravity:");
            ui.add(egui::DragValue::new(&mut p.gravity_g).range(0.0..=10.0).speed(0.01).suffix(" g"));
            ui.end_row();
        });
        let p = &mut self.planet;
        ui.checkbox(&mut p.rescale_enabled, "Rescale");
        ui.add_enabled_ui(p.rescale_enabled, |ui| {
            ui.horizontal(|ui| {
                ui.label("Factor:");
                ui.add(egui::DragValue::new(&mut p.rescale_factor).range(0.1..=10.0).speed(0.01).suffix("×"));
            });
        });
    }

    fn show_time_warp(&mut self, ui: &mut egui::Ui, inputs: &mut PanelInputs) {
        ui.horizontal(|ui| {
            ui.add(egui::DragValue::new(&mut inputs.warp_altitude_m).speed(100.0).suffix(" m"));
            ui.add(egui::DragValue::new(&mut inputs.warp_multiplier).range(1..=100_000).suffix("×"));
            if ui.button("Add").clicked() {
                self.planet.add_time_warp_level(TimeWarpLevel {
                    altitude_m: inputs.warp_altitude_m,
                    multiplier: inputs.warp_multiplier,
                });
            }
        });
        let mut remove = None;
        for (i, level) in self.planet.time_warp_levels.iter().enumerate() {
            ui.horizontal(|ui| {
                ui.label(format!("{} m: {}×", level.altitude_m, level.multiplier));
                if ui.small_button("x").clicked() {
                    remove = Some(i);
                }
            });
        }
        if let Some(i) = remove {
            self.planet.time_warp_levels.remove(i);
        }
    }

    fn show_atmosphere(&mut self, ui: &mut egui::Ui) {
        let atmo = &mut self.planet.atmosphere;
        ui.checkbox(&mut atmo.enabled, "Enabled");
        ui.add_enabled_ui(atmo.enabled, |ui| {
            egui::Grid::new("atmosphere_grid").num_columns(2).show(ui, |ui| {
                ui.label("Height:");
                ui.add(egui::DragValue::new(&mut atmo.height_m).speed(100.0).suffix(" m"));
                ui.end_row();
                ui.label("Temperature:");
                ui.add(egui::DragValue::new(&mut atmo.temperature_c).speed(1.0).suffix(" °C"));
                ui.end_row();
                ui.label("Pressure:");
                ui.add(egui::DragValue::new(&mut atmo.static_pressure_kpa).range(0.0..=f64::MAX).speed(0.1).suffix(" kPa"));
                ui.end_row();
                ui.label("Ambient:");
                ui.color_edit_button_srgba(&mut atmo.ambient_color);
                ui.end_row();
                ui.label("Light:");
                ui.color_edit_button_srgba(&mut atmo.light_color);
                ui.end_row();
            });
            ui.label("Pressure curve:");
            ui.add(egui::TextEdit::multiline(&mut atmo.pressure_curve).code_editor().desired_rows(3));
            ui.label("Temperature curve:");
            ui.add(egui::TextEdit::multiline(&mut atmo.temperature_curve).code_editor().desired_rows(3));
        });
    }

    fn show_orbit(&mut self, ui: &mut egui::Ui, fill_factor: f64) {
        let f = &mut self.fields;
        let mut changed = false;
        egui::Grid::new("orbit_grid").num_columns(2).show(ui, |ui| {
            ui.label("Parent:");
            changed |= ui.text_edit_singleline(&mut f.parent_body).changed();
            ui.end_row();
            ui.label("Semi-major axis:");
            changed |= ui
                .add(egui::DragValue::new(&mut f.semi_major_axis_km).range(0.01..=1.0e8).speed(1.0).suffix(" km"))
                .changed();
            ui.end_row();
            ui.label("Eccentricity:");
            changed |= ui
                .add(egui::DragValue::new(&mut f.eccentricity).range(0.0..=0.99).speed(0.001).max_decimals(3))
                .changed();
            ui.end_row();
            ui.label("Inclination:");
            changed |= ui
                .add(egui::DragValue::new(&mut f.inclination_deg).range(0.0..=360.0).speed(0.5).suffix("°"))
                .changed();
            ui.end_row();
        });
        if changed {
            self.apply_fields();
        }
        if let Some(viewport) = self.top_down_viewport {
            let km = self.fields.center_offset_km(viewport, fill_factor);
            ui.label(egui::RichText::new(format!("Offset: {:.1}, {:.1} km", km.x, km.y)).weak());
        }
    }

    fn show_biomes(&mut self, ui: &mut egui::Ui) {
        if ui.button("Add Biome").clicked() {
            self.planet.add_biome();
        }
        let mut remove = None;
        for (i, biome) in self.planet.biomes.iter_mut().enumerate() {
            ui.horizontal(|ui| {
                ui.color_edit_button_srgba(&mut biome.color);
                ui.add(egui::TextEdit::singleline(&mut biome.name).desired_width(120.0));
                if ui.small_button("x").clicked() {
                    remove = Some(i);
                }
            });
        }
        if let Some(i) = remove {
            self.planet.biomes.remove(i);
        }
    }

    fn show_textures(&mut self, ui: &mut egui::Ui, inputs: &mut PanelInputs) {
        for kind in TextureKind::ALL {
            let slot = self.planet.textures.slot_mut(kind);
            let mut text = slot.as_ref().map(|p| p.display().to_string()).unwrap_or_default();
            ui.label(kind.label());
            let edit = egui::TextEdit::singleline(&mut text).hint_text("path to image");
            if ui.add(edit).changed() {
                *slot = (!text.is_empty()).then(|| PathBuf::from(&text));
            }
        }
        ui.separator();
        inputs.previews.show(ui, &self.planet.textures);
    }
}
