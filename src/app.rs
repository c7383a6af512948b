//! Application shell: settings side panel plus the two orbit views in a dock.

use crate::config::EditorConfig;
use crate::export::export_mod;
use crate::form::HostForm;
use crate::kopernicus::generate_config;
use crate::settings::PanelInputs;
use crate::view::{OrbitViews, ViewTab};
use eframe::egui;
use egui_dock::{DockArea, DockState, TabViewer};
use std::path::Path;

struct OrbitTabViewer<'a> {
    views: &'a mut OrbitViews,
    form: &'a mut HostForm,
    dark_mode: bool,
}

impl TabViewer for OrbitTabViewer<'_> {
    type Tab = ViewTab;

    fn title(&mut self, tab: &mut Self::Tab) -> egui::WidgetText {
        self.views.title(*tab).into()
    }

    fn ui(&mut self, ui: &mut egui::Ui, tab: &mut Self::Tab) {
        self.views.show(*tab, ui, self.form, self.dark_mode);
    }

    fn scroll_bars(&self, _tab: &Self::Tab) -> [bool; 2] {
        [false, false]
    }

    fn closeable(&mut self, _tab: &mut Self::Tab) -> bool {
        false
    }
}

pub(crate) struct App {
    dock_state: DockState<ViewTab>,
    views: OrbitViews,
    form: HostForm,
    config: EditorConfig,
    inputs: PanelInputs,
    dark_mode: bool,
    export_dir: String,
    export_status: Option<String>,
    show_preview: bool,
}

impl App {
    pub(crate) fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = EditorConfig::default();
        Self {
            dock_state: DockState::new(vec![ViewTab::TopDown, ViewTab::Side]),
            views: OrbitViews::new(&config),
            form: HostForm::default(),
            config,
            inputs: PanelInputs::default(),
            dark_mode: true,
            export_dir: ".".to_string(),
            export_status: None,
            show_preview: false,
        }
    }

    fn show_export(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Export").strong());
        ui.horizontal(|ui| {
            ui.label("Folder:");
            ui.text_edit_singleline(&mut self.export_dir);
        });
        if ui.button("Create Mod Folder").clicked() {
            let root = Path::new(self.export_dir.trim());
            self.export_status = Some(match export_mod(&self.form.planet, &self.form.state, root) {
                Ok(folder) => format!("Created {}", folder.root.display()),
                Err(err) => {
                    log::error!("export failed: {err}");
                    format!("Export failed: {err}")
                }
            });
        }
        if let Some(status) = &self.export_status {
            ui.label(egui::RichText::new(status).weak());
        }
        ui.checkbox(&mut self.show_preview, "Show config preview");
        if self.show_preview {
            let mut text = generate_config(&self.form.planet, &self.form.state);
            egui::ScrollArea::both().id_salt("preview_scroll").max_height(300.0).show(ui, |ui| {
                ui.add(egui::TextEdit::multiline(&mut text).code_editor().interactive(false));
            });
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(if self.dark_mode {
            let mut vis = egui::Visuals::dark();
            let black = egui::Color32::BLACK;
            vis.window_fill = black;
            vis.panel_fill = black;
            vis.extreme_bg_color = black;
            vis.faint_bg_color = egui::Color32::from_gray(15);
            vis
        } else {
            egui::Visuals::light()
        });

        let now = ctx.input(|i| i.time);
        self.views.poll(now, &mut self.form);

        egui::SidePanel::left("settings_panel")
            .resizable(true)
            .default_width(260.0)
            .show_separator_line(false)
            .frame(egui::Frame::side_top_panel(ctx.style().as_ref()).inner_margin(4.0).stroke(egui::Stroke::NONE))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.strong("Planet");
                    ui.checkbox(&mut self.dark_mode, "Dark");
                });
                ui.separator();
                egui::ScrollArea::vertical().id_salt("settings_scroll").show(ui, |ui| {
                    self.form.show_settings(ui, &mut self.inputs, self.config.fill_factor);
                    ui.separator();
                    self.show_export(ui);
                    ui.separator();
                    let status = match self.views.active_handle() {
                        Some(handle) => format!("dragging {}", handle.label()),
                        None => "idle".to_string(),
                    };
                    ui.label(egui::RichText::new(format!("Planet Forge {} | {status}", env!("GIT_HASH"))).small().weak());
                });
            });

        let mut dock_style = egui_dock::Style::from_egui(ctx.style().as_ref());
        dock_style.main_surface_border_stroke = egui::Stroke::NONE;
        let mut viewer = OrbitTabViewer { views: &mut self.views, form: &mut self.form, dark_mode: self.dark_mode };
        DockArea::new(&mut self.dock_state)
            .style(dock_style)
            .show_close_buttons(false)
            .show_add_buttons(false)
            .show(ctx, &mut viewer);

        if let Some(wait) = self.views.time_until_tick(ctx.input(|i| i.time)) {
            ctx.request_repaint_after(wait);
        }
    }
}
