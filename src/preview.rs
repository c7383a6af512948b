//! Texture previews for the Textures section.
//!
//! Each slot decodes its image with `image`, applies a per-kind display
//! transform (height maps as grayscale, normal maps contrast-lifted) and
//! uploads the result as an egui texture. Reloads wait for the path to stop
//! changing so typing a path does not decode every keystroke.

use crate::config::{TextureKind, TextureSet};
use eframe::egui;
use image::RgbImage;
use std::path::{Path, PathBuf};
use std::time::Duration;

const SETTLE: Duration = Duration::from_millis(100);
const MAX_PREVIEW_HEIGHT: f32 = 200.0;

/// ITU-R 601-2 luma, the weighting image editors use for "grayscale".
pub fn luma(rgb: [u8; 3]) -> u8 {
    let [r, g, b] = rgb.map(u32::from);
    ((r * 299 + g * 587 + b * 114 + 500) / 1000) as u8
}

/// Maps a normal-map channel from `[0, 255]` into the upper half of the range.
pub fn lift_normal(channel: u8) -> u8 {
    ((channel as f64 / 255.0 * 0.5 + 0.5) * 255.0) as u8
}

pub fn display_transform(kind: TextureKind, mut img: RgbImage) -> RgbImage {
    match kind {
        TextureKind::Color => {}
        TextureKind::Height => {
            for px in img.pixels_mut() {
                let y = luma(px.0);
                px.0 = [y, y, y];
            }
        }
        TextureKind::Normal => {
            for px in img.pixels_mut() {
                px.0 = px.0.map(lift_normal);
            }
        }
    }
    img
}

/// Size that fits `image` inside `available`, keeping aspect and never upscaling.
pub fn fit_size(image: egui::Vec2, available: egui::Vec2) -> egui::Vec2 {
    if image.x <= 0.0 || image.y <= 0.0 {
        return egui::Vec2::ZERO;
    }
    let scale = (available.x / image.x).min(available.y / image.y).min(1.0).max(0.0);
    image * scale
}

pub fn load_preview_image(kind: TextureKind, path: &Path) -> image::ImageResult<RgbImage> {
    let img = image::ImageReader::open(path)?.with_guessed_format()?.decode()?.to_rgb8();
    Ok(display_transform(kind, img))
}

fn preview_title(kind: TextureKind) -> String {
    format!("{} Preview", kind.label())
}

enum PreviewState {
    Empty,
    Stale { since: f64 },
    Loaded(egui::TextureHandle),
    Failed(String),
}

pub(crate) struct TexturePreview {
    kind: TextureKind,
    path: Option<PathBuf>,
    state: PreviewState,
}

impl TexturePreview {
    fn new(kind: TextureKind) -> Self {
        Self { kind, path: None, state: PreviewState::Empty }
    }

    fn reload(&self, ctx: &egui::Context) -> PreviewState {
        let Some(path) = &self.path else {
            return PreviewState::Empty;
        };
        match load_preview_image(self.kind, path) {
            Ok(img) => {
                let size = [img.width() as usize, img.height() as usize];
                let image = egui::ColorImage::from_rgb(size, img.as_raw());
                PreviewState::Loaded(ctx.load_texture(
                    format!("preview_{}", self.kind.suffix()),
                    image,
                    egui::TextureOptions::LINEAR,
                ))
            }
            Err(err) => {
                log::debug!("preview of {} failed: {err}", path.display());
                PreviewState::Failed(err.to_string())
            }
        }
    }

    fn show(&mut self, ui: &mut egui::Ui, path: Option<&PathBuf>) {
        let now = ui.input(|i| i.time);
        if path != self.path.as_ref() {
            self.path = path.cloned();
            self.state = PreviewState::Stale { since: now };
        }
        if let PreviewState::Stale { since } = self.state {
            let waited = now - since;
            if waited >= SETTLE.as_secs_f64() {
                self.state = self.reload(ui.ctx());
            } else {
                ui.ctx().request_repaint_after(SETTLE.saturating_sub(Duration::from_secs_f64(waited.max(0.0))));
            }
        }

        ui.label(egui::RichText::new(preview_title(self.kind)).strong());
        match &self.state {
            PreviewState::Empty => {
                ui.label(egui::RichText::new("No texture loaded").weak());
            }
            PreviewState::Stale { .. } => {
                ui.spinner();
            }
            PreviewState::Loaded(texture) => {
                let available = egui::vec2(ui.available_width(), MAX_PREVIEW_HEIGHT);
                let size = fit_size(texture.size_vec2(), available);
                ui.add(egui::Image::new(texture).fit_to_exact_size(size));
            }
            PreviewState::Failed(err) => {
                ui.colored_label(ui.visuals().error_fg_color, format!("Error loading texture:\n{err}"));
            }
        }
    }
}

pub(crate) struct TexturePreviews {
    slots: [TexturePreview; 3],
}

impl Default for TexturePreviews {
    fn default() -> Self {
        Self { slots: TextureKind::ALL.map(TexturePreview::new) }
    }
}

impl TexturePreviews {
    pub(crate) fn show(&mut self, ui: &mut egui::Ui, textures: &TextureSet) {
        for slot in &mut self.slots {
            slot.show(ui, textures.get(slot.kind));
            ui.add_space(4.0);
        }
    }
}
