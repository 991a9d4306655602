use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use eframe::egui::{
    self, Align, Color32, ColorImage, FontSelection, RichText, TextureHandle, TextureOptions, Ui,
};
use eframe::egui::load::SizedTexture;
use eframe::egui::text::LayoutJob;

use super::format::{self, Segment, Span};
use super::scanner::{self, Block};

pub const WARNING_COLOR: Color32 = Color32::from_rgb(230, 160, 20);
pub const ERROR_COLOR: Color32 = Color32::from_rgb(220, 60, 60);

// ---------------------------------------------------------------------------
// Report view state
// ---------------------------------------------------------------------------

/// A scanned report plus the textures of the images it shows.
///
/// The document is scanned once when opened; egui redraws from the blocks
/// every frame. Textures are uploaded on first draw and freed with the view.
pub struct ReportView {
    source: PathBuf,
    content: Result<Vec<Block>, String>,
    textures: HashMap<PathBuf, Result<TextureHandle, String>>,
}

impl ReportView {
    pub fn open(path: &Path, image_dir: &Path) -> Self {
        let content = scanner::load_blocks(path, image_dir).map_err(|e| {
            log::error!("{e}");
            e.to_string()
        });
        if let Ok(blocks) = &content {
            log::info!("Scanned {} with {} blocks", path.display(), blocks.len());
        }
        Self {
            source: path.to_path_buf(),
            content,
            textures: HashMap::new(),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Draw every block in document order.
    pub fn show(&mut self, ui: &mut Ui) {
        let blocks = match &self.content {
            Ok(blocks) => blocks,
            Err(msg) => {
                error_label(ui, msg);
                return;
            }
        };

        for (i, block) in blocks.iter().enumerate() {
            match block {
                Block::Heading(text) => {
                    ui.add_space(6.0);
                    ui.label(RichText::new(text).size(20.0).strong());
                }
                Block::Paragraph(text) => paragraph(ui, i, text),
                Block::Image(path) => {
                    let texture = self
                        .textures
                        .entry(path.clone())
                        .or_insert_with(|| upload_image(ui.ctx(), path));
                    match texture {
                        Ok(tex) => {
                            ui.add(
                                egui::Image::new(SizedTexture::from_handle(tex))
                                    .max_width(ui.available_width()),
                            );
                        }
                        Err(msg) => warning_label(ui, msg),
                    }
                }
                Block::MissingImage(path) => {
                    warning_label(ui, &format!("Image not found: {}", path.display()));
                }
            }
            ui.add_space(4.0);
        }
    }
}

// ---------------------------------------------------------------------------
// Images
// ---------------------------------------------------------------------------

/// Decode an image file into egui's pixel format.
///
/// The file handle is closed by `decode`; the pixel buffers are dropped when
/// the caller hands the `ColorImage` to egui.
pub fn decode_image(path: &Path) -> Result<ColorImage> {
    let img = image::ImageReader::open(path)
        .with_context(|| format!("opening {}", path.display()))?
        .with_guessed_format()
        .context("detecting image format")?
        .decode()
        .with_context(|| format!("decoding {}", path.display()))?;
    let rgba = img.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(
        size,
        rgba.as_flat_samples().as_slice(),
    ))
}

fn upload_image(ctx: &egui::Context, path: &Path) -> Result<TextureHandle, String> {
    match decode_image(path) {
        Ok(pixels) => Ok(ctx.load_texture(
            path.display().to_string(),
            pixels,
            TextureOptions::LINEAR,
        )),
        Err(e) => {
            log::warn!("{e:#}");
            Err(format!("Could not display image: {e:#}"))
        }
    }
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

fn paragraph(ui: &mut Ui, block_index: usize, text: &str) {
    for (j, segment) in format::segments(text).into_iter().enumerate() {
        match segment {
            Segment::Text(line) => {
                ui.label(inline_job(ui, &line));
            }
            Segment::Bullet(item) => {
                ui.horizontal_wrapped(|ui: &mut Ui| {
                    ui.label("•");
                    ui.label(inline_job(ui, &item));
                });
            }
            Segment::Rule => {
                ui.separator();
            }
            Segment::Table(rows) => {
                egui::Grid::new(("report_table", block_index, j))
                    .striped(true)
                    .spacing([16.0, 4.0])
                    .show(ui, |ui: &mut Ui| {
                        for (r, row) in rows.iter().enumerate() {
                            for cell in row {
                                if r == 0 {
                                    ui.label(RichText::new(cell).strong());
                                } else {
                                    ui.label(inline_job(ui, cell));
                                }
                            }
                            ui.end_row();
                        }
                    });
            }
        }
    }
}

fn inline_job(ui: &Ui, text: &str) -> LayoutJob {
    let mut job = LayoutJob::default();
    for span in format::inline_spans(text) {
        let rich = match span {
            Span::Plain(s) => RichText::new(s),
            Span::Bold(s) => RichText::new(s).strong(),
            Span::Italic(s) => RichText::new(s).italics(),
            Span::Code(s) => RichText::new(s).code(),
        };
        rich.append_to(&mut job, ui.style(), FontSelection::Default, Align::Center);
    }
    job
}

pub fn warning_label(ui: &mut Ui, msg: &str) {
    ui.label(RichText::new(format!("⚠ {msg}")).color(WARNING_COLOR));
}

pub fn error_label(ui: &mut Ui, msg: &str) {
    ui.label(RichText::new(msg).color(ERROR_COLOR));
}
