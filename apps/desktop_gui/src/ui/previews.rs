//! Texture cache for data-URI previews (draft attachment, signature, ledger rows).

use std::collections::HashMap;

use eframe::egui;
use egui::TextureHandle;
use shared::DataUri;

const MAX_PREVIEW_DIMENSION: u32 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreviewKey {
    DraftAttachment(u64),
    Signature(u64),
    Ledger(usize),
}

#[derive(Clone)]
pub struct PreviewImage {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

enum PreviewTexture {
    /// Pixels decoded on the worker, uploaded on first display.
    Pending(PreviewImage),
    Ready(TextureHandle),
    Failed(String),
}

impl PreviewTexture {
    fn from_decoded(key: PreviewKey, decoded: Result<PreviewImage, String>) -> Self {
        match decoded {
            Ok(image) => Self::Pending(image),
            Err(reason) => {
                tracing::warn!(?key, "preview decode failed: {reason}");
                Self::Failed(reason)
            }
        }
    }
}

#[derive(Default)]
pub struct PreviewCache {
    textures: HashMap<PreviewKey, PreviewTexture>,
}

impl PreviewCache {
    pub fn insert_image(&mut self, key: PreviewKey, decoded: Result<PreviewImage, String>) {
        self.textures
            .insert(key, PreviewTexture::from_decoded(key, decoded));
    }

    /// Draws the preview for `key`. `uri` is decoded here only when nothing
    /// was cached for the key; attachments arrive already decoded.
    pub fn show(&mut self, ui: &mut egui::Ui, key: PreviewKey, uri: &DataUri, max_width: f32) {
        let entry = self.textures.entry(key).or_insert_with(|| {
            let decoded = uri
                .decode()
                .map_err(|err| err.to_string())
                .and_then(|bytes| decode_preview_image(&bytes));
            PreviewTexture::from_decoded(key, decoded)
        });

        if let PreviewTexture::Pending(image) = entry {
            let color_image =
                egui::ColorImage::from_rgba_unmultiplied([image.width, image.height], &image.rgba);
            let texture = ui.ctx().load_texture(
                texture_name(key),
                color_image,
                egui::TextureOptions::LINEAR,
            );
            *entry = PreviewTexture::Ready(texture);
        }

        match entry {
            PreviewTexture::Pending(_) => {}
            PreviewTexture::Ready(texture) => {
                let mut size = texture.size_vec2();
                if size.x > max_width {
                    size *= max_width / size.x;
                }
                ui.add(egui::Image::new(&*texture).fit_to_exact_size(size));
            }
            PreviewTexture::Failed(reason) => {
                ui.colored_label(
                    ui.visuals().warn_fg_color,
                    format!("⚠ Vista previa no disponible: {reason}"),
                );
            }
        }
    }

    /// Hands the draft attachment preview to the ledger row it was submitted in.
    pub fn promote_draft(&mut self, generation: u64, index: usize) {
        if let Some(texture) = self.textures.remove(&PreviewKey::DraftAttachment(generation)) {
            self.textures.insert(PreviewKey::Ledger(index), texture);
        }
    }

    pub fn forget_signature(&mut self) {
        self.textures
            .retain(|key, _| !matches!(key, PreviewKey::Signature(_)));
    }

    /// Drops textures that belong to the draft; ledger textures stay cached.
    pub fn forget_draft(&mut self) {
        self.textures
            .retain(|key, _| matches!(key, PreviewKey::Ledger(_)));
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, key: PreviewKey) -> bool {
        self.textures.contains_key(&key)
    }

    #[cfg(test)]
    fn insert_failed(&mut self, key: PreviewKey, reason: &str) {
        self.textures
            .insert(key, PreviewTexture::Failed(reason.to_string()));
    }
}

fn texture_name(key: PreviewKey) -> String {
    match key {
        PreviewKey::DraftAttachment(generation) => format!("draft_attachment_{generation}"),
        PreviewKey::Signature(revision) => format!("signature_{revision}"),
        PreviewKey::Ledger(index) => format!("ledger_attachment_{index}"),
    }
}

pub fn decode_preview_image(bytes: &[u8]) -> Result<PreviewImage, String> {
    let dynamic = image::load_from_memory(bytes).map_err(|err| err.to_string())?;
    let resized = if dynamic.width() > MAX_PREVIEW_DIMENSION || dynamic.height() > MAX_PREVIEW_DIMENSION {
        dynamic.thumbnail(MAX_PREVIEW_DIMENSION, MAX_PREVIEW_DIMENSION)
    } else {
        dynamic
    }
    .to_rgba8();
    let width = resized.width() as usize;
    let height = resized.height() as usize;
    Ok(PreviewImage {
        width,
        height,
        rgba: resized.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use delivery_core::{PenStyle, Point, SignaturePad};

    use super::*;

    #[test]
    fn decodes_signature_png_for_preview() {
        let mut pad = SignaturePad::new(30, 12, PenStyle::default());
        pad.begin_stroke(Point::new(1.0, 6.0));
        pad.extend_stroke(Point::new(28.0, 6.0));
        pad.end_stroke();
        let png = pad.to_data_uri().expect("encode").decode().expect("payload");

        let preview = decode_preview_image(&png).expect("decode");
        assert_eq!((preview.width, preview.height), (30, 12));
        assert_eq!(preview.rgba.len(), 30 * 12 * 4);
    }

    #[test]
    fn rejects_bytes_that_are_not_an_image() {
        assert!(decode_preview_image(b"definitely not an image").is_err());
    }

    #[test]
    fn forgetting_the_draft_keeps_ledger_previews() {
        let mut cache = PreviewCache::default();
        cache.insert_failed(PreviewKey::DraftAttachment(3), "x");
        cache.insert_failed(PreviewKey::Signature(1), "x");
        cache.insert_failed(PreviewKey::Ledger(0), "x");

        cache.forget_draft();

        assert_eq!(cache.textures.len(), 1);
        assert!(cache.contains(PreviewKey::Ledger(0)));
    }

    #[test]
    fn submitted_attachment_preview_moves_to_its_ledger_row() {
        let mut cache = PreviewCache::default();
        cache.insert_image(
            PreviewKey::DraftAttachment(4),
            Ok(PreviewImage {
                width: 1,
                height: 1,
                rgba: vec![0, 0, 0, 255],
            }),
        );

        cache.promote_draft(4, 2);
        cache.forget_draft();

        assert!(!cache.contains(PreviewKey::DraftAttachment(4)));
        assert!(matches!(
            cache.textures.get(&PreviewKey::Ledger(2)),
            Some(PreviewTexture::Pending(image)) if image.rgba == [0, 0, 0, 255]
        ));
    }

    #[test]
    fn forgetting_the_signature_keeps_the_attachment() {
        let mut cache = PreviewCache::default();
        cache.insert_failed(PreviewKey::DraftAttachment(1), "x");
        cache.insert_failed(PreviewKey::Signature(5), "x");

        cache.forget_signature();

        assert!(cache.contains(PreviewKey::DraftAttachment(1)));
        assert!(!cache.contains(PreviewKey::Signature(5)));
    }
}
