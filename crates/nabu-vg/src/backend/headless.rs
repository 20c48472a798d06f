use std::collections::HashMap;

use image::GenericImageView;
use log::debug;

use super::{ContextOptions, ImageOptions, VgBackend};

/// Windowless reference backend.
///
/// Decode validation is real — malformed assets are rejected here exactly as
/// a native library would reject them — but nothing is drawn. Live resources
/// are counted per context, which is what headless tools and leak tests need
/// to observe.
pub struct HeadlessVg {
    live_contexts: usize,
    next_context: u32,
}

/// Per-context bookkeeping of the headless backend.
pub struct HeadlessContext {
    id: u32,
    /// Live image handles with their decoded dimensions.
    images: HashMap<i32, (u32, u32)>,
    /// Live font handles with their registered names.
    fonts: HashMap<i32, String>,
    next_image: i32,
    next_font: i32,
}

impl HeadlessContext {
    /// Number of live images in this context.
    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Number of live fonts in this context.
    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }

    /// Decoded dimensions of a live image.
    pub fn image_size(&self, handle: i32) -> Option<(u32, u32)> {
        self.images.get(&handle).copied()
    }
}

impl HeadlessVg {
    pub fn new() -> Self {
        Self {
            live_contexts: 0,
            next_context: 1,
        }
    }

    /// Number of contexts created and not yet destroyed.
    pub fn live_contexts(&self) -> usize {
        self.live_contexts
    }
}

impl Default for HeadlessVg {
    fn default() -> Self {
        Self::new()
    }
}

impl VgBackend for HeadlessVg {
    type Context = HeadlessContext;

    fn create_context(&mut self, _options: &ContextOptions) -> Option<HeadlessContext> {
        let id = self.next_context;
        self.next_context += 1;
        self.live_contexts += 1;
        debug!("headless context {id} created");

        // Handle numbering mirrors the wrapped library: images count from 1,
        // fonts from 0.
        Some(HeadlessContext {
            id,
            images: HashMap::new(),
            fonts: HashMap::new(),
            next_image: 1,
            next_font: 0,
        })
    }

    fn destroy_context(&mut self, ctx: HeadlessContext) {
        self.live_contexts -= 1;
        debug!(
            "headless context {} destroyed ({} images, {} fonts dropped)",
            ctx.id,
            ctx.images.len(),
            ctx.fonts.len()
        );
    }

    fn create_image(
        &mut self,
        ctx: &mut HeadlessContext,
        bytes: &[u8],
        _options: &ImageOptions,
    ) -> i32 {
        match image::load_from_memory(bytes) {
            Ok(decoded) => {
                let handle = ctx.next_image;
                ctx.next_image += 1;
                ctx.images.insert(handle, (decoded.width(), decoded.height()));
                handle
            }
            Err(err) => {
                debug!("image rejected by decoder: {err}");
                -1
            }
        }
    }

    fn delete_image(&mut self, ctx: &mut HeadlessContext, handle: i32) {
        ctx.images.remove(&handle);
    }

    fn create_font(&mut self, ctx: &mut HeadlessContext, name: &str, bytes: &[u8]) -> i32 {
        // Parsed for validation only; the decoded font is dropped again. A
        // native library would keep referencing `bytes` instead.
        match fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default()) {
            Ok(_) => {
                let handle = ctx.next_font;
                ctx.next_font += 1;
                ctx.fonts.insert(handle, name.to_string());
                handle
            }
            Err(err) => {
                debug!("font {name:?} rejected by parser: {err}");
                -1
            }
        }
    }

    fn delete_font(&mut self, ctx: &mut HeadlessContext, handle: i32) {
        ctx.fonts.remove(&handle);
    }

    fn begin_frame(
        &mut self,
        _ctx: &mut HeadlessContext,
        _width: f32,
        _height: f32,
        _device_pixel_ratio: f32,
    ) {
    }

    fn end_frame(&mut self, _ctx: &mut HeadlessContext) {}
}
