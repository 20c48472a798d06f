use std::collections::HashMap;

use log::{debug, warn};

use crate::backend::{ContextOptions, ImageOptions, VgBackend};

use super::error::{Error, Result};
use super::handle::{ContextId, FontId, ImageId};
use super::registry::{ContextState, FontEntry};

/// Context and resource lifecycle facade over the wrapped vector-graphics
/// library.
///
/// One facade owns zero or more native contexts. Every operation is a
/// synchronous, atomic call: it either fully succeeds, leaving one new live
/// handle, or fully fails, leaving no new state. There is no internal
/// locking — `&mut self` on every operation is the serialization contract,
/// and multi-thread use requires an external lock around the whole facade.
pub struct VgFacade<B: VgBackend> {
    backend: B,

    /// Live contexts keyed by their never-reused id.
    contexts: HashMap<u32, ContextState<B::Context>>,

    next_context: u32,
}

impl<B: VgBackend> VgFacade<B> {
    /// Creates a facade owning `backend`.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            contexts: HashMap::new(),
            next_context: 1,
        }
    }

    /// Read access to the wrapped backend (resource stats, capabilities).
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Number of live contexts.
    pub fn context_count(&self) -> usize {
        self.contexts.len()
    }

    /// Borrows the native context, e.g. for backend-specific queries.
    pub fn native(&self, ctx: ContextId) -> Result<&B::Context> {
        Ok(&self.state(ctx)?.native)
    }

    // ── contexts ──────────────────────────────────────────────────────────

    /// Creates a native context with the given capability options.
    pub fn create_context(&mut self, options: &ContextOptions) -> Result<ContextId> {
        let native = self
            .backend
            .create_context(options)
            .ok_or(Error::ContextCreation)?;

        let id = ContextId(self.next_context);
        self.next_context += 1; // ids are never reused
        self.contexts.insert(id.0, ContextState::new(native));
        debug!("context {} created", id.0);
        Ok(id)
    }

    /// Destroys a context, every native resource the wrapped library owns
    /// for it, and every font buffer registered against it.
    ///
    /// Deleting a context with an open frame abandons the frame with it.
    pub fn delete_context(&mut self, ctx: ContextId) -> Result<()> {
        let state = self
            .contexts
            .remove(&ctx.0)
            .ok_or(Error::InvalidHandle { what: "context" })?;

        if state.in_frame {
            debug!("context {} deleted with an open frame", ctx.0);
        }

        let fonts_released = state.fonts.len();
        self.backend.destroy_context(state.native);
        // `state.fonts` drops here, after the native fonts that referenced
        // the buffers are gone.
        debug!("context {} deleted ({fonts_released} font buffers released)", ctx.0);
        Ok(())
    }

    // ── images ────────────────────────────────────────────────────────────

    /// Decodes and uploads image bytes into `ctx`.
    ///
    /// The input buffer is not retained; the wrapped library copies decoded
    /// pixels during the call.
    pub fn create_image(
        &mut self,
        ctx: ContextId,
        bytes: &[u8],
        options: &ImageOptions,
    ) -> Result<ImageId> {
        let state = self
            .contexts
            .get_mut(&ctx.0)
            .ok_or(Error::InvalidHandle { what: "context" })?;

        let handle = self.backend.create_image(&mut state.native, bytes, options);
        if handle < 0 {
            return Err(Error::Decode { what: "image" });
        }

        state.images.insert(handle);
        Ok(ImageId(handle))
    }

    /// Releases a native image resource.
    pub fn delete_image(&mut self, ctx: ContextId, image: ImageId) -> Result<()> {
        let state = self
            .contexts
            .get_mut(&ctx.0)
            .ok_or(Error::InvalidHandle { what: "context" })?;

        if !state.images.remove(&image.0) {
            return Err(Error::InvalidHandle { what: "image" });
        }

        self.backend.delete_image(&mut state.native, image.0);
        Ok(())
    }

    // ── fonts ─────────────────────────────────────────────────────────────

    /// Registers font bytes under `name`, taking ownership of the buffer.
    ///
    /// The buffer is held in the font registry until [`delete_font`] (or
    /// context deletion) because the wrapped library references the raw
    /// bytes for the font's whole lifetime instead of copying them.
    ///
    /// A name already naming a live font in `ctx` is rejected; delete the
    /// old font first to re-register under the same name.
    pub fn create_font(&mut self, ctx: ContextId, name: &str, bytes: Vec<u8>) -> Result<FontId> {
        let state = self
            .contexts
            .get_mut(&ctx.0)
            .ok_or(Error::InvalidHandle { what: "context" })?;

        if state.font_by_name(name).is_some() {
            return Err(Error::DuplicateFontName {
                name: name.to_string(),
            });
        }

        let handle = self.backend.create_font(&mut state.native, name, &bytes);
        if handle < 0 {
            return Err(Error::Decode { what: "font" });
        }

        // Handle uniqueness within a context is the wrapped library's
        // contract.
        debug_assert!(!state.fonts.contains_key(&handle));
        state.fonts.insert(
            handle,
            FontEntry {
                name: name.to_string(),
                data: bytes,
            },
        );
        Ok(FontId(handle))
    }

    /// Removes a font from the wrapped library, then releases its registered
    /// source buffer.
    pub fn delete_font(&mut self, ctx: ContextId, font: FontId) -> Result<()> {
        let state = self
            .contexts
            .get_mut(&ctx.0)
            .ok_or(Error::InvalidHandle { what: "context" })?;

        if !state.fonts.contains_key(&font.0) {
            return Err(Error::InvalidHandle { what: "font" });
        }

        self.backend.delete_font(&mut state.native, font.0);
        // Buffer drops only after the native font stopped referencing it.
        state.fonts.remove(&font.0);
        Ok(())
    }

    /// Looks up a live font by its registered name.
    pub fn font_id(&self, ctx: ContextId, name: &str) -> Option<FontId> {
        self.contexts.get(&ctx.0)?.font_by_name(name).map(FontId)
    }

    /// Borrows the source bytes registered for a live font.
    pub fn font_data(&self, ctx: ContextId, font: FontId) -> Option<&[u8]> {
        self.contexts
            .get(&ctx.0)?
            .fonts
            .get(&font.0)
            .map(|entry| entry.data.as_slice())
    }

    // ── frames ────────────────────────────────────────────────────────────

    /// Opens the frame bracket on `ctx`.
    ///
    /// `width`/`height` are the viewport size in logical units;
    /// `device_pixel_ratio` maps logical to physical pixels. Brackets must
    /// strictly alternate with [`end_frame`]; nesting is not supported.
    pub fn begin_frame(
        &mut self,
        ctx: ContextId,
        width: f32,
        height: f32,
        device_pixel_ratio: f32,
    ) -> Result<()> {
        let state = self
            .contexts
            .get_mut(&ctx.0)
            .ok_or(Error::InvalidHandle { what: "context" })?;

        if state.in_frame {
            return Err(Error::FrameMismatch("begin_frame while a frame is open"));
        }

        self.backend
            .begin_frame(&mut state.native, width, height, device_pixel_ratio);
        state.in_frame = true;
        Ok(())
    }

    /// Closes the frame bracket, submitting accumulated draw commands.
    pub fn end_frame(&mut self, ctx: ContextId) -> Result<()> {
        let state = self
            .contexts
            .get_mut(&ctx.0)
            .ok_or(Error::InvalidHandle { what: "context" })?;

        if !state.in_frame {
            return Err(Error::FrameMismatch("end_frame without an open frame"));
        }

        self.backend.end_frame(&mut state.native);
        state.in_frame = false;
        Ok(())
    }

    fn state(&self, ctx: ContextId) -> Result<&ContextState<B::Context>> {
        self.contexts
            .get(&ctx.0)
            .ok_or(Error::InvalidHandle { what: "context" })
    }
}

impl<B: VgBackend> Drop for VgFacade<B> {
    /// Force-destroys any context the owner failed to delete, so native
    /// resources and font buffers are released on every exit path.
    fn drop(&mut self) {
        for (id, state) in self.contexts.drain() {
            warn!("context {id} still live at facade teardown; force-destroying");
            self.backend.destroy_context(state.native);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::HashSet;
    use std::rc::Rc;

    use super::*;

    /// Recording test double for the wrapped library: accepts any bytes not
    /// starting with the `BAD` marker and tracks live handles per context.
    struct MockVg {
        live: Rc<Cell<usize>>,
        refuse_contexts: bool,
    }

    struct MockContext {
        images: HashSet<i32>,
        fonts: HashSet<i32>,
        next_image: i32,
        next_font: i32,
        open_brackets: i32,
    }

    const BAD: &[u8] = b"BAD";

    impl MockVg {
        fn new() -> (Self, Rc<Cell<usize>>) {
            let live = Rc::new(Cell::new(0));
            (
                Self {
                    live: Rc::clone(&live),
                    refuse_contexts: false,
                },
                live,
            )
        }
    }

    impl VgBackend for MockVg {
        type Context = MockContext;

        fn create_context(&mut self, _options: &ContextOptions) -> Option<MockContext> {
            if self.refuse_contexts {
                return None;
            }
            self.live.set(self.live.get() + 1);
            Some(MockContext {
                images: HashSet::new(),
                fonts: HashSet::new(),
                next_image: 1,
                next_font: 0,
                open_brackets: 0,
            })
        }

        fn destroy_context(&mut self, _ctx: MockContext) {
            self.live.set(self.live.get() - 1);
        }

        fn create_image(
            &mut self,
            ctx: &mut MockContext,
            bytes: &[u8],
            _options: &ImageOptions,
        ) -> i32 {
            if bytes.starts_with(BAD) {
                return -1;
            }
            let handle = ctx.next_image;
            ctx.next_image += 1;
            ctx.images.insert(handle);
            handle
        }

        fn delete_image(&mut self, ctx: &mut MockContext, handle: i32) {
            ctx.images.remove(&handle);
        }

        fn create_font(&mut self, ctx: &mut MockContext, _name: &str, bytes: &[u8]) -> i32 {
            if bytes.starts_with(BAD) {
                return -1;
            }
            let handle = ctx.next_font;
            ctx.next_font += 1;
            ctx.fonts.insert(handle);
            handle
        }

        fn delete_font(&mut self, ctx: &mut MockContext, handle: i32) {
            ctx.fonts.remove(&handle);
        }

        fn begin_frame(
            &mut self,
            ctx: &mut MockContext,
            _width: f32,
            _height: f32,
            _device_pixel_ratio: f32,
        ) {
            ctx.open_brackets += 1;
        }

        fn end_frame(&mut self, ctx: &mut MockContext) {
            ctx.open_brackets -= 1;
        }
    }

    fn facade() -> VgFacade<MockVg> {
        VgFacade::new(MockVg::new().0)
    }

    fn context(vg: &mut VgFacade<MockVg>) -> ContextId {
        vg.create_context(&ContextOptions::default()).unwrap()
    }

    const FONT_BYTES: &[u8] = b"\x00\x01\x00\x00fake-sfnt-payload";

    // ── contexts ──────────────────────────────────────────────────────────

    #[test]
    fn create_and_delete_context() {
        let (mock, live) = MockVg::new();
        let mut vg = VgFacade::new(mock);

        let ctx = vg.create_context(&ContextOptions::default()).unwrap();
        assert_eq!(vg.context_count(), 1);
        assert_eq!(live.get(), 1);

        vg.delete_context(ctx).unwrap();
        assert_eq!(vg.context_count(), 0);
        assert_eq!(live.get(), 0);
    }

    #[test]
    fn delete_context_twice_is_invalid_handle() {
        let mut vg = facade();
        let ctx = context(&mut vg);

        vg.delete_context(ctx).unwrap();
        assert!(matches!(
            vg.delete_context(ctx),
            Err(Error::InvalidHandle { what: "context" })
        ));
    }

    #[test]
    fn context_creation_failure_is_reported() {
        let (mut mock, _live) = MockVg::new();
        mock.refuse_contexts = true;
        let mut vg = VgFacade::new(mock);

        assert!(matches!(
            vg.create_context(&ContextOptions::default()),
            Err(Error::ContextCreation)
        ));
        assert_eq!(vg.context_count(), 0);
    }

    #[test]
    fn stale_context_id_never_aliases_a_newer_context() {
        let mut vg = facade();
        let old = context(&mut vg);
        vg.delete_context(old).unwrap();

        let _new = context(&mut vg);
        assert!(matches!(
            vg.begin_frame(old, 100.0, 100.0, 1.0),
            Err(Error::InvalidHandle { what: "context" })
        ));
    }

    #[test]
    fn drop_force_destroys_live_contexts() {
        let (mock, live) = MockVg::new();
        let mut vg = VgFacade::new(mock);
        context(&mut vg);
        context(&mut vg);
        assert_eq!(live.get(), 2);

        drop(vg);
        assert_eq!(live.get(), 0);
    }

    // ── images ────────────────────────────────────────────────────────────

    #[test]
    fn image_create_then_delete_leaves_no_leak() {
        let mut vg = facade();
        let ctx = context(&mut vg);

        let image = vg
            .create_image(ctx, b"pixels", &ImageOptions::default())
            .unwrap();
        assert_eq!(vg.native(ctx).unwrap().images.len(), 1);

        vg.delete_image(ctx, image).unwrap();
        assert_eq!(vg.native(ctx).unwrap().images.len(), 0);
    }

    #[test]
    fn image_decode_failure_leaves_no_state() {
        let mut vg = facade();
        let ctx = context(&mut vg);

        assert!(matches!(
            vg.create_image(ctx, b"BAD pixels", &ImageOptions::default()),
            Err(Error::Decode { what: "image" })
        ));
        assert_eq!(vg.native(ctx).unwrap().images.len(), 0);
    }

    #[test]
    fn delete_image_with_dead_handle_keeps_other_images_live() {
        let mut vg = facade();
        let ctx = context(&mut vg);

        let doomed = vg
            .create_image(ctx, b"one", &ImageOptions::default())
            .unwrap();
        let survivor = vg
            .create_image(ctx, b"two", &ImageOptions::default())
            .unwrap();

        vg.delete_image(ctx, doomed).unwrap();
        assert!(matches!(
            vg.delete_image(ctx, doomed),
            Err(Error::InvalidHandle { what: "image" })
        ));
        assert!(vg.native(ctx).unwrap().images.contains(&survivor.raw()));
    }

    #[test]
    fn image_in_unknown_context_is_invalid_handle() {
        let mut vg = facade();
        let ctx = context(&mut vg);
        vg.delete_context(ctx).unwrap();

        assert!(matches!(
            vg.create_image(ctx, b"pixels", &ImageOptions::default()),
            Err(Error::InvalidHandle { what: "context" })
        ));
    }

    // ── fonts ─────────────────────────────────────────────────────────────

    #[test]
    fn font_registry_holds_byte_identical_buffer() {
        let mut vg = facade();
        let ctx = context(&mut vg);

        let font = vg.create_font(ctx, "sans", FONT_BYTES.to_vec()).unwrap();
        assert_eq!(vg.font_data(ctx, font), Some(FONT_BYTES));

        vg.delete_font(ctx, font).unwrap();
        assert_eq!(vg.font_data(ctx, font), None);
        assert_eq!(vg.native(ctx).unwrap().fonts.len(), 0);
    }

    #[test]
    fn font_decode_failure_leaves_no_state() {
        let mut vg = facade();
        let ctx = context(&mut vg);

        assert!(matches!(
            vg.create_font(ctx, "sans", b"BAD font".to_vec()),
            Err(Error::Decode { what: "font" })
        ));
        assert_eq!(vg.font_id(ctx, "sans"), None);
        assert_eq!(vg.native(ctx).unwrap().fonts.len(), 0);
    }

    #[test]
    fn duplicate_live_font_name_is_rejected() {
        let mut vg = facade();
        let ctx = context(&mut vg);

        vg.create_font(ctx, "sans", FONT_BYTES.to_vec()).unwrap();
        assert!(matches!(
            vg.create_font(ctx, "sans", FONT_BYTES.to_vec()),
            Err(Error::DuplicateFontName { .. })
        ));
        assert_eq!(vg.native(ctx).unwrap().fonts.len(), 1);
    }

    #[test]
    fn font_name_is_reusable_after_delete() {
        let mut vg = facade();
        let ctx = context(&mut vg);

        let first = vg.create_font(ctx, "sans", FONT_BYTES.to_vec()).unwrap();
        vg.delete_font(ctx, first).unwrap();

        let second = vg.create_font(ctx, "sans", FONT_BYTES.to_vec()).unwrap();
        assert_eq!(vg.font_id(ctx, "sans"), Some(second));
        assert_eq!(vg.font_data(ctx, second), Some(FONT_BYTES));
    }

    #[test]
    fn same_font_in_two_contexts_is_independent() {
        let mut vg = facade();
        let a = context(&mut vg);
        let b = context(&mut vg);

        let font_a = vg.create_font(a, "sans", FONT_BYTES.to_vec()).unwrap();
        let font_b = vg.create_font(b, "sans", FONT_BYTES.to_vec()).unwrap();

        vg.delete_font(a, font_a).unwrap();
        assert_eq!(vg.font_data(b, font_b), Some(FONT_BYTES));
        assert_eq!(vg.native(b).unwrap().fonts.len(), 1);
    }

    #[test]
    fn delete_font_with_dead_handle_is_invalid_handle() {
        let mut vg = facade();
        let ctx = context(&mut vg);

        let font = vg.create_font(ctx, "sans", FONT_BYTES.to_vec()).unwrap();
        vg.delete_font(ctx, font).unwrap();
        assert!(matches!(
            vg.delete_font(ctx, font),
            Err(Error::InvalidHandle { what: "font" })
        ));
    }

    #[test]
    fn delete_context_releases_its_font_buffers() {
        let mut vg = facade();
        let ctx = context(&mut vg);

        let font = vg.create_font(ctx, "sans", FONT_BYTES.to_vec()).unwrap();
        vg.delete_context(ctx).unwrap();
        assert_eq!(vg.font_data(ctx, font), None);
    }

    // ── frames ────────────────────────────────────────────────────────────

    #[test]
    fn frame_brackets_alternate() {
        let mut vg = facade();
        let ctx = context(&mut vg);

        vg.begin_frame(ctx, 800.0, 600.0, 1.0).unwrap();
        vg.end_frame(ctx).unwrap();
        vg.begin_frame(ctx, 800.0, 600.0, 2.0).unwrap();
        vg.end_frame(ctx).unwrap();
        assert_eq!(vg.native(ctx).unwrap().open_brackets, 0);
    }

    #[test]
    fn end_frame_without_begin_is_rejected() {
        let mut vg = facade();
        let ctx = context(&mut vg);

        assert!(matches!(
            vg.end_frame(ctx),
            Err(Error::FrameMismatch(_))
        ));
    }

    #[test]
    fn nested_begin_frame_is_rejected() {
        let mut vg = facade();
        let ctx = context(&mut vg);

        vg.begin_frame(ctx, 800.0, 600.0, 1.0).unwrap();
        assert!(matches!(
            vg.begin_frame(ctx, 800.0, 600.0, 1.0),
            Err(Error::FrameMismatch(_))
        ));
        // The rejected call must not reach the backend.
        assert_eq!(vg.native(ctx).unwrap().open_brackets, 1);
    }

    #[test]
    fn frame_state_is_per_context() {
        let mut vg = facade();
        let a = context(&mut vg);
        let b = context(&mut vg);

        vg.begin_frame(a, 800.0, 600.0, 1.0).unwrap();
        assert!(matches!(vg.end_frame(b), Err(Error::FrameMismatch(_))));
        vg.end_frame(a).unwrap();
    }

    #[test]
    fn resource_churn_inside_a_frame_is_allowed() {
        let mut vg = facade();
        let ctx = context(&mut vg);

        vg.begin_frame(ctx, 800.0, 600.0, 1.0).unwrap();
        let image = vg
            .create_image(ctx, b"pixels", &ImageOptions::default())
            .unwrap();
        vg.delete_image(ctx, image).unwrap();
        vg.end_frame(ctx).unwrap();
    }
}
