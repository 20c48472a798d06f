use anyhow::{Context, Result};
use log::info;

use nabu_vg::backend::{ContextOptions, HeadlessVg, ImageOptions};
use nabu_vg::canvas::VgFacade;
use nabu_vg::logging::{LoggingConfig, init_logging};

/// Headless smoke tool: drives the full context/resource/frame lifecycle
/// against the windowless backend and prints what it saw. Pass image paths
/// as arguments to push them through the decoder.
fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let mut vg = VgFacade::new(HeadlessVg::new());
    let ctx = vg
        .create_context(&ContextOptions::default())
        .context("failed to create rendering context")?;

    let font_bytes = load_system_font().context("no usable system font found")?;
    let font_len = font_bytes.len();
    let font = vg
        .create_font(ctx, "body", font_bytes)
        .context("system font was rejected by the font parser")?;
    info!("font 'body' registered ({font_len} bytes retained)");

    let mut images = Vec::new();
    for path in std::env::args().skip(1) {
        let bytes = std::fs::read(&path).with_context(|| format!("failed to read {path}"))?;
        let image = vg
            .create_image(ctx, &bytes, &ImageOptions::default())
            .with_context(|| format!("{path} was rejected by the image decoder"))?;
        let (w, h) = vg
            .native(ctx)?
            .image_size(image.raw())
            .context("decoded image has no recorded dimensions")?;
        println!("  {path}  {w}x{h}  -> image handle {}", image.raw());
        images.push(image);
    }

    for _ in 0..3 {
        vg.begin_frame(ctx, 820.0, 560.0, 1.0)?;
        vg.end_frame(ctx)?;
    }

    {
        let native = vg.native(ctx)?;
        println!();
        println!("  contexts  {}", vg.context_count());
        println!("  images    {}", native.image_count());
        println!("  fonts     {}", native.font_count());
        println!();
    }

    for image in images {
        vg.delete_image(ctx, image)?;
    }
    vg.delete_font(ctx, font)?;
    vg.delete_context(ctx)?;
    info!("clean teardown, nothing left for the facade to reclaim");
    Ok(())
}

fn load_system_font() -> Option<Vec<u8>> {
    [
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/noto/NotoSans-Regular.ttf",
        "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    ]
    .iter()
    .find_map(|p| std::fs::read(p).ok())
}
