use crate::{
    assets::decode::PreparedImage,
    foundation::core::{Canvas, Point, Rgba8},
    foundation::error::{CardError, CardResult},
    text::shaper::ShapedText,
};

/// Premultiplied RGBA8 pixels produced by [`CardCanvas::finish`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major premultiplied RGBA8 data.
    pub data: Vec<u8>,
}

/// Painter's-order drawing surface backed by `vello_cpu`.
///
/// Every call paints on top of what is already there; nothing is reordered.
pub struct CardCanvas {
    canvas: Canvas,
    ctx: vello_cpu::RenderContext,
}

impl CardCanvas {
    /// Transparent canvas of the given size.
    pub fn new(canvas: Canvas) -> CardResult<Self> {
        let (w, h) = dims_u16(canvas.width, canvas.height)?;
        Ok(Self {
            canvas,
            ctx: vello_cpu::RenderContext::new(w, h),
        })
    }

    /// Canvas dimensions.
    pub fn size(&self) -> Canvas {
        self.canvas
    }

    /// Paint `img` at its natural size with its top-left corner at `at`.
    pub fn draw_image(&mut self, img: &PreparedImage, at: Point) -> CardResult<()> {
        let pixmap = prepared_to_pixmap(img)?;
        let (w, h) = (f64::from(pixmap.width()), f64::from(pixmap.height()));

        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            f64::from(at.x),
            f64::from(at.y),
        )));
        self.ctx.set_paint(vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(std::sync::Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        });
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
        Ok(())
    }

    /// Paint shaped text with the layout's top-left corner at `at`.
    ///
    /// `x_scale < 1.0` compresses the text horizontally around `at.x`.
    pub fn draw_text(
        &mut self,
        text: &ShapedText,
        at: Point,
        color: Rgba8,
        opacity: f32,
        x_scale: f32,
    ) {
        let transform = vello_cpu::kurbo::Affine::translate((f64::from(at.x), f64::from(at.y)))
            * vello_cpu::kurbo::Affine::scale_non_uniform(f64::from(x_scale.max(0.0)), 1.0);

        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(transform);
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));

        let opacity = opacity.clamp(0.0, 1.0);
        if opacity < 1.0 {
            self.ctx.push_opacity_layer(opacity);
        }

        for line in text.layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&text.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }

        if opacity < 1.0 {
            self.ctx.pop_layer();
        }
    }

    /// Rasterize everything painted so far.
    pub fn finish(mut self) -> CardResult<FrameRGBA> {
        let (w, h) = dims_u16(self.canvas.width, self.canvas.height)?;
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        Ok(FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
        })
    }
}

impl std::fmt::Debug for CardCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardCanvas")
            .field("canvas", &self.canvas)
            .finish_non_exhaustive()
    }
}

fn dims_u16(width: u32, height: u32) -> CardResult<(u16, u16)> {
    let w: u16 = width
        .try_into()
        .map_err(|_| CardError::validation("canvas width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| CardError::validation("canvas height exceeds u16"))?;
    Ok((w, h))
}

fn prepared_to_pixmap(img: &PreparedImage) -> CardResult<vello_cpu::Pixmap> {
    let (w, h) = dims_u16(img.width(), img.height())?;

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(img.width() as usize * img.height() as usize);
    for px in img.pixels.as_raw().chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
