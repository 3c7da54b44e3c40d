use crate::core::{BoxRequest, Flow, FlowCursor, Length, ResolvedBox, dims, resolve_edges};
use crate::error::ChartResult;
use crate::render::{
    CirclePrimitive, LinePrimitive, LineStrokeStyle, RasterPrimitive, RectPrimitive, RenderFrame,
    TextHAlign, TextPrimitive, Theme,
};
use crate::scene::images::ImageCache;

/// Text metrics provider for intrinsic label sizing.
///
/// The default implementation is a character-count heuristic; backends with
/// real shaping (Pango) can substitute exact metrics.
pub trait TextMeasurer {
    /// Returns the intrinsic `(width, height)` of one text run in pixels.
    fn measure(&self, text: &str, font_size_px: f64) -> (f64, f64);
}

/// Monospace-ish approximation: width from character count, height from a
/// fixed line-height ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicTextMeasurer {
    pub char_width_ratio: f64,
    pub line_height_ratio: f64,
}

impl Default for HeuristicTextMeasurer {
    fn default() -> Self {
        Self {
            char_width_ratio: 0.6,
            line_height_ratio: 1.2,
        }
    }
}

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, font_size_px: f64) -> (f64, f64) {
        let chars = text.chars().count() as f64;
        (
            chars * font_size_px * self.char_width_ratio,
            font_size_px * self.line_height_ratio,
        )
    }
}

/// Frame-scoped drawing dependencies shared by every brush.
pub struct Painter<'a> {
    pub frame: &'a mut RenderFrame,
    pub theme: &'a Theme,
    pub measurer: &'a dyn TextMeasurer,
    pub images: &'a mut ImageCache,
}

/// Options for one line draw; endpoints come from the resolved box's
/// `(x, y)`/`(x2, y2)` corners.
#[derive(Debug, Clone)]
pub struct LineOpts {
    pub shape: BoxRequest,
    pub color: String,
    pub width: f64,
    pub style: LineStrokeStyle,
    /// Optional inline label drawn after the segment itself.
    pub label: Option<TextOpts>,
}

impl LineOpts {
    #[must_use]
    pub fn new(shape: impl Into<BoxRequest>, color: impl Into<String>) -> Self {
        Self {
            shape: shape.into(),
            color: color.into(),
            width: 1.0,
            style: LineStrokeStyle::Solid,
            label: None,
        }
    }

    #[must_use]
    pub fn dashed(mut self, dash_px: f64, gap_px: f64) -> Self {
        self.style = LineStrokeStyle::Dashed { dash_px, gap_px };
        self
    }

    #[must_use]
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: TextOpts) -> Self {
        self.label = Some(label);
        self
    }
}

#[derive(Debug, Clone)]
pub struct RectOpts {
    pub shape: BoxRequest,
    pub fill: String,
    pub border: Option<(f64, String)>,
}

impl RectOpts {
    #[must_use]
    pub fn new(shape: impl Into<BoxRequest>, fill: impl Into<String>) -> Self {
        Self {
            shape: shape.into(),
            fill: fill.into(),
            border: None,
        }
    }

    #[must_use]
    pub fn with_border(mut self, width: f64, color: impl Into<String>) -> Self {
        self.border = Some((width, color.into()));
        self
    }
}

/// Circle centered in its resolved box; radius defaults to half the short
/// side.
#[derive(Debug, Clone)]
pub struct CircleOpts {
    pub shape: BoxRequest,
    pub fill: String,
    pub radius: Option<f64>,
}

impl CircleOpts {
    #[must_use]
    pub fn new(shape: impl Into<BoxRequest>, fill: impl Into<String>) -> Self {
        Self {
            shape: shape.into(),
            fill: fill.into(),
            radius: None,
        }
    }

    #[must_use]
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }
}

#[derive(Debug, Clone)]
pub struct TextOpts {
    pub content: String,
    pub shape: BoxRequest,
    pub color: Option<String>,
    pub font_size: Option<f64>,
    pub h_align: TextHAlign,
}

impl TextOpts {
    #[must_use]
    pub fn new(content: impl Into<String>, shape: impl Into<BoxRequest>) -> Self {
        Self {
            content: content.into(),
            shape: shape.into(),
            color: None,
            font_size: None,
            h_align: TextHAlign::Left,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = Some(font_size);
        self
    }

    #[must_use]
    pub fn aligned(mut self, h_align: TextHAlign) -> Self {
        self.h_align = h_align;
        self
    }
}

#[derive(Debug, Clone)]
pub struct ImageOpts {
    pub url: String,
    pub shape: BoxRequest,
}

impl ImageOpts {
    #[must_use]
    pub fn new(url: impl Into<String>, shape: impl Into<BoxRequest>) -> Self {
        Self {
            url: url.into(),
            shape: shape.into(),
        }
    }
}

/// Drawing handle bound to one layer's resolved box.
///
/// Every primitive resolves its own geometry against the owning layer
/// before emitting draw commands, so primitives can also be issued outside
/// the tree's own update pass (inline labels on lines, hover panels).
pub struct Brush<'p, 'a> {
    painter: &'p mut Painter<'a>,
    layer: ResolvedBox,
    flow: Flow,
    gap: f64,
    cursor: FlowCursor,
    text_color: String,
    font_size: f64,
}

impl<'p, 'a> Brush<'p, 'a> {
    #[must_use]
    pub fn new(painter: &'p mut Painter<'a>, layer: ResolvedBox) -> Self {
        Self {
            painter,
            layer,
            flow: Flow::default(),
            gap: 0.0,
            cursor: FlowCursor::default(),
            text_color: "--text".to_owned(),
            font_size: 12.0,
        }
    }

    #[must_use]
    pub fn with_flow(mut self, flow: Flow, gap: f64) -> Self {
        self.flow = flow;
        self.gap = gap;
        self
    }

    #[must_use]
    pub fn with_text_defaults(mut self, color: Option<&str>, font_size: f64) -> Self {
        if let Some(color) = color {
            self.text_color = color.to_owned();
        }
        self.font_size = font_size;
        self
    }

    #[must_use]
    pub fn layer_box(&self) -> ResolvedBox {
        self.layer
    }

    /// Resolves one geometry request against this layer.
    pub fn dims(&mut self, request: &BoxRequest) -> ChartResult<ResolvedBox> {
        dims(request, &self.layer, self.flow, self.gap, &mut self.cursor)
    }

    /// Spawns an ad-hoc child layer with row flow.
    pub fn row(&mut self, request: impl Into<BoxRequest>, gap: f64) -> ChartResult<Brush<'_, 'a>> {
        self.sub_layer(request.into(), Flow::Row, gap)
    }

    /// Spawns an ad-hoc child layer with column flow.
    pub fn col(&mut self, request: impl Into<BoxRequest>, gap: f64) -> ChartResult<Brush<'_, 'a>> {
        self.sub_layer(request.into(), Flow::Col, gap)
    }

    fn sub_layer(
        &mut self,
        request: BoxRequest,
        flow: Flow,
        gap: f64,
    ) -> ChartResult<Brush<'_, 'a>> {
        let resolved = self.dims(&request)?;
        Ok(Brush {
            painter: &mut *self.painter,
            layer: resolved,
            flow,
            gap,
            cursor: FlowCursor::default(),
            text_color: self.text_color.clone(),
            font_size: self.font_size,
        })
    }

    pub fn line(&mut self, opts: LineOpts) -> ChartResult<ResolvedBox> {
        let resolved = self.dims(&opts.shape)?;
        let color = self.painter.theme.resolve(&opts.color)?;
        self.painter.frame.lines.push(
            LinePrimitive::new(
                resolved.x,
                resolved.y,
                resolved.x2,
                resolved.y2,
                opts.width,
                color,
            )
            .with_stroke_style(opts.style),
        );
        if let Some(label) = opts.label {
            self.text(label)?;
        }
        Ok(resolved)
    }

    pub fn rect(&mut self, opts: RectOpts) -> ChartResult<ResolvedBox> {
        let resolved = self.dims(&opts.shape)?;
        let fill = self.painter.theme.resolve(&opts.fill)?;
        let mut rect =
            RectPrimitive::filled(resolved.x, resolved.y, resolved.w, resolved.h, fill);
        if let Some((width, color)) = &opts.border {
            rect = rect.with_border(*width, self.painter.theme.resolve(color)?);
        }
        self.painter.frame.rects.push(rect);
        Ok(resolved)
    }

    pub fn circle(&mut self, opts: CircleOpts) -> ChartResult<ResolvedBox> {
        let resolved = self.dims(&opts.shape)?;
        let fill = self.painter.theme.resolve(&opts.fill)?;
        let radius = opts
            .radius
            .unwrap_or_else(|| resolved.w.min(resolved.h) / 2.0);
        self.painter.frame.circles.push(CirclePrimitive::new(
            resolved.x + resolved.w / 2.0,
            resolved.y + resolved.h / 2.0,
            radius,
            fill,
        ));
        Ok(resolved)
    }

    /// Draws one text run with padding-aware re-measurement: intrinsic
    /// metrics size the box when no explicit size is given, padding is
    /// added before resolution, and alignment shifts the final position.
    pub fn text(&mut self, opts: TextOpts) -> ChartResult<ResolvedBox> {
        let font_size = opts.font_size.unwrap_or(self.font_size);
        let (intrinsic_w, intrinsic_h) = self.painter.measurer.measure(&opts.content, font_size);

        let resolved = match opts.shape {
            BoxRequest::Resolved(resolved) => resolved,
            BoxRequest::Spec(mut spec) => {
                let padding = resolve_edges(spec.padding, intrinsic_w, intrinsic_h)?;
                if spec.w.is_none() {
                    spec.w = Some(Length::Px(intrinsic_w + padding.horizontal()));
                }
                if spec.h.is_none() {
                    spec.h = Some(Length::Px(intrinsic_h + padding.vertical()));
                }
                self.dims(&BoxRequest::Spec(spec))?
            }
        };

        let color_input = opts.color.as_deref().unwrap_or(&self.text_color);
        let color = self.painter.theme.resolve(color_input)?;
        let x = match opts.h_align {
            TextHAlign::Left => resolved.x + resolved.padding.left,
            TextHAlign::Center => resolved.x + resolved.w / 2.0,
            TextHAlign::Right => resolved.x2 - resolved.padding.right,
        };
        self.painter.frame.texts.push(TextPrimitive::new(
            opts.content,
            x,
            resolved.y + resolved.padding.top,
            font_size,
            color,
            opts.h_align,
        ));
        Ok(resolved)
    }

    /// Draws one cached image, registering a pending fetch on first use.
    ///
    /// Returns the resolved box even when the image is still pending; the
    /// draw itself is skipped until the cache entry resolves.
    pub fn image(&mut self, opts: ImageOpts) -> ChartResult<ResolvedBox> {
        let resolved = self.dims(&opts.shape)?;
        if self.painter.images.request(&opts.url).is_some() {
            self.painter.frame.rasters.push(RasterPrimitive::new(
                opts.url,
                resolved.x,
                resolved.y,
                resolved.w,
                resolved.h,
            ));
        }
        Ok(resolved)
    }
}
