use candlewick::core::{BoxSpec, EdgeSpec, Length, Position, ResolvedBox};
use candlewick::render::{RenderFrame, TextHAlign, Theme, Viewport};
use candlewick::scene::{
    Brush, HeuristicTextMeasurer, ImageCache, ImageHandle, ImageOpts, LineOpts, Painter, TextOpts,
};

fn with_painter<T>(run: impl FnOnce(&mut Painter<'_>) -> T) -> (T, RenderFrame) {
    let mut frame = RenderFrame::new(Viewport::new(400.0, 300.0));
    let theme = Theme::default();
    let measurer = HeuristicTextMeasurer::default();
    let mut images = ImageCache::default();
    let result = {
        let mut painter = Painter {
            frame: &mut frame,
            theme: &theme,
            measurer: &measurer,
            images: &mut images,
        };
        run(&mut painter)
    };
    (result, frame)
}

fn layer() -> ResolvedBox {
    ResolvedBox::from_pixels(10.0, 20.0, 200.0, 100.0)
}

#[test]
fn lines_can_carry_inline_labels() {
    let ((), frame) = with_painter(|painter| {
        let mut brush = Brush::new(painter, layer());
        brush
            .line(
                LineOpts::new(
                    BoxSpec {
                        x: Some(Length::Px(0.0)),
                        x2: Some(Length::Percent(100.0)),
                        y: Some(Length::Px(50.0)),
                        y2: Some(Length::Px(50.0)),
                        position: Position::Absolute,
                        ..BoxSpec::default()
                    },
                    "#336699",
                )
                .with_label(
                    TextOpts::new(
                        "mid",
                        BoxSpec {
                            x: Some(Length::Px(4.0)),
                            y: Some(Length::Px(38.0)),
                            position: Position::Absolute,
                            ..BoxSpec::default()
                        },
                    )
                    .with_color("--label"),
                ),
            )
            .expect("line");
    });

    assert_eq!(frame.lines.len(), 1);
    assert_eq!(frame.texts.len(), 1);
    // The layer origin offsets both primitives.
    assert_eq!(frame.lines[0].x1, 10.0);
    assert_eq!(frame.lines[0].x2, 210.0);
    assert_eq!(frame.texts[0].text, "mid");
}

#[test]
fn text_sizes_itself_from_metrics_and_padding() {
    let (resolved, frame) = with_painter(|painter| {
        let mut brush = Brush::new(painter, layer());
        brush
            .text(
                TextOpts::new(
                    "abcd",
                    BoxSpec {
                        x: Some(Length::Px(0.0)),
                        y: Some(Length::Px(0.0)),
                        padding: EdgeSpec::Uniform(Length::Px(3.0)),
                        position: Position::Absolute,
                        ..BoxSpec::default()
                    },
                )
                .aligned(TextHAlign::Left),
            )
            .expect("text")
    });

    // 4 chars * 12px * 0.6 intrinsic width, plus 3px padding per side.
    assert!((resolved.w - (28.8 + 6.0)).abs() <= 1e-9);
    assert!((resolved.h - (14.4 + 6.0)).abs() <= 1e-9);
    // The baseline honors the padding inset.
    assert_eq!(frame.texts[0].x, 10.0 + 3.0);
    assert_eq!(frame.texts[0].y, 20.0 + 3.0);
}

#[test]
fn row_helper_flows_ad_hoc_children() {
    let (boxes, _frame) = with_painter(|painter| {
        let mut brush = Brush::new(painter, layer());
        let mut row = brush
            .row(
                BoxSpec {
                    position: Position::Absolute,
                    ..BoxSpec::default()
                },
                5.0,
            )
            .expect("row");

        let mut out = Vec::new();
        for width in [10.0, 20.0, 30.0] {
            let spec = BoxSpec {
                w: Some(Length::Px(width)),
                h: Some(Length::Px(10.0)),
                ..BoxSpec::default()
            };
            out.push(row.dims(&spec.into()).expect("child"));
        }
        out
    });

    // Same flow contract as tree children: 0, 15, 40 plus the layer origin.
    assert_eq!(boxes[0].x, 10.0);
    assert_eq!(boxes[1].x, 25.0);
    assert_eq!(boxes[2].x, 50.0);
}

#[test]
fn pending_images_skip_the_draw_but_reserve_the_box() {
    let (resolved, frame) = with_painter(|painter| {
        let mut brush = Brush::new(painter, layer());
        brush
            .image(ImageOpts::new(
                "icon://badge",
                BoxSpec {
                    x: Some(Length::Px(0.0)),
                    y: Some(Length::Px(0.0)),
                    w: Some(Length::Px(16.0)),
                    h: Some(Length::Px(16.0)),
                    position: Position::Absolute,
                    ..BoxSpec::default()
                },
            ))
            .expect("image")
    });

    assert_eq!(resolved.w, 16.0);
    assert!(frame.rasters.is_empty());
}

#[test]
fn resolved_images_rasterize_at_their_box() {
    let mut frame = RenderFrame::new(Viewport::new(400.0, 300.0));
    let theme = Theme::default();
    let measurer = HeuristicTextMeasurer::default();
    let mut images = ImageCache::default();
    images.request("icon://badge");
    images.complete(
        "icon://badge",
        Ok(ImageHandle {
            url: "icon://badge".to_owned(),
            width: 16.0,
            height: 16.0,
        }),
    );

    {
        let mut painter = Painter {
            frame: &mut frame,
            theme: &theme,
            measurer: &measurer,
            images: &mut images,
        };
        let mut brush = Brush::new(&mut painter, layer());
        brush
            .image(ImageOpts::new(
                "icon://badge",
                BoxSpec {
                    x: Some(Length::Px(4.0)),
                    y: Some(Length::Px(6.0)),
                    w: Some(Length::Px(16.0)),
                    h: Some(Length::Px(16.0)),
                    position: Position::Absolute,
                    ..BoxSpec::default()
                },
            ))
            .expect("image");
    }

    assert_eq!(frame.rasters.len(), 1);
    assert_eq!(frame.rasters[0].x, 14.0);
    assert_eq!(frame.rasters[0].y, 26.0);
}
