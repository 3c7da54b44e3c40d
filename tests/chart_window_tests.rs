use candlewick::chart::{ChartConfig, ChartLayer};
use candlewick::core::{OhlcPoint, ResolvedBox};

/// 100 one-minute samples, times 60..=6000 seconds.
fn minute_series() -> Vec<OhlcPoint> {
    (1..=100)
        .map(|i| {
            let time = f64::from(i) * 60.0;
            let base = 100.0 + f64::from(i) * 0.1;
            OhlcPoint::new(time, base, base + 1.0, base - 1.0, base + 0.5, 10.0)
                .expect("valid generated sample")
        })
        .collect()
}

/// Plot sized for 20 visible points at 20px spacing.
fn plot() -> ResolvedBox {
    ResolvedBox::from_pixels(0.0, 0.0, 400.0, 300.0)
}

fn minute_layer() -> ChartLayer {
    let config = ChartConfig {
        point_spacing_px: 20.0,
        interval: 60.0,
        ..ChartConfig::default()
    };
    let mut layer = ChartLayer::new(config).expect("layer");
    layer.set_points(minute_series()).expect("set points");
    layer
}

fn visible_times(layer: &ChartLayer) -> Vec<f64> {
    layer.visible().iter().map(|v| v.point.time).collect()
}

#[test]
fn initial_window_shows_the_most_recent_points() {
    let mut layer = minute_layer();
    layer.update_window(plot(), &[]).expect("window");

    let times = visible_times(&layer);
    assert_eq!(times.len(), 20);
    assert_eq!(times[0], 81.0 * 60.0);
    assert_eq!(times[19], 100.0 * 60.0);

    // Pinned to the latest data: offset sits at its upper clamp.
    let scroll = layer.x_scale.scroll();
    assert_eq!(scroll.offset, scroll.offset_max);
    assert_eq!(scroll.offset_max, 0.33 * 20.0 * 60.0);
}

#[test]
fn pan_of_five_points_shifts_the_window_back() {
    let mut layer = minute_layer();
    layer.update_window(plot(), &[]).expect("window");

    layer.x_scale.pan_by(-5.0 * 60.0).expect("pan");
    layer.update_window(plot(), &[]).expect("window");

    let times = visible_times(&layer);
    assert_eq!(times.len(), 20);
    assert_eq!(times[0], 76.0 * 60.0);
    assert_eq!(times[19], 95.0 * 60.0);
}

#[test]
fn pan_clamps_at_the_dataset_start() {
    let mut layer = minute_layer();
    layer.update_window(plot(), &[]).expect("window");

    layer.x_scale.pan_by(-1.0e9).expect("pan");
    layer.update_window(plot(), &[]).expect("window");

    let times = visible_times(&layer);
    assert_eq!(times.len(), 20);
    assert_eq!(times[0], 60.0);
    assert_eq!(times[19], 20.0 * 60.0);
}

#[test]
fn pan_clamps_at_the_future_bound_and_repins() {
    let mut layer = minute_layer();
    layer.update_window(plot(), &[]).expect("window");

    layer.x_scale.pan_by(-5.0 * 60.0).expect("pan");
    layer.update_window(plot(), &[]).expect("window");
    layer.x_scale.pan_by(1.0e9).expect("pan");
    layer.update_window(plot(), &[]).expect("window");

    let times = visible_times(&layer);
    assert_eq!(times[0], 81.0 * 60.0);
    assert_eq!(times[19], 100.0 * 60.0);
}

#[test]
fn appended_data_slides_a_pinned_window() {
    let mut layer = minute_layer();
    layer.update_window(plot(), &[]).expect("window");

    let time = 101.0 * 60.0;
    layer
        .append(OhlcPoint::new(time, 110.0, 112.0, 109.0, 111.0, 10.0).expect("sample"))
        .expect("append");
    layer.update_window(plot(), &[]).expect("window");

    let times = visible_times(&layer);
    assert_eq!(times.len(), 20);
    assert_eq!(times[19], time);
    assert_eq!(times[0], 82.0 * 60.0);
}

#[test]
fn unpinned_window_survives_appended_data() {
    let mut layer = minute_layer();
    layer.update_window(plot(), &[]).expect("window");

    layer.x_scale.pan_by(-5.0 * 60.0).expect("pan");
    layer.update_window(plot(), &[]).expect("window");
    let before = visible_times(&layer);

    layer
        .append(OhlcPoint::new(101.0 * 60.0, 110.0, 112.0, 109.0, 111.0, 10.0).expect("sample"))
        .expect("append");
    layer.update_window(plot(), &[]).expect("window");

    assert_eq!(visible_times(&layer), before);
}

#[test]
fn append_semantics_follow_realtime_updates() {
    let mut layer = minute_layer();

    // Equal time replaces the latest sample.
    let replacement = OhlcPoint::new(6_000.0, 110.0, 115.0, 108.0, 114.0, 42.0).expect("sample");
    layer.append(replacement).expect("replace");
    assert_eq!(layer.points().len(), 100);
    assert_eq!(layer.points()[99].close, 114.0);

    // Older samples are rejected.
    let stale = OhlcPoint::new(50.0 * 60.0, 100.0, 101.0, 99.0, 100.5, 1.0).expect("sample");
    assert!(layer.append(stale).is_err());
}

#[test]
fn set_points_canonicalizes_order_and_duplicates() {
    let mut layer = ChartLayer::new(ChartConfig::default()).expect("layer");
    let mk = |time: f64, close: f64| {
        OhlcPoint::new(time, 10.0, 20.0, 5.0, close, 1.0).expect("sample")
    };
    layer
        .set_points(vec![mk(120.0, 11.0), mk(60.0, 12.0), mk(120.0, 13.0)])
        .expect("set points");

    assert_eq!(layer.points().len(), 2);
    assert_eq!(layer.points()[0].time, 60.0);
    assert_eq!(layer.points()[1].time, 120.0);
    // The later duplicate wins.
    assert_eq!(layer.points()[1].close, 13.0);
}

#[test]
fn value_bounds_cover_visible_extremes_and_markers() {
    let mut layer = minute_layer();
    layer.update_window(plot(), &[150.0]).expect("window");

    let (low, high) = layer.y_scale.bounds();
    let visible_low = layer
        .visible()
        .iter()
        .map(|v| v.point.low)
        .fold(f64::INFINITY, f64::min);
    assert!(low <= visible_low);
    assert!(high >= 150.0);
}
