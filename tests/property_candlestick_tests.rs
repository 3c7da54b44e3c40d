use candlewick::chart::project_candles;
use candlewick::core::{OhlcPoint, Scale, ScaleKind, ScalePatch, VisiblePoint};
use proptest::prelude::*;

fn value_scale(min: f64, max: f64, space: f64) -> Scale {
    let mut scale = Scale::new(ScaleKind::Value);
    scale
        .update(ScalePatch {
            base_min: Some(min),
            base_max: Some(max),
            space_px: Some(space),
            ..ScalePatch::default()
        })
        .expect("scale update");
    scale
}

prop_compose! {
    fn arb_point()(
        time in 0.0f64..1.0e6,
        low in 1.0f64..1_000.0,
        height in 0.0f64..500.0,
        open_factor in 0.0f64..1.0,
        close_factor in 0.0f64..1.0,
        volume in 0.0f64..1.0e6
    ) -> OhlcPoint {
        let high = low + height;
        let open = low + open_factor * height;
        let close = low + close_factor * height;
        OhlcPoint::new(time, open, high, low, close, volume).expect("valid generated sample")
    }
}

proptest! {
    #[test]
    fn candle_color_branches_strictly_on_close_over_open(point in arb_point()) {
        prop_assert_eq!(point.is_up(), point.close > point.open);
    }

    #[test]
    fn projected_geometry_keeps_wick_around_body(
        points in proptest::collection::vec(arb_point(), 1..32),
        body_width in 1.0f64..30.0
    ) {
        let scale = value_scale(0.0, 2_000.0, 600.0);
        let visible: Vec<VisiblePoint> = points
            .iter()
            .enumerate()
            .map(|(i, point)| VisiblePoint {
                point: *point,
                x: i as f64 * 20.0,
            })
            .collect();

        let geometries = project_candles(&visible, &scale, body_width);
        prop_assert_eq!(geometries.len(), visible.len());

        for (geometry, point) in geometries.iter().zip(&visible) {
            prop_assert!(geometry.body_top <= geometry.body_bottom + 1e-9);
            // High maps to the smallest pixel on the inverted axis.
            prop_assert!(geometry.wick_top <= geometry.body_top + 1e-9);
            prop_assert!(geometry.wick_bottom >= geometry.body_bottom - 1e-9);
            prop_assert!((geometry.body_right - geometry.body_left - body_width).abs() <= 1e-9);
            prop_assert_eq!(geometry.is_up, point.point.is_up());
        }
    }
}
