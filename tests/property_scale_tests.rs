use candlewick::core::{Scale, ScaleKind, ScalePatch, ScrollState, apply_scroll};
use proptest::prelude::*;

proptest! {
    #[test]
    fn scroll_offset_stays_clamped_over_any_sequence(
        start in -100.0f64..100.0,
        deltas in proptest::collection::vec(-500.0f64..500.0, 0..32),
        bound_a in -200.0f64..200.0,
        span in 0.0f64..400.0
    ) {
        let offset_min = bound_a;
        let offset_max = bound_a + span;
        let mut state = ScrollState {
            zoom: 0.0,
            offset: start.clamp(offset_min, offset_max),
            offset_min,
            offset_max,
        };

        for delta in deltas {
            state = apply_scroll(state, delta).expect("scroll");
            prop_assert!(state.offset >= state.offset_min);
            prop_assert!(state.offset <= state.offset_max);
        }
    }

    #[test]
    fn value_scale_round_trip_property(
        min in -1_000_000.0f64..1_000_000.0,
        span in 0.001f64..1_000_000.0,
        value_factor in 0.0f64..1.0,
        space in 16.0f64..4_096.0
    ) {
        let max = min + span;
        let value = min + value_factor * span;

        let mut scale = Scale::new(ScaleKind::Value);
        scale
            .update(ScalePatch {
                base_min: Some(min),
                base_max: Some(max),
                space_px: Some(space),
                ..ScalePatch::default()
            })
            .expect("scale update");

        let recovered = scale.from_pixels(scale.to_pixels(value));
        let tolerance = 1e-9 + (min.abs() + span) * 1e-12;
        prop_assert!((recovered - value).abs() <= tolerance);
    }

    #[test]
    fn time_axis_round_trip_mirrors_across_the_space(
        min in -1_000_000.0f64..1_000_000.0,
        span in 1.0f64..1_000_000.0,
        px_factor in 0.0f64..1.0,
        space in 16.0f64..4_096.0
    ) {
        let max = min + span;
        let px = px_factor * space;

        let mut scale = Scale::new(ScaleKind::Time);
        scale
            .update(ScalePatch {
                base_min: Some(min),
                base_max: Some(max),
                space_px: Some(space),
                ..ScalePatch::default()
            })
            .expect("scale update");

        let round_tripped = scale.to_pixels(scale.from_pixels(px));
        prop_assert!((round_tripped - (space - px)).abs() <= space * 1e-8 + 1e-6);
    }

    #[test]
    fn ticks_are_step_aligned_and_inside_the_window(
        min in -10_000.0f64..10_000.0,
        span in 1.0f64..5_000.0
    ) {
        let mut scale = Scale::new(ScaleKind::Time);
        scale
            .update(ScalePatch {
                base_min: Some(min),
                base_max: Some(min + span),
                space_px: Some(500.0),
                ..ScalePatch::default()
            })
            .expect("scale update");

        let step = scale.step();
        for tick in scale.ticks() {
            prop_assert!(tick.val >= min - 1e-6);
            prop_assert!(tick.val <= min + span + 1e-6);
            let remainder = (tick.val / step).round() * step - tick.val;
            prop_assert!(remainder.abs() <= 1e-6);
        }
    }
}
