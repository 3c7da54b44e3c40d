use candlewick::core::{
    BoxRequest, BoxSpec, Edges, Flow, FlowCursor, Length, ResolvedBox, dims, measure,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn percentage_measure_property(
        pct in -1_000.0f64..1_000.0,
        reference in -100_000.0f64..100_000.0
    ) {
        let resolved = measure(Length::Percent(pct), Some(reference)).expect("measure");
        prop_assert!((resolved - pct / 100.0 * reference).abs() <= 1e-9);
    }

    #[test]
    fn pixel_measure_ignores_reference(
        value in -100_000.0f64..100_000.0,
        reference in -100_000.0f64..100_000.0
    ) {
        let resolved = measure(Length::Px(value), Some(reference)).expect("measure");
        prop_assert_eq!(resolved, value);
    }

    #[test]
    fn resolved_boxes_pass_through_dims_unchanged(
        x in -10_000.0f64..10_000.0,
        y in -10_000.0f64..10_000.0,
        w in 0.0f64..10_000.0,
        h in 0.0f64..10_000.0
    ) {
        let parent = ResolvedBox::root(500.0, 500.0, Edges::default(), Edges::default());
        let resolved = ResolvedBox::from_pixels(x, y, w, h);
        let mut cursor = FlowCursor::default();

        let round_tripped = dims(
            &BoxRequest::Resolved(resolved),
            &parent,
            Flow::Row,
            3.0,
            &mut cursor,
        )
        .expect("resolve");

        prop_assert_eq!(round_tripped, resolved);
        prop_assert_eq!(cursor, FlowCursor::default());
    }

    #[test]
    fn row_flow_total_advance_matches_sizes(
        widths in proptest::collection::vec(1.0f64..50.0, 1..8),
        gap in 0.0f64..10.0
    ) {
        let parent = ResolvedBox::root(10_000.0, 100.0, Edges::default(), Edges::default());
        let mut cursor = FlowCursor::default();

        for width in &widths {
            let spec = BoxSpec {
                w: Some(Length::Px(*width)),
                h: Some(Length::Px(10.0)),
                ..BoxSpec::default()
            };
            dims(&BoxRequest::Spec(spec), &parent, Flow::Row, gap, &mut cursor)
                .expect("resolve");
        }

        let expected: f64 = widths.iter().sum::<f64>() + gap * widths.len() as f64;
        prop_assert!((cursor.x_advance - expected).abs() <= 1e-6);
    }
}
