use linechart_rs::core::LinearScale;
use proptest::prelude::*;

proptest! {
    #[test]
    fn invert_undoes_convert(
        domain_start in -1_000_000.0f64..1_000_000.0,
        domain_span in 0.001f64..1_000_000.0,
        range_start in -2_000.0f64..2_000.0,
        range_span in 1.0f64..4_000.0,
        flipped in any::<bool>(),
        value_factor in 0.0f64..1.0
    ) {
        let range_end = if flipped { range_start - range_span } else { range_start + range_span };
        let scale = LinearScale::new(
            (domain_start, domain_start + domain_span),
            (range_start, range_end),
        );
        let value = domain_start + value_factor * domain_span;

        let recovered = scale.invert(scale.convert(value));
        prop_assert!((recovered - value).abs() <= 1e-6 * domain_span.max(1.0));
    }

    #[test]
    fn convert_is_monotonic_along_the_range_direction(
        domain_span in 0.001f64..1_000.0,
        a in 0.0f64..1.0,
        b in 0.0f64..1.0
    ) {
        let scale = LinearScale::new((0.0, domain_span), (400.0, 0.0));
        let (low, high) = if a <= b { (a, b) } else { (b, a) };

        prop_assert!(scale.convert(low * domain_span) >= scale.convert(high * domain_span));
    }
}
