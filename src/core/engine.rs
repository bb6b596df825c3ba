use super::types::{ProjectionInput, ProjectionResult, ProjectionSample};

/// Nominal future value of a monthly SIP paid at the start of each period
/// (annuity-due): `P * ((1+r)^n - 1)/r * (1+r)`.
///
/// `n` is the number of whole months in the horizon; `r` the periodic rate.
/// Zero periods or a zero contribution yield 0, and a zero rate collapses to
/// a pure sum of contributions.
pub fn sip_future_value(monthly: f64, annual_rate_pct: f64, years: f64) -> f64 {
    let n = (years * 12.0).round();
    let r = annual_rate_pct / 100.0 / 12.0;
    if n <= 0.0 || monthly <= 0.0 {
        return 0.0;
    }
    if r == 0.0 {
        return monthly * n;
    }
    monthly * (((1.0 + r).powf(n) - 1.0) / r) * (1.0 + r)
}

/// Discounts a nominal amount at horizon `years` back to present-day
/// purchasing power.
pub fn inflation_adjust(value: f64, inflation_rate_pct: f64, years: f64) -> f64 {
    let i = inflation_rate_pct / 100.0;
    if years <= 0.0 {
        return value;
    }
    value / (1.0 + i).powf(years)
}

/// Month-by-month simulation of the same schedule, sampled once per
/// completed year plus a trailing sample for a partial final year.
///
/// The running balance compounds first and the month's contribution lands
/// after, so the simulated final value trails the closed form by exactly one
/// period of growth. Displayed totals come from `sip_future_value` while the
/// chart consumes this series; callers must not reconcile the two.
pub fn build_series(monthly: f64, annual_rate_pct: f64, years: f64) -> Vec<ProjectionSample> {
    let n = ((years * 12.0).round() as i64).max(1);
    let r = annual_rate_pct / 100.0 / 12.0;

    let mut invested = 0.0;
    let mut value = 0.0;

    let mut samples = Vec::with_capacity((n as u64).div_ceil(12) as usize);
    for m in 1..=n {
        invested += monthly;
        value = value * (1.0 + r) + monthly;
        if m % 12 == 0 || m == n {
            samples.push(ProjectionSample {
                year: (m as u64).div_ceil(12) as u32,
                invested,
                value,
            });
        }
    }
    samples
}

pub fn project(input: &ProjectionInput) -> ProjectionResult {
    let future_value = sip_future_value(input.monthly, input.annual_rate_pct, input.years);
    let total_invested = input.monthly * (input.years * 12.0).round();
    let gain = future_value - total_invested;
    let real_future_value = inflation_adjust(future_value, input.inflation_rate_pct, input.years);
    let series = build_series(input.monthly, input.annual_rate_pct, input.years);

    ProjectionResult {
        series,
        future_value,
        total_invested,
        gain,
        real_future_value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn assert_approx_tol(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    fn sample_input() -> ProjectionInput {
        ProjectionInput {
            monthly: 10_000.0,
            annual_rate_pct: 12.0,
            years: 10.0,
            inflation_rate_pct: 6.0,
        }
    }

    #[test]
    fn canonical_scenario_matches_closed_form() {
        let result = project(&sample_input());

        assert_approx_tol(result.future_value, 2_323_390.7635194054, 1e-3);
        assert_approx(result.total_invested, 1_200_000.0);
        assert_approx_tol(result.gain, 1_123_390.7635194054, 1e-3);
        assert_approx_tol(result.real_future_value, 1_297_369.2670820637, 1e-3);
    }

    #[test]
    fn zero_rate_collapses_to_pure_sum() {
        let result = project(&ProjectionInput {
            monthly: 5_000.0,
            annual_rate_pct: 0.0,
            years: 5.0,
            inflation_rate_pct: 0.0,
        });

        assert_approx(result.future_value, 300_000.0);
        assert_approx(result.total_invested, 300_000.0);
        assert_approx(result.gain, 0.0);
    }

    #[test]
    fn zero_contribution_degenerates_to_single_zero_sample() {
        let result = project(&ProjectionInput {
            monthly: 0.0,
            annual_rate_pct: 12.0,
            years: 0.0,
            inflation_rate_pct: 6.0,
        });

        assert_approx(result.future_value, 0.0);
        assert_approx(result.total_invested, 0.0);
        assert_approx(result.gain, 0.0);
        assert_eq!(result.series.len(), 1);
        assert_approx(result.series[0].invested, 0.0);
        assert_approx(result.series[0].value, 0.0);
    }

    #[test]
    fn zero_years_floors_simulation_at_one_month() {
        // The closed form reports 0 for an empty horizon while the series
        // still carries one month; the chart always has a point to draw.
        let result = project(&ProjectionInput {
            monthly: 2_000.0,
            annual_rate_pct: 8.0,
            years: 0.0,
            inflation_rate_pct: 0.0,
        });

        assert_approx(result.future_value, 0.0);
        assert_approx(result.total_invested, 0.0);
        assert_eq!(result.series.len(), 1);
        assert_eq!(result.series[0].year, 1);
        assert_approx(result.series[0].invested, 2_000.0);
    }

    #[test]
    fn negative_inputs_are_treated_as_empty() {
        assert_approx(sip_future_value(-100.0, 12.0, 10.0), 0.0);
        assert_approx(sip_future_value(100.0, 12.0, -1.0), 0.0);
    }

    #[test]
    fn partial_trailing_year_emits_extra_sample() {
        // 2.5 years -> 30 months -> samples at months 12, 24 and 30.
        let samples = build_series(1_000.0, 10.0, 2.5);

        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].year, 1);
        assert_eq!(samples[1].year, 2);
        assert_eq!(samples[2].year, 3);
        assert_approx(samples[2].invested, 30_000.0);
    }

    #[test]
    fn inflation_adjust_is_identity_for_empty_horizon() {
        assert_approx(inflation_adjust(1_000.0, 6.0, 0.0), 1_000.0);
        assert_approx(inflation_adjust(1_000.0, 0.0, 10.0), 1_000.0);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_total_invested_is_exact_product(
            monthly in 0u32..1_000_000,
            months in 0u32..=960
        ) {
            let years = months as f64 / 12.0;
            let result = project(&ProjectionInput {
                monthly: monthly as f64,
                annual_rate_pct: 7.0,
                years,
                inflation_rate_pct: 4.0,
            });

            // Whole-rupee contributions over at most 960 months stay well
            // inside exact f64 integer range, so equality is exact.
            prop_assert_eq!(result.total_invested, monthly as f64 * months as f64);
        }

        #[test]
        fn prop_zero_rate_future_value_equals_principal(
            monthly in 1u32..1_000_000,
            months in 1u32..=960
        ) {
            let years = months as f64 / 12.0;
            let fv = sip_future_value(monthly as f64, 0.0, years);
            prop_assert_eq!(fv, monthly as f64 * months as f64);
        }

        #[test]
        fn prop_discounting_never_increases_value(
            monthly in 1u32..1_000_000,
            months in 1u32..=960,
            rate_bp in 0u32..=10_000,
            inflation_bp in 1u32..=5_000
        ) {
            let input = ProjectionInput {
                monthly: monthly as f64,
                annual_rate_pct: rate_bp as f64 / 100.0,
                years: months as f64 / 12.0,
                inflation_rate_pct: inflation_bp as f64 / 100.0,
            };
            let result = project(&input);

            prop_assert!(result.real_future_value <= result.future_value + EPS);
            prop_assert!(result.future_value >= 0.0);
            prop_assert!(result.gain >= -EPS);
        }

        #[test]
        fn prop_series_shape_and_final_sample(
            monthly in 1u32..1_000_000,
            months in 1u32..=960,
            rate_bp in 0u32..=10_000
        ) {
            let monthly = monthly as f64;
            let years = months as f64 / 12.0;
            let rate = rate_bp as f64 / 100.0;

            let samples = build_series(monthly, rate, years);
            prop_assert_eq!(samples.len() as u32, months.div_ceil(12));

            let last = samples.last().expect("non-empty series");
            prop_assert_eq!(last.invested, monthly * months as f64);
            prop_assert_eq!(last.year, months.div_ceil(12));

            let mut prev = 0.0;
            for sample in &samples {
                prop_assert!(sample.invested >= prev);
                prev = sample.invested;
            }
        }

        #[test]
        fn prop_simulation_trails_closed_form_by_one_period(
            monthly in 1u32..1_000_000,
            months in 1u32..=960,
            rate_bp in 1u32..=10_000
        ) {
            let monthly = monthly as f64;
            let years = months as f64 / 12.0;
            let rate = rate_bp as f64 / 100.0;
            let r = rate / 100.0 / 12.0;

            let fv = sip_future_value(monthly, rate, years);
            let last = build_series(monthly, rate, years)
                .last()
                .copied()
                .expect("non-empty series");

            // Contributions land at period start in the closed form but at
            // period end in the simulation, so the two differ by exactly one
            // compounding factor.
            let rel = (last.value * (1.0 + r) - fv).abs() / fv.max(1.0);
            prop_assert!(rel <= 1e-9, "relative gap {rel}");
        }
    }
}
