//! Tests for the decay aggregation and threshold crossing

use approx::assert_relative_eq;
use halflife::prelude::*;
use halflife::simulator::amount_at;

const HALF_LIFE: f64 = 5.7;

fn schedule(entries: &[(&str, &str)]) -> DoseSchedule {
    let entries: Vec<DoseEntry> = entries
        .iter()
        .map(|&(dosage, time)| DoseEntry::new(dosage, time))
        .collect();
    normalize(&entries).expect("schedule should be valid")
}

#[test]
fn test_single_dose_halves_every_half_life() {
    let s = schedule(&[("100", "14:00")]);
    let result = aggregate(&s);

    assert_eq!(result.series().amount_at(0.0), Some(100.0));

    // 5.7 and 11.4 fall between grid points
    assert_relative_eq!(amount_at(&s, HALF_LIFE, HALF_LIFE), 50.0, epsilon = 1e-9);
    assert_relative_eq!(
        amount_at(&s, 2.0 * HALF_LIFE, HALF_LIFE),
        25.0,
        epsilon = 1e-9
    );

    // grid points agree with the continuous amount
    for hour in [5.5, 11.5, 24.0] {
        assert_relative_eq!(
            result.series().amount_at(hour).unwrap(),
            amount_at(&s, hour, HALF_LIFE),
            epsilon = 1e-12
        );
    }
}

#[test]
fn test_single_dose_strictly_decreasing() {
    let result = aggregate(&schedule(&[("100", "14:00")]));
    let amounts = result.series().amounts();
    assert!(amounts.windows(2).all(|w| w[1] < w[0]));
}

#[test]
fn test_single_dose_crossing() {
    let result = aggregate(&schedule(&[("100", "14:00")]));

    // 100 * 0.5^(t / 5.7) = 2  =>  t = 5.7 * log2(50) ~ 32.17
    let exact = HALF_LIFE * 50.0_f64.log2();
    let crossing = result.crossing_hour();
    assert_eq!(result.crossing(), Crossing::Reached { hour: 32.5 });
    assert!(crossing >= exact && crossing - exact < 0.5);
}

#[test]
fn test_two_doses_combined() {
    let result = aggregate(&schedule(&[("100", "08:00"), ("100", "14:00")]));
    let series = result.series();

    let expected = 100.0 * 0.5_f64.powf(6.0 / HALF_LIFE) + 100.0;
    assert_relative_eq!(series.amount_at(6.0).unwrap(), expected, epsilon = 1e-9);
    assert!((series.amount_at(6.0).unwrap() - 148.2).abs() < 0.1);

    // second dose not yet active just before 14:00
    assert_relative_eq!(
        series.amount_at(5.5).unwrap(),
        100.0 * 0.5_f64.powf(5.5 / HALF_LIFE),
        epsilon = 1e-9
    );
}

#[test]
fn test_superposition() {
    let a = Dose::at(100.0, 8, 0).unwrap();
    let b = Dose::at(60.0, 13, 30).unwrap();
    let reference = 8 * 60;

    let both = aggregate(&DoseSchedule::with_reference(vec![a, b], reference).unwrap());
    let a_alone = aggregate(&DoseSchedule::with_reference(vec![a], reference).unwrap());
    let b_alone = aggregate(&DoseSchedule::with_reference(vec![b], reference).unwrap());

    assert_eq!(both.series().len(), a_alone.series().len());
    assert_eq!(both.series().len(), b_alone.series().len());
    for ((p, pa), pb) in both
        .series()
        .iter()
        .zip(a_alone.series())
        .zip(b_alone.series())
    {
        assert_eq!(p.hour, pa.hour);
        assert_eq!(p.hour, pb.hour);
        assert_relative_eq!(p.amount, pa.amount + pb.amount, epsilon = 1e-9);
    }

    // 13:30 is not taken yet at 08:00
    assert_eq!(b_alone.series().first().unwrap().amount, 0.0);
    assert_eq!(b_alone.series().amount_at(5.5), Some(60.0));
}

#[test]
fn test_deterministic() {
    let s = schedule(&[("100", "08:00"), ("45.5", "10:20"), ("80", "16:45")]);
    let first = aggregate(&s);
    let second = aggregate(&s);

    assert_eq!(first.series().len(), second.series().len());
    for (x, y) in first.series().iter().zip(second.series().iter()) {
        assert_eq!(x.hour.to_bits(), y.hour.to_bits());
        assert_eq!(x.amount.to_bits(), y.amount.to_bits());
    }
    assert_eq!(
        first.crossing_hour().to_bits(),
        second.crossing_hour().to_bits()
    );
}

#[test]
fn test_grid_and_length_bound() {
    let options = DecayOptions::default();
    let bound = (options.max_hours / options.step) as usize + 1;

    for entries in [
        vec![("100", "14:00")],
        vec![("1", "09:00")],
        vec![("400", "06:00"), ("200", "18:00")],
    ] {
        let result = aggregate(&schedule(&entries));
        let series = result.series();
        assert!(series.len() <= bound);
        for (i, p) in series.iter().enumerate() {
            assert_eq!(p.hour, i as f64 * options.step);
            assert!(p.amount >= 0.0);
        }
    }
}

#[test]
fn test_early_stop_not_before_floor() {
    let result = aggregate(&schedule(&[("1", "09:00")]));
    let series = result.series();

    let first_under = series
        .iter()
        .position(|p| p.amount < 0.01 && p.hour > 12.0)
        .expect("1 mg falls under the floor within 48 h");
    assert_eq!(series.len(), first_under + 1);
    assert_eq!(series.last().unwrap().hour, 38.0);
}

#[test]
fn test_threshold_not_reached() {
    let options = DecayOptions::default().with_max_hours(10.0);
    let result = aggregate_with(&schedule(&[("100", "14:00")]), &options).unwrap();

    assert_eq!(result.crossing(), Crossing::NotReached { last_hour: 10.0 });
    assert_eq!(result.crossing_hour(), 10.0);
}

#[test]
fn test_small_dose_crosses_immediately() {
    let result = aggregate(&schedule(&[("1.5", "09:00")]));
    assert_eq!(result.crossing(), Crossing::Reached { hour: 0.0 });
}

#[test]
fn test_late_dose_after_midnight_of_same_day() {
    // no date awareness: 01:00 is the reference and 23:00 comes 22 h later
    let result = aggregate(&schedule(&[("100", "23:00"), ("100", "01:00")]));
    let series = result.series();

    assert_relative_eq!(
        series.amount_at(22.0).unwrap(),
        100.0 * 0.5_f64.powf(22.0 / HALF_LIFE) + 100.0,
        epsilon = 1e-9
    );
}
