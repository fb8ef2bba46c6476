use super::*;

fn ntsc() -> Fps {
    Fps::new(30_000, 1001).unwrap()
}

#[test]
fn integer_ratio_gives_constant_counts() {
    let fps = Fps::new(25, 1).unwrap();
    for p in 0..100 {
        assert_eq!(sample_calculator(fps, 48_000, p), 1920);
    }
}

#[test]
fn ntsc_counts_alternate_without_drift() {
    let fps = ntsc();
    let counts: Vec<u32> = (0..5).map(|p| sample_calculator(fps, 48_000, p)).collect();
    assert!(counts.iter().all(|&c| c == 1601 || c == 1602), "{counts:?}");

    let total: i64 = (0..30_000)
        .map(|p| i64::from(sample_calculator(fps, 48_000, p)))
        .sum();
    assert_eq!(total, 1001 * 48_000);
}

#[test]
fn any_one_second_window_sums_to_frequency() {
    let fps = Fps::new(25, 1).unwrap();
    for start in [0i64, 7, 1234, -40] {
        let total: u32 = (start..start + 25)
            .map(|p| sample_calculator(fps, 44_100, p))
            .sum();
        assert_eq!(total, 44_100, "window starting at {start}");
    }
}

#[test]
fn to_now_is_inclusive_running_sum() {
    let fps = ntsc();
    let mut running = 0i64;
    for k in 0..500 {
        running += i64::from(sample_calculator(fps, 48_000, k));
        assert_eq!(sample_calculator_to_now(fps, 48_000, k), running);
        assert_eq!(samples_before(fps, 48_000, k + 1), running);
    }
}

#[test]
fn degenerate_inputs_yield_zero() {
    let fps = Fps { num: 0, den: 1 };
    assert_eq!(sample_calculator(fps, 48_000, 10), 0);
    assert_eq!(sample_calculator(Fps::new(25, 1).unwrap(), 0, 10), 0);
    assert_eq!(samples_before(Fps::new(25, 1).unwrap(), 48_000, 0), 0);
}

#[test]
fn negative_positions_mirror_positive_ones() {
    let fps = ntsc();
    assert_eq!(
        samples_before(fps, 48_000, -7),
        -samples_before(fps, 48_000, 7)
    );
}
