use chrono::NaiveDate;
use linkdash_rs::core::{LinearScale, TimeScale, Viewport};

fn date(ymd: &str) -> NaiveDate {
    ymd.parse().expect("date literal")
}

#[test]
fn linear_scale_round_trip_within_tolerance() {
    let viewport = Viewport::new(1000, 600);
    let scale = LinearScale::new(10.0, 110.0).expect("valid scale");

    let original = 42.5;
    let px = scale.domain_to_pixel(original, viewport).expect("to pixel");
    let recovered = scale.pixel_to_domain(px, viewport).expect("from pixel");
    assert!((recovered - original).abs() <= 1e-9);
}

#[test]
fn invalid_viewport_is_rejected() {
    let viewport = Viewport::new(0, 0);
    let scale = LinearScale::new(0.0, 1.0).expect("valid scale");
    assert!(scale.domain_to_pixel(0.5, viewport).is_err());
    assert!(scale.pixel_to_domain(10.0, viewport).is_err());
}

#[test]
fn degenerate_domain_is_rejected() {
    assert!(LinearScale::new(5.0, 5.0).is_err());
    assert!(LinearScale::new(f64::NAN, 1.0).is_err());
}

#[test]
fn date_pixel_round_trip_is_exact_at_day_resolution() {
    let viewport = Viewport::new(1200, 400);
    let scale = TimeScale::from_dates(date("2020-01-01"), date("2020-12-31")).expect("scale");

    for ymd in ["2020-01-01", "2020-03-15", "2020-12-31"] {
        let px = scale.date_to_pixel(date(ymd), viewport).expect("to pixel");
        let recovered = scale.pixel_to_date(px, viewport).expect("from pixel");
        assert_eq!(recovered, date(ymd));
    }
}

#[test]
fn pixel_inversion_rounds_to_the_nearest_day() {
    let viewport = Viewport::new(1000, 400);
    // Ten-day domain over 1000px: one day per 100px.
    let scale = TimeScale::from_dates(date("2020-01-01"), date("2020-01-11")).expect("scale");

    let recovered = scale.pixel_to_date(249.0, viewport).expect("from pixel");
    assert_eq!(recovered, date("2020-01-03"));

    let recovered = scale.pixel_to_date(251.0, viewport).expect("from pixel");
    assert_eq!(recovered, date("2020-01-04"));
}

#[test]
fn single_date_extent_still_maps_pixels() {
    let viewport = Viewport::new(800, 400);
    let scale = TimeScale::from_dates(date("2020-01-15"), date("2020-01-15")).expect("scale");

    let px = scale.date_to_pixel(date("2020-01-15"), viewport).expect("to pixel");
    assert_eq!(px, 0.0);
    let recovered = scale.pixel_to_date(px, viewport).expect("from pixel");
    assert_eq!(recovered, date("2020-01-15"));
}

#[test]
fn inverted_date_extent_is_rejected() {
    assert!(TimeScale::from_dates(date("2020-02-01"), date("2020-01-01")).is_err());
}
