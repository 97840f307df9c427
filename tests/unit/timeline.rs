use super::*;

const TOTAL: u64 = 3600;

#[test]
fn progress_is_monotonic_and_below_one() {
    let mut prev = -1.0;
    for i in 0..TOTAL {
        let p = progress(FrameIndex(i), TOTAL);
        assert!(p >= prev);
        assert!((0.0..1.0).contains(&p));
        prev = p;
    }
}

#[test]
fn sections_partition_progress_into_quarters() {
    assert_eq!(Section::from_progress(0.0), Section::Dalton);
    assert_eq!(Section::from_progress(0.2499), Section::Dalton);
    assert_eq!(Section::from_progress(0.25), Section::Thomson);
    assert_eq!(Section::from_progress(0.5), Section::Rutherford);
    assert_eq!(Section::from_progress(0.75), Section::Bohr);
    assert_eq!(Section::from_progress(0.9999), Section::Bohr);
    assert_eq!(Section::from_progress(1.0), Section::Bohr);
}

#[test]
fn section_boundaries_fall_on_exact_frames() {
    let first_of = |s: Section| {
        (0..TOTAL)
            .find(|&i| SectionClock::at_frame(FrameIndex(i), TOTAL).section == s)
            .unwrap()
    };
    assert_eq!(first_of(Section::Thomson), 900);
    assert_eq!(first_of(Section::Rutherford), 1800);
    assert_eq!(first_of(Section::Bohr), 2700);
    for s in Section::ALL {
        assert_eq!(
            SectionClock::at_frame(FrameIndex(first_of(s)), TOTAL).local,
            0.0
        );
    }
}

#[test]
fn section_progress_of_bohr_example() {
    let clock = SectionClock::at_frame(FrameIndex(2736), TOTAL);
    assert_eq!(clock.section, Section::Bohr);
    assert!((clock.local - 0.04).abs() < 1e-9);
}

#[test]
fn animate_text_reveals_prefixes() {
    let text = "Niels Bohr introduced quantum theory";
    assert_eq!(animate_text(text, 0.0), "");
    assert_eq!(animate_text(text, 1.0), text);
    assert_eq!(animate_text(text, 7.5), text);
    assert_eq!(animate_text(text, -1.0), "");

    let mut prev = "";
    for step in 0..=100 {
        let p = f64::from(step) / 100.0;
        let shown = animate_text(text, p);
        assert!(shown.starts_with(prev));
        assert_eq!(animate_text(text, p), shown);
        assert_eq!(shown.chars().count(), (p * text.len() as f64).floor() as usize);
        prev = shown;
    }
}

#[test]
fn animate_text_never_splits_multibyte_chars() {
    let text = "• Atoms • Electrons";
    for step in 0..=40 {
        let shown = animate_text(text, f64::from(step) / 40.0);
        assert!(text.starts_with(shown));
    }
    assert_eq!(animate_text(text, 0.06), "•");
}

#[test]
fn camera_sweeps_azimuth_and_oscillates_elevation() {
    let start = camera_pose(Style::Classic, 0.0);
    assert_eq!(start.elevation_deg, 15.0);
    assert_eq!(start.azimuth_deg, 0.0);

    let half = camera_pose(Style::Enhanced, 0.5);
    assert_eq!(half.azimuth_deg, 180.0);
    assert!((half.elevation_deg - (20.0 + 10.0 * (std::f64::consts::PI / 6.0).sin())).abs() < 1e-9);
}

#[test]
fn transition_alpha_fades_only_in_enhanced() {
    assert_eq!(transition_alpha(Style::Classic, 0.01), 1.0);
    assert!((transition_alpha(Style::Enhanced, 0.05) - 0.5).abs() < 1e-12);
    assert_eq!(transition_alpha(Style::Enhanced, 0.5), 1.0);
    assert!((transition_alpha(Style::Enhanced, 0.95) - 0.5).abs() < 1e-9);
}
