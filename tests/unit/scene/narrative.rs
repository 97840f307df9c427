use super::*;

#[test]
fn classic_titles_carry_the_year() {
    for s in Section::ALL {
        let t = section_text(Style::Classic, s);
        assert!(t.title.ends_with(&format!("({})", s.year())));
        assert!(t.subtitle.is_none());
        assert_eq!(t.body.lines().count(), 4);
        assert!(t.body.lines().nth(1).unwrap().starts_with("1. "));
    }
}

#[test]
fn enhanced_splits_year_into_subtitle() {
    for s in Section::ALL {
        let t = section_text(Style::Enhanced, s);
        assert_eq!(t.subtitle, Some(format!("({})", s.year())).as_deref());
        assert!(!t.title.contains('('));
        assert!(t.body.lines().skip(1).all(|l| l.starts_with("• ")));
    }
}

#[test]
fn bodies_keep_line_breaks_without_indentation() {
    let t = section_text(Style::Classic, Section::Thomson);
    assert_eq!(
        t.body.lines().nth(2),
        Some("2. Electrons are embedded in a positively charged 'pudding'")
    );
    let t = section_text(Style::Enhanced, Section::Bohr);
    assert_eq!(
        t.body.lines().next(),
        Some("Niels Bohr introduced quantum theory:")
    );
}
