use crate::config::Style;
use crate::timeline::Section;

/// Fixed copy shown while a section is on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SectionText {
    /// Heading.
    pub title: &'static str,
    /// Year line; only the enhanced style shows it separately.
    pub subtitle: Option<&'static str>,
    /// Description block, revealed progressively.
    pub body: &'static str,
}

/// Copy for `section` in `style`.
pub fn section_text(style: Style, section: Section) -> SectionText {
    match style {
        Style::Classic => classic(section),
        Style::Enhanced => enhanced(section),
    }
}

fn classic(section: Section) -> SectionText {
    let (title, body) = match section {
        Section::Dalton => (
            "Dalton's Atomic Model (1803)",
            "John Dalton proposed that:\n\
             1. Matter is made of indivisible atoms\n\
             2. Atoms of same element are identical\n\
             3. Compounds form from atom combinations",
        ),
        Section::Thomson => (
            "Thomson's Plum Pudding Model (1904)",
            "J.J. Thomson discovered electrons and proposed:\n\
             1. Atoms contain negatively charged electrons\n\
             2. Electrons are embedded in a positively charged 'pudding'\n\
             3. Overall atom is electrically neutral",
        ),
        Section::Rutherford => (
            "Rutherford's Nuclear Model (1911)",
            "Ernest Rutherford's gold foil experiment showed:\n\
             1. Atom has a tiny, dense nucleus\n\
             2. Electrons orbit the nucleus\n\
             3. Most of atom is empty space",
        ),
        Section::Bohr => (
            "Bohr's Quantum Model (1913)",
            "Niels Bohr introduced quantum theory to atoms:\n\
             1. Electrons move in fixed orbits (energy levels)\n\
             2. Orbits have quantized energy\n\
             3. Light is emitted when electrons jump levels",
        ),
    };
    SectionText {
        title,
        subtitle: None,
        body,
    }
}

fn enhanced(section: Section) -> SectionText {
    let (title, subtitle, body) = match section {
        Section::Dalton => (
            "Dalton's Atomic Model",
            "(1803)",
            "John Dalton proposed that:\n\
             • Matter is made of indivisible atoms\n\
             • Atoms of same element are identical\n\
             • Compounds form from atom combinations",
        ),
        Section::Thomson => (
            "Thomson's Plum Pudding Model",
            "(1904)",
            "J.J. Thomson discovered electrons and proposed:\n\
             • Atoms contain negatively charged electrons\n\
             • Electrons are embedded in positive 'pudding'\n\
             • Overall atom is electrically neutral",
        ),
        Section::Rutherford => (
            "Rutherford's Nuclear Model",
            "(1911)",
            "Rutherford's gold foil experiment showed:\n\
             • Atom has a tiny, dense nucleus\n\
             • Electrons orbit the nucleus\n\
             • Most of atom is empty space",
        ),
        Section::Bohr => (
            "Bohr's Quantum Model",
            "(1913)",
            "Niels Bohr introduced quantum theory:\n\
             • Electrons move in fixed orbits (energy levels)\n\
             • Orbits have quantized energy\n\
             • Light is emitted when electrons jump levels",
        ),
    };
    SectionText {
        title,
        subtitle: Some(subtitle),
        body,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/narrative.rs"]
mod tests;
