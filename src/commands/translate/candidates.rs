use std::collections::HashMap;

use crate::model::Section;

// A repeated section id keeps its first position but takes the later record.
pub(super) fn select_translation_candidates(sections: &[Section]) -> Vec<&Section> {
    let with_text = sections.iter().filter(|section| {
        section
            .section_body_text
            .as_deref()
            .is_some_and(|body| !body.trim().is_empty())
    });
    let with_tables = sections.iter().filter(|section| !section.tables.is_empty());

    let mut selected = Vec::<&Section>::new();
    let mut positions = HashMap::<&str, usize>::new();

    for section in with_text.chain(with_tables) {
        match positions.get(section.section.as_str()) {
            Some(&index) => selected[index] = section,
            None => {
                positions.insert(section.section.as_str(), selected.len());
                selected.push(section);
            }
        }
    }

    selected
}
