//! Built-in preset trait groups.

use crate::{Score, SpectrumError, TraitEntry};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PresetGroup {
    pub name: &'static str,
    pub traits: &'static [(&'static str, f64)],
}

impl PresetGroup {
    pub fn entries(&self) -> impl Iterator<Item = TraitEntry> + '_ {
        self.traits
            .iter()
            .filter_map(|(label, value)| TraitEntry::new(label, Score::new(*value).ok()?).ok())
    }
}

const GROUPS: &[PresetGroup] = &[
    PresetGroup {
        name: "Emotional Traits",
        traits: &[
            ("Nurturing", -4.5),
            ("Empathetic", -4.0),
            ("Stoic", 4.5),
            ("Patient", -3.5),
            ("Supportive", -3.5),
        ],
    },
    PresetGroup {
        name: "Cognitive Traits",
        traits: &[
            ("Analytical", 3.5),
            ("Decisive", 3.5),
            ("Creative", -2.5),
            ("Adaptable", 0.5),
            ("Responsible", 0.5),
        ],
    },
    PresetGroup {
        name: "Social Traits",
        traits: &[
            ("Assertive", 4.0),
            ("Charismatic", 2.5),
            ("Ambitious", 3.5),
            ("Dominant", 4.5),
            ("Independent", 2.5),
        ],
    },
    PresetGroup {
        name: "Physical/Practical Traits",
        traits: &[
            ("Athletic", 3.5),
            ("Handy", 3.0),
            ("Outdoorsy", 2.5),
            ("Organized", -1.5),
            ("Graceful", -4.5),
        ],
    },
    PresetGroup {
        name: "Style/Presentation",
        traits: &[
            ("Stylish", -3.0),
            ("Garish Style", -1.0),
            ("Reserved Style", 1.0),
            ("Masc Presenting", 5.0),
            ("Fem Presenting", -5.0),
        ],
    },
];

pub fn groups() -> &'static [PresetGroup] {
    GROUPS
}

pub fn find_group(name: &str) -> Option<&'static PresetGroup> {
    let name = name.trim();
    GROUPS.iter().find(|g| g.name.eq_ignore_ascii_case(name))
}

/// Preset score for a trait name; the first group listing it wins.
pub fn lookup(trait_name: &str) -> Option<Score> {
    let trait_name = trait_name.trim();
    GROUPS
        .iter()
        .flat_map(|g| g.traits.iter())
        .find(|(label, _)| *label == trait_name)
        .and_then(|(_, value)| Score::new(*value).ok())
}

pub fn qualified_name(group: &str, trait_name: &str) -> String {
    format!("{group}: {trait_name}")
}

/// Resolves a preset reference: a whole group name, a qualified
/// `Group: Trait`, or a bare trait name.
pub fn resolve(reference: &str) -> Result<Vec<TraitEntry>, SpectrumError> {
    let unknown = || SpectrumError::UnknownPreset(reference.to_string());

    if let Some(group) = find_group(reference) {
        return Ok(group.entries().collect());
    }

    if let Some((group_name, trait_name)) = reference.split_once(':') {
        let group = find_group(group_name).ok_or_else(unknown)?;
        let trait_name = trait_name.trim();
        let value = group
            .traits
            .iter()
            .find(|(label, _)| *label == trait_name)
            .map(|(_, value)| *value)
            .ok_or_else(unknown)?;
        return Ok(vec![TraitEntry::new(trait_name, Score::new(value)?)?]);
    }

    let score = lookup(reference).ok_or_else(unknown)?;
    Ok(vec![TraitEntry::new(reference, score)?])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_is_on_the_scale() {
        for group in groups() {
            assert_eq!(group.traits.len(), 5, "{}", group.name);
            assert_eq!(group.entries().count(), group.traits.len(), "{}", group.name);
        }
    }

    #[test]
    fn lookup_finds_scores() {
        assert_eq!(lookup("Nurturing").map(Score::value), Some(-4.5));
        assert_eq!(lookup("Masc Presenting").map(Score::value), Some(5.0));
        assert_eq!(lookup("Unknown"), None);
    }

    #[test]
    fn resolve_accepts_groups_qualified_and_bare_names() {
        assert_eq!(resolve("social traits").unwrap().len(), 5);

        let qualified = resolve("Emotional Traits: Stoic").unwrap();
        assert_eq!(qualified[0].label(), "Stoic");
        assert_eq!(qualified[0].score().value(), 4.5);

        let bare = resolve("Handy").unwrap();
        assert_eq!(bare[0].score().value(), 3.0);

        assert_eq!(
            resolve("Social Traits: Stoic"),
            Err(SpectrumError::UnknownPreset("Social Traits: Stoic".to_string()))
        );
    }

    #[test]
    fn qualified_names_join_with_colon() {
        assert_eq!(qualified_name("Social Traits", "Dominant"), "Social Traits: Dominant");
    }
}
