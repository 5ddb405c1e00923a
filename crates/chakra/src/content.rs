use crate::config::Config;
use derive_more::{AsRef, Deref, Display, From};
use wheelwright::slot::{SLOT_COUNT, SlotIndex};

const DESCRIPTIONS: [&str; SLOT_COUNT] = [
    "The first Mandal introduces the Rigveda and contains hymns to Agni, Indra, and other deities.",
    "The second Mandal focuses on hymns dedicated to Agni and Indra, with philosophical themes.",
    "The third Mandal features the famous Gayatri mantra and hymns to Agni, Indra, and Vishvamitra.",
    "The fourth Mandal contains hymns attributed to Vamadeva and praises to Agni and Indra.",
    "The fifth Mandal is known for hymns to the Visvedevas and Maruts, with family connections.",
    "The sixth Mandal includes hymns to Agni, Indra, and the Ashvins, with a focus on prosperity.",
    "The seventh Mandal is attributed to Vasishtha and contains hymns to Varuna and Indra.",
    "The eighth Mandal is diverse, with hymns to various deities and philosophical reflections.",
    "The ninth Mandal is dedicated almost entirely to Soma, the sacred ritual drink.",
    "The tenth Mandal contains philosophical hymns, including the Purusha Sukta and creation hymns.",
];

#[derive(Debug, Clone, PartialEq, Eq, Display, Deref, From, AsRef)]
pub struct LabelText(String);

impl LabelText {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Text shown on the wheel when nothing else is configured.
    pub fn numbered(slot: SlotIndex) -> Self {
        Self(format!("Mandal {}", slot.get() + 1))
    }
}

/// What a slot shows on the wheel and in its detail panel.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotContent {
    pub label: LabelText,
    pub description: String,
}

impl SlotContent {
    pub fn builtin(slot: SlotIndex) -> Self {
        Self {
            label: LabelText::numbered(slot),
            description: DESCRIPTIONS[slot.get()].to_string(),
        }
    }
}

/// Content of all ten slots, indexed by slot.
#[derive(Debug, Clone)]
pub struct SlotBook {
    slots: Vec<SlotContent>,
}

impl SlotBook {
    pub fn from_config(config: &Config) -> Self {
        let mut slots: Vec<SlotContent> = SlotIndex::all().map(SlotContent::builtin).collect();

        for cfg in &config.slots {
            let content = &mut slots[cfg.slot.get()];
            if let Some(label) = &cfg.label {
                content.label = LabelText::new(label.as_str());
            }
            if let Some(description) = &cfg.description {
                content.description = description.clone();
            }
        }

        Self { slots }
    }

    pub fn get(&self, slot: SlotIndex) -> &SlotContent {
        &self.slots[slot.get()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotIndex, &SlotContent)> {
        SlotIndex::all().zip(&self.slots)
    }
}

impl Default for SlotBook {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SlotConfig;

    #[test]
    fn test_builtin_content() {
        let book = SlotBook::default();
        assert_eq!(book.iter().count(), SLOT_COUNT);

        let first = book.get(SlotIndex::FIRST);
        assert_eq!(first.label.as_str(), "Mandal 1");
        assert!(first.description.contains("Rigveda"));

        let last = book.get(SlotIndex::wrapping(9));
        assert_eq!(last.label.to_string(), "Mandal 10");
    }

    #[test]
    fn test_config_overrides_single_fields() {
        let config = Config {
            slots: vec![SlotConfig {
                slot: SlotIndex::wrapping(4),
                label: Some("Maruts".into()),
                description: None,
            }],
            ..Config::default()
        };
        let book = SlotBook::from_config(&config);

        let overridden = book.get(SlotIndex::wrapping(4));
        assert_eq!(overridden.label.as_str(), "Maruts");
        assert_eq!(overridden.description, DESCRIPTIONS[4]);
        assert_eq!(book.get(SlotIndex::wrapping(5)).label.as_str(), "Mandal 6");
    }
}
