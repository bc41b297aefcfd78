//! Canned checklists for well-known task archetypes.

/// An archetype phrase and the checklist suggested for it.
#[derive(Debug, Clone, Copy)]
pub struct Archetype {
    pub phrase: &'static str,
    pub subtasks: &'static [&'static str],
}

pub const ARCHETYPES: &[Archetype] = &[
    Archetype {
        phrase: "plan trip",
        subtasks: &[
            "Research destinations",
            "Set a budget",
            "Book flights",
            "Book accommodation",
            "Check passport and visa",
            "Plan itinerary",
            "Arrange travel insurance",
            "Pack luggage",
            "Arrange airport transport",
        ],
    },
    Archetype {
        phrase: "weekly shopping",
        subtasks: &[
            "Check pantry and fridge",
            "Plan meals for the week",
            "Write shopping list",
            "Bring reusable bags",
            "Put groceries away",
        ],
    },
    Archetype {
        phrase: "clean house",
        subtasks: &[
            "Declutter surfaces",
            "Dust furniture",
            "Vacuum floors",
            "Mop floors",
            "Clean bathroom",
            "Clean kitchen",
            "Take out trash",
        ],
    },
    Archetype {
        phrase: "prepare presentation",
        subtasks: &[
            "Define key message",
            "Outline slides",
            "Gather data and visuals",
            "Create slide deck",
            "Rehearse delivery",
            "Prepare for questions",
        ],
    },
    Archetype {
        phrase: "organize party",
        subtasks: &[
            "Pick a date",
            "Make guest list",
            "Send invitations",
            "Plan food and drinks",
            "Buy decorations",
            "Prepare music playlist",
        ],
    },
    Archetype {
        phrase: "move house",
        subtasks: &[
            "Book moving company",
            "Collect boxes",
            "Pack room by room",
            "Update address",
            "Transfer utilities",
            "Clean old place",
        ],
    },
    Archetype {
        phrase: "job application",
        subtasks: &[
            "Update resume",
            "Write cover letter",
            "Research the company",
            "Submit application",
            "Follow up with recruiter",
        ],
    },
    Archetype {
        phrase: "write report",
        subtasks: &[
            "Collect source material",
            "Draft outline",
            "Write first draft",
            "Review and edit",
            "Format and submit",
        ],
    },
    Archetype {
        phrase: "doctor appointment",
        subtasks: &[
            "Book appointment",
            "List symptoms and questions",
            "Bring insurance card",
            "Pick up prescriptions",
        ],
    },
    Archetype {
        phrase: "car maintenance",
        subtasks: &[
            "Check oil level",
            "Check tire pressure",
            "Top up fluids",
            "Schedule service",
            "Wash the car",
        ],
    },
    Archetype {
        phrase: "study for exam",
        subtasks: &[
            "Review syllabus",
            "Make study schedule",
            "Summarize notes",
            "Do practice questions",
            "Review weak topics",
        ],
    },
    Archetype {
        phrase: "plan wedding",
        subtasks: &[
            "Set budget",
            "Choose venue",
            "Create guest list",
            "Book catering",
            "Send invitations",
            "Arrange photographer",
        ],
    },
    Archetype {
        phrase: "start workout routine",
        subtasks: &[
            "Set fitness goals",
            "Pick workout days",
            "Get workout gear",
            "Plan exercises",
            "Track progress",
        ],
    },
];

/// Matches the first archetype whose phrase is contained in the text, or
/// which itself contains the whole text, and returns its checklist.
pub fn suggest_subtasks_from_templates(text: &str) -> Vec<String> {
    let lowered = text.trim().to_lowercase();
    if lowered.is_empty() {
        return Vec::new();
    }
    ARCHETYPES
        .iter()
        .find(|archetype| lowered.contains(archetype.phrase) || archetype.phrase.contains(&lowered))
        .map(|archetype| {
            tracing::trace!(phrase = archetype.phrase, "archetype matched");
            archetype.subtasks.iter().map(|s| s.to_string()).collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_containing_phrase_gets_full_list() {
        let subtasks = suggest_subtasks_from_templates("I want to plan trip to Japan");
        assert_eq!(subtasks.len(), 9);
        assert_eq!(subtasks, ARCHETYPES[0].subtasks);
    }

    #[test]
    fn phrase_containing_input_also_matches() {
        let subtasks = suggest_subtasks_from_templates("Weekly Shop");
        assert_eq!(subtasks.first().map(String::as_str), Some("Check pantry and fridge"));
    }

    #[test]
    fn first_archetype_in_order_wins() {
        let subtasks = suggest_subtasks_from_templates("clean house then organize party");
        assert_eq!(subtasks.first().map(String::as_str), Some("Declutter surfaces"));
    }

    #[test]
    fn no_match_or_blank_text_gives_nothing() {
        assert!(suggest_subtasks_from_templates("water the ferns").is_empty());
        assert!(suggest_subtasks_from_templates("").is_empty());
        assert!(suggest_subtasks_from_templates("   ").is_empty());
    }

    #[test]
    fn archetype_table_has_thirteen_entries() {
        assert_eq!(ARCHETYPES.len(), 13);
    }
}
