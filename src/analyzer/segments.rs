//! Life-area segments used by the subtask suggester.
//!
//! Unlike [`super::category::detect_task_category`], several segments may
//! match the same text at once.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Segment {
    House,
    Work,
    Personal,
    Health,
    Finance,
    Shopping,
    Travel,
    Study,
    Social,
    Fitness,
    Pets,
    Errands,
    Tech,
    Garden,
    Car,
    Kids,
}

/// Static description of a segment: trigger words and what it suggests.
#[derive(Debug, Clone, Copy)]
pub struct SegmentProfile {
    pub keywords: &'static [&'static str],
    pub subtasks: &'static [&'static str],
    pub icon: &'static str,
    pub color: &'static str,
}

impl Segment {
    pub fn profile(self) -> &'static SegmentProfile {
        match self {
            Segment::House => &HOUSE,
            Segment::Work => &WORK,
            Segment::Personal => &PERSONAL,
            Segment::Health => &HEALTH,
            Segment::Finance => &FINANCE,
            Segment::Shopping => &SHOPPING,
            Segment::Travel => &TRAVEL,
            Segment::Study => &STUDY,
            Segment::Social => &SOCIAL,
            Segment::Fitness => &FITNESS,
            Segment::Pets => &PETS,
            Segment::Errands => &ERRANDS,
            Segment::Tech => &TECH,
            Segment::Garden => &GARDEN,
            Segment::Car => &CAR,
            Segment::Kids => &KIDS,
        }
    }

    pub fn icon(self) -> &'static str {
        self.profile().icon
    }

    pub fn color(self) -> &'static str {
        self.profile().color
    }

    pub fn subtasks(self) -> &'static [&'static str] {
        self.profile().subtasks
    }
}

const HOUSE: SegmentProfile = SegmentProfile {
    keywords: &[
        "clean",
        "cleaning",
        "kitchen",
        "bathroom",
        "laundry",
        "dishes",
        "vacuum",
        "mop",
        "dust",
        "tidy",
        "declutter",
        "house",
        "home",
        "apartment",
        "bedroom",
        "chores",
    ],
    subtasks: &[
        "Gather cleaning supplies",
        "Declutter the area",
        "Wipe down surfaces",
        "Take out the trash",
    ],
    icon: "home-outline",
    color: "#4CAF50",
};

const WORK: SegmentProfile = SegmentProfile {
    keywords: &[
        "work",
        "report",
        "meeting",
        "office",
        "project",
        "client",
        "deadline",
        "presentation",
        "email",
        "emails",
        "boss",
        "colleague",
        "proposal",
    ],
    subtasks: &[
        "Review requirements",
        "Draft the document",
        "Get feedback from team",
        "Submit final version",
    ],
    icon: "briefcase-outline",
    color: "#2196F3",
};

const PERSONAL: SegmentProfile = SegmentProfile {
    keywords: &[
        "personal",
        "journal",
        "diary",
        "meditate",
        "meditation",
        "hobby",
        "self-care",
        "relax",
        "birthday",
        "anniversary",
    ],
    subtasks: &["Block time in calendar", "Prepare what you need", "Reflect afterwards"],
    icon: "person-outline",
    color: "#9C27B0",
};

const HEALTH: SegmentProfile = SegmentProfile {
    keywords: &[
        "doctor",
        "dentist",
        "medicine",
        "medication",
        "pharmacy",
        "checkup",
        "health",
        "therapy",
        "therapist",
        "prescription",
        "appointment",
        "hospital",
    ],
    subtasks: &[
        "Book the appointment",
        "Write down symptoms",
        "Bring insurance card",
        "Pick up prescription",
    ],
    icon: "medkit-outline",
    color: "#F44336",
};

const FINANCE: SegmentProfile = SegmentProfile {
    keywords: &[
        "pay",
        "bill",
        "bills",
        "bank",
        "budget",
        "tax",
        "taxes",
        "invoice",
        "rent",
        "loan",
        "insurance",
        "savings",
        "mortgage",
    ],
    subtasks: &[
        "Check account balance",
        "Gather statements",
        "Make the payment",
        "Save the receipt",
    ],
    icon: "cash-outline",
    color: "#FF9800",
};

const SHOPPING: SegmentProfile = SegmentProfile {
    keywords: &[
        "buy",
        "shop",
        "shopping",
        "grocery",
        "groceries",
        "store",
        "supermarket",
        "mall",
        "purchase",
        "order",
    ],
    subtasks: &[
        "Make a shopping list",
        "Check for coupons",
        "Compare prices",
        "Bring reusable bags",
    ],
    icon: "cart-outline",
    color: "#E91E63",
};

const TRAVEL: SegmentProfile = SegmentProfile {
    keywords: &[
        "trip",
        "travel",
        "flight",
        "flights",
        "hotel",
        "vacation",
        "holiday",
        "passport",
        "visa",
        "airport",
        "luggage",
        "itinerary",
    ],
    subtasks: &["Book transport", "Book accommodation", "Check travel documents", "Pack luggage"],
    icon: "airplane-outline",
    color: "#00BCD4",
};

const STUDY: SegmentProfile = SegmentProfile {
    keywords: &[
        "study",
        "exam",
        "homework",
        "assignment",
        "essay",
        "class",
        "course",
        "lecture",
        "thesis",
        "revise",
        "learn",
    ],
    subtasks: &[
        "Review notes",
        "Read the material",
        "Do practice exercises",
        "Summarize key points",
    ],
    icon: "school-outline",
    color: "#3F51B5",
};

const SOCIAL: SegmentProfile = SegmentProfile {
    keywords: &[
        "party",
        "friend",
        "friends",
        "family",
        "wedding",
        "visit",
        "invite",
        "invitation",
        "hangout",
        "celebrate",
        "reunion",
    ],
    subtasks: &["Confirm date and time", "Invite people", "Plan the activity", "Get a gift"],
    icon: "people-outline",
    color: "#FF5722",
};

const FITNESS: SegmentProfile = SegmentProfile {
    keywords: &[
        "gym",
        "workout",
        "exercise",
        "run",
        "running",
        "jog",
        "yoga",
        "swim",
        "cycling",
        "training",
        "stretch",
        "marathon",
    ],
    subtasks: &["Pack gym bag", "Warm up", "Complete the workout", "Stretch and cool down"],
    icon: "barbell-outline",
    color: "#8BC34A",
};

const PETS: SegmentProfile = SegmentProfile {
    keywords: &[
        "dog",
        "cat",
        "pet",
        "pets",
        "vet",
        "puppy",
        "kitten",
        "litter",
        "leash",
        "aquarium",
    ],
    subtasks: &["Buy pet food", "Schedule vet visit", "Clean pet area", "Go for a walk"],
    icon: "paw-outline",
    color: "#795548",
};

const ERRANDS: SegmentProfile = SegmentProfile {
    keywords: &[
        "errand",
        "errands",
        "post office",
        "package",
        "parcel",
        "pick up",
        "drop off",
        "return",
        "dry cleaning",
        "mail",
    ],
    subtasks: &["Plan the route", "Gather items to bring", "Check opening hours"],
    icon: "walk-outline",
    color: "#607D8B",
};

const TECH: SegmentProfile = SegmentProfile {
    keywords: &[
        "computer",
        "laptop",
        "phone",
        "update",
        "backup",
        "software",
        "install",
        "password",
        "wifi",
        "printer",
        "app",
    ],
    subtasks: &["Back up your data", "Install updates", "Test that it works"],
    icon: "laptop-outline",
    color: "#009688",
};

const GARDEN: SegmentProfile = SegmentProfile {
    keywords: &[
        "garden",
        "gardening",
        "plant",
        "plants",
        "lawn",
        "mow",
        "weed",
        "weeding",
        "seeds",
        "flowers",
        "compost",
    ],
    subtasks: &["Water the plants", "Pull weeds", "Trim hedges", "Mow the lawn"],
    icon: "leaf-outline",
    color: "#689F38",
};

const CAR: SegmentProfile = SegmentProfile {
    keywords: &[
        "car",
        "oil change",
        "tire",
        "tires",
        "mechanic",
        "gas",
        "fuel",
        "car wash",
        "registration",
        "brakes",
    ],
    subtasks: &[
        "Check tire pressure",
        "Book service appointment",
        "Fill up the tank",
        "Wash the car",
    ],
    icon: "car-outline",
    color: "#455A64",
};

const KIDS: SegmentProfile = SegmentProfile {
    keywords: &[
        "kids",
        "kid",
        "children",
        "child",
        "school pickup",
        "daycare",
        "babysitter",
        "playdate",
        "son",
        "daughter",
        "baby",
    ],
    subtasks: &["Pack school bag", "Arrange pickup", "Prepare snacks", "Check school calendar"],
    icon: "happy-outline",
    color: "#FFC107",
};

static SEGMENT_PATTERNS: Lazy<Vec<(Segment, Regex)>> = Lazy::new(|| {
    Segment::iter()
        .map(|segment| {
            let keywords = segment
                .profile()
                .keywords
                .iter()
                .map(|keyword| {
                    keyword
                        .split_whitespace()
                        .map(regex::escape)
                        .collect::<Vec<_>>()
                        .join(r"\s+")
                })
                .collect::<Vec<_>>()
                .join("|");
            let regex = RegexBuilder::new(&format!(r"\b(?:{keywords})\b"))
                .case_insensitive(true)
                .build()
                .expect("valid segment pattern");
            (segment, regex)
        })
        .collect()
});

/// Every segment whose keywords appear in `text`, in declaration order.
pub fn detect_segments(text: &str) -> Vec<Segment> {
    SEGMENT_PATTERNS
        .iter()
        .filter(|(_, regex)| regex.is_match(text))
        .map(|(segment, _)| *segment)
        .collect()
}
