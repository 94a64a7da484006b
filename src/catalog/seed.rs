//! Bundled default catalog: Greek and Latin word elements.
//!
//! Inserted only into a completely empty catalog (preserve-over-seed).

use uuid::Uuid;

use super::{CardKind, Difficulty, WordCard};

fn card(
    kind: CardKind,
    root: &str,
    origin: &str,
    meaning: &str,
    examples: [&str; 3],
    definition: &str,
    difficulty: Difficulty,
    category: &str,
) -> WordCard {
    WordCard {
        id: Uuid::new_v4().to_string(),
        kind,
        root: root.to_string(),
        origin: origin.to_string(),
        meaning: meaning.to_string(),
        examples: examples.iter().map(|e| e.to_string()).collect(),
        definition: definition.to_string(),
        difficulty,
        points: difficulty.default_points(),
        category: category.to_string(),
    }
}

/// The default word-element set, with fresh ids on every call.
pub fn default_cards() -> Vec<WordCard> {
    use CardKind::{Prefix, Root, Suffix};
    use Difficulty::{Advanced, Beginner, Intermediate};

    vec![
        // Greek prefixes
        card(
            Prefix,
            "anti-",
            "Greek",
            "against, opposite",
            ["antifreeze", "antisocial", "anticlimactic"],
            "A prefix meaning against or opposite to something",
            Beginner,
            "opposition",
        ),
        card(
            Prefix,
            "auto-",
            "Greek",
            "self",
            ["automobile", "automatic", "autobiography"],
            "A prefix meaning self or same",
            Beginner,
            "self",
        ),
        card(
            Prefix,
            "bio-",
            "Greek",
            "life",
            ["biology", "biography", "biodegradable"],
            "A prefix meaning life or living things",
            Intermediate,
            "life",
        ),
        card(
            Prefix,
            "geo-",
            "Greek",
            "earth",
            ["geography", "geology", "geometric"],
            "A prefix meaning earth or ground",
            Intermediate,
            "earth",
        ),
        card(
            Prefix,
            "micro-",
            "Greek",
            "small",
            ["microscope", "microwave", "microphone"],
            "A prefix meaning very small",
            Intermediate,
            "size",
        ),
        card(
            Prefix,
            "tele-",
            "Greek",
            "far, distant",
            ["telephone", "television", "telescope"],
            "A prefix meaning far away or at a distance",
            Beginner,
            "distance",
        ),
        // Latin prefixes
        card(
            Prefix,
            "pre-",
            "Latin",
            "before",
            ["preview", "predict", "prepare"],
            "A prefix meaning before in time or place",
            Beginner,
            "time",
        ),
        card(
            Prefix,
            "re-",
            "Latin",
            "again, back",
            ["return", "rebuild", "recall"],
            "A prefix meaning again or back",
            Beginner,
            "repetition",
        ),
        card(
            Prefix,
            "sub-",
            "Latin",
            "under, below",
            ["submarine", "subway", "subzero"],
            "A prefix meaning under or below",
            Intermediate,
            "position",
        ),
        card(
            Prefix,
            "super-",
            "Latin",
            "above, over",
            ["superhero", "superior", "supernatural"],
            "A prefix meaning above or beyond normal",
            Intermediate,
            "position",
        ),
        card(
            Prefix,
            "trans-",
            "Latin",
            "across, through",
            ["transport", "translate", "transform"],
            "A prefix meaning across or through",
            Intermediate,
            "movement",
        ),
        card(
            Prefix,
            "inter-",
            "Latin",
            "between, among",
            ["international", "internet", "interview"],
            "A prefix meaning between or among",
            Advanced,
            "position",
        ),
        // Greek roots
        card(
            Root,
            "graph",
            "Greek",
            "write, draw",
            ["photograph", "biography", "paragraph"],
            "A root word meaning to write or draw",
            Intermediate,
            "communication",
        ),
        card(
            Root,
            "phon",
            "Greek",
            "sound",
            ["telephone", "symphony", "microphone"],
            "A root word meaning sound or voice",
            Intermediate,
            "sound",
        ),
        card(
            Root,
            "photo",
            "Greek",
            "light",
            ["photograph", "photosynthesis", "photocopy"],
            "A root word meaning light",
            Intermediate,
            "light",
        ),
        card(
            Root,
            "scope",
            "Greek",
            "see, look",
            ["telescope", "microscope", "stethoscope"],
            "A root word meaning to see or examine",
            Advanced,
            "vision",
        ),
        card(
            Root,
            "meter",
            "Greek",
            "measure",
            ["thermometer", "speedometer", "kilometer"],
            "A root word meaning to measure",
            Advanced,
            "measurement",
        ),
        // Latin roots
        card(
            Root,
            "port",
            "Latin",
            "carry",
            ["transport", "portable", "export"],
            "A root word meaning to carry or bear",
            Intermediate,
            "movement",
        ),
        card(
            Root,
            "dict",
            "Latin",
            "say, speak",
            ["dictionary", "predict", "contradict"],
            "A root meaning to say or speak",
            Intermediate,
            "communication",
        ),
        card(
            Root,
            "spect",
            "Latin",
            "look, see",
            ["inspect", "respect", "spectacle"],
            "A root meaning to look or see",
            Intermediate,
            "vision",
        ),
        card(
            Root,
            "ject",
            "Latin",
            "throw",
            ["project", "reject", "eject"],
            "A root meaning to throw or cast",
            Advanced,
            "action",
        ),
        card(
            Root,
            "struct",
            "Latin",
            "build",
            ["construct", "structure", "instruct"],
            "A root meaning to build or arrange",
            Advanced,
            "building",
        ),
        card(
            Root,
            "tract",
            "Latin",
            "pull, draw",
            ["attract", "contract", "extract"],
            "A root meaning to pull or draw",
            Advanced,
            "movement",
        ),
        // Greek suffixes
        card(
            Suffix,
            "-ology",
            "Greek",
            "study of",
            ["biology", "psychology", "geology"],
            "A suffix meaning the study of something",
            Advanced,
            "knowledge",
        ),
        card(
            Suffix,
            "-phobia",
            "Greek",
            "fear of",
            ["claustrophobia", "arachnophobia", "hydrophobia"],
            "A suffix meaning fear or dread of something",
            Advanced,
            "emotion",
        ),
        card(
            Suffix,
            "-ism",
            "Greek",
            "belief, condition",
            ["patriotism", "criticism", "heroism"],
            "A suffix indicating a belief, practice, or condition",
            Advanced,
            "belief",
        ),
        // Latin suffixes
        card(
            Suffix,
            "-tion",
            "Latin",
            "act, state",
            ["creation", "education", "celebration"],
            "A suffix indicating an action or state",
            Intermediate,
            "action",
        ),
        card(
            Suffix,
            "-able",
            "Latin",
            "capable of",
            ["readable", "comfortable", "reliable"],
            "A suffix meaning capable of or worthy of",
            Beginner,
            "ability",
        ),
        card(
            Suffix,
            "-ment",
            "Latin",
            "result, action",
            ["movement", "achievement", "development"],
            "A suffix indicating the result of an action",
            Intermediate,
            "result",
        ),
        card(
            Suffix,
            "-ous",
            "Latin",
            "full of, having",
            ["dangerous", "famous", "curious"],
            "A suffix meaning full of or characterized by",
            Intermediate,
            "quality",
        ),
        card(
            Suffix,
            "-ity",
            "Latin",
            "state, quality",
            ["personality", "reality", "creativity"],
            "A suffix indicating a state or quality",
            Advanced,
            "quality",
        ),
        // Additional important roots
        card(
            Root,
            "form",
            "Latin",
            "shape",
            ["transform", "uniform", "deform"],
            "A root meaning shape or appearance",
            Intermediate,
            "shape",
        ),
        card(
            Root,
            "sens",
            "Latin",
            "feel",
            ["sensitive", "nonsense", "sensor"],
            "A root meaning to feel or perceive",
            Intermediate,
            "feeling",
        ),
    ]
}
