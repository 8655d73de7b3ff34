//! Fixed Teasonality reference data: the six questions, the tie-breaker
//! question and the 27 personalities.

use super::{AnswerValue, Axis};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct AnswerOption {
    pub label: &'static str,
    pub value: AnswerValue,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Question {
    pub id: u8,
    pub text: &'static str,
    pub axis: Axis,
    pub options: [AnswerOption; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Personality {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const EXTRA_QUESTION: &str = "Do you enjoy tea?";
pub const EXTRA_QUESTION_INTRO: &str = "Just one last thing... We need to know.";
pub const ALTERNATE_ENDING: &str =
    "BANNED. Access denied. Reason: bad taste. (Just kidding. Reset to retake the quiz.)";
pub const FORCED_RESULT_KEY: &str = "xxx";

const fn option(label: &'static str, value: AnswerValue) -> AnswerOption {
    AnswerOption { label, value }
}

pub static QUESTIONS: [Question; 6] = [
    Question {
        id: 1,
        text: "How do you prefer to start your day?",
        axis: Axis::Energy,
        options: [
            option("Give me a caffeine kick!", AnswerValue::Positive),
            option("A steady, gentle start.", AnswerValue::Neutral),
            option("Slow, calm, and caffeine-free.", AnswerValue::Negative),
        ],
    },
    Question {
        id: 2,
        text: "What is your ideal mental state?",
        axis: Axis::Energy,
        options: [
            option("Laser-focused & High Energy", AnswerValue::Positive),
            option("Alert but Balanced", AnswerValue::Neutral),
            option("Relaxed & Meditative", AnswerValue::Negative),
        ],
    },
    Question {
        id: 3,
        text: "Ordering at a new cafe...",
        axis: Axis::Adventure,
        options: [
            option("I'll try the weirdest thing!", AnswerValue::Positive),
            option("Something unique but safe.", AnswerValue::Neutral),
            option("My usual order, please.", AnswerValue::Negative),
        ],
    },
    Question {
        id: 4,
        text: "Shopping for tea/coffee...",
        axis: Axis::Adventure,
        options: [
            option("I love wild flavors & blends.", AnswerValue::Positive),
            option("I like exploring origins.", AnswerValue::Neutral),
            option("I stick to the classics.", AnswerValue::Negative),
        ],
    },
    Question {
        id: 5,
        text: "Pick a treat:",
        axis: Axis::Flavor,
        options: [
            option("Dark Chocolate (Bitter/Rich)", AnswerValue::Positive),
            option("Balanced / Nutty", AnswerValue::Neutral),
            option("Pastries / Jam (Sweet)", AnswerValue::Negative),
        ],
    },
    Question {
        id: 6,
        text: "How do you take your brew?",
        axis: Axis::Flavor,
        options: [
            option("Pure, strong, no sugar.", AnswerValue::Positive),
            option("Maybe a splash of milk.", AnswerValue::Neutral),
            option("Sweetened / Latte style.", AnswerValue::Negative),
        ],
    },
];

const fn personality(
    key: &'static str,
    name: &'static str,
    description: &'static str,
) -> Personality {
    Personality {
        key,
        name,
        description,
    }
}

pub static PERSONALITIES: [Personality; 27] = [
    personality("EAB", "The Trailblazer", "You seek high energy and crave new experiences, appreciating the raw, bitter complexity of pure tea. You're likely the first to try a new trend, not because it's popular, but because you need to know."),
    personality("EAS", "The Party Pop", "Energetic and adventurous, you love sweet, fun flavors that match your vibrant lifestyle. You approach life with a 'yes' attitude and bring the spark to any gathering."),
    personality("EAx", "The Explorer", "Driven by energy and curiosity, you're open to any flavor as long as it's exciting. You're constantly moving, seeking the next peak, the next idea, or the next great cup."),
    personality("ECB", "The Workhorse", "Consistent and energetic. You stick to the strong, bitter brews that get the job done. You value efficiency and reliability over novelty; results matter most to you."),
    personality("ECS", "The Sweet Spot", "You like your reliable energy boost with a touch of sweetness. Routine comfort is your superpower; you know exactly what you need to perform at your best."),
    personality("ECx", "The Daily Driver", "High energy, steady habits. You're not fussy about flavor, just the fuel. You're the dependable engine of your group, always running, always ready."),
    personality("ExB", "The Purist Pulse", "Balanced in habits but energetic in spirit. You strictly prefer the bold, bitter notes. You have a refined intensity: calm on the surface but driven by a powerful internal motor."),
    personality("ExS", "The Sugar Rush", "You need energy and you like it sweet. Simple effective pleasure. You likely work in bursts of creativity and need a quick, delightful lift to keep going."),
    personality("Exx", "The Dynamo", "Pure energy. Your preferences fluctuate, but your need for caffeine is constant. You are adaptable and high-octane, able to switch gears instantly."),
    personality("CAB", "The Deep Diver", "Relaxed demeanor but an adventurous palate. You explore complex, bitter profiles at your own pace. You likely enjoy philosophy, deep conversations, and getting lost in the details."),
    personality("CAS", "The Daydreamer", "Chill and imaginative. You love trying new, sweet concoctions that drift you away. You see the world not as it is, but as it could be: full of color and wonder."),
    personality("CAx", "The Wanderer", "Laid back but curious. You float between flavors, always looking for a gentle new experience. You take the path less traveled, simply to see where it goes."),
    personality("CCB", "The Monk", "Maximum chill, maximum consistency. You meditate on the bitter, earthy depths of the same pure tea. You find profound beauty in routine and simplicity."),
    personality("CCS", "The Comfort Seeker", "The ultimate cozy vibe. You stick to your favorite sweet, relaxing cup. No surprises needed; you know how to create a sanctuary of peace in a chaotic world."),
    personality("CCx", "The Anchor", "Stable and relaxed. You are the grounding force, indifferent to flavor swings. People come to you for stability, and you provide it with a warm, steady hand."),
    personality("CxB", "The Contemplative", "Balanced approach to life, but you seriously appreciate the bitter, grounded notes of tea. You likely spend time reflecting on the past and planning for the future with quiet confidence."),
    personality("CxS", "The Softie", "Easy-going and balanced. You have a sweet tooth that brings a smile to your calm day. You believe that life is too short to be bitter, finding joy in the small, sweet moments."),
    personality("Cxx", "The Zen Master", "Radiating calm. Neither seeking novelty nor routine, simply existing with the flow. You are present, mindful, and virtually unshakeable."),
    personality("xAB", "The Connoisseur", "Balanced energy, but highly adventurous. You hunt for the rare, bitter, and complex. You are likely a tastemaker, always seeking quality and nuance that others miss."),
    personality("xAS", "The Taster", "You enjoy the fun side of tea (sweet, new, and exciting) without needing a caffeine fix. You explore for the sheer joy of it, unburdened by addiction or routine."),
    personality("xAx", "The Open Mind", "Truly adventurous. Energy doesn't dictate your choice, curiosity does. You are a true generalist, interested in everything and defined by nothing but your openness."),
    personality("xCB", "The Traditionalist", "You respect the ritual. Consistent, bitter, and balanced. A timeless approach. You likely value heritage, history, and the way things 'should' be done."),
    personality("xCS", "The Regular", "You have your sweet favorite and you stick to it. Why change what works? You are practical, loyal, and find satisfaction in the familiar."),
    personality("xCx", "The Rock", "Steady and balanced. You don't seek highs or lows, just a good standard cup. You are the foundation upon which others build, dependable and solid."),
    personality("xxB", "The Sommelier", "It's all about the flavor profile. You lean towards the sophistication of bitter notes. For you, consumption is an intellectual pursuit as much as a sensory one."),
    personality("xxS", "The Treat", "Tea is a dessert for you. Sweet, balanced, and enjoyable anytime. You know how to reward yourself and believe in self-care as a priority."),
    personality("xxx", "True Eclectic", "Perfectly balanced. You are the center of the tea universe, adaptable to any brew. You are the chameleon, able to fit in anywhere and enjoy anything."),
];

/// Derives the three-letter key from axis totals. Energy and Adventure both
/// use `C` for their negative pole, so the key is only unambiguous by position.
pub fn personality_key(energy: i32, adventure: i32, flavor: i32) -> String {
    [
        Axis::Energy.letter_for(energy),
        Axis::Adventure.letter_for(adventure),
        Axis::Flavor.letter_for(flavor),
    ]
    .iter()
    .collect()
}

pub fn lookup(key: &str) -> Option<&'static Personality> {
    PERSONALITIES.iter().find(|personality| personality.key == key)
}
