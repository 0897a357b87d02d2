use rkyv::{Archive, Deserialize, Serialize};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use alloc::vec;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// A color-category code and the raw color value that denotes the same class.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct ColorCode {
    pub code: String,
    pub value: String,
    /// Case digit the category stands for (`N1`..`N8`).
    pub numeral: Option<char>,
}

/// Tags a resolved target must carry, selected by a case digit of the
/// asserting row.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct CaseTagRequirement {
    pub case: u8,
    pub target_tags: Vec<String>,
}

/// Agent agreement: case digits are tried in list order and the first one
/// present whose tags the target verb lacks is reported.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct AgentRule {
    pub role: String,
    pub by_case: Vec<CaseTagRequirement>,
}

/// Causative roles: own case must be one of `allowed_cases`; when the row
/// carries `target_check_case`, the target must carry `target_tag`.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct CausativeRule {
    pub role: String,
    pub allowed_cases: Vec<u8>,
    pub target_check_case: u8,
    pub target_tag: String,
}

/// `role X requires morph feature Y`, matched by substring on both sides.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct RoleRequirement {
    pub name: String,
    /// Any of these in the role-assignment text triggers the rule.
    pub triggers: Vec<String>,
    /// The morph analysis must contain at least one of these.
    pub morph_any_of: Vec<String>,
}

/// The open-ended grammatical vocabulary the rule battery is evaluated against.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Vocabulary {
    pub version: u32,
    pub colors: Vec<ColorCode>,
    pub sentinel_words: Vec<String>,
    /// Role-assignment placeholders meaning "no assignment".
    pub placeholders: Vec<String>,
    pub passive_marker: String,
    pub bound_form_suffix: String,
    pub malformed_morph_marker: String,
    pub reserved_delimiter: char,
    pub default_delimiter: char,
    pub indeclinable_tag: String,
    pub indeclinable_color: String,
    pub active_voice_tag: String,
    pub active_voice_color: String,
    pub sup_prefix: String,
    pub gender_markers: Vec<String>,
    pub agent: AgentRule,
    pub causatives: Vec<CausativeRule>,
    pub requirements: Vec<RoleRequirement>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn requirement(name: &str, triggers: &[&str], morph_any_of: &[&str]) -> RoleRequirement {
    RoleRequirement {
        name: name.to_string(),
        triggers: strings(triggers),
        morph_any_of: strings(morph_any_of),
    }
}

impl Vocabulary {
    /// The vocabulary used for the Sanskrit kāraka annotation corpus.
    pub fn sanskrit_default() -> Self {
        let color = |code: &str, value: &str, numeral: Option<char>| ColorCode {
            code: code.to_string(),
            value: value.to_string(),
            numeral,
        };

        Self {
            version: 1,
            colors: vec![
                color("N1", "#00BFFF", Some('1')),
                color("N2", "#93DB70", Some('2')),
                color("N3", "#40E0D0", Some('3')),
                color("N4", "#B0E2FF", Some('4')),
                color("N5", "#B4FFB4", Some('5')),
                color("N6", "#87CEEB", Some('6')),
                color("N7", "#C6E2EB", Some('7')),
                color("N8", "#6FFFC3", Some('8')),
                color("NA", "#FF99FF", None),
                color("KP", "#FF1975", None),
                color("CP", "#FFFF00", None),
            ],
            sentinel_words: strings(&["-", "", "."]),
            placeholders: strings(&["-", ""]),
            passive_marker: "अभिहित".to_string(),
            bound_form_suffix: "-".to_string(),
            malformed_morph_marker: "/".to_string(),
            reserved_delimiter: '#',
            default_delimiter: ';',
            indeclinable_tag: "{अव्य}".to_string(),
            indeclinable_color: "NA".to_string(),
            active_voice_tag: "कर्तरि;".to_string(),
            active_voice_color: "KP".to_string(),
            sup_prefix: "सुप्_".to_string(),
            gender_markers: strings(&["पुं;", "स्त्री;", "नपुं;"]),
            agent: AgentRule {
                role: "कर्ता".to_string(),
                by_case: vec![
                    CaseTagRequirement {
                        case: 1,
                        target_tags: strings(&["कर्तरि", "क्तवतु"]),
                    },
                    CaseTagRequirement {
                        case: 3,
                        target_tags: strings(&["कर्मणि", "क्त", "तव्यत्", "अनीयर्"]),
                    },
                    CaseTagRequirement {
                        case: 6,
                        target_tags: strings(&["ल्युट्", "घञ्"]),
                    },
                ],
            },
            causatives: vec![
                CausativeRule {
                    role: "प्रयोजककर्ता".to_string(),
                    allowed_cases: vec![1, 3],
                    target_check_case: 1,
                    target_tag: "णिच्".to_string(),
                },
                CausativeRule {
                    role: "प्रयोज्यकर्ता".to_string(),
                    allowed_cases: vec![2, 3],
                    target_check_case: 3,
                    target_tag: "णिच्".to_string(),
                },
            ],
            requirements: vec![
                requirement("cause", &["हेतुः"], &["3", "5", "तसिल्"]),
                requirement("instrument", &["करण,"], &["3"]),
                requirement(
                    "locative",
                    &["विषयाधिकरणम्", "देशाधिकरणम्", "कालाधिकरणम्", "अधिकरणम्"],
                    &["7", "अव्य"],
                ),
                requirement("recipient", &["सम्प्रदानम्"], &["4"]),
                requirement("source", &["अपादानम्"], &["5"]),
                requirement("precedence", &["पूर्वकालः"], &["क्त्वा", "ल्यप्"]),
                requirement("possessive-link", &["षष्ठीसम्बन्धः"], &["6"]),
                requirement("circumstantial-locative", &["भावलक्षणसप्तमी"], &["7"]),
                requirement("concurrent-time", &["वर्तमानसमानकालः"], &["शतृ", "शानच्"]),
            ],
        }
    }

    /// Maps a color code to its raw value (`N1` -> `#00BFFF`); a known value
    /// maps to itself and unknown text is returned unchanged.
    pub fn canonical_color<'a>(&'a self, raw: &'a str) -> &'a str {
        self.colors
            .iter()
            .find(|c| c.code == raw || c.value == raw)
            .map(|c| c.value.as_str())
            .unwrap_or(raw)
    }

    /// Case digit denoted by a canonical color value, if any.
    pub fn color_numeral(&self, canonical: &str) -> Option<char> {
        self.colors
            .iter()
            .find(|c| c.value == canonical)
            .and_then(|c| c.numeral)
    }

    pub fn is_sentinel(&self, word: &str) -> bool {
        self.sentinel_words.iter().any(|s| s == word)
    }

    pub fn is_placeholder(&self, role_assignment: &str) -> bool {
        self.placeholders.iter().any(|s| s == role_assignment)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::sanskrit_default()
    }
}
