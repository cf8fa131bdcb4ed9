//! MBTI type codes and the direct-entry code validator.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The sixteen canonical type codes.
pub const MBTI_CODES: [&str; 16] = [
    "INTJ", "INTP", "ENTJ", "ENTP", "INFJ", "INFP", "ENFJ", "ENFP", "ISTJ", "ISFJ", "ESTJ",
    "ESFJ", "ISTP", "ISFP", "ESTP", "ESFP",
];

/// Letter used when rendering an unresolved dimension.
pub const UNRESOLVED_LETTER: char = 'X';

/// Outcome of validating a direct-entry code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MbtiValidation {
    /// Trimmed, uppercased input
    pub normalized: String,
    /// Whether `normalized` is one of the sixteen codes
    pub is_valid: bool,
}

/// Validate a user-entered type code.
///
/// No fuzzy matching: anything outside the sixteen codes is invalid.
pub fn validate(raw: &str) -> MbtiValidation {
    let normalized = raw.trim().to_uppercase();
    let is_valid = MBTI_CODES.contains(&normalized.as_str());
    MbtiValidation {
        normalized,
        is_valid,
    }
}

/// One of the four binary preference dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MbtiDimension {
    /// Extraversion / Introversion
    EnergySource,
    /// Sensing / Intuition
    Perception,
    /// Thinking / Feeling
    Judgment,
    /// Judging / Perceiving
    Lifestyle,
}

impl MbtiDimension {
    /// Dimensions in code-letter order.
    pub const ALL: [Self; 4] = [
        Self::EnergySource,
        Self::Perception,
        Self::Judgment,
        Self::Lifestyle,
    ];

    /// Catalog id of the question that resolves this dimension.
    pub fn question_id(&self) -> &'static str {
        match self {
            Self::EnergySource => "mbti_ei",
            Self::Perception => "mbti_sn",
            Self::Judgment => "mbti_tf",
            Self::Lifestyle => "mbti_jp",
        }
    }

    /// The two letters this dimension chooses between.
    pub fn letters(&self) -> [char; 2] {
        match self {
            Self::EnergySource => ['E', 'I'],
            Self::Perception => ['S', 'N'],
            Self::Judgment => ['T', 'F'],
            Self::Lifestyle => ['J', 'P'],
        }
    }

    /// Resolve the letter an answer picks.
    ///
    /// Options are written as "E - ...", so the answer's leading letter is the
    /// pick. A bare letter works too.
    pub fn resolve_letter(&self, answer: &str) -> Option<char> {
        let first = answer.trim().chars().next()?.to_ascii_uppercase();
        self.letters().contains(&first).then_some(first)
    }

    pub fn from_question_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.question_id() == id)
    }
}

/// A type code, possibly with unresolved dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MbtiType {
    letters: [Option<char>; 4],
}

impl MbtiType {
    /// Build from per-dimension letters (in `MbtiDimension::ALL` order).
    pub fn from_letters(letters: [Option<char>; 4]) -> Self {
        Self { letters }
    }

    /// Parse a complete, canonical code.
    pub fn from_code(code: &str) -> Option<Self> {
        let validation = validate(code);
        if !validation.is_valid {
            return None;
        }
        let mut letters = [None; 4];
        for (slot, letter) in letters.iter_mut().zip(validation.normalized.chars()) {
            *slot = Some(letter);
        }
        Some(Self { letters })
    }

    pub fn is_complete(&self) -> bool {
        self.letters.iter().all(Option::is_some)
    }

    /// The four-letter code when complete.
    pub fn code(&self) -> Option<String> {
        self.is_complete().then(|| self.to_string())
    }
}

impl fmt::Display for MbtiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in self.letters {
            write!(f, "{}", letter.unwrap_or(UNRESOLVED_LETTER))?;
        }
        Ok(())
    }
}

impl TryFrom<String> for MbtiType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_uppercase();
        let chars: Vec<char> = normalized.chars().collect();
        if chars.len() != 4 {
            return Err(format!("Invalid type code '{value}': expected 4 letters"));
        }
        let mut letters = [None; 4];
        for ((slot, letter), dimension) in letters.iter_mut().zip(chars).zip(MbtiDimension::ALL) {
            if letter == UNRESOLVED_LETTER {
                continue;
            }
            if !dimension.letters().contains(&letter) {
                return Err(format!(
                    "Invalid type code '{value}': '{letter}' is not a {dimension:?} letter"
                ));
            }
            *slot = Some(letter);
        }
        Ok(Self { letters })
    }
}

impl From<MbtiType> for String {
    fn from(value: MbtiType) -> Self {
        value.to_string()
    }
}
