//! In-progress feedback record

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Extras key carrying the category wire string
pub const FEEDBACK_TYPE_KEY: &str = "feedback_type";
/// Extras key carrying the free-form text
pub const FEEDBACK_TEXT_KEY: &str = "feedback_text";
/// Extras key carrying the rating wire string
pub const RATING_KEY: &str = "rating";
/// Extras key carrying the raw screenshot bytes
pub const SCREENSHOT_KEY: &str = "screenshot";
/// Value written under `feedback_type` when no category was chosen
pub const UNSET_CATEGORY: &str = "null";

/// Kind of feedback being reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    BugReport,
    FeatureRequest,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::BugReport, Category::FeatureRequest];

    /// Stable string used in the submission extras
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BugReport => "bugReport",
            Self::FeatureRequest => "featureRequest",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::BugReport => "Bug report",
            Self::FeatureRequest => "Feature request",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::BugReport => Self::FeatureRequest,
            Self::FeatureRequest => Self::BugReport,
        }
    }
}

/// Sentiment attached to the feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Rating {
    Bad,
    Neutral,
    Good,
}

impl Rating {
    pub const ALL: [Rating; 3] = [Rating::Bad, Rating::Neutral, Rating::Good];

    /// Stable string used in the submission extras
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bad => "bad",
            Self::Neutral => "neutral",
            Self::Good => "good",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Bad => ":(",
            Self::Neutral => ":|",
            Self::Good => ":)",
        }
    }
}

/// Value stored under an extras key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtraValue {
    Text(String),
    Bytes(Vec<u8>),
}

impl ExtraValue {
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            ExtraValue::Bytes(b) => Some(b),
            ExtraValue::Text(_) => None,
        }
    }
}

impl From<&str> for ExtraValue {
    fn from(value: &str) -> Self {
        ExtraValue::Text(value.to_string())
    }
}

impl From<String> for ExtraValue {
    fn from(value: String) -> Self {
        ExtraValue::Text(value)
    }
}

impl From<Vec<u8>> for ExtraValue {
    fn from(value: Vec<u8>) -> Self {
        ExtraValue::Bytes(value)
    }
}

/// String-keyed extras handed to the submission sink
pub type Extras = BTreeMap<String, ExtraValue>;

/// The feedback record while the user is still editing it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackDraft {
    category: Option<Category>,
    text: String,
    rating: Option<Rating>,
}

impl FeedbackDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn rating(&self) -> Option<Rating> {
        self.rating
    }

    pub fn set_category(&mut self, category: Option<Category>) {
        self.category = category;
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_rating(&mut self, rating: Option<Rating>) {
        self.rating = rating;
    }

    /// Step to the next category; an unset category starts at the first one
    pub fn cycle_category(&mut self) {
        self.category = Some(match self.category {
            Some(category) => category.next(),
            None => Category::BugReport,
        });
    }

    /// Step through the ratings, wrapping back to unset after the last
    pub fn cycle_rating(&mut self) {
        self.rating = match self.rating {
            None => Some(Rating::Bad),
            Some(Rating::Bad) => Some(Rating::Neutral),
            Some(Rating::Neutral) => Some(Rating::Good),
            Some(Rating::Good) => None,
        };
    }

    /// Push a character to the text
    pub fn push_char(&mut self, c: char) {
        self.text.push(c);
    }

    /// Remove the last character from the text
    pub fn pop_char(&mut self) {
        self.text.pop();
    }

    /// Draft fields as submission extras.
    ///
    /// `feedback_type` and `feedback_text` are always present; `rating` only
    /// when one was chosen.
    pub fn to_extras(&self) -> Extras {
        let mut extras = Extras::new();
        let feedback_type = self
            .category
            .map(|c| c.as_str())
            .unwrap_or(UNSET_CATEGORY);
        extras.insert(FEEDBACK_TYPE_KEY.to_string(), feedback_type.into());
        extras.insert(FEEDBACK_TEXT_KEY.to_string(), self.text.clone().into());
        if let Some(rating) = self.rating {
            extras.insert(RATING_KEY.to_string(), rating.as_str().into());
        }
        extras
    }
}
