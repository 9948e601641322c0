//! Core domain types: products, tasks, and answers.

use serde::{Deserialize, Serialize};
use url::Url;

/// Default length of an answer snippet, in characters.
pub const DEFAULT_SNIPPET_CHARS: usize = 300;

// ---------------------------------------------------------------------------
// ProductEntry
// ---------------------------------------------------------------------------

/// One row of the product table: a keyword and the documentation page it selects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductEntry {
    /// Keyword searched for in the question (matched case-insensitively).
    pub keyword: String,
    /// Documentation page fetched when the keyword matches.
    pub url: Url,
}

impl ProductEntry {
    /// Build an entry from a keyword and an already-parsed URL.
    pub fn new(keyword: impl Into<String>, url: Url) -> Self {
        Self {
            keyword: keyword.into(),
            url,
        }
    }
}

// ---------------------------------------------------------------------------
// Task
// ---------------------------------------------------------------------------

/// A task the user can ask about. The same phrase triggers the task in the
/// question and anchors the snippet in the documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Task {
    SetUpSource,
    CreateUserProfile,
    BuildAudienceSegment,
    IntegrateData,
}

impl Task {
    /// All tasks in matching priority order. First match wins.
    pub const ALL: [Task; 4] = [
        Task::SetUpSource,
        Task::CreateUserProfile,
        Task::BuildAudienceSegment,
        Task::IntegrateData,
    ];

    /// The lower-case trigger phrase for this task.
    pub fn phrase(self) -> &'static str {
        match self {
            Task::SetUpSource => "set up a new source",
            Task::CreateUserProfile => "create a user profile",
            Task::BuildAudienceSegment => "build an audience segment",
            Task::IntegrateData => "integrate my data",
        }
    }
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.phrase())
    }
}

// ---------------------------------------------------------------------------
// Answer
// ---------------------------------------------------------------------------

/// Outcome of answering a question. `Display` yields the user-facing text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Answer {
    /// A window of documentation text starting at the task phrase.
    Snippet(String),
    /// No product matched, or its documentation could not be fetched.
    NoInformation,
    /// The documentation was fetched but does not mention the task phrase.
    PhraseNotInDocs,
    /// A product matched and its documentation was fetched, but the question
    /// names none of the known tasks.
    TaskNotRecognized,
}

impl Answer {
    pub const NO_INFORMATION: &'static str =
        "Sorry, I couldn't find the information you are looking for.";
    pub const PHRASE_NOT_IN_DOCS: &'static str =
        "Relevant information not found in the documentation.";
    pub const TASK_NOT_RECOGNIZED: &'static str =
        "I found the documentation, but I couldn't recognize the task in your question.";

    /// The text shown to the user.
    pub fn text(&self) -> &str {
        match self {
            Answer::Snippet(text) => text,
            Answer::NoInformation => Self::NO_INFORMATION,
            Answer::PhraseNotInDocs => Self::PHRASE_NOT_IN_DOCS,
            Answer::TaskNotRecognized => Self::TASK_NOT_RECOGNIZED,
        }
    }

    /// Whether this answer carries documentation text.
    pub fn is_snippet(&self) -> bool {
        matches!(self, Answer::Snippet(_))
    }
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}
