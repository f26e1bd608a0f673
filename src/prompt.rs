//! Prompt templates for the two supported tasks.
//!
//! The text is appended unmodified: no truncation or token budgeting happens
//! here, an oversized prompt is left for the completion service to reject.

use std::fmt;

const SUMMARY_INSTRUCTION: &str =
    "Summarize the following content in about 300 words and then list EXACTLY 5 key points:";

const QUIZ_INSTRUCTION: &str = "From the following content, create a set of 10 multiple-choice questions (MCQs) with 4 options each and mark the correct option:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Summarize,
    Quiz,
}

impl TaskKind {
    /// Name of the JSON field the result is returned under
    pub fn response_field(self) -> &'static str {
        match self {
            TaskKind::Summarize => "summary",
            TaskKind::Quiz => "quiz",
        }
    }

    fn instruction(self) -> &'static str {
        match self {
            TaskKind::Summarize => SUMMARY_INSTRUCTION,
            TaskKind::Quiz => QUIZ_INSTRUCTION,
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskKind::Summarize => write!(f, "summarize"),
            TaskKind::Quiz => write!(f, "quiz"),
        }
    }
}

pub fn build_prompt(kind: TaskKind, text: &str) -> String {
    format!("{}\n\n{}", kind.instruction(), text)
}
