//! Prompt templates for question generation.
//!
//! The template is an explicit value handed to the orchestrator at
//! construction time, not process-wide state; callers that want a custom
//! house style construct their own.

/// Placeholder replaced with the requested topic.
pub const TOPIC_PLACEHOLDER: &str = "{topic}";

/// Placeholder replaced with the requested difficulty.
pub const DIFFICULTY_PLACEHOLDER: &str = "{difficulty}";

const DEFAULT_TEMPLATE: &str = "\
You are writing one multiple-choice quiz question.

Topic: {topic}
Difficulty: {difficulty}

Respond with a single JSON object and nothing else, using exactly these keys:
{\"question\": string, \"options\": [string, ...], \"correctAnswer\": string, \
\"explanation\": string, \"estimatedTimeSeconds\": number}

Requirements:
- 4 distinct options
- correctAnswer must be copied verbatim from options
- the question must be novel, not a textbook classic
";

/// Template for the generation prompt.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplate {
    /// Create a template from a custom string. `{topic}` and
    /// `{difficulty}` are substituted at render time.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Render the prompt for one generation request.
    pub fn render(&self, topic: &str, difficulty: &str) -> String {
        self.template
            .replace(TOPIC_PLACEHOLDER, topic)
            .replace(DIFFICULTY_PLACEHOLDER, difficulty)
    }
}
