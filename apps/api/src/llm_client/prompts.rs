// Cross-cutting prompt fragments shared by every completion prompt.
// Each feature that calls the LLM keeps its own prompts.rs next to it.

/// Keeps labels at the start of each line so the labelled-list parser can anchor on them.
pub const PLAIN_TEXT_INSTRUCTION: &str = "\
    Respond in plain text only. \
    Do NOT use markdown: no bold or italic markers around labels, no tables, no headings. \
    Do NOT add an introduction or closing remarks outside the numbered list.";
