// Prompt constants for the recommendation pipeline.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::PLAIN_TEXT_INSTRUCTION;
use crate::recommendations::models::{RecommendationKind, RecommendationRequest};

/// System prompt for job recommendations. The labels here must stay in sync
/// with `parser::JOB_LABELS`.
pub const JOB_SYSTEM: &str = "\
You are a professional career advisor specializing in the Kenyan job market.
Provide exactly 6 job recommendations in the following structured format, with each field on a new line:
1. Job title: <clear and specific professional title>
   Company: <real Kenyan company>
   Location: <specific Kenyan location>
   Required skills: <relevant skills>
   Estimated salary range: <realistic salary in Kenyan Shillings>
   Brief job description: <2-3 sentences describing the job>
   URL: <plausible job listing URL, e.g., brightermonday.co.ke, fuzu.com, or company career page>
2. Job title: <title>
   ...
Ensure each recommendation has all fields filled with real, Kenya-specific data.
Use the exact labels (e.g., \"Job title:\", \"Company:\") and do not include empty or incomplete entries.";

/// System prompt for course recommendations. Labels mirror `parser::COURSE_LABELS`.
pub const COURSE_SYSTEM: &str = "\
You are a professional education advisor specializing in the Kenyan education and training landscape.
Provide exactly 6 course recommendations in the following structured format, with each field on a new line:
1. Course title: <specific professional course title, unique for each recommendation>
   Provider: <real Kenyan institution or online platform>
   Location: <in-person Kenyan location or \"Online\">
   Skills gained: <specific skills taught>
   Duration: <realistic timeframe, e.g., \"8 weeks\">
   Brief description of benefits: <2-3 sentences describing benefits>
   URL: <plausible course URL, e.g., institution website, coursera.org, edx.org>
2. Course title: <title>
   ...
Ensure each recommendation has all fields filled with realistic, Kenya-specific data.
Use the exact labels (e.g., \"Course title:\", \"Provider:\") and do not include empty or incomplete entries.";

/// User prompt template. Replace `{skills}`, `{location}` and `{noun}` before sending.
pub const USER_PROMPT_TEMPLATE: &str = "Based on these skills: {skills} and location: {location} in Kenya, \
recommend suitable {noun} with the details requested.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

pub fn build_prompt(request: &RecommendationRequest) -> Prompt {
    let (system, noun) = match request.kind {
        RecommendationKind::Job => (JOB_SYSTEM, "jobs"),
        RecommendationKind::Course => (COURSE_SYSTEM, "courses"),
    };

    let user = USER_PROMPT_TEMPLATE
        .replace("{skills}", &request.skills_display())
        .replace("{location}", &request.location)
        .replace("{noun}", noun);

    Prompt {
        system: format!("{system}\n{PLAIN_TEXT_INSTRUCTION}"),
        user,
    }
}
