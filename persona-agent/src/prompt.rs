//! Persona prompt assembly.
//!
//! Builds the single user-role prompt sent to the model: the analyst
//! instructions, every fetched item tagged with its permalink, and the
//! fixed persona template the answer must follow.

use reddit_source::ContentItem;

/// System role for persona generation.
pub const SYSTEM_PROMPT: &str = "You are a User Experience (UX) Researcher and Psychologist.";

/// Citation marker the model must attach to every claim.
pub const CITATION_FORMAT: &str = "[Source: URL]";

/// Phrase required when the data does not support an inference.
pub const UNDETERMINED: &str = "Cannot be determined from data";

/// Separator written after every item in the data section.
pub const ITEM_SEPARATOR: &str = "\n\n---\n\n";

/// Section headings of the persona template, in output order.
pub const SECTION_HEADINGS: [&str; 6] = [
    "DEMOGRAPHICS",
    "PERSONALITY & TRAITS",
    "MOTIVATIONS",
    "BEHAVIOUR & HABITS",
    "GOALS & NEEDS",
    "FRUSTRATIONS",
];

const RULE: &str = "===================================================\n";
const BANNER: &str = "***************************************************\n";

/// Build the persona prompt for `username` from fetched items.
///
/// Deterministic for a given input. An empty slice yields a prompt with an
/// empty data section.
pub fn build_persona_prompt(username: &str, items: &[ContentItem]) -> String {
    let mut prompt = String::new();

    prompt.push_str("\nYou are an expert User Experience (UX) Researcher and Psychologist. ");
    prompt.push_str("Your task is to analyze the provided Reddit user data and generate a detailed user persona. ");
    prompt.push_str("The output MUST strictly follow the text-based template provided below.\n\n");

    prompt.push_str(&format!(
        "**CRUCIAL INSTRUCTION:** For every single point, conclusion, or inference you make, you MUST cite the source. \
         Use the format `{}`. If information cannot be determined, you MUST state \"{}\" and cite that as a general conclusion.\n\n",
        CITATION_FORMAT, UNDETERMINED
    ));

    prompt.push_str("**USER DATA TO ANALYZE:**\n---\n");
    prompt.push_str(&format_items(items));
    prompt.push_str("\n---\n\n");

    prompt.push_str("**PERSONA OUTPUT TEMPLATE (Use this exact format):**\n\n");
    push_template(&mut prompt, username);

    prompt
}

/// Render items as `Source [<permalink>]: <text>` blocks.
pub fn format_items(items: &[ContentItem]) -> String {
    let mut out = String::new();
    for item in items {
        out.push_str(&format!("Source [{}]: {}", item.permalink, item.text));
        out.push_str(ITEM_SEPARATOR);
    }
    out
}

fn push_section(prompt: &mut String, heading: &str) {
    prompt.push_str(RULE);
    prompt.push_str(heading);
    prompt.push('\n');
    prompt.push_str(RULE);
}

fn push_template(prompt: &mut String, username: &str) {
    prompt.push_str(BANNER);
    prompt.push_str(&format!("      USER PERSONA: u/{}\n", username));
    prompt.push_str(BANNER);
    prompt.push('\n');
    prompt.push_str("\"[A short, summarizing quote that captures the user's essence in one sentence, written in the first person]\"\n\n");

    push_section(prompt, "DEMOGRAPHICS");
    prompt.push_str("- AGE: [Infer an age range, e.g., 20-25. Justify with citations.]\n");
    prompt.push_str("- OCCUPATION: [Infer their profession. Justify with citations.]\n");
    prompt.push_str("- LOCATION: [Infer their country, state, or city. Justify with citations.]\n");
    prompt.push_str("- STATUS: [Infer relationship status, e.g., Single, In a relationship. Justify.]\n");
    prompt.push_str("- ARCHETYPE: [Assign a Jungian archetype (e.g., The Sage, The Creator, The Jester) that fits their personality. Justify with citations.]\n\n");

    push_section(prompt, "PERSONALITY & TRAITS");
    prompt.push_str("- KEYWORDS: [List 4-5 single-word adjectives that describe the user.]\n\n");
    prompt.push_str("- PERSONALITY SPECTRUM (MBTI-Style Analysis):\n");
    for (left, right) in [
        ("Introvert", "Extrovert"),
        ("Intuition", "Sensing"),
        ("Thinking", "Feeling"),
        ("Judging", "Perceiving"),
    ] {
        prompt.push_str(&format!(
            "  - {} <[Place progress bar on scale of 10 '-']> {}: [Justification and citation]\n",
            left, right
        ));
    }
    prompt.push('\n');

    push_section(prompt, "MOTIVATIONS (Rated 1-5, list the top 3-4)");
    for n in 1..=4 {
        prompt.push_str(&format!(
            "- [MOTIVATION {}]: [Rating]/5 - [Justification and citation]\n",
            n
        ));
    }

    push_section(prompt, "BEHAVIOUR & HABITS");
    prompt.push_str("- [List of observed behaviors as bullet points, each with a citation.]\n");
    prompt.push_str("- [Example: Enjoys discussing specific TV shows like 'The Office'. [Source: URL]]\n\n");

    push_section(prompt, "GOALS & NEEDS");
    prompt.push_str("- GOAL: [Inferred primary goal, with citation]\n");
    prompt.push_str("- GOAL: [Inferred secondary goal, with citation]\n");
    prompt.push_str("- NEED: [Inferred primary need, with citation]\n");
    prompt.push_str("- NEED: [Inferred secondary need, with citation]\n\n");

    push_section(prompt, "FRUSTRATIONS");
    prompt.push_str("- [List of things the user seems to dislike or complain about, as bullet points, each with a citation.]\n");
    prompt.push_str("- [Example: Becomes frustrated with political misinformation. [Source: URL]]\n\n");
}
