// All LLM prompt constants for the Generation module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for post writing.
/// Replace `{json_only}` before sending.
pub const WRITER_SYSTEM_TEMPLATE: &str = "You are a ghostwriter who writes LinkedIn posts \
    in one specific person's authentic style, tone, and voice. \
    Think about which of their registers fits the content (reflective, celebratory, factual, \
    practical, vulnerable or strategic) before writing. \
    Return a JSON object with exactly two string fields: \"reasoning\" (a few sentences of \
    planning) and \"post\" (the finished LinkedIn post). {json_only}";

/// Header placed above the demo block. Omitted entirely for zero-shot prompts.
pub const DEMOS_HEADER: &str =
    "Here are posts this person has written, showing their voice. Match it closely.";

/// One demo. Replace: {n}, {person_name}, {person_title}, {company},
///                    {content_bullets}, {post}
pub const DEMO_TEMPLATE: &str = r#"--- Example {n} ---
Person: {person_name}, {person_title} at {company}
Content bullets: {content_bullets}
Post:
{post}"#;

/// Post-writing prompt.
/// Replace: {demos}, {grounding_instruction}, {person_name}, {person_title},
///          {company}, {content_bullets}
pub const WRITER_PROMPT_TEMPLATE: &str = r#"{demos}Write a LinkedIn post as {person_name}, {person_title} at {company}.

{grounding_instruction}

Content bullets (key points to cover):
{content_bullets}

Return a JSON object:
{
  "reasoning": "which register fits these bullets and how the post will open and close",
  "post": "the full LinkedIn post text"
}"#;
