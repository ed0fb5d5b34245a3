// Shared prompt fragments. Each module that calls the model keeps its own
// prompts.rs alongside it; this file holds the cross-cutting pieces.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Keeps the model inside the supplied talking points.
pub const GROUNDING_INSTRUCTION: &str = "\
    Cover every content bullet you are given and nothing else of substance. \
    Do NOT invent numbers, launches, partnerships or quotes that the bullets do not mention.";
