// Instruction prompts for the two model round trips.

pub const EXTRACTION_PROMPT: &str = r#"You convert a person's description of the cat they want into structured search preferences.

USER REQUEST:
{user_text}

OUTPUT SCHEMA (every field is optional):
{
  "budget": positive integer, the most the person will pay, in the same currency units as stated,
  "size": "small" | "medium" | "large",
  "furLength": "short" | "long",
  "activityLevel": "low" | "normal" | "high",
  "goodWithChildren": true | false,
  "goodWithPets": true | false,
  "prioritizeHealth": true | false
}

RULES:
1. Include a field only when the request clearly states or implies it. Omit everything else.
2. Use exactly the allowed values shown above for the enumerated fields.
3. Set "prioritizeHealth" to true only when the person stresses health, longevity or low vet costs.
4. Return ONLY a single JSON object, with no explanation and no code fences."#;

pub const RECOMMENDATION_PROMPT: &str = r#"You are a knowledgeable cat breed adviser. A person is choosing a cat.

THEIR PREFERENCES:
{preferences}

CANDIDATE BREEDS (already filtered to match the preferences, best ranked first):
{candidates}

Write a friendly answer that:
1. Names the single best recommendation from the candidates and explains why it fits their preferences.
2. Briefly describes each remaining candidate and who it would suit.
3. Ends with practical care and ownership caveats (grooming, health, cost, space, time).

Only recommend breeds from the candidate list."#;

pub fn extraction_prompt(user_text: &str) -> String {
    EXTRACTION_PROMPT.replace("{user_text}", user_text.trim())
}

pub fn recommendation_prompt(preferences: &str, candidates: &str) -> String {
    RECOMMENDATION_PROMPT
        .replace("{preferences}", preferences)
        .replace("{candidates}", candidates)
}
