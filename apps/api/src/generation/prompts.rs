// Prompt text for learning-path generation. The wording is a contract with the model only;
// what must not change is the three input sections, the output skeleton and the strict-JSON rules.

/// Builds the generation prompt. Inputs are embedded verbatim; `profile_json` and
/// `resources_json` are expected to be pretty-printed JSON.
pub fn learning_path_prompt(query: &str, profile_json: &str, resources_json: &str) -> String {
    format!(
        r#"Given the user's query: "{query}"
And their profile:
{profile_json}

Using these relevant resources:
{resources_json}

Generate a structured learning path that includes:
1. Prerequisites
2. Learning steps in sequence
3. Estimated time for each step
4. Specific resources to use for each step

Format the response as JSON with the following structure:
{{
    "prerequisites": [list of prerequisites],
    "steps": [
        {{
            "title": "step title",
            "description": "step description",
            "estimated_time": "time in hours",
            "resources": [
                {{"title": "resource title", "url": "resource url", "description": "why this resource helps"}}
            ]
        }}
    ]
}}

HARD RULES:
1. Respond with ONLY the JSON object above. No prose before or after it, no markdown code fences.
2. Every step MUST have a non-empty "title" and "description".
3. List steps in the order they should be learned.
4. Prefer the resources listed above when they fit; cite their exact titles and URLs."#
    )
}
