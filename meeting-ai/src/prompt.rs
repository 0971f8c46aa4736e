//! Instruction template sent to the LLM for transcript analysis.

/// Render the analysis prompt for `transcript`.
///
/// The output is a pure function of the input: identical transcripts always produce
/// identical prompts. The JSON shape described here is what
/// [`crate::analysis::parse_completion`] expects back.
pub fn build_prompt(transcript: &str) -> String {
    format!(
        r#"Analyze this meeting transcript and extract the following information in JSON format:

1. A concise summary (2-3 sentences)
2. Action items with description, assigned person, and priority (High/Medium/Low)
3. Key decisions made
4. Important dates mentioned
5. Suggested tags (3-5 relevant tags)

Meeting Transcript:
{}

Please respond ONLY with valid JSON in this exact format (no markdown, no code blocks):
{{
  "summary": "string",
  "actionItems": [
    {{
      "description": "string",
      "assignedTo": "string",
      "priority": "High|Medium|Low"
    }}
  ],
  "keyDecisions": ["string"],
  "importantDates": ["string"],
  "tags": ["string"]
}}"#,
        transcript
    )
}
