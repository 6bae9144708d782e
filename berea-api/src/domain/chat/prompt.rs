//! Fixed prompt text sent on every completion attempt.

/// Structural format the upstream model is instructed to follow. A content
/// contract with the model, not validated locally.
pub const RESPONSE_INSTRUCTION: &str = "No greetings or preamble. \
Output exactly 6 bullet points. \
Each bullet must be 18 words or fewer. \
Each bullet must be a complete sentence. \
After bullets, output exactly 1 summary sentence.";

/// Text parts of the single user content: the system rule restated, then the
/// assistant persona with the embedded context and question.
pub fn build_parts(full_context: &str, user_message: &str) -> Vec<String> {
    vec![
        format!("System rule: {}", RESPONSE_INSTRUCTION),
        format!(
            "You are a helpful Bible study assistant with access to sermons and community notes.\n\n\
             {}\n\n\
             User question: {}\n\n\
             Provide a thoughtful, biblically-grounded response. When relevant, reference specific \
             sermons by title and speaker, or mention insights from community notes. Follow the \
             output format strictly.",
            full_context, user_message,
        ),
    ]
}
