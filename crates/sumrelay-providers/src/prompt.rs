//! Fixed prompt and generation parameters shared by both adapters.

/// Role instruction for the summarizer.
pub const SYSTEM_INSTRUCTION: &str = "You are a helpful assistant that creates concise summaries of text. \
Provide a clear, informative summary that captures the main points.";

/// Output token cap.
pub const MAX_OUTPUT_TOKENS: u32 = 150;

/// Sampling temperature.
pub const TEMPERATURE: f64 = 0.7;

/// User-turn text embedding the literal input.
pub fn user_prompt(text: &str) -> String {
    format!("Please summarize the following text: {text}")
}

/// Instruction and user text in one string, for wire formats without a
/// separate system role.
pub fn combined_prompt(text: &str) -> String {
    format!("{SYSTEM_INSTRUCTION} {}", user_prompt(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_prompt_embeds_text_verbatim() {
        let text = "  line one\nline {two}  ";
        assert_eq!(
            user_prompt(text),
            "Please summarize the following text:   line one\nline {two}  "
        );
    }

    #[test]
    fn test_combined_prompt_starts_with_instruction() {
        let prompt = combined_prompt("hello");
        assert!(prompt.starts_with(SYSTEM_INSTRUCTION));
        assert!(prompt.ends_with("Please summarize the following text: hello"));
    }
}
