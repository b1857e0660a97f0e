//! Prompt templates for single-document and cross-check questions

use uuid::Uuid;

const CROSS_CHECK_INSTRUCTION: &str = "Compare and contrast the documents above to answer the question. \
Refer to each document by its identifier, point out where they agree, \
and note any discrepancies or contradictions between them.";

/// Prompt builder
pub struct PromptBuilder;

impl PromptBuilder {
    /// Prompt for a question about one piece of text
    pub fn build_text_prompt(text: &str, question: &str) -> String {
        format!("Document:\n{}\n\nQuestion: {}", text, question)
    }

    /// Prompt for a question about an attached image
    pub fn build_image_prompt(question: &str) -> String {
        format!(
            "Answer the question using only what is visible in the attached image.\n\nQuestion: {}",
            question
        )
    }

    /// Composite prompt enumerating every document's id and full text
    pub fn build_cross_check_prompt(documents: &[(Uuid, &str)], question: &str) -> String {
        let mut prompt = String::from("You are given the following documents.\n\n");

        for (i, (id, text)) in documents.iter().enumerate() {
            prompt.push_str(&format!(
                "=== Document {} (id: {}) ===\n{}\n\n",
                i + 1,
                id,
                text
            ));
        }

        prompt.push_str("Question: ");
        prompt.push_str(question);
        prompt.push_str("\n\n");
        prompt.push_str(CROSS_CHECK_INSTRUCTION);

        prompt
    }
}
