// SPDX-FileCopyrightText: 2026 Memlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt text sent to the completion provider.

/// System instruction for answering questions over the memory log.
pub const ASK_SYSTEM_PROMPT: &str = "\
You are a helpful personal memory assistant. The user has logged thoughts, \
notes, and other information over time, and you help them recall and \
synthesize it.

Your role:
1. Answer questions based on the provided memory context
2. Cite specific memory IDs when referencing information, using the format [#ID]
3. Be concise but thorough
4. If the memories don't contain enough information to answer, say so clearly
5. Suggest what additional information might help, if relevant

Response format:
- Start with a direct answer to the question
- Include relevant details from memories with citations
- Use bullet points when listing multiple items
- Keep responses under 1500 characters

Example citation: \"You mentioned working on the API refactor [#42] and completing it on Friday [#47].\"
";

/// User message carrying a rendered memory block and the question.
pub fn memories_message(block: &str, question: &str) -> String {
    format!(
        "Here are relevant memories from my personal log:\n\n---\n{block}\n---\n\n\
         Based on these memories, please answer my question:\n{question}"
    )
}

/// User message for a store with no memories at all.
pub fn empty_store_message(question: &str) -> String {
    format!(
        "I don't have any relevant memories stored yet.\n\nQuestion: {question}\n\n\
         Please let me know that I should log some information first using /log \
         before I can ask questions about it."
    )
}
