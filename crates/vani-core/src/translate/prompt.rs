use vani_llm::provider::Message;

use crate::language::display_name;

/// Instructions shared by every LLM backend.
#[must_use]
pub fn system_prompt(source_lang: &str, target_lang: &str) -> String {
    let src = display_name(source_lang);
    let tgt = display_name(target_lang);
    format!(
        "You are a strict technical translator specialized in Agriculture.\n\
         Your task is to translate from {src} to {tgt}.\n\
         \n\
         RULES:\n\
         1. Output ONLY the translated text.\n\
         2. Do not include phrases like \"Here is the translation\" or \"I can't translate\".\n\
         3. Maintain technical accuracy for crops, pests, and schemes.\n\
         4. If the input is not {src}, just translate it to the best of your ability into {tgt}."
    )
}

#[must_use]
pub fn build_messages(text: &str, source_lang: &str, target_lang: &str) -> Vec<Message> {
    vec![
        Message::system(system_prompt(source_lang, target_lang)),
        Message::user(format!("TEXT TO TRANSLATE:\n{text}")),
    ]
}
