//! Analysis prompt construction.

/// Build the per-turn analysis prompt.
///
/// `context` is the draft synopsis from the intent engine (may be empty on
/// the first turn); `utterance` is the raw transcribed command.
pub fn analysis_prompt(utterance: &str, context: &str) -> String {
    format!(
        "You are an intelligent email assistant helping a user compose emails by voice.\n\
         \n\
         {context}The user just said: \"{utterance}\"\n\
         \n\
         Based on this and any previous context:\n\
         1) What is the user trying to do? (INTENT)\n\
         2) If they're composing an email, extract any recipient, subject, or message content\n\
         3) If they're continuing a previous thought, merge it with existing context\n\
         \n\
         Return your analysis as a clean JSON object with this format - don't include anything else in your response:\n\
         {{\n\
           \"intent\": \"COMPOSE_EMAIL or SEND_EMAIL or ADD_CONTACT or CLEAR_FORM or CONTINUE_BODY or HELP or UNKNOWN\",\n\
           \"recipient\": \"name or email or null if not specified\",\n\
           \"subject\": \"subject text or null if not specified\",\n\
           \"body\": \"email body content or null if not specified\",\n\
           \"continue_previous\": true or false,\n\
           \"explanation\": \"brief explanation of what you understood\"\n\
         }}"
    )
}
