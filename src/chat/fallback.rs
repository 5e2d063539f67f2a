//! Canned assistant replies
//!
//! Shown when the completion service is unconfigured or both model attempts
//! fail. One fixed string per site language.

use crate::language::Language;

/// The canned reply for a language
pub fn fallback_reply(language: Language) -> &'static str {
    match language {
        Language::English => {
            "I'm sorry, but I'm having trouble connecting to my knowledge database right now. \
             Please try again in a moment."
        }
        Language::Russian => {
            "Извините, у меня возникли проблемы с подключением к моей базе знаний. \
             Пожалуйста, попробуйте снова через минуту."
        }
        Language::German => {
            "Es tut mir leid, aber ich habe derzeit Schwierigkeiten, eine Verbindung zu meiner \
             Wissensdatenbank herzustellen. Bitte versuchen Sie es gleich noch einmal."
        }
        Language::Ukrainian => {
            "Вибачте, у мене виникли проблеми з підключенням до моєї бази знань. \
             Будь ласка, спробуйте знову через хвилину."
        }
    }
}
