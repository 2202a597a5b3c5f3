//! Fixed prompts and user-facing copy.

/// Persona the relay injects when a caller sends no system prompt.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an assistant specialised in singing pedagogy.";

/// Persona the chat UI always sends. Takes precedence over [`DEFAULT_SYSTEM_PROMPT`].
pub const COACH_SYSTEM_PROMPT: &str = "You are a professional vocal coach. You give practical \
    advice, example exercises and progressions for each level. You answer in Spanish.";

/// Seeded assistant turn shown when a conversation opens.
pub const GREETING: &str = "Hi! I'm your singing assistant. Tell me your level and what you \
    want to improve (breathing, resonance, pitch, range, etc.).";

/// Relay reply when the first completion choice carries no text.
pub const NO_RESPONSE_REPLY: &str = "No response received";

/// UI reply when the relay response has no `reply` field.
pub const FALLBACK_REPLY: &str = "Sorry, I couldn't generate a response.";

/// UI reply when the relay could not be reached or answered with garbage.
pub const CONNECTION_ERROR_REPLY: &str =
    "Something went wrong while connecting to the AI. Please try again.";

/// Page and header title.
pub const TITLE: &str = "Singing Lessons Assistant";

/// Input placeholder.
pub const PLACEHOLDER: &str = "Write your goal (e.g. improve breathing) and press Enter…";

/// Hint shown under the input.
pub const INPUT_HINT: &str =
    "Tip: include your level (beginner/intermediate/advanced) and your current range if you know it.";

/// Label of the pending indicator.
pub const PENDING_LABEL: &str = "The assistant is thinking…";
