mod chat;
mod core;

pub use chat::{ChatModel, OpenAiChat};
pub use self::core::{CompletionParams, Message, Role, completion, completion_content};
