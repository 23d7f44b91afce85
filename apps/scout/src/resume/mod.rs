pub mod handlers;
pub mod intake;
pub mod parser;
pub mod prompts;
pub mod screening;
