mod block_quote;
mod code_fence;
mod directive;

pub use block_quote::BlockQuote;
pub use code_fence::CodeFence;
pub use directive::Directive;
