pub mod block_quote;
pub mod code_fence;
pub mod list;
pub mod math_block;
pub mod table;

pub use block_quote::BlockQuote;
pub use code_fence::CodeFence;
pub use list::{ListConsumer, ListFamily, ListLine};
pub use math_block::MathBlock;
pub use table::Table;
