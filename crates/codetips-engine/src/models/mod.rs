pub mod code_block;
pub mod doc_page;

pub use code_block::{CodeBlock, Extracted, extract_blocks};
pub use doc_page::DocPage;
