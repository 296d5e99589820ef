pub mod batch;
mod hash;
pub mod io;
pub mod models;
pub mod parsing;
pub mod registry;
pub mod tooltips;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use batch::{BatchContext, BatchRunner, BlockOutput, PageOutput, ShutdownSignal};
pub use io::*;
pub use models::{CodeBlock, DocPage};
pub use parsing::{ParserDispatch, ParserResult, TokenLocation};
pub use registry::{DefinitionEntry, DefinitionRegistry};
pub use tooltips::{
    AdHocTooltip, AssemblyError, EngineError, TooltipRecord, create_ad_hoc_tooltip,
};
