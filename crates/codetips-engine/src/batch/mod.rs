//! # Batch runner
//!
//! Drives parse → merge → assemble over every block of a docs tree, in
//! arrival order, on the caller's thread. Owns the [`BatchMetrics`] and
//! writes them out once at [`BatchRunner::finalize`].
//!
//! Recoverable failures (parser downgrades, rejected records) are counted
//! in the metrics and never stop the batch. Only [`EngineError`] escapes.

pub mod metrics;
pub mod progress;

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

use serde::Serialize;

use crate::io::write_metrics;
use crate::models::{CodeBlock, DocPage};
use crate::parsing::{ParserDispatch, ParserResult};
use crate::registry::DefinitionRegistry;
use crate::tooltips::{
    AssembledTooltips, EngineError, GlobalTriggerRegistry, PageContext, TooltipAssembler,
    TooltipRecord,
};

pub use metrics::{BatchMetrics, MetricsArtifact, MetricsError, Summary, TermStats, TooltipStat};
pub use progress::{PROGRESS_INTERVAL, ProgressReporter};

/// Set once to ask a running batch to stop taking blocks.
#[derive(Debug, Clone, Default)]
pub struct ShutdownSignal(Arc<AtomicBool>);

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_triggered(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Everything read-only a batch shares across blocks. Built once per batch.
#[derive(Debug)]
pub struct BatchContext {
    registry: DefinitionRegistry,
    globals: GlobalTriggerRegistry,
}

impl Default for BatchContext {
    fn default() -> Self {
        Self::new(DefinitionRegistry::load(), GlobalTriggerRegistry::default())
    }
}

impl BatchContext {
    pub fn new(registry: DefinitionRegistry, globals: GlobalTriggerRegistry) -> Self {
        Self { registry, globals }
    }

    pub fn registry(&self) -> &DefinitionRegistry {
        &self.registry
    }

    pub fn globals(&self) -> &GlobalTriggerRegistry {
        &self.globals
    }
}

/// Parser result and tooltips of one block.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockOutput {
    pub block_id: String,
    pub language: String,
    pub result: ParserResult,
    pub tooltips: Vec<TooltipRecord>,
}

/// Everything produced for one page: global-trigger tooltips and its blocks.
#[derive(Debug, Clone, Serialize)]
pub struct PageOutput {
    pub page: String,
    pub tooltips: Vec<TooltipRecord>,
    pub blocks: Vec<BlockOutput>,
}

pub struct BatchRunner<'c, W: Write> {
    context: &'c BatchContext,
    metrics: BatchMetrics,
    progress: ProgressReporter<W>,
    logs_dir: PathBuf,
    pages: HashMap<String, PageContext>,
    finalized: bool,
}

impl<'c, W: Write> BatchRunner<'c, W> {
    pub fn new(
        context: &'c BatchContext,
        progress: ProgressReporter<W>,
        logs_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            context,
            metrics: BatchMetrics::default(),
            progress,
            logs_dir: logs_dir.into(),
            pages: HashMap::new(),
            finalized: false,
        }
    }

    pub fn metrics(&self) -> &BatchMetrics {
        &self.metrics
    }

    pub fn logs_dir(&self) -> &Path {
        &self.logs_dir
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Parses and assembles one block of `file`. Blocks processed after
    /// [`finalize`](Self::finalize) are not counted.
    pub fn process_block(
        &mut self,
        file: &str,
        block: &CodeBlock,
    ) -> Result<BlockOutput, EngineError> {
        let result =
            ParserDispatch::new(self.context.registry()).parse_code(&block.source, &block.language);
        self.record_block(file, block, result)
    }

    /// Counts and assembles an already parsed block.
    fn record_block(
        &mut self,
        file: &str,
        block: &CodeBlock,
        result: ParserResult,
    ) -> Result<BlockOutput, EngineError> {
        let now = SystemTime::now();
        self.count(|m| {
            m.start(now);
            m.file_seen(file);
        });

        for warning in result.warnings() {
            let (term, detail) = (block.id.clone(), warning.clone());
            self.count(|m| m.record_error(term, detail));
        }

        let page = self
            .pages
            .entry(file.to_string())
            .or_insert_with(|| PageContext::new(file));
        let assembled = TooltipAssembler::new(self.context.globals()).assemble_block(
            page,
            &block.id,
            &block.language,
            &result,
        )?;
        let tooltips = self.tally(assembled);

        Ok(BlockOutput {
            block_id: block.id.clone(),
            language: block.language.clone(),
            result,
            tooltips,
        })
    }

    /// Projects the global triggers onto a page's prose.
    pub fn process_page_text(
        &mut self,
        file: &str,
        text: &str,
    ) -> Result<Vec<TooltipRecord>, EngineError> {
        let now = SystemTime::now();
        self.count(|m| {
            m.start(now);
            m.file_seen(file);
        });

        let page = self
            .pages
            .entry(file.to_string())
            .or_insert_with(|| PageContext::new(file));
        let assembled =
            TooltipAssembler::new(self.context.globals()).assemble_page_text(page, text)?;
        Ok(self.tally(assembled))
    }

    /// Prose first, then blocks in document order. Stops between blocks once
    /// `shutdown` is triggered; the output then holds what was processed.
    pub fn process_page(
        &mut self,
        page: &DocPage,
        shutdown: &ShutdownSignal,
    ) -> Result<PageOutput, EngineError> {
        let file = page.relative_path().as_str();
        let tooltips = self.process_page_text(file, page.prose())?;

        let mut blocks = Vec::with_capacity(page.blocks().len());
        for block in page.blocks() {
            if shutdown.is_triggered() {
                log::info!("{file}: shutdown requested, dropping remaining blocks");
                break;
            }
            blocks.push(self.process_block(file, block)?);
        }

        Ok(PageOutput {
            page: file.to_string(),
            tooltips,
            blocks,
        })
    }

    /// Processes `pages` in order until done or shut down, then finalizes.
    pub fn run<I>(
        &mut self,
        pages: I,
        shutdown: &ShutdownSignal,
    ) -> Result<Vec<PageOutput>, EngineError>
    where
        I: IntoIterator<Item = DocPage>,
    {
        let mut outputs = Vec::new();
        for page in pages {
            if shutdown.is_triggered() {
                log::info!("shutdown requested, skipping remaining pages");
                break;
            }
            outputs.push(self.process_page(&page, shutdown)?);
        }
        self.finalize();
        Ok(outputs)
    }

    /// Freezes the metrics, prints the summary table and writes the metrics
    /// file. Only the first call does anything. Returns the file written.
    pub fn finalize(&mut self) -> Option<PathBuf> {
        if self.finalized {
            log::debug!("finalize: already finalized");
            return None;
        }
        self.finalized = true;

        let now = SystemTime::now();
        self.metrics.freeze(now);
        let artifact = self.metrics.artifact(now);

        if let Err(e) = self.progress.summary(&artifact) {
            log::warn!("finalize: could not print summary: {e}");
        }
        match write_metrics(&self.logs_dir, &artifact) {
            Ok(path) => {
                log::info!("metrics written to {}", path.display());
                Some(path)
            }
            Err(e) => {
                log::error!("failed to write metrics to {}: {e}", self.logs_dir.display());
                None
            }
        }
    }

    /// Applies `f` to the metrics unless the batch is finalized.
    fn count(&mut self, f: impl FnOnce(&mut BatchMetrics)) {
        if !self.finalized {
            f(&mut self.metrics);
        }
    }

    fn tally(&mut self, assembled: AssembledTooltips) -> Vec<TooltipRecord> {
        for rejected in &assembled.rejected {
            let (term, detail) = (rejected.term.clone(), rejected.error.to_string());
            self.count(|m| m.record_error(term, detail));
        }
        for record in &assembled.records {
            self.count(|m| m.record(record));
        }
        if !self.finalized
            && let Err(e) = self.progress.tick(&self.metrics, SystemTime::now())
        {
            log::debug!("progress line failed: {e}");
        }
        assembled.records
    }
}
