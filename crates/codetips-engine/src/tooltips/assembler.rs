use std::collections::HashSet;

use crate::hash::hex_hash;
use crate::parsing::{ParserResult, TokenLocation, normalize_language};
use crate::registry::Palette;

use super::{
    AdHocTooltip, AssemblyError, EngineError, GlobalTriggerRegistry, Severity, TooltipContent,
    TooltipKind, TooltipRecord, create_ad_hoc_tooltip,
};

/// Tag used for parser-info records of blocks without a fence language.
pub const PLAIN_LANGUAGE: &str = "plain";

/// Page-level state the assembler threads through every block of one page.
#[derive(Debug)]
pub struct PageContext {
    page: String,
    ids: HashSet<String>,
}

impl PageContext {
    pub fn new(page: impl Into<String>) -> Self {
        Self {
            page: page.into(),
            ids: HashSet::new(),
        }
    }

    pub fn page(&self) -> &str {
        &self.page
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn register(&mut self, id: &str) -> Result<(), EngineError> {
        if !self.ids.insert(id.to_string()) {
            return Err(EngineError::DuplicateTooltipId {
                page: self.page.clone(),
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

/// A record [`create_ad_hoc_tooltip`] refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    pub term: String,
    pub error: AssemblyError,
}

#[derive(Debug, Default)]
pub struct AssembledTooltips {
    pub records: Vec<TooltipRecord>,
    pub rejected: Vec<Rejected>,
}

impl AssembledTooltips {
    fn accept(
        &mut self,
        page: &mut PageContext,
        term: &str,
        record: Result<TooltipRecord, AssemblyError>,
    ) -> Result<(), EngineError> {
        match record {
            Ok(record) => {
                page.register(&record.id)?;
                self.records.push(record);
            }
            Err(error) => {
                log::warn!("{}: tooltip for `{term}` rejected: {error}", page.page());
                self.rejected.push(Rejected {
                    term: term.to_string(),
                    error,
                });
            }
        }
        Ok(())
    }
}

/// Turns parser output and page prose into tooltip records.
pub struct TooltipAssembler<'g> {
    globals: &'g GlobalTriggerRegistry,
}

impl<'g> TooltipAssembler<'g> {
    pub fn new(globals: &'g GlobalTriggerRegistry) -> Self {
        Self { globals }
    }

    /// Records for one block: one per token with info, one per error, and
    /// the parser-info record the first time `language` shows up on the page.
    pub fn assemble_block(
        &self,
        page: &mut PageContext,
        block_id: &str,
        language: &str,
        result: &ParserResult,
    ) -> Result<AssembledTooltips, EngineError> {
        let mut out = AssembledTooltips::default();

        for token in result.tokens() {
            if let Some(record) = token_record(block_id, token) {
                out.accept(page, &token.text, record)?;
            }
        }
        for error in result.errors() {
            out.accept(page, &error.text, error_record(block_id, error))?;
        }

        let language = match normalize_language(language) {
            tag if tag.is_empty() => PLAIN_LANGUAGE.to_string(),
            tag => tag,
        };
        let id = format!("parser-{language}");
        if !page.contains(&id) {
            out.accept(page, &id, parser_record(id.clone(), &language, result))?;
        }

        Ok(out)
    }

    /// Ad-hoc records for the global triggers found in a page's prose. Each
    /// trigger yields at most one record per page.
    pub fn assemble_page_text(
        &self,
        page: &mut PageContext,
        text: &str,
    ) -> Result<AssembledTooltips, EngineError> {
        let mut out = AssembledTooltips::default();
        for trigger in self.globals.matches(text) {
            if page.contains(&trigger.id()) {
                continue;
            }
            out.accept(page, &trigger.phrase, create_ad_hoc_tooltip(trigger.to_ad_hoc()))?;
        }
        Ok(out)
    }
}

fn token_record(
    block_id: &str,
    token: &TokenLocation,
) -> Option<Result<TooltipRecord, AssemblyError>> {
    let info = token.info.as_ref()?;
    let id = format!("tok-{}", hex_hash(&(block_id, token.start, token.end)));
    let content =
        TooltipContent::new(info.type_label(), info.documentation().unwrap_or_default())
            .with_color(info.color());
    Some(create_ad_hoc_tooltip(
        AdHocTooltip::new(id, token.text.as_str(), content)
            .kind(TooltipKind::Token(token.token_type)),
    ))
}

fn error_record(block_id: &str, error: &TokenLocation) -> Result<TooltipRecord, AssemblyError> {
    let message = error.error.as_deref().unwrap_or("Syntax error.");
    let id = format!("err-{}", hex_hash(&(block_id, error.start, error.end, message)));
    let mut content = TooltipContent::new("Error", message).with_color(Palette::Error.color());
    content.severity = Some(Severity::Error);
    create_ad_hoc_tooltip(
        AdHocTooltip::new(id, error.text.as_str(), content)
            .kind(TooltipKind::Token(error.token_type)),
    )
}

fn parser_record(
    id: String,
    language: &str,
    result: &ParserResult,
) -> Result<TooltipRecord, AssemblyError> {
    let on_off = |on: bool| if on { "on" } else { "off" };
    let capabilities = result.capabilities();
    let mut description = format!(
        "Parsers: {}. JSX: {}. Type checking: {}.",
        result.parsers().join(", "),
        on_off(capabilities.jsx),
        on_off(capabilities.type_checking),
    );
    if result.uses_fallback() {
        description.push_str(" Definitions only.");
    }
    let content = TooltipContent::new(format!("{language} block"), description);
    create_ad_hoc_tooltip(AdHocTooltip::new(id, "hover", content).kind(TooltipKind::Parser))
}
