//! Global triggers: fixed phrases in page prose that always produce the same
//! ad-hoc tooltip, wherever they appear on the site.

use regex::Regex;

use super::{AdHocTooltip, AssemblyError, Theme, TooltipContent, TooltipKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalTrigger {
    pub phrase: String,
    /// Extra trigger strings, after the phrase itself.
    pub aliases: Vec<String>,
    pub title: String,
    pub description: String,
    pub theme: Theme,
}

impl GlobalTrigger {
    /// `"DD"` → `global-dd`, `"Happy path"` → `global-happy-path`.
    pub fn id(&self) -> String {
        let mut slug = String::new();
        for c in self.phrase.chars() {
            if c.is_alphanumeric() {
                slug.extend(c.to_lowercase());
            } else if !slug.ends_with('-') {
                slug.push('-');
            }
        }
        format!("global-{}", slug.trim_matches('-'))
    }

    pub fn to_ad_hoc(&self) -> AdHocTooltip {
        let mut trigger = vec![self.phrase.clone()];
        trigger.extend(self.aliases.iter().cloned());
        AdHocTooltip::new(
            self.id(),
            trigger,
            TooltipContent::new(&self.title, &self.description),
        )
        .kind(TooltipKind::Global)
        .theme(self.theme)
    }

    fn deep_dive() -> Self {
        Self {
            phrase: "DD".into(),
            aliases: vec!["Deep Dive".into()],
            title: "Deep Dive".into(),
            description: "An in-depth section: internals, trade-offs and edge cases beyond \
                          the basic pattern."
                .into(),
            theme: Theme::Dark,
        }
    }
}

#[derive(Debug)]
struct Entry {
    trigger: GlobalTrigger,
    matcher: Regex,
}

/// Phrase → preset tooltip. Read-only once the batch starts.
#[derive(Debug)]
pub struct GlobalTriggerRegistry {
    entries: Vec<Entry>,
}

impl Default for GlobalTriggerRegistry {
    /// The site-wide defaults: `DD`.
    fn default() -> Self {
        let mut registry = Self::empty();
        if let Err(e) = registry.add(GlobalTrigger::deep_dive()) {
            log::error!("default global trigger rejected: {e}");
        }
        registry
    }
}

impl GlobalTriggerRegistry {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds a trigger. A phrase already present is replaced.
    pub fn add(&mut self, trigger: GlobalTrigger) -> Result<(), AssemblyError> {
        let phrase = trigger.phrase.trim();
        if phrase.is_empty() {
            return Err(AssemblyError::InvalidPhrase(trigger.phrase));
        }
        let boundary = |c: Option<char>| match c {
            Some(c) if c.is_alphanumeric() || c == '_' => r"\b",
            _ => "",
        };
        let pattern = format!(
            "{}{}{}",
            boundary(phrase.chars().next()),
            regex::escape(phrase),
            boundary(phrase.chars().next_back())
        );
        let matcher = Regex::new(&pattern)
            .map_err(|_| AssemblyError::InvalidPhrase(trigger.phrase.clone()))?;

        self.entries.retain(|e| e.trigger.phrase != trigger.phrase);
        self.entries.push(Entry { trigger, matcher });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, phrase: &str) -> Option<&GlobalTrigger> {
        self.entries
            .iter()
            .map(|e| &e.trigger)
            .find(|t| t.phrase == phrase)
    }

    /// Triggers whose phrase occurs in `text` as a whole word, in
    /// registration order.
    pub fn matches<'s>(&'s self, text: &'s str) -> impl Iterator<Item = &'s GlobalTrigger> + 's {
        self.entries
            .iter()
            .filter(move |e| e.matcher.is_match(text))
            .map(|e| &e.trigger)
    }
}
