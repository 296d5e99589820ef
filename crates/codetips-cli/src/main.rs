use anyhow::{Context, Result, bail};
use clap::Parser;
use codetips_config::Config;
use codetips_engine::batch::{BatchContext, BatchRunner, ProgressReporter, ShutdownSignal};
use codetips_engine::registry::{DefinitionEntry, Palette, RegistryBuilder};
use codetips_engine::tooltips::{GlobalTrigger, GlobalTriggerRegistry, Theme};
use codetips_engine::{DocPage, io};
use relative_path::RelativePathBuf;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "codetips",
    version,
    about = "Annotate the code blocks of a markdown docs tree with hover tooltips"
)]
struct Cli {
    /// Root of the docs tree. Defaults to `docs_path` from the config file.
    docs_path: Option<PathBuf>,

    /// Config file to use instead of ./codetips.toml or the user config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where the metrics file goes
    #[arg(long)]
    logs_dir: Option<PathBuf>,

    /// Write one `<page>.tooltips.json` side-car per page under this directory
    #[arg(long)]
    out: Option<PathBuf>,

    /// Plain progress output even on a terminal
    #[arg(long)]
    no_color: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = Config::locate(cli.config.as_deref())
        .context("loading config")?
        .unwrap_or_default();

    let Some(docs_path) = cli.docs_path.clone().or_else(|| config.docs_path.clone()) else {
        bail!(
            "no docs path: pass DOCS_PATH or set docs_path in {}",
            Config::config_path().display()
        );
    };
    io::validate_docs_dir(&docs_path)
        .with_context(|| format!("docs path {}", docs_path.display()))?;
    log::info!("annotating {}", docs_path.display());

    let exclude = config.exclude_patterns()?;
    let files = io::scan_markdown_files(&docs_path, &exclude)?;
    log::info!("found {} markdown files", files.len());

    let context = build_context(&config);
    let logs_dir = cli.logs_dir.clone().unwrap_or_else(|| config.logs_dir.clone());
    let color = !cli.no_color && std::io::stderr().is_terminal();
    let progress = ProgressReporter::new(
        std::io::stderr(),
        Duration::from_millis(config.progress_interval_ms),
        color,
    );
    let mut runner = BatchRunner::new(&context, progress, logs_dir);

    let shutdown = ShutdownSignal::new();
    let signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("interrupted: finishing the current block, then writing metrics");
            signal.trigger();
        }
    });

    let outcome = annotate(&mut runner, &docs_path, &files, cli.out.as_deref(), &shutdown).await;
    runner.finalize();
    outcome
}

async fn annotate(
    runner: &mut BatchRunner<'_, std::io::Stderr>,
    docs_path: &Path,
    files: &[RelativePathBuf],
    out: Option<&Path>,
    shutdown: &ShutdownSignal,
) -> Result<()> {
    for relative in files {
        if shutdown.is_triggered() {
            break;
        }
        let markdown = match tokio::fs::read_to_string(relative.to_path(docs_path)).await {
            Ok(markdown) => markdown,
            Err(e) => {
                log::error!("skipping {relative}: {e}");
                continue;
            }
        };

        let page = DocPage::parse(relative.clone(), &markdown);
        let output = runner
            .process_page(&page, shutdown)
            .with_context(|| format!("annotating {relative}"))?;

        if let Some(out) = out {
            let path = io::sidecar_path(relative).to_path(out);
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(&path, io::to_json(&output)?)
                .await
                .with_context(|| format!("writing {}", path.display()))?;
        }
    }
    Ok(())
}

/// Registry and global triggers, with the config's additions.
fn build_context(config: &Config) -> BatchContext {
    let registry = RegistryBuilder::with_default_tables()
        .extra(config.terms.iter().map(|term| {
            (
                term.name.clone(),
                DefinitionEntry::new(&term.type_name, &term.documentation, Palette::Project),
            )
        }))
        .build();

    let mut globals = GlobalTriggerRegistry::default();
    for trigger in &config.global_triggers {
        let theme = match trigger.theme.as_deref() {
            None => Theme::Light,
            Some(name) => Theme::from_name(name).unwrap_or_else(|| {
                log::warn!(
                    "global trigger `{}`: unknown theme `{name}`, using light",
                    trigger.phrase
                );
                Theme::Light
            }),
        };
        let added = globals.add(GlobalTrigger {
            phrase: trigger.phrase.clone(),
            aliases: trigger.aliases.clone(),
            title: trigger.title.clone(),
            description: trigger.description.clone(),
            theme,
        });
        if let Err(e) = added {
            log::warn!("skipping global trigger: {e}");
        }
    }

    log::debug!(
        "{} definitions, {} global triggers",
        registry.len(),
        globals.len()
    );
    BatchContext::new(registry, globals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use codetips_config::{GlobalTriggerConfig, TermConfig};
    use codetips_engine::DefinitionRegistry;

    #[test]
    fn cli_arguments() {
        let cli = Cli::parse_from(["codetips", "docs", "--out", "site/tips", "--no-color"]);

        assert_eq!(cli.docs_path, Some(PathBuf::from("docs")));
        assert_eq!(cli.out, Some(PathBuf::from("site/tips")));
        assert!(cli.no_color);
        assert!(cli.config.is_none());
    }

    #[test]
    fn config_terms_and_triggers_reach_the_context() {
        let config = Config {
            terms: vec![TermConfig {
                name: "useTooltip".into(),
                type_name: "hook".into(),
                documentation: "Attaches a tooltip to a ref.".into(),
            }],
            global_triggers: vec![GlobalTriggerConfig {
                phrase: "HP".into(),
                aliases: vec!["Happy Path".into()],
                title: "Happy Path".into(),
                description: String::new(),
                theme: Some("dark".into()),
            }],
            ..Config::default()
        };

        let context = build_context(&config);

        let term = context.registry().lookup("useTooltip").unwrap();
        assert_eq!(term.color, Palette::Project.color());
        assert_eq!(context.globals().get("HP").unwrap().theme, Theme::Dark);
        assert!(context.globals().get("DD").is_some());
        assert!(context.registry().len() > DefinitionRegistry::load().len());
    }
}
