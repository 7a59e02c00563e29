use crate::discovery::discover_documents;
use crate::failed::{self, FailedFileRecord};
use crate::prelude::{eprintln, println, *};
use crate::providers::{create_provider, GenerateOptions, Provider};
use crate::regen::needs_regeneration;
use colored::Colorize;
use docgen_core::grouping::{base_name, group_for_merge, group_without_merge, FileGroup};
use docgen_core::merge::{merge_content, Companion};
use docgen_core::prompt::{
    build_prompt, DEFAULT_TEMPLATE, GENERATION_MAX_TOKENS, GENERATION_TEMPERATURE,
};
use docgen_core::selection::SelectionMode;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Component, Path, PathBuf};

#[derive(Debug, clap::Args)]
#[group(id = "generate")]
pub struct App {
    /// LLM provider (ollama, gemini, claude, openai)
    #[clap(short, long, env = "DOCGEN_PROVIDER", default_value = "ollama")]
    pub provider: String,

    /// Model name (uses the provider default when omitted)
    #[clap(short, long, env = "DOCGEN_MODEL")]
    pub model: Option<String>,

    /// Generate a specific file only (relative to the source directory)
    #[clap(short, long)]
    pub file: Option<PathBuf>,

    /// Regenerate even if the target exists and is newer
    #[clap(long)]
    pub force: bool,

    /// Merge companion files into their main file (default)
    #[clap(long, overrides_with = "no_merge")]
    pub merge: bool,

    /// Don't merge companion files (foo-impl.md, foo-testing.md)
    #[clap(long, overrides_with = "merge")]
    pub no_merge: bool,

    /// Retry only files that failed in the previous run
    #[clap(long)]
    pub retry_failed: bool,

    /// Clear failed history and restart all files
    #[clap(long)]
    pub clean: bool,

    /// List the provider's models and exit
    #[clap(long)]
    pub list_models: bool,

    /// Directory holding the source documents
    #[clap(long, env = "DOCGEN_SOURCE_DIR", default_value = "docs/llm")]
    pub source_dir: PathBuf,

    /// Directory the generated documentation is written to
    #[clap(long, env = "DOCGEN_TARGET_DIR", default_value = "docs/en")]
    pub target_dir: PathBuf,

    /// Where failed files are recorded for --retry-failed
    #[clap(
        long,
        env = "DOCGEN_FAILED_FILE",
        default_value = ".docs-generate-failed.json"
    )]
    pub failed_file: PathBuf,

    /// Prompt template with a {{CONTENT}} placeholder (built-in template when omitted)
    #[clap(long, env = "DOCGEN_PROMPT_FILE")]
    pub prompt_file: Option<PathBuf>,
}

/// Everything a single run needs besides the provider.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub source_dir: PathBuf,
    pub target_dir: PathBuf,
    pub failed_file: PathBuf,
    pub prompt_file: Option<PathBuf>,
    pub force: bool,
    pub merge: bool,
    pub mode: SelectionMode,
}

impl From<&App> for RunOptions {
    fn from(app: &App) -> Self {
        Self {
            source_dir: app.source_dir.clone(),
            target_dir: app.target_dir.clone(),
            failed_file: app.failed_file.clone(),
            prompt_file: app.prompt_file.clone(),
            force: app.force,
            merge: app.merge || !app.no_merge,
            mode: SelectionMode::from_flags(app.retry_failed, app.file.clone()),
        }
    }
}

/// Outcome of a run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub success: usize,
    pub failed: Vec<FailedFileRecord>,
}

/// Module entry point
pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let provider = create_provider(&app.provider, app.model.clone())?;

    if app.list_models {
        return print_models(provider.as_ref()).await;
    }

    let options = RunOptions::from(&app);
    if options.force && !options.mode.checks_staleness() {
        log::warn!("--force has no effect with --retry-failed or --file");
    }

    if app.clean && failed::clear(&options.failed_file)? {
        println!("🧹 Cleared failed files history\n");
    }

    println!("\n📚 Documentation Generation (SSOT → Human-readable)");
    println!("   Provider: {}", app.provider);
    println!("   Source: {}", options.source_dir.display());
    println!("   Target: {}", options.target_dir.display());
    println!(
        "   Merge: {}",
        if options.merge {
            "Yes (companion files merged)"
        } else {
            "No"
        }
    );
    if options.mode == SelectionMode::RetryFailed {
        println!("   Mode: Retry failed files only");
    } else if app.clean {
        println!("   Mode: Clean restart (all files)");
    }
    println!();

    if global.verbose {
        eprintln!("Failed files record: {}", options.failed_file.display());
        if let Some(prompt_file) = &options.prompt_file {
            eprintln!("Prompt template: {}", prompt_file.display());
        }
    }

    let summary = execute(provider.as_ref(), &options).await?;

    if summary.success > 0 || !summary.failed.is_empty() {
        print_summary(&summary);
    }

    Ok(())
}

async fn print_models(provider: &dyn Provider) -> Result<()> {
    let models = provider.list_models().await;

    if models.is_empty() {
        println!("No models reported by {}.", provider.kind());
        return Ok(());
    }

    println!("Models available from {}:", provider.kind());
    for model in models {
        println!("   - {model}");
    }

    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!("\n✅ Generation complete");
    println!("   Success: {}", summary.success);
    if !summary.failed.is_empty() {
        println!("   Failed: {}", summary.failed.len());
        println!("\n💡 To retry failed files, run:");
        println!("   docgen --retry-failed");
    }
}

/// Run the whole pipeline against an already resolved provider.
///
/// Fatal problems (unhealthy provider, unreadable template, missing source
/// directory, missing single file) return an error before any file is
/// touched. Errors on individual files are recorded and the loop continues.
pub async fn execute(provider: &dyn Provider, options: &RunOptions) -> Result<RunSummary> {
    let kind = provider.kind();

    if !provider.health_check().await {
        return Err(Error::ProviderUnavailable {
            provider: kind.id().to_string(),
            hint: kind.setup_hint().to_string(),
        }
        .into());
    }
    println!("{} Provider \"{}\" is ready\n", "✓".green(), kind);

    let template = load_template(options.prompt_file.as_deref())?;

    if !options.source_dir.exists() {
        return Err(Error::SourceRootNotFound(options.source_dir.clone()).into());
    }

    let groups = select_groups(options)?;
    if groups.is_empty() {
        return Ok(RunSummary::default());
    }

    println!("📄 File groups to generate: {}\n", groups.len());

    let mut summary = RunSummary::default();

    for group in &groups {
        let relative_path = relative_path(&options.source_dir, &group.main_file);

        match generate_group(provider, group, options, &template).await {
            Ok(target) => {
                println!("  {} Saved: {}", "✓".green(), target.display());
                summary.success += 1;
            }
            Err(err) => {
                let message = format!("{err:#}");
                eprintln!("  {} Failed: {}", "✗".red(), relative_path);
                eprintln!("     {message}");
                log::debug!("Generation failed for {relative_path}: {err:?}");

                summary.failed.push(FailedFileRecord {
                    relative_path,
                    error: message,
                    timestamp: chrono::Utc::now()
                        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
                });
            }
        }
    }

    failed::save(&options.failed_file, &summary.failed)?;

    Ok(summary)
}

/// Read the prompt template, or use the built-in one.
pub fn load_template(prompt_file: Option<&Path>) -> Result<String> {
    match prompt_file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read prompt template {}", path.display())),
        None => Ok(DEFAULT_TEMPLATE.to_string()),
    }
}

/// Pick the groups this run works on, according to the selection mode.
fn select_groups(options: &RunOptions) -> Result<Vec<FileGroup>> {
    match &options.mode {
        SelectionMode::RetryFailed => {
            let previous = failed::load(&options.failed_file);
            if previous.is_empty() {
                println!("{} No failed files to retry.\n", "✓".green());
                return Ok(Vec::new());
            }

            println!("📄 Retrying {} failed files:\n", previous.len());
            for record in &previous {
                println!("   - {}", record.relative_path);
            }
            println!();

            Ok(previous
                .iter()
                .map(|record| {
                    FileGroup::singleton(options.source_dir.join(&record.relative_path))
                })
                .collect())
        }
        SelectionMode::SingleFile(file) => {
            if !is_contained(file) {
                return Err(Error::FileNotFound(file.clone()).into());
            }

            let source = options.source_dir.join(file);
            if !source.is_file() {
                return Err(Error::FileNotFound(source).into());
            }

            Ok(vec![FileGroup::singleton(source)])
        }
        SelectionMode::FullScan => {
            let files: Vec<PathBuf> = discover_documents(&options.source_dir)?
                .into_iter()
                .map(|document| {
                    log::trace!(
                        "Found {} at {} (modified {:?})",
                        document.base_name,
                        document.path.display(),
                        document.modified
                    );
                    document.path
                })
                .collect();

            let groups = if options.merge {
                group_for_merge(&files)
            } else {
                group_without_merge(&files)
            };

            let stale: Vec<FileGroup> = groups
                .into_iter()
                .filter(|group| match target_path(options, &group.main_file) {
                    Ok(target) => needs_regeneration(&group.main_file, &target, options.force),
                    Err(_) => true,
                })
                .collect();

            if stale.is_empty() {
                println!(
                    "{} All files are up to date. Use --force to regenerate.\n",
                    "✓".green()
                );
            }

            Ok(stale)
        }
    }
}

/// Path of `file` relative to the source directory, with `/` separators.
fn relative_path(source_dir: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(source_dir).unwrap_or(file);
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Whether a relative path stays below the directory it is joined to.
fn is_contained(relative: &Path) -> bool {
    relative
        .components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
}

/// Output path mirroring `main_file`'s place under the source directory.
/// Files outside the source directory are an error.
fn target_path(options: &RunOptions, main_file: &Path) -> Result<PathBuf> {
    let relative = main_file
        .strip_prefix(&options.source_dir)
        .ok()
        .filter(|relative| is_contained(relative))
        .ok_or_else(|| {
            eyre!(
                "{} is not inside {}",
                main_file.display(),
                options.source_dir.display()
            )
        })?;

    Ok(options.target_dir.join(relative))
}

fn read_group_content(group: &FileGroup, merge: bool) -> Result<String> {
    let main = std::fs::read_to_string(&group.main_file)
        .with_context(|| format!("Failed to read {}", group.main_file.display()))?;

    if !merge || group.companion_files.is_empty() {
        return Ok(main);
    }

    println!(
        "  Merging: {}.md + {} companion(s)...",
        group.base_name,
        group.companion_files.len()
    );

    let companions = group
        .companion_files
        .iter()
        .map(|path| {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Ok(Companion {
                base_name: base_name(path),
                content,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(merge_content(&main, &companions))
}

async fn generate_group(
    provider: &dyn Provider,
    group: &FileGroup,
    options: &RunOptions,
    template: &str,
) -> Result<PathBuf> {
    let target = target_path(options, &group.main_file)?;
    let content = read_group_content(group, options.merge)?;
    let prompt = build_prompt(template, &content);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Generating: {}.md...", group.base_name));
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let generate_options = GenerateOptions {
        temperature: Some(GENERATION_TEMPERATURE),
        max_tokens: Some(GENERATION_MAX_TOKENS),
        model: None,
    };
    let generated = provider.generate(&prompt, &generate_options).await;

    spinner.finish_and_clear();
    let generated = generated?;

    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(&target, generated)
        .with_context(|| format!("Failed to write {}", target.display()))?;

    Ok(target)
}
