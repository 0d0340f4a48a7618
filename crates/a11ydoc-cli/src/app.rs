//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};

use a11ydoc_core::{
    annotate, check_sections, Category, Issue, Report, SectionCheck, SectionTemplate, Settings,
};
use a11ydoc_ooxml::DocxFile;
use a11ydoc_validate::{Analysis, AnalysisEngine};

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for downstream renderers
    Json,
}

#[derive(Parser)]
#[command(name = "a11ydoc")]
#[command(author, version, about = "Accessibility checks for Word documents", long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a DOCX file for accessibility issues
    Check {
        /// Input DOCX file
        input: PathBuf,

        /// Required-sections template (overrides the config file)
        #[arg(short, long)]
        sections: Option<PathBuf>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Write a copy of the document with issue markers to this path
        #[arg(short, long)]
        marked: Option<PathBuf>,

        /// Run analyzers on worker threads
        #[arg(long)]
        parallel: bool,
    },

    /// Report which required sections a DOCX file covers
    Sections {
        /// Input DOCX file
        input: PathBuf,

        /// Required-sections template
        #[arg(short, long)]
        sections: PathBuf,
    },
}

/// Options for [`check_command`]
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    pub sections: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub format: OutputFormat,
    pub marked: Option<PathBuf>,
    pub parallel: bool,
}

/// A checked document: the parsed file, the raw analysis and its report
#[derive(Debug)]
pub struct Checked {
    pub file: DocxFile,
    pub analysis: Analysis,
    pub report: Report,
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Check {
            input,
            sections,
            config,
            format,
            marked,
            parallel,
        } => {
            let options = CheckOptions {
                sections,
                config,
                format,
                marked,
                parallel,
            };
            check_command(&input, &options)?;
        }
        Commands::Sections { input, sections } => {
            sections_command(&input, &sections)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Load and analyze a DOCX file
///
/// An unreadable document is the only hard failure. Analyzer panics end up
/// in `report.skipped`. When `template` is given the section check is folded
/// into the report.
pub fn analyze_path(
    input: &Path,
    settings: &Settings,
    template: Option<&SectionTemplate>,
    parallel: bool,
) -> Result<Checked> {
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let file = DocxFile::open(input)
        .with_context(|| format!("Failed to read document: {}", input.display()))?;

    let engine = AnalysisEngine::from_settings(&settings.analysis);
    let analysis = engine.analyze(file.document(), parallel || settings.analysis.parallel);
    let mut report = analysis.report();

    if let Some(template) = template {
        report.set_sections(&check_sections(file.document(), template));
    }

    info!(
        issues = report.issue_count(),
        skipped = report.skipped.len(),
        missing_sections = report.missing_sections.len(),
        "Analysis complete"
    );

    Ok(Checked {
        file,
        analysis,
        report,
    })
}

/// Execute the check command
pub fn check_command(input: &Path, options: &CheckOptions) -> Result<Report> {
    // Step 1: Settings, defaults when no config file is given
    let settings = match &options.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => Settings::default(),
    };

    // Step 2: Section template, the command line wins over the config file
    let template_path = options
        .sections
        .as_ref()
        .or(settings.sections.template.as_ref());
    let template = template_path.map(|path| load_template(path)).transpose()?;

    // Step 3: Analyze
    let checked = analyze_path(input, &settings, template.as_ref(), options.parallel)?;

    // Step 4: Output based on format
    match options.format {
        OutputFormat::Json => {
            let json = checked
                .report
                .to_json()
                .context("Failed to serialize report to JSON")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            print!("{}", render_text(input, &checked.report));
        }
    }

    // Step 5: Marked copy
    if let Some(out) = &options.marked {
        if settings.annotation.enabled {
            write_marked_copy(&checked, out)?;
        } else {
            warn!("Annotation is disabled in the config, not writing {}", out.display());
        }
    }

    Ok(checked.report)
}

fn write_marked_copy(checked: &Checked, out: &Path) -> Result<()> {
    let issues: Vec<_> = checked.report.issues().cloned().collect();
    let marked = annotate(checked.file.document(), &issues);
    for err in &marked.skipped {
        warn!("Marker skipped: {}", err);
    }

    checked
        .file
        .write_marked(&marked.document, out)
        .with_context(|| format!("Failed to write marked copy: {}", out.display()))?;
    info!(
        markers = marked.markers_inserted,
        path = %out.display(),
        "Marked copy written"
    );
    Ok(())
}

/// Execute the sections command
pub fn sections_command(input: &Path, template_path: &Path) -> Result<SectionCheck> {
    let template = load_template(template_path)?;

    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }
    let file = DocxFile::open(input)
        .with_context(|| format!("Failed to read document: {}", input.display()))?;

    let check = check_sections(file.document(), &template);

    println!("Required sections for {}", input.display());
    for name in &check.present {
        println!("  ✓ {}", name);
    }
    for name in &check.missing {
        println!("  ✗ {}", name);
    }
    println!(
        "{} of {} section(s) present",
        check.present.len(),
        template.len()
    );

    Ok(check)
}

fn load_template(path: &Path) -> Result<SectionTemplate> {
    if !path.exists() {
        anyhow::bail!("Section template not found: {}", path.display());
    }
    SectionTemplate::load(path)
        .with_context(|| format!("Failed to load section template: {}", path.display()))
}

/// Render a report as human-readable text
pub fn render_text(input: &Path, report: &Report) -> String {
    let mut out = String::new();

    if report.is_clean() {
        let _ = writeln!(out, "✓ No issues found in {}", input.display());
    } else {
        let _ = writeln!(out, "Accessibility report for {}", input.display());
        let (semantic, algorithmic): (Vec<_>, Vec<_>) = report
            .categories
            .iter()
            .map(|(name, issues)| (Category::from_name(name), name, issues))
            .partition(|(category, _, _)| category.as_ref().is_some_and(Category::is_semantic));

        for (_, name, issues) in algorithmic {
            let _ = writeln!(out);
            let _ = writeln!(out, "{} ({})", name, issues.len());
            write_issues(&mut out, issues, "  ");
        }

        // Collaborator categories print last, under their own heading
        if !semantic.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Semantic suggestions");
            for (category, name, issues) in semantic {
                let check = match &category {
                    Some(Category::Semantic(check)) => check.as_str(),
                    _ => name.as_str(),
                };
                let _ = writeln!(out, "  {} ({})", check, issues.len());
                write_issues(&mut out, issues, "    ");
            }
        }

        if !report.missing_sections.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Missing sections ({})", report.missing_sections.len());
            for name in &report.missing_sections {
                let _ = writeln!(out, "  - {}", name);
            }
        }

        let summary = report.summary();
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Found {} error(s), {} warning(s) and {} info",
            summary.errors, summary.warnings, summary.info
        );
    }

    if !report.skipped.is_empty() {
        let _ = writeln!(out, "{} checks skipped", report.skipped.len());
        for skipped in &report.skipped {
            let _ = writeln!(out, "  - {}: {}", skipped.name, skipped.reason);
        }
    }

    out
}

fn write_issues(out: &mut String, issues: &[Issue], indent: &str) {
    for issue in issues {
        let _ = writeln!(
            out,
            "{}{} [{}] {}: {}",
            indent, issue.severity, issue.kind, issue.location, issue.message
        );
    }
}
