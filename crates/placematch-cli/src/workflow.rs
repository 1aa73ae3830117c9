//! File-level workflows behind the subcommands.
//!
//! Each workflow takes plain paths and options, so the integration tests
//! drive them without going through argument parsing.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use placematch_engine::{
    ApplyStats, MatchOutput, MatchReport, OverrideTable, PlaceMatcher, ReconciliationRegistry,
    apply_with_stats, read_mapping_file, write_mapping_file, write_match_table,
};
use placematch_ingest::{read_dataset, read_name_set, write_dataset};
use placematch_model::{MatchOptions, NameMapping, NameSet, RankedCandidate};
use tracing::{info, info_span};

/// A name column of a CSV file, with an optional parent-region column.
#[derive(Debug, Clone)]
pub struct NameColumn {
    pub path: PathBuf,
    pub column: String,
    pub parent: Option<String>,
}

impl NameColumn {
    pub fn new(path: impl Into<PathBuf>, column: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            column: column.into(),
            parent: None,
        }
    }

    #[must_use]
    pub fn with_parent(mut self, parent: Option<String>) -> Self {
        self.parent = parent;
        self
    }

    fn load(&self) -> Result<NameSet> {
        read_name_set(&self.path, &self.column, self.parent.as_deref())
            .with_context(|| format!("load names from {}", self.path.display()))
    }
}

/// Inputs of the `match` workflow.
#[derive(Debug, Clone)]
pub struct MatchRequest {
    pub source: NameColumn,
    pub target: NameColumn,
    pub options: MatchOptions,
    pub overrides: Option<PathBuf>,
    pub invert_overrides: bool,
    pub rejected: Vec<String>,
    pub mapping_out: Option<PathBuf>,
    pub report_out: Option<PathBuf>,
}

impl MatchRequest {
    pub fn new(source: NameColumn, target: NameColumn) -> Self {
        Self {
            source,
            target,
            options: MatchOptions::default(),
            overrides: None,
            invert_overrides: false,
            rejected: Vec::new(),
            mapping_out: None,
            report_out: None,
        }
    }
}

/// Everything the `match` workflow produced.
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub report: MatchReport,
    pub mapping: NameMapping,
    pub source_names: usize,
    pub target_names: usize,
    pub mapping_path: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
}

impl MatchOutcome {
    /// Source names still without a canonical name after every layer.
    pub fn unresolved(&self) -> Vec<&str> {
        self.mapping.unresolved()
    }
}

pub fn run_match(request: &MatchRequest) -> Result<MatchOutcome> {
    let span = info_span!("match", source = %request.source.path.display());
    let _guard = span.enter();

    if request.options.scope_by_parent
        && (request.source.parent.is_none() || request.target.parent.is_none())
    {
        bail!("--scope-by-parent needs both --source-parent and --target-parent");
    }

    let source = request.source.load()?;
    let target = request.target.load()?;
    info!(
        source_names = source.len(),
        target_names = target.len(),
        "loaded name sets"
    );

    let report = PlaceMatcher::new(request.options)
        .run(&source, &target)
        .context("match names")?;

    let registry = load_registry(request)?;
    let mapping = report.build_mapping(&registry, &source);

    if let Some(path) = &request.mapping_out {
        write_mapping_file(&mapping, path)
            .with_context(|| format!("write mapping table {}", path.display()))?;
        info!(path = %path.display(), entries = mapping.len(), "wrote mapping table");
    }
    if let Some(path) = &request.report_out {
        write_report(&report.output, path)?;
        info!(path = %path.display(), "wrote match report");
    }

    Ok(MatchOutcome {
        report,
        mapping,
        source_names: source.len(),
        target_names: target.len(),
        mapping_path: request.mapping_out.clone(),
        report_path: request.report_out.clone(),
    })
}

fn load_registry(request: &MatchRequest) -> Result<ReconciliationRegistry> {
    let mut registry = ReconciliationRegistry::new().with_rejected(request.rejected.iter().cloned());
    if let Some(path) = &request.overrides {
        let table = OverrideTable::from_path(path)
            .with_context(|| format!("load overrides {}", path.display()))?;
        let table = if request.invert_overrides {
            table.invert()
        } else {
            table
        };
        info!(entries = table.len(), "loaded manual overrides");
        registry = registry.with_overrides(table);
    }
    Ok(registry)
}

fn write_report(output: &MatchOutput, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let writer = BufWriter::new(file);
    match output {
        MatchOutput::Table(rows) => write_match_table(rows, writer)
            .with_context(|| format!("write match table {}", path.display())),
        MatchOutput::Detail(detail) => serde_json::to_writer_pretty(writer, detail)
            .with_context(|| format!("write detail listing {}", path.display())),
    }
}

/// Inputs of the `apply` workflow.
#[derive(Debug, Clone)]
pub struct ApplyRequest {
    pub input: PathBuf,
    pub column: String,
    pub mapping: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ApplyOutcome {
    pub rows: usize,
    pub stats: ApplyStats,
    pub output: PathBuf,
}

pub fn run_apply(request: &ApplyRequest) -> Result<ApplyOutcome> {
    let span = info_span!("apply", input = %request.input.display());
    let _guard = span.enter();

    let mapping = read_mapping_file(&request.mapping)
        .with_context(|| format!("load mapping table {}", request.mapping.display()))?;
    let dataset = read_dataset(&request.input)
        .with_context(|| format!("load dataset {}", request.input.display()))?;
    let (relabeled, stats) = apply_with_stats(&mapping, &dataset, &request.column)
        .with_context(|| format!("relabel column '{}'", request.column))?;
    write_dataset(&relabeled, &request.output)
        .with_context(|| format!("write dataset {}", request.output.display()))?;

    Ok(ApplyOutcome {
        rows: relabeled.row_count(),
        stats,
        output: request.output.clone(),
    })
}

/// Rank every name of `target` against `name`, keeping the best `top`.
pub fn run_inspect(
    name: &str,
    target: &NameColumn,
    options: MatchOptions,
    top: usize,
) -> Result<Vec<RankedCandidate>> {
    let target = target.load()?;
    let mut ranked = PlaceMatcher::new(options).rank(name, &target);
    ranked.truncate(top);
    Ok(ranked)
}
