//! Workspace umbrella crate for SQL dialect congruence checking.
//!
//! This crate stitches the stage crates together so callers can compare a
//! T-SQL document with a Snowflake document, translate the T-SQL side and
//! explain what still differs, through one API:
//!
//! ```text
//! bytes ──ingest──▶ Document ──canonical──▶ canonical form ──diff──▶ score + opcodes + rows
//!                      │                                    └─explain─▶ construct / vocabulary notes
//!                      └──────────translate──────────▶ translated SQL + notes
//! ```
//!
//! The four pure entry points are re-exported as-is: [`normalize`],
//! [`translate`], [`compare_lines`] and [`explain`]. The helpers here add the
//! document plumbing, the pass/fail verdict and an optional metrics observer.
//!
//! ```
//! use sqlcongruence::{compare_documents, Document, NameMapping, NormalizationConfig};
//!
//! let a = Document::new(Some("a.sql"), "SELECT [Id] FROM dbo.Orders");
//! let b = Document::new(Some("b.sql"), "select id\nfrom PUBLIC.orders");
//! let mapping = NameMapping::from_pairs([("dbo.", "PUBLIC.")]);
//!
//! let report = compare_documents(&a, &b, &NormalizationConfig::default(), &mapping).unwrap();
//! assert!(report.identical);
//! assert_eq!(report.percent(), 100.0);
//! ```

pub mod config;

pub use canonical::{
    apply_mapping, brackets_to_double_quotes, collapse_whitespace, drop_identifier_quotes,
    normalize, normalize_document, normalize_with_stages, strip_comments, CanonicalError,
    MappingEntry, NameMapping, NormalizationConfig, NormalizeStage, NormalizedDocument,
    DEFAULT_STAGE_ORDER,
};
pub use config::{default_mapping, CongruenceConfig, ConfigLoadError, DEFAULT_THRESHOLD};
pub use diff::{
    aligned_rows, compare_lines, line_diff, opcodes_partition, similarity_ratio, token_diff,
    AlignedRow, CongruenceScore, DiffOpcode, DiffTag, InlineDiff, LineComparison, RowStatus,
    Segment, SegmentMark, SequenceMatcher,
};
pub use explain::{
    construct_for, explain, explain_with, Construct, ConstructId, ExplainConfig, ExplainError,
    ExplanationItem, ExplanationKind, CONSTRUCTS,
};
pub use ingest::{
    decode_bytes, flatten_csv, ingest_bytes, ingest_text, Document, IngestConfig, IngestError,
    SourceFormat, TextEncoding,
};
pub use translate::{translate, translate_with_rules, RuleId, RuleSet, TranslationResult};

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};
use tracing::info;

/// Errors that can occur while moving documents through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    Ingest(IngestError),
    Canonical(CanonicalError),
    Explain(ExplainError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Ingest(err) => write!(f, "ingest failure: {err}"),
            PipelineError::Canonical(err) => write!(f, "normalization failure: {err}"),
            PipelineError::Explain(err) => write!(f, "explain failure: {err}"),
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PipelineError::Ingest(err) => Some(err),
            PipelineError::Canonical(err) => Some(err),
            PipelineError::Explain(err) => Some(err),
        }
    }
}

impl From<IngestError> for PipelineError {
    fn from(value: IngestError) -> Self {
        PipelineError::Ingest(value)
    }
}

impl From<CanonicalError> for PipelineError {
    fn from(value: CanonicalError) -> Self {
        PipelineError::Canonical(value)
    }
}

impl From<ExplainError> for PipelineError {
    fn from(value: ExplainError) -> Self {
        PipelineError::Explain(value)
    }
}

/// Metrics observer for pipeline stages.
pub trait PipelineMetrics: Send + Sync {
    fn record_ingest(&self, latency: Duration, result: Result<(), IngestError>);
    fn record_compare(&self, latency: Duration, result: Result<(), PipelineError>);
    fn record_translate(&self, latency: Duration, rules_fired: usize);
}

/// Install or clear the global pipeline metrics recorder.
pub fn set_pipeline_metrics(recorder: Option<Arc<dyn PipelineMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn PipelineMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn PipelineMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn PipelineMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

struct MetricsSpan {
    recorder: Arc<dyn PipelineMetrics>,
    start: Instant,
}

impl MetricsSpan {
    fn start() -> Option<Self> {
        metrics_recorder().map(|recorder| Self {
            recorder,
            start: Instant::now(),
        })
    }

    fn record_ingest(self, result: Result<(), IngestError>) {
        self.recorder.record_ingest(self.start.elapsed(), result);
    }

    fn record_compare(self, result: Result<(), PipelineError>) {
        self.recorder.record_compare(self.start.elapsed(), result);
    }

    fn record_translate(self, rules_fired: usize) {
        self.recorder
            .record_translate(self.start.elapsed(), rules_fired);
    }
}

/// Pass/fail classification of a congruence percentage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    /// `Pass` when `percent >= threshold`. Both are in `[0, 100]`.
    pub fn from_score(percent: f64, threshold: f64) -> Self {
        if percent >= threshold {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

/// Everything a presentation layer needs to show one comparison.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonReport {
    pub score: CongruenceScore,
    /// Line opcodes over the two canonical forms.
    pub opcodes: Vec<DiffOpcode>,
    /// Side-by-side rows over the two canonical forms.
    pub rows: Vec<AlignedRow>,
    pub canonical_a: NormalizedDocument,
    pub canonical_b: NormalizedDocument,
    /// Both canonical forms are byte-identical.
    pub identical: bool,
    /// Explanation computed on the raw texts.
    pub explanation: Vec<ExplanationItem>,
}

impl ComparisonReport {
    /// Congruence percentage, rounded to two decimals.
    pub fn percent(&self) -> f64 {
        self.score.percent()
    }

    pub fn verdict(&self, threshold: f64) -> Verdict {
        Verdict::from_score(self.percent(), threshold)
    }

    /// Number of line opcodes that are not `Equal`.
    pub fn change_count(&self) -> usize {
        self.opcodes.iter().filter(|op| !op.is_equal()).count()
    }
}

/// Read a file into a [`Document`], enforcing the ingest ceilings.
pub fn load_document<P: AsRef<Path>>(
    path: P,
    cfg: &IngestConfig,
) -> Result<Document, PipelineError> {
    let metrics = MetricsSpan::start();
    let result = ingest::ingest_path(path.as_ref(), cfg);
    if let Some(span) = metrics {
        span.record_ingest(result.as_ref().map(|_| ()).map_err(Clone::clone));
    }
    Ok(result?)
}

/// Normalize both documents, diff the canonical forms and explain the raw
/// texts with the default explain cutoffs.
pub fn compare_documents(
    a: &Document,
    b: &Document,
    cfg: &NormalizationConfig,
    mapping: &NameMapping,
) -> Result<ComparisonReport, PipelineError> {
    compare_inner(a, b, cfg, mapping, &ExplainConfig::default())
}

/// [`compare_documents`] driven by a full configuration file.
pub fn compare_with_config(
    a: &Document,
    b: &Document,
    cfg: &CongruenceConfig,
) -> Result<ComparisonReport, PipelineError> {
    cfg.explain.validate()?;
    compare_inner(a, b, &cfg.normalize, &cfg.mapping, &cfg.explain)
}

/// Construct and vocabulary differences between two raw documents.
pub fn explain_documents(a: &Document, b: &Document, cfg: &ExplainConfig) -> Vec<ExplanationItem> {
    explain_with(&a.text, &b.text, cfg)
}

/// Translate a SQL or plain-text document. CSV documents are not SQL and
/// yield `None`.
pub fn translate_document(doc: &Document, mapping: &NameMapping) -> Option<TranslationResult> {
    if !doc.format.is_translatable() {
        return None;
    }
    let metrics = MetricsSpan::start();
    let result = translate(&doc.text, mapping);
    info!(
        document = doc.display_name(),
        rules_fired = result.applied.len(),
        "translate_complete"
    );
    if let Some(span) = metrics {
        span.record_translate(result.applied.len());
    }
    Some(result)
}

fn compare_inner(
    a: &Document,
    b: &Document,
    cfg: &NormalizationConfig,
    mapping: &NameMapping,
    explain_cfg: &ExplainConfig,
) -> Result<ComparisonReport, PipelineError> {
    let start = Instant::now();
    let metrics = MetricsSpan::start();

    let normalized = normalize_document(a.name.as_deref(), &a.text, cfg, mapping).and_then(
        |canonical_a| {
            normalize_document(b.name.as_deref(), &b.text, cfg, mapping)
                .map(|canonical_b| (canonical_a, canonical_b))
        },
    );
    let (canonical_a, canonical_b) = match normalized {
        Ok(pair) => pair,
        Err(err) => {
            let err = PipelineError::Canonical(err);
            if let Some(span) = metrics {
                span.record_compare(Err(err.clone()));
            }
            return Err(err);
        }
    };

    let comparison = compare_lines(&canonical_a.canonical_text, &canonical_b.canonical_text);
    let rows = aligned_rows(&canonical_a.canonical_text, &canonical_b.canonical_text);
    let identical = canonical_a.same_canonical_form(&canonical_b);
    let explanation = explain_with(&a.text, &b.text, explain_cfg);

    let report = ComparisonReport {
        score: comparison.score,
        opcodes: comparison.opcodes,
        rows,
        canonical_a,
        canonical_b,
        identical,
        explanation,
    };

    info!(
        document_a = a.display_name(),
        document_b = b.display_name(),
        percent = report.percent(),
        identical = report.identical,
        changes = report.change_count(),
        elapsed_micros = start.elapsed().as_micros(),
        "compare_complete"
    );
    if let Some(span) = metrics {
        span.record_compare(Ok(()));
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, RwLock};
    use std::time::Duration;

    fn sql(name: &str, text: &str) -> Document {
        Document::new(Some(name), text)
    }

    #[test]
    fn verdict_uses_inclusive_threshold() {
        assert_eq!(Verdict::from_score(95.0, 95.0), Verdict::Pass);
        assert_eq!(Verdict::from_score(94.99, 95.0), Verdict::Fail);
        assert!(Verdict::from_score(100.0, 0.0).is_pass());
    }

    #[test]
    fn compare_documents_reports_identical_forms() {
        let report = compare_documents(
            &sql("a.sql", "SELECT 1"),
            &sql("b.sql", "select   1"),
            &NormalizationConfig::default(),
            &NameMapping::new(),
        )
        .expect("valid config");
        assert_eq!(report.score.ratio, 1.0);
        assert_eq!(report.change_count(), 0);
        assert!(report.identical);
        assert!(report.explanation.is_empty());
        assert_eq!(report.canonical_a.name.as_deref(), Some("a.sql"));
    }

    #[test]
    fn compare_documents_rejects_invalid_config() {
        let cfg = NormalizationConfig {
            version: 0,
            ..Default::default()
        };
        let result = compare_documents(
            &sql("a.sql", "x"),
            &sql("b.sql", "x"),
            &cfg,
            &NameMapping::new(),
        );
        assert!(matches!(result, Err(PipelineError::Canonical(_))));
    }

    #[test]
    fn explanation_runs_on_raw_text() {
        let report = compare_documents(
            &sql("a.sql", "SELECT [Id] FROM t"),
            &sql("b.sql", "SELECT Id FROM t"),
            &NormalizationConfig::default(),
            &NameMapping::new(),
        )
        .unwrap();
        // Canonical forms agree, the raw texts still differ in quoting.
        assert!(report.identical);
        assert_eq!(
            report.explanation[0].kind,
            ExplanationKind::Construct(ConstructId::BracketedIdentifier)
        );
    }

    #[test]
    fn csv_documents_are_not_translated() {
        let csv = Document::new(Some("rows.csv"), "1,ISNULL(a, 0)");
        assert!(translate_document(&csv, &NameMapping::new()).is_none());

        let txt = Document::new(Some("q.txt"), "SELECT ISNULL(a, 0)");
        let result = translate_document(&txt, &NameMapping::new()).unwrap();
        assert_eq!(result.text, "SELECT COALESCE(a, 0)");
    }

    #[test]
    fn compare_with_config_applies_explain_cutoffs() {
        let cfg = CongruenceConfig {
            explain: ExplainConfig {
                min_token_chars: 4,
                max_listed: 1,
            },
            ..Default::default()
        };
        let report = compare_with_config(
            &sql("a.sql", "alpha bravo"),
            &sql("b.sql", ""),
            &cfg,
        )
        .unwrap();
        assert_eq!(report.explanation.len(), 1);
        assert_eq!(report.explanation[0].message, "Tokens only in A: alpha");

        let bad = CongruenceConfig {
            explain: ExplainConfig {
                min_token_chars: 4,
                max_listed: 0,
            },
            ..Default::default()
        };
        assert!(matches!(
            compare_with_config(&sql("a.sql", ""), &sql("b.sql", ""), &bad),
            Err(PipelineError::Explain(_))
        ));
    }

    #[derive(Default)]
    struct CountingMetrics {
        events: Arc<RwLock<Vec<&'static str>>>,
    }

    impl CountingMetrics {
        fn new() -> Self {
            Self {
                events: Arc::new(RwLock::new(Vec::new())),
            }
        }

        fn snapshot(&self) -> Vec<&'static str> {
            self.events.read().unwrap().clone()
        }
    }

    impl PipelineMetrics for CountingMetrics {
        fn record_ingest(&self, _latency: Duration, result: Result<(), IngestError>) {
            let label = if result.is_ok() {
                "ingest_ok"
            } else {
                "ingest_err"
            };
            self.events.write().unwrap().push(label);
        }

        fn record_compare(&self, _latency: Duration, result: Result<(), PipelineError>) {
            let label = if result.is_ok() {
                "compare_ok"
            } else {
                "compare_err"
            };
            self.events.write().unwrap().push(label);
        }

        fn record_translate(&self, _latency: Duration, _rules_fired: usize) {
            self.events.write().unwrap().push("translate");
        }
    }

    #[test]
    fn metrics_recorder_tracks_pipeline_outcome() {
        let metrics = Arc::new(CountingMetrics::new());
        set_pipeline_metrics(Some(metrics.clone()));

        let a = sql("a.sql", "SELECT TOP 5 * FROM t");
        let b = sql("b.sql", "SELECT * FROM t LIMIT 5");
        let report = compare_documents(&a, &b, &NormalizationConfig::default(), &NameMapping::new());
        assert!(report.is_ok());
        assert!(translate_document(&a, &NameMapping::new()).is_some());
        let missing = load_document("/definitely/not/here.sql", &IngestConfig::default());
        assert!(missing.is_err());

        let events = metrics.snapshot();
        assert!(events.contains(&"compare_ok"));
        assert!(events.contains(&"translate"));
        assert!(events.contains(&"ingest_err"));

        set_pipeline_metrics(None);
    }
}
