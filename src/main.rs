use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, bail, Context, Result};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use sqlcongruence::{
    compare_with_config, load_document, translate_document, ComparisonReport, CongruenceConfig,
    Document, RowStatus, TranslationResult, Verdict,
};

const USAGE: &str = "\
usage: sqlcongruence [OPTIONS] <A> <B>

Compares a T-SQL document A with a Snowflake document B after normalization.

options:
  --config PATH          YAML configuration file
  --threshold PCT        pass threshold in [0, 100]
  --map SRC->TGT         append a name mapping entry (repeatable)
  --case-sensitive       do not casefold
  --keep-comments        do not strip comments
  --keep-whitespace      do not collapse whitespace
  --keep-brackets        keep bracketed identifiers
  --json                 print the report as JSON
  --translated-out PATH  write the translation of A to PATH
  -h, --help             print this help

exit status: 0 pass, 1 fail, 2 error";

#[derive(Debug, Clone, Default)]
struct Args {
    a: PathBuf,
    b: PathBuf,
    config: Option<PathBuf>,
    threshold: Option<f64>,
    maps: Vec<(String, String)>,
    case_sensitive: bool,
    keep_comments: bool,
    keep_whitespace: bool,
    keep_brackets: bool,
    json: bool,
    translated_out: Option<PathBuf>,
}

impl Args {
    fn parse(args: &[String]) -> Result<Option<Self>> {
        let mut parsed = Args::default();
        let mut positional = Vec::new();
        let mut index = 0_usize;
        while index < args.len() {
            match args[index].as_str() {
                "--config" => {
                    index += 1;
                    let value = value_for(args, index, "--config")?;
                    parsed.config = Some(PathBuf::from(value));
                }
                "--threshold" => {
                    index += 1;
                    let value = value_for(args, index, "--threshold")?;
                    let threshold = value
                        .parse::<f64>()
                        .map_err(|err| anyhow!("invalid --threshold value={value}: {err}"))?;
                    parsed.threshold = Some(threshold);
                }
                "--map" => {
                    index += 1;
                    let value = value_for(args, index, "--map")?;
                    let (source, target) = value
                        .split_once("->")
                        .ok_or_else(|| anyhow!("invalid --map value={value}: expected SRC->TGT"))?;
                    let source = source.trim();
                    if source.is_empty() {
                        bail!("invalid --map value={value}: source must not be empty");
                    }
                    parsed.maps.push((source.to_string(), target.trim().to_string()));
                }
                "--case-sensitive" => parsed.case_sensitive = true,
                "--keep-comments" => parsed.keep_comments = true,
                "--keep-whitespace" => parsed.keep_whitespace = true,
                "--keep-brackets" => parsed.keep_brackets = true,
                "--json" => parsed.json = true,
                "--translated-out" => {
                    index += 1;
                    let value = value_for(args, index, "--translated-out")?;
                    parsed.translated_out = Some(PathBuf::from(value));
                }
                "--help" | "-h" => return Ok(None),
                other if other.starts_with("--") => bail!("unknown argument: {other}"),
                other => positional.push(PathBuf::from(other)),
            }
            index += 1;
        }

        let mut positional = positional.into_iter();
        match (positional.next(), positional.next(), positional.next()) {
            (Some(a), Some(b), None) => {
                parsed.a = a;
                parsed.b = b;
                Ok(Some(parsed))
            }
            _ => bail!("expected exactly two documents, A and B"),
        }
    }

    /// File config first, then flag overrides.
    fn resolve_config(&self) -> Result<CongruenceConfig> {
        let mut cfg = match &self.config {
            Some(path) => CongruenceConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => CongruenceConfig::default(),
        };
        if let Some(threshold) = self.threshold {
            cfg.threshold = threshold;
        }
        for (source, target) in &self.maps {
            cfg.mapping.push(source.as_str(), target.as_str());
        }
        if self.case_sensitive {
            cfg.normalize.casefold = false;
        }
        if self.keep_comments {
            cfg.normalize.strip_comments = false;
        }
        if self.keep_whitespace {
            cfg.normalize.collapse_whitespace = false;
        }
        if self.keep_brackets {
            cfg.normalize.drop_bracketed_identifiers = false;
        }
        cfg.validate().context("invalid configuration")?;
        Ok(cfg)
    }
}

fn value_for<'a>(args: &'a [String], index: usize, flag: &str) -> Result<&'a str> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing value for {flag}"))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<Verdict> {
    let cfg = args.resolve_config()?;

    let a = load_document(&args.a, &cfg.ingest)
        .with_context(|| format!("reading {}", args.a.display()))?;
    let b = load_document(&args.b, &cfg.ingest)
        .with_context(|| format!("reading {}", args.b.display()))?;

    let report = compare_with_config(&a, &b, &cfg)?;
    let verdict = report.verdict(cfg.threshold);

    let translation = match &args.translated_out {
        Some(path) => {
            let result = translate_document(&a, &cfg.mapping)
                .ok_or_else(|| anyhow!("{} is not a SQL document", a.display_name()))?;
            fs::write(path, &result.text)
                .with_context(|| format!("writing {}", path.display()))?;
            Some(result)
        }
        None => None,
    };

    if args.json {
        let out = json!({
            "a": a.display_name(),
            "b": b.display_name(),
            "percent": report.percent(),
            "threshold": cfg.threshold,
            "verdict": verdict,
            "report": report,
            "translation": translation,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print_text_report(&a, &b, &report, cfg.threshold, verdict, translation.as_ref());
    }
    Ok(verdict)
}

fn print_text_report(
    a: &Document,
    b: &Document,
    report: &ComparisonReport,
    threshold: f64,
    verdict: Verdict,
    translation: Option<&TranslationResult>,
) {
    let label = match verdict {
        Verdict::Pass => "PASS",
        Verdict::Fail => "FAIL",
    };
    println!("{} vs {}", a.display_name(), b.display_name());
    println!(
        "congruence: {:.2}% (threshold {:.2}%) {label}",
        report.percent(),
        threshold
    );
    if report.identical {
        println!("canonical forms are identical");
    }

    let changes: Vec<_> = report.opcodes.iter().filter(|op| !op.is_equal()).collect();
    if !changes.is_empty() {
        println!();
        println!("changes:");
        for op in changes {
            println!(
                "  {:<7} A[{}..{}] B[{}..{}]",
                op.tag.as_str(),
                op.a_start,
                op.a_end,
                op.b_start,
                op.b_end
            );
        }
        let rows = report
            .rows
            .iter()
            .filter(|row| row.status == RowStatus::Changed);
        for row in rows {
            let left: String = row.left.iter().map(|s| s.text.as_str()).collect();
            let right: String = row.right.iter().map(|s| s.text.as_str()).collect();
            println!("  - {left}");
            println!("  + {right}");
        }
    }

    if !report.explanation.is_empty() {
        println!();
        println!("explanation:");
        for item in &report.explanation {
            println!("  * {}", item.message);
        }
    }

    if let Some(result) = translation {
        println!();
        println!("translation notes:");
        if result.notes.is_empty() {
            println!("  (no rules applied)");
        }
        for note in &result.notes {
            println!("  * {note}");
        }
    }
}

fn main() -> ExitCode {
    init_tracing();

    let raw: Vec<String> = env::args().skip(1).collect();
    let args = match Args::parse(&raw) {
        Ok(Some(args)) => args,
        Ok(None) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    match run(&args) {
        Ok(Verdict::Pass) => ExitCode::SUCCESS,
        Ok(Verdict::Fail) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}
