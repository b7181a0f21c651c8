//! T-SQL to Snowflake rule-based translator.
//!
//! [`translate`] runs a fixed, ordered table of lexical rewrite rules over the
//! raw (un-normalized) source and records a note for every rule that changed
//! the text. Case and layout are preserved except where a rule rewrites them;
//! whitespace is never collapsed here.
//!
//! | Order | Rule                              | Note                                                   |
//! |-------|-----------------------------------|--------------------------------------------------------|
//! | 1     | comment removal                   | `Removed T-SQL comments.`                              |
//! | 2     | `[X]` to `"X"`                    | ``Converted `[Identifier]` to double-quoted identifiers.`` |
//! | 3     | `ISNULL(` to `COALESCE(`          | `Use COALESCE instead of ISNULL.`                      |
//! | 4     | `GETDATE()` to `CURRENT_TIMESTAMP`| `Use CURRENT_TIMESTAMP instead of GETDATE().`          |
//! | 5     | `LEN(` to `LENGTH(`               | `Use LENGTH instead of LEN.`                           |
//! | 6     | drop `WITH (NOLOCK)`              | ``Removed `WITH (NOLOCK)`.``                           |
//! | 7     | drop `COLLATE name`               | ``Removed `COLLATE` clauses.``                         |
//! | 8     | `CONVERT(t, e)` to `CAST(e AS t)` | `Converted CONVERT() to CAST().`                       |
//! | 9     | `SELECT TOP n` to `LIMIT n`       | `Translated TOP n to LIMIT n.`                         |
//! | 10    | name mapping                      | `Applied schema mapping.`                              |
//! | 11    | `;;` to `;`                       | `Collapsed repeated statement terminators.`            |
//!
//! Constructs a rule cannot match (an unterminated `CONVERT(`, a bracket that
//! never closes) are left untouched and produce no note.
//!
//! ```rust
//! use canonical::NameMapping;
//!
//! let mapping = NameMapping::from_pairs([("dbo.", "PUBLIC.")]);
//! let result = translate::translate("SELECT TOP 5 ISNULL(a, 0) FROM dbo.[Orders]", &mapping);
//! assert_eq!(result.text, "SELECT COALESCE(a, 0) FROM PUBLIC.\"Orders\"\nLIMIT 5;");
//! assert_eq!(result.notes.len(), 4);
//! ```

use canonical::{brackets_to_double_quotes, strip_comments, NameMapping};
use serde::{Deserialize, Serialize};
use tracing::debug;

mod limit;
mod rewrite;
mod rules;

pub use crate::rules::{RuleId, RuleSet, STANDARD_RULES};

/// Translated text plus the audit trail of the rules that changed it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranslationResult {
    pub text: String,
    /// Distinct notes in the order their rules fired.
    pub notes: Vec<String>,
    /// Rules that changed the text, in firing order.
    pub applied: Vec<RuleId>,
}

impl TranslationResult {
    pub fn fired(&self, rule: RuleId) -> bool {
        self.applied.contains(&rule)
    }
}

/// Translates with the standard rule order.
pub fn translate(text: &str, mapping: &NameMapping) -> TranslationResult {
    translate_with_rules(text, mapping, &RuleSet::standard())
}

/// Translates with an explicit rule order.
pub fn translate_with_rules(text: &str, mapping: &NameMapping, rules: &RuleSet) -> TranslationResult {
    let mut result = TranslationResult {
        text: text.to_string(),
        ..Default::default()
    };

    for &rule in rules.rules() {
        let Some((rewritten, note)) = apply_rule(rule, &result.text, mapping) else {
            continue;
        };
        if rewritten == result.text {
            continue;
        }
        debug!(rule = rule.as_str(), note = %note, "translate_rule_applied");
        result.text = rewritten;
        if !result.applied.contains(&rule) {
            result.applied.push(rule);
        }
        if !result.notes.contains(&note) {
            result.notes.push(note);
        }
    }
    result
}

fn apply_rule(rule: RuleId, text: &str, mapping: &NameMapping) -> Option<(String, String)> {
    let rewritten = match rule {
        RuleId::StripComments => strip_comments(text),
        RuleId::BracketedIdentifiers => brackets_to_double_quotes(text),
        RuleId::IsNullToCoalesce => rewrite::isnull_to_coalesce(text),
        RuleId::GetDateToCurrentTimestamp => rewrite::getdate_to_current_timestamp(text),
        RuleId::LenToLength => rewrite::len_to_length(text),
        RuleId::RemoveNoLock => rewrite::remove_nolock(text),
        RuleId::RemoveCollate => rewrite::remove_collate(text),
        RuleId::ConvertToCast => rewrite::convert_to_cast(text),
        RuleId::TopToLimit => return limit::top_to_limit(text),
        RuleId::NameMapping => mapping.apply(text),
        RuleId::CollapseTerminators => rewrite::collapse_terminators(text),
    };
    let note = rule.fixed_note()?;
    Some((rewritten, note.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snowflake_mapping() -> NameMapping {
        NameMapping::from_pairs([("dbo.", "PUBLIC."), ("[dbo].", "PUBLIC.")])
    }

    #[test]
    fn top_becomes_limit_with_one_note() {
        let result = translate("SELECT TOP 5 * FROM t", &NameMapping::new());
        assert!(result.text.contains("LIMIT 5"));
        assert!(!result.text.contains("TOP 5"));
        let top_notes: Vec<_> = result
            .notes
            .iter()
            .filter(|n| n.contains("TOP 5") && n.contains("LIMIT 5"))
            .collect();
        assert_eq!(top_notes.len(), 1);
        assert_eq!(result.notes.len(), 1);
    }

    #[test]
    fn isnull_becomes_coalesce() {
        let result = translate("SELECT ISNULL(a, b) FROM t;", &NameMapping::new());
        assert!(result.text.contains("COALESCE(a, b)"));
        assert!(result.notes.contains(&"Use COALESCE instead of ISNULL.".to_string()));
        assert_eq!(result.applied, vec![RuleId::IsNullToCoalesce]);
    }

    #[test]
    fn bracket_quoting_happens_before_prefix_mapping() {
        let result = translate("SELECT * FROM dbo.[Orders]", &snowflake_mapping());
        assert!(result.text.contains("PUBLIC.\"Orders\""));
        assert!(result.fired(RuleId::BracketedIdentifiers));
        assert!(result.fired(RuleId::NameMapping));
    }

    #[test]
    fn bracketed_schema_is_quoted_before_mapping_sees_it() {
        // `[dbo].` is already `"dbo".` when the mapping runs, so the bracketed
        // mapping entry never matches.
        let result = translate("SELECT * FROM [dbo].[Orders]", &snowflake_mapping());
        assert_eq!(result.text, "SELECT * FROM \"dbo\".\"Orders\"");
        assert!(!result.fired(RuleId::NameMapping));
    }

    #[test]
    fn layout_and_case_are_preserved() {
        let sql = "select a,\n       b\nfrom   t;";
        let result = translate(sql, &NameMapping::new());
        assert_eq!(result.text, sql);
        assert!(result.notes.is_empty());
        assert!(result.applied.is_empty());
    }

    #[test]
    fn full_rule_table_in_firing_order() {
        let sql = "-- nightly\nSELECT TOP 10 [Id], ISNULL([Name], ''), LEN(Code),\n  CONVERT(VARCHAR(10), GETDATE())\nFROM dbo.[Orders] WITH (NOLOCK)\nWHERE Code COLLATE Latin1_General_CI_AS = 'x';;";
        let result = translate(sql, &snowflake_mapping());
        assert_eq!(
            result.text,
            "\nSELECT \"Id\", COALESCE(\"Name\", ''), LENGTH(Code),\n  CAST(CURRENT_TIMESTAMP AS VARCHAR(10))\nFROM PUBLIC.\"Orders\"\nWHERE Code = 'x'\nLIMIT 10;"
        );
        assert_eq!(
            result.applied,
            vec![
                RuleId::StripComments,
                RuleId::BracketedIdentifiers,
                RuleId::IsNullToCoalesce,
                RuleId::GetDateToCurrentTimestamp,
                RuleId::LenToLength,
                RuleId::RemoveNoLock,
                RuleId::RemoveCollate,
                RuleId::ConvertToCast,
                RuleId::TopToLimit,
                RuleId::NameMapping,
                RuleId::CollapseTerminators,
            ]
        );
        assert_eq!(result.notes[8], "Translated TOP 10 to LIMIT 10.");
    }

    #[test]
    fn repeated_terminators_collapse() {
        let result = translate("SELECT 1;;", &NameMapping::new());
        assert_eq!(result.text, "SELECT 1;");
        assert_eq!(result.notes, vec!["Collapsed repeated statement terminators."]);
    }

    #[test]
    fn unterminated_constructs_are_left_alone() {
        let sql = "SELECT CONVERT(INT, amount\nFROM [Orders";
        let result = translate(sql, &NameMapping::new());
        assert_eq!(result.text, sql);
        assert!(result.notes.is_empty());
    }

    #[test]
    fn string_literals_pass_through_every_rule() {
        let result = translate(
            "SELECT TOP 5 a FROM t WHERE code = 'x;y'",
            &NameMapping::new(),
        );
        assert_eq!(result.text, "SELECT a FROM t WHERE code = 'x;y'\nLIMIT 5;");

        let sql = "SELECT 'ISNULL(a, b)', 'GETDATE()', 'LEN(c)', 'WITH (NOLOCK)', \
                   'CONVERT(INT, d)', 'SELECT TOP 1 e' FROM t;";
        let result = translate(sql, &NameMapping::new());
        assert_eq!(result.text, sql);
        assert!(result.applied.is_empty());
    }

    #[test]
    fn translation_is_deterministic() {
        let sql = "SELECT TOP 3 ISNULL(x, 0) FROM dbo.[T] WITH (NOLOCK);";
        let first = translate(sql, &snowflake_mapping());
        let second = translate(sql, &snowflake_mapping());
        assert_eq!(first, second);
    }

    #[test]
    fn mapping_chain_follows_declared_order() {
        // The second entry matches the output of the first: `dbo.` -> `stage.`
        // -> `PUBLIC.`. Swapping the entries stops the chain.
        let chained = NameMapping::from_pairs([("dbo.", "stage."), ("stage.", "PUBLIC.")]);
        let result = translate("SELECT * FROM dbo.t", &chained);
        assert_eq!(result.text, "SELECT * FROM PUBLIC.t");

        let swapped = NameMapping::from_pairs([("stage.", "PUBLIC."), ("dbo.", "stage.")]);
        let result = translate("SELECT * FROM dbo.t", &swapped);
        assert_eq!(result.text, "SELECT * FROM stage.t");
    }

    #[test]
    fn translating_twice_is_not_idempotent_under_growing_mapping() {
        let growing = NameMapping::from_pairs([("sales.", "sales.archive.")]);
        let once = translate("SELECT * FROM sales.t", &growing);
        let twice = translate(&once.text, &growing);
        assert_eq!(once.text, "SELECT * FROM sales.archive.t");
        assert_eq!(twice.text, "SELECT * FROM sales.archive.archive.t");
    }

    #[test]
    fn custom_rule_order_is_honoured() {
        let rules = RuleSet::standard().without(RuleId::BracketedIdentifiers);
        let result = translate_with_rules("SELECT [Id] FROM t", &NameMapping::new(), &rules);
        assert_eq!(result.text, "SELECT [Id] FROM t");
        assert!(result.applied.is_empty());
    }
}
