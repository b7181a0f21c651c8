use serde::{Deserialize, Serialize};

/// One entry of the translation table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    StripComments,
    BracketedIdentifiers,
    IsNullToCoalesce,
    GetDateToCurrentTimestamp,
    LenToLength,
    RemoveNoLock,
    RemoveCollate,
    ConvertToCast,
    TopToLimit,
    NameMapping,
    CollapseTerminators,
}

impl RuleId {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::StripComments => "strip_comments",
            RuleId::BracketedIdentifiers => "bracketed_identifiers",
            RuleId::IsNullToCoalesce => "is_null_to_coalesce",
            RuleId::GetDateToCurrentTimestamp => "get_date_to_current_timestamp",
            RuleId::LenToLength => "len_to_length",
            RuleId::RemoveNoLock => "remove_no_lock",
            RuleId::RemoveCollate => "remove_collate",
            RuleId::ConvertToCast => "convert_to_cast",
            RuleId::TopToLimit => "top_to_limit",
            RuleId::NameMapping => "name_mapping",
            RuleId::CollapseTerminators => "collapse_terminators",
        }
    }

    /// Fixed note for rules whose note does not depend on the input.
    ///
    /// `TopToLimit` builds its note from the migrated row count and returns
    /// `None` here.
    pub fn fixed_note(&self) -> Option<&'static str> {
        let note = match self {
            RuleId::StripComments => "Removed T-SQL comments.",
            RuleId::BracketedIdentifiers => "Converted `[Identifier]` to double-quoted identifiers.",
            RuleId::IsNullToCoalesce => "Use COALESCE instead of ISNULL.",
            RuleId::GetDateToCurrentTimestamp => "Use CURRENT_TIMESTAMP instead of GETDATE().",
            RuleId::LenToLength => "Use LENGTH instead of LEN.",
            RuleId::RemoveNoLock => "Removed `WITH (NOLOCK)`.",
            RuleId::RemoveCollate => "Removed `COLLATE` clauses.",
            RuleId::ConvertToCast => "Converted CONVERT() to CAST().",
            RuleId::TopToLimit => return None,
            RuleId::NameMapping => "Applied schema mapping.",
            RuleId::CollapseTerminators => "Collapsed repeated statement terminators.",
        };
        Some(note)
    }
}

/// Reference rule order used by [`crate::translate`].
pub const STANDARD_RULES: [RuleId; 11] = [
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
];

/// An ordered list of rules. Each rule sees the output of the previous one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct RuleSet {
    rules: Vec<RuleId>,
}

impl RuleSet {
    pub fn standard() -> Self {
        Self {
            rules: STANDARD_RULES.to_vec(),
        }
    }

    pub fn new(rules: impl IntoIterator<Item = RuleId>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
        }
    }

    pub fn rules(&self) -> &[RuleId] {
        &self.rules
    }

    /// The same order without `rule`.
    pub fn without(&self, rule: RuleId) -> Self {
        Self::new(self.rules.iter().copied().filter(|r| *r != rule))
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}
