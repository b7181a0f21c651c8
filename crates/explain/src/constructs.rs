use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// T-SQL construct with no direct Snowflake spelling.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ConstructId {
    BracketedIdentifier,
    SelectTop,
    IsNull,
    GetDate,
    Len,
    NoLock,
    Convert,
    Collate,
    SystemVariable,
    TempTable,
    Identity,
    NVarchar,
}

#[derive(Debug)]
pub struct Construct {
    pub id: ConstructId,
    pub pattern: Regex,
    pub message: &'static str,
}

impl Construct {
    pub fn is_present(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

fn construct(id: ConstructId, pattern: &str, message: &'static str) -> Construct {
    Construct {
        id,
        pattern: Regex::new(pattern).expect("construct pattern is valid"),
        message,
    }
}

/// Detection table, in reporting order.
pub static CONSTRUCTS: Lazy<Vec<Construct>> = Lazy::new(|| {
    vec![
        construct(
            ConstructId::BracketedIdentifier,
            r"\[[^\[\]\r\n]+\]",
            "Square-bracket identifiers ([Name]) are T-SQL quoting; Snowflake quotes identifiers with double quotes.",
        ),
        construct(
            ConstructId::SelectTop,
            r"(?i)\bSELECT\s+(?:DISTINCT\s+)?TOP\s*\(?\s*\d+",
            "SELECT TOP n limits rows in T-SQL; Snowflake uses a trailing LIMIT n.",
        ),
        construct(
            ConstructId::IsNull,
            r"(?i)\bISNULL\s*\(",
            "ISNULL() is T-SQL; Snowflake uses COALESCE() or IFNULL().",
        ),
        construct(
            ConstructId::GetDate,
            r"(?i)\bGETDATE\s*\(\s*\)",
            "GETDATE() is T-SQL; Snowflake uses CURRENT_TIMESTAMP.",
        ),
        construct(
            ConstructId::Len,
            r"(?i)\bLEN\s*\(",
            "LEN() is T-SQL; Snowflake uses LENGTH().",
        ),
        construct(
            ConstructId::NoLock,
            r"(?i)\bWITH\s*\(\s*NOLOCK\s*\)",
            "WITH (NOLOCK) table hints have no Snowflake equivalent and are dropped.",
        ),
        construct(
            ConstructId::Convert,
            r"(?i)\bCONVERT\s*\(",
            "CONVERT(type, expr) is T-SQL; Snowflake uses CAST(expr AS type).",
        ),
        construct(
            ConstructId::Collate,
            r"(?i)\bCOLLATE\s+\w+",
            "COLLATE clauses name SQL Server collations that Snowflake does not recognise.",
        ),
        construct(
            ConstructId::SystemVariable,
            r"@@[A-Za-z_]\w*",
            "@@ system variables (e.g. @@ROWCOUNT) are T-SQL; Snowflake exposes session state through functions.",
        ),
        construct(
            ConstructId::TempTable,
            r"(?:^|[\s,(.])##?[A-Za-z_]\w*",
            "#temp tables are T-SQL; Snowflake uses CREATE TEMPORARY TABLE.",
        ),
        construct(
            ConstructId::Identity,
            r"(?i)\bIDENTITY\s*\(",
            "IDENTITY(seed, increment) columns are T-SQL; Snowflake uses AUTOINCREMENT or IDENTITY START/INCREMENT.",
        ),
        construct(
            ConstructId::NVarchar,
            r"(?i)\bNVARCHAR\b",
            "NVARCHAR is T-SQL; Snowflake VARCHAR is always Unicode.",
        ),
    ]
});

pub fn construct_for(id: ConstructId) -> Option<&'static Construct> {
    CONSTRUCTS.iter().find(|c| c.id == id)
}
