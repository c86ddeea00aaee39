//! Built-in rule tables.
//!
//! Two tables are registered with [`Resolver::builtin`](crate::Resolver::builtin):
//!
//! - `Unicode.CLDR`: the CLDR rules as published.
//! - `Unicode.CLDR.Optional`: the same rules plus optional `zero` and `one`
//!   cases for every rule set that lacks them, so callers can pick up
//!   "exactly zero" / "exactly one" message variants in any language.

#[path = "rules/cldr.rs"]
pub(crate) mod cldr;


use cldr::PluralData;

pub const CLDR: &str = "Unicode.CLDR";
pub const CLDR_OPTIONAL: &str = "Unicode.CLDR.Optional";

/// `(table name, rule text)` for every built-in table.
pub(crate) fn builtin_tables() -> Vec<(&'static str, String)> {
    vec![(CLDR, table_text(CLDR, false)), (CLDR_OPTIONAL, table_text(CLDR_OPTIONAL, true))]
}

fn table_text(rule_set: &str, with_optional: bool) -> String {
    let mut lines = Vec::new();
    for data in cldr::CARDINAL.iter().chain(cldr::ORDINAL) {
        for culture in data.cultures {
            let category = data.category;
            let header = |case: &str| format!("[RuleSet={rule_set},Category={category},Culture={culture},Case={case}");
            if with_optional {
                for case in missing_cases(data) {
                    lines.push(format!("{},Optional=1]", header(case)));
                }
            }
            for (case, body) in data.cases {
                lines.push(format!("{}] {body}", header(case)));
            }
        }
    }
    lines.join("\n")
}

/// `zero` and `one` when the rule set does not define them itself.
fn missing_cases(data: &PluralData) -> impl Iterator<Item = &'static str> + '_ {
    ["zero", "one"].into_iter().filter(|case| !data.cases.iter().any(|(c, _)| c == case))
}
