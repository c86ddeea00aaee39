//! Rule collections, name resolution and scopes.
//!
//! ```text
//! "Unicode.CLDR" ──▶ Resolver::resolve ──┬─ registered table ──▶ Arc<RuleCollection>
//!                                        └─ parse as rule text ─▶ Arc<RuleCollection>
//!                          (both outcomes, including errors, are cached by name)
//!
//! RuleCollection ── groups rules by (rule set, culture, category)
//!                └─ one CompiledRuleSet per group, built eagerly
//!
//! PluralScope [base, override₁, override₂]  searched right to left
//! ```
//!
//! Caches are `RwLock<HashMap>`s. A miss computes outside the lock and
//! inserts with `entry().or_insert`, so two threads racing on the same key
//! may both compute, but every caller ends up with the first stored value.

use super::compiled_rules::{CompiledRuleSet, Matches};
use super::parser::parse_expression;
use crate::error::{ParseError, PluralError};
use crate::expr::Expr;
use crate::number::Number;
use crate::{Optionality, PluralRuleInfo, Rule};
use once_cell::sync::Lazy;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Anything that can answer plural-rule queries.
pub trait PluralRuleSource: Send + Sync {
    /// Rules whose identity matches `filter`.
    fn rules(&self, filter: &PluralRuleInfo) -> Vec<Arc<Rule>>;

    /// Matching cases for `number`, optional cases first.
    ///
    /// `filter` must name a culture and a category, leave the case unset and
    /// use `Optionality::Any`. `Ok(None)` means this source has no rule set
    /// for the filter, or no mandatory case matched.
    fn evaluate(&self, filter: &PluralRuleInfo, number: &Number) -> Result<Option<Matches>, PluralError>;
}

/// `key` applies to `filter` when every field the filter names is either
/// equal in `key` or left open by it.
fn covers(key: &PluralRuleInfo, filter: &PluralRuleInfo) -> bool {
    fn field(key: &Option<String>, wanted: &Option<String>) -> bool {
        match (key, wanted) {
            (Some(k), Some(w)) => k.eq_ignore_ascii_case(w),
            _ => true,
        }
    }
    field(&key.rule_set, &filter.rule_set)
        && field(&key.category, &filter.category)
        && field(&key.culture, &filter.culture)
}

/// Number of identity fields a rule-set key pins down.
fn specificity(key: &PluralRuleInfo) -> usize {
    [&key.rule_set, &key.category, &key.culture].into_iter().filter(|field| field.is_some()).count()
}

fn check_filter(filter: &PluralRuleInfo) -> Result<(), PluralError> {
    let reason = if filter.culture.is_none() {
        "culture is required"
    } else if filter.category.is_none() {
        "category is required"
    } else if filter.case.is_some() {
        "case must be unset"
    } else if filter.optional != Optionality::Any {
        "optionality must be Any"
    } else {
        return Ok(());
    };
    Err(PluralError::InvalidFilter { reason: reason.to_string() })
}

// --- RuleCollection ---------------------------------------------------------

/// Every rule of one source, compiled per `(rule set, culture, category)`.
#[derive(Debug)]
pub struct RuleCollection {
    name: String,
    rules: Vec<Arc<Rule>>,
    sets: Vec<CompiledRuleSet>,
}

impl RuleCollection {
    /// Group `rules` (keeping their order) and compile every group.
    pub fn new(name: impl Into<String>, rules: Vec<Rule>) -> Result<Self, PluralError> {
        let rules: Vec<Arc<Rule>> = rules.into_iter().map(Arc::new).collect();

        let mut groups: Vec<(PluralRuleInfo, Vec<Arc<Rule>>)> = Vec::new();
        for rule in &rules {
            let key = rule.info.set_key();
            match groups.iter_mut().find(|(k, _)| *k == key) {
                Some((_, members)) => members.push(Arc::clone(rule)),
                None => groups.push((key, vec![Arc::clone(rule)])),
            }
        }

        let sets =
            groups.into_iter().map(|(key, members)| CompiledRuleSet::new(key, members)).collect::<Result<_, _>>()?;

        Ok(RuleCollection { name: name.into(), rules, sets })
    }

    /// Parse rule text into a collection.
    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self, PluralError> {
        let rules = crate::parse_rules(text)?;
        Self::new(name, rules)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rule_sets(&self) -> &[CompiledRuleSet] {
        &self.sets
    }

    /// Compiled rule set for a filter, if any.
    ///
    /// When several sets cover the filter the most specific one wins, so an
    /// exact `(culture, category)` set beats one that leaves them open. Ties go
    /// to the set defined first.
    pub fn rule_set(&self, filter: &PluralRuleInfo) -> Option<&CompiledRuleSet> {
        self.sets
            .iter()
            .filter(|set| covers(set.key(), filter))
            .min_by_key(|set| Reverse(specificity(set.key())))
    }
}

impl PluralRuleSource for RuleCollection {
    fn rules(&self, filter: &PluralRuleInfo) -> Vec<Arc<Rule>> {
        self.rules.iter().filter(|rule| rule.info.matches(filter)).cloned().collect()
    }

    fn evaluate(&self, filter: &PluralRuleInfo, number: &Number) -> Result<Option<Matches>, PluralError> {
        check_filter(filter)?;
        match self.rule_set(filter) {
            Some(set) => Ok(set.evaluate(number)?),
            None => Ok(None),
        }
    }
}

// --- Resolver ---------------------------------------------------------------

pub type Resolved = Result<Arc<RuleCollection>, Arc<PluralError>>;

static GLOBAL: Lazy<Resolver> = Lazy::new(|| match Resolver::builtin() {
    Ok(resolver) => resolver,
    Err(err) => {
        tracing::error!(error = %err, "built-in rule tables failed to load");
        Resolver::new()
    }
});

/// Maps rule-set names to collections, with cached results.
#[derive(Debug, Default)]
pub struct Resolver {
    tables: HashMap<String, Arc<RuleCollection>>,
    cache: RwLock<HashMap<String, Resolved>>,
    expressions: RwLock<HashMap<String, Result<Arc<Expr>, ParseError>>>,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// A resolver holding the built-in CLDR tables.
    pub fn builtin() -> Result<Self, PluralError> {
        let mut resolver = Self::new();
        for (name, text) in crate::rules::builtin_tables() {
            resolver.register(RuleCollection::parse(name, &text)?);
        }
        Ok(resolver)
    }

    /// Process-wide resolver over the built-in tables, built on first use and
    /// never torn down.
    pub fn global() -> &'static Resolver {
        &GLOBAL
    }

    /// Register a table under its name, replacing any table of that name.
    pub fn register(&mut self, collection: RuleCollection) {
        let name = collection.name().to_string();
        if let Ok(cache) = self.cache.get_mut() {
            cache.remove(&name);
        }
        self.tables.insert(name, Arc::new(collection));
    }

    pub fn with_table(mut self, collection: RuleCollection) -> Self {
        self.register(collection);
        self
    }

    pub fn table_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Resolve a registered table name, or parse `name` as rule text.
    ///
    /// Failures are cached like successes; a repeated failing lookup returns
    /// the same error without recomputing.
    pub fn resolve(&self, name: &str) -> Resolved {
        if let Some(hit) = self.cache.read().ok().and_then(|cache| cache.get(name).cloned()) {
            return hit;
        }

        tracing::debug!(name, "resolver cache miss");
        let computed = self.compute(name);
        if let Err(err) = &computed {
            tracing::debug!(name, error = %err, "rule set resolution failed");
        }

        match self.cache.write() {
            Ok(mut cache) => cache.entry(name.to_string()).or_insert(computed).clone(),
            Err(_) => computed,
        }
    }

    fn compute(&self, name: &str) -> Resolved {
        if let Some(table) = self.tables.get(name) {
            return Ok(Arc::clone(table));
        }
        if regex!(r"^\s*[A-Za-z_][A-Za-z0-9_.\-]*\s*$").is_match(name) {
            return Err(Arc::new(PluralError::RuleSetNotFound { name: name.to_string() }));
        }
        RuleCollection::parse(name, name).map(Arc::new).map_err(Arc::new)
    }

    /// Parse a single boolean expression, cached by its text.
    pub fn expression(&self, text: &str) -> Result<Arc<Expr>, ParseError> {
        if let Some(hit) = self.expressions.read().ok().and_then(|cache| cache.get(text).cloned()) {
            return hit;
        }
        let computed = parse_expression(text).map(Arc::new);
        match self.expressions.write() {
            Ok(mut cache) => cache.entry(text.to_string()).or_insert(computed).clone(),
            Err(_) => computed,
        }
    }

    /// Number of cached name lookups.
    pub fn cached(&self) -> usize {
        self.cache.read().map(|cache| cache.len()).unwrap_or(0)
    }
}

// --- PluralScope ------------------------------------------------------------

/// A stack of rule sources searched most-recently-pushed first.
#[derive(Default, Clone)]
pub struct PluralScope {
    sources: Vec<Arc<dyn PluralRuleSource>>,
}

impl std::fmt::Debug for PluralScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluralScope").field("sources", &self.sources.len()).finish()
    }
}

impl PluralScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, source: Arc<dyn PluralRuleSource>) {
        self.sources.push(source);
    }

    pub fn pop(&mut self) -> Option<Arc<dyn PluralRuleSource>> {
        self.sources.pop()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl PluralRuleSource for PluralScope {
    fn rules(&self, filter: &PluralRuleInfo) -> Vec<Arc<Rule>> {
        self.sources.iter().rev().map(|source| source.rules(filter)).find(|rules| !rules.is_empty()).unwrap_or_default()
    }

    fn evaluate(&self, filter: &PluralRuleInfo, number: &Number) -> Result<Option<Matches>, PluralError> {
        check_filter(filter)?;
        for source in self.sources.iter().rev() {
            if let Some(matches) = source.evaluate(filter, number)? {
                return Ok(Some(matches));
            }
        }
        Ok(None)
    }
}
