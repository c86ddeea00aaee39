//! Rule parsing and evaluation engine.
//!
//! The engine is split into focused submodules under `src/engine/`, re-exported
//! here so callers use stable paths such as `crate::engine::Resolver`.
//!
//! ## How the parts work together
//!
//! ```text
//! rule text ── tokenize ──▶ Vec<Token>               (tokenizer.rs)
//!                              │
//!                              v
//!                    TokenInput::take_rules           (parser.rs)
//!                      - explicit positions, no partial consumption
//!                              │
//!                              v
//!                   Vec<RuleExpr> ──▶ Rule::from_expr (lib.rs)
//!                              │
//!                              v
//!                    RuleCollection::new              (resolve.rs)
//!                      - group by (rule set, culture, category)
//!                      - CompiledRuleSet per group    (compiled_rules.rs)
//!                              │
//! number ──────────────────────┼── Evaluator          (evaluator.rs)
//!                              v
//!                    Matches: optional cases, then the mandatory case
//! ```
//!
//! Everything above the resolver is a pure function of its input. The only
//! shared mutable state is the resolver's caches.
//!
//! ## Responsibilities by module
//!
//! - `tokenizer.rs`: splits rule text into tokens, keeping whitespace and
//!   comments as non-essential tokens so offsets stay exact.
//! - `parser.rs`: `take_*` combinators building the expression tree.
//! - `evaluator.rs`: boolean and numeric evaluation of an `Expr` for one
//!   number.
//! - `compiled_rules.rs`: the optional-case permutation table.
//! - `resolve.rs`: rule collections, the caching `Resolver`, and
//!   `PluralScope` for call-site overrides.
//! - `metrics.rs`: timed selection runs for the verbose API and the CLI.
//!
//! ## Debugging
//!
//! The engine emits `tracing` events (`debug` for cache misses, compilation
//! and resolution failures, `trace` for every evaluation). The CLI installs
//! a subscriber when `--debug` is passed or `PLURALITY_DEBUG` is set.

#[path = "engine/compiled_rules.rs"]
mod compiled_rules;
#[path = "engine/evaluator.rs"]
mod evaluator;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/parser.rs"]
mod parser;
#[path = "engine/resolve.rs"]
mod resolve;
#[path = "engine/tokenizer.rs"]
mod tokenizer;

pub use compiled_rules::{CompiledRuleSet, MAX_OPTIONAL_CASES, Matches};
pub use evaluator::Evaluator;
pub use metrics::{SelectionMetrics, SelectionRun};
pub use parser::{Reader, Take, TokenInput, parse_expression, parse_rule_text};
pub use resolve::{PluralRuleSource, PluralScope, Resolved, Resolver, RuleCollection};
pub use tokenizer::{Token, TokenKind, tokenize};
