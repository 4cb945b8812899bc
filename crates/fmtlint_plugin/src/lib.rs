//! # fmtlint_plugin
//!
//! Rule API for fmtlint.
//!
//! This crate provides:
//! - Diagnostic and fix types reported by rules
//! - The [`Rule`] trait and its metadata
//! - The per-file [`RuleContext`] rules report through
//! - Message template interpolation
//!
//! ## Example
//!
//! ```rust
//! use fmtlint_plugin::{Fix, Report, Rule, RuleContext, RuleMeta, RuleType, Severity};
//! use fmtlint_ast::Span;
//!
//! struct NoTabs {
//!     meta: RuleMeta,
//! }
//!
//! impl Rule for NoTabs {
//!     fn meta(&self) -> &RuleMeta {
//!         &self.meta
//!     }
//!
//!     fn check(&self, ctx: &mut RuleContext<'_>) {
//!         let tabs: Vec<usize> = ctx.source().match_indices('\t').map(|(i, _)| i).collect();
//!         for offset in tabs {
//!             let span = Span::new(offset as u32, offset as u32 + 1);
//!             ctx.report(Report::message("Unexpected tab").span(span).fix(Fix::new(span, "  ")));
//!         }
//!     }
//! }
//!
//! let rule = NoTabs { meta: RuleMeta::new("no-tabs", RuleType::Layout) };
//! let mut ctx = RuleContext::new("no-tabs", rule.meta(), "a.js", "\tx", &[], Severity::Error);
//! rule.check(&mut ctx);
//!
//! assert_eq!(ctx.into_diagnostics().len(), 1);
//! ```

mod context;
mod diagnostic;
mod error;
mod message;
mod rule;

pub use context::{Report, ReportMessage, RuleContext};
pub use diagnostic::{Diagnostic, Fix, Severity};
pub use error::PluginError;
pub use message::{interpolate, show_invisibles};
pub use rule::{Fixable, Rule, RuleDocs, RuleMeta, RuleType};
