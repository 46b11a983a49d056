//! Runtime translation lookup.
//!
//! Given a context name and a source string, answer the finished translation,
//! or the source string itself when there is none.

mod chain;
pub mod plural;
mod translator;

pub use chain::TranslatorChain;
pub use plural::PluralRule;
pub use translator::Translator;
