//! Step-counter forms driven by chat replies
//!
//! A wizard receives one message at a time and answers with a `Step`:
//! the next prompt, a 🟡 retry message for the same step, or the finished
//! draft.

pub mod burn;
pub mod liquidity;
pub mod token;

pub use burn::{BurnDraft, BurnWizard};
pub use liquidity::{LiquidityDraft, LiquidityWizard};
pub use token::{TokenDraft, TokenWizard};

use crate::upload::PhotoRef;

/// One user message as a wizard sees it
#[derive(Debug, Clone, Copy)]
pub enum WizardInput<'a> {
    Text(&'a str),
    Photo(&'a [PhotoRef]),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Step<T> {
    /// Input accepted, ask the next question
    Prompt(String),
    /// Input rejected, same question again
    Retry(String),
    Done(T),
}
