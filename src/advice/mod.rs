//! Savings advice from an external text-generation collaborator.
//!
//! The collaborator is strictly one-way: it reads the current goals and
//! monthly contribution and returns free text. [`AdviceService`] absorbs every
//! failure into a fixed fallback message, so callers never see an error.

pub mod gemini;

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    currency::AmountFormat,
    wishlist::{Goal, Priority},
};

pub use gemini::{GeminiConfig, GeminiProvider};

/// Returned when the collaborator answers with no text.
pub const EMPTY_RESPONSE_FALLBACK: &str = "Could not get advice right now. Please try again later!";
/// Returned when the collaborator could not be reached or failed.
pub const FAILURE_FALLBACK: &str =
    "Sorry, something went wrong while contacting the savings assistant.";

#[derive(Debug, Error)]
pub enum AdviceError {
    #[error("missing API credential ({0} is not set)")]
    MissingCredential(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdviceGoal {
    pub name: String,
    pub target: u64,
    pub saved: u64,
    pub priority: Priority,
}

impl From<&Goal> for AdviceGoal {
    fn from(goal: &Goal) -> Self {
        Self {
            name: goal.name.clone(),
            target: goal.target,
            saved: goal.saved,
            priority: goal.priority,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdviceRequest {
    pub goals: Vec<AdviceGoal>,
    pub monthly_contribution: u64,
    pub language: String,
}

impl AdviceRequest {
    pub fn new(goals: &[Goal], monthly_contribution: u64, language: impl Into<String>) -> Self {
        Self {
            goals: goals.iter().map(AdviceGoal::from).collect(),
            monthly_contribution,
            language: language.into(),
        }
    }

    pub fn total_target(&self) -> u64 {
        self.goals
            .iter()
            .fold(0u64, |sum, goal| sum.saturating_add(goal.target))
    }

    pub fn total_saved(&self) -> u64 {
        self.goals
            .iter()
            .fold(0u64, |sum, goal| sum.saturating_add(goal.saved))
    }

    pub fn remaining(&self) -> u64 {
        self.total_target().saturating_sub(self.total_saved())
    }
}

/// Months of contributions needed to cover `remaining`; `None` without a contribution.
pub fn months_to_goal(remaining: u64, monthly: u64) -> Option<u64> {
    if monthly == 0 {
        return None;
    }
    Some(remaining.div_ceil(monthly))
}

pub fn build_prompt(request: &AdviceRequest, format: &AmountFormat) -> String {
    let items = request
        .goals
        .iter()
        .map(|goal| {
            format!(
                "{} (Price: {}, Saved: {}, Priority: {})",
                goal.name,
                format.format(goal.target),
                format.format(goal.saved),
                goal.priority
            )
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "I am saving for the following wishlist items: {items}.\n\
         My total goal is {total} and I have saved {saved} so far.\n\
         Remaining amount needed: {remaining}.\n\
         My monthly saving capacity is {monthly}.\n\
         \n\
         Please provide a brief, encouraging financial strategy in {language}.\n\
         Include:\n\
         1. Which item to prioritize based on the priority level.\n\
         2. How many months it will take to reach the total goal.\n\
         3. Three specific tips to save faster.\n\
         \n\
         Keep the tone friendly and motivational.",
        total = format.format(request.total_target()),
        saved = format.format(request.total_saved()),
        remaining = format.format(request.remaining()),
        monthly = format.format(request.monthly_contribution),
        language = request.language,
    )
}

/// Text generation backend.
pub trait AdviceProvider {
    fn name(&self) -> &'static str;

    fn generate(&self, prompt: &str) -> Result<String, AdviceError>;
}

pub struct AdviceService {
    provider: Box<dyn AdviceProvider>,
    format: AmountFormat,
}

impl AdviceService {
    pub fn new(provider: Box<dyn AdviceProvider>, format: AmountFormat) -> Self {
        Self { provider, format }
    }

    /// Always returns displayable text; failures become fallback messages.
    pub fn advise(&self, request: &AdviceRequest) -> String {
        let prompt = build_prompt(request, &self.format);
        match self.provider.generate(&prompt) {
            Ok(text) if !text.trim().is_empty() => {
                info!(provider = self.provider.name(), "advice received");
                text.trim().to_string()
            }
            Ok(_) => {
                warn!(provider = self.provider.name(), "advice provider returned no text");
                EMPTY_RESPONSE_FALLBACK.to_string()
            }
            Err(err) => {
                warn!(provider = self.provider.name(), "advice request failed: {err}");
                FAILURE_FALLBACK.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    struct ScriptedProvider {
        reply: Result<String, String>,
        prompts: Rc<RefCell<Vec<String>>>,
    }

    fn scripted(reply: Result<&str, &str>) -> (ScriptedProvider, Rc<RefCell<Vec<String>>>) {
        let prompts = Rc::new(RefCell::new(Vec::new()));
        let provider = ScriptedProvider {
            reply: reply.map(str::to_string).map_err(str::to_string),
            prompts: Rc::clone(&prompts),
        };
        (provider, prompts)
    }

    impl AdviceProvider for ScriptedProvider {
        fn name(&self) -> &'static str {
            "scripted"
        }

        fn generate(&self, prompt: &str) -> Result<String, AdviceError> {
            self.prompts.borrow_mut().push(prompt.to_string());
            self.reply.clone().map_err(AdviceError::Network)
        }
    }

    fn request() -> AdviceRequest {
        let mut laptop = Goal::new("Laptop", 12_000_000, "Electronics", Priority::High);
        laptop.saved = 2_000_000;
        let shoes = Goal::new("Shoes", 800_000, "Shopping", Priority::Low);
        AdviceRequest::new(&[laptop, shoes], 1_500_000, "English")
    }

    #[test]
    fn prompt_lists_goals_and_totals() {
        let prompt = build_prompt(&request(), &AmountFormat::default());
        insta::assert_snapshot!(prompt, @r"
        I am saving for the following wishlist items: Laptop (Price: Rp 12.000.000, Saved: Rp 2.000.000, Priority: High), Shoes (Price: Rp 800.000, Saved: Rp 0, Priority: Low).
        My total goal is Rp 12.800.000 and I have saved Rp 2.000.000 so far.
        Remaining amount needed: Rp 10.800.000.
        My monthly saving capacity is Rp 1.500.000.

        Please provide a brief, encouraging financial strategy in English.
        Include:
        1. Which item to prioritize based on the priority level.
        2. How many months it will take to reach the total goal.
        3. Three specific tips to save faster.

        Keep the tone friendly and motivational.
        ");
    }

    #[test]
    fn failures_become_fallback_text() {
        let (provider, prompts) = scripted(Err("connection refused"));
        let service = AdviceService::new(Box::new(provider), AmountFormat::default());
        assert_eq!(service.advise(&request()), FAILURE_FALLBACK);
        assert_eq!(prompts.borrow().len(), 1);
    }

    #[test]
    fn blank_reply_uses_empty_fallback() {
        let (provider, _) = scripted(Ok("   \n"));
        let service = AdviceService::new(Box::new(provider), AmountFormat::default());
        assert_eq!(service.advise(&request()), EMPTY_RESPONSE_FALLBACK);
    }

    #[test]
    fn successful_reply_is_trimmed() {
        let (provider, _) = scripted(Ok("  Focus on the laptop first.\n"));
        let service = AdviceService::new(Box::new(provider), AmountFormat::default());
        assert_eq!(service.advise(&request()), "Focus on the laptop first.");
    }

    #[test]
    fn months_round_up() {
        assert_eq!(months_to_goal(10_800_000, 1_500_000), Some(8));
        assert_eq!(months_to_goal(3_000, 1_000), Some(3));
        assert_eq!(months_to_goal(0, 1_000), Some(0));
        assert_eq!(months_to_goal(1_000, 0), None);
    }
}
