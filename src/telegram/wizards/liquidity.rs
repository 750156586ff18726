//! Pool funding form: token amount, then SOL amount

use super::{Step, WizardInput};
use crate::solana::amounts::SOL_DECIMALS;
use crate::telegram::validation::{validate_amount, INVALID_INPUT};

/// A pool the user has described but not yet confirmed
#[derive(Debug, Clone, PartialEq)]
pub struct LiquidityDraft {
    pub token_index: usize,
    pub mint_address: String,
    pub token_amount: String,
    pub sol_amount: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiquidityWizard {
    token_index: usize,
    mint_address: String,
    symbol: String,
    decimals: u8,
    token_amount: Option<String>,
}

impl LiquidityWizard {
    pub fn new(token_index: usize, mint_address: String, symbol: String, decimals: u8) -> Self {
        Self {
            token_index,
            mint_address,
            symbol,
            decimals,
            token_amount: None,
        }
    }

    pub fn first_prompt(&self) -> String {
        format!("1. Amount of {} to deposit:", self.symbol)
    }

    pub fn advance(&mut self, input: WizardInput<'_>) -> Step<LiquidityDraft> {
        let WizardInput::Text(text) = input else {
            return Step::Retry(INVALID_INPUT.to_string());
        };

        match &self.token_amount {
            None => match validate_amount(text, self.decimals, "token") {
                Ok(amount) => {
                    self.token_amount = Some(amount);
                    Step::Prompt("2. Amount of SOL to deposit:".to_string())
                }
                Err(message) => Step::Retry(message),
            },
            Some(token_amount) => match validate_amount(text, SOL_DECIMALS, "SOL") {
                Ok(sol_amount) => Step::Done(LiquidityDraft {
                    token_index: self.token_index,
                    mint_address: self.mint_address.clone(),
                    token_amount: token_amount.clone(),
                    sol_amount,
                }),
                Err(message) => Step::Retry(message),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_liquidity_flow() {
        let mut wizard = LiquidityWizard::new(1, "Mint1".into(), "MN".into(), 2);
        assert_eq!(wizard.first_prompt(), "1. Amount of MN to deposit:");

        assert!(matches!(
            wizard.advance(WizardInput::Text("1.234")),
            Step::Retry(_)
        ));
        assert!(matches!(
            wizard.advance(WizardInput::Text("500.5")),
            Step::Prompt(_)
        ));
        assert!(matches!(
            wizard.advance(WizardInput::Text("-1")),
            Step::Retry(_)
        ));

        assert_eq!(
            wizard.advance(WizardInput::Text(" 0.25 ")),
            Step::Done(LiquidityDraft {
                token_index: 1,
                mint_address: "Mint1".into(),
                token_amount: "500.5".into(),
                sol_amount: "0.25".into(),
            })
        );
    }

    #[test]
    fn test_photo_rejected() {
        let mut wizard = LiquidityWizard::new(0, "Mint1".into(), "MN".into(), 2);
        assert_eq!(
            wizard.advance(WizardInput::Photo(&[])),
            Step::Retry(INVALID_INPUT.into())
        );
    }
}
