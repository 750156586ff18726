//! Burn form: a single amount

use super::{Step, WizardInput};
use crate::telegram::validation::{validate_amount, INVALID_INPUT};

#[derive(Debug, Clone, PartialEq)]
pub struct BurnDraft {
    pub token_index: usize,
    pub mint_address: String,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BurnWizard {
    token_index: usize,
    mint_address: String,
    symbol: String,
    decimals: u8,
}

impl BurnWizard {
    pub fn new(token_index: usize, mint_address: String, symbol: String, decimals: u8) -> Self {
        Self {
            token_index,
            mint_address,
            symbol,
            decimals,
        }
    }

    pub fn first_prompt(&self) -> String {
        format!("Amount of {} to burn:", self.symbol)
    }

    pub fn advance(&mut self, input: WizardInput<'_>) -> Step<BurnDraft> {
        let WizardInput::Text(text) = input else {
            return Step::Retry(INVALID_INPUT.to_string());
        };

        match validate_amount(text, self.decimals, "burn") {
            Ok(amount) => Step::Done(BurnDraft {
                token_index: self.token_index,
                mint_address: self.mint_address.clone(),
                amount,
            }),
            Err(message) => Step::Retry(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burn_amount() {
        let mut wizard = BurnWizard::new(3, "Mint3".into(), "MN".into(), 0);
        assert!(matches!(wizard.advance(WizardInput::Text("1.5")), Step::Retry(_)));
        assert!(matches!(wizard.advance(WizardInput::Text("0")), Step::Retry(_)));
        assert_eq!(
            wizard.advance(WizardInput::Text("42")),
            Step::Done(BurnDraft {
                token_index: 3,
                mint_address: "Mint3".into(),
                amount: "42".into(),
            })
        );
    }
}
