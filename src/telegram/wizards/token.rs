//! Token creation form: name, symbol, decimals, supply, description, logo

use super::{Step, WizardInput};
use crate::telegram::validation::{
    validate_decimals, validate_supply, validate_symbol, validate_token_name, INVALID_INPUT,
};
use crate::upload::PhotoRef;

const PROMPTS: [&str; 6] = [
    "1. Token Name:",
    "2. Token Symbol:",
    "3. Token Decimals as a number:",
    "4. Total Supply as a number:",
    "5. Token Description:",
    "6. Upload token logo image:",
];

/// Everything needed to upload assets and create the mint
#[derive(Debug, Clone, PartialEq)]
pub struct TokenDraft {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub supply: u64,
    pub description: String,
    pub photos: Vec<PhotoRef>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenWizard {
    step: usize,
    name: String,
    symbol: String,
    decimals: u8,
    supply: u64,
    description: String,
}

impl TokenWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first_prompt() -> &'static str {
        PROMPTS[0]
    }

    /// Zero-based index of the question being answered
    pub fn step(&self) -> usize {
        self.step
    }

    pub fn advance(&mut self, input: WizardInput<'_>) -> Step<TokenDraft> {
        let result = match (self.step, input) {
            (5, WizardInput::Photo(photos)) if !photos.is_empty() => {
                return Step::Done(TokenDraft {
                    name: self.name.clone(),
                    symbol: self.symbol.clone(),
                    decimals: self.decimals,
                    supply: self.supply,
                    description: self.description.clone(),
                    photos: photos.to_vec(),
                });
            }
            (0, WizardInput::Text(text)) => validate_token_name(text).map(|v| self.name = v),
            (1, WizardInput::Text(text)) => validate_symbol(text).map(|v| self.symbol = v),
            (2, WizardInput::Text(text)) => validate_decimals(text).map(|v| self.decimals = v),
            (3, WizardInput::Text(text)) => {
                validate_supply(text, self.decimals).map(|v| self.supply = v)
            }
            (4, WizardInput::Text(text)) => {
                self.description = text.trim().to_string();
                Ok(())
            }
            _ => Err(INVALID_INPUT.to_string()),
        };

        match result {
            Ok(()) => {
                self.step += 1;
                Step::Prompt(PROMPTS[self.step].to_string())
            }
            Err(message) => Step::Retry(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telegram::validation::{INVALID_NAME, INVALID_SUPPLY};

    fn photo() -> Vec<PhotoRef> {
        vec![PhotoRef {
            file_id: "file-1".into(),
            width: 320,
            height: 320,
        }]
    }

    #[test]
    fn test_full_flow() {
        let mut wizard = TokenWizard::new();
        assert_eq!(
            wizard.advance(WizardInput::Text("Moon Coin")),
            Step::Prompt("2. Token Symbol:".into())
        );
        wizard.advance(WizardInput::Text("mn"));
        wizard.advance(WizardInput::Text("6"));
        wizard.advance(WizardInput::Text("1000"));
        assert_eq!(
            wizard.advance(WizardInput::Text("A coin")),
            Step::Prompt("6. Upload token logo image:".into())
        );

        let photos = photo();
        match wizard.advance(WizardInput::Photo(&photos)) {
            Step::Done(draft) => {
                assert_eq!(draft.name, "Moon Coin");
                assert_eq!(draft.symbol, "MN");
                assert_eq!(draft.decimals, 6);
                assert_eq!(draft.supply, 1000);
                assert_eq!(draft.description, "A coin");
                assert_eq!(draft.photos, photos);
            }
            other => panic!("expected Done, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_input_keeps_step() {
        let mut wizard = TokenWizard::new();
        assert_eq!(
            wizard.advance(WizardInput::Text("1bad")),
            Step::Retry(INVALID_NAME.into())
        );
        assert_eq!(wizard.step(), 0);

        wizard.advance(WizardInput::Text("Moon"));
        wizard.advance(WizardInput::Text("MN"));
        wizard.advance(WizardInput::Text("2"));
        assert_eq!(
            wizard.advance(WizardInput::Text("0")),
            Step::Retry(INVALID_SUPPLY.into())
        );
        assert_eq!(wizard.step(), 3);
    }

    #[test]
    fn test_text_instead_of_logo() {
        let mut wizard = TokenWizard::new();
        for text in ["Moon", "MN", "2", "10", "desc"] {
            wizard.advance(WizardInput::Text(text));
        }
        assert_eq!(
            wizard.advance(WizardInput::Text("no picture")),
            Step::Retry(INVALID_INPUT.into())
        );
        assert_eq!(wizard.step(), 5);
    }

    #[test]
    fn test_photo_too_early() {
        let mut wizard = TokenWizard::new();
        let photos = photo();
        assert_eq!(
            wizard.advance(WizardInput::Photo(&photos)),
            Step::Retry(INVALID_INPUT.into())
        );
        assert_eq!(wizard.step(), 0);
    }
}
