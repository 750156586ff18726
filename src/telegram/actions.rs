//! Typed callback data
//!
//! Every inline button carries one of these actions, serialized as
//! colon-separated segments (`token:view:3`). Parsing is exact: a string
//! that is not produced by `data()` parses to `None`.

use crate::database::AuthorityKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    Dashboard,
    RefreshBalance,
    Faq,
    Support,
    Help,

    Wallet,
    SecretKey,

    Tokens,
    CreateToken,
    TokenDetail(usize),
    ToggleAuthority(usize, AuthorityKind),
    BurnToken(usize),
    RevokeByAddress(AuthorityKind),

    Liquidities,
    PickLiquidityToken,
    AddLiquidity(usize),
    LiquidityDetail(usize),

    ConfirmRevoke(usize, AuthorityKind),
    CancelRevoke(usize),

    /// Execute the reviewed liquidity / burn request
    ConfirmPending,
    /// Abandon the active conversation
    CancelWizard,

    Noop,
}

impl CallbackAction {
    pub fn parse(data: &str) -> Option<Self> {
        let parts: Vec<&str> = data.split(':').collect();

        let action = match parts.as_slice() {
            ["menu", "dashboard"] => CallbackAction::Dashboard,
            ["menu", "refresh"] => CallbackAction::RefreshBalance,
            ["menu", "faq"] => CallbackAction::Faq,
            ["menu", "support"] => CallbackAction::Support,
            ["menu", "help"] => CallbackAction::Help,

            ["wallet", "show"] => CallbackAction::Wallet,
            ["wallet", "secret"] => CallbackAction::SecretKey,

            ["token", "list"] => CallbackAction::Tokens,
            ["token", "create"] => CallbackAction::CreateToken,
            ["token", "view", index] => CallbackAction::TokenDetail(index.parse().ok()?),
            ["token", "toggle", kind, index] => {
                CallbackAction::ToggleAuthority(index.parse().ok()?, AuthorityKind::parse(kind)?)
            }
            ["token", "burn", index] => CallbackAction::BurnToken(index.parse().ok()?),
            ["token", "revoke", kind] => CallbackAction::RevokeByAddress(AuthorityKind::parse(kind)?),

            ["lp", "list"] => CallbackAction::Liquidities,
            ["lp", "pick"] => CallbackAction::PickLiquidityToken,
            ["lp", "add", index] => CallbackAction::AddLiquidity(index.parse().ok()?),
            ["lp", "view", index] => CallbackAction::LiquidityDetail(index.parse().ok()?),

            ["confirm", "revoke", kind, index] => {
                CallbackAction::ConfirmRevoke(index.parse().ok()?, AuthorityKind::parse(kind)?)
            }
            ["cancel", "revoke", index] => CallbackAction::CancelRevoke(index.parse().ok()?),

            ["wizard", "confirm"] => CallbackAction::ConfirmPending,
            ["wizard", "cancel"] => CallbackAction::CancelWizard,

            ["noop"] => CallbackAction::Noop,
            _ => return None,
        };

        Some(action)
    }

    pub fn data(&self) -> String {
        match self {
            CallbackAction::Dashboard => "menu:dashboard".to_string(),
            CallbackAction::RefreshBalance => "menu:refresh".to_string(),
            CallbackAction::Faq => "menu:faq".to_string(),
            CallbackAction::Support => "menu:support".to_string(),
            CallbackAction::Help => "menu:help".to_string(),

            CallbackAction::Wallet => "wallet:show".to_string(),
            CallbackAction::SecretKey => "wallet:secret".to_string(),

            CallbackAction::Tokens => "token:list".to_string(),
            CallbackAction::CreateToken => "token:create".to_string(),
            CallbackAction::TokenDetail(i) => format!("token:view:{}", i),
            CallbackAction::ToggleAuthority(i, kind) => {
                format!("token:toggle:{}:{}", kind.as_str(), i)
            }
            CallbackAction::BurnToken(i) => format!("token:burn:{}", i),
            CallbackAction::RevokeByAddress(kind) => format!("token:revoke:{}", kind.as_str()),

            CallbackAction::Liquidities => "lp:list".to_string(),
            CallbackAction::PickLiquidityToken => "lp:pick".to_string(),
            CallbackAction::AddLiquidity(i) => format!("lp:add:{}", i),
            CallbackAction::LiquidityDetail(i) => format!("lp:view:{}", i),

            CallbackAction::ConfirmRevoke(i, kind) => {
                format!("confirm:revoke:{}:{}", kind.as_str(), i)
            }
            CallbackAction::CancelRevoke(i) => format!("cancel:revoke:{}", i),

            CallbackAction::ConfirmPending => "wizard:confirm".to_string(),
            CallbackAction::CancelWizard => "wizard:cancel".to_string(),

            CallbackAction::Noop => "noop".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_indexed_actions() {
        assert_eq!(
            CallbackAction::parse("token:view:3"),
            Some(CallbackAction::TokenDetail(3))
        );
        assert_eq!(
            CallbackAction::parse("token:toggle:freeze:0"),
            Some(CallbackAction::ToggleAuthority(0, AuthorityKind::Freeze))
        );
        assert_eq!(
            CallbackAction::parse("confirm:revoke:mint:12"),
            Some(CallbackAction::ConfirmRevoke(12, AuthorityKind::Mint))
        );
    }

    #[test]
    fn test_no_prefix_collisions() {
        assert_eq!(CallbackAction::parse("token:list"), Some(CallbackAction::Tokens));
        assert_eq!(CallbackAction::parse("token"), None);
        assert_eq!(CallbackAction::parse("token_1"), None);
        assert_eq!(CallbackAction::parse("token:view:x"), None);
        assert_eq!(CallbackAction::parse("token:view:1:extra"), None);
        assert_eq!(CallbackAction::parse("token:toggle:owner:1"), None);
    }

    #[test]
    fn test_data_is_parseable() {
        let actions = [
            CallbackAction::RefreshBalance,
            CallbackAction::ToggleAuthority(7, AuthorityKind::Mint),
            CallbackAction::RevokeByAddress(AuthorityKind::Freeze),
            CallbackAction::CancelRevoke(2),
            CallbackAction::LiquidityDetail(4),
            CallbackAction::CancelWizard,
        ];
        for action in actions {
            assert_eq!(CallbackAction::parse(&action.data()), Some(action));
        }
    }
}
