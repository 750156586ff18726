//! Telegram front end of Ziptos
//!
//! # Architecture
//!
//! ```text
//! telegram/
//! ├── mod.rs           # This file
//! ├── bot.rs           # getMe, command menu, dispatcher
//! ├── messaging.rs     # Send / edit-or-replace helpers
//! │
//! ├── actions.rs       # Typed callback data
//! ├── keyboards.rs     # Inline keyboards
//! ├── formatters.rs    # HTML message bodies
//! ├── validation.rs    # Wizard input checks
//! ├── session.rs       # Per-chat conversation store
//! ├── wizards/         # Step-counter forms (token, liquidity, burn)
//! │
//! └── commands/        # Handlers
//!     ├── mod.rs       # Command enum, Page context, /command router
//!     ├── callbacks.rs # Button router
//!     ├── conversation.rs # Wizard replies, confirm and cancel
//!     ├── menu.rs      # Dashboard, help, FAQ, support
//!     ├── wallet.rs    # Wallet and secret key
//!     ├── tokens.rs    # Token list, detail, create, revoke, burn
//!     └── liquidity.rs # Pools
//! ```

pub mod actions;
pub mod bot;
pub mod commands;
pub mod formatters;
pub mod keyboards;
pub mod messaging;
pub mod session;
pub mod validation;
pub mod wizards;

pub use actions::CallbackAction;
pub use bot::run_bot;
pub use session::SessionStore;
