pub mod header;
pub mod reference;
pub mod theme;
pub mod token;
pub mod tree;
pub mod value;

pub use header::{CommentStyle, FileHeader};
pub use theme::{ThemeEntry, TokenSetState};
pub use token::{OriginalValue, Token, TokenType};
pub use tree::{RawToken, TokenNode, TokenTree};
pub use value::TokenValue;

/// Vendor key under which tokensmith stores its metadata in a token's
/// `$extensions` bag (`originalType`, `originalFontWeight`).
pub const VENDOR_EXTENSION: &str = "tokensmith";
