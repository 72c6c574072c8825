pub mod extractor;
pub mod models;

pub use extractor::{ExtractError, TokenExtractor};
pub use models::{
    token_name, ColorToken, DimensionToken, ShadowToken, TokenCategory, TokenSet, TokenValue,
    TypographyToken,
};
