pub mod token;

pub use token::{Claims, JwtIssuerConfig, JwtTokenIssuer, TokenType};
