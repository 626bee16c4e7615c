pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    email::{Email, EmailError},
    password::{Password, PasswordError},
    person_name::{NameError, PersonName},
    token::{TokenIdentity, TokenPair},
    user::{NewUser, ProfileChanges, User},
};

pub use ports::{
    repositories::{RevokedTokenStore, RevokedTokenStoreError, UserStore, UserStoreError},
    services::{TokenIssuer, TokenIssuerError},
};
