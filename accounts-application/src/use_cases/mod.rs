pub mod admin;
pub mod change_password;
pub mod login;
pub mod logout;
pub mod profile;
pub mod signup;

#[cfg(test)]
pub(crate) mod test_support;
