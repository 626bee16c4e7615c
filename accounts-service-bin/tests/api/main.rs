
mod login;
mod profile;
mod signup;
