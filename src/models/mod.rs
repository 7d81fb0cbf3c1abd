pub mod user;

pub use user::{CredentialsForm, User};
