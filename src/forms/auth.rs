use serde::Deserialize;

/// Address a sign-in link should be sent to.
#[derive(Debug, Default, Deserialize)]
pub struct SignInForm {
    #[serde(default)]
    pub email: String,
}
