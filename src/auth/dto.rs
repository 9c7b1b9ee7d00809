use serde::Deserialize;

/// Signup body as sent by the mobile client. Missing fields become empty
/// strings; nothing here is validated.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
}

/// Login body. `identifier` is either an email or a rider name.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    Email(String),
    Name(String),
}

impl Identifier {
    /// Anything containing `@` is looked up as an email. The value is trimmed.
    pub fn parse(raw: &str) -> Self {
        let value = raw.trim().to_owned();
        if raw.contains('@') {
            Identifier::Email(value)
        } else {
            Identifier::Name(value)
        }
    }
}

/// Credentials pulled out of a `LoginRequest`.
#[derive(Debug)]
pub struct Credentials {
    pub identifier: Identifier,
    pub password: String,
}

impl LoginRequest {
    /// `None` when either field is absent or blank after trimming. The password
    /// itself is kept verbatim.
    pub fn credentials(self) -> Option<Credentials> {
        let identifier = self.identifier.filter(|v| !v.trim().is_empty())?;
        let password = self.password.filter(|v| !v.trim().is_empty())?;
        Some(Credentials {
            identifier: Identifier::parse(&identifier),
            password,
        })
    }
}
