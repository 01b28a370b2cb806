use thiserror::Error;

/// Error returned when a raw service name fails validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentError {
    #[error("service name must not be empty")]
    Empty,

    #[error(
        "invalid service name '{0}': must start with a letter and contain only letters and digits"
    )]
    Invalid(String),
}

/// All name variants derived from a raw service name.
///
/// Derived once per invocation and passed around immutably. The same
/// lowercase fold is used for both file base names and history keys, so
/// lookup and deletion always agree with generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceIdent {
    raw: String,
    service: String,
    receiver: String,
    var_name: String,
    lower: String,
}

impl ServiceIdent {
    /// Parse and validate a raw service name.
    ///
    /// The name must start with an ASCII letter and contain only ASCII
    /// letters and digits.
    pub fn parse(raw: &str) -> Result<Self, IdentError> {
        let mut chars = raw.chars();
        let first = chars.next().ok_or(IdentError::Empty)?;
        if !first.is_ascii_alphabetic() {
            return Err(IdentError::Invalid(raw.to_string()));
        }
        if !chars.all(|c| c.is_ascii_alphanumeric()) {
            return Err(IdentError::Invalid(raw.to_string()));
        }

        let service = capitalize(raw);
        Ok(Self {
            raw: raw.to_string(),
            receiver: capitalize(&service),
            var_name: lower_first(&service),
            lower: raw.to_lowercase(),
            service,
        })
    }

    /// The name exactly as given on the command line.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Capitalized canonical name, e.g. "Rsvp". Used for exported Go
    /// identifiers (`RsvpService`, `NewRsvpRepository`).
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Receiver type name, e.g. "Rsvp".
    pub fn receiver(&self) -> &str {
        &self.receiver
    }

    /// Lowercase-first variable name, e.g. "rsvp". Used for unexported
    /// implementation structs.
    pub fn var_name(&self) -> &str {
        &self.var_name
    }

    /// Lowercase file base name, e.g. "rsvp".
    pub fn file_base(&self) -> &str {
        &self.lower
    }

    /// Case-folded history key. Identical fold to [`Self::file_base`].
    pub fn key(&self) -> &str {
        &self.lower
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().chain(chars).collect(),
    }
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_lowercase().chain(chars).collect(),
    }
}
