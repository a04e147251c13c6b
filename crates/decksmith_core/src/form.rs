use std::fmt;

use thiserror::Error;

/// Shown whenever a required field is missing, regardless of which one.
pub const VALIDATION_MESSAGE: &str =
    "Please fill in all required fields: text, API key, and template file.";

/// An uploaded presentation template (.pptx/.potx).
#[derive(Clone, PartialEq, Eq, Default)]
pub struct TemplateFile {
    pub file_name: String,
    pub content: Vec<u8>,
}

impl TemplateFile {
    pub fn new(file_name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content,
        }
    }

    /// True for the extensions the upload picker offers.
    pub fn has_template_extension(&self) -> bool {
        let lower = self.file_name.to_ascii_lowercase();
        lower.ends_with(".pptx") || lower.ends_with(".potx")
    }
}

impl fmt::Debug for TemplateFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateFile")
            .field("file_name", &self.file_name)
            .field("bytes", &self.content.len())
            .finish()
    }
}

/// Field values as typed by the user. Never reset by a submission.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct FormState {
    pub text: String,
    pub guidance: String,
    pub credential: String,
    pub template: Option<TemplateFile>,
}

impl fmt::Debug for FormState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormState")
            .field("text_len", &self.text.len())
            .field("guidance", &self.guidance)
            .field("credential", &redact(&self.credential))
            .field("template", &self.template)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Text,
    Credential,
    Template,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", VALIDATION_MESSAGE)]
pub struct ValidationError {
    pub missing: Vec<RequiredField>,
}

/// A form snapshot that passed [`validate`]. Only constructible through it.
#[derive(Clone, PartialEq, Eq)]
pub struct ValidForm {
    text: String,
    guidance: String,
    credential: String,
    template: TemplateFile,
}

impl ValidForm {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Empty string when the user gave no guidance.
    pub fn guidance(&self) -> &str {
        &self.guidance
    }

    pub fn credential(&self) -> &str {
        &self.credential
    }

    pub fn template(&self) -> &TemplateFile {
        &self.template
    }

    pub fn into_parts(self) -> (String, String, String, TemplateFile) {
        (self.text, self.guidance, self.credential, self.template)
    }
}

impl fmt::Debug for ValidForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidForm")
            .field("text_len", &self.text.len())
            .field("guidance", &self.guidance)
            .field("credential", &redact(&self.credential))
            .field("template", &self.template)
            .finish()
    }
}

/// Checks the required fields. Presence only: whitespace-only text counts.
pub fn validate(form: &FormState) -> Result<ValidForm, ValidationError> {
    let mut missing = Vec::new();
    if form.text.is_empty() {
        missing.push(RequiredField::Text);
    }
    if form.credential.is_empty() {
        missing.push(RequiredField::Credential);
    }
    let template = form
        .template
        .as_ref()
        .filter(|template| !template.content.is_empty());
    if template.is_none() {
        missing.push(RequiredField::Template);
    }

    match template {
        Some(template) if missing.is_empty() => Ok(ValidForm {
            text: form.text.clone(),
            guidance: form.guidance.clone(),
            credential: form.credential.clone(),
            template: template.clone(),
        }),
        _ => Err(ValidationError { missing }),
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<empty>"
    } else {
        "<redacted>"
    }
}
