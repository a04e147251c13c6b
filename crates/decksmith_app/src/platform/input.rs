use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use decksmith_core::{Msg, TemplateFile};
use decksmith_logging::deck_warn;

use crate::cli::Args;

/// Field values gathered from the command line, before validation.
#[derive(Debug, Default)]
pub struct FormInput {
    pub text: String,
    pub guidance: String,
    pub credential: String,
    pub template: Option<TemplateFile>,
}

impl FormInput {
    /// Reads referenced files. Absent fields stay empty; validation happens in core.
    pub fn from_args(args: &Args) -> Result<Self> {
        let text = match (&args.text, &args.text_file) {
            (Some(text), _) => text.clone(),
            (None, Some(path)) if path.as_os_str() == "-" => {
                let mut buffer = String::new();
                io::stdin()
                    .read_to_string(&mut buffer)
                    .context("Failed to read text from stdin")?;
                buffer
            }
            (None, Some(path)) => fs::read_to_string(path)
                .with_context(|| format!("Failed to read text file {}", path.display()))?,
            (None, None) => String::new(),
        };

        let template = args
            .template
            .as_deref()
            .map(load_template)
            .transpose()?;

        Ok(Self {
            text,
            guidance: args.guidance.clone(),
            credential: args.api_key.clone(),
            template,
        })
    }

    /// The input events a user filling in the form would produce.
    pub fn into_messages(self) -> Vec<Msg> {
        vec![
            Msg::TextChanged(self.text),
            Msg::GuidanceChanged(self.guidance),
            Msg::CredentialChanged(self.credential),
            Msg::TemplateSelected(self.template),
        ]
    }
}

fn load_template(path: &Path) -> Result<TemplateFile> {
    let content =
        fs::read(path).with_context(|| format!("Failed to read template {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("template.pptx")
        .to_string();
    let template = TemplateFile::new(file_name, content);
    if !template.has_template_extension() {
        deck_warn!(
            "Template {} is not a .pptx/.potx file; sending it anyway",
            path.display()
        );
    }
    Ok(template)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn reads_text_file_and_template() {
        let temp = TempDir::new().unwrap();
        let notes = temp.path().join("notes.md");
        let template = temp.path().join("brand.potx");
        fs::write(&notes, "# Q3 review\n").unwrap();
        fs::write(&template, b"PK\x03\x04").unwrap();

        let args = Args {
            text_file: Some(notes),
            api_key: "k".to_string(),
            template: Some(template),
            ..Args::default()
        };
        let input = FormInput::from_args(&args).unwrap();

        assert_eq!(input.text, "# Q3 review\n");
        assert_eq!(input.credential, "k");
        let template = input.template.unwrap();
        assert_eq!(template.file_name, "brand.potx");
        assert_eq!(template.content, b"PK\x03\x04");
    }

    #[test]
    fn absent_fields_stay_empty() {
        let input = FormInput::from_args(&Args::default()).unwrap();

        assert!(input.text.is_empty());
        assert!(input.credential.is_empty());
        assert!(input.template.is_none());
    }

    #[test]
    fn unreadable_template_is_a_startup_error() {
        let args = Args {
            template: Some(PathBuf::from("/nonexistent/brand.pptx")),
            ..Args::default()
        };

        let err = FormInput::from_args(&args).unwrap_err();
        assert!(err.to_string().contains("Failed to read template"));
    }

    #[test]
    fn messages_follow_form_order() {
        let input = FormInput {
            text: "Hello".to_string(),
            ..FormInput::default()
        };

        let msgs = input.into_messages();

        assert_eq!(msgs.len(), 4);
        assert_eq!(msgs[0], Msg::TextChanged("Hello".to_string()));
        assert_eq!(msgs[3], Msg::TemplateSelected(None));
    }
}
