use decksmith_core::{
    validate, FormState, RequiredField, TemplateFile, ValidationError, VALIDATION_MESSAGE,
};

fn filled_form() -> FormState {
    FormState {
        text: "Hello".to_string(),
        guidance: String::new(),
        credential: "k".to_string(),
        template: Some(TemplateFile::new("brand.pptx", vec![0x50, 0x4b, 0x03, 0x04])),
    }
}

#[test]
fn complete_form_passes_without_guidance() {
    let form = validate(&filled_form()).expect("valid form");

    assert_eq!(form.text(), "Hello");
    assert_eq!(form.guidance(), "");
    assert_eq!(form.credential(), "k");
    assert_eq!(form.template().file_name, "brand.pptx");
}

#[test]
fn each_missing_required_field_is_reported() {
    let mut no_text = filled_form();
    no_text.text.clear();
    let mut no_key = filled_form();
    no_key.credential.clear();
    let mut no_template = filled_form();
    no_template.template = None;

    assert_eq!(
        validate(&no_text).unwrap_err(),
        ValidationError {
            missing: vec![RequiredField::Text]
        }
    );
    assert_eq!(
        validate(&no_key).unwrap_err().missing,
        vec![RequiredField::Credential]
    );
    assert_eq!(
        validate(&no_template).unwrap_err().missing,
        vec![RequiredField::Template]
    );
}

#[test]
fn empty_template_content_counts_as_missing() {
    let mut form = filled_form();
    form.template = Some(TemplateFile::new("empty.pptx", Vec::new()));

    assert_eq!(
        validate(&form).unwrap_err().missing,
        vec![RequiredField::Template]
    );
}

#[test]
fn message_is_fixed_regardless_of_missing_fields() {
    let err = validate(&FormState::default()).unwrap_err();

    assert_eq!(
        err.missing,
        vec![
            RequiredField::Text,
            RequiredField::Credential,
            RequiredField::Template
        ]
    );
    assert_eq!(err.to_string(), VALIDATION_MESSAGE);
}

#[test]
fn whitespace_text_counts_as_present() {
    let mut form = filled_form();
    form.text = "   ".to_string();

    assert!(validate(&form).is_ok());
}

#[test]
fn debug_output_redacts_credential() {
    let mut form = filled_form();
    form.credential = "super-secret-key".to_string();

    let rendered = format!("{form:?}");
    assert!(!rendered.contains("super-secret-key"));
    assert!(rendered.contains("<redacted>"));

    let valid = validate(&form).unwrap();
    assert!(!format!("{valid:?}").contains("super-secret-key"));
}

#[test]
fn template_extension_check_is_case_insensitive() {
    assert!(TemplateFile::new("Deck.PPTX", vec![1]).has_template_extension());
    assert!(TemplateFile::new("master.potx", vec![1]).has_template_extension());
    assert!(!TemplateFile::new("notes.docx", vec![1]).has_template_extension());
}
