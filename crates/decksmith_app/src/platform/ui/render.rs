use std::io::{self, Write};

use decksmith_core::AppViewModel;

/// Turns the view model into the lines of one terminal frame.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    let trigger = if view.submit_enabled {
        format!("[{}]", view.button_label)
    } else {
        format!("[{}] (disabled)", view.button_label)
    };
    lines.push(format!("DeckSmith AI | {} | {}", view.status_label, trigger));

    lines.push(format!(
        "Form: text {} chars | guidance {} | API key {} | template {}",
        format_with_commas(view.text_len as u64),
        if view.has_guidance { "set" } else { "none" },
        if view.has_credential { "set" } else { "missing" },
        view.template_name.as_deref().unwrap_or("none"),
    ));

    if let Some(bytes) = view.bytes_received {
        lines.push(format!("Received {} bytes", format_with_commas(bytes)));
    }
    if let Some(message) = &view.error_banner {
        lines.push(format!("Error: {message}"));
    }
    if let Some(path) = &view.last_download {
        lines.push(format!("Saved: {}", path.display()));
    }

    lines
}

/// Writes frames, skipping a frame identical to the previous one.
pub struct TerminalRenderer<W: Write> {
    out: W,
    last_frame: Vec<String>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last_frame: Vec::new(),
        }
    }

    pub fn present(&mut self, view: &AppViewModel) -> io::Result<()> {
        let frame = render(view);
        if frame == self.last_frame {
            return Ok(());
        }
        for line in &frame {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()?;
        self.last_frame = frame;
        Ok(())
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

fn format_with_commas(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use decksmith_core::{update, AppState, Msg, TemplateFile, VALIDATION_MESSAGE};
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn in_flight_view() -> AppViewModel {
        let (state, _) = update(AppState::new(), Msg::TextChanged("Hello".into()));
        let (state, _) = update(state, Msg::CredentialChanged("k".into()));
        let (state, _) = update(
            state,
            Msg::TemplateSelected(Some(TemplateFile::new("brand.pptx", vec![1, 2, 3]))),
        );
        let (state, _) = update(state, Msg::SubmitClicked);
        let (state, _) = update(
            state,
            Msg::DownloadProgress {
                id: 1,
                bytes_received: 1_234_567,
            },
        );
        state.view()
    }

    #[test]
    fn in_flight_frame_shows_disabled_trigger_and_progress() {
        assert_eq!(
            render(&in_flight_view()),
            vec![
                "DeckSmith AI | Generating | [Generating...] (disabled)".to_string(),
                "Form: text 5 chars | guidance none | API key set | template brand.pptx"
                    .to_string(),
                "Received 1,234,567 bytes".to_string(),
            ]
        );
    }

    #[test]
    fn failure_frame_shows_error_banner() {
        let (state, _) = update(AppState::new(), Msg::SubmitClicked);
        let lines = render(&state.view());

        assert_eq!(
            lines[0],
            "DeckSmith AI | Failed | [Generate Presentation]"
        );
        assert_eq!(lines.last().unwrap(), &format!("Error: {VALIDATION_MESSAGE}"));
    }

    #[test]
    fn saved_path_is_listed() {
        let view = AppViewModel {
            status_label: "Done",
            submit_enabled: true,
            button_label: "Generate Presentation",
            last_download: Some(PathBuf::from("out/generated_presentation.pptx")),
            ..AppViewModel::default()
        };

        assert_eq!(
            render(&view).last().unwrap(),
            "Saved: out/generated_presentation.pptx"
        );
    }

    #[test]
    fn identical_frames_are_written_once() {
        let view = in_flight_view();
        let mut renderer = TerminalRenderer::new(Vec::new());

        renderer.present(&view).unwrap();
        renderer.present(&view).unwrap();

        let written = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(written.matches("DeckSmith AI").count(), 1);
    }

    #[test]
    fn commas_group_thousands() {
        assert_eq!(format_with_commas(0), "0");
        assert_eq!(format_with_commas(999), "999");
        assert_eq!(format_with_commas(1000), "1,000");
        assert_eq!(format_with_commas(12_345_678), "12,345,678");
    }
}
