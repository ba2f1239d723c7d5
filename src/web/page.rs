// src/web/page.rs
// Server-rendered HTML for the single form page

use crate::error::ErrorKind;
use crate::experts::{CompletionOutcome, ExpertRegistry};
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;

pub const PAGE_TITLE: &str = "LLM Expert Web App";
pub const ANSWER_HEADING: &str = "Answer";
pub const ERROR_PREFIX: &str = "An error occurred: ";
pub const BUSY_TEXT: &str = "Generating an answer from the LLM…";

const CAPTION: &str = "A simple LLM app built with Rust + axum";
const SELECTOR_PROMPT: &str = "Select an expert mode:";
const TEXT_LABEL: &str = "Input text (question or request)";
const TEXT_PLACEHOLDER: &str = "e.g. I'm stuck designing an A/B test. How should I decide the split, \
the required sample size and the metrics?";
const SUBMIT_LABEL: &str = "Send";

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; max-width: 46rem; margin: 2rem auto; padding: 0 1rem; color: #262730; }
h1 { margin-bottom: 0.2rem; }
.caption { color: #6b6f76; margin-top: 0; }
details { border: 1px solid #e6e6ea; border-radius: 0.5rem; padding: 0.5rem 1rem; margin: 1rem 0; }
summary { cursor: pointer; font-weight: 600; }
fieldset { border: none; padding: 0; margin: 1rem 0; }
.radios { display: flex; gap: 1.5rem; flex-wrap: wrap; }
textarea { width: 100%; height: 150px; box-sizing: border-box; font: inherit; padding: 0.5rem; }
button { margin-top: 0.75rem; padding: 0.4rem 1.2rem; font: inherit; }
.busy { color: #6b6f76; }
.warning { background: #fffbe6; border: 1px solid #f5d565; border-radius: 0.5rem; padding: 0.75rem 1rem; }
.error { background: #fdecea; border: 1px solid #f5a49c; border-radius: 0.5rem; padding: 0.75rem 1rem; }
.answer { white-space: pre-wrap; line-height: 1.5; }
"#;

const BUSY_SCRIPT: &str = r#"
document.getElementById("qa_form").addEventListener("submit", function () {
  document.getElementById("submit").disabled = true;
  document.getElementById("busy").hidden = false;
});
"#;

const USAGE_HTML: &str = r#"<details open>
<summary>About this app / How to use</summary>
<p><strong>Overview</strong></p>
<ul>
<li>Write a question or request in the text form, choose an <strong>expert mode (A/B)</strong> and send it.
The LLM answers from the chosen expert's point of view and in their voice.</li>
<li>How it works: a <strong>system message matching the selected mode</strong> is assembled and passed to the LLM together with your text.</li>
</ul>
<p><strong>How to use</strong></p>
<ol>
<li>Choose an <strong>expert mode</strong> (A = Data Scientist / B = UX Designer).</li>
<li>Type your text into the input field (for example the problem, requirements, constraints or current data).</li>
<li>Press <strong>Send</strong> and the answer appears at the bottom of the page.</li>
</ol>
</details>"#;

/// Message area below the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Panel {
    None,
    Warning(String),
    Answer(String),
    Error(String),
}

impl From<CompletionOutcome> for Panel {
    fn from(outcome: CompletionOutcome) -> Self {
        match outcome {
            CompletionOutcome::Answered { text } => Panel::Answer(text),
            CompletionOutcome::Failed { kind: ErrorKind::Validation, description } => {
                Panel::Warning(description)
            }
            CompletionOutcome::Failed { description, .. } => Panel::Error(description),
        }
    }
}

/// Everything needed to render one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    /// Persona key to preselect
    pub selected: String,
    /// Text echoed back into the text area
    pub text: String,
    pub panel: Panel,
}

impl PageView {
    /// Fresh form with the registry's default persona
    pub fn idle(registry: &ExpertRegistry) -> Self {
        Self {
            selected: registry.default_key().to_string(),
            text: String::new(),
            panel: Panel::None,
        }
    }
}

/// Render the page. Pure: same inputs, same HTML.
pub fn render_page(registry: &ExpertRegistry, view: &PageView) -> String {
    let selected = if registry.contains(&view.selected) {
        view.selected.as_str()
    } else {
        registry.default_key()
    };

    let mut html = String::with_capacity(8 * 1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(html, "<title>{}</title>", PAGE_TITLE);
    html.push_str(
        "<link rel=\"icon\" href=\"data:image/svg+xml,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'><text y='.9em' font-size='90'>🤖</text></svg>\">\n",
    );
    let _ = writeln!(html, "<style>{}</style>", STYLE);
    html.push_str("</head>\n<body>\n");

    let _ = writeln!(html, "<h1>🤖 {}</h1>", PAGE_TITLE);
    let _ = writeln!(html, "<p class=\"caption\">{}</p>", CAPTION);
    html.push_str(USAGE_HTML);
    html.push('\n');

    html.push_str("<form id=\"qa_form\" method=\"post\" action=\"/\">\n");
    html.push_str("<fieldset>\n");
    let _ = writeln!(html, "<legend>{}</legend>", SELECTOR_PROMPT);
    html.push_str("<div class=\"radios\">\n");
    for persona in registry.list_all() {
        let key = encode_double_quoted_attribute(&persona.key);
        let checked = if persona.key == selected { " checked" } else { "" };
        let _ = writeln!(
            html,
            "<label><input type=\"radio\" name=\"persona\" value=\"{}\"{}> {}</label>",
            key,
            checked,
            encode_text(&persona.label)
        );
    }
    html.push_str("</div>\n</fieldset>\n");

    let _ = writeln!(html, "<label for=\"text\">{}</label>", TEXT_LABEL);
    let _ = writeln!(
        html,
        "<textarea id=\"text\" name=\"text\" placeholder=\"{}\">{}</textarea>",
        encode_double_quoted_attribute(TEXT_PLACEHOLDER),
        encode_text(&view.text)
    );
    let _ = writeln!(html, "<button id=\"submit\" type=\"submit\">{}</button>", SUBMIT_LABEL);
    let _ = writeln!(html, "<p id=\"busy\" class=\"busy\" hidden>{}</p>", BUSY_TEXT);
    html.push_str("</form>\n");

    render_panel(&mut html, &view.panel);

    let _ = writeln!(html, "<script>{}</script>", BUSY_SCRIPT);
    html.push_str("</body>\n</html>\n");
    html
}

fn render_panel(html: &mut String, panel: &Panel) {
    match panel {
        Panel::None => {}
        Panel::Warning(message) => {
            let _ = writeln!(
                html,
                "<div class=\"warning\" role=\"alert\">{}</div>",
                encode_text(message)
            );
        }
        Panel::Answer(text) => {
            html.push_str("<section id=\"answer\">\n");
            let _ = writeln!(html, "<h2>🧠 {}</h2>", ANSWER_HEADING);
            let _ = writeln!(html, "<div class=\"answer\">{}</div>", encode_text(text));
            html.push_str("</section>\n");
        }
        Panel::Error(description) => {
            let _ = writeln!(
                html,
                "<div class=\"error\" role=\"alert\">{}{}</div>",
                ERROR_PREFIX,
                encode_text(description)
            );
        }
    }
}
