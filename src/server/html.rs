//! HTML rendering of a [`Page`].

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::ui::{Page, Panel};

/// Seconds between reloads while a request is in flight.
pub const REFRESH_SECONDS: u32 = 2;

const STYLE: &str = r#"
body { background: #111827; color: #f9fafb; font-family: system-ui, sans-serif; margin: 0; }
main { max-width: 56rem; margin: 0 auto; padding: 2rem 1rem; }
header { text-align: center; margin: 2rem 0; }
h1 { font-size: 3rem; margin: 0; color: #c084fc; }
header p { color: #9ca3af; }
.card { background: #1f2937; border: 1px solid #374151; border-radius: 1rem; padding: 1.5rem; }
.controls { display: flex; gap: 1rem; }
textarea { flex: 1; background: #374151; color: #fff; border: none; border-radius: .5rem; padding: 1rem; resize: none; font: inherit; }
button { padding: 1rem 2rem; border: none; border-radius: .5rem; background: #a855f7; color: #fff; font-weight: 600; cursor: pointer; }
button:disabled { opacity: .5; cursor: not-allowed; }
.error { color: #f87171; text-align: center; margin-top: 1rem; }
.panel { margin-top: 2rem; aspect-ratio: 1 / 1; border: 2px dashed #374151; border-radius: 1rem; display: flex; align-items: center; justify-content: center; overflow: hidden; color: #6b7280; }
.panel img { width: 100%; height: 100%; object-fit: contain; }
.spinner { width: 3rem; height: 3rem; border: 4px solid #4b5563; border-top-color: #a855f7; border-radius: 50%; animation: spin 1s linear infinite; margin: 0 auto 1rem; }
@keyframes spin { to { transform: rotate(360deg); } }
"#;

// Enter submits, Shift+Enter keeps the newline.
const SCRIPT: &str = r#"
document.getElementById('prompt').addEventListener('keydown', function (event) {
  if (event.key === 'Enter' && !event.shiftKey) {
    event.preventDefault();
    if (!this.disabled) { this.form.requestSubmit(); }
  }
});
"#;

pub fn render_page(page: &Page) -> String {
    let loading = !page.input_enabled;
    let disabled = if loading { " disabled" } else { "" };

    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    if loading {
        html.push_str(&format!(
            "<meta http-equiv=\"refresh\" content=\"{}\">\n",
            REFRESH_SECONDS
        ));
    }
    html.push_str("<title>AI Image Generator</title>\n<style>");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n<main>\n");
    html.push_str(
        "<header><h1>AI Image Generator</h1>\
         <p>Turn your ideas into stunning visuals with the power of Gemini.</p></header>\n",
    );

    html.push_str("<section class=\"card\">\n<form method=\"post\" action=\"/generate\" class=\"controls\">\n");
    html.push_str(&format!(
        "<textarea id=\"prompt\" name=\"prompt\" rows=\"3\" \
         placeholder=\"e.g., A futuristic cityscape at sunset with flying cars, photorealistic...\"{}>{}</textarea>\n",
        disabled,
        encode_text(&page.prompt)
    ));
    html.push_str(&format!(
        "<button type=\"submit\"{}>{}</button>\n</form>\n",
        disabled,
        encode_text(page.button_label)
    ));
    if let Some(error) = &page.error {
        html.push_str(&format!("<p class=\"error\">{}</p>\n", encode_text(error)));
    }
    html.push_str("</section>\n");

    html.push_str("<section class=\"panel\">\n");
    html.push_str(&render_panel(&page.panel));
    html.push_str("</section>\n</main>\n<script>");
    html.push_str(SCRIPT);
    html.push_str("</script>\n</body>\n</html>\n");
    html
}

fn render_panel(panel: &Panel) -> String {
    match panel {
        Panel::Busy { message } => format!(
            "<div><div class=\"spinner\"></div><p>{}</p></div>\n",
            encode_text(message)
        ),
        Panel::Image { data_url, alt } => format!(
            "<img src=\"{}\" alt=\"{}\">\n",
            encode_double_quoted_attribute(data_url),
            encode_double_quoted_attribute(alt)
        ),
        Panel::Placeholder { guidance } => format!("<p>{}</p>\n", encode_text(guidance)),
    }
}
