use crate::prompts::PromptRequest;

/// What to show under the form after a submission.
#[derive(Debug, Clone, Copy)]
pub enum Outcome<'a> {
    Names(&'a str),
    Error(&'a str),
}

const STYLE: &str = r#"
body { margin: 0; font-family: sans-serif; display: flex; min-height: 100vh; }
aside { width: 18rem; padding: 1.5rem; background: #f0f2f6; }
main { flex: 1; padding: 1.5rem 3rem; }
label { display: block; margin: 1rem 0 0.3rem; }
input { width: 100%; box-sizing: border-box; padding: 0.4rem; }
button { margin-top: 1.2rem; padding: 0.4rem 1rem; }
.result { white-space: pre-wrap; }
.error { white-space: pre-wrap; color: #9b1c1c; background: #fdecea; padding: 1rem; }
"#;

/// Render the single page, keeping the submitted values in the inputs.
pub fn render_page(request: &PromptRequest, outcome: Option<Outcome<'_>>) -> String {
    let body = match outcome {
        Some(Outcome::Names(text)) => format!(r#"<div class="result">{}</div>"#, escape_html(text)),
        Some(Outcome::Error(message)) => {
            format!(r#"<div class="error">{}</div>"#, escape_html(message))
        }
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Pet Name Generator</title>
<style>{style}</style>
</head>
<body>
<aside>
<form method="post" action="/">
<label for="animal_type">What is your pet type?</label>
<input id="animal_type" name="animal_type" type="text" value="{animal_type}">
<label for="pet_color">What is your pet color?</label>
<input id="pet_color" name="pet_color" type="text" value="{pet_color}">
<button type="submit">Generate Name</button>
</form>
</aside>
<main>
<h1>Pet Name Generator</h1>
{body}
</main>
</body>
</html>
"#,
        style = STYLE,
        animal_type = escape_html(&request.animal_type),
        pet_color = escape_html(&request.pet_color),
        body = body,
    )
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
