/// Greeting for a local hour of day (0-23).
pub fn greeting_for_hour(hour: u32) -> &'static str {
    if hour < 12 {
        "Good morning"
    } else if hour < 18 {
        "Good afternoon"
    } else {
        "Good evening"
    }
}

/// Escape a value for use inside a double-quoted CSS `url("...")`.
pub fn escape_css_url(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' | '"' | '(' | ')' | '\'' => {
                out.push('\\');
                out.push(c);
            }
            // CSS escapes take hex code points terminated by a space
            '\n' => out.push_str("\\a "),
            '\r' => out.push_str("\\d "),
            c => out.push(c),
        }
    }
    out
}

/// `background-image` declaration for an image URL.
pub fn background_image_style(url: &str) -> String {
    format!("background-image: url(\"{}\");", escape_css_url(url))
}
