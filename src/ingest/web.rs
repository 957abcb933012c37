//! URL scraping: fetch a page and keep only paragraph text.

use std::time::Duration;

use super::IngestError;

const FETCH_TIMEOUT_SECS: u64 = 30;

// Some sites reject requests without a browser-style agent.
const USER_AGENT: &str = "Mozilla/5.0";

/// Fetches `url` and returns the text of its `<p>` elements, one
/// paragraph per line. Script and style content is excluded.
pub async fn scrape_url(url: &str) -> Result<String, IngestError> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
        .build()?;

    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(IngestError::Fetch(format!(
            "{url} returned {}",
            response.status()
        )));
    }

    let html = response.text().await?;
    let text = extract_paragraph_text(&html);
    if text.trim().is_empty() {
        return Err(IngestError::NoText(url.to_string()));
    }

    Ok(text)
}

/// Collects the text content of `<p>` elements, dropping markup and the
/// bodies of `<script>`/`<style>` elements.
fn extract_paragraph_text(html: &str) -> String {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_paragraph = false;
    let mut skip_until: Option<&str> = None;

    let mut rest = html;
    while let Some(open) = rest.find('<') {
        if skip_until.is_none() && in_paragraph {
            current.push_str(&rest[..open]);
        }
        rest = &rest[open..];

        let Some(close) = rest.find('>') else {
            // Unterminated tag: drop the malformed tail.
            rest = "";
            break;
        };
        let tag_body = &rest[1..close];
        let is_closing = tag_body.starts_with('/');
        let name: String = tag_body
            .trim_start_matches('/')
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        if let Some(until) = skip_until {
            if is_closing && name == until {
                skip_until = None;
            }
        } else {
            match name.as_str() {
                "script" if !is_closing => skip_until = Some("script"),
                "style" if !is_closing => skip_until = Some("style"),
                "p" => {
                    if in_paragraph {
                        flush_paragraph(&mut paragraphs, &mut current);
                    }
                    // An opening <p> implicitly closes an unterminated one.
                    in_paragraph = !is_closing;
                }
                "br" => {
                    if in_paragraph {
                        current.push(' ');
                    }
                }
                _ => {}
            }
        }

        rest = &rest[close + 1..];
    }

    if in_paragraph {
        if skip_until.is_none() {
            current.push_str(rest);
        }
        flush_paragraph(&mut paragraphs, &mut current);
    }

    paragraphs.join("\n")
}

fn flush_paragraph(paragraphs: &mut Vec<String>, current: &mut String) {
    let text = decode_entities(current);
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if !normalized.is_empty() {
        paragraphs.push(normalized);
    }
    current.clear();
}

fn decode_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&nbsp;", " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_paragraph_text() {
        let html = r#"
            <html>
            <head><title>Ignored</title><script>var x = 1;</script></head>
            <body>
                <h1>Heading is ignored</h1>
                <p>First paragraph.</p>
                <div>Divs are ignored too.</div>
                <p>Second <b>paragraph</b> with markup.</p>
            </body>
            </html>
        "#;

        let text = extract_paragraph_text(html);
        assert_eq!(text, "First paragraph.\nSecond paragraph with markup.");
    }

    #[test]
    fn script_and_style_bodies_are_excluded() {
        let html = r#"
            <style>p { color: red; }</style>
            <p>Visible.</p>
            <script>document.write("<p>injected</p>");</script>
        "#;

        let text = extract_paragraph_text(html);
        assert_eq!(text, "Visible.");
        assert!(!text.contains("injected"));
        assert!(!text.contains("color"));
    }

    #[test]
    fn entities_are_decoded() {
        let html = "<p>Fish &amp; chips &#39;here&#39;</p>";
        assert_eq!(extract_paragraph_text(html), "Fish & chips 'here'");
    }

    #[test]
    fn unterminated_paragraph_is_still_collected() {
        let html = "<p>One<p>Two</p>";
        assert_eq!(extract_paragraph_text(html), "One\nTwo");
    }

    #[test]
    fn whitespace_is_normalized_within_paragraphs() {
        let html = "<p>spread\n   over\t lines</p>";
        assert_eq!(extract_paragraph_text(html), "spread over lines");
    }

    #[test]
    fn empty_document_yields_empty_text() {
        assert_eq!(extract_paragraph_text("<html><body></body></html>"), "");
    }

    #[test]
    fn paragraph_running_to_end_of_input_is_collected() {
        assert_eq!(extract_paragraph_text("<p>trailing text"), "trailing text");
    }
}
