//! HTML rendering for the question page.

use cdpdocs_shared::Answer;

const STYLE: &str = "body{font-family:sans-serif;max-width:48rem;margin:2rem auto;padding:0 1rem}\
input[type=text]{width:100%;padding:.5rem;box-sizing:border-box}\
.answer{white-space:pre-wrap;background:#f5f5f5;padding:1rem;border-radius:4px}";

/// Render the page, optionally showing a question and its answer.
pub fn render(exchange: Option<(&str, &Answer)>) -> String {
    let result = match exchange {
        Some((question, answer)) => format!(
            "<section>\n<h2>Question</h2>\n<p class=\"question\">{}</p>\n\
             <h2>Answer</h2>\n<p class=\"answer\">{}</p>\n</section>\n",
            escape(question),
            escape(answer.text()),
        ),
        None => String::new(),
    };

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>CDP Docs Helper</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <h1>CDP Docs Helper</h1>\n\
         <p>Ask how to do something in Segment, mParticle, Lytics or Zeotap.</p>\n\
         <form action=\"/ask\" method=\"post\">\n\
         <input type=\"text\" name=\"question\" placeholder=\"How do I set up a new source in Segment?\" required>\n\
         <button type=\"submit\">Ask</button>\n</form>\n{result}</body>\n</html>\n"
    )
}

/// Escape text for use in HTML element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn blank_page_has_form_only() {
        let html = render(None);
        assert!(html.contains(r#"<form action="/ask" method="post">"#));
        assert!(html.contains(r#"name="question""#));
        assert!(!html.contains("class=\"answer\""));
    }

    #[test]
    fn answered_page_shows_both() {
        let answer = Answer::PhraseNotInDocs;
        let html = render(Some(("Segment?", &answer)));
        assert!(html.contains("<p class=\"question\">Segment?</p>"));
        assert!(html.contains("Relevant information not found in the documentation."));
    }

    #[test]
    fn apostrophe_in_answer_is_escaped() {
        let answer = Answer::NoInformation;
        let html = render(Some(("", &answer)));
        assert!(html.contains("Sorry, I couldn&#39;t find the information you are looking for."));
    }
}
