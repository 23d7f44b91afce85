//! Server-rendered HTML pages for the résumé-to-profile flow.

use crate::profile::CandidateProfile;
use crate::resume::parser::ParsedResume;
use crate::search::candidate::CandidateSearch;

/// Escapes text for safe inclusion in element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
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

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>{title}</title></head>
<body>
{body}
</body>
</html>
"#,
        title = escape_html(title),
    )
}

fn preformatted(text: &str) -> String {
    format!("<pre>{}</pre>", escape_html(text))
}

pub fn upload_form() -> String {
    layout(
        "Candidate Search",
        r#"<h1>Upload a resume</h1>
<form action="/upload_resume" method="post" enctype="multipart/form-data">
  <input type="file" name="resume_file" accept=".pdf,.docx">
  <button type="submit">Upload</button>
</form>"#,
    )
}

pub fn resume_page(parsed: &ParsedResume, search: &CandidateSearch) -> String {
    // serde_json cannot fail on a struct of strings
    let parsed_json = serde_json::to_string(parsed).unwrap_or_default();

    let mut results = String::new();
    for result in &search.results {
        let title = result.title.as_deref().unwrap_or("(untitled)");
        let heading = match result.link.as_deref() {
            Some(link) => format!(
                r#"<a href="{}">{}</a>"#,
                escape_html(link),
                escape_html(title)
            ),
            None => escape_html(title),
        };
        let snippet = escape_html(result.snippet.as_deref().unwrap_or_default());
        results.push_str(&format!("  <li>{heading}<p>{snippet}</p></li>\n"));
    }

    let mut failures = String::new();
    if !search.failures.is_empty() {
        failures.push_str("<h2>Searches that failed</h2>\n<ul>\n");
        for failure in &search.failures {
            failures.push_str(&format!(
                "  <li>{}: {}</li>\n",
                escape_html(&failure.query),
                escape_html(&failure.reason)
            ));
        }
        failures.push_str("</ul>\n");
    }

    let body = format!(
        r#"<h1>Parsed resume</h1>
{resume}
<form action="/create_profile" method="post">
  <input type="hidden" name="parsed_resume" value="{parsed_json}">
  <button type="submit">Create profile</button>
</form>
<h2>Search results ({count})</h2>
<ul>
{results}</ul>
{failures}"#,
        resume = preformatted(&parsed.formatted()),
        parsed_json = escape_html(&parsed_json),
        count = search.results.len(),
    );
    layout("Parsed Resume", &body)
}

pub fn profile_page(profile: &CandidateProfile) -> String {
    let body = format!(
        "<h1>Profile: {name}</h1>\n<h2>Final profile</h2>\n{final_profile}\n<h2>Narrative</h2>\n{narrative}\n<h2>DISC / OCEAN analysis</h2>\n{analysis}\n",
        name = escape_html(&profile.name),
        final_profile = preformatted(&profile.final_profile),
        narrative = preformatted(&profile.narrative),
        analysis = preformatted(&profile.analysis),
    );
    layout(&format!("Profile: {}", profile.name), &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::candidate::QueryFailure;
    use crate::search::SearchResult;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_upload_form_posts_resume_file() {
        let page = upload_form();
        assert!(page.contains(r#"action="/upload_resume""#));
        assert!(page.contains(r#"name="resume_file""#));
    }

    #[test]
    fn test_resume_page_embeds_escaped_json_and_results() {
        let parsed = ParsedResume {
            name: "Jane <Doe>".to_string(),
            contact: "omitted".to_string(),
            organizations: vec!["Acme".to_string()],
        };
        let search = CandidateSearch {
            results: vec![SearchResult {
                title: Some("Jane Doe | LinkedIn".to_string()),
                link: Some("https://linkedin.com/in/jane".to_string()),
                snippet: Some("Engineer at Acme".to_string()),
            }],
            failures: vec![QueryFailure {
                query: "Jane Acme site:twitter.com".to_string(),
                reason: "quota".to_string(),
            }],
        };

        let page = resume_page(&parsed, &search);
        assert!(page.contains("Name: Jane &lt;Doe&gt;"));
        assert!(page.contains("&quot;name&quot;:&quot;Jane &lt;Doe&gt;&quot;"));
        assert!(page.contains(r#"<a href="https://linkedin.com/in/jane">Jane Doe | LinkedIn</a>"#));
        assert!(page.contains("Search results (1)"));
        assert!(page.contains("Jane Acme site:twitter.com: quota"));
    }

    #[test]
    fn test_profile_page_shows_all_stages() {
        let profile = CandidateProfile {
            name: "Jane".to_string(),
            analysis: "High D".to_string(),
            narrative: "Jane leads.".to_string(),
            final_profile: "Great fit & more".to_string(),
        };
        let page = profile_page(&profile);
        assert!(page.contains("<title>Profile: Jane</title>"));
        assert!(page.contains("<pre>High D</pre>"));
        assert!(page.contains("<pre>Jane leads.</pre>"));
        assert!(page.contains("<pre>Great fit &amp; more</pre>"));
    }
}
