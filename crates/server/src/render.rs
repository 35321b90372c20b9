//! HTML page rendering.
//!
//! A single page serves every route: the genre form, then optionally a
//! notice, a "no recommendations" message, or the recommendation list.

use pipeline::Recommendation;

/// What the recommendation block of the page shows
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The pipeline produced at least one recommendation
    Listed(Vec<Recommendation>),
    /// The pipeline ran but nothing matched
    NoRecommendations,
}

impl From<Vec<Recommendation>> for Outcome {
    fn from(recommendations: Vec<Recommendation>) -> Self {
        if recommendations.is_empty() {
            Outcome::NoRecommendations
        } else {
            Outcome::Listed(recommendations)
        }
    }
}

/// Everything the page template needs
#[derive(Debug, Clone, Default)]
pub struct PageView {
    /// Echoed back next to the results and prefilled in the form
    pub genre: Option<String>,
    /// `None` on the initial GET: no recommendation block at all
    pub outcome: Option<Outcome>,
    pub notice: Option<String>,
}

impl PageView {
    /// The empty form
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn results(genre: String, outcome: Outcome) -> Self {
        Self {
            genre: Some(genre),
            outcome: Some(outcome),
            notice: None,
        }
    }

    pub fn notice(message: impl Into<String>) -> Self {
        Self {
            notice: Some(message.into()),
            ..Self::default()
        }
    }
}

/// Render the full page
pub fn render_page(view: &PageView) -> String {
    let genre_value = view.genre.as_deref().map(html_escape).unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Movie Recommendations</title>
    <style>{css}</style>
</head>
<body>
    <div class="container">
        <h1>Movie Recommendations</h1>
        <form action="/recommend" method="post">
            <label for="genre">Genre</label>
            <input type="text" id="genre" name="genre" value="{genre_value}" placeholder="e.g. Comedy" required>
            <button type="submit">Recommend</button>
        </form>
        {notice}
        {block}
    </div>
</body>
</html>"#,
        css = inline_css(),
        genre_value = genre_value,
        notice = view.notice.as_deref().map(render_notice).unwrap_or_default(),
        block = render_block(view),
    )
}

fn render_notice(message: &str) -> String {
    format!(r#"<p class="notice">{}</p>"#, html_escape(message))
}

fn render_block(view: &PageView) -> String {
    let genre = html_escape(view.genre.as_deref().unwrap_or_default());
    match &view.outcome {
        None => String::new(),
        Some(Outcome::NoRecommendations) => format!(
            r#"<section class="recommendations"><p class="empty">No recommendations found for "{genre}".</p></section>"#
        ),
        Some(Outcome::Listed(recommendations)) => {
            let items: String = recommendations
                .iter()
                .map(|rec| {
                    format!(
                        r#"<li><span class="title">{}</span> <span class="rating">{:.1}</span></li>"#,
                        html_escape(&rec.title),
                        rec.rating
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            format!(
                r#"<section class="recommendations">
            <h2>Recommended {genre} movies</h2>
            <ol>
{items}
            </ol>
        </section>"#
            )
        }
    }
}

fn inline_css() -> &'static str {
    r#"
body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", sans-serif; background: #f5f5f5; margin: 0; }
.container { max-width: 640px; margin: 40px auto; background: #fff; padding: 24px 32px; border-radius: 8px; }
form { display: flex; gap: 8px; align-items: center; }
input[type=text] { flex: 1; padding: 6px 8px; }
.notice { color: #b00020; }
.empty { color: #666; font-style: italic; }
.rating { color: #888; }
"#
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_page_has_no_block() {
        let page = render_page(&PageView::empty());
        assert!(page.contains("<form"));
        assert!(!page.contains("<section"));
        assert!(!page.contains("No recommendations"));
    }

    #[test]
    fn test_no_recommendations_state() {
        let page = render_page(&PageView::results("Western".to_string(), Vec::new().into()));
        assert!(page.contains(r#"No recommendations found for "Western""#));
    }

    #[test]
    fn test_listed_recommendations() {
        let recs = vec![
            Recommendation { title: "Heat (1995)".to_string(), rating: 4.25 },
            Recommendation { title: "Casino (1995)".to_string(), rating: 3.0 },
        ];
        let page = render_page(&PageView::results("Crime".to_string(), recs.into()));

        assert!(page.contains("Recommended Crime movies"));
        assert!(page.contains("Heat (1995)"));
        assert!(page.contains("3.0"));
        assert!(page.find("Heat").unwrap() < page.find("Casino").unwrap());
    }

    #[test]
    fn test_escapes_user_input() {
        let page = render_page(&PageView::results("<script>".to_string(), Outcome::NoRecommendations));
        assert!(!page.contains("<script>"));
        assert!(page.contains("&lt;script&gt;"));
    }
}
