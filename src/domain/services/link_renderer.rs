#[cfg(test)]
#[path = "link_renderer_test.rs"]
mod tests;

use super::formatters::extract_links;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Link { url: String, label: String },
}

pub type Paragraph = Vec<Segment>;

fn escape_html(text: &str) -> String {
    return text
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;");
}

fn substitute(segments: Vec<Segment>, url: &str) -> Vec<Segment> {
    let mut res: Vec<Segment> = vec![];
    for segment in segments {
        let text = match segment {
            Segment::Text(text) => text,
            link => {
                res.push(link);
                continue;
            }
        };

        let parts = text.split(url).collect::<Vec<&str>>();
        for (idx, part) in parts.iter().enumerate() {
            if !part.is_empty() {
                res.push(Segment::Text(part.to_string()));
            }
            if idx < parts.len() - 1 {
                res.push(Segment::Link {
                    url: url.to_string(),
                    label: LinkRenderer::label(url).to_string(),
                });
            }
        }
    }

    return res;
}

fn split_paragraphs(segments: Vec<Segment>) -> Vec<Paragraph> {
    let mut paragraphs: Vec<Paragraph> = vec![];
    let mut current: Paragraph = vec![];

    for segment in segments {
        let text = match segment {
            Segment::Text(text) => text,
            link => {
                current.push(link);
                continue;
            }
        };

        for (idx, line) in text.split('\n').enumerate() {
            if idx > 0 {
                paragraphs.push(std::mem::take(&mut current));
            }
            let line = line.strip_suffix('\r').unwrap_or(line);
            if !line.is_empty() {
                current.push(Segment::Text(line.to_string()));
            }
        }
    }
    paragraphs.push(current);

    return paragraphs;
}

pub struct LinkRenderer {}

impl LinkRenderer {
    pub fn label(url: &str) -> &'static str {
        let normalized = url
            .to_lowercase()
            .replace("%20", " ")
            .replace(['-', '_', '+'], " ");

        if normalized.contains("virtual tour") {
            return "View Virtual Tour";
        }

        return "View Link";
    }

    /// Splits assistant text into paragraphs with every extracted URL turned
    /// into a link segment. URLs are substituted one distinct URL at a time in
    /// the order they were extracted, and every literal occurrence of that URL
    /// in the remaining text is replaced. Link segments are never searched
    /// again.
    pub fn render(text: &str) -> Vec<Paragraph> {
        if text.is_empty() {
            return vec![];
        }

        let mut segments = vec![Segment::Text(text.to_string())];
        let mut substituted: Vec<String> = vec![];
        for url in extract_links(text) {
            if substituted.contains(&url) {
                continue;
            }
            segments = substitute(segments, &url);
            substituted.push(url);
        }

        return split_paragraphs(segments);
    }

    /// Blank lines only separate paragraphs in HTML, so empty paragraphs
    /// are left out.
    pub fn to_html(paragraphs: &[Paragraph]) -> String {
        return paragraphs
            .iter()
            .filter(|paragraph| return !paragraph.is_empty())
            .map(|paragraph| {
                let inner = paragraph
                    .iter()
                    .map(|segment| match segment {
                        Segment::Text(text) => return escape_html(text),
                        Segment::Link { url, label } => {
                            return format!(
                                "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{label}</a>",
                                escape_html(url)
                            );
                        }
                    })
                    .collect::<String>();

                return format!("<p>{inner}</p>");
            })
            .collect::<Vec<String>>()
            .join("\n");
    }

    pub fn to_lines(paragraphs: &[Paragraph]) -> Vec<String> {
        return paragraphs
            .iter()
            .map(|paragraph| {
                return paragraph
                    .iter()
                    .map(|segment| match segment {
                        Segment::Text(text) => return text.to_string(),
                        Segment::Link { url, label } => return format!("{label} ({url})"),
                    })
                    .collect::<String>();
            })
            .collect();
    }
}
