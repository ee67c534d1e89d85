use serde::Deserialize;

/// Summary shown alongside a preview, either prose or bullet points.
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryContent {
    Text(String),
    Points(Vec<String>),
}

/// Article metadata fetched before committing to quiz generation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "PreviewWire")]
pub struct ArticlePreview {
    pub title: String,
    pub sections: Vec<String>,
    pub summary: Option<SummaryContent>,
}

#[derive(Deserialize)]
struct PreviewWire {
    title: String,
    #[serde(default)]
    available_sections: Vec<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    summary_points: Option<Vec<String>>,
}

impl From<PreviewWire> for ArticlePreview {
    fn from(wire: PreviewWire) -> Self {
        let points = wire.summary_points.filter(|points| !points.is_empty());
        let text = wire.summary.filter(|text| !text.trim().is_empty());
        let summary = match (points, text) {
            (Some(points), _) => Some(SummaryContent::Points(points)),
            (None, Some(text)) => Some(SummaryContent::Text(text)),
            (None, None) => None,
        };

        Self {
            title: wire.title,
            sections: wire.available_sections,
            summary,
        }
    }
}
