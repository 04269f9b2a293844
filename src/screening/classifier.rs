/// Keyword-based meme coin detection.
#[derive(Debug, Clone)]
pub struct MemeClassifier {
    keywords: Vec<String>,
}

impl MemeClassifier {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// True when any keyword is a substring of the case-folded name or symbol.
    pub fn is_meme(&self, name: &str, symbol: &str) -> bool {
        let name = name.to_lowercase();
        let symbol = symbol.to_lowercase();
        self.keywords
            .iter()
            .any(|k| name.contains(k.as_str()) || symbol.contains(k.as_str()))
    }
}
