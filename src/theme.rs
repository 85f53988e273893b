use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub background: String,
    pub text_color: String,
    /// Fill colors cycled across placed words in placement order.
    pub word_palette: Vec<String>,
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            font_family: "\"trebuchet ms\", verdana, arial, sans-serif".to_string(),
            background: "#FFFFFF".to_string(),
            text_color: "#333333".to_string(),
            word_palette: vec![
                "#1F3A93".to_string(),
                "#C0392B".to_string(),
                "#1E824C".to_string(),
                "#AA8F00".to_string(),
                "#6C3483".to_string(),
                "#2574A9".to_string(),
            ],
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            background: "#FFFFFF".to_string(),
            text_color: "#1C2430".to_string(),
            word_palette: vec![
                "#2B6CB0".to_string(),
                "#2C7A7B".to_string(),
                "#6B46C1".to_string(),
                "#B7791F".to_string(),
                "#C53030".to_string(),
                "#2F855A".to_string(),
                "#4A5568".to_string(),
            ],
        }
    }

    /// Palette color for the word at `index`, falling back to the plain
    /// text color when no palette is configured.
    pub fn word_color(&self, index: usize) -> &str {
        if self.word_palette.is_empty() {
            &self.text_color
        } else {
            &self.word_palette[index % self.word_palette.len()]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_cycles() {
        let theme = Theme::modern();
        let len = theme.word_palette.len();
        assert_eq!(theme.word_color(0), theme.word_color(len));
    }

    #[test]
    fn empty_palette_falls_back_to_text_color() {
        let theme = Theme {
            word_palette: Vec::new(),
            ..Theme::classic()
        };
        assert_eq!(theme.word_color(3), theme.text_color);
    }
}
