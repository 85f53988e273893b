use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_STOP_WORDS: [&str; 48] = [
    "a", "an", "the", "and", "or", "but", "nor", "so", "yet", "of", "in", "on", "at", "to",
    "for", "from", "by", "with", "about", "as", "into", "onto", "over", "under", "is", "am",
    "are", "was", "were", "be", "been", "being", "it", "its", "this", "that", "these", "those",
    "i", "you", "he", "she", "we", "they", "not", "no", "do", "does",
];

/// Spiral search parameters. The angle step controls candidate density
/// along the curve, the radius coefficient how fast it opens up, and the
/// max radius bounds the search so a run can never loop forever.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpiralConfig {
    pub angle_step: f32,
    pub radius_coefficient: f32,
    pub max_placement_radius: f32,
    /// Keep the spiral cursor between tags instead of restarting at the
    /// origin for each one. Faster on large batches, less compact.
    pub reuse_spiral: bool,
}

impl Default for SpiralConfig {
    fn default() -> Self {
        Self {
            angle_step: 0.35,
            radius_coefficient: 1.5,
            max_placement_radius: 4000.0,
            reuse_spiral: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudConfig {
    pub min_font_size: f32,
    pub max_font_size: f32,
    /// Padding added on every side of a measured label so neighbors are
    /// not rendered edge-to-edge.
    pub rectangle_margin: f32,
    /// Skip system-font lookup and size labels with the calibrated
    /// approximation. Deterministic across machines.
    pub fast_metrics: bool,
    pub spiral: SpiralConfig,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            min_font_size: 12.0,
            max_font_size: 48.0,
            rectangle_margin: 2.0,
            fast_metrics: false,
            spiral: SpiralConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenizerConfig {
    pub lowercase: bool,
    pub min_word_len: usize,
    pub stop_words: Vec<String>,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            lowercase: true,
            min_word_len: 2,
            stop_words: DEFAULT_STOP_WORDS
                .iter()
                .map(|word| word.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Whitespace between the cloud bounds and the SVG viewBox edge.
    pub padding: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            padding: 20.0,
            background: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub cloud: CloudConfig,
    pub tokenizer: TokenizerConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::classic();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            cloud: CloudConfig::default(),
            tokenizer: TokenizerConfig::default(),
            render,
        }
    }
}

// Everything in the config file is optional; present fields override the
// defaults. The cloud section is flat (spiral knobs alongside font sizes)
// to match the knobs users actually tune together.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariablesFile>,
    cloud: Option<CloudConfigFile>,
    tokenizer: Option<TokenizerConfigFile>,
    render: Option<RenderConfigFile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariablesFile {
    font_family: Option<String>,
    background: Option<String>,
    text_color: Option<String>,
    word_palette: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CloudConfigFile {
    min_font_size: Option<f32>,
    max_font_size: Option<f32>,
    rectangle_margin: Option<f32>,
    fast_metrics: Option<bool>,
    spiral_angle_step: Option<f32>,
    spiral_radius_coefficient: Option<f32>,
    max_placement_radius: Option<f32>,
    reuse_spiral: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenizerConfigFile {
    lowercase: Option<bool>,
    min_word_len: Option<usize>,
    stop_words: Option<Vec<String>>,
    extra_stop_words: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    padding: Option<f32>,
    background: Option<String>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    // Strict JSON first, JSON5 as the lenient fallback (comments,
    // trailing commas).
    let parsed: ConfigFile = match serde_json::from_str(&contents) {
        Ok(parsed) => parsed,
        Err(_) => json5::from_str(&contents)?,
    };
    merge_config_file(&mut config, parsed);
    Ok(config)
}

fn merge_config_file(config: &mut Config, parsed: ConfigFile) {
    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "modern" {
            config.theme = Theme::modern();
        } else if theme_name == "classic" || theme_name == "default" {
            config.theme = Theme::classic();
        }
        config.render.background = config.theme.background.clone();
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v.clone();
            config.render.background = v;
        }
        if let Some(v) = vars.text_color {
            config.theme.text_color = v;
        }
        if let Some(v) = vars.word_palette {
            config.theme.word_palette = v;
        }
    }

    if let Some(cloud) = parsed.cloud {
        if let Some(v) = cloud.min_font_size {
            config.cloud.min_font_size = v;
        }
        if let Some(v) = cloud.max_font_size {
            config.cloud.max_font_size = v;
        }
        if let Some(v) = cloud.rectangle_margin {
            config.cloud.rectangle_margin = v;
        }
        if let Some(v) = cloud.fast_metrics {
            config.cloud.fast_metrics = v;
        }
        if let Some(v) = cloud.spiral_angle_step {
            config.cloud.spiral.angle_step = v;
        }
        if let Some(v) = cloud.spiral_radius_coefficient {
            config.cloud.spiral.radius_coefficient = v;
        }
        if let Some(v) = cloud.max_placement_radius {
            config.cloud.spiral.max_placement_radius = v;
        }
        if let Some(v) = cloud.reuse_spiral {
            config.cloud.spiral.reuse_spiral = v;
        }
    }

    if let Some(tokenizer) = parsed.tokenizer {
        if let Some(v) = tokenizer.lowercase {
            config.tokenizer.lowercase = v;
        }
        if let Some(v) = tokenizer.min_word_len {
            config.tokenizer.min_word_len = v;
        }
        if let Some(v) = tokenizer.stop_words {
            config.tokenizer.stop_words = v;
        }
        if let Some(v) = tokenizer.extra_stop_words {
            config.tokenizer.stop_words.extend(v);
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.padding {
            config.render.padding = v;
        }
        if let Some(v) = render.background {
            config.render.background = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::validate_config;

    fn merge(json: &str) -> Config {
        let mut config = Config::default();
        let parsed: ConfigFile = serde_json::from_str(json).expect("test config parses");
        merge_config_file(&mut config, parsed);
        config
    }

    #[test]
    fn default_config_passes_validation() {
        let config = Config::default();
        assert!(validate_config(&config.cloud).is_ok());
    }

    #[test]
    fn cloud_section_overrides_defaults() {
        let config = merge(
            r#"{"cloud": {"minFontSize": 8, "maxFontSize": 64, "spiralAngleStep": 0.2}}"#,
        );
        assert_eq!(config.cloud.min_font_size, 8.0);
        assert_eq!(config.cloud.max_font_size, 64.0);
        assert_eq!(config.cloud.spiral.angle_step, 0.2);
        // Untouched fields keep their defaults.
        assert_eq!(config.cloud.rectangle_margin, 2.0);
    }

    #[test]
    fn theme_name_selects_preset() {
        let config = merge(r#"{"theme": "modern"}"#);
        assert_eq!(config.theme.font_family, Theme::modern().font_family);
    }

    #[test]
    fn theme_variables_override_preset() {
        let config = merge(
            r##"{"theme": "modern", "themeVariables": {"fontFamily": "Georgia", "background": "#000000"}}"##,
        );
        assert_eq!(config.theme.font_family, "Georgia");
        assert_eq!(config.theme.background, "#000000");
        assert_eq!(config.render.background, "#000000");
    }

    #[test]
    fn extra_stop_words_extend_the_default_list() {
        let config = merge(r#"{"tokenizer": {"extraStopWords": ["lorem", "ipsum"]}}"#);
        assert!(config.tokenizer.stop_words.iter().any(|w| w == "lorem"));
        assert!(config.tokenizer.stop_words.iter().any(|w| w == "the"));
    }

    #[test]
    fn stop_words_replace_the_default_list() {
        let config = merge(r#"{"tokenizer": {"stopWords": ["only"]}}"#);
        assert_eq!(config.tokenizer.stop_words, vec!["only".to_string()]);
    }
}
