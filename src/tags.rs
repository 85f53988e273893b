use std::cmp::Ordering;

/// A distinct word with its occurrence count and normalized weight.
///
/// `weight` is the frequency divided by the highest frequency in the batch,
/// so it always falls in `(0, 1]` and the most frequent word gets exactly 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub text: String,
    pub frequency: u32,
    pub weight: f32,
}

/// Turn a frequency table into weighted tags sorted by descending weight.
///
/// The sort is stable, so words with equal frequency keep the order they
/// had in `counts` (first appearance in the source text).
pub fn build_tags(counts: &[(String, u32)]) -> Vec<Tag> {
    let max_frequency = counts.iter().map(|(_, count)| *count).max().unwrap_or(0);
    if max_frequency == 0 {
        return Vec::new();
    }

    let mut tags: Vec<Tag> = counts
        .iter()
        .filter(|(_, count)| *count >= 1)
        .map(|(text, count)| Tag {
            text: text.clone(),
            frequency: *count,
            weight: *count as f32 / max_frequency as f32,
        })
        .collect();

    tags.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap_or(Ordering::Equal));
    tags
}
