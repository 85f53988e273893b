pub mod error;
pub mod sizer;
pub mod spiral;
pub mod types;

pub use error::LayoutError;
pub use sizer::{ApproxMeasure, FontMeasure, TagSizer, TextMeasure, font_size_for_weight};
pub use spiral::{ArchimedeanSpiral, PointSource};
pub use types::{Cloud, PlacedTag, Point, Rect, Size};

use std::cmp::Ordering;

use crate::config::CloudConfig;
use crate::tags::Tag;
use crate::theme::Theme;

/// Reject unusable configuration before any measurement or placement work.
pub fn validate_config(config: &CloudConfig) -> Result<(), LayoutError> {
    fn invalid(message: &str) -> Result<(), LayoutError> {
        Err(LayoutError::InvalidConfiguration(message.to_string()))
    }

    if config.min_font_size <= 0.0 {
        return invalid("minFontSize must be positive");
    }
    if config.max_font_size < config.min_font_size {
        return invalid("maxFontSize must be >= minFontSize");
    }
    if config.rectangle_margin < 0.0 {
        return invalid("rectangleMargin must not be negative");
    }
    if config.spiral.angle_step <= 0.0 {
        return invalid("spiralAngleStep must be positive");
    }
    if config.spiral.radius_coefficient <= 0.0 {
        return invalid("spiralRadiusCoefficient must be positive");
    }
    if config.spiral.max_placement_radius <= 0.0 {
        return invalid("maxPlacementRadius must be positive");
    }
    Ok(())
}

/// Places sized tags one at a time: walk the point source outward, test the
/// candidate rectangle against everything already committed, accept the
/// first overlap-free position. Placement decisions depend on all prior
/// placements, so a run is strictly sequential.
pub struct CloudLayouter<P: PointSource> {
    pointer: P,
    max_placement_radius: f32,
    reuse_spiral: bool,
}

impl CloudLayouter<ArchimedeanSpiral> {
    pub fn from_config(config: &CloudConfig) -> Result<Self, LayoutError> {
        validate_config(config)?;
        let spiral = ArchimedeanSpiral::new(
            config.spiral.angle_step,
            config.spiral.radius_coefficient,
        );
        Ok(Self::new(
            spiral,
            config.spiral.max_placement_radius,
            config.spiral.reuse_spiral,
        ))
    }
}

impl<P: PointSource> CloudLayouter<P> {
    pub fn new(pointer: P, max_placement_radius: f32, reuse_spiral: bool) -> Self {
        Self {
            pointer,
            max_placement_radius,
            reuse_spiral,
        }
    }

    /// Lay out every tag or fail the whole run. `sized` must already be in
    /// descending-weight order; the output keeps that order.
    pub fn build_cloud(&mut self, sized: Vec<(Tag, Size)>) -> Result<Cloud, LayoutError> {
        let mut cloud = Cloud::new();
        self.pointer.reset();
        for (tag, size) in sized {
            if !self.reuse_spiral {
                self.pointer.reset();
            }
            let rect = self.find_position(&tag.text, size, &cloud)?;
            cloud.push(PlacedTag { tag, rect });
        }
        Ok(cloud)
    }

    fn find_position(
        &mut self,
        text: &str,
        size: Size,
        cloud: &Cloud,
    ) -> Result<Rect, LayoutError> {
        loop {
            let center = self.pointer.next_point();
            if center.distance_from_origin() > self.max_placement_radius {
                return Err(LayoutError::PlacementExhausted {
                    text: text.to_string(),
                    max_radius: self.max_placement_radius,
                });
            }
            let candidate = Rect::new(center, size);
            if cloud.iter().all(|placed| !placed.rect.overlaps(&candidate)) {
                return Ok(candidate);
            }
        }
    }
}

/// Full pipeline for a batch of weighted tags: validate, size through the
/// measurement capability, sort heaviest-first so the most significant
/// words claim the low-radius positions, then place.
pub fn compute_cloud<M: TextMeasure>(
    tags: &[Tag],
    measure: M,
    theme: &Theme,
    config: &CloudConfig,
) -> Result<Cloud, LayoutError> {
    validate_config(config)?;
    let sizer = TagSizer::new(
        measure,
        &theme.font_family,
        config.min_font_size,
        config.max_font_size,
        config.rectangle_margin,
    );
    let mut sized = Vec::with_capacity(tags.len());
    for tag in tags {
        let size = sizer.size_tag(tag)?;
        sized.push((tag.clone(), size));
    }
    sized.sort_by(|a, b| {
        b.0.weight
            .partial_cmp(&a.0.weight)
            .unwrap_or(Ordering::Equal)
    });

    let mut layouter = CloudLayouter::from_config(config)?;
    layouter.build_cloud(sized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpiralConfig;

    fn tag(text: &str, weight: f32) -> Tag {
        Tag {
            text: text.to_string(),
            frequency: (weight * 10.0) as u32,
            weight,
        }
    }

    fn layouter(max_radius: f32) -> CloudLayouter<ArchimedeanSpiral> {
        CloudLayouter::new(ArchimedeanSpiral::new(0.3, 1.5), max_radius, false)
    }

    fn sized(entries: &[(&str, f32, f32, f32)]) -> Vec<(Tag, Size)> {
        entries
            .iter()
            .map(|(text, weight, w, h)| (tag(text, *weight), Size::new(*w, *h)))
            .collect()
    }

    fn assert_no_overlaps(cloud: &Cloud) {
        let placed = cloud.tags();
        for i in 0..placed.len() {
            for j in (i + 1)..placed.len() {
                assert!(
                    !placed[i].rect.overlaps(&placed[j].rect),
                    "{} overlaps {}",
                    placed[i].tag.text,
                    placed[j].tag.text
                );
            }
        }
    }

    #[test]
    fn first_tag_lands_exactly_at_the_origin() {
        let cloud = layouter(1000.0)
            .build_cloud(sized(&[("first", 1.0, 40.0, 16.0)]))
            .unwrap();
        assert_eq!(cloud.len(), 1);
        assert_eq!(cloud.tags()[0].rect.center, Point::origin());
    }

    #[test]
    fn placed_rectangles_never_overlap() {
        let entries = sized(&[
            ("alpha", 1.0, 80.0, 24.0),
            ("beta", 0.8, 64.0, 20.0),
            ("gamma", 0.6, 48.0, 18.0),
            ("delta", 0.4, 40.0, 14.0),
            ("epsilon", 0.2, 24.0, 12.0),
        ]);
        let cloud = layouter(5000.0).build_cloud(entries).unwrap();
        assert_eq!(cloud.len(), 5);
        assert_no_overlaps(&cloud);
    }

    #[test]
    fn equal_sized_tags_are_placed_at_non_decreasing_radii() {
        let entries = sized(&[
            ("one", 1.0, 30.0, 12.0),
            ("two", 1.0, 30.0, 12.0),
            ("three", 1.0, 30.0, 12.0),
            ("four", 1.0, 30.0, 12.0),
        ]);
        let cloud = layouter(5000.0).build_cloud(entries).unwrap();
        let mut previous = 0.0_f32;
        for placed in &cloud {
            let radius = placed.rect.center.distance_from_origin();
            assert!(radius >= previous);
            previous = radius;
        }
    }

    #[test]
    fn layout_is_deterministic() {
        let entries = sized(&[
            ("alpha", 1.0, 70.0, 22.0),
            ("beta", 0.7, 50.0, 18.0),
            ("gamma", 0.4, 30.0, 14.0),
        ]);
        let first = layouter(5000.0).build_cloud(entries.clone()).unwrap();
        let second = layouter(5000.0).build_cloud(entries).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn exhausted_search_fails_the_whole_run() {
        let entries = sized(&[
            ("wide", 1.0, 100.0, 40.0),
            ("also-wide", 0.9, 100.0, 40.0),
        ]);
        let err = layouter(10.0).build_cloud(entries).unwrap_err();
        assert!(matches!(err, LayoutError::PlacementExhausted { .. }));
    }

    #[test]
    fn reusing_the_spiral_still_avoids_overlaps() {
        let entries = sized(&[
            ("alpha", 1.0, 60.0, 20.0),
            ("beta", 0.6, 40.0, 16.0),
            ("gamma", 0.3, 30.0, 12.0),
        ]);
        let mut layouter =
            CloudLayouter::new(ArchimedeanSpiral::new(0.3, 1.5), 5000.0, true);
        let cloud = layouter.build_cloud(entries).unwrap();
        assert_eq!(cloud.len(), 3);
        assert_no_overlaps(&cloud);
    }

    #[test]
    fn compute_cloud_orders_by_descending_weight() {
        let theme = Theme::modern();
        let config = CloudConfig::default();
        let tags = vec![tag("light", 0.2), tag("heavy", 1.0), tag("middle", 0.6)];
        let cloud = compute_cloud(&tags, ApproxMeasure, &theme, &config).unwrap();
        let order: Vec<&str> = cloud
            .iter()
            .map(|placed| placed.tag.text.as_str())
            .collect();
        assert_eq!(order, vec!["heavy", "middle", "light"]);
        assert_eq!(cloud.tags()[0].rect.center, Point::origin());
    }

    #[test]
    fn invalid_configuration_is_rejected_before_placement() {
        let base = CloudConfig::default();

        let zero_step = CloudConfig {
            spiral: SpiralConfig {
                angle_step: 0.0,
                ..base.spiral.clone()
            },
            ..base.clone()
        };
        assert!(matches!(
            validate_config(&zero_step),
            Err(LayoutError::InvalidConfiguration(_))
        ));

        let inverted_fonts = CloudConfig {
            min_font_size: 30.0,
            max_font_size: 10.0,
            ..base.clone()
        };
        assert!(matches!(
            validate_config(&inverted_fonts),
            Err(LayoutError::InvalidConfiguration(_))
        ));

        let negative_coefficient = CloudConfig {
            spiral: SpiralConfig {
                radius_coefficient: -1.0,
                ..base.spiral.clone()
            },
            ..base.clone()
        };
        assert!(matches!(
            validate_config(&negative_coefficient),
            Err(LayoutError::InvalidConfiguration(_))
        ));

        let negative_margin = CloudConfig {
            rectangle_margin: -0.5,
            ..base.clone()
        };
        assert!(matches!(
            validate_config(&negative_margin),
            Err(LayoutError::InvalidConfiguration(_))
        ));

        assert!(validate_config(&base).is_ok());
    }

    #[test]
    fn measurement_failure_aborts_the_run() {
        struct NoMeasure;
        impl TextMeasure for NoMeasure {
            fn measure(&self, _: &str, _: &str, _: f32) -> Option<Size> {
                None
            }
        }

        let theme = Theme::modern();
        let config = CloudConfig::default();
        let tags = vec![tag("word", 1.0)];
        let err = compute_cloud(&tags, NoMeasure, &theme, &config).unwrap_err();
        assert!(matches!(err, LayoutError::MeasurementUnavailable { .. }));
    }
}
