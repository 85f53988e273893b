use crate::config::{CloudConfig, RenderConfig};
use crate::layout::{Cloud, font_size_for_weight};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

pub fn render_svg(
    cloud: &Cloud,
    theme: &Theme,
    cloud_config: &CloudConfig,
    render_config: &RenderConfig,
) -> String {
    let pad = render_config.padding.max(0.0);
    let (view_x, view_y, view_w, view_h) = match cloud.bounds() {
        Some(bounds) => (
            bounds.left() - pad,
            bounds.top() - pad,
            bounds.size.width + pad * 2.0,
            bounds.size.height + pad * 2.0,
        ),
        None => (-100.0, -50.0, 200.0, 100.0),
    };

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{view_w:.2}\" height=\"{view_h:.2}\" viewBox=\"{view_x:.2} {view_y:.2} {view_w:.2} {view_h:.2}\">",
    ));

    svg.push_str(&format!(
        "<rect x=\"{view_x:.2}\" y=\"{view_y:.2}\" width=\"{view_w:.2}\" height=\"{view_h:.2}\" fill=\"{}\"/>",
        render_config.background
    ));

    for (idx, placed) in cloud.iter().enumerate() {
        let font_size = font_size_for_weight(
            placed.tag.weight,
            cloud_config.min_font_size,
            cloud_config.max_font_size,
        );
        let x = placed.rect.center.x;
        let y = placed.rect.center.y;
        svg.push_str(&format!(
            "<text x=\"{x:.2}\" y=\"{y:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{font_size:.2}\" fill=\"{}\">{}</text>",
            theme.font_family,
            theme.word_color(idx),
            escape_xml(&placed.tag.text)
        ));
    }

    svg.push_str("</svg>");
    svg
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
