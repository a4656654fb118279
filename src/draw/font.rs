//! Font descriptor for text rendering.

/// Font configuration for the text tool.
///
/// Describes which font the text overlay commits with, including family name,
/// weight, and style. The size is fixed per surface and passed separately.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    /// Font family name (e.g., "Times", "Monospace")
    pub family: String,

    /// Font weight (e.g., "normal", "bold", "light" or numeric 100-900)
    pub weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    pub style: String,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            family: "Times".to_string(),
            weight: "normal".to_string(),
            style: "normal".to_string(),
        }
    }
}

impl FontDescriptor {
    /// Creates a new font descriptor with the specified parameters.
    pub fn new(family: String, weight: String, style: String) -> Self {
        Self {
            family,
            weight,
            style,
        }
    }

    /// Converts this font descriptor to a Pango font description string.
    ///
    /// Pango sizes without a unit are points; the surface draws in pixels, so the
    /// size is emitted with an explicit `px` suffix.
    ///
    /// Format: "Family Style Weight Sizepx"
    /// Example: "Times 54px" or "Monospace Italic Bold 24px"
    pub fn to_pango_string(&self, size_px: f64) -> String {
        let mut parts = vec![self.family.clone()];

        if self.style.to_lowercase() != "normal" {
            parts.push(capitalize_first(&self.style));
        }

        if self.weight.to_lowercase() != "normal" {
            parts.push(capitalize_first(&self.weight));
        }

        parts.push(format!("{}px", size_px.round() as i32));

        parts.join(" ")
    }
}

/// Capitalizes the first letter of a string.
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pango_string_default() {
        let font = FontDescriptor::default();
        assert_eq!(font.to_pango_string(54.0), "Times 54px");
    }

    #[test]
    fn test_pango_string_italic_bold() {
        let font = FontDescriptor::new(
            "Monospace".to_string(),
            "bold".to_string(),
            "italic".to_string(),
        );
        assert_eq!(font.to_pango_string(24.0), "Monospace Italic Bold 24px");
    }
}
