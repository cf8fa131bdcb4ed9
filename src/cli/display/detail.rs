//! Detail view builder for key-value display.

use console::style;

/// A builder for detail views (key-value display).
pub struct DetailView {
    title: String,
    sections: Vec<DetailSection>,
}

struct DetailSection {
    header: Option<String>,
    fields: Vec<(String, String)>,
    items: Vec<String>,
}

impl DetailSection {
    fn new(header: Option<String>) -> Self {
        Self {
            header,
            fields: vec![],
            items: vec![],
        }
    }
}

impl DetailView {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            sections: vec![DetailSection::new(None)],
        }
    }

    /// Add a key-value field to the current section.
    pub fn field(mut self, key: &str, value: &str) -> Self {
        if let Some(section) = self.sections.last_mut() {
            section.fields.push((key.to_string(), value.to_string()));
        }
        self
    }

    /// Start a new named section with a header.
    pub fn section(mut self, header: &str) -> Self {
        self.sections.push(DetailSection::new(Some(header.to_string())));
        self
    }

    /// Add a bullet-point item to the current section.
    pub fn item(mut self, text: &str) -> Self {
        if let Some(section) = self.sections.last_mut() {
            section.items.push(text.to_string());
        }
        self
    }

    pub fn render(&self) -> String {
        let mut lines = vec![style(&self.title).bold().to_string()];
        let key_width = self
            .sections
            .iter()
            .flat_map(|s| s.fields.iter())
            .map(|(k, _)| k.len())
            .max()
            .unwrap_or(12);

        for section in &self.sections {
            if let Some(header) = &section.header {
                lines.push(String::new());
                lines.push(style(header).bold().underlined().to_string());
            }
            for (key, value) in &section.fields {
                // Pad before styling so ANSI codes don't skew alignment.
                let padded = format!("{:<width$}", format!("{key}:"), width = key_width + 1);
                lines.push(format!("  {}  {}", style(padded).bold(), value));
            }
            for item in &section.items {
                lines.push(format!("  {} {}", style("\u{2022}").dim(), item));
            }
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_sections() {
        console::set_colors_enabled(false);
        let text = DetailView::new("Profile")
            .field("Name", "Sam")
            .field("Type", "ENFP")
            .section("Interests")
            .item("Music")
            .render();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Profile");
        assert_eq!(lines[1], "  Name:  Sam");
        assert_eq!(lines[2], "  Type:  ENFP");
        assert_eq!(lines[4], "Interests");
        assert_eq!(lines[5], "  \u{2022} Music");
    }
}
