use crossterm::style::Color;

/// Color scheme for the console frame
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScheme {
    pub border: Color,
    pub title: Color,
    pub label: Color,
    pub value: Color,
    pub unavailable: Color,
    pub notice: Color,
    pub stop: Color,
}

impl ColorScheme {
    pub fn new(no_color: bool) -> Self {
        if no_color {
            Self::no_color()
        } else {
            Self::standard()
        }
    }

    fn standard() -> Self {
        Self {
            border: Color::Blue,
            title: Color::Cyan,
            label: Color::Green,
            value: Color::White,
            unavailable: Color::DarkGrey,
            notice: Color::Yellow,
            stop: Color::Red,
        }
    }

    fn no_color() -> Self {
        Self {
            border: Color::Reset,
            title: Color::Reset,
            label: Color::Reset,
            value: Color::Reset,
            unavailable: Color::Reset,
            notice: Color::Reset,
            stop: Color::Reset,
        }
    }

    pub fn is_plain(&self) -> bool {
        *self == Self::no_color()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_scheme_creation() {
        let scheme = ColorScheme::new(false);
        assert_eq!(scheme.label, Color::Green);
        assert!(!scheme.is_plain());

        let no_color_scheme = ColorScheme::new(true);
        assert!(no_color_scheme.is_plain());
    }
}
