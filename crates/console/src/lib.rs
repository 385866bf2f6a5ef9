pub mod colors;
pub mod draw;

pub use colors::ColorScheme;
pub use draw::ConsolePresenter;

#[cfg(test)]
mod tests {
    use super::*;
    use sysmonlog_core::{Event, MetricValue, Metrics, Presenter};

    fn render(event: &Event) -> String {
        let mut presenter = ConsolePresenter::new(Vec::new(), ColorScheme::new(true)).without_clear();
        presenter.display(event).unwrap();
        String::from_utf8(presenter.into_inner()).unwrap()
    }

    fn strip_ansi(text: &str) -> String {
        let mut out = String::new();
        let mut chars = text.chars();
        while let Some(c) = chars.next() {
            if c == '\u{1b}' {
                // skip CSI sequence up to its final byte
                for c in chars.by_ref() {
                    if c.is_ascii_alphabetic() {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn test_frame_layout() {
        let metrics: Metrics = [
            ("CPU_Usage%", MetricValue::Float(42.0)),
            ("CPU_Temperature", MetricValue::not_available()),
        ]
        .into_iter()
        .collect();
        let event = Event::new("00000001abcdefghi", metrics);

        let text = strip_ansi(&render(&event));
        let lines: Vec<&str> = text.lines().collect();
        let rule = "=".repeat(draw::FRAME_WIDTH);

        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], rule);
        assert_eq!(lines[1].trim(), draw::TITLE);
        assert_eq!(lines[2], rule);
        assert_eq!(lines[3], "CPU_Usage%: 42.0");
        assert_eq!(lines[4], "CPU_Temperature: N/A");
        assert_eq!(lines[5], rule);
    }

    #[test]
    fn test_stop_notice() {
        let mut presenter = ConsolePresenter::new(Vec::new(), ColorScheme::new(true));
        presenter.stopped().unwrap();
        let text = strip_ansi(&String::from_utf8(presenter.into_inner()).unwrap());
        assert_eq!(text.trim(), draw::STOP_NOTICE);
    }
}
