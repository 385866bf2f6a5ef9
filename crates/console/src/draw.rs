use crate::colors::ColorScheme;
use crossterm::{
    cursor,
    style::{Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
    QueueableCommand,
};
use std::io::{self, Write};
use sysmonlog_core::{Event, MetricValue, Presenter};

pub const FRAME_WIDTH: usize = 50;
pub const TITLE: &str = "System Metrics Monitor";
pub const START_NOTICE: &str = "SCRIPT IS RUNNING, Press CTRL+C to stop script.";
pub const STOP_NOTICE: &str = "Monitoring stopped.";

/// Renders one framed block per event, clearing the screen first
pub struct ConsolePresenter<W: Write> {
    writer: W,
    colors: ColorScheme,
    clear_screen: bool,
}

impl ConsolePresenter<io::Stdout> {
    pub fn stdout(no_color: bool) -> Self {
        Self::new(io::stdout(), ColorScheme::new(no_color))
    }
}

impl<W: Write> ConsolePresenter<W> {
    pub fn new(writer: W, colors: ColorScheme) -> Self {
        Self {
            writer,
            colors,
            clear_screen: true,
        }
    }

    /// Append frames instead of redrawing in place
    pub fn without_clear(mut self) -> Self {
        self.clear_screen = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn line(&mut self, color: crossterm::style::Color, text: &str) -> io::Result<()> {
        self.writer.queue(SetForegroundColor(color))?;
        self.writer.queue(Print(text))?;
        self.writer.queue(ResetColor)?;
        self.writer.queue(Print("\n"))?;
        Ok(())
    }

    fn rule(&mut self) -> io::Result<()> {
        let border = self.colors.border;
        self.line(border, &"=".repeat(FRAME_WIDTH))
    }

    /// Draw the complete frame for one event
    pub fn draw(&mut self, event: &Event) -> io::Result<()> {
        if self.clear_screen {
            self.writer.queue(Clear(ClearType::All))?;
            self.writer.queue(cursor::MoveTo(0, 0))?;
        }

        self.rule()?;
        let title = self.colors.title;
        self.line(title, &format!("{:^width$}", TITLE, width = FRAME_WIDTH))?;
        self.rule()?;

        for (key, value) in event.metrics.iter() {
            self.writer.queue(SetForegroundColor(self.colors.label))?;
            self.writer.queue(Print(format!("{}: ", key)))?;
            let value_color = self.value_color(value);
            self.line(value_color, &value.to_string())?;
        }

        self.rule()?;
        self.writer.flush()
    }

    fn value_color(&self, value: &MetricValue) -> crossterm::style::Color {
        if value.is_not_available() {
            self.colors.unavailable
        } else {
            self.colors.value
        }
    }
}

impl<W: Write> Presenter for ConsolePresenter<W> {
    fn display(&mut self, event: &Event) -> sysmonlog_core::Result<()> {
        Ok(self.draw(event)?)
    }

    fn started(&mut self) -> sysmonlog_core::Result<()> {
        let notice = self.colors.notice;
        self.line(notice, START_NOTICE)?;
        Ok(self.writer.flush()?)
    }

    fn stopped(&mut self) -> sysmonlog_core::Result<()> {
        let stop = self.colors.stop;
        self.line(stop, STOP_NOTICE)?;
        Ok(self.writer.flush()?)
    }
}
