//! Demo binary: a page with two mirrored fields, editable in the terminal.
//!
//! Esc quits, F2 cycles focus between surfaces, Ctrl+S synchronizes the
//! surfaces into their fields and "submits" the form (shown in the status
//! line).

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use fieldmirror::{BindingManager, KeyOutcome, SurfaceWidget};
use fieldmirror_config::Config;
use fieldmirror_page::{Page, PlainField};

fn demo_page() -> Page {
    let mut page = Page::new("/files/site.css");
    let form = page.add_form(None);

    let styles = page.add_container(Some(form), true);
    page.add_field(
        Some(styles),
        PlainField::new("content.css", "body {\n  margin: 0 auto;\n  max-width: 60ch;\n}\n")
            .with_autofocus(),
    );

    let data = page.add_container(Some(form), true);
    page.add_field(
        Some(data),
        PlainField::new("data.json", "{\n  \"title\": \"Home\"\n}\n"),
    );

    page
}

fn init_logging(config: &Config) {
    let path = match &config.logging.file_path {
        Some(p) => std::path::PathBuf::from(p),
        None => match fieldmirror_config::get_data_dir() {
            Ok(dir) => dir.join("fieldmirror.log"),
            Err(_) => return,
        },
    };
    let level = config
        .logging
        .min_level
        .parse()
        .unwrap_or(fieldmirror_logger::LogLevel::Info);
    fieldmirror_logger::init(path, level);
}

fn main() -> Result<()> {
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Using default configuration: {e}");
        Config::default()
    });
    init_logging(&config);

    let mut page = demo_page();
    let mut manager = BindingManager::with_default_store(config);
    manager.attach_all(&mut page);

    let mut terminal = ratatui::init();
    let mut status = String::from("Esc quit | F2 switch field | Ctrl+S save");

    loop {
        terminal.draw(|frame| {
            let mut constraints: Vec<Constraint> = manager
                .bindings()
                .iter()
                .map(|b| Constraint::Min(b.surface.options().min_height))
                .collect();
            constraints.push(Constraint::Length(1));
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints(constraints)
                .split(frame.area());

            for (i, binding) in manager.bindings().iter().enumerate() {
                let widget = SurfaceWidget::new(&binding.surface, binding.content)
                    .title(binding.field_name.as_str())
                    .focused(manager.focused() == Some(i));
                frame.render_widget(widget, chunks[i]);
            }

            let status_line = Paragraph::new(Line::from(status.as_str()))
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(status_line, chunks[chunks.len() - 1]);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Esc => break,
                KeyCode::F(2) => manager.focus_next(),
                _ => match manager.handle_key(&mut page, key) {
                    KeyOutcome::Submitted { fields, .. } => {
                        let names: Vec<&str> =
                            fields.iter().map(|(name, _)| name.as_str()).collect();
                        status = format!("Saved: {}", names.join(", "));
                    }
                    KeyOutcome::Edited | KeyOutcome::Ignored => {}
                },
            }
        }
    }

    ratatui::restore();
    Ok(())
}
