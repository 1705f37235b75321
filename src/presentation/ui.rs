use crate::application::{step_fields, App, AppMode, BuilderPane, QuoteStep};
use crate::domain::{Availability, Field};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);

    match app.mode {
        AppMode::Catalog => render_catalog(f, app, chunks[1]),
        AppMode::Builder | AppMode::BasketNote => render_builder(f, app, chunks[1]),
        AppMode::Quote
        | AppMode::AttachFile
        | AppMode::RemoveAttachment
        | AppMode::ExportRecap => render_quote(f, app, chunks[1]),
        AppMode::Help => render_catalog(f, app, chunks[1]),
    }

    render_status_bar(f, app, chunks[2]);

    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let screen = match app.mode {
        AppMode::Catalog | AppMode::Help => "Packs".to_string(),
        AppMode::Builder | AppMode::BasketNote => {
            let base = app
                .builder_pack_id
                .as_deref()
                .and_then(|id| app.catalog.get(id))
                .map(|p| p.title.clone())
                .unwrap_or_else(|| "Pack Personnalise".to_string());
            format!("Builder - {}", base)
        }
        AppMode::Quote
        | AppMode::AttachFile
        | AppMode::RemoveAttachment
        | AppMode::ExportRecap => {
            if app.quote_step == QuoteStep::Success {
                "Quote request".to_string()
            } else {
                format!(
                    "Quote request - step {}/3: {}",
                    app.quote_step.number(),
                    app.quote_step.title()
                )
            }
        }
    };
    let header = Paragraph::new(format!("devis - Terminal Quote Builder | {}", screen))
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_catalog(f: &mut Frame, app: &App, area: Rect) {
    let header_row = Row::new(vec![
        Cell::from("Pack").style(Style::default().fg(Color::Yellow)),
        Cell::from("Items").style(Style::default().fg(Color::Yellow)),
        Cell::from("Total").style(Style::default().fg(Color::Yellow)),
        Cell::from("Discount").style(Style::default().fg(Color::Yellow)),
        Cell::from("Availability").style(Style::default().fg(Color::Yellow)),
    ])
    .height(1);

    let mut rows = vec![header_row];
    for (index, pack) in app.catalog.packs().iter().enumerate() {
        let style = if index == app.selected_pack {
            Style::default().bg(Color::Blue).fg(Color::White)
        } else {
            Style::default()
        };
        let availability_style = match pack.availability {
            Availability::InStock => Style::default().fg(Color::Green),
            Availability::Limited => Style::default().fg(Color::Yellow),
            Availability::OutOfStock => Style::default().fg(Color::Red),
        };
        rows.push(
            Row::new(vec![
                Cell::from(pack.title.clone()).style(style),
                Cell::from(format!("{}", pack.items.len())).style(style),
                Cell::from(format!("{:.2} TND", pack.total_price)).style(style),
                Cell::from(format!("-{:.0}%", pack.discount_percent)).style(style),
                Cell::from(pack.availability.label()).style(availability_style),
            ])
            .height(1),
        );
    }

    let widths = [
        Constraint::Length(24),
        Constraint::Length(7),
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Min(12),
    ];
    let table = Table::new(rows, widths)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Nos packs Complet"),
        )
        .column_spacing(1);
    f.render_widget(table, area);
}

fn render_builder(f: &mut Frame, app: &App, area: Rect) {
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_shelf(f, app, panes[0]);
    render_basket(f, app, panes[1]);
}

fn render_shelf(f: &mut Frame, app: &App, area: Rect) {
    let mut rows = Vec::new();
    for (index, product) in app.shelf.iter().enumerate() {
        let style = if index == app.selected_shelf_item
            && app.builder_pane == BuilderPane::Shelf
            && app.mode == AppMode::Builder
        {
            Style::default().bg(Color::Blue).fg(Color::White)
        } else {
            Style::default()
        };
        let perso = if product.is_personalizable { "perso" } else { "" };
        rows.push(
            Row::new(vec![
                Cell::from(product.name.clone()).style(style),
                Cell::from(format!("{:.2} TND", product.starting_price)).style(style),
                Cell::from(perso).style(style),
            ])
            .height(1),
        );
    }

    let border_style = if app.builder_pane == BuilderPane::Shelf {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let widths = [
        Constraint::Min(20),
        Constraint::Length(12),
        Constraint::Length(6),
    ];
    let table = Table::new(rows, widths)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title("Shelf"),
        )
        .column_spacing(1);
    f.render_widget(table, area);
}

fn render_basket(f: &mut Frame, app: &App, area: Rect) {
    // Highlight while something is carried over the basket.
    let border_style = if app.drag_over_basket {
        Style::default().fg(Color::Yellow)
    } else if app.builder_pane == BuilderPane::Basket {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let title = format!(
        "Basket - {} item(s), {:.2} TND",
        app.basket_items.len(),
        app.basket_total()
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);

    if app.basket_items.is_empty() {
        let placeholder = Paragraph::new(
            "Composez votre pack\n\nPick up items from the shelf and drop them here to \
             build your personalized pack.",
        )
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::DarkGray))
        .block(block);
        f.render_widget(placeholder, area);
        return;
    }

    let mut lines = Vec::new();
    for (index, item) in app.basket_items.iter().enumerate() {
        let marker = if index == app.selected_basket_item
            && app.builder_pane == BuilderPane::Basket
            && app.mode == AppMode::Builder
        {
            "> "
        } else {
            "  "
        };
        lines.push(format!(
            "{}{} - {:.2} TND",
            marker, item.name, item.starting_price
        ));
    }
    if !app.basket_note.is_empty() {
        lines.push(String::new());
        lines.push(format!("Note: {}", app.basket_note));
    }
    if app.mode == AppMode::BasketNote {
        lines.push(String::new());
        lines.push(format!("Editing note: {}", app.input));
    }

    let list = Paragraph::new(lines.join("\n"))
        .wrap(Wrap { trim: false })
        .block(block);
    f.render_widget(list, area);
}

fn render_quote(f: &mut Frame, app: &App, area: Rect) {
    if app.quote_step == QuoteStep::Success {
        render_success(f, app, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .split(area);

    render_step_indicator(f, app, chunks[0]);
    render_designs_summary(f, app, chunks[1]);
    render_step_body(f, app, chunks[2]);
}

fn render_step_indicator(f: &mut Frame, app: &App, area: Rect) {
    let current = app.quote_step.number();
    let mut parts = Vec::new();
    for (number, name) in [(1u8, "Contact"), (2, "Product"), (3, "Finalization")] {
        let marker = if current > number {
            format!("[x] {}", name)
        } else if current == number {
            format!("[{}] {}", number, name)
        } else {
            format!("[ ] {}", name)
        };
        parts.push(marker);
    }
    let indicator =
        Paragraph::new(parts.join("  ->  ")).style(Style::default().fg(Color::Magenta));
    f.render_widget(indicator, area);
}

fn render_designs_summary(f: &mut Frame, app: &App, area: Rect) {
    let title = format!(
        "Devis - {} design(s), {} unit(s) total",
        app.designs.len(),
        app.total_quantity()
    );
    let mut lines = Vec::new();
    for design in &app.designs {
        lines.push(format!(
            "{}  {}  x{}  size {}",
            design.design_number, design.product_name, design.quantity, design.selected_size
        ));
    }
    if lines.is_empty() {
        lines.push("No designs yet - build a pack first".to_string());
    }
    let summary = Paragraph::new(lines.join("\n"))
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(summary, area);
}

fn render_step_body(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();

    for (index, field) in step_fields(app.quote_step).iter().enumerate() {
        let focused = index == app.focused_field && app.mode == AppMode::Quote;
        let value = if focused {
            app.input.clone()
        } else {
            field_display_value(app, *field)
        };
        let marker = if focused { "> " } else { "  " };
        lines.push(format!("{}{}: {}", marker, field.label(), value));
        if let Some(error) = app.field_errors.iter().find(|e| e.field == *field) {
            lines.push(format!("      ! {}", error.message));
        }
    }

    if app.quote_step == QuoteStep::Review {
        lines.push(String::new());
        lines.push(format!("Attached files ({}):", app.attachments.len()));
        if app.attachments.is_empty() {
            lines.push("  none - Ctrl+A to add (JPG, PNG, GIF, PDF, DOC, DOCX; max 5MB)".to_string());
        } else {
            for (index, attachment) in app.attachments.iter().enumerate() {
                lines.push(format!(
                    "  {}. {} ({} KB, {})",
                    index + 1,
                    attachment.name,
                    attachment.size / 1024,
                    attachment.mime
                ));
            }
        }
        lines.push(String::new());
        let submit = if app.quote_enabled() {
            "Ctrl+S: send the request".to_string()
        } else {
            "Submission disabled - add at least one design".to_string()
        };
        lines.push(submit);
    }

    if app.quote_step == QuoteStep::Submitting {
        lines.push(String::new());
        lines.push("Sending request...".to_string());
    }

    let body = Paragraph::new(lines.join("\n"))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(app.quote_step.title()),
        );
    f.render_widget(body, area);
}

fn render_success(f: &mut Frame, app: &App, area: Rect) {
    let reference = app.quote_reference.as_deref().unwrap_or("-");
    let text = format!(
        "Request sent successfully.\n\n\
         We have received your quote request and will contact you shortly.\n\n\
         Reference: {}\n\n\
         c: copy reference  |  Enter: back to home",
        reference
    );
    let confirmation = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Green))
        .block(Block::default().borders(Borders::ALL).title("Confirmation"));
    f.render_widget(confirmation, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let text = match app.mode {
        AppMode::Catalog => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                "Enter: open builder | b: blank builder | g: my quote drafts | F1/?: help | q: quit"
                    .to_string()
            }
        }
        AppMode::Builder => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                "Enter: pick up / drop | Tab: switch pane | d: remove item | n: note | \
                 v: request quote | Esc: back"
                    .to_string()
            }
        }
        AppMode::BasketNote => format!("Note: {} (Enter to save, Esc to cancel)", app.input),
        AppMode::Quote => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                match app.quote_step {
                    QuoteStep::Review => "Tab: next field | Ctrl+A: attach | Ctrl+X: remove file | \
                                          Ctrl+E: export recap | Ctrl+S: send | Ctrl+P: back"
                        .to_string(),
                    QuoteStep::Success => "c: copy reference | Enter: back to home".to_string(),
                    _ => "Tab: next field | Ctrl+N: next step | Ctrl+P: previous step | \
                          Esc: leave form"
                        .to_string(),
                }
            }
        }
        AppMode::AttachFile => format!(
            "Attach files (separate with ';'): {} (Enter to add, Esc to cancel)",
            app.filename_input
        ),
        AppMode::RemoveAttachment => format!(
            "Remove attachment number: {} (Enter to remove, Esc to cancel)",
            app.filename_input
        ),
        AppMode::ExportRecap => format!(
            "Export recap as: {} (Enter to export, Esc to cancel)",
            app.filename_input
        ),
        AppMode::Help => "Up/Down: scroll | Esc/q: close help".to_string(),
    };

    let style = match app.mode {
        AppMode::BasketNote => Style::default().fg(Color::Green),
        AppMode::AttachFile | AppMode::RemoveAttachment | AppMode::ExportRecap => {
            Style::default().fg(Color::Yellow)
        }
        AppMode::Help => Style::default().fg(Color::Cyan),
        _ => Style::default(),
    };
    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(style);
    f.render_widget(status, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(
                    "devis Help (Line {}/{})",
                    start_line + 1,
                    help_lines.len()
                ))
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

fn field_display_value(app: &App, field: Field) -> String {
    match field {
        Field::Name => app.form.name.clone(),
        Field::Email => app.form.email.clone(),
        Field::Phone => app.form.phone.clone(),
        Field::Company => app.form.company.clone(),
        Field::ProductName => app.form.product_name.clone(),
        Field::Quantity => app.form.quantity.clone(),
        Field::Size => app.form.size.clone(),
        Field::Description => app.form.description.clone(),
        Field::Deadline => app.form.deadline.clone(),
        Field::AdditionalNotes => app.form.additional_notes.clone(),
    }
}

fn get_help_text() -> String {
    r#"DEVIS - TERMINAL QUOTE BUILDER

=== OVERVIEW ===
Browse the pack catalog, compose a personalized pack in the builder,
then request a quote with the three-step form. Your designs are kept
for the whole session until the request is sent.

=== CATALOG SCREEN ===
Up/Down         Select a pack
Enter           Open the builder seeded with the pack's items
b               Open an empty builder
g               Open the quote form with your stored drafts
q               Quit application

=== BUILDER SCREEN ===
Tab             Switch between shelf and basket
Up/Down         Move the selection in the focused pane
Enter (shelf)   Pick up the selected product
Enter (basket)  Drop the carried product into the basket
Esc             Put the carried product back / leave the builder
d               Remove the selected basket item
n               Edit the personalization note
v               Hand the basket over to the quote form

=== QUOTE FORM ===
Three steps: contact information, product details, finalization.
Tab / Down      Next field          Shift+Tab / Up   Previous field
Ctrl+N          Next step (validates the current step's fields)
Ctrl+P          Previous step (always allowed)
Esc             Leave the form (drafts are kept for this session)

Step 3 extras:
Ctrl+A          Attach files - enter paths separated by ';'
                Accepted: JPG, PNG, GIF, PDF, DOC, DOCX. Max 5MB each.
Ctrl+X          Remove an attachment by its number in the list
Ctrl+E          Export a CSV recap of the designs
Ctrl+S          Send the request (needs at least one design)

=== AFTER SENDING ===
The stored drafts are cleared. The confirmation screen shows a
reference number; press c to copy it to the clipboard, Enter to go
back to the catalog.

Note: drafts live only for this session. Closing the terminal without
sending loses them."#
        .to_string()
}
