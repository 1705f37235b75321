use crate::application::{App, AppMode, BuilderPane, QuoteStep};
use crate::domain::RecapExporter;
use crate::infrastructure::{load_attachment, QuoteGateway, QuotePayload};
use crossterm::event::{KeyCode, KeyModifiers};
use std::io::Write;

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(
        app: &mut App,
        gateway: &dyn QuoteGateway,
        key: KeyCode,
        modifiers: KeyModifiers,
    ) {
        match app.mode {
            AppMode::Catalog => Self::handle_catalog_mode(app, key),
            AppMode::Builder => Self::handle_builder_mode(app, key),
            AppMode::BasketNote => Self::handle_note_mode(app, key),
            AppMode::Quote => Self::handle_quote_mode(app, gateway, key, modifiers),
            AppMode::AttachFile => Self::handle_attach_mode(app, key),
            AppMode::RemoveAttachment => Self::handle_remove_attachment_mode(app, key),
            AppMode::ExportRecap => Self::handle_export_mode(app, key),
            AppMode::Help => Self::handle_help_mode(app, key),
        }
    }

    fn handle_catalog_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => app.select_prev_pack(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next_pack(),
            KeyCode::Enter => app.open_builder_for_selected(),
            KeyCode::Char('b') => app.open_blank_builder(),
            KeyCode::Char('g') => app.open_quote(None),
            KeyCode::F(1) | KeyCode::Char('?') => app.open_help(),
            _ => {}
        }
    }

    fn handle_builder_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Tab => {
                let other = match app.builder_pane {
                    BuilderPane::Shelf => BuilderPane::Basket,
                    BuilderPane::Basket => BuilderPane::Shelf,
                };
                app.focus_pane(other);
            }
            KeyCode::Up | KeyCode::Char('k') => match app.builder_pane {
                BuilderPane::Shelf => app.shelf_up(),
                BuilderPane::Basket => app.basket_up(),
            },
            KeyCode::Down | KeyCode::Char('j') => match app.builder_pane {
                BuilderPane::Shelf => app.shelf_down(),
                BuilderPane::Basket => app.basket_down(),
            },
            KeyCode::Enter => match app.builder_pane {
                BuilderPane::Shelf => app.pick_up_selected(),
                BuilderPane::Basket => {
                    if app.drop_into_basket() {
                        ring_bell();
                    }
                }
            },
            KeyCode::Esc => {
                if app.carrying.is_some() {
                    app.cancel_carry();
                } else {
                    app.mode = AppMode::Catalog;
                }
            }
            KeyCode::Char('d') => {
                if app.builder_pane == BuilderPane::Basket {
                    app.remove_selected_basket_item();
                }
            }
            KeyCode::Char('n') => app.start_note_editing(),
            KeyCode::Char('v') => app.proceed_to_quote(),
            KeyCode::F(1) | KeyCode::Char('?') => app.open_help(),
            _ => {}
        }
    }

    fn handle_note_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.finish_note_editing(),
            KeyCode::Esc => app.cancel_note_editing(),
            KeyCode::Backspace => app.delete_char(),
            KeyCode::Left => app.move_cursor_left(),
            KeyCode::Right => app.move_cursor_right(),
            KeyCode::Char(c) => app.insert_char(c),
            _ => {}
        }
    }

    fn handle_quote_mode(
        app: &mut App,
        gateway: &dyn QuoteGateway,
        key: KeyCode,
        modifiers: KeyModifiers,
    ) {
        if app.quote_step == QuoteStep::Success {
            match key {
                KeyCode::Char('c') => copy_reference(app),
                KeyCode::Enter | KeyCode::Esc => app.return_home(),
                _ => {}
            }
            return;
        }

        if modifiers.contains(KeyModifiers::CONTROL) {
            match key {
                KeyCode::Char('n') => app.next_step(),
                KeyCode::Char('p') => app.prev_step(),
                KeyCode::Char('a') if app.quote_step == QuoteStep::Review => {
                    app.start_attach_file();
                }
                KeyCode::Char('x') if app.quote_step == QuoteStep::Review => {
                    app.start_remove_attachment();
                }
                KeyCode::Char('e') if app.quote_step == QuoteStep::Review => {
                    app.start_export_recap();
                }
                KeyCode::Char('s') if app.quote_step == QuoteStep::Review => {
                    Self::submit(app, gateway);
                }
                _ => {}
            }
            return;
        }

        match key {
            KeyCode::Tab | KeyCode::Down | KeyCode::Enter => app.next_field(),
            KeyCode::BackTab | KeyCode::Up => app.prev_field(),
            KeyCode::Esc => {
                // Drafts stay in the session store; the form can be
                // resumed by coming back.
                app.commit_input();
                app.mode = AppMode::Catalog;
            }
            KeyCode::Backspace => app.delete_char(),
            KeyCode::Left => app.move_cursor_left(),
            KeyCode::Right => app.move_cursor_right(),
            KeyCode::Char(c) => app.insert_char(c),
            _ => {}
        }
    }

    /// Runs the submission synchronously. The call blocks the event loop
    /// for its duration, which is what disables the submit control.
    fn submit(app: &mut App, gateway: &dyn QuoteGateway) {
        if !app.begin_submission() {
            return;
        }
        let payload = QuotePayload {
            form: app.form.clone(),
            designs: app.designs.clone(),
            attachments: app.attachments.clone(),
        };
        let result = gateway.submit(&payload);
        app.set_submission_result(result);
    }

    fn handle_attach_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                let batch: Vec<Result<_, String>> = app
                    .filename_input
                    .split(';')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(load_attachment)
                    .collect();
                if batch.is_empty() {
                    app.cancel_filename_input();
                } else {
                    app.add_attachments(batch);
                    app.mode = AppMode::Quote;
                    app.filename_input.clear();
                    app.cursor_position = 0;
                }
            }
            KeyCode::Esc => app.cancel_filename_input(),
            KeyCode::Backspace => app.filename_delete_char(),
            KeyCode::Char(c) => app.filename_insert_char(c),
            _ => {}
        }
    }

    fn handle_remove_attachment_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.finish_remove_attachment(),
            KeyCode::Esc => app.cancel_filename_input(),
            KeyCode::Backspace => app.filename_delete_char(),
            KeyCode::Char(c) => app.filename_insert_char(c),
            _ => {}
        }
    }

    fn handle_export_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                let filename = if app.filename_input.is_empty() {
                    "devis-recap.csv".to_string()
                } else {
                    app.filename_input.clone()
                };
                let result = RecapExporter::export_designs(&app.designs, &filename);
                app.set_export_result(result);
            }
            KeyCode::Esc => app.cancel_filename_input(),
            KeyCode::Backspace => app.filename_delete_char(),
            KeyCode::Char(c) => app.filename_insert_char(c),
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                app.help_scroll = app.help_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::F(1) | KeyCode::Char('?') => {
                app.close_help();
            }
            _ => {}
        }
    }
}

/// Terminal bell, the drop acknowledgment cue.
fn ring_bell() {
    print!("\x07");
    let _ = std::io::stdout().flush();
}

fn copy_reference(app: &mut App) {
    let Some(reference) = app.quote_reference.clone() else {
        return;
    };
    match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(reference.clone()))
    {
        Ok(()) => {
            app.status_message = Some(format!("Copied {} to clipboard", reference));
        }
        Err(e) => {
            app.status_message = Some(format!("Clipboard unavailable: {}", e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::SimulatedGateway;

    fn press(app: &mut App, key: KeyCode) {
        let gateway = SimulatedGateway::instant();
        InputHandler::handle_key_event(app, &gateway, key, KeyModifiers::NONE);
    }

    fn press_ctrl(app: &mut App, key: KeyCode) {
        let gateway = SimulatedGateway::instant();
        InputHandler::handle_key_event(app, &gateway, key, KeyModifiers::CONTROL);
    }

    #[test]
    fn test_catalog_enter_opens_builder() {
        let mut app = App::default();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, AppMode::Builder);
        assert!(!app.basket_items.is_empty());
    }

    #[test]
    fn test_builder_pick_up_and_drop_via_keys() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('b'));
        assert_eq!(app.mode, AppMode::Builder);

        press(&mut app, KeyCode::Enter); // pick up from shelf
        assert!(app.carrying.is_some());

        press(&mut app, KeyCode::Tab); // move over the basket
        assert!(app.drag_over_basket);

        press(&mut app, KeyCode::Enter); // drop
        assert_eq!(app.basket_items.len(), 1);
        assert!(app.carrying.is_none());
    }

    #[test]
    fn test_builder_escape_cancels_carry_before_leaving() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('b'));
        press(&mut app, KeyCode::Enter);
        assert!(app.carrying.is_some());

        press(&mut app, KeyCode::Esc);
        assert!(app.carrying.is_none());
        assert_eq!(app.mode, AppMode::Builder);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, AppMode::Catalog);
    }

    #[test]
    fn test_quote_typing_edits_focused_field() {
        let mut app = App::default();
        app.open_quote(None);
        for c in "Sami".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.form.name, "Sami");
    }

    #[test]
    fn test_ctrl_n_gates_on_validation() {
        let mut app = App::default();
        app.open_quote(None);
        press_ctrl(&mut app, KeyCode::Char('n'));
        assert_eq!(app.quote_step, QuoteStep::Contact);
        assert!(!app.field_errors.is_empty());
    }

    #[test]
    fn test_ctrl_s_submits_from_review() {
        let mut app = App::default();
        app.open_quote(Some(crate::domain::Design {
            design_number: "PACK-cafe-1".to_string(),
            product_name: "Pack Cafe".to_string(),
            quantity: 2,
            selected_size: "Standard".to_string(),
            items: Vec::new(),
        }));
        app.form.name = "Sami Ben Ali".to_string();
        app.form.email = "sami@atelier.tn".to_string();
        app.form.phone = "21612345".to_string();
        app.form.product_name = "Pack Cafe".to_string();
        app.form.quantity = "2".to_string();
        app.form.size = "Standard".to_string();
        app.form.description = "Broderie du logo sur chaque piece".to_string();
        app.quote_step = QuoteStep::Review;
        app.input.clear();

        press_ctrl(&mut app, KeyCode::Char('s'));
        assert_eq!(app.quote_step, QuoteStep::Success);
        assert!(app.designs.is_empty());
    }

    #[test]
    fn test_help_toggles_from_catalog() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.mode, AppMode::Help);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, AppMode::Catalog);
    }
}
