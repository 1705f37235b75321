//! Application state management for the terminal quote builder.
//!
//! This module contains the main application state: the screen modes, the
//! pack-builder basket, the quote wizard state machine and the bridge to
//! the session-scoped draft store.

use crate::application::drafts::{DraftStore, MemoryStore};
use crate::domain::{
    attachment_rejection, shelf_products, validate_all, validate_contact, validate_product,
    Attachment, Catalog, Design, DesignItem, DomainError, DomainResult, Field, FieldError,
    FormValues, Product, PACK_DESIGN_PREFIX,
};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

/// Represents the current screen of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Pack catalog overview, the landing screen
    Catalog,
    /// Pack builder with shelf and basket panes
    Builder,
    /// Editing the basket's personalization note
    BasketNote,
    /// Quote request wizard
    Quote,
    /// Entering file paths to attach
    AttachFile,
    /// Entering the position of the attachment to remove
    RemoveAttachment,
    /// Entering a filename for the recap CSV export
    ExportRecap,
    /// Help screen is displayed
    Help,
}

/// Which pane of the builder screen has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderPane {
    Shelf,
    Basket,
}

/// The quote wizard steps, modeled as an explicit state machine.
///
/// Forward transitions go through [`QuoteStep::advance`] and require the
/// current step's validation to pass; backward transitions through
/// [`QuoteStep::retreat`] are unconditional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStep {
    Contact,
    Product,
    Review,
    Submitting,
    Success,
}

impl QuoteStep {
    /// Step number shown in the wizard header. `Submitting` still renders
    /// as step 3.
    pub fn number(&self) -> u8 {
        match self {
            QuoteStep::Contact => 1,
            QuoteStep::Product => 2,
            QuoteStep::Review | QuoteStep::Submitting => 3,
            QuoteStep::Success => 3,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            QuoteStep::Contact => "Contact information",
            QuoteStep::Product => "Product details",
            QuoteStep::Review => "Files and confirmation",
            QuoteStep::Submitting => "Sending request",
            QuoteStep::Success => "Request sent",
        }
    }

    /// Moves forward one step if the step's validation produced no
    /// errors; stays put otherwise. Submission states never advance this
    /// way.
    ///
    /// # Examples
    ///
    /// ```
    /// use devis::application::QuoteStep;
    ///
    /// assert_eq!(QuoteStep::Contact.advance(&[]), QuoteStep::Product);
    /// assert_eq!(QuoteStep::Product.advance(&[]), QuoteStep::Review);
    /// ```
    pub fn advance(self, errors: &[FieldError]) -> QuoteStep {
        if !errors.is_empty() {
            return self;
        }
        match self {
            QuoteStep::Contact => QuoteStep::Product,
            QuoteStep::Product => QuoteStep::Review,
            other => other,
        }
    }

    /// Moves back one step, unconditionally. A no-op on the first step
    /// and on the submission states.
    pub fn retreat(self) -> QuoteStep {
        match self {
            QuoteStep::Product => QuoteStep::Contact,
            QuoteStep::Review => QuoteStep::Product,
            other => other,
        }
    }
}

/// Fields owned by each wizard step, in focus order.
pub fn step_fields(step: QuoteStep) -> &'static [Field] {
    match step {
        QuoteStep::Contact => &[Field::Name, Field::Email, Field::Phone, Field::Company],
        QuoteStep::Product => &[
            Field::ProductName,
            Field::Quantity,
            Field::Size,
            Field::Deadline,
            Field::Description,
        ],
        QuoteStep::Review => &[Field::AdditionalNotes],
        QuoteStep::Submitting | QuoteStep::Success => &[],
    }
}

/// Parses the serialized payload of a drop. A payload that does not
/// decode to a product is rejected.
pub fn parse_drop_payload(payload: &str) -> DomainResult<Product> {
    serde_json::from_str(payload).map_err(|e| DomainError::InvalidDropPayload(e.to_string()))
}

/// Main application state.
///
/// # Examples
///
/// ```
/// use devis::application::{App, AppMode};
///
/// let app = App::default();
/// assert_eq!(app.mode, AppMode::Catalog);
/// assert!(app.designs.is_empty());
/// ```
#[derive(Debug)]
pub struct App {
    /// Current screen
    pub mode: AppMode,
    /// Derived pack catalog, read-only
    pub catalog: Catalog,
    /// Products available on the builder shelf
    pub shelf: Vec<Product>,
    /// Selected row in the catalog list
    pub selected_pack: usize,
    /// Selected row on the shelf
    pub selected_shelf_item: usize,
    /// Selected row in the basket
    pub selected_basket_item: usize,
    /// Which builder pane has focus
    pub builder_pane: BuilderPane,
    /// Pack the builder was opened from, if any
    pub builder_pack_id: Option<String>,
    /// Items dropped into the basket; owned by the builder screen
    pub basket_items: Vec<Product>,
    /// Free-text personalization note for the basket
    pub basket_note: String,
    /// Serialized payload of the item currently being carried
    pub carrying: Option<String>,
    /// Transient highlight while something is carried over the basket
    pub drag_over_basket: bool,
    /// Mirror of the stored design list, refreshed after each change
    pub designs: Vec<Design>,
    /// Quote form values
    pub form: FormValues,
    /// Current wizard step
    pub quote_step: QuoteStep,
    /// Validation errors of the last gated transition
    pub field_errors: Vec<FieldError>,
    /// Index into `step_fields` of the focused field
    pub focused_field: usize,
    /// Input buffer for the focused field
    pub input: String,
    /// Cursor position within the input buffer
    pub cursor_position: usize,
    /// Accepted attachments
    pub attachments: Vec<Attachment>,
    /// Input buffer for filename dialogs
    pub filename_input: String,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Reference shown on the success screen
    pub quote_reference: Option<String>,
    /// Scroll position in help text
    pub help_scroll: usize,
    mode_before_help: AppMode,
    drafts: DraftStore,
    design_seq: u32,
}

impl Default for App {
    fn default() -> Self {
        Self::new(DraftStore::new(Box::new(MemoryStore::default())))
    }
}

impl App {
    pub fn new(drafts: DraftStore) -> Self {
        let designs = drafts.designs();
        Self {
            mode: AppMode::Catalog,
            catalog: Catalog::default(),
            shelf: shelf_products(),
            selected_pack: 0,
            selected_shelf_item: 0,
            selected_basket_item: 0,
            builder_pane: BuilderPane::Shelf,
            builder_pack_id: None,
            basket_items: Vec::new(),
            basket_note: String::new(),
            carrying: None,
            drag_over_basket: false,
            designs,
            form: FormValues::default(),
            quote_step: QuoteStep::Contact,
            field_errors: Vec::new(),
            focused_field: 0,
            input: String::new(),
            cursor_position: 0,
            attachments: Vec::new(),
            filename_input: String::new(),
            status_message: None,
            quote_reference: None,
            help_scroll: 0,
            mode_before_help: AppMode::Catalog,
            drafts,
            design_seq: 0,
        }
    }

    // --- catalog -----------------------------------------------------

    pub fn select_next_pack(&mut self) {
        if self.selected_pack + 1 < self.catalog.len() {
            self.selected_pack += 1;
        }
    }

    pub fn select_prev_pack(&mut self) {
        self.selected_pack = self.selected_pack.saturating_sub(1);
    }

    /// Opens the builder seeded with the selected pack's items. Pack
    /// items reference shelf products by id; items without a shelf
    /// counterpart are skipped.
    pub fn open_builder_for_selected(&mut self) {
        let Some(pack) = self.catalog.packs().get(self.selected_pack).cloned() else {
            return;
        };
        let shelf = &self.shelf;
        let seeded: Vec<Product> = pack
            .items
            .iter()
            .filter_map(|item| shelf.iter().find(|p| p.id == item.id).cloned())
            .collect();
        self.basket_items = seeded;
        self.builder_pack_id = Some(pack.id);
        self.basket_note.clear();
        self.carrying = None;
        self.drag_over_basket = false;
        self.builder_pane = BuilderPane::Shelf;
        self.selected_shelf_item = 0;
        self.selected_basket_item = 0;
        self.mode = AppMode::Builder;
        self.status_message = None;
    }

    /// Opens an empty builder, not tied to a catalog pack.
    pub fn open_blank_builder(&mut self) {
        self.basket_items.clear();
        self.builder_pack_id = None;
        self.basket_note.clear();
        self.carrying = None;
        self.drag_over_basket = false;
        self.builder_pane = BuilderPane::Shelf;
        self.selected_shelf_item = 0;
        self.selected_basket_item = 0;
        self.mode = AppMode::Builder;
        self.status_message = None;
    }

    // --- builder / basket --------------------------------------------

    pub fn shelf_up(&mut self) {
        self.selected_shelf_item = self.selected_shelf_item.saturating_sub(1);
    }

    pub fn shelf_down(&mut self) {
        if self.selected_shelf_item + 1 < self.shelf.len() {
            self.selected_shelf_item += 1;
        }
    }

    pub fn basket_up(&mut self) {
        self.selected_basket_item = self.selected_basket_item.saturating_sub(1);
    }

    pub fn basket_down(&mut self) {
        if self.selected_basket_item + 1 < self.basket_items.len() {
            self.selected_basket_item += 1;
        }
    }

    /// Picks up the selected shelf product: the "drag" half of the
    /// gesture. The product travels as a serialized payload.
    pub fn pick_up_selected(&mut self) {
        let Some(product) = self.shelf.get(self.selected_shelf_item) else {
            return;
        };
        match serde_json::to_string(product) {
            Ok(payload) => {
                self.status_message =
                    Some(format!("Carrying {} - drop it into the basket", product.name));
                self.carrying = Some(payload);
            }
            Err(e) => {
                debug!(error = %e, "failed to serialize shelf product");
            }
        }
        self.drag_over_basket = false;
    }

    pub fn focus_pane(&mut self, pane: BuilderPane) {
        self.builder_pane = pane;
        // Highlight only while something is carried over the basket.
        self.drag_over_basket = self.carrying.is_some() && pane == BuilderPane::Basket;
    }

    /// Cancels the carry: the "drag leave" half of the gesture.
    pub fn cancel_carry(&mut self) {
        self.carrying = None;
        self.drag_over_basket = false;
        self.status_message = None;
    }

    /// Completes the drop. A payload that fails to parse is a no-op:
    /// nothing is added and the carry state is discarded. Returns whether
    /// an item was added, so the caller can play the acknowledgment cue.
    pub fn drop_into_basket(&mut self) -> bool {
        let Some(payload) = self.carrying.take() else {
            return false;
        };
        self.drag_over_basket = false;
        match parse_drop_payload(&payload) {
            Ok(product) => {
                self.status_message = Some(format!("{} added to the basket", product.name));
                self.basket_items.push(product);
                true
            }
            Err(e) => {
                debug!(error = %e, "dropped payload ignored");
                self.status_message = None;
                false
            }
        }
    }

    pub fn remove_selected_basket_item(&mut self) {
        if self.selected_basket_item < self.basket_items.len() {
            self.basket_items.remove(self.selected_basket_item);
            if self.selected_basket_item >= self.basket_items.len() {
                self.selected_basket_item = self.basket_items.len().saturating_sub(1);
            }
        }
    }

    pub fn basket_total(&self) -> f64 {
        self.basket_items.iter().map(|p| p.starting_price).sum()
    }

    pub fn start_note_editing(&mut self) {
        self.mode = AppMode::BasketNote;
        self.input = self.basket_note.clone();
        self.cursor_position = self.input.len();
    }

    pub fn finish_note_editing(&mut self) {
        self.basket_note = self.input.clone();
        self.input.clear();
        self.cursor_position = 0;
        self.mode = AppMode::Builder;
    }

    pub fn cancel_note_editing(&mut self) {
        self.input.clear();
        self.cursor_position = 0;
        self.mode = AppMode::Builder;
    }

    /// Builds the design describing the current basket.
    fn builder_design(&mut self) -> Design {
        self.design_seq += 1;
        let pack_id = self.builder_pack_id.as_deref().unwrap_or("custom");
        let product_name = self
            .builder_pack_id
            .as_deref()
            .and_then(|id| self.catalog.get(id))
            .map(|p| p.title.clone())
            .unwrap_or_else(|| "Pack Personnalise".to_string());
        Design {
            design_number: format!("{}{}-{}", PACK_DESIGN_PREFIX, pack_id, self.design_seq),
            product_name,
            quantity: 1,
            selected_size: "Standard".to_string(),
            items: self
                .basket_items
                .iter()
                .map(|p| DesignItem { name: p.name.clone() })
                .collect(),
        }
    }

    /// Hands the basket over to the quote screen. An empty basket opens
    /// the quote with no payload, showing whatever drafts are stored.
    pub fn proceed_to_quote(&mut self) {
        if self.basket_items.is_empty() {
            self.open_quote(None);
        } else {
            let design = self.builder_design();
            if !self.basket_note.is_empty() {
                self.form.additional_notes = self.basket_note.clone();
            }
            self.open_quote(Some(design));
        }
    }

    // --- quote draft store bridge ------------------------------------

    /// Entry point of the quote screen.
    ///
    /// With a design payload the stored list is loaded and the design
    /// appended only if its number is not already present (idempotent
    /// insert); a pack design also pre-populates the product fields.
    /// Without a payload the persisted list is shown as-is, so refreshes
    /// and back-navigation keep drafts.
    pub fn open_quote(&mut self, design: Option<Design>) {
        if let Some(design) = design {
            self.drafts.insert(design.clone());
            if design.is_pack() {
                self.form.product_name = design.product_name.clone();
                self.form.quantity = design.quantity.to_string();
                self.form.size = design.selected_size.clone();
                if !design.items.is_empty() {
                    self.form.description = design.pack_description();
                }
            }
        }
        self.designs = self.drafts.designs();
        self.quote_step = QuoteStep::Contact;
        self.field_errors.clear();
        self.focused_field = 0;
        self.load_focused_field();
        self.mode = AppMode::Quote;
        self.status_message = None;
    }

    /// Removes a draft by design number.
    pub fn remove_design(&mut self, design_number: &str) {
        if self.drafts.remove(design_number) {
            self.designs = self.drafts.designs();
            self.status_message = Some(format!("Removed design {}", design_number));
        }
    }

    pub fn total_quantity(&self) -> u32 {
        self.designs.iter().map(|d| d.quantity).sum()
    }

    /// Submission is enabled only with at least one stored design and a
    /// total quantity of at least one unit.
    pub fn quote_enabled(&self) -> bool {
        !self.designs.is_empty() && self.total_quantity() >= 1
    }

    // --- wizard ------------------------------------------------------

    fn field_value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.form.name,
            Field::Email => &mut self.form.email,
            Field::Phone => &mut self.form.phone,
            Field::Company => &mut self.form.company,
            Field::ProductName => &mut self.form.product_name,
            Field::Quantity => &mut self.form.quantity,
            Field::Size => &mut self.form.size,
            Field::Description => &mut self.form.description,
            Field::Deadline => &mut self.form.deadline,
            Field::AdditionalNotes => &mut self.form.additional_notes,
        }
    }

    pub fn focused_field_kind(&self) -> Option<Field> {
        step_fields(self.quote_step).get(self.focused_field).copied()
    }

    /// Writes the input buffer back into the focused field.
    pub fn commit_input(&mut self) {
        if let Some(field) = self.focused_field_kind() {
            let value = self.input.clone();
            *self.field_value_mut(field) = value;
        }
    }

    fn load_focused_field(&mut self) {
        match self.focused_field_kind() {
            Some(field) => {
                let value = self.field_value_mut(field).clone();
                self.input = value;
            }
            None => self.input.clear(),
        }
        self.cursor_position = self.input.len();
    }

    pub fn next_field(&mut self) {
        let count = step_fields(self.quote_step).len();
        if count == 0 {
            return;
        }
        self.commit_input();
        self.focused_field = (self.focused_field + 1) % count;
        self.load_focused_field();
    }

    pub fn prev_field(&mut self) {
        let count = step_fields(self.quote_step).len();
        if count == 0 {
            return;
        }
        self.commit_input();
        self.focused_field = (self.focused_field + count - 1) % count;
        self.load_focused_field();
    }

    /// Validates the current step's field subset and advances on success.
    /// The error list stays on the state for inline display.
    pub fn next_step(&mut self) {
        self.commit_input();
        let errors = match self.quote_step {
            QuoteStep::Contact => validate_contact(&self.form),
            QuoteStep::Product => validate_product(&self.form),
            _ => Vec::new(),
        };
        let next = self.quote_step.advance(&errors);
        self.field_errors = errors;
        if next != self.quote_step {
            self.quote_step = next;
            self.focused_field = 0;
            self.load_focused_field();
            self.status_message = None;
        } else if !self.field_errors.is_empty() {
            self.status_message = Some("Please correct the highlighted fields".to_string());
        }
    }

    /// Backward transition, unconditional.
    pub fn prev_step(&mut self) {
        self.commit_input();
        let prev = self.quote_step.retreat();
        if prev != self.quote_step {
            self.quote_step = prev;
            self.field_errors.clear();
            self.focused_field = 0;
            self.load_focused_field();
        }
    }

    // --- attachments -------------------------------------------------

    /// Folds a batch of selected files into the attachment list. Files
    /// failing the size or type check are rejected individually; valid
    /// files from the same batch are still accepted.
    pub fn add_attachments(&mut self, batch: Vec<Result<Attachment, String>>) {
        let mut notices = Vec::new();
        let mut accepted = 0usize;
        for entry in batch {
            match entry {
                Ok(attachment) => {
                    match attachment_rejection(
                        &attachment.name,
                        attachment.size,
                        Some(&attachment.mime),
                    ) {
                        Some(reason) => {
                            notices.push(DomainError::AttachmentRejected(reason).to_string())
                        }
                        None => {
                            self.attachments.push(attachment);
                            accepted += 1;
                        }
                    }
                }
                Err(e) => notices.push(e),
            }
        }
        self.status_message = if notices.is_empty() {
            Some(format!("{} file(s) attached", accepted))
        } else if accepted > 0 {
            Some(format!(
                "{} file(s) attached; rejected: {}",
                accepted,
                notices.join("; ")
            ))
        } else {
            Some(format!("Rejected: {}", notices.join("; ")))
        };
    }

    /// Deletes an attachment by position.
    pub fn remove_attachment(&mut self, index: usize) {
        if index < self.attachments.len() {
            let removed = self.attachments.remove(index);
            self.status_message = Some(format!("Removed {}", removed.name));
        }
    }

    pub fn start_attach_file(&mut self) {
        self.mode = AppMode::AttachFile;
        self.filename_input.clear();
        self.cursor_position = 0;
        self.status_message = None;
    }

    pub fn start_remove_attachment(&mut self) {
        if self.attachments.is_empty() {
            self.status_message = Some("No attached files to remove".to_string());
            return;
        }
        self.mode = AppMode::RemoveAttachment;
        self.filename_input.clear();
        self.cursor_position = 0;
        self.status_message = None;
    }

    /// Interprets the dialog input as the 1-based position shown in the
    /// attachment list.
    pub fn finish_remove_attachment(&mut self) {
        let entry = self.filename_input.trim().to_string();
        match entry.parse::<usize>() {
            Ok(position) if position >= 1 && position <= self.attachments.len() => {
                self.remove_attachment(position - 1);
            }
            _ => {
                self.status_message = Some(format!("No attachment at position {}", entry));
            }
        }
        self.mode = AppMode::Quote;
        self.filename_input.clear();
        self.cursor_position = 0;
    }

    pub fn start_export_recap(&mut self) {
        self.mode = AppMode::ExportRecap;
        self.filename_input = "devis-recap.csv".to_string();
        self.cursor_position = self.filename_input.len();
        self.status_message = None;
    }

    pub fn cancel_filename_input(&mut self) {
        self.mode = AppMode::Quote;
        self.filename_input.clear();
        self.cursor_position = 0;
    }

    pub fn set_export_result(&mut self, result: Result<String, String>) {
        match result {
            Ok(filename) => {
                self.status_message = Some(format!("Recap exported to {}", filename));
            }
            Err(error) => {
                self.status_message = Some(format!("Export failed: {}", error));
            }
        }
        self.mode = AppMode::Quote;
        self.filename_input.clear();
        self.cursor_position = 0;
    }

    // --- submission --------------------------------------------------

    /// Gate for the submit action. Moves to `Submitting` only from the
    /// review step, with the whole form valid and the draft invariant
    /// satisfied.
    pub fn begin_submission(&mut self) -> bool {
        if self.quote_step != QuoteStep::Review {
            return false;
        }
        self.commit_input();
        self.field_errors = validate_all(&self.form);
        if !self.field_errors.is_empty() {
            self.status_message = Some("Please correct the highlighted fields".to_string());
            return false;
        }
        if !self.quote_enabled() {
            self.status_message =
                Some("Add at least one design before requesting a quote".to_string());
            return false;
        }
        self.quote_step = QuoteStep::Submitting;
        self.status_message = None;
        true
    }

    /// Processes the outcome of the submission call. Success clears the
    /// session drafts and enters the terminal state; failure keeps the
    /// form on the review step for a fresh user-initiated retry.
    pub fn set_submission_result(&mut self, result: Result<(), String>) {
        match result {
            Ok(()) => {
                info!("quote request submitted");
                self.drafts.clear();
                self.designs = self.drafts.designs();
                self.quote_reference = Some(Self::generate_reference());
                self.quote_step = QuoteStep::Success;
                self.status_message = None;
            }
            Err(error) => {
                info!(error = %error, "quote submission failed");
                self.status_message = Some(format!("Submission failed: {}", error));
                self.quote_step = QuoteStep::Review;
            }
        }
    }

    fn generate_reference() -> String {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        format!("DV-{:06}", millis % 1_000_000)
    }

    /// Leaves the success screen. The drafts were already cleared on
    /// submission; this resets the transient form state.
    pub fn return_home(&mut self) {
        self.form = FormValues::default();
        self.attachments.clear();
        self.field_errors.clear();
        self.quote_step = QuoteStep::Contact;
        self.quote_reference = None;
        self.basket_items.clear();
        self.basket_note.clear();
        self.builder_pack_id = None;
        self.carrying = None;
        self.drag_over_basket = false;
        self.input.clear();
        self.cursor_position = 0;
        self.status_message = None;
        self.mode = AppMode::Catalog;
    }

    // --- input buffer ------------------------------------------------

    pub fn insert_char(&mut self, c: char) {
        self.input.insert(self.cursor_position, c);
        self.cursor_position += c.len_utf8();
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let width = self.input[..self.cursor_position]
                .chars()
                .next_back()
                .map(|c| c.len_utf8())
                .unwrap_or(1);
            self.cursor_position -= width;
            self.input.remove(self.cursor_position);
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            let width = self.input[..self.cursor_position]
                .chars()
                .next_back()
                .map(|c| c.len_utf8())
                .unwrap_or(1);
            self.cursor_position -= width;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.len() {
            let width = self.input[self.cursor_position..]
                .chars()
                .next()
                .map(|c| c.len_utf8())
                .unwrap_or(1);
            self.cursor_position += width;
        }
    }

    pub fn filename_insert_char(&mut self, c: char) {
        self.filename_input.insert(self.cursor_position, c);
        self.cursor_position += c.len_utf8();
    }

    pub fn filename_delete_char(&mut self) {
        if self.cursor_position > 0 {
            let width = self.filename_input[..self.cursor_position]
                .chars()
                .next_back()
                .map(|c| c.len_utf8())
                .unwrap_or(1);
            self.cursor_position -= width;
            self.filename_input.remove(self.cursor_position);
        }
    }

    // --- help --------------------------------------------------------

    pub fn open_help(&mut self) {
        self.mode_before_help = self.mode;
        self.mode = AppMode::Help;
        self.help_scroll = 0;
    }

    pub fn close_help(&mut self) {
        self.mode = self.mode_before_help;
    }
}
