//! Create/edit form controller for a single product.
//!
//! The form holds every field as raw text so an empty input stays distinct
//! from zero. Text is validated and converted only on [`submit`].
//!
//! State lives behind a mutex that is never held across an await, so a
//! controller can be shared by reference while a load or submit is in
//! flight. Each load bumps a generation counter; a response that comes back
//! for an older generation is dropped instead of overwriting newer state.
//!
//! [`submit`]: ProductFormController::submit

use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use super::api::ProductApi;
use super::error::{CatalogError, CatalogResult};
use super::model::{CategoryLink, Product, ProductId, ProductPayload, normalize_record};

/// The editable fields, in validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Description,
    Price,
    Stock,
    CategoryId,
}

impl FormField {
    /// All fields, in the order they are validated and prompted.
    pub const ALL: [FormField; 5] = [
        FormField::Name,
        FormField::Description,
        FormField::Price,
        FormField::Stock,
        FormField::CategoryId,
    ];

    /// Wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::Price => "price",
            Self::Stock => "stock",
            Self::CategoryId => "categoryId",
        }
    }

    /// Label shown next to the input.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Description => "Description",
            Self::Price => "Price",
            Self::Stock => "Stock",
            Self::CategoryId => "Category ID",
        }
    }
}

impl FromStr for FormField {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| CatalogError::validation(s, "is not a form field"))
    }
}

/// Raw text of every form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub name: String,
    pub description: String,
    pub price: String,
    pub stock: String,
    pub category_id: String,
}

impl FormState {
    /// Populate from a fetched product; absent values become empty strings.
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone().unwrap_or_default(),
            description: product.description.clone().unwrap_or_default(),
            price: product.price.map(|p| p.to_string()).unwrap_or_default(),
            stock: product.stock.map(|s| s.to_string()).unwrap_or_default(),
            category_id: product
                .category_id()
                .map(|id| id.to_string())
                .unwrap_or_default(),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Description => &self.description,
            FormField::Price => &self.price,
            FormField::Stock => &self.stock,
            FormField::CategoryId => &self.category_id,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Name => &mut self.name,
            FormField::Description => &mut self.description,
            FormField::Price => &mut self.price,
            FormField::Stock => &mut self.stock,
            FormField::CategoryId => &mut self.category_id,
        };
        *slot = value.into();
    }

    /// Validate every field and build the request body.
    ///
    /// Fails on the first empty field (in [`FormField::ALL`] order), then on
    /// the first field whose text does not convert. `"0"` is a present value.
    pub fn to_payload(&self) -> CatalogResult<ProductPayload> {
        if let Some(field) = FormField::ALL.into_iter().find(|f| self.get(*f).is_empty()) {
            return Err(CatalogError::empty_field(field.as_str()));
        }

        Ok(ProductPayload {
            name: self.name.clone(),
            description: self.description.clone(),
            price: parse_price(&self.price)?,
            stock: parse_count(FormField::Stock, &self.stock)?,
            category: CategoryLink {
                id: parse_count(FormField::CategoryId, &self.category_id)?,
            },
        })
    }
}

fn parse_price(raw: &str) -> CatalogResult<f64> {
    let field = FormField::Price.as_str();
    let price: f64 = raw
        .trim()
        .parse()
        .map_err(|_| CatalogError::validation(field, "must be a number"))?;
    if !price.is_finite() {
        return Err(CatalogError::validation(field, "must be a number"));
    }
    if price < 0.0 {
        return Err(CatalogError::validation(field, "cannot be negative"));
    }
    Ok(price)
}

fn parse_count(field: FormField, raw: &str) -> CatalogResult<i64> {
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| CatalogError::validation(field.as_str(), "must be a whole number"))?;
    if value < 0 {
        return Err(CatalogError::validation(field.as_str(), "cannot be negative"));
    }
    Ok(value)
}

/// Whether the form creates a new product or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(ProductId),
}

/// Progress of the initial record load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing loaded yet, or the form was discarded after a submit.
    Idle,
    /// Waiting for the record of an edit.
    Loading,
    /// Fields are ready for editing.
    Ready,
    /// The record could not be loaded; carries the user-facing message.
    Failed(String),
}

/// Result of a [`ProductFormController::load`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The form was populated.
    Ready,
    /// A newer load superseded this one; its response was dropped.
    Stale,
}

/// Completion of a successful submit.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    /// Mode the form was submitted in.
    pub mode: FormMode,
    /// Product echoed by the server, when it sent one.
    pub product: Option<Product>,
}

#[derive(Debug)]
struct FormInner {
    mode: FormMode,
    fields: FormState,
    load_state: LoadState,
    generation: u64,
    error: Option<String>,
}

/// Resets the submitting flag on every exit path, drop included.
struct SubmittingGuard<'a>(&'a watch::Sender<bool>);

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.0.send_replace(false);
    }
}

/// Controller behind the product create/edit form.
pub struct ProductFormController {
    api: Arc<dyn ProductApi>,
    inner: Mutex<FormInner>,
    submitting: watch::Sender<bool>,
}

impl ProductFormController {
    /// Create an idle controller. Call [`load`](Self::load) before editing.
    pub fn new(api: Arc<dyn ProductApi>) -> Self {
        let (submitting, _) = watch::channel(false);
        Self {
            api,
            inner: Mutex::new(FormInner {
                mode: FormMode::Create,
                fields: FormState::default(),
                load_state: LoadState::Idle,
                generation: 0,
                error: None,
            }),
            submitting,
        }
    }

    fn state(&self) -> MutexGuard<'_, FormInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Prepare the form for `id` (edit) or for a new product (create).
    ///
    /// Create mode is ready immediately. Edit mode fetches the record; if a
    /// later `load` starts before the response arrives, the response is
    /// discarded and [`LoadOutcome::Stale`] is returned.
    #[instrument(skip(self))]
    pub async fn load(&self, id: Option<ProductId>) -> CatalogResult<LoadOutcome> {
        let (id, generation) = {
            let mut inner = self.state();
            inner.generation += 1;
            inner.fields = FormState::default();
            inner.error = None;

            let Some(id) = id else {
                inner.mode = FormMode::Create;
                inner.load_state = LoadState::Ready;
                debug!("Form ready for a new product");
                return Ok(LoadOutcome::Ready);
            };

            inner.mode = FormMode::Edit(id);
            inner.load_state = LoadState::Loading;
            (id, inner.generation)
        };

        let result = match self.api.get_product(id).await {
            Ok(value) => normalize_record(value, id),
            Err(e) => Err(e),
        };

        let mut inner = self.state();
        if inner.generation != generation {
            debug!("Discarding stale response for product {}", id);
            return Ok(LoadOutcome::Stale);
        }

        match result {
            Ok(product) => {
                inner.fields = FormState::from_product(&product);
                inner.load_state = LoadState::Ready;
                info!("Loaded product {} into the form", id);
                Ok(LoadOutcome::Ready)
            }
            Err(e) => {
                warn!("Could not load product {}: {}", id, e);
                let message = format!("Could not load the product. {}", e.user_message());
                inner.load_state = LoadState::Failed(message.clone());
                inner.error = Some(message);
                Err(e)
            }
        }
    }

    /// Replace the text of one field. No validation happens here.
    pub fn set_field(&self, field: FormField, value: impl Into<String>) {
        self.state().fields.set(field, value);
    }

    /// Replace a field addressed by its wire name (`"categoryId"`, ...).
    pub fn set_field_by_name(&self, name: &str, value: impl Into<String>) -> CatalogResult<()> {
        let field = name.parse::<FormField>()?;
        self.set_field(field, value);
        Ok(())
    }

    /// Validate the form and send it as a create or an update.
    ///
    /// Any failure is also recorded as the form's [`error`](Self::error).
    /// On success the form state is discarded.
    #[instrument(skip(self))]
    pub async fn submit(&self) -> CatalogResult<SubmitOutcome> {
        if self.submitting.send_replace(true) {
            return Err(CatalogError::SubmitInProgress);
        }
        let _guard = SubmittingGuard(&self.submitting);

        let (mode, generation, payload) = {
            let mut inner = self.state();
            inner.error = None;

            if inner.load_state != LoadState::Ready {
                let err = CatalogError::FormNotReady;
                inner.error = Some(err.user_message());
                return Err(err);
            }

            match inner.fields.to_payload() {
                Ok(payload) => (inner.mode, inner.generation, payload),
                Err(err) => {
                    debug!("Form validation failed: {}", err);
                    inner.error = Some(err.user_message());
                    return Err(err);
                }
            }
        };

        let result = match mode {
            FormMode::Create => self.api.create_product(&payload).await,
            FormMode::Edit(id) => self.api.update_product(id, &payload).await,
        };

        let mut inner = self.state();
        match result {
            Ok(product) => {
                info!("Product saved ({:?})", mode);
                if inner.generation == generation {
                    inner.fields = FormState::default();
                    inner.load_state = LoadState::Idle;
                }
                Ok(SubmitOutcome { mode, product })
            }
            Err(err) => {
                warn!("Saving product failed: {}", err);
                inner.error = Some(err.user_message());
                Err(err)
            }
        }
    }

    pub fn mode(&self) -> FormMode {
        self.state().mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode(), FormMode::Edit(_))
    }

    /// Snapshot of all field values.
    pub fn fields(&self) -> FormState {
        self.state().fields.clone()
    }

    pub fn field(&self, field: FormField) -> String {
        self.state().fields.get(field).to_string()
    }

    pub fn load_state(&self) -> LoadState {
        self.state().load_state.clone()
    }

    /// Message for the inline error panel, if the last operation failed.
    pub fn error(&self) -> Option<String> {
        self.state().error.clone()
    }

    pub fn is_submitting(&self) -> bool {
        *self.submitting.borrow()
    }

    /// Watch the submitting flag.
    pub fn subscribe_submitting(&self) -> watch::Receiver<bool> {
        self.submitting.subscribe()
    }

    /// Heading for the form.
    pub fn title(&self) -> &'static str {
        if self.is_editing() {
            "Edit product"
        } else {
            "Create product"
        }
    }

    /// Text of the submit trigger.
    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting() {
            "Saving..."
        } else if self.is_editing() {
            "Save changes"
        } else {
            "Create product"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::catalog::testing::{ApiCall, FakeProductApi};
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Notify;
    use tokio::time::timeout;
    use tokio_test::{assert_err, assert_ok};

    const PARK: Duration = Duration::from_millis(20);

    fn widget_fields(form: &ProductFormController) {
        form.set_field(FormField::Name, "Widget");
        form.set_field(FormField::Description, "A widget");
        form.set_field(FormField::Price, "9.99");
        form.set_field(FormField::Stock, "5");
        form.set_field(FormField::CategoryId, "2");
    }

    #[tokio::test]
    async fn test_create_mode_is_ready_without_request() {
        let api = Arc::new(FakeProductApi::new());
        let form = ProductFormController::new(api.clone());

        assert_eq!(form.load(None).await, Ok(LoadOutcome::Ready));
        assert_eq!(form.load_state(), LoadState::Ready);
        assert_eq!(form.mode(), FormMode::Create);
        assert_eq!(form.fields(), FormState::default());
        assert_eq!(form.title(), "Create product");
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_edit_load_fills_missing_fields_with_empty_text() {
        let api = Arc::new(FakeProductApi::new().with_record(
            ProductId(7),
            json!({"name": "X", "price": null, "stock": 3, "category": {"id": 1}}),
        ));
        let form = ProductFormController::new(api.clone());

        assert_eq!(form.load(Some(ProductId(7))).await, Ok(LoadOutcome::Ready));
        assert_eq!(
            form.fields(),
            FormState {
                name: "X".to_string(),
                description: String::new(),
                price: String::new(),
                stock: "3".to_string(),
                category_id: "1".to_string(),
            }
        );
        assert_eq!(form.mode(), FormMode::Edit(ProductId(7)));
        assert_eq!(form.title(), "Edit product");
        assert_eq!(api.calls(), vec![ApiCall::Get(ProductId(7))]);
    }

    #[tokio::test]
    async fn test_edit_load_keeps_zero_values() {
        let api = Arc::new(FakeProductApi::new().with_record(
            ProductId(2),
            json!([{"name": "Free", "description": "d", "price": 0, "stock": 0, "category": {"id": 4}}]),
        ));
        let form = ProductFormController::new(api);

        assert_ok!(form.load(Some(ProductId(2))).await);
        assert_eq!(form.field(FormField::Price), "0");
        assert_eq!(form.field(FormField::Stock), "0");
    }

    #[tokio::test]
    async fn test_edit_load_failure_is_observable() {
        let api = Arc::new(
            FakeProductApi::new()
                .with_record_error(ProductId(5), CatalogError::server(404, "Not Found")),
        );
        let form = ProductFormController::new(api);

        let err = assert_err!(form.load(Some(ProductId(5))).await);
        assert_eq!(err, CatalogError::server(404, "Not Found"));
        assert!(matches!(form.load_state(), LoadState::Failed(_)));
        assert!(form.error().unwrap().contains("Not Found"));

        // Still usable: submitting is refused without a request.
        assert_eq!(form.submit().await, Err(CatalogError::FormNotReady));
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_edit_load_empty_array_is_not_found() {
        let api = Arc::new(FakeProductApi::new().with_record(ProductId(3), json!([])));
        let form = ProductFormController::new(api);

        assert_eq!(
            form.load(Some(ProductId(3))).await,
            Err(CatalogError::NotFound(ProductId(3)))
        );
        assert!(matches!(form.load_state(), LoadState::Failed(_)));
    }

    #[tokio::test]
    async fn test_stale_load_does_not_overwrite_newer_target() {
        let gate = Arc::new(Notify::new());
        let api = Arc::new(
            FakeProductApi::new()
                .with_record(ProductId(1), json!({"name": "Old"}))
                .with_record(ProductId(2), json!({"name": "New"}))
                .with_gate(ProductId(1), gate.clone()),
        );
        let form = ProductFormController::new(api);

        let (first, second) = tokio::join!(form.load(Some(ProductId(1))), async {
            let outcome = form.load(Some(ProductId(2))).await;
            gate.notify_one();
            outcome
        });

        assert_eq!(first, Ok(LoadOutcome::Stale));
        assert_eq!(second, Ok(LoadOutcome::Ready));
        assert_eq!(form.field(FormField::Name), "New");
        assert_eq!(form.mode(), FormMode::Edit(ProductId(2)));
    }

    #[tokio::test]
    async fn test_reload_of_same_id_drops_first_response() {
        let gate = Arc::new(Notify::new());
        let api = Arc::new(
            FakeProductApi::new()
                .with_record(ProductId(1), json!({"name": "A"}))
                .with_record(ProductId(2), json!({"name": "B"}))
                .with_gate(ProductId(1), gate.clone()),
        );
        let form = ProductFormController::new(api);

        let (first, (second, third)) = tokio::join!(form.load(Some(ProductId(1))), async {
            let second = form.load(Some(ProductId(2))).await;
            let third = form.load(Some(ProductId(1)));
            tokio::pin!(third);
            assert!(timeout(PARK, &mut third).await.is_err());
            gate.notify_waiters();
            (second, third.await)
        });

        assert_eq!(first, Ok(LoadOutcome::Stale));
        assert_eq!(second, Ok(LoadOutcome::Ready));
        assert_eq!(third, Ok(LoadOutcome::Ready));
        assert_eq!(form.field(FormField::Name), "A");
        assert_eq!(form.mode(), FormMode::Edit(ProductId(1)));
    }

    #[tokio::test]
    async fn test_set_field_by_name() {
        let form = ProductFormController::new(Arc::new(FakeProductApi::new()));
        assert_ok!(form.load(None).await);

        assert_ok!(form.set_field_by_name("categoryId", "8"));
        assert_eq!(form.field(FormField::CategoryId), "8");

        let err = assert_err!(form.set_field_by_name("colour", "red"));
        assert_eq!(err.field(), Some("colour"));
    }

    #[tokio::test]
    async fn test_empty_field_fails_without_request() {
        let api = Arc::new(FakeProductApi::new());
        let form = ProductFormController::new(api.clone());
        assert_ok!(form.load(None).await);

        for missing in FormField::ALL {
            widget_fields(&form);
            form.set_field(missing, "");

            let err = assert_err!(form.submit().await);
            assert!(err.is_validation());
            assert_eq!(err.field(), Some(missing.as_str()));
            assert!(form.error().unwrap().contains(missing.as_str()));
        }
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_first_empty_field_is_reported() {
        let form = ProductFormController::new(Arc::new(FakeProductApi::new()));
        assert_ok!(form.load(None).await);
        form.set_field(FormField::Name, "Only a name");

        let err = assert_err!(form.submit().await);
        assert_eq!(err.field(), Some("description"));
    }

    #[tokio::test]
    async fn test_zero_text_counts_as_present() {
        let api = Arc::new(FakeProductApi::new());
        let form = ProductFormController::new(api.clone());
        assert_ok!(form.load(None).await);
        widget_fields(&form);
        form.set_field(FormField::Price, "0");
        form.set_field(FormField::Stock, "0");

        let outcome = assert_ok!(form.submit().await);
        assert_eq!(outcome.mode, FormMode::Create);
        assert_eq!(api.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_numbers_are_rejected() {
        let api = Arc::new(FakeProductApi::new());
        let form = ProductFormController::new(api.clone());
        assert_ok!(form.load(None).await);

        let cases = [
            (FormField::Price, "abc"),
            (FormField::Price, "NaN"),
            (FormField::Price, "-1"),
            (FormField::Stock, "2.5"),
            (FormField::Stock, "-3"),
            (FormField::CategoryId, "two"),
        ];
        for (field, text) in cases {
            widget_fields(&form);
            form.set_field(field, text);
            let err = assert_err!(form.submit().await);
            assert_eq!(err.field(), Some(field.as_str()), "input {:?}", text);
        }
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_posts_converted_payload_once() {
        let api = Arc::new(FakeProductApi::new());
        let form = ProductFormController::new(api.clone());
        assert_ok!(form.load(None).await);
        widget_fields(&form);

        let outcome = assert_ok!(form.submit().await);
        assert_eq!(outcome.mode, FormMode::Create);
        assert_eq!(
            api.calls(),
            vec![ApiCall::Create(ProductPayload {
                name: "Widget".to_string(),
                description: "A widget".to_string(),
                price: 9.99,
                stock: 5,
                category: CategoryLink { id: 2 },
            })]
        );

        // Form state is discarded after a successful submit.
        assert_eq!(form.fields(), FormState::default());
        assert_eq!(form.load_state(), LoadState::Idle);
        assert_eq!(form.error(), None);
    }

    #[tokio::test]
    async fn test_edit_puts_to_item_once() {
        let api = Arc::new(FakeProductApi::new().with_record(
            ProductId(7),
            json!({"name": "X", "description": "Y", "price": 1.5, "stock": 3, "category": {"id": 1}}),
        ));
        let form = ProductFormController::new(api.clone());
        assert_ok!(form.load(Some(ProductId(7))).await);
        form.set_field(FormField::Stock, "4");

        assert_ok!(form.submit().await);
        let calls = api.calls();
        assert_eq!(calls.len(), 2);
        match &calls[1] {
            ApiCall::Update(id, payload) => {
                assert_eq!(*id, ProductId(7));
                assert_eq!(payload.stock, 4);
                assert_eq!(payload.price, 1.5);
                assert_eq!(payload.category, CategoryLink { id: 1 });
            }
            other => panic!("expected an update, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_submitting_flag_is_set_during_request() {
        let api = Arc::new(FakeProductApi::new());
        let form = ProductFormController::new(api.clone());
        api.probe_submitting(form.subscribe_submitting());
        assert_ok!(form.load(None).await);
        widget_fields(&form);

        assert!(!form.is_submitting());
        assert_ok!(form.submit().await);
        assert_eq!(api.observed_submitting(), vec![true]);
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_submitting_flag_resets_on_server_error() {
        let api = Arc::new(
            FakeProductApi::new().with_write_error(CatalogError::server(400, "Duplicate name")),
        );
        let form = ProductFormController::new(api.clone());
        api.probe_submitting(form.subscribe_submitting());
        assert_ok!(form.load(None).await);
        widget_fields(&form);

        let err = assert_err!(form.submit().await);
        assert_eq!(err, CatalogError::server(400, "Duplicate name"));
        assert_eq!(form.error().as_deref(), Some("Duplicate name"));
        assert_eq!(api.observed_submitting(), vec![true]);
        assert!(!form.is_submitting());

        // Fields survive the failure so the user can retry.
        assert_eq!(form.field(FormField::Name), "Widget");
    }

    #[tokio::test]
    async fn test_submitting_flag_resets_on_network_error() {
        let api = Arc::new(
            FakeProductApi::new().with_write_error(CatalogError::network("connection reset")),
        );
        let form = ProductFormController::new(api);
        assert_ok!(form.load(None).await);
        widget_fields(&form);

        assert_err!(form.submit().await);
        assert!(!form.is_submitting());
        assert_eq!(
            form.error().as_deref(),
            Some("Could not reach the catalog server.")
        );
    }

    #[tokio::test]
    async fn test_submitting_flag_toggles_on_validation_error() {
        let form = ProductFormController::new(Arc::new(FakeProductApi::new()));
        let mut rx = form.subscribe_submitting();
        assert_ok!(form.load(None).await);

        assert_err!(form.submit().await);
        assert!(rx.has_changed().unwrap());
        assert!(!*rx.borrow_and_update());
    }

    #[tokio::test]
    async fn test_submitting_flag_resets_when_submit_is_dropped() {
        let gate = Arc::new(Notify::new());
        let api = Arc::new(FakeProductApi::new().with_write_gate(gate));
        let form = ProductFormController::new(api.clone());
        assert_ok!(form.load(None).await);
        widget_fields(&form);

        assert!(timeout(PARK, form.submit()).await.is_err());
        assert_eq!(api.calls().len(), 1);
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_second_submit_while_in_flight_is_refused() {
        let gate = Arc::new(Notify::new());
        let api = Arc::new(FakeProductApi::new().with_write_gate(gate.clone()));
        let form = ProductFormController::new(api.clone());
        assert_ok!(form.load(None).await);
        widget_fields(&form);

        let first = form.submit();
        tokio::pin!(first);
        assert!(timeout(PARK, &mut first).await.is_err());
        assert!(form.is_submitting());

        assert_eq!(form.submit().await, Err(CatalogError::SubmitInProgress));
        assert!(form.is_submitting());
        assert_eq!(api.calls().len(), 1);
        assert!(matches!(api.calls()[0], ApiCall::Create(_)));

        gate.notify_one();
        assert_ok!(first.await);
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_new_submit_clears_previous_error() {
        let form = ProductFormController::new(Arc::new(FakeProductApi::new()));
        assert_ok!(form.load(None).await);

        assert_err!(form.submit().await);
        assert!(form.error().is_some());

        widget_fields(&form);
        assert_ok!(form.submit().await);
        assert_eq!(form.error(), None);
    }

    #[tokio::test]
    async fn test_submit_label_follows_mode() {
        let api = Arc::new(FakeProductApi::new().with_record(ProductId(1), json!({"name": "A"})));
        let form = ProductFormController::new(api);

        assert_ok!(form.load(None).await);
        assert_eq!(form.submit_label(), "Create product");
        assert_ok!(form.load(Some(ProductId(1))).await);
        assert_eq!(form.submit_label(), "Save changes");
    }
}
