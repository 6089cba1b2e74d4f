//! Product page orchestrator.
//!
//! ## Lifecycle
//!
//! 1. **Mount**: derive the initial [`ProductState`] from the product and query,
//!    publish it and the [`Dispatch`] handle, then commit once.
//! 2. **Commit** (after mount, every prop update and every state change):
//!    - forward head metadata when it changed,
//!    - render product markup when the product or query changed,
//!    - hand pixel events to the sink when the memoized events or the
//!      `loading` flag changed,
//!    - run the selected-item sync rule.
//! 3. **Flush**: apply queued actions one at a time, publishing each new state
//!    and committing after it.
//! 4. **Unmount**: close both channels.
//!
//! Everything runs on the caller's thread; there is no interleaving between
//! actions.

use std::sync::mpsc::Receiver;
use std::sync::Arc;

use serde::Serialize;

use product_context_catalog::{Product, ProductQuery, Query};
use product_context_core::Reducer;
use product_context_events::{
    Channel, InMemoryChannel, PixelBatch, PixelEvent, PixelSink, Subscription,
};

use crate::action::ProductAction;
use crate::dispatch::Dispatch;
use crate::head::{HeadMetadata, PageHead};
use crate::memo::PixelMemo;
use crate::runtime::RuntimeContext;
use crate::state::ProductState;
use crate::sync::SelectedItemSync;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Emitted {
    generation: u64,
    loading: bool,
}

/// What the page hands to everything rendered under it, next to the state
/// and dispatch channels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildProps<'a> {
    pub product: Option<&'a Product>,
    pub loading: bool,
    pub slug: Option<&'a str>,
}

/// State container for one product page.
pub struct ProductContainer<S, H>
where
    S: PixelSink,
    H: PageHead,
{
    runtime: RuntimeContext,
    product: Option<Arc<Product>>,
    loading: bool,
    query: Query,
    slug: Option<String>,

    state: Arc<ProductState>,
    dispatch: Dispatch,
    actions: Receiver<ProductAction>,
    state_channel: InMemoryChannel<Arc<ProductState>>,
    dispatch_channel: InMemoryChannel<Dispatch>,

    sync: SelectedItemSync,
    pixel: PixelMemo,
    last_emitted: Option<Emitted>,
    last_head: Option<HeadMetadata>,
    last_markup: Option<(Option<Arc<Product>>, Query)>,

    sink: S,
    head: H,
}

impl<S, H> ProductContainer<S, H>
where
    S: PixelSink,
    H: PageHead,
{
    pub fn mount(
        product_query: ProductQuery,
        query: Query,
        runtime: RuntimeContext,
        sink: S,
        head: H,
    ) -> Self {
        let product = product_query.product.map(Arc::new);
        let state = Arc::new(ProductState::initial(product.clone(), &query));
        let (dispatch, actions) = Dispatch::new();

        tracing::info!(
            account = runtime.account(),
            product_id = product.as_ref().map(|p| p.product_id.as_str()),
            selected_item = state.selected_item_id().map(|id| id.as_str()),
            "mounting product container"
        );

        let mut container = Self {
            runtime,
            product,
            loading: product_query.loading,
            query,
            slug: None,
            state_channel: InMemoryChannel::with_value(Arc::clone(&state)),
            dispatch_channel: InMemoryChannel::with_value(dispatch.clone()),
            state,
            dispatch,
            actions,
            sync: SelectedItemSync::new(),
            pixel: PixelMemo::new(),
            last_emitted: None,
            last_head: None,
            last_markup: None,
            sink,
            head,
        };
        container.commit();
        container
    }

    /// Route slug the page was reached through (`/:slug/p`).
    ///
    /// A different slug is a different page, so it is fixed for the
    /// container's lifetime.
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// New props from the page (re-render).
    ///
    /// The reducer state keeps the product it was mounted with; a new product
    /// only reaches head metadata, markup and pixel events.
    pub fn update_props(&mut self, product_query: ProductQuery, query: Query) {
        let product = product_query.product;
        if self.product.as_deref() != product.as_ref() {
            self.product = product.map(Arc::new);
        }
        self.loading = product_query.loading;
        self.query = query;
        self.commit();
    }

    /// Apply every queued action in order. Returns how many were applied.
    pub fn flush(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(action) = self.actions.try_recv() {
            applied += 1;
            let next = self.state.reduce(&action);
            if next == *self.state {
                tracing::debug!(action = action.action_type(), "product action left state unchanged");
                continue;
            }

            tracing::debug!(action = action.action_type(), "product state updated");
            self.state = Arc::new(next);
            if let Err(err) = self.state_channel.publish(Arc::clone(&self.state)) {
                tracing::warn!(error = %err, "failed to publish product state");
            }
            self.commit();
        }
        applied
    }

    fn commit(&mut self) {
        self.commit_head();
        self.commit_pixel();
        self.run_sync();
    }

    fn commit_head(&mut self) {
        let head = HeadMetadata::for_product(self.product.as_deref());
        if self.last_head.as_ref() != Some(&head) {
            self.head.set_head(&head);
            self.last_head = Some(head);
        }

        let markup_inputs = (self.product.clone(), self.query.clone());
        if self.last_markup.as_ref() != Some(&markup_inputs) {
            if let Some(product) = &self.product {
                self.head.render_product_markup(product, &self.query);
            }
            self.last_markup = Some(markup_inputs);
        }
    }

    fn commit_pixel(&mut self) {
        let (events, _) = self.pixel.events(
            self.runtime.account(),
            self.product.as_ref(),
            &self.query,
            self.runtime.environment(),
        );

        let emitted = Emitted {
            generation: self.pixel.generation(),
            loading: self.loading,
        };
        if self.last_emitted == Some(emitted) {
            return;
        }
        self.last_emitted = Some(emitted);

        let batch = PixelBatch::new(events.to_vec(), self.loading);
        tracing::info!(
            batch_id = %batch.batch_id(),
            events = batch.events().len(),
            loading = batch.loading(),
            "forwarding pixel events"
        );
        if let Err(err) = self.sink.push(&batch) {
            tracing::warn!(error = ?err, "pixel sink rejected batch");
        }
    }

    fn run_sync(&mut self) {
        let action = self.sync.evaluate(
            self.query.sku_id.as_ref(),
            self.state.selected_item.as_ref(),
            self.dispatch.id(),
        );
        if let Some(action) = action {
            tracing::debug!(sku_id = ?self.query.sku_id, "syncing selected item with skuId");
            if let Err(err) = self.dispatch.dispatch(action) {
                tracing::warn!(error = %err, "failed to queue selected item sync");
            }
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> Arc<ProductState> {
        Arc::clone(&self.state)
    }

    /// The dispatch handle (stable for the container's lifetime).
    pub fn dispatch(&self) -> Dispatch {
        self.dispatch.clone()
    }

    /// Subscribe to state snapshots, starting with the current one.
    pub fn subscribe_state(&self) -> Subscription<Arc<ProductState>> {
        self.state_channel.subscribe()
    }

    /// Subscribe to the dispatch handle. It is delivered once, on subscribe.
    pub fn subscribe_dispatch(&self) -> Subscription<Dispatch> {
        self.dispatch_channel.subscribe()
    }

    /// Pixel events for the current `(account, product, skuId)`.
    pub fn pixel_events(&mut self) -> Arc<[PixelEvent]> {
        self.pixel
            .events(
                self.runtime.account(),
                self.product.as_ref(),
                &self.query,
                self.runtime.environment(),
            )
            .0
    }

    /// Product query and route slug as forwarded to child consumers.
    pub fn child_props(&self) -> ChildProps<'_> {
        ChildProps {
            product: self.product.as_deref(),
            loading: self.loading,
            slug: self.slug.as_deref(),
        }
    }

    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }

    pub fn product(&self) -> Option<&Arc<Product>> {
        self.product.as_ref()
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn runtime(&self) -> &RuntimeContext {
        &self.runtime
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn head(&self) -> &H {
        &self.head
    }

    /// Close both channels and hand back the collaborators.
    ///
    /// Dropping the container disconnects subscribers as well; this only adds
    /// access to the sink and head afterwards.
    pub fn unmount(self) -> (S, H) {
        tracing::info!(dispatch = %self.dispatch.id(), "unmounting product container");
        self.state_channel.close();
        self.dispatch_channel.close();

        let Self { sink, head, .. } = self;
        (sink, head)
    }
}
