//! Push-based recomputation of the locale view.
//!
//! The store owns the host's current page props and an injected translation
//! table. Whenever either is replaced, every subscriber is handed a freshly
//! derived [`LocaleAccessor`], so readers never need to resynchronize by hand.

use std::sync::Arc;

use bon::Builder;
use tracing::trace;

use crate::accessor::LocaleAccessor;
use crate::resolver::Translator;
use crate::table::TranslationTable;
use crate::types::{LocaleContext, PageProps};

static EMPTY_CONTEXT: LocaleContext = LocaleContext {
    current: None,
    dir: None,
    available: None,
};

type Subscriber = Box<dyn FnMut(&LocaleAccessor<'_>)>;

/// Handle returned by [`LocaleStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Reactive holder of the locale state.
///
/// # Example
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use std::sync::Arc;
///
/// use glossa::{LocaleContext, LocaleStore, PageProps, TranslationTable, replacements};
///
/// let mut table = TranslationTable::new();
/// table.insert("en", "hello", "Hello");
/// table.insert("fr", "hello", "Bonjour");
///
/// let mut store = LocaleStore::builder().translations(Arc::new(table)).build();
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&seen);
/// store.subscribe(move |view| {
///     sink.borrow_mut().push(view.translator().t("hello", &replacements! {}, None));
/// });
///
/// store.set_props(PageProps::new(LocaleContext::with_current("fr")));
///
/// assert_eq!(*seen.borrow(), vec!["Hello", "Bonjour"]);
/// ```
#[derive(Builder)]
pub struct LocaleStore {
    /// Injected translation table. `None` until the host provides one.
    translations: Option<Arc<TranslationTable>>,

    /// The host's current page props.
    #[builder(default)]
    props: PageProps,

    #[builder(skip)]
    subscribers: Vec<(SubscriptionId, Subscriber)>,

    #[builder(skip)]
    next_id: u64,
}

impl Default for LocaleStore {
    fn default() -> Self {
        LocaleStore::builder().build()
    }
}

impl LocaleStore {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// The locale view derived from the current state.
    pub fn accessor(&self) -> LocaleAccessor<'_> {
        LocaleAccessor::new(self.translations.as_deref(), self.locale_context())
    }

    /// Shorthand for `self.accessor().translator()`.
    pub fn translator(&self) -> Translator<'_> {
        self.accessor().translator()
    }

    pub fn props(&self) -> &PageProps {
        &self.props
    }

    pub fn translations(&self) -> Option<&Arc<TranslationTable>> {
        self.translations.as_ref()
    }

    fn locale_context(&self) -> &LocaleContext {
        self.props.locale.as_ref().unwrap_or(&EMPTY_CONTEXT)
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Register a callback that receives the derived view now and after every
    /// state change.
    pub fn subscribe<F>(&mut self, mut subscriber: F) -> SubscriptionId
    where
        F: FnMut(&LocaleAccessor<'_>) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        subscriber(&self.accessor());
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Remove a subscriber. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    // =========================================================================
    // Updates
    // =========================================================================

    /// Replace the page props and notify subscribers.
    pub fn set_props(&mut self, props: PageProps) {
        self.props = props;
        self.notify();
    }

    /// Replace only the locale entry of the page props and notify subscribers.
    pub fn set_locale_context(&mut self, context: LocaleContext) {
        self.props.locale = Some(context);
        self.notify();
    }

    /// Replace the translation table and notify subscribers.
    pub fn set_translations(&mut self, translations: Arc<TranslationTable>) {
        self.translations = Some(translations);
        self.notify();
    }

    fn notify(&mut self) {
        let context = self.props.locale.as_ref().unwrap_or(&EMPTY_CONTEXT);
        let accessor = LocaleAccessor::new(self.translations.as_deref(), context);
        trace!(
            locale = accessor.current_locale(),
            subscribers = self.subscribers.len(),
            "locale state changed"
        );
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&accessor);
        }
    }
}
