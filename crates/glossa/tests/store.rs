//! Integration tests for reactive recomputation in `LocaleStore`.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use glossa::{Direction, LocaleContext, LocaleStore, PageProps, TranslationTable, replacements};

fn shared_table() -> Arc<TranslationTable> {
    let mut table = TranslationTable::new();
    table.insert("en", "hello", "Hello");
    table.insert("fr", "hello", "Bonjour");
    Arc::new(table)
}

fn record_hello(store: &mut LocaleStore) -> Rc<RefCell<Vec<String>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    store.subscribe(move |view| {
        sink.borrow_mut()
            .push(view.translator().t("hello", &replacements! {}, None));
    });
    seen
}

// =========================================================================
// Reads
// =========================================================================

#[test]
fn default_store_is_empty_and_total() {
    let store = LocaleStore::new();

    assert_eq!(store.accessor().current_locale(), "en");
    assert!(store.accessor().active_translations().is_empty());
    assert!(store.translations().is_none());
    assert!(store.props().locale.is_none());
    assert_eq!(store.translator().t("hello", &replacements! {}, None), "hello");
}

#[test]
fn builder_sets_table_and_props() {
    let store = LocaleStore::builder()
        .translations(shared_table())
        .props(PageProps::new(LocaleContext::with_current("fr")))
        .build();

    assert_eq!(store.translator().t("hello", &replacements! {}, None), "Bonjour");
}

// =========================================================================
// Notifications
// =========================================================================

#[test]
fn subscribe_receives_current_state_immediately() {
    let mut store = LocaleStore::builder().translations(shared_table()).build();
    let seen = record_hello(&mut store);

    assert_eq!(*seen.borrow(), vec!["Hello"]);
}

#[test]
fn props_change_pushes_recomputed_view() {
    let mut store = LocaleStore::builder().translations(shared_table()).build();
    let seen = record_hello(&mut store);

    store.set_props(PageProps::new(LocaleContext::with_current("fr")));
    store.set_locale_context(LocaleContext::with_current("de"));

    assert_eq!(*seen.borrow(), vec!["Hello", "Bonjour", "hello"]);
    assert_eq!(store.props().locale.as_ref().map(|c| c.current.as_deref()), Some(Some("de")));
}

#[test]
fn late_table_installation_notifies() {
    let mut store = LocaleStore::new();
    let seen = record_hello(&mut store);

    let table = shared_table();
    store.set_translations(Arc::clone(&table));

    assert_eq!(*seen.borrow(), vec!["hello", "Hello"]);
    assert!(store.translations().is_some_and(|t| Arc::ptr_eq(t, &table)));
}

#[test]
fn direction_tracks_context() {
    let mut store = LocaleStore::new();
    let dirs = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&dirs);
    store.subscribe(move |view| sink.borrow_mut().push(view.direction()));

    store.set_locale_context(LocaleContext {
        current: Some("ar".to_string()),
        dir: Some(Direction::Rtl),
        available: None,
    });
    store.set_props(PageProps::default());

    assert_eq!(
        *dirs.borrow(),
        vec![Direction::Ltr, Direction::Rtl, Direction::Ltr]
    );
}

#[test]
fn reads_are_never_stale_after_update() {
    let mut store = LocaleStore::builder().translations(shared_table()).build();
    store.set_locale_context(LocaleContext::with_current("fr"));

    assert_eq!(store.accessor().current_locale(), "fr");
    assert_eq!(store.translator().t("hello", &replacements! {}, None), "Bonjour");
}

// =========================================================================
// Unsubscribe
// =========================================================================

#[test]
fn unsubscribe_stops_notifications() {
    let mut store = LocaleStore::builder().translations(shared_table()).build();
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    let id = store.subscribe(move |_| *sink.borrow_mut() += 1);

    store.set_locale_context(LocaleContext::with_current("fr"));
    assert!(store.unsubscribe(id));
    store.set_locale_context(LocaleContext::with_current("en"));

    assert_eq!(*count.borrow(), 2);
    assert_eq!(store.subscriber_count(), 0);
    assert!(!store.unsubscribe(id));
}

#[test]
fn subscription_ids_are_distinct() {
    let mut store = LocaleStore::new();
    let a = store.subscribe(|_| {});
    let b = store.subscribe(|_| {});

    assert_ne!(a, b);
    assert!(store.unsubscribe(a));
    assert_eq!(store.subscriber_count(), 1);
}
