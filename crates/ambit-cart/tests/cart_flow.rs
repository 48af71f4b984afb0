use std::cell::RefCell;
use std::rc::Rc;

use ambit_cart::*;
use ambit_core::{Duration, ManualClock, ScopeError, Timers};

fn laptop() -> Product {
    Product::new(1, "Laptop", Money::from_cents(99999)).with_description("High-performance laptop")
}

fn mouse() -> Product {
    Product::new(2, "Mouse", Money::from_cents(2999))
}

fn setup() -> (Rc<ManualClock>, Timers, CartScope) {
    let clock = ManualClock::new();
    let timers = Timers::with_clock(clock.clone());
    let scope = cart_provider(&timers, CartConfig::default());
    (clock, timers, scope)
}

fn messages(cart: &Cart) -> Vec<String> {
    cart.notifications()
        .unwrap()
        .into_iter()
        .map(|n| n.message)
        .collect()
}

#[test]
fn repeated_adds_merge_into_one_line() {
    let (_clock, _timers, scope) = setup();
    scope.run(|| {
        let cart = use_cart().unwrap();
        for _ in 0..5 {
            cart.add_to_cart(&laptop()).unwrap();
        }
        let items = cart.items().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 5);
    });
}

#[test]
fn non_positive_quantity_removes_item() {
    let (_clock, _timers, scope) = setup();
    let cart = scope.operations().clone();

    cart.add_to_cart(&laptop()).unwrap();
    cart.add_to_cart(&mouse()).unwrap();
    cart.update_quantity(ProductId(1), 0).unwrap();
    cart.update_quantity(ProductId(2), -5).unwrap();

    assert!(!cart.is_in_cart(ProductId(1)).unwrap());
    assert!(!cart.is_in_cart(ProductId(2)).unwrap());
    assert_eq!(cart.total().unwrap(), Money::ZERO);
}

#[test]
fn update_quantity_sets_value_without_notification() {
    let (_clock, _timers, scope) = setup();
    let cart = scope.operations().clone();

    cart.add_to_cart(&mouse()).unwrap();
    let before = cart.notifications().unwrap().len();
    cart.update_quantity(ProductId(2), 4).unwrap();

    assert_eq!(cart.item_count().unwrap(), 4);
    assert_eq!(cart.total().unwrap(), Money::from_cents(11996));
    assert_eq!(cart.notifications().unwrap().len(), before);

    // not in cart: nothing happens
    cart.update_quantity(ProductId(42), 3).unwrap();
    assert!(!cart.is_in_cart(ProductId(42)).unwrap());
}

#[test]
fn update_quantity_rejects_out_of_range() {
    let (_clock, _timers, scope) = setup();
    let cart = scope.operations().clone();
    cart.add_to_cart(&mouse()).unwrap();

    let too_many = i64::from(u32::MAX) + 1;
    assert_eq!(
        cart.update_quantity(ProductId(2), too_many),
        Err(CartError::InvalidQuantity(too_many))
    );
    assert_eq!(cart.item_count().unwrap(), 1);
}

#[test]
fn total_tracks_every_mutation() {
    let (_clock, _timers, scope) = setup();
    let cart = scope.operations().clone();

    let check = |cart: &Cart| {
        let state = cart.state().unwrap();
        let recomputed = state
            .items()
            .iter()
            .map(|i| i.product.price.cents() * i64::from(i.quantity))
            .sum::<i64>();
        assert_eq!(cart.total().unwrap(), Money::from_cents(recomputed));
    };

    cart.add_to_cart(&laptop()).unwrap();
    check(&cart);
    cart.add_to_cart(&mouse()).unwrap();
    check(&cart);
    cart.update_quantity(ProductId(2), 3).unwrap();
    check(&cart);
    cart.remove_from_cart(ProductId(1)).unwrap();
    check(&cart);
    cart.clear_cart().unwrap();
    check(&cart);
    assert_eq!(cart.total().unwrap(), Money::ZERO);
}

#[test]
fn every_accessor_fails_outside_provider() {
    let not_in_scope = |r: Result<_, CartError>| {
        assert!(matches!(r, Err(CartError::Scope(ScopeError::NotInScope { .. }))));
    };
    not_in_scope(use_cart().map(|_| ()));
    not_in_scope(use_cart_actions().map(|_| ()));
    not_in_scope(use_cart_state().map(|_| ()));
    not_in_scope(use_cart_notifications().map(|_| ()));
}

#[test]
fn retained_cart_fails_after_destroy() {
    let (_clock, timers, scope) = setup();
    let cart = scope.run(|| use_cart().unwrap());
    cart.add_to_cart(&laptop()).unwrap();
    assert_eq!(timers.pending(), 1);

    scope.destroy();

    assert_eq!(timers.pending(), 0);
    assert!(matches!(cart.total(), Err(CartError::Scope(_))));
    assert!(matches!(cart.add_to_cart(&laptop()), Err(CartError::Scope(_))));
    assert!(scope.run(|| use_cart()).is_err());
}

#[test]
fn discount_returns_value_without_changing_cart() {
    let (_clock, _timers, scope) = setup();
    let cart = scope.operations().clone();
    cart.add_to_cart(&Product::new(7, "Gift card", Money::from_cents(10000)))
        .unwrap();

    assert_eq!(cart.apply_discount(10.0).unwrap(), Money::from_cents(9000));
    assert_eq!(cart.total().unwrap(), Money::from_cents(10000));
    assert_eq!(
        messages(&cart).last().map(String::as_str),
        Some("Discount applied! Saved $10.00")
    );
}

#[test]
fn invalid_discount_is_rejected() {
    let (_clock, _timers, scope) = setup();
    let cart = scope.operations().clone();
    cart.add_to_cart(&mouse()).unwrap();
    let before = cart.notifications().unwrap().len();

    for pct in [-1.0, 100.5, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            cart.apply_discount(pct),
            Err(CartError::InvalidDiscount(_))
        ));
    }
    assert_eq!(cart.notifications().unwrap().len(), before);
    assert_eq!(cart.apply_discount(100.0).unwrap(), Money::ZERO);
}

#[test]
fn invalid_product_is_rejected() {
    let (_clock, _timers, scope) = setup();
    let cart = scope.operations().clone();

    let nameless = Product::new(3, "  ", Money::from_cents(100));
    let negative = Product::new(4, "Refund", Money::from_cents(-100));
    assert!(matches!(
        cart.add_to_cart(&nameless),
        Err(CartError::InvalidProduct { id: ProductId(3), .. })
    ));
    assert!(matches!(
        cart.add_to_cart(&negative),
        Err(CartError::InvalidProduct { id: ProductId(4), .. })
    ));
    assert!(cart.state().unwrap().is_empty());
    assert!(cart.notifications().unwrap().is_empty());

    // free items are fine
    cart.add_to_cart(&Product::new(5, "Sticker", Money::ZERO)).unwrap();
    assert_eq!(cart.item_count().unwrap(), 1);
}

#[test]
fn notifications_expire_after_ttl() {
    let (clock, timers, scope) = setup();
    let cart = scope.operations().clone();

    cart.add_to_cart(&laptop()).unwrap();
    assert_eq!(messages(&cart), vec!["Added Laptop to cart"]);

    clock.advance(Duration::from_millis(2999));
    assert_eq!(timers.run_due(), 0);
    assert_eq!(messages(&cart).len(), 1);

    clock.advance(Duration::from_millis(1));
    assert_eq!(timers.run_due(), 1);
    assert!(messages(&cart).is_empty());
}

#[test]
fn dismissal_cancels_pending_expiry() {
    let (clock, timers, scope) = setup();
    let cart = scope.operations().clone();

    cart.add_to_cart(&laptop()).unwrap();
    let first = cart.notifications().unwrap()[0].clone();
    assert!(timers.is_pending(first.expiry()));

    assert!(cart.dismiss_notification(first.id).unwrap());
    assert!(cart.notifications().unwrap().is_empty());
    assert!(!timers.is_pending(first.expiry()));
    assert!(!cart.dismiss_notification(first.id).unwrap());

    clock.advance(Duration::from_millis(1000));
    cart.add_to_cart(&mouse()).unwrap();
    clock.advance(Duration::from_millis(2000));
    // the dismissed notification's timer would have been due now
    assert_eq!(timers.run_due(), 0);
    assert_eq!(messages(&cart), vec!["Added Mouse to cart"]);
}

#[test]
fn notification_ids_are_unique_under_rapid_creation() {
    let (_clock, _timers, scope) = setup();
    let cart = scope.operations().clone();
    for _ in 0..50 {
        cart.add_to_cart(&mouse()).unwrap();
    }
    let mut ids: Vec<_> = cart.notifications().unwrap().iter().map(|n| n.id).collect();
    let n = ids.len();
    ids.dedup();
    assert_eq!(n, 50);
    assert_eq!(ids.len(), 50);
}

#[test]
fn custom_ttl_is_honoured() {
    let clock = ManualClock::new();
    let timers = Timers::with_clock(clock.clone());
    let scope = cart_provider(
        &timers,
        CartConfig {
            notification_ttl: Duration::from_millis(250),
        },
    );
    let cart = scope.operations().clone();
    cart.clear_cart().unwrap();
    assert_eq!(messages(&cart), vec!["Cart cleared"]);
    clock.advance(Duration::from_millis(250));
    timers.run_due();
    assert!(messages(&cart).is_empty());
}

#[test]
fn end_to_end_scenario() {
    let (_clock, _timers, scope) = setup();
    scope.run(|| {
        let cart = use_cart().unwrap();
        assert_eq!(cart.item_count().unwrap(), 0);

        cart.add_to_cart(&laptop()).unwrap();
        assert_eq!(cart.item_count().unwrap(), 1);
        assert_eq!(cart.total().unwrap(), Money::from_cents(99999));

        cart.add_to_cart(&laptop()).unwrap();
        assert_eq!(cart.item_count().unwrap(), 2);
        assert_eq!(cart.items().unwrap().len(), 1);
        assert_eq!(cart.total().unwrap(), Money::from_cents(199998));

        cart.remove_from_cart(ProductId(1)).unwrap();
        assert!(cart.state().unwrap().is_empty());
        assert_eq!(cart.total().unwrap(), Money::ZERO);

        assert_eq!(
            messages(&cart),
            vec![
                "Added Laptop to cart",
                "Added Laptop to cart",
                "Item removed from cart"
            ]
        );
    });
}

#[test]
fn consumers_are_notified_in_order() {
    let (_clock, _timers, scope) = setup();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let _guard = scope.run(|| {
        let seen = seen.clone();
        use_cart()
            .unwrap()
            .observe(move |s| {
                let count = s.item_count().unwrap();
                seen.borrow_mut().push((count, s.notifications().len()))
            })
            .unwrap()
    });

    let cart = scope.operations().clone();
    cart.add_to_cart(&mouse()).unwrap();
    cart.update_quantity(ProductId(2), 3).unwrap();
    cart.remove_from_cart(ProductId(2)).unwrap();
    cart.clear_cart().unwrap();

    // one refresh per operation, each carrying its own notification
    assert_eq!(*seen.borrow(), vec![(1, 1), (3, 1), (0, 2), (0, 3)]);
}

#[test]
fn item_change_and_notification_land_together() {
    let (_clock, _timers, scope) = setup();
    let cart = scope.operations().clone();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let _guard = {
        let seen = seen.clone();
        cart.observe(move |s| seen.borrow_mut().push((s.items().len(), s.notifications().len())))
            .unwrap()
    };

    cart.add_to_cart(&laptop()).unwrap();
    assert_eq!(*seen.borrow(), vec![(1, 1)]);
    cart.apply_discount(10.0).unwrap();
    assert_eq!(*seen.borrow(), vec![(1, 1), (1, 2)]);
}

#[test]
fn huge_quantity_reports_overflow_instead_of_panicking() {
    let (_clock, _timers, scope) = setup();
    let cart = scope.operations().clone();
    cart.add_to_cart(&laptop()).unwrap();
    cart.add_to_cart(&mouse()).unwrap();

    cart.update_quantity(ProductId(1), i64::from(u32::MAX)).unwrap();

    assert_eq!(cart.item_count(), Err(CartError::Overflow));
    assert_eq!(cart.total(), Err(CartError::Overflow));
    scope.run(|| assert_eq!(use_cart_state(), Err(CartError::Overflow)));

    // the cart stays usable once the quantity comes back down
    cart.update_quantity(ProductId(1), 2).unwrap();
    assert_eq!(cart.item_count().unwrap(), 3);
}

#[test]
fn huge_price_reports_overflow_instead_of_panicking() {
    let (_clock, _timers, scope) = setup();
    let cart = scope.operations().clone();
    let bullion = Product::new(7, "Bullion", Money::from_cents(i64::MAX / 2));
    cart.add_to_cart(&bullion).unwrap();
    cart.update_quantity(ProductId(7), 3).unwrap();

    assert_eq!(cart.total(), Err(CartError::Overflow));
    assert_eq!(cart.apply_discount(10.0), Err(CartError::Overflow));
    assert_eq!(cart.item_count().unwrap(), 3);
}

#[test]
fn selectors_expose_partial_views() {
    let (_clock, _timers, scope) = setup();
    scope.run(|| {
        let actions = use_cart_actions().unwrap();
        actions.add_to_cart(&laptop()).unwrap();
        actions.add_to_cart(&mouse()).unwrap();
        actions.update_quantity(ProductId(2), 2).unwrap();

        let snapshot = use_cart_state().unwrap();
        assert_eq!(snapshot.item_count, 3);
        assert_eq!(snapshot.total, Money::from_cents(99999 + 2 * 2999));
        assert_eq!(snapshot.items.len(), 2);

        let notes = use_cart_notifications().unwrap();
        assert_eq!(notes.notifications.len(), 2);
        assert!(notes.dismiss(notes.notifications[0].id).unwrap());
        assert_eq!(use_cart_notifications().unwrap().notifications.len(), 1);

        actions.clear_cart().unwrap();
        assert_eq!(use_cart_state().unwrap().item_count, 0);
    });
}

#[test]
fn catalog_entries_deserialize() {
    let json = r#"[
        {"id": 1, "name": "Laptop", "price_cents": 99999, "description": "High-performance laptop"},
        {"id": 2, "name": "Mouse", "price_cents": 2999}
    ]"#;
    let products: Vec<Product> = serde_json::from_str(json).unwrap();
    assert_eq!(products[0], laptop());
    assert_eq!(products[1], mouse());
}
