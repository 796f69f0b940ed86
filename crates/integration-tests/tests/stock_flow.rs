//! Order-flow stock behavior: the insert-plus-decrement reaction, its
//! deliberate asymmetries, and the manual stock adjustment procedure.

#![allow(clippy::unwrap_used)]

use storelab_core::{Price, ProductId};
use storelab_db::db::RepositoryError;
use storelab_db::models::{NewOrder, SummaryFilter};
use storelab_integration_tests::{TestContext, widget_scenario};

// ============================================================================
// Insert-plus-decrement
// ============================================================================

#[tokio::test]
async fn test_add_item_decrements_stock_and_derives_line_total() {
    let ctx = TestContext::new().await;
    let fixture = widget_scenario(&ctx).await;
    let orders = ctx.orders();

    let order = orders
        .create(&NewOrder::new(fixture.customer.id, Price::from_cents(2000)))
        .await
        .unwrap();
    let item = orders
        .add_item(order.id, fixture.product.id, 2, Price::from_cents(1000))
        .await
        .unwrap();

    // total_price is the generated column quantity * unit_price
    assert_eq!(item.total_price, Price::from_cents(2000));

    let product = ctx
        .products()
        .get_by_id(fixture.product.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(product.stock_quantity, 48);

    let summaries = orders
        .summaries(SummaryFilter::Customer(fixture.customer.id))
        .await
        .unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries.first().unwrap().total_items, 1);
}

#[tokio::test]
async fn test_stock_may_go_negative_through_order_flow() {
    let ctx = TestContext::new().await;
    let fixture = widget_scenario(&ctx).await;
    let orders = ctx.orders();

    let order = orders
        .create(&NewOrder::new(fixture.customer.id, Price::from_cents(0)))
        .await
        .unwrap();
    orders
        .add_item(order.id, fixture.product.id, 60, Price::from_cents(1000))
        .await
        .unwrap();

    let product = ctx
        .products()
        .get_by_id(fixture.product.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(product.stock_quantity, -10);
}

#[tokio::test]
async fn test_add_item_against_missing_product_rolls_back() {
    let ctx = TestContext::new().await;
    let fixture = widget_scenario(&ctx).await;
    let orders = ctx.orders();

    let order = orders
        .create(&NewOrder::new(fixture.customer.id, Price::from_cents(0)))
        .await
        .unwrap();
    let err = orders
        .add_item(order.id, ProductId::new(4242), 1, Price::from_cents(1000))
        .await
        .unwrap_err();

    assert!(matches!(err, RepositoryError::ForeignKeyViolation(_)));
    assert!(orders.items_for_order(order.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_add_item_rejects_non_positive_quantity() {
    let ctx = TestContext::new().await;
    let fixture = widget_scenario(&ctx).await;
    let orders = ctx.orders();

    let order = orders
        .create(&NewOrder::new(fixture.customer.id, Price::from_cents(0)))
        .await
        .unwrap();
    let err = orders
        .add_item(order.id, fixture.product.id, 0, Price::from_cents(1000))
        .await
        .unwrap_err();

    assert!(matches!(err, RepositoryError::CheckViolation(_)));

    // The paired decrement must not have leaked through.
    let product = ctx
        .products()
        .get_by_id(fixture.product.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(product.stock_quantity, 50);
}

// ============================================================================
// Insert-only asymmetry
// ============================================================================

#[tokio::test]
async fn test_quantity_update_recomputes_total_but_leaves_stock() {
    let ctx = TestContext::new().await;
    let fixture = widget_scenario(&ctx).await;
    let orders = ctx.orders();

    let order = orders
        .create(&NewOrder::new(fixture.customer.id, Price::from_cents(2000)))
        .await
        .unwrap();
    let item = orders
        .add_item(order.id, fixture.product.id, 2, Price::from_cents(1000))
        .await
        .unwrap();

    let updated = orders.update_item_quantity(item.id, 5).await.unwrap();
    assert_eq!(updated.quantity, 5);
    assert_eq!(updated.total_price, Price::from_cents(5000));

    // Stock still reflects only the original insert.
    let product = ctx
        .products()
        .get_by_id(fixture.product.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(product.stock_quantity, 48);
}

#[tokio::test]
async fn test_remove_item_does_not_restore_stock() {
    let ctx = TestContext::new().await;
    let fixture = widget_scenario(&ctx).await;
    let orders = ctx.orders();

    let order = orders
        .create(&NewOrder::new(fixture.customer.id, Price::from_cents(2000)))
        .await
        .unwrap();
    let item = orders
        .add_item(order.id, fixture.product.id, 2, Price::from_cents(1000))
        .await
        .unwrap();

    orders.remove_item(item.id).await.unwrap();

    assert!(orders.items_for_order(order.id).await.unwrap().is_empty());
    let product = ctx
        .products()
        .get_by_id(fixture.product.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(product.stock_quantity, 48);
}

// ============================================================================
// Manual stock adjustment (floored, unlike the order flow)
// ============================================================================

#[tokio::test]
async fn test_adjust_stock_restocks_by_sku() {
    let ctx = TestContext::new().await;
    let fixture = widget_scenario(&ctx).await;

    let new_stock = ctx.products().adjust_stock("W-1", 10).await.unwrap();
    assert_eq!(new_stock, 60);

    let product = ctx
        .products()
        .get_by_id(fixture.product.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(product.stock_quantity, 60);
}

#[tokio::test]
async fn test_adjust_stock_refuses_to_go_negative() {
    let ctx = TestContext::new().await;
    widget_scenario(&ctx).await;

    let err = ctx.products().adjust_stock("W-1", -60).await.unwrap_err();
    assert!(matches!(
        err,
        RepositoryError::InsufficientStock { available: 50 }
    ));

    // Unchanged after the refusal.
    let product = ctx.products().get_by_sku("W-1").await.unwrap().unwrap();
    assert_eq!(product.stock_quantity, 50);
}

#[tokio::test]
async fn test_adjust_stock_unknown_sku_is_not_found() {
    let ctx = TestContext::new().await;
    widget_scenario(&ctx).await;

    let err = ctx.products().adjust_stock("NO-SUCH", 5).await.unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound));
}
