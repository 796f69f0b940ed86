//! Read-only projections: the `order_summary` view, order history, order
//! totals, and aggregate statistics.

#![allow(clippy::unwrap_used)]

use storelab_core::{CustomerId, Email, OrderStatus, Price};
use storelab_db::models::{NewOrder, SummaryFilter};
use storelab_integration_tests::{TestContext, widget_scenario};

#[tokio::test]
async fn test_summary_keeps_item_less_orders() {
    let ctx = TestContext::seeded().await;
    let orders = ctx.orders();

    let summaries = orders.summaries(SummaryFilter::All).await.unwrap();
    // One view row per order, whether or not it has items.
    let order_count = usize::try_from(orders.count().await.unwrap()).unwrap();
    assert_eq!(summaries.len(), order_count);

    let maria = summaries
        .iter()
        .find(|s| s.email.as_str() == "maria.garcia@email.com")
        .unwrap();
    assert_eq!(maria.total_items, 0);
    assert_eq!(maria.customer_name, "Maria Garcia");
}

#[tokio::test]
async fn test_summary_row_shape() {
    let ctx = TestContext::new().await;
    let fixture = widget_scenario(&ctx).await;
    let orders = ctx.orders();

    let order = orders
        .create(&NewOrder::new(fixture.customer.id, Price::from_cents(2000)))
        .await
        .unwrap();
    orders
        .add_item(order.id, fixture.product.id, 2, Price::from_cents(1000))
        .await
        .unwrap();

    let summaries = orders.summaries(SummaryFilter::All).await.unwrap();
    let row = summaries.first().unwrap();

    assert_eq!(row.order_id, order.id);
    assert_eq!(row.customer_name, "John Doe");
    assert_eq!(row.email.as_str(), "john@x.com");
    assert_eq!(row.status, OrderStatus::Pending);
    assert_eq!(row.total_amount, Price::from_cents(2000));
    assert_eq!(row.total_items, 1);
}

#[tokio::test]
async fn test_summary_filter_limits_to_one_customer() {
    let ctx = TestContext::seeded().await;
    let orders = ctx.orders();

    let john = ctx
        .customers()
        .get_by_email(&Email::parse("john.doe@email.com").unwrap())
        .await
        .unwrap()
        .unwrap();

    let summaries = orders
        .summaries(SummaryFilter::Customer(john.id))
        .await
        .unwrap();
    assert_eq!(summaries.len(), 2);
    assert!(
        summaries
            .iter()
            .all(|s| s.email.as_str() == "john.doe@email.com")
    );
}

#[tokio::test]
async fn test_history_newest_first_with_item_counts() {
    let ctx = TestContext::seeded().await;
    let orders = ctx.orders();

    let john = ctx
        .customers()
        .get_by_email(&Email::parse("john.doe@email.com").unwrap())
        .await
        .unwrap()
        .unwrap();

    let history = orders.history_for_customer(john.id).await.unwrap();
    assert_eq!(history.len(), 2);

    // Newest first; same-timestamp orders fall back to the higher order id.
    let newest = history.first().unwrap();
    let older = history.get(1).unwrap();
    assert!(newest.order_date >= older.order_date);
    assert!(newest.order_id.as_i64() > older.order_id.as_i64());

    // The shipped laptop order has one line, the delivered order two.
    assert_eq!(newest.status, OrderStatus::Shipped);
    assert_eq!(newest.total_items, 1);
    assert_eq!(older.status, OrderStatus::Delivered);
    assert_eq!(older.total_items, 2);
}

#[tokio::test]
async fn test_history_unknown_customer_is_empty() {
    let ctx = TestContext::seeded().await;

    let history = ctx
        .orders()
        .history_for_customer(CustomerId::new(4242))
        .await
        .unwrap();
    assert!(history.is_empty());
}

#[tokio::test]
async fn test_history_by_email_matches_by_id() {
    let ctx = TestContext::seeded().await;
    let orders = ctx.orders();

    let email = Email::parse("jane.smith@email.com").unwrap();
    let jane = ctx
        .customers()
        .get_by_email(&email)
        .await
        .unwrap()
        .unwrap();

    let by_id = orders.history_for_customer(jane.id).await.unwrap();
    let by_email = orders.history_for_email(&email).await.unwrap();

    assert_eq!(by_id.len(), by_email.len());
    for (a, b) in by_id.iter().zip(&by_email) {
        assert_eq!(a.order_id, b.order_id);
        assert_eq!(a.total_items, b.total_items);
    }
}

#[tokio::test]
async fn test_order_total_sums_generated_line_totals() {
    let ctx = TestContext::seeded().await;
    let orders = ctx.orders();

    let john = ctx
        .customers()
        .get_by_email(&Email::parse("john.doe@email.com").unwrap())
        .await
        .unwrap()
        .unwrap();
    let history = orders.history_for_customer(john.id).await.unwrap();
    let delivered = history
        .iter()
        .find(|e| e.status == OrderStatus::Delivered)
        .unwrap();

    // Two wireless headphones plus one book.
    let total = orders.order_total(delivered.order_id).await.unwrap();
    assert_eq!(total, Price::from_cents(2 * 12999 + 2999));
    assert_eq!(total, delivered.total_amount);
}

#[tokio::test]
async fn test_order_total_zero_for_item_less_order() {
    let ctx = TestContext::new().await;
    let fixture = widget_scenario(&ctx).await;
    let orders = ctx.orders();

    let order = orders
        .create(&NewOrder::new(fixture.customer.id, Price::ZERO))
        .await
        .unwrap();
    assert_eq!(orders.order_total(order.id).await.unwrap(), Price::ZERO);
}

#[tokio::test]
async fn test_stats_over_seeded_orders() {
    let ctx = TestContext::seeded().await;

    let stats = ctx.orders().stats().await.unwrap();
    assert_eq!(stats.total_orders, 5);
    assert_eq!(stats.total_revenue, Price::from_cents(119_491));
    assert_eq!(stats.average_order_value, Price::from_cents(23_898));
    assert_eq!(stats.min_order, Price::ZERO);
    assert_eq!(stats.max_order, Price::from_cents(74_999));
}

#[tokio::test]
async fn test_stats_all_zero_when_empty() {
    let ctx = TestContext::new().await;

    let stats = ctx.orders().stats().await.unwrap();
    assert_eq!(stats.total_orders, 0);
    assert_eq!(stats.total_revenue, Price::ZERO);
    assert_eq!(stats.average_order_value, Price::ZERO);
    assert_eq!(stats.min_order, Price::ZERO);
    assert_eq!(stats.max_order, Price::ZERO);
}

#[tokio::test]
async fn test_summary_reflects_cascading_deletes() {
    let ctx = TestContext::seeded().await;
    let orders = ctx.orders();

    let before = orders.summaries(SummaryFilter::All).await.unwrap().len();

    let jane = ctx
        .customers()
        .get_by_email(&Email::parse("jane.smith@email.com").unwrap())
        .await
        .unwrap()
        .unwrap();
    ctx.customers().delete(jane.id).await.unwrap();

    // Live view: Jane's order vanished with her.
    let after = orders.summaries(SummaryFilter::All).await.unwrap();
    assert_eq!(after.len(), before - 1);
    assert!(
        after
            .iter()
            .all(|s| s.email.as_str() != "jane.smith@email.com")
    );
}
