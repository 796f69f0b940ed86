//! The sample data set: shape, stock effects, and non-idempotence.

#![allow(clippy::unwrap_used)]

use storelab_core::Email;
use storelab_db::db::{RepositoryError, seed};
use storelab_integration_tests::TestContext;

#[tokio::test]
async fn test_sample_data_counts() {
    let ctx = TestContext::new().await;

    let report = seed::sample_data(&ctx.pool).await.unwrap();
    assert_eq!(report.categories, 4);
    assert_eq!(report.customers, 4);
    assert_eq!(report.products, 12);
    assert_eq!(report.orders, 5);
    assert_eq!(report.order_items, 6);

    assert_eq!(ctx.categories().count().await.unwrap(), 4);
    assert_eq!(ctx.customers().count().await.unwrap(), 4);
    assert_eq!(ctx.products().count().await.unwrap(), 12);
    assert_eq!(ctx.orders().count().await.unwrap(), 5);
}

#[tokio::test]
async fn test_seeded_stock_reflects_placed_orders() {
    let ctx = TestContext::seeded().await;
    let products = ctx.products();

    // Listed stock minus what the seeded orders consumed.
    let headphones = products.get_by_sku("ELEC-003").await.unwrap().unwrap();
    assert_eq!(headphones.stock_quantity, 58);

    let laptop = products.get_by_sku("ELEC-001").await.unwrap().unwrap();
    assert_eq!(laptop.stock_quantity, 24);

    let tshirt = products.get_by_sku("CLOTH-001").await.unwrap().unwrap();
    assert_eq!(tshirt.stock_quantity, 147);

    // Untouched by any order.
    let hose = products.get_by_sku("HOME-001").await.unwrap().unwrap();
    assert_eq!(hose.stock_quantity, 40);
}

#[tokio::test]
async fn test_seeded_rows_resolve_their_references() {
    let ctx = TestContext::seeded().await;

    for product in ctx.products().list_active().await.unwrap() {
        let category_id = product.category_id.unwrap();
        assert!(
            ctx.categories()
                .get_by_id(category_id)
                .await
                .unwrap()
                .is_some()
        );
    }

    let john = ctx
        .customers()
        .get_by_email(&Email::parse("john.doe@email.com").unwrap())
        .await
        .unwrap();
    assert!(john.is_some());
}

#[tokio::test]
async fn test_seeding_twice_trips_unique_constraints() {
    let ctx = TestContext::seeded().await;

    let err = seed::sample_data(&ctx.pool).await.unwrap_err();
    assert!(matches!(err, RepositoryError::UniqueViolation { .. }));
}
