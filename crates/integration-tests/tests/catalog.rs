//! Catalog queries: lookups, category listing with pagination, and price
//! and activation updates.

#![allow(clippy::unwrap_used)]

use storelab_core::Price;
use storelab_integration_tests::{TestContext, widget_scenario};

#[tokio::test]
async fn test_get_by_sku() {
    let ctx = TestContext::seeded().await;

    let laptop = ctx
        .products()
        .get_by_sku("ELEC-001")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(laptop.name, "Laptop");
    assert_eq!(laptop.price, Price::from_cents(74_999));

    assert!(ctx.products().get_by_sku("NO-SUCH").await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_by_category_paginates_alphabetically() {
    let ctx = TestContext::seeded().await;
    let products = ctx.products();

    let first_page = products.list_by_category("Electronics", 3, 0).await.unwrap();
    let names: Vec<&str> = first_page.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Laptop", "Smart Watch", "Smartphone"]);

    let second_page = products.list_by_category("Electronics", 3, 3).await.unwrap();
    let names: Vec<&str> = second_page.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Tablet", "Wireless Headphones"]);
}

#[tokio::test]
async fn test_list_by_category_unknown_name_is_empty() {
    let ctx = TestContext::seeded().await;

    let page = ctx
        .products()
        .list_by_category("Groceries", 10, 0)
        .await
        .unwrap();
    assert!(page.is_empty());
}

#[tokio::test]
async fn test_update_price() {
    let ctx = TestContext::new().await;
    let fixture = widget_scenario(&ctx).await;

    let updated = ctx
        .products()
        .update_price(fixture.product.id, Price::from_cents(1250))
        .await
        .unwrap();
    assert_eq!(updated.price, Price::from_cents(1250));

    let reread = ctx
        .products()
        .get_by_id(fixture.product.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reread.price, Price::from_cents(1250));
}

#[tokio::test]
async fn test_deactivated_product_leaves_active_listing() {
    let ctx = TestContext::new().await;
    let fixture = widget_scenario(&ctx).await;

    assert_eq!(ctx.products().list_active().await.unwrap().len(), 1);

    let updated = ctx
        .products()
        .set_active(fixture.product.id, false)
        .await
        .unwrap();
    assert!(!updated.is_active);

    assert!(ctx.products().list_active().await.unwrap().is_empty());
}
