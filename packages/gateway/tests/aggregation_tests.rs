//! Integration tests for list fields backed by server streams.

mod common;

use common::*;
use gateway_core::kernel::BackendError;
use serde_json::json;

#[tokio::test]
async fn test_products_keep_stream_order() {
    let harness = TestHarness::new();

    let data = harness.anonymous().query("query { products { id name } }").await;

    assert_eq!(
        data["products"],
        json!([
            { "id": 1, "name": "Pen" },
            { "id": 2, "name": "Notebook" },
            { "id": 3, "name": "Lamp" },
        ])
    );
}

#[tokio::test]
async fn test_broken_stream_discards_partial_items() {
    let harness = TestHarness::new();
    harness.deps.products.break_streams_after(2, "connection reset");

    let result = harness.anonymous().execute("query { products { id } }").await;

    assert_eq!(result.first_code(), Some("BACKEND_STREAM_ABORTED"));
    assert!(result.errors[0].contains("connection reset"));
    assert_eq!(result.data, Some(serde_json::Value::Null));
}

#[tokio::test]
async fn test_unreachable_backend_fails_the_field() {
    let harness = TestHarness::new();
    harness.deps.orders.fail(
        "GetAllOrders",
        BackendError::Unavailable {
            service: "order",
            message: "connection refused".to_string(),
        },
    );

    let result = harness
        .admin()
        .execute("query { GetAllOrders { orderId } }")
        .await;

    assert_eq!(result.first_code(), Some("BACKEND_UNAVAILABLE"));
}

#[tokio::test]
async fn test_empty_stream_is_an_empty_list() {
    let harness = TestHarness::new();

    let data = harness
        .shopper()
        .query("query { GetAllWishlist { productId } }")
        .await;

    assert_eq!(data["GetAllWishlist"], json!([]));
}

#[tokio::test]
async fn test_orders_are_scoped_to_the_caller() {
    let harness = TestHarness::new();
    let bob = harness.shopper();
    let other = harness.client_as(5, false, false);

    bob.query("mutation { OrderAll { orderId } }").await;
    other.query("mutation { OrderAll { orderId } }").await;

    let data = bob.query("query { GetAllOrdersUser { orderId } }").await;
    assert_eq!(data["GetAllOrdersUser"], json!([{ "orderId": 1 }]));

    // Order 2 belongs to subject 5
    let result = bob.execute("query { GetOrder(orderId: 2) { orderId } }").await;
    assert_eq!(result.first_code(), Some("BACKEND_CALL_FAILED"));
    assert!(harness.deps.log.called("order.GetOrder"));
    assert!(harness.deps.log.calls().contains(&"order.GetOrder(2, 2)".to_string()));

    let data = harness
        .admin()
        .query("query { GetAllOrders { orderId } }")
        .await;
    assert_eq!(data["GetAllOrders"], json!([{ "orderId": 1 }, { "orderId": 2 }]));
}

#[tokio::test]
async fn test_cancel_and_change_order_status() {
    let harness = TestHarness::new();
    let bob = harness.shopper();
    bob.query("mutation { OrderAll { orderId } }").await;

    let data = bob
        .query("mutation { UserCancelOrder(orderId: 1) { orderStatusId } }")
        .await;
    assert_eq!(data["UserCancelOrder"]["orderStatusId"], 4);

    let data = harness
        .admin()
        .query("mutation { ChangeOrderStatus(orderId: 1, statusId: 2) { orderStatusId } }")
        .await;
    assert_eq!(data["ChangeOrderStatus"]["orderStatusId"], 2);
}

#[tokio::test]
async fn test_update_quantity_rejects_non_numeric_id() {
    let harness = TestHarness::new();

    let result = harness
        .admin()
        .execute(r#"mutation { UpdateQuantity(id: "abc", quantity: 1, increase: true) { quantity } }"#)
        .await;

    assert_eq!(result.first_code(), Some("VALIDATION"));
    assert!(!harness.deps.log.called("product.UpdateQuantity"));
}

#[tokio::test]
async fn test_update_quantity_adjusts_stock() {
    let harness = TestHarness::new();

    let data = harness
        .admin()
        .query(r#"mutation { UpdateQuantity(id: "3", quantity: 5, increase: true) { name quantity } }"#)
        .await;

    assert_eq!(data["UpdateQuantity"], json!({ "name": "Lamp", "quantity": 7 }));
}

#[tokio::test]
async fn test_address_round_trip() {
    let harness = TestHarness::new();
    let bob = harness.shopper();

    bob.query(
        r#"mutation { AddAddress(city: "Pune", district: "Haveli", state: "MH", road: "FC Road") { id } }"#,
    )
    .await;
    let data = bob.query("query { GetAddress { city userId } }").await;

    assert_eq!(data["GetAddress"], json!({ "city": "Pune", "userId": 2 }));
}
