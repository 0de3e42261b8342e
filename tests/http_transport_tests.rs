use std::sync::Arc;

use anyhow::Result;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tradeservices::{
    ApiError, ApiResponse, ControllerConfig, OrderController, OrderRequest, ReqwestTransport, TransportError,
};

async fn controller_for(server: &MockServer) -> OrderController {
    let config = ControllerConfig::default().with_host(server.uri()).without_polling();
    OrderController::with_transport("abc", config, None, Arc::new(ReqwestTransport::new())).unwrap()
}

#[tokio::test]
async fn create_order_posts_json_with_bearer_token() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/order"))
        .and(header("Authorization", "Bearer abc"))
        .and(body_json(json!({
            "symbol": "PETR4",
            "side": "B",
            "qty": "100",
            "account": "1",
            "execBroker": "2",
            "ordType": "Stop limit",
            "timeInForce": "GTC",
            "isDMA": "false",
            "entity": "E",
            "price": "20.50",
            "stopPx": "20.40",
        })))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"id": "ORD9"})))
        .expect(1)
        .mount(&server)
        .await;

    let controller = controller_for(&server).await;
    let request = OrderRequest::new("PETR4", "B", "100", "GTC", "false")
        .ord_type("Stop limit")
        .price("20.50")
        .stop_px("20.40")
        .account("1")
        .exec_broker("2")
        .entity("E");

    assert_eq!(controller.create_order(request).await?, json!({"id": "ORD9"}));
    Ok(())
}

#[tokio::test]
async fn cancel_all_no_content_over_http() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/order/myorders"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let controller = controller_for(&server).await;
    assert_eq!(controller.cancel_all_orders().await?, ApiResponse::Text(String::new()));
    Ok(())
}

#[tokio::test]
async fn get_order_uses_stripped_id_path() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/order/id/ABC123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"clOrdId": "ABC123"})))
        .expect(1)
        .mount(&server)
        .await;

    let controller = controller_for(&server).await;
    assert_eq!(controller.get_order("ABC123:meta").await?["clOrdId"], "ABC123");
    Ok(())
}

#[tokio::test]
async fn cancel_order_encodes_id_segment() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/order/A%2FB%3Fx=1%23f"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "cancelled"})))
        .expect(1)
        .mount(&server)
        .await;

    let controller = controller_for(&server).await;
    assert_eq!(controller.cancel_order("A/B?x=1#f").await?["status"], "cancelled");
    Ok(())
}

#[tokio::test]
async fn refused_connection_is_transport_error() -> Result<()> {
    // Bind then release a port so nothing is listening on it
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let host = format!("http://{}", listener.local_addr()?);
    drop(listener);

    let config = ControllerConfig::default().with_host(host).without_polling();
    let controller = OrderController::with_transport("abc", config, None, Arc::new(ReqwestTransport::new()))?;

    let err = controller.get_orders().await.unwrap_err();
    assert!(matches!(
        err,
        ApiError::Transport(TransportError::Connection { .. })
    ));
    Ok(())
}

#[tokio::test]
async fn summary_over_http() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/order"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"clOrdId": "A", "qty": "10", "cumQty": "0", "entity": "E"},
        ])))
        .mount(&server)
        .await;

    let controller = controller_for(&server).await;
    let summary = controller.summary(false).await?;
    assert_eq!(summary.columns(), ["clOrdId", "qty"]);
    Ok(())
}
