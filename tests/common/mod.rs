#![allow(dead_code)]

use facturapi::Facturapi;
use httpmock::MockServer;
use serde_json::{Value, json};

pub const API_KEY: &str = "sk_test_123";

/// `Basic base64("sk_test_123:")`.
pub const AUTH_HEADER: &str = "Basic c2tfdGVzdF8xMjM6";

pub fn client(server: &MockServer) -> Facturapi {
    Facturapi::new(API_KEY)
        .expect("client builds")
        .with_base_url(server.base_url())
        .expect("mock server URL is valid")
}

pub fn customer_json(id: &str) -> Value {
    json!({
        "id": id,
        "created_at": "2024-03-01T18:22:10.000Z",
        "livemode": false,
        "legal_name": "PÚBLICO EN GENERAL",
        "tax_id": "XAXX010101000",
        "tax_system": "616",
        "address": { "zip": "03020", "country": "MEX" }
    })
}

pub fn product_json(id: &str) -> Value {
    json!({
        "id": id,
        "created_at": "2024-01-10T09:00:00Z",
        "livemode": false,
        "description": "Ukulele",
        "product_key": "60131324",
        "price": 345.6,
        "tax_included": true,
        "taxes": [{ "rate": 0.16, "type": "IVA", "factor": "Tasa", "withholding": false }],
        "local_taxes": [],
        "unit_key": "H87",
        "unit_name": "Pieza"
    })
}

pub fn invoice_json(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "created_at": "2024-05-02T12:00:00Z",
        "livemode": false,
        "status": status,
        "type": "I",
        "total": 400.9,
        "uuid": "39c85a3f-275b-4341-b259-e8971d9f8a94",
        "payment_form": "01",
        "currency": "MXN",
        "folio_number": 1204,
        "customer": {
            "id": "cus_1",
            "legal_name": "PÚBLICO EN GENERAL",
            "tax_id": "XAXX010101000"
        }
    })
}

pub fn page(data: Vec<Value>) -> Value {
    let count = data.len();
    json!({
        "page": 1,
        "total_pages": 1,
        "total_results": count,
        "data": data,
    })
}
