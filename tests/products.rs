mod common;

use chrono::{TimeZone, Utc};
use facturapi::ListParams;
use facturapi::catalog::{TaxType, Taxability};
use facturapi::models::{NewProduct, ProductTax, ProductUpdate};
use httpmock::prelude::*;
use serde_json::json;

use common::{client, page, product_json};

#[test]
fn create_product_with_taxes() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/v2/products/").json_body(json!({
            "description": "Ukulele",
            "product_key": "60131324",
            "price": 345.6,
            "taxes": [{ "rate": 0.16, "type": "IVA", "factor": "Tasa", "withholding": false }],
            "unit_key": "H87",
            "unit_name": "Pieza",
            "sku": "UKU-01"
        }));
        then.status(200).json_body(product_json("prod_1"));
    });

    let product = client(&server)
        .products()
        .create(
            &NewProduct::new("Ukulele", "60131324", 345.6)
                .with_taxes(vec![ProductTax::transferred(TaxType::Iva, 0.16)])
                .with_unit("H87", "Pieza")
                .with_sku("UKU-01"),
        )
        .expect("product created");

    mock.assert();
    assert_eq!(product.id, "prod_1");
    assert_eq!(product.taxes[0].tax_type, TaxType::Iva);
    assert!(product.local_taxes.is_empty());
}

#[test]
fn crud_by_id() {
    let server = MockServer::start();
    let list = server.mock(|when, then| {
        when.method(GET)
            .path("/v2/products/")
            .query_param("q", "Ukulele");
        then.status(200)
            .json_body(page(vec![product_json("prod_1")]));
    });
    let update = server.mock(|when, then| {
        when.method(PUT)
            .path("/v2/products/prod_1")
            .json_body(json!({ "price": 399.0, "taxability": "02" }));
        let mut updated = product_json("prod_1");
        updated["price"] = json!(399.0);
        updated["taxability"] = json!("02");
        then.status(200).json_body(updated);
    });
    let delete = server.mock(|when, then| {
        when.method(DELETE).path("/v2/products/prod_1");
        then.status(200).json_body(product_json("prod_1"));
    });

    let facturapi = client(&server);
    let products = facturapi.products();

    let found = products
        .all(&ListParams::new().with_search("Ukulele"))
        .expect("listed");
    assert_eq!(found.len(), 1);

    let updated = products
        .update(
            &found[0].id,
            &ProductUpdate {
                price: Some(399.0),
                taxability: Some(Taxability::SiObjetoDeImpuesto),
                ..ProductUpdate::default()
            },
        )
        .expect("updated");
    assert!((updated.price - 399.0).abs() < f64::EPSILON);
    assert_eq!(updated.taxability, Some(Taxability::SiObjetoDeImpuesto));

    products.delete("prod_1").expect("deleted");

    list.assert();
    update.assert();
    delete.assert();
}

#[test]
fn list_forwards_every_filter() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v2/products/")
            .query_param("q", "Ukulele")
            .query_param("date[gt]", "2024-01-01T00:00:00.000Z")
            .query_param("date[lt]", "2024-02-01T00:00:00.000Z")
            .query_param("page", "3")
            .query_param("limit", "25");
        then.status(200).json_body(json!({
            "page": 3,
            "total_pages": 4,
            "total_results": 80,
            "data": [product_json("prod_51")]
        }));
    });

    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
    let products = client(&server)
        .products()
        .all(
            &ListParams::new()
                .with_search("Ukulele")
                .created_between(start, end)
                .with_page(3)
                .with_limit(25),
        )
        .expect("listed");

    mock.assert();
    assert_eq!(products.page, 3);
    assert!(products.has_more());
    assert_eq!(products.first().map(|p| p.id.as_str()), Some("prod_51"));
}
