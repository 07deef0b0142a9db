// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, anyhow};
use homedash_api::Client;
use homedash_app::{RecordId, ServiceFormInput};
use std::io::Read;
use std::thread;
use std::time::Duration;
use tiny_http::{Header, Method, Response, Server};
use time::macros::date;

fn json_response(body: &str) -> Response<std::io::Cursor<Vec<u8>>> {
    Response::from_string(body)
        .with_status_code(200)
        .with_header(
            Header::from_bytes("Content-Type", "application/json")
                .expect("valid content type header"),
        )
}

fn start_server() -> Result<(Server, String)> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let addr = format!("http://{}", server.server_addr());
    Ok((server, addr))
}

#[test]
fn unreachable_backend_error_names_the_base_url() -> Result<()> {
    let client = Client::new("http://127.0.0.1:1", Some(Duration::from_millis(50)))?;

    let error = client
        .list_services()
        .expect_err("listing should fail for unreachable endpoint");
    let message = error.to_string();
    assert!(message.contains("cannot reach the booking API at http://127.0.0.1:1"));
    assert!(message.contains("[api].base_url"));
    Ok(())
}

#[test]
fn list_bookings_decodes_rows() -> Result<()> {
    let (server, addr) = start_server()?;

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        assert_eq!(request.method(), &Method::Get);
        assert_eq!(request.url(), "/api/bookings");
        let body = r#"[
            {"customer_id": 1, "customer_name": "Asha Rao", "customer_number": "9845012345",
             "city": "Pune", "booking_service_name": "Sofa Cleaning",
             "booking_date": "2025-02-01", "booking_time": "10:30 AM",
             "booking_status": "confirmed", "booking_amount": 1499},
            {"customer_id": 2, "customer_name": null, "customer_number": null,
             "booking_service_name": "Pest Control", "booking_amount": null}
        ]"#;
        request
            .respond(json_response(body))
            .expect("response should succeed");
    });

    let client = Client::new(&addr, Some(Duration::from_secs(1)))?;
    let bookings = client.list_bookings()?;
    assert_eq!(bookings.len(), 2);
    assert_eq!(bookings[0].id, "1");
    assert_eq!(bookings[0].customer_name.as_deref(), Some("Asha Rao"));
    assert_eq!(bookings[0].amount, Some(1499.0));
    assert_eq!(bookings[1].customer_name, None);
    assert_eq!(bookings[1].amount, None);

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn overview_and_statistics_pass_time_period() -> Result<()> {
    let (server, addr) = start_server()?;

    let handle = thread::spawn(move || {
        let overview = server.recv().expect("overview request expected");
        assert_eq!(overview.url(), "/api/bookings/overview?timePeriod=all-time");
        overview
            .respond(json_response(r#"{"totalBookings": 42, "totalRevenue": 125000}"#))
            .expect("response should succeed");

        let statistics = server.recv().expect("statistics request expected");
        assert_eq!(
            statistics.url(),
            "/api/bookings/statistics?timePeriod=last+7+days"
        );
        statistics
            .respond(json_response(r#"{"completed": 30, "cancelled": "4"}"#))
            .expect("response should succeed");
    });

    let client = Client::new(&addr, None)?;
    let overview = client.bookings_overview("all-time")?;
    assert_eq!(overview.number("totalBookings"), Some(42.0));

    let statistics = client.bookings_statistics("last 7 days")?;
    assert_eq!(statistics.number("cancelled"), Some(4.0));

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn create_service_posts_form_with_dates() -> Result<()> {
    let (server, addr) = start_server()?;

    let handle = thread::spawn(move || {
        let mut request = server.recv().expect("request expected");
        assert_eq!(request.method(), &Method::Post);
        assert_eq!(request.url(), "/customer/add-service");

        let mut raw = String::new();
        request
            .as_reader()
            .read_to_string(&mut raw)
            .expect("body should be readable");
        let body: serde_json::Value = serde_json::from_str(&raw).expect("body is JSON");
        assert_eq!(body["service_name"], "AC Repair");
        assert_eq!(body["service_cost"], "1200");
        assert_eq!(body["create_date"], "2025-06-09");
        assert_eq!(body["updated_date"], "2025-06-09");
        assert_eq!(body["active"], "Y");

        let echo = r#"{"id": 77, "service_name": "AC Repair", "service_cost": "1200",
                       "service_type": "Appliance", "active": "Y"}"#;
        request
            .respond(json_response(echo))
            .expect("response should succeed");
    });

    let mut form = ServiceFormInput::default();
    form.set_field("service_name", "AC Repair")?;
    form.set_field("service_cost", "1200")?;

    let client = Client::new(&addr, None)?;
    let created = client.create_service_on(&form, date!(2025 - 06 - 09))?;
    assert_eq!(created.id, "77");
    assert_eq!(created.price, 1200.0);
    assert_eq!(created.category, "Appliance");
    assert!(created.available);

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn delete_service_targets_the_selected_id() -> Result<()> {
    let (server, addr) = start_server()?;

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        assert_eq!(request.method(), &Method::Delete);
        assert_eq!(request.url(), "/customer/delete-service/42");
        request
            .respond(Response::empty(200))
            .expect("response should succeed");
    });

    let client = Client::new(&addr, None)?;
    client.delete_service(&RecordId::from("42"))?;

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn non_success_status_becomes_error() -> Result<()> {
    let (server, addr) = start_server()?;

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        assert_eq!(request.url(), "/customer/delete-service/9");
        let response = Response::from_string(r#"{"message":"service 9 not found"}"#)
            .with_status_code(404)
            .with_header(
                Header::from_bytes("Content-Type", "application/json")
                    .expect("valid content type header"),
            );
        request.respond(response).expect("response should succeed");
    });

    let client = Client::new(&addr, None)?;
    let error = client
        .delete_service(&RecordId::from("9"))
        .expect_err("404 should fail");
    assert_eq!(error.to_string(), "server error (404): service 9 not found");

    handle.join().expect("server thread should join");
    Ok(())
}
