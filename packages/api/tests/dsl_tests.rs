//! given/when/then integration tests
//!
//! Every request goes through an in-process closure transport that records
//! what was sent and answers with a canned response.

use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use restcheck::prelude::*;
use serde::{Deserialize, Serialize};

const LOTTO: &str = r#"{
    "lotto": {
        "lottoId": 5,
        "winning-numbers": [2, 45, 34, 23, 7, 5, 3],
        "winners": [
            {"winnerId": 23, "numbers": [2, 45, 34, 23, 3, 5]},
            {"winnerId": 54, "numbers": [52, 3, 12, 11, 18, 22]}
        ]
    }
}"#;

const GREETING: &str = "<greeting><firstName>John</firstName><lastName>Doe</lastName></greeting>";

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct Winner {
    winner_id: i64,
    numbers: Vec<i64>,
}

#[derive(Debug, Serialize)]
struct NewUser<'a> {
    name: &'a str,
    admin: bool,
}

/// A transport answering every request with `response`, keeping the last request
fn recording(response: Response) -> (impl Transport + 'static, Arc<Mutex<Option<Request>>>) {
    let sent = Arc::new(Mutex::new(None));
    let slot = Arc::clone(&sent);
    let transport = move |request: &Request| -> Result<Response, TransportError> {
        *slot.lock().expect("request slot") = Some(request.clone());
        Ok(response.clone())
    };
    (transport, sent)
}

fn last(sent: &Arc<Mutex<Option<Request>>>) -> Request {
    sent.lock().expect("request slot").clone().expect("a request was sent")
}

fn lotto() -> Response {
    Response::new(200)
        .with_content_type(ContentType::Json.with_charset("UTF-8"))
        .with_header("X-Request-Id", "abc-123")
        .with_header("Set-Cookie", "session=s3cr3t; Path=/; HttpOnly")
        .with_body(LOTTO)
}

#[cfg(test)]
mod request_tests {
    use super::*;

    #[test]
    fn path_and_query_params_build_the_target() {
        let (transport, sent) = recording(lotto());
        given()
            .transport(transport)
            .base_uri("http://api.example.com")
            .base_path("/v1")
            .path_param("id", 5)
            .query_param("draw", "last week")
            .when()
            .get("/lotto/{id}")
            .then()
            .status_code(200);

        let request = last(&sent);
        assert_eq!(request.method(), &Method::GET);
        assert_eq!(request.uri().as_str(), "http://api.example.com/v1/lotto/5?draw=last%20week");
    }

    #[test]
    fn localhost_defaults_to_port_8080() {
        let (transport, sent) = recording(lotto());
        given().transport(transport).when().delete("/lotto/5").then().status_code(200);
        assert_eq!(last(&sent).uri().as_str(), "http://localhost:8080/lotto/5");
        assert_eq!(last(&sent).method(), &Method::DELETE);
    }

    #[test]
    fn headers_cookies_and_auth_are_sent() {
        let (transport, sent) = recording(lotto());
        let expiry = Utc::now() + Duration::hours(1);
        given()
            .transport(transport)
            .header("X-Trace", "t-1")
            .accept(ContentType::Json)
            .cookie("theme", "dark")
            .detailed_cookie(Cookie::new("session", "abc").with_expiry(expiry).with_secured(true))
            .auth_basic("user", "secret")
            .when()
            .get("/lotto")
            .then()
            .status_code(200);

        let request = last(&sent);
        assert_eq!(request.headers().get_value("X-Trace"), Some("t-1"));
        assert_eq!(request.headers().get_value("Authorization"), Some("Basic dXNlcjpzZWNyZXQ="));
        assert!(request.headers().get_value("Accept").is_some_and(|v| v.starts_with("application/json")));
        assert_eq!(request.cookies().get_value("theme"), Some("dark"));

        let session = request.cookies().get("session").expect("detailed cookie sent");
        assert_eq!(session.expiry().map(|e| e.timestamp()), Some(expiry.timestamp()));
        assert!(session.is_secured());
    }

    #[test]
    fn form_params_are_url_encoded() {
        let (transport, sent) = recording(Response::new(201));
        given()
            .transport(transport)
            .form_param("name", "John Doe")
            .form_param("age", 42)
            .when()
            .post("/users")
            .then()
            .status_code(201);

        let request = last(&sent);
        assert_eq!(request.body_as_string(), "name=John+Doe&age=42");
        assert_eq!(request.content_type(), Some("application/x-www-form-urlencoded; charset=UTF-8"));
    }

    #[test]
    fn json_bodies_set_their_content_type() {
        let (transport, sent) = recording(Response::new(201));
        given()
            .transport(transport)
            .body_json(&NewUser { name: "ann", admin: false })
            .when()
            .put("/users/1")
            .then()
            .status_code(201);

        let request = last(&sent);
        assert_eq!(request.method(), &Method::PUT);
        assert_eq!(request.body_as_string(), r#"{"name":"ann","admin":false}"#);
        assert!(request.content_type().is_some_and(|ct| ct.starts_with("application/json")));
    }

    #[test]
    fn unresolved_path_params_fail_before_sending() {
        let (transport, sent) = recording(lotto());
        let err = given()
            .transport(transport)
            .when()
            .get("/lotto/{id}")
            .expect_err("placeholder without a value");
        assert!(matches!(err, RequestError::UnresolvedPathParam(_)));
        assert!(sent.lock().expect("request slot").is_none());
    }

    #[test]
    fn requests_need_a_transport() {
        let err = given().when().get("/lotto").expect_err("nothing to send through");
        assert_eq!(err, RequestError::MissingTransport);
    }

    #[test]
    fn specifications_are_reusable() {
        let (transport, sent) = recording(lotto());
        let spec = given().transport(transport).base_uri("http://api.example.com").port(9000);
        spec.get("/a").then().status_code(200);
        spec.head("/b").then().status_code(200);
        assert_eq!(last(&sent).uri().as_str(), "http://api.example.com:9000/b");
        assert_eq!(last(&sent).method(), &Method::HEAD);
    }
}

#[cfg(test)]
mod validation_tests {
    use super::*;

    #[test]
    fn json_bodies_are_validated_with_paths() {
        let (transport, _) = recording(lotto());
        RestCheck::with_transport(transport)
            .when()
            .get("/lotto")
            .then()
            .status_code(200)
            .status_line(contains_string("200 OK"))
            .content_type(ContentType::Json)
            .header("x-request-id", "abc-123")
            .cookie("session", "s3cr3t")
            .time(less_than(60_000))
            .body("lotto.lottoId", greater_than_or_equal_to(5))
            .body("lotto.winning-numbers", has_size(7))
            .body("lotto.winners.winnerId", has_items([54, 23]))
            .body("lotto.winners.find { it.winnerId == 23 }.numbers", has_item(45))
            .body("lotto.missing", null_value());
    }

    #[test]
    fn root_paths_prefix_body_paths() {
        let (transport, _) = recording(lotto());
        given()
            .transport(transport)
            .get("/lotto")
            .then()
            .root_path("lotto")
            .body("lottoId", 5)
            .append_root_path("winners")
            .body("winnerId", has_item(54))
            .detach_root_path("winners")
            .body("winning-numbers.size()", 7)
            .no_root_path()
            .body_root(has_key("lotto"));
    }

    #[test]
    fn xml_bodies_are_validated_with_paths() {
        let (transport, _) = recording(
            Response::new(200)
                .with_content_type("application/xml; charset=UTF-8")
                .with_body(GREETING),
        );
        given()
            .transport(transport)
            .get("/greeting")
            .then()
            .content_type(ContentType::Xml)
            .body("greeting.firstName", "John")
            .body("greeting.lastName", ends_with("oe"))
            .body("greeting.children().size()", 2)
            .body_text(starts_with("<greeting>"));
    }

    #[test]
    #[should_panic(expected = "1 expectation failed.")]
    fn mismatches_panic() {
        lotto().then().body("lotto.lottoId", 6);
    }

    #[test]
    #[should_panic(expected = "Request failed")]
    fn failed_requests_panic_on_then() {
        given().get("/lotto").then();
    }

    #[test]
    fn specifications_collect_every_failure() {
        let spec = expect()
            .expect_status_code(404)
            .expect_header("X-Request-Id", "abc-123")
            .root_path("lotto")
            .expect_body("lottoId", 7)
            .expect_body("winners", has_size(2));
        let err = spec.validate(&lotto()).expect_err("status and id are wrong");
        assert_eq!(err.len(), 2);
        assert!(err.to_string().starts_with("2 expectations failed."));
        assert!(err.failures()[1].contains("lotto.lottoId"));
    }

    #[test]
    fn specifications_apply_to_responses() {
        let spec = expect()
            .expect_status_code(200)
            .expect_content_type("application/json")
            .expect_cookie("session", not_null_value())
            .expect_body("lotto.winners", not(empty()));
        lotto().then().assert_that(&spec).and().status_code(200);
    }
}

#[cfg(test)]
mod extraction_tests {
    use super::*;

    #[test]
    fn values_are_extracted_after_validation() {
        let (transport, _) = recording(lotto());
        let extracted = given()
            .transport(transport)
            .get("/lotto")
            .then()
            .status_code(200)
            .extract();

        assert_eq!(extracted.status_code(), 200);
        assert_eq!(extracted.header("X-Request-Id"), Some("abc-123"));
        assert_eq!(extracted.cookie("session"), Some("s3cr3t"));
        assert_eq!(extracted.path_as::<i32>("lotto.lottoId").expect("id"), 5);
        assert_eq!(
            extracted.path("lotto.winners.winnerId").expect("ids"),
            PathValue::from(vec![23, 54])
        );

        let winners: Vec<Winner> = extracted
            .json_path()
            .expect("json body")
            .get_object("lotto.winners")
            .expect("winner shape");
        assert_eq!(winners[1], Winner { winner_id: 54, numbers: vec![52, 3, 12, 11, 18, 22] });
    }

    #[test]
    fn whole_bodies_deserialize() {
        #[derive(Debug, Deserialize)]
        struct Envelope {
            lotto: Lotto,
        }

        #[derive(Debug, Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Lotto {
            lotto_id: i32,
            winners: Vec<Winner>,
        }

        let envelope: Envelope = lotto().then().extract().body_as().expect("lotto shape");
        assert_eq!(envelope.lotto.lotto_id, 5);
        assert_eq!(envelope.lotto.winners.len(), 2);
    }
}
