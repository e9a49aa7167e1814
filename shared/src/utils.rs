use lambda_http::http::StatusCode;
use lambda_http::{Error, Response};
use serde::Serialize;

// Responses carry the CORS headers the browser client relies on.

pub fn empty_response(status: &StatusCode) -> Result<Response<String>, Error> {
    let response = Response::builder()
        .status(status)
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Credentials", "true")
        .body("".to_string())
        .map_err(Box::new)?;

    Ok(response)
}

pub fn json_response(
    status: &StatusCode,
    body: &impl Serialize,
) -> Result<Response<String>, Error> {
    let response = Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Credentials", "true")
        .body(serde_json::to_string(&body).unwrap())
        .map_err(Box::new)?;

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_response_should_set_content_type_and_cors_headers() {
        let response = json_response(&StatusCode::OK, &json!({"items": []})).unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["content-type"], "application/json");
        assert_eq!(response.headers()["Access-Control-Allow-Origin"], "*");
        assert_eq!(response.headers()["Access-Control-Allow-Credentials"], "true");
        assert_eq!(response.body(), &json!({"items": []}).to_string());
    }

    #[test]
    fn empty_response_should_have_empty_body() {
        let response = empty_response(&StatusCode::NOT_FOUND).unwrap();

        assert_eq!(response.status(), 404);
        assert_eq!(response.body(), "");
    }
}
