//! Error shape and authorization integration tests.

#[cfg(test)]
mod tests {
    use crate::{api_key, authorize, base_url, client, create_object, delete_object, unique_folder};

    async fn error_kind(resp: reqwest::Response) -> String {
        let body: serde_json::Value = resp.json().await.expect("error body json");
        body["error"]["kind"]
            .as_str()
            .expect("error body carries a kind")
            .to_owned()
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_return_not_found_for_missing_object() {
        let client = client();
        let folder = unique_folder("missing");

        let resp = client
            .get(format!("{}/{folder}/no-such-id", base_url()))
            .send()
            .await
            .expect("read missing object");
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);
        assert_eq!(error_kind(resp).await, "NotFound");
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_update_of_missing_object() {
        let client = client();
        let folder = unique_folder("noupsert");

        let resp = authorize(client.put(format!("{}/{folder}/no-such-id", base_url())))
            .json(&serde_json::json!({ "data": { "content": "never stored" } }))
            .send()
            .await
            .expect("update missing object");
        assert_eq!(
            resp.status(),
            reqwest::StatusCode::NOT_FOUND,
            "update never creates"
        );
        assert_eq!(error_kind(resp).await, "NotFound");
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_folder_containing_separator() {
        let client = client();

        let resp = authorize(client.post(format!("{}/bad__folder", base_url())))
            .json(&serde_json::json!({ "data": { "content": "x" } }))
            .send()
            .await
            .expect("create in invalid folder");
        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
        assert_eq!(error_kind(resp).await, "InvalidFolder");
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_malformed_upload_body() {
        let client = client();
        let folder = unique_folder("badbody");

        let resp = authorize(client.post(format!("{}/{folder}", base_url())))
            .header("Content-Type", "application/json")
            .body("not json")
            .send()
            .await
            .expect("create with bad body");
        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
        assert_eq!(error_kind(resp).await, "MalformedBody");
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_upload_without_supported_content_type() {
        let client = client();
        let folder = unique_folder("rawbody");

        let resp = authorize(client.post(format!("{}/{folder}", base_url())))
            .header("Content-Type", "text/plain")
            .body("bare bytes")
            .send()
            .await
            .expect("create with unsupported content type");
        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_unsupported_method() {
        let client = client();
        let folder = unique_folder("method");

        let resp = client
            .patch(format!("{}/{folder}/some-id", base_url()))
            .send()
            .await
            .expect("patch object");
        assert_eq!(resp.status(), reqwest::StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_deep_paths() {
        let client = client();

        let resp = client
            .get(format!("{}/a/b/c", base_url()))
            .send()
            .await
            .expect("deep path");
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);
        assert_eq!(error_kind(resp).await, "NoRoute");
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_unauthorized_mutations() {
        // Only meaningful when the server runs with an API key configured.
        if api_key().is_none() {
            return;
        }

        let client = client();
        let folder = unique_folder("auth");

        let resp = client
            .post(format!("{}/{folder}", base_url()))
            .json(&serde_json::json!({ "data": { "content": "no key" } }))
            .send()
            .await
            .expect("create without key");
        assert_eq!(resp.status(), reqwest::StatusCode::UNAUTHORIZED);

        let resp = client
            .post(format!("{}/{folder}", base_url()))
            .header("Authorization", "wrong-key")
            .json(&serde_json::json!({ "data": { "content": "bad key" } }))
            .send()
            .await
            .expect("create with wrong key");
        assert_eq!(resp.status(), reqwest::StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_leave_reads_open_without_key() {
        let client = client();
        let folder = unique_folder("openread");

        let id = create_object(&client, &folder, "readable", None, None).await;

        // Listing and reading carry no Authorization header at all.
        let resp = client
            .get(format!("{}/{folder}", base_url()))
            .send()
            .await
            .expect("list folder");
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        let resp = client
            .get(format!("{}/{folder}/{id}", base_url()))
            .send()
            .await
            .expect("read object");
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        delete_object(&client, &folder, &id).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_carry_request_id_on_every_response() {
        let client = client();

        let resp = client
            .get(base_url())
            .send()
            .await
            .expect("list folders");
        assert!(
            resp.headers().contains_key("x-request-id"),
            "responses should carry x-request-id"
        );
        assert_eq!(
            resp.headers().get("server").map(|v| v.to_str().unwrap()),
            Some("depot")
        );
    }
}
