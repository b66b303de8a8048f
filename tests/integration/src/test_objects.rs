//! Object CRUD integration tests.

#[cfg(test)]
mod tests {
    use crate::{authorize, base_url, client, create_object, delete_object, unique_folder};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_create_and_read_object() {
        let client = client();
        let folder = unique_folder("crud");

        let id = create_object(
            &client,
            &folder,
            "hello, depot!",
            Some("text/plain"),
            Some("greeting.txt"),
        )
        .await;

        let resp = client
            .get(format!("{}/{folder}/{id}", base_url()))
            .send()
            .await
            .expect("read object");
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        assert_eq!(
            resp.headers()
                .get("content-type")
                .map(|v| v.to_str().unwrap()),
            Some("text/plain"),
            "content type should match the upload"
        );
        assert_eq!(
            resp.headers()
                .get("content-disposition")
                .map(|v| v.to_str().unwrap()),
            Some(r#"attachment; filename="greeting.txt""#),
        );
        assert_eq!(
            resp.headers()
                .get("cache-control")
                .map(|v| v.to_str().unwrap()),
            Some("no-cache, no-store"),
            "reads should not be cached"
        );

        let body = resp.text().await.expect("read body");
        assert_eq!(body, "hello, depot!");

        delete_object(&client, &folder, &id).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_apply_defaults_for_bare_upload() {
        let client = client();
        let folder = unique_folder("defaults");

        let id = create_object(&client, &folder, "just content", None, None).await;

        let resp = client
            .get(format!("{}/{folder}/{id}", base_url()))
            .send()
            .await
            .expect("read object");
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        assert_eq!(
            resp.headers()
                .get("content-type")
                .map(|v| v.to_str().unwrap()),
            Some("application/octet-stream"),
            "missing type should default"
        );
        assert!(
            resp.headers().get("content-disposition").is_none(),
            "nameless objects should have no disposition"
        );

        delete_object(&client, &folder, &id).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_update_object() {
        let client = client();
        let folder = unique_folder("update");

        let id = create_object(
            &client,
            &folder,
            "version1",
            Some("text/plain"),
            Some("v1.txt"),
        )
        .await;

        let resp = authorize(client.put(format!("{}/{folder}/{id}", base_url())))
            .json(&serde_json::json!({
                "data": {
                    "content": "version2",
                    "type": "text/markdown",
                    "object_name": "v2.md",
                }
            }))
            .send()
            .await
            .expect("update object");
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        let summary: serde_json::Value = resp.json().await.expect("update summary");
        assert_eq!(summary["key"], id.as_str());
        assert_eq!(summary["object_name"], "v2.md");
        assert_eq!(summary["content_type"], "text/markdown");

        let resp = client
            .get(format!("{}/{folder}/{id}", base_url()))
            .send()
            .await
            .expect("read after update");
        assert_eq!(resp.text().await.expect("read body"), "version2");

        delete_object(&client, &folder, &id).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_delete_object() {
        let client = client();
        let folder = unique_folder("delete");

        let id = create_object(&client, &folder, "temp", None, None).await;

        let resp = authorize(client.delete(format!("{}/{folder}/{id}", base_url())))
            .send()
            .await
            .expect("delete object");
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        let deleted: String = resp.json().await.expect("delete echoes the id");
        assert_eq!(deleted, id);

        let resp = client
            .get(format!("{}/{folder}/{id}", base_url()))
            .send()
            .await
            .expect("read after delete");
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

        // Deleting again is a no-op, not an error.
        let resp = authorize(client.delete(format!("{}/{folder}/{id}", base_url())))
            .send()
            .await
            .expect("delete again");
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_accept_multipart_upload() {
        let client = client();
        let folder = unique_folder("multipart");

        let part = reqwest::multipart::Part::bytes(b"uploaded via form".to_vec())
            .file_name("upload.txt")
            .mime_str("text/plain")
            .expect("part mime");
        let form = reqwest::multipart::Form::new().part("data", part);

        let resp = authorize(client.post(format!("{}/{folder}", base_url())))
            .multipart(form)
            .send()
            .await
            .expect("multipart create");
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        let id: String = resp.json().await.expect("create returns the id");

        let resp = client
            .get(format!("{}/{folder}/{id}", base_url()))
            .send()
            .await
            .expect("read object");
        assert_eq!(
            resp.headers()
                .get("content-disposition")
                .map(|v| v.to_str().unwrap()),
            Some(r#"attachment; filename="upload.txt""#),
        );
        assert_eq!(resp.text().await.expect("read body"), "uploaded via form");

        delete_object(&client, &folder, &id).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_store_binary_content() {
        let client = client();
        let folder = unique_folder("binary");

        let body: Vec<u8> = (0..=255).collect();
        let part = reqwest::multipart::Part::bytes(body.clone())
            .file_name("bytes.bin")
            .mime_str("application/octet-stream")
            .expect("part mime");
        let form = reqwest::multipart::Form::new().part("data", part);

        let resp = authorize(client.post(format!("{}/{folder}", base_url())))
            .multipart(form)
            .send()
            .await
            .expect("multipart create");
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        let id: String = resp.json().await.expect("create returns the id");

        let resp = client
            .get(format!("{}/{folder}/{id}", base_url()))
            .send()
            .await
            .expect("read object");
        let got = resp.bytes().await.expect("read body");
        assert_eq!(got.as_ref(), body.as_slice(), "bytes should round-trip");

        delete_object(&client, &folder, &id).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_advance_access_time_on_read() {
        let client = client();
        let folder = unique_folder("touch");

        let id = create_object(&client, &folder, "watched", None, None).await;

        let first = listed_access_time(&client, &folder, &id).await;

        client
            .get(format!("{}/{folder}/{id}", base_url()))
            .send()
            .await
            .expect("read object");

        let second = listed_access_time(&client, &folder, &id).await;
        assert!(
            second >= first,
            "access time should advance: {first} -> {second}"
        );

        delete_object(&client, &folder, &id).await;
    }

    /// Fetch the `accessed_at` for one object from the folder listing.
    async fn listed_access_time(client: &reqwest::Client, folder: &str, id: &str) -> String {
        let listing: serde_json::Value = client
            .get(format!("{}/{folder}", crate::base_url()))
            .send()
            .await
            .expect("list folder")
            .json()
            .await
            .expect("listing json");
        let entry = listing
            .as_array()
            .expect("listing is an array")
            .iter()
            .find(|o| o["key"] == id)
            .unwrap_or_else(|| panic!("object {id} should be listed"));
        entry["accessed_at"]
            .as_str()
            .expect("accessed_at is a string")
            .to_owned()
    }
}
