//! Folder enumeration integration tests.

#[cfg(test)]
mod tests {
    use crate::{base_url, client, create_object, delete_object, unique_folder};

    async fn list_folders(client: &reqwest::Client) -> Vec<String> {
        client
            .get(base_url())
            .send()
            .await
            .expect("list folders")
            .json()
            .await
            .expect("folder listing json")
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_list_folder_once_it_holds_an_object() {
        let client = client();
        let folder = unique_folder("appear");

        assert!(
            !list_folders(&client).await.contains(&folder),
            "fresh folder name should not be listed yet"
        );

        let id = create_object(&client, &folder, "first", None, None).await;
        assert!(
            list_folders(&client).await.contains(&folder),
            "folder should appear after its first object"
        );

        delete_object(&client, &folder, &id).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_drop_folder_with_its_last_object() {
        let client = client();
        let folder = unique_folder("vanish");

        let id = create_object(&client, &folder, "only one", None, None).await;
        assert!(list_folders(&client).await.contains(&folder));

        delete_object(&client, &folder, &id).await;
        assert!(
            !list_folders(&client).await.contains(&folder),
            "folder should vanish with its last object"
        );
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_list_folders_sorted_and_deduplicated() {
        let client = client();
        let folder = unique_folder("sorted");

        let id1 = create_object(&client, &folder, "one", None, None).await;
        let id2 = create_object(&client, &folder, "two", None, None).await;

        let folders = list_folders(&client).await;
        assert_eq!(
            folders.iter().filter(|f| **f == folder).count(),
            1,
            "a folder with several objects is listed once"
        );

        let mut sorted = folders.clone();
        sorted.sort();
        assert_eq!(folders, sorted, "folder listing should be sorted");

        delete_object(&client, &folder, &id1).await;
        delete_object(&client, &folder, &id2).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_list_objects_with_metadata() {
        let client = client();
        let folder = unique_folder("listing");

        let id = create_object(
            &client,
            &folder,
            "listed content",
            Some("text/plain"),
            Some("listed.txt"),
        )
        .await;

        let listing: serde_json::Value = client
            .get(format!("{}/{folder}", base_url()))
            .send()
            .await
            .expect("list folder")
            .json()
            .await
            .expect("listing json");

        let entries = listing.as_array().expect("listing is an array");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["key"], id.as_str());
        assert_eq!(entries[0]["object_name"], "listed.txt");
        assert_eq!(entries[0]["content_type"], "text/plain");
        assert!(entries[0]["created_at"].is_string());
        assert!(entries[0]["accessed_at"].is_string());

        delete_object(&client, &folder, &id).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_list_unknown_folder_as_empty() {
        let client = client();
        let folder = unique_folder("empty");

        let listing: serde_json::Value = client
            .get(format!("{}/{folder}", base_url()))
            .send()
            .await
            .expect("list folder")
            .json()
            .await
            .expect("listing json");

        assert_eq!(listing, serde_json::json!([]));
    }
}
