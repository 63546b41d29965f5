#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use papo_reto::config::ClientOptions;
    use papo_reto::messages::{SendMessageRequest, UpdateMessageRequest};
    use papo_reto::session::MemorySessionStore;
    use papo_reto::PapoReto;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn setup_client(server: &MockServer) -> PapoReto {
        let options = ClientOptions::default()
            .with_base_url(&format!("{}/api/v1", server.uri()))
            .unwrap();
        PapoReto::new_with_options(options, Arc::new(MemorySessionStore::with_token("t-1")))
            .unwrap()
    }

    #[tokio::test]
    async fn test_get_messages_uses_default_paging() {
        let server = MockServer::start().await;
        let client = setup_client(&server);

        Mock::given(method("GET"))
            .and(path("/api/v1/groups/g1/messages"))
            .and(query_param("page", "1"))
            .and(query_param("pageSize", "20"))
            .and(header("Authorization", "Bearer t-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "messages": [
                    { "id": "m1", "content": "hi", "isRead": false, "isFavorite": true },
                    { "id": "m2", "content": "it's me", "isRevealed": true, "senderID": "u7" }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let page = client
            .messages()
            .get_messages("g1", None, None)
            .await
            .data
            .unwrap();

        assert_eq!(page.messages.len(), 2);
        assert!(page.messages[0].is_favorite);
        assert_eq!(page.messages[1].sender_id.as_deref(), Some("u7"));
    }

    #[tokio::test]
    async fn test_get_messages_explicit_paging() {
        let server = MockServer::start().await;
        let client = setup_client(&server);

        Mock::given(method("GET"))
            .and(path("/api/v1/groups/g1/messages"))
            .and(query_param("page", "3"))
            .and(query_param("pageSize", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "messages": null })))
            .expect(1)
            .mount(&server)
            .await;

        let page = client
            .messages()
            .get_messages("g1", Some(3), Some(5))
            .await
            .data
            .unwrap();

        assert!(page.messages.is_empty());
    }

    #[tokio::test]
    async fn test_mark_as_read_matches_explicit_update() {
        let server = MockServer::start().await;
        let client = setup_client(&server);

        Mock::given(method("PUT"))
            .and(path("/api/v1/messages/m1"))
            .and(body_json(json!({ "isRead": true })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "updated" })))
            .expect(2)
            .mount(&server)
            .await;

        let shortcut = client.messages().mark_as_read("m1").await;
        let explicit = client
            .messages()
            .update_message(
                "m1",
                &UpdateMessageRequest {
                    is_read: Some(true),
                    is_favorite: None,
                },
            )
            .await;

        assert_eq!(shortcut, explicit);
    }

    #[tokio::test]
    async fn test_toggle_favorite_sends_only_favorite_flag() {
        let server = MockServer::start().await;
        let client = setup_client(&server);

        Mock::given(method("PUT"))
            .and(path("/api/v1/messages/m1"))
            .and(body_json(json!({ "isFavorite": false })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "updated" })))
            .expect(1)
            .mount(&server)
            .await;

        let response = client.messages().toggle_favorite("m1", false).await;

        assert!(response.is_success());
    }

    #[tokio::test]
    async fn test_delete_message() {
        let server = MockServer::start().await;
        let client = setup_client(&server);

        Mock::given(method("DELETE"))
            .and(path("/api/v1/messages/m1"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "message not found" })))
            .expect(1)
            .mount(&server)
            .await;

        let response = client.messages().delete_message("m1").await;

        assert_eq!(response.status, 404);
        assert_eq!(response.error.as_deref(), Some("message not found"));
    }

    #[tokio::test]
    async fn test_anonymous_send_never_carries_credential() {
        let server = MockServer::start().await;
        let client = setup_client(&server);
        assert!(client.auth().is_authenticated());

        Mock::given(header_exists("Authorization"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/v1/public/send/team-feedback"))
            .and(body_json(json!({ "content": "great talk", "revealName": false })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "message": "sent" })))
            .expect(1)
            .mount(&server)
            .await;

        let request = SendMessageRequest {
            content: "great talk".to_string(),
            sender_id: None,
            reveal_name: Some(false),
        };
        let response = client
            .messages()
            .send_anonymous_message("team-feedback", &request)
            .await;

        assert_eq!(response.status, 201);
        assert_eq!(response.data.unwrap().message, "sent");
    }
}
